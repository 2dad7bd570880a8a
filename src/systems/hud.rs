//! Monitor HUD.
//!
//! Drawn last, above the camera feed and its overlays: night number and active
//! camera in the top-left corner, remaining power and usage in the bottom-left
//! corner. The typeface comes from the resource cache, so a family missing on
//! the host silently falls back to the default font.

use bevy_ecs::prelude::Resource;
use raylib::prelude::{Color, Vector2};

use crate::resources::office::OfficeState;
use crate::resources::resourcecache::{AssetLoader, AssetTypes, ResourceCache};
use crate::resources::screensize::ScreenSize;
use crate::systems::render::Canvas;

const MARGIN: f32 = 24.0;

/// Typeface and colour of the HUD text.
#[derive(Resource, Debug, Clone)]
pub struct HudStyle {
    pub family: String,
    pub size: i32,
    pub color: Color,
}

impl HudStyle {
    pub fn new(family: impl Into<String>, size: i32) -> Self {
        Self {
            family: family.into(),
            size,
            color: Color::WHITE,
        }
    }
}

/// HUD lines for `state`, top-left block first.
pub fn hud_lines(state: &OfficeState) -> ([String; 2], [String; 2]) {
    let power = state.power.level.clamp(0.0, 100.0).floor() as i32;
    (
        [
            format!("Night {}", state.night),
            format!("CAM {}", state.player.current_camera.to_uppercase()),
        ],
        [
            format!("Power left: {}%", power),
            format!("Usage: {}", state.power.usage),
        ],
    )
}

pub fn draw_hud<K, F>(
    frame: &mut F,
    cache: &mut ResourceCache<K>,
    style: &HudStyle,
    state: &OfficeState,
    screen: ScreenSize,
) where
    K: AssetTypes,
    F: Canvas<K> + AssetLoader<K>,
{
    let font = cache.typeface(frame, &style.family, style.size);
    let size = style.size as f32;
    let line = size + 4.0;
    let (top, bottom) = hud_lines(state);

    for (i, text) in top.iter().enumerate() {
        let position = Vector2 {
            x: MARGIN,
            y: MARGIN + i as f32 * line,
        };
        frame.draw_text(&font, text, position, size, style.color);
    }

    let bottom_y = screen.h as f32 - MARGIN - bottom.len() as f32 * line;
    for (i, text) in bottom.iter().enumerate() {
        let position = Vector2 {
            x: MARGIN,
            y: bottom_y + i as f32 * line,
        };
        frame.draw_text(&font, text, position, size, style.color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_show_night_camera_and_power() {
        let mut state = OfficeState::default();
        state.night = 3;
        state.player.current_camera = "cam2b".into();
        state.power.level = 42.9;
        state.power.usage = 3;
        let (top, bottom) = hud_lines(&state);
        assert_eq!(top, ["Night 3".to_string(), "CAM CAM2B".to_string()]);
        assert_eq!(
            bottom,
            ["Power left: 42%".to_string(), "Usage: 3".to_string()]
        );
    }

    #[test]
    fn power_is_clamped() {
        let mut state = OfficeState::default();
        state.power.level = -3.0;
        assert_eq!(hud_lines(&state).1[0], "Power left: 0%");
    }
}
