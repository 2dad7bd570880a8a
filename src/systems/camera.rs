//! Camera monitor scene.
//!
//! Update and draw of the active camera feed:
//! - [`update_overlay_buttons_system`] advances every cached overlay button
//!   once per frame, before anything is drawn.
//! - [`draw_camera_scene`] resolves textures through the
//!   [`ResourceCache`], advances the [`PanState`] and draws, in order, the
//!   camera image, the overlay sprites, the overlay buttons and the HUD.
//!
//! The scene reads the office state and never writes to it; the only state it
//! owns is the pan animation and the button widgets.

use bevy_ecs::prelude::*;
use log::debug;
use raylib::prelude::{Color, Vector2};

use crate::resources::office::OfficeCore;
use crate::resources::overlaybuttons::{OverlayButtonCache, button_uid};
use crate::resources::panstate::{PanState, max_scroll, pivot_proximity};
use crate::resources::pointer::PointerState;
use crate::resources::resourcecache::{AssetLoader, AssetTypes, ResourceCache, ResourceError};
use crate::resources::screensize::{OverlayScale, ScreenSize};
use crate::resources::worldtime::WorldTime;
use crate::systems::hud::{HudStyle, draw_hud};
use crate::systems::render::Canvas;

/// Advance every overlay button widget, in creation order.
pub fn update_overlay_buttons<K: AssetTypes>(
    buttons: &mut OverlayButtonCache<K>,
    pointer: &PointerState,
    delta: f32,
) {
    buttons.update_all(pointer, delta);
    for button in buttons.clicked() {
        debug!("Overlay button '{}' pressed", button.uid);
    }
}

/// ECS wrapper around [`update_overlay_buttons`].
pub fn update_overlay_buttons_system<K: AssetTypes + 'static>(
    mut buttons: NonSendMut<OverlayButtonCache<K>>,
    pointer: Res<PointerState>,
    time: Res<WorldTime>,
) {
    update_overlay_buttons(&mut buttons, &pointer, time.delta);
}

/// Everything the camera scene reads or owns during one draw.
pub struct CameraScene<'a, K: AssetTypes> {
    pub cache: &'a mut ResourceCache<K>,
    pub buttons: &'a mut OverlayButtonCache<K>,
    pub pan: &'a mut PanState,
    pub office: &'a OfficeCore,
    pub screen: ScreenSize,
    pub scale: OverlayScale,
    pub hud: &'a HudStyle,
    /// Seconds since the previous frame.
    pub delta: f32,
}

/// Draw one frame of the camera monitor.
///
/// Nothing is drawn while the office is loading or absent. A texture that
/// fails to load aborts the frame with the error.
pub fn draw_camera_scene<K, F>(frame: &mut F, scene: CameraScene<'_, K>) -> Result<(), ResourceError>
where
    K: AssetTypes,
    F: Canvas<K> + AssetLoader<K>,
{
    let CameraScene {
        cache,
        buttons,
        pan,
        office,
        screen,
        scale,
        hud,
        delta,
    } = scene;

    let Some(state) = office.drawable() else {
        return Ok(());
    };

    // Camera feed
    if let Some(camera) = state.active_camera() {
        if let Some(sprite) = camera.current_sprite() {
            let feed = cache.texture(frame, sprite)?;
            let max = max_scroll(K::texture_width(&feed), screen.w);
            *pan = pan.advance(delta, pivot_proximity(camera.scroll), max);
            frame.draw_texture(&feed, pan.draw_x(), 0);
        }
    }

    // Overlay sprites
    for sprite in state.camera_ui.sprites.values() {
        if !sprite.visible || sprite.sprite.is_empty() {
            continue;
        }
        let texture = cache.texture(frame, &sprite.sprite)?;
        let (x, y) = scale.apply(sprite.x, sprite.y);
        frame.draw_texture_v(&texture, Vector2 { x, y }, Color::WHITE);
    }

    // Overlay buttons
    for button in state.camera_ui.buttons.values() {
        if button.sprite.is_empty() || !button.visible {
            continue;
        }
        let uid = button_uid(&button.id, &button.sprite);
        let (x, y) = scale.apply(button.x, button.y);
        let position = Vector2 { x, y };
        let widget = buttons.get_or_create(&uid, position, || {
            cache.texture(frame, &button.sprite)
        })?;
        widget.position = position;
        frame.draw_texture_v(&widget.texture, widget.position, widget.tint());
    }

    draw_hud(frame, cache, hud, state, screen);
    Ok(())
}
