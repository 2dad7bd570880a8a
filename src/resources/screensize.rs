//! Screen size and overlay scaling resources.
//!
//! [`ScreenSize`] stores the framebuffer dimensions in pixels; the camera
//! scene uses its width as the viewport width when computing how far a feed
//! can pan. Overlay coordinates are authored against a fixed canvas and
//! multiplied by [`OverlayScale`] before drawing.

use bevy_ecs::prelude::Resource;

/// Width of the canvas overlay positions are authored on.
pub const AUTHORED_WIDTH: f32 = 1280.0;
/// Height of the canvas overlay positions are authored on.
pub const AUTHORED_HEIGHT: f32 = 720.0;

/// Current screen size in pixels.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenSize {
    /// Width in pixels.
    pub w: i32,
    /// Height in pixels.
    pub h: i32,
}

/// Multipliers from authored overlay coordinates to screen pixels.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct OverlayScale {
    pub x: f32,
    pub y: f32,
}

impl Default for OverlayScale {
    fn default() -> Self {
        Self { x: 1.0, y: 1.0 }
    }
}

impl OverlayScale {
    /// Scale mapping the authored canvas onto `screen`.
    pub fn for_screen(screen: ScreenSize) -> Self {
        Self {
            x: screen.w as f32 / AUTHORED_WIDTH,
            y: screen.h as f32 / AUTHORED_HEIGHT,
        }
    }

    pub fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        (x * self.x, y * self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authored_resolution_is_identity() {
        let scale = OverlayScale::for_screen(ScreenSize { w: 1280, h: 720 });
        assert_eq!(scale, OverlayScale::default());
        assert_eq!(scale.apply(100.0, 50.0), (100.0, 50.0));
    }

    #[test]
    fn scales_each_axis() {
        let scale = OverlayScale::for_screen(ScreenSize { w: 1920, h: 1080 });
        assert_eq!(scale.apply(100.0, 100.0), (150.0, 150.0));
        let scale = OverlayScale::for_screen(ScreenSize { w: 640, h: 720 });
        assert_eq!(scale.apply(100.0, 100.0), (50.0, 100.0));
    }
}
