//! Per-frame pointer input resource.
//!
//! Mouse position and left button state, in screen pixels, captured once per
//! frame by [`crate::systems::input::update_pointer_state`] so widgets can be
//! updated without touching raylib.

use bevy_ecs::prelude::Resource;
use raylib::prelude::Vector2;

#[derive(Resource, Debug, Clone, Copy)]
pub struct PointerState {
    pub position: Vector2,
    /// Left button held this frame.
    pub down: bool,
    /// Left button went down this frame.
    pub just_pressed: bool,
}

impl Default for PointerState {
    fn default() -> Self {
        Self {
            position: Vector2 { x: -1.0, y: -1.0 },
            down: false,
            just_pressed: false,
        }
    }
}

impl PointerState {
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            position: Vector2 { x, y },
            ..Self::default()
        }
    }

    pub fn pressed(mut self) -> Self {
        self.down = true;
        self.just_pressed = true;
        self
    }
}
