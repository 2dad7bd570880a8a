//! Input systems.
//!
//! - [`update_pointer_state`] reads the mouse from Raylib each frame and
//!   writes the results into [`crate::resources::pointer::PointerState`].
use bevy_ecs::prelude::*;
use raylib::prelude::MouseButton;

use crate::resources::pointer::PointerState;

/// Poll Raylib for mouse input and update the `PointerState` resource.
pub fn update_pointer_state(mut pointer: ResMut<PointerState>, rl: NonSend<raylib::RaylibHandle>) {
    pointer.position = rl.get_mouse_position();
    pointer.down = rl.is_mouse_button_down(MouseButton::MOUSE_BUTTON_LEFT);
    pointer.just_pressed = rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT);
}
