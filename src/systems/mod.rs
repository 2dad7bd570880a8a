//! Engine systems.
//!
//! This module groups the ECS systems that read input, advance time and draw
//! the camera monitor.
//!
//! Submodules overview
//! - [`camera`] – overlay button updates and the camera scene draw
//! - [`hud`] – night, camera and power read-outs
//! - [`input`] – read the mouse and update [`crate::resources::pointer::PointerState`]
//! - [`render`] – draw primitives and the per-frame render system
//! - [`time`] – update simulation time and delta

pub mod camera;
pub mod hud;
pub mod input;
pub mod render;
pub mod time;
