//! Nightwatch runtime library.
//!
//! This module exposes the runtime's resources, systems and session glue for
//! use in integration tests and as a reusable library.

pub mod game;
pub mod resources;
pub mod systems;
