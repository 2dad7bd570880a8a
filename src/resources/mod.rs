//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution: asset caches, the office snapshot,
//! pointer and timing state, and configuration.
//!
//! Overview
//! - `animation` – frame animation definitions loaded from JSON
//! - `assetid` – engine/project asset identifiers and their file locations
//! - `fontresolver` – lookup of installed system font files by family name
//! - `gameconfig` – INI-backed runtime configuration
//! - `office` – snapshot of the running night read by the camera monitor
//! - `overlaybuttons` – cached overlay button widgets
//! - `panstate` – horizontal pan animation of the camera feed
//! - `pointer` – per-frame mouse state
//! - `raylibassets` – raylib-backed asset types and loader
//! - `resourcecache` – keyed cache of typefaces, textures, animations and sounds
//! - `screensize` – framebuffer dimensions and overlay scale
//! - `session` – first fatal error, checked by the main loop
//! - `worldtime` – simulation time and delta
pub mod animation;
pub mod assetid;
pub mod fontresolver;
pub mod gameconfig;
pub mod office;
pub mod overlaybuttons;
pub mod panstate;
pub mod pointer;
pub mod raylibassets;
pub mod resourcecache;
pub mod screensize;
pub mod session;
pub mod worldtime;
