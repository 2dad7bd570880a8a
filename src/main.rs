//! Nightwatch main entry point.
//!
//! Runtime for a night-shift camera monitor game, written in Rust using:
//! - **raylib** for windowing, graphics, and audio
//! - **bevy_ecs** for resources, systems and scheduling
//!
//! # Project Structure
//!
//! - [`game`] – session setup, camera switching and teardown
//! - [`resources`] – ECS resources (asset cache, office state, pan state, etc.)
//! - [`systems`] – ECS systems (input, time, camera scene, rendering)
//!
//! # Main Loop
//!
//! 1. Load `config.ini` and apply command line overrides
//! 2. Initialize raylib window, audio device and ECS resources
//! 3. Run the setup system: preload project fonts, load the office snapshot
//! 4. Run the main loop until the window closes or a fatal error is recorded:
//!    - Read the mouse, advance overlay buttons, switch cameras
//!    - Draw the camera feed, overlays and HUD
//! 5. Release every cached asset before the window and audio device close
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --project ./project
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

mod game;
mod resources;
mod systems;

use std::path::PathBuf;

use bevy_ecs::prelude::*;
use bevy_ecs::system::RunSystemOnce;
use clap::Parser;
use raylib::prelude::RaylibAudio;

use crate::resources::fontresolver::FontResolver;
use crate::resources::gameconfig::GameConfig;
use crate::resources::office::OfficeCore;
use crate::resources::overlaybuttons::OverlayButtonCache;
use crate::resources::panstate::PanState;
use crate::resources::pointer::PointerState;
use crate::resources::raylibassets::RaylibAssets;
use crate::resources::resourcecache::ResourceCache;
use crate::resources::screensize::{OverlayScale, ScreenSize};
use crate::resources::session::SessionStatus;
use crate::resources::worldtime::WorldTime;
use crate::systems::camera::update_overlay_buttons_system;
use crate::systems::hud::HudStyle;
use crate::systems::input::update_pointer_state;
use crate::systems::render::render_system;
use crate::systems::time::update_world_time;

/// Nightwatch camera monitor runtime
#[derive(Parser)]
#[command(version, about = "Night-shift camera monitor runtime")]
struct Cli {
    /// Path of the INI configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Game project directory (overrides `[project] path`).
    #[arg(long, value_name = "DIR")]
    project: Option<PathBuf>,

    /// Runtime directory holding the engine `res/` folder
    /// (overrides `[runtime] resources`).
    #[arg(long, value_name = "DIR")]
    runtime_dir: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::with_path(cli.config);
    if let Err(e) = config.load_from_file() {
        log::warn!("{}; using defaults", e);
    }
    if let Some(project) = cli.project {
        config.project_path = project;
    }
    if let Some(runtime) = cli.runtime_dir {
        config.runtime_path = Some(runtime);
    }

    log::info!("Starting Nightwatch with project {:?}", config.project_path);

    // --------------- Raylib window & audio ---------------
    let (window_width, window_height) = config.window_size();
    let mut builder = raylib::init();
    builder
        .size(window_width as i32, window_height as i32)
        .title("Nightwatch");
    if config.vsync {
        builder.vsync();
    }
    if config.fullscreen {
        builder.fullscreen();
    }
    let (mut rl, thread) = builder.build();
    rl.set_target_fps(config.target_fps);
    rl.set_exit_key(None);

    // Declared before the world so it outlives every cached sound.
    let audio = match RaylibAudio::init_audio_device() {
        Ok(audio) => Some(audio),
        Err(e) => {
            log::warn!("Audio device unavailable: {:?}", e);
            None
        }
    };

    // --------------- ECS world + resources ---------------
    let screen = ScreenSize {
        w: rl.get_screen_width(),
        h: rl.get_screen_height(),
    };
    let cache = ResourceCache::<RaylibAssets>::new(config.asset_roots(), FontResolver::system());

    let mut world = World::new();
    world.insert_resource(WorldTime::default().with_time_scale(1.0));
    world.insert_resource(screen);
    world.insert_resource(OverlayScale::for_screen(screen));
    world.insert_resource(PointerState::default());
    world.insert_resource(OfficeCore::default());
    world.insert_resource(PanState::default());
    world.insert_resource(HudStyle::new(config.hud_font.clone(), config.hud_font_size));
    world.insert_resource(SessionStatus::default());
    world.insert_resource(config);
    world.insert_non_send_resource(rl);
    world.insert_non_send_resource(thread);
    world.insert_non_send_resource(cache);
    world.insert_non_send_resource(OverlayButtonCache::<RaylibAssets>::new());

    if let Err(e) = world.run_system_once(game::setup) {
        log::error!("Setup system failed to run: {}", e);
        world.resource_mut::<SessionStatus>().fail(e);
    }

    let mut update = Schedule::default();
    update.add_systems(
        (
            update_pointer_state,
            update_overlay_buttons_system::<RaylibAssets>,
            game::camera_button_system,
            render_system,
        )
            .chain(),
    );

    // --------------- Main loop ---------------
    while !world
        .non_send_resource::<raylib::RaylibHandle>()
        .window_should_close()
        && world.resource::<SessionStatus>().is_running()
    {
        let dt = world
            .non_send_resource::<raylib::RaylibHandle>()
            .get_frame_time();
        update_world_time(&mut world, dt);

        update.run(&mut world);

        world.clear_trackers();
    }

    let fatal = world
        .resource::<SessionStatus>()
        .fatal()
        .map(str::to_string);
    game::teardown(&mut world);
    drop(world);
    drop(audio);

    if let Some(reason) = fatal {
        log::error!("Session ended with a fatal error: {}", reason);
        std::process::exit(1);
    }
}
