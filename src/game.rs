//! Session setup, host-side glue and teardown.
//!
//! - [`setup`] preloads the project's fonts and loads the office snapshot
//!   under the loading lock.
//! - [`camera_button_system`] switches the active camera when a camera map
//!   button is pressed.
//! - [`teardown`] drops every cached resource while the window and audio
//!   device are still alive.

use bevy_ecs::prelude::*;
use log::{error, info, warn};

use crate::resources::gameconfig::GameConfig;
use crate::resources::office::{OfficeCore, OfficeError, OfficeState};
use crate::resources::overlaybuttons::{OverlayButtonCache, button_uid};
use crate::resources::raylibassets::{RaylibAssets, RaylibLoader};
use crate::resources::resourcecache::ResourceCache;
use crate::resources::session::SessionStatus;

/// Office snapshot file inside the project directory.
pub const OFFICE_FILE: &str = "office.json";

/// Read the office snapshot of the configured project.
pub fn load_office(config: &GameConfig) -> Result<OfficeState, OfficeError> {
    OfficeState::load_from_file(&config.project_path.join(OFFICE_FILE))
}

pub fn setup(
    mut rl: NonSendMut<raylib::RaylibHandle>,
    th: NonSend<raylib::RaylibThread>,
    mut cache: NonSendMut<ResourceCache<RaylibAssets>>,
    config: Res<GameConfig>,
    mut office: ResMut<OfficeCore>,
    mut status: ResMut<SessionStatus>,
) {
    office.loading_lock = true;

    let mut loader = RaylibLoader::new(&mut rl, &th);
    if let Err(e) = cache.preload_project_fonts(&mut loader) {
        error!("Font preload failed: {}", e);
        status.fail(e);
        return;
    }

    match load_office(&config) {
        Ok(state) => {
            info!(
                "Night {} loaded with {} cameras",
                state.night,
                state.cameras.len()
            );
            office.state = Some(state);
            office.loading_lock = false;
        }
        Err(e) => {
            error!("{}", e);
            status.fail(e);
        }
    }
}

/// Switch to the camera named by a pressed overlay button.
///
/// Buttons whose id is not a camera are ignored. The camera monitor's switch
/// sound, if any, is played on every switch.
pub fn camera_button_system(
    mut rl: NonSendMut<raylib::RaylibHandle>,
    th: NonSend<raylib::RaylibThread>,
    mut cache: NonSendMut<ResourceCache<RaylibAssets>>,
    buttons: NonSend<OverlayButtonCache<RaylibAssets>>,
    mut office: ResMut<OfficeCore>,
    mut status: ResMut<SessionStatus>,
) {
    if office.loading_lock {
        return;
    }
    let Some(state) = office.state.as_mut() else {
        return;
    };

    for button in buttons.clicked() {
        let Some(camera_id) = state
            .camera_ui
            .buttons
            .values()
            .find(|b| button.uid == button_uid(&b.id, &b.sprite))
            .map(|b| b.id.clone())
        else {
            continue;
        };
        if !state.cameras.contains_key(&camera_id) {
            continue;
        }
        if state.player.current_camera == camera_id {
            continue;
        }
        info!("Switching to camera '{}'", camera_id);
        state.player.current_camera = camera_id;

        let sound = state.camera_ui.switch_sound.clone();
        if sound.is_empty() {
            continue;
        }
        let mut loader = RaylibLoader::new(&mut rl, &th);
        match cache.sound(&mut loader, &sound) {
            Ok(sound) => sound.play(),
            Err(e) => {
                error!("{}", e);
                status.fail(e);
                return;
            }
        }
    }
}

/// Drop every cached resource before raylib shuts down.
pub fn teardown(world: &mut World) {
    if let Some(buttons) = world.remove_non_send_resource::<OverlayButtonCache<RaylibAssets>>() {
        drop(buttons);
    }
    if let Some(cache) = world.remove_non_send_resource::<ResourceCache<RaylibAssets>>() {
        let stats = cache.stats();
        info!(
            "Releasing {} typefaces, {} textures, {} animations, {} sounds",
            stats.typefaces, stats.textures, stats.animations, stats.sounds
        );
        drop(cache);
    } else {
        warn!("Resource cache already released");
    }
}
