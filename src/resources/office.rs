//! Office simulation state shared with the camera scene.
//!
//! The structures here are owned and mutated by the simulation (animatronic
//! movement, power drain, camera switching). The camera scene only reads them
//! every frame. [`OfficeCore`] is the ECS resource wrapping the state together
//! with the global loading lock.

use std::path::{Path, PathBuf};

use bevy_ecs::prelude::Resource;
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OfficeError {
    #[error("failed to read office definition '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid office definition '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Global office state and the lock held while a night is being set up.
#[derive(Resource, Debug, Default)]
pub struct OfficeCore {
    /// Set while the simulation swaps state; nothing is drawn meanwhile.
    pub loading_lock: bool,
    /// `None` until a night has been loaded.
    pub state: Option<OfficeState>,
}

impl OfficeCore {
    /// State to draw this frame, if any.
    pub fn drawable(&self) -> Option<&OfficeState> {
        if self.loading_lock {
            return None;
        }
        self.state.as_ref()
    }
}

/// A camera feed in the camera graph.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OfficeCamera {
    /// State name to sprite identifier; an empty identifier draws nothing.
    pub states: FxHashMap<String, String>,
    /// Current state name.
    pub state: String,
    /// Pan pivot of the feed, in authored camera units.
    pub scroll: f32,
}

impl OfficeCamera {
    /// Sprite of the current state, `None` when missing or empty.
    pub fn current_sprite(&self) -> Option<&str> {
        self.states
            .get(&self.state)
            .map(String::as_str)
            .filter(|path| !path.is_empty())
    }
}

/// An overlay sprite drawn above the feed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UiSprite {
    pub x: f32,
    pub y: f32,
    pub sprite: String,
    pub visible: bool,
}

/// An interactive overlay button.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UiButton {
    pub id: String,
    pub x: f32,
    pub y: f32,
    pub sprite: String,
    pub visible: bool,
}

/// Overlay definitions of the camera monitor.
///
/// Maps keep the authored order: earlier entries are drawn underneath later ones.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CameraUi {
    pub sprites: IndexMap<String, UiSprite>,
    pub buttons: IndexMap<String, UiButton>,
    /// Sound played when a camera button switches the feed. Empty for none.
    pub switch_sound: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Player {
    pub current_camera: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OfficePower {
    /// Remaining power, 0 to 100.
    pub level: f32,
    /// Number of active consumers (doors, lights, monitor).
    pub usage: u32,
}

impl Default for OfficePower {
    fn default() -> Self {
        Self {
            level: 100.0,
            usage: 1,
        }
    }
}

/// Everything the camera scene reads about the running night.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OfficeState {
    pub night: u32,
    pub player: Player,
    pub cameras: FxHashMap<String, OfficeCamera>,
    pub camera_ui: CameraUi,
    pub power: OfficePower,
}

impl OfficeState {
    /// Decode a state snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read a state snapshot from a JSON file.
    pub fn load_from_file(path: &Path) -> Result<Self, OfficeError> {
        let json = std::fs::read_to_string(path).map_err(|source| OfficeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json).map_err(|source| OfficeError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Camera the player is looking through.
    pub fn active_camera(&self) -> Option<&OfficeCamera> {
        self.cameras.get(&self.player.current_camera)
    }

    /// Sprite of the active camera's current state.
    pub fn active_camera_sprite(&self) -> Option<&str> {
        self.active_camera().and_then(OfficeCamera::current_sprite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NIGHT: &str = r#"{
        "night": 2,
        "player": { "current_camera": "cam1a" },
        "cameras": {
            "cam1a": {
                "states": { "empty": "stage_empty.png", "all": "stage_all.png", "dark": "" },
                "state": "all",
                "scroll": 12.5
            }
        },
        "camera_ui": {
            "sprites": { "map": { "x": 840, "y": 300, "sprite": "map.png", "visible": true } },
            "buttons": { "cam1a": { "id": "cam1a", "x": 900, "y": 320, "sprite": "btn.png", "visible": true } }
        },
        "power": { "level": 87.5, "usage": 2 }
    }"#;

    #[test]
    fn decodes_state() {
        let state = OfficeState::from_json(NIGHT).unwrap();
        assert_eq!(state.night, 2);
        assert_eq!(state.active_camera_sprite(), Some("stage_all.png"));
        assert_eq!(state.camera_ui.sprites["map"].sprite, "map.png");
        assert_eq!(state.camera_ui.buttons["cam1a"].id, "cam1a");
        assert_eq!(state.power.usage, 2);
    }

    #[test]
    fn overlays_keep_authored_order() {
        let json = r#"{
            "camera_ui": {
                "sprites": {
                    "z_backdrop": { "sprite": "backdrop.png", "visible": true },
                    "a_label": { "sprite": "label.png", "visible": true }
                },
                "buttons": {
                    "cam3": { "id": "cam3", "sprite": "btn.png" },
                    "cam1a": { "id": "cam1a", "sprite": "btn.png" }
                }
            }
        }"#;
        let state = OfficeState::from_json(json).unwrap();
        let sprites: Vec<_> = state.camera_ui.sprites.keys().map(String::as_str).collect();
        assert_eq!(sprites, ["z_backdrop", "a_label"]);
        let buttons: Vec<_> = state.camera_ui.buttons.keys().map(String::as_str).collect();
        assert_eq!(buttons, ["cam3", "cam1a"]);
    }

    #[test]
    fn empty_state_path_means_no_visual() {
        let mut state = OfficeState::from_json(NIGHT).unwrap();
        state.cameras.get_mut("cam1a").unwrap().state = "dark".into();
        assert_eq!(state.active_camera_sprite(), None);
        state.cameras.get_mut("cam1a").unwrap().state = "unknown".into();
        assert_eq!(state.active_camera_sprite(), None);
    }

    #[test]
    fn missing_camera_has_no_sprite() {
        let mut state = OfficeState::from_json(NIGHT).unwrap();
        state.player.current_camera = "cam9".into();
        assert!(state.active_camera().is_none());
        assert_eq!(state.active_camera_sprite(), None);
    }

    #[test]
    fn loading_lock_hides_state() {
        let mut core = OfficeCore {
            loading_lock: true,
            state: Some(OfficeState::default()),
        };
        assert!(core.drawable().is_none());
        core.loading_lock = false;
        assert!(core.drawable().is_some());
        core.state = None;
        assert!(core.drawable().is_none());
    }
}
