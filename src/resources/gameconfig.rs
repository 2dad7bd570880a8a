//! Game configuration resource.
//!
//! Manages runtime settings loaded from an INI configuration file. Provides
//! defaults for safe startup; command line flags override file values.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 1280
//! height = 720
//! fullscreen = false
//! vsync = true
//! target_fps = 60
//!
//! [project]
//! path = ./project
//!
//! [runtime]
//! resources = /opt/nightwatch
//!
//! [hud]
//! font = Consolas
//! font_size = 24
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::resources::assetid::AssetRoots;

/// Default safe values for startup
const DEFAULT_WINDOW_WIDTH: u32 = 1280;
const DEFAULT_WINDOW_HEIGHT: u32 = 720;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_VSYNC: bool = true;
const DEFAULT_FULLSCREEN: bool = false;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";
const DEFAULT_PROJECT_PATH: &str = "./project";
const DEFAULT_HUD_FONT: &str = "Consolas";
const DEFAULT_HUD_FONT_SIZE: i32 = 24;

/// Game configuration resource.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Target frames per second.
    pub target_fps: u32,
    /// Enable vertical sync.
    pub vsync: bool,
    /// Start in fullscreen mode.
    pub fullscreen: bool,
    /// Active project directory.
    pub project_path: PathBuf,
    /// Runtime directory holding `res/`; `None` uses the executable's folder.
    pub runtime_path: Option<PathBuf>,
    /// Font family of the HUD.
    pub hud_font: String,
    /// Font size of the HUD.
    pub hud_font_size: i32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            vsync: DEFAULT_VSYNC,
            fullscreen: DEFAULT_FULLSCREEN,
            project_path: PathBuf::from(DEFAULT_PROJECT_PATH),
            runtime_path: None,
            hud_font: DEFAULT_HUD_FONT.to_string(),
            hud_font_size: DEFAULT_HUD_FONT_SIZE,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply_ini(&config);

        info!(
            "Loaded config: {}x{} window, fps={}, vsync={}, fullscreen={}, project={:?}",
            self.window_width,
            self.window_height,
            self.target_fps,
            self.vsync,
            self.fullscreen,
            self.project_path
        );

        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply_ini(&config);
        Ok(())
    }

    fn apply_ini(&mut self, config: &Ini) {
        // [window] section
        if let Some(width) = config.getuint("window", "width").ok().flatten() {
            self.window_width = width as u32;
        }
        if let Some(height) = config.getuint("window", "height").ok().flatten() {
            self.window_height = height as u32;
        }
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }
        if let Some(vsync) = config.getbool("window", "vsync").ok().flatten() {
            self.vsync = vsync;
        }
        if let Some(fullscreen) = config.getbool("window", "fullscreen").ok().flatten() {
            self.fullscreen = fullscreen;
        }

        // [project] / [runtime] sections
        if let Some(path) = config.get("project", "path") {
            self.project_path = PathBuf::from(path);
        }
        if let Some(path) = config.get("runtime", "resources") {
            self.runtime_path = Some(PathBuf::from(path));
        }

        // [hud] section
        if let Some(font) = config.get("hud", "font") {
            self.hud_font = font;
        }
        if let Some(size) = config.getint("hud", "font_size").ok().flatten() {
            self.hud_font_size = size as i32;
        }
    }

    /// Asset roots for the configured project and runtime directories.
    pub fn asset_roots(&self) -> AssetRoots {
        let runtime = self
            .runtime_path
            .clone()
            .unwrap_or_else(AssetRoots::default_runtime_dir);
        AssetRoots::new(self.project_path.clone(), runtime)
    }

    /// Get the window size.
    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = GameConfig::new();
        assert_eq!(config.window_size(), (1280, 720));
        assert_eq!(config.project_path, PathBuf::from("./project"));
        assert!(config.runtime_path.is_none());
        assert_eq!(config.hud_font_size, 24);
    }

    #[test]
    fn reads_sections() {
        let mut config = GameConfig::new();
        config
            .load_from_str(
                "[window]\nwidth = 1920\nheight = 1080\nvsync = false\n\
                 [project]\npath = /games/pizzeria\n\
                 [runtime]\nresources = /opt/nightwatch\n\
                 [hud]\nfont = DejaVu Sans\nfont_size = 30\n",
            )
            .unwrap();
        assert_eq!(config.window_size(), (1920, 1080));
        assert!(!config.vsync);
        assert_eq!(config.hud_font, "DejaVu Sans");
        assert_eq!(config.hud_font_size, 30);

        let roots = config.asset_roots();
        assert_eq!(roots.project, PathBuf::from("/games/pizzeria"));
        assert_eq!(roots.runtime, PathBuf::from("/opt/nightwatch"));
    }

    #[test]
    fn missing_keys_keep_defaults() {
        let mut config = GameConfig::new();
        config.load_from_str("[window]\nfullscreen = true\n").unwrap();
        assert!(config.fullscreen);
        assert_eq!(config.target_fps, 60);
        assert_eq!(config.hud_font, "Consolas");
    }

    #[test]
    fn missing_file_is_an_error() {
        let mut config = GameConfig::with_path("/definitely/not/here.ini");
        assert!(config.load_from_file().is_err());
        assert_eq!(config.window_width, 1280);
    }
}
