//! Asset identifiers and path resolution.
//!
//! Every resource request starts from a raw identifier string authored in the
//! game definition. Identifiers starting with [`ENGINE_PREFIX`] address assets
//! bundled with the runtime; everything else lives in the project directory.
//! The split is decided once by [`AssetId::parse`], and [`AssetRoots`] turns
//! the tagged identifier into a concrete filesystem path for a given
//! [`AssetKind`].
//!
//! # Layout
//!
//! ```text
//! <project>/sprites/<name>
//! <project>/sounds/<name>
//! <project>/fonts/<name>
//! <project>/animations/<name>.json
//! <project>/special_sprites/<name>     (overrides engine sprites)
//! <runtime>/res/<name>                 (engine assets)
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

/// Reserved prefix for runtime-bundled assets.
pub const ENGINE_PREFIX: &str = "e.";

/// Engine sprite names whose file on disk differs from the identifier.
const ENGINE_SPRITE_ALIASES: [(&str, &str); 2] = [
    ("e.defaultcamera", "e.defaultcam.png"),
    ("e.defaultmask", "e.defaultmask.png"),
];

/// The four kinds of cached resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Typeface,
    Sprite,
    Animation,
    Sound,
}

impl AssetKind {
    /// Folder under the project root holding assets of this kind.
    pub fn project_subfolder(self) -> &'static str {
        match self {
            AssetKind::Typeface => "fonts",
            AssetKind::Sprite => "sprites",
            AssetKind::Animation => "animations",
            AssetKind::Sound => "sounds",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AssetKind::Typeface => "typeface",
            AssetKind::Sprite => "sprite",
            AssetKind::Animation => "animation",
            AssetKind::Sound => "sound",
        };
        f.write_str(name)
    }
}

/// Identifier tagged with its origin.
///
/// The wrapped name is already separator-normalized and keeps the engine
/// prefix, because engine files on disk are named with it (`res/e.click.wav`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AssetId {
    /// Shipped with the runtime under `<runtime>/res/`.
    Engine(String),
    /// Authored by the project under `<project>/<kind subfolder>/`.
    Project(String),
}

impl AssetId {
    /// Classify a raw identifier.
    pub fn parse(raw: &str) -> Self {
        let name = normalize_separators(raw);
        if name.starts_with(ENGINE_PREFIX) {
            AssetId::Engine(name)
        } else {
            AssetId::Project(name)
        }
    }

    /// Normalized name, prefix included.
    pub fn name(&self) -> &str {
        match self {
            AssetId::Engine(name) | AssetId::Project(name) => name,
        }
    }

    pub fn is_engine(&self) -> bool {
        matches!(self, AssetId::Engine(_))
    }
}

/// Replace Windows separators with the canonical forward slash.
pub fn normalize_separators(raw: &str) -> String {
    raw.replace('\\', "/")
}

/// Root directories used to turn identifiers into paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRoots {
    /// Active project directory.
    pub project: PathBuf,
    /// Runtime installation directory (the one holding `res/`).
    pub runtime: PathBuf,
}

impl AssetRoots {
    pub fn new(project: impl Into<PathBuf>, runtime: impl Into<PathBuf>) -> Self {
        Self {
            project: project.into(),
            runtime: runtime.into(),
        }
    }

    /// Runtime directory of the running executable, falling back to the
    /// working directory when it cannot be determined.
    pub fn default_runtime_dir() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Directory holding runtime-bundled assets.
    pub fn engine_dir(&self) -> PathBuf {
        self.runtime.join("res")
    }

    /// Directory a project may use to override engine sprites.
    pub fn special_sprites_dir(&self) -> PathBuf {
        self.project.join("special_sprites")
    }

    /// Directory holding project assets of `kind`.
    pub fn project_dir(&self, kind: AssetKind) -> PathBuf {
        self.project.join(kind.project_subfolder())
    }

    /// Resolve `id` to the file that should be loaded for `kind`.
    ///
    /// Engine sprites consult `special_sprites/` first, so this touches the
    /// filesystem for that case only.
    pub fn resolve(&self, kind: AssetKind, id: &AssetId) -> PathBuf {
        match (kind, id) {
            (AssetKind::Sprite, AssetId::Engine(name)) => {
                let file = engine_sprite_file(name);
                let special = self.special_sprites_dir().join(file);
                if special.is_file() {
                    special
                } else {
                    self.engine_dir().join(file)
                }
            }
            (AssetKind::Animation, AssetId::Engine(name)) => {
                self.engine_dir().join(format!("{name}.json"))
            }
            (_, AssetId::Engine(name)) => self.engine_dir().join(name),
            (AssetKind::Animation, AssetId::Project(name)) => self
                .project_dir(AssetKind::Animation)
                .join(format!("{name}.json")),
            (kind, AssetId::Project(name)) => self.project_dir(kind).join(name),
        }
    }
}

fn engine_sprite_file(name: &str) -> &str {
    ENGINE_SPRITE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map(|(_, file)| *file)
        .unwrap_or(name)
}
