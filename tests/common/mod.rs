//! Shared fixtures for the integration tests.
//!
//! [`MockAssets`] and [`MockLoader`] stand in for raylib: loads are recorded
//! instead of touching the GPU or audio device, and every draw call is
//! captured so tests can assert on what a frame produced.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use raylib::prelude::{Color, Vector2};
use rustc_hash::{FxHashMap, FxHashSet};

use nightwatch::resources::animation::{AnimationFrame, FrameAnimation};
use nightwatch::resources::assetid::{AssetKind, AssetRoots};
use nightwatch::resources::fontresolver::{FontListing, FontPlatform, FontResolver, FontSource};
use nightwatch::resources::resourcecache::{
    AssetLoader, AssetTypes, ResourceCache, ResourceError, TypefaceFilter,
};
use nightwatch::systems::render::Canvas;

pub const FEED_WIDTH: i32 = 1920;
pub const FEED_HEIGHT: i32 = 720;

#[derive(Debug, Clone, PartialEq)]
pub struct MockTexture {
    pub path: PathBuf,
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MockFont {
    /// `None` for the built-in font.
    pub path: Option<PathBuf>,
    pub size: i32,
    pub filter: Option<TypefaceFilter>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MockSound {
    pub path: PathBuf,
    pub via_wave: bool,
}

pub struct MockAssets;

impl AssetTypes for MockAssets {
    type Font = MockFont;
    type Texture = MockTexture;
    type Sound = MockSound;

    fn texture_width(texture: &MockTexture) -> i32 {
        texture.width
    }

    fn texture_height(texture: &MockTexture) -> i32 {
        texture.height
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadCall {
    Texture(PathBuf),
    Font(PathBuf, i32),
    DefaultFont,
    Sound(PathBuf),
    Wave(PathBuf),
    Animation(PathBuf, bool),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Texture { path: PathBuf, x: i32, y: i32 },
    TextureV { path: PathBuf, x: f32, y: f32, tint: [u8; 4] },
    Text { text: String, font: Option<PathBuf> },
}

/// Records every load and draw request.
#[derive(Default)]
pub struct MockLoader {
    pub loads: Vec<LoadCall>,
    pub draws: Vec<DrawCall>,
    /// Paths whose load fails.
    pub missing: FxHashSet<PathBuf>,
    /// Texture sizes by file name; unlisted files are `FEED_WIDTH x FEED_HEIGHT`.
    pub sizes: FxHashMap<String, (i32, i32)>,
}

impl MockLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size(mut self, file_name: &str, width: i32, height: i32) -> Self {
        self.sizes.insert(file_name.to_string(), (width, height));
        self
    }

    pub fn with_missing(mut self, path: impl Into<PathBuf>) -> Self {
        self.missing.insert(path.into());
        self
    }

    pub fn load_count(&self) -> usize {
        self.loads.len()
    }

    fn check(&self, kind: AssetKind, path: &Path) -> Result<(), ResourceError> {
        if self.missing.contains(path) {
            return Err(ResourceError::Load {
                kind,
                path: path.to_path_buf(),
                reason: "no such file".to_string(),
            });
        }
        Ok(())
    }
}

impl AssetLoader<MockAssets> for MockLoader {
    fn load_texture(&mut self, path: &Path) -> Result<MockTexture, ResourceError> {
        self.loads.push(LoadCall::Texture(path.to_path_buf()));
        self.check(AssetKind::Sprite, path)?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        let (width, height) = self
            .sizes
            .get(file_name)
            .copied()
            .unwrap_or((FEED_WIDTH, FEED_HEIGHT));
        Ok(MockTexture {
            path: path.to_path_buf(),
            width,
            height,
        })
    }

    fn load_font(&mut self, path: &Path, size: i32) -> Result<MockFont, ResourceError> {
        self.loads.push(LoadCall::Font(path.to_path_buf(), size));
        self.check(AssetKind::Typeface, path)?;
        Ok(MockFont {
            path: Some(path.to_path_buf()),
            size,
            filter: None,
        })
    }

    fn default_font(&mut self) -> MockFont {
        self.loads.push(LoadCall::DefaultFont);
        MockFont {
            path: None,
            size: 10,
            filter: None,
        }
    }

    fn set_font_filter(&mut self, font: &mut MockFont, filter: TypefaceFilter) {
        font.filter = Some(filter);
    }

    fn load_sound(&mut self, path: &Path) -> Result<MockSound, ResourceError> {
        self.loads.push(LoadCall::Sound(path.to_path_buf()));
        self.check(AssetKind::Sound, path)?;
        Ok(MockSound {
            path: path.to_path_buf(),
            via_wave: false,
        })
    }

    fn load_sound_from_wave(&mut self, path: &Path) -> Result<MockSound, ResourceError> {
        self.loads.push(LoadCall::Wave(path.to_path_buf()));
        self.check(AssetKind::Sound, path)?;
        Ok(MockSound {
            path: path.to_path_buf(),
            via_wave: true,
        })
    }

    fn load_animation(&mut self, path: &Path, looped: bool) -> Result<FrameAnimation, ResourceError> {
        self.loads.push(LoadCall::Animation(path.to_path_buf(), looped));
        self.check(AssetKind::Animation, path)?;
        let frames = vec![
            AnimationFrame {
                sprite: "frame0.png".to_string(),
                duration: 0.1,
            },
            AnimationFrame {
                sprite: "frame1.png".to_string(),
                duration: 0.1,
            },
        ];
        Ok(FrameAnimation::new(frames, looped))
    }
}

impl Canvas<MockAssets> for MockLoader {
    fn draw_texture(&mut self, texture: &MockTexture, x: i32, y: i32) {
        self.draws.push(DrawCall::Texture {
            path: texture.path.clone(),
            x,
            y,
        });
    }

    fn draw_texture_v(&mut self, texture: &MockTexture, position: Vector2, tint: Color) {
        self.draws.push(DrawCall::TextureV {
            path: texture.path.clone(),
            x: position.x,
            y: position.y,
            tint: [tint.r, tint.g, tint.b, tint.a],
        });
    }

    fn draw_text(&mut self, font: &MockFont, text: &str, _position: Vector2, _size: f32, _color: Color) {
        self.draws.push(DrawCall::Text {
            text: text.to_string(),
            font: font.path.clone(),
        });
    }
}

/// Font listing fixed at construction.
pub struct StaticFonts(pub Option<String>);

impl FontSource for StaticFonts {
    fn listing(&self, _platform: FontPlatform) -> Option<FontListing> {
        self.0.clone().map(FontListing::FcList)
    }
}

/// Resolver that knows no system fonts.
pub fn no_system_fonts() -> FontResolver {
    FontResolver::new(FontPlatform::Unsupported, StaticFonts(None))
}

/// Resolver backed by an `fc-list` style listing.
pub fn fontconfig_fonts(listing: &str) -> FontResolver {
    FontResolver::new(FontPlatform::FontConfig, StaticFonts(Some(listing.to_string())))
}

pub fn roots() -> AssetRoots {
    AssetRoots::new("/game/project", "/game/runtime")
}

pub fn make_cache() -> ResourceCache<MockAssets> {
    ResourceCache::new(roots(), no_system_fonts())
}
