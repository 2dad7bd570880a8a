//! Memoizing resource cache.
//!
//! A non-send resource owning every typeface, texture, animation and sound
//! loaded during the session. Each kind has its own map keyed by a stable
//! identifier; the first request loads from disk through an [`AssetLoader`]
//! and stores an [`Rc`] handle, every later request returns a clone of that
//! same handle. Entries are never evicted, reloaded or mutated.
//!
//! The graphics backend is abstracted behind [`AssetTypes`] (handle types)
//! and [`AssetLoader`] (the actual loading calls), so the cache can be driven
//! by raylib in the game and by plain structs in tests.
//!
//! Note: the cache holds `Rc` handles and is therefore `!Send`; insert it
//! with `insert_non_send_resource` and access it via `NonSend`/`NonSendMut`.

use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use log::{debug, info, warn};
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::resources::animation::FrameAnimation;
use crate::resources::assetid::{AssetId, AssetKind, AssetRoots};
use crate::resources::fontresolver::FontResolver;

/// Size at which project fonts are preloaded.
pub const PRELOAD_FONT_SIZE: i32 = 72;

/// Filter applied to every loaded typeface texture.
///
/// Anything other than trilinear breaks the rendering of bold faces.
pub const TYPEFACE_FILTER: TypefaceFilter = TypefaceFilter::Trilinear;

/// Texture filter modes relevant to typeface atlases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypefaceFilter {
    Point,
    Bilinear,
    Trilinear,
}

/// Errors raised while loading resources.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// An empty identifier was requested.
    #[error("empty {0} identifier")]
    EmptyIdentifier(AssetKind),

    /// The backend refused to load the file.
    #[error("failed to load {kind} from '{}': {reason}", path.display())]
    Load {
        kind: AssetKind,
        path: PathBuf,
        reason: String,
    },

    /// The file was read but its content is invalid.
    #[error("failed to decode '{}': {reason}", path.display())]
    Decode { path: PathBuf, reason: String },

    /// The file could not be read.
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Handle types produced by a graphics/audio backend.
pub trait AssetTypes {
    type Font;
    type Texture;
    type Sound;

    fn texture_width(texture: &Self::Texture) -> i32;
    fn texture_height(texture: &Self::Texture) -> i32;
}

/// Backend calls that turn files into handles.
pub trait AssetLoader<K: AssetTypes> {
    fn load_texture(&mut self, path: &Path) -> Result<K::Texture, ResourceError>;

    fn load_font(&mut self, path: &Path, size: i32) -> Result<K::Font, ResourceError>;

    /// The backend's built-in typeface.
    fn default_font(&mut self) -> K::Font;

    fn set_font_filter(&mut self, font: &mut K::Font, filter: TypefaceFilter);

    /// Generic load path for compressed or streamed formats.
    fn load_sound(&mut self, path: &Path) -> Result<K::Sound, ResourceError>;

    /// Decode the whole waveform into memory, then upload it.
    fn load_sound_from_wave(&mut self, path: &Path) -> Result<K::Sound, ResourceError>;

    fn load_animation(&mut self, path: &Path, looped: bool) -> Result<FrameAnimation, ResourceError> {
        FrameAnimation::load_from_file(path, looped)
    }
}

/// Cache key of a typeface request.
pub fn font_uid(family: &str, size: i32) -> String {
    format!("{family}-{size}")
}

/// Number of entries per resource kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub typefaces: usize,
    pub textures: usize,
    pub animations: usize,
    pub sounds: usize,
}

/// Session-wide memoized store of loaded resources.
pub struct ResourceCache<K: AssetTypes> {
    roots: AssetRoots,
    font_resolver: FontResolver,
    typefaces: FxHashMap<String, Rc<K::Font>>,
    textures: FxHashMap<String, Rc<K::Texture>>,
    animations: FxHashMap<String, Rc<FrameAnimation>>,
    sounds: FxHashMap<String, Rc<K::Sound>>,
}

impl<K: AssetTypes> ResourceCache<K> {
    pub fn new(roots: AssetRoots, font_resolver: FontResolver) -> Self {
        Self {
            roots,
            font_resolver,
            typefaces: FxHashMap::default(),
            textures: FxHashMap::default(),
            animations: FxHashMap::default(),
            sounds: FxHashMap::default(),
        }
    }

    pub fn roots(&self) -> &AssetRoots {
        &self.roots
    }

    pub fn font_resolver(&self) -> &FontResolver {
        &self.font_resolver
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            typefaces: self.typefaces.len(),
            textures: self.textures.len(),
            animations: self.animations.len(),
            sounds: self.sounds.len(),
        }
    }

    /// Get a typeface of `family` at `size`, loading it on first use.
    ///
    /// Never fails: when no file can be found or loaded for the family the
    /// backend's default typeface is cached under the key instead.
    pub fn typeface(
        &mut self,
        loader: &mut impl AssetLoader<K>,
        family: &str,
        size: i32,
    ) -> Rc<K::Font> {
        let uid = font_uid(family, size);
        if let Some(font) = self.typefaces.get(&uid) {
            return font.clone();
        }

        let font = match self.typeface_path(family) {
            Some(path) => match loader.load_font(&path, size) {
                Ok(mut font) => {
                    loader.set_font_filter(&mut font, TYPEFACE_FILTER);
                    debug!("Loaded typeface '{}' from {:?}", uid, path);
                    font
                }
                Err(e) => {
                    warn!("{e}; using default typeface for '{uid}'");
                    loader.default_font()
                }
            },
            None => {
                debug!("No font file for '{}'; using default typeface", family);
                loader.default_font()
            }
        };

        let font = Rc::new(font);
        self.typefaces.insert(uid, font.clone());
        font
    }

    /// Engine path, then the project's font folder, then the system fonts.
    fn typeface_path(&self, family: &str) -> Option<PathBuf> {
        if family.is_empty() {
            return None;
        }
        let id = AssetId::parse(family);
        if id.is_engine() {
            return Some(self.roots.resolve(AssetKind::Typeface, &id));
        }
        let project_font = self.roots.resolve(AssetKind::Typeface, &id);
        if project_font.is_file() {
            return Some(project_font);
        }
        self.font_resolver.resolve(family)
    }

    /// Get a texture, loading it on first use.
    pub fn texture(
        &mut self,
        loader: &mut impl AssetLoader<K>,
        name: &str,
    ) -> Result<Rc<K::Texture>, ResourceError> {
        if name.is_empty() {
            return Err(ResourceError::EmptyIdentifier(AssetKind::Sprite));
        }
        if let Some(texture) = self.textures.get(name) {
            return Ok(texture.clone());
        }

        let path = self.roots.resolve(AssetKind::Sprite, &AssetId::parse(name));
        let texture = Rc::new(loader.load_texture(&path)?);
        debug!(
            "Loaded texture '{}' ({}x{}) from {:?}",
            name,
            K::texture_width(&texture),
            K::texture_height(&texture),
            path
        );
        self.textures.insert(name.to_string(), texture.clone());
        Ok(texture)
    }

    /// Get an animation, decoding it on first use.
    ///
    /// The entry is keyed by name only: `looped` is honored on the first
    /// request and ignored afterwards, so an animation first requested as
    /// one-shot stays one-shot for the whole session.
    pub fn animation(
        &mut self,
        loader: &mut impl AssetLoader<K>,
        name: &str,
        looped: bool,
    ) -> Result<Rc<FrameAnimation>, ResourceError> {
        if name.is_empty() {
            return Err(ResourceError::EmptyIdentifier(AssetKind::Animation));
        }
        if let Some(animation) = self.animations.get(name) {
            if animation.looped != looped {
                debug!(
                    "Animation '{}' already cached with looped={}; ignoring looped={}",
                    name, animation.looped, looped
                );
            }
            return Ok(animation.clone());
        }

        let path = self
            .roots
            .resolve(AssetKind::Animation, &AssetId::parse(name));
        let animation = Rc::new(loader.load_animation(&path, looped)?);
        debug!(
            "Loaded animation '{}' ({} frames, looped={}) from {:?}",
            name,
            animation.frames.len(),
            looped,
            path
        );
        self.animations.insert(name.to_string(), animation.clone());
        Ok(animation)
    }

    /// Get a sound, loading it on first use.
    ///
    /// `.wav` identifiers go through the wave decode path, every other
    /// format through the backend's generic loader.
    pub fn sound(
        &mut self,
        loader: &mut impl AssetLoader<K>,
        name: &str,
    ) -> Result<Rc<K::Sound>, ResourceError> {
        if name.is_empty() {
            return Err(ResourceError::EmptyIdentifier(AssetKind::Sound));
        }
        if let Some(sound) = self.sounds.get(name) {
            return Ok(sound.clone());
        }

        let path = self.roots.resolve(AssetKind::Sound, &AssetId::parse(name));
        let sound = if name.ends_with(".wav") {
            loader.load_sound_from_wave(&path)?
        } else {
            loader.load_sound(&path)?
        };
        debug!("Loaded sound '{}' from {:?}", name, path);
        let sound = Rc::new(sound);
        self.sounds.insert(name.to_string(), sound.clone());
        Ok(sound)
    }

    /// Load every file in the project's font folder at [`PRELOAD_FONT_SIZE`],
    /// keyed by file name. Returns how many typefaces were added.
    ///
    /// A project without a font folder preloads nothing.
    pub fn preload_project_fonts(
        &mut self,
        loader: &mut impl AssetLoader<K>,
    ) -> Result<usize, ResourceError> {
        let dir = self.roots.project_dir(AssetKind::Typeface);
        let entries = match std::fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(source) => return Err(ResourceError::Io { path: dir, source }),
        };

        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file())
            .collect();
        files.sort();

        let mut added = 0;
        for path in files {
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let uid = font_uid(file_name, PRELOAD_FONT_SIZE);
            if self.typefaces.contains_key(&uid) {
                continue;
            }
            let mut font = loader.load_font(&path, PRELOAD_FONT_SIZE)?;
            loader.set_font_filter(&mut font, TYPEFACE_FILTER);
            self.typefaces.insert(uid, Rc::new(font));
            added += 1;
        }
        info!("Preloaded {} project fonts from {:?}", added, dir);
        Ok(added)
    }
}
