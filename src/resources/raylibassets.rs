//! Raylib backend for the resource cache.
//!
//! [`RaylibAssets`] names the handle types stored in the cache and
//! [`RaylibLoader`] performs the loads against a live `RaylibHandle`. The
//! loader only borrows the handle, so it can be built from a draw handle in
//! the middle of a frame and dropped right after the load.
//!
//! Sounds are loaded through the raw FFI instead of `RaylibAudio`: the safe
//! wrappers tie every `Sound` to the lifetime of the audio device, which would
//! keep them out of a `'static` ECS resource. [`CachedSound`] unloads itself
//! on drop, so the cache must be dropped before the audio device closes.

use std::ffi::CString;
use std::path::Path;

use raylib::ffi::{self, TextureFilter};
use raylib::prelude::*;

use crate::resources::assetid::AssetKind;
use crate::resources::resourcecache::{AssetLoader, AssetTypes, ResourceError, TypefaceFilter};

/// Handle types of the raylib backend.
pub struct RaylibAssets;

impl AssetTypes for RaylibAssets {
    type Font = RaylibTypeface;
    type Texture = Texture2D;
    type Sound = CachedSound;

    fn texture_width(texture: &Texture2D) -> i32 {
        texture.width
    }

    fn texture_height(texture: &Texture2D) -> i32 {
        texture.height
    }
}

/// A loaded font or raylib's built-in one.
pub enum RaylibTypeface {
    Loaded(Font),
    Builtin(WeakFont),
}

impl AsRef<ffi::Font> for RaylibTypeface {
    fn as_ref(&self) -> &ffi::Font {
        match self {
            RaylibTypeface::Loaded(font) => font.as_ref(),
            RaylibTypeface::Builtin(font) => font.as_ref(),
        }
    }
}

/// Sound uploaded to the audio device, unloaded when dropped.
pub struct CachedSound(ffi::Sound);

impl CachedSound {
    pub fn play(&self) {
        unsafe { ffi::PlaySound(self.0) }
    }
}

impl Drop for CachedSound {
    fn drop(&mut self) {
        unsafe { ffi::UnloadSound(self.0) }
    }
}

/// Loads resources through a borrowed raylib handle.
pub struct RaylibLoader<'a> {
    rl: &'a mut RaylibHandle,
    thread: &'a RaylibThread,
}

impl<'a> RaylibLoader<'a> {
    pub fn new(rl: &'a mut RaylibHandle, thread: &'a RaylibThread) -> Self {
        Self { rl, thread }
    }
}

fn path_str(kind: AssetKind, path: &Path) -> Result<&str, ResourceError> {
    path.to_str().ok_or_else(|| ResourceError::Load {
        kind,
        path: path.to_path_buf(),
        reason: "path is not valid UTF-8".to_string(),
    })
}

fn path_cstring(kind: AssetKind, path: &Path) -> Result<CString, ResourceError> {
    CString::new(path_str(kind, path)?).map_err(|e| ResourceError::Load {
        kind,
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

fn load_error(kind: AssetKind, path: &Path, reason: impl ToString) -> ResourceError {
    ResourceError::Load {
        kind,
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

impl AssetLoader<RaylibAssets> for RaylibLoader<'_> {
    fn load_texture(&mut self, path: &Path) -> Result<Texture2D, ResourceError> {
        let file = path_str(AssetKind::Sprite, path)?;
        self.rl
            .load_texture(self.thread, file)
            .map_err(|e| load_error(AssetKind::Sprite, path, e))
    }

    fn load_font(&mut self, path: &Path, size: i32) -> Result<RaylibTypeface, ResourceError> {
        let file = path_str(AssetKind::Typeface, path)?;
        self.rl
            .load_font_ex(self.thread, file, size, None)
            .map(RaylibTypeface::Loaded)
            .map_err(|e| load_error(AssetKind::Typeface, path, e))
    }

    fn default_font(&mut self) -> RaylibTypeface {
        RaylibTypeface::Builtin(self.rl.get_font_default())
    }

    fn set_font_filter(&mut self, font: &mut RaylibTypeface, filter: TypefaceFilter) {
        // The built-in font atlas is shared by raylib and left untouched.
        let RaylibTypeface::Loaded(font) = font else {
            return;
        };
        let filter = match filter {
            TypefaceFilter::Point => TextureFilter::TEXTURE_FILTER_POINT,
            TypefaceFilter::Bilinear => TextureFilter::TEXTURE_FILTER_BILINEAR,
            TypefaceFilter::Trilinear => TextureFilter::TEXTURE_FILTER_TRILINEAR,
        };
        unsafe { ffi::SetTextureFilter(font.texture, filter as i32) }
    }

    fn load_sound(&mut self, path: &Path) -> Result<CachedSound, ResourceError> {
        let file = path_cstring(AssetKind::Sound, path)?;
        let sound = unsafe { ffi::LoadSound(file.as_ptr()) };
        if sound.frameCount == 0 {
            return Err(load_error(AssetKind::Sound, path, "no audio frames decoded"));
        }
        Ok(CachedSound(sound))
    }

    fn load_sound_from_wave(&mut self, path: &Path) -> Result<CachedSound, ResourceError> {
        let file = path_cstring(AssetKind::Sound, path)?;
        let wave = unsafe { ffi::LoadWave(file.as_ptr()) };
        if wave.data.is_null() {
            return Err(load_error(AssetKind::Sound, path, "wave could not be decoded"));
        }
        let sound = unsafe {
            let sound = ffi::LoadSoundFromWave(wave);
            ffi::UnloadWave(wave);
            sound
        };
        if sound.frameCount == 0 {
            return Err(load_error(AssetKind::Sound, path, "wave upload failed"));
        }
        Ok(CachedSound(sound))
    }
}
