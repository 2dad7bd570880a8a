//! Frame animation definitions.
//!
//! Animations are authored as JSON files listing sprite identifiers and how
//! long each one stays on screen:
//!
//! ```json
//! { "frames": [ { "sprite": "bonnie_1.png", "duration": 0.05 },
//!               { "sprite": "bonnie_2.png", "duration": 0.05 } ] }
//! ```
//!
//! A decoded [`FrameAnimation`] is immutable once cached; playback state lives
//! with whoever plays it and is expressed as elapsed seconds.

use std::path::Path;

use serde::Deserialize;

use crate::resources::resourcecache::ResourceError;

/// One frame of an animation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnimationFrame {
    /// Sprite identifier, resolved through the resource cache when drawn.
    pub sprite: String,
    /// Seconds the frame stays visible.
    pub duration: f32,
}

#[derive(Deserialize)]
struct AnimationFile {
    frames: Vec<AnimationFrame>,
}

/// Decoded frame animation.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameAnimation {
    pub frames: Vec<AnimationFrame>,
    /// Whether playback wraps around after the last frame.
    pub looped: bool,
}

impl FrameAnimation {
    pub fn new(frames: Vec<AnimationFrame>, looped: bool) -> Self {
        Self { frames, looped }
    }

    /// Decode an animation from a JSON string.
    pub fn from_json(json: &str, looped: bool) -> Result<Self, serde_json::Error> {
        let file: AnimationFile = serde_json::from_str(json)?;
        Ok(Self::new(file.frames, looped))
    }

    /// Read and decode an animation file.
    pub fn load_from_file(path: &Path, looped: bool) -> Result<Self, ResourceError> {
        let json = std::fs::read_to_string(path).map_err(|source| ResourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json, looped).map_err(|e| ResourceError::Decode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Sum of all frame durations in seconds.
    pub fn total_duration(&self) -> f32 {
        self.frames.iter().map(|f| f.duration.max(0.0)).sum()
    }

    /// Frame visible after `elapsed` seconds of playback.
    ///
    /// Looped animations wrap; one-shot animations hold their last frame.
    pub fn frame_at(&self, elapsed: f32) -> Option<&AnimationFrame> {
        let last = self.frames.last()?;
        let total = self.total_duration();
        if total <= 0.0 {
            return self.frames.first();
        }

        let mut t = elapsed.max(0.0);
        if self.looped {
            t %= total;
        } else if t >= total {
            return Some(last);
        }

        let mut acc = 0.0;
        for frame in &self.frames {
            acc += frame.duration.max(0.0);
            if t < acc {
                return Some(frame);
            }
        }
        Some(last)
    }

    /// Whether a one-shot animation has played to the end.
    pub fn is_finished(&self, elapsed: f32) -> bool {
        !self.looped && elapsed >= self.total_duration()
    }
}
