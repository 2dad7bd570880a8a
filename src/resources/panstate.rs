//! Camera feed auto-pan.
//!
//! Camera images are wider than the viewport and slowly sweep left and right.
//! The sweep is a tiny state machine (offset, direction, dwell timer) advanced
//! by [`PanState::advance`], a pure function of the previous state and the
//! frame delta, so it behaves the same at any frame rate.
//!
//! Each frame:
//! 1. the dwell timer grows by the frame delta;
//! 2. while the timer is below [`DWELL_SECONDS`] the feed holds still;
//! 3. once it is reached, the direction flips (and the timer restarts) if the
//!    offset sits exactly on a bound, then the offset moves by
//!    `direction * tier * delta * BASE_SCROLL_RATE`, the tier coming from the
//!    camera pivot (see [`SpeedTier`]);
//! 4. the offset is clamped into `[0, max_scroll]`.
//!
//! A flip restarts the timer, so after leaving a bound the feed idles for
//! another [`DWELL_SECONDS`] before it sweeps across.

use bevy_ecs::prelude::Resource;

/// Seconds the feed idles after a flip before it moves again.
pub const DWELL_SECONDS: f32 = 5.0;
/// Slack on the dwell threshold for accumulated float deltas.
const DWELL_EPSILON: f32 = 1e-4;
/// Pixels per second at a speed multiplier of 1.
pub const BASE_SCROLL_RATE: f32 = 100.0;
/// Camera pivot units to pixels.
pub const PIVOT_SCALE: f32 = 30.0;
/// Horizontal centre of the authored viewport.
pub const VIEW_CENTER: f32 = 640.0;
/// Upper bound of the proximity measure.
pub const MAX_PROXIMITY: f32 = 640.0;
/// Proximity at which the medium tier starts.
pub const MEDIUM_THRESHOLD: f32 = 320.0;

/// Speed bands selected by proximity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedTier {
    Slow,
    Medium,
    Fast,
}

impl SpeedTier {
    /// Tier for a proximity value; values outside `[0, 640]` are clamped.
    pub fn from_proximity(proximity: f32) -> Self {
        let proximity = proximity.clamp(0.0, MAX_PROXIMITY);
        if proximity < MEDIUM_THRESHOLD {
            SpeedTier::Slow
        } else if proximity < MAX_PROXIMITY {
            SpeedTier::Medium
        } else {
            SpeedTier::Fast
        }
    }

    pub fn multiplier(self) -> f32 {
        match self {
            SpeedTier::Slow => 0.1,
            SpeedTier::Medium => 0.3,
            SpeedTier::Fast => 0.5,
        }
    }
}

/// Distance of a camera's pan pivot from the viewport centre, in `[0, 640]`.
pub fn pivot_proximity(camera_scroll: f32) -> f32 {
    (camera_scroll * PIVOT_SCALE - VIEW_CENTER)
        .abs()
        .clamp(0.0, MAX_PROXIMITY)
}

/// Largest offset that keeps the viewport inside the image.
pub fn max_scroll(texture_width: i32, viewport_width: i32) -> f32 {
    (texture_width - viewport_width).max(0) as f32
}

/// Pan animation of the active camera feed.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct PanState {
    /// Horizontal offset into the image, in pixels.
    pub offset: f32,
    /// `1.0` sweeping right, `-1.0` sweeping left.
    pub direction: f32,
    /// Seconds since the last direction flip.
    pub dwell: f32,
}

impl Default for PanState {
    fn default() -> Self {
        Self {
            offset: 0.0,
            direction: -1.0,
            dwell: 0.0,
        }
    }
}

impl PanState {
    pub fn new(offset: f32, direction: f32) -> Self {
        Self {
            offset,
            direction,
            dwell: 0.0,
        }
    }

    /// Whether the offset sits exactly on either bound.
    pub fn at_bound(&self, max_scroll: f32) -> bool {
        self.offset == 0.0 || self.offset == max_scroll
    }

    /// Whether the feed has idled long enough to move.
    pub fn dwell_elapsed(&self) -> bool {
        self.dwell >= DWELL_SECONDS - DWELL_EPSILON
    }

    /// State after `delta` seconds.
    pub fn advance(self, delta: f32, proximity: f32, max_scroll: f32) -> Self {
        let max_scroll = max_scroll.max(0.0);
        let mut next = self;

        next.dwell += delta;
        if next.dwell_elapsed() {
            if next.at_bound(max_scroll) {
                next.direction = -next.direction;
                next.dwell = 0.0;
            }
            let speed = SpeedTier::from_proximity(proximity).multiplier();
            next.offset += next.direction * speed * delta * BASE_SCROLL_RATE;
        }
        next.offset = next.offset.clamp(0.0, max_scroll);
        next
    }

    /// X coordinate at which the image is drawn.
    pub fn draw_x(&self) -> i32 {
        -(self.offset.round() as i32)
    }
}
