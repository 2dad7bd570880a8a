//! Cached overlay button widgets.
//!
//! Camera overlay buttons are declared by the game definition every frame, but
//! their widgets (texture handle, hover highlight, click state) must survive
//! between frames. [`OverlayButtonCache`] keeps one [`OverlayButton`] per
//! distinct `button id + sprite` key, in creation order, and advances all of
//! them once per frame before anything is drawn.
//!
//! Non-send resource (holds `Rc` texture handles).

use std::rc::Rc;

use raylib::prelude::{Color, Vector2};
use rustc_hash::FxHashMap;

use crate::resources::pointer::PointerState;
use crate::resources::resourcecache::AssetTypes;

/// Highlight change per second while easing towards the hover target.
pub const HIGHLIGHT_RATE: f32 = 8.0;

/// Tint of a button with no highlight.
const IDLE_SHADE: u8 = 200;

/// Cache key of an overlay button.
pub fn button_uid(id: &str, sprite: &str) -> String {
    format!("{id}{sprite}")
}

/// Interactive textured button drawn over the camera feed.
pub struct OverlayButton<K: AssetTypes> {
    pub uid: String,
    pub texture: Rc<K::Texture>,
    /// Top-left corner in screen pixels.
    pub position: Vector2,
    pub hovered: bool,
    /// 0 idle, 1 fully highlighted.
    pub highlight: f32,
    /// Pressed during the last update.
    pub clicked: bool,
    pub press_count: u32,
}

impl<K: AssetTypes> OverlayButton<K> {
    pub fn new(uid: impl Into<String>, texture: Rc<K::Texture>, position: Vector2) -> Self {
        Self {
            uid: uid.into(),
            texture,
            position,
            hovered: false,
            highlight: 0.0,
            clicked: false,
            press_count: 0,
        }
    }

    pub fn contains(&self, point: Vector2) -> bool {
        let w = K::texture_width(&self.texture) as f32;
        let h = K::texture_height(&self.texture) as f32;
        point.x >= self.position.x
            && point.x < self.position.x + w
            && point.y >= self.position.y
            && point.y < self.position.y + h
    }

    /// Advance hover, highlight and click state by `delta` seconds.
    pub fn update(&mut self, pointer: &PointerState, delta: f32) {
        self.hovered = self.contains(pointer.position);
        self.clicked = self.hovered && pointer.just_pressed;
        if self.clicked {
            self.press_count += 1;
        }

        let target = if self.hovered { 1.0 } else { 0.0 };
        let step = HIGHLIGHT_RATE * delta.max(0.0);
        self.highlight = if self.highlight < target {
            (self.highlight + step).min(target)
        } else {
            (self.highlight - step).max(target)
        };
    }

    /// Draw tint for the current highlight.
    pub fn tint(&self) -> Color {
        let shade = IDLE_SHADE as f32 + (255 - IDLE_SHADE) as f32 * self.highlight.clamp(0.0, 1.0);
        let shade = shade.round() as u8;
        Color::new(shade, shade, shade, 255)
    }
}

/// Overlay button widgets keyed by [`button_uid`], in creation order.
pub struct OverlayButtonCache<K: AssetTypes> {
    buttons: Vec<OverlayButton<K>>,
    index: FxHashMap<String, usize>,
}

impl<K: AssetTypes> Default for OverlayButtonCache<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: AssetTypes> OverlayButtonCache<K> {
    pub fn new() -> Self {
        Self {
            buttons: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    /// Widget stored under `uid`, created with the texture from
    /// `make_texture` if it does not exist yet.
    ///
    /// `make_texture` only runs on creation.
    pub fn get_or_create<E>(
        &mut self,
        uid: &str,
        position: Vector2,
        make_texture: impl FnOnce() -> Result<Rc<K::Texture>, E>,
    ) -> Result<&mut OverlayButton<K>, E> {
        let i = match self.index.get(uid) {
            Some(&i) => i,
            None => {
                let button = OverlayButton::new(uid, make_texture()?, position);
                self.buttons.push(button);
                let i = self.buttons.len() - 1;
                self.index.insert(uid.to_string(), i);
                i
            }
        };
        Ok(&mut self.buttons[i])
    }

    pub fn get(&self, uid: &str) -> Option<&OverlayButton<K>> {
        self.index.get(uid).map(|&i| &self.buttons[i])
    }

    /// Advance every widget in creation order.
    pub fn update_all(&mut self, pointer: &PointerState, delta: f32) {
        for button in &mut self.buttons {
            button.update(pointer, delta);
        }
    }

    /// Widgets pressed during the last update.
    pub fn clicked(&self) -> impl Iterator<Item = &OverlayButton<K>> {
        self.buttons.iter().filter(|b| b.clicked)
    }

    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }
}
