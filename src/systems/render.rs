//! Frame rendering.
//!
//! [`Canvas`] is the handful of draw primitives the camera scene needs. The
//! raylib implementation, [`RaylibFrame`], wraps the draw handle of the
//! current frame and also implements
//! [`AssetLoader`](crate::resources::resourcecache::AssetLoader), so the scene
//! can resolve textures it has never seen while it is drawing.
//!
//! [`render_system`] opens the frame, runs the camera scene and records a
//! fatal error in [`SessionStatus`] if an asset could not be loaded.

use std::path::Path;

use bevy_ecs::prelude::*;
use log::error;
use raylib::prelude::*;

use crate::resources::animation::FrameAnimation;
use crate::resources::office::OfficeCore;
use crate::resources::overlaybuttons::OverlayButtonCache;
use crate::resources::panstate::PanState;
use crate::resources::raylibassets::{CachedSound, RaylibAssets, RaylibLoader, RaylibTypeface};
use crate::resources::resourcecache::{
    AssetLoader, AssetTypes, ResourceCache, ResourceError, TypefaceFilter,
};
use crate::resources::screensize::{OverlayScale, ScreenSize};
use crate::resources::session::SessionStatus;
use crate::resources::worldtime::WorldTime;
use crate::systems::camera::{CameraScene, draw_camera_scene};
use crate::systems::hud::HudStyle;

/// Text spacing used for every HUD string.
const TEXT_SPACING: f32 = 1.0;

/// Draw primitives used by the camera scene.
pub trait Canvas<K: AssetTypes> {
    /// Draw `texture` untinted with its top-left corner at `(x, y)`.
    fn draw_texture(&mut self, texture: &K::Texture, x: i32, y: i32);

    /// Draw `texture` with sub-pixel placement and a tint.
    fn draw_texture_v(&mut self, texture: &K::Texture, position: Vector2, tint: Color);

    fn draw_text(&mut self, font: &K::Font, text: &str, position: Vector2, size: f32, color: Color);
}

/// The raylib frame currently being drawn.
pub struct RaylibFrame<'a> {
    pub draw: RaylibDrawHandle<'a>,
    pub thread: &'a RaylibThread,
}

impl RaylibFrame<'_> {
    fn loader(&mut self) -> RaylibLoader<'_> {
        RaylibLoader::new(&mut self.draw, self.thread)
    }
}

impl Canvas<RaylibAssets> for RaylibFrame<'_> {
    fn draw_texture(&mut self, texture: &Texture2D, x: i32, y: i32) {
        self.draw.draw_texture(texture, x, y, Color::WHITE);
    }

    fn draw_texture_v(&mut self, texture: &Texture2D, position: Vector2, tint: Color) {
        self.draw.draw_texture_v(texture, position, tint);
    }

    fn draw_text(
        &mut self,
        font: &RaylibTypeface,
        text: &str,
        position: Vector2,
        size: f32,
        color: Color,
    ) {
        self.draw
            .draw_text_ex(font, text, position, size, TEXT_SPACING, color);
    }
}

impl AssetLoader<RaylibAssets> for RaylibFrame<'_> {
    fn load_texture(&mut self, path: &Path) -> Result<Texture2D, ResourceError> {
        self.loader().load_texture(path)
    }

    fn load_font(&mut self, path: &Path, size: i32) -> Result<RaylibTypeface, ResourceError> {
        self.loader().load_font(path, size)
    }

    fn default_font(&mut self) -> RaylibTypeface {
        self.loader().default_font()
    }

    fn set_font_filter(&mut self, font: &mut RaylibTypeface, filter: TypefaceFilter) {
        self.loader().set_font_filter(font, filter)
    }

    fn load_sound(&mut self, path: &Path) -> Result<CachedSound, ResourceError> {
        self.loader().load_sound(path)
    }

    fn load_sound_from_wave(&mut self, path: &Path) -> Result<CachedSound, ResourceError> {
        self.loader().load_sound_from_wave(path)
    }

    fn load_animation(&mut self, path: &Path, looped: bool) -> Result<FrameAnimation, ResourceError> {
        self.loader().load_animation(path, looped)
    }
}

/// Draw the camera monitor for this frame.
#[allow(clippy::too_many_arguments)]
pub fn render_system(
    mut rl: NonSendMut<RaylibHandle>,
    th: NonSend<RaylibThread>,
    mut cache: NonSendMut<ResourceCache<RaylibAssets>>,
    mut buttons: NonSendMut<OverlayButtonCache<RaylibAssets>>,
    mut pan: ResMut<PanState>,
    office: Res<OfficeCore>,
    time: Res<WorldTime>,
    screen: Res<ScreenSize>,
    scale: Res<OverlayScale>,
    hud: Res<HudStyle>,
    mut status: ResMut<SessionStatus>,
) {
    let mut frame = RaylibFrame {
        draw: rl.begin_drawing(&th),
        thread: &th,
    };
    frame.draw.clear_background(Color::BLACK);

    let scene = CameraScene {
        cache: &mut cache,
        buttons: &mut buttons,
        pan: &mut pan,
        office: &office,
        screen: *screen,
        scale: *scale,
        hud: &hud,
        delta: time.delta,
    };
    if let Err(e) = draw_camera_scene(&mut frame, scene) {
        error!("Camera scene aborted: {}", e);
        status.fail(e);
    }
}
