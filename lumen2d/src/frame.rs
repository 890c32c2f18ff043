use crate::camera::Camera2D;
use crate::effects::{Echo, Fragment};
use crate::math::{Vec2, WorldPoint};
use crate::overlay::OverlayState;

/// Everything a single frame reads, passed explicitly into every draw.
///
/// The context borrows the gameplay layer's snapshot; nothing in it is
/// mutated or retained past the `render` call.
#[derive(Clone, Copy, Debug)]
pub struct FrameContext<'a> {
    /// Seconds since the session started; drives all procedural animation.
    pub time: f32,
    pub camera: Camera2D,
    /// World position of the local entity.
    pub viewer: WorldPoint,
    pub realm: &'a str,
    pub fragments: &'a [Fragment],
    pub echoes: &'a [Echo],
    pub overlays: &'a [OverlayState],
}

impl<'a> FrameContext<'a> {
    /// Context with the viewer at the camera offset and no ambient content.
    pub fn new(time: f32, camera: Camera2D) -> Self {
        Self {
            time,
            camera,
            viewer: camera.offset,
            realm: "",
            fragments: &[],
            echoes: &[],
            overlays: &[],
        }
    }

    #[must_use]
    pub fn with_viewer(mut self, viewer: WorldPoint) -> Self {
        self.viewer = viewer;
        self
    }

    #[must_use]
    pub fn with_realm(mut self, realm: &'a str) -> Self {
        self.realm = realm;
        self
    }

    #[must_use]
    pub fn with_fragments(mut self, fragments: &'a [Fragment]) -> Self {
        self.fragments = fragments;
        self
    }

    #[must_use]
    pub fn with_echoes(mut self, echoes: &'a [Echo]) -> Self {
        self.echoes = echoes;
        self
    }

    #[must_use]
    pub fn with_overlays(mut self, overlays: &'a [OverlayState]) -> Self {
        self.overlays = overlays;
        self
    }

    pub fn viewport(&self) -> Vec2 {
        self.camera.viewport
    }
}
