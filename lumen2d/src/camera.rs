//! World-to-screen transform and viewport culling.
//!
//! The camera is a pure translation: the camera offset (usually the viewer's
//! world position) is mapped to the center of the viewport.

use glam::Affine2;

use crate::math::{ScreenPoint, Vec2, WorldPoint};

/// Map a world point to screen space: `screen = world - offset + viewport / 2`.
pub fn world_to_screen(world: WorldPoint, camera_offset: Vec2, viewport: Vec2) -> ScreenPoint {
    world - camera_offset + viewport * 0.5
}

/// Inverse of [`world_to_screen`].
pub fn screen_to_world(screen: ScreenPoint, camera_offset: Vec2, viewport: Vec2) -> WorldPoint {
    screen + camera_offset - viewport * 0.5
}

/// True iff `point` lies within `[-margin, viewport + margin]` on both axes.
///
/// Non-finite points are never in the viewport.
pub fn is_in_viewport(point: ScreenPoint, viewport: Vec2, margin: f32) -> bool {
    point.x >= -margin
        && point.x <= viewport.x + margin
        && point.y >= -margin
        && point.y <= viewport.y + margin
}

/// Camera state for a single frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera2D {
    /// World position shown at the center of the viewport.
    pub offset: Vec2,
    /// Viewport size in pixels.
    pub viewport: Vec2,
}

impl Camera2D {
    pub fn new(offset: Vec2, viewport: Vec2) -> Self {
        Self { offset, viewport }
    }

    /// The world-to-screen mapping as an affine transform.
    pub fn view_transform(&self) -> Affine2 {
        Affine2::from_translation((self.viewport * 0.5 - self.offset).to_glam())
    }

    /// Center of the viewport in screen space.
    pub fn screen_center(&self) -> ScreenPoint {
        self.viewport * 0.5
    }

    pub fn world_to_screen(&self, world: WorldPoint) -> ScreenPoint {
        world_to_screen(world, self.offset, self.viewport)
    }

    pub fn screen_to_world(&self, screen: ScreenPoint) -> WorldPoint {
        screen_to_world(screen, self.offset, self.viewport)
    }

    /// Project a world point, refusing non-finite input or output.
    pub fn project(&self, world: WorldPoint) -> Option<ScreenPoint> {
        if !world.is_finite() || !self.offset.is_finite() {
            return None;
        }
        let screen = self.world_to_screen(world);
        screen.is_finite().then_some(screen)
    }

    /// Project and cull in one step. `None` means the entity must not be drawn
    /// this frame.
    pub fn cull(&self, world: WorldPoint, margin: f32) -> Option<ScreenPoint> {
        self.project(world)
            .filter(|screen| is_in_viewport(*screen, self.viewport, margin))
    }

    /// Cull a point that is already in screen space.
    pub fn cull_screen(&self, screen: ScreenPoint, margin: f32) -> Option<ScreenPoint> {
        (screen.is_finite() && is_in_viewport(screen, self.viewport, margin)).then_some(screen)
    }
}

impl Default for Camera2D {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            viewport: Vec2::new(1280.0, 720.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_offset_lands_at_center() {
        let cam = Camera2D::new(Vec2::new(500.0, -200.0), Vec2::new(800.0, 600.0));
        assert_eq!(cam.world_to_screen(cam.offset), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn inverse_composes_to_identity() {
        let cam = Camera2D::new(Vec2::new(1234.5, -987.25), Vec2::new(1920.0, 1080.0));
        let samples = [
            Vec2::new(0.0, 0.0),
            Vec2::new(-40_000.0, 12_345.678),
            Vec2::new(3.25e5, -7.5e4),
            Vec2::new(0.001, -0.001),
        ];
        for p in samples {
            let back = cam.screen_to_world(cam.world_to_screen(p));
            let tol = 8e-6 * (p.length() + 4000.0);
            assert!((back.x - p.x).abs() <= tol, "{p:?} -> {back:?}");
            assert!((back.y - p.y).abs() <= tol, "{p:?} -> {back:?}");
        }
    }

    #[test]
    fn affine_matches_free_function() {
        let cam = Camera2D::new(Vec2::new(10.0, 20.0), Vec2::new(100.0, 50.0));
        let p = Vec2::new(33.0, -7.0);
        let via_affine = Vec2::from_glam(cam.view_transform().transform_point2(p.to_glam()));
        assert_eq!(via_affine, cam.world_to_screen(p));
        let back = cam.view_transform().inverse().transform_point2(via_affine.to_glam());
        assert!((back.x - p.x).abs() < 1e-4 && (back.y - p.y).abs() < 1e-4);
    }

    #[test]
    fn viewport_bounds_include_margin() {
        let vp = Vec2::new(100.0, 100.0);
        assert!(is_in_viewport(Vec2::new(-10.0, 50.0), vp, 10.0));
        assert!(!is_in_viewport(Vec2::new(-10.1, 50.0), vp, 10.0));
        assert!(is_in_viewport(Vec2::new(110.0, 110.0), vp, 10.0));
        assert!(!is_in_viewport(Vec2::new(50.0, 110.5), vp, 10.0));
    }

    #[test]
    fn non_finite_points_are_culled() {
        let cam = Camera2D::default();
        assert!(cam.project(Vec2::new(f32::NAN, 0.0)).is_none());
        assert!(cam.cull(Vec2::new(f32::INFINITY, 0.0), 1e9).is_none());
        assert!(!is_in_viewport(Vec2::new(f32::NAN, 1.0), cam.viewport, 10.0));
        assert!(cam.cull_screen(Vec2::new(1.0, f32::NEG_INFINITY), 10.0).is_none());
    }
}
