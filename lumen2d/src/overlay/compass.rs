use crate::color::Color;
use crate::config::OverlayConfig;
use crate::frame::FrameContext;
use crate::math::{Vec2, WorldPoint};
use crate::render::{DrawSurface, Paint, Stroke, TextStyle};

#[derive(Clone, Copy, Debug, PartialEq)]
struct CompassPalette {
    ring: Color,
    arrow: Color,
}

const INSIDE: CompassPalette = CompassPalette {
    ring: Color::rgb8(90, 200, 255),
    arrow: Color::rgb8(200, 240, 255),
};

const OUTSIDE: CompassPalette = CompassPalette {
    ring: Color::rgb8(255, 150, 60),
    arrow: Color::rgb8(255, 90, 60),
};

/// Points the viewer back toward a reference location (usually spawn).
#[derive(Clone, Debug, PartialEq)]
pub struct CompassOverlay {
    pub reference: WorldPoint,
}

impl CompassOverlay {
    pub fn new(reference: WorldPoint) -> Self {
        Self { reference }
    }

    /// Shown only once the viewer is farther than half the safe radius.
    pub fn is_visible(&self, viewer: WorldPoint, safe_radius: f32) -> bool {
        let distance = viewer.distance(self.reference);
        distance.is_finite() && distance > safe_radius * 0.5
    }

    pub fn draw(&self, surface: &mut dyn DrawSurface, ctx: &FrameContext<'_>, cfg: &OverlayConfig) -> usize {
        if !self.is_visible(ctx.viewer, cfg.compass_safe_radius) {
            return 0;
        }
        let delta = self.reference - ctx.viewer;
        let distance = delta.length();
        let palette = if distance <= cfg.compass_safe_radius {
            INSIDE
        } else {
            OUTSIDE
        };

        let center = Vec2::new(ctx.viewport().x - cfg.compass_inset.x, cfg.compass_inset.y);
        let r = cfg.compass_radius.max(8.0);
        surface.fill_circle(center, r, Paint::Solid(Color::rgba(0.0, 0.0, 0.0, 0.45)));
        surface.stroke_circle(center, r, Stroke::solid(palette.ring.with_alpha(0.9), 2.0));

        let dir = Vec2::from_angle(delta.angle());
        let side = Vec2::new(-dir.y, dir.x);
        let tip = center + dir * (r * 0.75);
        let tail = center - dir * (r * 0.35);
        surface.fill_polygon(&[tip, tail + side * (r * 0.3), tail - side * (r * 0.3)], palette.arrow);

        surface.text(
            &format!("{distance:.0}"),
            center + Vec2::new(0.0, r + 14.0),
            TextStyle::new(12.0, palette.ring),
        );
        4
    }
}
