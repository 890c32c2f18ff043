use crate::color::Color;
use crate::config::OverlayConfig;
use crate::frame::FrameContext;
use crate::math::{Vec2, WorldPoint};
use crate::render::{BlendGuard, BlendMode, DrawSurface, Paint, RadialGradient, TextStyle};

const IT_RED: Color = Color::rgb8(255, 60, 60);
const SAFE_GREEN: Color = Color::rgb8(90, 255, 160);
const INDICATOR: Color = Color::rgb8(255, 120, 90);

/// Chase/tag arena state for the local player, rebuilt every frame.
#[derive(Clone, Debug, PartialEq)]
pub struct TagOverlay {
    /// Local player currently holds the "it" role.
    pub is_it: bool,
    /// World position of whoever is "it", when the local player is not.
    pub target: Option<WorldPoint>,
    /// Seconds the local player has avoided being tagged.
    pub survival_time: f32,
}

impl TagOverlay {
    /// Safe-glow intensity in `[0, 1]`: ramps with survival time and pulses.
    pub fn safe_glow_intensity(&self, time: f32, full_time: f32) -> f32 {
        let ramp = if full_time > 0.0 {
            (self.survival_time / full_time).clamp(0.0, 1.0)
        } else {
            1.0
        };
        let pulse = 0.6 + 0.4 * (time * 3.0).sin();
        (ramp * pulse).clamp(0.0, 1.0)
    }

    pub fn draw(&self, surface: &mut dyn DrawSurface, ctx: &FrameContext<'_>, cfg: &OverlayConfig) -> usize {
        if self.is_it {
            return draw_it_state(surface, ctx);
        }

        let mut primitives = 0;
        if let Some(target) = self.target {
            primitives += draw_target_indicator(surface, ctx, cfg, target);
        }

        let intensity = self.safe_glow_intensity(ctx.time, cfg.tag_safe_full_time);
        if intensity > 0.0 {
            let mut surface = BlendGuard::new(surface, BlendMode::Additive);
            let center = ctx.camera.screen_center();
            let radius = ctx.viewport().x.min(ctx.viewport().y) * 0.12;
            surface.fill_circle(
                center,
                radius,
                Paint::Radial(RadialGradient::glow(center, radius, SAFE_GREEN.with_alpha(0.35 * intensity))),
            );
            primitives += 1;
        }
        primitives
    }
}

fn draw_it_state(surface: &mut dyn DrawSurface, ctx: &FrameContext<'_>) -> usize {
    let viewport = ctx.viewport();
    let center = viewport * 0.5;
    let pulse = 0.3 + 0.1 * (ctx.time * 4.0).sin();

    let vignette = RadialGradient {
        center,
        inner_radius: viewport.x.min(viewport.y) * 0.3,
        outer_radius: center.length().max(1.0),
        stops: Vec::new(),
    }
    .with_stop(0.0, IT_RED.with_alpha(0.0))
    .with_stop(1.0, IT_RED.with_alpha(pulse));
    surface.fill_rect(Vec2::ZERO, viewport, Paint::Radial(vignette));

    let banner_size = Vec2::new(260.0, 44.0);
    let banner_origin = Vec2::new(center.x - banner_size.x * 0.5, 24.0);
    surface.fill_rect(banner_origin, banner_size, Paint::Solid(Color::rgba(0.35, 0.0, 0.0, 0.75)));
    surface.text(
        "YOU'RE IT!",
        Vec2::new(center.x, banner_origin.y + banner_size.y * 0.5),
        TextStyle::new(22.0, Color::WHITE).bold(),
    );
    3
}

fn draw_target_indicator(
    surface: &mut dyn DrawSurface,
    ctx: &FrameContext<'_>,
    cfg: &OverlayConfig,
    target: WorldPoint,
) -> usize {
    let delta = target - ctx.viewer;
    let distance = delta.length();
    if !distance.is_finite() || distance <= cfg.tag_indicator_distance {
        return 0;
    }

    let angle = delta.y.atan2(delta.x);
    let dir = Vec2::from_angle(angle);
    let side = Vec2::new(-dir.y, dir.x);
    let tip = ctx.camera.screen_center() + dir * (cfg.tag_indicator_offset + 14.0);
    let base = ctx.camera.screen_center() + dir * cfg.tag_indicator_offset;
    surface.fill_polygon(&[tip, base + side * 9.0, base - side * 9.0], INDICATOR);
    surface.text(
        &format!("{distance:.0}"),
        base - dir * 16.0,
        TextStyle::new(12.0, INDICATOR),
    );
    2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Camera2D;
    use crate::render::{DrawOp, RecordingSurface};

    fn ctx() -> FrameContext<'static> {
        FrameContext::new(0.0, Camera2D::new(Vec2::ZERO, Vec2::new(800.0, 600.0)))
    }

    #[test]
    fn it_role_draws_vignette_and_banner() {
        let overlay = TagOverlay {
            is_it: true,
            target: Some(Vec2::new(5000.0, 0.0)),
            survival_time: 0.0,
        };
        let mut surface = RecordingSurface::new();
        let n = overlay.draw(&mut surface, &ctx(), &OverlayConfig::default());
        assert_eq!(n, 3);
        assert_eq!(surface.count(|op| op.is_text()), 1);
        assert_eq!(surface.count(DrawOp::is_polygon), 0);
    }

    #[test]
    fn indicator_only_beyond_threshold() {
        let cfg = OverlayConfig::default();
        let near = TagOverlay {
            is_it: false,
            target: Some(Vec2::new(100.0, 0.0)),
            survival_time: 0.0,
        };
        let mut surface = RecordingSurface::new();
        assert_eq!(near.draw(&mut surface, &ctx(), &cfg), 0);

        let far = TagOverlay {
            target: Some(Vec2::new(0.0, 900.0)),
            ..near
        };
        let mut surface = RecordingSurface::new();
        assert_eq!(far.draw(&mut surface, &ctx(), &cfg), 2);
        match &surface.commands()[0].op {
            DrawOp::Polygon { points, .. } => {
                // Target straight below: arrow tip points down from center.
                assert!((points[0].x - 400.0).abs() < 1e-3);
                assert!((points[0].y - (300.0 + cfg.tag_indicator_offset + 14.0)).abs() < 1e-3);
            }
            other => panic!("unexpected {other:?}"),
        }
        match &surface.commands()[1].op {
            DrawOp::Text { text, .. } => assert_eq!(text, "900"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn safe_glow_ramps_with_survival() {
        let mut overlay = TagOverlay {
            is_it: false,
            target: None,
            survival_time: 0.0,
        };
        assert_eq!(overlay.safe_glow_intensity(0.0, 60.0), 0.0);
        overlay.survival_time = 30.0;
        let half = overlay.safe_glow_intensity(0.0, 60.0);
        overlay.survival_time = 120.0;
        let full = overlay.safe_glow_intensity(0.0, 60.0);
        assert!(half > 0.0 && full > half && full <= 1.0);

        let mut surface = RecordingSurface::new();
        assert_eq!(overlay.draw(&mut surface, &ctx(), &OverlayConfig::default()), 1);
        assert_eq!(surface.commands()[0].blend, BlendMode::Additive);
        assert_eq!(surface.blend_mode(), BlendMode::Normal);
    }
}
