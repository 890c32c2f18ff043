use std::f32::consts::TAU;

use crate::color::Color;
use crate::frame::FrameContext;
use crate::math::Vec2;
use crate::render::{BlendGuard, BlendMode, DrawSurface, Paint, RadialGradient, Stroke};

/// Timed power-up categories the renderer knows how to decorate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BoostKind {
    Speed,
    Shield,
    Magnet,
    Ghost,
    /// Any key the renderer does not recognize.
    Unknown,
}

impl BoostKind {
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "speed" => BoostKind::Speed,
            "shield" => BoostKind::Shield,
            "magnet" => BoostKind::Magnet,
            "ghost" => BoostKind::Ghost,
            _ => BoostKind::Unknown,
        }
    }

    pub fn palette(self) -> BoostPalette {
        match self {
            BoostKind::Speed => BoostPalette {
                primary: Color::rgb8(255, 210, 60),
                secondary: Color::rgb8(255, 140, 0),
            },
            BoostKind::Shield => BoostPalette {
                primary: Color::rgb8(80, 180, 255),
                secondary: Color::rgb8(180, 230, 255),
            },
            BoostKind::Magnet => BoostPalette {
                primary: Color::rgb8(200, 90, 255),
                secondary: Color::rgb8(255, 120, 220),
            },
            BoostKind::Ghost => BoostPalette {
                primary: Color::rgb8(200, 200, 220),
                secondary: Color::rgb8(140, 140, 170),
            },
            BoostKind::Unknown => BoostPalette::NEUTRAL,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoostPalette {
    pub primary: Color,
    pub secondary: Color,
}

impl BoostPalette {
    pub const NEUTRAL: BoostPalette = BoostPalette {
        primary: Color::rgba(1.0, 1.0, 1.0, 1.0),
        secondary: Color::rgba(0.7, 0.7, 0.7, 1.0),
    };

    /// Palette for a boost key; unrecognized keys get [`BoostPalette::NEUTRAL`].
    pub fn for_key(key: &str) -> BoostPalette {
        BoostKind::from_key(key).palette()
    }
}

/// An active timed boost on the local player.
#[derive(Clone, Debug, PartialEq)]
pub struct BoostOverlay {
    pub kind: BoostKind,
    /// Seconds left
    pub remaining: f32,
    /// Total seconds the boost lasts
    pub duration: f32,
}

impl BoostOverlay {
    pub fn from_key(key: &str, remaining: f32, duration: f32) -> Self {
        Self {
            kind: BoostKind::from_key(key),
            remaining,
            duration,
        }
    }

    /// `remaining / duration`, clamped to `[0, 1]`.
    pub fn fraction(&self) -> f32 {
        if self.duration > 0.0 && self.remaining.is_finite() {
            (self.remaining / self.duration).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    pub fn draw(&self, surface: &mut dyn DrawSurface, ctx: &FrameContext<'_>) -> usize {
        let fraction = self.fraction();
        if fraction <= 0.0 {
            return 0;
        }
        let palette = self.kind.palette();
        let center = ctx.camera.screen_center();
        let time = ctx.time;

        let mut surface = BlendGuard::new(surface, BlendMode::Additive);
        let glow_radius = 60.0 + 60.0 * fraction;
        surface.fill_circle(
            center,
            glow_radius,
            Paint::Radial(RadialGradient::glow(center, glow_radius, palette.primary.with_alpha(0.35 * fraction))),
        );
        let mut primitives = 1;

        match self.kind {
            BoostKind::Speed => {
                const LINES: usize = 12;
                let stroke = Stroke::solid(palette.secondary.with_alpha(0.6 * fraction), 2.0);
                for i in 0..LINES {
                    let dir = Vec2::from_angle(time * 0.5 + i as f32 * TAU / LINES as f32);
                    surface.line(center + dir * 55.0, center + dir * (55.0 + 40.0 * fraction), stroke);
                }
                primitives += LINES;
            }
            BoostKind::Shield => {
                surface.stroke_circle(
                    center,
                    48.0,
                    Stroke::dashed(palette.secondary.with_alpha(0.8 * fraction), 3.0, 10.0, 6.0, time * 30.0),
                );
                primitives += 1;
            }
            BoostKind::Magnet => {
                const ORBITERS: usize = 6;
                for i in 0..ORBITERS {
                    let phase = i as f32 / ORBITERS as f32;
                    // Each orbiter spirals inward and wraps back out.
                    let shrink = 1.0 - (time * 0.8 + phase).rem_euclid(1.0);
                    let pos = center + Vec2::from_angle(time * 2.0 + phase * TAU) * (20.0 + 60.0 * shrink);
                    surface.fill_circle(pos, 3.0, Paint::Solid(palette.secondary.with_alpha(fraction)));
                }
                primitives += ORBITERS;
            }
            BoostKind::Ghost | BoostKind::Unknown => {}
        }
        primitives
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Camera2D;
    use crate::render::{DrawOp, RecordingSurface};

    fn ctx() -> FrameContext<'static> {
        FrameContext::new(2.0, Camera2D::new(Vec2::ZERO, Vec2::new(800.0, 600.0)))
    }

    #[test]
    fn unknown_key_gets_neutral_palette() {
        assert_eq!(BoostPalette::for_key("rocket-boots"), BoostPalette::NEUTRAL);
        assert_eq!(BoostPalette::for_key(""), BoostPalette::NEUTRAL);
        assert_eq!(BoostKind::from_key(" Shield "), BoostKind::Shield);
        assert_ne!(BoostPalette::for_key("speed"), BoostPalette::NEUTRAL);
    }

    #[test]
    fn unknown_boost_still_draws_glow() {
        let overlay = BoostOverlay::from_key("mystery", 5.0, 10.0);
        let mut surface = RecordingSurface::new();
        assert_eq!(overlay.draw(&mut surface, &ctx()), 1);
        match &surface.commands()[0].op {
            DrawOp::FillCircle { radius, .. } => assert!((radius - 90.0).abs() < 1e-4),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn flourish_per_kind() {
        let mut counts = Vec::new();
        for key in ["speed", "shield", "magnet", "ghost"] {
            let mut surface = RecordingSurface::new();
            counts.push(BoostOverlay::from_key(key, 3.0, 6.0).draw(&mut surface, &ctx()));
            assert_eq!(counts.last().copied(), Some(surface.len()));
            assert_eq!(surface.blend_mode(), BlendMode::Normal);
        }
        assert_eq!(counts, vec![13, 2, 7, 1]);
    }

    #[test]
    fn shield_ring_is_dashed() {
        let mut surface = RecordingSurface::new();
        BoostOverlay::from_key("shield", 1.0, 1.0).draw(&mut surface, &ctx());
        match &surface.commands()[1].op {
            DrawOp::StrokeCircle { stroke, .. } => assert!(stroke.dash.is_some()),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn magnet_orbiters_stay_in_band_before_time_zero() {
        let overlay = BoostOverlay::from_key("magnet", 3.0, 6.0);
        for time in [-0.3, -2.75, -1234.5] {
            let ctx = FrameContext::new(time, Camera2D::new(Vec2::ZERO, Vec2::new(800.0, 600.0)));
            let mut surface = RecordingSurface::new();
            overlay.draw(&mut surface, &ctx);
            let center = ctx.camera.screen_center();
            for cmd in &surface.commands()[1..] {
                match &cmd.op {
                    DrawOp::FillCircle { center: pos, .. } => {
                        let r = pos.distance(center);
                        assert!((19.9..=80.1).contains(&r), "orbiter at {r} for t={time}");
                    }
                    other => panic!("unexpected {other:?}"),
                }
            }
        }
    }

    #[test]
    fn expired_or_degenerate_boost_draws_nothing() {
        let mut surface = RecordingSurface::new();
        assert_eq!(BoostOverlay::from_key("speed", 0.0, 10.0).draw(&mut surface, &ctx()), 0);
        assert_eq!(BoostOverlay::from_key("speed", 5.0, 0.0).draw(&mut surface, &ctx()), 0);
        assert_eq!(BoostOverlay::from_key("speed", f32::NAN, 5.0).draw(&mut surface, &ctx()), 0);
        assert!(surface.is_empty());
    }
}
