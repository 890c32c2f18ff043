//! Realm-themed animated backdrop.
//!
//! Everything here is a pure function of (theme, frame time, viewport,
//! camera, viewer). Cloud and star placement come from an integer hash of
//! their index rather than a stored random stream, so two passes at the same
//! time produce bit-identical output on every platform.

use std::f32::consts::{PI, TAU};

use crate::camera::Camera2D;
use crate::color::Color;
use crate::config::{BackgroundConfig, WorldConfig};
use crate::effects::PassStats;
use crate::frame::FrameContext;
use crate::math::{ScreenPoint, Vec2, WorldPoint};
use crate::render::{BlendGuard, BlendMode, DrawSurface, Paint, RadialGradient};

/// Lowest value of the atmospheric depth falloff.
pub const FALLOFF_FLOOR: f32 = 0.4;

/// Movement tuning a realm exposes to the simulation; read-only here.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicsParams {
    pub friction: f32,
    pub drift: f32,
    pub speed: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RealmTheme {
    pub id: &'static str,
    pub background: Color,
    pub gradient1: Color,
    pub gradient2: Color,
    pub physics: PhysicsParams,
}

const fn theme(
    id: &'static str,
    background: Color,
    gradient1: Color,
    gradient2: Color,
    friction: f32,
    drift: f32,
    speed: f32,
) -> RealmTheme {
    RealmTheme {
        id,
        background,
        gradient1,
        gradient2,
        physics: PhysicsParams {
            friction,
            drift,
            speed,
        },
    }
}

static THEMES: [RealmTheme; 7] = [
    theme("genesis", Color::rgb8(10, 10, 26), Color::rgb8(26, 26, 62), Color::rgb8(45, 27, 78), 0.95, 0.0, 1.0),
    theme("nebula", Color::rgb8(13, 2, 33), Color::rgb8(75, 29, 107), Color::rgb8(27, 58, 107), 0.97, 0.1, 1.0),
    theme("crystal", Color::rgb8(4, 20, 31), Color::rgb8(15, 76, 92), Color::rgb8(95, 168, 211), 0.9, 0.0, 0.9),
    theme("abyss", Color::rgb8(2, 3, 8), Color::rgb8(11, 26, 46), Color::rgb8(26, 11, 46), 0.98, 0.05, 0.8),
    theme("sanctuary", Color::rgb8(15, 26, 20), Color::rgb8(30, 77, 58), Color::rgb8(77, 122, 90), 0.92, 0.0, 0.85),
    theme("kinetic", Color::rgb8(26, 10, 5), Color::rgb8(92, 42, 15), Color::rgb8(138, 59, 18), 0.99, 0.0, 1.4),
    theme("dream", Color::rgb8(20, 5, 31), Color::rgb8(90, 31, 107), Color::rgb8(176, 74, 138), 0.96, 0.2, 1.1),
];

impl RealmTheme {
    /// Theme used for unknown realm identifiers.
    pub fn fallback() -> &'static RealmTheme {
        &THEMES[0]
    }

    /// Look up a realm by identifier, falling back to the default theme.
    pub fn lookup(realm: &str) -> &'static RealmTheme {
        THEMES
            .iter()
            .find(|t| t.id == realm)
            .unwrap_or_else(Self::fallback)
    }

    pub fn all() -> &'static [RealmTheme] {
        &THEMES
    }
}

/// Dimming factor in `[0.4, 1.0]`: 1 at the world center, falling linearly to
/// the floor at `world_radius` and beyond.
pub fn atmospheric_falloff(viewer: WorldPoint, world_center: WorldPoint, world_radius: f32) -> f32 {
    let distance = viewer.distance(world_center);
    if !distance.is_finite() || world_radius <= 0.0 {
        return FALLOFF_FLOOR;
    }
    let t = (distance / world_radius).min(1.0);
    1.0 - (1.0 - FALLOFF_FLOOR) * t
}

fn mix(mut x: u32) -> u32 {
    x ^= x >> 16;
    x = x.wrapping_mul(0x7feb_352d);
    x ^= x >> 15;
    x = x.wrapping_mul(0x846c_a68b);
    x ^= x >> 16;
    x
}

/// Deterministic value in `[0, 1)` for `(index, salt)`.
pub fn hash_unit(index: u32, salt: u32) -> f32 {
    let h = mix(index.wrapping_mul(0x9e37_79b9) ^ mix(salt));
    (h >> 8) as f32 / (1u32 << 24) as f32
}

/// Base placement of a cloud, independent of time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CloudAnchor {
    pub position: ScreenPoint,
    pub radius: f32,
}

pub fn cloud_anchor(index: u32, viewport: Vec2) -> CloudAnchor {
    let short = viewport.x.min(viewport.y);
    CloudAnchor {
        position: Vec2::new(hash_unit(index, 1) * viewport.x, hash_unit(index, 2) * viewport.y),
        radius: short * (0.15 + 0.2 * hash_unit(index, 3)),
    }
}

/// A cloud at a given time: anchor plus slow drift and breathing opacity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cloud {
    pub position: ScreenPoint,
    pub radius: f32,
    pub opacity: f32,
}

pub fn cloud_at(index: u32, viewport: Vec2, time: f32) -> Cloud {
    let anchor = cloud_anchor(index, viewport);
    let i = index as f32;
    let drift = Vec2::new(
        (time * 0.05 + i * 1.3).sin() * 40.0,
        (time * 0.04 + i * 0.7).cos() * 25.0,
    );
    Cloud {
        position: anchor.position + drift,
        radius: anchor.radius,
        opacity: 0.05 + 0.03 * (time * 0.2 + i * 1.7).sin(),
    }
}

/// A star of the dust layer at a given time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Star {
    pub position: ScreenPoint,
    pub size: f32,
    pub alpha: f32,
}

/// Stars tile the viewport and scroll against the camera at `parallax` speed.
pub fn star_at(index: u32, camera: &Camera2D, parallax: f32, time: f32) -> Star {
    let viewport = camera.viewport;
    let anchor = Vec2::new(hash_unit(index, 11) * viewport.x, hash_unit(index, 12) * viewport.y);
    let shifted = anchor - camera.offset * parallax;
    let position = Vec2::new(
        shifted.x.rem_euclid(viewport.x.max(1.0)),
        shifted.y.rem_euclid(viewport.y.max(1.0)),
    );
    let r = hash_unit(index, 13);
    let twinkle = 0.5 + 0.5 * (time * (1.0 + 2.0 * r) + index as f32).sin();
    Star {
        position,
        size: 0.6 + 1.4 * r,
        alpha: 0.3 + 0.5 * twinkle,
    }
}

/// Centers of the two nebula gradients; they orbit once per `period` seconds,
/// half a turn apart.
pub fn nebula_centers(viewport: Vec2, time: f32, period: f32) -> [ScreenPoint; 2] {
    let omega = if period > 0.0 { TAU / period } else { 0.0 };
    let center = viewport * 0.5;
    let a = omega * time;
    [
        center + Vec2::new(a.cos() * viewport.x * 0.25, a.sin() * viewport.y * 0.2),
        center + Vec2::new((a + PI).cos() * viewport.x * 0.3, (a + PI).sin() * viewport.y * 0.25),
    ]
}

/// Counters for the background pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BackgroundStats {
    pub passes: usize,
    pub clouds: PassStats,
    pub stars: PassStats,
}

/// Paint the backdrop for the realm in `ctx`.
pub fn render_background(
    surface: &mut dyn DrawSurface,
    theme: &RealmTheme,
    ctx: &FrameContext<'_>,
    cfg: &BackgroundConfig,
    world: &WorldConfig,
) -> BackgroundStats {
    let mut stats = BackgroundStats {
        passes: 1,
        ..BackgroundStats::default()
    };
    let mut surface = BlendGuard::new(surface, BlendMode::Normal);
    let viewport = ctx.viewport();
    let falloff = atmospheric_falloff(ctx.viewer, world.center(), world.outer_radius());

    surface.fill_rect(Vec2::ZERO, viewport, Paint::Solid(theme.background.scaled(falloff)));

    let radius = viewport.x.max(viewport.y) * 0.7;
    let [c1, c2] = nebula_centers(viewport, ctx.time, cfg.nebula_period);
    let nebulae = if cfg.second_nebula { 2 } else { 1 };
    for (center, color) in [(c1, theme.gradient1), (c2, theme.gradient2)].into_iter().take(nebulae) {
        let gradient = RadialGradient::glow(center, radius, color.scaled(falloff).with_alpha(0.35));
        surface.fill_rect(Vec2::ZERO, viewport, Paint::Radial(gradient));
    }

    for index in 0..cfg.star_count {
        let star = star_at(index, &ctx.camera, cfg.star_parallax, ctx.time);
        let Some(screen) = ctx.camera.cull_screen(star.position, 0.0) else {
            stats.stars.culled += 1;
            continue;
        };
        surface.fill_circle(screen, star.size, Paint::Solid(Color::WHITE.with_alpha(star.alpha * falloff)));
        stats.stars.drawn += 1;
    }

    let cloud_color = theme.gradient2.scaled(1.6 * falloff);
    for index in 0..cfg.cloud_count {
        let cloud = cloud_at(index, viewport, ctx.time);
        // Margin is the cloud's own radius so a blob is kept while any part of it shows.
        let Some(screen) = ctx.camera.cull_screen(cloud.position, cloud.radius) else {
            stats.clouds.culled += 1;
            continue;
        };
        let gradient = RadialGradient::glow(screen, cloud.radius, cloud_color.with_alpha(cloud.opacity));
        surface.fill_circle(screen, cloud.radius, Paint::Radial(gradient));
        stats.clouds.drawn += 1;
    }

    if cfg.vignette {
        draw_vignette(&mut *surface, viewport, cfg.vignette_strength);
    }
    stats
}

/// Darken the viewport edges.
pub fn draw_vignette(surface: &mut dyn DrawSurface, viewport: Vec2, strength: f32) {
    let center = viewport * 0.5;
    let gradient = RadialGradient {
        center,
        inner_radius: viewport.x.min(viewport.y) * 0.35,
        outer_radius: center.length().max(1.0),
        stops: Vec::new(),
    }
    .with_stop(0.0, Color::BLACK.with_alpha(0.0))
    .with_stop(1.0, Color::BLACK.with_alpha(strength));
    surface.fill_rect(Vec2::ZERO, viewport, Paint::Radial(gradient));
}
