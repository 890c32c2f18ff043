//! Light fragments and echoes.
//!
//! Both are owned by the gameplay layer (spawned on world events, removed on
//! collection or expiry) and only read here, once per frame.

use crate::color::Color;
use crate::config::EffectsConfig;
use crate::error::RenderError;
use crate::frame::FrameContext;
use crate::math::{ScreenPoint, Vec2, WorldPoint};
use crate::render::{BlendGuard, BlendMode, DrawSurface, Paint, RadialGradient, TextAlign, TextStyle};

use super::pool::PassStats;

const FRAGMENT_GLOW: Color = Color::rgb8(255, 214, 120);
const ECHO_TEXT: Color = Color::rgba(1.0, 1.0, 1.0, 0.9);
const ECHO_AUTHOR: Color = Color::rgba(0.8, 0.85, 1.0, 0.6);
/// Echo glow never fades below this fraction of its initial strength.
const ECHO_FADE_FLOOR: f32 = 0.35;

/// Stationary pulsing marker for a collectible light.
#[derive(Clone, Debug, PartialEq)]
pub struct Fragment {
    pub position: WorldPoint,
    /// Phase offset of the pulse, radians
    pub phase: f32,
}

impl Fragment {
    pub fn new(position: WorldPoint, phase: f32) -> Self {
        Self { position, phase }
    }

    /// Pulsing radius: `base + amplitude * sin(time / period + phase)`.
    pub fn pulse_size(&self, time: f32, cfg: &EffectsConfig) -> f32 {
        let period = if cfg.fragment_pulse_period > 0.0 {
            cfg.fragment_pulse_period
        } else {
            1.0
        };
        cfg.fragment_base_size + cfg.fragment_pulse_amplitude * (time / period + self.phase).sin()
    }
}

/// Persistent message left in the world by a player.
#[derive(Clone, Debug, PartialEq)]
pub struct Echo {
    pub id: u64,
    pub position: WorldPoint,
    pub text: String,
    pub author_id: String,
    pub author_name: String,
    /// Creation time on the same clock as `FrameContext::time`
    pub created_at: f32,
    /// Author's hue in degrees, used for the glow
    pub hue: f32,
}

impl Echo {
    /// Glow strength in `[ECHO_FADE_FLOOR, 1]`, decreasing with age.
    pub fn glow_strength(&self, time: f32, fade_time: f32) -> f32 {
        let age = (time - self.created_at).max(0.0);
        if fade_time <= 0.0 {
            return 1.0;
        }
        (1.0 - age / fade_time).clamp(ECHO_FADE_FLOOR, 1.0)
    }

    /// Whether the viewer is close enough to read the text.
    pub fn is_revealed(&self, viewer: WorldPoint, reveal_distance: f32) -> bool {
        self.position.distance(viewer) < reveal_distance
    }
}

/// Draw every visible fragment as an additive glow with a bright core.
pub fn draw_fragments(
    surface: &mut dyn DrawSurface,
    ctx: &FrameContext<'_>,
    cfg: &EffectsConfig,
    margin: f32,
) -> PassStats {
    let mut stats = PassStats::default();
    if ctx.fragments.is_empty() {
        return stats;
    }

    let mut surface = BlendGuard::new(surface, BlendMode::Additive);
    for fragment in ctx.fragments {
        let Some(screen) = ctx.camera.cull(fragment.position, margin) else {
            stats.culled += 1;
            continue;
        };
        let size = fragment.pulse_size(ctx.time, cfg);
        if !size.is_finite() {
            log::warn!("skipping fragment with non-finite pulse at {:?}", fragment.position);
            stats.rejected += 1;
            continue;
        }
        let size = size.max(0.5);
        surface.fill_circle(
            screen,
            size * 3.0,
            Paint::Radial(RadialGradient::glow(screen, size * 3.0, FRAGMENT_GLOW.with_alpha(0.6))),
        );
        surface.fill_circle(screen, size * 0.45, Paint::Solid(Color::WHITE));
        stats.drawn += 1;
    }
    stats
}

/// Counters for the echo pass; `labels` counts revealed texts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EchoStats {
    pub pass: PassStats,
    pub labels: usize,
}

/// Draw echo glows (additive), then the text of echoes near the viewer
/// (normal blending, so labels stay legible).
pub fn draw_echoes(
    surface: &mut dyn DrawSurface,
    ctx: &FrameContext<'_>,
    cfg: &EffectsConfig,
    margin: f32,
) -> EchoStats {
    let mut stats = EchoStats::default();
    if ctx.echoes.is_empty() {
        return stats;
    }

    let mut revealed: Vec<(&Echo, ScreenPoint)> = Vec::new();
    {
        let mut surface = BlendGuard::new(&mut *surface, BlendMode::Additive);
        for echo in ctx.echoes {
            let Some(screen) = ctx.camera.cull(echo.position, margin) else {
                stats.pass.culled += 1;
                continue;
            };
            match draw_echo_glow(&mut *surface, echo, screen, ctx.time, cfg) {
                Ok(()) => stats.pass.drawn += 1,
                Err(err) => {
                    log::warn!("skipping echo {}: {err}", echo.id);
                    stats.pass.rejected += 1;
                    continue;
                }
            }
            if echo.is_revealed(ctx.viewer, cfg.echo_reveal_distance) {
                revealed.push((echo, screen));
            }
        }
    }

    let mut surface = BlendGuard::new(surface, BlendMode::Normal);
    for (echo, screen) in revealed {
        surface.text(
            &echo.text,
            screen - Vec2::new(0.0, cfg.echo_glow_radius + 8.0),
            TextStyle::new(14.0, ECHO_TEXT).aligned(TextAlign::Center),
        );
        surface.text(
            &format!("- {}", echo.author_name),
            screen + Vec2::new(0.0, cfg.echo_glow_radius + 14.0),
            TextStyle::new(11.0, ECHO_AUTHOR),
        );
        stats.labels += 1;
    }
    stats
}

fn draw_echo_glow(
    surface: &mut dyn DrawSurface,
    echo: &Echo,
    screen: ScreenPoint,
    time: f32,
    cfg: &EffectsConfig,
) -> Result<(), RenderError> {
    let strength = echo.glow_strength(time, cfg.echo_fade_time);
    let color = Color::from_hsl(echo.hue, 0.8, 0.65)
        .validated()
        .map_err(|e| RenderError::invalid_color("echo", e))?;
    let radius = cfg.echo_glow_radius.max(1.0);
    surface.fill_circle(
        screen,
        radius,
        Paint::Radial(RadialGradient::glow(screen, radius, color.with_alpha(0.6 * strength))),
    );
    surface.fill_circle(screen, 3.0, Paint::Solid(color.with_alpha(strength)));
    Ok(())
}
