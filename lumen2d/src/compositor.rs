use crate::background::{render_background, RealmTheme};
use crate::config::{OverlayConfig, RenderConfig};
use crate::effects::{draw_echoes, draw_fragments, EffectKind, EffectPools, EffectSender, EffectSpawn, PassStats};
use crate::error::RenderError;
use crate::frame::FrameContext;
use crate::overlay::{OverlayState, OverlayStats};
use crate::render::{BlendGuard, BlendMode, DrawSurface};

/// Per-frame counters, one group per layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub background_passes: usize,
    pub clouds: usize,
    pub stars: usize,
    pub fragments: usize,
    pub echoes: usize,
    pub echo_labels: usize,
    pub particles: usize,
    pub ripples: usize,
    pub shockwaves: usize,
    pub overlays_drawn: usize,
    pub overlay_primitives: usize,
    /// Entities skipped for lying outside the viewport, across all layers.
    pub culled: usize,
    /// Entities skipped because their data could not be drawn.
    pub rejected: usize,
}

impl FrameStats {
    fn absorb(&mut self, pass: PassStats) -> usize {
        self.culled += pass.culled;
        self.rejected += pass.rejected;
        pass.drawn
    }

    /// Pooled effects drawn this frame.
    pub fn effects_drawn(&self) -> usize {
        self.particles + self.ripples + self.shockwaves
    }
}

/// Owns the effect pools and paints one complete frame per `render` call.
///
/// Layers are painted in a fixed order: background, fragments and echoes,
/// pooled effects, overlays. The surface is back in normal blend mode when
/// `render` returns, on success or failure.
pub struct FrameCompositor {
    config: RenderConfig,
    pools: EffectPools,
}

impl FrameCompositor {
    pub fn new(config: RenderConfig) -> Self {
        let pools = EffectPools::new(&config.effects);
        Self { config, pools }
    }

    /// Compositor whose particle bursts are reproducible from `seed`.
    pub fn with_seed(config: RenderConfig, seed: u64) -> Self {
        let pools = EffectPools::with_seed(&config.effects, seed);
        Self { config, pools }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn pools(&self) -> &EffectPools {
        &self.pools
    }

    pub fn pools_mut(&mut self) -> &mut EffectPools {
        &mut self.pools
    }

    /// Cloneable handle other threads can use to queue effects.
    pub fn sender(&self) -> EffectSender {
        self.pools.sender()
    }

    pub fn spawn(&mut self, spawn: impl Into<EffectSpawn>) {
        self.pools.spawn(spawn);
    }

    pub fn clear(&mut self) {
        self.pools.clear();
    }

    pub fn clear_kind(&mut self, kind: EffectKind) {
        self.pools.clear_kind(kind);
    }

    /// Advance effect lifetimes by `dt` seconds. Negative or non-finite steps
    /// are treated as zero.
    pub fn update(&mut self, dt: f32) {
        let dt = if dt.is_finite() && dt >= 0.0 {
            dt
        } else {
            log::warn!("ignoring invalid frame delta {dt}");
            0.0
        };
        self.pools.update(dt);
    }

    /// Paint one frame described by `ctx` onto `surface`.
    pub fn render(&self, surface: &mut dyn DrawSurface, ctx: &FrameContext<'_>) -> Result<FrameStats, RenderError> {
        let mut surface = BlendGuard::frame(surface);
        ensure_live(&*surface, "frame start")?;

        let cfg = &self.config;
        let margin = cfg.culling.margin;
        let mut stats = FrameStats::default();

        let theme = RealmTheme::lookup(ctx.realm);
        if theme.id != ctx.realm && !ctx.realm.is_empty() {
            log::debug!("unknown realm {:?}, using {}", ctx.realm, theme.id);
        }
        let background = render_background(&mut *surface, theme, ctx, &cfg.background, &cfg.world);
        stats.background_passes = background.passes;
        stats.clouds = stats.absorb(background.clouds);
        stats.stars = stats.absorb(background.stars);
        ensure_live(&*surface, "background")?;

        let fragments = draw_fragments(&mut *surface, ctx, &cfg.effects, margin);
        stats.fragments = stats.absorb(fragments);
        let echoes = draw_echoes(&mut *surface, ctx, &cfg.effects, margin);
        stats.echoes = stats.absorb(echoes.pass);
        stats.echo_labels = echoes.labels;
        ensure_live(&*surface, "ambient")?;

        let pooled = self.pools.draw(&mut *surface, &ctx.camera, margin);
        stats.particles = stats.absorb(pooled.particles);
        stats.ripples = stats.absorb(pooled.ripples);
        stats.shockwaves = stats.absorb(pooled.shockwaves);
        ensure_live(&*surface, "effects")?;

        let overlays = draw_overlays(&mut *surface, ctx, &cfg.overlays);
        stats.overlays_drawn = overlays.drawn;
        stats.overlay_primitives = overlays.primitives;
        ensure_live(&*surface, "overlays")?;

        log::debug!(
            "frame t={:.3}: {} effects, {} overlays, {} culled, {} rejected",
            ctx.time,
            stats.effects_drawn(),
            stats.overlays_drawn,
            stats.culled,
            stats.rejected
        );
        Ok(stats)
    }
}

/// Draw every overlay in `ctx.overlays` in rank order, each inside its own
/// normal-blend guard. Input order does not matter; ties keep input order.
fn draw_overlays(surface: &mut dyn DrawSurface, ctx: &FrameContext<'_>, cfg: &OverlayConfig) -> OverlayStats {
    let mut stats = OverlayStats::default();
    if ctx.overlays.is_empty() {
        return stats;
    }

    let mut ordered: Vec<&OverlayState> = ctx.overlays.iter().collect();
    ordered.sort_by_key(|o| o.draw_rank());

    for overlay in ordered {
        let mut guard = BlendGuard::new(&mut *surface, BlendMode::Normal);
        let primitives = match overlay {
            OverlayState::TagArena(tag) => tag.draw(&mut *guard, ctx, cfg),
            OverlayState::Boost(boost) => boost.draw(&mut *guard, ctx),
            OverlayState::Compass(compass) => compass.draw(&mut *guard, ctx, cfg),
            OverlayState::VoiceProximity(voice) => voice.draw(&mut *guard, ctx, cfg.voice_range),
        };
        if primitives > 0 {
            log::trace!("overlay {} emitted {primitives} primitives", overlay.name());
            stats.drawn += 1;
            stats.primitives += primitives;
        }
    }
    stats
}

fn ensure_live(surface: &dyn DrawSurface, stage: &str) -> Result<(), RenderError> {
    if surface.is_lost() {
        log::error!("draw surface lost during {stage}");
        return Err(RenderError::SurfaceLost);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Camera2D;
    use crate::effects::{Particle, Shockwave};
    use crate::math::Vec2;
    use crate::overlay::{BoostOverlay, CompassOverlay, TagOverlay, VoiceOverlay};
    use crate::render::{DrawOp, RecordingSurface};

    fn ctx() -> FrameContext<'static> {
        FrameContext::new(0.0, Camera2D::new(Vec2::ZERO, Vec2::new(800.0, 600.0)))
    }

    #[test]
    fn stats_sum_culled_across_layers() {
        let mut compositor = FrameCompositor::with_seed(RenderConfig::default(), 3);
        compositor.spawn(Particle::new(Vec2::new(10.0, 10.0), Vec2::ZERO, 1.0));
        compositor.spawn(Particle::new(Vec2::new(-9000.0, 0.0), Vec2::ZERO, 1.0));
        compositor.spawn(Shockwave::new(Vec2::new(9000.0, 0.0), 100.0));

        let mut surface = RecordingSurface::new();
        let stats = compositor.render(&mut surface, &ctx()).unwrap();
        assert_eq!(stats.particles, 1);
        assert_eq!(stats.shockwaves, 0);
        assert!(stats.culled >= 2);
        assert_eq!(stats.rejected, 0);
    }

    #[test]
    fn invalid_delta_is_ignored() {
        let mut compositor = FrameCompositor::new(RenderConfig::default());
        compositor.spawn(Particle::new(Vec2::ZERO, Vec2::ZERO, 1.0));
        compositor.update(f32::NAN);
        compositor.update(-1.0);
        assert_eq!(compositor.pools().len(), 1);
        compositor.update(2.0);
        assert!(compositor.pools().is_empty());
    }

    #[test]
    fn lost_surface_resets_host_blend() {
        let compositor = FrameCompositor::new(RenderConfig::default());
        let mut surface = RecordingSurface::new();
        surface.set_blend_mode(BlendMode::Screen);
        surface.set_lost(true);
        assert_eq!(compositor.render(&mut surface, &ctx()), Err(RenderError::SurfaceLost));
        assert!(surface.is_empty());
        assert_eq!(surface.blend_mode(), BlendMode::Normal);
    }

    fn camera() -> Camera2D {
        Camera2D::new(Vec2::ZERO, Vec2::new(800.0, 600.0))
    }

    #[test]
    fn overlays_drawn_in_rank_order_regardless_of_input() {
        let overlays = vec![
            OverlayState::Compass(CompassOverlay::new(Vec2::new(-5000.0, 0.0))),
            OverlayState::TagArena(TagOverlay {
                is_it: true,
                target: None,
                survival_time: 0.0,
            }),
        ];
        let ctx = FrameContext::new(0.0, camera()).with_overlays(&overlays);
        let mut surface = RecordingSurface::new();
        let stats = draw_overlays(&mut surface, &ctx, &OverlayConfig::default());

        assert_eq!(stats.drawn, 2);
        assert_eq!(stats.primitives, 3 + 4);
        let texts: Vec<&str> = surface
            .commands()
            .iter()
            .filter_map(|c| match &c.op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(texts, vec!["YOU'RE IT!", "5000"]);
    }

    #[test]
    fn blend_is_normal_between_overlays() {
        let overlays = vec![
            OverlayState::Boost(BoostOverlay::from_key("magnet", 4.0, 8.0)),
            OverlayState::Compass(CompassOverlay::new(Vec2::new(0.0, 9000.0))),
        ];
        let ctx = FrameContext::new(1.0, camera()).with_overlays(&overlays);
        let mut surface = RecordingSurface::new();
        draw_overlays(&mut surface, &ctx, &OverlayConfig::default());

        let first_compass = surface
            .commands()
            .iter()
            .position(|c| c.op.is_polygon())
            .unwrap();
        assert!(surface.commands()[..first_compass - 2]
            .iter()
            .all(|c| c.blend == BlendMode::Additive));
        assert!(surface.commands()[first_compass - 2..]
            .iter()
            .all(|c| c.blend == BlendMode::Normal));
        assert_eq!(surface.blend_mode(), BlendMode::Normal);
    }

    #[test]
    fn silent_overlays_are_not_counted() {
        let overlays = vec![OverlayState::VoiceProximity(VoiceOverlay::default())];
        let ctx = FrameContext::new(0.0, camera()).with_overlays(&overlays);
        let mut surface = RecordingSurface::new();
        assert_eq!(draw_overlays(&mut surface, &ctx, &OverlayConfig::default()), OverlayStats::default());
    }
}
