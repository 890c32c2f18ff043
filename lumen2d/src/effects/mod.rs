//! Short-lived visual effects and the ambient markers drawn alongside them.

mod ambient;
mod particles;
mod pool;
mod queue;
mod rings;

pub use ambient::{draw_echoes, draw_fragments, Echo, EchoStats, Fragment};
pub use particles::{Particle, ParticleBurst};
pub use pool::{Effect, EffectPool, PassStats};
pub use queue::{EffectSender, EffectSpawn};
pub use rings::{Ripple, Shockwave};

use crate::camera::Camera2D;
use crate::config::EffectsConfig;
use crate::render::DrawSurface;

use queue::SpawnQueue;

/// Which pooled category an operation targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EffectKind {
    Particles,
    Ripples,
    Shockwaves,
}

/// Draw counters for the pooled categories.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolStats {
    pub particles: PassStats,
    pub ripples: PassStats,
    pub shockwaves: PassStats,
}

/// All pooled effects plus the queue gameplay code feeds them through.
pub struct EffectPools {
    particles: EffectPool<Particle>,
    ripples: EffectPool<Ripple>,
    shockwaves: EffectPool<Shockwave>,
    queue: SpawnQueue,
    rng: fastrand::Rng,
}

impl EffectPools {
    pub fn new(cfg: &EffectsConfig) -> Self {
        Self::with_seed(cfg, 0x5eed_1a55)
    }

    /// Pools whose burst randomness is reproducible from `seed`.
    pub fn with_seed(cfg: &EffectsConfig, seed: u64) -> Self {
        Self {
            particles: EffectPool::new(cfg.max_particles),
            ripples: EffectPool::new(cfg.max_ripples),
            shockwaves: EffectPool::new(cfg.max_shockwaves),
            queue: SpawnQueue::new(),
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Handle for queuing spawns from outside the render loop.
    pub fn sender(&self) -> EffectSender {
        self.queue.sender()
    }

    /// Spawn immediately (same-thread callers).
    pub fn spawn(&mut self, spawn: impl Into<EffectSpawn>) {
        match spawn.into() {
            EffectSpawn::Particle(p) => self.particles.spawn(p),
            EffectSpawn::Burst(burst) => {
                if burst.count > self.particles.capacity() {
                    log::debug!(
                        "burst of {} clamped to particle cap {}",
                        burst.count,
                        self.particles.capacity()
                    );
                }
                for p in burst.emit_up_to(&mut self.rng, self.particles.capacity()) {
                    self.particles.spawn(p);
                }
            }
            EffectSpawn::Ripple(r) => self.ripples.spawn(r),
            EffectSpawn::Shockwave(s) => self.shockwaves.spawn(s),
        }
    }

    /// Apply queued spawns, then advance every pool by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        let queued: Vec<EffectSpawn> = self.queue.drain().collect();
        if !queued.is_empty() {
            log::trace!("applying {} queued effect spawns", queued.len());
        }
        for spawn in queued {
            self.spawn(spawn);
        }

        self.particles.update(dt);
        self.ripples.update(dt);
        self.shockwaves.update(dt);
    }

    /// Draw particles, ripples and shockwaves, each category in its own
    /// additive pass.
    pub fn draw(&self, surface: &mut dyn DrawSurface, camera: &Camera2D, margin: f32) -> PoolStats {
        PoolStats {
            particles: self.particles.draw(surface, camera, margin),
            ripples: self.ripples.draw(surface, camera, margin),
            shockwaves: self.shockwaves.draw(surface, camera, margin),
        }
    }

    pub fn clear(&mut self) {
        self.particles.clear();
        self.ripples.clear();
        self.shockwaves.clear();
    }

    pub fn clear_kind(&mut self, kind: EffectKind) {
        match kind {
            EffectKind::Particles => self.particles.clear(),
            EffectKind::Ripples => self.ripples.clear(),
            EffectKind::Shockwaves => self.shockwaves.clear(),
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len() + self.ripples.len() + self.shockwaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Spawn requests waiting for the next update.
    pub fn pending(&self) -> usize {
        self.queue.pending()
    }

    pub fn particles(&self) -> &EffectPool<Particle> {
        &self.particles
    }

    pub fn ripples(&self) -> &EffectPool<Ripple> {
        &self.ripples
    }

    pub fn shockwaves(&self) -> &EffectPool<Shockwave> {
        &self.shockwaves
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::math::Vec2;
    use crate::render::{BlendMode, RecordingSurface};

    fn pools() -> EffectPools {
        EffectPools::with_seed(&EffectsConfig::default(), 1)
    }

    #[test]
    fn expired_particles_leave_in_same_update() {
        let mut pools = pools();
        pools.spawn(Particle::new(Vec2::ZERO, Vec2::ZERO, 1.0));
        pools.spawn(Particle::new(Vec2::ZERO, Vec2::ZERO, 3.0));
        pools.update(1.0);
        assert_eq!(pools.particles().len(), 1);
        assert!(pools.particles().iter().all(|p| p.life > 0.0));
    }

    #[test]
    fn cap_evicts_oldest() {
        let cfg = EffectsConfig {
            max_shockwaves: 2,
            ..EffectsConfig::default()
        };
        let mut pools = EffectPools::with_seed(&cfg, 1);
        for x in [1.0, 2.0, 3.0] {
            pools.spawn(Shockwave::new(Vec2::new(x, 0.0), 100.0));
        }
        let xs: Vec<f32> = pools.shockwaves().iter().map(|s| s.position.x).collect();
        assert_eq!(xs, vec![2.0, 3.0]);
    }

    #[test]
    fn queued_spawns_apply_on_update() {
        let mut pools = pools();
        let sender = pools.sender();
        let handle = std::thread::spawn(move || {
            assert!(sender.send(Ripple::new(Vec2::ZERO)));
            assert!(sender.send(ParticleBurst::new(Vec2::ZERO, 5)));
        });
        handle.join().unwrap();

        assert_eq!(pools.pending(), 2);
        assert!(pools.is_empty());
        pools.update(0.0);
        assert_eq!(pools.ripples().len(), 1);
        assert_eq!(pools.particles().len(), 5);
        assert_eq!(pools.pending(), 0);
    }

    #[test]
    fn oversized_burst_is_clamped_to_cap() {
        let cfg = EffectsConfig {
            max_particles: 16,
            ..EffectsConfig::default()
        };
        let mut pools = EffectPools::with_seed(&cfg, 1);
        pools.spawn(ParticleBurst::new(Vec2::ZERO, 50_000_000));
        assert_eq!(pools.particles().len(), 16);
    }

    #[test]
    fn sender_reports_dropped_pools() {
        let sender = pools().sender();
        assert!(!sender.send(Ripple::new(Vec2::ZERO)));
    }

    #[test]
    fn clear_kind_only_touches_one_pool() {
        let mut pools = pools();
        pools.spawn(Ripple::new(Vec2::ZERO));
        pools.spawn(Shockwave::new(Vec2::ZERO, 10.0));
        pools.clear_kind(EffectKind::Ripples);
        assert_eq!(pools.ripples().len(), 0);
        assert_eq!(pools.shockwaves().len(), 1);
        pools.clear();
        assert!(pools.is_empty());
    }

    #[test]
    fn draw_culls_and_restores_blend() {
        let mut pools = pools();
        pools.spawn(Particle::new(Vec2::ZERO, Vec2::ZERO, 1.0));
        pools.spawn(Particle::new(Vec2::new(-2000.0, 0.0), Vec2::ZERO, 1.0));
        pools.spawn(Particle::new(Vec2::new(10.0, 0.0), Vec2::ZERO, 1.0).with_color(Color::rgba(0.0, -1.0, 0.0, 1.0)));

        let camera = Camera2D::new(Vec2::ZERO, Vec2::new(800.0, 600.0));
        let mut surface = RecordingSurface::new();
        let stats = pools.draw(&mut surface, &camera, 50.0);

        assert_eq!(stats.particles.drawn, 1);
        assert_eq!(stats.particles.culled, 1);
        assert_eq!(stats.particles.rejected, 1);
        assert_eq!(surface.len(), 1);
        assert_eq!(surface.commands()[0].blend, BlendMode::Additive);
        assert_eq!(surface.blend_mode(), BlendMode::Normal);
    }
}
