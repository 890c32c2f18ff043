use std::collections::VecDeque;

use crate::camera::Camera2D;
use crate::error::RenderError;
use crate::math::{ScreenPoint, WorldPoint};
use crate::render::{BlendGuard, BlendMode, DrawSurface};

/// A short-lived visual effect owned by an [`EffectPool`].
pub trait Effect {
    /// Short name used in logs.
    const KIND: &'static str;

    fn position(&self) -> WorldPoint;

    /// Advance by `dt` seconds. Returns `false` once the effect has expired.
    fn update(&mut self, dt: f32) -> bool;

    /// Paint the effect at its already-culled screen position.
    fn draw(&self, surface: &mut dyn DrawSurface, screen: ScreenPoint) -> Result<(), RenderError>;
}

/// Counters for one draw pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PassStats {
    pub drawn: usize,
    pub culled: usize,
    /// Entities skipped because their own data was invalid.
    pub rejected: usize,
}

impl std::ops::AddAssign for PassStats {
    fn add_assign(&mut self, rhs: Self) {
        self.drawn += rhs.drawn;
        self.culled += rhs.culled;
        self.rejected += rhs.rejected;
    }
}

/// Bounded pool of one effect category.
///
/// When full, spawning evicts the oldest entry.
pub struct EffectPool<E: Effect> {
    items: VecDeque<E>,
    capacity: usize,
}

impl<E: Effect> EffectPool<E> {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn spawn(&mut self, effect: E) {
        if self.items.len() >= self.capacity {
            self.items.pop_front();
            log::trace!("{} pool full, evicted oldest", E::KIND);
        }
        self.items.push_back(effect);
    }

    /// Advance every effect and drop the expired ones in the same pass.
    pub fn update(&mut self, dt: f32) {
        let before = self.items.len();
        self.items.retain_mut(|e| e.update(dt));
        let expired = before - self.items.len();
        if expired > 0 {
            log::trace!("{} pool expired {expired}", E::KIND);
        }
    }

    /// Draw all visible effects with additive blending.
    ///
    /// Each effect is culled individually; an effect with invalid data is
    /// logged and skipped without affecting the rest of the pass.
    pub fn draw(&self, surface: &mut dyn DrawSurface, camera: &Camera2D, margin: f32) -> PassStats {
        let mut stats = PassStats::default();
        if self.items.is_empty() {
            return stats;
        }

        let mut surface = BlendGuard::new(surface, BlendMode::Additive);
        for effect in &self.items {
            let Some(screen) = camera.cull(effect.position(), margin) else {
                stats.culled += 1;
                continue;
            };
            match effect.draw(&mut *surface, screen) {
                Ok(()) => stats.drawn += 1,
                Err(err) => {
                    log::warn!("skipping {}: {err}", E::KIND);
                    stats.rejected += 1;
                }
            }
        }
        stats
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.items.iter()
    }
}
