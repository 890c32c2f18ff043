use crossbeam_channel::{Receiver, Sender, TrySendError};

use super::particles::{Particle, ParticleBurst};
use super::rings::{Ripple, Shockwave};

/// A fire-and-forget request from the gameplay layer to start an effect.
#[derive(Clone, Debug, PartialEq)]
pub enum EffectSpawn {
    Particle(Particle),
    Burst(ParticleBurst),
    Ripple(Ripple),
    Shockwave(Shockwave),
}

impl From<Particle> for EffectSpawn {
    fn from(p: Particle) -> Self {
        EffectSpawn::Particle(p)
    }
}

impl From<ParticleBurst> for EffectSpawn {
    fn from(b: ParticleBurst) -> Self {
        EffectSpawn::Burst(b)
    }
}

impl From<Ripple> for EffectSpawn {
    fn from(r: Ripple) -> Self {
        EffectSpawn::Ripple(r)
    }
}

impl From<Shockwave> for EffectSpawn {
    fn from(s: Shockwave) -> Self {
        EffectSpawn::Shockwave(s)
    }
}

/// Cloneable handle gameplay code (on any thread) uses to request effects.
///
/// Requests are buffered and applied at the start of the next pool update,
/// so the renderer never observes a pool mid-mutation.
#[derive(Clone, Debug)]
pub struct EffectSender {
    tx: Sender<EffectSpawn>,
}

impl EffectSender {
    /// Queue a spawn request. Returns `false` if the pools have been dropped.
    pub fn send(&self, spawn: impl Into<EffectSpawn>) -> bool {
        match self.tx.try_send(spawn.into()) {
            Ok(()) => true,
            Err(TrySendError::Disconnected(_)) => {
                log::debug!("effect spawn dropped: pools are gone");
                false
            }
            Err(TrySendError::Full(_)) => false,
        }
    }
}

/// Receiving half owned by the effect pools.
pub(crate) struct SpawnQueue {
    tx: Sender<EffectSpawn>,
    rx: Receiver<EffectSpawn>,
}

impl SpawnQueue {
    pub(crate) fn new() -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        Self { tx, rx }
    }

    pub(crate) fn sender(&self) -> EffectSender {
        EffectSender { tx: self.tx.clone() }
    }

    /// Take every request queued so far.
    pub(crate) fn drain(&self) -> impl Iterator<Item = EffectSpawn> + '_ {
        self.rx.try_iter()
    }

    pub(crate) fn pending(&self) -> usize {
        self.rx.len()
    }
}
