//! Game-mode layers drawn over the world: tag arena, boosts, compass, voice.

mod boost;
mod compass;
mod tag;
mod voice;

pub use boost::{BoostKind, BoostOverlay, BoostPalette};
pub use compass::CompassOverlay;
pub use tag::TagOverlay;
pub use voice::{VoiceOverlay, VoicePeer};

/// Per-frame overlay state, rebuilt by the caller from current game state.
#[derive(Clone, Debug, PartialEq)]
pub enum OverlayState {
    TagArena(TagOverlay),
    Boost(BoostOverlay),
    Compass(CompassOverlay),
    VoiceProximity(VoiceOverlay),
}

impl OverlayState {
    /// Position in the fixed overlay draw order; later ranks paint on top.
    pub fn draw_rank(&self) -> u8 {
        match self {
            OverlayState::TagArena(_) => 0,
            OverlayState::Boost(_) => 1,
            OverlayState::Compass(_) => 2,
            OverlayState::VoiceProximity(_) => 3,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            OverlayState::TagArena(_) => "tag",
            OverlayState::Boost(_) => "boost",
            OverlayState::Compass(_) => "compass",
            OverlayState::VoiceProximity(_) => "voice",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OverlayStats {
    /// Overlays that emitted at least one primitive.
    pub drawn: usize,
    pub primitives: usize,
}
