use std::f32::consts::TAU;

use crate::color::Color;
use crate::frame::FrameContext;
use crate::math::WorldPoint;
use crate::render::{DrawSurface, Paint, Stroke};

const RING: Color = Color::rgb8(120, 220, 255);
const LINK: Color = Color::rgb8(140, 255, 200);

/// One remote participant in proximity chat.
#[derive(Clone, Debug, PartialEq)]
pub struct VoicePeer {
    pub id: String,
    pub position: WorldPoint,
    /// Currently transmitting audio.
    pub speaking: bool,
    /// Two-way connection established with the local player.
    pub connected: bool,
}

impl VoicePeer {
    pub fn new(id: impl Into<String>, position: WorldPoint) -> Self {
        Self {
            id: id.into(),
            position,
            speaking: false,
            connected: false,
        }
    }

    #[must_use]
    pub fn speaking(mut self, speaking: bool) -> Self {
        self.speaking = speaking;
        self
    }

    #[must_use]
    pub fn connected(mut self, connected: bool) -> Self {
        self.connected = connected;
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct VoiceOverlay {
    pub peers: Vec<VoicePeer>,
}

impl VoiceOverlay {
    pub fn new(peers: Vec<VoicePeer>) -> Self {
        Self { peers }
    }

    fn in_range(peer: &VoicePeer, viewer: WorldPoint, range: f32) -> Option<f32> {
        let d = viewer.distance(peer.position);
        (d.is_finite() && d <= range).then_some(d)
    }

    /// At least one speaking peer is within `range` of `viewer`.
    pub fn is_active(&self, viewer: WorldPoint, range: f32) -> bool {
        self.peers
            .iter()
            .any(|p| p.speaking && Self::in_range(p, viewer, range).is_some())
    }

    pub fn draw(&self, surface: &mut dyn DrawSurface, ctx: &FrameContext<'_>, range: f32) -> usize {
        if range <= 0.0 || !self.is_active(ctx.viewer, range) {
            return 0;
        }
        let Some(origin) = ctx.camera.project(ctx.viewer) else {
            return 0;
        };

        surface.stroke_circle(
            origin,
            range,
            Stroke::dashed(RING.with_alpha(0.35), 1.5, 8.0, 8.0, ctx.time * 20.0),
        );
        let mut primitives = 1;

        for peer in self.peers.iter().filter(|p| p.connected) {
            let Some(distance) = Self::in_range(peer, ctx.viewer, range) else {
                continue;
            };
            let Some(target) = ctx.camera.project(peer.position) else {
                continue;
            };
            let opacity = (1.0 - distance / range) * 0.8;
            surface.line(origin, target, Stroke::solid(LINK.with_alpha(opacity), 2.0));
            primitives += 1;

            if peer.speaking {
                let pulse = 0.5 + 0.5 * (ctx.time * TAU * 2.0).sin();
                surface.fill_circle(
                    origin.midpoint(target),
                    3.0 + 2.0 * pulse,
                    Paint::Solid(LINK.with_alpha(0.5 + 0.5 * pulse)),
                );
                primitives += 1;
            }
        }
        primitives
    }
}
