use std::thread;

use anyhow::{Context, Result};
use lumen2d::{
    overlay::{BoostOverlay, CompassOverlay, TagOverlay, VoiceOverlay, VoicePeer},
    Camera2D, Color, Echo, FrameCompositor, FrameContext, Fragment, OverlayState, ParticleBurst,
    RecordingSurface, RenderConfig, Ripple, Shockwave, Vec2,
};

const FRAMES: u32 = 300;
const DT: f32 = 1.0 / 60.0;

/// Headless run of the compositor: a viewer circles the world center while
/// bursts and shockwaves are spawned, and every frame lands in a
/// `RecordingSurface`. Pass a JSON config path to override defaults.
fn main() -> Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => RenderConfig::from_file(&path)?,
        None => RenderConfig::default(),
    };
    let world_center = config.world.center();
    let mut compositor = FrameCompositor::with_seed(config, 7);
    let mut rng = fastrand::Rng::with_seed(42);

    // A "network" thread pushing ripples into the pools between frames.
    let sender = compositor.sender();
    let feeder = thread::spawn(move || {
        for i in 0..20 {
            let pos = world_center + Vec2::from_angle(i as f32 * 0.7) * 300.0;
            if !sender.send(Ripple::new(pos).with_color(Color::rgb8(120, 200, 255))) {
                break;
            }
        }
    });
    feeder.join().ok().context("ripple feeder panicked")?;

    let fragments: Vec<Fragment> = (0..40)
        .map(|i| {
            let offset = Vec2::new(rng.f32() - 0.5, rng.f32() - 0.5) * 1600.0;
            Fragment::new(world_center + offset, i as f32)
        })
        .collect();
    let echoes = vec![Echo {
        id: 1,
        position: world_center + Vec2::new(60.0, -40.0),
        text: "the light is warmer here".into(),
        author_id: "p-17".into(),
        author_name: "wren".into(),
        created_at: 0.0,
        hue: 40.0,
    }];

    let mut surface = RecordingSurface::new();
    let mut totals = (0usize, 0usize, 0usize);
    let mut time = 0.0f32;

    for frame in 0..FRAMES {
        time += DT;
        let viewer = world_center + Vec2::from_angle(time * 0.4) * 2200.0;

        if frame % 30 == 0 {
            compositor.spawn(
                ParticleBurst::new(viewer + Vec2::new(40.0, 0.0), 48)
                    .with_hue(rng.f32() * 360.0, 25.0)
                    .with_drag(1.5),
            );
        }
        if frame % 90 == 0 {
            compositor.spawn(Shockwave::new(viewer, 500.0));
        }
        compositor.update(DT);

        let overlays = vec![
            OverlayState::TagArena(TagOverlay {
                is_it: frame % 120 < 30,
                target: Some(world_center),
                survival_time: time,
            }),
            OverlayState::Boost(BoostOverlay::from_key("speed", 5.0 - time % 5.0, 5.0)),
            OverlayState::Compass(CompassOverlay::new(world_center)),
            OverlayState::VoiceProximity(VoiceOverlay::new(vec![VoicePeer::new("p-3", viewer + Vec2::new(150.0, 90.0))
                .speaking(frame % 40 < 20)
                .connected(true)])),
        ];

        let ctx = FrameContext::new(time, Camera2D::new(viewer, Vec2::new(1280.0, 720.0)))
            .with_realm("nebula")
            .with_fragments(&fragments)
            .with_echoes(&echoes)
            .with_overlays(&overlays);

        surface.clear();
        let stats = compositor.render(&mut surface, &ctx)?;
        totals.0 += surface.len();
        totals.1 += stats.culled;
        totals.2 += stats.rejected;

        if frame % 60 == 0 {
            println!(
                "frame {frame:>3}: {:>4} cmds | fx {:>3} (p {} r {} s {}) | frag {} echo {} | overlays {} | culled {}",
                surface.len(),
                stats.effects_drawn(),
                stats.particles,
                stats.ripples,
                stats.shockwaves,
                stats.fragments,
                stats.echoes,
                stats.overlays_drawn,
                stats.culled,
            );
        }
    }

    println!(
        "{FRAMES} frames: {} draw commands, {} culled, {} rejected, {} effects alive",
        totals.0,
        totals.1,
        totals.2,
        compositor.pools().len()
    );
    Ok(())
}
