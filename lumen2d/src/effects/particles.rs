use crate::color::Color;
use crate::error::RenderError;
use crate::math::{ScreenPoint, Vec2, WorldPoint};
use crate::render::{DrawSurface, Paint};

use super::pool::Effect;

/// A single decaying particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    /// Current position in world coordinates
    pub position: WorldPoint,
    /// Current velocity (units per second)
    pub velocity: Vec2,
    /// Normalized remaining life, `1.0` at spawn and `0.0` when dead
    pub life: f32,
    /// Total lifetime in seconds; life decays at `1 / max_life` per second
    pub max_life: f32,
    /// Radius at full life, in pixels
    pub size: f32,
    pub color: Color,
    /// Opacity at full life
    pub alpha: f32,
    /// Fraction of velocity lost per second
    pub drag: f32,
}

impl Particle {
    /// Create a particle that lives for `max_life` seconds.
    pub fn new(position: WorldPoint, velocity: Vec2, max_life: f32) -> Self {
        Self {
            position,
            velocity,
            life: 1.0,
            max_life,
            size: 3.0,
            color: Color::WHITE,
            alpha: 1.0,
            drag: 0.0,
        }
    }

    #[must_use]
    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = if alpha.is_finite() { alpha.clamp(0.0, 1.0) } else { 0.0 };
        self
    }

    #[must_use]
    pub fn with_drag(mut self, drag: f32) -> Self {
        self.drag = drag.clamp(0.0, 1.0);
        self
    }

    /// Life lost per second.
    pub fn decay_rate(&self) -> f32 {
        if self.max_life > 0.0 {
            1.0 / self.max_life
        } else {
            f32::INFINITY
        }
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

impl Effect for Particle {
    const KIND: &'static str = "particle";

    fn position(&self) -> WorldPoint {
        self.position
    }

    fn update(&mut self, dt: f32) -> bool {
        if self.drag > 0.0 {
            self.velocity *= (1.0 - self.drag * dt).max(0.0);
        }
        self.position += self.velocity * dt;

        // NaN decay (zero lifetime with zero dt) still kills the particle.
        let life = self.life - self.decay_rate() * dt;
        self.life = if life.is_nan() { 0.0 } else { life.clamp(0.0, 1.0) };
        self.is_alive()
    }

    fn draw(&self, surface: &mut dyn DrawSurface, screen: ScreenPoint) -> Result<(), RenderError> {
        let alpha = (self.alpha * self.life).clamp(0.0, 1.0);
        let color = self
            .color
            .validated()
            .and_then(|c| c.try_with_alpha(alpha))
            .map_err(|e| RenderError::invalid_color(Self::KIND, e))?;
        let radius = (self.size * (0.4 + 0.6 * self.life)).max(0.5);
        surface.fill_circle(screen, radius, Paint::Solid(color));
        Ok(())
    }
}

/// Configuration for a one-shot radial burst of particles.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleBurst {
    pub position: WorldPoint,
    pub count: usize,
    /// Random offset applied to each spawn position
    pub position_variance: f32,
    /// Center of the emission arc, in radians
    pub direction: f32,
    /// Width of the emission arc; `TAU` for a full ring
    pub spread: f32,
    pub speed_min: f32,
    pub speed_max: f32,
    pub size_min: f32,
    pub size_max: f32,
    pub lifetime_min: f32,
    pub lifetime_max: f32,
    pub color: Color,
    /// Base hue and jitter in degrees; when set, replaces `color` per particle
    pub hue: Option<(f32, f32)>,
    pub drag: f32,
}

impl ParticleBurst {
    /// Create a burst with sensible defaults.
    pub fn new(position: WorldPoint, count: usize) -> Self {
        Self {
            position,
            count,
            position_variance: 0.0,
            direction: 0.0,
            spread: std::f32::consts::TAU,
            speed_min: 40.0,
            speed_max: 120.0,
            size_min: 2.0,
            size_max: 4.0,
            lifetime_min: 0.5,
            lifetime_max: 1.2,
            color: Color::WHITE,
            hue: None,
            drag: 0.0,
        }
    }

    /// Set speed range.
    pub fn with_speed(mut self, min: f32, max: f32) -> Self {
        self.speed_min = min;
        self.speed_max = max;
        self
    }

    /// Set size range.
    pub fn with_size(mut self, min: f32, max: f32) -> Self {
        self.size_min = min;
        self.size_max = max;
        self
    }

    /// Set lifetime range.
    pub fn with_lifetime(mut self, min: f32, max: f32) -> Self {
        self.lifetime_min = min;
        self.lifetime_max = max;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Tint each particle with a hue drawn from `base ± jitter` degrees.
    pub fn with_hue(mut self, base: f32, jitter: f32) -> Self {
        self.hue = Some((base, jitter));
        self
    }

    /// Restrict emission to an arc centered on `direction`.
    pub fn with_arc(mut self, direction: f32, spread: f32) -> Self {
        self.direction = direction;
        self.spread = spread;
        self
    }

    pub fn with_position_variance(mut self, variance: f32) -> Self {
        self.position_variance = variance;
        self
    }

    pub fn with_drag(mut self, drag: f32) -> Self {
        self.drag = drag;
        self
    }

    /// Produce the burst's particles, drawing randomness from `rng`.
    pub fn emit(&self, rng: &mut fastrand::Rng) -> Vec<Particle> {
        self.emit_up_to(rng, usize::MAX)
    }

    /// Like [`ParticleBurst::emit`], but never builds more than `limit`
    /// particles; the survivors are still spread over the whole arc.
    pub fn emit_up_to(&self, rng: &mut fastrand::Rng, limit: usize) -> Vec<Particle> {
        let count = self.count.min(limit);
        let mut rand = |min: f32, max: f32| -> f32 { min + rng.f32() * (max - min) };

        (0..count)
            .map(|i| {
                // Evenly spaced around the arc, with jitter inside each slot.
                let slot = self.spread / count.max(1) as f32;
                let angle = self.direction - self.spread * 0.5 + slot * (i as f32 + rand(0.0, 1.0));
                let speed = rand(self.speed_min, self.speed_max);
                let offset = Vec2::new(
                    rand(-self.position_variance, self.position_variance),
                    rand(-self.position_variance, self.position_variance),
                );
                let color = match self.hue {
                    Some((base, jitter)) => Color::from_hsl(base + rand(-jitter, jitter), 0.85, 0.6),
                    None => self.color,
                };

                Particle::new(
                    self.position + offset,
                    Vec2::from_angle(angle) * speed,
                    rand(self.lifetime_min, self.lifetime_max),
                )
                .with_size(rand(self.size_min, self.size_max))
                .with_color(color)
                .with_drag(self.drag)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DrawOp, RecordingSurface};

    #[test]
    fn one_tick_decays_by_rate() {
        for (life, max_life) in [(1.0, 4.0), (0.3, 2.0), (0.2, 4.0), (0.1, 0.5), (1.0, 1.0)] {
            let mut p = Particle::new(Vec2::ZERO, Vec2::ZERO, max_life);
            p.life = life;
            let expected = (life - p.decay_rate()).max(0.0);
            let alive = p.update(1.0);
            assert!((p.life - expected).abs() < 1e-6);
            assert_eq!(alive, expected > 0.0);
        }
    }

    #[test]
    fn life_never_increases() {
        let mut p = Particle::new(Vec2::ZERO, Vec2::new(10.0, 0.0), 2.0);
        let mut last = p.life;
        while p.update(0.1) {
            assert!(p.life <= last);
            assert!((0.0..=1.0).contains(&p.life));
            last = p.life;
        }
        assert_eq!(p.life, 0.0);
    }

    #[test]
    fn integrates_velocity_with_drag() {
        let mut p = Particle::new(Vec2::ZERO, Vec2::new(100.0, 0.0), 10.0).with_drag(0.5);
        p.update(1.0);
        assert!((p.velocity.x - 50.0).abs() < 1e-4);
        assert!((p.position.x - 50.0).abs() < 1e-4);
    }

    #[test]
    fn zero_lifetime_dies_immediately() {
        let mut p = Particle::new(Vec2::ZERO, Vec2::ZERO, 0.0);
        assert!(!p.update(0.0));
    }

    #[test]
    fn invalid_color_rejected() {
        let p = Particle::new(Vec2::ZERO, Vec2::ZERO, 1.0).with_color(Color::rgba(2.0, 0.0, 0.0, 1.0));
        let mut surface = RecordingSurface::new();
        assert!(p.draw(&mut surface, Vec2::ZERO).is_err());
        assert!(surface.is_empty());
    }

    #[test]
    fn nan_alpha_rejected() {
        let mut p = Particle::new(Vec2::ZERO, Vec2::ZERO, 1.0);
        p.alpha = f32::NAN;
        let mut surface = RecordingSurface::new();
        assert!(matches!(
            p.draw(&mut surface, Vec2::ZERO),
            Err(RenderError::InvalidColor { what: "particle", .. })
        ));
        assert!(surface.is_empty());

        let built = Particle::new(Vec2::ZERO, Vec2::ZERO, 1.0).with_alpha(f32::NAN);
        assert_eq!(built.alpha, 0.0);
    }

    #[test]
    fn alpha_follows_life() {
        let mut p = Particle::new(Vec2::ZERO, Vec2::ZERO, 1.0).with_alpha(0.8);
        p.life = 0.5;
        let mut surface = RecordingSurface::new();
        p.draw(&mut surface, Vec2::ZERO).unwrap();
        match &surface.commands()[0].op {
            DrawOp::FillCircle { paint: Paint::Solid(c), .. } => assert!((c.a - 0.4).abs() < 1e-6),
            other => panic!("unexpected op {other:?}"),
        }
    }

    #[test]
    fn burst_is_reproducible_for_a_seed() {
        let burst = ParticleBurst::new(Vec2::new(5.0, 5.0), 16).with_hue(200.0, 30.0);
        let a = burst.emit(&mut fastrand::Rng::with_seed(7));
        let b = burst.emit(&mut fastrand::Rng::with_seed(7));
        assert_eq!(a, b);
        assert_eq!(a.len(), 16);
        for p in &a {
            let speed = p.velocity.length();
            assert!((40.0 - 1e-3..=120.0 + 1e-3).contains(&speed));
            assert!(p.color.validated().is_ok());
        }
    }

    #[test]
    fn arc_burst_stays_in_arc() {
        let burst = ParticleBurst::new(Vec2::ZERO, 12).with_arc(0.0, 1.0);
        for p in burst.emit(&mut fastrand::Rng::with_seed(3)) {
            assert!(p.velocity.angle().abs() <= 0.5 + 1e-4);
        }
    }
}
