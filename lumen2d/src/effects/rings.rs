//! Expanding ring effects: ripples (life-bound) and shockwaves (radius-bound).

use crate::color::Color;
use crate::error::RenderError;
use crate::math::{ScreenPoint, WorldPoint};
use crate::render::{DrawSurface, Paint, RadialGradient, Stroke};

use super::pool::Effect;

/// Expanding ring that fades as its life decays.
#[derive(Clone, Debug, PartialEq)]
pub struct Ripple {
    pub position: WorldPoint,
    pub radius: f32,
    /// Normalized remaining life in `[0, 1]`
    pub life: f32,
    /// Radius growth in pixels per second
    pub growth: f32,
    /// Life lost per second
    pub decay: f32,
    pub color: Color,
}

impl Ripple {
    pub fn new(position: WorldPoint) -> Self {
        Self {
            position,
            radius: 0.0,
            life: 1.0,
            growth: 60.0,
            decay: 1.0,
            color: Color::rgb8(140, 200, 255),
        }
    }

    #[must_use]
    pub fn with_growth(mut self, growth: f32) -> Self {
        self.growth = growth.max(0.0);
        self
    }

    #[must_use]
    pub fn with_decay(mut self, decay: f32) -> Self {
        self.decay = decay.max(0.0);
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl Effect for Ripple {
    const KIND: &'static str = "ripple";

    fn position(&self) -> WorldPoint {
        self.position
    }

    fn update(&mut self, dt: f32) -> bool {
        self.radius += self.growth * dt;
        self.life = (self.life - self.decay * dt).clamp(0.0, 1.0);
        self.life > 0.0
    }

    fn draw(&self, surface: &mut dyn DrawSurface, screen: ScreenPoint) -> Result<(), RenderError> {
        let color = self
            .color
            .validated()
            .and_then(|c| c.try_with_alpha((self.life * 0.6).clamp(0.0, 1.0)))
            .map_err(|e| RenderError::invalid_color(Self::KIND, e))?;
        surface.stroke_circle(screen, self.radius.max(0.0), Stroke::solid(color, 2.0));
        Ok(())
    }
}

/// Expanding ring that terminates once it reaches `max_radius`.
#[derive(Clone, Debug, PartialEq)]
pub struct Shockwave {
    pub position: WorldPoint,
    pub radius: f32,
    pub max_radius: f32,
    /// Opacity, `1 - radius / max_radius`
    pub alpha: f32,
    /// Radius growth in pixels per second; always positive
    pub speed: f32,
    pub color: Color,
}

impl Shockwave {
    const MIN_SPEED: f32 = 1.0;

    pub fn new(position: WorldPoint, max_radius: f32) -> Self {
        Self {
            position,
            radius: 0.0,
            max_radius,
            alpha: 1.0,
            speed: 400.0,
            color: Color::WHITE,
        }
    }

    #[must_use]
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed.max(Self::MIN_SPEED);
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn is_finished(&self) -> bool {
        !self.radius.is_finite() || self.max_radius.is_nan() || self.radius >= self.max_radius
    }
}

impl Effect for Shockwave {
    const KIND: &'static str = "shockwave";

    fn position(&self) -> WorldPoint {
        self.position
    }

    fn update(&mut self, dt: f32) -> bool {
        self.radius += self.speed.max(Self::MIN_SPEED) * dt;
        self.alpha = if self.max_radius > 0.0 {
            (1.0 - self.radius / self.max_radius).clamp(0.0, 1.0)
        } else {
            0.0
        };
        !self.is_finished()
    }

    fn draw(&self, surface: &mut dyn DrawSurface, screen: ScreenPoint) -> Result<(), RenderError> {
        let color = self
            .color
            .validated()
            .and_then(|c| c.try_with_alpha(self.alpha.clamp(0.0, 1.0)))
            .map_err(|e| RenderError::invalid_color(Self::KIND, e))?;
        let radius = self.radius.max(0.0);
        let alpha = color.a;

        let glow = RadialGradient {
            center: screen,
            inner_radius: radius * 0.7,
            outer_radius: radius.max(1.0),
            stops: Vec::new(),
        }
        .with_stop(0.0, color.with_alpha(0.0))
        .with_stop(1.0, color.with_alpha(alpha * 0.25));
        surface.fill_circle(screen, radius, Paint::Radial(glow));
        surface.stroke_circle(screen, radius, Stroke::solid(color.with_alpha(alpha), 3.0));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec2;
    use crate::render::RecordingSurface;

    #[test]
    fn ripple_grows_while_fading() {
        let mut r = Ripple::new(Vec2::ZERO).with_growth(10.0).with_decay(0.25);
        assert!(r.update(1.0));
        assert_eq!(r.radius, 10.0);
        assert_eq!(r.life, 0.75);
        for _ in 0..2 {
            assert!(r.update(1.0));
        }
        assert!(!r.update(1.0));
        assert_eq!(r.life, 0.0);
    }

    #[test]
    fn shockwave_radius_strictly_increases_until_done() {
        let mut s = Shockwave::new(Vec2::ZERO, 500.0).with_speed(120.0);
        let mut last = s.radius;
        let mut ticks = 0;
        while s.update(0.5) {
            assert!(s.radius > last);
            assert!(s.radius < s.max_radius);
            last = s.radius;
            ticks += 1;
        }
        assert!(s.radius >= 500.0);
        assert_eq!(s.alpha, 0.0);
        assert_eq!(ticks, 8);
    }

    #[test]
    fn shockwave_speed_is_never_zero() {
        let mut s = Shockwave::new(Vec2::ZERO, 10.0).with_speed(0.0);
        assert!(s.speed > 0.0);
        let before = s.radius;
        s.update(0.1);
        assert!(s.radius > before);
    }

    #[test]
    fn degenerate_shockwave_ends_on_first_tick() {
        let mut s = Shockwave::new(Vec2::ZERO, 0.0);
        assert!(!s.update(0.016));
        let mut nan = Shockwave::new(Vec2::ZERO, f32::NAN);
        assert!(!nan.update(0.016));
    }

    #[test]
    fn non_finite_radius_ends_shockwave() {
        for radius in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            let mut s = Shockwave::new(Vec2::ZERO, 500.0);
            s.radius = radius;
            assert!(s.is_finished());
            assert!(!s.update(0.1));
        }
    }

    #[test]
    fn nan_alpha_shockwave_is_rejected() {
        let mut s = Shockwave::new(Vec2::ZERO, 500.0);
        s.radius = 100.0;
        s.alpha = f32::NAN;
        let mut surface = RecordingSurface::new();
        assert!(s.draw(&mut surface, Vec2::ZERO).is_err());
        assert!(surface.is_empty());
    }
}
