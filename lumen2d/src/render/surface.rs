use crate::color::Color;
use crate::math::{ScreenPoint, Vec2};

/// Compositing mode applied to subsequent draws.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BlendMode {
    /// Source-over; the default state of every surface.
    #[default]
    Normal,
    /// Channels sum toward white ("lighter").
    Additive,
    /// Screen blending; brightens without clipping as hard as additive.
    Screen,
}

/// A color stop in a gradient, `offset` in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Color,
}

impl ColorStop {
    pub fn new(offset: f32, color: Color) -> Self {
        Self { offset, color }
    }
}

/// Radial gradient between two concentric circles.
#[derive(Clone, Debug, PartialEq)]
pub struct RadialGradient {
    pub center: ScreenPoint,
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub stops: Vec<ColorStop>,
}

impl RadialGradient {
    /// Gradient from `color` at the center to fully transparent at `radius`.
    pub fn glow(center: ScreenPoint, radius: f32, color: Color) -> Self {
        Self {
            center,
            inner_radius: 0.0,
            outer_radius: radius,
            stops: vec![
                ColorStop::new(0.0, color),
                ColorStop::new(1.0, color.with_alpha(0.0)),
            ],
        }
    }

    #[must_use]
    pub fn with_stop(mut self, offset: f32, color: Color) -> Self {
        self.stops.push(ColorStop::new(offset, color));
        self.stops.sort_by(|a, b| a.offset.total_cmp(&b.offset));
        self
    }
}

/// How a filled shape is colored.
#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    Solid(Color),
    Radial(RadialGradient),
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Paint::Solid(color)
    }
}

impl From<RadialGradient> for Paint {
    fn from(gradient: RadialGradient) -> Self {
        Paint::Radial(gradient)
    }
}

/// Dash pattern for strokes, lengths in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dash {
    pub on: f32,
    pub off: f32,
    pub offset: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
    pub dash: Option<Dash>,
}

impl Stroke {
    pub fn solid(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            dash: None,
        }
    }

    pub fn dashed(color: Color, width: f32, on: f32, off: f32, offset: f32) -> Self {
        Self {
            color,
            width,
            dash: Some(Dash { on, off, offset }),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub color: Color,
    pub align: TextAlign,
    pub bold: bool,
}

impl TextStyle {
    pub fn new(size: f32, color: Color) -> Self {
        Self {
            size,
            color,
            align: TextAlign::Center,
            bold: false,
        }
    }

    #[must_use]
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    #[must_use]
    pub fn aligned(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }
}

/// Immediate-mode 2D paint target owned by the compositor for one frame.
///
/// All coordinates are screen space. Implementations keep the current blend
/// mode as state; callers change it through [`super::BlendGuard`] so it never
/// leaks across layers.
pub trait DrawSurface {
    fn blend_mode(&self) -> BlendMode;

    fn set_blend_mode(&mut self, mode: BlendMode);

    fn fill_rect(&mut self, origin: ScreenPoint, size: Vec2, paint: Paint);

    fn fill_circle(&mut self, center: ScreenPoint, radius: f32, paint: Paint);

    fn stroke_circle(&mut self, center: ScreenPoint, radius: f32, stroke: Stroke);

    fn line(&mut self, from: ScreenPoint, to: ScreenPoint, stroke: Stroke);

    fn fill_polygon(&mut self, points: &[ScreenPoint], color: Color);

    fn text(&mut self, text: &str, position: ScreenPoint, style: TextStyle);

    /// True once the host has destroyed the underlying context.
    fn is_lost(&self) -> bool {
        false
    }
}
