use crate::color::Color;
use crate::math::{ScreenPoint, Vec2};

use super::surface::{BlendMode, DrawSurface, Paint, Stroke, TextStyle};

/// One recorded paint operation.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    FillRect { origin: ScreenPoint, size: Vec2, paint: Paint },
    FillCircle { center: ScreenPoint, radius: f32, paint: Paint },
    StrokeCircle { center: ScreenPoint, radius: f32, stroke: Stroke },
    Line { from: ScreenPoint, to: ScreenPoint, stroke: Stroke },
    Polygon { points: Vec<ScreenPoint>, color: Color },
    Text { text: String, position: ScreenPoint, style: TextStyle },
}

impl DrawOp {
    pub fn is_text(&self) -> bool {
        matches!(self, DrawOp::Text { .. })
    }

    pub fn is_polygon(&self) -> bool {
        matches!(self, DrawOp::Polygon { .. })
    }
}

/// A draw op plus the blend mode that was active when it was issued.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawCommand {
    pub op: DrawOp,
    pub blend: BlendMode,
}

/// Headless surface that records every call instead of rasterizing.
///
/// Used as the instrumented surface in tests and as the backend of the
/// frame probe demo.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    blend: BlendMode,
    blend_changes: usize,
    lost: bool,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of recorded paint operations.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// How many times `set_blend_mode` was called.
    pub fn blend_changes(&self) -> usize {
        self.blend_changes
    }

    /// Count of recorded ops matching a predicate.
    pub fn count(&self, pred: impl Fn(&DrawOp) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(&c.op)).count()
    }

    /// Drop recorded commands; blend state and loss flag are kept.
    pub fn clear(&mut self) {
        self.commands.clear();
        self.blend_changes = 0;
    }

    /// Simulate the host tearing down the draw context.
    pub fn set_lost(&mut self, lost: bool) {
        self.lost = lost;
    }

    fn push(&mut self, op: DrawOp) {
        self.commands.push(DrawCommand {
            op,
            blend: self.blend,
        });
    }
}

impl DrawSurface for RecordingSurface {
    fn blend_mode(&self) -> BlendMode {
        self.blend
    }

    fn set_blend_mode(&mut self, mode: BlendMode) {
        self.blend = mode;
        self.blend_changes += 1;
    }

    fn fill_rect(&mut self, origin: ScreenPoint, size: Vec2, paint: Paint) {
        self.push(DrawOp::FillRect { origin, size, paint });
    }

    fn fill_circle(&mut self, center: ScreenPoint, radius: f32, paint: Paint) {
        self.push(DrawOp::FillCircle { center, radius, paint });
    }

    fn stroke_circle(&mut self, center: ScreenPoint, radius: f32, stroke: Stroke) {
        self.push(DrawOp::StrokeCircle { center, radius, stroke });
    }

    fn line(&mut self, from: ScreenPoint, to: ScreenPoint, stroke: Stroke) {
        self.push(DrawOp::Line { from, to, stroke });
    }

    fn fill_polygon(&mut self, points: &[ScreenPoint], color: Color) {
        self.push(DrawOp::Polygon {
            points: points.to_vec(),
            color,
        });
    }

    fn text(&mut self, text: &str, position: ScreenPoint, style: TextStyle) {
        self.push(DrawOp::Text {
            text: text.to_string(),
            position,
            style,
        });
    }

    fn is_lost(&self) -> bool {
        self.lost
    }
}
