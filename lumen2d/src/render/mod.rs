mod blend;
mod recording;
mod surface;

pub use blend::BlendGuard;
pub use recording::{DrawCommand, DrawOp, RecordingSurface};
pub use surface::{
    BlendMode, ColorStop, Dash, DrawSurface, Paint, RadialGradient, Stroke, TextAlign, TextStyle,
};
