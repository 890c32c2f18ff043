use thiserror::Error;

use crate::color::ColorError;

/// Failures recognized by the presentation layer.
///
/// Only [`RenderError::SurfaceLost`] ever escapes `FrameCompositor::render`;
/// the others are contained to the entity that produced them.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RenderError {
    #[error("draw surface was lost; re-initialize before rendering again")]
    SurfaceLost,
    #[error("invalid {what} color")]
    InvalidColor {
        what: &'static str,
        #[source]
        source: ColorError,
    },
}

impl RenderError {
    pub fn invalid_color(what: &'static str, source: ColorError) -> Self {
        RenderError::InvalidColor { what, source }
    }

    /// True for errors that must abort the whole frame.
    pub fn is_fatal(&self) -> bool {
        matches!(self, RenderError::SurfaceLost)
    }
}
