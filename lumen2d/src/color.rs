//! RGBA colors and the conversions the renderer needs (hex strings from
//! content tables, hue-based entity tints).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while parsing or validating a color.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ColorError {
    #[error("color string `{0}` is not in #rrggbb or #rrggbbaa form")]
    BadHex(String),
    #[error("color channel out of range: {0:?}")]
    OutOfRange([f32; 4]),
}

/// Linear RGBA color with channels in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from 8-bit channels.
    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }

    /// Parse `#rrggbb` or `#rrggbbaa` (leading `#` optional).
    pub fn from_hex(s: &str) -> Result<Self, ColorError> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
            return Err(ColorError::BadHex(s.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| ColorError::BadHex(s.to_string()))
        };
        let a = if hex.len() == 8 { channel(6)? } else { 255 };
        Ok(Self::rgba(
            channel(0)? as f32 / 255.0,
            channel(2)? as f32 / 255.0,
            channel(4)? as f32 / 255.0,
            a as f32 / 255.0,
        ))
    }

    /// Build a color from hue (degrees), saturation and lightness in `[0, 1]`.
    pub fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        let h = hue.rem_euclid(360.0) / 60.0;
        let s = saturation.clamp(0.0, 1.0);
        let l = lightness.clamp(0.0, 1.0);
        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = l - c / 2.0;
        Self::rgba(r + m, g + m, b + m, 1.0)
    }

    /// Replace alpha, clamped to `[0, 1]`; non-finite input becomes `0`.
    #[must_use]
    pub fn with_alpha(self, a: f32) -> Self {
        let a = if a.is_finite() { a.clamp(0.0, 1.0) } else { 0.0 };
        Self { a, ..self }
    }

    /// Replace alpha and validate the result, rejecting non-finite or
    /// out-of-range values instead of clamping them.
    pub fn try_with_alpha(self, a: f32) -> Result<Self, ColorError> {
        Self { a, ..self }.validated()
    }

    /// Multiply the rgb channels by `factor` (alpha untouched).
    #[must_use]
    pub fn scaled(self, factor: f32) -> Self {
        let f = factor.max(0.0);
        Self {
            r: (self.r * f).min(1.0),
            g: (self.g * f).min(1.0),
            b: (self.b * f).min(1.0),
            a: self.a,
        }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Returns the color unchanged if every channel is finite and within `[0, 1]`.
    pub fn validated(self) -> Result<Self, ColorError> {
        let channels = self.to_array();
        if channels.iter().all(|c| c.is_finite() && (0.0..=1.0).contains(c)) {
            Ok(self)
        } else {
            Err(ColorError::OutOfRange(channels))
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}
