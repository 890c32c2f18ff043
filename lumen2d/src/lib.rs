//! Lumen2D - per-frame presentation layer for a 2D exploration world.
//!
//! Turns a read-only snapshot of world state into draw calls on a
//! [`DrawSurface`]: realm background, ambient markers, pooled effects and
//! game-mode overlays, composited in a fixed order by [`FrameCompositor`].

pub mod background;
pub mod camera;
pub mod color;
pub mod compositor;
pub mod config;
pub mod effects;
pub mod error;
pub mod frame;
pub mod math;
pub mod overlay;
pub mod render;

pub use crate::background::RealmTheme;
pub use crate::camera::Camera2D;
pub use crate::color::{Color, ColorError};
pub use crate::compositor::{FrameCompositor, FrameStats};
pub use crate::config::RenderConfig;
pub use crate::effects::{Echo, EffectSender, Fragment, Particle, ParticleBurst, Ripple, Shockwave};
pub use crate::error::RenderError;
pub use crate::frame::FrameContext;
pub use crate::math::{ScreenPoint, Vec2, WorldPoint};
pub use crate::overlay::OverlayState;
pub use crate::render::{BlendMode, DrawSurface, RecordingSurface};
