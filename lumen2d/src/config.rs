//! Tunables for the presentation layer.
//!
//! Every field has a default so partial JSON files are accepted.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::math::Vec2;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub culling: CullingConfig,
    pub world: WorldConfig,
    pub background: BackgroundConfig,
    pub effects: EffectsConfig,
    pub overlays: OverlayConfig,
}

impl RenderConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading render config {}", path.display()))?;
        Self::from_json_str(&json).with_context(|| format!("parsing render config {}", path.display()))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CullingConfig {
    /// Extra pixels around the viewport that still count as visible.
    pub margin: f32,
}

impl Default for CullingConfig {
    fn default() -> Self {
        Self { margin: 50.0 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// World extent; the geometric center is `size / 2`.
    pub size: Vec2,
}

impl WorldConfig {
    pub fn center(&self) -> Vec2 {
        self.size * 0.5
    }

    /// Distance from the center to the nearest world edge.
    pub fn outer_radius(&self) -> f32 {
        (self.size.x.min(self.size.y) * 0.5).max(1.0)
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            size: Vec2::new(20_000.0, 20_000.0),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
    /// Seconds for a nebula center to complete one orbit.
    pub nebula_period: f32,
    /// Draw the second, counter-phased nebula.
    pub second_nebula: bool,
    pub cloud_count: u32,
    pub star_count: u32,
    /// Fraction of camera movement applied to the star layer.
    pub star_parallax: f32,
    pub vignette: bool,
    /// Edge darkness of the vignette, `[0, 1]`.
    pub vignette_strength: f32,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            nebula_period: 60.0,
            second_nebula: true,
            cloud_count: 6,
            star_count: 80,
            star_parallax: 0.1,
            vignette: true,
            vignette_strength: 0.45,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    pub max_particles: usize,
    pub max_ripples: usize,
    pub max_shockwaves: usize,
    pub fragment_base_size: f32,
    pub fragment_pulse_amplitude: f32,
    /// Time divisor in the fragment pulse `sin(time / period + phase)`.
    pub fragment_pulse_period: f32,
    /// World distance under which an echo's text is shown.
    pub echo_reveal_distance: f32,
    pub echo_glow_radius: f32,
    /// Seconds for an echo glow to fade from full to its floor.
    pub echo_fade_time: f32,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            max_particles: 2000,
            max_ripples: 64,
            max_shockwaves: 32,
            fragment_base_size: 6.0,
            fragment_pulse_amplitude: 2.0,
            fragment_pulse_period: 0.3,
            echo_reveal_distance: 150.0,
            echo_glow_radius: 30.0,
            echo_fade_time: 600.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// World distance beyond which the tag target indicator appears.
    pub tag_indicator_distance: f32,
    /// Pixel distance of the tag indicator from screen center.
    pub tag_indicator_offset: f32,
    /// Survival seconds at which the safe glow reaches full intensity.
    pub tag_safe_full_time: f32,
    pub compass_safe_radius: f32,
    /// Compass ring center, measured from the top-right viewport corner.
    pub compass_inset: Vec2,
    pub compass_radius: f32,
    pub voice_range: f32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            tag_indicator_distance: 300.0,
            tag_indicator_offset: 120.0,
            tag_safe_full_time: 60.0,
            compass_safe_radius: 3000.0,
            compass_inset: Vec2::new(70.0, 70.0),
            compass_radius: 40.0,
            voice_range: 400.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = RenderConfig::from_json_str(
            r#"{ "culling": { "margin": 10 }, "background": { "cloud_count": 3 } }"#,
        )
        .unwrap();
        assert_eq!(cfg.culling.margin, 10.0);
        assert_eq!(cfg.background.cloud_count, 3);
        assert_eq!(cfg.background.nebula_period, 60.0);
        assert_eq!(cfg.overlays, OverlayConfig::default());
    }

    #[test]
    fn json_round_trip() {
        let cfg = RenderConfig::default();
        let back = RenderConfig::from_json_str(&cfg.to_json().unwrap()).unwrap();
        assert_eq!(cfg, back);
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(RenderConfig::from_json_str("{ culling: ").is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = RenderConfig::from_file("/definitely/not/here.json").unwrap_err();
        assert!(format!("{err:#}").contains("not/here.json"));
    }
}
