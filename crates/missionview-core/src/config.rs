//! Scene appearance configuration.

use std::path::Path;

use palette::Srgb;
use serde::{Deserialize, Serialize};

use crate::error::{self, SceneError};

/// Default marker radius in feet.
const DEFAULT_MARKER_SCALE: f32 = 10.0;
/// Default ground plane edge length in feet.
const DEFAULT_GROUND_SIZE: f32 = 10_000.0;
/// Default ground texture tile, in feet per texture repeat.
const DEFAULT_GROUND_TILE_FEET: f32 = 100.0;
/// Default ground texture edge in pixels.
const DEFAULT_GROUND_TEXTURE_SIZE: u32 = 256;

/// Per-element colors, serialized as `#rrggbb` strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneColors {
    #[serde(with = "hex_color")]
    pub home: Srgb<u8>,
    #[serde(with = "hex_color")]
    pub point_of_interest: Srgb<u8>,
    #[serde(with = "hex_color")]
    pub search_grid: Srgb<u8>,
    #[serde(with = "hex_color")]
    pub waypoint: Srgb<u8>,
    #[serde(with = "hex_color")]
    pub stationary_obstacle: Srgb<u8>,
    #[serde(with = "hex_color")]
    pub moving_obstacle: Srgb<u8>,
    #[serde(with = "hex_color")]
    pub telemetry: Srgb<u8>,
    #[serde(with = "hex_color")]
    pub ground: Srgb<u8>,
    #[serde(with = "hex_color")]
    pub ground_grid: Srgb<u8>,
    #[serde(with = "hex_color")]
    pub ambient_light: Srgb<u8>,
    #[serde(with = "hex_color")]
    pub sun_light: Srgb<u8>,
}

impl Default for SceneColors {
    fn default() -> Self {
        Self {
            home: Srgb::new(0x00, 0x00, 0xff),
            point_of_interest: Srgb::new(0xff, 0x00, 0xff),
            search_grid: Srgb::new(0x00, 0xff, 0x00),
            waypoint: Srgb::new(0x00, 0xff, 0xff),
            stationary_obstacle: Srgb::new(0xff, 0x00, 0x00),
            moving_obstacle: Srgb::new(0xff, 0x80, 0x00),
            telemetry: Srgb::new(0xff, 0xff, 0x00),
            ground: Srgb::new(0x3a, 0x6b, 0x2a),
            ground_grid: Srgb::new(0x2a, 0x4f, 0x1e),
            ambient_light: Srgb::new(0x40, 0x40, 0x40),
            sun_light: Srgb::new(0xff, 0xff, 0xff),
        }
    }
}

/// Appearance knobs for the scene builder.
///
/// Everything is in feet unless noted. Loaded from JSON with missing fields
/// taking their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Uniform scale applied to point markers.
    pub marker_scale: f32,
    /// Edge length of the square ground plane.
    pub ground_size: f32,
    /// Ground distance covered by one repeat of the ground texture.
    pub ground_tile_feet: f32,
    /// Ground texture edge in pixels.
    pub ground_texture_size: u32,
    pub ambient_intensity: f32,
    pub sun_intensity: f32,
    /// Direction the sun's light travels. Normalized on use.
    pub sun_direction: [f32; 3],
    /// Whether markers cast and receive shadows.
    pub shadows: bool,
    pub colors: SceneColors,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            marker_scale: DEFAULT_MARKER_SCALE,
            ground_size: DEFAULT_GROUND_SIZE,
            ground_tile_feet: DEFAULT_GROUND_TILE_FEET,
            ground_texture_size: DEFAULT_GROUND_TEXTURE_SIZE,
            ambient_intensity: 0.4,
            sun_intensity: 0.8,
            sun_direction: [-1.0, -2.0, -1.0],
            shadows: true,
            colors: SceneColors::default(),
        }
    }
}

impl SceneConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, SceneError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, SceneError> {
        Self::from_json_str(&error::read_to_string(path)?)
    }

    /// Apply `MISSIONVIEW_MARKER_SCALE` and `MISSIONVIEW_GROUND_SIZE` when set
    /// to a positive number. Unparseable values are ignored.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(scale) = env_f32("MISSIONVIEW_MARKER_SCALE") {
            self.marker_scale = scale;
        }
        if let Some(size) = env_f32("MISSIONVIEW_GROUND_SIZE") {
            self.ground_size = size;
        }
        self
    }

    pub fn validate(&self) -> Result<(), SceneError> {
        let positive = [
            ("marker_scale", self.marker_scale),
            ("ground_size", self.ground_size),
            ("ground_tile_feet", self.ground_tile_feet),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SceneError::InvalidConfig(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if self.ground_texture_size == 0 {
            return Err(SceneError::InvalidConfig(
                "ground_texture_size must be non-zero".to_string(),
            ));
        }
        if self.sun_direction.iter().all(|c| *c == 0.0) {
            return Err(SceneError::InvalidConfig(
                "sun_direction must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn env_f32(key: &str) -> Option<f32> {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse::<f32>().ok())
        .filter(|v| v.is_finite() && *v > 0.0)
}

mod hex_color {
    use palette::Srgb;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(color: &Srgb<u8>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!(
            "#{:02x}{:02x}{:02x}",
            color.red, color.green, color.blue
        ))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Srgb<u8>, D::Error> {
        let hex = String::deserialize(deserializer)?;
        hex.parse::<Srgb<u8>>()
            .map_err(|e| serde::de::Error::custom(format!("invalid color {hex:?}: {e}")))
    }
}
