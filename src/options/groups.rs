use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::layout::positive;
use crate::error::EvergreenError;
use crate::layout::ParticleCategory;

/// One batched particle group in the scene.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Group", inline)]
pub struct GroupPreset {
    /// Label handed to the renderer alongside the instances.
    pub name: String,
    /// Number of instances.
    pub count: usize,
    /// Placement strategy.
    #[serde(default)]
    pub category: ParticleCategory,
    /// Transition speed; the exponential damping rate is `4 * speed`.
    #[serde(default = "default_speed")]
    #[schemars(range(min = 0.05, max = 3.0), extend("step" = 0.05))]
    pub speed: f32,
}

fn default_speed() -> f32 {
    0.8
}

impl GroupPreset {
    /// Preset with the given name, count and category at default speed.
    pub fn new(
        name: impl Into<String>,
        count: usize,
        category: ParticleCategory,
    ) -> Self {
        Self {
            name: name.into(),
            count,
            category,
            speed: default_speed(),
        }
    }

    /// Override the transition speed.
    #[must_use]
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    /// The default needle, ornament, sparkle and photo-frame groups.
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("needles", 3500, ParticleCategory::Structural)
                .with_speed(0.8),
            Self::new("ornaments", 250, ParticleCategory::Structural)
                .with_speed(0.6),
            Self::new("sparkles", 400, ParticleCategory::Structural)
                .with_speed(0.9),
            Self::new("frames", 5, ParticleCategory::Framed),
        ]
    }
}

/// Single star sitting above the tree top.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Topper", inline)]
#[serde(default)]
pub struct TopperOptions {
    /// Whether the topper is part of the scene.
    #[schemars(title = "Show Topper")]
    pub enabled: bool,
    /// Resting position while assembled.
    #[schemars(skip)]
    pub assembled_position: [f32; 3],
    /// Resting position while dispersed.
    #[schemars(skip)]
    pub dispersed_position: [f32; 3],
    /// Continuous yaw rate in rad/s.
    #[schemars(title = "Spin", range(min = 0.0, max = 3.0), extend("step" = 0.05))]
    pub spin_rate: f32,
    /// Transition speed.
    #[schemars(skip)]
    pub speed: f32,
    /// Uniform scale.
    #[schemars(skip)]
    pub scale: f32,
    /// Bob cycle speed; one period takes `8π / float_speed` seconds.
    #[schemars(skip)]
    pub float_speed: f32,
    /// Vertical bob height multiplier.
    #[schemars(title = "Float", range(min = 0.0, max = 2.0), extend("step" = 0.05))]
    pub float_intensity: f32,
    /// Rotation wobble multiplier.
    #[schemars(skip)]
    pub wobble_intensity: f32,
}

impl Default for TopperOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            assembled_position: [0.0, 7.5, 0.0],
            dispersed_position: [0.0, 20.0, -10.0],
            spin_rate: 0.5,
            speed: 0.8,
            scale: 1.0,
            float_speed: 2.0,
            float_intensity: 0.5,
            wobble_intensity: 0.5,
        }
    }
}

impl TopperOptions {
    /// Reject non-positive speed or scale and negative bob parameters.
    pub fn validate(&self) -> Result<(), EvergreenError> {
        positive("topper.speed", self.speed)?;
        positive("topper.scale", self.scale)?;
        for (name, value) in [
            ("topper.float_speed", self.float_speed),
            ("topper.float_intensity", self.float_intensity),
            ("topper.wobble_intensity", self.wobble_intensity),
        ] {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(EvergreenError::InvalidOptions(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }
}
