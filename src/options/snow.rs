use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::layout::positive;
use crate::error::EvergreenError;

/// Ambient snowfall, independent of the tree mode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Snow", inline)]
#[serde(default)]
pub struct SnowOptions {
    /// Whether the snowfall is part of the scene.
    #[schemars(title = "Show Snow")]
    pub enabled: bool,
    /// Number of flakes.
    #[schemars(title = "Flakes", range(min = 0, max = 10000))]
    pub count: usize,
    /// Flakes spawn within `[-half_extent, half_extent)` on X and Z.
    #[schemars(skip)]
    pub half_extent: f32,
    /// Initial Y range.
    #[schemars(skip)]
    pub spawn_height: [f32; 2],
    /// Flakes below this height respawn.
    #[schemars(skip)]
    pub floor: f32,
    /// Height at which respawned flakes re-enter.
    #[schemars(skip)]
    pub respawn_height: f32,
    /// Fall distance per 60 Hz frame.
    #[schemars(skip)]
    pub fall_speed: [f32; 2],
    /// Sway oscillator frequency range.
    #[schemars(skip)]
    pub sway_speed: [f32; 2],
    /// Sway amplitude range.
    #[schemars(skip)]
    pub sway_amplitude: [f32; 2],
    /// Uniform scale range.
    #[schemars(skip)]
    pub scale: [f32; 2],
    /// Tumble rate on X and Z (rad/s).
    #[schemars(skip)]
    pub spin_rate: f32,
    /// Frame deltas above this are clamped (tab switches, stalls).
    #[schemars(skip)]
    pub max_dt: f32,
}

impl Default for SnowOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            count: 1500,
            half_extent: 25.0,
            spawn_height: [-10.0, 30.0],
            floor: -15.0,
            respawn_height: 25.0,
            fall_speed: [0.05, 0.15],
            sway_speed: [0.5, 1.5],
            sway_amplitude: [0.1, 0.3],
            scale: [0.3, 0.7],
            spin_rate: 0.5,
            max_dt: 0.1,
        }
    }
}

impl SnowOptions {
    /// Reject empty ranges and a respawn height below the floor.
    pub fn validate(&self) -> Result<(), EvergreenError> {
        positive("snow.half_extent", self.half_extent)?;
        positive("snow.max_dt", self.max_dt)?;
        for (name, [lo, hi]) in [
            ("snow.spawn_height", self.spawn_height),
            ("snow.fall_speed", self.fall_speed),
            ("snow.sway_speed", self.sway_speed),
            ("snow.sway_amplitude", self.sway_amplitude),
            ("snow.scale", self.scale),
        ] {
            if !(lo < hi && lo.is_finite() && hi.is_finite()) {
                return Err(EvergreenError::InvalidOptions(format!(
                    "{name} must be a non-empty range, got [{lo}, {hi}]"
                )));
            }
        }
        if self.respawn_height <= self.floor {
            return Err(EvergreenError::InvalidOptions(format!(
                "snow.respawn_height ({}) must be above snow.floor ({})",
                self.respawn_height, self.floor
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(SnowOptions::default().validate().is_ok());
    }

    #[test]
    fn rejects_respawn_below_floor() {
        let opts = SnowOptions {
            respawn_height: -20.0,
            ..SnowOptions::default()
        };
        assert!(opts.validate().is_err());
    }
}
