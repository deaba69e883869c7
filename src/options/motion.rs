use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::layout::positive;
use crate::error::EvergreenError;

/// How the per-frame approach fraction is derived.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum DampingMode {
    /// Constant fraction per frame. Convergence speed follows the refresh
    /// rate.
    Fixed,
    /// `1 - exp(-rate * dt)`; identical motion at any refresh rate.
    #[default]
    Exponential,
}

/// Wind sway applied to assembled particles.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Sway", inline)]
#[serde(default)]
pub struct SwayOptions {
    /// Displacement at the very top of the tree.
    #[schemars(title = "Amplitude", range(min = 0.0, max = 2.0), extend("step" = 0.01))]
    pub amplitude: f32,
    /// Angular frequency of the X and Z oscillators (rad/s).
    #[schemars(skip)]
    pub frequency: [f32; 2],
    /// Phase shift per unit of height for the X and Z oscillators.
    #[schemars(skip)]
    pub height_phase: [f32; 2],
    /// Z displacement relative to X.
    #[schemars(title = "Depth Scale", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub depth_scale: f32,
}

impl Default for SwayOptions {
    fn default() -> Self {
        Self {
            amplitude: 0.5,
            frequency: [0.8, 0.6],
            height_phase: [0.3, 0.2],
            depth_scale: 0.5,
        }
    }
}

/// Interpolation, jitter and spin parameters for the animation engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Motion", inline)]
#[serde(default)]
pub struct MotionOptions {
    /// Approach fraction strategy.
    #[schemars(title = "Damping")]
    pub damping: DampingMode,
    /// Per-frame fraction used by [`DampingMode::Fixed`].
    #[schemars(title = "Fixed Fraction", range(min = 0.001, max = 0.5), extend("step" = 0.005))]
    pub fixed_fraction: f32,
    /// Additive jitter range on the fixed fraction.
    #[schemars(skip)]
    pub fixed_jitter: f32,
    /// Multiplicative jitter range on the exponential fraction.
    #[schemars(skip)]
    pub exponential_jitter: f32,
    /// Tumble rate (rad/s per Euler axis) for scattered structural particles.
    #[schemars(skip)]
    pub structural_spin: [f32; 3],
    /// Tumble rate (rad/s per Euler axis) for scattered frames.
    #[schemars(skip)]
    pub framed_spin: [f32; 3],
    /// Wind sway.
    pub sway: SwayOptions,
}

impl Default for MotionOptions {
    fn default() -> Self {
        Self {
            damping: DampingMode::default(),
            fixed_fraction: 0.05,
            fixed_jitter: 0.02,
            exponential_jitter: 0.4,
            structural_spin: [0.2, 0.2, 0.0],
            framed_spin: [0.2, 0.1, 0.0],
            sway: SwayOptions::default(),
        }
    }
}

impl MotionOptions {
    /// Reject fractions that would stall or overshoot.
    pub fn validate(&self) -> Result<(), EvergreenError> {
        positive("fixed_fraction", self.fixed_fraction)?;
        if self.fixed_fraction + self.fixed_jitter >= 1.0 || self.fixed_jitter < 0.0
        {
            return Err(EvergreenError::InvalidOptions(format!(
                "fixed_fraction + fixed_jitter must stay below 1, got {} + {}",
                self.fixed_fraction, self.fixed_jitter
            )));
        }
        if !(self.exponential_jitter >= 0.0 && self.exponential_jitter.is_finite())
        {
            return Err(EvergreenError::InvalidOptions(format!(
                "exponential_jitter must be non-negative, got {}",
                self.exponential_jitter
            )));
        }
        if !(self.sway.amplitude >= 0.0 && self.sway.amplitude.is_finite()) {
            return Err(EvergreenError::InvalidOptions(format!(
                "sway amplitude must be non-negative, got {}",
                self.sway.amplitude
            )));
        }
        Ok(())
    }
}
