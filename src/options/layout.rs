use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::EvergreenError;

/// Tree silhouette and scatter cloud dimensions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Layout", inline)]
#[serde(default)]
pub struct LayoutOptions {
    /// Total height of the tree, centered on the origin.
    #[schemars(title = "Tree Height", range(min = 1.0, max = 40.0), extend("step" = 0.5))]
    pub tree_height: f32,
    /// Cone radius at the base of the tree.
    #[schemars(title = "Base Radius", range(min = 0.5, max = 20.0), extend("step" = 0.1))]
    pub base_radius: f32,
    /// Radius of the sphere the dispersed cloud fills.
    #[schemars(title = "Scatter Radius", range(min = 1.0, max = 60.0), extend("step" = 0.5))]
    pub scatter_radius: f32,
    /// Full width of the symmetric radial jitter on the cone.
    #[schemars(title = "Radial Jitter", range(min = 0.0, max = 4.0), extend("step" = 0.05))]
    pub radius_jitter: f32,
    /// Uniform scale range `[min, max)` for generated particles.
    #[schemars(skip)]
    pub scale_range: [f32; 2],
    /// Normalized height sub-range used for outward-facing frames.
    #[schemars(skip)]
    pub frame_height_range: [f32; 2],
    /// Extra radius that pushes frames outside the needle layer.
    #[schemars(title = "Frame Offset", range(min = 0.0, max = 3.0), extend("step" = 0.05))]
    pub frame_radius_offset: f32,
    /// Golden-angle multiplier for the frame spiral.
    #[schemars(skip)]
    pub frame_angle_multiplier: f32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            tree_height: 14.0,
            base_radius: 5.5,
            scatter_radius: 15.0,
            radius_jitter: 1.5,
            scale_range: [0.5, 1.0],
            frame_height_range: [0.1, 0.8],
            frame_radius_offset: 0.6,
            frame_angle_multiplier: 2.5,
        }
    }
}

impl LayoutOptions {
    /// Half of the tree height; the tree spans `[-half, half]` on Y.
    #[must_use]
    pub fn half_height(&self) -> f32 {
        self.tree_height * 0.5
    }

    /// Reject dimensions that would produce degenerate layouts.
    pub fn validate(&self) -> Result<(), EvergreenError> {
        positive("tree_height", self.tree_height)?;
        positive("base_radius", self.base_radius)?;
        positive("scatter_radius", self.scatter_radius)?;
        if !(self.radius_jitter >= 0.0 && self.radius_jitter.is_finite()) {
            return Err(EvergreenError::InvalidOptions(format!(
                "radius_jitter must be non-negative, got {}",
                self.radius_jitter
            )));
        }
        let [s_lo, s_hi] = self.scale_range;
        if !(s_lo > 0.0 && s_lo <= s_hi && s_hi.is_finite()) {
            return Err(EvergreenError::InvalidOptions(format!(
                "scale_range must satisfy 0 < min <= max, got [{s_lo}, {s_hi}]"
            )));
        }
        let [t_lo, t_hi] = self.frame_height_range;
        if !(0.0..=1.0).contains(&t_lo)
            || !(0.0..=1.0).contains(&t_hi)
            || t_lo > t_hi
        {
            return Err(EvergreenError::InvalidOptions(format!(
                "frame_height_range must be ordered within [0, 1], got \
                 [{t_lo}, {t_hi}]"
            )));
        }
        Ok(())
    }
}

pub(crate) fn positive(name: &str, value: f32) -> Result<(), EvergreenError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(EvergreenError::InvalidOptions(format!(
            "{name} must be positive, got {value}"
        )))
    }
}
