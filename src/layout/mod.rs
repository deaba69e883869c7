//! Particle layout generation.
//!
//! Each particle gets two target positions: one on the assembled tree (a
//! golden-angle cone spiral) and one in the dispersed cloud (uniform inside a
//! sphere). Shapes are deterministic in the particle index; radial jitter,
//! scatter positions, orientation and scale are random draws.

mod cache;
pub mod scatter;
pub mod spiral;

use std::f32::consts::PI;

pub use cache::GroupCache;
use glam::Vec3;
use rand::Rng;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::EvergreenError;
use crate::options::LayoutOptions;

/// Placement strategy for a particle group.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Hash,
    Default,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ParticleCategory {
    /// Needles, ornaments and sparkles: main spiral, random orientation.
    #[default]
    Structural,
    /// Flat outward-facing elements such as photo frames.
    Framed,
}

impl ParticleCategory {
    /// Whether particles of this category keep facing away from the trunk.
    #[must_use]
    pub fn faces_outward(self) -> bool {
        matches!(self, Self::Framed)
    }
}

/// Immutable per-particle layout data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleRecord {
    /// Index within the group, `0..count`.
    pub id: usize,
    /// Target while assembled.
    pub assembled_position: Vec3,
    /// Target while dispersed.
    pub dispersed_position: Vec3,
    /// Baseline Euler angles (XYZ order, radians).
    pub orientation: Vec3,
    /// Uniform scale.
    pub scale: f32,
}

/// Ordered, fixed-length set of records sharing one mesh and material.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleGroup {
    category: ParticleCategory,
    records: Vec<ParticleRecord>,
}

impl ParticleGroup {
    /// Placement strategy the group was generated with.
    #[must_use]
    pub fn category(&self) -> ParticleCategory {
        self.category
    }

    /// Records in id order.
    #[must_use]
    pub fn records(&self) -> &[ParticleRecord] {
        &self.records
    }

    /// Number of particles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the group has no particles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// A validated, non-negative particle count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParticleCount(usize);

impl ParticleCount {
    /// The count as `usize`.
    #[must_use]
    pub fn get(self) -> usize {
        self.0
    }
}

impl TryFrom<i64> for ParticleCount {
    type Error = EvergreenError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        usize::try_from(value)
            .map(Self)
            .map_err(|_| EvergreenError::NegativeCount(value))
    }
}

impl From<usize> for ParticleCount {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

/// Generate a group using the thread-local RNG.
///
/// A count of zero yields an empty group.
#[must_use]
pub fn generate_group(
    count: ParticleCount,
    category: ParticleCategory,
    layout: &LayoutOptions,
) -> ParticleGroup {
    generate_group_with(count, category, layout, &mut rand::rng())
}

/// Generate a group drawing all randomness from `rng`.
pub fn generate_group_with<R: Rng + ?Sized>(
    count: ParticleCount,
    category: ParticleCategory,
    layout: &LayoutOptions,
    rng: &mut R,
) -> ParticleGroup {
    let count = count.get();
    let records = (0..count)
        .map(|id| match category {
            ParticleCategory::Structural => {
                structural_record(id, count, layout, &mut *rng)
            }
            ParticleCategory::Framed => framed_record(id, count, layout, &mut *rng),
        })
        .collect();
    ParticleGroup { category, records }
}

fn structural_record<R: Rng + ?Sized>(
    id: usize,
    count: usize,
    layout: &LayoutOptions,
    rng: &mut R,
) -> ParticleRecord {
    let jitter = (rng.random::<f32>() - 0.5) * layout.radius_jitter;
    let assembled_position = spiral::cone_position(id, count, jitter, layout);
    let dispersed_position =
        scatter::point_in_sphere(rng, layout.scatter_radius);
    let orientation = Vec3::new(
        rng.random::<f32>() * PI,
        rng.random::<f32>() * PI,
        rng.random::<f32>() * PI,
    );
    let [lo, hi] = layout.scale_range;
    let scale = lo + rng.random::<f32>() * (hi - lo);

    ParticleRecord {
        id,
        assembled_position,
        dispersed_position,
        orientation,
        scale,
    }
}

fn framed_record<R: Rng + ?Sized>(
    id: usize,
    count: usize,
    layout: &LayoutOptions,
    rng: &mut R,
) -> ParticleRecord {
    let assembled_position = spiral::frame_position(id, count, layout);
    ParticleRecord {
        id,
        assembled_position,
        dispersed_position: scatter::point_in_sphere(
            rng,
            layout.scatter_radius,
        ),
        orientation: Vec3::new(0.0, spiral::outward_yaw(assembled_position), 0.0),
        scale: 1.0,
    }
}
