//! Per-frame animation of one particle group.

use std::f32::consts::TAU;
use std::sync::Arc;

use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::damping::Damping;
use super::mode::Mode;
use super::sway::Sway;
use super::transform::{InstanceRaw, ParticleTransform};
use crate::layout::spiral::outward_yaw;
use crate::layout::{ParticleCategory, ParticleGroup};
use crate::options::{LayoutOptions, MotionOptions};

/// Motion parameters shared by every particle of a group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionProfile {
    /// Approach fraction strategy.
    pub damping: Damping,
    /// Wind sway applied while assembled.
    pub sway: Sway,
    /// Tumble rate (rad/s per Euler axis) while dispersed.
    pub spin_rate: Vec3,
}

impl MotionProfile {
    /// Profile for a group of `category` moving at `speed`.
    #[must_use]
    pub fn for_group(
        motion: &MotionOptions,
        layout: &LayoutOptions,
        category: ParticleCategory,
        speed: f32,
    ) -> Self {
        let spin = match category {
            ParticleCategory::Structural => motion.structural_spin,
            ParticleCategory::Framed => motion.framed_spin,
        };
        Self {
            damping: Damping::from_motion(motion, speed),
            sway: Sway::new(&motion.sway, layout),
            spin_rate: Vec3::from_array(spin),
        }
    }
}

/// Drives every particle of a group toward its mode-dependent target.
///
/// Holds the only mutable per-particle state: the current interpolated
/// position, which starts at the dispersed target so the first frame does
/// not pop particles in from the origin. Orientation is recomputed each
/// frame from the record, the mode and a group-wide spin accumulator.
#[derive(Debug)]
pub struct GroupAnimator {
    group: Arc<ParticleGroup>,
    profile: MotionProfile,
    current: Vec<Vec3>,
    /// Accumulated tumble while dispersed; cleared on assembly.
    spin: Vec3,
    rng: StdRng,
    /// Reused every frame instead of allocating per particle.
    scratch: Vec<ParticleTransform>,
}

impl GroupAnimator {
    /// Animator with a jitter RNG seeded from the thread RNG.
    #[must_use]
    pub fn new(group: Arc<ParticleGroup>, profile: MotionProfile) -> Self {
        Self::with_rng(group, profile, StdRng::from_rng(&mut rand::rng()))
    }

    /// Animator with a deterministic jitter sequence.
    #[must_use]
    pub fn with_seed(
        group: Arc<ParticleGroup>,
        profile: MotionProfile,
        seed: u64,
    ) -> Self {
        Self::with_rng(group, profile, StdRng::seed_from_u64(seed))
    }

    fn with_rng(
        group: Arc<ParticleGroup>,
        profile: MotionProfile,
        rng: StdRng,
    ) -> Self {
        let current: Vec<Vec3> = group
            .records()
            .iter()
            .map(|r| r.dispersed_position)
            .collect();
        let scratch = group
            .records()
            .iter()
            .map(|r| ParticleTransform {
                position: r.dispersed_position,
                rotation: r.orientation,
                scale: r.scale,
            })
            .collect();
        Self {
            group,
            profile,
            current,
            spin: Vec3::ZERO,
            rng,
            scratch,
        }
    }

    /// The group being animated.
    #[must_use]
    pub fn group(&self) -> &Arc<ParticleGroup> {
        &self.group
    }

    /// Current interpolated positions, in record order.
    #[must_use]
    pub fn positions(&self) -> &[Vec3] {
        &self.current
    }

    /// Transforms emitted by the most recent frame (initial transforms
    /// before the first frame).
    #[must_use]
    pub fn transforms(&self) -> &[ParticleTransform] {
        &self.scratch
    }

    /// Raw target of particle `index` in `mode`, before sway.
    #[must_use]
    pub fn target(&self, index: usize, mode: Mode) -> Option<Vec3> {
        self.group.records().get(index).map(|r| match mode {
            Mode::Assembled => r.assembled_position,
            Mode::Dispersed => r.dispersed_position,
        })
    }

    /// Mean distance from each particle to its unswayed target in `mode`.
    #[must_use]
    pub fn mean_target_distance(&self, mode: Mode) -> f32 {
        if self.current.is_empty() {
            return 0.0;
        }
        let total: f32 = self
            .current
            .iter()
            .enumerate()
            .filter_map(|(i, p)| self.target(i, mode).map(|t| p.distance(t)))
            .sum();
        total / self.current.len() as f32
    }

    /// Advance one rendered frame.
    ///
    /// `dt` is the real time since the previous frame and `elapsed` the
    /// total running time, both in seconds. Returns one transform per
    /// particle, in record order.
    ///
    /// A frame with a non-finite `dt` or `elapsed` is skipped: state is left
    /// untouched and the previous transforms are returned.
    pub fn advance_frame(
        &mut self,
        mode: Mode,
        dt: f32,
        elapsed: f32,
    ) -> &[ParticleTransform] {
        if !(dt.is_finite() && elapsed.is_finite()) {
            log::warn!("skipping group frame with dt={dt}, elapsed={elapsed}");
            return &self.scratch;
        }
        let dt = dt.max(0.0);
        match mode {
            Mode::Dispersed => {
                self.spin = (self.spin + self.profile.spin_rate * dt) % TAU;
            }
            Mode::Assembled => self.spin = Vec3::ZERO,
        }

        let outward = self.group.category().faces_outward();
        let profile = &self.profile;
        let spin = self.spin;
        let rng = &mut self.rng;

        self.scratch.clear();
        for (record, current) in
            self.group.records().iter().zip(self.current.iter_mut())
        {
            let target = match mode {
                Mode::Assembled => {
                    record.assembled_position
                        + profile
                            .sway
                            .offset(record.assembled_position.y, elapsed)
                }
                Mode::Dispersed => record.dispersed_position,
            };

            let fraction = profile.damping.sample(dt, &mut *rng);
            *current = current.lerp(target, fraction);

            let rotation = match mode {
                Mode::Dispersed => record.orientation + spin,
                Mode::Assembled if outward => {
                    Vec3::new(0.0, outward_yaw(*current), 0.0)
                }
                Mode::Assembled => record.orientation,
            };

            self.scratch.push(ParticleTransform {
                position: *current,
                rotation,
                scale: record.scale,
            });
        }
        &self.scratch
    }

    /// Append the latest transforms to `out` as GPU instance records.
    pub fn write_instances(&self, out: &mut Vec<InstanceRaw>) {
        out.extend(self.scratch.iter().map(ParticleTransform::to_instance));
    }
}
