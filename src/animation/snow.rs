//! Ambient snowfall around the tree.
//!
//! Flakes fall and sway regardless of the tree mode, respawning at the top
//! once they drop below the floor.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::transform::{InstanceRaw, ParticleTransform};
use crate::options::SnowOptions;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Flake {
    /// Unswayed position.
    position: Vec3,
    /// Fall distance per 60 Hz frame.
    fall_speed: f32,
    sway_speed: f32,
    sway_amplitude: f32,
    scale: f32,
}

/// Field of falling flakes.
#[derive(Debug)]
pub struct SnowField {
    options: SnowOptions,
    flakes: Vec<Flake>,
    tumble: Vec3,
    rng: StdRng,
    scratch: Vec<ParticleTransform>,
}

fn in_range<R: Rng + ?Sized>(rng: &mut R, [lo, hi]: [f32; 2]) -> f32 {
    lo + rng.random::<f32>() * (hi - lo)
}

impl SnowField {
    /// Field seeded from the thread RNG.
    #[must_use]
    pub fn new(options: &SnowOptions) -> Self {
        Self::with_rng(options, StdRng::from_rng(&mut rand::rng()))
    }

    /// Field with a deterministic spawn sequence.
    #[must_use]
    pub fn with_seed(options: &SnowOptions, seed: u64) -> Self {
        Self::with_rng(options, StdRng::seed_from_u64(seed))
    }

    fn with_rng(options: &SnowOptions, mut rng: StdRng) -> Self {
        let extent = [-options.half_extent, options.half_extent];
        let flakes: Vec<Flake> = (0..options.count)
            .map(|_| Flake {
                position: Vec3::new(
                    in_range(&mut rng, extent),
                    in_range(&mut rng, options.spawn_height),
                    in_range(&mut rng, extent),
                ),
                fall_speed: in_range(&mut rng, options.fall_speed),
                sway_speed: in_range(&mut rng, options.sway_speed),
                sway_amplitude: in_range(&mut rng, options.sway_amplitude),
                scale: in_range(&mut rng, options.scale),
            })
            .collect();
        Self {
            options: options.clone(),
            scratch: Vec::with_capacity(flakes.len()),
            flakes,
            tumble: Vec3::ZERO,
            rng,
        }
    }

    /// Number of flakes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.flakes.len()
    }

    /// Whether the field has no flakes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flakes.is_empty()
    }

    /// Transforms emitted by the most recent frame.
    #[must_use]
    pub fn transforms(&self) -> &[ParticleTransform] {
        &self.scratch
    }

    /// Advance one frame. `dt` is clamped to the configured maximum so a
    /// long stall does not teleport the whole field. A frame with a
    /// non-finite `dt` or `elapsed` is skipped.
    pub fn advance_frame(&mut self, dt: f32, elapsed: f32) -> &[ParticleTransform] {
        if !(dt.is_finite() && elapsed.is_finite()) {
            log::warn!("skipping snow frame with dt={dt}, elapsed={elapsed}");
            return &self.scratch;
        }
        let dt = dt.clamp(0.0, self.options.max_dt);
        let opts = &self.options;
        let extent = [-opts.half_extent, opts.half_extent];
        self.tumble = (self.tumble
            + Vec3::new(opts.spin_rate, 0.0, opts.spin_rate) * dt)
            % TAU;

        self.scratch.clear();
        for flake in &mut self.flakes {
            flake.position.y -= flake.fall_speed * dt * 60.0;
            if flake.position.y < opts.floor {
                flake.position.y = opts.respawn_height;
                flake.position.x = in_range(&mut self.rng, extent);
                flake.position.z = in_range(&mut self.rng, extent);
            }

            let sway = (elapsed * flake.sway_speed + flake.position.x).sin()
                * flake.sway_amplitude;
            self.scratch.push(ParticleTransform {
                position: flake.position + Vec3::new(sway, 0.0, 0.0),
                rotation: self.tumble,
                scale: flake.scale,
            });
        }
        &self.scratch
    }

    /// Append the latest transforms to `out` as GPU instance records.
    pub fn write_instances(&self, out: &mut Vec<InstanceRaw>) {
        out.extend(self.scratch.iter().map(ParticleTransform::to_instance));
    }
}
