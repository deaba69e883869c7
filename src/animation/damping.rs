//! Approach fraction for the per-frame position lerp.
//!
//! Lerping a fixed fraction of the remaining distance every frame gives an
//! exponential ease-out. [`Damping::Exponential`] derives that fraction from
//! the frame delta so convergence speed does not depend on the refresh rate.

use rand::Rng;

use crate::options::{DampingMode, MotionOptions};

/// Upper bound on any sampled fraction. Keeps a stalled frame from snapping
/// a particle onto its target.
pub const MAX_FRACTION: f32 = 0.9;

/// Per-frame approach fraction strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Damping {
    /// Constant fraction per frame, with additive jitter in `[0, jitter)`.
    Fixed {
        /// Fraction of the remaining distance covered each frame.
        fraction: f32,
        /// Width of the additive jitter.
        jitter: f32,
    },
    /// `1 - exp(-rate * dt)`, scaled by `1 + [0, jitter)`.
    Exponential {
        /// Decay rate in 1/s.
        rate: f32,
        /// Width of the multiplicative jitter.
        jitter: f32,
    },
}

impl Damping {
    /// Damping for a group moving at `speed` under the given motion options.
    #[must_use]
    pub fn from_motion(motion: &MotionOptions, speed: f32) -> Self {
        match motion.damping {
            DampingMode::Fixed => Self::Fixed {
                fraction: motion.fixed_fraction,
                jitter: motion.fixed_jitter,
            },
            DampingMode::Exponential => Self::Exponential {
                rate: 4.0 * speed,
                jitter: motion.exponential_jitter,
            },
        }
    }

    /// Fraction for a frame of length `dt`, without jitter.
    #[must_use]
    pub fn fraction(&self, dt: f32) -> f32 {
        let f = match *self {
            Self::Fixed { fraction, .. } => fraction,
            Self::Exponential { rate, .. } => -(-rate * dt.max(0.0)).exp_m1(),
        };
        f.clamp(0.0, MAX_FRACTION)
    }

    /// Fraction for a frame of length `dt` with a fresh jitter draw.
    pub fn sample<R: Rng + ?Sized>(&self, dt: f32, rng: &mut R) -> f32 {
        let f = match *self {
            Self::Fixed { fraction, jitter } => {
                fraction + rng.random::<f32>() * jitter
            }
            Self::Exponential { jitter, .. } => {
                self.fraction(dt) * (1.0 + rng.random::<f32>() * jitter)
            }
        };
        f.clamp(0.0, MAX_FRACTION)
    }
}
