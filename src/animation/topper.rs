//! The star above the tree top.

use std::f32::consts::TAU;

use glam::Vec3;

use super::damping::Damping;
use super::mode::Mode;
use super::transform::ParticleTransform;
use crate::options::{MotionOptions, TopperOptions};

/// A single particle that eases between two fixed points, spins about its
/// vertical axis in both modes and bobs gently in place.
#[derive(Debug, Clone)]
pub struct TopperAnimator {
    assembled: Vec3,
    dispersed: Vec3,
    current: Vec3,
    yaw: f32,
    spin_rate: f32,
    scale: f32,
    damping: Damping,
    float_speed: f32,
    float_intensity: f32,
    wobble_intensity: f32,
    /// Elapsed time of the last accepted frame, drives the bob.
    bob_time: f32,
}

impl TopperAnimator {
    /// Topper starting at its dispersed position.
    #[must_use]
    pub fn new(topper: &TopperOptions, motion: &MotionOptions) -> Self {
        let dispersed = Vec3::from_array(topper.dispersed_position);
        Self {
            assembled: Vec3::from_array(topper.assembled_position),
            dispersed,
            current: dispersed,
            yaw: 0.0,
            spin_rate: topper.spin_rate,
            scale: topper.scale,
            damping: Damping::from_motion(motion, topper.speed),
            float_speed: topper.float_speed,
            float_intensity: topper.float_intensity,
            wobble_intensity: topper.wobble_intensity,
            bob_time: 0.0,
        }
    }

    /// Current position, without the bob.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.current
    }

    /// Accumulated spin about the vertical axis, in `[0, 2π)`.
    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Advance one frame and return the topper's transform.
    ///
    /// A frame with a non-finite `dt` or `elapsed` leaves the state as it
    /// was and returns the previous transform.
    pub fn advance_frame(
        &mut self,
        mode: Mode,
        dt: f32,
        elapsed: f32,
    ) -> ParticleTransform {
        if dt.is_finite() && elapsed.is_finite() {
            let dt = dt.max(0.0);
            let target = match mode {
                Mode::Assembled => self.assembled,
                Mode::Dispersed => self.dispersed,
            };
            self.current = self.current.lerp(target, self.damping.fraction(dt));
            self.yaw = (self.yaw + self.spin_rate * dt) % TAU;
            self.bob_time = elapsed;
        }
        self.transform()
    }

    fn transform(&self) -> ParticleTransform {
        let phase = self.bob_time / 4.0 * self.float_speed;
        let (sin, cos) = phase.sin_cos();
        let bob = sin / 10.0 * self.float_intensity;
        let wobble = Vec3::new(cos / 8.0, sin / 8.0, sin / 20.0)
            * self.wobble_intensity;
        ParticleTransform {
            position: self.current + Vec3::new(0.0, bob, 0.0),
            rotation: Vec3::new(0.0, self.yaw, 0.0) + wobble,
            scale: self.scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topper() -> TopperAnimator {
        TopperAnimator::new(&TopperOptions::default(), &MotionOptions::default())
    }

    #[test]
    fn rises_to_tree_top() {
        let mut topper = topper();
        assert_eq!(topper.position(), Vec3::new(0.0, 20.0, -10.0));
        let mut last = None;
        for frame in 0..1200 {
            last = Some(topper.advance_frame(
                Mode::Assembled,
                1.0 / 60.0,
                frame as f32 / 60.0,
            ));
        }
        let t = last.unwrap();
        assert!((topper.position() - Vec3::new(0.0, 7.5, 0.0)).length() < 1e-3);
        assert!((t.position.y - 7.5).abs() <= 0.05 + 1e-3);
        assert!(topper.yaw() >= 0.0 && topper.yaw() < TAU);
    }

    #[test]
    fn spins_in_both_modes() {
        let mut topper = topper();
        let _ = topper.advance_frame(Mode::Dispersed, 0.5, 0.5);
        assert!((topper.yaw() - 0.25).abs() < 1e-6);
        let _ = topper.advance_frame(Mode::Assembled, 0.5, 1.0);
        assert!((topper.yaw() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn bobs_within_float_range() {
        let mut topper = topper();
        let mut lowest = f32::MAX;
        let mut highest = f32::MIN;
        for frame in 0..1200 {
            let t = topper.advance_frame(
                Mode::Dispersed,
                1.0 / 60.0,
                frame as f32 / 60.0,
            );
            let bob = t.position.y - topper.position().y;
            lowest = lowest.min(bob);
            highest = highest.max(bob);
            assert!(t.rotation.x.abs() <= 0.5 / 8.0 + 1e-6);
        }
        // Float intensity 0.5 gives a bob of +-0.05 over a 4π s period.
        assert!(highest > 0.045 && highest <= 0.05 + 1e-4);
        assert!(lowest < -0.045 && lowest >= -0.05 - 1e-4);
    }

    #[test]
    fn zero_intensity_disables_bob() {
        let options = TopperOptions {
            float_intensity: 0.0,
            wobble_intensity: 0.0,
            ..TopperOptions::default()
        };
        let mut topper = TopperAnimator::new(&options, &MotionOptions::default());
        let t = topper.advance_frame(Mode::Dispersed, 1.0 / 60.0, 3.0);
        assert_eq!(t.position, topper.position());
        assert_eq!(t.rotation, Vec3::new(0.0, topper.yaw(), 0.0));
    }

    #[test]
    fn non_finite_frame_keeps_state() {
        let mut topper = topper();
        let good = topper.advance_frame(Mode::Assembled, 1.0 / 60.0, 1.0);
        let bad = topper.advance_frame(Mode::Assembled, f32::NAN, 1.1);
        assert_eq!(bad, good);
        let bad = topper.advance_frame(Mode::Assembled, f32::INFINITY, f32::NAN);
        assert_eq!(bad, good);

        let next = topper.advance_frame(Mode::Assembled, 1.0 / 60.0, 1.2);
        assert!(next.position.is_finite());
        assert!(next.rotation.is_finite());
    }
}
