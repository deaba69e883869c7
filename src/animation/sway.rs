//! Wind sway for assembled particles.

use glam::Vec3;

use crate::options::{LayoutOptions, SwayOptions};

/// Horizontal wind displacement as a function of height and time.
///
/// Strength grows with the square of normalized height, so the tip moves
/// and the trunk barely does. Each oscillator is phase-shifted by height:
/// neighbors move together while distant heights drift apart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sway {
    amplitude: f32,
    frequency: [f32; 2],
    height_phase: [f32; 2],
    depth_scale: f32,
    half_height: f32,
    height: f32,
}

impl Sway {
    /// Sway for a tree of the given layout.
    #[must_use]
    pub fn new(sway: &SwayOptions, layout: &LayoutOptions) -> Self {
        Self {
            amplitude: sway.amplitude,
            frequency: sway.frequency,
            height_phase: sway.height_phase,
            depth_scale: sway.depth_scale,
            half_height: layout.half_height(),
            height: layout.tree_height,
        }
    }

    /// Height in `[0, 1]`, base to tip.
    #[inline]
    #[must_use]
    pub fn normalized_height(&self, y: f32) -> f32 {
        ((y + self.half_height) / self.height).clamp(0.0, 1.0)
    }

    /// Displacement envelope at height `y`.
    #[inline]
    #[must_use]
    pub fn strength(&self, y: f32) -> f32 {
        let n = self.normalized_height(y);
        n * n * self.amplitude
    }

    /// Offset added to an assembled target at height `y`.
    #[must_use]
    pub fn offset(&self, y: f32, elapsed: f32) -> Vec3 {
        let strength = self.strength(y);
        if strength == 0.0 {
            return Vec3::ZERO;
        }
        let [fx, fz] = self.frequency;
        let [px, pz] = self.height_phase;
        Vec3::new(
            (elapsed * fx + y * px).sin() * strength,
            0.0,
            (elapsed * fz + y * pz).cos() * strength * self.depth_scale,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_sway() -> Sway {
        Sway::new(&SwayOptions::default(), &LayoutOptions::default())
    }

    #[test]
    fn base_does_not_move() {
        let sway = default_sway();
        assert_eq!(sway.offset(-7.0, 3.0), Vec3::ZERO);
    }

    #[test]
    fn top_sways_more_than_low_branches() {
        let sway = default_sway();
        let top = 7.0;
        let low = 0.1 * 14.0 - 7.0;
        assert!(sway.strength(top) > sway.strength(low));
        for elapsed in [0.0, 1.3, 2.7, 10.0] {
            let low_offset = sway.offset(low, elapsed).length();
            assert!(low_offset > 0.0);
            assert!(sway.offset(top, elapsed).length() > low_offset);
        }
    }

    #[test]
    fn offset_is_horizontal_and_bounded() {
        let sway = default_sway();
        for i in 0..50 {
            let y = -7.0 + i as f32 * 0.28;
            let o = sway.offset(y, i as f32 * 0.37);
            assert_eq!(o.y, 0.0);
            assert!(o.x.abs() <= sway.strength(y) + 1e-6);
            assert!(o.z.abs() <= sway.strength(y) * 0.5 + 1e-6);
        }
    }

    #[test]
    fn zero_amplitude_is_still() {
        let sway = Sway::new(
            &SwayOptions {
                amplitude: 0.0,
                ..SwayOptions::default()
            },
            &LayoutOptions::default(),
        );
        assert_eq!(sway.offset(7.0, 1.0), Vec3::ZERO);
    }
}
