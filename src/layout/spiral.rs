//! Cone spiral placement for the assembled tree.
//!
//! Particles climb a cone from base to tip; consecutive indices advance by
//! the golden angle so any prefix of the sequence covers the cone evenly.

use glam::Vec3;

use crate::options::LayoutOptions;

/// `π · (3 − √5)`, the golden angle in radians.
pub const GOLDEN_ANGLE: f32 = 2.399_963_2;

/// Normalized position `i / count` along the spiral.
#[inline]
#[must_use]
pub fn spiral_t(index: usize, count: usize) -> f32 {
    if count == 0 {
        return 0.0;
    }
    index as f32 / count as f32
}

/// Height for a normalized spiral position; `t = 0` is the base.
#[inline]
#[must_use]
pub fn cone_height(t: f32, layout: &LayoutOptions) -> f32 {
    t * layout.tree_height - layout.half_height()
}

/// Unjittered cone radius, tapering linearly to zero at the tip.
#[inline]
#[must_use]
pub fn taper_radius(t: f32, base_radius: f32) -> f32 {
    (1.0 - t) * base_radius
}

/// Polar angle of spiral step `index`.
#[inline]
#[must_use]
pub fn spiral_angle(index: usize, multiplier: f32) -> f32 {
    index as f32 * GOLDEN_ANGLE * multiplier
}

/// Cartesian point from cylindrical `(radius, angle, height)`.
#[inline]
#[must_use]
pub fn cylindrical(radius: f32, angle: f32, height: f32) -> Vec3 {
    Vec3::new(angle.cos() * radius, height, angle.sin() * radius)
}

/// Assembled position of needle-like particle `index`, with `jitter` added
/// to the tapered radius.
#[must_use]
pub fn cone_position(
    index: usize,
    count: usize,
    jitter: f32,
    layout: &LayoutOptions,
) -> Vec3 {
    let t = spiral_t(index, count);
    let radius = taper_radius(t, layout.base_radius) + jitter;
    cylindrical(radius, spiral_angle(index, 1.0), cone_height(t, layout))
}

/// Assembled position of outward-facing frame `index`.
///
/// Frames use an inner height band, sit slightly outside the needle layer
/// and follow their own angular step so they never line up with the main
/// spiral.
#[must_use]
pub fn frame_position(
    index: usize,
    count: usize,
    layout: &LayoutOptions,
) -> Vec3 {
    let [lo, hi] = layout.frame_height_range;
    let t = lo + (hi - lo) * spiral_t(index, count);
    let radius =
        taper_radius(t, layout.base_radius) + layout.frame_radius_offset;
    cylindrical(
        radius,
        spiral_angle(index, layout.frame_angle_multiplier),
        cone_height(t, layout),
    )
}

/// Yaw that turns a particle's local +Z away from the vertical axis.
///
/// Points on the axis have no defined outward direction and get zero.
#[inline]
#[must_use]
pub fn outward_yaw(position: Vec3) -> f32 {
    if position.x == 0.0 && position.z == 0.0 {
        return 0.0;
    }
    position.x.atan2(position.z)
}

#[cfg(test)]
mod tests {
    use std::f32::consts::PI;

    use glam::Quat;

    use super::*;

    #[test]
    fn golden_angle_constant() {
        let expected = PI * (3.0 - 5.0_f32.sqrt());
        assert!((GOLDEN_ANGLE - expected).abs() < 1e-6);
    }

    #[test]
    fn first_particle_sits_on_base_ring() {
        let layout = LayoutOptions::default();
        let p = cone_position(0, 1, 0.0, &layout);
        assert!((p.y + 7.0).abs() < 1e-6);
        assert!((p.x - 5.5).abs() < 1e-6);
        assert!(p.z.abs() < 1e-6);
    }

    #[test]
    fn taper_strictly_decreases() {
        let count = 200;
        let radii: Vec<f32> = (0..count)
            .map(|i| taper_radius(spiral_t(i, count), 5.5))
            .collect();
        assert!(radii.windows(2).all(|w| w[1] < w[0]));
    }

    #[test]
    fn frames_stay_inside_height_band() {
        let layout = LayoutOptions::default();
        let count = 40;
        for i in 0..count {
            let p = frame_position(i, count, &layout);
            let t = (p.y + layout.half_height()) / layout.tree_height;
            assert!(t >= 0.1 - 1e-5 && t < 0.8 + 1e-5, "t = {t}");
            let radial = Vec3::new(p.x, 0.0, p.z).length();
            let needle_radius = taper_radius(t, layout.base_radius);
            assert!(radial > needle_radius);
        }
    }

    #[test]
    fn outward_yaw_points_local_z_away_from_axis() {
        for p in [
            Vec3::new(3.0, 1.0, 0.0),
            Vec3::new(-2.0, 0.0, 2.0),
            Vec3::new(0.5, -4.0, -1.5),
        ] {
            let facing = Quat::from_rotation_y(outward_yaw(p)) * Vec3::Z;
            let outward = Vec3::new(p.x, 0.0, p.z).normalize();
            assert!(facing.dot(outward) > 0.999, "{p:?}");
        }
        assert_eq!(outward_yaw(Vec3::new(0.0, 3.0, 0.0)), 0.0);
    }
}
