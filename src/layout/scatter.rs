//! Uniform-volume sampling for the dispersed cloud.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;

/// Random point inside a sphere of `radius`, uniform by volume.
///
/// The radial draw is the cube root of a uniform variable; a plain uniform
/// radius would crowd points toward the center.
pub fn point_in_sphere<R: Rng + ?Sized>(rng: &mut R, radius: f32) -> Vec3 {
    let azimuth = TAU * rng.random::<f32>();
    let inclination = (2.0 * rng.random::<f32>() - 1.0).clamp(-1.0, 1.0).acos();
    let r = rng.random::<f32>().cbrt() * radius;

    let (sin_inc, cos_inc) = inclination.sin_cos();
    Vec3::new(
        r * sin_inc * azimuth.cos(),
        r * sin_inc * azimuth.sin(),
        r * cos_inc,
    )
}
