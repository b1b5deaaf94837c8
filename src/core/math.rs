// Math utilities and helper functions

use glam::Vec3;
use std::f32::consts::{PI, TAU};

/// Linear interpolation
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Wrap an angle in radians into the half-open range (-PI, PI]
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped > PI {
        wrapped - TAU
    } else {
        wrapped
    }
}

/// Signed shortest rotation that takes `current` onto `target`, in (-PI, PI]
pub fn normalized_angle_difference(target: f32, current: f32) -> f32 {
    wrap_angle(target - current)
}

/// Drop the vertical component and renormalize (zero if nothing is left)
pub fn flatten_xz(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z).normalize_or_zero()
}

/// Yaw of a horizontal direction; +Z is yaw 0, +X is yaw PI/2
pub fn yaw_of(direction: Vec3) -> f32 {
    direction.x.atan2(direction.z)
}
