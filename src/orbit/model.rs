use bevy::prelude::*;
use std::f32::consts::{PI, TAU};

use crate::HOURS_PER_DAY;

/// Moon orbital angle in radians after `day_progress` days of a `cycle_period`-day cycle.
///
/// Uniform circular motion; any sign or magnitude of `day_progress` is accepted.
pub fn orbital_angle(day_progress: f32, cycle_period: f32) -> f32 {
    (day_progress / cycle_period) * TAU
}

/// Earth rotation angle in radians about the vertical axis at `hour`.
pub fn rotation_angle(hour: f32) -> f32 {
    (hour / HOURS_PER_DAY) * TAU
}

/// Angle at which the sunlight source sits in the close-up views, opposite the Moon.
pub fn sun_facing_angle(orbital: f32) -> f32 {
    orbital + PI
}

/// Offset on the horizontal plane at `angle` and `radius`.
pub fn horizontal_offset(angle: f32, radius: f32) -> Vec3 {
    Vec3::new(angle.cos() * radius, 0.0, angle.sin() * radius)
}
