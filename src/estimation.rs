//! Range and position estimates from a single target observation.

use crate::geometry::{Rotation2d, Translation2d};

/// Ground distance to a target from its elevation angle.
///
/// Needs a camera with zero roll and a height difference between camera and
/// target; the larger the difference, the better the estimate. Pitches are in
/// radians, positive up.
pub fn calculate_distance_to_target_meters(
    camera_height_m: f64,
    target_height_m: f64,
    camera_pitch_rad: f64,
    target_pitch_rad: f64,
) -> f64 {
    (target_height_m - camera_height_m) / (camera_pitch_rad + target_pitch_rad).tan()
}

/// Camera-relative position of a target at `distance_m` along `yaw`.
pub fn estimate_target_translation(distance_m: f64, yaw: Rotation2d) -> Translation2d {
    Translation2d::new(yaw.cos() * distance_m, yaw.sin() * distance_m)
}
