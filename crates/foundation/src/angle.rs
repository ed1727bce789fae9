use std::f64::consts::PI;

/// Converts degrees to radians. All public angle APIs take radians;
/// authored bounds are usually stated in degrees.
pub fn deg(value: f64) -> f64 {
    value * PI / 180.0
}

/// Wraps a yaw angle into `(-π, π]`.
pub fn wrap_yaw(yaw: f64) -> f64 {
    let two_pi = 2.0 * PI;
    let mut y = yaw % two_pi;
    if y <= -PI {
        y += two_pi;
    } else if y > PI {
        y -= two_pi;
    }
    y
}

/// Clamps a pitch angle to `[-π/2, π/2]` (straight down / straight up).
pub fn clamp_pitch(pitch: f64) -> f64 {
    pitch.clamp(-PI / 2.0, PI / 2.0)
}
