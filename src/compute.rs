//! Pure kinematics helpers shared by every entity.
//!
//! Coordinates are screen units with the origin in the top-left corner and
//! the y axis pointing down, so positive angles turn clockwise on screen.

use glam::DVec2;

/// Convert degrees to radians.
pub fn radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

/// Unit vector pointing along `degrees`.
pub fn angle_to_vector(degrees: f64) -> DVec2 {
    let r = radians(degrees);
    DVec2::new(r.cos(), r.sin())
}

/// Move `pos` by `velocity` and wrap the result onto the torus `[0, screen)`.
pub fn advance(pos: DVec2, velocity: DVec2, screen: DVec2) -> DVec2 {
    DVec2::new(
        wrap_axis(pos.x + velocity.x, screen.x),
        wrap_axis(pos.y + velocity.y, screen.y),
    )
}

/// Negative remainders are shifted up by `size` (Euclidean remainder).
fn wrap_axis(value: f64, size: f64) -> f64 {
    let wrapped = value.rem_euclid(size);
    // rem_euclid of a tiny negative value can round up to exactly `size`
    if wrapped >= size {
        0.0
    } else {
        wrapped
    }
}
