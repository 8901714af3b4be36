//! Miscellaneous utility functions, usually related to vectors.

use crate::V2;

use angle::Angle;

/// Rotates a vector **clockwise** by an angle
pub fn rotate_vec(v: V2, angle: impl Angle<f64> + Copy) -> V2 {
    let sin = angle.sin();
    let cos = angle.cos();
    // Rotation **clockwise** corresponds to multiplication by the following matrix (which looks
    // like the classic anti-clockwise matrix because our y-axis goes down where the one in maths
    // goes up):
    // | cos(angle)  -sin(angle) |
    // | sin(angle)   cos(angle) |
    V2 {
        x: v.x * cos - v.y * sin,
        y: v.x * sin + v.y * cos,
    }
}

/// Reflects `point` through `centre` (i.e. returns `2 * centre - point`)
pub fn reflect_about(point: V2, centre: V2) -> V2 {
    centre * 2.0 - point
}

/// Linear interpolation between `a` (`t = 0`) and `b` (`t = 1`)
pub fn lerp(a: V2, b: V2, t: f64) -> V2 {
    a + (b - a) * t
}
