use nalgebra::{Matrix4, Vector3};

/// Rotation about the X axis, angle in degrees
#[rustfmt::skip]
pub fn rotation_x(angle_deg: f64) -> Matrix4<f64> {
    let (s, c) = angle_deg.to_radians().sin_cos();
    Matrix4::new(
        1.0, 0.0, 0.0, 0.0,
        0.0, c, -s, 0.0,
        0.0, s, c, 0.0,
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Rotation about the Y axis, angle in degrees
#[rustfmt::skip]
pub fn rotation_y(angle_deg: f64) -> Matrix4<f64> {
    let (s, c) = angle_deg.to_radians().sin_cos();
    Matrix4::new(
        c, 0.0, s, 0.0,
        0.0, 1.0, 0.0, 0.0,
        -s, 0.0, c, 0.0,
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Rotation about the Z axis, angle in degrees
#[rustfmt::skip]
pub fn rotation_z(angle_deg: f64) -> Matrix4<f64> {
    let (s, c) = angle_deg.to_radians().sin_cos();
    Matrix4::new(
        c, -s, 0.0, 0.0,
        s, c, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Translation by (dx, dy, dz), distances in mm
pub fn translation(dx: f64, dy: f64, dz: f64) -> Matrix4<f64> {
    Matrix4::new_translation(&Vector3::new(dx, dy, dz))
}
