use bevy::prelude::*;

pub const UP: Vec4 = Vec4::new(0.0, 1.0, 0.0, 0.0);

/// Homogeneous point (w = 1)
pub fn point(x: f32, y: f32, z: f32) -> Vec4 {
    Vec4::new(x, y, z, 1.0)
}

/// Homogeneous direction (w = 0)
pub fn direction(x: f32, y: f32, z: f32) -> Vec4 {
    Vec4::new(x, y, z, 0.0)
}

/// Cross product of the xyz parts, returned as a direction
pub fn cross(a: Vec4, b: Vec4) -> Vec4 {
    a.truncate().cross(b.truncate()).extend(0.0)
}

/// Reflect `v` across the plane with unit normal `axis`
pub fn reflect(v: Vec4, axis: Vec4) -> Vec4 {
    v - 2.0 * v.dot(axis) * axis
}

/// Drop the vertical component, keeping a direction in the ground plane
pub fn horizontal(v: Vec4) -> Vec4 {
    Vec4::new(v.x, 0.0, v.z, 0.0)
}

/// acos with the argument clamped into [-1, 1]
pub fn clamped_acos(cosine: f32) -> f32 {
    cosine.clamp(-1.0, 1.0).acos()
}

/// Wraps `rotation` so it spins around `pivot` instead of the origin
pub fn rotation_about(pivot: Vec4, rotation: Mat4) -> Mat4 {
    let offset = pivot.truncate();
    Mat4::from_translation(offset) * rotation * Mat4::from_translation(-offset)
}

/// Yaw around the vertical axis through `pivot`
pub fn yaw_about(pivot: Vec4, angle: f32) -> Mat4 {
    rotation_about(pivot, Mat4::from_rotation_y(angle))
}

/// Roll around `axis` through `pivot`
pub fn roll_about(pivot: Vec4, axis: Vec4, angle: f32) -> Mat4 {
    let axis = axis.truncate().normalize_or_zero();
    if axis == Vec3::ZERO {
        return Mat4::IDENTITY;
    }
    rotation_about(pivot, Mat4::from_axis_angle(axis, angle))
}

pub fn translation(delta: Vec4) -> Mat4 {
    Mat4::from_translation(delta.truncate())
}
