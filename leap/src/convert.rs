use super::*;
use glam::{Quat, Vec3};

// Axis order is kept as is: 0 -> x, 1 -> y, 2 -> z.
impl From<Vector> for Vec3 {
    fn from(value: Vector) -> Self {
        Vec3::new(value[0], value[1], value[2])
    }
}

impl From<LeapQuaternion> for Quat {
    fn from(value: LeapQuaternion) -> Self {
        Quat::from_xyzw(value.x, value.y, value.z, value.w)
    }
}
