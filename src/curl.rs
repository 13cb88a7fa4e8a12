//! Finger curl estimation from the orientation of a finger's distal bone.
//!
//! The "angle" fed into the curl formulas is the raw `x` component of the bone's rotation
//! relative to the palm, not a real Euler angle. The constants below were tuned against that
//! quantity, so swapping in a geometrically exact angle changes how the fingers bend.

use crate::math::{abs_value, remap_clamped, sign_correct};
use derive_more::Deref;
use glam::Quat;
use leap::{Chirality, FingerType, LeapQuaternion};
use std::f32::consts::FRAC_PI_2;

const THUMB_BIAS: f32 = 0.5;
const THUMB_GAIN: f32 = 1.22;
const FINGER_THRESHOLD: f32 = 0.65;
const FINGER_GAIN: f32 = 0.9;
const MORPH_SCALE: f32 = 0.85;

/// +1 for the left hand, -1 for the right. Flips yaw corrections and lateral offsets.
#[derive(Copy, Clone, Debug, PartialEq, Deref)]
pub struct Mirror(f32);

impl Mirror {
    pub const LEFT: Self = Self(1.0);
    pub const RIGHT: Self = Self(-1.0);

    pub fn of(chirality: Chirality) -> Self {
        match chirality {
            Chirality::Left => Self::LEFT,
            Chirality::Right => Self::RIGHT,
        }
    }
}

/// Orientation of a distal bone relative to the palm. The bone is first turned a quarter turn
/// about the vertical axis to line its axes up with the palm's.
pub fn relative_rotation(bone_rot: LeapQuaternion, palm_rot: Quat, mirror: Mirror) -> Quat {
    let bone = Quat::from(bone_rot);
    let correction = Quat::from_rotation_y(-FRAC_PI_2 * *mirror);
    (bone * correction).inverse() * palm_rot
}

#[inline]
pub fn thumb_curl(x: f32) -> f32 {
    (THUMB_BIAS - remap_clamped(0.0, 1.0, abs_value(x))) * THUMB_GAIN
}

#[inline]
pub fn finger_curl(x: f32) -> f32 {
    remap_clamped(0.0, 1.0, sign_correct(x, FINGER_THRESHOLD)) * FINGER_GAIN
}

pub fn estimate_curl(
    bone_rot: LeapQuaternion,
    palm_rot: Quat,
    kind: FingerType,
    mirror: Mirror,
) -> f32 {
    let delta = relative_rotation(bone_rot, palm_rot, mirror);
    match kind {
        FingerType::Thumb => thumb_curl(delta.x),
        _ => finger_curl(delta.x),
    }
}

/// The value to write to a bend morph for `curl`, or `None` if the morph should keep whatever it
/// had. A curl of exactly zero (of either sign) never writes.
#[inline]
pub fn morph_value(curl: f32) -> Option<f32> {
    (curl != 0.0).then(|| curl / MORPH_SCALE)
}
