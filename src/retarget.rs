//! Maps one tracked hand onto its avatar hand controller and finger bend morphs.

use crate::curl::{estimate_curl, morph_value, Mirror};
use crate::rig::{Controller, MorphKey, MorphRegistry, Pose};
use derive_more::Deref;
use glam::Vec3;
use leap::{Chirality, FingerType, Hand};
use log::trace;
use std::f32::consts::FRAC_PI_2;

macro_rules! finger_morphs {
    ($side:literal) => {
        [
            concat!($side, " Thumb Bend"),
            concat!($side, " Index Finger Bend"),
            concat!($side, " Mid Finger Bend"),
            concat!($side, " Ring Finger Bend"),
            concat!($side, " Pinky Finger Bend"),
        ]
    };
}

/// Display names of the five bend morphs of one hand, in [`FingerType`] order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deref)]
pub struct FingerMorphs([&'static str; 5]);

impl FingerMorphs {
    pub const LEFT: Self = Self(finger_morphs!("Left"));
    pub const RIGHT: Self = Self(finger_morphs!("Right"));

    #[inline]
    pub fn name(&self, kind: FingerType) -> &'static str {
        self.0[kind as usize]
    }

    pub fn of(chirality: Chirality) -> Self {
        match chirality {
            Chirality::Left => Self::LEFT,
            Chirality::Right => Self::RIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RetargetError {
    #[error("no morph named {0:?}")]
    MissingMorph(String),
}

/// Where the controller goes for `hand`: the palm pose, turned a quarter turn about its own
/// vertical axis and pushed sideways by `lateral_offset`, both mirrored per side.
pub fn controller_pose(hand: &Hand, mirror: Mirror, lateral_offset: f32) -> Pose {
    let mut pose = Pose::new(hand.palm_position.into(), hand.rotation.into());
    pose.rotate_local_y(FRAC_PI_2 * *mirror);
    pose.translate_local(Vec3::X * (lateral_offset * *mirror));
    pose
}

fn resolve_morphs(
    morphs: &dyn MorphRegistry,
    names: &FingerMorphs,
) -> Result<[MorphKey; 5], RetargetError> {
    let mut keys = [MorphKey::default(); 5];
    for kind in FingerType::ALL {
        let name = names.name(kind);
        keys[kind as usize] = morphs
            .resolve(name)
            .ok_or_else(|| RetargetError::MissingMorph(name.to_owned()))?;
    }
    Ok(keys)
}

/// Overwrites the controller's pose and drives the five bend morphs from `hand`.
///
/// Every morph name is resolved up front, so on error neither the controller nor any morph has
/// been touched. Returns the pose written to the controller.
pub fn retarget_hand(
    controller: &mut dyn Controller,
    hand: &Hand,
    morphs: &mut dyn MorphRegistry,
    names: &FingerMorphs,
    mirror: Mirror,
    lateral_offset: f32,
) -> Result<Pose, RetargetError> {
    let keys = resolve_morphs(morphs, names)?;

    let palm_rotation = hand.rotation.into();
    let pose = controller_pose(hand, mirror, lateral_offset);
    controller.set_pose(pose);

    for finger in &hand.fingers {
        let kind = finger.kind;
        let curl = estimate_curl(finger.distal().rotation, palm_rotation, kind, mirror);
        if let Some(value) = morph_value(curl) {
            morphs.set_value(keys[kind as usize], value);
        }
        trace!("{:?} {kind:?} curl {curl}", hand.chirality);
    }

    Ok(pose)
}
