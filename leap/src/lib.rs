//! Data model of the hand tracking SDK, as delivered to consumers once per frame.
//!
//! Positions are in tracking space units and orientations are unit quaternions in tracking
//! space. Nothing here is mutated after the provider hands a [`Frame`] over.

mod convert;

use serde::{Deserialize, Serialize};
use std::ops::Index;

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl Index<usize> for Vector {
    type Output = f32;

    fn index(&self, index: usize) -> &f32 {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Vector index out of range: {index}"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LeapQuaternion {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl LeapQuaternion {
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }
}

impl Default for LeapQuaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[repr(usize)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoneType {
    Metacarpal = 0,
    Proximal,
    Intermediate,
    Distal,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bone {
    pub kind: BoneType,
    pub rotation: LeapQuaternion,
}

#[repr(usize)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FingerType {
    Thumb = 0,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl FingerType {
    pub const ALL: [Self; 5] = [
        Self::Thumb,
        Self::Index,
        Self::Middle,
        Self::Ring,
        Self::Pinky,
    ];
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Finger {
    pub kind: FingerType,
    /// Ordered from the palm outwards.
    pub bones: [Bone; 4],
}

impl Finger {
    /// A straight finger, every bone sharing `rotation`.
    pub fn uniform(kind: FingerType, rotation: LeapQuaternion) -> Self {
        let bone = |kind| Bone { kind, rotation };
        Self {
            kind,
            bones: [
                bone(BoneType::Metacarpal),
                bone(BoneType::Proximal),
                bone(BoneType::Intermediate),
                bone(BoneType::Distal),
            ],
        }
    }

    #[inline]
    pub fn bone(&self, kind: BoneType) -> &Bone {
        &self.bones[kind as usize]
    }

    /// The outermost bone, closest to the fingertip.
    #[inline]
    pub fn distal(&self) -> &Bone {
        self.bone(BoneType::Distal)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Chirality {
    Left,
    Right,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hand {
    pub id: i32,
    pub chirality: Chirality,
    pub palm_position: Vector,
    pub rotation: LeapQuaternion,
    /// Thumb, index, middle, ring, pinky.
    pub fingers: [Finger; 5],
}

impl Hand {
    /// An open hand with every bone at `finger_rotation`.
    pub fn open(
        chirality: Chirality,
        palm_position: Vector,
        rotation: LeapQuaternion,
        finger_rotation: LeapQuaternion,
    ) -> Self {
        Self {
            id: 0,
            chirality,
            palm_position,
            rotation,
            fingers: FingerType::ALL.map(|kind| Finger::uniform(kind, finger_rotation)),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub id: i64,
    pub hands: Vec<Hand>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vector_index_order() {
        let v = Vector::new(1.0, 2.0, 3.0);
        assert_eq!([v[0], v[1], v[2]], [1.0, 2.0, 3.0]);
    }

    #[test]
    fn open_hand_finger_order() {
        let hand = Hand::open(
            Chirality::Right,
            Vector::ZERO,
            LeapQuaternion::IDENTITY,
            LeapQuaternion::IDENTITY,
        );
        assert_eq!(hand.chirality, Chirality::Right);
        for (idx, finger) in hand.fingers.iter().enumerate() {
            assert_eq!(finger.kind as usize, idx);
            assert_eq!(finger.distal().kind, BoneType::Distal);
        }
    }

    #[test]
    fn frame_from_json() {
        let frame: Frame = serde_json::from_str(
            r#"{
                "id": 7,
                "hands": []
            }"#,
        )
        .unwrap();
        assert_eq!(frame.id, 7);
        assert!(frame.hands.is_empty());
    }
}
