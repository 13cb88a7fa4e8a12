//! Everything the retargeting core reads from or writes to, but does not own.
//!
//! The host resolves these once (see [`Scene`]) and hands them to the
//! [`FrameDriver`](crate::FrameDriver); nothing here performs global lookups.

use glam::{Quat, Vec3};
use log::debug;
use slotmap::{new_key_type, SlotMap};
use std::collections::HashMap;

/// Position and orientation in world space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Pose {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Rotates about the pose's own vertical axis.
    pub fn rotate_local_y(&mut self, angle: f32) {
        self.rotation *= Quat::from_rotation_y(angle);
    }

    /// Moves along the pose's own axes.
    pub fn translate_local(&mut self, offset: Vec3) {
        self.position += self.rotation * offset;
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

pub trait TrackingProvider {
    /// The most recent snapshot. May be older than the current tick.
    fn current_frame(&self) -> leap::Frame;
}

/// A controller whose transform the core overwrites, such as a hand.
pub trait Controller: Tracked {
    fn pose(&self) -> Pose;
    fn set_pose(&mut self, pose: Pose);
}

/// Anything with a world position that is only ever read.
pub trait Tracked {
    fn position(&self) -> Vec3;
}

pub trait ReferenceCamera: Tracked {
    fn rotation(&self) -> Quat;
    fn set_position(&mut self, position: Vec3);
    fn set_near_clip_plane(&mut self, distance: f32);
}

/// The rig point that follows the camera. Held still while the camera is recessed.
pub trait Possessor: Tracked {
    fn set_position(&mut self, position: Vec3);
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CameraVariant {
    /// Centre eye camera of a headset.
    Ovr,
    /// Monitor look camera.
    Desktop,
}

new_key_type! {
    pub struct MorphKey;
}

/// Blend shape controls, looked up by display name.
pub trait MorphRegistry {
    fn resolve(&self, display_name: &str) -> Option<MorphKey>;
    fn value(&self, key: MorphKey) -> f32;
    /// Implementations clamp `value` to the morph's own range.
    fn set_value(&mut self, key: MorphKey, value: f32);
}

/// One-time lookup of the avatar and host objects.
pub trait Scene {
    fn tracking_provider(&self) -> Option<Box<dyn TrackingProvider>>;
    fn camera_variant(&self) -> CameraVariant;
    fn reference_camera(&self, variant: CameraVariant) -> Option<Box<dyn ReferenceCamera>>;
    fn possessor(&self, name: &str) -> Option<Box<dyn Possessor>>;
    fn controller(&self, id: &str) -> Option<Box<dyn Controller>>;
    /// A controller the core only reads from, such as the head.
    fn tracked(&self, id: &str) -> Option<Box<dyn Tracked>>;
    fn morph_registry(&self) -> Option<Box<dyn MorphRegistry>>;
}

#[derive(Clone, Debug)]
pub struct Morph {
    pub display_name: String,
    pub min: f32,
    pub max: f32,
    value: f32,
}

impl Morph {
    pub fn value(&self) -> f32 {
        self.value
    }
}

/// A plain [`MorphRegistry`]: every morph clamps to its own `[min, max]`.
#[derive(Default)]
pub struct MorphSet {
    morphs: SlotMap<MorphKey, Morph>,
    by_name: HashMap<String, MorphKey>,
}

impl MorphSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a morph, or replaces the range and value of an existing one with the same name.
    pub fn insert(&mut self, display_name: &str, min: f32, max: f32, value: f32) -> MorphKey {
        let morph = Morph {
            display_name: display_name.to_owned(),
            min,
            max,
            value: value.max(min).min(max),
        };
        match self.by_name.get(display_name) {
            Some(&key) => {
                self.morphs[key] = morph;
                key
            }
            None => {
                debug!("registering morph {display_name:?} [{min}, {max}]");
                let key = self.morphs.insert(morph);
                self.by_name.insert(display_name.to_owned(), key);
                key
            }
        }
    }

    pub fn get(&self, display_name: &str) -> Option<&Morph> {
        self.by_name
            .get(display_name)
            .and_then(|key| self.morphs.get(*key))
    }

    pub fn len(&self) -> usize {
        self.morphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.morphs.is_empty()
    }
}

impl MorphRegistry for MorphSet {
    fn resolve(&self, display_name: &str) -> Option<MorphKey> {
        self.by_name.get(display_name).copied()
    }

    fn value(&self, key: MorphKey) -> f32 {
        self.morphs.get(key).map_or(0.0, |m| m.value)
    }

    fn set_value(&mut self, key: MorphKey, value: f32) {
        if let Some(morph) = self.morphs.get_mut(key) {
            morph.value = value.max(morph.min).min(morph.max);
        }
    }
}
