use crate::AtomicF32;
use log::{debug, warn};
use serde_json::{Map, Value};

/// A named float with a default and an allowed range. Values are clamped on write.
#[derive(Debug)]
pub struct StorableFloat {
    name: &'static str,
    default: f32,
    min: f32,
    max: f32,
    /// Whether the value survives a save/load of the host scene.
    persisted: bool,
    val: AtomicF32,
}

impl StorableFloat {
    pub fn new(name: &'static str, default: f32, min: f32, max: f32, persisted: bool) -> Self {
        Self {
            name,
            default,
            min,
            max,
            persisted,
            val: default.into(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn default_value(&self) -> f32 {
        self.default
    }

    pub fn range(&self) -> (f32, f32) {
        (self.min, self.max)
    }

    pub fn is_persisted(&self) -> bool {
        self.persisted
    }

    #[inline]
    pub fn get(&self) -> f32 {
        self.val.load()
    }

    /// Stores `value` clamped to the range and returns what was stored.
    pub fn set(&self, value: f32) -> f32 {
        let value = value.max(self.min).min(self.max);
        self.val.store(value);
        value
    }

    pub fn reset(&self) {
        self.val.store(self.default);
    }
}

/// Recess and near clip applied by [`Settings::clip_preset`].
pub const CLIP_PRESET: (f32, f32) = (0.06, 0.08);

/// User facing knobs. Shared between the host's UI and the frame driver.
#[derive(Debug)]
pub struct Settings {
    /// Camera to head distance at or under which hands are retargeted.
    pub activation_distance: StorableFloat,
    /// Sideways shift of each hand controller along its own x axis, mirrored per side.
    pub lateral_offset: StorableFloat,
    pub camera_recess: StorableFloat,
    pub clip_distance: StorableFloat,
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

impl Settings {
    pub fn new() -> Self {
        Self {
            activation_distance: StorableFloat::new(
                "Camera to head distance required",
                0.2,
                0.0,
                0.5,
                true,
            ),
            lateral_offset: StorableFloat::new("X Offset", 0.045, -0.1, 0.1, true),
            camera_recess: StorableFloat::new("Camera Recess", 0.0, 0.0, 0.2, false),
            clip_distance: StorableFloat::new("Clip Distance", 0.01, 0.01, 0.2, false),
        }
    }

    pub fn all(&self) -> [&StorableFloat; 4] {
        [
            &self.activation_distance,
            &self.lateral_offset,
            &self.camera_recess,
            &self.clip_distance,
        ]
    }

    fn persisted(&self) -> impl Iterator<Item = &StorableFloat> {
        self.all().into_iter().filter(|s| s.persisted)
    }

    /// Sets recess and clip distance to the preset, returning the stored values.
    pub fn clip_preset(&self) -> (f32, f32) {
        let (recess, clip) = CLIP_PRESET;
        (self.camera_recess.set(recess), self.clip_distance.set(clip))
    }

    /// The persisted values as a JSON object keyed by display name.
    pub fn store(&self) -> Value {
        let map: Map<String, Value> = self
            .persisted()
            .map(|s| (s.name.to_owned(), Value::from(s.get())))
            .collect();
        Value::Object(map)
    }

    /// Loads values written by [`Settings::store`]. Missing keys keep their current value.
    pub fn restore(&self, json: &Value) {
        for storable in self.persisted() {
            match json.get(storable.name) {
                Some(value) => match value.as_f64() {
                    Some(v) => {
                        let stored = storable.set(v as f32);
                        debug!("restored {:?} = {stored}", storable.name);
                    }
                    None => warn!("ignoring non-numeric {:?}: {value}", storable.name),
                },
                None => debug!("{:?} not in saved data, keeping {}", storable.name, storable.get()),
            }
        }
    }
}
