//! Entry points for the host's lifecycle hooks. Nothing in here panics or returns an error:
//! failures are logged and the plugin carries on, doing nothing if it has to.

use crate::driver::{FrameDriver, TickOutcome};
use crate::rig::Scene;
use crate::settings::Settings;
use log::{error, info, warn};
use serde_json::Value;
use std::sync::Arc;

pub struct Plugin {
    settings: Arc<Settings>,
    driver: Option<FrameDriver>,
}

impl Plugin {
    pub fn init(scene: &dyn Scene) -> Self {
        crate::init_logging();
        Self::with_settings(scene, Arc::new(Settings::new()))
    }

    pub fn with_settings(scene: &dyn Scene, settings: Arc<Settings>) -> Self {
        let driver = match FrameDriver::initialize(scene, settings.clone()) {
            Ok(driver) => Some(driver),
            Err(e) => {
                error!("Failed to initialize hand possession: {e}");
                None
            }
        };
        Self { settings, driver }
    }

    pub fn settings(&self) -> &Arc<Settings> {
        &self.settings
    }

    pub fn is_functional(&self) -> bool {
        self.driver.is_some()
    }

    /// Fixed timestep hook. Errors are logged every time they happen.
    pub fn fixed_update(&mut self) -> Option<TickOutcome> {
        let Some(driver) = self.driver.as_mut() else {
            error!("Hand possession is not initialized, skipping tick");
            return None;
        };

        match driver.tick() {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                error!("Tick failed: {e}");
                None
            }
        }
    }

    pub fn set_activation_distance(&self, distance: f32) -> f32 {
        self.settings.activation_distance.set(distance)
    }

    pub fn set_lateral_offset(&self, offset: f32) -> f32 {
        self.settings.lateral_offset.set(offset)
    }

    pub fn set_camera_recess(&mut self, recess: f32) {
        let recess = self.settings.camera_recess.set(recess);
        match self.driver.as_mut() {
            Some(driver) => driver.set_camera_recess(recess),
            None => warn!("no camera to recess"),
        }
    }

    pub fn set_clip_distance(&mut self, distance: f32) {
        let distance = self.settings.clip_distance.set(distance);
        match self.driver.as_mut() {
            Some(driver) => driver.set_near_clip(distance),
            None => warn!("no camera to set the clip distance on"),
        }
    }

    /// Recess and clip values that keep the avatar's head out of view.
    pub fn apply_clip_preset(&mut self) {
        let (recess, clip) = self.settings.clip_preset();
        info!("applying camera clip preset (recess {recess}, clip {clip})");
        self.set_camera_recess(recess);
        self.set_clip_distance(clip);
    }

    pub fn store(&self) -> Value {
        self.settings.store()
    }

    pub fn restore(&self, json: &Value) {
        self.settings.restore(json)
    }
}
