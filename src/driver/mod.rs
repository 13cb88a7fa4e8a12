
use crate::curl::Mirror;
use crate::gate::ProximityGate;
use crate::retarget::{retarget_hand, FingerMorphs, RetargetError};
use crate::rig::{
    CameraVariant, Controller, MorphRegistry, Possessor, ReferenceCamera, Scene, Tracked,
    TrackingProvider,
};
use crate::settings::Settings;
use crate::{tracy_span, warn_once};
use glam::Vec3;
use leap::Chirality;
use log::{debug, error, info, trace, warn};
use std::sync::Arc;

pub const LEFT_HAND_CONTROL: &str = "lHandControl";
pub const RIGHT_HAND_CONTROL: &str = "rHandControl";
pub const HEAD_CONTROL: &str = "headControl";
pub const POSSESSOR: &str = "CenterEye";

/// Fist presets that would otherwise fight the bend morphs; zeroed on startup.
pub const FIST_MORPHS: [&str; 4] = [
    "Left Thumb Fist",
    "Right Thumb Fist",
    "Left Fingers Fist",
    "Right Fingers Fist",
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InitError {
    #[error("no tracking provider in scene")]
    MissingTrackingProvider,
    #[error("no {0:?} reference camera")]
    MissingCamera(CameraVariant),
    #[error("avatar has no controller {0:?}")]
    MissingController(&'static str),
    #[error("avatar has no morph registry")]
    MissingMorphRegistry,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TickError {
    #[error("retargeting failed: {0}")]
    Retarget(#[from] RetargetError),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// The camera was too far from the head; nothing was written.
    Gated,
    Retargeted { hands: usize },
}

/// Handles resolved from the [`Scene`] at startup.
pub struct Rig {
    pub provider: Box<dyn TrackingProvider>,
    pub camera: Box<dyn ReferenceCamera>,
    pub possessor: Option<Box<dyn Possessor>>,
    pub left_hand: Box<dyn Controller>,
    pub right_hand: Box<dyn Controller>,
    pub head: Box<dyn Tracked>,
    pub morphs: Box<dyn MorphRegistry>,
}

impl Rig {
    pub fn resolve(scene: &dyn Scene) -> Result<Self, InitError> {
        let provider = scene
            .tracking_provider()
            .ok_or(InitError::MissingTrackingProvider)?;

        let variant = scene.camera_variant();
        let camera = scene
            .reference_camera(variant)
            .ok_or(InitError::MissingCamera(variant))?;
        debug!("using {variant:?} camera as reference");

        let possessor = scene.possessor(POSSESSOR);
        if possessor.is_none() {
            warn!("no {POSSESSOR:?} possessor, camera recess will be unavailable");
        }

        let controller = |id: &'static str| {
            scene
                .controller(id)
                .ok_or(InitError::MissingController(id))
        };

        Ok(Self {
            provider,
            camera,
            possessor,
            left_hand: controller(LEFT_HAND_CONTROL)?,
            right_hand: controller(RIGHT_HAND_CONTROL)?,
            head: scene
                .tracked(HEAD_CONTROL)
                .ok_or(InitError::MissingController(HEAD_CONTROL))?,
            morphs: scene
                .morph_registry()
                .ok_or(InitError::MissingMorphRegistry)?,
        })
    }
}

/// Runs the retargeting once per fixed tick of the host.
pub struct FrameDriver {
    settings: Arc<Settings>,
    rig: Rig,
}

impl FrameDriver {
    pub fn new(rig: Rig, settings: Arc<Settings>) -> Self {
        Self { settings, rig }
    }

    /// Resolves everything from `scene` and zeroes the fist morphs.
    pub fn initialize(scene: &dyn Scene, settings: Arc<Settings>) -> Result<Self, InitError> {
        let mut driver = Self::new(Rig::resolve(scene)?, settings);

        let morphs = driver.rig.morphs.as_mut();
        for name in FIST_MORPHS {
            match morphs.resolve(name) {
                Some(key) => morphs.set_value(key, 0.0),
                None => warn!("no morph named {name:?} to reset"),
            }
        }

        info!("Hand possession ready");
        Ok(driver)
    }

    pub fn settings(&self) -> &Arc<Settings> {
        &self.settings
    }

    pub fn camera_head_distance(&self) -> f32 {
        self.rig.camera.position().distance(self.rig.head.position())
    }

    /// One fixed step. Nothing is written when the gate is closed, and controllers and morphs
    /// keep their last values.
    pub fn tick(&mut self) -> Result<TickOutcome, TickError> {
        tracy_span!("FrameDriver::tick");

        let gate = ProximityGate::new(self.settings.activation_distance.get());
        if !gate.is_open(self.rig.camera.position(), self.rig.head.position()) {
            trace!("gate closed ({} > {})", self.camera_head_distance(), gate.threshold);
            return Ok(TickOutcome::Gated);
        }

        let frame = self.rig.provider.current_frame();
        let lateral_offset = self.settings.lateral_offset.get();

        let mut seen = [false; 2];
        for hand in &frame.hands {
            let side = hand.chirality;
            if std::mem::replace(&mut seen[side as usize], true) {
                warn_once!("frame {} has more than one {:?} hand", frame.id, side);
            }

            let controller = match side {
                Chirality::Left => self.rig.left_hand.as_mut(),
                Chirality::Right => self.rig.right_hand.as_mut(),
            };
            retarget_hand(
                controller,
                hand,
                self.rig.morphs.as_mut(),
                &FingerMorphs::of(side),
                Mirror::of(side),
                lateral_offset,
            )?;
        }

        Ok(TickOutcome::Retargeted {
            hands: frame.hands.len(),
        })
    }

    /// Pulls the camera back along its view direction while the possessor stays put.
    pub fn set_camera_recess(&mut self, recess: f32) {
        let Some(possessor) = self.rig.possessor.as_mut() else {
            error!("no {POSSESSOR:?} possessor, camera recess not applied");
            return;
        };

        let held = possessor.position();
        let position = held - self.rig.camera.rotation() * Vec3::Z * recess;
        self.rig.camera.set_position(position);
        possessor.set_position(held);
    }

    pub fn set_near_clip(&mut self, distance: f32) {
        self.rig.camera.set_near_clip_plane(distance);
    }
}
