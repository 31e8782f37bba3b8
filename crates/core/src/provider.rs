//! The arm-swing component bound to a player rig.
//!
//! `ArmSwingProvider` is created once with [`ArmSwingProvider::init`] and then
//! driven by the host's frame loop through [`ArmSwingProvider::update`].
//! Initialization fails fast when any rig reference is missing, so `update`
//! always has a complete rig to work with.

use tracing::{debug, error};

use crate::config::ArmSwingConfig;
use crate::core_types::Vec3;
use crate::error::ArmSwingError;
use crate::rig::{CharacterMover, GripInput, HandTracker, HeadCamera, RigBindings};
use crate::sampler::{ArmSwingSampler, FrameInput, FrameReport, HandSamples};

/// Converts hand swinging into forward movement of a character mover.
pub struct ArmSwingProvider {
    mover: Box<dyn CharacterMover>,
    head_camera: Box<dyn HeadCamera>,
    left_hand: Box<dyn HandTracker>,
    right_hand: Box<dyn HandTracker>,
    left_grip: Box<dyn GripInput>,
    right_grip: Box<dyn GripInput>,
    sampler: ArmSwingSampler,
}

impl ArmSwingProvider {
    /// Bind the rig and seed the hand samples from the current hand positions.
    ///
    /// Each missing reference is logged before failing, so a misconfigured
    /// rig reports everything that is wrong in one go.
    ///
    /// # Errors
    ///
    /// - [`ArmSwingError::InvalidConfig`] if `config` fails validation. Missing
    ///   references are still logged first.
    /// - [`ArmSwingError::MissingReferences`] listing every unbound reference.
    pub fn init(bindings: RigBindings, config: ArmSwingConfig) -> Result<Self, ArmSwingError> {
        let missing = bindings.missing();
        for reference in &missing {
            error!("no {reference} assigned to arm-swing provider");
        }

        config.validate()?;

        let RigBindings {
            mover: Some(mover),
            head_camera: Some(head_camera),
            left_hand: Some(left_hand),
            right_hand: Some(right_hand),
            left_grip: Some(left_grip),
            right_grip: Some(right_grip),
        } = bindings
        else {
            return Err(ArmSwingError::MissingReferences(missing));
        };

        let sampler = ArmSwingSampler::new(config, left_hand.position(), right_hand.position());
        debug!(?config, "arm-swing provider initialized");

        Ok(Self {
            mover,
            head_camera,
            left_hand,
            right_hand,
            left_grip,
            right_grip,
            sampler,
        })
    }

    /// Run one frame: sample the rig, then issue locomotion (when swinging
    /// with both grips held) followed by gravity to the mover.
    pub fn update(&mut self, dt: f32) -> FrameReport {
        let input = self.read_frame();
        let report = self.sampler.step(&input, dt);

        if let Some(locomotion) = report.locomotion {
            self.mover.move_by(locomotion);
        }
        self.mover.move_by(report.gravity);

        report
    }

    /// Re-seed the hand samples from the current hand positions without
    /// moving. Call after teleporting or recentering the rig.
    pub fn resync(&mut self) {
        let left = self.left_hand.position();
        let right = self.right_hand.position();
        self.sampler.resync(left, right);
    }

    /// Hand positions sampled at the end of the last update.
    pub fn previous_samples(&self) -> HandSamples {
        self.sampler.previous()
    }

    /// Active configuration.
    pub fn config(&self) -> &ArmSwingConfig {
        self.sampler.config()
    }

    fn read_frame(&self) -> FrameInput {
        FrameInput {
            left_hand: self.left_hand.position(),
            right_hand: self.right_hand.position(),
            left_grip: self.left_grip.read_value(),
            right_grip: self.right_grip.read_value(),
            head_forward: self.head_forward(),
        }
    }

    fn head_forward(&self) -> Vec3 {
        self.head_camera.forward()
    }
}

impl std::fmt::Debug for ArmSwingProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArmSwingProvider")
            .field("sampler", &self.sampler)
            .finish_non_exhaustive()
    }
}
