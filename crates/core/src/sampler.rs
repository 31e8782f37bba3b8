//! Swing detection and gated locomotion over plain per-frame data.
//!
//! `ArmSwingSampler` owns the only state the locomotion needs: the hand
//! positions sampled at the end of the previous frame. Each [`step`] turns the
//! current frame's inputs into the displacements the host should hand to its
//! character mover.
//!
//! [`step`]: ArmSwingSampler::step

use tracing::trace;

use crate::config::ArmSwingConfig;
use crate::core_types::{project_on_plane, Vec3};

/// Analog grip value that counts as a full press. Compared exactly.
pub const FULL_GRIP: f32 = 1.0;

/// Hand positions captured at the end of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HandSamples {
    /// Left hand world position.
    pub left: Vec3,
    /// Right hand world position.
    pub right: Vec3,
}

/// Everything the sampler reads from the rig in one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    /// Current left hand world position.
    pub left_hand: Vec3,
    /// Current right hand world position.
    pub right_hand: Vec3,
    /// Left grip analog value in `[0, 1]`.
    pub left_grip: f32,
    /// Right grip analog value in `[0, 1]`.
    pub right_grip: f32,
    /// Head camera forward unit vector.
    pub head_forward: Vec3,
}

/// Outcome of one locomotion frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Damped sum of both hands' displacement this frame.
    pub swing_speed: f32,
    /// Whether both grips were fully pressed.
    pub grips_engaged: bool,
    /// Horizontal displacement issued this frame, if the player was swinging.
    pub locomotion: Option<Vec3>,
    /// Gravity displacement, issued every frame.
    pub gravity: Vec3,
}

impl FrameReport {
    /// Sum of every displacement issued this frame.
    pub fn total_displacement(&self) -> Vec3 {
        self.locomotion.unwrap_or_else(Vec3::zeros) + self.gravity
    }
}

/// Damped swing speed for one frame.
///
/// Each hand contributes its displacement magnitude scaled by `damping`. The
/// value is computed fresh every frame; nothing carries over between frames.
#[inline]
pub fn swing_speed(left_delta: Vec3, right_delta: Vec3, damping: f32) -> f32 {
    left_delta.norm() * damping + right_delta.norm() * damping
}

/// Both grips must report exactly a full press. There is no deadzone.
#[inline]
pub fn grips_engaged(left_grip: f32, right_grip: f32) -> bool {
    left_grip == FULL_GRIP && right_grip == FULL_GRIP
}

/// Per-frame arm-swing state machine.
#[derive(Debug, Clone)]
pub struct ArmSwingSampler {
    config: ArmSwingConfig,
    previous: HandSamples,
}

impl ArmSwingSampler {
    /// Create a sampler seeded with the current hand positions.
    pub fn new(config: ArmSwingConfig, left_hand: Vec3, right_hand: Vec3) -> Self {
        Self {
            config,
            previous: HandSamples {
                left: left_hand,
                right: right_hand,
            },
        }
    }

    /// The configuration this sampler was built with.
    pub fn config(&self) -> &ArmSwingConfig {
        &self.config
    }

    /// Hand positions recorded at the end of the last step (or at creation).
    pub fn previous(&self) -> HandSamples {
        self.previous
    }

    /// Overwrite the previous samples without producing any motion.
    ///
    /// Use after teleporting or recentering the rig so the jump in tracked
    /// positions is not read as a swing on the next step.
    pub fn resync(&mut self, left_hand: Vec3, right_hand: Vec3) {
        self.previous = HandSamples {
            left: left_hand,
            right: right_hand,
        };
    }

    /// Advance one frame.
    ///
    /// Returns the displacements to issue, locomotion first (if any) and then
    /// gravity. The previous samples are replaced by this frame's hand
    /// positions whether or not the player moved.
    pub fn step(&mut self, input: &FrameInput, dt: f32) -> FrameReport {
        let left_delta = input.left_hand - self.previous.left;
        let right_delta = input.right_hand - self.previous.right;
        let swing_speed = swing_speed(left_delta, right_delta, self.config.damping);

        let grips_engaged = grips_engaged(input.left_grip, input.right_grip);

        let locomotion = (grips_engaged && swing_speed >= self.config.swing_threshold).then(|| {
            let direction = project_on_plane(input.head_forward, self.config.up);
            direction * (self.config.speed * dt)
        });

        let gravity = self.config.gravity * dt;

        trace!(
            swing_speed,
            grips_engaged,
            moving = locomotion.is_some(),
            dt,
            "arm-swing step"
        );

        self.resync(input.left_hand, input.right_hand);

        FrameReport {
            swing_speed,
            grips_engaged,
            locomotion,
            gravity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn frame(left_hand: Vec3, right_hand: Vec3, grip: f32) -> FrameInput {
        FrameInput {
            left_hand,
            right_hand,
            left_grip: grip,
            right_grip: grip,
            head_forward: Vec3::z(),
        }
    }

    fn at_origin() -> ArmSwingSampler {
        ArmSwingSampler::new(ArmSwingConfig::default(), Vec3::zeros(), Vec3::zeros())
    }

    #[test]
    fn test_swing_speed_damps_each_hand() {
        let speed = swing_speed(Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.5, 0.0), 0.8);
        assert_relative_eq!(speed, 1.2, epsilon = 1e-6);
    }

    #[test]
    fn test_grip_gate_requires_exact_full_press() {
        assert!(grips_engaged(1.0, 1.0));
        assert!(!grips_engaged(0.999, 1.0));
        assert!(!grips_engaged(1.0, 0.0));
        assert!(!grips_engaged(0.0, 0.0));
    }

    #[test]
    fn test_step_moves_along_head_forward_when_swinging() {
        let mut sampler = at_origin();
        let report = sampler.step(&frame(Vec3::new(1.0, 0.0, 0.0), Vec3::zeros(), 1.0), 0.1);

        assert_relative_eq!(report.swing_speed, 0.8, epsilon = 1e-6);
        assert!(report.grips_engaged);
        let locomotion = report.locomotion.expect("swinging with full grips moves");
        assert_relative_eq!(locomotion, Vec3::new(0.0, 0.0, 0.5), epsilon = 1e-6);
        assert_relative_eq!(report.gravity, Vec3::new(0.0, -0.981, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_step_does_not_accumulate_swing_between_frames() {
        let mut sampler = at_origin();
        sampler.step(&frame(Vec3::new(1.0, 0.0, 0.0), Vec3::zeros(), 1.0), 0.016);
        let report = sampler.step(&frame(Vec3::new(1.0, 0.0, 0.0), Vec3::zeros(), 1.0), 0.016);

        assert_eq!(report.swing_speed, 0.0);
        assert!(report.locomotion.is_none());
    }

    #[test]
    fn test_looking_straight_down_yields_no_horizontal_motion() {
        let mut sampler = at_origin();
        let mut input = frame(Vec3::new(1.0, 0.0, 0.0), Vec3::zeros(), 1.0);
        input.head_forward = -Vec3::y();
        let report = sampler.step(&input, 0.1);

        let locomotion = report.locomotion.expect("gate and threshold still pass");
        assert_relative_eq!(locomotion.norm(), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_resync_discards_jump() {
        let mut sampler = at_origin();
        let teleported = Vec3::new(50.0, 0.0, 50.0);
        sampler.resync(teleported, teleported);

        let report = sampler.step(&frame(teleported, teleported, 1.0), 0.016);
        assert_eq!(report.swing_speed, 0.0);
        assert!(report.locomotion.is_none());
    }

    #[test]
    fn test_total_displacement_sums_commands() {
        let report = FrameReport {
            swing_speed: 1.0,
            grips_engaged: true,
            locomotion: Some(Vec3::new(0.0, 0.0, 0.5)),
            gravity: Vec3::new(0.0, -0.1, 0.0),
        };
        assert_eq!(report.total_displacement(), Vec3::new(0.0, -0.1, 0.5));
    }
}
