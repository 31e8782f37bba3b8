//! C-compatible mirrors of the core frame and configuration types.

use arm_swing_core::{ArmSwingConfig, FrameInput, FrameReport, Vec3};

/// C-compatible 3D vector.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ArmSwingVec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl From<ArmSwingVec3> for Vec3 {
    fn from(v: ArmSwingVec3) -> Self {
        Vec3::new(v.x, v.y, v.z)
    }
}

impl From<Vec3> for ArmSwingVec3 {
    fn from(v: Vec3) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

/// Locomotion configuration passed to `arm_swing_new`.
///
/// Start from `arm_swing_default_config()` and override fields as needed.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArmSwingConfigFFI {
    /// Forward speed (units/second) while swinging.
    pub speed: f32,
    /// Gravity displacement rate applied every frame (units/second).
    pub gravity: ArmSwingVec3,
    /// Scale applied to each hand's per-frame displacement magnitude.
    pub damping: f32,
    /// Minimum swing speed that produces forward movement.
    pub swing_threshold: f32,
    /// World up axis used to flatten the head direction.
    pub up: ArmSwingVec3,
}

impl From<ArmSwingConfig> for ArmSwingConfigFFI {
    fn from(config: ArmSwingConfig) -> Self {
        Self {
            speed: config.speed,
            gravity: config.gravity.into(),
            damping: config.damping,
            swing_threshold: config.swing_threshold,
            up: config.up.into(),
        }
    }
}

impl From<ArmSwingConfigFFI> for ArmSwingConfig {
    fn from(config: ArmSwingConfigFFI) -> Self {
        Self {
            speed: config.speed,
            gravity: config.gravity.into(),
            damping: config.damping,
            swing_threshold: config.swing_threshold,
            up: config.up.into(),
        }
    }
}

/// Rig state sampled by the host for one frame.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArmSwingFrame {
    pub left_hand: ArmSwingVec3,
    pub right_hand: ArmSwingVec3,
    /// Head camera forward unit vector.
    pub head_forward: ArmSwingVec3,
    /// Left grip value in [0, 1]; only exactly 1.0 counts as held.
    pub left_grip: f32,
    /// Right grip value in [0, 1]; only exactly 1.0 counts as held.
    pub right_grip: f32,
}

impl From<ArmSwingFrame> for FrameInput {
    fn from(frame: ArmSwingFrame) -> Self {
        Self {
            left_hand: frame.left_hand.into(),
            right_hand: frame.right_hand.into(),
            left_grip: frame.left_grip,
            right_grip: frame.right_grip,
            head_forward: frame.head_forward.into(),
        }
    }
}

/// Displacements the host must apply to its character controller.
///
/// When `has_locomotion` is true, move by `locomotion` first, then by `gravity`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ArmSwingCommands {
    pub swing_speed: f32,
    pub grips_engaged: bool,
    pub has_locomotion: bool,
    pub locomotion: ArmSwingVec3,
    pub gravity: ArmSwingVec3,
}

impl From<FrameReport> for ArmSwingCommands {
    fn from(report: FrameReport) -> Self {
        Self {
            swing_speed: report.swing_speed,
            grips_engaged: report.grips_engaged,
            has_locomotion: report.locomotion.is_some(),
            locomotion: report.locomotion.map(Into::into).unwrap_or_default(),
            gravity: report.gravity.into(),
        }
    }
}
