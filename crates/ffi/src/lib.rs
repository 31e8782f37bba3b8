//! C ABI for driving arm-swing locomotion from a game engine.
//!
//! The host owns the rig (hands, grips, head camera, character controller)
//! and forwards samples each tick; this crate returns the displacements to
//! apply. See [`ArmSwingInstance`] for an engine example.

mod error;
mod helpers;
mod instance;
mod types;

pub use error::{arm_swing_get_last_error, arm_swing_get_last_error_code, ArmSwingErrorCode};
pub use instance::{
    arm_swing_default_config, arm_swing_destroy, arm_swing_new, arm_swing_resync,
    arm_swing_update, ArmSwingInstance,
};
pub use types::{ArmSwingCommands, ArmSwingConfigFFI, ArmSwingFrame, ArmSwingVec3};
