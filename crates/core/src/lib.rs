//! Arm-Swing Locomotion Core Library
//!
//! Converts repetitive hand-swinging motion of a VR player into forward
//! locomotion, gated by both grip buttons being fully pressed.
//!
//! ## Per-frame model
//!
//! Each frame the hands' displacement since the previous frame is turned into
//! a damped swing speed. While both grips are held and the swing speed reaches
//! the threshold, the player moves along the head's horizontal forward
//! direction. Gravity is applied every frame regardless.
//!
//! - [`ArmSwingSampler`] holds the per-frame state and works on plain data
//!   (used directly by the FFI layer).
//! - [`ArmSwingProvider`] binds the sampler to a rig of collaborators
//!   ([`CharacterMover`], [`HeadCamera`], [`HandTracker`], [`GripInput`]).

// Core types and utilities
pub mod core_types;

pub mod config;
pub mod error;
pub mod provider;
pub mod rig;
pub mod sampler;

// Re-export core types
pub use core_types::{project_on_plane, Vec3};

pub use config::ArmSwingConfig;
pub use error::{ArmSwingError, RigReference};
pub use provider::ArmSwingProvider;
pub use rig::{CharacterMover, GripInput, HandTracker, HeadCamera, RigBindings};
pub use sampler::{
    grips_engaged, swing_speed, ArmSwingSampler, FrameInput, FrameReport, HandSamples, FULL_GRIP,
};
