//! Collaborators the locomotion provider drives or reads each frame.
//!
//! The provider never looks anything up itself. The host binds each
//! collaborator on a [`RigBindings`] and hands it over at init. Closures work
//! as collaborators too, which keeps small hosts and tests free of
//! boilerplate types:
//!
//! ```
//! use arm_swing_core::{RigBindings, Vec3};
//!
//! let bindings = RigBindings::new()
//!     .with_mover(|displacement: Vec3| println!("move {displacement:?}"))
//!     .with_head_camera(|| Vec3::z())
//!     .with_left_hand(|| Vec3::new(-0.3, 1.0, 0.2))
//!     .with_right_hand(|| Vec3::new(0.3, 1.0, 0.2))
//!     .with_left_grip(|| 1.0_f32)
//!     .with_right_grip(|| 1.0_f32);
//! assert!(bindings.missing().is_empty());
//! ```

use std::fmt;

use crate::core_types::Vec3;
use crate::error::RigReference;

/// A physics helper that moves the player while resolving collisions.
pub trait CharacterMover {
    /// Move by `displacement`, in world units.
    fn move_by(&mut self, displacement: Vec3);
}

/// The player's head camera.
pub trait HeadCamera {
    /// Forward-facing unit vector in world space.
    fn forward(&self) -> Vec3;
}

/// A tracked hand.
pub trait HandTracker {
    /// Current world position.
    fn position(&self) -> Vec3;
}

/// An analog grip binding.
pub trait GripInput {
    /// How fully the grip is pressed, in `[0, 1]`.
    fn read_value(&self) -> f32;
}

impl<F: FnMut(Vec3)> CharacterMover for F {
    fn move_by(&mut self, displacement: Vec3) {
        self(displacement);
    }
}

impl<F: Fn() -> Vec3> HeadCamera for F {
    fn forward(&self) -> Vec3 {
        self()
    }
}

impl<F: Fn() -> Vec3> HandTracker for F {
    fn position(&self) -> Vec3 {
        self()
    }
}

impl<F: Fn() -> f32> GripInput for F {
    fn read_value(&self) -> f32 {
        self()
    }
}

/// References to bind before the provider can run.
///
/// Every slot starts empty; [`RigBindings::missing`] reports which are still
/// unbound.
#[derive(Default)]
pub struct RigBindings {
    pub(crate) mover: Option<Box<dyn CharacterMover>>,
    pub(crate) head_camera: Option<Box<dyn HeadCamera>>,
    pub(crate) left_hand: Option<Box<dyn HandTracker>>,
    pub(crate) right_hand: Option<Box<dyn HandTracker>>,
    pub(crate) left_grip: Option<Box<dyn GripInput>>,
    pub(crate) right_grip: Option<Box<dyn GripInput>>,
}

impl RigBindings {
    /// Empty bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind the character mover.
    pub fn with_mover(mut self, mover: impl CharacterMover + 'static) -> Self {
        self.mover = Some(Box::new(mover));
        self
    }

    /// Bind the head camera.
    pub fn with_head_camera(mut self, camera: impl HeadCamera + 'static) -> Self {
        self.head_camera = Some(Box::new(camera));
        self
    }

    /// Bind the left hand tracker.
    pub fn with_left_hand(mut self, hand: impl HandTracker + 'static) -> Self {
        self.left_hand = Some(Box::new(hand));
        self
    }

    /// Bind the right hand tracker.
    pub fn with_right_hand(mut self, hand: impl HandTracker + 'static) -> Self {
        self.right_hand = Some(Box::new(hand));
        self
    }

    /// Bind the left grip action.
    pub fn with_left_grip(mut self, grip: impl GripInput + 'static) -> Self {
        self.left_grip = Some(Box::new(grip));
        self
    }

    /// Bind the right grip action.
    pub fn with_right_grip(mut self, grip: impl GripInput + 'static) -> Self {
        self.right_grip = Some(Box::new(grip));
        self
    }

    /// References that have not been bound, in [`RigReference::ALL`] order.
    pub fn missing(&self) -> Vec<RigReference> {
        RigReference::ALL
            .into_iter()
            .filter(|reference| !self.is_bound(*reference))
            .collect()
    }

    fn is_bound(&self, reference: RigReference) -> bool {
        match reference {
            RigReference::CharacterMover => self.mover.is_some(),
            RigReference::HeadCamera => self.head_camera.is_some(),
            RigReference::LeftHand => self.left_hand.is_some(),
            RigReference::RightHand => self.right_hand.is_some(),
            RigReference::LeftGrip => self.left_grip.is_some(),
            RigReference::RightGrip => self.right_grip.is_some(),
        }
    }
}

impl fmt::Debug for RigBindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RigBindings")
            .field("missing", &self.missing())
            .finish_non_exhaustive()
    }
}
