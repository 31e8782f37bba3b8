//! Error types for rig initialization and configuration loading.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// A collaborator the locomotion provider needs before it can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RigReference {
    /// Character-collider mover that receives displacement commands.
    CharacterMover,
    /// Head camera supplying the forward direction.
    HeadCamera,
    /// Left hand position source.
    LeftHand,
    /// Right hand position source.
    RightHand,
    /// Left grip analog input.
    LeftGrip,
    /// Right grip analog input.
    RightGrip,
}

impl RigReference {
    /// Every reference, in the order they are checked during init.
    pub const ALL: [RigReference; 6] = [
        RigReference::CharacterMover,
        RigReference::HeadCamera,
        RigReference::LeftHand,
        RigReference::RightHand,
        RigReference::LeftGrip,
        RigReference::RightGrip,
    ];
}

impl fmt::Display for RigReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RigReference::CharacterMover => "character mover",
            RigReference::HeadCamera => "head camera",
            RigReference::LeftHand => "left hand",
            RigReference::RightHand => "right hand",
            RigReference::LeftGrip => "left grip action",
            RigReference::RightGrip => "right grip action",
        };
        f.write_str(name)
    }
}

/// Errors raised while building an arm-swing provider.
#[derive(Debug, Error)]
pub enum ArmSwingError {
    /// One or more rig collaborators were never bound.
    #[error("missing rig references: {}", join_references(.0))]
    MissingReferences(Vec<RigReference>),

    /// A configuration value is outside its valid range.
    #[error("invalid config field `{field}`: {reason}")]
    InvalidConfig {
        /// Name of the offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// The configuration text is not valid TOML for [`crate::ArmSwingConfig`].
    #[error("failed to parse arm-swing config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The configuration file could not be read.
    #[error("failed to read arm-swing config {}: {source}", .path.display())]
    ConfigRead {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

impl ArmSwingError {
    pub(crate) fn invalid_config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

fn join_references(references: &[RigReference]) -> String {
    references
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_references_message_lists_all() {
        let err = ArmSwingError::MissingReferences(vec![
            RigReference::HeadCamera,
            RigReference::RightGrip,
        ]);
        assert_eq!(
            err.to_string(),
            "missing rig references: head camera, right grip action"
        );
    }

    #[test]
    fn test_invalid_config_message() {
        let err = ArmSwingError::invalid_config("speed", "must be finite, got NaN");
        assert_eq!(
            err.to_string(),
            "invalid config field `speed`: must be finite, got NaN"
        );
    }
}
