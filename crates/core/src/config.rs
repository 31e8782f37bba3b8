//! Tunables for arm-swing locomotion.
//!
//! Values are set once by the host and treated as read-only by the sampler.
//! They can be built in code, or loaded from TOML:
//!
//! ```
//! use arm_swing_core::ArmSwingConfig;
//!
//! let config = ArmSwingConfig::from_toml_str(
//!     r#"
//!     speed = 3.5
//!     gravity = [0.0, -9.81, 0.0]
//!     "#,
//! )
//! .unwrap();
//! assert_eq!(config.speed, 3.5);
//! assert_eq!(config.damping, 0.8);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core_types::Vec3;
use crate::error::ArmSwingError;

/// Default forward speed in meters per second.
pub const DEFAULT_SPEED: f32 = 5.0;

/// Standard gravity (m/s²), applied along -up.
pub const STANDARD_GRAVITY: f32 = 9.81;

/// Per-hand scale applied to each frame's displacement magnitude.
pub const DEFAULT_DAMPING: f32 = 0.8;

/// Swing speed at or above which the player is considered to be swinging.
pub const DEFAULT_SWING_THRESHOLD: f32 = 0.05;

/// Configuration for arm-swing locomotion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArmSwingConfig {
    /// Forward movement speed (units/second) while swinging.
    pub speed: f32,

    /// Gravity displacement rate applied every frame (units/second).
    pub gravity: Vec3,

    /// Scale applied to each hand's per-frame displacement magnitude.
    pub damping: f32,

    /// Minimum swing speed that produces forward movement.
    pub swing_threshold: f32,

    /// World up axis. The head forward vector is projected onto the plane
    /// with this normal.
    pub up: Vec3,
}

impl Default for ArmSwingConfig {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            gravity: Vec3::new(0.0, -STANDARD_GRAVITY, 0.0),
            damping: DEFAULT_DAMPING,
            swing_threshold: DEFAULT_SWING_THRESHOLD,
            up: Vec3::y(),
        }
    }
}

impl ArmSwingConfig {
    /// Set the forward speed.
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    /// Set the gravity vector.
    pub fn with_gravity(mut self, gravity: Vec3) -> Self {
        self.gravity = gravity;
        self
    }

    /// Check that every value is usable by the sampler.
    ///
    /// # Errors
    ///
    /// Returns [`ArmSwingError::InvalidConfig`] naming the first field that is
    /// non-finite, negative where a magnitude is expected, or (for `up`) zero.
    pub fn validate(&self) -> Result<(), ArmSwingError> {
        check_magnitude("speed", self.speed)?;
        check_magnitude("damping", self.damping)?;
        check_magnitude("swing_threshold", self.swing_threshold)?;

        if !self.gravity.iter().all(|c| c.is_finite()) {
            return Err(ArmSwingError::invalid_config(
                "gravity",
                format!("must be finite, got {:?}", self.gravity.as_slice()),
            ));
        }

        if !self.up.iter().all(|c| c.is_finite()) || self.up.norm_squared() < f32::EPSILON {
            return Err(ArmSwingError::invalid_config(
                "up",
                format!("must be finite and non-zero, got {:?}", self.up.as_slice()),
            ));
        }

        Ok(())
    }

    /// Parse and validate a configuration from TOML text.
    ///
    /// Missing keys fall back to [`ArmSwingConfig::default`].
    ///
    /// # Errors
    ///
    /// Returns [`ArmSwingError::ConfigParse`] for malformed TOML and
    /// [`ArmSwingError::InvalidConfig`] if a value fails validation.
    pub fn from_toml_str(text: &str) -> Result<Self, ArmSwingError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ArmSwingError::ConfigRead`] if the file cannot be read, and
    /// the errors of [`ArmSwingConfig::from_toml_str`] otherwise.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ArmSwingError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ArmSwingError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

fn check_magnitude(field: &'static str, value: f32) -> Result<(), ArmSwingError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ArmSwingError::invalid_config(
            field,
            format!("must be finite and non-negative, got {value}"),
        ));
    }
    Ok(())
}
