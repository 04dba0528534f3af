//! Controller configuration parameters
//!
//! Board-level knobs only.  Dwell lengths and transitions come from the
//! phase table; `second_ms` only sets how long each of those seconds
//! lasts on the delay adapter.

use serde::{Deserialize, Serialize};

/// Core controller configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    // --- Wiring ---
    /// Input lines read LOW when active (buttons to ground, pulled up).
    pub inputs_active_low: bool,
    /// Lamps light when their output is driven LOW (sinking drivers).
    pub outputs_active_low: bool,

    // --- Reporting ---
    /// Emit a telemetry snapshot every N completed cycles (0 = never)
    pub telemetry_every_cycles: u32,

    // --- Timing ---
    /// Length of one dwell second on the delay adapter, in milliseconds.
    /// Allows stretching a bench setup; never shorter than real time.
    pub second_ms: u32,
}

impl ControllerConfig {
    pub const MIN_SECOND_MS: u32 = 1000;
    pub const MAX_SECOND_MS: u32 = 2000;

    /// Check every field against its allowed range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.second_ms < Self::MIN_SECOND_MS {
            return Err(ConfigError::ValidationFailed(
                "second_ms below 1000 would shorten dwell times",
            ));
        }
        if self.second_ms > Self::MAX_SECOND_MS {
            return Err(ConfigError::ValidationFailed("second_ms above 2000"));
        }
        Ok(())
    }

    /// Parse a JSON document and validate it.  Missing fields take their
    /// defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|e| {
            log::warn!("config: rejected JSON: {e}");
            ConfigError::Malformed
        })?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            // Wiring
            inputs_active_low: false,
            outputs_active_low: false,

            // Reporting
            telemetry_every_cycles: 10,

            // Timing
            second_ms: 1000,
        }
    }
}

/// Errors from loading or validating a [`ControllerConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// The document could not be parsed.
    Malformed,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::Malformed => write!(f, "malformed config"),
        }
    }
}
