//! Simulator construction parameters.

use serde::{Serialize, Deserialize};
use crate::sim::{Mode, SimError};

/// Default register width, matching the classic 4-bit trainer boards.
pub const DEFAULT_WIDTH: usize = 4;

/// Everything needed to build a [`ShiftRegisterSimulator`](crate::ShiftRegisterSimulator).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    /// Register kind.
    pub mode: Mode,
    /// Number of flip-flops (must be at least 1).
    pub width: usize,
}

impl SimConfig {
    /// Create a config for `mode` at the default width.
    pub fn new(mode: Mode) -> Self {
        Self { mode, width: DEFAULT_WIDTH }
    }

    /// Override the width.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Check the parameters without building anything.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.width == 0 {
            return Err(SimError::InvalidConfiguration(
                "register width must be a positive integer".into(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON config such as `{"mode":"piso","width":8}`.
    pub fn from_json(text: &str) -> Result<Self, SimError> {
        let config: SimConfig = serde_json::from_str(text)
            .map_err(|e| SimError::InvalidConfiguration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::new(Mode::default())
    }
}
