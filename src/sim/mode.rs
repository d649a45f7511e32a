//! Register kinds and the PISO load/shift control line.

use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};
use crate::sim::SimError;

/// Which of the four classic configurations a simulator models.
///
/// Fixed for the lifetime of a simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Serial-in, serial-out
    #[default]
    Siso,
    /// Serial-in, parallel-out
    Sipo,
    /// Parallel-in, serial-out
    Piso,
    /// Parallel-in, parallel-out
    Pipo,
}

impl Mode {
    /// All modes, in menu order.
    pub const ALL: [Mode; 4] = [Mode::Siso, Mode::Sipo, Mode::Piso, Mode::Pipo];

    /// Short upper-case name ("SISO").
    pub const fn name(self) -> &'static str {
        match self {
            Mode::Siso => "SISO",
            Mode::Sipo => "SIPO",
            Mode::Piso => "PISO",
            Mode::Pipo => "PIPO",
        }
    }

    /// Human readable title, as shown in a menu.
    pub const fn title(self) -> &'static str {
        match self {
            Mode::Siso => "Serial-In, Serial-Out (SISO)",
            Mode::Sipo => "Serial-In, Parallel-Out (SIPO)",
            Mode::Piso => "Parallel-In, Serial-Out (PISO)",
            Mode::Pipo => "Parallel-In, Parallel-Out (PIPO)",
        }
    }

    /// Accepts a queued serial input string.
    pub const fn serial_input(self) -> bool {
        matches!(self, Mode::Siso | Mode::Sipo)
    }

    /// Accepts a parallel input vector.
    pub const fn parallel_input(self) -> bool {
        matches!(self, Mode::Piso | Mode::Pipo)
    }

    /// Exposes every Q line to the outside.
    pub const fn parallel_output(self) -> bool {
        matches!(self, Mode::Sipo | Mode::Pipo)
    }

    /// Exposes QN as a serial output line.
    pub const fn serial_output(self) -> bool {
        matches!(self, Mode::Siso | Mode::Piso)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "siso" => Ok(Mode::Siso),
            "sipo" => Ok(Mode::Sipo),
            "piso" => Ok(Mode::Piso),
            "pipo" => Ok(Mode::Pipo),
            other => Err(SimError::InvalidConfiguration(format!(
                "unknown register mode '{}' (expected siso, sipo, piso or pipo)",
                other
            ))),
        }
    }
}

/// State of the PISO load/shift control.
///
/// Starts at `Load` and moves to `Shift` on the first pulse. There is no
/// way back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LoadShift {
    /// Next pulse copies the parallel input into the register.
    #[default]
    Load,
    /// Every pulse shifts the serial-input bit in.
    Shift,
}

impl fmt::Display for LoadShift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadShift::Load => f.write_str("LOAD"),
            LoadShift::Shift => f.write_str("SHIFT"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("SISO".parse::<Mode>().unwrap(), Mode::Siso);
        assert_eq!("piso".parse::<Mode>().unwrap(), Mode::Piso);
        assert_eq!(" Pipo ".parse::<Mode>().unwrap(), Mode::Pipo);
        assert!(matches!(
            "sopi".parse::<Mode>(),
            Err(SimError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_name_roundtrip() {
        for mode in Mode::ALL {
            assert_eq!(mode.name().parse::<Mode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_capabilities() {
        // Every mode has exactly one kind of input
        for mode in Mode::ALL {
            assert_ne!(mode.serial_input(), mode.parallel_input(), "{}", mode);
            assert_ne!(mode.serial_output(), mode.parallel_output(), "{}", mode);
        }
        assert!(Mode::Sipo.serial_input() && Mode::Sipo.parallel_output());
        assert!(Mode::Piso.parallel_input() && Mode::Piso.serial_output());
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Mode::Sipo).unwrap(), "\"sipo\"");
        assert_eq!(serde_json::to_string(&LoadShift::Shift).unwrap(), "\"SHIFT\"");
    }
}
