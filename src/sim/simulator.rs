//! The shift-register state machine.
//!
//! Implements the per-pulse transition for every [`Mode`] and the input
//! staging operations a front-end calls between pulses.

use std::collections::VecDeque;
use serde::{Serialize, Deserialize};
use thiserror::Error;
use tracing::{event, Level};
use crate::logic::{Bit, Register, parse_bits};
use crate::sim::{Mode, LoadShift, SimConfig, Snapshot};

/// What a single clock pulse did to the register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Transition {
    /// Every bit moved one place toward QN.
    Shifted {
        /// Bit that entered Q1.
        incoming: Bit,
        /// Bit that left QN.
        outgoing: Bit,
    },
    /// The parallel input was copied into the register.
    Loaded {
        /// QN as it was before the load.
        previous_out: Bit,
    },
}

/// A clocked shift register of one of the four classic kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShiftRegisterSimulator {
    mode: Mode,
    register: Register,
    /// Pending serial bits (SISO/SIPO), front enters next.
    queue: VecDeque<Bit>,
    /// Parallel input lines D1..DN (PISO/PIPO).
    parallel_in: Vec<Bit>,
    /// Serial input line used once PISO is shifting.
    serial_in: Bit,
    load_shift: LoadShift,
    /// Clock pulses applied since construction.
    pulses: u64,
}

impl ShiftRegisterSimulator {
    /// Create a simulator with a cleared register.
    pub fn new(mode: Mode, width: usize) -> Result<Self, SimError> {
        Self::with_config(&SimConfig { mode, width })
    }

    /// Create a simulator from a validated config.
    pub fn with_config(config: &SimConfig) -> Result<Self, SimError> {
        config.validate()?;
        event!(
            Level::DEBUG,
            mode = %config.mode,
            width = config.width,
            "creating shift register"
        );
        Ok(Self::cleared(config))
    }

    /// Build from a config already known to be valid.
    fn cleared(config: &SimConfig) -> Self {
        Self {
            mode: config.mode,
            register: Register::zeroed(config.width),
            queue: VecDeque::new(),
            parallel_in: vec![Bit::Zero; config.width],
            serial_in: Bit::Zero,
            load_shift: LoadShift::Load,
            pulses: 0,
        }
    }

    /// Register kind.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Number of flip-flops.
    pub fn width(&self) -> usize {
        self.register.width()
    }

    /// Current register contents.
    pub fn register(&self) -> &Register {
        &self.register
    }

    /// Clock pulses applied so far. Reloading a serial string does not
    /// reset this.
    pub fn pulses(&self) -> u64 {
        self.pulses
    }

    /// State of the PISO load/shift control. Always `Load` for other modes
    /// since they never consult it.
    pub fn load_shift(&self) -> LoadShift {
        self.load_shift
    }

    /// Serial bits not yet shifted in.
    pub fn pending_serial(&self) -> impl Iterator<Item = Bit> + '_ {
        self.queue.iter().copied()
    }

    /// Current parallel input lines.
    pub fn parallel_input(&self) -> &[Bit] {
        &self.parallel_in
    }

    /// Bit that will enter Q1 on the next shift, for modes that shift.
    pub fn next_serial_in(&self) -> Option<Bit> {
        match self.mode {
            Mode::Siso | Mode::Sipo => {
                Some(self.queue.front().copied().unwrap_or(Bit::Zero))
            }
            Mode::Piso => Some(self.serial_in),
            Mode::Pipo => None,
        }
    }

    /// Replace the serial input queue with `bits` and clear the register.
    ///
    /// On error nothing changes.
    pub fn set_serial_string(&mut self, bits: &str) -> Result<(), SimError> {
        self.require(self.mode.serial_input(), "set_serial_string")?;
        let parsed = parse_bits(bits)?;

        self.queue = parsed.into();
        self.register.clear();
        event!(
            Level::DEBUG,
            queued = self.queue.len(),
            "loaded serial input, register cleared"
        );
        Ok(())
    }

    /// Set parallel input line `index` (0 = D1). Takes effect on the next
    /// pulse.
    pub fn set_parallel_bit(&mut self, index: usize, value: u8) -> Result<(), SimError> {
        self.require(self.mode.parallel_input(), "set_parallel_bit")?;
        if index >= self.width() {
            return Err(SimError::IndexOutOfRange {
                index: i128::try_from(index).unwrap_or(i128::MAX),
                width: self.width(),
            });
        }
        let bit = Bit::try_from(value)?;
        self.parallel_in[index] = bit;
        event!(Level::TRACE, index, bit = %bit, "parallel input staged");
        Ok(())
    }

    /// Set every parallel input line at once from a bit string of exactly
    /// `width` characters.
    pub fn set_parallel_word(&mut self, bits: &str) -> Result<(), SimError> {
        self.require(self.mode.parallel_input(), "set_parallel_word")?;
        let parsed = parse_bits(bits)?;
        if parsed.len() != self.width() {
            return Err(SimError::InvalidInput(format!(
                "expected {} parallel bits, got {}",
                self.width(),
                parsed.len()
            )));
        }
        self.parallel_in = parsed;
        event!(Level::TRACE, "parallel input word staged");
        Ok(())
    }

    /// Set the PISO serial input line.
    ///
    /// Accepted while still in `Load`; the bit is only consumed once the
    /// register is shifting.
    pub fn set_serial_bit(&mut self, value: u8) -> Result<(), SimError> {
        self.require(self.mode == Mode::Piso, "set_serial_bit")?;
        self.serial_in = Bit::try_from(value)?;
        event!(Level::TRACE, bit = %self.serial_in, "serial input staged");
        Ok(())
    }

    /// Apply one clock pulse.
    pub fn pulse(&mut self) -> Transition {
        let transition = match self.mode {
            Mode::Siso | Mode::Sipo => {
                let incoming = self.queue.pop_front().unwrap_or(Bit::Zero);
                self.shift(incoming)
            }
            Mode::Pipo => self.parallel_load(),
            Mode::Piso => match self.load_shift {
                LoadShift::Load => {
                    let t = self.parallel_load();
                    self.load_shift = LoadShift::Shift;
                    event!(Level::DEBUG, "PISO switched to SHIFT");
                    t
                }
                LoadShift::Shift => self.shift(self.serial_in),
            },
        };
        self.pulses += 1;
        event!(
            Level::DEBUG,
            pulse = self.pulses,
            register = %self.register,
            ?transition,
            "clock pulse"
        );
        transition
    }

    /// Read-only view of everything a front-end needs to draw.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }

    fn shift(&mut self, incoming: Bit) -> Transition {
        let outgoing = self.register.shift_in(incoming);
        Transition::Shifted { incoming, outgoing }
    }

    fn parallel_load(&mut self) -> Transition {
        let previous_out = self.register.serial_out();
        self.register.load(&self.parallel_in);
        Transition::Loaded { previous_out }
    }

    fn require(&self, supported: bool, operation: &'static str) -> Result<(), SimError> {
        if supported {
            Ok(())
        } else {
            Err(SimError::UnsupportedOperation { operation, mode: self.mode })
        }
    }
}

impl Default for ShiftRegisterSimulator {
    fn default() -> Self {
        Self::cleared(&SimConfig::default())
    }
}

/// Errors reported by simulator operations. None of them change state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("index {index} out of range for {width}-bit register")]
    IndexOutOfRange { index: i128, width: usize },

    #[error("{operation} is not supported by a {mode} register")]
    UnsupportedOperation { operation: &'static str, mode: Mode },
}
