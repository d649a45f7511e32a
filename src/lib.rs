//! # Shift Register Simulator
//!
//! A clocked model of the four classic shift-register configurations:
//! serial-in/serial-out, serial-in/parallel-out, parallel-in/serial-out and
//! parallel-in/parallel-out.
//!
//! All four share one state machine, [`ShiftRegisterSimulator`], selected by
//! [`Mode`]. A front-end stages inputs, calls [`ShiftRegisterSimulator::pulse`]
//! and redraws from [`ShiftRegisterSimulator::snapshot`].

pub mod logic;
pub mod sim;
pub mod script;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use logic::{Bit, Register, parse_bits};
pub use sim::{ShiftRegisterSimulator, SimConfig, SimError, Mode, LoadShift, Snapshot, Transition};
pub use script::{parse_script, load_script, Script, ScriptError, ScriptEvent};
