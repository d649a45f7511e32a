//! Clocked shift-register simulation.
//!
//! One state machine covers all four register kinds:
//! - SISO / SIPO: a queue of serial bits shifted in one per pulse
//! - PISO: a single parallel load, then serial shifting forever
//! - PIPO: a parallel load on every pulse

pub mod config;
pub mod mode;
pub mod simulator;
pub mod snapshot;

pub use config::SimConfig;
pub use mode::{Mode, LoadShift};
pub use simulator::{ShiftRegisterSimulator, SimError, Transition};
pub use snapshot::Snapshot;
