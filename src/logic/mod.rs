//! Binary storage primitives.
//!
//! This module provides the building blocks the simulator shifts around:
//! - [`Bit`] - A single flip-flop value (0 or 1)
//! - [`Register`] - A fixed-width chain of flip-flops, Q1 first

mod bit;
mod register;

pub use bit::{Bit, parse_bits};
pub use register::Register;
