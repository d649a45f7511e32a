//! Fixed-width chain of flip-flops.
//!
//! Index 0 is the first flip-flop (Q1, nearest the serial input) and
//! index `width - 1` is the last one (QN, the serial output tap).

use std::fmt;
use serde::{Serialize, Deserialize};
use crate::logic::Bit;

/// The flip-flop chain of a shift register.
///
/// The width is fixed at construction; every operation keeps it.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Register {
    /// Q1..QN
    bits: Vec<Bit>,
}

impl Register {
    /// Create a register of `width` flip-flops, all cleared.
    pub fn zeroed(width: usize) -> Self {
        Self { bits: vec![Bit::Zero; width] }
    }

    /// Number of flip-flops.
    #[inline]
    pub fn width(&self) -> usize {
        self.bits.len()
    }

    /// All bits, Q1 first.
    #[inline]
    pub fn bits(&self) -> &[Bit] {
        &self.bits
    }

    /// Get the bit held by flip-flop `index` (0 = Q1).
    #[inline]
    pub fn get(&self, index: usize) -> Option<Bit> {
        self.bits.get(index).copied()
    }

    /// The serial output tap (QN).
    #[inline]
    pub fn serial_out(&self) -> Bit {
        self.bits.last().copied().unwrap_or_default()
    }

    /// Shift every bit one position toward the output and put `incoming`
    /// into Q1. Returns the bit that fell off the end.
    pub fn shift_in(&mut self, incoming: Bit) -> Bit {
        match self.bits.pop() {
            Some(outgoing) => {
                self.bits.insert(0, incoming);
                outgoing
            }
            None => incoming,
        }
    }

    /// Parallel load: flip-flop `i` takes input line `i`.
    ///
    /// The width never changes. Lines past QN are ignored and flip-flops
    /// without a line keep their value.
    pub fn load(&mut self, inputs: &[Bit]) {
        for (slot, &bit) in self.bits.iter_mut().zip(inputs) {
            *slot = bit;
        }
    }

    /// Clear every flip-flop.
    pub fn clear(&mut self) {
        self.bits.fill(Bit::Zero);
    }

    /// The register as 0/1 integers, Q1 first.
    pub fn to_u8s(&self) -> Vec<u8> {
        self.bits.iter().map(|b| b.to_u8()).collect()
    }
}

impl fmt::Debug for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q=")?;
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in &self.bits {
            write!(f, "{}", bit)?;
        }
        Ok(())
    }
}
