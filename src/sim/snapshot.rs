//! Read-only view of a simulator for front-ends.
//!
//! A [`Snapshot`] carries every value a register diagram labels: the Q
//! outputs, the D inputs each flip-flop will latch, the serial output and,
//! for PISO, the load/shift control.

use std::fmt;
use serde::{Serialize, Deserialize};
use crate::logic::Bit;
use crate::sim::{Mode, LoadShift, ShiftRegisterSimulator};

/// Register state plus per-mode input previews.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub mode: Mode,
    pub width: usize,
    pub pulses: u64,
    /// Q1..QN
    pub q: Vec<Bit>,
    /// D1..DN: what each flip-flop takes on the next pulse.
    pub d: Vec<Bit>,
    /// QN
    pub serial_out: Bit,
    /// Bit entering Q1 on the next shift (not PIPO).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub next_serial_in: Option<Bit>,
    /// Staged parallel input lines (PISO, PIPO).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub parallel_in: Option<Vec<Bit>>,
    /// PISO only.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub load_shift: Option<LoadShift>,
}

impl Snapshot {
    /// Capture the current state of `sim`.
    pub fn capture(sim: &ShiftRegisterSimulator) -> Self {
        let mode = sim.mode();
        let q = sim.register().bits().to_vec();
        let next_serial_in = sim.next_serial_in();

        let shifting = match mode {
            Mode::Siso | Mode::Sipo => true,
            Mode::Piso => sim.load_shift() == LoadShift::Shift,
            Mode::Pipo => false,
        };

        let d = match (shifting, next_serial_in) {
            (true, Some(first)) => std::iter::once(first)
                .chain(q.iter().copied().take(q.len().saturating_sub(1)))
                .collect(),
            _ => sim.parallel_input().to_vec(),
        };

        Self {
            mode,
            width: sim.width(),
            pulses: sim.pulses(),
            serial_out: sim.register().serial_out(),
            d,
            q,
            next_serial_in,
            parallel_in: mode
                .parallel_input()
                .then(|| sim.parallel_input().to_vec()),
            load_shift: (mode == Mode::Piso).then(|| sim.load_shift()),
        }
    }

    /// The label strings a diagram shows, in drawing order:
    /// `D1=..`, `Q1=..`, ... `OUT=..` and `MODE=..` for PISO.
    pub fn labels(&self) -> Vec<String> {
        let mut labels = Vec::with_capacity(2 * self.width + 2);
        for (i, (d, q)) in self.d.iter().zip(&self.q).enumerate() {
            labels.push(format!("D{}={}", i + 1, d));
            labels.push(format!("Q{}={}", i + 1, q));
        }
        labels.push(format!("OUT={}", self.serial_out));
        if let Some(state) = self.load_shift {
            labels.push(format!("MODE={}", state));
        }
        labels
    }

    /// Serialize to a single JSON line.
    pub fn to_json(&self) -> String {
        // Only plain data and string keys, so this cannot fail
        serde_json::to_string(self).unwrap_or_default()
    }
}

fn write_bits(f: &mut fmt::Formatter<'_>, bits: &[Bit]) -> fmt::Result {
    for bit in bits {
        write!(f, "{}", bit)?;
    }
    Ok(())
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} #{:<4} Q=", self.mode, self.pulses)?;
        write_bits(f, &self.q)?;
        write!(f, " D=")?;
        write_bits(f, &self.d)?;
        if self.mode.serial_output() {
            write!(f, " out={}", self.serial_out)?;
        }
        if let Some(bit) = self.next_serial_in {
            write!(f, " in={}", bit)?;
        }
        if let Some(state) = self.load_shift {
            write!(f, " [{}]", state)?;
        }
        Ok(())
    }
}
