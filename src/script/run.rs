//! Script execution.

use serde::Serialize;
use tracing::{event, Level};
use crate::script::{Command, Script, ScriptError};
use crate::sim::{ShiftRegisterSimulator, SimError, Snapshot, Transition};

/// Something observable that happened while running a script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptEvent {
    /// Source line that produced the event.
    pub line: usize,
    /// Set for clock pulses, `None` for `show`.
    pub transition: Option<Transition>,
    /// State after the event.
    pub snapshot: Snapshot,
}

impl Script {
    /// Run on a fresh simulator, recording one event per clock pulse and
    /// per `show`. Stops at the first failing command.
    pub fn run(&self) -> Result<(ShiftRegisterSimulator, Vec<ScriptEvent>), ScriptError> {
        let mut sim = ShiftRegisterSimulator::with_config(&self.config)
            .map_err(|e| ScriptError::SimError { line: 0, source: e })?;
        let mut events = Vec::new();

        for (line, command) in &self.commands {
            let line = *line;
            let wrap = |source: SimError| ScriptError::SimError { line, source };

            match command {
                Command::Load(bits) => sim.set_serial_string(bits).map_err(wrap)?,
                Command::ParallelBit { index, value } => {
                    let index = usize::try_from(*index).map_err(|_| {
                        wrap(SimError::IndexOutOfRange { index: i128::from(*index), width: sim.width() })
                    })?;
                    sim.set_parallel_bit(index, *value).map_err(wrap)?;
                }
                Command::ParallelWord(bits) => sim.set_parallel_word(bits).map_err(wrap)?,
                Command::Serial(value) => sim.set_serial_bit(*value).map_err(wrap)?,
                Command::Pulse(count) => {
                    for _ in 0..*count {
                        let transition = sim.pulse();
                        events.push(ScriptEvent {
                            line,
                            transition: Some(transition),
                            snapshot: sim.snapshot(),
                        });
                    }
                }
                Command::Show => events.push(ScriptEvent {
                    line,
                    transition: None,
                    snapshot: sim.snapshot(),
                }),
            }
        }

        event!(
            Level::INFO,
            mode = %sim.mode(),
            pulses = sim.pulses(),
            events = events.len(),
            "script finished"
        );
        Ok((sim, events))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::Bit;
    use crate::script::parse_script;
    use crate::sim::LoadShift;

    #[test]
    fn test_run_siso() {
        let script = parse_script("mode siso\nload 1011\npulse 4\n").unwrap();
        let (sim, events) = script.run().unwrap();

        assert_eq!(events.len(), 4);
        assert!(events.iter().all(|e| e.line == 3));
        assert_eq!(sim.register().to_string(), "1101");
        assert_eq!(
            events[3].transition,
            Some(Transition::Shifted { incoming: Bit::One, outgoing: Bit::Zero })
        );
    }

    #[test]
    fn test_run_piso() {
        let script = parse_script(
            "mode piso\nparallel 0 1\nparallel 1 1\npulse\nserial 1\npulse\nshow\n",
        )
        .unwrap();
        let (sim, events) = script.run().unwrap();

        assert_eq!(events.len(), 3);
        assert_eq!(events[0].snapshot.q, vec![Bit::One, Bit::One, Bit::Zero, Bit::Zero]);
        assert_eq!(sim.register().to_string(), "1110");
        assert_eq!(events[2].transition, None);
        assert_eq!(events[2].snapshot.load_shift, Some(LoadShift::Shift));
    }

    #[test]
    fn test_negative_index_is_out_of_range() {
        let script = parse_script("mode pipo\npulse\nparallel -1 0\n").unwrap();
        let err = script.run().unwrap_err();
        match err {
            ScriptError::SimError { line, source } => {
                assert_eq!(line, 3);
                assert_eq!(source, SimError::IndexOutOfRange { index: -1, width: 4 });
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_errors_carry_line() {
        let err = parse_script("mode pipo\n\nload 101\n").unwrap().run().unwrap_err();
        assert_eq!(err.line(), Some(3));

        let err = parse_script("mode piso\nserial 2\n").unwrap().run().unwrap_err();
        assert!(matches!(
            err,
            ScriptError::SimError { line: 2, source: SimError::InvalidInput(_) }
        ));
    }

    #[test]
    fn test_hand_built_zero_width() {
        let mut script = Script::default();
        script.config.width = 0;
        assert!(matches!(
            script.run(),
            Err(ScriptError::SimError { source: SimError::InvalidConfiguration(_), .. })
        ));
    }
}
