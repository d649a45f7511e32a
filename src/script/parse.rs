//! Script parsing.

use std::path::Path;
use crate::script::ScriptError;
use crate::sim::{Mode, SimConfig};

/// Largest count a single `pulse` line may ask for. Every pulse records a
/// snapshot, so this bounds the memory one line can take.
pub const MAX_PULSES_PER_LINE: u32 = 10_000;

/// One operation on a simulator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `load <bits>`: queue a serial string (SISO/SIPO).
    Load(String),
    /// `parallel <index> <bit>`: set one parallel input line. The index is
    /// kept signed so negative values reach the simulator's range check.
    ParallelBit { index: i64, value: u8 },
    /// `parallel <bits>`: set every parallel input line.
    ParallelWord(String),
    /// `serial <bit>`: set the PISO serial input.
    Serial(u8),
    /// `pulse [count]`
    Pulse(u32),
    /// `show`: record a snapshot without changing anything.
    Show,
}

/// A parsed script: simulator config plus commands with their line numbers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Script {
    pub config: SimConfig,
    pub commands: Vec<(usize, Command)>,
}

impl Script {
    /// Number of operations (header lines excluded).
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// True if the script has no operations.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Read and parse a script file.
pub fn load_script<P: AsRef<Path>>(path: P) -> Result<Script, ScriptError> {
    let source = std::fs::read_to_string(path.as_ref())?;
    parse_script(&source)
}

/// Parse script source text.
pub fn parse_script(source: &str) -> Result<Script, ScriptError> {
    let mut script = Script::default();

    for (idx, raw) in source.lines().enumerate() {
        let line = idx + 1;
        let text = match raw.find(';') {
            Some(pos) => &raw[..pos],
            None => raw,
        };
        let mut words = text.split_whitespace();
        let Some(keyword) = words.next() else {
            continue;
        };
        let args: Vec<&str> = words.collect();
        let err = |message: String| ScriptError::ParseError { line, message };

        match keyword.to_ascii_lowercase().as_str() {
            "mode" | "width" if !script.commands.is_empty() => {
                return Err(err(format!("'{}' must come before the first operation", keyword)));
            }
            "mode" => {
                let [name] = args[..] else {
                    return Err(err("usage: mode <siso|sipo|piso|pipo>".into()));
                };
                script.config.mode = name
                    .parse::<Mode>()
                    .map_err(|e| ScriptError::SimError { line, source: e })?;
            }
            "width" => {
                let [value] = args[..] else {
                    return Err(err("usage: width <n>".into()));
                };
                let width: usize = value
                    .parse()
                    .map_err(|_| err(format!("invalid width '{}'", value)))?;
                script.config.width = width;
                script
                    .config
                    .validate()
                    .map_err(|e| ScriptError::SimError { line, source: e })?;
            }
            "load" => {
                let [bits] = args[..] else {
                    return Err(err("usage: load <bits>".into()));
                };
                script.commands.push((line, Command::Load(bits.to_string())));
            }
            "parallel" => {
                let command = match args[..] {
                    [bits] => Command::ParallelWord(bits.to_string()),
                    [index, value] => Command::ParallelBit {
                        index: index
                            .parse()
                            .map_err(|_| err(format!("invalid index '{}'", index)))?,
                        value: parse_u8(value).map_err(err)?,
                    },
                    _ => return Err(err("usage: parallel <bits> | parallel <index> <bit>".into())),
                };
                script.commands.push((line, command));
            }
            "serial" => {
                let [value] = args[..] else {
                    return Err(err("usage: serial <bit>".into()));
                };
                script.commands.push((line, Command::Serial(parse_u8(value).map_err(err)?)));
            }
            "pulse" => {
                let count: u32 = match args[..] {
                    [] => 1,
                    [n] => n
                        .parse()
                        .map_err(|_| err(format!("invalid pulse count '{}'", n)))?,
                    _ => return Err(err("usage: pulse [count]".into())),
                };
                if count > MAX_PULSES_PER_LINE {
                    return Err(err(format!(
                        "pulse count {} exceeds the limit of {}",
                        count, MAX_PULSES_PER_LINE
                    )));
                }
                script.commands.push((line, Command::Pulse(count)));
            }
            "show" => {
                if !args.is_empty() {
                    return Err(err("'show' takes no arguments".into()));
                }
                script.commands.push((line, Command::Show));
            }
            other => return Err(err(format!("unknown command '{}'", other))),
        }
    }

    Ok(script)
}

/// Parse a bit value. Range checking is left to the simulator so the
/// reported error kind matches a direct call.
fn parse_u8(text: &str) -> Result<u8, String> {
    text.parse().map_err(|_| format!("invalid bit value '{}'", text))
}
