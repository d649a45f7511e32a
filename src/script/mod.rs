//! Stimulus scripts for driving a simulator from text.
//!
//! The format is line oriented:
//! - One command per line
//! - `;` starts a comment, blank lines are ignored
//! - `mode` and `width` may only appear before the first operation
//!
//! ```text
//! ; shift 1011 through a 4-bit SISO register
//! mode siso
//! width 4
//! load 1011
//! pulse 4
//! ```

mod parse;
mod run;

pub use parse::{parse_script, load_script, Command, Script, MAX_PULSES_PER_LINE};
pub use run::ScriptEvent;

use thiserror::Error;
use crate::sim::SimError;

/// Errors from reading, parsing or running a script.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    #[error("line {line}: {source}")]
    SimError {
        line: usize,
        #[source]
        source: SimError,
    },
}

impl ScriptError {
    /// 1-based line the error refers to, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            ScriptError::IoError(_) => None,
            ScriptError::ParseError { line, .. } | ScriptError::SimError { line, .. } => Some(*line),
        }
    }
}
