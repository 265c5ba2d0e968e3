use std::fmt;

use thiserror::Error;

/// Why a data line was left out of the parsed record set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowRejection {
    #[error("expected {expected} columns but found {found}")]
    TooFewColumns { expected: usize, found: usize },

    #[error("time value '{0}' is not a finite number")]
    InvalidTime(String),

    #[error("bib number is empty")]
    EmptyBib,

    #[error("unknown timing point '{0}'")]
    UnknownTimingPoint(String),

    #[error("read was flagged invalid by the timing device")]
    FlaggedInvalid,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRow {
    /// 1-based physical line number in the source text.
    pub line: u64,
    pub reason: RowRejection,
}

impl RejectedRow {
    pub fn new(line: u64, reason: RowRejection) -> Self {
        Self { line, reason }
    }
}

impl fmt::Display for RejectedRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.reason)
    }
}
