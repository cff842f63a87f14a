//! Error types for uci-fen-core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Malformed command: {0}")]
    MalformedCommand(String),

    #[error("Invalid FEN '{fen}': {reason}")]
    InvalidFen { fen: String, reason: String },

    #[error("Stopped early: {0}")]
    Stopped(#[from] StopReason),

    #[error("Rules engine error: {0}")]
    Internal(String),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Why move application ended before the move list was exhausted.
///
/// `index` is the zero-based position of the offending token in the move list.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    #[error("invalid move format '{token}' (move {index}): {reason}")]
    MalformedMove {
        index: usize,
        token: String,
        reason: String,
    },

    #[error("illegal move '{token}' (move {index}) at position {fen}")]
    IllegalMove {
        index: usize,
        token: String,
        fen: String,
    },
}

impl StopReason {
    pub fn index(&self) -> usize {
        match self {
            StopReason::MalformedMove { index, .. } | StopReason::IllegalMove { index, .. } => *index,
        }
    }

    pub fn token(&self) -> &str {
        match self {
            StopReason::MalformedMove { token, .. } | StopReason::IllegalMove { token, .. } => token,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            StopReason::MalformedMove { .. } => "malformed_move",
            StopReason::IllegalMove { .. } => "illegal_move",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
