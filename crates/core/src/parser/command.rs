//! UCI `position` command parsing

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Number of whitespace-separated fields in a complete FEN.
pub const FEN_FIELDS: usize = 6;

const PREFIX: &str = "position ";

/// Where a conversion run starts from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartingConfig {
    StartPos,
    ExplicitFen(String),
}

/// A classified `position` command: starting configuration plus move tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionCommand {
    pub start: StartingConfig,
    pub moves: Vec<String>,
}

impl PositionCommand {
    pub fn startpos() -> Self {
        Self {
            start: StartingConfig::StartPos,
            moves: Vec::new(),
        }
    }
}

/// Parses a UCI position command such as
/// `position startpos moves e2e4 e7e5` or `fen <6 fields> moves ...`.
///
/// The leading `position ` is optional. Tokens following the starting
/// configuration are only read as moves when introduced by `moves`;
/// anything else there is ignored.
pub fn parse_command(command: &str) -> Result<PositionCommand> {
    let body = command.strip_prefix(PREFIX).unwrap_or(command);
    let parts: Vec<&str> = body.split_whitespace().collect();

    let Some(first) = parts.first() else {
        return Ok(PositionCommand::startpos());
    };

    let (start, moves_at) = match *first {
        "startpos" => (StartingConfig::StartPos, 1),
        "fen" => {
            let fields = parts.get(1..=FEN_FIELDS).ok_or_else(|| {
                Error::MalformedCommand(format!(
                    "fen needs {} fields, got {}",
                    FEN_FIELDS,
                    parts.len() - 1
                ))
            })?;
            (StartingConfig::ExplicitFen(fields.join(" ")), FEN_FIELDS + 1)
        }
        _ => {
            return Err(Error::MalformedCommand(
                "must start with startpos or fen".to_string(),
            ))
        }
    };

    let moves = match parts.get(moves_at) {
        Some(&"moves") => parts[moves_at + 1..].iter().map(|s| s.to_string()).collect(),
        _ => Vec::new(),
    };

    Ok(PositionCommand { start, moves })
}

impl FromStr for PositionCommand {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_command(s)
    }
}

impl fmt::Display for StartingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartingConfig::StartPos => write!(f, "startpos"),
            StartingConfig::ExplicitFen(fen) => write!(f, "fen {}", fen),
        }
    }
}

impl fmt::Display for PositionCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "position {}", self.start)?;
        if !self.moves.is_empty() {
            write!(f, " moves {}", self.moves.join(" "))?;
        }
        Ok(())
    }
}
