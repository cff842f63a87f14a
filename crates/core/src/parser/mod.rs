//! Parser module for UCI `position` commands

pub mod command;

pub use command::{parse_command, PositionCommand, StartingConfig, FEN_FIELDS};
