//! Serializable summary of a conversion run

use serde::{Deserialize, Serialize};

use crate::applier::{Conversion, PlyRecord};
use crate::engine::{PositionSummary, RulesEngine, Side};
use crate::error::{Result, StopReason};
use crate::parser::StartingConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppliedMove {
    pub index: usize,
    pub uci: String,
    pub san: String,
    pub fen: String,
    pub side_to_move: Side,
}

impl From<&PlyRecord> for AppliedMove {
    fn from(ply: &PlyRecord) -> Self {
        Self {
            index: ply.index,
            uci: ply.uci.clone(),
            san: ply.san.clone(),
            fen: ply.fen.clone(),
            side_to_move: ply.side_to_move,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopInfo {
    pub kind: String,
    pub index: usize,
    pub token: String,
    pub message: String,
}

impl From<&StopReason> for StopInfo {
    fn from(reason: &StopReason) -> Self {
        Self {
            kind: reason.kind().to_string(),
            index: reason.index(),
            token: reason.token().to_string(),
            message: reason.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub command: String,
    /// `"startpos"` or the explicit starting FEN
    pub start: String,
    pub moves: Vec<String>,
    pub applied: Vec<AppliedMove>,
    pub fen: String,
    pub complete: bool,
    pub stop: Option<StopInfo>,
    #[serde(flatten)]
    pub position: PositionSummary,
}

impl Report {
    pub fn new<E: RulesEngine>(engine: &E, conversion: &Conversion<E::Board>) -> Self {
        let start = match &conversion.command.start {
            StartingConfig::StartPos => "startpos".to_string(),
            StartingConfig::ExplicitFen(fen) => fen.clone(),
        };

        Self {
            command: conversion.command.to_string(),
            start,
            moves: conversion.command.moves.clone(),
            applied: conversion.plies.iter().map(AppliedMove::from).collect(),
            fen: conversion.fen().to_string(),
            complete: conversion.outcome.is_complete(),
            stop: conversion.outcome.stop_reason().map(StopInfo::from),
            position: engine.summary(&conversion.board),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
