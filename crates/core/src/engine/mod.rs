//! Chess rules engine integration
//!
//! The converter never inspects a board itself. Everything it needs from
//! chess rules goes through [`RulesEngine`], implemented for shakmaty by
//! [`StandardRules`].

pub mod standard;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use standard::StandardRules;

/// Capabilities the position applier requires from a chess rules library
pub trait RulesEngine {
    /// Mutable board state, owned by one conversion run
    type Board;
    /// A move token decoded from coordinate notation, not yet checked for legality
    type Decoded;
    /// A move known to be legal on the board it was checked against
    type Move;

    /// The standard initial arrangement
    fn starting_board(&self) -> Self::Board;

    /// Builds a board from a FEN, failing with `Error::InvalidFen`
    fn board_from_fen(&self, fen: &str) -> Result<Self::Board>;

    /// Decodes a coordinate-notation token such as `e2e4` or `e7e8q`
    fn decode_move(&self, token: &str) -> std::result::Result<Self::Decoded, String>;

    /// Returns the legal move matching `decoded`, if there is one
    fn legal_move(&self, board: &Self::Board, decoded: &Self::Decoded) -> Option<Self::Move>;

    /// Plays a legal move in place and returns its SAN
    fn play(&self, board: &mut Self::Board, mv: Self::Move) -> String;

    /// Canonical FEN of the board
    fn to_fen(&self, board: &Self::Board) -> String;

    /// ASCII diagram, rank 8 first
    fn render(&self, board: &Self::Board, coords: bool) -> String;

    fn side_to_move(&self, board: &Self::Board) -> Side;

    fn summary(&self, board: &Self::Board) -> PositionSummary;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::White => "White",
            Side::Black => "Black",
        }
    }
}

/// Game-state facts about a position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionSummary {
    pub side_to_move: Side,
    pub legal_moves: u32,
    pub check: bool,
    pub checkmate: bool,
    pub stalemate: bool,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

impl PositionSummary {
    /// One-line status, e.g. `Black to move, 20 legal moves`
    pub fn status_line(&self) -> String {
        let side = self.side_to_move.as_str();
        if self.checkmate {
            format!("{} is checkmated", side)
        } else if self.stalemate {
            format!("{} is stalemated", side)
        } else {
            let noun = if self.legal_moves == 1 { "move" } else { "moves" };
            let check = if self.check { " (in check)" } else { "" };
            format!("{} to move{}, {} legal {}", side, check, self.legal_moves, noun)
        }
    }
}
