//! shakmaty-backed rules engine for standard chess

use shakmaty::fen::Fen;
use shakmaty::san::SanPlus;
use shakmaty::uci::UciMove;
use shakmaty::{CastlingMode, Chess, Color, EnPassantMode, Move, Position};

use super::{PositionSummary, RulesEngine, Side};
use crate::config::CastlingConvention;
use crate::error::{Error, Result};
use crate::render::ascii_board;

/// Standard chess rules via shakmaty.
///
/// Castling tokens may be written king-two-squares (`e1g1`) or
/// king-onto-rook (`e1h1`); both decode to the same castling move.
/// FENs are rendered with the en passant square only when a capture
/// is actually legal.
#[derive(Debug, Clone, Copy)]
pub struct StandardRules {
    castling_mode: CastlingMode,
}

impl StandardRules {
    pub fn new(convention: CastlingConvention) -> Self {
        Self {
            castling_mode: convention.mode(),
        }
    }

    pub fn castling_mode(&self) -> CastlingMode {
        self.castling_mode
    }
}

impl Default for StandardRules {
    fn default() -> Self {
        Self::new(CastlingConvention::Standard)
    }
}

impl RulesEngine for StandardRules {
    type Board = Chess;
    type Decoded = UciMove;
    type Move = Move;

    fn starting_board(&self) -> Chess {
        Chess::default()
    }

    fn board_from_fen(&self, fen: &str) -> Result<Chess> {
        let invalid = |reason: String| Error::InvalidFen {
            fen: fen.to_string(),
            reason,
        };

        let parsed = fen.parse::<Fen>().map_err(|e| invalid(format!("{}", e)))?;
        parsed
            .into_position(self.castling_mode)
            .map_err(|e| invalid(format!("{}", e)))
    }

    fn decode_move(&self, token: &str) -> std::result::Result<UciMove, String> {
        token.parse::<UciMove>().map_err(|e| e.to_string())
    }

    fn legal_move(&self, board: &Chess, decoded: &UciMove) -> Option<Move> {
        decoded.to_move(board).ok()
    }

    fn play(&self, board: &mut Chess, mv: Move) -> String {
        SanPlus::from_move_and_play_unchecked(board, mv).to_string()
    }

    fn to_fen(&self, board: &Chess) -> String {
        Fen::from_position(board, EnPassantMode::Legal).to_string()
    }

    fn render(&self, board: &Chess, coords: bool) -> String {
        ascii_board(board.board(), coords)
    }

    fn side_to_move(&self, board: &Chess) -> Side {
        match board.turn() {
            Color::White => Side::White,
            Color::Black => Side::Black,
        }
    }

    fn summary(&self, board: &Chess) -> PositionSummary {
        PositionSummary {
            side_to_move: self.side_to_move(board),
            legal_moves: board.legal_moves().len() as u32,
            check: board.is_check(),
            checkmate: board.is_checkmate(),
            stalemate: board.is_stalemate(),
            halfmove_clock: board.halfmoves(),
            fullmove_number: board.fullmoves().get(),
        }
    }
}
