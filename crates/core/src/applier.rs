//! Replays a parsed position command on a fresh board

use tracing::{debug, warn};

use crate::engine::{RulesEngine, Side};
use crate::error::{Result, StopReason};
use crate::parser::{PositionCommand, StartingConfig};

/// One move that was accepted and played
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlyRecord {
    pub index: usize,
    pub uci: String,
    pub san: String,
    /// Position after the move
    pub fen: String,
    pub side_to_move: Side,
}

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Every move token was played
    Complete { fen: String },
    /// A move token failed; `fen` is the position just before it
    Stopped { fen: String, reason: StopReason },
}

impl Outcome {
    pub fn fen(&self) -> &str {
        match self {
            Outcome::Complete { fen } | Outcome::Stopped { fen, .. } => fen,
        }
    }

    pub fn stop_reason(&self) -> Option<&StopReason> {
        match self {
            Outcome::Complete { .. } => None,
            Outcome::Stopped { reason, .. } => Some(reason),
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Outcome::Complete { .. })
    }
}

/// Result of a conversion run. Owns the final board.
#[derive(Debug)]
pub struct Conversion<B> {
    pub command: PositionCommand,
    pub board: B,
    pub plies: Vec<PlyRecord>,
    pub outcome: Outcome,
}

impl<B> Conversion<B> {
    pub fn fen(&self) -> &str {
        self.outcome.fen()
    }
}

enum State {
    Applying(usize),
    Stopped(StopReason),
    Complete,
}

pub struct PositionApplier<'e, E: RulesEngine> {
    engine: &'e E,
}

impl<'e, E: RulesEngine> PositionApplier<'e, E> {
    pub fn new(engine: &'e E) -> Self {
        Self { engine }
    }

    /// Builds the starting board and plays the command's moves in order,
    /// stopping at the first token that cannot be decoded or is illegal.
    ///
    /// Only a bad explicit FEN is an error here; move failures are
    /// reported through [`Outcome::Stopped`].
    pub fn run(&self, command: &PositionCommand) -> Result<Conversion<E::Board>> {
        let mut board = self.initialize(&command.start)?;
        let mut plies = Vec::with_capacity(command.moves.len());
        let mut state = State::Applying(0);

        loop {
            state = match state {
                State::Applying(index) => match command.moves.get(index) {
                    None => State::Complete,
                    Some(token) => match self.step(&mut board, index, token) {
                        Ok(ply) => {
                            plies.push(ply);
                            State::Applying(index + 1)
                        }
                        Err(reason) => State::Stopped(reason),
                    },
                },
                State::Stopped(reason) => {
                    let fen = self.engine.to_fen(&board);
                    warn!(index = reason.index(), token = reason.token(), %fen, "{}", reason);
                    return Ok(Conversion {
                        command: command.clone(),
                        board,
                        plies,
                        outcome: Outcome::Stopped { fen, reason },
                    });
                }
                State::Complete => {
                    let fen = self.engine.to_fen(&board);
                    debug!(plies = plies.len(), %fen, "all moves applied");
                    return Ok(Conversion {
                        command: command.clone(),
                        board,
                        plies,
                        outcome: Outcome::Complete { fen },
                    });
                }
            };
        }
    }

    fn initialize(&self, start: &StartingConfig) -> Result<E::Board> {
        let board = match start {
            StartingConfig::StartPos => self.engine.starting_board(),
            StartingConfig::ExplicitFen(fen) => self.engine.board_from_fen(fen)?,
        };
        debug!(start = %start, "board initialized");
        Ok(board)
    }

    fn step(
        &self,
        board: &mut E::Board,
        index: usize,
        token: &str,
    ) -> std::result::Result<PlyRecord, StopReason> {
        let decoded = self
            .engine
            .decode_move(token)
            .map_err(|reason| StopReason::MalformedMove {
                index,
                token: token.to_string(),
                reason,
            })?;

        let Some(mv) = self.engine.legal_move(board, &decoded) else {
            return Err(StopReason::IllegalMove {
                index,
                token: token.to_string(),
                fen: self.engine.to_fen(board),
            });
        };

        let san = self.engine.play(board, mv);
        let fen = self.engine.to_fen(board);
        let side_to_move = self.engine.side_to_move(board);
        debug!(index, uci = token, %san, side = side_to_move.as_str(), %fen, "move applied");

        Ok(PlyRecord {
            index,
            uci: token.to_string(),
            san,
            fen,
            side_to_move,
        })
    }
}
