//! UCI to FEN core library
//!
//! Turns the `position` command a GUI sends to a chess engine into the
//! FEN of the resulting position.
//!
//! ```
//! use uci_fen_core::{convert, Config};
//!
//! let conversion = convert("position startpos moves e2e4 e7e5", &Config::new()).unwrap();
//! assert_eq!(
//!     conversion.fen(),
//!     "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2"
//! );
//! ```

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use shakmaty::Chess;

pub mod applier;
pub mod config;
pub mod engine;
pub mod error;
pub mod parser;
pub mod render;
pub mod report;

pub use applier::{Conversion, Outcome, PlyRecord, PositionApplier};
pub use config::{CastlingConvention, Config};
pub use engine::{PositionSummary, RulesEngine, Side, StandardRules};
pub use error::{Error, Result, StopReason};
pub use parser::{parse_command, PositionCommand, StartingConfig};
pub use report::Report;

/// FEN of the standard starting position
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Parses `command` and replays it on a fresh board.
///
/// An illegal or undecodable move ends the run early with
/// [`Outcome::Stopped`], unless `config.strict` is set, in which case it
/// becomes [`Error::Stopped`].
pub fn convert(command: &str, config: &Config) -> Result<Conversion<Chess>> {
    let parsed = parse_command(command)?;
    let engine = StandardRules::new(config.castling);
    convert_with(&engine, &parsed, config.strict)
}

/// Runs an already parsed command against any rules engine.
pub fn convert_with<E: RulesEngine>(
    engine: &E,
    command: &PositionCommand,
    strict: bool,
) -> Result<Conversion<E::Board>> {
    let applier = PositionApplier::new(engine);
    let conversion = panic::catch_unwind(AssertUnwindSafe(|| applier.run(command)))
        .map_err(|payload| Error::Internal(panic_message(payload.as_ref())))??;

    if strict {
        if let Some(reason) = conversion.outcome.stop_reason() {
            return Err(Error::Stopped(reason.clone()));
        }
    }

    Ok(conversion)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "rules engine panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_startpos() {
        let conversion = convert("position startpos", &Config::new()).unwrap();
        assert_eq!(conversion.fen(), STARTING_FEN);
    }

    #[test]
    fn test_strict_mode_turns_stop_into_error() {
        let command = "position startpos moves e2e4 e7e4";

        let lenient = convert(command, &Config::new()).unwrap();
        assert!(!lenient.outcome.is_complete());

        let err = convert(command, &Config::new().strict()).unwrap_err();
        match err {
            Error::Stopped(StopReason::IllegalMove { index, token, .. }) => {
                assert_eq!(index, 1);
                assert_eq!(token, "e7e4");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_malformed_command_never_builds_a_board() {
        assert!(matches!(
            convert("foo startpos", &Config::new()),
            Err(Error::MalformedCommand(_))
        ));
    }

    #[test]
    fn test_each_run_starts_fresh() {
        let config = Config::new();
        convert("startpos moves e2e4 e7e5 g1f3", &config).unwrap();
        assert_eq!(convert("startpos", &config).unwrap().fen(), STARTING_FEN);
    }

    struct PanickingRules;

    impl RulesEngine for PanickingRules {
        type Board = ();
        type Decoded = ();
        type Move = ();

        fn starting_board(&self) {}

        fn board_from_fen(&self, _fen: &str) -> Result<()> {
            Ok(())
        }

        fn decode_move(&self, _token: &str) -> std::result::Result<(), String> {
            panic!("decoder exploded")
        }

        fn legal_move(&self, _board: &(), _decoded: &()) -> Option<()> {
            Some(())
        }

        fn play(&self, _board: &mut (), _mv: ()) -> String {
            String::new()
        }

        fn to_fen(&self, _board: &()) -> String {
            String::new()
        }

        fn render(&self, _board: &(), _coords: bool) -> String {
            String::new()
        }

        fn side_to_move(&self, _board: &()) -> Side {
            Side::White
        }

        fn summary(&self, _board: &()) -> PositionSummary {
            unreachable!()
        }
    }

    #[test]
    fn test_engine_panic_becomes_internal_error() {
        let command = parse_command("startpos moves e2e4").unwrap();
        let err = convert_with(&PanickingRules, &command, false).unwrap_err();
        match err {
            Error::Internal(msg) => assert_eq!(msg, "decoder exploded"),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
