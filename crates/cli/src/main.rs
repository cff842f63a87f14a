use std::io::{self, BufRead, Write};
use std::process;

use clap::{ArgAction, Parser};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;
use uci_fen_core::{convert, Config, Report, StandardRules};

mod output;

use output::{is_command_line, render_text, TextOptions};

/// Convert a UCI position command into the FEN of the resulting position
#[derive(Parser, Debug)]
#[command(name = "uci2fen", version, about, long_about = None)]
struct Cli {
    /// Full UCI command, e.g. "position startpos moves e2e4 e7e5"
    #[arg(required_unless_present = "stdin", conflicts_with = "stdin")]
    command: Option<String>,

    /// Read one command per line from standard input
    #[arg(long)]
    stdin: bool,

    /// Print a JSON report instead of text
    #[arg(long)]
    json: bool,

    /// Indent the JSON report
    #[arg(long, requires = "json")]
    pretty: bool,

    /// Print the FEN after every applied move
    #[arg(long)]
    trace: bool,

    /// Fail instead of printing a partial position when a move is rejected
    #[arg(long)]
    strict: bool,

    /// Read castling rights and castling moves as Chess960
    #[arg(long)]
    chess960: bool,

    /// Do not print the board diagram
    #[arg(long)]
    no_board: bool,

    /// Label ranks and files in the diagram
    #[arg(long)]
    coords: bool,

    /// More log output on stderr (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn config(&self) -> Config {
        let mut config = Config::new();
        if self.chess960 {
            config = config.chess960();
        }
        if self.strict {
            config = config.strict();
        }
        config
    }

    fn text_options(&self) -> TextOptions {
        TextOptions {
            board: !self.no_board,
            coords: self.coords,
            trace: self.trace,
        }
    }
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = usage_exit_code(&e);
            let _ = e.print();
            process::exit(code);
        }
    };

    init_logging(cli.verbose);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let failures = if cli.stdin {
        let stdin = io::stdin();
        match run_batch(&cli, stdin.lock(), &mut out) {
            Ok(failures) => failures,
            Err(e) => {
                error!("failed to read stdin: {}", e);
                1
            }
        }
    } else {
        match &cli.command {
            Some(command) => usize::from(!run_one(&cli, command, &mut out)),
            None => 1,
        }
    };

    process::exit(exit_code(failures));
}

/// Usage errors exit with 1; `--help` and `--version` exit cleanly.
fn usage_exit_code(e: &clap::Error) -> i32 {
    if e.use_stderr() {
        1
    } else {
        0
    }
}

fn exit_code(failures: usize) -> i32 {
    if failures == 0 {
        0
    } else {
        1
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

/// Converts and prints a single command. Returns false on failure.
fn run_one<W: Write>(cli: &Cli, command: &str, out: &mut W) -> bool {
    let config = cli.config();
    let engine = StandardRules::new(config.castling);

    let conversion = match convert(command, &config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return false;
        }
    };

    let rendered = if cli.json {
        let report = Report::new(&engine, &conversion);
        let json = if cli.pretty {
            report.to_json_pretty()
        } else {
            report.to_json()
        };
        match json {
            Ok(json) => json,
            Err(e) => {
                eprintln!("Error: {}", e);
                return false;
            }
        }
    } else {
        render_text(&engine, &conversion, &cli.text_options())
    };

    if let Err(e) = writeln!(out, "{}", rendered) {
        eprintln!("Error: {}", e);
        return false;
    }

    true
}

/// Converts one command per input line, each on a fresh board, and keeps
/// going past failures. Returns the number of lines that failed.
fn run_batch<R: BufRead, W: Write>(cli: &Cli, input: R, out: &mut W) -> io::Result<usize> {
    let mut failures = 0usize;
    let mut converted = 0usize;

    for (number, line) in input.lines().enumerate() {
        let line = line?;

        if !is_command_line(&line) {
            continue;
        }

        if converted > 0 && !cli.json {
            writeln!(out)?;
        }
        converted += 1;

        // Only trailing whitespace goes; the `position ` prefix rule is exact.
        let command = line.trim_end();
        debug!(line = number + 1, command, "converting");
        if !run_one(cli, command, out) {
            failures += 1;
        }
    }

    debug!(converted, failures, "batch finished");
    Ok(failures)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uci_fen_core::{CastlingConvention, STARTING_FEN};

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["uci2fen"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    fn batch(cli: &Cli, input: &str) -> (usize, String) {
        let mut out = Vec::new();
        let failures = run_batch(cli, input.as_bytes(), &mut out).unwrap();
        (failures, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_missing_command_is_a_usage_error() {
        let err = Cli::try_parse_from(["uci2fen"]).unwrap_err();
        assert_eq!(usage_exit_code(&err), 1);
    }

    #[test]
    fn test_command_and_stdin_conflict() {
        let err = Cli::try_parse_from(["uci2fen", "position startpos", "--stdin"]).unwrap_err();
        assert_eq!(usage_exit_code(&err), 1);
    }

    #[test]
    fn test_help_exits_cleanly() {
        let err = Cli::try_parse_from(["uci2fen", "--help"]).unwrap_err();
        assert_eq!(usage_exit_code(&err), 0);
    }

    #[test]
    fn test_pretty_requires_json() {
        assert!(Cli::try_parse_from(["uci2fen", "startpos", "--pretty"]).is_err());
    }

    #[test]
    fn test_config_from_flags() {
        let config = cli(&["startpos", "--strict", "--chess960"]).config();
        assert!(config.strict);
        assert_eq!(config.castling, CastlingConvention::Chess960);

        let config = cli(&["startpos"]).config();
        assert!(!config.strict);
        assert_eq!(config.castling, CastlingConvention::Standard);
    }

    #[test]
    fn test_exit_code() {
        assert_eq!(exit_code(0), 0);
        assert_eq!(exit_code(1), 1);
        assert_eq!(exit_code(3), 1);
    }

    #[test]
    fn test_run_one_prints_fen() {
        let cli = cli(&["startpos", "--no-board"]);
        let mut out = Vec::new();
        assert!(run_one(&cli, "position startpos", &mut out));
        assert_eq!(String::from_utf8(out).unwrap(), format!("FEN: {}\n", STARTING_FEN));
    }

    #[test]
    fn test_early_stop_fails_only_in_strict_mode() {
        let command = "startpos moves e2e5";

        let mut out = Vec::new();
        assert!(run_one(&cli(&[command, "--no-board"]), command, &mut out));
        assert!(String::from_utf8(out).unwrap().starts_with(&format!("FEN: {}", STARTING_FEN)));

        let mut out = Vec::new();
        assert!(!run_one(&cli(&[command, "--strict"]), command, &mut out));
        assert!(out.is_empty());
    }

    #[test]
    fn test_malformed_command_fails() {
        let mut out = Vec::new();
        assert!(!run_one(&cli(&["foo"]), "foo startpos", &mut out));
        assert!(out.is_empty());
    }

    #[test]
    fn test_pretty_json_output() {
        let cli = cli(&["startpos", "--json", "--pretty"]);
        let mut out = Vec::new();
        assert!(run_one(&cli, "startpos moves e2e4", &mut out));

        let text = String::from_utf8(out).unwrap();
        assert!(text.trim_end().contains('\n'));
        assert!(text.contains("\"complete\": true"));
    }

    #[test]
    fn test_batch_keeps_going_past_failures() {
        let cli = cli(&["--stdin", "--no-board"]);
        let input = "position startpos\n\n# comment\nfoo startpos\nstartpos moves e2e4\n";
        let (failures, out) = batch(&cli, input);

        assert_eq!(failures, 1);
        let fens: Vec<&str> = out.lines().filter(|l| l.starts_with("FEN: ")).collect();
        assert_eq!(
            fens,
            vec![
                format!("FEN: {}", STARTING_FEN).as_str(),
                "FEN: rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1",
            ]
        );
        assert_eq!(exit_code(failures), 1);
    }

    #[test]
    fn test_batch_keeps_leading_whitespace() {
        let cli = cli(&["--stdin", "--no-board"]);

        // Same rule as the positional argument: the prefix must come first.
        let (failures, out) = batch(&cli, "  position startpos\n");
        assert_eq!(failures, 1);
        assert!(out.is_empty());

        let (failures, out) = batch(&cli, "position startpos   \r\n");
        assert_eq!(failures, 0);
        assert_eq!(out, format!("FEN: {}\n", STARTING_FEN));
    }

    #[test]
    fn test_batch_json_lines() {
        let cli = cli(&["--stdin", "--json"]);
        let (failures, out) = batch(&cli, "startpos\nstartpos moves d2d4\n");
        assert_eq!(failures, 0);
        assert_eq!(out.lines().count(), 2);
        assert!(out.lines().all(|l| l.starts_with('{')));
    }
}
