//! Text rendering of conversion results

use uci_fen_core::{Conversion, RulesEngine};

#[derive(Debug, Clone, Copy)]
pub struct TextOptions {
    pub board: bool,
    pub coords: bool,
    pub trace: bool,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            board: true,
            coords: false,
            trace: false,
        }
    }
}

/// Formats a conversion the way the tool prints it on stdout:
/// optional per-move trace, the `FEN:` line, then the diagram.
pub fn render_text<E: RulesEngine>(
    engine: &E,
    conversion: &Conversion<E::Board>,
    options: &TextOptions,
) -> String {
    let mut lines = Vec::new();

    if options.trace && !conversion.plies.is_empty() {
        for ply in &conversion.plies {
            lines.push(format!("{}. {} ({}) -> {}", ply.index + 1, ply.uci, ply.san, ply.fen));
        }
        lines.push(String::new());
    }

    lines.push(format!("FEN: {}", conversion.fen()));

    if let Some(reason) = conversion.outcome.stop_reason() {
        lines.push(format!(
            "Stopped at move {} ({}): {}",
            reason.index() + 1,
            reason.token(),
            reason
        ));
    }

    if options.board {
        lines.push(String::new());
        lines.push("Board:".to_string());
        lines.push(engine.render(&conversion.board, options.coords));
        lines.push(String::new());
        lines.push(engine.summary(&conversion.board).status_line());
    }

    lines.join("\n")
}

/// Lines read in batch mode that are actual commands
pub fn is_command_line(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && !trimmed.starts_with('#')
}
