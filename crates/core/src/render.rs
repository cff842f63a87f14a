//! ASCII board diagrams

use shakmaty::{Board, File, Rank, Square};

/// Renders a board with rank 8 on top, one character per square
/// (`.` for empty), separated by spaces.
///
/// With `coords`, each row is prefixed by its rank and a file legend is
/// appended.
pub fn ascii_board(board: &Board, coords: bool) -> String {
    let mut rows = Vec::with_capacity(9);

    for rank in Rank::ALL.into_iter().rev() {
        let cells: Vec<String> = File::ALL
            .into_iter()
            .map(|file| {
                board
                    .piece_at(Square::from_coords(file, rank))
                    .map_or('.', |piece| piece.char())
                    .to_string()
            })
            .collect();

        let row = cells.join(" ");
        if coords {
            rows.push(format!("{} {}", rank.char(), row));
        } else {
            rows.push(row);
        }
    }

    if coords {
        rows.push("  a b c d e f g h".to_string());
    }

    rows.join("\n")
}
