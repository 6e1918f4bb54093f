//! Clear-path tests between two squares.

use crate::board_state::board::Board;
use crate::board_state::location::Location;

/// True when `a` and `b` are distinct squares on one rank or file with every
/// square strictly between them empty.
pub fn cardinal_line_of_sight_clear(board: &Board, a: Location, b: Location) -> bool {
    (a.x() == b.x() || a.y() == b.y()) && a != b && path_clear(board, a, b)
}

/// True when `a` and `b` are distinct squares on one diagonal with every
/// square strictly between them empty.
pub fn diagonal_line_of_sight_clear(board: &Board, a: Location, b: Location) -> bool {
    (a.x() - b.x()).abs() == (a.y() - b.y()).abs() && a != b && path_clear(board, a, b)
}

/// Squares strictly between two aligned squares, nearest to `a` first.
/// Empty for squares that share no line.
pub fn squares_between(a: Location, b: Location) -> Vec<Location> {
    let dx = b.x() - a.x();
    let dy = b.y() - a.y();
    if (dx != 0 && dy != 0 && dx.abs() != dy.abs()) || (dx == 0 && dy == 0) {
        return Vec::new();
    }

    let (step_x, step_y) = (dx.signum(), dy.signum());
    let mut out = Vec::with_capacity(6);
    let mut current = a;
    while let Some(next) = current.offset(step_x, step_y) {
        if next == b {
            break;
        }
        out.push(next);
        current = next;
    }
    out
}

fn path_clear(board: &Board, a: Location, b: Location) -> bool {
    squares_between(a, b).into_iter().all(|square| board.is_empty(square))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(name: &str) -> Location {
        name.parse().expect("test square should parse")
    }

    #[test]
    fn between_walks_lines_and_diagonals() {
        assert_eq!(squares_between(loc("a1"), loc("a4")), vec![loc("a2"), loc("a3")]);
        assert_eq!(squares_between(loc("h8"), loc("e5")), vec![loc("g7"), loc("f6")]);
        assert!(squares_between(loc("a1"), loc("b3")).is_empty());
        assert!(squares_between(loc("d4"), loc("d5")).is_empty());
    }

    #[test]
    fn start_position_blocks_back_rank() {
        let board = Board::new();
        assert!(!cardinal_line_of_sight_clear(&board, loc("e1"), loc("h1")));
        assert!(!cardinal_line_of_sight_clear(&board, loc("a2"), loc("h2")));
        assert!(cardinal_line_of_sight_clear(&board, loc("a3"), loc("a6")));
        assert!(!diagonal_line_of_sight_clear(&board, loc("c1"), loc("h6")));
        assert!(diagonal_line_of_sight_clear(&board, loc("b2"), loc("c3")));
    }

    #[test]
    fn misaligned_or_identical_squares_are_never_clear() {
        let board = Board::new();
        assert!(!cardinal_line_of_sight_clear(&board, loc("d4"), loc("e6")));
        assert!(!diagonal_line_of_sight_clear(&board, loc("d4"), loc("d5")));
        assert!(!cardinal_line_of_sight_clear(&board, loc("d4"), loc("d4")));
    }
}
