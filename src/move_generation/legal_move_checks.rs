//! Check, attack and game-end queries.

use crate::board_state::board::Board;
use crate::board_state::chess_types::Color;
use crate::board_state::location::Location;
use crate::move_generation::pseudo_moves::{attacks, capture_reach};
use crate::moves::chess_move::Move;

/// Final state for a side with no legal moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Checkmate { loser: Color },
    Stalemate,
}

/// True when any piece of `attacker` attacks `square`.
pub fn is_square_attacked(board: &Board, square: Location, attacker: Color) -> bool {
    board
        .pieces(attacker)
        .any(|(from, _)| attacks(board, from, square))
}

/// True when some opposing pseudo-legal move lands on `color`'s king.
pub fn player_has_check(board: &Board, color: Color) -> bool {
    let Some(king) = board.king_location(color) else {
        return false;
    };
    board
        .pieces(color.opposite())
        .any(|(from, piece)| capture_reach(piece, from, board).contains(&king))
}

pub fn outcome(board: &Board, color: Color) -> Option<Outcome> {
    if !board.legal_moves(color).is_empty() {
        return None;
    }
    if player_has_check(board, color) {
        Some(Outcome::Checkmate { loser: color })
    } else {
        Some(Outcome::Stalemate)
    }
}

/// Whether playing `mv` on `board` leaves the opponent mated.
pub fn gives_checkmate(board: &Board, mv: &Move) -> bool {
    let Some(mover) = mv.piece().color() else {
        return false;
    };
    let opponent = mover.opposite();
    let child = board.apply(mv);
    player_has_check(&child, opponent) && child.legal_moves(opponent).is_empty()
}
