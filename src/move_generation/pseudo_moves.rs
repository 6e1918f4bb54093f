//! Pseudo-legal destinations per piece.
//!
//! Each piece's movement rule is evaluated against the occupancy of a board,
//! ignoring whether the mover's own king would be left capturable. Attack
//! queries share the same rules, minus castling, which never captures.

use crate::board_state::board::Board;
use crate::board_state::chess_types::*;
use crate::board_state::location::Location;
use crate::move_generation::castling::castle_destinations;
use crate::move_generation::line_of_sight::{
    cardinal_line_of_sight_clear, diagonal_line_of_sight_clear,
};
use crate::moves::chess_move::*;

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

const CARDINAL_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONAL_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Destinations the piece standing on `origin` may move to, castling included.
pub fn pseudo_moves(piece: PieceCode, origin: Location, board: &Board) -> Vec<Location> {
    destinations(piece, origin, board, true)
}

/// Same as [`pseudo_moves`] without castling; used where only captures of
/// occupied squares matter, such as finding a king under attack.
pub(crate) fn capture_reach(piece: PieceCode, origin: Location, board: &Board) -> Vec<Location> {
    destinations(piece, origin, board, false)
}

fn destinations(
    piece: PieceCode,
    origin: Location,
    board: &Board,
    castling: bool,
) -> Vec<Location> {
    let (Some(color), Some(kind)) = (piece.color(), piece.kind()) else {
        return Vec::new();
    };

    let mut out = Vec::with_capacity(16);
    match kind {
        PieceKind::Pawn => pawn_destinations(color, origin, board, &mut out),
        PieceKind::Knight => step_destinations(color, origin, board, &KNIGHT_OFFSETS, &mut out),
        PieceKind::Bishop => ray_destinations(color, origin, board, &DIAGONAL_DIRECTIONS, &mut out),
        PieceKind::Rook => ray_destinations(color, origin, board, &CARDINAL_DIRECTIONS, &mut out),
        PieceKind::Queen => {
            ray_destinations(color, origin, board, &CARDINAL_DIRECTIONS, &mut out);
            ray_destinations(color, origin, board, &DIAGONAL_DIRECTIONS, &mut out);
        }
        PieceKind::King => {
            step_destinations(color, origin, board, &KING_OFFSETS, &mut out);
            if castling {
                out.extend(castle_destinations(board, color, origin));
            }
        }
    }
    out
}

fn pawn_destinations(color: Color, origin: Location, board: &Board, out: &mut Vec<Location>) {
    let forward = color.forward();

    if let Some(single) = origin.offset(0, forward) {
        if board.is_empty(single) {
            out.push(single);
            if origin.y() == color.pawn_rank() && !board.has_moved(origin) {
                if let Some(double) = origin.offset(0, 2 * forward) {
                    if board.is_empty(double) {
                        out.push(double);
                    }
                }
            }
        }
    }

    for dx in [-1, 1] {
        let Some(diagonal) = origin.offset(dx, forward) else {
            continue;
        };
        let target = board.piece_at(diagonal);
        if target.is_color(color.opposite()) {
            out.push(diagonal);
        } else if target.is_none() && en_passant_victim(board, color, origin, dx).is_some() {
            out.push(diagonal);
        }
    }
}

// Opposing pawn beside `origin` that double-pushed on the previous ply.
fn en_passant_victim(board: &Board, color: Color, origin: Location, dx: i8) -> Option<Location> {
    let beside = origin.offset(dx, 0)?;
    let eligible = board.en_passant_square() == Some(beside)
        && board.piece_at(beside).is(color.opposite(), PieceKind::Pawn);
    eligible.then_some(beside)
}

fn step_destinations(
    color: Color,
    origin: Location,
    board: &Board,
    offsets: &[(i8, i8)],
    out: &mut Vec<Location>,
) {
    for &(dx, dy) in offsets {
        if let Some(target) = origin.offset(dx, dy) {
            if !board.piece_at(target).is_color(color) {
                out.push(target);
            }
        }
    }
}

fn ray_destinations(
    color: Color,
    origin: Location,
    board: &Board,
    directions: &[(i8, i8)],
    out: &mut Vec<Location>,
) {
    for &(dx, dy) in directions {
        let mut current = origin;
        while let Some(next) = current.offset(dx, dy) {
            let occupant = board.piece_at(next);
            if occupant.is_color(color) {
                break;
            }
            out.push(next);
            if occupant.is_some() {
                break;
            }
            current = next;
        }
    }
}

/// Whether the piece on `from` attacks `target`, occupied or not.
///
/// Pawns attack their two forward diagonals only; castling is not an attack.
pub fn attacks(board: &Board, from: Location, target: Location) -> bool {
    let piece = board.piece_at(from);
    let (Some(color), Some(kind)) = (piece.color(), piece.kind()) else {
        return false;
    };
    if from == target {
        return false;
    }

    let dx = target.x() - from.x();
    let dy = target.y() - from.y();
    match kind {
        PieceKind::Pawn => dy == color.forward() && dx.abs() == 1,
        PieceKind::Knight => matches!((dx.abs(), dy.abs()), (1, 2) | (2, 1)),
        PieceKind::King => dx.abs().max(dy.abs()) == 1,
        PieceKind::Rook => cardinal_line_of_sight_clear(board, from, target),
        PieceKind::Bishop => diagonal_line_of_sight_clear(board, from, target),
        PieceKind::Queen => {
            cardinal_line_of_sight_clear(board, from, target)
                || diagonal_line_of_sight_clear(board, from, target)
        }
    }
}

/// Classifies `origin -> destination` on `board`, or `None` when the piece
/// on `origin` cannot pseudo-legally get there.
pub fn classify_move(board: &Board, origin: Location, destination: Location) -> Option<Move> {
    let piece = board.piece_at(origin);
    piece.color()?;
    pseudo_moves(piece, origin, board)
        .contains(&destination)
        .then(|| build_move(board, piece, origin, destination))
}

/// Every pseudo-legal move of `color`, in board order a1..h8 by origin.
pub fn generate_pseudo_legal_moves(board: &Board, color: Color) -> Vec<Move> {
    let mut out = Vec::with_capacity(48);
    for (origin, piece) in board.pieces(color) {
        for destination in pseudo_moves(piece, origin, board) {
            out.push(build_move(board, piece, origin, destination));
        }
    }
    out
}

fn build_move(board: &Board, piece: PieceCode, origin: Location, destination: Location) -> Move {
    let mut flags = 0u8;
    let mut captured = board.piece_at(destination);

    match (piece.color(), piece.kind()) {
        (Some(color), Some(PieceKind::Pawn)) => {
            let dx = destination.x() - origin.x();
            if dx != 0 && captured.is_none() {
                if let Some(victim) = en_passant_victim(board, color, origin, dx) {
                    flags |= FLAG_EN_PASSANT;
                    captured = board.piece_at(victim);
                }
            }
            if destination.y() == color.promotion_rank() {
                flags |= FLAG_PROMOTION;
            }
        }
        (Some(_), Some(PieceKind::King)) => match destination.x() - origin.x() {
            2 => flags |= FLAG_KINGSIDE_CASTLE,
            -2 => flags |= FLAG_QUEENSIDE_CASTLE,
            _ => {}
        },
        _ => {}
    }

    Move::new(origin, destination, piece, captured, flags)
}
