//! Castling availability.
//!
//! Castling toward a side is available when all of the following hold:
//! - Neither the king nor that rook has ever moved, and both still stand on
//!   their home squares.
//! - Every square between them is empty.
//! - None of the squares the king starts on, crosses or lands on is attacked.

use crate::board_state::board::Board;
use crate::board_state::chess_rules::{KING_HOME_FILE, KINGSIDE_ROOK_FILE, QUEENSIDE_ROOK_FILE};
use crate::board_state::chess_types::{Color, PieceKind};
use crate::board_state::location::Location;
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::move_generation::line_of_sight::cardinal_line_of_sight_clear;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    pub const ALL: [CastleSide; 2] = [CastleSide::Kingside, CastleSide::Queenside];

    pub const fn rook_file(self) -> i8 {
        match self {
            CastleSide::Kingside => KINGSIDE_ROOK_FILE,
            CastleSide::Queenside => QUEENSIDE_ROOK_FILE,
        }
    }

    /// +1 toward the h-file, -1 toward the a-file.
    pub const fn direction(self) -> i8 {
        match self {
            CastleSide::Kingside => 1,
            CastleSide::Queenside => -1,
        }
    }

    pub const fn king_destination_file(self) -> i8 {
        KING_HOME_FILE + 2 * self.direction()
    }

    pub const fn rook_destination_file(self) -> i8 {
        KING_HOME_FILE + self.direction()
    }
}

pub fn can_castle(board: &Board, color: Color, side: CastleSide) -> bool {
    let rank = color.home_rank();
    let king_home = Location::at(KING_HOME_FILE, rank);
    let rook_home = Location::at(side.rook_file(), rank);

    if board.has_moved(king_home) || board.has_moved(rook_home) {
        return false;
    }
    if !board.piece_at(king_home).is(color, PieceKind::King)
        || !board.piece_at(rook_home).is(color, PieceKind::Rook)
    {
        return false;
    }
    if !cardinal_line_of_sight_clear(board, king_home, rook_home) {
        return false;
    }

    let enemy = color.opposite();
    (0..=2).all(|step| {
        let square = Location::at(KING_HOME_FILE + step * side.direction(), rank);
        !is_square_attacked(board, square, enemy)
    })
}

/// King destinations for every castle available to `color`, provided the
/// king is the piece on `origin`.
pub fn castle_destinations(board: &Board, color: Color, origin: Location) -> Vec<Location> {
    if origin != Location::at(KING_HOME_FILE, color.home_rank()) {
        return Vec::new();
    }
    CastleSide::ALL
        .into_iter()
        .filter(|&side| can_castle(board, color, side))
        .map(|side| Location::at(side.king_destination_file(), color.home_rank()))
        .collect()
}
