//! Canonical chess-rule constants.
//!
//! Starting layout and the fixed files that castling is defined against.

use crate::board_state::chess_types::PieceKind;

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Back-rank pieces from the a-file to the h-file, identical for both sides.
pub const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

pub const KING_HOME_FILE: i8 = 4;
pub const KINGSIDE_ROOK_FILE: i8 = 7;
pub const QUEENSIDE_ROOK_FILE: i8 = 0;
