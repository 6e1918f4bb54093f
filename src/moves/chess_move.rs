//! Move value type.
//!
//! A `Move` records where a piece went, what it was, what it took and which
//! special rule produced it. It holds no reference to the board it was made
//! on and caches no successor board: the successor is always rebuilt with
//! `Board::apply`, so long-lived move lists never pin search trees in memory.

use std::hash::{Hash, Hasher};

use crate::board_state::board::Board;
use crate::board_state::chess_types::PieceCode;
use crate::board_state::location::Location;
use crate::errors::{MoveError, MoveResult};
use crate::move_generation::pseudo_moves::classify_move;

pub const FLAG_EN_PASSANT: u8 = 1 << 0;
pub const FLAG_KINGSIDE_CASTLE: u8 = 1 << 1;
pub const FLAG_QUEENSIDE_CASTLE: u8 = 1 << 2;
pub const FLAG_PROMOTION: u8 = 1 << 3;
pub const FLAG_CHECKMATE: u8 = 1 << 4;

#[derive(Debug, Clone, Copy)]
pub struct Move {
    origin: Location,
    destination: Location,
    piece: PieceCode,
    captured: PieceCode,
    flags: u8,
}

impl Move {
    pub(crate) const fn new(
        origin: Location,
        destination: Location,
        piece: PieceCode,
        captured: PieceCode,
        flags: u8,
    ) -> Self {
        Self {
            origin,
            destination,
            piece,
            captured,
            flags,
        }
    }

    /// Builds the move `origin -> destination` on `board`, classifying its
    /// special flags. Fails unless the piece on `origin` can pseudo-legally
    /// reach `destination`; king safety is not checked here.
    pub fn from_locations(
        board: &Board,
        origin: Location,
        destination: Location,
    ) -> MoveResult<Move> {
        classify_move(board, origin, destination).ok_or_else(|| {
            MoveError::invalid(
                &format!("{origin}{destination}"),
                "no piece on the origin can move to the destination",
            )
        })
    }

    #[inline]
    pub fn origin(&self) -> Location {
        self.origin
    }

    #[inline]
    pub fn destination(&self) -> Location {
        self.destination
    }

    /// The piece that moved, as it stood before moving.
    #[inline]
    pub fn piece(&self) -> PieceCode {
        self.piece
    }

    /// The piece taken by this move; the passed pawn for en passant.
    #[inline]
    pub fn captured(&self) -> PieceCode {
        self.captured
    }

    #[inline]
    pub fn flags(&self) -> u8 {
        self.flags
    }

    /// Value of the captured piece, 0 for quiet moves.
    #[inline]
    pub fn material_value(&self) -> i32 {
        self.captured.value()
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    #[inline]
    pub fn is_en_passant(&self) -> bool {
        self.flags & FLAG_EN_PASSANT != 0
    }

    #[inline]
    pub fn is_kingside_castle(&self) -> bool {
        self.flags & FLAG_KINGSIDE_CASTLE != 0
    }

    #[inline]
    pub fn is_queenside_castle(&self) -> bool {
        self.flags & FLAG_QUEENSIDE_CASTLE != 0
    }

    #[inline]
    pub fn is_castle(&self) -> bool {
        self.flags & (FLAG_KINGSIDE_CASTLE | FLAG_QUEENSIDE_CASTLE) != 0
    }

    #[inline]
    pub fn is_promotion(&self) -> bool {
        self.flags & FLAG_PROMOTION != 0
    }

    /// Set by the strategic search once it has seen this move mate.
    #[inline]
    pub fn is_checkmate(&self) -> bool {
        self.flags & FLAG_CHECKMATE != 0
    }

    pub(crate) fn with_checkmate(mut self) -> Self {
        self.flags |= FLAG_CHECKMATE;
        self
    }
}

// Identity is the pair of squares; flags and piece codes are derived data.
impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.origin == other.origin && self.destination == other.destination
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.origin.hash(state);
        self.destination.hash(state);
    }
}
