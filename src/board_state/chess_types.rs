//! Core piece and side types shared by the board, move generator and search.
//!
//! A square's occupant is stored as a packed [`PieceCode`]: the low three bits
//! hold the piece kind (zero for an empty square) and bit three marks Black.

use std::fmt;

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

pub const ALL_COLORS: [Color; 2] = [Color::White, Color::Black];

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// `+1` for White, `-1` for Black. Used to sign negamax evaluations.
    #[inline]
    pub const fn sign(self) -> i32 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Rank delta of a single pawn step.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Rank holding the king and rooks at the start of the game.
    #[inline]
    pub const fn home_rank(self) -> i8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    #[inline]
    pub const fn pawn_rank(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    #[inline]
    pub const fn promotion_rank(self) -> i8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

/// Piece kind (color is carried separately by [`PieceCode`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

pub const ALL_PIECE_KINDS: [PieceKind; 6] = [
    PieceKind::Pawn,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
    PieceKind::King,
];

impl PieceKind {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Material value used for board totals and capture scoring.
    #[inline]
    pub const fn value(self) -> i32 {
        match self {
            PieceKind::Pawn => 2,
            PieceKind::Knight => 4,
            PieceKind::Bishop => 4,
            PieceKind::Rook => 6,
            PieceKind::Queen => 10,
            PieceKind::King => 15,
        }
    }

    /// Lowercase letter used in move notation.
    #[inline]
    pub const fn symbol(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    /// Case-insensitive inverse of [`PieceKind::symbol`].
    pub fn from_symbol(ch: char) -> Option<Self> {
        match ch.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_slider(self) -> bool {
        matches!(self, PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen)
    }
}

const KIND_MASK: u8 = 0x7;
const BLACK_BIT: u8 = 0x8;

/// Packed square occupant: empty, or one of six kinds in one of two colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PieceCode(u8);

impl PieceCode {
    pub const NONE: PieceCode = PieceCode(0);

    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        let base = kind.index() as u8 + 1;
        match color {
            Color::White => PieceCode(base),
            Color::Black => PieceCode(base | BLACK_BIT),
        }
    }

    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 & KIND_MASK == 0
    }

    #[inline]
    pub const fn is_some(self) -> bool {
        !self.is_none()
    }

    #[inline]
    pub const fn kind(self) -> Option<PieceKind> {
        match self.0 & KIND_MASK {
            1 => Some(PieceKind::Pawn),
            2 => Some(PieceKind::Knight),
            3 => Some(PieceKind::Bishop),
            4 => Some(PieceKind::Rook),
            5 => Some(PieceKind::Queen),
            6 => Some(PieceKind::King),
            _ => None,
        }
    }

    /// `None` for an empty square.
    #[inline]
    pub const fn color(self) -> Option<Color> {
        if self.is_none() {
            None
        } else if self.0 & BLACK_BIT != 0 {
            Some(Color::Black)
        } else {
            Some(Color::White)
        }
    }

    #[inline]
    pub fn is_color(self, color: Color) -> bool {
        self.color() == Some(color)
    }

    #[inline]
    pub fn is(self, color: Color, kind: PieceKind) -> bool {
        self == PieceCode::new(color, kind)
    }

    /// Material value, zero for an empty square.
    #[inline]
    pub fn value(self) -> i32 {
        self.kind().map(PieceKind::value).unwrap_or(0)
    }

    /// FEN letter: uppercase for White, lowercase for Black.
    pub fn fen_char(self) -> Option<char> {
        let kind = self.kind()?;
        let symbol = kind.symbol();
        match self.color()? {
            Color::White => Some(symbol.to_ascii_uppercase()),
            Color::Black => Some(symbol),
        }
    }

    pub fn from_fen_char(ch: char) -> Option<Self> {
        let kind = PieceKind::from_symbol(ch)?;
        let color = if ch.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(PieceCode::new(color, kind))
    }
}

impl fmt::Display for PieceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fen_char().unwrap_or('.'))
    }
}
