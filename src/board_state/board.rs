//! Immutable board state.
//!
//! A `Board` is never modified once constructed: applying a move builds a new
//! child board from the parent's state. Each board lazily computes and keeps
//! its own pseudo-legal and legal move lists (one of each per color), so
//! repeated queries against the same board are free and always agree.
//!
//! All derived data lives behind `OnceLock`, which keeps `Board` `Send + Sync`
//! and lets search workers share one board across threads without copying.

use std::fmt;
use std::sync::OnceLock;

use crate::board_state::chess_rules::BACK_RANK;
use crate::board_state::chess_types::*;
use crate::board_state::location::Location;
use crate::errors::LayoutResult;
use crate::move_generation::castling::CastleSide;
use crate::move_generation::legal_move_checks::{self, Outcome};
use crate::move_generation::legal_move_generator::generate_legal_moves;
use crate::move_generation::pseudo_moves::generate_pseudo_legal_moves;
use crate::moves::chess_move::Move;
use crate::utils::fen_parser::parse_fen;

pub struct Board {
    squares: [PieceCode; 64],

    // Number of plies played to reach this board; even means White to move.
    iteration: u32,

    // Sum of piece values per color, indexed by `Color::index`.
    material: [i32; 2],

    // Bitset of squares whose occupant has moved (or been moved onto) at least once.
    has_moved: u64,

    // Pawn that double-pushed on the ply that produced this board.
    en_passant: Option<Location>,

    // Captured pieces in capture order.
    captured: Vec<PieceCode>,

    pseudo_legal: [OnceLock<Vec<Move>>; 2],
    legal: [OnceLock<Vec<Move>>; 2],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Board {
    /// Copies position state only; the clone computes its own move lists.
    fn clone(&self) -> Self {
        Self {
            squares: self.squares,
            iteration: self.iteration,
            material: self.material,
            has_moved: self.has_moved,
            en_passant: self.en_passant,
            captured: self.captured.clone(),
            pseudo_legal: Default::default(),
            legal: Default::default(),
        }
    }
}

impl Board {
    /// Standard starting position, White to move.
    pub fn new() -> Self {
        let mut board = Self::empty(0);
        for (file, kind) in BACK_RANK.iter().enumerate() {
            let x = file as i8;
            for color in ALL_COLORS {
                board.put(Location::at(x, color.home_rank()), PieceCode::new(color, *kind));
                board.put(
                    Location::at(x, color.pawn_rank()),
                    PieceCode::new(color, PieceKind::Pawn),
                );
            }
        }
        board.recount_material();
        board
    }

    /// Position from a FEN string (see [`crate::utils::fen_parser`]).
    pub fn from_fen(fen: &str) -> LayoutResult<Self> {
        parse_fen(fen)
    }

    /// Board with no pieces. Only used while assembling a position.
    pub(crate) fn empty(iteration: u32) -> Self {
        Self {
            squares: [PieceCode::NONE; 64],
            iteration,
            material: [0; 2],
            has_moved: 0,
            en_passant: None,
            captured: Vec::new(),
            pseudo_legal: Default::default(),
            legal: Default::default(),
        }
    }

    // --- construction-time mutators; never called on a published board ---

    pub(crate) fn put(&mut self, location: Location, piece: PieceCode) {
        self.squares[location.index()] = piece;
    }

    pub(crate) fn mark_moved(&mut self, location: Location) {
        self.has_moved |= 1u64 << location.index();
    }

    pub(crate) fn set_en_passant(&mut self, pawn: Option<Location>) {
        self.en_passant = pawn;
    }

    pub(crate) fn recount_material(&mut self) {
        let mut material = [0; 2];
        for piece in self.squares {
            if let Some(color) = piece.color() {
                material[color.index()] += piece.value();
            }
        }
        self.material = material;
    }

    fn relocate(&mut self, from: Location, to: Location) {
        let piece = self.squares[from.index()];
        self.squares[to.index()] = piece;
        self.squares[from.index()] = PieceCode::NONE;
        self.mark_moved(from);
        self.mark_moved(to);
    }

    // --- queries ---

    #[inline]
    pub fn piece_at(&self, location: Location) -> PieceCode {
        self.squares[location.index()]
    }

    #[inline]
    pub fn is_empty(&self, location: Location) -> bool {
        self.piece_at(location).is_none()
    }

    #[inline]
    pub fn iteration(&self) -> u32 {
        self.iteration
    }

    /// Color to move, derived from the ply counter.
    #[inline]
    pub fn side_to_move(&self) -> Color {
        if self.iteration % 2 == 0 {
            Color::White
        } else {
            Color::Black
        }
    }

    #[inline]
    pub fn material(&self, color: Color) -> i32 {
        self.material[color.index()]
    }

    #[inline]
    pub fn has_moved(&self, location: Location) -> bool {
        self.has_moved & (1u64 << location.index()) != 0
    }

    /// Square of the pawn that may be captured en passant on this board.
    #[inline]
    pub fn en_passant_square(&self) -> Option<Location> {
        self.en_passant
    }

    pub fn captured(&self) -> &[PieceCode] {
        &self.captured
    }

    /// Occupied squares of `color`, a1 first.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Location, PieceCode)> + '_ {
        Location::all()
            .map(move |location| (location, self.piece_at(location)))
            .filter(move |(_, piece)| piece.is_color(color))
    }

    pub fn king_location(&self, color: Color) -> Option<Location> {
        let king = PieceCode::new(color, PieceKind::King);
        Location::all().find(|&location| self.piece_at(location) == king)
    }

    /// Piece placement field of FEN, rank 8 first.
    pub fn placement(&self) -> String {
        let mut out = String::with_capacity(72);
        for y in (0..8).rev() {
            let mut empty_run = 0;
            for x in 0..8 {
                match self.piece_at(Location::at(x, y)).fen_char() {
                    Some(ch) => {
                        if empty_run > 0 {
                            out.push_str(&empty_run.to_string());
                            empty_run = 0;
                        }
                        out.push(ch);
                    }
                    None => empty_run += 1,
                }
            }
            if empty_run > 0 {
                out.push_str(&empty_run.to_string());
            }
            if y > 0 {
                out.push('/');
            }
        }
        out
    }

    // --- move lists and rule queries ---

    /// Moves obeying each piece's movement rule, ignoring own-king safety.
    pub fn pseudo_legal_moves(&self, color: Color) -> &[Move] {
        self.pseudo_legal[color.index()].get_or_init(|| generate_pseudo_legal_moves(self, color))
    }

    /// Pseudo-legal moves that do not leave `color`'s king capturable.
    pub fn legal_moves(&self, color: Color) -> &[Move] {
        self.legal[color.index()].get_or_init(|| generate_legal_moves(self, color))
    }

    /// True when `color`'s king can be captured by an opposing pseudo-legal move.
    pub fn player_has_check(&self, color: Color) -> bool {
        legal_move_checks::player_has_check(self, color)
    }

    /// Alias of [`Board::player_has_check`].
    pub fn is_in_check(&self, color: Color) -> bool {
        self.player_has_check(color)
    }

    /// `Some` once `color` has no legal moves left.
    pub fn outcome(&self, color: Color) -> Option<Outcome> {
        legal_move_checks::outcome(self, color)
    }

    /// Whether playing `mv` leaves the opponent mated.
    pub fn gives_checkmate(&self, mv: &Move) -> bool {
        legal_move_checks::gives_checkmate(self, mv)
    }

    // --- successor construction ---

    /// Builds the board that results from playing `mv` here.
    ///
    /// Copies this board's position, performs the primary relocation, then the
    /// move's side effects: en-passant removal, castling rook relocation and
    /// promotion to a queen. The en-passant window of this board is not carried
    /// over. `mv` is expected to come from this board's move lists.
    pub fn apply(&self, mv: &Move) -> Board {
        let mut next = Board {
            squares: self.squares,
            iteration: self.iteration + 1,
            material: self.material,
            has_moved: self.has_moved,
            en_passant: None,
            captured: self.captured.clone(),
            pseudo_legal: Default::default(),
            legal: Default::default(),
        };

        let origin = mv.origin();
        let destination = mv.destination();
        let mover = self.piece_at(origin);

        let target = self.piece_at(destination);
        if target.is_some() {
            next.captured.push(target);
        }
        next.relocate(origin, destination);

        if let (Some(color), Some(PieceKind::Pawn)) = (mover.color(), mover.kind()) {
            if origin.x() == destination.x() && (destination.y() - origin.y()).abs() == 2 {
                next.en_passant = Some(destination);
            }
            if destination.y() == color.promotion_rank() {
                next.put(destination, PieceCode::new(color, PieceKind::Queen));
            }
        }

        let rank = origin.y();
        if mv.is_en_passant() {
            let victim = Location::at(destination.x(), rank);
            next.captured.push(next.piece_at(victim));
            next.put(victim, PieceCode::NONE);
        } else if let Some(side) = castle_side(mv) {
            next.relocate(
                Location::at(side.rook_file(), rank),
                Location::at(side.rook_destination_file(), rank),
            );
        }

        next.recount_material();
        next
    }

    /// Copy of this position with one square emptied, used to probe what a
    /// sliding piece would see through an attacked piece.
    pub(crate) fn without_piece(&self, location: Location) -> Board {
        let mut probe = self.clone();
        probe.put(location, PieceCode::NONE);
        probe.recount_material();
        probe
    }
}

fn castle_side(mv: &Move) -> Option<CastleSide> {
    if mv.is_kingside_castle() {
        Some(CastleSide::Kingside)
    } else if mv.is_queenside_castle() {
        Some(CastleSide::Queenside)
    } else {
        None
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("placement", &self.placement())
            .field("iteration", &self.iteration)
            .field("material", &self.material)
            .field("en_passant", &self.en_passant)
            .finish()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board#{}: {} to move", self.iteration, self.side_to_move())
    }
}
