//! Tactical scoring of a single move.
//!
//! A move's tactical value sums five signals, each measured on the position
//! the move produces:
//! - material: value of the piece captured.
//! - capture risk: whether the moved piece can be taken, and whether the
//!   trade-back favors the mover.
//! - potential material: what the moved piece attacks next, with bonuses for
//!   giving check and for covering the enemy king's escape squares.
//! - skewer: for sliders, a piece revealed behind one it attacks.
//! - discovered attack: change in the mover's total number of attacks.

use crate::board_state::board::Board;
use crate::board_state::chess_types::{Color, PieceKind};
use crate::board_state::location::Location;
use crate::move_generation::pseudo_moves::{attacks, pseudo_moves};
use crate::moves::chess_move::Move;

/// Multipliers for each tactical signal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TacticalWeights {
    pub material: f64,
    pub capture_risk: f64,
    pub potential_material: f64,
    pub check_bonus: f64,
    pub escape_square_bonus: f64,
    pub skewer: f64,
    pub discovered_attack: f64,
}

impl Default for TacticalWeights {
    fn default() -> Self {
        Self {
            material: 3.0,
            capture_risk: 1.0,
            potential_material: 0.5,
            check_bonus: 2.0,
            escape_square_bonus: 0.5,
            skewer: 0.5,
            discovered_attack: 0.25,
        }
    }
}

/// Weighted tactical signals of one move.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TacticalBreakdown {
    pub material: f64,
    pub capture_risk: f64,
    pub potential_material: f64,
    pub skewer: f64,
    pub discovered_attack: f64,
}

impl TacticalBreakdown {
    pub fn total(&self) -> f64 {
        self.material
            + self.capture_risk
            + self.potential_material
            + self.skewer
            + self.discovered_attack
    }
}

/// Scores `mv` as played on `board`.
pub fn tactical_breakdown(
    board: &Board,
    mv: &Move,
    weights: &TacticalWeights,
) -> TacticalBreakdown {
    let Some(color) = mv.piece().color() else {
        return TacticalBreakdown::default();
    };
    let child = board.apply(mv);

    TacticalBreakdown {
        material: weights.material * f64::from(mv.material_value()),
        capture_risk: weights.capture_risk * capture_risk(&child, mv.destination(), color),
        potential_material: potential_material(&child, mv.destination(), color, weights),
        skewer: weights.skewer * skewer(&child, mv.destination(), color),
        discovered_attack: weights.discovered_attack * discovered_attack(board, &child, color),
    }
}

pub fn tactical_value(board: &Board, mv: &Move, weights: &TacticalWeights) -> f64 {
    tactical_breakdown(board, mv, weights).total()
}

/// Exchange outcome on `square` after the mover placed a piece there.
///
/// The opponent takes with its cheapest legal capturer. If the mover can
/// legally take back and the capturer is worth more than the piece lost, the
/// difference is awarded; otherwise the lost piece's value is the penalty.
fn capture_risk(child: &Board, square: Location, color: Color) -> f64 {
    let opponent = color.opposite();
    let placed_value = child.piece_at(square).value();

    let Some(capture) = child
        .legal_moves(opponent)
        .iter()
        .filter(|reply| reply.destination() == square)
        .min_by_key(|reply| reply.piece().value())
    else {
        return 0.0;
    };

    let after_capture = child.apply(capture);
    let can_recapture = after_capture
        .legal_moves(color)
        .iter()
        .any(|reply| reply.destination() == square);

    let delta = capture.piece().value() - placed_value;
    if can_recapture && delta > 0 {
        f64::from(delta)
    } else {
        -f64::from(placed_value)
    }
}

fn potential_material(
    child: &Board,
    square: Location,
    color: Color,
    weights: &TacticalWeights,
) -> f64 {
    let opponent = color.opposite();
    let piece = child.piece_at(square);

    let mut material = 0;
    let mut gives_check = false;
    for target in pseudo_moves(piece, square, child) {
        let occupant = child.piece_at(target);
        if !occupant.is_color(opponent) {
            continue;
        }
        match occupant.kind() {
            Some(PieceKind::King) => gives_check = true,
            _ => material += occupant.value(),
        }
    }

    let covered_escapes = child.king_location(opponent).map_or(0, |king| {
        king_neighbours(king)
            .filter(|&escape| !child.piece_at(escape).is_color(opponent))
            .filter(|&escape| attacks(child, square, escape))
            .count()
    });

    let mut value = weights.potential_material * f64::from(material);
    if gives_check {
        value += weights.check_bonus;
    }
    value + weights.escape_square_bonus * covered_escapes as f64
}

fn king_neighbours(king: Location) -> impl Iterator<Item = Location> {
    (-1..=1)
        .flat_map(|dx| (-1..=1).map(move |dy| (dx, dy)))
        .filter(|&(dx, dy)| dx != 0 || dy != 0)
        .filter_map(move |(dx, dy)| king.offset(dx, dy))
}

/// Value of the best enemy piece a slider on `square` would hit if one of
/// its current targets stepped aside.
fn skewer(child: &Board, square: Location, color: Color) -> f64 {
    let piece = child.piece_at(square);
    if !piece.kind().is_some_and(PieceKind::is_slider) {
        return 0.0;
    }

    let targets = attacked_enemies(child, square, color);
    let mut best = 0;
    for &front in &targets {
        let probe = child.without_piece(front);
        if attacked_enemies(&probe, square, color).len() < targets.len() {
            continue;
        }
        if let Some(behind) = first_piece_beyond(child, square, front) {
            let occupant = child.piece_at(behind);
            if occupant.is_color(color.opposite()) {
                best = best.max(occupant.value());
            }
        }
    }
    f64::from(best)
}

fn attacked_enemies(board: &Board, square: Location, color: Color) -> Vec<Location> {
    pseudo_moves(board.piece_at(square), square, board)
        .into_iter()
        .filter(|&target| board.piece_at(target).is_color(color.opposite()))
        .collect()
}

// First occupied square past `front` on the ray from `from` through `front`.
fn first_piece_beyond(board: &Board, from: Location, front: Location) -> Option<Location> {
    let dx = (front.x() - from.x()).signum();
    let dy = (front.y() - from.y()).signum();
    let mut current = front;
    while let Some(next) = current.offset(dx, dy) {
        if board.piece_at(next).is_some() {
            return Some(next);
        }
        current = next;
    }
    None
}

fn discovered_attack(before: &Board, after: &Board, color: Color) -> f64 {
    let count = |board: &Board| {
        board
            .pseudo_legal_moves(color)
            .iter()
            .filter(|mv| mv.is_capture())
            .count() as f64
    };
    count(after) - count(before)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(name: &str) -> Location {
        name.parse().expect("test square should parse")
    }

    fn breakdown(fen: &str, from: &str, to: &str) -> TacticalBreakdown {
        let board = Board::from_fen(fen).expect("FEN should parse");
        let mv = Move::from_locations(&board, loc(from), loc(to)).expect("test move should exist");
        tactical_breakdown(&board, &mv, &TacticalWeights::default())
    }

    #[test]
    fn capturing_scores_material() {
        let b = breakdown("4k3/8/8/3r4/8/8/8/3QK3 w - - 0 1", "d1", "d5");
        assert_eq!(b.material, 3.0 * 6.0);
        assert_eq!(b.capture_risk, 0.0);
    }

    #[test]
    fn walking_into_a_defended_square_is_penalized() {
        // The queen lands where a pawn can take it.
        let b = breakdown("4k3/8/8/2p5/8/8/8/3QK3 w - - 0 1", "d1", "d4");
        assert_eq!(b.capture_risk, -10.0);
    }

    #[test]
    fn favorable_trade_back_is_rewarded() {
        // The queen can take the pawn on e4, and the f3 pawn takes back.
        let b = breakdown("4k3/8/8/3q4/8/4PP2/8/4K3 w - - 0 1", "e3", "e4");
        assert_eq!(b.capture_risk, f64::from(10 - 2));
    }

    #[test]
    fn check_and_escape_squares_add_potential() {
        let weights = TacticalWeights::default();
        let b = breakdown("7k/8/8/8/8/8/8/R3K3 w - - 0 1", "a1", "a8");
        // Checks along the eighth rank and covers g8 on the way.
        assert!(b.potential_material >= weights.check_bonus + weights.escape_square_bonus);
    }

    #[test]
    fn skewer_finds_piece_behind_attacked_piece() {
        // Rook to e1 attacks the king on e5; the queen on e8 sits behind it.
        let b = breakdown("4q3/8/8/4k3/8/8/8/R5K1 w - - 0 1", "a1", "e1");
        assert_eq!(b.skewer, 0.5 * 10.0);
    }

    #[test]
    fn discovered_attack_counts_new_targets() {
        // Moving the bishop off the d-file opens the rook onto the black queen.
        let b = breakdown("3qk3/8/8/8/8/8/3B4/3RK3 w - - 0 1", "d2", "g5");
        assert!(b.discovered_attack > 0.0);
    }
}
