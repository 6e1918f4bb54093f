//! Pluggable static evaluation for negamax leaves.
//!
//! Search stays independent of the heuristic by delegating leaf scoring to
//! this trait, so alternate evaluations can be swapped without touching it.

use crate::board_state::board::Board;
use crate::board_state::chess_types::Color;

pub trait BoardScorer: Send + Sync {
    /// Score of `board` from `perspective`'s point of view; higher is better.
    fn score(&self, board: &Board, perspective: Color) -> i32;
}

/// Default leaf evaluation: difference of squared material totals.
///
/// Squaring rewards trading down while ahead, since the same exchange shrinks
/// the opponent's square faster than the leader's.
#[derive(Debug, Clone, Copy, Default)]
pub struct SquaredMaterialScorer;

impl BoardScorer for SquaredMaterialScorer {
    fn score(&self, board: &Board, perspective: Color) -> i32 {
        let white = board.material(Color::White);
        let black = board.material(Color::Black);
        perspective.sign() * (white * white - black * black)
    }
}

/// Plain material difference.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl BoardScorer for MaterialScorer {
    fn score(&self, board: &Board, perspective: Color) -> i32 {
        perspective.sign() * (board.material(Color::White) - board.material(Color::Black))
    }
}

/// The opponent's squared material, signed by the perspective's color.
///
/// Not antisymmetric between perspectives; not the default.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpponentMaterialScorer;

impl BoardScorer for OpponentMaterialScorer {
    fn score(&self, board: &Board, perspective: Color) -> i32 {
        let opponent = board.material(perspective.opposite());
        perspective.sign() * opponent * opponent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balanced_position_scores_zero() {
        let board = Board::new();
        assert_eq!(SquaredMaterialScorer.score(&board, Color::White), 0);
        assert_eq!(MaterialScorer.score(&board, Color::Black), 0);
    }

    #[test]
    fn scores_are_antisymmetric_between_perspectives() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/3QK3 w - - 0 1").expect("FEN should parse");
        let white = SquaredMaterialScorer.score(&board, Color::White);
        let black = SquaredMaterialScorer.score(&board, Color::Black);
        assert_eq!(white, 25 * 25 - 15 * 15);
        assert_eq!(white, -black);
        assert_eq!(MaterialScorer.score(&board, Color::White), 10);
    }

    #[test]
    fn opponent_material_scorer_squares_the_other_side() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/3QK3 w - - 0 1").expect("FEN should parse");
        assert_eq!(OpponentMaterialScorer.score(&board, Color::White), 15 * 15);
        assert_eq!(OpponentMaterialScorer.score(&board, Color::Black), -(25 * 25));
    }

    #[test]
    fn opponent_material_scorer_drives_search() {
        use crate::search::negamax::{search, SearchConfig};

        let board = Board::from_fen("4k3/8/8/8/8/8/4q3/4KQ2 w - - 0 1").expect("FEN should parse");
        let config = SearchConfig {
            depth: 1,
            ..SearchConfig::default()
        };
        let result = search(&board, Color::White, &OpponentMaterialScorer, &config);
        assert!(result.best_move.is_some());
        assert!(result.completed);
    }
}
