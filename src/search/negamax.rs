//! Fixed-depth negamax search with alpha-beta pruning.
//!
//! Leaves are scored by a [`BoardScorer`] from the perspective of the side to
//! move at that leaf. Interior positions without legal moves score as mate
//! (preferring the shortest) or stalemate.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use tracing::{debug, trace};

use crate::board_state::board::Board;
use crate::board_state::chess_types::Color;
use crate::moves::chess_move::Move;
use crate::search::board_scoring::{BoardScorer, SquaredMaterialScorer};

pub const MATE_SCORE: i32 = 30000;
const INFINITY: i32 = 32000;

/// How to pick among root moves with equal scores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TieBreak {
    /// First move in enumeration order.
    #[default]
    FirstFound,
    /// Uniformly random among all best-scoring moves.
    Random,
}

#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    pub depth: u8,
    pub time_limit: Option<Duration>,
    pub tie_break: TieBreak,
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 3,
            time_limit: None,
            tie_break: TieBreak::FirstFound,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub best_score: i32,
    pub nodes: u64,
    /// False when the time limit cut the search short.
    pub completed: bool,
}

/// Best move for `color` at `depth` with the default scorer and tie-break.
pub fn best_move(board: &Board, color: Color, depth: u8) -> Option<Move> {
    let config = SearchConfig {
        depth,
        ..SearchConfig::default()
    };
    search(board, color, &SquaredMaterialScorer, &config).best_move
}

pub fn search<S: BoardScorer>(
    board: &Board,
    color: Color,
    scorer: &S,
    config: &SearchConfig,
) -> SearchResult {
    let mut ctx = SearchContext {
        scorer,
        deadline: config.time_limit.map(|limit| Instant::now() + limit),
        nodes: 0,
        timed_out: false,
    };

    if config.depth == 0 {
        return SearchResult {
            best_move: None,
            best_score: scorer.score(board, color),
            nodes: 1,
            completed: true,
        };
    }

    let moves = board.legal_moves(color);
    if moves.is_empty() {
        return SearchResult {
            best_move: None,
            best_score: terminal_score(board, color, 0),
            nodes: 1,
            completed: true,
        };
    }

    let mut alpha = -INFINITY;
    let beta = INFINITY;
    let mut best_score = -INFINITY;
    let mut tied: Vec<Move> = Vec::new();

    for mv in moves {
        if !tied.is_empty() && ctx.out_of_time() {
            break;
        }

        // Widening by one keeps scores equal to the current best exact, so
        // random tie-breaking sees every tied move.
        let window_alpha = match config.tie_break {
            TieBreak::FirstFound => alpha,
            TieBreak::Random => alpha - 1,
        };
        let child = board.apply(mv);
        let score = -ctx.negamax(
            &child,
            config.depth - 1,
            -beta,
            -window_alpha,
            color.opposite(),
            1,
        );
        trace!(mv = %mv, score, "root move scored");

        if score > best_score {
            best_score = score;
            tied.clear();
            tied.push(*mv);
        } else if score == best_score && config.tie_break == TieBreak::Random {
            tied.push(*mv);
        }
        alpha = alpha.max(score);
    }

    let best_move = match config.tie_break {
        TieBreak::FirstFound => tied.first().copied(),
        TieBreak::Random => {
            let mut rng = match config.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_rng(&mut rand::rng()),
            };
            tied.choose(&mut rng).copied()
        }
    };

    debug!(
        depth = config.depth,
        nodes = ctx.nodes,
        best_score,
        tied = tied.len(),
        timed_out = ctx.timed_out,
        "negamax search finished"
    );

    SearchResult {
        best_move,
        best_score,
        nodes: ctx.nodes,
        completed: !ctx.timed_out,
    }
}

struct SearchContext<'a, S: BoardScorer> {
    scorer: &'a S,
    deadline: Option<Instant>,
    nodes: u64,
    timed_out: bool,
}

impl<S: BoardScorer> SearchContext<'_, S> {
    fn out_of_time(&mut self) -> bool {
        if !self.timed_out {
            if let Some(deadline) = self.deadline {
                self.timed_out = Instant::now() >= deadline;
            }
        }
        self.timed_out
    }

    fn negamax(
        &mut self,
        board: &Board,
        depth: u8,
        mut alpha: i32,
        beta: i32,
        color: Color,
        ply: i32,
    ) -> i32 {
        self.nodes += 1;

        // Past the deadline every node collapses to its static score.
        if depth == 0 || self.out_of_time() {
            return self.scorer.score(board, color);
        }

        let moves = board.legal_moves(color);
        if moves.is_empty() {
            return terminal_score(board, color, ply);
        }

        let mut best = -INFINITY;
        for mv in moves {
            let child = board.apply(mv);
            let score = -self.negamax(&child, depth - 1, -beta, -alpha, color.opposite(), ply + 1);

            best = best.max(score);
            alpha = alpha.max(score);
            if alpha >= beta {
                break;
            }
        }
        best
    }
}

fn terminal_score(board: &Board, color: Color, ply: i32) -> i32 {
    if board.player_has_check(color) {
        -MATE_SCORE + ply
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::board_scoring::MaterialScorer;
    use crate::board_state::chess_types::PieceKind;

    fn loc(name: &str) -> crate::board_state::location::Location {
        name.parse().expect("test square should parse")
    }

    // Plain minimax over the same leaves, for checking pruning never changes the value.
    fn minimax<S: BoardScorer>(
        board: &Board,
        depth: u8,
        color: Color,
        ply: i32,
        scorer: &S,
    ) -> i32 {
        if depth == 0 {
            return scorer.score(board, color);
        }
        let moves = board.legal_moves(color);
        if moves.is_empty() {
            return terminal_score(board, color, ply);
        }
        moves
            .iter()
            .map(|mv| -minimax(&board.apply(mv), depth - 1, color.opposite(), ply + 1, scorer))
            .max()
            .unwrap_or(-INFINITY)
    }

    #[test]
    fn depth_zero_returns_eval_only() {
        let board = Board::new();
        let config = SearchConfig {
            depth: 0,
            ..SearchConfig::default()
        };
        let result = search(&board, Color::White, &SquaredMaterialScorer, &config);
        assert_eq!(result.best_move, None);
        assert_eq!(result.best_score, 0);
    }

    #[test]
    fn takes_the_hanging_queen() {
        let board = Board::from_fen("4k3/8/8/8/8/8/4q3/4KQ2 w - - 0 1").expect("FEN should parse");
        let mv = best_move(&board, Color::White, 1).expect("white has moves");
        assert_eq!(mv.destination(), loc("e2"));
        assert_eq!(board.apply(&mv).material(Color::Black), PieceKind::King.value());
    }

    #[test]
    fn finds_mate_in_one() {
        let board = Board::from_fen("6k1/5Q2/6K1/8/8/8/8/8 w - - 0 1").expect("FEN should parse");
        let config = SearchConfig {
            depth: 2,
            ..SearchConfig::default()
        };
        let result = search(&board, Color::White, &SquaredMaterialScorer, &config);
        let mv = result.best_move.expect("white has moves");
        assert!(board.gives_checkmate(&mv), "{mv} should mate");
        assert!(result.best_score > MATE_SCORE - 10);
    }

    #[test]
    fn no_legal_moves_returns_none() {
        let board = Board::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").expect("stalemate FEN");
        assert_eq!(best_move(&board, Color::Black, 3), None);
    }

    #[test]
    fn pruning_matches_full_minimax() {
        let board = Board::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
            .expect("kiwipete");
        let config = SearchConfig {
            depth: 2,
            ..SearchConfig::default()
        };
        let result = search(&board, Color::White, &MaterialScorer, &config);
        assert_eq!(result.best_score, minimax(&board, 2, Color::White, 0, &MaterialScorer));
        assert!(result.completed);
    }

    #[test]
    fn first_found_is_deterministic() {
        let board = Board::new();
        let config = SearchConfig {
            depth: 2,
            ..SearchConfig::default()
        };
        let first = search(&board, Color::White, &SquaredMaterialScorer, &config);
        let second = search(&board, Color::White, &SquaredMaterialScorer, &config);
        assert_eq!(first.best_move, second.best_move);
        // Every opening move scores 0 at depth 2, so the first enumerated one wins.
        assert_eq!(first.best_move, board.legal_moves(Color::White).first().copied());
    }

    #[test]
    fn seeded_random_tie_break_is_reproducible() {
        let board = Board::new();
        let config = SearchConfig {
            depth: 1,
            tie_break: TieBreak::Random,
            seed: Some(7),
            ..SearchConfig::default()
        };
        let a = search(&board, Color::White, &SquaredMaterialScorer, &config);
        let b = search(&board, Color::White, &SquaredMaterialScorer, &config);
        assert_eq!(a.best_move, b.best_move);
        assert!(a.best_move.is_some());
    }

    #[test]
    fn expired_deadline_still_returns_a_move() {
        let board = Board::new();
        let config = SearchConfig {
            depth: 4,
            time_limit: Some(Duration::ZERO),
            ..SearchConfig::default()
        };
        let result = search(&board, Color::White, &SquaredMaterialScorer, &config);
        assert!(result.best_move.is_some());
        assert!(!result.completed);
    }
}
