//! Strategic move selection over a shallow reply tree.
//!
//! Every legal move becomes a [`SmartMove`] candidate. Its strategic value
//! starts from its own tactical value and adds, for each depth of a shallow
//! tree, the average outcome at that depth weighted by `1 / (depth + 1)`:
//! the opponent answers with its single best tactical reply, the mover's
//! replies to that are scored tactically, and their average minus the
//! opponent reply's score is the depth's sample. The tree only branches on
//! distinct tactical values, which keeps it small.
//!
//! Candidates are independent, so each one is evaluated on its own scoped
//! thread against the shared immutable root board.

use std::thread;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use tracing::{debug, warn};

use crate::board_state::board::Board;
use crate::board_state::chess_types::Color;
use crate::moves::chess_move::Move;
use crate::search::negamax::TieBreak;
use crate::search::tactics::{
    tactical_breakdown, tactical_value, TacticalBreakdown, TacticalWeights,
};

/// Strategic value of a candidate that mates on the spot.
pub const CHECKMATE_VALUE: f64 = 1_000.0;

/// Sample recorded when a line in the tree ends in mate.
const MATE_LINE_VALUE: f64 = 100.0;

#[derive(Debug, Clone, Copy)]
pub struct StrategyConfig {
    /// Reply-tree depth below each candidate; 0 ranks on tactics alone.
    pub depth: usize,
    /// One worker thread per candidate when true.
    pub parallel: bool,
    pub tie_break: TieBreak,
    pub seed: Option<u64>,
    pub weights: TacticalWeights,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            depth: 2,
            parallel: true,
            tie_break: TieBreak::Random,
            seed: None,
            weights: TacticalWeights::default(),
        }
    }
}

/// A legal move with its heuristic scores.
#[derive(Debug, Clone)]
pub struct SmartMove {
    pub mv: Move,
    pub material_value: i32,
    pub tactical: TacticalBreakdown,
    pub tactical_value: f64,
    pub strategic_value: f64,
    /// Unweighted average sample per tree depth, shallowest first.
    pub depth_averages: Vec<f64>,
    /// Number of positions scored while building the tree.
    pub tree_size: usize,
}

impl SmartMove {
    /// Candidate with tactical scores only; the strategic value starts equal
    /// to the tactical one.
    pub fn new(board: &Board, mv: &Move, weights: &TacticalWeights) -> Self {
        let tactical = tactical_breakdown(board, mv, weights);
        let tactical_value = tactical.total();
        Self {
            mv: *mv,
            material_value: mv.material_value(),
            tactical,
            tactical_value,
            strategic_value: tactical_value,
            depth_averages: Vec::new(),
            tree_size: 0,
        }
    }

    pub fn is_checkmate(&self) -> bool {
        self.mv.is_checkmate()
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct DepthSamples {
    sum: f64,
    count: usize,
}

impl DepthSamples {
    fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn average(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }
}

/// Scores one root candidate of `color`, including its reply tree.
pub fn evaluate_candidate(
    board: &Board,
    color: Color,
    mv: &Move,
    config: &StrategyConfig,
) -> SmartMove {
    let started = Instant::now();
    let mut candidate = SmartMove::new(board, mv, &config.weights);

    let opponent = color.opposite();
    let child = board.apply(mv);
    if child.legal_moves(opponent).is_empty() {
        if child.player_has_check(opponent) {
            candidate.mv = candidate.mv.with_checkmate();
            candidate.strategic_value = CHECKMATE_VALUE;
        } else {
            candidate.strategic_value = 0.0;
        }
        return candidate;
    }

    let mut samples = vec![DepthSamples::default(); config.depth];
    let mut tree_size = 0;
    explore(&child, color, 0, config, &mut samples, &mut tree_size);

    candidate.depth_averages = samples.iter().map(DepthSamples::average).collect();
    candidate.strategic_value = candidate.tactical_value
        + candidate
            .depth_averages
            .iter()
            .enumerate()
            .map(|(level, average)| average / (level + 2) as f64)
            .sum::<f64>();
    candidate.tree_size = tree_size;

    debug!(
        mv = %candidate.mv,
        tactical = candidate.tactical_value,
        strategic = candidate.strategic_value,
        tree_size,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "candidate evaluated"
    );
    candidate
}

// `position` has the opponent of `color` to move.
fn explore(
    position: &Board,
    color: Color,
    level: usize,
    config: &StrategyConfig,
    samples: &mut [DepthSamples],
    tree_size: &mut usize,
) {
    if level >= samples.len() {
        return;
    }

    let opponent = color.opposite();
    let replies = position.legal_moves(opponent);
    if replies.is_empty() {
        let sample = if position.player_has_check(opponent) {
            MATE_LINE_VALUE
        } else {
            0.0
        };
        samples[level].push(sample);
        return;
    }

    let mut best_reply = &replies[0];
    let mut best_reply_value = f64::NEG_INFINITY;
    for reply in replies {
        let value = tactical_value(position, reply, &config.weights);
        if value > best_reply_value {
            best_reply = reply;
            best_reply_value = value;
        }
    }
    *tree_size += replies.len();

    let after_reply = position.apply(best_reply);
    let submoves = after_reply.legal_moves(color);
    if submoves.is_empty() {
        let sample = if after_reply.player_has_check(color) {
            -MATE_LINE_VALUE
        } else {
            0.0
        };
        samples[level].push(sample);
        return;
    }

    let values: Vec<f64> = submoves
        .iter()
        .map(|sub| tactical_value(&after_reply, sub, &config.weights))
        .collect();
    *tree_size += submoves.len();

    let average = values.iter().sum::<f64>() / values.len() as f64;
    samples[level].push(average - best_reply_value);

    let mut explored: Vec<f64> = Vec::new();
    for (sub, value) in submoves.iter().zip(values) {
        if explored.contains(&value) {
            continue;
        }
        explored.push(value);
        explore(&after_reply.apply(sub), color, level + 1, config, samples, tree_size);
    }
}

/// All legal candidates of `color`, best strategic value first. Equal values
/// keep move-enumeration order.
pub fn rank_candidates(board: &Board, color: Color, config: &StrategyConfig) -> Vec<SmartMove> {
    let moves = board.legal_moves(color);

    let mut candidates: Vec<SmartMove> = if config.parallel {
        thread::scope(|scope| {
            let handles: Vec<_> = moves
                .iter()
                .map(|mv| (mv, scope.spawn(move || evaluate_candidate(board, color, mv, config))))
                .collect();

            handles
                .into_iter()
                .filter_map(|(mv, handle)| match handle.join() {
                    Ok(candidate) => Some(candidate),
                    Err(_) => {
                        warn!(mv = %mv, "strategy worker panicked; dropping candidate");
                        None
                    }
                })
                .collect()
        })
    } else {
        moves
            .iter()
            .map(|mv| evaluate_candidate(board, color, mv, config))
            .collect()
    };

    candidates.sort_by(|a, b| b.strategic_value.total_cmp(&a.strategic_value));
    candidates
}

/// Highest-ranked candidate, ties at the top resolved by `config.tie_break`.
pub fn choose_move(board: &Board, color: Color, config: &StrategyConfig) -> Option<SmartMove> {
    let candidates = rank_candidates(board, color, config);
    let top = candidates.first()?.strategic_value;
    let tied: Vec<&SmartMove> = candidates
        .iter()
        .take_while(|candidate| candidate.strategic_value == top)
        .collect();

    let chosen = match config.tie_break {
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
        candidates = candidates.len(),
        tied = tied.len(),
        top,
        "strategic choice made"
    );
    chosen.cloned()
}
