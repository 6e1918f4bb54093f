use crate::board_state::board::Board;
use crate::board_state::chess_types::Color;
use crate::engines::engine_trait::{Engine, EngineOutput};
use crate::search::board_scoring::{BoardScorer, SquaredMaterialScorer};
use crate::search::negamax::{search, SearchConfig};

/// Fixed-depth alpha-beta player.
pub struct NegamaxEngine<S: BoardScorer = SquaredMaterialScorer> {
    scorer: S,
    config: SearchConfig,
}

impl NegamaxEngine {
    pub fn new(depth: u8) -> Self {
        Self::with_config(
            SquaredMaterialScorer,
            SearchConfig {
                depth,
                ..SearchConfig::default()
            },
        )
    }
}

impl Default for NegamaxEngine {
    fn default() -> Self {
        Self::with_config(SquaredMaterialScorer, SearchConfig::default())
    }
}

impl<S: BoardScorer> NegamaxEngine<S> {
    pub fn with_config(scorer: S, config: SearchConfig) -> Self {
        Self { scorer, config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

impl<S: BoardScorer> Engine for NegamaxEngine<S> {
    fn name(&self) -> &str {
        "unichess negamax"
    }

    fn choose_move(&mut self, board: &Board, color: Color) -> EngineOutput {
        let mut out = EngineOutput::default();
        out.info_lines.push(format!(
            "info string negamax_engine legal_moves {}",
            board.legal_moves(color).len()
        ));

        let result = search(board, color, &self.scorer, &self.config);
        out.info_lines.push(format!(
            "info depth {} score {} nodes {}",
            self.config.depth, result.best_score, result.nodes
        ));
        if !result.completed {
            out.info_lines
                .push("info string negamax_engine time limit reached".to_owned());
        }

        out.best_move = result.best_move;
        out
    }
}
