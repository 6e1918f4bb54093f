use crate::board_state::board::Board;
use crate::board_state::chess_types::Color;
use crate::engines::engine_trait::{Engine, EngineOutput};
use crate::search::strategy::{choose_move, StrategyConfig};

/// Heuristic player ranking candidates by strategic value.
#[derive(Debug, Clone, Default)]
pub struct StrategicEngine {
    config: StrategyConfig,
}

impl StrategicEngine {
    pub fn new(config: StrategyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StrategyConfig {
        &self.config
    }
}

impl Engine for StrategicEngine {
    fn name(&self) -> &str {
        "unichess strategic"
    }

    fn choose_move(&mut self, board: &Board, color: Color) -> EngineOutput {
        let mut out = EngineOutput::default();
        out.info_lines.push(format!(
            "info string strategic_engine legal_moves {} depth {}",
            board.legal_moves(color).len(),
            self.config.depth
        ));

        let Some(chosen) = choose_move(board, color, &self.config) else {
            return out;
        };

        out.info_lines.push(format!(
            "info string strategic_engine {} tactical {:.2} strategic {:.2} tree {}",
            chosen.mv, chosen.tactical_value, chosen.strategic_value, chosen.tree_size
        ));
        if chosen.is_checkmate() {
            out.info_lines
                .push("info string strategic_engine checkmate".to_owned());
        }
        out.best_move = Some(chosen.mv);
        out
    }
}
