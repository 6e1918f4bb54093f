//! Engine abstraction for automated players.
//!
//! Lets the game driver and binaries select a move-search strategy at runtime
//! behind a single trait object.

use crate::board_state::board::Board;
use crate::board_state::chess_types::Color;
use crate::moves::chess_move::Move;

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    /// `None` only when the side to move has no legal moves.
    pub best_move: Option<Move>,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    fn choose_move(&mut self, board: &Board, color: Color) -> EngineOutput;
}
