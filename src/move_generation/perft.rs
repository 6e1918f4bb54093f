//! Perft: exhaustive legal-move tree counts for validating generation.

use std::thread;

use crate::board_state::board::Board;
use crate::board_state::chess_types::Color;
use crate::errors::PerftError;
use crate::moves::chess_move::Move;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }

    fn leaf() -> Self {
        PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        }
    }
}

/// Counts leaves `depth` plies below `board` with `color` to move.
pub fn perft(board: &Board, color: Color, depth: u8) -> PerftCounts {
    if depth == 0 {
        return PerftCounts::leaf();
    }

    let mut total = PerftCounts::default();
    for mv in board.legal_moves(color) {
        perft_recurse(board, mv, color, depth, &mut total);
    }
    total
}

/// Same counts as [`perft`], one scoped worker per root move.
pub fn perft_multi_threaded(
    board: &Board,
    color: Color,
    depth: u8,
) -> Result<PerftCounts, PerftError> {
    if depth == 0 {
        return Ok(PerftCounts::leaf());
    }

    let root_moves = board.legal_moves(color);
    thread::scope(|scope| {
        let handles: Vec<_> = root_moves
            .iter()
            .map(|mv| {
                let handle = scope.spawn(move || {
                    let mut local = PerftCounts::default();
                    perft_recurse(board, mv, color, depth, &mut local);
                    local
                });
                (mv, handle)
            })
            .collect();

        let mut total = PerftCounts::default();
        for (mv, handle) in handles {
            let local = handle
                .join()
                .map_err(|_| PerftError::WorkerPanicked(mv.algebraic_notation()))?;
            total.merge(local);
        }
        Ok(total)
    })
}

/// Per-move breakdown of leaf counts, for diffing against a reference engine.
/// Depth 0 has no root moves to break down and yields an empty list.
pub fn perft_divide(board: &Board, color: Color, depth: u8) -> Vec<(String, usize)> {
    if depth == 0 {
        return Vec::new();
    }
    board
        .legal_moves(color)
        .iter()
        .map(|mv| {
            let mut local = PerftCounts::default();
            perft_recurse(board, mv, color, depth, &mut local);
            (mv.algebraic_notation(), local.nodes)
        })
        .collect()
}

// `mv` is played by `color` on `parent`; `remaining` counts that ply.
fn perft_recurse(parent: &Board, mv: &Move, color: Color, remaining: u8, counts: &mut PerftCounts) {
    let child = parent.apply(mv);
    let opponent = color.opposite();

    if remaining == 1 {
        counts.nodes += 1;
        if mv.is_capture() {
            counts.captures += 1;
        }
        if mv.is_en_passant() {
            counts.en_passant += 1;
        }
        if mv.is_castle() {
            counts.castles += 1;
        }
        if mv.is_promotion() {
            counts.promotions += 1;
        }
        if child.player_has_check(opponent) {
            counts.checks += 1;
            if child.legal_moves(opponent).is_empty() {
                counts.checkmates += 1;
            }
        }
        return;
    }

    for reply in child.legal_moves(opponent) {
        perft_recurse(&child, reply, opponent, remaining - 1, counts);
    }
}
