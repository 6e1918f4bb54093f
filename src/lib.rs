//! Crate root module declarations for the unichess engine.
//!
//! Exposes the immutable board model, move generation and legality checks,
//! the two search strategies (negamax and the heuristic strategic search),
//! engine wrappers and the game driver under stable module paths.

pub mod board_state {
    pub mod board;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod location;
}

pub mod moves {
    pub mod chess_move;
    pub mod notation;
}

pub mod move_generation {
    pub mod castling;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod line_of_sight;
    pub mod perft;
    pub mod pseudo_moves;
}

pub mod search {
    pub mod board_scoring;
    pub mod negamax;
    pub mod strategy;
    pub mod tactics;
}

pub mod engines {
    pub mod engine_negamax;
    pub mod engine_strategic;
    pub mod engine_trait;
}

pub mod utils {
    pub mod fen_parser;
}

pub mod errors;
pub mod game;
