//! Plays the negamax engine (White) against the strategic engine (Black).
//!
//! Run with:
//! `cargo run --release --bin self_play`
//! `cargo run --release --bin self_play -- 120 3 1`  (max plies, negamax depth, strategy depth)
//!
//! Set `RUST_LOG=debug` to see engine info lines and per-candidate timings.

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use unichess::board_state::chess_types::Color;
use unichess::engines::engine_negamax::NegamaxEngine;
use unichess::engines::engine_strategic::StrategicEngine;
use unichess::engines::engine_trait::Engine;
use unichess::game::{Game, GameEvent};
use unichess::search::strategy::StrategyConfig;

fn arg_or<T: std::str::FromStr>(args: &[String], index: usize, default: T) -> T {
    args.get(index)
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let max_plies: usize = arg_or(&args, 0, 80);
    let negamax_depth: u8 = arg_or(&args, 1, 3);
    let strategy_depth: usize = arg_or(&args, 2, 1);

    let mut white = NegamaxEngine::new(negamax_depth);
    let mut black = StrategicEngine::new(StrategyConfig {
        depth: strategy_depth,
        ..StrategyConfig::default()
    });
    white.new_game();
    black.new_game();

    let mut game = Game::new();
    println!("[Event \"unichess self-play\"]");
    println!("[Date \"{}\"]", game.started_at().format("%Y.%m.%d"));
    println!("[White \"{}\"]", white.name());
    println!("[Black \"{}\"]", black.name());

    let mut last_event = GameEvent::Ok;
    while game.moves().len() < max_plies {
        let color = game.to_move();
        let engine: &mut dyn Engine = match color {
            Color::White => &mut white,
            Color::Black => &mut black,
        };

        let output = engine.choose_move(game.current_board(), color);
        for line in &output.info_lines {
            tracing::debug!(engine = engine.name(), "{line}");
        }
        let Some(mv) = output.best_move else {
            warn!(%color, "engine returned no move");
            break;
        };

        last_event = game.advance_move(&mv);
        if last_event == GameEvent::Illegal {
            warn!(%color, mv = %mv, "engine proposed an illegal move");
            break;
        }
        if last_event.is_terminal() {
            break;
        }
    }

    info!(plies = game.moves().len(), event = ?last_event, "game finished");
    println!("{}", game.game_string());
}
