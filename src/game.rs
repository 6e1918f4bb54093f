//! Game driver: board history, move entry and end-of-game reporting.
//!
//! A `Game` owns the sequence of boards from the starting position to the
//! current one together with the moves that connect them. Input either comes
//! as move text (resolved with [`Move::parse`]) or as a `Move` value, and every
//! attempt is answered with a [`GameEvent`]. Rejected input leaves the game
//! unchanged.

use chrono::{DateTime, Local};
use tracing::{debug, info};

use crate::board_state::board::Board;
use crate::board_state::chess_types::Color;
use crate::errors::MoveError;
use crate::moves::chess_move::Move;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameEvent {
    /// Move played; the game goes on.
    Ok,
    /// Several pieces match the move text.
    Ambiguous,
    /// The move text names no reachable destination.
    Invalid,
    /// Well-formed, but leaves the mover's king capturable (or it is not the
    /// mover's turn to play that piece).
    Illegal,
    Check,
    Checkmate,
    /// Reported only with [`StalemateReporting::AsStalemate`].
    Stalemate,
    /// A stalemate reported with [`StalemateReporting::AsDraw`]; the move
    /// that produced it was played.
    Draw,
    /// Both sides offered a draw. Nothing was played.
    DrawAgreed,
}

impl GameEvent {
    /// Whether the event ends the game.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            GameEvent::Checkmate | GameEvent::Stalemate | GameEvent::Draw | GameEvent::DrawAgreed
        )
    }

    /// Whether the move was played.
    pub fn is_played(self) -> bool {
        matches!(
            self,
            GameEvent::Ok
                | GameEvent::Check
                | GameEvent::Checkmate
                | GameEvent::Stalemate
                | GameEvent::Draw
        )
    }
}

/// How a stalemate is reported to callers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StalemateReporting {
    /// Report stalemate as [`GameEvent::Draw`].
    #[default]
    AsDraw,
    AsStalemate,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GameConfig {
    pub stalemate_reporting: StalemateReporting,
}

#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    boards: Vec<Board>,
    moves: Vec<Move>,
    draw_offers: [bool; 2],
    started_at: DateTime<Local>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self::with_config(GameConfig::default())
    }

    pub fn with_config(config: GameConfig) -> Self {
        Self {
            config,
            boards: vec![Board::new()],
            moves: Vec::new(),
            draw_offers: [false; 2],
            started_at: Local::now(),
        }
    }

    /// Replays a comma-separated list of moves (as produced by
    /// [`Game::game_string`]) from the starting position. Replay stops at the
    /// first token that cannot be played; the moves before it are kept.
    pub fn from_game_string(game_string: &str) -> Self {
        Self::from_game_string_with_config(game_string, GameConfig::default())
    }

    pub fn from_game_string_with_config(game_string: &str, config: GameConfig) -> Self {
        let mut game = Self::with_config(config);
        for token in game_string.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            let event = game.advance(token);
            if !event.is_played() {
                debug!(token, ?event, "game string replay stopped");
                break;
            }
            if event.is_terminal() {
                break;
            }
        }
        game
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    pub fn current_board(&self) -> &Board {
        // `boards` always holds at least the starting position.
        &self.boards[self.boards.len() - 1]
    }

    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn last_move(&self) -> Option<&Move> {
        self.moves.last()
    }

    /// Color whose turn it is.
    pub fn to_move(&self) -> Color {
        self.current_board().side_to_move()
    }

    /// Moves played so far in canonical notation, comma-separated.
    pub fn game_string(&self) -> String {
        self.moves
            .iter()
            .map(Move::algebraic_notation)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Records (or withdraws) `color`'s draw offer. Once both sides offer,
    /// the game is drawn and further moves are refused with
    /// [`GameEvent::DrawAgreed`].
    pub fn offer_draw(&mut self, color: Color, offered: bool) {
        self.draw_offers[color.index()] = offered;
    }

    pub fn draw_agreed(&self) -> bool {
        self.draw_offers.iter().all(|&offered| offered)
    }

    /// Resolves `text` for the side to move and plays it.
    pub fn advance(&mut self, text: &str) -> GameEvent {
        if self.draw_agreed() {
            return GameEvent::DrawAgreed;
        }

        match Move::parse(self.current_board(), self.to_move(), text) {
            Ok(mv) => self.advance_move(&mv),
            Err(err) => {
                debug!(%err, "move text rejected");
                match err {
                    MoveError::InvalidMove { .. } => GameEvent::Invalid,
                    MoveError::AmbiguousMove { .. } => GameEvent::Ambiguous,
                }
            }
        }
    }

    /// Plays `mv` for the side to move if it is one of its legal moves.
    pub fn advance_move(&mut self, mv: &Move) -> GameEvent {
        if self.draw_agreed() {
            return GameEvent::DrawAgreed;
        }

        let color = self.to_move();
        let board = self.current_board();
        // Use the generated move so its flags match this board.
        let Some(legal) = board.legal_moves(color).iter().find(|m| *m == mv).copied() else {
            debug!(mv = %mv, %color, "illegal move rejected");
            return GameEvent::Illegal;
        };

        let next = board.apply(&legal);
        self.boards.push(next);
        self.moves.push(legal);

        let event = self.position_event(color.opposite());
        info!(ply = self.moves.len(), mv = %legal, ?event, "move played");
        event
    }

    /// Terminal state of the current position, if any.
    pub fn outcome(&self) -> Option<GameEvent> {
        if self.draw_agreed() {
            return Some(GameEvent::DrawAgreed);
        }
        Some(self.position_event(self.to_move())).filter(|event| event.is_terminal())
    }

    // Status of the current board from the viewpoint of `color`, the side to move.
    fn position_event(&self, color: Color) -> GameEvent {
        let board = self.current_board();
        let in_check = board.player_has_check(color);
        if board.legal_moves(color).is_empty() {
            if in_check {
                GameEvent::Checkmate
            } else {
                match self.config.stalemate_reporting {
                    StalemateReporting::AsDraw => GameEvent::Draw,
                    StalemateReporting::AsStalemate => GameEvent::Stalemate,
                }
            }
        } else if in_check {
            GameEvent::Check
        } else {
            GameEvent::Ok
        }
    }
}
