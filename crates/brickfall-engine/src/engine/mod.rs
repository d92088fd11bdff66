//! Session-level game logic.
//!
//! This module drives the core data structures through a whole game:
//!
//! - [`GameSession`] - The grid, the falling piece and the buffered events of one game
//! - [`Command`] / [`CommandQueue`] - Player and timer input, applied in order
//! - [`PieceSource`] - Where new pieces come from ([`RandomPieceSource`], [`ScriptedPieceSource`])
//! - [`PieceSeed`] - Seed for deterministic piece generation
//! - [`GameStats`] - Locked pieces and cleared rows of the current game
//!
//! # Game Flow
//!
//! 1. [`GameSession::start`] resets the grid and spawns the first piece above it
//! 2. Key presses and timer ticks are queued as [`Command`]s and processed
//! 3. A piece that can no longer fall is locked and completed rows are removed
//! 4. A new piece spawns; the game ends when a piece lands before entering the grid
//!
//! # Example
//!
//! ```
//! use brickfall_engine::{GameSession, PieceSeed};
//!
//! let mut session = GameSession::with_seed(PieceSeed::from(42));
//! session.start();
//!
//! while session.move_down().is_some_and(|outcome| outcome.is_fell()) {}
//!
//! assert_eq!(session.stats().locked_pieces(), 1);
//! assert!(session.drain_events().any(|event| event.is_grid_redrawn()));
//! ```

pub use self::{command::*, game_session::*, game_stats::*, piece_source::*};

mod command;
mod game_session;
mod game_stats;
mod piece_source;
