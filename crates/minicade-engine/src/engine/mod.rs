//! Game logic and state management.
//!
//! This module builds the gameplay on top of the [`core`](crate::core) value types:
//!
//! - [`GameField`] - Single-turn state (grid, falling piece, piece queue, hold slot)
//! - [`GameStats`] - Score, level, lines and combo counters
//! - [`GameSession`] - Session state machine driven by ticks and [`Command`]s
//! - [`GameSnapshot`] - Read-only view of a session for painters
//! - [`PieceBuffer`] - Uniform or 7-bag piece generation
//! - [`ScoreLedger`] - Where finished games are recorded
//!
//! # Game Flow
//!
//! 1. Create a [`GameSession`] from an [`EngineConfig`] and a ledger
//! 2. Start it and feed player input through [`GameSession::apply`]
//! 3. Call [`GameSession::tick`] every frame so the piece falls on its own
//! 4. Locked pieces clear lines, score points and spawn the next piece
//! 5. The game ends when a new piece collides at its spawn position
//!
//! # Example
//!
//! ```
//! use minicade_engine::{Command, EngineConfig, GameSession, MemoryLedger, SessionState};
//!
//! let mut session =
//!     GameSession::new(EngineConfig::default(), Box::new(MemoryLedger::default())).unwrap();
//! session.start();
//!
//! while !session.state().is_game_over() {
//!     session.apply(Command::HardDrop).unwrap();
//! }
//!
//! assert_eq!(session.high_score(), session.stats().score());
//! session.apply(Command::Start).unwrap();
//! assert_eq!(session.state(), SessionState::Running);
//! ```

pub use self::{
    command::*, config::*, game_field::*, game_session::*, game_stats::*, ledger::*,
    piece_buffer::*, snapshot::*,
};

mod command;
mod config;
mod game_field;
mod game_session;
mod game_stats;
mod ledger;
mod piece_buffer;
mod snapshot;
