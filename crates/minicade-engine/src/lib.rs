//! Piece/grid engine for the minicade Tetris game.
//!
//! The crate is split in two layers:
//!
//! - [`core`] - value types: shape matrices, pieces and the locked-cell grid
//! - [`engine`] - game logic: piece queue, field, statistics, session state machine,
//!   render snapshots and the score ledger seam
//!
//! Everything is synchronous and single-threaded. A frame driver calls
//! [`GameSession::tick`] once per frame and an input source feeds [`Command`]s
//! through [`GameSession::apply`].

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("piece colliding when setting falling piece")]
pub struct PieceCollisionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum HoldError {
    /// The hold was applied but the promoted piece does not fit at its spawn position.
    #[display("piece colliding when holding piece")]
    PieceCollision(PieceCollisionError),
    #[display("hold already used in this turn")]
    HoldAlreadyUsed,
}

/// Reason an input command was rejected by a [`GameSession`].
///
/// A rejected command never changes the session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ActionRejected {
    #[display("game is not running")]
    NotRunning,
    #[display("piece is blocked")]
    Blocked,
    #[display("hold already used in this turn")]
    HoldAlreadyUsed,
}
