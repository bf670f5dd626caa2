use std::{cell::RefCell, fmt, rc::Rc, str::FromStr};

use serde::{Deserialize, Serialize};

/// Identifier of a game in the arcade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameId {
    Snake,
    Memory,
    Tetris,
    Galaga,
    Arkanoid,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown game: {name}")]
pub struct UnknownGameError {
    #[error(not(source))]
    name: String,
}

impl GameId {
    pub const ALL: [Self; 5] = [
        GameId::Snake,
        GameId::Memory,
        GameId::Tetris,
        GameId::Galaga,
        GameId::Arkanoid,
    ];

    /// Identifier used in score records and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            GameId::Snake => "snake",
            GameId::Memory => "memory",
            GameId::Tetris => "tetris",
            GameId::Galaga => "galaga",
            GameId::Arkanoid => "arkanoid",
        }
    }

    /// Human-readable name shown in score tables.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            GameId::Snake => "Snake Classic",
            GameId::Memory => "Jogo da Memória",
            GameId::Tetris => "Tetris",
            GameId::Galaga => "Galaga",
            GameId::Arkanoid => "Arkanoid",
        }
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameId {
    type Err = UnknownGameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| UnknownGameError { name: s.to_owned() })
    }
}

/// Final score of a finished game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub player: String,
    pub game: GameId,
    pub score: u64,
}

/// Score store the engine reports to.
///
/// A session reads the high score when it is created and reset, and records
/// exactly one [`ScoreRecord`] per game over. Persistence is up to the
/// implementor.
pub trait ScoreLedger: fmt::Debug {
    /// Best recorded score for `game`, 0 when there is none.
    fn high_score(&self, game: GameId) -> u64;

    fn record(&mut self, record: ScoreRecord);
}

/// Ledger that remembers nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLedger;

impl ScoreLedger for NoLedger {
    fn high_score(&self, _game: GameId) -> u64 {
        0
    }

    fn record(&mut self, _record: ScoreRecord) {}
}

/// In-memory ledger.
///
/// ```
/// use minicade_engine::{GameId, MemoryLedger, ScoreLedger, ScoreRecord};
///
/// let mut ledger = MemoryLedger::default();
/// ledger.record(ScoreRecord { player: "Ana".into(), game: GameId::Tetris, score: 900 });
/// ledger.record(ScoreRecord { player: "Rui".into(), game: GameId::Tetris, score: 400 });
///
/// assert_eq!(ledger.high_score(GameId::Tetris), 900);
/// assert_eq!(ledger.high_score(GameId::Snake), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryLedger {
    records: Vec<ScoreRecord>,
}

impl MemoryLedger {
    #[must_use]
    pub fn records(&self) -> &[ScoreRecord] {
        &self.records
    }
}

impl ScoreLedger for MemoryLedger {
    fn high_score(&self, game: GameId) -> u64 {
        self.records
            .iter()
            .filter(|r| r.game == game)
            .map(|r| r.score)
            .max()
            .unwrap_or(0)
    }

    fn record(&mut self, record: ScoreRecord) {
        self.records.push(record);
    }
}

/// Shared ledger: the session records into it while the owner keeps a handle.
impl<L> ScoreLedger for Rc<RefCell<L>>
where
    L: ScoreLedger,
{
    fn high_score(&self, game: GameId) -> u64 {
        self.borrow().high_score(game)
    }

    fn record(&mut self, record: ScoreRecord) {
        self.borrow_mut().record(record);
    }
}
