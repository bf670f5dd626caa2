use std::time::Duration;

use rand::Rng as _;
use rand_pcg::Pcg32;

use crate::{ActionRejected, HoldError, core::piece::Piece};

use super::{
    command::Command,
    config::{ConfigError, EngineConfig},
    game_field::GameField,
    game_stats::{GameStats, HARD_DROP_POINTS, SOFT_DROP_POINTS},
    ledger::{GameId, ScoreLedger, ScoreRecord},
    piece_buffer::{PieceBuffer, PieceSeed},
    snapshot::GameSnapshot,
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    #[default]
    Stopped,
    Running,
    Paused,
    GameOver,
}

/// A Tetris game from start to game over, and across resets.
///
/// ```text
/// Stopped --start--> Running <--toggle_pause--> Paused
///                       |
///                       +--top out--> GameOver --start--> (reset) Running
/// any state --reset--> Stopped
/// ```
///
/// Gameplay commands are accepted only while running; anything else is
/// rejected with an [`ActionRejected`] reason and leaves the session as it
/// was. On game over the final score is recorded to the [`ScoreLedger`]
/// exactly once.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use minicade_engine::{Command, EngineConfig, GameSession, NoLedger, SessionState};
///
/// let mut session = GameSession::new(EngineConfig::default(), Box::new(NoLedger)).unwrap();
/// assert_eq!(session.state(), SessionState::Stopped);
///
/// session.apply(Command::Start).unwrap();
/// session.apply(Command::MoveLeft).unwrap();
/// session.tick(Duration::from_millis(16));
///
/// session.apply(Command::HardDrop).unwrap();
/// assert_eq!(session.stats().completed_pieces(), 1);
/// assert!(session.stats().score() > 0);
/// ```
#[derive(Debug)]
pub struct GameSession {
    config: EngineConfig,
    seeds: Pcg32,
    field: GameField,
    stats: GameStats,
    state: SessionState,
    drop_interval: Duration,
    since_last_drop: Duration,
    play_time: Duration,
    high_score: u64,
    ledger: Box<dyn ScoreLedger>,
}

impl GameSession {
    /// Creates a stopped session with a random seed.
    pub fn new(config: EngineConfig, ledger: Box<dyn ScoreLedger>) -> Result<Self, ConfigError> {
        Self::with_seed(config, ledger, rand::rng().random())
    }

    /// Creates a stopped session whose piece sequences derive from `seed`.
    ///
    /// Two sessions with the same config and seed receive the same pieces,
    /// game after game.
    pub fn with_seed(
        config: EngineConfig,
        ledger: Box<dyn ScoreLedger>,
        seed: PieceSeed,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut seeds = seed.into_rng();
        let field = new_field(&config, &mut seeds);
        let high_score = ledger.high_score(GameId::Tetris);
        Ok(Self {
            stats: GameStats::new(config.lines_per_level),
            drop_interval: config.drop_interval(1),
            config,
            seeds,
            field,
            state: SessionState::Stopped,
            since_last_drop: Duration::ZERO,
            play_time: Duration::ZERO,
            high_score,
            ledger,
        })
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn field(&self) -> &GameField {
        &self.field
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Best score known for Tetris, including the current game once it is over.
    #[must_use]
    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    /// Current automatic drop interval.
    #[must_use]
    pub fn drop_interval(&self) -> Duration {
        self.drop_interval
    }

    /// Time spent running in the current game.
    #[must_use]
    pub fn play_time(&self) -> Duration {
        self.play_time
    }

    #[must_use]
    pub fn falling_piece(&self) -> Piece {
        self.field.falling_piece()
    }

    #[must_use]
    pub fn ghost_piece(&self) -> Piece {
        self.field.ghost_piece()
    }

    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot<'_> {
        GameSnapshot {
            grid: self.field.grid(),
            falling_piece: self.field.falling_piece(),
            ghost_piece: self.field.ghost_piece(),
            held_piece: self.field.held_piece(),
            next_piece: self.field.next_piece(),
            stats: &self.stats,
            high_score: self.high_score,
            state: self.state,
        }
    }

    /// Starts the game.
    ///
    /// A paused game resumes and a finished game is reset first. Does nothing
    /// while running.
    pub fn start(&mut self) {
        match self.state {
            SessionState::Running => {}
            SessionState::Paused => self.resume(),
            SessionState::Stopped => self.run(),
            SessionState::GameOver => {
                self.reset();
                self.run();
            }
        }
    }

    /// Pauses a running game or resumes a paused one.
    ///
    /// A stopped game is started; a finished game is left alone.
    pub fn toggle_pause(&mut self) {
        match self.state {
            SessionState::Running => {
                self.state = SessionState::Paused;
                log::debug!("paused");
            }
            SessionState::Paused => self.resume(),
            SessionState::Stopped => self.run(),
            SessionState::GameOver => {}
        }
    }

    /// Discards the current game and returns to [`SessionState::Stopped`]
    /// with an empty grid and fresh pieces.
    pub fn reset(&mut self) {
        self.field = new_field(&self.config, &mut self.seeds);
        self.stats = GameStats::new(self.config.lines_per_level);
        self.state = SessionState::Stopped;
        self.drop_interval = self.config.drop_interval(1);
        self.since_last_drop = Duration::ZERO;
        self.play_time = Duration::ZERO;
        self.high_score = self.ledger.high_score(GameId::Tetris);
        log::info!("session reset");
    }

    pub fn move_left(&mut self) -> Result<(), ActionRejected> {
        self.ensure_running()?;
        self.field
            .try_move(-1, 0)
            .map_err(|_| ActionRejected::Blocked)
    }

    pub fn move_right(&mut self) -> Result<(), ActionRejected> {
        self.ensure_running()?;
        self.field
            .try_move(1, 0)
            .map_err(|_| ActionRejected::Blocked)
    }

    /// Moves the piece one row down for a point, or locks it where it is.
    pub fn soft_drop(&mut self) -> Result<(), ActionRejected> {
        self.ensure_running()?;
        if self.field.try_move(0, 1).is_ok() {
            self.stats.add_drop_points(1, SOFT_DROP_POINTS);
        } else {
            self.lock();
        }
        Ok(())
    }

    /// Drops the piece to the bottom, two points per row, and locks it.
    pub fn hard_drop(&mut self) -> Result<(), ActionRejected> {
        self.ensure_running()?;
        let rows = self.field.drop_to_bottom();
        self.stats.add_drop_points(rows, HARD_DROP_POINTS);
        self.lock();
        Ok(())
    }

    pub fn rotate(&mut self) -> Result<(), ActionRejected> {
        self.ensure_running()?;
        self.field
            .try_rotate()
            .map_err(|_| ActionRejected::Blocked)
    }

    pub fn hold(&mut self) -> Result<(), ActionRejected> {
        self.ensure_running()?;
        match self.field.try_hold() {
            Ok(()) => {
                log::debug!("held {:?}", self.field.held_piece().map(|p| p.kind()));
                Ok(())
            }
            Err(HoldError::HoldAlreadyUsed) => Err(ActionRejected::HoldAlreadyUsed),
            Err(HoldError::PieceCollision(_)) => {
                self.game_over();
                Ok(())
            }
        }
    }

    /// Advances the game clock by `elapsed`.
    ///
    /// Once the time since the last automatic drop exceeds the drop
    /// interval, the piece moves one row down (or locks) and the clock
    /// restarts. Only a running game advances.
    pub fn tick(&mut self, elapsed: Duration) {
        if !self.state.is_running() {
            return;
        }
        self.play_time += elapsed;
        self.since_last_drop += elapsed;
        if self.since_last_drop > self.drop_interval {
            self.since_last_drop = Duration::ZERO;
            if self.field.try_move(0, 1).is_err() {
                self.lock();
            }
        }
    }

    /// Dispatches an input command.
    pub fn apply(&mut self, command: Command) -> Result<(), ActionRejected> {
        match command {
            Command::MoveLeft => self.move_left(),
            Command::MoveRight => self.move_right(),
            Command::SoftDrop => self.soft_drop(),
            Command::HardDrop => self.hard_drop(),
            Command::Rotate => self.rotate(),
            Command::Hold => self.hold(),
            Command::PauseToggle => {
                self.toggle_pause();
                Ok(())
            }
            Command::Reset => {
                self.reset();
                Ok(())
            }
            Command::Start => {
                self.start();
                Ok(())
            }
        }
    }

    fn ensure_running(&self) -> Result<(), ActionRejected> {
        if self.state.is_running() {
            Ok(())
        } else {
            Err(ActionRejected::NotRunning)
        }
    }

    fn run(&mut self) {
        self.state = SessionState::Running;
        self.since_last_drop = Duration::ZERO;
        log::info!(
            "game started ({}x{}, {:?} randomizer)",
            self.config.cols(),
            self.config.rows(),
            self.config.randomizer
        );
    }

    fn resume(&mut self) {
        self.state = SessionState::Running;
        self.since_last_drop = Duration::ZERO;
        log::debug!("resumed");
    }

    fn lock(&mut self) {
        let piece = self.field.falling_piece();
        let (cleared_lines, result) = self.field.complete_piece_drop();
        let outcome = self.stats.complete_piece_drop(cleared_lines);
        log::debug!(
            "locked {:?} at {:?}: {} lines, {} points",
            piece.kind(),
            piece.position(),
            outcome.cleared_lines,
            outcome.points
        );
        if outcome.back_to_back {
            log::debug!("back-to-back clear");
        }
        if outcome.level_up {
            self.drop_interval = self.config.drop_interval(self.stats.level());
            log::debug!(
                "level {} reached, drop interval {:?}",
                self.stats.level(),
                self.drop_interval
            );
        }
        if result.is_err() {
            self.game_over();
        }
    }

    fn game_over(&mut self) {
        self.state = SessionState::GameOver;
        let score = self.stats.score();
        self.high_score = self.high_score.max(score);
        log::info!(
            "game over: score {score}, level {}, lines {}, {} pieces",
            self.stats.level(),
            self.stats.lines(),
            self.stats.completed_pieces()
        );
        self.ledger.record(ScoreRecord {
            player: self.config.player.clone(),
            game: GameId::Tetris,
            score,
        });
    }
}

fn new_field(config: &EngineConfig, seeds: &mut Pcg32) -> GameField {
    let buffer = PieceBuffer::with_seed(config.randomizer, seeds.random());
    GameField::new(config.cols(), config.rows(), buffer)
}
