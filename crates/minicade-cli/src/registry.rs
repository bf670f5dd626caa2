//! Games known to the arcade and how to start them.

use anyhow::{Context as _, bail};
use minicade_engine::{EngineConfig, GameId, GameSession, PieceSeed, ScoreLedger};

/// Everything needed to start a game.
#[derive(Debug)]
pub struct LaunchOptions {
    pub config: EngineConfig,
    pub seed: PieceSeed,
    pub ledger: Box<dyn ScoreLedger>,
}

/// A running game, ready to be put on screen.
#[derive(Debug)]
pub enum Game {
    Tetris(GameSession),
}

type Launcher = fn(LaunchOptions) -> anyhow::Result<Game>;

#[derive(Debug, Clone, Copy)]
pub struct GameEntry {
    pub id: GameId,
    launcher: Option<Launcher>,
}

impl GameEntry {
    pub fn is_playable(&self) -> bool {
        self.launcher.is_some()
    }
}

const ENTRIES: [GameEntry; 5] = [
    GameEntry {
        id: GameId::Snake,
        launcher: None,
    },
    GameEntry {
        id: GameId::Memory,
        launcher: None,
    },
    GameEntry {
        id: GameId::Tetris,
        launcher: Some(launch_tetris),
    },
    GameEntry {
        id: GameId::Galaga,
        launcher: None,
    },
    GameEntry {
        id: GameId::Arkanoid,
        launcher: None,
    },
];

pub fn entries() -> &'static [GameEntry] {
    &ENTRIES
}

pub fn launch(id: GameId, options: LaunchOptions) -> anyhow::Result<Game> {
    let Some(entry) = ENTRIES.iter().find(|entry| entry.id == id) else {
        bail!("{id} is not registered");
    };
    let Some(launcher) = entry.launcher else {
        bail!("{} is not playable in this build", id.display_name());
    };
    log::info!("launching {id} with seed {}", options.seed);
    launcher(options)
}

fn launch_tetris(options: LaunchOptions) -> anyhow::Result<Game> {
    let LaunchOptions {
        config,
        seed,
        ledger,
    } = options;
    let session =
        GameSession::with_seed(config, ledger, seed).context("Invalid engine configuration")?;
    Ok(Game::Tetris(session))
}

#[cfg(test)]
mod tests {
    use minicade_engine::{NoLedger, SessionState};

    use super::*;

    fn options(config: EngineConfig) -> LaunchOptions {
        LaunchOptions {
            config,
            seed: "0123456789abcdef0123456789abcdef".parse().unwrap(),
            ledger: Box::new(NoLedger),
        }
    }

    #[test]
    fn test_every_game_is_registered_once() {
        let ids: Vec<_> = entries().iter().map(|entry| entry.id).collect();
        assert_eq!(ids, GameId::ALL);
    }

    #[test]
    fn test_only_tetris_is_playable() {
        let playable: Vec<_> = entries()
            .iter()
            .filter(|entry| entry.is_playable())
            .map(|entry| entry.id)
            .collect();
        assert_eq!(playable, [GameId::Tetris]);
    }

    #[test]
    fn test_launch_tetris() {
        let Game::Tetris(session) =
            launch(GameId::Tetris, options(EngineConfig::default())).unwrap();
        assert_eq!(session.state(), SessionState::Stopped);
        assert_eq!(session.field().grid().width(), 10);
    }

    #[test]
    fn test_launch_unplayable_game() {
        let err = launch(GameId::Snake, options(EngineConfig::default())).unwrap_err();
        assert_eq!(err.to_string(), "Snake Classic is not playable in this build");
    }

    #[test]
    fn test_launch_rejects_invalid_config() {
        let config = EngineConfig {
            cell_size: 0,
            ..EngineConfig::default()
        };
        let err = launch(GameId::Tetris, options(config)).unwrap_err();
        assert_eq!(format!("{err:#}"), "Invalid engine configuration: cell size must be positive");
    }
}
