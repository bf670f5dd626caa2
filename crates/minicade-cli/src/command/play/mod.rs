use std::{
    cell::RefCell,
    fs,
    path::{Path, PathBuf},
    rc::Rc,
};

use anyhow::Context as _;
use minicade_engine::{EngineConfig, GameId, PieceSeed, Randomizer};

use crate::{
    ledger::JsonScoreLedger,
    registry::{self, LaunchOptions},
    tui::Runtime,
};

use self::app::PlayApp;

mod app;
mod screen;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum RandomizerArg {
    /// Each piece drawn independently
    Uniform,
    /// Every run of seven pieces holds each kind once
    Bag,
}

impl From<RandomizerArg> for Randomizer {
    fn from(arg: RandomizerArg) -> Self {
        match arg {
            RandomizerArg::Uniform => Randomizer::Uniform,
            RandomizerArg::Bag => Randomizer::Bag,
        }
    }
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Game to play
    #[clap(long, default_value_t = GameId::Tetris)]
    game: GameId,
    /// Player name stored with the final score
    #[clap(long)]
    player: Option<String>,
    /// Engine configuration file (JSON format)
    #[clap(long)]
    config: Option<PathBuf>,
    /// Piece sequence seed (32 hex digits); random when omitted
    #[clap(long)]
    seed: Option<PieceSeed>,
    /// Piece randomizer
    #[clap(long, value_enum)]
    randomizer: Option<RandomizerArg>,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            game: GameId::Tetris,
            player: None,
            config: None,
            seed: None,
            randomizer: None,
        }
    }
}

pub(crate) fn run(data_dir: &Path, arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        game,
        player,
        config,
        seed,
        randomizer,
    } = arg;

    let mut config = match config {
        Some(path) => read_config_file(path)?,
        None => EngineConfig::default(),
    };
    if let Some(player) = player {
        config.player.clone_from(player);
    }
    if let Some(randomizer) = randomizer {
        config.randomizer = (*randomizer).into();
    }
    let seed = seed.unwrap_or_else(rand::random);

    let ledger = Rc::new(RefCell::new(JsonScoreLedger::open(data_dir.join("scores.json"))));
    log::info!("score ledger: {}", ledger.borrow().path().display());

    let game = registry::launch(
        *game,
        LaunchOptions {
            config,
            seed,
            ledger: Box::new(Rc::clone(&ledger)),
        },
    )?;

    let mut app = PlayApp::new(game);
    Runtime::new().run(&mut app)?;

    log::info!("session ended (seed {seed})");
    Ok(())
}

fn read_config_file(path: &Path) -> anyhow::Result<EngineConfig> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    Ok(config)
}
