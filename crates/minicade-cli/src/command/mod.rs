use std::{
    fs::{self, OpenOptions},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use self::{games::GamesArg, play::PlayArg, scores::ScoresArg};

mod games;
mod play;
mod scores;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Directory holding the score ledger and the log file
    #[clap(long, global = true, default_value = "./data/")]
    data_dir: PathBuf,
    /// Log file path [default: <DATA_DIR>/minicade.log]
    #[clap(long, global = true)]
    log_file: Option<PathBuf>,
    /// Log filter in RUST_LOG syntax, e.g. `debug` or `minicade_engine=trace`
    /// [default: $RUST_LOG, then `info`]
    #[clap(long, global = true)]
    log_level: Option<String>,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play a game in the terminal
    Play(#[clap(flatten)] PlayArg),
    /// Print the score ranking
    Scores(#[clap(flatten)] ScoresArg),
    /// List registered games
    Games(#[clap(flatten)] GamesArg),
}

pub fn run() -> anyhow::Result<()> {
    let CommandArgs {
        data_dir,
        log_file,
        log_level,
        mode,
    } = CommandArgs::parse();

    let log_file = log_file.unwrap_or_else(|| data_dir.join("minicade.log"));
    init_logger(&log_file, log_level.as_deref())?;
    log::info!("minicade {} starting", env!("CARGO_PKG_VERSION"));

    match mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&data_dir, &arg)?,
        Mode::Scores(arg) => scores::run(&data_dir, &arg),
        Mode::Games(arg) => games::run(&arg),
    }
    Ok(())
}

/// Sends log output to `path`; the terminal belongs to the TUI.
fn init_logger(path: &Path, filter: Option<&str>) -> anyhow::Result<()> {
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(filter) = filter {
        builder.parse_filters(filter);
    }
    builder
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("Failed to initialize logger")?;
    Ok(())
}
