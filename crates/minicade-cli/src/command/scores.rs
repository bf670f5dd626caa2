use std::path::Path;

use minicade_engine::GameId;

use crate::ledger::JsonScoreLedger;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ScoresArg {
    /// Only show scores of this game (snake, memory, tetris, galaga, arkanoid)
    #[clap(long)]
    game: Option<GameId>,
    /// Maximum number of rows to print
    #[clap(long, default_value_t = 10)]
    limit: usize,
}

pub(crate) fn run(data_dir: &Path, arg: &ScoresArg) {
    let ScoresArg { game, limit } = arg;

    let ledger = JsonScoreLedger::open(data_dir.join("scores.json"));
    let ranking = ledger.ranking(*game);
    if ranking.is_empty() {
        println!("No scores yet.");
        return;
    }

    println!(
        "{:>4}  {:<16} {:<18} {:>8}  DATE",
        "RANK", "PLAYER", "GAME", "SCORE"
    );
    for row in ranking.iter().take(*limit) {
        let score = row.score;
        println!(
            "{:>4}  {:<16} {:<18} {:>8}  {}",
            format!("#{}", row.rank),
            score.player,
            score.game.display_name(),
            score.score,
            score.date.format("%Y-%m-%d"),
        );
    }
    println!(
        "\n{} of {} scores from {}",
        ranking.len().min(*limit),
        ledger.scores().len(),
        ledger.path().display()
    );
}
