use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use chrono::{NaiveDate, Utc};
use minicade_engine::{GameId, ScoreLedger, ScoreRecord};
use serde::{Deserialize, Serialize};

/// A score as stored in the ledger file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredScore {
    pub player: String,
    pub game: GameId,
    pub score: u64,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
struct LedgerData {
    scores: Vec<StoredScore>,
    #[serde(default)]
    high_scores: BTreeMap<GameId, u64>,
}

impl LedgerData {
    fn sample() -> Self {
        let entry = |player: &str, game, score, (y, m, d)| StoredScore {
            player: player.to_owned(),
            game,
            score,
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
        };
        Self {
            scores: vec![
                entry("Jogador1", GameId::Snake, 1500, (2024, 1, 15)),
                entry("Jogador2", GameId::Memory, 1200, (2024, 1, 14)),
                entry("Jogador3", GameId::Snake, 800, (2024, 1, 13)),
            ],
            high_scores: BTreeMap::new(),
        }
    }
}

/// One row of the ranking table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedScore<'a> {
    /// 1-based position.
    pub rank: usize,
    pub score: &'a StoredScore,
}

/// Score ledger persisted as a JSON file.
///
/// A missing or unreadable file is replaced by a small sample dataset. Every
/// recorded score is written back immediately; write failures are logged and
/// the score stays in memory.
#[derive(Debug)]
pub struct JsonScoreLedger {
    path: PathBuf,
    data: LedgerData,
}

impl JsonScoreLedger {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let data = match fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(data) => data,
                Err(e) => {
                    log::warn!(
                        "malformed score ledger {}, using sample scores: {e}",
                        path.display()
                    );
                    LedgerData::sample()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("no score ledger at {}, using sample scores", path.display());
                LedgerData::sample()
            }
            Err(e) => {
                log::warn!(
                    "cannot read score ledger {}, using sample scores: {e}",
                    path.display()
                );
                LedgerData::sample()
            }
        };
        Self { path, data }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn scores(&self) -> &[StoredScore] {
        &self.data.scores
    }

    /// Scores sorted from best to worst, optionally restricted to one game.
    ///
    /// Equal scores keep their recording order.
    pub fn ranking(&self, game: Option<GameId>) -> Vec<RankedScore<'_>> {
        let mut scores = self
            .data
            .scores
            .iter()
            .filter(|s| game.is_none_or(|game| s.game == game))
            .collect::<Vec<_>>();
        scores.sort_by(|a, b| b.score.cmp(&a.score));
        scores
            .into_iter()
            .enumerate()
            .map(|(i, score)| RankedScore { rank: i + 1, score })
            .collect()
    }

    pub fn save(&self) -> anyhow::Result<()> {
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        }
        let json = serde_json::to_string_pretty(&self.data)
            .context("Failed to serialize score ledger")?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write score ledger: {}", self.path.display()))?;
        Ok(())
    }

    fn push(&mut self, record: ScoreRecord, date: NaiveDate) {
        let high_score = self.data.high_scores.entry(record.game).or_default();
        *high_score = (*high_score).max(record.score);
        self.data.scores.push(StoredScore {
            player: record.player,
            game: record.game,
            score: record.score,
            date,
        });
    }
}

impl ScoreLedger for JsonScoreLedger {
    fn high_score(&self, game: GameId) -> u64 {
        let recorded = self.data.high_scores.get(&game).copied().unwrap_or(0);
        let listed = self
            .data
            .scores
            .iter()
            .filter(|s| s.game == game)
            .map(|s| s.score)
            .max()
            .unwrap_or(0);
        recorded.max(listed)
    }

    fn record(&mut self, record: ScoreRecord) {
        log::info!(
            "recording score {} for {} in {}",
            record.score,
            record.player,
            record.game
        );
        self.push(record, Utc::now().date_naive());
        if let Err(e) = self.save() {
            log::error!("{e:#}");
        }
    }
}
