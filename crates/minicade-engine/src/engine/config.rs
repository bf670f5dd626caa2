use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How upcoming pieces are drawn.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Randomizer {
    /// Every piece is drawn independently and uniformly.
    #[default]
    Uniform,
    /// 7-bag: each run of seven pieces contains every kind exactly once.
    Bag,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("cell size must be positive")]
    ZeroCellSize,
    #[display("{field} ({value}) is not a multiple of the cell size ({cell_size})")]
    NotCellAligned {
        field: &'static str,
        value: u32,
        cell_size: u32,
    },
    #[display("grid must be at least 4x4 cells, got {cols}x{rows}")]
    GridTooSmall { cols: usize, rows: usize },
    #[display(
        "grid must be at most {max}x{max} cells, got {cols}x{rows}",
        max = EngineConfig::MAX_GRID_CELLS
    )]
    GridTooLarge { cols: usize, rows: usize },
    #[display("min speed ({min_speed_ms}ms) is slower than the initial speed ({initial_speed_ms}ms)")]
    SpeedRange {
        min_speed_ms: u64,
        initial_speed_ms: u64,
    },
    #[display("lines per level must be positive")]
    ZeroLinesPerLevel,
}

/// Engine tuning, loadable from JSON. Missing fields take their defaults.
///
/// Grid dimensions are given in pixels and divided by the cell size, as the
/// canvas-based arcade did: the default 300×600 canvas with 30px cells is the
/// standard 10×20 well.
///
/// ```
/// use std::time::Duration;
/// use minicade_engine::EngineConfig;
///
/// let config: EngineConfig = serde_json::from_str(r#"{ "min_speed_ms": 100 }"#).unwrap();
/// config.validate().unwrap();
///
/// assert_eq!((config.cols(), config.rows()), (10, 20));
/// assert_eq!(config.drop_interval(1), Duration::from_millis(1000));
/// assert_eq!(config.drop_interval(50), Duration::from_millis(100));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub width: u32,
    pub height: u32,
    pub cell_size: u32,
    pub initial_speed_ms: u64,
    pub min_speed_ms: u64,
    pub level_speed_step_ms: u64,
    pub lines_per_level: u32,
    pub randomizer: Randomizer,
    pub player: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: 300,
            height: 600,
            cell_size: 30,
            initial_speed_ms: 1000,
            min_speed_ms: 50,
            level_speed_step_ms: 50,
            lines_per_level: 10,
            randomizer: Randomizer::Uniform,
            player: "Jogador".to_owned(),
        }
    }
}

impl EngineConfig {
    /// Largest number of columns or rows a grid may have.
    pub const MAX_GRID_CELLS: usize = 1024;

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        for (field, value) in [("width", self.width), ("height", self.height)] {
            if value % self.cell_size != 0 {
                return Err(ConfigError::NotCellAligned {
                    field,
                    value,
                    cell_size: self.cell_size,
                });
            }
        }
        let (cols, rows) = (self.cols(), self.rows());
        if cols < 4 || rows < 4 {
            return Err(ConfigError::GridTooSmall { cols, rows });
        }
        if cols > Self::MAX_GRID_CELLS || rows > Self::MAX_GRID_CELLS {
            return Err(ConfigError::GridTooLarge { cols, rows });
        }
        if self.min_speed_ms > self.initial_speed_ms {
            return Err(ConfigError::SpeedRange {
                min_speed_ms: self.min_speed_ms,
                initial_speed_ms: self.initial_speed_ms,
            });
        }
        if self.lines_per_level == 0 {
            return Err(ConfigError::ZeroLinesPerLevel);
        }
        Ok(())
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        (self.width / self.cell_size.max(1)) as usize
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        (self.height / self.cell_size.max(1)) as usize
    }

    /// Automatic drop interval at `level` (1-based), never below the minimum speed.
    #[must_use]
    pub fn drop_interval(&self, level: u32) -> Duration {
        let reduction = u64::from(level.saturating_sub(1)).saturating_mul(self.level_speed_step_ms);
        let millis = self
            .initial_speed_ms
            .saturating_sub(reduction)
            .max(self.min_speed_ms);
        Duration::from_millis(millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = EngineConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.cols(), 10);
        assert_eq!(config.rows(), 20);
    }

    #[test]
    fn test_drop_interval_decreases_per_level() {
        let config = EngineConfig::default();
        assert_eq!(config.drop_interval(1), Duration::from_millis(1000));
        assert_eq!(config.drop_interval(2), Duration::from_millis(950));
        assert_eq!(config.drop_interval(10), Duration::from_millis(550));
        assert_eq!(config.drop_interval(20), Duration::from_millis(50));
        assert_eq!(config.drop_interval(200), Duration::from_millis(50));
    }

    #[test]
    fn test_validate_rejects_bad_configs() {
        let zero_cell = EngineConfig {
            cell_size: 0,
            ..EngineConfig::default()
        };
        assert_eq!(zero_cell.validate(), Err(ConfigError::ZeroCellSize));

        let unaligned = EngineConfig {
            width: 310,
            ..EngineConfig::default()
        };
        assert!(matches!(
            unaligned.validate(),
            Err(ConfigError::NotCellAligned { field: "width", .. })
        ));

        let tiny = EngineConfig {
            width: 90,
            ..EngineConfig::default()
        };
        assert_eq!(
            tiny.validate(),
            Err(ConfigError::GridTooSmall { cols: 3, rows: 20 })
        );

        let huge = EngineConfig {
            width: 3_000_000_000,
            height: 4,
            cell_size: 1,
            ..EngineConfig::default()
        };
        assert_eq!(
            huge.validate(),
            Err(ConfigError::GridTooLarge {
                cols: 3_000_000_000,
                rows: 4
            })
        );

        let widest = EngineConfig {
            width: 1024,
            height: 1025,
            cell_size: 1,
            ..EngineConfig::default()
        };
        assert_eq!(
            widest.validate(),
            Err(ConfigError::GridTooLarge {
                cols: 1024,
                rows: 1025
            })
        );
        let widest = EngineConfig {
            height: 1024,
            ..widest
        };
        assert_eq!(widest.validate(), Ok(()));

        let speeds = EngineConfig {
            min_speed_ms: 2000,
            ..EngineConfig::default()
        };
        assert!(matches!(
            speeds.validate(),
            Err(ConfigError::SpeedRange { .. })
        ));

        let levels = EngineConfig {
            lines_per_level: 0,
            ..EngineConfig::default()
        };
        assert_eq!(levels.validate(), Err(ConfigError::ZeroLinesPerLevel));
    }

    #[test]
    fn test_deserialize_partial_json() {
        let config: EngineConfig =
            serde_json::from_str(r#"{ "randomizer": "bag", "player": "Ana" }"#).unwrap();
        assert_eq!(config.randomizer, Randomizer::Bag);
        assert_eq!(config.player, "Ana");
        assert_eq!(config.initial_speed_ms, 1000);
    }
}
