/// Score values for line clears.
///
/// Index corresponds to number of lines cleared simultaneously:
/// - 0 lines: 0 points
/// - 1 line: 100 points
/// - 2 lines: 300 points
/// - 3 lines: 500 points
/// - 4 lines: 800 points
const SCORE_TABLE: [u64; 5] = [0, 100, 300, 500, 800];

/// Bonus per combo step, added on every clearing lock.
const COMBO_BONUS: u64 = 50;

pub const SOFT_DROP_POINTS: u64 = 1;
pub const HARD_DROP_POINTS: u64 = 2;

/// Result of locking one piece, as seen by the counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockOutcome {
    pub cleared_lines: usize,
    /// Points awarded for this lock, combo bonus included.
    pub points: u64,
    pub level_up: bool,
    pub back_to_back: bool,
}

/// Game statistics tracking score, level, lines and combo.
///
/// # Scoring
///
/// - Line clears award 100/300/500/800 points for 1-4 lines, multiplied by
///   the level reached *after* the clear
/// - A 4-line clear while the combo counter is a positive multiple of 4 is a
///   back-to-back clear and its base value is multiplied by 1.5
/// - Every clearing lock increments the combo counter and adds `combo × 50`;
///   a lock that clears nothing resets it
/// - Soft drops award 1 point per row and hard drops 2 points per row
///
/// # Example
///
/// ```
/// use minicade_engine::GameStats;
///
/// let mut stats = GameStats::new(10);
/// let outcome = stats.complete_piece_drop(4); // Tetris (4 lines)
///
/// assert_eq!(outcome.points, 800 + 50);
/// assert_eq!(stats.score(), 850);
/// assert_eq!(stats.combo(), 1);
/// assert_eq!(stats.line_cleared_counter()[4], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStats {
    score: u64,
    level: u32,
    lines: u32,
    combo: u32,
    completed_pieces: u32,
    line_cleared_counter: [u32; 5],
    lines_per_level: u32,
}

impl GameStats {
    /// Creates a new tracker at level 1 with all counters at zero.
    #[must_use]
    pub const fn new(lines_per_level: u32) -> Self {
        Self {
            score: 0,
            level: 1,
            lines: 0,
            combo: 0,
            completed_pieces: 0,
            line_cleared_counter: [0; 5],
            lines_per_level,
        }
    }

    #[must_use]
    pub const fn score(&self) -> u64 {
        self.score
    }

    /// Current level, starting at 1 and increasing every `lines_per_level` lines.
    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    #[must_use]
    pub const fn lines(&self) -> u32 {
        self.lines
    }

    /// Consecutive clearing locks so far.
    #[must_use]
    pub const fn combo(&self) -> u32 {
        self.combo
    }

    #[must_use]
    pub const fn completed_pieces(&self) -> u32 {
        self.completed_pieces
    }

    /// Returns a histogram of locks by lines cleared.
    ///
    /// Array indices represent:
    /// - `[0]`: Number of locks with 0 lines cleared
    /// - `[1]`: Number of singles (1 line)
    /// - `[2]`: Number of doubles (2 lines)
    /// - `[3]`: Number of triples (3 lines)
    /// - `[4]`: Number of tetrises (4 lines)
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[u32; 5] {
        &self.line_cleared_counter
    }

    pub fn add_drop_points(&mut self, rows: u32, points_per_row: u64) {
        self.score += u64::from(rows) * points_per_row;
    }

    /// Updates statistics after a piece locks.
    ///
    /// The level is updated before the line-clear points are computed, so a
    /// clear that levels up already scores at the new level.
    ///
    /// # Panics
    ///
    /// Panics if `cleared_lines` is greater than 4.
    pub fn complete_piece_drop(&mut self, cleared_lines: usize) -> LockOutcome {
        self.completed_pieces += 1;
        self.line_cleared_counter[cleared_lines] += 1;

        if cleared_lines == 0 {
            self.combo = 0;
            return LockOutcome::default();
        }

        let back_to_back = cleared_lines == 4 && self.combo > 0 && self.combo % 4 == 0;

        #[expect(clippy::cast_possible_truncation)]
        let cleared = cleared_lines as u32;
        self.lines += cleared;
        let level = self.lines / self.lines_per_level + 1;
        let level_up = level > self.level;
        self.level = level;

        let mut base = SCORE_TABLE[cleared_lines];
        if back_to_back {
            base = base * 3 / 2;
        }
        self.combo += 1;
        let points = base * u64::from(self.level) + u64::from(self.combo) * COMBO_BONUS;
        self.score += points;

        LockOutcome {
            cleared_lines,
            points,
            level_up,
            back_to_back,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stats() {
        let stats = GameStats::new(10);
        assert_eq!(stats.score(), 0);
        assert_eq!(stats.level(), 1);
        assert_eq!(stats.lines(), 0);
        assert_eq!(stats.combo(), 0);
        assert_eq!(stats.completed_pieces(), 0);
        assert_eq!(stats.line_cleared_counter(), &[0; 5]);
    }

    #[test]
    fn test_line_clear_points_with_combo() {
        let mut stats = GameStats::new(10);
        assert_eq!(stats.complete_piece_drop(1).points, 100 + 50);
        assert_eq!(stats.complete_piece_drop(2).points, 300 + 100);
        assert_eq!(stats.complete_piece_drop(3).points, 500 + 150);
        assert_eq!(stats.combo(), 3);
        assert_eq!(stats.score(), 150 + 400 + 650);
    }

    #[test]
    fn test_non_clearing_lock_resets_combo() {
        let mut stats = GameStats::new(10);
        stats.complete_piece_drop(1);
        stats.complete_piece_drop(1);
        assert_eq!(stats.combo(), 2);

        let outcome = stats.complete_piece_drop(0);
        assert_eq!(outcome, LockOutcome::default());
        assert_eq!(stats.combo(), 0);
        assert_eq!(stats.completed_pieces(), 3);
        assert_eq!(stats.line_cleared_counter(), &[1, 2, 0, 0, 0]);
    }

    #[test]
    fn test_back_to_back_tetris() {
        let mut stats = GameStats::new(100);
        for _ in 0..4 {
            assert!(!stats.complete_piece_drop(1).back_to_back);
        }
        assert_eq!(stats.combo(), 4);

        let outcome = stats.complete_piece_drop(4);
        assert!(outcome.back_to_back);
        assert_eq!(outcome.points, 1200 + 5 * 50);

        // combo is now 5: no bonus
        let outcome = stats.complete_piece_drop(4);
        assert!(!outcome.back_to_back);
        assert_eq!(outcome.points, 800 + 6 * 50);
    }

    #[test]
    fn test_back_to_back_tetris_at_higher_level() {
        let mut stats = GameStats::new(10);
        for _ in 0..4 {
            stats.complete_piece_drop(2);
        }
        assert_eq!((stats.lines(), stats.level(), stats.combo()), (8, 1, 4));

        let outcome = stats.complete_piece_drop(4);
        assert!(outcome.back_to_back);
        assert!(outcome.level_up);
        assert_eq!(stats.level(), 2);
        assert_eq!(outcome.points, 800 * 2 * 3 / 2 + 5 * 50);
    }

    #[test]
    fn test_back_to_back_only_for_tetris() {
        let mut stats = GameStats::new(100);
        for _ in 0..4 {
            stats.complete_piece_drop(1);
        }
        let outcome = stats.complete_piece_drop(3);
        assert!(!outcome.back_to_back);
        assert_eq!(outcome.points, 500 + 5 * 50);
    }

    #[test]
    fn test_level_up_scores_at_new_level() {
        let mut stats = GameStats::new(10);
        stats.complete_piece_drop(4);
        stats.complete_piece_drop(4);
        assert_eq!(stats.level(), 1);
        assert_eq!(stats.lines(), 8);

        let outcome = stats.complete_piece_drop(2);
        assert!(outcome.level_up);
        assert_eq!(stats.level(), 2);
        assert_eq!(outcome.points, 300 * 2 + 3 * 50);
    }

    #[test]
    fn test_level_formula() {
        let mut stats = GameStats::new(10);
        for _ in 0..9 {
            stats.complete_piece_drop(1);
        }
        assert_eq!(stats.level(), 1);
        stats.complete_piece_drop(1);
        assert_eq!(stats.level(), 2);
        for _ in 0..5 {
            stats.complete_piece_drop(4);
        }
        assert_eq!(stats.lines(), 30);
        assert_eq!(stats.level(), 4);
    }

    #[test]
    fn test_drop_points() {
        let mut stats = GameStats::new(10);
        stats.add_drop_points(3, SOFT_DROP_POINTS);
        stats.add_drop_points(17, HARD_DROP_POINTS);
        assert_eq!(stats.score(), 3 + 34);
        assert_eq!(stats.combo(), 0);
    }
}
