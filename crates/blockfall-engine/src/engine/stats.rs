use std::time::Duration;

/// Score and progression counters for one game.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GameStats {
    score: u64,
    total_cleared_lines: u64,
    completed_pieces: u64,
}

impl GameStats {
    /// Points awarded per simultaneous line clear, before the level
    /// multiplier.
    pub const SCORE_TABLE: [u64; 5] = [0, 100, 300, 500, 800];

    const LINES_PER_LEVEL: u64 = 10;

    /// Current score.
    #[must_use]
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Total lines cleared over the whole game.
    #[must_use]
    pub fn total_cleared_lines(&self) -> u64 {
        self.total_cleared_lines
    }

    /// Number of pieces locked so far.
    #[must_use]
    pub fn completed_pieces(&self) -> u64 {
        self.completed_pieces
    }

    /// Current level. Starts at 1 and rises every 10 cleared lines.
    #[must_use]
    pub fn level(&self) -> u64 {
        self.total_cleared_lines / Self::LINES_PER_LEVEL + 1
    }

    /// Time a piece rests per row under gravity at the current level.
    ///
    /// Starts at 500 ms and speeds up by 50 ms per level, floored at 50 ms.
    #[must_use]
    pub fn fall_interval(&self) -> Duration {
        let millis = 500_u64.saturating_sub((self.level() - 1) * 50).max(50);
        Duration::from_millis(millis)
    }

    /// Records one locked piece that cleared `lines` rows.
    ///
    /// The score multiplier uses the level reached before this clear, so a
    /// clear that crosses a level boundary is still paid at the old rate.
    pub fn record_lock(&mut self, lines: usize) {
        self.score += Self::SCORE_TABLE[lines.min(4)] * self.level();
        self.total_cleared_lines += lines as u64;
        self.completed_pieces += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_rises_every_ten_lines() {
        let mut stats = GameStats::default();
        assert_eq!(stats.level(), 1);
        for _ in 0..3 {
            stats.record_lock(3);
        }
        assert_eq!(stats.total_cleared_lines(), 9);
        assert_eq!(stats.level(), 1);
        stats.record_lock(1);
        assert_eq!(stats.level(), 2);
    }

    #[test]
    fn test_score_scales_with_level() {
        let mut stats = GameStats::default();
        stats.record_lock(4);
        assert_eq!(stats.score(), 800);

        // Reach level 2, then clear a single at the new rate.
        for _ in 0..3 {
            stats.record_lock(2);
        }
        assert_eq!(stats.level(), 2);
        stats.record_lock(1);
        assert_eq!(stats.score(), 800 + 3 * 300 + 100 * 2);
    }

    #[test]
    fn test_level_crossing_clear_pays_old_rate() {
        let mut stats = GameStats::default();
        for _ in 0..3 {
            stats.record_lock(3);
        }
        // 9 lines so far; this clear crosses into level 2 but pays level 1.
        stats.record_lock(2);
        assert_eq!(stats.score(), 3 * 500 + 300);
        assert_eq!(stats.level(), 2);
    }

    #[test]
    fn test_lock_without_clear_scores_nothing() {
        let mut stats = GameStats::default();
        stats.record_lock(0);
        assert_eq!(stats.score(), 0);
        assert_eq!(stats.completed_pieces(), 1);
    }

    #[test]
    fn test_fall_interval_speeds_up_with_floor() {
        let mut stats = GameStats::default();
        assert_eq!(stats.fall_interval(), Duration::from_millis(500));
        for _ in 0..5 {
            stats.record_lock(2);
        }
        assert_eq!(stats.level(), 2);
        assert_eq!(stats.fall_interval(), Duration::from_millis(450));
        for _ in 0..100 {
            stats.record_lock(4);
        }
        assert_eq!(stats.fall_interval(), Duration::from_millis(50));
    }
}
