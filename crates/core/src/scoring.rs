//! Scoring module - score, level and gravity progression
//!
//! Everything here is derived from the running total of cleared lines:
//!
//! - score grows by `lines * 100 * level`, using the level before the clear
//! - `level = total_lines / 10 + 1`
//! - `gravity = max(50, base - (level - 1) * 50)` milliseconds
//!
//! [`Progression`] is the only owner of these counters and only changes them
//! through [`Progression::apply_clear`] and [`Progression::reset`].

use crate::types::{DROP_STEP_MS, LINES_PER_LEVEL, LINE_SCORE, MIN_DROP_MS};

/// Points for clearing `lines` rows at `level`
pub fn calculate_line_score(lines: u32, level: u32) -> u32 {
    lines.saturating_mul(LINE_SCORE).saturating_mul(level)
}

/// Level reached after `total_lines` cleared lines (starts at 1)
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Gravity interval for a level, given the level-1 interval
pub fn get_drop_interval_ms(level: u32, base_ms: u32) -> u32 {
    let speedup = level.saturating_sub(1).saturating_mul(DROP_STEP_MS);
    base_ms.saturating_sub(speedup).max(MIN_DROP_MS)
}

/// Outcome of a lock that cleared at least one line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreResult {
    pub lines_cleared: u32,
    pub points: u32,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub drop_interval_ms: u32,
    pub leveled_up: bool,
}

/// Score, cleared lines, level and gravity interval, kept mutually consistent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progression {
    base_drop_ms: u32,
    score: u32,
    lines: u32,
    level: u32,
    drop_interval_ms: u32,
}

impl Progression {
    pub fn new(base_drop_ms: u32) -> Self {
        Self {
            base_drop_ms,
            score: 0,
            lines: 0,
            level: 1,
            drop_interval_ms: get_drop_interval_ms(1, base_drop_ms),
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn base_drop_ms(&self) -> u32 {
        self.base_drop_ms
    }

    /// Account for `cleared` lines from a single lock.
    ///
    /// Returns `None` (and changes nothing) when no line was cleared.
    pub fn apply_clear(&mut self, cleared: u32) -> Option<ScoreResult> {
        if cleared == 0 {
            return None;
        }

        let points = calculate_line_score(cleared, self.level);
        let previous_level = self.level;

        self.score = self.score.saturating_add(points);
        self.lines = self.lines.saturating_add(cleared);
        self.level = calculate_level(self.lines);
        self.drop_interval_ms = get_drop_interval_ms(self.level, self.base_drop_ms);

        Some(ScoreResult {
            lines_cleared: cleared,
            points,
            score: self.score,
            lines: self.lines,
            level: self.level,
            drop_interval_ms: self.drop_interval_ms,
            leveled_up: self.level > previous_level,
        })
    }

    /// Back to a fresh game: no score, no lines, level 1, base gravity.
    pub fn reset(&mut self) {
        *self = Self::new(self.base_drop_ms);
    }

    /// True when every counter matches what the line total implies.
    pub fn is_consistent(&self) -> bool {
        self.level == calculate_level(self.lines)
            && self.drop_interval_ms == get_drop_interval_ms(self.level, self.base_drop_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_scores_scale_with_level() {
        assert_eq!(calculate_line_score(1, 1), 100);
        assert_eq!(calculate_line_score(4, 1), 400);
        assert_eq!(calculate_line_score(2, 3), 600);
        assert_eq!(calculate_line_score(0, 5), 0);
        assert_eq!(calculate_line_score(u32::MAX, 2), u32::MAX);
    }

    #[test]
    fn test_level_calculation() {
        assert_eq!(calculate_level(0), 1);
        assert_eq!(calculate_level(9), 1);
        assert_eq!(calculate_level(10), 2);
        assert_eq!(calculate_level(29), 3);
        assert_eq!(calculate_level(100), 11);
    }

    #[test]
    fn test_drop_intervals() {
        assert_eq!(get_drop_interval_ms(1, 1000), 1000);
        assert_eq!(get_drop_interval_ms(2, 1000), 950);
        assert_eq!(get_drop_interval_ms(19, 1000), 100);
        assert_eq!(get_drop_interval_ms(20, 1000), 50);
        assert_eq!(get_drop_interval_ms(40, 1000), 50);
        assert_eq!(get_drop_interval_ms(3, 500), 400);
    }

    #[test]
    fn test_apply_clear_uses_level_before_update() {
        let mut p = Progression::new(1000);
        assert!(p.apply_clear(9).is_some());
        assert_eq!(p.score(), 900);
        assert_eq!(p.level(), 1);

        // Crosses into level 2 but is still scored at level 1.
        let result = p.apply_clear(2).unwrap();
        assert_eq!(result.points, 200);
        assert_eq!(result.score, 1100);
        assert_eq!(result.level, 2);
        assert_eq!(result.drop_interval_ms, 950);
        assert!(result.leveled_up);
    }

    #[test]
    fn test_zero_lines_changes_nothing() {
        let mut p = Progression::new(1000);
        p.apply_clear(3);
        let before = p.clone();
        assert_eq!(p.apply_clear(0), None);
        assert_eq!(p, before);
    }

    #[test]
    fn test_reset_restores_base_interval() {
        let mut p = Progression::new(800);
        p.apply_clear(25);
        assert_eq!(p.drop_interval_ms(), 700);

        p.reset();
        assert_eq!((p.score(), p.lines(), p.level()), (0, 0, 1));
        assert_eq!(p.drop_interval_ms(), 800);
        assert!(p.is_consistent());
    }
}
