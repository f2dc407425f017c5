//! Scoring module - classic line-clear scoring and level/gravity progression
//!
//! - Clearing N rows at once awards `LINE_SCORES[N] * level` (40/100/300/1200 per level).
//! - `level = lines / 10 + 1`.
//! - Drop interval is `max(120, 1000 - (level - 1) * 80)` ms.

use crate::types::{
    BASE_DROP_MS, DROP_INTERVAL_FLOOR_MS, DROP_INTERVAL_STEP_MS, LINES_PER_LEVEL, LINE_SCORES,
};

/// Points for clearing `rows` at once at `level`.
///
/// Row counts past the table (not reachable with four-cell pieces) score as the last entry.
pub fn line_clear_score(rows: usize, level: u32) -> u32 {
    let base = LINE_SCORES
        .get(rows)
        .or(LINE_SCORES.last())
        .copied()
        .unwrap_or(0);
    base.saturating_mul(level)
}

/// Level reached after clearing `total_lines`
pub fn level_for_lines(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Gravity interval for a level, clamped at the floor
pub fn drop_interval_ms(level: u32) -> u32 {
    let speedup = level.saturating_sub(1).saturating_mul(DROP_INTERVAL_STEP_MS);
    BASE_DROP_MS
        .saturating_sub(speedup)
        .max(DROP_INTERVAL_FLOOR_MS)
}

/// Running score/lines/level totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScoreTracker {
    score: u32,
    lines: u32,
    level: u32,
    drop_interval_ms: u32,
}

/// Result of crediting one sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ScoreResult {
    pub rows: u32,
    pub points: u32,
    pub level_changed: bool,
}

impl ScoreTracker {
    pub fn new() -> Self {
        let level = level_for_lines(0);
        Self {
            score: 0,
            lines: 0,
            level,
            drop_interval_ms: drop_interval_ms(level),
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

    /// Credit a sweep that removed `rows` rows.
    ///
    /// Points use the level in effect before the clear. The interval is only recomputed when
    /// the level actually changes. A zero-row sweep changes nothing.
    pub fn credit(&mut self, rows: usize) -> ScoreResult {
        if rows == 0 {
            return ScoreResult::default();
        }

        let points = line_clear_score(rows, self.level);
        self.score = self.score.saturating_add(points);
        self.lines = self.lines.saturating_add(rows as u32);

        let level = level_for_lines(self.lines);
        let level_changed = level != self.level;
        if level_changed {
            self.level = level;
            self.drop_interval_ms = drop_interval_ms(level);
        }

        ScoreResult {
            rows: rows as u32,
            points,
            level_changed,
        }
    }
}

impl Default for ScoreTracker {
    fn default() -> Self {
        Self::new()
    }
}
