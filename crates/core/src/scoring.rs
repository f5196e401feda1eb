//! Scoring module - line clear, combo and drop points
//!
//! - A clear of `n` lines scores `LINE_SCORES[n] * level`, or
//!   `PERFECT_CLEAR_SCORES[n] * level` when it empties the field.
//! - A clear that follows another clear adds `COMBO_BASE * combo * level`.
//! - Soft drop scores 1 per cell, hard drop 2 per cell, independent of level.

use crate::types::{
    COMBO_BASE, HARD_DROP_POINTS, LINES_PER_LEVEL, LINE_SCORES, PERFECT_CLEAR_SCORES,
    SOFT_DROP_POINTS,
};

/// Score calculation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Points from the line multiplier table.
    pub line_clear_score: u32,
    /// Combo bonus added on top of `line_clear_score`.
    pub combo_bonus: u32,
    pub total: u32,
}

/// Line clear points for `lines` (1-4) at `level` (1-based).
pub fn calculate_line_score(lines: usize, level: u8, perfect_clear: bool) -> u32 {
    if lines == 0 || lines > 4 {
        return 0;
    }
    let table = if perfect_clear {
        &PERFECT_CLEAR_SCORES
    } else {
        &LINE_SCORES
    };
    table[lines].saturating_mul(level as u32)
}

/// Combo bonus.
///
/// - `-1`: no chain
/// - `0`: first clear in a chain (no bonus)
/// - `1+`: `COMBO_BASE * combo * level`
pub fn calculate_combo_bonus(combo: i8, level: u8) -> u32 {
    if combo <= 0 {
        return 0;
    }
    COMBO_BASE
        .saturating_mul(combo as u32)
        .saturating_mul(level as u32)
}

/// Complete score for one clear. `combo` is the counter after this clear was counted.
pub fn calculate_score(lines: usize, level: u8, combo: i8, perfect_clear: bool) -> ScoreResult {
    let line_clear_score = calculate_line_score(lines, level, perfect_clear);
    let combo_bonus = if lines > 0 {
        calculate_combo_bonus(combo, level)
    } else {
        0
    };

    ScoreResult {
        line_clear_score,
        combo_bonus,
        total: line_clear_score.saturating_add(combo_bonus),
    }
}

/// Calculate drop score
/// soft_drop: +1 per cell
/// hard_drop: +2 per cell
pub fn calculate_drop_score(cells: u32, is_hard_drop: bool) -> u32 {
    let per_cell = if is_hard_drop {
        HARD_DROP_POINTS
    } else {
        SOFT_DROP_POINTS
    };
    cells.saturating_mul(per_cell)
}

/// Level for a running line total, starting at 1.
pub fn calculate_level(total_lines: u32) -> u8 {
    (total_lines / LINES_PER_LEVEL + 1).min(u8::MAX as u32) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_score_scales_with_level() {
        assert_eq!(calculate_line_score(1, 1, false), 100);
        assert_eq!(calculate_line_score(2, 1, false), 300);
        assert_eq!(calculate_line_score(3, 2, false), 1000);
        assert_eq!(calculate_line_score(4, 3, false), 2400);
        assert_eq!(calculate_line_score(0, 5, false), 0);
        assert_eq!(calculate_line_score(5, 5, false), 0);
    }

    #[test]
    fn test_perfect_clear_uses_its_own_table() {
        assert_eq!(calculate_line_score(1, 1, true), 800);
        assert_eq!(calculate_line_score(4, 2, true), 6400);
    }

    #[test]
    fn test_combo_bonus() {
        assert_eq!(calculate_combo_bonus(-1, 4), 0);
        assert_eq!(calculate_combo_bonus(0, 4), 0);
        assert_eq!(calculate_combo_bonus(1, 1), 50);
        assert_eq!(calculate_combo_bonus(3, 2), 300);
    }

    #[test]
    fn test_calculate_score_totals() {
        let result = calculate_score(2, 2, 1, false);
        assert_eq!(result.line_clear_score, 600);
        assert_eq!(result.combo_bonus, 100);
        assert_eq!(result.total, 700);

        assert_eq!(calculate_score(0, 3, 2, false), ScoreResult::default());
    }

    #[test]
    fn test_drop_score() {
        assert_eq!(calculate_drop_score(5, false), 5);
        assert_eq!(calculate_drop_score(5, true), 10);
        assert_eq!(calculate_drop_score(0, true), 0);
    }

    #[test]
    fn test_level_progression() {
        assert_eq!(calculate_level(0), 1);
        assert_eq!(calculate_level(9), 1);
        assert_eq!(calculate_level(10), 2);
        assert_eq!(calculate_level(199), 20);
        assert_eq!(calculate_level(u32::MAX), u8::MAX);
    }
}
