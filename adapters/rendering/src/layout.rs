use glam::Vec2;
use std::time::Duration;

use crate::Color;

/// Horizontal padding on each side of the toast text.
pub const TOAST_PADDING: f32 = 20.0;
/// Vertical gap between toast lines.
pub const TOAST_LINE_GAP: f32 = 5.0;
/// Distance between the toast box and the bottom screen edge.
pub const TOAST_MARGIN: f32 = 20.0;
/// Leaderboard name used for the player's own row.
pub const PLAYER_NAME: &str = "You";

const TOAST_SPLIT: &str = "! ";
const TOAST_VERTICAL_PADDING: f32 = 10.0;
const FALLBACK_GLYPH_WIDTH: f32 = 0.5;
const RIVAL_NAME: &str = "MegaPolicyMan";
const CAUTIOUS_NAME: &str = "CautiousDriver";

/// Formats the remaining session time as `MM:SS`, truncating partial seconds.
#[must_use]
pub fn format_clock(time_left: Duration) -> String {
    let seconds = time_left.as_secs();
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Heart colour for the remaining budget: red at one or none, yellow at two, green otherwise.
#[must_use]
pub fn health_color(health: u32) -> Color {
    match health {
        0 | 1 => Color::from_rgb_u8(255, 0, 0),
        2 => Color::from_rgb_u8(255, 255, 0),
        _ => Color::from_rgb_u8(0, 255, 0),
    }
}

/// Splits a toast message after every `"! "`, keeping the exclamation mark on the first part.
#[must_use]
pub fn split_toast_lines(message: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = message;
    while let Some(index) = rest.find(TOAST_SPLIT) {
        lines.push(&rest[..=index]);
        rest = &rest[index + TOAST_SPLIT.len()..];
    }
    if !rest.is_empty() || lines.is_empty() {
        lines.push(rest);
    }
    lines
}

/// Measured toast box.
#[derive(Clone, Debug, PartialEq)]
pub struct ToastLayout {
    /// Lines drawn top to bottom.
    pub lines: Vec<String>,
    /// Width of every line, in the same order.
    pub line_widths: Vec<f32>,
    /// Height of a single line.
    pub line_height: f32,
    /// Box size including padding.
    pub size: Vec2,
}

impl ToastLayout {
    /// Lays out `message` using `measure` to obtain line widths.
    ///
    /// If any line cannot be measured the whole message falls back to a single
    /// line whose width is estimated from its character count.
    pub fn new<F>(message: &str, line_height: f32, mut measure: F) -> Self
    where
        F: FnMut(&str) -> f32,
    {
        let split = split_toast_lines(message);
        let widths: Vec<f32> = split.iter().map(|line| measure(line)).collect();
        let measurable = widths.iter().all(|width| width.is_finite() && *width > 0.0);

        let (lines, line_widths) = if measurable {
            (split.into_iter().map(str::to_owned).collect(), widths)
        } else {
            let width = message.chars().count() as f32 * line_height * FALLBACK_GLYPH_WIDTH;
            (vec![message.to_owned()], vec![width])
        };

        let widest = line_widths.iter().copied().fold(0.0_f32, f32::max);
        let count = lines.len() as f32;
        let size = Vec2::new(
            widest + TOAST_PADDING * 2.0,
            count * line_height + (count - 1.0) * TOAST_LINE_GAP + TOAST_VERTICAL_PADDING * 2.0,
        );
        Self {
            lines,
            line_widths,
            line_height,
            size,
        }
    }

    /// Upper-left corner of the box centred horizontally above the bottom margin.
    #[must_use]
    pub fn origin(&self, screen_width: f32, screen_height: f32) -> Vec2 {
        Vec2::new(
            (screen_width - self.size.x) * 0.5,
            screen_height - TOAST_MARGIN - self.size.y,
        )
    }

    /// Top of line `index` relative to the box origin.
    #[must_use]
    pub fn line_top(&self, index: usize) -> f32 {
        TOAST_VERTICAL_PADDING + index as f32 * (self.line_height + TOAST_LINE_GAP)
    }
}

/// Row of the mock leaderboard shown on the terminal overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LeaderboardRow {
    /// One-based rank.
    pub rank: usize,
    /// Display name.
    pub name: &'static str,
    /// Saved amount.
    pub score: u64,
    /// Whether the row belongs to the player.
    pub is_player: bool,
}

/// Deterministic three-row leaderboard built around the final score.
#[must_use]
pub fn mock_leaderboard(score: u64) -> Vec<LeaderboardRow> {
    let mut entries = [
        (RIVAL_NAME, score.saturating_add(5_000).max(10_000), false),
        (PLAYER_NAME, score, true),
        (CAUTIOUS_NAME, (score / 2).max(5_000), false),
    ];
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries
        .into_iter()
        .enumerate()
        .map(|(index, (name, score, is_player))| LeaderboardRow {
            rank: index + 1,
            name,
            score,
            is_player,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_truncates_to_whole_seconds() {
        assert_eq!(format_clock(Duration::from_secs(90)), "01:30");
        assert_eq!(format_clock(Duration::from_millis(59_999)), "00:59");
        assert_eq!(format_clock(Duration::ZERO), "00:00");
    }

    #[test]
    fn heart_colour_tracks_remaining_budget() {
        assert_eq!(health_color(3), Color::from_rgb_u8(0, 255, 0));
        assert_eq!(health_color(2), Color::from_rgb_u8(255, 255, 0));
        assert_eq!(health_color(1), Color::from_rgb_u8(255, 0, 0));
        assert_eq!(health_color(0), Color::from_rgb_u8(255, 0, 0));
    }

    #[test]
    fn toast_lines_split_after_exclamation() {
        assert_eq!(split_toast_lines("Loss! Budget -1"), vec!["Loss!", "Budget -1"]);
        assert_eq!(split_toast_lines("KASKO ACTIVATED!"), vec!["KASKO ACTIVATED!"]);
        assert_eq!(split_toast_lines(""), vec![""]);
    }

    #[test]
    fn toast_box_wraps_widest_line() {
        let layout = ToastLayout::new("Loss! Budget -1", 20.0, |line| line.len() as f32 * 10.0);
        assert_eq!(layout.lines, vec!["Loss!", "Budget -1"]);
        assert_eq!(layout.size, Vec2::new(90.0 + 40.0, 2.0 * 20.0 + 5.0 + 20.0));
        assert_eq!(layout.origin(800.0, 600.0), Vec2::new(335.0, 515.0));
        assert_eq!(layout.line_top(1), 35.0);
    }

    #[test]
    fn unmeasurable_toast_falls_back_to_single_line() {
        let layout = ToastLayout::new("Loss! Budget -1", 20.0, |line| {
            if line.starts_with("Loss") {
                f32::NAN
            } else {
                50.0
            }
        });
        assert_eq!(layout.lines, vec!["Loss! Budget -1"]);
        assert_eq!(layout.line_widths, vec![15.0 * 20.0 * 0.5]);
        assert_eq!(layout.size.y, 20.0 + 20.0);
    }

    #[test]
    fn leaderboard_sorts_descending_with_floors() {
        let rows = mock_leaderboard(0);
        let summary: Vec<_> = rows.iter().map(|row| (row.rank, row.name, row.score)).collect();
        assert_eq!(
            summary,
            vec![
                (1, RIVAL_NAME, 10_000),
                (2, CAUTIOUS_NAME, 5_000),
                (3, PLAYER_NAME, 0),
            ]
        );

        let rows = mock_leaderboard(120_000);
        assert_eq!(rows[0].score, 125_000);
        assert!(rows[1].is_player);
        assert_eq!(rows[2].score, 60_000);
    }
}
