use crate::models::{Level, PlayStyle, Profile, ScoringRules};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Per-component breakdown of a compatibility score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub games: u32,
    pub level: u32,
    pub style: u32,
    pub availability: u32,
    /// Normalised 0-100 score.
    pub total: u8,
    #[serde(rename = "sharedGames")]
    pub shared_games: Vec<String>,
}

/// Compatibility (0-100) between two profiles using the default point table.
///
/// Scoring formula:
/// score = round((
///     min(shared_games * 15, 40) +     # Games in common
///     level_step(|level_a - level_b|) + # 20 / 14 / 6 / 0
///     style_points(style_a, style_b) +  # 20 exact, 14 adjacent, 4 otherwise
///     min(shared_slots * 7, 20)         # Availability overlap
/// ) / max_possible * 100)
pub fn compatibility(viewer: &Profile, candidate: &Profile) -> u8 {
    score_breakdown(viewer, candidate, &ScoringRules::default()).total
}

/// Compatibility under a custom point table
pub fn compatibility_with(viewer: &Profile, candidate: &Profile, rules: &ScoringRules) -> u8 {
    score_breakdown(viewer, candidate, rules).total
}

pub fn score_breakdown(viewer: &Profile, candidate: &Profile, rules: &ScoringRules) -> ScoreBreakdown {
    let shared_games = shared_labels(&viewer.games, &candidate.games);
    let games = games_score(shared_games.len(), rules);
    let level = level_score(&viewer.level, &candidate.level, rules);
    let style = style_score(&viewer.play_style, &candidate.play_style, rules);
    let availability = availability_score(
        shared_labels(&viewer.availability, &candidate.availability).len(),
        rules,
    );

    let raw = games
        .saturating_add(level)
        .saturating_add(style)
        .saturating_add(availability);

    ScoreBreakdown {
        games,
        level,
        style,
        availability,
        total: normalise(raw, rules.max_possible()),
        shared_games,
    }
}

/// Labels present in both lists, each counted once, in `a`'s order
fn shared_labels(a: &[String], b: &[String]) -> Vec<String> {
    let other: HashSet<&str> = b.iter().map(String::as_str).collect();
    let mut seen = HashSet::new();

    a.iter()
        .filter(|label| other.contains(label.as_str()) && seen.insert(label.as_str()))
        .cloned()
        .collect()
}

#[inline]
fn games_score(shared: usize, rules: &ScoringRules) -> u32 {
    capped(shared, rules.game_points, rules.game_cap)
}

#[inline]
fn availability_score(shared: usize, rules: &ScoringRules) -> u32 {
    capped(shared, rules.slot_points, rules.slot_cap)
}

#[inline]
fn capped(count: usize, points: u32, cap: u32) -> u32 {
    let count = u32::try_from(count).unwrap_or(u32::MAX);
    count.saturating_mul(points).min(cap)
}

#[inline]
fn level_score(a: &Level, b: &Level, rules: &ScoringRules) -> u32 {
    let diff = usize::from(a.ordinal().abs_diff(b.ordinal()));
    let step = diff.min(rules.level_points.len() - 1);
    rules.level_points[step]
}

#[inline]
fn style_score(a: &PlayStyle, b: &PlayStyle, rules: &ScoringRules) -> u32 {
    if a == b {
        rules.style_exact
    } else if a.is_adjacent(b) {
        rules.style_adjacent
    } else {
        rules.style_floor
    }
}

/// `round(raw / max * 100)`, clamped to 0-100
#[inline]
fn normalise(raw: u32, max_possible: u32) -> u8 {
    if max_possible == 0 {
        return 0;
    }
    let ratio = f64::from(raw) / f64::from(max_possible) * 100.0;
    ratio.round().clamp(0.0, 100.0) as u8
}
