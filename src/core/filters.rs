use crate::models::{MatchMode, PlayStyle, Profile};
use serde::{Deserialize, Serialize};

/// Category filters picked by the viewer.
///
/// Within a category any selected value is enough; a candidate has to pass
/// every non-empty category. An empty category does not constrain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSelection {
    pub games: Vec<String>,
    pub styles: Vec<PlayStyle>,
    pub availability: Vec<String>,
}

impl FilterSelection {
    pub fn is_empty(&self) -> bool {
        self.games.is_empty() && self.styles.is_empty() && self.availability.is_empty()
    }
}

/// Stage 1: mode restriction on play style
#[inline]
pub fn matches_mode(profile: &Profile, mode: MatchMode) -> bool {
    mode.admits(&profile.play_style)
}

#[inline]
pub fn matches_games(profile: &Profile, selected: &[String]) -> bool {
    selected.is_empty() || profile.games.iter().any(|g| selected.contains(g))
}

#[inline]
pub fn matches_styles(profile: &Profile, selected: &[PlayStyle]) -> bool {
    selected.is_empty() || selected.contains(&profile.play_style)
}

#[inline]
pub fn matches_availability(profile: &Profile, selected: &[String]) -> bool {
    selected.is_empty() || profile.availability.iter().any(|a| selected.contains(a))
}

/// Stage 2: every category filter
#[inline]
pub fn matches_selection(profile: &Profile, filters: &FilterSelection) -> bool {
    matches_games(profile, &filters.games)
        && matches_styles(profile, &filters.styles)
        && matches_availability(profile, &filters.availability)
}
