use crate::core::{
    filters::{matches_mode, matches_selection, FilterSelection},
    scoring::{score_breakdown, ScoreBreakdown},
};
use crate::models::{MatchMode, Profile, RankedCandidate, ScoringRules};

/// Ranks a candidate pool against a viewer.
///
/// # Pipeline Stages
/// 1. Mode restriction on play style
/// 2. Category filters (games, styles, availability)
/// 3. Compatibility scoring
/// 4. Descending sort by score
///
/// The ranker keeps no state between calls; every ranking starts from the
/// pool it is handed.
#[derive(Debug, Clone)]
pub struct Ranker {
    rules: ScoringRules,
}

impl Ranker {
    pub fn new(rules: ScoringRules) -> Self {
        Self { rules }
    }

    pub fn with_default_rules() -> Self {
        Self {
            rules: ScoringRules::default(),
        }
    }

    pub fn rules(&self) -> &ScoringRules {
        &self.rules
    }

    /// Score a single candidate against the viewer
    pub fn score(&self, viewer: &Profile, candidate: &Profile) -> ScoreBreakdown {
        score_breakdown(viewer, candidate, &self.rules)
    }

    /// Rank `pool` for `viewer`.
    ///
    /// # Arguments
    /// * `viewer` - The player browsing; `None` while their profile is not loaded
    /// * `pool` - Candidates, never containing the viewer
    /// * `mode` - Play style restriction
    /// * `filters` - Category filters
    ///
    /// # Returns
    /// Candidates sorted by descending score. Equal scores keep their pool
    /// order. An absent viewer yields an empty list.
    pub fn rank(
        &self,
        viewer: Option<&Profile>,
        pool: &[Profile],
        mode: MatchMode,
        filters: &FilterSelection,
    ) -> Vec<RankedCandidate> {
        let Some(viewer) = viewer else {
            return Vec::new();
        };

        let mut ranked: Vec<RankedCandidate> = pool
            .iter()
            // Stage 1: mode restriction
            .filter(|candidate| matches_mode(candidate, mode))
            // Stage 2: category filters
            .filter(|candidate| matches_selection(candidate, filters))
            // Stage 3: scoring
            .map(|candidate| {
                let breakdown = self.score(viewer, candidate);
                RankedCandidate {
                    profile: candidate.clone(),
                    score: breakdown.total,
                    shared_games: breakdown.shared_games,
                }
            })
            .collect();

        // Stage 4: stable sort, so ties stay in pool order
        ranked.sort_by(|a, b| b.score.cmp(&a.score));

        ranked
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::with_default_rules()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Level, PlayStyle};

    fn create_candidate(id: &str, games: &[&str], level: Level, style: PlayStyle) -> Profile {
        Profile {
            user_id: id.to_string(),
            username: format!("Player {}", id),
            avatar_emoji: "🎮".to_string(),
            bio: String::new(),
            main_game: games.first().map(|g| g.to_string()).unwrap_or_default(),
            games: games.iter().map(|g| g.to_string()).collect(),
            level,
            play_style: style,
            availability: vec!["Soirée (18h-23h)".to_string()],
            contact: Default::default(),
            is_online: false,
            last_seen: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn create_viewer() -> Profile {
        create_candidate(
            "viewer",
            &["Valorant", "CS2", "Rocket League"],
            Level::Advanced,
            PlayStyle::Competitive,
        )
    }

    #[test]
    fn test_rank_sorted_by_score() {
        let ranker = Ranker::with_default_rules();
        let viewer = create_viewer();
        let pool = vec![
            create_candidate("1", &["FIFA"], Level::Beginner, PlayStyle::Chill),
            create_candidate("2", &["Valorant", "CS2"], Level::Advanced, PlayStyle::Competitive),
            create_candidate("3", &["Valorant"], Level::Expert, PlayStyle::Tryhard),
        ];

        let ranked = ranker.rank(Some(&viewer), &pool, MatchMode::All, &FilterSelection::default());

        let ids: Vec<&str> = ranked.iter().map(|r| r.profile.user_id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3", "1"]);
        assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_ties_keep_pool_order() {
        let ranker = Ranker::with_default_rules();
        let viewer = create_viewer();
        let pool: Vec<Profile> = ["c", "a", "d", "b"]
            .iter()
            .map(|id| create_candidate(id, &["CS2"], Level::Advanced, PlayStyle::Competitive))
            .collect();

        let ranked = ranker.rank(Some(&viewer), &pool, MatchMode::All, &FilterSelection::default());

        let ids: Vec<&str> = ranked.iter().map(|r| r.profile.user_id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "d", "b"]);
    }

    #[test]
    fn test_missing_viewer_returns_empty() {
        let ranker = Ranker::with_default_rules();
        let pool = vec![create_candidate("1", &["CS2"], Level::Expert, PlayStyle::Fun)];

        let ranked = ranker.rank(None, &pool, MatchMode::All, &FilterSelection::default());

        assert!(ranked.is_empty());
    }

    #[test]
    fn test_chill_mode_excludes_competitive_styles() {
        let ranker = Ranker::with_default_rules();
        let viewer = create_viewer();
        let pool = vec![
            create_candidate("1", &["CS2"], Level::Expert, PlayStyle::Tryhard),
            create_candidate("2", &["CS2"], Level::Expert, PlayStyle::Fun),
            create_candidate("3", &["CS2"], Level::Expert, PlayStyle::Chill),
        ];

        let ranked = ranker.rank(Some(&viewer), &pool, MatchMode::Chill, &FilterSelection::default());

        assert_eq!(ranked.len(), 2);
        assert!(ranked
            .iter()
            .all(|r| matches!(r.profile.play_style, PlayStyle::Chill | PlayStyle::Fun)));
    }

    #[test]
    fn test_shared_games_reported() {
        let ranker = Ranker::with_default_rules();
        let viewer = create_viewer();
        let pool = vec![create_candidate(
            "1",
            &["Rocket League", "FIFA", "Valorant"],
            Level::Advanced,
            PlayStyle::Competitive,
        )];

        let ranked = ranker.rank(Some(&viewer), &pool, MatchMode::All, &FilterSelection::default());

        assert_eq!(ranked[0].shared_games, vec!["Rocket League", "Valorant"]);
    }
}
