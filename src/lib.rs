//! MatchMate Algo - gaming partner matching service
//!
//! This library provides the compatibility scoring and candidate ranking used
//! to pair players by shared games, skill level, play style and schedule.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod session;
pub mod setup;

// Re-export commonly used types
pub use core::{compatibility, score_breakdown, FilterSelection, Ranker, ScoreBreakdown};
pub use error::AppError;
pub use models::{MatchMode, PlayStyle, Level, Profile, RankedCandidate, ScoringRules};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let ranker = Ranker::default();
        assert_eq!(ranker.rules(), &ScoringRules::default());
        assert!(FilterSelection::default().is_empty());
    }
}
