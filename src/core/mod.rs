// Core algorithm exports
pub mod catalog;
pub mod filters;
pub mod ranker;
pub mod scoring;

pub use catalog::Catalog;
pub use filters::{matches_mode, matches_selection, FilterSelection};
pub use ranker::Ranker;
pub use scoring::{compatibility, compatibility_with, score_breakdown, ScoreBreakdown};
