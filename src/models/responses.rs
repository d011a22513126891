use crate::core::ScoreBreakdown;
use crate::models::domain::{MatchMode, MatchRecord, MatchStatus, Profile, RankedCandidate};
use crate::services::CacheStats;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Response for the rank players endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankPlayersResponse {
    pub players: Vec<RankedCandidate>,
    pub mode: MatchMode,
    /// Pool size before mode and category filters.
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
}

/// Compatibility with a single player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompatibilityResponse {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub score: u8,
    pub breakdown: ScoreBreakdown,
    /// Contact details are visible once this is set.
    #[serde(rename = "alreadyMatched")]
    pub already_matched: bool,
}

/// A match as seen by one of its participants, with the other player's
/// contact details unlocked
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchView {
    pub id: Uuid,
    #[serde(rename = "requesterId")]
    pub requester_id: String,
    #[serde(rename = "matchedId")]
    pub matched_id: String,
    #[serde(rename = "compatibilityScore")]
    pub compatibility_score: u8,
    #[serde(rename = "matchMode")]
    pub match_mode: MatchMode,
    pub status: MatchStatus,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "otherProfile")]
    pub other_profile: Option<Profile>,
}

impl MatchView {
    pub fn new(record: MatchRecord, other_profile: Option<Profile>) -> Self {
        Self {
            id: record.id,
            requester_id: record.requester_id,
            matched_id: record.matched_id,
            compatibility_score: record.compatibility_score,
            match_mode: record.match_mode,
            status: record.status,
            created_at: record.created_at,
            other_profile,
        }
    }
}

/// Response for the list matches endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchListResponse {
    pub matches: Vec<MatchView>,
    /// Distinct players among the matches.
    #[serde(rename = "uniquePlayers")]
    pub unique_players: usize,
}

/// Send match response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMatchResponse {
    pub success: bool,
    #[serde(rename = "match")]
    pub record: MatchRecord,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache: Option<CacheStats>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
