// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    ContactInfo, Level, MatchMode, MatchRecord, MatchStatus, NewMatch, PlayStyle, Profile,
    RankedCandidate, ScoringRules,
};
pub use requests::{PresenceRequest, RankPlayersRequest, SendMatchRequest, UpdateProfileRequest};
pub use responses::{
    CompatibilityResponse, ErrorResponse, HealthResponse, MatchListResponse, MatchView,
    RankPlayersResponse, SendMatchResponse,
};
