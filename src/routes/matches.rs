use crate::error::AppError;
use crate::models::{
    HealthResponse, MatchListResponse, MatchRecord, MatchView, NewMatch, Profile,
    SendMatchRequest, SendMatchResponse,
};
use crate::routes::players::ensure_complete;
use crate::routes::AppState;
use crate::session::Session;
use actix_web::{web, HttpResponse, Responder};
use std::collections::{HashMap, HashSet};
use validator::Validate;

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/matches", web::post().to(send_match))
        .route("/matches", web::get().to(list_matches));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let pg_healthy = state.postgres.health_check().await.unwrap_or(false);

    let status = if pg_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        cache: state.cache.as_ref().map(|c| c.stats()),
    })
}

/// Send match endpoint
///
/// POST /api/v1/matches
///
/// Request body:
/// ```json
/// {
///   "targetUserId": "string",
///   "mode": "normal|compétitif|chill"
/// }
/// ```
///
/// The score stored on the record is the compatibility at the time of the
/// match. A pair that already has a record answers 409 `already_matched`.
async fn send_match(
    state: web::Data<AppState>,
    session: Session,
    req: web::Json<SendMatchRequest>,
) -> Result<HttpResponse, AppError> {
    req.validate()?;

    if req.target_user_id == session.user_id {
        return Err(AppError::Validation("Cannot match with yourself".to_string()));
    }

    let viewer = state.load_profile(&session.user_id).await?;
    ensure_complete(&viewer)?;
    let target = state.load_profile(&req.target_user_id).await?;

    let score = state.ranker.score(&viewer, &target).total;

    let record = state
        .postgres
        .insert_match(&NewMatch {
            requester_id: session.user_id.clone(),
            matched_id: target.user_id.clone(),
            compatibility_score: score,
            match_mode: req.mode,
        })
        .await
        .map_err(|e| {
            tracing::info!(
                "Match {} -> {} not recorded: {}",
                session.user_id,
                target.user_id,
                e
            );
            AppError::from(e)
        })?;

    tracing::info!(
        "Match sent: {} -> {} (score {}, mode {})",
        record.requester_id,
        record.matched_id,
        record.compatibility_score,
        record.match_mode.label()
    );

    Ok(HttpResponse::Created().json(SendMatchResponse {
        success: true,
        record,
    }))
}

/// Pair every record with the other participant's profile
pub fn build_match_list(
    user_id: &str,
    records: Vec<MatchRecord>,
    profiles: Vec<Profile>,
) -> MatchListResponse {
    let by_id: HashMap<String, Profile> = profiles
        .into_iter()
        .map(|p| (p.user_id.clone(), p))
        .collect();

    let unique_players = records
        .iter()
        .map(|r| r.other_party(user_id))
        .filter(|id| by_id.contains_key(*id))
        .collect::<HashSet<_>>()
        .len();

    let matches = records
        .into_iter()
        .map(|record| {
            let other = by_id.get(record.other_party(user_id)).cloned();
            MatchView::new(record, other)
        })
        .collect();

    MatchListResponse {
        matches,
        unique_players,
    }
}

/// List matches endpoint
///
/// GET /api/v1/matches
///
/// Newest first, with the other player's contact details.
async fn list_matches(
    state: web::Data<AppState>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let records = state.postgres.matches_for_user(&session.user_id).await?;

    let other_ids: Vec<String> = records
        .iter()
        .map(|r| r.other_party(&session.user_id).to_string())
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();

    let profiles = state.store.get_profiles(&other_ids).await?;

    let response = build_match_list(&session.user_id, records, profiles);

    tracing::debug!(
        "User {} has {} matches ({} players)",
        session.user_id,
        response.matches.len(),
        response.unique_players
    );

    Ok(HttpResponse::Ok().json(response))
}
