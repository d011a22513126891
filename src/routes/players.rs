use crate::config::MatchingSettings;
use crate::core::Ranker;
use crate::error::AppError;
use crate::models::{
    CompatibilityResponse, Profile, RankPlayersRequest, RankPlayersResponse, UpdateProfileRequest,
};
use crate::routes::AppState;
use crate::session::Session;
use crate::setup::{first_incomplete_step, SetupStep};
use actix_web::{web, HttpResponse};
use validator::Validate;

/// Configure player discovery routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/players/rank", web::post().to(rank_players))
        .route(
            "/players/{user_id}/compatibility",
            web::get().to(player_compatibility),
        );
}

/// The viewer has to be matchable before anyone is scored against them
pub fn ensure_complete(viewer: &Profile) -> Result<(), AppError> {
    if viewer.is_complete() {
        return Ok(());
    }

    let draft = UpdateProfileRequest {
        username: viewer.username.clone(),
        games: viewer.games.clone(),
        play_style: viewer.play_style.clone(),
        availability: viewer.availability.clone(),
        ..Default::default()
    };
    // Games and availability are what make a profile incomplete, so the
    // walk always stops before Done here
    let step = first_incomplete_step(&draft).unwrap_or(SetupStep::Games);
    Err(AppError::ProfileIncomplete(step))
}

/// Rank `pool` for `viewer` and shape the response.
pub fn build_rank_response(
    ranker: &Ranker,
    matching: &MatchingSettings,
    viewer: &Profile,
    pool: &[Profile],
    req: &RankPlayersRequest,
) -> Result<RankPlayersResponse, AppError> {
    req.validate()?;
    ensure_complete(viewer)?;

    let mut players = ranker.rank(Some(viewer), pool, req.mode, &req.filters);
    players.truncate(matching.effective_limit(req.limit));

    // Contact details unlock only after a match
    for player in &mut players {
        player.profile = player.profile.without_contact();
    }

    Ok(RankPlayersResponse {
        players,
        mode: req.mode,
        total_candidates: pool.len(),
    })
}

/// Rank players endpoint
///
/// POST /api/v1/players/rank
///
/// Request body:
/// ```json
/// {
///   "mode": "normal|compétitif|chill",
///   "filters": { "games": [], "styles": [], "availability": [] },
///   "limit": 50
/// }
/// ```
async fn rank_players(
    state: web::Data<AppState>,
    session: Session,
    req: web::Json<RankPlayersRequest>,
) -> Result<HttpResponse, AppError> {
    let viewer = state.load_profile(&session.user_id).await?;

    // The pool is read fresh for every ranking
    let pool = state.store.list_candidates(&session.user_id).await?;

    tracing::debug!("Found {} candidates for {}", pool.len(), session.user_id);

    let response = build_rank_response(&state.ranker, &state.matching, &viewer, &pool, &req)?;

    tracing::info!(
        "Returning {} players for user {} (mode {}, from {} candidates)",
        response.players.len(),
        session.user_id,
        req.mode.label(),
        response.total_candidates
    );

    Ok(HttpResponse::Ok().json(response))
}

/// Compatibility with one player
///
/// GET /api/v1/players/{user_id}/compatibility
async fn player_compatibility(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let target_id = path.into_inner();
    if target_id == session.user_id {
        return Err(AppError::Validation("Cannot score yourself".to_string()));
    }

    let viewer = state.load_profile(&session.user_id).await?;
    ensure_complete(&viewer)?;
    let candidate = state.load_profile(&target_id).await?;

    let breakdown = state.ranker.score(&viewer, &candidate);
    let already_matched = state
        .postgres
        .find_match_between(&session.user_id, &target_id)
        .await?
        .is_some();

    Ok(HttpResponse::Ok().json(CompatibilityResponse {
        user_id: target_id,
        score: breakdown.total,
        breakdown,
        already_matched,
    }))
}
