use crate::core::Catalog;
use crate::error::AppError;
use crate::models::{PresenceRequest, UpdateProfileRequest};
use crate::routes::AppState;
use crate::services::ProfileUpdate;
use crate::session::Session;
use crate::setup::first_incomplete_step;
use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

/// Configure profile and catalog routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/catalog", web::get().to(get_catalog))
        .route("/profile", web::get().to(get_profile))
        .route("/profile", web::put().to(update_profile))
        .route("/profile/presence", web::post().to(set_presence));
}

/// GET /api/v1/catalog
async fn get_catalog() -> impl Responder {
    HttpResponse::Ok().json(Catalog::current())
}

/// GET /api/v1/profile
async fn get_profile(
    state: web::Data<AppState>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let profile = state.load_profile(&session.user_id).await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// Check a profile draft the way the setup wizard would
pub fn validate_update(req: &UpdateProfileRequest) -> Result<(), AppError> {
    if let Some(step) = first_incomplete_step(req) {
        return Err(AppError::ProfileIncomplete(step));
    }
    req.validate()?;
    Ok(())
}

/// Save profile endpoint
///
/// PUT /api/v1/profile
async fn update_profile(
    state: web::Data<AppState>,
    session: Session,
    req: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse, AppError> {
    let req = req.into_inner();
    validate_update(&req)?;

    let update = ProfileUpdate::from(req);
    let saved = state.store.update_profile(&session.user_id, &update).await?;
    state.invalidate_profile(&session.user_id).await;

    tracing::info!("Profile saved for {}", session.user_id);

    Ok(HttpResponse::Ok().json(saved))
}

/// Presence endpoint
///
/// POST /api/v1/profile/presence
async fn set_presence(
    state: web::Data<AppState>,
    session: Session,
    req: web::Json<PresenceRequest>,
) -> Result<HttpResponse, AppError> {
    state
        .store
        .set_presence(&session.user_id, req.is_online)
        .await?;
    state.invalidate_profile(&session.user_id).await;

    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Level, PlayStyle};
    use crate::setup::SetupStep;
    use actix_web::{test, App};

    fn draft() -> UpdateProfileRequest {
        UpdateProfileRequest {
            username: "Nyx".to_string(),
            avatar_emoji: "🦊".to_string(),
            games: vec!["Apex Legends".to_string()],
            level: Level::Expert,
            play_style: PlayStyle::Tryhard,
            availability: vec!["Soirée (18h-23h)".to_string()],
            ..Default::default()
        }
    }

    #[::core::prelude::v1::test]
    fn test_validate_update_accepts_complete_draft() {
        assert!(validate_update(&draft()).is_ok());
    }

    #[::core::prelude::v1::test]
    fn test_validate_update_reports_setup_step_first() {
        let req = UpdateProfileRequest {
            availability: vec![],
            ..draft()
        };
        assert!(matches!(
            validate_update(&req),
            Err(AppError::ProfileIncomplete(SetupStep::Availability))
        ));
    }

    #[::core::prelude::v1::test]
    fn test_validate_update_checks_catalog() {
        let req = UpdateProfileRequest {
            availability: vec!["Toujours".to_string()],
            ..draft()
        };
        assert!(matches!(validate_update(&req), Err(AppError::Validation(_))));
    }

    #[actix_web::test]
    async fn test_catalog_endpoint() {
        let app = test::init_service(
            App::new().route("/api/v1/catalog", web::get().to(get_catalog)),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/v1/catalog").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["levels"][0], "débutant");
        assert_eq!(body["availabilities"].as_array().unwrap().len(), 6);
    }
}
