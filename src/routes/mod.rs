// Route exports
pub mod matches;
pub mod players;
pub mod profile;

use crate::config::MatchingSettings;
use crate::core::Ranker;
use crate::error::AppError;
use crate::models::Profile;
use crate::services::{PostgresClient, ProfileCache, ProfileStoreClient};
use actix_web::web;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ProfileStoreClient>,
    pub cache: Option<Arc<ProfileCache>>,
    pub postgres: Arc<PostgresClient>,
    pub ranker: Ranker,
    pub matching: MatchingSettings,
}

impl AppState {
    /// Load a single profile, going through the cache when one is configured
    pub async fn load_profile(&self, user_id: &str) -> Result<Profile, AppError> {
        if let Some(cache) = &self.cache {
            match cache.get_profile(user_id).await {
                Ok(Some(profile)) => return Ok(profile),
                Ok(None) => {}
                Err(e) => tracing::warn!("Profile cache read failed for {}: {}", user_id, e),
            }
        }

        let profile = self.store.get_profile(user_id).await?;

        if let Some(cache) = &self.cache {
            if let Err(e) = cache.put_profile(&profile).await {
                tracing::warn!("Failed to cache profile {}: {}", user_id, e);
            }
        }

        Ok(profile)
    }

    /// Drop a cached profile after it was written
    pub async fn invalidate_profile(&self, user_id: &str) {
        if let Some(cache) = &self.cache {
            if let Err(e) = cache.invalidate_profile(user_id).await {
                tracing::warn!("Failed to invalidate cache: {}", e);
            }
        }
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(matches::configure)
            .configure(players::configure)
            .configure(profile::configure),
    );
}
