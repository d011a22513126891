use crate::models::Profile;
use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the profile store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: invalid API key or token")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Columns written when a player saves their profile
#[derive(Debug, Clone, Serialize)]
pub struct ProfileUpdate {
    pub username: String,
    pub avatar_emoji: String,
    pub bio: String,
    pub main_game: String,
    pub games: Vec<String>,
    pub level: String,
    pub play_style: String,
    pub availability: Vec<String>,
    pub discord_tag: Option<String>,
    pub game_username: Option<String>,
    pub phone_number: Option<String>,
    pub steam_epic_link: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<crate::models::UpdateProfileRequest> for ProfileUpdate {
    fn from(req: crate::models::UpdateProfileRequest) -> Self {
        let main_game = if req.main_game.trim().is_empty() {
            req.games.first().cloned().unwrap_or_default()
        } else {
            req.main_game
        };

        Self {
            username: req.username.trim().to_string(),
            avatar_emoji: req.avatar_emoji,
            bio: req.bio,
            main_game,
            games: req.games,
            level: req.level.into(),
            play_style: req.play_style.into(),
            availability: req.availability,
            discord_tag: non_blank(req.discord_tag),
            game_username: non_blank(req.game_username),
            phone_number: non_blank(req.phone_number),
            steam_epic_link: non_blank(req.steam_epic_link),
            updated_at: Utc::now(),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, Serialize)]
struct PresenceUpdate {
    is_online: bool,
    last_seen: DateTime<Utc>,
}

/// REST client for the hosted profile table.
///
/// The store exposes tables PostgREST-style: rows are filtered with
/// `column=op.value` query parameters and returned as JSON arrays.
pub struct ProfileStoreClient {
    base_url: String,
    api_key: String,
    profiles_table: String,
    client: Client,
}

impl ProfileStoreClient {
    /// Create a new store client
    pub fn new(
        base_url: String,
        api_key: String,
        profiles_table: String,
        timeout: Duration,
    ) -> Result<Self, StoreError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            api_key,
            profiles_table,
            client,
        })
    }

    fn table_url(&self) -> String {
        format!(
            "{}/rest/v1/{}",
            self.base_url.trim_end_matches('/'),
            self.profiles_table
        )
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
    }

    /// Fetch the profile of `user_id`
    pub async fn get_profile(&self, user_id: &str) -> Result<Profile, StoreError> {
        let url = format!(
            "{}?select=*&user_id=eq.{}",
            self.table_url(),
            urlencoding::encode(user_id)
        );

        tracing::debug!("Fetching profile for user: {}", user_id);

        let rows = self.fetch_rows(&url, "fetch profile").await?;

        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::NotFound(format!("Profile not found for user {}", user_id)))
    }

    /// Every profile except the viewer's
    pub async fn list_candidates(&self, viewer_id: &str) -> Result<Vec<Profile>, StoreError> {
        let url = format!(
            "{}?select=*&user_id=neq.{}",
            self.table_url(),
            urlencoding::encode(viewer_id)
        );

        let profiles: Vec<Profile> = self
            .fetch_rows(&url, "list candidates")
            .await?
            .into_iter()
            .filter(|p| p.user_id != viewer_id)
            .collect();

        tracing::debug!("Queried {} candidates for {}", profiles.len(), viewer_id);

        Ok(profiles)
    }

    /// Profiles for a set of user ids; unknown ids are skipped
    pub async fn get_profiles(&self, user_ids: &[String]) -> Result<Vec<Profile>, StoreError> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        let list = user_ids
            .iter()
            .map(|id| format!("\"{}\"", id.replace('"', "\\\"")))
            .collect::<Vec<_>>()
            .join(",");

        let url = format!(
            "{}?select=*&user_id=in.({})",
            self.table_url(),
            urlencoding::encode(&list)
        );

        self.fetch_rows(&url, "fetch profiles").await
    }

    /// Write the caller's profile and return the stored row
    pub async fn update_profile(
        &self,
        user_id: &str,
        update: &ProfileUpdate,
    ) -> Result<Profile, StoreError> {
        let url = format!(
            "{}?user_id=eq.{}",
            self.table_url(),
            urlencoding::encode(user_id)
        );

        let response = self
            .authorize(self.client.patch(&url))
            .header("Prefer", "return=representation")
            .json(update)
            .send()
            .await?;

        let rows = self.parse_rows(response, "update profile").await?;

        tracing::debug!("Updated profile for {}", user_id);

        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::NotFound(format!("Profile not found for user {}", user_id)))
    }

    /// Set the online flag and bump `last_seen`
    pub async fn set_presence(&self, user_id: &str, is_online: bool) -> Result<(), StoreError> {
        let url = format!(
            "{}?user_id=eq.{}",
            self.table_url(),
            urlencoding::encode(user_id)
        );

        let response = self
            .authorize(self.client.patch(&url))
            .header("Prefer", "return=minimal")
            .json(&PresenceUpdate {
                is_online,
                last_seen: Utc::now(),
            })
            .send()
            .await?;

        check_status(response.status(), "set presence")?;

        tracing::debug!("Presence for {} set to online={}", user_id, is_online);

        Ok(())
    }

    async fn fetch_rows(&self, url: &str, action: &str) -> Result<Vec<Profile>, StoreError> {
        let response = self.authorize(self.client.get(url)).send().await?;
        self.parse_rows(response, action).await
    }

    async fn parse_rows(
        &self,
        response: reqwest::Response,
        action: &str,
    ) -> Result<Vec<Profile>, StoreError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Failed to {}: {} - {}", action, status, body);
            return Err(status_error(status, action));
        }

        let json: Value = response.json().await?;

        let rows = json
            .as_array()
            .ok_or_else(|| StoreError::InvalidResponse("Expected an array of rows".into()))?;

        // Rows that no longer fit the profile shape are skipped rather than
        // failing the whole listing
        Ok(rows
            .iter()
            .filter_map(|row| match serde_json::from_value::<Profile>(row.clone()) {
                Ok(profile) => Some(profile),
                Err(e) => {
                    tracing::warn!("Skipping malformed profile row: {}", e);
                    None
                }
            })
            .collect())
    }
}

fn check_status(status: reqwest::StatusCode, action: &str) -> Result<(), StoreError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(status_error(status, action))
    }
}

fn status_error(status: reqwest::StatusCode, action: &str) -> StoreError {
    match status {
        reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => StoreError::Unauthorized,
        _ => StoreError::ApiError(format!("Failed to {}: {}", action, status)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Level, PlayStyle, UpdateProfileRequest};
    use mockito::Matcher;

    fn client(url: &str) -> ProfileStoreClient {
        ProfileStoreClient::new(
            url.to_string(),
            "test_key".to_string(),
            "profiles".to_string(),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    const ROWS: &str = r#"[
        {"user_id":"u2","username":"Nyx","games":["CS2"],"level":"expert","play_style":"tryhard","availability":["Week-end"]},
        {"user_id":"u3","username":"Kira","games":["FIFA"],"level":"débutant","play_style":"fun","availability":["En semaine"]}
    ]"#;

    #[test]
    fn test_store_client_creation() {
        let store = client("https://store.test/");
        assert_eq!(store.table_url(), "https://store.test/rest/v1/profiles");
        assert_eq!(store.api_key, "test_key");
    }

    #[tokio::test]
    async fn test_get_profile() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/rest/v1/profiles")
            .match_query(Matcher::UrlEncoded("user_id".into(), "eq.u2".into()))
            .match_header("apikey", "test_key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"user_id":"u2","username":"Nyx","level":"expert","play_style":"tryhard"}]"#)
            .create_async()
            .await;

        let profile = client(&server.url()).get_profile("u2").await.unwrap();

        assert_eq!(profile.username, "Nyx");
        assert_eq!(profile.level, Level::Expert);
        assert_eq!(profile.play_style, PlayStyle::Tryhard);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_profile_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/rest/v1/profiles")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let result = client(&server.url()).get_profile("ghost").await;

        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_candidates_excludes_viewer() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/rest/v1/profiles")
            .match_query(Matcher::UrlEncoded("user_id".into(), "neq.u1".into()))
            .with_status(200)
            .with_body(ROWS)
            .create_async()
            .await;

        let pool = client(&server.url()).list_candidates("u1").await.unwrap();

        let ids: Vec<&str> = pool.iter().map(|p| p.user_id.as_str()).collect();
        assert_eq!(ids, vec!["u2", "u3"]);
    }

    #[tokio::test]
    async fn test_malformed_rows_skipped() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/rest/v1/profiles")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"[{"username":"no id"},{"user_id":"u5"}]"#)
            .create_async()
            .await;

        let pool = client(&server.url()).list_candidates("u1").await.unwrap();

        assert_eq!(pool.len(), 1);
        assert_eq!(pool[0].user_id, "u5");
    }

    #[tokio::test]
    async fn test_api_errors() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/rest/v1/profiles")
            .match_query(Matcher::Any)
            .with_status(401)
            .create_async()
            .await;

        let result = client(&server.url()).list_candidates("u1").await;
        assert!(matches!(result, Err(StoreError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_update_profile_sends_patch() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PATCH", "/rest/v1/profiles")
            .match_query(Matcher::UrlEncoded("user_id".into(), "eq.u1".into()))
            .match_header("Prefer", "return=representation")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "username": "Nyx",
                "main_game": "Valorant",
                "play_style": "compétitif"
            })))
            .with_status(200)
            .with_body(r#"[{"user_id":"u1","username":"Nyx","games":["Valorant"],"play_style":"compétitif","availability":["Week-end"]}]"#)
            .create_async()
            .await;

        let update = ProfileUpdate::from(UpdateProfileRequest {
            username: " Nyx ".to_string(),
            games: vec!["Valorant".to_string()],
            play_style: PlayStyle::Competitive,
            availability: vec!["Week-end".to_string()],
            ..Default::default()
        });

        let saved = client(&server.url()).update_profile("u1", &update).await.unwrap();

        assert!(saved.is_complete());
        mock.assert_async().await;
    }

    #[test]
    fn test_blank_contacts_dropped() {
        let update = ProfileUpdate::from(UpdateProfileRequest {
            discord_tag: Some("   ".to_string()),
            phone_number: Some(" 0600000000 ".to_string()),
            ..Default::default()
        });

        assert_eq!(update.discord_tag, None);
        assert_eq!(update.phone_number.as_deref(), Some("0600000000"));
    }
}
