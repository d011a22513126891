use crate::core::{catalog, FilterSelection};
use crate::models::{Level, MatchMode, PlayStyle};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Request to rank the player pool for the caller
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct RankPlayersRequest {
    #[serde(default)]
    pub mode: MatchMode,
    #[serde(default)]
    pub filters: FilterSelection,
    #[validate(range(min = 1, max = 100))]
    #[serde(default)]
    pub limit: Option<u16>,
}

/// Request to send a match to another player
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendMatchRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "target_user_id", rename = "targetUserId")]
    pub target_user_id: String,
    #[serde(default)]
    pub mode: MatchMode,
}

/// Request to flip the caller's online flag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresenceRequest {
    #[serde(alias = "is_online", rename = "isOnline")]
    pub is_online: bool,
}

/// Full profile written by the setup flow
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 2, max = 20))]
    pub username: String,
    #[validate(custom(function = "validate_avatar"))]
    #[serde(alias = "avatar_emoji", rename = "avatarEmoji", default = "default_avatar")]
    pub avatar_emoji: String,
    #[validate(length(max = 300))]
    #[serde(default)]
    pub bio: String,
    #[serde(alias = "main_game", rename = "mainGame", default)]
    pub main_game: String,
    #[validate(length(min = 1), custom(function = "validate_games"))]
    #[serde(default)]
    pub games: Vec<String>,
    #[validate(custom(function = "validate_level"))]
    #[serde(default)]
    pub level: Level,
    #[validate(custom(function = "validate_style"))]
    #[serde(alias = "play_style", rename = "playStyle", default)]
    pub play_style: PlayStyle,
    #[validate(length(min = 1), custom(function = "validate_slots"))]
    #[serde(default)]
    pub availability: Vec<String>,
    #[validate(length(max = 64))]
    #[serde(alias = "discord_tag", rename = "discordTag", default)]
    pub discord_tag: Option<String>,
    #[validate(length(max = 64))]
    #[serde(alias = "game_username", rename = "gameUsername", default)]
    pub game_username: Option<String>,
    #[validate(length(max = 32))]
    #[serde(alias = "phone_number", rename = "phoneNumber", default)]
    pub phone_number: Option<String>,
    #[validate(length(max = 200))]
    #[serde(alias = "steam_epic_link", rename = "steamEpicLink", default)]
    pub steam_epic_link: Option<String>,
}

fn default_avatar() -> String {
    crate::models::domain::DEFAULT_AVATAR.to_string()
}

fn validate_avatar(glyph: &str) -> Result<(), ValidationError> {
    if catalog::is_known_avatar(glyph) {
        Ok(())
    } else {
        Err(ValidationError::new("unknown_avatar"))
    }
}

fn validate_games(games: &[String]) -> Result<(), ValidationError> {
    if games.iter().all(|g| catalog::is_known_game(g)) {
        Ok(())
    } else {
        Err(ValidationError::new("unknown_game"))
    }
}

fn validate_slots(slots: &[String]) -> Result<(), ValidationError> {
    if slots.iter().all(|s| catalog::is_known_slot(s)) {
        Ok(())
    } else {
        Err(ValidationError::new("unknown_availability"))
    }
}

fn validate_level(level: &Level) -> Result<(), ValidationError> {
    if level.is_known() {
        Ok(())
    } else {
        Err(ValidationError::new("unknown_level"))
    }
}

fn validate_style(style: &PlayStyle) -> Result<(), ValidationError> {
    if style.is_known() {
        Ok(())
    } else {
        Err(ValidationError::new("unknown_play_style"))
    }
}
