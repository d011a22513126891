use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Skill level, ordered from `Beginner` to `Expert`.
///
/// Labels outside the catalog are kept verbatim in `Other` so a profile
/// round-trips through the store unchanged; they score as `Intermediate`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
    Other(String),
}

impl Level {
    pub fn label(&self) -> &str {
        match self {
            Level::Beginner => "débutant",
            Level::Intermediate => "intermédiaire",
            Level::Advanced => "avancé",
            Level::Expert => "expert",
            Level::Other(label) => label,
        }
    }

    /// Position on the beginner..expert scale; unknown labels sit at 1.
    pub fn ordinal(&self) -> u8 {
        match self {
            Level::Beginner => 0,
            Level::Intermediate | Level::Other(_) => 1,
            Level::Advanced => 2,
            Level::Expert => 3,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Level::Other(_))
    }
}

impl Default for Level {
    fn default() -> Self {
        Level::Intermediate
    }
}

/// Catalog labels match exactly; "Expert" is not "expert".
impl From<&str> for Level {
    fn from(value: &str) -> Self {
        match value {
            "débutant" => Level::Beginner,
            "intermédiaire" => Level::Intermediate,
            "avancé" => Level::Advanced,
            "expert" => Level::Expert,
            other => Level::Other(other.to_string()),
        }
    }
}

impl From<Option<String>> for Level {
    fn from(value: Option<String>) -> Self {
        value.map(|v| Level::from(v.as_str())).unwrap_or_default()
    }
}

impl From<Level> for String {
    fn from(value: Level) -> Self {
        match value {
            Level::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

/// Play style. No ordering; see [`PlayStyle::is_adjacent`] for the pairs
/// that partially agree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum PlayStyle {
    Competitive,
    Chill,
    Tryhard,
    Fun,
    Other(String),
}

impl PlayStyle {
    pub fn label(&self) -> &str {
        match self {
            PlayStyle::Competitive => "compétitif",
            PlayStyle::Chill => "chill",
            PlayStyle::Tryhard => "tryhard",
            PlayStyle::Fun => "fun",
            PlayStyle::Other(label) => label,
        }
    }

    /// competitive/tryhard and chill/fun are adjacent, in either direction.
    pub fn is_adjacent(&self, other: &PlayStyle) -> bool {
        matches!(
            (self, other),
            (PlayStyle::Competitive, PlayStyle::Tryhard)
                | (PlayStyle::Tryhard, PlayStyle::Competitive)
                | (PlayStyle::Chill, PlayStyle::Fun)
                | (PlayStyle::Fun, PlayStyle::Chill)
        )
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, PlayStyle::Other(_))
    }
}

/// An unset style is an empty `Other`, which is what a profile looks like
/// before the setup flow has reached the style step.
impl Default for PlayStyle {
    fn default() -> Self {
        PlayStyle::Other(String::new())
    }
}

impl From<&str> for PlayStyle {
    fn from(value: &str) -> Self {
        match value {
            "compétitif" => PlayStyle::Competitive,
            "chill" => PlayStyle::Chill,
            "tryhard" => PlayStyle::Tryhard,
            "fun" => PlayStyle::Fun,
            other => PlayStyle::Other(other.to_string()),
        }
    }
}

impl From<Option<String>> for PlayStyle {
    fn from(value: Option<String>) -> Self {
        value.map(|v| PlayStyle::from(v.as_str())).unwrap_or_default()
    }
}

impl From<PlayStyle> for String {
    fn from(value: PlayStyle) -> Self {
        match value {
            PlayStyle::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

/// Coarse restriction applied to the pool before category filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MatchMode {
    #[default]
    #[serde(rename = "normal", alias = "all")]
    All,
    #[serde(rename = "compétitif", alias = "competitive")]
    Competitive,
    #[serde(rename = "chill")]
    Chill,
}

impl MatchMode {
    pub fn label(&self) -> &'static str {
        match self {
            MatchMode::All => "normal",
            MatchMode::Competitive => "compétitif",
            MatchMode::Chill => "chill",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "normal" | "all" => Some(MatchMode::All),
            "compétitif" | "competitive" => Some(MatchMode::Competitive),
            "chill" => Some(MatchMode::Chill),
            _ => None,
        }
    }

    /// Whether a candidate with `style` survives this mode.
    pub fn admits(&self, style: &PlayStyle) -> bool {
        match self {
            MatchMode::All => true,
            MatchMode::Competitive => {
                matches!(style, PlayStyle::Competitive | PlayStyle::Tryhard)
            }
            MatchMode::Chill => matches!(style, PlayStyle::Chill | PlayStyle::Fun),
        }
    }
}

/// Contact details, unlocked once two players have matched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discord_tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steam_epic_link: Option<String>,
}

impl ContactInfo {
    pub fn is_empty(&self) -> bool {
        self.discord_tag.is_none()
            && self.game_username.is_none()
            && self.phone_number.is_none()
            && self.steam_epic_link.is_none()
    }
}

/// A player's matchmaking profile, as stored in the `profiles` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(default = "default_avatar", deserialize_with = "null_as_avatar")]
    pub avatar_emoji: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bio: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub main_game: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub games: Vec<String>,
    #[serde(default)]
    pub level: Level,
    #[serde(default)]
    pub play_style: PlayStyle,
    #[serde(default, deserialize_with = "null_as_default")]
    pub availability: Vec<String>,
    #[serde(flatten)]
    pub contact: ContactInfo,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_online: bool,
    #[serde(default)]
    pub last_seen: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Profile {
    /// A profile with no games or no availability is sent back to setup
    /// instead of being matched.
    pub fn is_complete(&self) -> bool {
        !self.games.is_empty() && !self.availability.is_empty()
    }

    /// Copy of the profile with contact details removed, for listings shown
    /// to players who have not matched yet.
    pub fn without_contact(&self) -> Profile {
        Profile {
            contact: ContactInfo::default(),
            ..self.clone()
        }
    }
}

pub const DEFAULT_AVATAR: &str = "🎮";

fn default_avatar() -> String {
    DEFAULT_AVATAR.to_string()
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_avatar<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .filter(|s| !s.is_empty())
        .unwrap_or_else(default_avatar))
}

/// Status of a match record. Matches are accepted on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    #[default]
    Accepted,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Accepted => "accepted",
        }
    }
}

/// A match between two players, created by the requester.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: Uuid,
    pub requester_id: String,
    pub matched_id: String,
    pub compatibility_score: u8,
    pub match_mode: MatchMode,
    pub status: MatchStatus,
    pub created_at: DateTime<Utc>,
}

impl MatchRecord {
    /// The participant that is not `user_id`.
    pub fn other_party(&self, user_id: &str) -> &str {
        if self.requester_id == user_id {
            &self.matched_id
        } else {
            &self.requester_id
        }
    }
}

/// Insert payload for a match record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMatch {
    pub requester_id: String,
    pub matched_id: String,
    pub compatibility_score: u8,
    pub match_mode: MatchMode,
}

impl NewMatch {
    pub fn is_self_match(&self) -> bool {
        self.requester_id == self.matched_id
    }
}

/// A surviving candidate and its compatibility with the viewer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCandidate {
    pub profile: Profile,
    pub score: u8,
    #[serde(rename = "sharedGames")]
    pub shared_games: Vec<String>,
}

/// Point table for the compatibility score.
///
/// The defaults are the production table: 15 points per shared game capped
/// at 40, level steps 20/14/6/0, style 20/14/4, 7 points per shared slot
/// capped at 20.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringRules {
    pub game_points: u32,
    pub game_cap: u32,
    /// Points by absolute level difference 0, 1, 2 and 3+.
    pub level_points: [u32; 4],
    pub style_exact: u32,
    pub style_adjacent: u32,
    pub style_floor: u32,
    pub slot_points: u32,
    pub slot_cap: u32,
}

impl ScoringRules {
    pub fn level_cap(&self) -> u32 {
        self.level_points.iter().copied().max().unwrap_or(0)
    }

    pub fn style_cap(&self) -> u32 {
        self.style_exact
            .max(self.style_adjacent)
            .max(self.style_floor)
    }

    /// Sum of the four caps; the raw score is normalised against this.
    pub fn max_possible(&self) -> u32 {
        self.game_cap
            .saturating_add(self.level_cap())
            .saturating_add(self.style_cap())
            .saturating_add(self.slot_cap)
    }
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            game_points: 15,
            game_cap: 40,
            level_points: [20, 14, 6, 0],
            style_exact: 20,
            style_adjacent: 14,
            style_floor: 4,
            slot_points: 7,
            slot_cap: 20,
        }
    }
}
