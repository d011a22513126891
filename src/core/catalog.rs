use serde::Serialize;

/// Game titles a profile can list.
pub const GAMES: &[&str] = &[
    "League of Legends",
    "Valorant",
    "Fortnite",
    "Apex Legends",
    "CS2",
    "Rocket League",
    "Overwatch 2",
    "Call of Duty",
    "Minecraft",
    "Genshin Impact",
    "FIFA",
    "It Takes Two",
];

/// Skill levels, lowest first.
pub const LEVELS: &[&str] = &["débutant", "intermédiaire", "avancé", "expert"];

pub const STYLES: &[&str] = &["compétitif", "chill", "tryhard", "fun"];

/// Availability slots: four day-parts, then weekend and weekdays.
pub const AVAILABILITIES: &[&str] = &[
    "Matin (8h-12h)",
    "Après-midi (12h-18h)",
    "Soirée (18h-23h)",
    "Nuit (23h-5h)",
    "Week-end",
    "En semaine",
];

pub const AVATARS: &[&str] = &[
    "🎮", "⚔️", "🐺", "🔥", "✨", "🌙", "🎯", "💎", "🦊", "🐉", "👾", "🤖",
];

pub fn is_known_game(title: &str) -> bool {
    GAMES.contains(&title)
}

pub fn is_known_slot(slot: &str) -> bool {
    AVAILABILITIES.contains(&slot)
}

pub fn is_known_avatar(glyph: &str) -> bool {
    AVATARS.contains(&glyph)
}

/// All catalogs in one payload, served to clients building the setup form
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    pub games: &'static [&'static str],
    pub levels: &'static [&'static str],
    pub styles: &'static [&'static str],
    pub availabilities: &'static [&'static str],
    pub avatars: &'static [&'static str],
}

impl Catalog {
    pub fn current() -> Self {
        Self {
            games: GAMES,
            levels: LEVELS,
            styles: STYLES,
            availabilities: AVAILABILITIES,
            avatars: AVATARS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Level, PlayStyle};

    #[test]
    fn test_level_catalog_matches_enum_order() {
        let ordinals: Vec<u8> = LEVELS.iter().map(|l| Level::from(*l).ordinal()).collect();
        assert_eq!(ordinals, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_style_catalog_is_recognised() {
        assert!(STYLES.iter().all(|s| PlayStyle::from(*s).is_known()));
    }

    #[test]
    fn test_catalog_sizes() {
        assert_eq!(GAMES.len(), 12);
        assert_eq!(AVAILABILITIES.len(), 6);
        assert!(is_known_game("CS2"));
        assert!(!is_known_game("cs2"));
        assert!(is_known_slot("Week-end"));
        assert!(is_known_avatar("🐉"));
    }
}
