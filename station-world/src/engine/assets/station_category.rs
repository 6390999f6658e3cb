use serde::{Deserialize, Serialize};

/// Every kind of station a world can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StationCategory {
    Cabin,
    Fire,
    Herb,
    LogPile,
    Garden,
    Cart,
    Fishing,
    Memorial,
}

impl StationCategory {
    pub const ALL: [StationCategory; 8] = [
        Self::Cabin,
        Self::Fire,
        Self::Herb,
        Self::LogPile,
        Self::Garden,
        Self::Cart,
        Self::Fishing,
        Self::Memorial,
    ];

    /// Convert string identifier to category, case-insensitively.
    pub fn from_string(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cabin" => Some(Self::Cabin),
            "fire" => Some(Self::Fire),
            "herb" => Some(Self::Herb),
            "logpile" => Some(Self::LogPile),
            "garden" => Some(Self::Garden),
            "cart" => Some(Self::Cart),
            "fishing" => Some(Self::Fishing),
            "memorial" => Some(Self::Memorial),
            _ => None,
        }
    }

    /// Name used in progress keys and frontend messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cabin => "cabin",
            Self::Fire => "fire",
            Self::Herb => "herb",
            Self::LogPile => "logpile",
            Self::Garden => "garden",
            Self::Cart => "cart",
            Self::Fishing => "fishing",
            Self::Memorial => "memorial",
        }
    }
}

impl std::fmt::Display for StationCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::StationCategory;

    #[test]
    fn names_round_trip_through_from_string() {
        for category in StationCategory::ALL {
            assert_eq!(StationCategory::from_string(category.as_str()), Some(category));
        }
    }

    #[test]
    fn parsing_ignores_case_and_rejects_unknown_kinds() {
        assert_eq!(StationCategory::from_string("LogPile"), Some(StationCategory::LogPile));
        assert_eq!(StationCategory::from_string("canoe"), None);
    }

    #[test]
    fn serde_names_match_persistence_names() {
        let json = serde_json::to_string(&StationCategory::LogPile).unwrap();
        assert_eq!(json, "\"logpile\"");
    }
}
