use serde::{Deserialize, Serialize};

/// Finish tag carried in a sticker label, e.g. `(Holo)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    /// No tag present
    #[default]
    Paper,
    Holo,
    Glitter,
    Gold,
    Foil,
    Lenticular,
}

impl Rarity {
    /// Parse a rarity tag (case-insensitive). Returns `None` for unrecognised tags.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "holo" => Some(Self::Holo),
            "glitter" => Some(Self::Glitter),
            "gold" => Some(Self::Gold),
            "foil" => Some(Self::Foil),
            "lenticular" => Some(Self::Lenticular),
            _ => None,
        }
    }
}

impl std::fmt::Display for Rarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Paper => write!(f, "Paper"),
            Self::Holo => write!(f, "Holo"),
            Self::Glitter => write!(f, "Glitter"),
            Self::Gold => write!(f, "Gold"),
            Self::Foil => write!(f, "Foil"),
            Self::Lenticular => write!(f, "Lenticular"),
        }
    }
}

/// Requested ordering of combinations by total price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Cheapest first
    #[default]
    Asc,
    /// Most expensive first
    Desc,
    /// Keep search order
    None,
}

impl SortOrder {
    /// Parse a sort order from request text.
    ///
    /// Matching is case-insensitive. Anything other than `desc` or `none`
    /// falls back to ascending, which is the request default.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "desc" => Self::Desc,
            "none" => Self::None,
            _ => Self::Asc,
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Asc => write!(f, "asc"),
            Self::Desc => write!(f, "desc"),
            Self::None => write!(f, "none"),
        }
    }
}
