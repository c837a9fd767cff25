use serde::{Deserialize, Serialize};

use crate::core::types::Rarity;

/// A single entry from the sticker catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sticker {
    /// Full market label, e.g. `Sticker | Senzu (Gold) | Shanghai 2024`
    pub full_name: String,

    /// Name portion of the label with the rarity tag removed
    pub extracted_name: String,

    /// Lower-cased `extracted_name`, used for prefix matching
    pub match_key: String,

    /// Finish tag from the label
    #[serde(default)]
    pub rarity: Rarity,

    /// Tournament or collection the sticker belongs to
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tournament: String,
}

impl Sticker {
    pub fn new(full_name: impl Into<String>, extracted_name: impl Into<String>) -> Self {
        let extracted_name = extracted_name.into();
        let match_key = extracted_name.to_lowercase();
        Self {
            full_name: full_name.into(),
            extracted_name,
            match_key,
            rarity: Rarity::default(),
            tournament: String::new(),
        }
    }

    #[must_use]
    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    #[must_use]
    pub fn with_tournament(mut self, tournament: impl Into<String>) -> Self {
        self.tournament = tournament.into();
        self
    }

    /// The label handed to price resolvers
    pub fn label(&self) -> &str {
        &self.full_name
    }
}

impl std::fmt::Display for Sticker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.full_name)
    }
}
