use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use crate::core::sticker::Sticker;
use crate::parsing::label::parse_label;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Catalog contains no stickers")]
    Empty,
}

/// Catalog version for compatibility checking
pub const CATALOG_VERSION: &str = "1.0.0";

/// Serializable catalog format written by `to_json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogData {
    pub version: String,
    pub created_at: String,
    pub stickers: Vec<String>,
}

/// Accepted catalog files: a bare array of labels or the exported format
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    Labels(Vec<String>),
    Versioned(CatalogData),
}

/// The sticker catalog with a first-character index for prefix probes
#[derive(Debug)]
pub struct StickerCatalog {
    /// All stickers, in load order
    pub stickers: Vec<Sticker>,

    /// Index: full label -> index in stickers vec
    label_to_index: HashMap<String, usize>,

    /// Index: first char of match key -> indices, in catalog order
    pub first_char_to_stickers: HashMap<char, Vec<usize>>,
}

impl StickerCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            stickers: Vec::new(),
            label_to_index: HashMap::new(),
            first_char_to_stickers: HashMap::new(),
        }
    }

    /// Load the embedded default catalog
    pub fn load_embedded() -> Result<Self, CatalogError> {
        // Validated at compile time by build.rs
        const EMBEDDED_CATALOG: &str = include_str!("../../catalogs/stickers.json");
        Self::from_json(EMBEDDED_CATALOG)
    }

    /// Load catalog from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse catalog from JSON string
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let labels = match serde_json::from_str::<CatalogFile>(json)? {
            CatalogFile::Labels(labels) => labels,
            CatalogFile::Versioned(data) => {
                // Version check (warn but don't fail)
                if data.version != CATALOG_VERSION {
                    tracing::warn!(
                        "Catalog version mismatch (expected {}, found {})",
                        CATALOG_VERSION,
                        data.version
                    );
                }
                data.stickers
            }
        };

        let catalog = Self::from_labels(labels);
        if catalog.is_empty() {
            return Err(CatalogError::Empty);
        }

        tracing::info!("Loaded {} stickers into catalog", catalog.len());
        Ok(catalog)
    }

    /// Build a catalog from raw labels, skipping blank lines
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut catalog = Self::new();
        for label in labels {
            let label = label.as_ref();
            if label.trim().is_empty() {
                continue;
            }
            catalog.add_sticker(parse_label(label));
        }
        catalog
    }

    /// Add a sticker to the catalog
    pub fn add_sticker(&mut self, sticker: Sticker) {
        let index = self.stickers.len();

        // Index by label; the first occurrence wins lookups
        self.label_to_index
            .entry(sticker.full_name.clone())
            .or_insert(index);

        // Index by first character of the match key
        if let Some(first) = sticker.match_key.chars().next() {
            self.first_char_to_stickers
                .entry(first)
                .or_default()
                .push(index);
        }

        self.stickers.push(sticker);
    }

    /// Get a sticker by its full label
    pub fn get(&self, label: &str) -> Option<&Sticker> {
        self.label_to_index
            .get(label)
            .map(|&idx| &self.stickers[idx])
    }

    /// Stickers whose match key starts with `letter` (case-insensitive)
    pub fn find_by_letter(&self, letter: char) -> Vec<&Sticker> {
        letter
            .to_lowercase()
            .next()
            .and_then(|first| self.first_char_to_stickers.get(&first))
            .map(|indices| indices.iter().map(|&idx| &self.stickers[idx]).collect())
            .unwrap_or_default()
    }

    /// Export catalog to JSON
    pub fn to_json(&self) -> Result<String, CatalogError> {
        let data = CatalogData {
            version: CATALOG_VERSION.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            stickers: self.stickers.iter().map(|s| s.full_name.clone()).collect(),
        };
        Ok(serde_json::to_string_pretty(&data)?)
    }

    /// Number of stickers in catalog
    pub fn len(&self) -> usize {
        self.stickers.len()
    }

    /// Check if catalog is empty
    pub fn is_empty(&self) -> bool {
        self.stickers.is_empty()
    }
}

impl Default for StickerCatalog {
    fn default() -> Self {
        Self::new()
    }
}
