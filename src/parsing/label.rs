use std::sync::OnceLock;

use regex::Regex;

use crate::core::sticker::Sticker;
use crate::core::types::Rarity;

fn label_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^Sticker\s*\|\s*([^|]+?)\s*(?:\(([^)]*)\))?\s*\|\s*(.+)$")
            .unwrap_or_else(|e| panic!("invalid label pattern: {e}"))
    })
}

/// Parse a market label into a [`Sticker`].
///
/// Labels look like `Sticker | Senzu (Gold) | Shanghai 2024`. The parenthesised
/// tag is removed from the name and kept as the rarity when it is a known finish.
/// Labels that do not follow the pattern are used as-is for the name.
///
/// # Examples
///
/// ```
/// use sticker_solver::parsing::label::parse_label;
///
/// let sticker = parse_label("Sticker | Senzu (Gold) | Shanghai 2024");
/// assert_eq!(sticker.extracted_name, "Senzu");
/// assert_eq!(sticker.match_key, "senzu");
/// assert_eq!(sticker.tournament, "Shanghai 2024");
/// ```
#[must_use]
pub fn parse_label(full_name: &str) -> Sticker {
    let full_name = full_name.trim();

    let Some(caps) = label_pattern().captures(full_name) else {
        tracing::debug!("Label did not match sticker pattern, using as-is: {full_name}");
        return Sticker::new(full_name, full_name);
    };

    let name = caps.get(1).map_or("", |m| m.as_str().trim());
    let rarity = caps
        .get(2)
        .and_then(|m| Rarity::parse(m.as_str()))
        .unwrap_or_default();
    let tournament = caps.get(3).map_or("", |m| m.as_str().trim());

    Sticker::new(full_name, name)
        .with_rarity(rarity)
        .with_tournament(tournament)
}
