//! Price text extraction.

use std::sync::OnceLock;

use regex::Regex;

fn currency_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"([€$£¥₹])\s*([0-9]{1,3}(?:[,\s][0-9]{3})+|[0-9]+)(?:[.,]([0-9]{1,2}))?")
            .unwrap_or_else(|e| panic!("invalid currency pattern: {e}"))
    })
}

fn number_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"([0-9]+)(?:[.,]([0-9]{1,2}))?")
            .unwrap_or_else(|e| panic!("invalid number pattern: {e}"))
    })
}

/// Rough conversion factor to USD for a currency symbol
fn usd_rate(symbol: &str) -> f64 {
    match symbol {
        "€" => 1.1,
        "£" => 1.25,
        "₹" => 0.012,
        _ => 1.0,
    }
}

fn parse_amount(whole: &str, fraction: Option<&str>) -> Option<f64> {
    let whole: String = whole.chars().filter(char::is_ascii_digit).collect();
    let text = match fraction {
        Some(fraction) => format!("{whole}.{fraction}"),
        None => whole,
    };
    text.parse::<f64>().ok()
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Extract a USD price from market price text such as `Starting at: $1.23`.
///
/// A price with a currency symbol is preferred; otherwise the first bare number
/// is used. Returns `None` when nothing parses or the price is not positive.
///
/// # Examples
///
/// ```
/// use sticker_solver::pricing::extract::extract_price;
///
/// assert_eq!(extract_price("Starting at: $1,234.50"), Some(1234.5));
/// assert_eq!(extract_price("€2,00"), Some(2.2));
/// assert_eq!(extract_price("sold out"), None);
/// ```
#[must_use]
pub fn extract_price(text: &str) -> Option<f64> {
    let text = text
        .replace("Starting at:", "")
        .replace("Buy now for", "")
        .replace("Lowest price:", "");
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let price = if let Some(caps) = currency_pattern().captures(text) {
        let symbol = caps.get(1).map_or("$", |m| m.as_str());
        let amount = parse_amount(
            caps.get(2).map_or("", |m| m.as_str()),
            caps.get(3).map(|m| m.as_str()),
        )?;
        amount * usd_rate(symbol)
    } else {
        let caps = number_pattern().captures(text)?;
        parse_amount(
            caps.get(1).map_or("", |m| m.as_str()),
            caps.get(2).map(|m| m.as_str()),
        )?
    };

    let price = round_cents(price);
    (price > 0.0).then_some(price)
}
