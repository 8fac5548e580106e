//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

use std::sync::OnceLock;

use chrono::NaiveDateTime;
use regex::Regex;

/// Marker a user sends to leave a conversation field blank
pub const BLANK_MARKER: &str = "-";

/// Date-time formats accepted for event dates, most specific first
const EVENT_DATE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"];

const WALLET_ADDRESS_PATTERN: &str = r"^0x[0-9a-fA-F]{40}$";

static WALLET_ADDRESS_REGEX: OnceLock<Option<Regex>> = OnceLock::new();

/// Normalize a conversation answer: trimmed, with the blank marker mapped to ""
pub fn normalize_answer(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed == BLANK_MARKER {
        String::new()
    } else {
        normalize_whitespace(trimmed)
    }
}

/// Parse an event date in the `YYYY-MM-DDTHH:MM` form (a few close variants accepted)
pub fn parse_event_date(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    EVENT_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
}

/// Format an optional event date for display
pub fn format_event_date(date: Option<NaiveDateTime>) -> String {
    match date {
        Some(date) => date.format("%Y-%m-%d %H:%M").to_string(),
        None => "TBD".to_string(),
    }
}

/// Check a VeChain account address (`0x` followed by 40 hex digits)
pub fn is_valid_wallet_address(address: &str) -> bool {
    WALLET_ADDRESS_REGEX
        .get_or_init(|| Regex::new(WALLET_ADDRESS_PATTERN).ok())
        .as_ref()
        .is_some_and(|regex| regex.is_match(address))
}

/// Shorten a wallet address for compact display (`0x1234…abcd`)
pub fn short_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 12 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}…{}", head, tail)
}

/// Truncate text to a maximum number of characters with ellipsis
pub fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_length.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Normalize whitespace in text
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Show a blank field as a dash
pub fn display_or_dash(text: &str) -> &str {
    if text.trim().is_empty() {
        BLANK_MARKER
    } else {
        text
    }
}
