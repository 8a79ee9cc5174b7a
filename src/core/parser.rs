/// Day, period and class-cell text parsing
///
/// This module contains the text parsers that turn spreadsheet cell contents
/// into schedule indices: localized day labels to 0-based day numbers,
/// single or hyphenated period ranges to 0-based period lists, and the
/// first-column class cell into a class name plus optional room.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

lazy_static! {
    /// Localized day labels mapped to Monday-first indices.
    static ref DAY_LABELS: HashMap<&'static str, u8> = {
        let mut labels = HashMap::new();
        labels.insert("Thứ 2", 0);
        labels.insert("Thứ 3", 1);
        labels.insert("Thứ 4", 2);
        labels.insert("Thứ 5", 3);
        labels.insert("Thứ 6", 4);
        labels
    };

    /// Trailing room code in a single-line class cell ("Lớp Toán 10A1 A703").
    static ref ROOM_CODE_RE: Regex =
        Regex::new(r"^(.+?)\s*([A-Z]\d+)$").expect("room code regex is valid");
}

/// Prefix added to every physical-education class name.
const PHYS_ED_PREFIX: &str = "GDTC ";

/// Check whether a cell value is effectively blank.
///
/// Spreadsheet readers leave the float-NaN artifact "nan" in blank cells,
/// so it counts as empty alongside the empty string.
fn is_blank(text: &str) -> bool {
    text.is_empty() || text == "nan"
}

/// Parse a localized day label into a 0-based day index.
///
/// # Arguments
///
/// * `text` - Cell text such as "Thứ 2"
///
/// # Returns
///
/// `Some(0)` for "Thứ 2" through `Some(4)` for "Thứ 6"; `None` for blank
/// or unrecognized labels.
pub fn parse_day_label(text: &str) -> Option<u8> {
    let text = text.trim();
    if is_blank(text) {
        return None;
    }
    DAY_LABELS.get(text).copied()
}

/// Parse a period label into a list of 0-based period indices.
///
/// Accepts a single 1-based numeral ("7" -> [6]) or a hyphenated range
/// ("3-5" -> [2, 3, 4]). Single numerals parse float-tolerantly ("7.0"
/// -> [6]) because numeric spreadsheet cells round-trip that way.
///
/// # Returns
///
/// The 0-based periods, or an empty list for blank or malformed input.
/// Reversed ranges ("5-3") and values below period 1 also yield an empty
/// list.
pub fn parse_period_label(text: &str) -> Vec<u8> {
    let text = text.trim();
    if is_blank(text) {
        return Vec::new();
    }

    if let Some((start, end)) = text.split_once('-') {
        // A second hyphen ("1-2-3") is not a range
        if end.contains('-') {
            return Vec::new();
        }
        match (parse_period_number(start), parse_period_number(end)) {
            (Some(start), Some(end)) if start <= end => (start..=end).collect(),
            _ => Vec::new(),
        }
    } else {
        parse_period_number(text).map_or_else(Vec::new, |period| vec![period])
    }
}

/// Parse one 1-based period numeral into its 0-based index.
fn parse_period_number(text: &str) -> Option<u8> {
    let value = text.trim().parse::<f64>().ok()?;
    let zero_based = value as i64 - 1;
    u8::try_from(zero_based).ok()
}

/// Split the first spreadsheet column into class name and optional room.
///
/// Two or more lines in the cell mean "name\nroom". A single line is
/// checked for a trailing room code (A703, B505, ...); without one, the
/// whole line is the name and the room is unknown.
///
/// # Returns
///
/// `Some((name, room))`, or `None` when the cell is blank.
pub fn parse_class_cell(text: &str) -> Option<(String, Option<String>)> {
    let text = text.trim();
    if is_blank(text) {
        return None;
    }

    let mut lines = text.lines();
    let first = lines.next()?.trim();
    if let Some(second) = lines.next() {
        let room = second.trim();
        let room = (!room.is_empty()).then(|| room.to_string());
        return Some((first.to_string(), room));
    }

    if let Some(caps) = ROOM_CODE_RE.captures(first) {
        let name = caps[1].trim().to_string();
        let room = caps[2].trim().to_string();
        Some((name, Some(room)))
    } else {
        Some((first.to_string(), None))
    }
}

/// Extract the class name alone from the first spreadsheet column.
///
/// Physical-education sheets put only the name in the cell, so the first
/// line is taken verbatim without room-code stripping.
pub fn parse_class_name(text: &str) -> Option<String> {
    let text = text.trim();
    if is_blank(text) {
        return None;
    }
    let first = text.lines().next()?.trim();
    (!first.is_empty()).then(|| first.to_string())
}

/// Normalize a physical-education class name.
///
/// Strips a leading "GDTC " so the prefix is not doubled, keeps the first
/// token (the class number) verbatim, re-cases fully-uppercase later tokens
/// to capitalized form while leaving any "-LN" tail untouched, then adds
/// the "GDTC " prefix back.
pub fn normalize_phys_ed_name(name: &str) -> String {
    let name = name.trim();
    let name = name.strip_prefix(PHYS_ED_PREFIX).unwrap_or(name);

    let parts: Vec<&str> = name.split_whitespace().collect();
    let formatted = if parts.len() >= 2 {
        let mut formatted_parts = Vec::with_capacity(parts.len());
        formatted_parts.push(parts[0].to_string());
        for part in &parts[1..] {
            formatted_parts.push(normalize_name_token(part));
        }
        formatted_parts.join(" ")
    } else {
        name.to_string()
    };

    format!("{}{}", PHYS_ED_PREFIX, formatted)
}

/// Re-case one name token, preserving a single "-LN" group marker.
fn normalize_name_token(token: &str) -> String {
    if token.contains("-LN") {
        let ln_parts: Vec<&str> = token.split("-LN").collect();
        if ln_parts.len() == 2 {
            format!("{}-LN{}", capitalize_if_upper(ln_parts[0]), ln_parts[1])
        } else {
            token.to_string()
        }
    } else {
        capitalize_if_upper(token)
    }
}

/// Lowercase a fully-uppercase token to capitalized form ("BÓNG" -> "Bóng").
/// Single characters and mixed-case tokens pass through unchanged.
fn capitalize_if_upper(text: &str) -> String {
    let is_upper = text == text.to_uppercase() && text.chars().count() > 1;
    if !is_upper {
        return text.to_string();
    }

    let mut chars = text.chars();
    match chars.next() {
        Some(first) => {
            first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
        }
        None => String::new(),
    }
}
