//! Identifier derivation for generated Dart code.
//!
//! All class and field names funnel through here, so JSON keys in
//! snake_case / kebab-case / camelCase / space-separated form all come
//! out as the same Dart identifiers.

use once_cell::sync::Lazy;
use regex::Regex;

/// Fallback identifier for keys that normalize to nothing (empty or
/// punctuation-only keys).
pub const UNNAMED: &str = "Unnamed";

static CAMEL_BOUNDARY: Lazy<Regex> = Lazy::new(|| Regex::new(r"([a-z0-9])([A-Z])").unwrap());

/// lower_snake form of a key: camel boundaries become underscores, every
/// non-alphanumeric run collapses to a single underscore.
pub fn to_underscore(input: &str) -> String {
    let spaced = CAMEL_BOUNDARY.replace_all(input, "${1}_${2}");
    let mut out = String::with_capacity(spaced.len());
    let mut at_separator = true; // no leading underscore
    for ch in spaced.chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
            at_separator = false;
        } else if !at_separator {
            out.push('_');
            at_separator = true;
        }
    }
    while out.ends_with('_') {
        out.pop();
    }
    out
}

/// UpperCamel over the underscore segments of `input`.
pub fn to_camel_case(input: &str) -> String {
    to_underscore(input)
        .split('_')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// Class name for the shape found under `key`. Already-camel keys pass
/// through unchanged (`UserProfile` stays `UserProfile`); an empty key
/// falls back to [`UNNAMED`].
pub fn class_name(key: &str) -> String {
    let name = to_camel_case(key);
    if name.is_empty() { UNNAMED.to_string() } else { name }
}

/// Dart field identifier for `key`: [`class_name`] with the first letter
/// lowered.
pub fn field_name(key: &str) -> String {
    let camel = class_name(key);
    let mut chars = camel.chars();
    match chars.next() {
        Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}
