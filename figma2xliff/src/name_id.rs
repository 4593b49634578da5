//! Derivation of translation-unit identifiers from hierarchical variable names.
//!
//! `"Category/Section Title/Field Name"` becomes `"sectionTitle_fieldName"`:
//! the first path segment is dropped, every other segment runs through
//! [`SEGMENT_STAGES`] in order, and the results are joined with `_`.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

/// Marker that flags a variable as the plural variant of another one.
pub const PLURAL_MARKER: &str = "(plural)";

lazy_static! {
    static ref TRAILING_PLURAL_MARKER: Regex = Regex::new(r"\s*\(plural\)\s*$").unwrap();
    static ref PUNCTUATION: Regex = Regex::new(r"[^0-9A-Za-z_\s]").unwrap();
    static ref SPACE_BEFORE_LETTER: Regex = Regex::new(r"\s+([a-z])").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// One pure text transform applied to a single name segment.
pub type Stage = fn(&str) -> String;

/// The per-segment pipeline, in application order.
pub const SEGMENT_STAGES: [(&str, Stage); 6] = [
    ("trim", trim),
    ("lowercase", lowercase),
    ("strip_punctuation", strip_punctuation),
    ("camel_case", camel_case),
    ("remove_whitespace", remove_whitespace),
    ("lowercase_first", lowercase_first),
];

pub fn trim(segment: &str) -> String {
    segment.trim().to_string()
}

pub fn lowercase(segment: &str) -> String {
    segment.to_lowercase()
}

/// Keeps ASCII word characters and whitespace only.
pub fn strip_punctuation(segment: &str) -> String {
    PUNCTUATION.replace_all(segment, "").into_owned()
}

/// Folds each whitespace run followed by a lower-case letter into that letter,
/// upper-cased.
pub fn camel_case(segment: &str) -> String {
    SPACE_BEFORE_LETTER
        .replace_all(segment, |caps: &Captures<'_>| caps[1].to_ascii_uppercase())
        .into_owned()
}

pub fn remove_whitespace(segment: &str) -> String {
    WHITESPACE.replace_all(segment, "").into_owned()
}

pub fn lowercase_first(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Runs one segment through every stage.
pub fn format_segment(segment: &str) -> String {
    SEGMENT_STAGES
        .iter()
        .fold(segment.to_string(), |acc, (_, stage)| stage(&acc))
}

/// Derives the unit identifier for a variable name.
///
/// A name with no `/` has nothing left after dropping the category and yields
/// an empty identifier.
pub fn format_name_id(name: &str) -> String {
    name.split('/')
        .skip(1)
        .map(format_segment)
        .collect::<Vec<_>>()
        .join("_")
}

pub fn is_plural_name(name: &str) -> bool {
    name.contains(PLURAL_MARKER)
}

/// Removes a trailing plural marker (and the whitespace around it).
///
/// A marker anywhere else in the name is left in place.
pub fn strip_plural_marker(name: &str) -> &str {
    match TRAILING_PLURAL_MARKER.find(name) {
        Some(m) => name[..m.start()].trim(),
        None => name.trim(),
    }
}
