//! Localization-text resolution
//!
//! Many journal fields come in pairs: a canonical identifier
//! (`"$USS_Type_Salvage;"`, `"HighMetalContent"`) and an optional
//! human-readable `*_Localised` counterpart. The localised text is missing
//! from old-era records and sometimes holds a raw placeholder token, so the
//! resolver always produces a usable, non-empty display string, synthesizing
//! one from the identifier when it has to.
//!
//! Everything here is pure; the same inputs always resolve to the same text.

use serde_json::{Map, Value};

use crate::fields;

/// Token returned when both the localised text and the identifier are empty.
pub const UNKNOWN_TEXT: &str = "Unknown";

/// Raw placeholder tokens start with this sentinel.
const PLACEHOLDER_SENTINEL: char = '$';

/// Casing applied to synthesized text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameStyle {
    /// Keep the identifier's own word casing.
    #[default]
    Plain,
    /// Capitalize each word (body, genus, and species names).
    Title,
}

/// Produce a non-empty display string from an identifier/localised pair.
///
/// Rules, in order: non-empty localised text that is not itself a raw
/// placeholder wins unchanged; otherwise the identifier is de-tokenized;
/// an empty identifier yields [`UNKNOWN_TEXT`].
pub fn resolve(canonical: &str, localized: Option<&str>, style: NameStyle) -> String {
    if let Some(text) = localized {
        let text = text.trim();
        if !text.is_empty() && !text.starts_with(PLACEHOLDER_SENTINEL) {
            return text.to_string();
        }
    }

    let synthesized = synthesize(canonical);
    if synthesized.is_empty() {
        return UNKNOWN_TEXT.to_string();
    }

    match style {
        NameStyle::Plain => synthesized,
        NameStyle::Title => title_case(&synthesized),
    }
}

/// Resolve the `key` / `key_Localised` pair of a field map.
pub fn resolve_field(fields: &Map<String, Value>, key: &str, style: NameStyle) -> String {
    let canonical: String = fields::get(fields, key, String::new());
    let localized: Option<String> = fields::get_opt(fields, &format!("{key}_Localised"));
    resolve(&canonical, localized.as_deref(), style)
}

/// Turn an identifier into readable words: strip `$`-token markup, break on
/// underscores, and split internal case transitions.
///
/// The classifiers reuse this to normalize camel-cased vocabulary values
/// before table lookup.
pub(crate) fn synthesize(canonical: &str) -> String {
    let mut core = canonical.trim();
    core = core.strip_prefix(PLACEHOLDER_SENTINEL).unwrap_or(core);
    core = core.strip_suffix(';').unwrap_or(core);

    // identifier tokens often end in a "_Name" markup segment
    if core.to_ascii_lowercase().ends_with("_name") {
        core = &core[..core.len() - "_name".len()];
    }

    let mut words: Vec<String> = Vec::new();
    for segment in core.split(['_', ':']) {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        split_case_transitions(segment, &mut words);
    }

    words.join(" ")
}

/// Split one identifier segment at lower→upper transitions and at the end of
/// uppercase runs ("HighMetalContent" → High Metal Content, "USSAnomaly" →
/// USS Anomaly).
fn split_case_transitions(segment: &str, out: &mut Vec<String>) {
    let chars: Vec<char> = segment.chars().collect();
    let mut word = String::new();

    for (i, &c) in chars.iter().enumerate() {
        let prev_lower = i > 0 && chars[i - 1].is_lowercase();
        let upper_run_ending = i > 0
            && chars[i - 1].is_uppercase()
            && chars.get(i + 1).is_some_and(|n| n.is_lowercase());

        if c.is_uppercase() && !word.is_empty() && (prev_lower || upper_run_ending) {
            out.push(std::mem::take(&mut word));
        }
        word.push(c);
    }

    if !word.is_empty() {
        out.push(word);
    }
}

/// Capitalize the first letter of each word.
fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
