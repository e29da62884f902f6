//! Cleans a free-text major selection and splits it into candidate tokens.

use std::sync::LazyLock;

use regex::Regex;

/// Sentinel meaning "any major is accepted".
pub const UNSPECIFIED: &str = "무관";

/// Phrases that lift the major constraint entirely.
const NO_CONSTRAINT_PHRASES: &[&str] = &[UNSPECIFIED, "모든 계열", "모든 학과", "모든과"];

/// Canonical spelling of every abbreviation pulled out before splitting.
/// Closed list: extend together with the taxonomy.
const SPECIAL_TOKENS: &[(&str, &str)] = &[("s/w", "S/W")];

/// Trailing "plus entrepreneurship" annotation with no standalone meaning.
const STARTUP_ANNOTATION: &str = "+ 창업";

/// Markers after which a piece stops being specific ("et al.", "related to").
const TRUNCATION_MARKERS: &[&str] = &["등", "관련"];

/// Pieces that name no unit on their own.
const PLACEHOLDERS: &[&str] = &["계열", "학과", "학부", "과", "전공"];

static SPECIAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bS/W\b").expect("special token regex"));

static BULLET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-•*]\s*").expect("bullet regex"));

static SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,/·\n]| 및 |\s+").expect("separator regex"));

/// Split a raw major-selection string into candidate unit names.
///
/// Returns `["무관"]` when the text lifts the constraint. Otherwise the
/// extracted special abbreviations come first, then the cleaned pieces in
/// input order. Tokens may repeat.
pub fn normalize_selection(text: &str) -> Vec<String> {
    if NO_CONSTRAINT_PHRASES.iter().any(|p| text.contains(p)) {
        return vec![UNSPECIFIED.to_string()];
    }

    let mut tokens: Vec<String> = SPECIAL_RE
        .find_iter(text)
        .map(|m| canonical_special(m.as_str()))
        .collect();

    let remainder = SPECIAL_RE.replace_all(text, " ");
    let remainder = remainder.replace(STARTUP_ANNOTATION, " ");
    let remainder = BULLET_RE.replace_all(&remainder, "");

    tokens.extend(SEPARATOR_RE.split(&remainder).filter_map(clean_piece));
    tokens
}

fn canonical_special(found: &str) -> String {
    let lower = found.to_lowercase();
    SPECIAL_TOKENS
        .iter()
        .find(|(key, _)| *key == lower)
        .map_or_else(|| found.to_string(), |(_, canonical)| (*canonical).to_string())
}

/// Truncate at the first marker, drop parentheses, trim, and filter placeholders.
fn clean_piece(piece: &str) -> Option<String> {
    let cut = TRUNCATION_MARKERS
        .iter()
        .filter_map(|marker| piece.find(marker))
        .min()
        .unwrap_or(piece.len());

    let cleaned: String = piece[..cut].chars().filter(|c| !matches!(c, '(' | ')')).collect();
    let cleaned = cleaned.trim();

    if cleaned.is_empty() || PLACEHOLDERS.contains(&cleaned) {
        return None;
    }
    Some(cleaned.to_string())
}
