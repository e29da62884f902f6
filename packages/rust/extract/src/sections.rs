//! Ordered-marker extraction of named sections from loosely formatted text.
//!
//! A section starts right after its marker and runs until the next marker
//! of any later pattern, or the end of input. Patterns must therefore be
//! supplied in the order their markers appear in real postings.

use regex::Regex;
use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::trace;

use internparse_shared::{InternParseError, Result};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A named section and the regex matching its label.
#[derive(Debug, Clone)]
pub struct SectionPattern {
    pub name: String,
    pub marker: Regex,
}

impl SectionPattern {
    /// Compile a pattern from a marker regex.
    pub fn new(name: impl Into<String>, marker: &str) -> Result<Self> {
        let marker = Regex::new(marker)
            .map_err(|e| InternParseError::parse(format!("invalid section marker: {e}")))?;
        Ok(Self {
            name: name.into(),
            marker,
        })
    }

    /// Pattern for a `label :` line, optionally led by a bullet.
    ///
    /// `label` is a regex fragment, e.g. `(?:모집\s*)?인원`.
    pub fn labeled(name: impl Into<String>, label: &str) -> Result<Self> {
        Self::new(name, &format!(r"(?m)^[ \t]*[*\-•]?[ \t]*(?:{label})[ \t]*[:：]"))
    }
}

/// Compile a fixed `(name, label)` table. Labels are literals, so a failure is a bug.
pub(crate) fn labeled_table(table: &[(&str, &str)]) -> Vec<SectionPattern> {
    table
        .iter()
        .map(|&(name, label)| SectionPattern::labeled(name, label).expect("section marker regex"))
        .collect()
}

/// Section name → trimmed text, in extraction order.
///
/// An absent key means the marker did not match; empty captures are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionMap {
    entries: Vec<(String, String)>,
}

impl SectionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a section, keeping the original position on replace.
    pub fn insert(&mut self, name: impl Into<String>, text: impl Into<String>) {
        let name = name.into();
        let text = text.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some((_, existing)) => *existing = text,
            None => self.entries.push((name, text)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Mutable access to every value, in insertion order.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut String> {
        self.entries.iter_mut().map(|(_, v)| v)
    }

    /// Remove and return a section.
    pub fn take(&mut self, name: &str) -> Option<String> {
        let idx = self.entries.iter().position(|(k, _)| k == name)?;
        Some(self.entries.remove(idx).1)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SectionMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl Serialize for SectionMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Extract every section whose marker appears in `text`.
pub fn extract_sections(text: &str, patterns: &[SectionPattern]) -> SectionMap {
    let mut sections = SectionMap::new();

    for (idx, pattern) in patterns.iter().enumerate() {
        let Some(marker) = pattern.marker.find(text) else {
            continue;
        };

        let start = marker.end();
        let end = patterns[idx + 1..]
            .iter()
            .filter_map(|next| next.marker.find_at(text, start))
            .map(|m| m.start())
            .min()
            .unwrap_or(text.len());

        let body = text[start..end].trim();
        if body.is_empty() {
            continue;
        }

        trace!(section = %pattern.name, len = body.len(), "section matched");
        sections.insert(pattern.name.clone(), body);
    }

    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns() -> Vec<SectionPattern> {
        vec![
            SectionPattern::labeled("first", "첫째").expect("pattern"),
            SectionPattern::labeled("second", "둘째").expect("pattern"),
            SectionPattern::labeled("third", "셋째").expect("pattern"),
        ]
    }

    #[test]
    fn sections_bounded_by_next_marker() {
        let text = "*첫째 : 하나\n여러 줄\n*둘째: 둘\n- 셋째 ： 셋";
        let sections = extract_sections(text, &patterns());
        assert_eq!(sections.get("first"), Some("하나\n여러 줄"));
        assert_eq!(sections.get("second"), Some("둘"));
        assert_eq!(sections.get("third"), Some("셋"));
        assert_eq!(
            sections.iter().map(|(k, _)| k).collect::<Vec<_>>(),
            vec!["first", "second", "third"]
        );
    }

    #[test]
    fn missing_marker_leaves_key_absent() {
        let text = "첫째: 하나\n셋째: 셋";
        let sections = extract_sections(text, &patterns());
        assert_eq!(sections.get("first"), Some("하나"));
        assert!(!sections.contains_key("second"));
        assert_eq!(sections.get("third"), Some("셋"));
    }

    #[test]
    fn whitespace_only_capture_omitted() {
        let text = "첫째:   \n둘째: 둘";
        let sections = extract_sections(text, &patterns());
        assert!(!sections.contains_key("first"));
        assert_eq!(sections.len(), 1);
    }

    #[test]
    fn marker_must_start_a_line() {
        let text = "본문에 첫째: 같은 말이 있어도\n둘째: 둘";
        let sections = extract_sections(text, &patterns());
        assert!(!sections.contains_key("first"));
        assert_eq!(sections.get("second"), Some("둘"));
    }

    #[test]
    fn invalid_marker_is_parse_error() {
        let err = SectionPattern::new("bad", "(unclosed").unwrap_err();
        assert!(matches!(err, InternParseError::Parse { .. }));
    }

    #[test]
    fn map_serializes_in_order() {
        let map: SectionMap = [("b", "2"), ("a", "1")].into_iter().collect();
        let json = serde_json::to_string(&map).expect("serialize");
        assert_eq!(json, r#"{"b":"2","a":"1"}"#);
    }
}
