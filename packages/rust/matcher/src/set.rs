use serde::{Deserialize, Serialize};

use crate::normalize::UNSPECIFIED;

/// Canonical major names, unique, kept in insertion order.
///
/// The singleton `{"무관"}` means "no constraint"; an empty set means
/// nothing could be resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MajorSet {
    majors: Vec<String>,
}

impl MajorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The "no constraint" result.
    pub fn unconstrained() -> Self {
        Self {
            majors: vec![UNSPECIFIED.to_string()],
        }
    }

    /// Add a major; returns `false` if it was already present.
    pub fn insert(&mut self, major: impl Into<String>) -> bool {
        let major = major.into();
        if self.majors.contains(&major) {
            return false;
        }
        self.majors.push(major);
        true
    }

    pub fn contains(&self, major: &str) -> bool {
        self.majors.iter().any(|m| m == major)
    }

    pub fn is_unconstrained(&self) -> bool {
        self.majors.len() == 1 && self.majors[0] == UNSPECIFIED
    }

    pub fn len(&self) -> usize {
        self.majors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.majors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.majors.iter().map(String::as_str)
    }
}

impl<S: Into<String>> Extend<S> for MajorSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for major in iter {
            self.insert(major);
        }
    }
}

impl<S: Into<String>> FromIterator<S> for MajorSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl IntoIterator for MajorSet {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.majors.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_deduplicates_keeping_first_position() {
        let mut set = MajorSet::new();
        assert!(set.insert("경영학부"));
        assert!(set.insert("행정학과"));
        assert!(!set.insert("경영학부"));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["경영학부", "행정학과"]);
    }

    #[test]
    fn unconstrained_is_distinct_from_empty() {
        assert!(MajorSet::unconstrained().is_unconstrained());
        assert!(!MajorSet::new().is_unconstrained());
        let mixed: MajorSet = ["무관", "경영학부"].into_iter().collect();
        assert!(!mixed.is_unconstrained());
    }

    #[test]
    fn serializes_as_array() {
        let set: MajorSet = ["수학과", "물리학과"].into_iter().collect();
        let json = serde_json::to_string(&set).expect("serialize");
        assert_eq!(json, r#"["수학과","물리학과"]"#);
    }
}
