//! Tiered resolution of candidate tokens to canonical majors.
//!
//! Each atomic input runs through every tier in order:
//! special category, field group, college, major prefix. Tiers are not
//! exclusive; their hits are unioned. Only when all four miss does the
//! fuzzy fallback run, and only a candidate within the configured edit
//! distance is accepted. Anything left over passes through verbatim.
//!
//! Tiers 2-4 compare with case-sensitive `contains` against the names as
//! declared; tiers 5-6 fold case first. `"IT"` therefore hits the `IT계열`
//! category while `"it"` does not. This asymmetry is kept on purpose for
//! compatibility with existing records.

use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde::Serialize;
use tracing::{instrument, trace, warn};

use internparse_shared::{MatcherConfig, Result};
use internparse_taxonomy::Taxonomy;

use crate::normalize::{UNSPECIFIED, normalize_selection};
use crate::set::MajorSet;

/// Separators inside a single token.
static ATOM_SPLIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,\s]+").expect("atom split regex"));

/// Department, division, major and "studies" endings dropped from input.
static INPUT_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:학과|학부|전공|학)$").expect("input suffix regex"));

/// Department, division and major endings dropped before prefix and fuzzy comparison.
static MAJOR_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:학과|학부|전공)$").expect("major suffix regex"));

const FIELD_SUFFIX: &str = "계열";
const COLLEGE_SUFFIX: &str = "대학";

/// Outcome of one resolution call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Canonical majors, plus verbatim passthrough of unresolved inputs.
    pub majors: MajorSet,
    /// Inputs no tier could resolve (likely misspelled or unmapped).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unmapped: Vec<String>,
}

/// One unit name after the pre-pass.
#[derive(Debug)]
struct Atom {
    /// Piece as it appeared before suffix stripping.
    raw: String,
    /// Suffix-stripped, original case.
    text: String,
    /// Suffix-stripped, case-folded.
    folded: String,
}

/// Resolves free-text major mentions against a shared, read-only taxonomy.
#[derive(Debug, Clone)]
pub struct MajorMatcher {
    taxonomy: Arc<Taxonomy>,
    fuzzy_max_distance: usize,
}

impl Default for MajorMatcher {
    fn default() -> Self {
        Self::new(Taxonomy::shared())
    }
}

impl MajorMatcher {
    /// Largest edit distance the fuzzy tier accepts unless configured otherwise.
    pub const DEFAULT_FUZZY_MAX_DISTANCE: usize = 1;

    pub fn new(taxonomy: Arc<Taxonomy>) -> Self {
        Self {
            taxonomy,
            fuzzy_max_distance: Self::DEFAULT_FUZZY_MAX_DISTANCE,
        }
    }

    /// Build a matcher from runtime config, loading an override taxonomy if one is set.
    pub fn from_config(config: &MatcherConfig) -> Result<Self> {
        let taxonomy = match &config.taxonomy_path {
            Some(path) => Arc::new(Taxonomy::from_path(path)?),
            None => Taxonomy::shared(),
        };
        Ok(Self::new(taxonomy).with_fuzzy_max_distance(config.fuzzy_max_distance))
    }

    pub fn with_fuzzy_max_distance(mut self, distance: usize) -> Self {
        self.fuzzy_max_distance = distance;
        self
    }

    /// Normalize a raw selection string and resolve its tokens.
    #[instrument(level = "debug", skip(self))]
    pub fn resolve_selection(&self, text: &str) -> Resolution {
        let tokens = normalize_selection(text);
        self.resolve_detailed(&tokens)
    }

    /// Resolve candidate tokens to a set of canonical majors.
    pub fn resolve<S: AsRef<str>>(&self, tokens: &[S]) -> MajorSet {
        self.resolve_detailed(tokens).majors
    }

    /// Resolve candidate tokens, also reporting which inputs passed through unresolved.
    pub fn resolve_detailed<S: AsRef<str>>(&self, tokens: &[S]) -> Resolution {
        let mut resolution = Resolution::default();

        for atom in atomize(tokens) {
            if atom.text == UNSPECIFIED {
                return Resolution {
                    majors: MajorSet::unconstrained(),
                    unmapped: Vec::new(),
                };
            }

            let majors = &mut resolution.majors;
            let mut matched = false;
            matched |= self.match_special_categories(&atom, majors);
            matched |= self.match_field_groups(&atom, majors);
            matched |= self.match_colleges(&atom, majors);
            matched |= self.match_major_prefixes(&atom, majors);

            if matched {
                continue;
            }

            match self.closest_major(&atom) {
                Some(major) => {
                    trace!(input = %atom.raw, major, "fuzzy tier hit");
                    majors.insert(major);
                }
                None => {
                    warn!(input = %atom.raw, "unmapped major, passing through");
                    majors.insert(atom.raw.clone());
                    resolution.unmapped.push(atom.raw);
                }
            }
        }

        resolution
    }

    /// Tier 2: bidirectional substring test against category names.
    fn match_special_categories(&self, atom: &Atom, majors: &mut MajorSet) -> bool {
        let mut hit = false;
        for category in self.taxonomy.special_categories() {
            if category.name.contains(&atom.text) || atom.text.contains(&category.name) {
                trace!(input = %atom.text, category = %category.name, "special category hit");
                majors.extend(category.majors.iter().cloned());
                hit = true;
            }
        }
        hit
    }

    /// Tier 3: field group name contains the input, or the input contains the group stem.
    fn match_field_groups(&self, atom: &Atom, majors: &mut MajorSet) -> bool {
        let mut hit = false;
        for group in self.taxonomy.field_groups() {
            let stem = group.name.strip_suffix(FIELD_SUFFIX).unwrap_or(&group.name);
            let found = group.name.contains(&atom.text)
                || (!stem.is_empty() && atom.text.contains(stem));
            if !found {
                continue;
            }

            trace!(input = %atom.text, group = %group.name, "field group hit");
            for name in &group.colleges {
                if let Some(college) = self.taxonomy.college(name) {
                    majors.extend(college.majors.iter().cloned());
                }
            }
            hit = true;
        }
        hit
    }

    /// Tier 4: the input contains a college name without its "대학" ending.
    fn match_colleges(&self, atom: &Atom, majors: &mut MajorSet) -> bool {
        let mut hit = false;
        for college in self.taxonomy.colleges() {
            let stem = college.name.strip_suffix(COLLEGE_SUFFIX).unwrap_or(&college.name);
            if !stem.is_empty() && atom.text.contains(stem) {
                trace!(input = %atom.text, college = %college.name, "college hit");
                majors.extend(college.majors.iter().cloned());
                hit = true;
            }
        }
        hit
    }

    /// Tier 5: case-folded prefix containment in either direction.
    fn match_major_prefixes(&self, atom: &Atom, majors: &mut MajorSet) -> bool {
        let input = strip_major_suffix(&atom.folded);
        if input.is_empty() {
            return false;
        }

        let mut hit = false;
        for college in self.taxonomy.colleges() {
            for major in &college.majors {
                let canonical = strip_major_suffix(&major.to_lowercase());
                if canonical.is_empty() {
                    continue;
                }
                if canonical.starts_with(&input) || input.starts_with(&canonical) {
                    trace!(input = %atom.text, major = %major, "major prefix hit");
                    majors.insert(major.clone());
                    hit = true;
                }
            }
        }
        hit
    }

    /// Tier 6: nearest major in the full pool, if within the accepted distance.
    ///
    /// Ties go to the earliest major in declaration order.
    fn closest_major(&self, atom: &Atom) -> Option<&str> {
        let input = strip_major_suffix(&atom.folded);
        let (distance, major) = self
            .taxonomy
            .major_pool()
            .iter()
            .map(|major| {
                let canonical = strip_major_suffix(&major.to_lowercase());
                (strsim::levenshtein(&input, &canonical), major)
            })
            .min_by_key(|(distance, _)| *distance)?;

        (distance <= self.fuzzy_max_distance).then_some(major.as_str())
    }
}

/// Split tokens further on commas and whitespace and strip unit suffixes.
fn atomize<S: AsRef<str>>(tokens: &[S]) -> Vec<Atom> {
    let mut atoms = Vec::new();
    for token in tokens {
        for piece in ATOM_SPLIT_RE.split(token.as_ref()) {
            let raw = piece.trim();
            let text = INPUT_SUFFIX_RE.replace(raw, "").trim().to_string();
            if text.is_empty() {
                continue;
            }
            atoms.push(Atom {
                raw: raw.to_string(),
                folded: text.to_lowercase(),
                text,
            });
        }
    }
    atoms
}

fn strip_major_suffix(name: &str) -> String {
    MAJOR_SUFFIX_RE.replace(name, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> MajorMatcher {
        MajorMatcher::default()
    }

    fn names(set: &MajorSet) -> Vec<&str> {
        set.iter().collect()
    }

    #[test]
    fn unspecified_overrides_partial_results() {
        let set = matcher().resolve(&["경영학부", "무관", "수학과"]);
        assert_eq!(set, MajorSet::unconstrained());
    }

    #[test]
    fn identical_input_identical_output() {
        let m = matcher();
        let tokens = ["공학계열", "S/W", "경영학부", "약핵과"];
        let first = m.resolve(&tokens);
        for _ in 0..5 {
            assert_eq!(m.resolve(&tokens), first);
        }
    }

    #[test]
    fn exact_major_resolves_to_itself() {
        let set = matcher().resolve(&["컴퓨터소프트웨어학부"]);
        assert_eq!(names(&set), vec!["컴퓨터소프트웨어학부"]);
    }

    #[test]
    fn special_category_adds_all_members() {
        let set = matcher().resolve(&["IT"]);
        assert_eq!(
            names(&set),
            vec![
                "컴퓨터소프트웨어학부",
                "데이터사이언스학부",
                "정보시스템학과",
                "인공지능학과",
                "융합전자공학부",
            ]
        );
    }

    #[test]
    fn category_tier_is_case_sensitive_quirk() {
        // Known asymmetry: tiers 2-4 do not fold case, so lowercase "it"
        // misses the IT category and falls through to passthrough.
        let resolution = matcher().resolve_detailed(&["it"]);
        assert_eq!(names(&resolution.majors), vec!["it"]);
        assert_eq!(resolution.unmapped, vec!["it"]);
    }

    #[test]
    fn field_group_expands_to_colleges() {
        let set = matcher().resolve(&["공학계열"]);
        assert!(set.contains("기계공학부"));
        assert!(set.contains("인공지능학과"));
        assert!(!set.contains("수학과"));
        assert_eq!(set.len(), 20);
    }

    #[test]
    fn college_name_expands_to_majors() {
        let set = matcher().resolve(&["음악대학"]);
        assert_eq!(names(&set), vec!["성악과", "작곡과", "피아노과", "관현악과"]);
    }

    #[test]
    fn tiers_are_unioned_across_inputs() {
        let resolution = matcher().resolve_selection("S/W, 경영학부");
        assert_eq!(
            names(&resolution.majors),
            vec![
                "컴퓨터소프트웨어학부",
                "인공지능학과",
                "데이터사이언스학부",
                "경영학부",
                "파이낸스경영학과",
            ]
        );
        assert!(resolution.unmapped.is_empty());
    }

    #[test]
    fn fuzzy_accepts_distance_one() {
        let set = matcher().resolve(&["컴퓨터소프트웨여학부"]);
        assert_eq!(names(&set), vec!["컴퓨터소프트웨어학부"]);
    }

    #[test]
    fn fuzzy_rejects_distance_two() {
        let resolution = matcher().resolve_detailed(&["컴퓨타소프트웨여학부"]);
        assert_eq!(names(&resolution.majors), vec!["컴퓨타소프트웨여학부"]);
        assert_eq!(resolution.unmapped, vec!["컴퓨타소프트웨여학부"]);
    }

    #[test]
    fn fuzzy_threshold_is_configurable() {
        let set = matcher()
            .with_fuzzy_max_distance(2)
            .resolve(&["컴퓨타소프트웨여학부"]);
        assert_eq!(names(&set), vec!["컴퓨터소프트웨어학부"]);
    }

    #[test]
    fn fuzzy_pool_includes_category_only_majors() {
        let set = matcher().resolve(&["산업디자안학과"]);
        assert_eq!(names(&set), vec!["산업디자인학과"]);
    }

    #[test]
    fn related_phrase_resolves_through_category() {
        let resolution = matcher().resolve_selection("전기전자 관련 학과");
        assert_eq!(
            names(&resolution.majors),
            vec!["융합전자공학부", "전기공학전공", "미래자동차공학과"]
        );
    }

    #[test]
    fn empty_input_is_empty_set() {
        let set = matcher().resolve::<&str>(&[]);
        assert!(set.is_empty());
        assert!(!set.is_unconstrained());
    }

    #[test]
    fn custom_taxonomy_is_used() {
        let taxonomy = Taxonomy::from_toml_str(
            r#"
[[colleges]]
name = "항공대학"
majors = ["항공운항학과", "항공우주공학과"]
"#,
        )
        .expect("taxonomy");
        let m = MajorMatcher::new(Arc::new(taxonomy));
        assert_eq!(names(&m.resolve(&["항공대학"])), vec!["항공운항학과", "항공우주공학과"]);
    }

    fn latin_taxonomy_matcher() -> MajorMatcher {
        let taxonomy = Taxonomy::from_toml_str(
            r#"
[[colleges]]
name = "첨단융합대학"
majors = ["AI융합학과", "로봇공학과"]
"#,
        )
        .expect("taxonomy");
        MajorMatcher::new(Arc::new(taxonomy))
    }

    #[test]
    fn prefix_tier_folds_case() {
        let resolution = latin_taxonomy_matcher().resolve_detailed(&["ai융합학과"]);
        assert_eq!(names(&resolution.majors), vec!["AI융합학과"]);
        assert!(resolution.unmapped.is_empty());
    }

    #[test]
    fn fuzzy_tier_folds_case() {
        let resolution = latin_taxonomy_matcher().resolve_detailed(&["aI융햡"]);
        assert_eq!(names(&resolution.majors), vec!["AI융합학과"]);
        assert!(resolution.unmapped.is_empty());
    }

    #[test]
    fn mixed_case_inputs_collapse_to_one_major() {
        let resolution = latin_taxonomy_matcher().resolve_detailed(&["ai융합학과", "aI융햡"]);
        assert_eq!(names(&resolution.majors), vec!["AI융합학과"]);
    }
}
