//! Qualifications block: major, head count, grade, credit, competence, other.
//!
//! The major section is resolved through the matcher; the grade section is
//! additionally parsed into eligible grade numbers.

use std::sync::LazyLock;

use serde::Serialize;
use tracing::{debug, instrument};

use internparse_matcher::{MajorMatcher, MajorSet};
use internparse_shared::is_blank_value;

use crate::fields::parse_grade_eligibility;
use crate::sections::{SectionPattern, extract_sections, labeled_table};

static QUALIFICATION_PATTERNS: LazyLock<Vec<SectionPattern>> = LazyLock::new(|| {
    labeled_table(&[
        ("major", r"(?:지원[ \t]*)?전공"),
        ("recruitCount", r"(?:모집[ \t]*)?인원"),
        ("grade", r"(?:지원[ \t]*)?학년"),
        ("credit", r"(?:평균[ \t]*)?학점"),
        ("competence", r"(?:필요[ \t]*)?역량"),
        ("other", r"기타(?:[ \t]*사항)?"),
    ])
});

/// Parsed qualifications of one posting. Absent sections stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Qualifications {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub major: Option<MajorSet>,
    /// Major mentions that resolved to nothing in the taxonomy.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unmapped_majors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recruit_count: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub competence: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub eligible_grades: Vec<u8>,
}

/// Split a qualifications block into its sections.
#[instrument(level = "debug", skip_all)]
pub fn parse_qualifications(text: &str, matcher: &MajorMatcher) -> Qualifications {
    let mut sections = extract_sections(text, &QUALIFICATION_PATTERNS);

    let (major, unmapped_majors) = match sections.take("major") {
        Some(selection) => {
            let resolution = matcher.resolve_selection(&selection);
            (Some(resolution.majors), resolution.unmapped)
        }
        None => (None, Vec::new()),
    };

    let grade = sections.take("grade");
    let eligible_grades = grade
        .as_deref()
        .map(parse_grade_eligibility)
        .unwrap_or_default();

    let quals = Qualifications {
        major,
        unmapped_majors,
        recruit_count: sections.take("recruitCount"),
        grade,
        credit: sections.take("credit"),
        competence: sections.take("competence"),
        other: sections.take("other"),
        eligible_grades,
    };
    debug!(has_major = quals.major.is_some(), "qualifications parsed");
    quals
}

/// Majors for a posting: the primary field when it carries a value, else the
/// qualifications' major section.
pub fn resolve_posting_majors(
    primary: Option<&str>,
    qualifications: &Qualifications,
    matcher: &MajorMatcher,
) -> MajorSet {
    match primary {
        Some(text) if !is_blank_value(text) => matcher.resolve_selection(text).majors,
        _ => qualifications.major.clone().unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn major_and_recruit_count_end_to_end() {
        let quals = parse_qualifications(
            "*전공 : 컴퓨터소프트웨어학부\n*인원 : 2명",
            &MajorMatcher::default(),
        );
        let major = quals.major.expect("major section");
        assert!(major.contains("컴퓨터소프트웨어학부"));
        assert_eq!(quals.recruit_count.as_deref(), Some("2명"));
    }

    #[test]
    fn full_block() {
        let text = "\
- 전공: 무관
- 모집 인원: 3명
- 학년: 3,4학년
- 학점: 3.0 이상
- 필요 역량: 엑셀 활용 가능자
- 기타 사항: 성실한 분";
        let quals = parse_qualifications(text, &MajorMatcher::default());
        assert!(quals.major.as_ref().is_some_and(MajorSet::is_unconstrained));
        assert_eq!(quals.recruit_count.as_deref(), Some("3명"));
        assert_eq!(quals.grade.as_deref(), Some("3,4학년"));
        assert_eq!(quals.eligible_grades, vec![3, 4]);
        assert_eq!(quals.credit.as_deref(), Some("3.0 이상"));
        assert_eq!(quals.competence.as_deref(), Some("엑셀 활용 가능자"));
        assert_eq!(quals.other.as_deref(), Some("성실한 분"));
    }

    #[test]
    fn missing_sections_stay_absent() {
        let quals = parse_qualifications("인원: 1명", &MajorMatcher::default());
        assert!(quals.major.is_none());
        assert!(quals.eligible_grades.is_empty());

        let json = serde_json::to_value(&quals).expect("serialize");
        assert_eq!(json, serde_json::json!({ "recruitCount": "1명" }));
    }

    #[test]
    fn unmapped_major_reported() {
        let quals = parse_qualifications("전공: 천문우주학과", &MajorMatcher::default());
        assert_eq!(quals.unmapped_majors, vec!["천문우주학과"]);
        assert!(quals.major.expect("major").contains("천문우주학과"));
    }

    #[test]
    fn primary_major_preferred_when_present() {
        let matcher = MajorMatcher::default();
        let quals = parse_qualifications("전공: 경영학부", &matcher);

        let primary = resolve_posting_majors(Some("수학과"), &quals, &matcher);
        assert!(primary.contains("수학과"));
        assert!(!primary.contains("경영학부"));

        for blank in [None, Some(""), Some("-"), Some("  ")] {
            let fallback = resolve_posting_majors(blank, &quals, &matcher);
            assert!(fallback.contains("경영학부"), "{blank:?}");
        }
    }
}
