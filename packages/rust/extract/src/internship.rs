use std::sync::LazyLock;

use serde::Serialize;

use crate::sections::{SectionPattern, extract_sections, labeled_table};

static INTERNSHIP_PATTERNS: LazyLock<Vec<SectionPattern>> = LazyLock::new(|| {
    labeled_table(&[
        ("jobTitle", r"직무[ \t]*(?:명)?"),
        ("goals", r"(?:실습[ \t]*)?목표"),
        ("overview", r"(?:실습[ \t]*)?(?:개요|내용)"),
        ("guidance", r"지도[ \t]*(?:계획|방법)?"),
        ("outcomes", r"(?:기대[ \t]*)?성과"),
    ])
});

/// Job description block of a posting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternshipDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goals: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guidance: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcomes: Option<String>,
}

pub fn parse_internship_detail(text: &str) -> InternshipDetail {
    let mut sections = extract_sections(text, &INTERNSHIP_PATTERNS);
    InternshipDetail {
        job_title: sections.take("jobTitle"),
        goals: sections.take("goals"),
        overview: sections.take("overview"),
        guidance: sections.take("guidance"),
        outcomes: sections.take("outcomes"),
    }
}
