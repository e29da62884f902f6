//! Interview schedule block.
//!
//! Postings use one of two label vocabularies for the same three facts.
//! Both are tried and the one that finds more sections wins; on a tie the
//! first vocabulary is kept. Dates in the winning sections are standardized
//! in section order, so a year seen in the submission period carries over
//! to a year-less announcement date.

use std::sync::LazyLock;

use serde::Serialize;
use tracing::debug;

use crate::dates::standardize_section_dates;
use crate::sections::{SectionMap, SectionPattern, extract_sections, labeled_table};

static INTERVIEW_PATTERNS: LazyLock<[Vec<SectionPattern>; 2]> = LazyLock::new(|| {
    [
        labeled_table(&[
            ("interviewType", r"면접[ \t]*(?:방식|형태|유형)"),
            ("submissionPeriod", r"(?:서류[ \t]*)?제출[ \t]*기간"),
            ("resultAnnouncement", r"결과[ \t]*발표(?:일)?"),
        ]),
        labeled_table(&[
            ("interviewType", r"전형[ \t]*방법"),
            ("submissionPeriod", r"접수[ \t]*기간"),
            ("resultAnnouncement", r"(?:합격자[ \t]*)?발표(?:일)?"),
        ]),
    ]
});

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interview_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission_period: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_announcement: Option<String>,
}

/// Extract the interview block, with dates rewritten to `YYYY-MM-DD`.
pub fn parse_interview_info(text: &str) -> InterviewInfo {
    let mut best: Option<(usize, SectionMap)> = None;
    for (variant, patterns) in INTERVIEW_PATTERNS.iter().enumerate() {
        let sections = extract_sections(text, patterns);
        if best.as_ref().is_none_or(|(_, kept)| sections.len() > kept.len()) {
            best = Some((variant, sections));
        }
    }

    let Some((variant, mut sections)) = best else {
        return InterviewInfo::default();
    };
    debug!(variant, found = sections.len(), "interview labels chosen");

    standardize_section_dates(&mut sections);
    InterviewInfo {
        interview_type: sections.take("interviewType"),
        submission_period: sections.take("submissionPeriod"),
        result_announcement: sections.take("resultAnnouncement"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_vocabulary() {
        let text = "\
면접 방식 : 대면 면접
서류 제출 기간 : 2023. 06. 01 ~ 06. 14
결과 발표일 : 06.20";
        let info = parse_interview_info(text);
        assert_eq!(info.interview_type.as_deref(), Some("대면 면접"));
        assert_eq!(
            info.submission_period.as_deref(),
            Some("2023-06-01 ~ 2023-06-14")
        );
        assert_eq!(info.result_announcement.as_deref(), Some("2023-06-20"));
    }

    #[test]
    fn second_vocabulary() {
        let text = "\
- 전형 방법: 서류 전형 후 화상 면접
- 접수 기간: ~ 23.07.10
- 합격자 발표: 07.15 개별 통보";
        let info = parse_interview_info(text);
        assert_eq!(info.interview_type.as_deref(), Some("서류 전형 후 화상 면접"));
        assert_eq!(info.submission_period.as_deref(), Some("~2023-07-10"));
        assert_eq!(
            info.result_announcement.as_deref(),
            Some("2023-07-15 개별 통보")
        );
    }

    #[test]
    fn no_labels_gives_empty_info() {
        let info = parse_interview_info("추후 안내");
        assert_eq!(info, InterviewInfo::default());
        assert_eq!(serde_json::to_string(&info).expect("serialize"), "{}");
    }

    #[test]
    fn year_less_dates_without_context_untouched() {
        let info = parse_interview_info("결과 발표: 08.01");
        assert_eq!(info.result_announcement.as_deref(), Some("08.01"));
    }
}
