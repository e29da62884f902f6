//! Pattern-based extraction of structured fields from posting text.
//!
//! - [`sections`]: generic ordered-marker section extractor
//! - [`dates`]: `YYYY-MM-DD` rewriting with year context carried across fields
//! - [`qualifications`], [`internship`], [`interview`]: section-based blocks
//! - [`fields`]: single-value parsers (grades, stipend, deadline, hours, days, status)
//!
//! [`extract_field`] dispatches one raw value to the parser for its
//! [`FieldKind`] and returns the result as JSON.

pub mod dates;
pub mod fields;
pub mod internship;
pub mod interview;
pub mod qualifications;
pub mod sections;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use internparse_matcher::MajorMatcher;
use internparse_shared::{InternParseError, Result};

pub use dates::{DateScan, standardize_dates, standardize_record_dates, standardize_section_dates};
pub use fields::{
    END_OF_DAY, parse_currency, parse_deadline_time, parse_grade_eligibility, parse_status,
    parse_working_days, parse_working_hours,
};
pub use internship::{InternshipDetail, parse_internship_detail};
pub use interview::{InterviewInfo, parse_interview_info};
pub use qualifications::{Qualifications, parse_qualifications, resolve_posting_majors};
pub use sections::{SectionMap, SectionPattern, extract_sections};

// ---------------------------------------------------------------------------
// FieldKind
// ---------------------------------------------------------------------------

/// Which parser a raw field value goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Major,
    Qualifications,
    Internship,
    Interview,
    Grades,
    Currency,
    Deadline,
    Hours,
    Days,
    Status,
}

impl FieldKind {
    pub const ALL: [FieldKind; 10] = [
        Self::Major,
        Self::Qualifications,
        Self::Internship,
        Self::Interview,
        Self::Grades,
        Self::Currency,
        Self::Deadline,
        Self::Hours,
        Self::Days,
        Self::Status,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Major => "major",
            Self::Qualifications => "qualifications",
            Self::Internship => "internship",
            Self::Interview => "interview",
            Self::Grades => "grades",
            Self::Currency => "currency",
            Self::Deadline => "deadline",
            Self::Hours => "hours",
            Self::Days => "days",
            Self::Status => "status",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKind {
    type Err = InternParseError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| InternParseError::parse(format!("unknown field kind: {s:?}")))
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Run the parser for `kind` over `text` and return its output as JSON.
///
/// Only `hours` can fail; every other kind degrades to its default value.
pub fn extract_field(kind: FieldKind, text: &str, matcher: &MajorMatcher) -> Result<Value> {
    let value = match kind {
        FieldKind::Major => to_json(&matcher.resolve_selection(text)),
        FieldKind::Qualifications => to_json(&parse_qualifications(text, matcher)),
        FieldKind::Internship => to_json(&parse_internship_detail(text)),
        FieldKind::Interview => to_json(&parse_interview_info(text)),
        FieldKind::Grades => to_json(&parse_grade_eligibility(text)),
        FieldKind::Currency => to_json(&parse_currency(text)),
        FieldKind::Deadline => Ok(Value::String(parse_deadline_time(text))),
        FieldKind::Hours => to_json(&parse_working_hours(text)?),
        FieldKind::Days => to_json(&parse_working_days(text)),
        FieldKind::Status => to_json(&parse_status(text)),
    }?;
    Ok(value)
}

fn to_json<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| InternParseError::parse(e.to_string()))
}
