//! Core domain types shared by the extraction crates.

use serde::{Deserialize, Serialize};

use crate::error::InternParseError;

/// Literal value scraped postings use for "no information".
pub const PLACEHOLDER_VALUE: &str = "-";

/// True when a raw field value carries no information and should be discarded.
pub fn is_blank_value(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || trimmed == PLACEHOLDER_VALUE
}

// ---------------------------------------------------------------------------
// PostingId
// ---------------------------------------------------------------------------

/// Numeric identifier of a scraped posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostingId(pub u64);

impl std::fmt::Display for PostingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PostingId {
    type Err = InternParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InternParseError::invalid_identifier(s));
        }
        trimmed
            .parse::<u64>()
            .map(Self)
            .map_err(|_| InternParseError::invalid_identifier(s))
    }
}

// ---------------------------------------------------------------------------
// Currency
// ---------------------------------------------------------------------------

/// Pay period of a stipend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayPeriod {
    #[default]
    #[serde(rename = "월")]
    Monthly,
    #[serde(rename = "주")]
    Weekly,
}

impl PayPeriod {
    /// Map the leading period token of a pay phrase.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "월" => Some(Self::Monthly),
            "주" => Some(Self::Weekly),
            _ => None,
        }
    }

    /// The Korean token for this period.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Monthly => "월",
            Self::Weekly => "주",
        }
    }
}

/// A stipend amount in won. Defaults to monthly, zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    pub period: PayPeriod,
    pub amount: u64,
}

// ---------------------------------------------------------------------------
// Working hours
// ---------------------------------------------------------------------------

/// Daily working window, both ends as zero-padded `HH:MM`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHours {
    pub start: String,
    pub end: String,
}

// ---------------------------------------------------------------------------
// PostingStatus
// ---------------------------------------------------------------------------

/// Recruiting state of a posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostingStatus {
    Recruiting,
    Upcoming,
    Closed,
}

impl PostingStatus {
    /// Whether applications are currently accepted.
    pub fn is_open(self) -> bool {
        matches!(self, Self::Recruiting)
    }
}
