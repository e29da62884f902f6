//! Small single-field parsers.
//!
//! Everything here returns a best-effort default on unrecognized input,
//! except [`parse_working_hours`]: malformed working hours point at upstream
//! data corruption, so they fail with [`InternParseError::InvalidFormat`].

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use internparse_matcher::UNSPECIFIED;
use internparse_shared::{
    Currency, InternParseError, PayPeriod, PostingStatus, Result, WorkingHours,
};

/// Deadline sentinel: no explicit cutoff, treat as end of day.
pub const END_OF_DAY: &str = "24:00";

/// Every grade a four-year program has.
pub const ALL_GRADES: [u8; 4] = [1, 2, 3, 4];

static GRADE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\s*,\s*\d+)*)\s*학년").expect("grade regex"));

static CURRENCY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:(월|주)\s*)?(\d{1,3}(?:,\d{3})+|\d+)\s*원").expect("currency regex")
});

static DEADLINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{1,2})\s*(?:시(?:\s*(\d{1,2})\s*분)?|:\s*(\d{1,2}))\s*까지")
        .expect("deadline regex")
});

static CLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2})\s*시(?:\s*(\d{1,2})\s*분)?$").expect("clock regex")
});

// ---------------------------------------------------------------------------
// Grades
// ---------------------------------------------------------------------------

/// Grades a posting accepts.
///
/// `[1, 2, 3, 4]` when the text says "무관", the numbers of the first
/// `N(,N)*학년` run otherwise, and `[]` when neither is present.
pub fn parse_grade_eligibility(text: &str) -> Vec<u8> {
    if text.contains(UNSPECIFIED) {
        return ALL_GRADES.to_vec();
    }

    GRADE_RE
        .captures(text)
        .map(|caps| {
            caps[1]
                .split(',')
                .filter_map(|n| n.trim().parse().ok())
                .collect()
        })
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Currency
// ---------------------------------------------------------------------------

/// Parse a stipend such as `월 500,000 원`. Defaults to `{월, 0}`.
pub fn parse_currency(text: &str) -> Currency {
    let Some(caps) = CURRENCY_RE.captures(text) else {
        return Currency::default();
    };

    let period = caps
        .get(1)
        .and_then(|m| PayPeriod::from_token(m.as_str()))
        .unwrap_or_default();

    match caps[2].replace(',', "").parse::<u64>() {
        Ok(amount) => Currency { period, amount },
        Err(e) => {
            debug!(text, error = %e, "stipend amount out of range");
            Currency::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Deadline time
// ---------------------------------------------------------------------------

/// Normalize `H시까지`, `H시 M분까지` or `H:M까지` to `HH:MM`.
///
/// Empty or unrecognized text yields [`END_OF_DAY`].
pub fn parse_deadline_time(text: &str) -> String {
    let Some(caps) = DEADLINE_RE.captures(text.trim()) else {
        return END_OF_DAY.to_string();
    };

    let hour = caps[1].parse::<u32>().ok();
    let minute = match caps.get(2).or_else(|| caps.get(3)) {
        Some(m) => m.as_str().parse::<u32>().ok(),
        None => Some(0),
    };

    match (hour, minute) {
        (Some(h), Some(m)) if is_clock(h, m) => format!("{h:02}:{m:02}"),
        _ => END_OF_DAY.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Working hours and days
// ---------------------------------------------------------------------------

/// Parse `H시 M분 ~ H시 M분` into a start/end pair.
pub fn parse_working_hours(text: &str) -> Result<WorkingHours> {
    let (start, end) = text.split_once('~').ok_or_else(|| {
        InternParseError::invalid_format(format!("working hours without '~': {text:?}"))
    })?;

    Ok(WorkingHours {
        start: parse_clock(start)?,
        end: parse_clock(end)?,
    })
}

/// Split a working-day phrase such as `월 화 수 목 금` on whitespace.
pub fn parse_working_days(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

fn parse_clock(phrase: &str) -> Result<String> {
    let phrase = phrase.trim();
    let invalid = || InternParseError::invalid_format(format!("unrecognized hour phrase {phrase:?}"));

    let caps = CLOCK_RE.captures(phrase).ok_or_else(invalid)?;
    let hour: u32 = caps[1].parse().map_err(|_| invalid())?;
    let minute: u32 = match caps.get(2) {
        Some(m) => m.as_str().parse().map_err(|_| invalid())?,
        None => 0,
    };

    if !is_clock(hour, minute) {
        return Err(invalid());
    }
    Ok(format!("{hour:02}:{minute:02}"))
}

fn is_clock(hour: u32, minute: u32) -> bool {
    minute < 60 && (hour < 24 || (hour == 24 && minute == 0))
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Classify a recruiting-status label.
pub fn parse_status(text: &str) -> PostingStatus {
    if text.contains("마감") || text.contains("종료") {
        PostingStatus::Closed
    } else if text.contains("예정") {
        PostingStatus::Upcoming
    } else {
        PostingStatus::Recruiting
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grades_unrestricted() {
        assert_eq!(parse_grade_eligibility("학년 무관"), vec![1, 2, 3, 4]);
    }

    #[test]
    fn grades_listed() {
        assert_eq!(parse_grade_eligibility("1,2학년 대상"), vec![1, 2]);
        assert_eq!(parse_grade_eligibility("3, 4 학년 재학생"), vec![3, 4]);
        assert_eq!(parse_grade_eligibility("4학년 이상, 1학년 제외"), vec![4]);
    }

    #[test]
    fn grades_absent() {
        assert!(parse_grade_eligibility("제한 없음").is_empty());
        assert!(parse_grade_eligibility("").is_empty());
    }

    #[test]
    fn currency_monthly() {
        assert_eq!(
            parse_currency("월 500,000 원"),
            Currency {
                period: PayPeriod::Monthly,
                amount: 500_000
            }
        );
    }

    #[test]
    fn currency_weekly_and_unseparated() {
        assert_eq!(
            parse_currency("주 150000원 지급"),
            Currency {
                period: PayPeriod::Weekly,
                amount: 150_000
            }
        );
    }

    #[test]
    fn currency_period_defaults_to_monthly() {
        let pay = parse_currency("실습지원비 1,200,000원");
        assert_eq!(pay.period, PayPeriod::Monthly);
        assert_eq!(pay.amount, 1_200_000);
    }

    #[test]
    fn currency_unrecognized_defaults() {
        assert_eq!(parse_currency("abc"), Currency::default());
        assert_eq!(parse_currency("abc").amount, 0);
    }

    #[test]
    fn deadline_phrasings() {
        assert_eq!(parse_deadline_time("12시까지"), "12:00");
        assert_eq!(parse_deadline_time("12시 30분까지"), "12:30");
        assert_eq!(parse_deadline_time("9:5까지"), "09:05");
        assert_eq!(parse_deadline_time("마감일 18:00까지 제출"), "18:00");
    }

    #[test]
    fn deadline_defaults_to_end_of_day() {
        assert_eq!(parse_deadline_time(""), END_OF_DAY);
        assert_eq!(parse_deadline_time("   "), END_OF_DAY);
        assert_eq!(parse_deadline_time("오후 중"), END_OF_DAY);
        assert_eq!(parse_deadline_time("30시까지"), END_OF_DAY);
    }

    #[test]
    fn working_hours_parsed() {
        let hours = parse_working_hours("9시 00분 ~ 18시 30분").expect("hours");
        assert_eq!(hours.start, "09:00");
        assert_eq!(hours.end, "18:30");

        let hours = parse_working_hours("10시~17시").expect("hours");
        assert_eq!(hours.start, "10:00");
        assert_eq!(hours.end, "17:00");
    }

    #[test]
    fn working_hours_fail_fast() {
        for bad in ["9시부터 6시", "오전 9시 ~ 18시", "9시 ~ 18시 75분", "~"] {
            let err = parse_working_hours(bad).unwrap_err();
            assert!(
                matches!(err, InternParseError::InvalidFormat { .. }),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn working_days_split() {
        assert_eq!(parse_working_days(" 월 화  수\t목 금 "), vec!["월", "화", "수", "목", "금"]);
        assert!(parse_working_days("").is_empty());
    }

    #[test]
    fn status_labels() {
        assert_eq!(parse_status("모집중"), PostingStatus::Recruiting);
        assert_eq!(parse_status("모집 마감"), PostingStatus::Closed);
        assert_eq!(parse_status("접수 종료"), PostingStatus::Closed);
        assert_eq!(parse_status("모집 예정"), PostingStatus::Upcoming);
    }
}
