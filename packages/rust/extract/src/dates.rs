//! Rewrites dotted dates into `YYYY-MM-DD`, resolving year-elided dates
//! from context carried across fields.
//!
//! Recognized forms (after whitespace around dots between digits is collapsed):
//! - full date `YY.M.D` / `YYYY.MM.DD`, optionally led by `~`
//! - partial date `MM.DD`, rewritten only once a year is known
//!
//! Dates are looked for inside each run of dot-joined numbers, one position
//! at a time, so a leading item number (`1.2023.06.01`) does not hide the
//! date after it.
//!
//! The "last known year" lives in a [`DateScan`] created per call, so the
//! normalizer is safe to run on many records concurrently. Field order
//! matters: a partial date only sees years from earlier fields or earlier
//! in the same field.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::{Map, Value};
use tracing::trace;

use crate::sections::SectionMap;

static DOT_SPACING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\.\s*").expect("dot spacing regex"));

/// A run of dot-joined digit groups, optionally led by `~`.
static NUMBER_CHAIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(~\s*)?\d+(?:\.\d+)*").expect("number chain regex"));

/// Scan state for one normalization call.
#[derive(Debug, Default)]
pub struct DateScan {
    last_year: Option<u32>,
}

impl DateScan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Year of the most recent full date seen in this scan.
    pub fn last_year(&self) -> Option<u32> {
        self.last_year
    }

    /// Collapse dot spacing, trim, and rewrite every date in `text`, left to right.
    pub fn standardize(&mut self, text: &str) -> String {
        let collapsed = collapse_dot_spacing(text);
        NUMBER_CHAIN_RE
            .replace_all(&collapsed, |caps: &Captures| self.rewrite_chain(caps))
            .into_owned()
    }

    fn rewrite_chain(&mut self, caps: &Captures) -> String {
        let whole = &caps[0];
        let lead = caps.get(1).map_or("", |m| m.as_str());
        let groups: Vec<&str> = whole[lead.len()..].split('.').collect();

        let mut pieces = Vec::with_capacity(groups.len());
        let mut idx = 0;
        while idx < groups.len() {
            let lead = if idx == 0 { lead } else { "" };
            let rest = &groups[idx..];

            if let Some(date) = self.full_date(rest) {
                let tilde = if lead.is_empty() { "" } else { "~" };
                pieces.push(format!("{tilde}{date}"));
                idx += 3;
            } else if let Some(date) = self.partial_date(rest) {
                pieces.push(format!("{lead}{date}"));
                idx += 2;
            } else {
                pieces.push(format!("{lead}{}", rest[0]));
                idx += 1;
            }
        }

        let rewritten = pieces.join(".");
        if rewritten != whole {
            trace!(from = whole, to = %rewritten, "date rewritten");
        }
        rewritten
    }

    /// `Y.M.D` at the head of `groups`. Records the year on success.
    fn full_date(&mut self, groups: &[&str]) -> Option<String> {
        let [year, month, day, ..] = groups else {
            return None;
        };
        let year = expand_year(year)?;
        let month = calendar_part(month, 12)?;
        let day = calendar_part(day, 31)?;

        self.last_year = Some(year);
        Some(format!("{year:04}-{month:02}-{day:02}"))
    }

    /// `MM.DD` at the head of `groups`, dated with the last known year.
    fn partial_date(&self, groups: &[&str]) -> Option<String> {
        let [month, day, ..] = groups else {
            return None;
        };
        if month.len() != 2 || day.len() != 2 {
            return None;
        }
        let year = self.last_year?;
        let month = calendar_part(month, 12)?;
        let day = calendar_part(day, 31)?;
        Some(format!("{year:04}-{month:02}-{day:02}"))
    }
}

/// Standardize every value in iteration order, sharing one scan across them.
pub fn standardize_dates<'a, I>(values: I)
where
    I: IntoIterator<Item = &'a mut String>,
{
    let mut scan = DateScan::new();
    for value in values {
        *value = scan.standardize(value);
    }
}

/// Standardize the dates in a section map, in section order.
pub fn standardize_section_dates(sections: &mut SectionMap) {
    standardize_dates(sections.values_mut());
}

/// Standardize the string values of a JSON object, in key order. Other values are untouched.
pub fn standardize_record_dates(record: &mut Map<String, Value>) {
    standardize_dates(record.values_mut().filter_map(|value| match value {
        Value::String(s) => Some(s),
        _ => None,
    }));
}

/// Collapse whitespace around dots that sit between digits, then trim.
fn collapse_dot_spacing(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for m in DOT_SPACING_RE.find_iter(text) {
        let before = text[..m.start()].chars().next_back();
        let after = text[m.end()..].chars().next();
        let between_digits = before.is_some_and(|c| c.is_ascii_digit())
            && after.is_some_and(|c| c.is_ascii_digit());

        out.push_str(&text[last..m.start()]);
        out.push_str(if between_digits { "." } else { m.as_str() });
        last = m.end();
    }
    out.push_str(&text[last..]);

    out.trim().to_string()
}

/// Two-digit years are 20YY; four-digit years pass through.
fn expand_year(digits: &str) -> Option<u32> {
    let value: u32 = digits.parse().ok()?;
    match digits.len() {
        2 => Some(2000 + value),
        4 => Some(value),
        _ => None,
    }
}

/// A one- or two-digit month or day within `1..=max`.
fn calendar_part(digits: &str, max: u32) -> Option<u32> {
    if digits.len() > 2 {
        return None;
    }
    let value: u32 = digits.parse().ok()?;
    (1..=max).contains(&value).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section_map(pairs: &[(&str, &str)]) -> SectionMap {
        pairs.iter().copied().collect()
    }

    #[test]
    fn full_dates_rewritten() {
        let mut scan = DateScan::new();
        assert_eq!(scan.standardize("2023.01.02"), "2023-01-02");
        assert_eq!(scan.standardize("23.3.4 마감"), "2023-03-04 마감");
        assert_eq!(scan.last_year(), Some(2023));
    }

    #[test]
    fn spacing_around_dots_collapsed() {
        let mut scan = DateScan::new();
        assert_eq!(scan.standardize("  2023 . 01 . 02 "), "2023-01-02");
        assert_eq!(scan.standardize("2024. 3. 15."), "2024-03-15.");
    }

    #[test]
    fn tilde_dates_rewritten() {
        let mut scan = DateScan::new();
        assert_eq!(scan.standardize("~ 2023.05.31"), "~2023-05-31");
        assert_eq!(scan.last_year(), Some(2023));
    }

    #[test]
    fn range_with_partial_end_uses_start_year() {
        let mut scan = DateScan::new();
        assert_eq!(
            scan.standardize("2023. 03. 01 ~ 03. 10"),
            "2023-03-01 ~ 2023-03-10"
        );
    }

    #[test]
    fn leading_item_number_does_not_hide_date() {
        let mut scan = DateScan::new();
        assert_eq!(
            scan.standardize("1. 2023.06.01 서류 마감"),
            "1.2023-06-01 서류 마감"
        );
        assert_eq!(scan.last_year(), Some(2023));
        assert_eq!(scan.standardize("06.14"), "2023-06-14");

        let mut scan = DateScan::new();
        assert_eq!(scan.standardize("제출 2.2023.06.01"), "제출 2.2023-06-01");
    }

    #[test]
    fn trailing_group_after_date_kept() {
        let mut scan = DateScan::new();
        assert_eq!(scan.standardize("2023.06.01.3"), "2023-06-01.3");
    }

    #[test]
    fn partial_without_year_left_alone() {
        let mut scan = DateScan::new();
        assert_eq!(scan.standardize("01.02"), "01.02");
    }

    #[test]
    fn year_context_follows_field_order() {
        let mut forward = section_map(&[("a", "01.02"), ("b", "2023.03.04")]);
        standardize_section_dates(&mut forward);
        assert_eq!(forward.get("a"), Some("01.02"));
        assert_eq!(forward.get("b"), Some("2023-03-04"));

        let mut reverse = section_map(&[("b", "2023.03.04"), ("a", "01.02")]);
        standardize_section_dates(&mut reverse);
        assert_eq!(reverse.get("a"), Some("2023-01-02"));
        assert_eq!(reverse.get("b"), Some("2023-03-04"));
    }

    #[test]
    fn year_context_not_shared_between_calls() {
        let mut first = section_map(&[("a", "2022.12.01")]);
        standardize_section_dates(&mut first);
        let mut second = section_map(&[("a", "12.05")]);
        standardize_section_dates(&mut second);
        assert_eq!(second.get("a"), Some("12.05"));
    }

    #[test]
    fn idempotent() {
        let mut once = section_map(&[
            ("period", "03.01 ~ 2023. 03. 10"),
            ("announce", "03.20 예정, ~23.04.01"),
            ("note", "학점 3.5 이상"),
        ]);
        standardize_section_dates(&mut once);
        let mut twice = once.clone();
        standardize_section_dates(&mut twice);
        assert_eq!(once, twice);
        assert_eq!(once.get("period"), Some("03.01 ~2023-03-10"));
        assert_eq!(once.get("announce"), Some("2023-03-20 예정, ~2023-04-01"));
        assert_eq!(once.get("note"), Some("학점 3.5 이상"));
    }

    #[test]
    fn implausible_dates_untouched() {
        let mut scan = DateScan::new();
        assert_eq!(scan.standardize("2023.13.01"), "2023.13.01");
        assert_eq!(scan.standardize("123.01.02"), "123.01.02");
        assert_eq!(scan.last_year(), None);
        assert_eq!(scan.standardize("평점 4.50"), "평점 4.50");
    }

    #[test]
    fn record_dates_skip_non_strings() {
        let mut record: Map<String, Value> = serde_json::from_str(
            r#"{"start": "2023.07.01", "count": 3, "end": "08.31"}"#,
        )
        .expect("json");
        standardize_record_dates(&mut record);
        assert_eq!(record["start"], "2023-07-01");
        assert_eq!(record["count"], 3);
        assert_eq!(record["end"], "2023-08-31");
    }
}
