//! JSON Lines batch extraction.
//!
//! Each non-empty input line is one `{id, kind, text}` record. Records run on
//! tokio's blocking pool, at most `concurrency` at a time, and results come
//! back in input order. A bad record yields an error entry for its line and
//! never stops the batch.

use std::sync::Arc;

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::Semaphore;
use tokio::task::JoinError;
use tracing::{debug, warn};

use internparse_extract::{FieldKind, extract_field};
use internparse_matcher::MajorMatcher;
use internparse_shared::{BatchConfig, InternParseError, PostingId, is_blank_value};

#[derive(Debug, Deserialize)]
struct BatchRecord {
    id: Value,
    kind: FieldKind,
    #[serde(default)]
    text: String,
}

/// Result for one input line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct BatchOutput {
    /// 1-based line number in the input.
    pub line: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<PostingId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<FieldKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub skipped: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchOutput {
    fn new(line: usize) -> Self {
        Self {
            line,
            id: None,
            kind: None,
            value: None,
            skipped: false,
            error: None,
        }
    }

    fn failed(mut self, error: impl ToString) -> Self {
        self.error = Some(error.to_string());
        self
    }
}

/// Outcome counts over a finished batch.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct Summary {
    pub ok: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl Summary {
    pub fn of(outputs: &[BatchOutput]) -> Self {
        let mut summary = Self::default();
        for output in outputs {
            if output.error.is_some() {
                summary.failed += 1;
            } else if output.skipped {
                summary.skipped += 1;
            } else {
                summary.ok += 1;
            }
        }
        summary
    }
}

// ---------------------------------------------------------------------------
// Processing
// ---------------------------------------------------------------------------

/// Process every record of a JSON Lines document.
pub(crate) async fn run_batch(
    input: &str,
    matcher: &MajorMatcher,
    config: &BatchConfig,
) -> Vec<BatchOutput> {
    let lines: Vec<(usize, String)> = input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| (idx + 1, line.to_string()))
        .collect();

    debug!(records = lines.len(), concurrency = config.concurrency, "starting batch");

    let progress = progress_bar(lines.len() as u64);
    let semaphore = Arc::new(Semaphore::new(config.concurrency.max(1)));
    let mut handles = Vec::with_capacity(lines.len());

    for (line_no, line) in lines {
        let matcher = matcher.clone();
        let semaphore = Arc::clone(&semaphore);
        let progress = progress.clone();

        let handle = tokio::spawn(async move {
            let _permit = match semaphore.acquire_owned().await {
                Ok(permit) => permit,
                Err(e) => return BatchOutput::new(line_no).failed(e),
            };
            let joined =
                tokio::task::spawn_blocking(move || process_line(line_no, &line, &matcher))
                    .await;
            progress.inc(1);
            settle(line_no, joined)
        });
        handles.push((line_no, handle));
    }

    let mut outputs = Vec::with_capacity(handles.len());
    for (line_no, handle) in handles {
        outputs.push(settle(line_no, handle.await));
    }

    progress.finish_and_clear();
    outputs
}

/// A worker that panicked or was cancelled becomes an error entry for its line.
fn settle(line_no: usize, joined: std::result::Result<BatchOutput, JoinError>) -> BatchOutput {
    joined.unwrap_or_else(|e| {
        warn!(line = line_no, error = %e, "batch worker failed");
        BatchOutput::new(line_no).failed(format!("worker failed: {e}"))
    })
}

/// Parse and extract one record. Never fails; problems land in `error`.
fn process_line(line_no: usize, line: &str, matcher: &MajorMatcher) -> BatchOutput {
    let output = BatchOutput::new(line_no);

    let record: BatchRecord = match serde_json::from_str(line) {
        Ok(record) => record,
        Err(e) => {
            warn!(line = line_no, error = %e, "malformed batch record");
            return output.failed(format!("malformed record: {e}"));
        }
    };

    let mut output = BatchOutput {
        kind: Some(record.kind),
        ..output
    };

    match posting_id(&record.id) {
        Ok(id) => output.id = Some(id),
        Err(e) => {
            warn!(line = line_no, error = %e, "rejected batch record");
            return output.failed(e);
        }
    }

    if is_blank_value(&record.text) {
        output.skipped = true;
        return output;
    }

    match extract_field(record.kind, &record.text, matcher) {
        Ok(value) => output.value = Some(value),
        Err(e) => {
            warn!(line = line_no, kind = %record.kind, error = %e, "extraction failed");
            return output.failed(e);
        }
    }
    output
}

/// Ids arrive as JSON numbers or numeric strings.
fn posting_id(raw: &Value) -> std::result::Result<PostingId, InternParseError> {
    match raw {
        Value::Number(n) => n
            .as_u64()
            .map(PostingId)
            .ok_or_else(|| InternParseError::invalid_identifier(n.to_string())),
        Value::String(s) => s.parse(),
        other => Err(InternParseError::invalid_identifier(other.to_string())),
    }
}

fn progress_bar(len: u64) -> ProgressBar {
    let bar = ProgressBar::new(len);
    let style = ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} records ({eta})")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    bar.set_style(style);
    bar
}
