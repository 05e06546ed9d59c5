use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MARKER: &str = "ERROR";

// `YYYY-MM-DD/HH:MM:SS.mmm`; the separator before the millis is any character.
static RE_TIMESTAMP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{4})-(\d{2})-(\d{2})/(\d{2}):(\d{2}):(\d{2}).(\d{3})").unwrap()
});

static RE_TIMESTAMP_AT_START: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}/\d{2}:\d{2}:\d{2}.\d{3}").unwrap()
});

static RE_NUMERIC_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[[0-9]+\]").unwrap());

// Superscript digits and vulgar fractions are numeric, so they count as word
// characters here even though Unicode `\w` leaves them out.
static RE_ILLEGAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s²³¹¼½¾]").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub description: String,
    pub line_number: usize, // 1-based, error-start line
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    MissingTimestamp,
    InvalidTimestamp,
    EmptyDescription,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedLine {
    pub line_number: usize,
    pub reason: SkipReason,
    pub line: String,
}

#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub records: Vec<ErrorRecord>,
    pub skipped: Vec<SkippedLine>,
}

impl Extraction {
    pub fn error_times(&self) -> Vec<NaiveDateTime> {
        self.records.iter().map(|r| r.timestamp).collect()
    }

    pub fn error_descriptions(&self) -> Vec<String> {
        self.records.iter().map(|r| r.description.clone()).collect()
    }
}

pub fn extract_errors<S: AsRef<str>>(lines: &[S]) -> Extraction {
    extract_errors_with_marker(lines, DEFAULT_MARKER)
}

/// Scan `lines` for error blocks. A block starts at a line containing `marker`
/// and runs until the next line that begins with a timestamp.
pub fn extract_errors_with_marker<S: AsRef<str>>(lines: &[S], marker: &str) -> Extraction {
    let mut out = Extraction::default();
    let mut i = 0usize;
    while i < lines.len() {
        let line = lines[i].as_ref();
        let Some(marker_pos) = line.find(marker) else {
            i += 1;
            continue;
        };
        let line_number = i + 1;

        let timestamp = match find_timestamp(line) {
            Ok(ts) => ts,
            Err(reason) => {
                tracing::warn!(line_number, ?reason, "error marker without usable timestamp; skipping line");
                out.skipped.push(SkippedLine { line_number, reason, line: line.to_string() });
                i += 1;
                continue;
            }
        };

        let header = line[marker_pos + marker.len()..].trim();
        let mut description = RE_NUMERIC_TAG.replace_all(header, "").into_owned();

        i += 1;
        while i < lines.len() && !starts_with_timestamp(lines[i].as_ref()) {
            description.push('\n');
            description.push_str(lines[i].as_ref().trim());
            i += 1;
        }

        let description = sanitize(&description);
        if description.trim().is_empty() {
            tracing::warn!(line_number, "error block has an empty description; dropping it");
            out.skipped.push(SkippedLine {
                line_number,
                reason: SkipReason::EmptyDescription,
                line: line.to_string(),
            });
            continue;
        }

        out.records.push(ErrorRecord { timestamp, description, line_number });
    }
    tracing::debug!(records = out.records.len(), skipped = out.skipped.len(), "extraction finished");
    out
}

pub fn starts_with_timestamp(line: &str) -> bool {
    RE_TIMESTAMP_AT_START.is_match(line)
}

/// First `YYYY-MM-DD/HH:MM:SS.mmm` occurrence in `line`, validated as a real
/// calendar date and time of day.
pub fn find_timestamp(line: &str) -> Result<NaiveDateTime, SkipReason> {
    let caps = RE_TIMESTAMP.captures(line).ok_or(SkipReason::MissingTimestamp)?;
    let num = |idx: usize| caps[idx].parse::<u32>().map_err(|_| SkipReason::InvalidTimestamp);
    let year = caps[1].parse::<i32>().map_err(|_| SkipReason::InvalidTimestamp)?;
    let date = NaiveDate::from_ymd_opt(year, num(2)?, num(3)?).ok_or(SkipReason::InvalidTimestamp)?;
    let time = NaiveTime::from_hms_milli_opt(num(4)?, num(5)?, num(6)?, num(7)?)
        .ok_or(SkipReason::InvalidTimestamp)?;
    Ok(NaiveDateTime::new(date, time))
}

/// `0x01` becomes its hex spelling; every other non-word, non-space
/// character becomes a single space.
pub fn sanitize(description: &str) -> String {
    let escaped = description.replace('\x01', &format!("{:#x}", 0x01));
    RE_ILLEGAL.replace_all(&escaped, " ").into_owned()
}
