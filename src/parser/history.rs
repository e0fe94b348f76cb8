//! Commit log parser
//!
//! Consumes a log dump where every entry starts with a header line of the form
//! `<hash> <M/D/YYYY h:mm:ss AM|PM> <first description line>`, e.g. produced by
//! `git log --reverse --date="format:%m/%d/%Y %I:%M:%S %p" --pretty="format:%h %ad %B"`.
//! Lines up to the next header belong to the same entry's description.

use std::io::BufRead;
use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;
use tracing::{debug, instrument, trace, warn};

use super::message::parse_commit;
use crate::domain::Commit;
use crate::error::Result;

/// Timestamp layout used in log entry headers
pub const LOG_DATE_FORMAT: &str = "%m/%d/%Y %I:%M:%S %p";

static HISTORY_LINE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<hash>[a-fA-F0-9]+) (?P<date>\d{1,2}/\d{1,2}/\d{4} \d{1,2}:\d{2}:\d{2} [AP]M) (?P<description>.*)$",
    )
    .expect("Invalid regex")
});

/// Log entry being accumulated until the next header line
#[derive(Debug)]
struct LogEntry {
    hash: String,
    date: NaiveDateTime,
    description: String,
}

impl LogEntry {
    fn into_commit(self) -> Option<Commit> {
        match parse_commit(&self.description) {
            Some(commit) => Some(commit.with_hash(self.hash).with_date(Some(self.date))),
            None => {
                debug!(hash = %self.hash, "discarding non-conventional commit");
                None
            }
        }
    }
}

/// Match a log entry header line
fn parse_header_line(line: &str) -> Option<LogEntry> {
    let caps = HISTORY_LINE_REGEX.captures(line)?;
    let raw_date = caps.name("date")?.as_str();

    let date = match NaiveDateTime::parse_from_str(raw_date, LOG_DATE_FORMAT) {
        Ok(date) => date,
        Err(e) => {
            warn!(date = raw_date, error = %e, "log header has an invalid date, treating as text");
            return None;
        }
    };

    Some(LogEntry {
        hash: caps.name("hash")?.as_str().to_string(),
        date,
        description: caps.name("description")?.as_str().to_string(),
    })
}

/// Parse a commit log stream into conventional commits, in log order.
///
/// Entries whose description is not a conventional commit are dropped. Lines
/// before the first header are ignored. Only I/O failures are reported.
#[instrument(skip(reader))]
pub fn parse_commit_history<R: BufRead>(reader: R) -> Result<Vec<Commit>> {
    let mut commits = Vec::new();
    let mut current: Option<LogEntry> = None;

    for line in reader.lines() {
        let line = line?;

        if let Some(entry) = parse_header_line(&line) {
            if let Some(finished) = current.replace(entry) {
                commits.extend(finished.into_commit());
            }
            continue;
        }

        match current.as_mut() {
            Some(entry) => {
                entry.description.push('\n');
                entry.description.push_str(&line);
            }
            None => trace!("skipping line before the first log entry"),
        }
    }

    if let Some(finished) = current.take() {
        commits.extend(finished.into_commit());
    }

    debug!(count = commits.len(), "parsed commit history");
    Ok(commits)
}
