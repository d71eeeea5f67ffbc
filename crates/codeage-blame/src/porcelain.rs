//! `git blame --porcelain` parsing.
//!
//! Porcelain output is a sequence of entries, one per line of the blamed
//! file:
//!
//! ```text
//! <commit> <orig-line> <final-line> [<group-size>]
//! author A U Thor            ┐
//! author-time 1700000000     │ only the first time
//! ...                        │ <commit> appears
//! filename src/lib.rs        ┘
//! \t<line content>
//! ```
//!
//! Commit metadata is printed once per commit, so later entries for the
//! same commit are resolved from a cache. The all-zero commit marks lines
//! that are not committed yet; they get no date.

use std::collections::HashMap;
use std::time::{Duration, SystemTime};

use codeage_core::{Annotation, LineDate};

use crate::Result;
use crate::error::BlameError;

const FORMAT: &str = "blame porcelain";

/// Per-line author dates for one revision of a file.
///
/// Indexed by 0-based line number in that revision.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlameAnnotation {
    dates: Vec<Option<LineDate>>,
}

impl BlameAnnotation {
    /// Parse the full output of `git blame --porcelain`.
    ///
    /// # Errors
    ///
    /// [`BlameError::Malformed`] for a bad header, an unparsable
    /// `author-time`, or content with no preceding header.
    pub fn from_porcelain(output: &str) -> Result<Self> {
        let mut author_times: HashMap<&str, LineDate> = HashMap::new();
        let mut dates: Vec<Option<LineDate>> = Vec::new();
        // Commit and 1-based final line of the entry being read.
        let mut entry: Option<(&str, usize)> = None;
        // Every final line has its own content line, so none can exceed this.
        let max_line = output.lines().count();

        for (idx, line) in output.lines().enumerate() {
            let lineno = idx + 1;

            if line.starts_with('\t') {
                let (commit, final_line) = entry
                    .take()
                    .ok_or_else(|| BlameError::malformed(FORMAT, lineno, "content without header"))?;
                let date = if is_uncommitted(commit) {
                    None
                } else {
                    author_times.get(commit).copied()
                };
                let slot = final_line - 1;
                if dates.len() <= slot {
                    dates.resize(slot + 1, None);
                }
                dates[slot] = date;
                continue;
            }

            match entry {
                None => entry = Some(parse_header(line, lineno, max_line)?),
                Some((commit, _)) => {
                    if let Some(secs) = line.strip_prefix("author-time ") {
                        let secs: i64 = secs.trim().parse().map_err(|_| {
                            BlameError::malformed(FORMAT, lineno, format!("bad author-time {secs:?}"))
                        })?;
                        author_times.insert(commit, from_unix(secs));
                    }
                }
            }
        }

        if let Some((commit, final_line)) = entry {
            return Err(BlameError::malformed(
                FORMAT,
                max_line,
                format!("entry for {commit} line {final_line} has no content"),
            ));
        }

        Ok(Self { dates })
    }

    /// Build an annotation directly from per-line dates.
    #[must_use]
    pub const fn from_dates(dates: Vec<Option<LineDate>>) -> Self {
        Self { dates }
    }

    /// Number of annotated lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether no line is annotated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

impl Annotation for BlameAnnotation {
    fn line_date(&self, committed_line: usize) -> Option<LineDate> {
        self.dates.get(committed_line).copied().flatten()
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse `<commit> <orig-line> <final-line> [<group-size>]`.
///
/// `final-line` must be in `1..=max_line`.
fn parse_header(line: &str, lineno: usize, max_line: usize) -> Result<(&str, usize)> {
    let mut fields = line.split_ascii_whitespace();
    let commit = fields
        .next()
        .filter(|c| is_object_id(c))
        .ok_or_else(|| BlameError::malformed(FORMAT, lineno, format!("bad header {line:?}")))?;
    let final_line = fields
        .nth(1)
        .and_then(|n| n.parse::<usize>().ok())
        .filter(|&n| (1..=max_line).contains(&n))
        .ok_or_else(|| BlameError::malformed(FORMAT, lineno, format!("bad line number in {line:?}")))?;
    Ok((commit, final_line))
}

/// SHA-1 or SHA-256 hex object id.
fn is_object_id(s: &str) -> bool {
    matches!(s.len(), 40 | 64) && s.bytes().all(|b| b.is_ascii_hexdigit())
}

fn is_uncommitted(commit: &str) -> bool {
    commit.bytes().all(|b| b == b'0')
}

fn from_unix(secs: i64) -> LineDate {
    let offset = Duration::from_secs(secs.unsigned_abs());
    if secs >= 0 {
        SystemTime::UNIX_EPOCH + offset
    } else {
        SystemTime::UNIX_EPOCH - offset
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
