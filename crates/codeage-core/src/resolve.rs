//! Line date resolution — one date per visible line.
//!
//! A visible line is first mapped to its line number in the last committed
//! revision, then that committed line is looked up in the blame annotation.
//! Lines with no committed counterpart (uncommitted edits) and committed
//! lines the annotation has no date for both resolve to "now".
//!
//! "Now" is a single value per resolution pass. Every unresolved line gets
//! the bit-identical timestamp, so they group together as the newest
//! generation and compare equal in exact-date lookups.

use std::time::SystemTime;

/// The date a line's content was last changed.
pub type LineDate = SystemTime;

// ---------------------------------------------------------------------------
// Collaborator seams
// ---------------------------------------------------------------------------

/// Maps a line of the current document to its line in the last committed
/// revision.
pub trait LineMapping {
    /// The committed line number for `current_line`, or `None` when the
    /// line was introduced by an uncommitted edit.
    fn committed_line(&self, current_line: usize) -> Option<usize>;
}

/// Per-line blame dates for the last committed revision.
pub trait Annotation {
    /// The date `committed_line` was last changed, if known.
    fn line_date(&self, committed_line: usize) -> Option<LineDate>;
}

impl<F> LineMapping for F
where
    F: Fn(usize) -> Option<usize>,
{
    fn committed_line(&self, current_line: usize) -> Option<usize> {
        self(current_line)
    }
}

impl<F> Annotation for F
where
    F: Fn(usize) -> Option<LineDate>,
{
    fn line_date(&self, committed_line: usize) -> Option<LineDate> {
        self(committed_line)
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Resolve a date for every line in `[0, num_lines)`.
///
/// Captures the system clock once and delegates to
/// [`resolve_line_dates_at`].
#[must_use]
pub fn resolve_line_dates(
    num_lines: usize,
    mapping: &impl LineMapping,
    annotation: &impl Annotation,
) -> Vec<LineDate> {
    resolve_line_dates_at(SystemTime::now(), num_lines, mapping, annotation)
}

/// Resolve a date for every line in `[0, num_lines)`, using `now` for
/// every line that has no committed date.
#[must_use]
pub fn resolve_line_dates_at(
    now: LineDate,
    num_lines: usize,
    mapping: &impl LineMapping,
    annotation: &impl Annotation,
) -> Vec<LineDate> {
    (0..num_lines)
        .map(|line| {
            mapping
                .committed_line(line)
                .and_then(|committed| annotation.line_date(committed))
                .unwrap_or(now)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
