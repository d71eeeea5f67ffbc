//! Working-tree → committed line mapping from `git diff -U0`.
//!
//! With zero context lines every hunk header describes exactly one changed
//! region:
//!
//! ```text
//! @@ -<old_start>[,<old_count>] +<new_start>[,<new_count>] @@
//! ```
//!
//! A missing count means 1. A zero count marks a pure insertion (old side)
//! or pure deletion (new side); the start then names the line *before* the
//! change. Lines outside every hunk are unchanged and shift by the net
//! number of lines added above them. Lines inside a hunk's new range have
//! no committed counterpart.

use codeage_core::LineMapping;

use crate::Result;
use crate::error::BlameError;

const FORMAT: &str = "diff";

/// One `@@` hunk header. Line numbers are 1-based, as `git` prints them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hunk {
    pub old_start: usize,
    pub old_count: usize,
    pub new_start: usize,
    pub new_count: usize,
}

impl Hunk {
    /// First new-side line after this hunk that is unchanged.
    const fn end_of_new(&self) -> usize {
        if self.new_count == 0 {
            self.new_start + 1
        } else {
            self.new_start + self.new_count
        }
    }

    /// First new-side line this hunk can affect.
    const fn start_of_new(&self) -> usize {
        if self.new_count == 0 {
            self.new_start + 1
        } else {
            self.new_start
        }
    }
}

/// Maps 0-based working-tree lines to 0-based lines of a revision.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineNumberMap {
    hunks: Vec<Hunk>,
}

impl LineNumberMap {
    /// No changes: every line maps to itself.
    #[must_use]
    pub const fn identity() -> Self {
        Self { hunks: Vec::new() }
    }

    /// Build from hunks in any order.
    #[must_use]
    pub fn from_hunks(mut hunks: Vec<Hunk>) -> Self {
        hunks.sort_unstable_by_key(|h| h.new_start);
        Self { hunks }
    }

    /// Parse the hunk headers of a unified diff for a single file.
    ///
    /// Everything that is not a `@@` header (file headers, removed and added
    /// lines) is skipped.
    ///
    /// # Errors
    ///
    /// [`BlameError::Malformed`] for an `@@` line that does not parse.
    pub fn from_unified_diff(diff: &str) -> Result<Self> {
        let hunks = diff
            .lines()
            .enumerate()
            .filter(|(_, line)| line.starts_with("@@"))
            .map(|(idx, line)| parse_hunk_header(line, idx + 1))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_hunks(hunks))
    }

    /// The parsed hunks, sorted by new-side start.
    #[must_use]
    pub fn hunks(&self) -> &[Hunk] {
        &self.hunks
    }
}

impl LineMapping for LineNumberMap {
    fn committed_line(&self, current_line: usize) -> Option<usize> {
        let line = current_line + 1;
        let mut removed = 0;
        let mut added = 0;

        for hunk in &self.hunks {
            if line < hunk.start_of_new() {
                break;
            }
            if line < hunk.end_of_new() && hunk.new_count > 0 {
                return None;
            }
            removed += hunk.old_count;
            added += hunk.new_count;
        }

        (line + removed).checked_sub(added + 1)
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

fn parse_hunk_header(line: &str, lineno: usize) -> Result<Hunk> {
    let bad = || BlameError::malformed(FORMAT, lineno, format!("bad hunk header {line:?}"));

    let ranges = line
        .strip_prefix("@@ ")
        .and_then(|rest| rest.split_once(" @@"))
        .map(|(ranges, _)| ranges)
        .ok_or_else(bad)?;
    let (old, new) = ranges.split_once(' ').ok_or_else(bad)?;
    let (old_start, old_count) = old.strip_prefix('-').and_then(parse_range).ok_or_else(bad)?;
    let (new_start, new_count) = new.strip_prefix('+').and_then(parse_range).ok_or_else(bad)?;

    Ok(Hunk {
        old_start,
        old_count,
        new_start,
        new_count,
    })
}

/// `start[,count]`, count defaulting to 1.
fn parse_range(range: &str) -> Option<(usize, usize)> {
    match range.split_once(',') {
        Some((start, count)) => Some((start.parse().ok()?, count.parse().ok()?)),
        None => Some((range.parse().ok()?, 1)),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn map(diff: &str) -> LineNumberMap {
        LineNumberMap::from_unified_diff(diff).unwrap()
    }

    fn mapped(m: &LineNumberMap, lines: usize) -> Vec<Option<usize>> {
        (0..lines).map(|l| m.committed_line(l)).collect()
    }

    #[test]
    fn identity_maps_every_line_to_itself() {
        let m = LineNumberMap::identity();
        assert_eq!(mapped(&m, 3), vec![Some(0), Some(1), Some(2)]);
    }

    #[test]
    fn parses_headers_and_skips_bodies() {
        let diff = "\
diff --git a/src/lib.rs b/src/lib.rs
index 1111111..2222222 100644
--- a/src/lib.rs
+++ b/src/lib.rs
@@ -3 +3,2 @@ fn main() {
-old
+new
+newer
@@ -10,0 +12 @@
+appended
";
        assert_eq!(
            map(diff).hunks(),
            &[
                Hunk { old_start: 3, old_count: 1, new_start: 3, new_count: 2 },
                Hunk { old_start: 10, old_count: 0, new_start: 12, new_count: 1 },
            ]
        );
    }

    #[test]
    fn deletion_shifts_following_lines_down() {
        // Committed lines 5-6 deleted; working line 4 is the line before.
        let m = map("@@ -5,2 +4,0 @@\n");
        assert_eq!(
            mapped(&m, 6),
            vec![Some(0), Some(1), Some(2), Some(3), Some(6), Some(7)]
        );
    }

    #[test]
    fn insertion_has_no_committed_line() {
        // Two lines inserted after committed line 3.
        let m = map("@@ -3,0 +4,2 @@\n");
        assert_eq!(
            mapped(&m, 6),
            vec![Some(0), Some(1), Some(2), None, None, Some(3)]
        );
    }

    #[test]
    fn replacement_is_uncommitted() {
        // Committed line 3 replaced by two lines.
        let m = map("@@ -3 +3,2 @@\n");
        assert_eq!(
            mapped(&m, 5),
            vec![Some(0), Some(1), None, None, Some(3)]
        );
    }

    #[test]
    fn deletion_at_start_of_file() {
        let m = map("@@ -1,2 +0,0 @@\n");
        assert_eq!(mapped(&m, 2), vec![Some(2), Some(3)]);
    }

    #[test]
    fn insertion_at_start_of_file() {
        let m = map("@@ -0,0 +1,2 @@\n");
        assert_eq!(mapped(&m, 3), vec![None, None, Some(0)]);
    }

    #[test]
    fn hunks_accumulate() {
        let m = map("@@ -2,0 +3 @@\n@@ -6,2 +6,0 @@\n");
        // One line inserted at 2, committed 5 and 6 deleted after line 5.
        assert_eq!(
            mapped(&m, 8),
            vec![Some(0), Some(1), None, Some(2), Some(3), Some(4), Some(7), Some(8)]
        );
    }

    #[test]
    fn hunks_are_sorted() {
        let m = LineNumberMap::from_hunks(vec![
            Hunk { old_start: 9, old_count: 1, new_start: 9, new_count: 1 },
            Hunk { old_start: 1, old_count: 1, new_start: 1, new_count: 1 },
        ]);
        assert_eq!(m.hunks()[0].new_start, 1);
    }

    #[test]
    fn empty_diff_is_identity() {
        assert_eq!(map(""), LineNumberMap::identity());
    }

    #[test]
    fn rejects_malformed_header() {
        let err = LineNumberMap::from_unified_diff("--- a\n@@ -x +1 @@\n").unwrap_err();
        assert!(matches!(err, BlameError::Malformed { line: 2, .. }), "got {err:?}");
    }

    #[test]
    fn rejects_unterminated_header() {
        let err = LineNumberMap::from_unified_diff("@@ -1 +1\n").unwrap_err();
        assert!(matches!(err, BlameError::Malformed { line: 1, .. }), "got {err:?}");
    }
}
