//! Per-document highlight state — the on/off switch for aging colors.
//!
//! The tracker remembers, for every document that currently shows aging
//! colors, the handles its [`LineHighlighter`] returned while painting.
//! Toggling a painted document removes exactly those handles; toggling an
//! unpainted one computes colors and paints every line.
//!
//! Painting is all-or-nothing: colors are computed in full before the sink
//! is touched, so a failed computation leaves the document unmodified.

use std::collections::HashMap;
use std::hash::Hash;

use codeage_term::color::Hsb;

// ---------------------------------------------------------------------------
// LineHighlighter
// ---------------------------------------------------------------------------

/// A rendering sink that can paint and unpaint single lines.
pub trait LineHighlighter {
    /// Identifies one painted line so it can be removed later.
    type Handle;

    /// Paint `line` with `color` and return a handle for removal.
    fn add_line_color(&mut self, line: usize, color: Hsb) -> Self::Handle;

    /// Remove a previously painted line.
    fn remove_highlight(&mut self, handle: Self::Handle);
}

// ---------------------------------------------------------------------------
// Toggled
// ---------------------------------------------------------------------------

/// What a [`HighlightTracker::toggle`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggled {
    /// Colors were painted on this many lines.
    Applied(usize),
    /// This many painted lines were removed.
    Removed(usize),
}

// ---------------------------------------------------------------------------
// HighlightTracker
// ---------------------------------------------------------------------------

/// Which documents are painted, and with which handles.
///
/// `K` is a stable document identity (a path, a buffer id). `H` is the
/// sink's handle type.
#[derive(Debug)]
pub struct HighlightTracker<K, H> {
    active: HashMap<K, Vec<H>>,
}

impl<K, H> Default for HighlightTracker<K, H> {
    fn default() -> Self {
        Self {
            active: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash, H> HighlightTracker<K, H> {
    /// Create a tracker with no painted documents.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `doc` currently shows aging colors.
    #[must_use]
    pub fn is_active(&self, doc: &K) -> bool {
        self.active.contains_key(doc)
    }

    /// Number of documents currently painted.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Paint `colors` (line `i` gets `colors[i]`) onto `doc`.
    ///
    /// Returns the number of painted lines, or `None` without touching the
    /// sink when `doc` is already painted.
    pub fn apply<S>(&mut self, doc: K, sink: &mut S, colors: &[Hsb]) -> Option<usize>
    where
        S: LineHighlighter<Handle = H>,
    {
        if self.active.contains_key(&doc) {
            return None;
        }
        let handles: Vec<H> = colors
            .iter()
            .enumerate()
            .map(|(line, &color)| sink.add_line_color(line, color))
            .collect();
        let painted = handles.len();
        self.active.insert(doc, handles);
        Some(painted)
    }

    /// Remove every line painted on `doc`.
    ///
    /// Returns the number of removed lines, or `None` when `doc` was not
    /// painted.
    pub fn remove<S>(&mut self, doc: &K, sink: &mut S) -> Option<usize>
    where
        S: LineHighlighter<Handle = H>,
    {
        let handles = self.active.remove(doc)?;
        let removed = handles.len();
        for handle in handles {
            sink.remove_highlight(handle);
        }
        Some(removed)
    }

    /// Flip `doc` between painted and unpainted.
    ///
    /// `compute` runs only when painting. If it fails, the error is
    /// returned and neither the sink nor the tracker changes.
    ///
    /// # Errors
    ///
    /// Whatever `compute` returns.
    pub fn toggle<S, E, F>(&mut self, doc: K, sink: &mut S, compute: F) -> Result<Toggled, E>
    where
        S: LineHighlighter<Handle = H>,
        F: FnOnce() -> Result<Vec<Hsb>, E>,
    {
        if let Some(removed) = self.remove(&doc, sink) {
            return Ok(Toggled::Removed(removed));
        }
        let colors = compute()?;
        let painted = self.apply(doc, sink, &colors).unwrap_or_default();
        Ok(Toggled::Applied(painted))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
