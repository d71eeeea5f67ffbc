//! Date normalization — from per-line dates to coefficients in [0, 1].
//!
//! Two independent strategies, selected with [`Normalizer`]:
//!
//! - **Age** measures elapsed time. Each line's age is its distance from the
//!   newest line, divided by the largest age. The newest lines get 0, the
//!   oldest get 1, and everything in between is proportional to time.
//! - **Generation** measures revision rank. Distinct dates are sorted oldest
//!   first and spaced evenly over [0, 1], regardless of how much time
//!   separates them. The oldest generation gets 0, the newest gets 1.
//!
//! The two disagree on the degenerate case where every line shares one
//! date: age yields 1.0 everywhere, generation yields 0.0 everywhere. Both
//! policies are kept as-is since callers can observe the difference.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::resolve::LineDate;

// ---------------------------------------------------------------------------
// Normalizer
// ---------------------------------------------------------------------------

/// Which statistical model turns dates into coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Normalizer {
    /// Linear in elapsed time. See [`normalize_by_age`].
    Age,
    /// Linear in revision rank. See [`normalize_by_generation`].
    #[default]
    Generation,
}

impl Normalizer {
    /// All strategies, in display order.
    pub const ALL: [Self; 2] = [Self::Age, Self::Generation];

    /// Compute one coefficient per date, preserving order.
    #[must_use]
    pub fn normalize(self, dates: &[LineDate]) -> Vec<f32> {
        match self {
            Self::Age => normalize_by_age(dates),
            Self::Generation => normalize_by_generation(dates),
        }
    }

    /// The configuration name of this strategy.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Age => "age",
            Self::Generation => "generation",
        }
    }
}

impl fmt::Display for Normalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a string names no known [`Normalizer`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown normalizer {0:?} (expected \"age\" or \"generation\")")]
pub struct UnknownNormalizer(pub String);

impl FromStr for Normalizer {
    type Err = UnknownNormalizer;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|n| n.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownNormalizer(s.to_owned()))
    }
}

// ---------------------------------------------------------------------------
// Age
// ---------------------------------------------------------------------------

/// Normalize by elapsed time relative to the newest line.
///
/// `coefficient = (newest - date) / (newest - oldest)`, or 1.0 for every
/// line when all dates are equal. Empty input gives empty output.
#[must_use]
pub fn normalize_by_age(dates: &[LineDate]) -> Vec<f32> {
    let Some(&newest) = dates.iter().max() else {
        return Vec::new();
    };

    let ages: Vec<Duration> = dates
        .iter()
        .map(|&date| newest.duration_since(date).unwrap_or_default())
        .collect();

    let max_age = ages.iter().copied().max().unwrap_or_default();
    if max_age.is_zero() {
        return vec![1.0; dates.len()];
    }

    let max_secs = max_age.as_secs_f64();
    ages.iter()
        .map(|age| (age.as_secs_f64() / max_secs) as f32)
        .collect()
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Normalize by rank among the distinct dates.
///
/// The `k`-th oldest distinct date (0-indexed) maps to `k / (n - 1)`. With a
/// single distinct date every line gets 0.0. Lines with identical dates
/// always share a coefficient. Empty input gives empty output.
#[must_use]
pub fn normalize_by_generation(dates: &[LineDate]) -> Vec<f32> {
    let mut generations = dates.to_vec();
    generations.sort_unstable();
    generations.dedup();

    // One generation: position 0 of 0, which is 0 by convention.
    let divisor = generations.len().saturating_sub(1).max(1) as f32;
    let ranks: HashMap<LineDate, f32> = generations
        .iter()
        .enumerate()
        .map(|(k, &date)| (date, k as f32 / divisor))
        .collect();

    dates.iter().map(|date| ranks[date]).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
