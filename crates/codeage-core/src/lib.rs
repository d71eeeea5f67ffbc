//! # codeage-core — line-age computation
//!
//! Turns per-line blame dates into per-line colors. Every stage is a pure
//! function of its inputs for one document snapshot.
//!
//! # Architecture
//!
//! ```text
//! LineMapping + Annotation + num_lines
//!     │
//!     ▼
//! resolve.rs:   one LineDate per visible line ("now" for uncommitted)
//!     │
//!     ▼
//! normalize.rs: Normalizer::Age | Normalizer::Generation → [0, 1]
//!     │
//!     ▼
//! mapper.rs:    ColorMapper::Adaptive | ColorMapper::Fixed → Hsb
//!     │
//!     ▼
//! toggle.rs:    HighlightTracker paints/unpaints through a LineHighlighter
//! ```
//!
//! [`compute_line_colors`] runs the first three stages in one call.

// Line counts and rank positions become f32 coefficients.
#![allow(clippy::cast_precision_loss)]
// f64→f32 truncation is intentional (coefficients don't need f64 precision).
#![allow(clippy::cast_possible_truncation)]

pub mod error;
pub mod mapper;
pub mod normalize;
pub mod resolve;
pub mod toggle;

pub use codeage_term::color::Hsb;
pub use error::AgingError;
pub use mapper::{ColorMapper, map_to_adaptive_color, map_to_fixed_color};
pub use normalize::{Normalizer, normalize_by_age, normalize_by_generation};
pub use resolve::{Annotation, LineDate, LineMapping, resolve_line_dates, resolve_line_dates_at};
pub use toggle::{HighlightTracker, LineHighlighter, Toggled};

/// Run the whole pipeline: resolve dates, normalize, map to colors.
///
/// The returned vector has exactly `num_lines` entries in line order.
///
/// # Errors
///
/// Propagates [`AgingError`] from the color mapper. With the built-in
/// normalizers every coefficient is in range, so this only fails for a
/// background supplied with out-of-range components.
pub fn compute_line_colors(
    num_lines: usize,
    mapping: &impl LineMapping,
    annotation: &impl Annotation,
    normalizer: Normalizer,
    mapper: ColorMapper,
) -> Result<Vec<Hsb>, AgingError> {
    let dates = resolve_line_dates(num_lines, mapping, annotation);
    let coefficients = normalizer.normalize(&dates);
    let colors = mapper.map(&coefficients)?;
    tracing::debug!(
        lines = num_lines,
        ?normalizer,
        ?mapper,
        "computed line-age colors"
    );
    Ok(colors)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
