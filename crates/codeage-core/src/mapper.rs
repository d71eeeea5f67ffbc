//! Coefficient → color mapping.
//!
//! Only brightness carries the coefficient; hue and saturation stay fixed
//! for a whole document. Two strategies, selected with [`ColorMapper`]:
//!
//! - **Adaptive** takes hue and saturation from the editor background and
//!   spreads brightness over a band of width [`BRIGHTNESS_SPAN`] on the far
//!   side of the background from the midpoint. On a dark background the
//!   coefficient is inverted, so whatever the normalizer calls "newest" is
//!   always the line furthest from the background and reads as prominent.
//! - **Fixed** ignores the background and uses a warm gray band from
//!   [`FIXED_BRIGHTNESS_MIN`] to [`FIXED_BRIGHTNESS_MAX`].
//!
//! Coefficients must be in [0, 1]. Out-of-range or NaN coefficients are
//! rejected, not clamped.

use codeage_term::color::Hsb;

use crate::error::AgingError;

/// Width of the adaptive brightness band.
pub const BRIGHTNESS_SPAN: f32 = 0.5;

/// Hue of the fixed palette.
pub const FIXED_HUE: f32 = 0.145;

/// Saturation of the fixed palette.
pub const FIXED_SATURATION: f32 = 0.188;

/// Brightness of a fixed-palette line with coefficient 0.
pub const FIXED_BRIGHTNESS_MIN: f32 = 0.2;

/// Brightness of a fixed-palette line with coefficient 1.
pub const FIXED_BRIGHTNESS_MAX: f32 = 0.6;

// ---------------------------------------------------------------------------
// ColorMapper
// ---------------------------------------------------------------------------

/// Which policy turns coefficients into colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorMapper {
    /// Follow the display background. See [`map_to_adaptive_color`].
    Adaptive { background: Hsb },
    /// Theme-independent warm gray. See [`map_to_fixed_color`].
    Fixed,
}

impl ColorMapper {
    /// Map every coefficient to a color, preserving order.
    ///
    /// # Errors
    ///
    /// See [`map_to_adaptive_color`] and [`map_to_fixed_color`].
    pub fn map(self, coefficients: &[f32]) -> Result<Vec<Hsb>, AgingError> {
        match self {
            Self::Adaptive { background } => map_to_adaptive_color(coefficients, background),
            Self::Fixed => map_to_fixed_color(coefficients),
        }
    }
}

// ---------------------------------------------------------------------------
// Adaptive
// ---------------------------------------------------------------------------

/// Map coefficients onto a brightness band next to `background`.
///
/// - Dark background (`b < 0.5`): band `[b, b + 0.5]`, coefficient inverted.
/// - Light background: band `[b - 0.5, b]`, coefficient as-is.
///
/// `brightness = c * (max - min) + min`. Hue and saturation are copied from
/// the background.
///
/// # Errors
///
/// [`AgingError::Color`] if a background component is outside [0, 1],
/// [`AgingError::CoefficientOutOfRange`] for the first bad coefficient.
pub fn map_to_adaptive_color(
    coefficients: &[f32],
    background: Hsb,
) -> Result<Vec<Hsb>, AgingError> {
    let background = Hsb::new(background.hue, background.saturation, background.brightness)?;
    let is_dark = background.is_dark();
    let base = background.brightness;
    let (min, max) = if is_dark {
        (base, base + BRIGHTNESS_SPAN)
    } else {
        (base - BRIGHTNESS_SPAN, base)
    };

    coefficients
        .iter()
        .enumerate()
        .map(|(line, &c)| {
            let c = checked(line, c)?;
            let c = if is_dark { 1.0 - c } else { c };
            Ok(background.with_brightness(lerp(c, min, max)))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Fixed
// ---------------------------------------------------------------------------

/// Map coefficients onto the fixed warm-gray band `[0.2, 0.6]`.
///
/// # Errors
///
/// [`AgingError::CoefficientOutOfRange`] for the first bad coefficient.
pub fn map_to_fixed_color(coefficients: &[f32]) -> Result<Vec<Hsb>, AgingError> {
    coefficients
        .iter()
        .enumerate()
        .map(|(line, &c)| {
            let c = checked(line, c)?;
            let brightness = lerp(c, FIXED_BRIGHTNESS_MIN, FIXED_BRIGHTNESS_MAX);
            Ok(Hsb::new_unchecked(FIXED_HUE, FIXED_SATURATION, brightness))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn checked(line: usize, value: f32) -> Result<f32, AgingError> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(AgingError::CoefficientOutOfRange { line, value })
    }
}

#[inline]
fn lerp(c: f32, min: f32, max: f32) -> f32 {
    c.mul_add(max - min, min)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
