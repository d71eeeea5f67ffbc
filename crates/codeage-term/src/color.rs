// SPDX-License-Identifier: MIT
//
// codeage color system — HSB with exact 8-bit sRGB conversion.
//
// Single-character variable names (r, g, b, h, s, v, p, q, t, f) are the
// standard mathematical convention in color science. Renaming them would
// make the code harder to compare against reference implementations.
#![allow(clippy::many_single_char_names)]
//
// The aging gradient keeps a background's hue and saturation and only
// moves brightness, so HSB (a.k.a. HSV) is the natural working space. The
// conversions below are the classic hexcone model with hue expressed as a
// fraction of a full turn in [0, 1), matching how desktop toolkits report
// colors. A background read as `#rrggbb` survives a round trip exactly.
//
// Conversion pipeline:
//
//   "#rrggbb" → (u8, u8, u8) → Hsb → (u8, u8, u8) → CellColor → ANSI

use std::fmt;

// ─── ColorError ──────────────────────────────────────────────────────────────

/// Errors raised when constructing or parsing a color.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ColorError {
    /// A component was NaN, infinite, or outside [0, 1].
    #[error("{component} must be within [0, 1], got {value}")]
    OutOfRange {
        component: &'static str,
        value: f32,
    },

    /// The string is not `#RGB` or `#RRGGBB`.
    #[error("invalid hex color: {0:?}")]
    InvalidHex(String),
}

// ─── Hsb ─────────────────────────────────────────────────────────────────────

/// A color in hue/saturation/brightness space.
///
/// All three components live in [0.0, 1.0]. Hue is a fraction of a full
/// turn: 0.0 = red, 1/3 = green, 2/3 = blue.
///
/// # Examples
///
/// ```
/// use codeage_term::color::Hsb;
///
/// let bg = Hsb::hex("#1e1e1e").unwrap();
/// assert!(bg.is_dark());
/// assert_eq!(bg.to_rgb8(), (0x1e, 0x1e, 0x1e));
///
/// let warm = Hsb::new(0.145, 0.188, 0.4).unwrap();
/// assert_eq!(warm.hue, 0.145);
/// ```
#[derive(Clone, Copy)]
pub struct Hsb {
    /// Hue: 0.0 to 1.0 (fraction of a full turn).
    pub hue: f32,

    /// Saturation: 0.0 (gray) to 1.0 (fully saturated).
    pub saturation: f32,

    /// Brightness: 0.0 (black) to 1.0 (full value).
    pub brightness: f32,
}

impl Hsb {
    // ─── Constructors ────────────────────────────────────────────────────

    /// Create a color, rejecting components outside [0, 1].
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::OutOfRange`] naming the first bad component.
    pub fn new(hue: f32, saturation: f32, brightness: f32) -> Result<Self, ColorError> {
        check_unit("hue", hue)?;
        check_unit("saturation", saturation)?;
        check_unit("brightness", brightness)?;
        Ok(Self {
            hue,
            saturation,
            brightness,
        })
    }

    /// Create a color without validation.
    ///
    /// For compile-time constants whose components are known to be in range.
    #[inline]
    #[must_use]
    pub const fn new_unchecked(hue: f32, saturation: f32, brightness: f32) -> Self {
        Self {
            hue,
            saturation,
            brightness,
        }
    }

    /// Create a color from 8-bit sRGB values (0 to 255).
    #[must_use]
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        let (hue, saturation, brightness) = rgb8_to_hsb(r, g, b);
        Self {
            hue,
            saturation,
            brightness,
        }
    }

    /// Create a color from a hex string.
    ///
    /// Supports `#RGB` and `#RRGGBB`, with or without the `#`. Returns
    /// `None` if the string is not a valid hex color.
    ///
    /// ```
    /// use codeage_term::color::Hsb;
    ///
    /// assert_eq!(Hsb::hex("#fff"), Some(Hsb::WHITE));
    /// assert!(Hsb::hex("#12345").is_none());
    /// ```
    #[must_use]
    pub fn hex(s: &str) -> Option<Self> {
        parse_hex(s).map(|(r, g, b)| Self::from_rgb8(r, g, b))
    }

    /// Pure black.
    pub const BLACK: Self = Self::new_unchecked(0.0, 0.0, 0.0);

    /// Pure white.
    pub const WHITE: Self = Self::new_unchecked(0.0, 0.0, 1.0);

    // ─── Queries ─────────────────────────────────────────────────────────

    /// Whether this color counts as a dark background (brightness < 0.5).
    #[inline]
    #[must_use]
    pub fn is_dark(self) -> bool {
        self.brightness < 0.5
    }

    /// Return a copy with the given brightness, keeping hue and saturation.
    #[inline]
    #[must_use]
    pub const fn with_brightness(self, brightness: f32) -> Self {
        Self { brightness, ..self }
    }

    // ─── Conversions ─────────────────────────────────────────────────────

    /// Convert to 8-bit sRGB.
    #[must_use]
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        hsb_to_rgb8(self.hue, self.saturation, self.brightness)
    }

    /// Convert to hex string (`#rrggbb`).
    #[must_use]
    pub fn to_hex(self) -> String {
        let (r, g, b) = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Resolve to a terminal-ready `CellColor`.
    #[must_use]
    pub fn to_cell_color(self) -> CellColor {
        let (r, g, b) = self.to_rgb8();
        CellColor::Rgb(r, g, b)
    }
}

impl std::str::FromStr for Hsb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::hex(s).ok_or_else(|| ColorError::InvalidHex(s.to_owned()))
    }
}

impl fmt::Debug for Hsb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Hsb({:.4}, {:.4}, {:.4})",
            self.hue, self.saturation, self.brightness
        )
    }
}

impl fmt::Display for Hsb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl PartialEq for Hsb {
    fn eq(&self, other: &Self) -> bool {
        // Compare with small epsilon for floating point
        const EPS: f32 = 1e-5;
        (self.hue - other.hue).abs() < EPS
            && (self.saturation - other.saturation).abs() < EPS
            && (self.brightness - other.brightness).abs() < EPS
    }
}

impl Default for Hsb {
    /// Default is black.
    fn default() -> Self {
        Self::BLACK
    }
}

// ─── CellColor ───────────────────────────────────────────────────────────────

/// Compact color for terminal output.
///
/// This is what gets converted to ANSI escape sequences. For color math,
/// use [`Hsb`] and convert with [`Hsb::to_cell_color`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellColor {
    /// 24-bit `TrueColor`.
    Rgb(u8, u8, u8),

    /// Terminal default color (inherits from terminal settings).
    #[default]
    Default,
}

impl CellColor {
    /// Whether this is the terminal default color.
    #[inline]
    #[must_use]
    pub const fn is_default(self) -> bool {
        matches!(self, Self::Default)
    }
}

impl fmt::Debug for CellColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rgb(r, g, b) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
            Self::Default => write!(f, "default"),
        }
    }
}

impl From<Hsb> for CellColor {
    fn from(color: Hsb) -> Self {
        color.to_cell_color()
    }
}

// ─── Conversion Functions ────────────────────────────────────────────────────
//
// Hexcone model. Hue is sector-based: six 60° sectors, each a linear ramp
// between two primaries. All arithmetic is f32 so results match toolkits
// that report colors as float HSB triples.

fn check_unit(component: &'static str, value: f32) -> Result<(), ColorError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ColorError::OutOfRange { component, value })
    }
}

/// Convert 8-bit sRGB → (hue, saturation, brightness).
fn rgb8_to_hsb(r: u8, g: u8, b: u8) -> (f32, f32, f32) {
    let cmax = r.max(g).max(b);
    let cmin = r.min(g).min(b);

    let brightness = f32::from(cmax) / 255.0;
    let saturation = if cmax == 0 {
        0.0
    } else {
        f32::from(cmax - cmin) / f32::from(cmax)
    };

    if saturation == 0.0 {
        return (0.0, saturation, brightness);
    }

    let span = f32::from(cmax - cmin);
    let rc = f32::from(cmax - r) / span;
    let gc = f32::from(cmax - g) / span;
    let bc = f32::from(cmax - b) / span;

    let sector = if r == cmax {
        bc - gc
    } else if g == cmax {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };
    let mut hue = sector / 6.0;
    if hue < 0.0 {
        hue += 1.0;
    }

    (hue, saturation, brightness)
}

/// Convert (hue, saturation, brightness) → 8-bit sRGB.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn hsb_to_rgb8(hue: f32, saturation: f32, brightness: f32) -> (u8, u8, u8) {
    if saturation == 0.0 {
        let v = to_u8(brightness);
        return (v, v, v);
    }

    let h = (hue - hue.floor()) * 6.0;
    let f = h - h.floor();
    let v = brightness;
    let p = brightness * (1.0 - saturation);
    let q = brightness * saturation.mul_add(-f, 1.0);
    let t = brightness * saturation.mul_add(-(1.0 - f), 1.0);

    // Safe: h is in [0, 6), so the sector is 0..=5.
    let (r, g, b) = match h as u8 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    (to_u8(r), to_u8(g), to_u8(b))
}

// ─── Hex Parsing ─────────────────────────────────────────────────────────────

/// Parse a hex color string into 8-bit RGB.
fn parse_hex(s: &str) -> Option<(u8, u8, u8)> {
    let s = s.strip_prefix('#').unwrap_or(s);
    let bytes = s.as_bytes();

    match bytes.len() {
        // #RGB
        3 => {
            let r = parse_hex_digit(bytes[0])?;
            let g = parse_hex_digit(bytes[1])?;
            let b = parse_hex_digit(bytes[2])?;
            Some((r << 4 | r, g << 4 | g, b << 4 | b))
        }
        // #RRGGBB
        6 => {
            let r = parse_hex_byte(&bytes[0..2])?;
            let g = parse_hex_byte(&bytes[2..4])?;
            let b = parse_hex_byte(&bytes[4..6])?;
            Some((r, g, b))
        }
        _ => None,
    }
}

#[inline]
const fn parse_hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[inline]
fn parse_hex_byte(bytes: &[u8]) -> Option<u8> {
    let hi = parse_hex_digit(bytes[0])?;
    let lo = parse_hex_digit(bytes[1])?;
    Some(hi << 4 | lo)
}

/// Convert a float (0.0–1.0) to a u8 (0–255) with correct rounding.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_u8(v: f32) -> u8 {
    // Safe: clamp guarantees 0.0 <= value <= 255.0 before truncation.
    v.mul_add(255.0, 0.5).clamp(0.0, 255.0) as u8
}

// ─── Tests ───────────────────────────────────────────────────────────────────
