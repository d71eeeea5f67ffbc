// SPDX-License-Identifier: MIT
//
// ANSI escape sequence generation.
//
// Pure functions that write escape sequences to any `impl Write`. No state,
// no decisions about when to emit. The caller paints one line at a time
// and decides which background each line gets. This module just knows the
// byte-level encoding of the few commands a line painter needs.
//
// All functions return `io::Result` propagated from the underlying writer.
use std::io::{self, Write};

use crate::color::CellColor;

// ─── Reset ───────────────────────────────────────────────────────────────────

/// Reset all SGR attributes to terminal defaults (SGR 0).
#[inline]
pub fn reset(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[0m")
}

// ─── Background Color ────────────────────────────────────────────────────────

/// Set the background color.
///
/// 24-bit `TrueColor` for RGB (48;2;R;G;B), SGR 49 for the terminal default.
pub fn bg(w: &mut impl Write, color: CellColor) -> io::Result<()> {
    match color {
        CellColor::Default => w.write_all(b"\x1b[49m"),
        CellColor::Rgb(r, g, b) => write!(w, "\x1b[48;2;{r};{g};{b}m"),
    }
}

// ─── Line ────────────────────────────────────────────────────────────────────

/// Erase from the cursor to the end of the line (EL 0).
///
/// The erased cells take the current background color, which is how a
/// painted line extends its background across the full terminal width.
#[inline]
pub fn clear_to_eol(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[K")
}

/// Write one line of text on the given background, then restore defaults.
///
/// Emits nothing but the text and a newline when `color` is the terminal
/// default, so unpainted output stays free of escape codes.
pub fn painted_line(w: &mut impl Write, text: &str, color: CellColor) -> io::Result<()> {
    if color.is_default() {
        return writeln!(w, "{text}");
    }
    bg(w, color)?;
    w.write_all(text.as_bytes())?;
    clear_to_eol(w)?;
    reset(w)?;
    w.write_all(b"\n")
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Helper: run an ANSI function and return its output as a string.
    fn emit<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn reset_sequence() {
        assert_eq!(emit(|w| reset(w)), "\x1b[0m");
    }

    // ── Background Color ────────────────────────────────────────────────

    #[test]
    fn bg_default() {
        assert_eq!(emit(|w| bg(w, CellColor::Default)), "\x1b[49m");
    }

    #[test]
    fn bg_rgb() {
        assert_eq!(
            emit(|w| bg(w, CellColor::Rgb(30, 30, 30))),
            "\x1b[48;2;30;30;30m"
        );
    }

    #[test]
    fn clear_to_eol_sequence() {
        assert_eq!(emit(|w| clear_to_eol(w)), "\x1b[K");
    }

    // ── Painted lines ───────────────────────────────────────────────────

    #[test]
    fn painted_line_wraps_text_in_background() {
        let out = emit(|w| painted_line(w, "fn main() {}", CellColor::Rgb(1, 2, 3)));
        assert_eq!(out, "\x1b[48;2;1;2;3mfn main() {}\x1b[K\x1b[0m\n");
    }

    #[test]
    fn painted_line_default_is_plain() {
        let out = emit(|w| painted_line(w, "plain", CellColor::Default));
        assert_eq!(out, "plain\n");
    }

    #[test]
    fn painted_line_empty_text_still_fills_row() {
        let out = emit(|w| painted_line(w, "", CellColor::Rgb(9, 9, 9)));
        assert_eq!(out, "\x1b[48;2;9;9;9m\x1b[K\x1b[0m\n");
    }
}
