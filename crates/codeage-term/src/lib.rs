// SPDX-License-Identifier: MIT
//
// codeage-term — color and terminal output layer for codeage.
//
// Line-age colors are computed in HSB (hue, saturation, brightness), the
// space the aging gradient is defined in: hue and saturation are carried
// over from the background, only brightness moves. This crate owns that
// color model, the conversions to and from 8-bit sRGB, and the handful of
// ANSI escape sequences needed to paint a full-width line background.

pub mod ansi;
pub mod color;

pub use color::{CellColor, ColorError, Hsb};
