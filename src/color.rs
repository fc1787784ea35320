//! Color literal parsing for recipe fill colors
//!
//! Supports `#RRGGBB` and `#RRGGBBAA`. Palette entries use the bare form
//! without `#`, see [`crate::palette`].

use image::Rgba;
use thiserror::Error;

/// Error type for color parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Input string was empty
    #[error("empty color string")]
    Empty,
    /// Input string doesn't start with '#'
    #[error("color must start with '#'")]
    MissingHash,
    /// Invalid length (must be 6 or 8 hex chars after #)
    #[error("invalid color length {0}, expected 6 or 8")]
    InvalidLength(usize),
    /// Contains non-hex characters
    #[error("invalid hex character '{0}'")]
    InvalidHex(char),
}

/// Parse a `#RRGGBB` or `#RRGGBBAA` color string into an RGBA color.
///
/// Six-digit colors are fully opaque.
///
/// # Examples
///
/// ```
/// use stencilgen::color::parse_color;
///
/// let sun = parse_color("#ffdb00").unwrap();
/// assert_eq!(sun, image::Rgba([255, 219, 0, 255]));
/// ```
pub fn parse_color(s: &str) -> Result<Rgba<u8>, ColorError> {
    if s.is_empty() {
        return Err(ColorError::Empty);
    }
    let hex = s.strip_prefix('#').ok_or(ColorError::MissingHash)?;
    parse_hex_rgba(hex)
}

/// Parse bare hex digits (`RRGGBB` or `RRGGBBAA`) into an RGBA color.
pub(crate) fn parse_hex_rgba(hex: &str) -> Result<Rgba<u8>, ColorError> {
    if let Some(c) = hex.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidHex(c));
    }

    match hex.len() {
        6 => Ok(Rgba([
            parse_hex_pair(&hex[0..2])?,
            parse_hex_pair(&hex[2..4])?,
            parse_hex_pair(&hex[4..6])?,
            255,
        ])),
        8 => Ok(Rgba([
            parse_hex_pair(&hex[0..2])?,
            parse_hex_pair(&hex[2..4])?,
            parse_hex_pair(&hex[4..6])?,
            parse_hex_pair(&hex[6..8])?,
        ])),
        len => Err(ColorError::InvalidLength(len)),
    }
}

/// Parse a single hex digit (0-9, A-F, a-f) to u8 (0-15)
fn parse_hex_digit(c: char) -> Result<u8, ColorError> {
    match c {
        '0'..='9' => Ok(c as u8 - b'0'),
        'a'..='f' => Ok(c as u8 - b'a' + 10),
        'A'..='F' => Ok(c as u8 - b'A' + 10),
        _ => Err(ColorError::InvalidHex(c)),
    }
}

/// Parse a two-character hex string to u8 (0-255)
fn parse_hex_pair(s: &str) -> Result<u8, ColorError> {
    let mut value = 0u8;
    for c in s.chars() {
        value = value * 16 + parse_hex_digit(c)?;
    }
    Ok(value)
}

/// Format a color as lowercase `rrggbbaa`.
pub fn to_hex(color: Rgba<u8>) -> String {
    let [r, g, b, a] = color.0;
    format!("{:02x}{:02x}{:02x}{:02x}", r, g, b, a)
}
