//! Indexed palettes unpacked from hex literals
//!
//! A palette is an ordered list of RGBA entries. Declaration order fixes the
//! numeric index of each entry, and index 0 is conventionally transparent.
//! Literals are bare hex strings: `RRGGBB` (opaque) or `RRGGBBAA`.

use image::Rgba;
use thiserror::Error;

use crate::color::{parse_hex_rgba, to_hex, ColorError};

/// Packed palette shared by every built-in recipe.
///
/// Color-table digits address these entries: `0`-`9`, then `A` = 10 up to
/// `P` = 25.
pub const GAME_PALETTE: &[&str] = &[
    "00000000", // 0 Transparent
    "000000ff", // 1 Black
    "ffffffff", // 2 White
    "6d6d6dff", // 3 Dark gray
    "b6b6b6ff", // 4 Bright gray
    "6db600ff", // 5 Darker green
    "dbff00ff", // 6 Lighter green
    "924900ff", // 7 Darker brown
    "b66d00ff", // 8 Brown
    "ffb66dff", // 9 Beige
    "6d2400ff", // A Darkest reddish brown
    "246d00ff", // B Dark green
    "dbb649ff", // C Mushroom leg shade
    "ffffdbff", // D Very bright yellow
    "b62400ff", // E Orange-ish red
    "ff6d00ff", // F Orange
    "ffb600ff", // G Bright orange
    "ffdb00ff", // H Yellow
    "db9200ff", // I Yellowish brown
    "244900ff", // J Darkest green
    "492400ff", // K Darkest brown
    "b649dbff", // L Darker purple
    "db92ffff", // M Pinkish purple
    "2492dbff", // N Dark blue
    "6ddbffff", // O Blue
    "dbffffff", // P Bright blue
];

/// Error when unpacking a palette literal.
///
/// This is the one fatal error in the pipeline: it means the packed source
/// data is corrupt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("palette entry {index} ('{entry}'): {source}")]
pub struct PaletteError {
    pub index: usize,
    pub entry: String,
    #[source]
    pub source: ColorError,
}

/// An unpacked palette.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Palette {
    entries: Vec<Rgba<u8>>,
}

impl Palette {
    /// Build a palette directly from unpacked entries.
    pub fn from_entries(entries: Vec<Rgba<u8>>) -> Self {
        Self { entries }
    }

    /// Unpack the built-in [`GAME_PALETTE`].
    pub fn game() -> Result<Self, PaletteError> {
        unpack(GAME_PALETTE)
    }

    /// Entry at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<Rgba<u8>> {
        self.entries.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rgba<u8>> {
        self.entries.iter()
    }

    /// Re-pack every entry as an 8-digit lowercase literal.
    pub fn to_hex_strings(&self) -> Vec<String> {
        self.entries.iter().map(|c| to_hex(*c)).collect()
    }
}

/// Unpack hex palette literals into RGBA entries.
///
/// Six-digit entries get an implicit `ff` alpha, so every unpacked entry is
/// exactly four bytes.
///
/// # Examples
///
/// ```
/// use stencilgen::palette::unpack;
///
/// let palette = unpack(&["6db600", "6db600ff"]).unwrap();
/// assert_eq!(palette.get(0), palette.get(1));
/// assert_eq!(palette.get(0).unwrap().0, [0x6d, 0xb6, 0x00, 0xff]);
/// ```
///
/// # Errors
///
/// Returns `PaletteError` for an entry that is not 6 or 8 characters long or
/// that contains a non-hex character.
pub fn unpack<S: AsRef<str>>(entries: &[S]) -> Result<Palette, PaletteError> {
    let entries = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let entry = entry.as_ref();
            parse_hex_rgba(entry).map_err(|source| PaletteError {
                index,
                entry: entry.to_string(),
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Palette { entries })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_six_and_eight_digit_are_identical() {
        let palette = unpack(&["6db600", "6db600ff"]).unwrap();
        assert_eq!(palette.get(0), Some(Rgba([0x6d, 0xb6, 0x00, 0xff])));
        assert_eq!(palette.get(0), palette.get(1));
    }

    #[test]
    fn test_explicit_alpha_kept() {
        let palette = unpack(&["00000000"]).unwrap();
        assert_eq!(palette.get(0), Some(Rgba([0, 0, 0, 0])));
    }

    #[test]
    fn test_declaration_order_is_index() {
        let palette = unpack(&["000000ff", "ffffffff", "6d6d6d"]).unwrap();
        assert_eq!(palette.len(), 3);
        assert_eq!(palette.get(2), Some(Rgba([0x6d, 0x6d, 0x6d, 0xff])));
        assert_eq!(palette.get(3), None);
    }

    #[test]
    fn test_wrong_length_is_error() {
        let err = unpack(&["000000ff", "fff"]).unwrap_err();
        assert_eq!(err.index, 1);
        assert_eq!(err.source, ColorError::InvalidLength(3));
    }

    #[test]
    fn test_seven_digits_is_error() {
        let err = unpack(&["1234567"]).unwrap_err();
        assert_eq!(err.source, ColorError::InvalidLength(7));
    }

    #[test]
    fn test_non_hex_is_error() {
        let err = unpack(&["00zz00"]).unwrap_err();
        assert_eq!(err.index, 0);
        assert_eq!(err.source, ColorError::InvalidHex('z'));
    }

    #[test]
    fn test_game_palette() {
        let palette = Palette::game().unwrap();
        assert_eq!(palette.len(), 26);
        assert_eq!(palette.get(0).unwrap()[3], 0);
        assert_eq!(palette.get(19), Some(Rgba([0x24, 0x49, 0x00, 0xff])));
    }

    #[test]
    fn test_to_hex_strings_round_trip() {
        let palette = unpack(&["6db600"]).unwrap();
        assert_eq!(palette.to_hex_strings(), vec!["6db600ff".to_string()]);
    }
}
