//! Per-tile color tables
//!
//! A color table maps each luminance bucket of a stencil tile to a palette
//! index. The textual form is one base-32 digit per bucket (`0`-`9`, then
//! `A`-`V` for 10-31), left to right for buckets 0, 1, 2, ...
//!
//! Decoding is total. A missing table, a missing digit and a character that is
//! not a base-32 digit all resolve to palette index 0.

/// Textual form of the table used when a tile has none.
pub const FALLBACK_TABLE: &str = "0000";

/// Number of luminance buckets in a stencil master.
pub const BUCKETS: usize = 4;

/// Palette indices for each luminance bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ColorTable {
    indices: Vec<u8>,
}

impl ColorTable {
    /// Table built from explicit indices.
    pub fn new(indices: Vec<u8>) -> Self {
        Self { indices }
    }

    /// The table applied to tiles with no table of their own.
    pub fn fallback() -> Self {
        decode(Some(FALLBACK_TABLE))
    }

    /// Bucket `i` maps to palette index `i`.
    pub fn identity(buckets: usize) -> Self {
        Self {
            indices: (0..buckets).map(|i| i as u8).collect(),
        }
    }

    /// Palette index for `bucket`; 0 when the table is shorter than that.
    pub fn index(&self, bucket: usize) -> usize {
        self.indices.get(bucket).map_or(0, |&i| i as usize)
    }

    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Decode a color table literal.
///
/// # Examples
///
/// ```
/// use stencilgen::color_table::decode;
///
/// assert_eq!(decode(Some("J056")).indices(), &[19, 0, 5, 6]);
/// assert_eq!(decode(None).indices(), &[0, 0, 0, 0]);
/// ```
pub fn decode(table: Option<&str>) -> ColorTable {
    let table = table.unwrap_or(FALLBACK_TABLE);
    ColorTable {
        indices: table.chars().map(decode_digit).collect(),
    }
}

/// Decode a list of optional literals, keeping `None` entries as `None`.
///
/// Remapping treats a `None` entry as [`ColorTable::fallback`]; the list
/// length still decides which tiles are covered.
pub fn decode_all(tables: &[Option<&str>]) -> Vec<Option<ColorTable>> {
    tables.iter().map(|t| t.map(|s| decode(Some(s)))).collect()
}

fn decode_digit(c: char) -> u8 {
    c.to_digit(32).map_or(0, |d| d as u8)
}
