//! Tile-by-tile recoloring of 2-bit stencil masters
//!
//! A stencil master stores four gray levels in its red channel. The source is
//! cut into 8×8 tiles in row-major order and each tile gets its own color
//! table, so one hand-painted master can be recolored into many sprites by
//! swapping only the table strings.

use image::{Rgba, RgbaImage};

use crate::color_table::{self, ColorTable};
use crate::palette::Palette;

/// Tile edge length in pixels.
pub const TILE_SIZE: u32 = 8;

/// Color written when a table points past the end of the palette.
const MISSING_ENTRY: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Luminance bucket of a red channel value: `floor(red / 85)` clamped to 3.
///
/// Boundary values keep the plain floor, so 85 is bucket 1 and 170 is
/// bucket 2.
pub fn bucket(red: u8) -> usize {
    ((red / 85) as usize).min(3)
}

/// Recolor `source` tile by tile.
///
/// Tile `j` (row-major, `floor(w/8) * floor(h/8)` tiles) uses `tables[j]`; a
/// `None` entry uses [`ColorTable::fallback`]. Tiles past the end of `tables`
/// and the pixels of partial edge tiles are copied unchanged. The output has
/// the same dimensions as the input.
///
/// # Examples
///
/// ```
/// use image::{Rgba, RgbaImage};
/// use stencilgen::color_table::decode;
/// use stencilgen::palette::unpack;
/// use stencilgen::remap::remap;
///
/// let palette = unpack(&["00000000", "000000ff", "ffffffff"]).unwrap();
/// let source = RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 255]));
/// let out = remap(&source, &[Some(decode(Some("1")))], &palette);
/// assert!(out.pixels().all(|p| *p == Rgba([0, 0, 0, 255])));
/// ```
pub fn remap(source: &RgbaImage, tables: &[Option<ColorTable>], palette: &Palette) -> RgbaImage {
    let mut out = source.clone();

    let tiles_x = source.width() / TILE_SIZE;
    let tiles_y = source.height() / TILE_SIZE;
    let fallback = ColorTable::fallback();

    for ty in 0..tiles_y {
        for tx in 0..tiles_x {
            let j = (ty * tiles_x + tx) as usize;
            let Some(table) = tables.get(j) else {
                continue;
            };
            let table = table.as_ref().unwrap_or(&fallback);
            convert_tile(&mut out, tx * TILE_SIZE, ty * TILE_SIZE, table, palette);
        }
    }

    out
}

/// Recolor with literal table strings, `""` standing in for a missing table.
pub fn remap_with(source: &RgbaImage, tables: &[&str], palette: &Palette) -> RgbaImage {
    let tables: Vec<Option<&str>> = tables
        .iter()
        .map(|t| if t.is_empty() { None } else { Some(*t) })
        .collect();
    remap(source, &color_table::decode_all(&tables), palette)
}

fn convert_tile(image: &mut RgbaImage, x0: u32, y0: u32, table: &ColorTable, palette: &Palette) {
    for y in y0..y0 + TILE_SIZE {
        for x in x0..x0 + TILE_SIZE {
            let pixel = image.get_pixel_mut(x, y);
            let index = table.index(bucket(pixel[0]));
            *pixel = palette.get(index).unwrap_or(MISSING_ENTRY);
        }
    }
}
