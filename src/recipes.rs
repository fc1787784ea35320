//! Built-in generation recipes
//!
//! Each recipe turns the stencil masters (`_g` game art, `_f` font) and the
//! palette into one or more finished sprites. The list order in [`RECIPES`] is
//! the generation order: everything after `game_art` draws from its `g`
//! output.

use std::f64::consts::PI;

use image::{Rgba, RgbaImage};

use crate::compositor::{Recipe, RecipeContext};
use crate::surface::{crop, Flip, RasterSurface, Rect, Rotation};

/// Color tables for the 8×9 tiles of the `_g` master, row-major.
pub const GAME_ART_TABLES: &[&str] = &[
    "J056", "J056", "K089", "K087", "KA78", "A0CD", "A0CD", "A0CD",
    "0007", "1034", "K089", "K087", "A0CD", "A0CD", "A0GF", "A0EF",
    "J0B5", "J0B5", "J0B5", "J0B5", "J0B5", "J0B5", "A0EF", "A0EF",
    "J0B5", "J0B5", "J0B5", "J0B5", "J0B5", "J0B5", "10H2", "00GD",
    "10IH", "10IH", "1034", "1034", "1034", "1024", "10LM", "1000",
    "10IH", "10IH", "1034", "1034", "1034", "1034", "1084", "1000",
    "0000", "0000", "0000", "1056", "1056", "1002", "0000", "0000",
    "0000", "0000", "0000", "1056", "1056", "10EG", "0000", "0000",
    "0000", "0000", "0000", "1042", "10EF", "10EF", "10EF", "10EF",
];

/// Color tables for the enemy body sheet (12 tiles per row, top 3 rows).
const ENEMY_TABLES: &[&str] = &[
    "10DH", "10DH", "10FH", "10PO", "10PO", "10NO", "1024", "1024", "1034", "102M", "102M", "10LM",
    "10DH", "10DH", "10FH", "10PO", "10PO", "10NO", "1024", "1024", "1034", "102M", "102M", "10LM",
    "10FH", "10FH", "10FH", "10NO", "10NO", "10NO", "1034", "1034", "1034", "10LM", "10LM", "10LM",
];

/// Every built-in recipe, in generation order.
pub const RECIPES: &[Recipe] = &[
    Recipe { name: "game_art", outputs: &["g"], run: game_art },
    Recipe { name: "fence", outputs: &["f"], run: fence },
    Recipe { name: "bush", outputs: &["b"], run: bush },
    Recipe { name: "mushrooms", outputs: &["m"], run: mushrooms },
    Recipe { name: "clouds", outputs: &["c"], run: clouds },
    Recipe { name: "sun", outputs: &["s"], run: sun },
    Recipe { name: "player", outputs: &["p"], run: player },
    Recipe { name: "gas_particles", outputs: &["gp"], run: gas_particles },
    Recipe { name: "projectiles", outputs: &["pr"], run: projectiles },
    Recipe { name: "hud", outputs: &["h"], run: hud },
    Recipe { name: "enemy_bodies", outputs: &["e"], run: enemy_bodies },
    Recipe { name: "propeller", outputs: &["ro"], run: propeller },
    Recipe { name: "rings", outputs: &["r1", "r2"], run: rings },
    Recipe { name: "shadows", outputs: &["sh"], run: shadows },
    Recipe { name: "ground", outputs: &["gd"], run: ground },
    Recipe { name: "fonts", outputs: &["fw", "fo"], run: fonts },
];

fn paint(ctx: &mut RecipeContext<'_>, surface: &mut RasterSurface, literal: &str) {
    let color = ctx.color(literal);
    surface.set_color(color);
}

fn game_art(ctx: &mut RecipeContext<'_>) {
    let raw = ctx.bitmap("_g");
    let art = ctx.remap(&raw, GAME_ART_TABLES);
    ctx.register("g", art);
}

fn fence(ctx: &mut RecipeContext<'_>) {
    let art = ctx.bitmap("g");
    let mut surface = ctx.surface(32, 48);

    // Horizontal bar
    for i in 0..6 {
        surface.blit_region(&art, Flip::None, i * 6, 10, Rect::new(33, 0, 6, 8));
    }
    surface.blit_region(&art, Flip::None, 22, 10, Rect::new(32, 0, 7, 8));
    surface.blit_region(&art, Flip::None, 3, 10, Rect::new(33, 0, 7, 8));

    // Vertical bar
    for i in 0..3 {
        if i < 2 {
            surface.blit_region(&art, Flip::None, (i + 1) * 8, 0, Rect::new(16 + i * 8, 0, 8, 16));
        }
        surface.blit_region(&art, Flip::None, 8, 16 + i * 7, Rect::new(16, 9, 8, 7));
        surface.blit_region(&art, Flip::None, 16, 16 + i * 7, Rect::new(24, 9, 8, 7));
    }

    // Nail
    for i in 0..2 {
        surface.blit_region(&art, Flip::None, 12, 10, Rect::new(i * 8, 8, 8, 8));
    }

    ctx.register("f", surface.into_image());
}

fn bush(ctx: &mut RecipeContext<'_>) {
    let art = ctx.bitmap("g");
    let mut surface = ctx.surface(48, 64);

    surface.blit_region(&art, Flip::None, 0, 0, Rect::new(0, 16, 48, 16));
    paint(ctx, &mut surface, "#246d00");
    surface.fill_rect(0.0, 16.0, 48.0, 48.0);

    ctx.register("b", surface.into_image());
}

fn mushrooms(ctx: &mut RecipeContext<'_>) {
    let art = ctx.bitmap("g");
    let mut surface = ctx.surface(48, 96);

    // Hat top, leg and hat sides
    surface.blit_region(&art, Flip::None, 12, 16, Rect::new(40, 0, 24, 8));
    for i in 0..32 {
        if i < 10 {
            surface.blit_region(&art, Flip::None, 16, 24 + i * 8, Rect::new(32, 8, 16, 8));
        }
        if i < 2 {
            surface.blit_region(&art, Flip::None, 40 * i, 0, Rect::new(48 + i * 8, 8, 8, 16));
        }
        surface.blit_region(&art, Flip::None, 8 + i, 0, Rect::new(55, 8, 1, 16));
    }

    // Dots
    for i in 0..3 {
        let sy = if i == 2 { 28 } else { 24 };
        surface.blit_region(&art, Flip::None, 6 + 13 * i, 4 + 4 * (i % 2), Rect::new(56, sy, 8, 4));
    }

    ctx.register("m", surface.into_image());
}

/// Shape parameters of the cloud heightmap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CloudShape {
    pub width: u32,
    pub height: u32,
    /// Vertical scale of the bumps, in pixels.
    pub amplitude: f64,
    /// Horizontal repeat period of the bumps, in pixels.
    pub period: f64,
    /// Weight of the slow sine ripple spanning the whole width.
    pub sine_factor: f64,
}

/// Top edge of cloud column `x` before the per-band offset is added.
///
/// `t` is the column's position within its bump period, mapped to a triangle
/// wave in (-1, 1); `1 - sqrt(1 - t²)` gives the round top of each bump.
pub fn cloud_offset(shape: &CloudShape, x: u32) -> f64 {
    let half = shape.period / 2.0;
    let t = ((x as f64 % shape.period) - half) / (half + 2.0);
    let s = x as f64 / shape.width as f64 * PI * 2.0;
    let bump = 1.0 - (1.0 - t * t).max(0.0).sqrt();
    1.0 + (bump + (1.0 + s.sin()) * shape.sine_factor) * shape.amplitude
}

/// Rasterize stacked cloud bands. Each `(color, y_offset)` band is filled
/// from its top edge down to the bottom, later bands on top.
pub fn synthesize_clouds(shape: &CloudShape, bands: &[(Rgba<u8>, f64)]) -> RgbaImage {
    let mut surface = RasterSurface::new(shape.width, shape.height);
    let height = shape.height as f64;

    for &(color, y_offset) in bands {
        surface.set_color(color);
        for x in 0..shape.width {
            let dy = cloud_offset(shape, x) + y_offset;
            surface.fill_rect(x as f64, dy, 1.0, height - dy + 1.0);
        }
    }

    surface.into_image()
}

fn clouds(ctx: &mut RecipeContext<'_>) {
    let shape = CloudShape {
        width: 192,
        height: 96,
        amplitude: 16.0,
        period: 24.0,
        sine_factor: 1.5,
    };
    let bands = [
        (ctx.color("#4992db"), 0.0),
        (ctx.color("#92dbff"), 2.0),
        (ctx.color("#ffffff"), 4.0),
    ];
    ctx.register("c", synthesize_clouds(&shape, &bands));
}

fn sun(ctx: &mut RecipeContext<'_>) {
    const RADIUS: i32 = 32;
    const EYE_SHIFT_X: i32 = 4;
    const EYE_SHIFT_Y: i32 = 2;

    let art = ctx.bitmap("g");
    let mut surface = ctx.surface(RADIUS as u32 * 2, RADIUS as u32 * 2);
    let r = RADIUS as f64;

    // Body
    paint(ctx, &mut surface, "#ffdb00");
    surface.fill_circle(r, r, r);
    paint(ctx, &mut surface, "#ffff92");
    surface.fill_circle(r - 2.0, r - 2.0, r - 2.0);

    // Eyes and mouth
    let mut mouth_radius = 12;
    for i in 0..5 {
        if i < 2 {
            surface.blit_region(
                &art,
                Flip::None,
                RADIUS - 10 + 12 * i - EYE_SHIFT_X,
                RADIUS - 4 - EYE_SHIFT_Y,
                Rect::new(48, 24, 8, 8),
            );
        }

        let dx = (RADIUS - EYE_SHIFT_X - mouth_radius) as f64;
        let dy = (RADIUS + 6 + i - EYE_SHIFT_Y) as f64;
        let w = (mouth_radius * 2) as f64;

        paint(ctx, &mut surface, "#ffdb00");
        surface.fill_rect(dx, dy + 1.0, w, 1.0);
        paint(ctx, &mut surface, "#000000");
        surface.fill_rect(dx, dy, w, 1.0);

        mouth_radius -= i + 1;
    }

    ctx.register("s", surface.into_image());
}

fn player(ctx: &mut RecipeContext<'_>) {
    let art = ctx.bitmap("g");
    let mut surface = ctx.surface(32, 24);

    paint(ctx, &mut surface, "#ffffff");
    surface.fill_rect(1.0, 14.0, 27.0, 6.0);

    surface.blit_region(&art, Flip::None, 0, 8, Rect::new(16, 32, 32, 16));
    surface.blit_region(&art, Flip::None, 9, 0, Rect::new(0, 32, 16, 16));

    ctx.register("p", surface.into_image());
}

fn gas_particles(ctx: &mut RecipeContext<'_>) {
    let mut surface = ctx.surface(64, 16);

    for i in 0..4 {
        let cx = (8 + i * 16) as f64;
        let radius = (5 - i) as f64;

        paint(ctx, &mut surface, "#b6b6b6");
        surface.fill_circle(cx, 8.0, radius);
        paint(ctx, &mut surface, "#ffffff");
        surface.fill_circle(cx - 1.0, 7.0, radius - 1.0);
    }

    ctx.register("gp", surface.into_image());
}

fn projectiles(ctx: &mut RecipeContext<'_>) {
    let art = ctx.bitmap("g");
    let raw = ctx.bitmap("_g");
    let mut surface = ctx.surface(32, 16);

    // Outlines
    for j in 0..2 {
        paint(ctx, &mut surface, if j == 0 { "#ffffff" } else { "#ff9292" });
        for i in 0..4 {
            let w = 10 - i * 2;
            let dy = 6 - i;
            surface.fill_rect((j * 16 + 9 - dy) as f64, dy as f64, w as f64, (14 - w) as f64);
        }
    }

    // Body, the second one recolored from the raw master
    let body = ctx.remap(&crop(&raw, Rect::new(48, 32, 8, 8)), &["10EF"]);
    surface.blit_region(&art, Flip::None, 4, 4, Rect::new(48, 32, 8, 8));
    surface.blit(&body, Flip::None, 20, 4);

    // Reflections
    paint(ctx, &mut surface, "#ffdbff");
    surface.fill_rect(6.0, 6.0, 2.0, 2.0);
    paint(ctx, &mut surface, "#ffb66d");
    surface.fill_rect(22.0, 6.0, 2.0, 2.0);

    ctx.register("pr", surface.into_image());
}

fn hud(ctx: &mut RecipeContext<'_>) {
    let raw = ctx.bitmap("_g");
    let art = ctx.bitmap("g");

    let heart_raw = crop(&raw, Rect::new(48, 48, 16, 16));
    let full_heart = ctx.remap(&heart_raw, &["10FG", "10FE", "10FE", "10FE"]);
    let empty_heart = ctx.remap(&heart_raw, &["1042", "1043", "1043", "1043"]);

    let mut surface = ctx.surface(32, 16);
    surface.blit(&full_heart, Flip::None, 0, 0);
    surface.blit(&empty_heart, Flip::None, 16, 0);

    // Faces
    for i in 0..2 {
        surface.blit_region(&art, Flip::None, 4 + 16 * i, 4, Rect::new(56, 32 + i * 8, 8, 8));
    }

    ctx.register("h", surface.into_image());
}

fn enemy_bodies(ctx: &mut RecipeContext<'_>) {
    let raw = ctx.bitmap("_g");
    let art = ctx.bitmap("g");

    // Stencil sheet first; the gray backdrop lands in bucket 1, which every
    // enemy table maps to transparent.
    let mut sheet = ctx.surface(96, 48);
    paint(ctx, &mut sheet, "#555555");
    sheet.fill_rect(0.0, 0.0, 96.0, 24.0);
    for i in 0..4 {
        let dx = i * 24;
        sheet.blit_region(&raw, Flip::None, dx + 2, 2, Rect::new(0, 48, 20, 20));
        // Hands for the gray ball
        if i == 2 {
            sheet.blit_region(&raw, Flip::None, dx + 3, 17, Rect::new(9, 68, 4, 4));
            sheet.blit_region(&raw, Flip::None, dx + 9, 17, Rect::new(0, 68, 9, 4));
        }
    }
    // Bottom for ball 4, built from the ball's side turned a quarter counterclockwise
    for i in 0..4 {
        let w = if i == 3 { 4 } else { 1 };
        sheet.blit_rotated(
            &raw,
            Flip::None,
            80,
            9 + i,
            Rect::new(20, 48, w, 20),
            Rotation::new(-1, (4, 10)),
        );
    }

    let recolored = ctx.remap(sheet.image(), ENEMY_TABLES);
    let mut surface = RasterSurface::from_image(recolored);

    // Faces
    for i in 0..4 {
        let h = if i == 1 { 8 } else { 4 };
        surface.blit_region(&art, Flip::None, i * 24 + 5, 32, Rect::new(40, 48, 8, h));
    }
    // Noses for balls 1 and 3
    surface.blit_region(&art, Flip::None, 7, 35, Rect::new(40, 56, 4, 4));
    surface.blit_region(&art, Flip::None, 54, 35, Rect::new(44, 56, 4, 8));
    // Upside-down mouth for ball 4
    surface.blit_region(&art, Flip::Vertical, 77, 37, Rect::new(40, 52, 12, 4));

    ctx.register("e", surface.into_image());
}

fn propeller(ctx: &mut RecipeContext<'_>) {
    const SX: [i32; 4] = [24, 24, 34, 24];
    const SY: [i32; 4] = [48, 56, 56, 56];
    const SW: [i32; 4] = [16, 10, 6, 10];

    let art = ctx.bitmap("g");
    let mut surface = ctx.surface(64, 16);

    for i in 0..4 {
        surface.blit_region(&art, Flip::None, i as i32 * 16 + 7, 8, Rect::new(51, 40, 2, 8));

        let sw = SW[i];
        let dx = i as i32 * 16 + 8 - sw / 2;
        let flip = if i == 3 { Flip::Horizontal } else { Flip::None };
        surface.blit_region(&art, flip, dx, 7, Rect::new(SX[i], SY[i], sw, 6));
    }

    ctx.register("ro", surface.into_image());
}

fn rings(ctx: &mut RecipeContext<'_>) {
    const SMALL_RING_COLORS: [&str; 4] = ["#ffdb00", "#ffb6b6", "#ffdbff", "#ff9292"];

    let mut small = ctx.surface(96, 96);
    let mut big = ctx.surface(48 * 4, 48);

    for (j, color) in SMALL_RING_COLORS.iter().enumerate() {
        let cy = (j * 24 + 12) as f64;
        paint(ctx, &mut small, color);
        let radius_factor = if j < 2 { 5.0 } else { 6.0 };

        for i in 0..4 {
            let t = i as f64 * 0.25;
            let cx = (i * 24 + 12) as f64;
            small.fill_ring(cx, cy, (radius_factor * 2.0 - 1.0) * t, (1.0 + t) * radius_factor);

            if j == 0 {
                let cx = (i * 48 + 24) as f64;
                paint(ctx, &mut big, "#ffb649");
                big.fill_ring(cx, 24.0, 19.0 * t, (1.0 + t) * 10.0);
                paint(ctx, &mut big, "#ffffb6");
                big.fill_ring(cx - 1.0, 23.0, 18.0 * t, (1.0 + t) * 9.0);
            }
        }
    }

    ctx.register("r1", small.into_image());
    ctx.register("r2", big.into_image());
}

fn shadows(ctx: &mut RecipeContext<'_>) {
    const COUNT: i32 = 8;

    let mut surface = ctx.surface(COUNT as u32 * 32, 32);
    paint(ctx, &mut surface, "#000000");
    for i in 0..COUNT {
        let r = (16 - i * 2) as f64;
        surface.fill_ellipse((i * 32 + 16) as f64, 16.0, r, r / 3.0);
    }

    ctx.register("sh", surface.into_image());
}

/// Distance between perspective grid lines at the horizon, in pixels.
pub const GROUND_LINE_DISTANCE: f64 = 24.0;

/// Draw the grass-colored ground with its perspective grid.
///
/// `top` is the horizon row and `scroll` the horizontal camera position; grid
/// lines shift by `scroll mod 24` at the horizon and fan out to twice the
/// surface width at the bottom edge, which reads as a receding 3D floor.
pub fn draw_ground_grid(
    surface: &mut RasterSurface,
    fill: Rgba<u8>,
    lines: Rgba<u8>,
    top: f64,
    scroll: f64,
) {
    let width = surface.width() as f64;
    let height = surface.height() as f64;

    surface.set_color(fill);
    surface.fill_rect(0.0, top + 4.0, width, height - top - 4.0);
    surface.set_color(lines);

    let count = (width / GROUND_LINE_DISTANCE).floor() as i32 + 2;
    let shift = -(scroll % GROUND_LINE_DISTANCE);
    for i in 0..count {
        let top_x = i as f64 * GROUND_LINE_DISTANCE + shift;
        let bottom_x = ((top_x - width / 2.0) / width) * (width * 2.0) + width / 2.0;
        surface.draw_stepped_line(top_x, top, bottom_x, height);
    }

    // Horizontal lines, spaced wider towards the viewer
    let mut dy = top;
    for i in 0..5 {
        dy += (i + 1) as f64 * 5.5;
        surface.fill_rect(0.0, dy, width, 1.0);
    }
}

fn ground(ctx: &mut RecipeContext<'_>) {
    let mut surface = ctx.surface(256, 48);
    let fill = ctx.color("#6db600");
    let lines = ctx.color("#dbff00");
    draw_ground_grid(&mut surface, fill, lines, 0.0, 0.0);
    ctx.register("gd", surface.into_image());
}

fn fonts(ctx: &mut RecipeContext<'_>) {
    let raw = ctx.bitmap("_f");

    let black = ctx.remap(&raw, &["0001"; 16 * 4]);
    let white = ctx.remap(&raw, &["0002"; 16 * 4]);

    // Glyphs with a one-pixel black outline
    let mut surface = ctx.surface(256, 64);
    for y in 0..4 {
        for x in 0..16 {
            let dx = x * 16 + 4;
            let dy = y * 16 + 6;
            let glyph = Rect::new(x * 8, y * 8, 8, 8);

            for i in -1..=1 {
                for j in -1..=1 {
                    surface.blit_region(&black, Flip::None, dx + i, dy + j, glyph);
                }
            }
            surface.blit_region(&white, Flip::None, dx, dy, glyph);
        }
    }

    ctx.register("fw", white);
    ctx.register("fo", surface.into_image());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compositor::AssetCompositor;
    use crate::palette::Palette;
    use crate::registry::AssetRegistry;

    fn run_with(
        masters: &[(&str, RgbaImage)],
    ) -> (AssetRegistry, crate::compositor::GenerationReport) {
        let mut registry = AssetRegistry::new();
        for (id, image) in masters {
            registry.add(id, image.clone()).unwrap();
        }
        let report = AssetCompositor::new(Palette::game().unwrap()).run(&mut registry);
        (registry, report)
    }

    fn white_masters() -> Vec<(&'static str, RgbaImage)> {
        vec![
            ("_g", RgbaImage::from_pixel(64, 72, Rgba([255, 255, 255, 255]))),
            ("_f", RgbaImage::from_pixel(128, 32, Rgba([255, 255, 255, 255]))),
        ]
    }

    #[test]
    fn test_game_art_table_covers_master() {
        assert_eq!(GAME_ART_TABLES.len(), 8 * 9);
        assert_eq!(ENEMY_TABLES.len(), 12 * 3);
    }

    #[test]
    fn test_every_output_is_registered_without_masters() {
        let (registry, report) = run_with(&[]);

        for recipe in RECIPES {
            for id in recipe.outputs {
                assert!(registry.contains(id), "missing output '{}'", id);
            }
        }
        // game_art, projectiles, hud and enemy_bodies need _g; fonts needs _f
        assert_eq!(report.warnings.len(), 5);
        assert_eq!(registry.get("g").dimensions(), (0, 0));
        assert_eq!(registry.get("s").dimensions(), (64, 64));
    }

    #[test]
    fn test_output_dimensions() {
        let (registry, report) = run_with(&white_masters());
        assert!(report.is_clean(), "{:?}", report.warnings);

        let expected = [
            ("g", (64, 72)),
            ("f", (32, 48)),
            ("b", (48, 64)),
            ("m", (48, 96)),
            ("c", (192, 96)),
            ("s", (64, 64)),
            ("p", (32, 24)),
            ("gp", (64, 16)),
            ("pr", (32, 16)),
            ("h", (32, 16)),
            ("e", (96, 48)),
            ("ro", (64, 16)),
            ("r1", (96, 96)),
            ("r2", (192, 48)),
            ("sh", (256, 32)),
            ("gd", (256, 48)),
            ("fw", (128, 32)),
            ("fo", (256, 64)),
        ];
        for (id, dims) in expected {
            assert_eq!(registry.get(id).dimensions(), dims, "bitmap '{}'", id);
        }
    }

    #[test]
    fn test_game_art_recolors_white_master() {
        let (registry, _) = run_with(&white_masters());
        let palette = Palette::game().unwrap();
        let art = registry.get("g");
        // Tile 0 "J056": white is bucket 3 -> index 6
        assert_eq!(*art.get_pixel(0, 0), palette.get(6).unwrap());
        // Tile 8 "0007": bucket 3 -> index 7
        assert_eq!(*art.get_pixel(0, 8), palette.get(7).unwrap());
    }

    #[test]
    fn test_bush_body_is_solid() {
        let (registry, _) = run_with(&white_masters());
        let bush = registry.get("b");
        assert_eq!(*bush.get_pixel(0, 63), Rgba([0x24, 0x6d, 0x00, 255]));
        assert_eq!(*bush.get_pixel(47, 16), Rgba([0x24, 0x6d, 0x00, 255]));
    }

    #[test]
    fn test_sun_body_and_rim() {
        let (registry, _) = run_with(&[]);
        let sun = registry.get("s");
        assert_eq!(*sun.get_pixel(20, 20), Rgba([0xff, 0xff, 0x92, 255]));
        assert_eq!(*sun.get_pixel(63, 32), Rgba([0xff, 0xdb, 0x00, 255]));
        assert_eq!(sun.get_pixel(0, 0)[3], 0);
    }

    #[test]
    fn test_sun_mouth_is_black() {
        let (registry, _) = run_with(&[]);
        let sun = registry.get("s");
        // First mouth line: radius 12 at y = 32 + 6 - 2
        assert_eq!(*sun.get_pixel(28, 36), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_cloud_offsets_stay_in_band() {
        let shape = CloudShape {
            width: 192,
            height: 96,
            amplitude: 16.0,
            period: 24.0,
            sine_factor: 1.5,
        };
        for x in 0..shape.width {
            let dy = cloud_offset(&shape, x);
            assert!(dy >= 1.0 && dy < 60.0, "x = {} gave {}", x, dy);
        }
    }

    #[test]
    fn test_clouds_top_clear_bottom_white() {
        let (registry, _) = run_with(&[]);
        let clouds = registry.get("c");
        for x in 0..clouds.width() {
            assert_eq!(clouds.get_pixel(x, 0)[3], 0);
            assert_eq!(*clouds.get_pixel(x, 95), Rgba([255, 255, 255, 255]));
        }
    }

    #[test]
    fn test_clouds_repeat_with_period_apart_from_ripple() {
        let shape = CloudShape {
            width: 96,
            height: 64,
            amplitude: 8.0,
            period: 24.0,
            sine_factor: 0.0,
        };
        let image = synthesize_clouds(&shape, &[(Rgba([255, 255, 255, 255]), 0.0)]);
        for x in 0..72 {
            for y in 0..64 {
                assert_eq!(image.get_pixel(x, y), image.get_pixel(x + 24, y));
            }
        }
    }

    #[test]
    fn test_rings_grow_holes() {
        let (registry, _) = run_with(&[]);
        let rings = registry.get("r1");
        let yellow = Rgba([0xff, 0xdb, 0x00, 255]);
        // t = 0 is a solid disc, t = 0.25 already has a hole
        assert_eq!(*rings.get_pixel(12, 12), yellow);
        assert_eq!(rings.get_pixel(36, 12)[3], 0);
        assert_eq!(*rings.get_pixel(36 + 6, 12), yellow);
    }

    #[test]
    fn test_shadows_shrink() {
        let (registry, _) = run_with(&[]);
        let shadows = registry.get("sh");
        assert_eq!(*shadows.get_pixel(16, 16), Rgba([0, 0, 0, 255]));
        assert_eq!(*shadows.get_pixel(0, 16), Rgba([0, 0, 0, 255]));
        assert_eq!(shadows.get_pixel(16, 10)[3], 0);
        // Last shadow has r / 3 < 1 and degenerates to a line
        assert_eq!(*shadows.get_pixel(7 * 32 + 16, 16), Rgba([0, 0, 0, 255]));
        assert_eq!(shadows.get_pixel(7 * 32 + 16, 17)[3], 0);
    }

    #[test]
    fn test_ground_grid() {
        let mut surface = RasterSurface::new(64, 32);
        let fill = Rgba([0, 128, 0, 255]);
        let lines = Rgba([255, 255, 0, 255]);
        draw_ground_grid(&mut surface, fill, lines, 0.0, 0.0);

        // Horizon line through x = 0 and first horizontal line at 5.5
        assert_eq!(surface.get_pixel(0, 0), Some(lines));
        assert_eq!(surface.get_pixel(10, 5), Some(lines));
        assert_eq!(surface.get_pixel(10, 8), Some(fill));
        assert_eq!(surface.get_pixel(10, 1).map(|p| p[3]), Some(0));
    }

    #[test]
    fn test_fonts_outline_black_core_white() {
        let (registry, _) = run_with(&white_masters());
        let outlined = registry.get("fo");
        assert_eq!(*outlined.get_pixel(4, 6), Rgba([255, 255, 255, 255]));
        assert_eq!(*outlined.get_pixel(3, 6), Rgba([0, 0, 0, 255]));
        assert_eq!(*outlined.get_pixel(12, 14), Rgba([0, 0, 0, 255]));
        assert_eq!(outlined.get_pixel(0, 0)[3], 0);
    }

    #[test]
    fn test_generation_is_deterministic() {
        let (first, _) = run_with(&white_masters());
        let (second, _) = run_with(&white_masters());
        for (id, bitmap) in first.iter() {
            assert_eq!(bitmap.as_raw(), second.get(id).as_raw(), "bitmap '{}'", id);
        }
    }
}
