//! In-memory raster surface with analytic fills and compositing
//!
//! `RasterSurface` owns an `RgbaImage` plus a current fill color. Geometry
//! arguments are `f64` because recipes compute radii and offsets from
//! interpolation parameters; every coordinate is floored, never rounded.
//! Drawing is clipped to the surface, so every operation on a 0×0 surface
//! (such as one built from the missing-bitmap sentinel) is a no-op.

use std::collections::HashSet;

use image::{Rgba, RgbaImage};

use crate::shapes::{self, Window};

/// Fully transparent pixel.
pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Mirroring applied to a blitted region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flip {
    #[default]
    None,
    Horizontal,
    Vertical,
    Both,
}

impl Flip {
    fn horizontal(self) -> bool {
        matches!(self, Flip::Horizontal | Flip::Both)
    }

    fn vertical(self) -> bool {
        matches!(self, Flip::Vertical | Flip::Both)
    }
}

/// A source region in pixels. Negative sizes describe an empty region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// The whole of `image`.
    pub fn of(image: &RgbaImage) -> Self {
        Self::new(0, 0, image.width() as i32, image.height() as i32)
    }

    /// Intersection with `0..width` × `0..height`, or `None` when empty.
    ///
    /// Far edges are computed in i64, so a rect reaching past `i32::MAX` is
    /// clamped like any other.
    fn clamp_to(&self, width: u32, height: u32) -> Option<Rect> {
        let x0 = self.x.max(0);
        let y0 = self.y.max(0);
        let x1 = (self.x as i64 + self.w as i64).min(width.min(i32::MAX as u32) as i64);
        let y1 = (self.y as i64 + self.h as i64).min(height.min(i32::MAX as u32) as i64);
        if x1 <= x0 as i64 || y1 <= y0 as i64 {
            return None;
        }
        Some(Rect::new(x0, y0, (x1 - x0 as i64) as i32, (y1 - y0 as i64) as i32))
    }
}

/// Quarter-turn rotation around a pivot.
///
/// `quarter_turns` counts clockwise turns on screen (y pointing down); use -1
/// for a -90° turn. The pivot is given relative to the blit destination and is
/// where the unrotated region's pivot point stays fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rotation {
    pub quarter_turns: i32,
    pub pivot: (i32, i32),
}

impl Rotation {
    pub const fn new(quarter_turns: i32, pivot: (i32, i32)) -> Self {
        Self { quarter_turns, pivot }
    }

    /// Map a region-relative pixel to a destination-relative pixel.
    ///
    /// Works on doubled coordinates of pixel centers so quarter turns stay in
    /// integer arithmetic.
    fn apply(&self, u: i32, v: i32) -> (i32, i32) {
        let (px, py) = self.pivot;
        let mut ox = 2 * u + 1 - 2 * px;
        let mut oy = 2 * v + 1 - 2 * py;
        for _ in 0..self.quarter_turns.rem_euclid(4) {
            (ox, oy) = (-oy, ox);
        }
        (px + ox.div_euclid(2), py + oy.div_euclid(2))
    }
}

/// Floor a geometry argument to a pixel coordinate.
fn px(v: f64) -> i32 {
    v.floor() as i32
}

/// Source-over compositing of `src` onto `dst`.
pub fn composite(src: Rgba<u8>, dst: Rgba<u8>) -> Rgba<u8> {
    match src[3] {
        255 => src,
        0 => dst,
        _ => {
            let sa = src[3] as f32 / 255.0;
            let da = dst[3] as f32 / 255.0;
            let out_a = sa + da * (1.0 - sa);
            let channel = |i: usize| {
                let sc = src[i] as f32 / 255.0;
                let dc = dst[i] as f32 / 255.0;
                let c = (sc * sa + dc * da * (1.0 - sa)) / out_a;
                (c * 255.0).round().clamp(0.0, 255.0) as u8
            };
            Rgba([
                channel(0),
                channel(1),
                channel(2),
                (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
            ])
        }
    }
}

/// Extract `rect` of `source` as an independent image.
///
/// The result is always `rect.w × rect.h` (negative sizes give an empty
/// image); parts of the rectangle outside the source stay transparent.
///
/// # Examples
///
/// ```
/// use image::{Rgba, RgbaImage};
/// use stencilgen::surface::{crop, Rect};
///
/// let source = RgbaImage::from_pixel(4, 4, Rgba([9, 9, 9, 255]));
/// let piece = crop(&source, Rect::new(2, 2, 4, 4));
/// assert_eq!(piece.dimensions(), (4, 4));
/// assert_eq!(piece.get_pixel(3, 3)[3], 0);
/// ```
pub fn crop(source: &RgbaImage, rect: Rect) -> RgbaImage {
    let mut out = RgbaImage::new(rect.w.max(0) as u32, rect.h.max(0) as u32);
    if let Some(clamped) = rect.clamp_to(source.width(), source.height()) {
        for y in clamped.y..clamped.y + clamped.h {
            for x in clamped.x..clamped.x + clamped.w {
                let pixel = *source.get_pixel(x as u32, y as u32);
                let ox = (x as i64 - rect.x as i64) as u32;
                let oy = (y as i64 - rect.y as i64) as u32;
                out.put_pixel(ox, oy, pixel);
            }
        }
    }
    out
}

/// Build an image from raw RGBA bytes; `None` when the length does not match.
pub fn bitmap_from_rgba(bytes: &[u8], width: u32, height: u32) -> Option<RgbaImage> {
    RgbaImage::from_raw(width, height, bytes.to_vec())
}

/// A scratch drawing surface owned by one recipe until it is registered.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    image: RgbaImage,
    color: Rgba<u8>,
}

impl RasterSurface {
    /// A transparent surface with a black fill color.
    pub fn new(width: u32, height: u32) -> Self {
        Self::from_image(RgbaImage::new(width, height))
    }

    /// Draw on top of an existing image.
    pub fn from_image(image: RgbaImage) -> Self {
        Self {
            image,
            color: Rgba([0, 0, 0, 255]),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    pub fn color(&self) -> Rgba<u8> {
        self.color
    }

    pub fn set_color(&mut self, color: Rgba<u8>) {
        self.color = color;
    }

    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Rgba<u8>> {
        self.in_bounds(x, y).then(|| *self.image.get_pixel(x as u32, y as u32))
    }

    /// Overwrite one pixel without blending. Out-of-bounds writes are ignored.
    pub fn put_pixel(&mut self, x: i32, y: i32, color: Rgba<u8>) {
        if self.in_bounds(x, y) {
            self.image.put_pixel(x as u32, y as u32, color);
        }
    }

    /// Overwrite every pixel with `color`.
    pub fn clear(&mut self, color: Rgba<u8>) {
        for pixel in self.image.pixels_mut() {
            *pixel = color;
        }
    }

    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.image.width() && (y as u32) < self.image.height()
    }

    fn blend_pixel(&mut self, x: i32, y: i32, color: Rgba<u8>) {
        if self.in_bounds(x, y) {
            let dst = self.image.get_pixel_mut(x as u32, y as u32);
            *dst = composite(color, *dst);
        }
    }

    fn fill_pixels(&mut self, pixels: &HashSet<(i32, i32)>) {
        let color = self.color;
        for &(x, y) in pixels {
            self.blend_pixel(x, y, color);
        }
    }

    /// Fill `[floor(x), floor(x + w)) × [floor(y), floor(y + h))`.
    pub fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        let x0 = px(x).max(0);
        let y0 = px(y).max(0);
        let x1 = px(x + w).min(self.width() as i32);
        let y1 = px(y + h).min(self.height() as i32);
        let color = self.color;
        for yy in y0..y1 {
            for xx in x0..x1 {
                self.blend_pixel(xx, yy, color);
            }
        }
    }

    fn window(&self) -> Window {
        Window::new(self.width(), self.height())
    }

    pub fn fill_circle(&mut self, cx: f64, cy: f64, r: f64) {
        let pixels = shapes::rasterize_circle_clipped(px(cx), px(cy), px(r), self.window());
        self.fill_pixels(&pixels);
    }

    pub fn fill_ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64) {
        let pixels =
            shapes::rasterize_ellipse_clipped(px(cx), px(cy), px(rx), px(ry), self.window());
        self.fill_pixels(&pixels);
    }

    pub fn fill_ring(&mut self, cx: f64, cy: f64, r_in: f64, r_out: f64) {
        let pixels =
            shapes::rasterize_ring_clipped(px(cx), px(cy), px(r_in), px(r_out), self.window());
        self.fill_pixels(&pixels);
    }

    /// Whole-pixel line between two floored endpoints.
    pub fn draw_stepped_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) {
        self.fill_pixels(&shapes::rasterize_line((px(x0), px(y0)), (px(x1), px(y1))));
    }

    /// Draw all of `source` with its top-left corner at (dx, dy).
    pub fn blit(&mut self, source: &RgbaImage, flip: Flip, dx: i32, dy: i32) {
        self.blit_region(source, flip, dx, dy, Rect::of(source));
    }

    /// Draw `region` of `source` with its top-left corner at (dx, dy).
    ///
    /// The region is clamped to the source; clamping never shifts the pixels
    /// that remain. Mirroring happens within the requested region.
    pub fn blit_region(&mut self, source: &RgbaImage, flip: Flip, dx: i32, dy: i32, region: Rect) {
        self.blit_transformed(source, flip, dx, dy, region, None);
    }

    /// Like [`blit_region`](Self::blit_region), then rotate the mirrored
    /// region around `rotation.pivot`.
    pub fn blit_rotated(
        &mut self,
        source: &RgbaImage,
        flip: Flip,
        dx: i32,
        dy: i32,
        region: Rect,
        rotation: Rotation,
    ) {
        self.blit_transformed(source, flip, dx, dy, region, Some(rotation));
    }

    fn blit_transformed(
        &mut self,
        source: &RgbaImage,
        flip: Flip,
        dx: i32,
        dy: i32,
        region: Rect,
        rotation: Option<Rotation>,
    ) {
        let Some(clamped) = region.clamp_to(source.width(), source.height()) else {
            return;
        };

        for sy in clamped.y..clamped.y + clamped.h {
            for sx in clamped.x..clamped.x + clamped.w {
                let mut u = sx - region.x;
                let mut v = sy - region.y;
                if flip.horizontal() {
                    u = region.w - 1 - u;
                }
                if flip.vertical() {
                    v = region.h - 1 - v;
                }
                let (u, v) = match rotation {
                    Some(rotation) => rotation.apply(u, v),
                    None => (u, v),
                };

                // Destinations past the i32 range are off the surface anyway
                let (Some(x), Some(y)) = (dx.checked_add(u), dy.checked_add(v)) else {
                    continue;
                };
                let pixel = *source.get_pixel(sx as u32, sy as u32);
                self.blend_pixel(x, y, pixel);
            }
        }
    }

    /// Copy `rect` of this surface into a new image.
    pub fn crop(&self, rect: Rect) -> RgbaImage {
        crop(&self.image, rect)
    }
}
