//! Shape rasterization primitives for pixel-perfect rendering.
//!
//! Every function turns a shape into the set of integer pixel coordinates it
//! covers. Membership is decided with exact integer arithmetic on pixel
//! positions, so there is no anti-aliasing and results are deterministic.
//! The plain functions return unclipped sets; the `_clipped` variants only
//! visit pixels inside a [`Window`], which is what
//! [`crate::surface::RasterSurface`] fills with.

use std::collections::HashSet;

/// Rasterize a filled rectangle with top-left corner (x, y) and size (w, h).
///
/// # Examples
///
/// ```
/// use stencilgen::shapes::rasterize_rect;
///
/// let pixels = rasterize_rect(0, 0, 3, 2);
/// assert_eq!(pixels.len(), 6);
/// assert!(pixels.contains(&(2, 1)));
/// ```
pub fn rasterize_rect(x: i32, y: i32, w: i32, h: i32) -> HashSet<(i32, i32)> {
    let mut pixels = HashSet::new();

    if w <= 0 || h <= 0 {
        return pixels;
    }

    for dy in 0..h {
        for dx in 0..w {
            pixels.insert((x + dx, y + dy));
        }
    }

    pixels
}

/// Rasterize a line using Bresenham's line algorithm.
///
/// The line advances one whole pixel per step along its major axis, giving
/// the stepped look used for the ground grid.
///
/// # Examples
///
/// ```
/// use stencilgen::shapes::rasterize_line;
///
/// let pixels = rasterize_line((0, 0), (3, 3));
/// assert_eq!(pixels.len(), 4);
/// assert!(pixels.contains(&(3, 3)));
/// ```
pub fn rasterize_line(p0: (i32, i32), p1: (i32, i32)) -> HashSet<(i32, i32)> {
    let mut pixels = HashSet::new();

    let (mut x0, mut y0) = p0;
    let (x1, y1) = p1;

    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        pixels.insert((x0, y0));

        if x0 == x1 && y0 == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }

    pixels
}

/// Pixel window `0..width × 0..height` that clipped rasterizers stay inside.
///
/// Clipping bounds the work by the window instead of the shape, so a huge
/// radius on a small surface stays cheap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub width: u32,
    pub height: u32,
}

impl Window {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Inclusive pixel bounds, in i64 so center ± radius cannot overflow.
#[derive(Clone, Copy)]
struct Bounds {
    x0: i64,
    y0: i64,
    x1: i64,
    y1: i64,
}

impl Bounds {
    const UNCLIPPED: Bounds = Bounds {
        x0: i32::MIN as i64,
        y0: i32::MIN as i64,
        x1: i32::MAX as i64,
        y1: i32::MAX as i64,
    };

    fn of(window: Window) -> Self {
        Bounds {
            x0: 0,
            y0: 0,
            x1: (window.width as i64 - 1).min(i32::MAX as i64),
            y1: (window.height as i64 - 1).min(i32::MAX as i64),
        }
    }

    /// Columns `cx - rx ..= cx + rx` that fall inside the bounds.
    fn columns(&self, cx: i32, rx: i32) -> std::ops::RangeInclusive<i64> {
        (cx as i64 - rx as i64).max(self.x0)..=(cx as i64 + rx as i64).min(self.x1)
    }

    fn rows(&self, cy: i32, ry: i32) -> std::ops::RangeInclusive<i64> {
        (cy as i64 - ry as i64).max(self.y0)..=(cy as i64 + ry as i64).min(self.y1)
    }
}

/// Rasterize a filled circle: a pixel is included iff `dx² + dy² <= r²`.
///
/// A negative radius covers nothing; radius 0 covers the center pixel.
pub fn rasterize_circle(cx: i32, cy: i32, r: i32) -> HashSet<(i32, i32)> {
    rasterize_ring(cx, cy, 0, r)
}

/// [`rasterize_circle`] restricted to `window`.
pub fn rasterize_circle_clipped(cx: i32, cy: i32, r: i32, window: Window) -> HashSet<(i32, i32)> {
    rasterize_ring_clipped(cx, cy, 0, r, window)
}

/// Rasterize an annulus: a pixel is included iff `r_in² <= dx² + dy² <= r_out²`.
///
/// # Examples
///
/// ```
/// use stencilgen::shapes::rasterize_ring;
///
/// let pixels = rasterize_ring(0, 0, 2, 3);
/// assert!(!pixels.contains(&(0, 0)));
/// assert!(pixels.contains(&(3, 0)));
/// assert!(pixels.contains(&(0, -2)));
/// ```
pub fn rasterize_ring(cx: i32, cy: i32, r_in: i32, r_out: i32) -> HashSet<(i32, i32)> {
    ring_pixels(cx, cy, r_in, r_out, Bounds::UNCLIPPED)
}

/// [`rasterize_ring`] restricted to `window`.
pub fn rasterize_ring_clipped(
    cx: i32,
    cy: i32,
    r_in: i32,
    r_out: i32,
    window: Window,
) -> HashSet<(i32, i32)> {
    ring_pixels(cx, cy, r_in, r_out, Bounds::of(window))
}

fn ring_pixels(cx: i32, cy: i32, r_in: i32, r_out: i32, bounds: Bounds) -> HashSet<(i32, i32)> {
    let mut pixels = HashSet::new();

    if r_out < 0 || r_in > r_out {
        return pixels;
    }

    let r_in = r_in.max(0) as i128;
    let inner_sq = r_in * r_in;
    let outer_sq = (r_out as i128) * (r_out as i128);

    for y in bounds.rows(cy, r_out) {
        let dy = (y - cy as i64) as i128;
        for x in bounds.columns(cx, r_out) {
            let dx = (x - cx as i64) as i128;
            let dist_sq = dx * dx + dy * dy;
            if dist_sq >= inner_sq && dist_sq <= outer_sq {
                // Bounds keep x and y inside i32
                pixels.insert((x as i32, y as i32));
            }
        }
    }

    pixels
}

/// Rasterize a filled axis-aligned ellipse centered at (cx, cy).
///
/// A pixel is included iff it lies in the `rx × ry` bounding box and
/// `dx²·ry² + dy²·rx² <= rx²·ry²`, the normalized-distance test with the
/// denominators multiplied out. A zero radius degenerates to a line through
/// the center; a negative radius covers nothing.
///
/// # Examples
///
/// ```
/// use stencilgen::shapes::rasterize_ellipse;
///
/// let pixels = rasterize_ellipse(5, 5, 3, 1);
/// assert!(pixels.contains(&(8, 5)));
/// assert!(!pixels.contains(&(8, 6)));
/// ```
pub fn rasterize_ellipse(cx: i32, cy: i32, rx: i32, ry: i32) -> HashSet<(i32, i32)> {
    ellipse_pixels(cx, cy, rx, ry, Bounds::UNCLIPPED)
}

/// [`rasterize_ellipse`] restricted to `window`.
pub fn rasterize_ellipse_clipped(
    cx: i32,
    cy: i32,
    rx: i32,
    ry: i32,
    window: Window,
) -> HashSet<(i32, i32)> {
    ellipse_pixels(cx, cy, rx, ry, Bounds::of(window))
}

fn ellipse_pixels(cx: i32, cy: i32, rx: i32, ry: i32, bounds: Bounds) -> HashSet<(i32, i32)> {
    let mut pixels = HashSet::new();

    if rx < 0 || ry < 0 {
        return pixels;
    }

    // rx²·ry² needs more than 64 bits for radii near i32::MAX
    let rx_sq = (rx as i128) * (rx as i128);
    let ry_sq = (ry as i128) * (ry as i128);

    for y in bounds.rows(cy, ry) {
        let dy = (y - cy as i64) as i128;
        for x in bounds.columns(cx, rx) {
            let dx = (x - cx as i64) as i128;
            if dx * dx * ry_sq + dy * dy * rx_sq <= rx_sq * ry_sq {
                pixels.insert((x as i32, y as i32));
            }
        }
    }

    pixels
}
