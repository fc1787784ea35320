//! Criterion benchmarks for stencilgen critical paths
//!
//! Benchmarks the core performance-critical operations:
//! - Palette: hex literal unpacking
//! - Remap: tile recoloring of masters
//! - Surface: filled primitives and rotated blits
//! - Compositor: a full generation run

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use image::{Rgba, RgbaImage};
use stencilgen::color_table::decode_all;
use stencilgen::compositor::AssetCompositor;
use stencilgen::palette::{unpack, Palette, GAME_PALETTE};
use stencilgen::recipes::GAME_ART_TABLES;
use stencilgen::registry::AssetRegistry;
use stencilgen::remap::{remap, remap_with};
use stencilgen::surface::{Flip, RasterSurface, Rect, Rotation};

// =============================================================================
// Test Data Generators
// =============================================================================

/// Master with a red-channel gradient hitting all four buckets
fn make_master(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        let red = (((x + y) % 4) * 85) as u8;
        Rgba([red, red, red, 255])
    })
}

fn game_palette() -> Palette {
    Palette::game().expect("built-in palette unpacks")
}

// =============================================================================
// Palette Benchmarks
// =============================================================================

fn bench_palette(c: &mut Criterion) {
    let mut group = c.benchmark_group("palette");

    group.bench_function("unpack_game", |b| b.iter(|| unpack(black_box(GAME_PALETTE))));

    let short: Vec<String> = (0..256)
        .map(|i| format!("{:02x}{:02x}{:02x}", i, 255 - i, i / 2))
        .collect();
    group.throughput(Throughput::Elements(short.len() as u64));
    group.bench_function("unpack_256_short", |b| b.iter(|| unpack(black_box(&short))));

    group.finish();
}

// =============================================================================
// Remap Benchmarks
// =============================================================================

fn bench_remap(c: &mut Criterion) {
    let mut group = c.benchmark_group("remap");
    let palette = game_palette();

    for size in [64u32, 128, 256].iter() {
        let master = make_master(*size, *size);
        let tiles = (size / 8) * (size / 8);
        let literals: Vec<&str> = (0..tiles as usize)
            .map(|i| GAME_ART_TABLES[i % GAME_ART_TABLES.len()])
            .collect();
        let tables = decode_all(&literals.iter().map(|t| Some(*t)).collect::<Vec<_>>());

        group.throughput(Throughput::Elements((size * size) as u64));
        group.bench_with_input(BenchmarkId::new("remap", size), &master, |b, master| {
            b.iter(|| remap(black_box(master), &tables, &palette))
        });
    }

    // Decode cost included
    let master = make_master(64, 72);
    group.bench_function("remap_with_game_art", |b| {
        b.iter(|| remap_with(black_box(&master), GAME_ART_TABLES, &palette))
    });

    group.finish();
}

// =============================================================================
// Surface Benchmarks
// =============================================================================

fn bench_surface(c: &mut Criterion) {
    let mut group = c.benchmark_group("surface");

    group.bench_function("fill_ring_r30", |b| {
        b.iter(|| {
            let mut surface = RasterSurface::new(64, 64);
            surface.fill_ring(black_box(32.0), 32.0, 20.0, 30.0);
            surface
        })
    });

    group.bench_function("fill_ellipse_30x12", |b| {
        b.iter(|| {
            let mut surface = RasterSurface::new(64, 32);
            surface.fill_ellipse(black_box(32.0), 16.0, 30.0, 12.0);
            surface
        })
    });

    let source = make_master(64, 64);
    group.bench_function("blit_rotated_quarter", |b| {
        b.iter(|| {
            let mut surface = RasterSurface::new(64, 64);
            surface.blit_rotated(
                black_box(&source),
                Flip::Horizontal,
                0,
                0,
                Rect::new(0, 0, 64, 64),
                Rotation::new(1, (32, 32)),
            );
            surface
        })
    });

    group.finish();
}

// =============================================================================
// Compositor Benchmarks
// =============================================================================

fn bench_compositor(c: &mut Criterion) {
    let mut group = c.benchmark_group("compositor");
    let compositor = AssetCompositor::new(game_palette());
    let game_art = make_master(64, 72);
    let font = make_master(128, 32);

    group.bench_function("run_all_recipes", |b| {
        b.iter(|| {
            let mut registry = AssetRegistry::new();
            registry.add("_g", game_art.clone()).expect("fresh registry");
            registry.add("_f", font.clone()).expect("fresh registry");
            compositor.run(black_box(&mut registry))
        })
    });

    group.finish();
}

criterion_group!(benches, bench_palette, bench_remap, bench_surface, bench_compositor);
criterion_main!(benches);
