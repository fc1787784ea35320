//! stencilgen - Library for generating game sprites from palette-indexed masters
//!
//! This library provides functionality to:
//! - Unpack hex palettes and decode base-32 color tables
//! - Remap 8×8 tiles of a luminance-bucketed master onto palette colors
//! - Draw filled primitives and blit with flips and quarter-turn rotation
//! - Run a fixed, ordered list of generation recipes into an asset registry

pub mod cli;
pub mod color;
pub mod color_table;
pub mod compositor;
pub mod config;
pub mod loader;
pub mod output;
pub mod palette;
pub mod recipes;
pub mod registry;
pub mod remap;
pub mod shapes;
pub mod surface;
