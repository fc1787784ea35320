//! Ordered execution of generation recipes
//!
//! A recipe is a plain function that reads bitmaps from the registry, draws on
//! scratch surfaces and registers its outputs. Recipes run once, in a fixed
//! order, so later recipes may consume what earlier ones produced.
//!
//! Generation is lenient: a missing input bitmap or a duplicate id becomes a
//! [`Warning`] and the run continues with the next operation. Only a corrupt
//! palette literal stops generation, and it does so before any recipe runs.

use std::fmt;
use std::rc::Rc;

use image::{Rgba, RgbaImage};
use log::{debug, info, warn};

use crate::color::parse_color;
use crate::palette::{unpack, Palette, PaletteError};
use crate::recipes::RECIPES;
use crate::registry::{AssetRegistry, RegistryError};
use crate::remap::remap_with;
use crate::surface::RasterSurface;

/// Magenta used for fill colors that fail to parse
const MAGENTA: Rgba<u8> = Rgba([255, 0, 255, 255]);

/// A warning generated during asset generation
#[derive(Debug, Clone, PartialEq)]
pub struct Warning {
    pub message: String,
}

impl Warning {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// One named generation routine.
#[derive(Clone, Copy)]
pub struct Recipe {
    pub name: &'static str,
    /// Ids this recipe registers, for listing.
    pub outputs: &'static [&'static str],
    pub run: fn(&mut RecipeContext<'_>),
}

impl fmt::Debug for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Recipe")
            .field("name", &self.name)
            .field("outputs", &self.outputs)
            .finish_non_exhaustive()
    }
}

/// Everything a recipe may touch, passed explicitly.
pub struct RecipeContext<'a> {
    recipe: &'static str,
    registry: &'a mut AssetRegistry,
    palette: &'a Palette,
    report: &'a mut GenerationReport,
}

impl<'a> RecipeContext<'a> {
    pub fn palette(&self) -> &Palette {
        self.palette
    }

    pub fn registry(&self) -> &AssetRegistry {
        self.registry
    }

    /// Look up a bitmap, recording a warning when only the sentinel exists.
    pub fn bitmap(&mut self, id: &str) -> Rc<RgbaImage> {
        let bitmap = self.registry.get(id);
        if self.registry.is_sentinel(&bitmap) {
            self.warn(format!("bitmap '{}' is not registered", id));
        }
        bitmap
    }

    /// Register a finished bitmap.
    ///
    /// On an id collision the earlier bitmap stays registered, a warning is
    /// recorded and the earlier bitmap is returned.
    pub fn register(&mut self, id: &str, bitmap: RgbaImage) -> Rc<RgbaImage> {
        debug!("{}: registering '{}' ({}x{})", self.recipe, id, bitmap.width(), bitmap.height());
        match self.registry.add(id, bitmap) {
            Ok(shared) => {
                self.report.generated.push(id.to_string());
                shared
            }
            Err(e @ RegistryError::Duplicate(_)) => {
                self.warn(e.to_string());
                self.registry.get(id)
            }
        }
    }

    /// Parse a `#rrggbb` literal; a bad literal becomes magenta with a warning.
    pub fn color(&mut self, literal: &str) -> Rgba<u8> {
        match parse_color(literal) {
            Ok(color) => color,
            Err(e) => {
                self.warn(format!("invalid color '{}': {}", literal, e));
                MAGENTA
            }
        }
    }

    /// Recolor `source` with literal color tables and the run's palette.
    pub fn remap(&self, source: &RgbaImage, tables: &[&str]) -> RgbaImage {
        remap_with(source, tables, self.palette)
    }

    /// A transparent scratch surface.
    pub fn surface(&self, width: u32, height: u32) -> RasterSurface {
        RasterSurface::new(width, height)
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        let message = format!("{}: {}", self.recipe, message.into());
        warn!("{}", message);
        self.report.warnings.push(Warning::new(message));
    }
}

/// Outcome of a generation run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationReport {
    /// Ids registered by recipes, in order.
    pub generated: Vec<String>,
    pub warnings: Vec<Warning>,
}

impl GenerationReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Runs a fixed recipe list against a registry.
#[derive(Debug, Clone)]
pub struct AssetCompositor {
    palette: Palette,
    recipes: Vec<Recipe>,
}

impl AssetCompositor {
    /// Compositor running the built-in recipe list.
    pub fn new(palette: Palette) -> Self {
        Self::with_recipes(palette, RECIPES.to_vec())
    }

    /// Unpack `palette` literals and build a compositor with built-in recipes.
    ///
    /// # Errors
    ///
    /// Returns `PaletteError` for a malformed literal.
    pub fn from_literals<S: AsRef<str>>(palette: &[S]) -> Result<Self, PaletteError> {
        Ok(Self::new(unpack(palette)?))
    }

    pub fn with_recipes(palette: Palette, recipes: Vec<Recipe>) -> Self {
        Self { palette, recipes }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Run every recipe in order. Never stops early.
    pub fn run(&self, registry: &mut AssetRegistry) -> GenerationReport {
        let mut report = GenerationReport::default();

        for recipe in &self.recipes {
            info!("running recipe '{}'", recipe.name);
            let mut ctx = RecipeContext {
                recipe: recipe.name,
                registry: &mut *registry,
                palette: &self.palette,
                report: &mut report,
            };
            (recipe.run)(&mut ctx);
        }

        info!(
            "generated {} bitmaps with {} warnings",
            report.generated.len(),
            report.warnings.len()
        );
        report
    }
}
