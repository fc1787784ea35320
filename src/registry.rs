//! Bitmap registry shared by the generator and the render layer
//!
//! The registry is append-only: ids are never overwritten or removed. Lookups
//! of unknown ids return a shared 0×0 sentinel instead of failing, so every
//! drawing operation that consumes it degrades to a no-op.

use std::collections::HashMap;
use std::rc::Rc;

use image::RgbaImage;
use thiserror::Error;

/// Prefix marking an unprocessed stencil master (e.g. `_g`).
pub const MASTER_PREFIX: char = '_';

/// Error when registering a bitmap.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The id is already taken; the existing bitmap is kept.
    #[error("bitmap '{0}' is already registered")]
    Duplicate(String),
}

/// Whether `id` names an unprocessed master rather than a finished sprite.
pub fn is_master(id: &str) -> bool {
    id.starts_with(MASTER_PREFIX)
}

/// Append-only map from id to shared bitmap.
#[derive(Debug, Clone)]
pub struct AssetRegistry {
    bitmaps: HashMap<String, Rc<RgbaImage>>,
    /// Registration order, for deterministic listing and output.
    order: Vec<String>,
    sentinel: Rc<RgbaImage>,
}

impl Default for AssetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            bitmaps: HashMap::new(),
            order: Vec::new(),
            sentinel: Rc::new(RgbaImage::new(0, 0)),
        }
    }

    /// Register `bitmap` under `id` and return the shared handle.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::Duplicate` if `id` is taken. The registry is
    /// left unchanged in that case.
    pub fn add(&mut self, id: &str, bitmap: RgbaImage) -> Result<Rc<RgbaImage>, RegistryError> {
        self.add_shared(id, Rc::new(bitmap))
    }

    /// Register an already shared bitmap without copying it.
    pub fn add_shared(
        &mut self,
        id: &str,
        bitmap: Rc<RgbaImage>,
    ) -> Result<Rc<RgbaImage>, RegistryError> {
        if self.bitmaps.contains_key(id) {
            return Err(RegistryError::Duplicate(id.to_string()));
        }
        self.bitmaps.insert(id.to_string(), Rc::clone(&bitmap));
        self.order.push(id.to_string());
        Ok(bitmap)
    }

    /// The bitmap registered under `id`, or the missing-bitmap sentinel.
    pub fn get(&self, id: &str) -> Rc<RgbaImage> {
        self.try_get(id).unwrap_or_else(|| Rc::clone(&self.sentinel))
    }

    /// The bitmap registered under `id`, if any.
    pub fn try_get(&self, id: &str) -> Option<Rc<RgbaImage>> {
        self.bitmaps.get(id).cloned()
    }

    /// Whether `bitmap` is this registry's missing-bitmap sentinel.
    pub fn is_sentinel(&self, bitmap: &Rc<RgbaImage>) -> bool {
        Rc::ptr_eq(bitmap, &self.sentinel)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.bitmaps.contains_key(id)
    }

    /// Ids in registration order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// `(id, bitmap)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Rc<RgbaImage>)> {
        self.order
            .iter()
            .filter_map(|id| self.bitmaps.get(id).map(|bmp| (id.as_str(), bmp)))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
