//! Item catalog - the registry of item definitions
//!
//! The catalog is the engine's only source of items. Cells hold shared
//! handles ([`Item`]) into it, so refills and swaps move a pointer rather than
//! a string. Equality still goes through [`ItemKind`]'s value equality.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use crate::error::{EngineError, Result};
use crate::rng::SimpleRng;
use crate::types::{ItemFamily, ItemKind};

/// Shared handle to a catalog item
pub type Item = Arc<ItemKind>;

/// Color names of the built-in catalog
pub const STANDARD_COLORS: [&str; 4] = ["bear", "chick", "frog", "panda"];

/// Name of the built-in universal item
pub const STANDARD_UNIVERSAL: &str = "universal";

/// On-disk shape of a catalog document
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogDefinition {
    pub items: Vec<ItemKind>,
}

/// Item definitions grouped by family
#[derive(Debug, Clone)]
pub struct ItemCatalog {
    ordinary: Vec<Item>,
    four_piece: Vec<Item>,
    double_three: Vec<Item>,
    universal: Item,
}

impl ItemCatalog {
    /// Build a catalog from a flat list of definitions.
    ///
    /// Requires at least one ordinary item and one universal item, and unique
    /// names. When several universal items are given, the first is used.
    pub fn new(definitions: impl IntoIterator<Item = ItemKind>) -> Result<Self> {
        let mut ordinary = Vec::new();
        let mut four_piece = Vec::new();
        let mut double_three = Vec::new();
        let mut universal = None;
        let mut seen = HashSet::new();

        for kind in definitions {
            if !seen.insert(kind.name.clone()) {
                return Err(EngineError::InvalidCatalog(format!(
                    "duplicate item name `{}`",
                    kind.name
                )));
            }
            let item = Arc::new(kind);
            match item.family {
                ItemFamily::Ordinary => ordinary.push(item),
                ItemFamily::FourPiece => four_piece.push(item),
                ItemFamily::DoubleThree => double_three.push(item),
                ItemFamily::Universal => {
                    if universal.is_none() {
                        universal = Some(item);
                    } else {
                        debug!(name = %item.name, "ignoring extra universal item");
                    }
                }
            }
        }

        if ordinary.is_empty() {
            return Err(EngineError::InvalidCatalog(
                "at least one ordinary item is required".to_string(),
            ));
        }
        let universal = universal.ok_or_else(|| {
            EngineError::InvalidCatalog("a universal item is required".to_string())
        })?;

        Ok(Self {
            ordinary,
            four_piece,
            double_three,
            universal,
        })
    }

    /// Parse a JSON catalog document (`{"items": [...]}`)
    pub fn from_json(json: &str) -> Result<Self> {
        let definition: CatalogDefinition = serde_json::from_str(json)?;
        Self::new(definition.items)
    }

    /// Built-in catalog: four animals, their specials, and the universal item
    pub fn standard() -> Self {
        let mut definitions = Vec::with_capacity(STANDARD_COLORS.len() * 3 + 1);
        for color in STANDARD_COLORS {
            let base = ItemKind::ordinary(color, 10);
            let four = base.four_piece_name().unwrap_or_default();
            let double = base.double_three_name().unwrap_or_default();
            definitions.push(ItemKind::new(ItemFamily::FourPiece, four, 20));
            definitions.push(ItemKind::new(ItemFamily::DoubleThree, double, 20));
            definitions.push(base);
        }
        definitions.push(ItemKind::new(ItemFamily::Universal, STANDARD_UNIVERSAL, 50));

        Self::new(definitions).expect("standard catalog is valid")
    }

    pub fn ordinary(&self) -> &[Item] {
        &self.ordinary
    }

    pub fn ordinary_count(&self) -> usize {
        self.ordinary.len()
    }

    pub fn universal(&self) -> Item {
        Arc::clone(&self.universal)
    }

    /// Draw a random ordinary item
    pub fn random_ordinary(&self, rng: &mut SimpleRng) -> Item {
        Arc::clone(&self.ordinary[rng.next_index(self.ordinary.len())])
    }

    /// Find an ordinary item by name
    pub fn ordinary_named(&self, name: &str) -> Option<Item> {
        self.ordinary.iter().find(|item| item.name == name).cloned()
    }

    /// Look up any item by name
    pub fn lookup(&self, name: &str) -> Option<Item> {
        self.ordinary
            .iter()
            .chain(&self.four_piece)
            .chain(&self.double_three)
            .chain(std::iter::once(&self.universal))
            .find(|item| item.name == name)
            .cloned()
    }

    /// Line-of-4 special for the color of `cleared`
    pub fn four_piece_for(&self, cleared: &ItemKind) -> Result<Item> {
        let name = cleared.four_piece_name().unwrap_or_default();
        Self::find_special(&self.four_piece, name)
    }

    /// Cross-shape special for the color of `cleared`
    pub fn double_three_for(&self, cleared: &ItemKind) -> Result<Item> {
        let name = cleared.double_three_name().unwrap_or_default();
        Self::find_special(&self.double_three, name)
    }

    fn find_special(pool: &[Item], name: String) -> Result<Item> {
        pool.iter()
            .find(|item| item.name == name)
            .cloned()
            .ok_or(EngineError::CatalogLookupFailure { name })
    }
}

impl Default for ItemCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
