//! Block Catalog
//!
//! Ordered list of placeable block prototypes. A block type is an index into
//! this list; the list itself is supplied by whoever hosts the editor.

use thiserror::Error;

/// Index of a prototype in the [`BlockCatalog`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockType(pub u32);

impl BlockType {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("block catalog must contain at least one prototype")]
    Empty,
}

/// A placeable block prototype.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockPrototype {
    /// Stable identifier, also written into level metadata
    pub id: String,
}

/// Non-empty ordered list of block prototypes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockCatalog {
    prototypes: Vec<BlockPrototype>,
}

impl BlockCatalog {
    pub fn new(ids: Vec<String>) -> Result<Self, CatalogError> {
        if ids.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Self {
            prototypes: ids.into_iter().map(|id| BlockPrototype { id }).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.prototypes.len()
    }

    /// Always false; kept for the `len`/`is_empty` pair.
    pub fn is_empty(&self) -> bool {
        self.prototypes.is_empty()
    }

    pub fn get(&self, block_type: BlockType) -> Option<&BlockPrototype> {
        self.prototypes.get(block_type.index())
    }

    pub fn contains(&self, block_type: BlockType) -> bool {
        block_type.index() < self.prototypes.len()
    }

    /// Display identifier, or `"?"` for an index outside the catalog.
    pub fn name(&self, block_type: BlockType) -> &str {
        self.get(block_type).map(|p| p.id.as_str()).unwrap_or("?")
    }

    pub fn ids(&self) -> Vec<String> {
        self.prototypes.iter().map(|p| p.id.clone()).collect()
    }
}
