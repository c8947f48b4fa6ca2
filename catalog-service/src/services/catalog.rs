//! In-memory item catalog.
//!
//! The catalog is read once at startup and never changes afterwards; handlers
//! share it through an `Arc` and only ever read from it.

use crate::models::Item;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<Item>,
}

impl Catalog {
    /// Read and parse a JSON array of item objects.
    ///
    /// Any I/O or parse failure is returned as-is; there is no partial load.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();

        let raw = std::fs::read(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let items: Vec<Item> =
            serde_json::from_slice(&raw).map_err(|source| CatalogError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let catalog = Self::from_items(items);
        if catalog.is_empty() {
            tracing::warn!(path = %path.display(), "Catalog is empty; every lookup will miss");
        } else {
            tracing::info!(
                path = %path.display(),
                items = catalog.len(),
                unkeyed = catalog.items.iter().filter(|i| i.id().is_none()).count(),
                "Catalog loaded"
            );
        }

        Ok(catalog)
    }

    pub fn from_items(items: Vec<Item>) -> Self {
        Self { items }
    }

    /// First item, in load order, whose id equals `id` exactly.
    pub fn find(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.has_id(id))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }
}
