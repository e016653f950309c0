//! Shared, swappable catalog snapshot.
//!
//! Generation calls take an `Arc<Catalog>` snapshot and keep it for their
//! whole run. A reload builds the new catalog completely before swapping the
//! reference, so readers see either the old catalog or the new one.

use crate::source::load_catalog_file;
use crate::{Catalog, Result};
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

#[derive(Debug)]
pub struct CatalogStore {
    current: RwLock<Arc<Catalog>>,
}

impl CatalogStore {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            current: RwLock::new(Arc::new(catalog)),
        }
    }

    /// The catalog in effect right now
    pub fn snapshot(&self) -> Arc<Catalog> {
        // The guarded value is a single Arc, so a poisoned lock still holds a
        // complete catalog
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Swap in `catalog`, returning the previous snapshot
    pub fn replace(&self, catalog: Catalog) -> Arc<Catalog> {
        let next = Arc::new(catalog);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let previous = std::mem::replace(&mut *guard, next);
        tracing::info!(
            "Catalog replaced: {} -> {} ({} exercises)",
            previous.fingerprint(),
            guard.fingerprint(),
            guard.len()
        );
        previous
    }

    /// Load a catalog file and swap it in
    ///
    /// On failure the current snapshot stays in place and the error is
    /// returned.
    pub fn reload_from(&self, path: &Path) -> Result<Arc<Catalog>> {
        match load_catalog_file(path) {
            Ok(catalog) => {
                self.replace(catalog);
                Ok(self.snapshot())
            }
            Err(e) => {
                tracing::warn!("Catalog reload from {:?} failed, keeping current: {}", path, e);
                Err(e)
            }
        }
    }
}

impl From<Catalog> for CatalogStore {
    fn from(catalog: Catalog) -> Self {
        Self::new(catalog)
    }
}
