//! Directory-listing cache for platform variant lookups.
//!
//! Each directory is listed at most once per cache, and the lower-cased
//! listing is reused for every later lookup in the same session. The cache
//! is an explicit value: a session gets its own by default, and workers
//! that process independent files in parallel may share one through an
//! `Arc` since entries never change once computed.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashmap::DashMap;

use crate::error::{Error, Result};
use crate::runtime::Runtime;

/// Lower-cased file names of one directory.
pub type Listing = Arc<[String]>;

#[derive(Debug, Default)]
pub struct DirectoryCache {
    listings: DashMap<PathBuf, Listing>,
}

impl DirectoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached listing of `dir`, reading it through `runtime` on
    /// first use. Read failures are not cached.
    pub fn listing(&self, dir: &Path, runtime: &dyn Runtime) -> Result<Listing> {
        if let Some(hit) = self.listings.get(dir) {
            return Ok(Arc::clone(hit.value()));
        }

        let names = runtime.read_dir(dir).map_err(|source| Error::DirectoryRead {
            dir: dir.to_path_buf(),
            source,
        })?;
        let listing: Listing = names.into_iter().map(|n| n.to_lowercase()).collect();
        tracing::trace!(dir = %dir.display(), entries = listing.len(), "cached directory listing");

        // A concurrent reader may have won the race; keep whichever landed first.
        let entry = self
            .listings
            .entry(dir.to_path_buf())
            .or_insert(listing);
        Ok(Arc::clone(entry.value()))
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn clear(&self) {
        self.listings.clear();
    }
}
