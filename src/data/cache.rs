//! Dataset load cache.
//! Memoizes loaded datasets by `(path, max_rows)` for the life of the process.

use super::dataset::Dataset;
use super::loader::{DataLoader, DatasetError};
use log::debug;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock, PoisonError, RwLock};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    path: PathBuf,
    max_rows: usize,
}

/// Memoization table for loaded datasets.
///
/// Loads are serialized through `loading`; a published entry is never
/// replaced, so readers only ever see complete datasets.
#[derive(Default)]
pub struct DatasetCache {
    entries: RwLock<HashMap<CacheKey, Dataset>>,
    loading: Mutex<()>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide cache shared by every session.
    pub fn global() -> &'static DatasetCache {
        static CACHE: OnceLock<DatasetCache> = OnceLock::new();
        CACHE.get_or_init(DatasetCache::new)
    }

    /// Return the cached dataset for `(path, max_rows)`, loading it on first use.
    pub fn load(&self, path: &Path, max_rows: usize) -> Result<Dataset, DatasetError> {
        let key = CacheKey {
            path: path.to_path_buf(),
            max_rows,
        };
        if let Some(dataset) = self.get(&key) {
            debug!("cache hit for {} ({} rows)", path.display(), max_rows);
            return Ok(dataset);
        }

        let _guard = self.loading.lock().unwrap_or_else(PoisonError::into_inner);
        // Another session may have published while we waited.
        if let Some(dataset) = self.get(&key) {
            return Ok(dataset);
        }

        let dataset = DataLoader::load(path, max_rows)?;
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, dataset.clone());
        Ok(dataset)
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, key: &CacheKey) -> Option<Dataset> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::LoadError;

    #[test]
    fn failures_are_not_cached() {
        let cache = DatasetCache::new();
        let result = cache.load(Path::new("does/not/exist.csv"), 10);
        assert!(matches!(
            result,
            Err(DatasetError::Load(LoadError::NotFound(_)))
        ));
        assert!(cache.is_empty());
    }

    #[test]
    fn concurrent_loads_share_one_dataset() {
        let cache = DatasetCache::new();
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/collisions.csv");

        let loaded: Vec<Dataset> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| s.spawn(|| cache.load(&path, 100).unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(loaded.len(), 8);
        assert!(loaded.iter().all(|d| d.ptr_eq(&loaded[0])));
        assert_eq!(cache.len(), 1);
        assert!(cache.load(&path, 100).unwrap().ptr_eq(&loaded[0]));
    }
}
