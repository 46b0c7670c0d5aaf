//! Local cache for downloaded item datasets.
//!
//! The DofusDude datasets are a few megabytes each and change rarely, so
//! they are cached as JSON files and refreshed only once the 24-hour
//! staleness window elapses (matching how often the game data itself is
//! updated).

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::CatalogError;
use crate::models::ApiItem;

/// A dataset as stored on disk, with the time it was fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedDataset {
    pub fetched_at: DateTime<Utc>,
    pub items: Vec<ApiItem>,
}

impl CachedDataset {
    /// Whether the cached copy is older than `max_age_hours`.
    pub fn is_stale(&self, max_age_hours: i64) -> bool {
        Utc::now() - self.fetched_at > chrono::Duration::hours(max_age_hours)
    }
}

/// Storage contract for cached datasets.
pub trait CatalogStore: Send + Sync {
    /// The cached copy of a dataset, or `None` if never fetched.
    fn load(&self, dataset: &str) -> Result<Option<CachedDataset>, CatalogError>;

    /// Replaces the cached copy of a dataset.
    fn save(&self, dataset: &str, data: &CachedDataset) -> Result<(), CatalogError>;
}

/// File-backed store: one `<dataset>.json` per dataset in a data directory.
pub struct FsCatalogStore {
    dir: PathBuf,
}

impl FsCatalogStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, dataset: &str) -> PathBuf {
        self.dir.join(format!("{}.json", dataset))
    }
}

impl CatalogStore for FsCatalogStore {
    fn load(&self, dataset: &str) -> Result<Option<CachedDataset>, CatalogError> {
        let path = self.path_for(dataset);
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path)?;
        let cached =
            serde_json::from_str(&raw).map_err(|e| CatalogError::CacheCorrupt {
                dataset: dataset.to_string(),
                message: e.to_string(),
            })?;
        debug!(dataset, path = %path.display(), "loaded dataset from cache");
        Ok(Some(cached))
    }

    fn save(&self, dataset: &str, data: &CachedDataset) -> Result<(), CatalogError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(dataset);
        let raw = serde_json::to_string(data).map_err(|e| CatalogError::CacheCorrupt {
            dataset: dataset.to_string(),
            message: e.to_string(),
        })?;
        fs::write(&path, raw)?;
        debug!(dataset, path = %path.display(), "saved dataset to cache");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ApiItemType;

    fn dataset(fetched_at: DateTime<Utc>) -> CachedDataset {
        CachedDataset {
            fetched_at,
            items: vec![ApiItem {
                ankama_id: 1,
                name: "Iron".to_string(),
                level: 1,
                item_type: ApiItemType {
                    name: "Resource".to_string(),
                    id: 40,
                },
                recipe: None,
            }],
        }
    }

    #[test]
    fn roundtrips_a_dataset_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsCatalogStore::new(dir.path());

        store.save("resources", &dataset(Utc::now())).unwrap();
        let loaded = store.load("resources").unwrap().unwrap();

        assert_eq!(loaded.items.len(), 1);
        assert_eq!(loaded.items[0].name, "Iron");
    }

    #[test]
    fn missing_dataset_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsCatalogStore::new(dir.path());

        assert!(store.load("equipment").unwrap().is_none());
    }

    #[test]
    fn staleness_follows_the_fetch_timestamp() {
        let fresh = dataset(Utc::now());
        let stale = dataset(Utc::now() - chrono::Duration::hours(25));

        assert!(!fresh.is_stale(24));
        assert!(stale.is_stale(24));
    }
}
