//! DofusDude catalog provider.
//!
//! Downloads the full item datasets once, keeps them indexed in memory,
//! and serves lookups without further network traffic. The download is
//! best-effort: a failing fetch falls back to a stale cached copy when
//! one exists, so the tracker keeps working offline.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use reqwest::Client;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use craftimizer_core::items::{ItemCatalogTrait, ItemDefinition};
use craftimizer_core::Result;

use crate::errors::CatalogError;
use crate::models::{ApiItem, ItemsResponse};
use crate::store::{CachedDataset, CatalogStore};

const BASE_URL: &str = "https://api.dofusdu.de/dofus2/en";
const DATASETS: [&str; 3] = ["equipment", "resources", "consumables"];
const STALE_AFTER_HOURS: i64 = 24;
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Item catalog backed by the DofusDude API with a local dataset cache.
pub struct DofusDudeCatalog {
    client: Client,
    base_url: String,
    store: Arc<dyn CatalogStore>,
    index: RwLock<HashMap<i64, ItemDefinition>>,
}

impl DofusDudeCatalog {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self::with_base_url(store, BASE_URL)
    }

    /// Overridable base URL, for tests and alternative game versions.
    pub fn with_base_url(store: Arc<dyn CatalogStore>, base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into(),
            store,
            index: RwLock::new(HashMap::new()),
        }
    }

    /// Loads all datasets into the in-memory index.
    ///
    /// Each dataset is tried independently; a single failing dataset only
    /// shrinks the catalog. The call fails only when no dataset could be
    /// loaded at all (no network and no cache).
    pub async fn init(&self) -> std::result::Result<(), CatalogError> {
        let mut index = HashMap::new();
        let mut loaded = 0usize;

        for dataset in DATASETS {
            match self.load_dataset(dataset).await {
                Ok(items) => {
                    debug!(dataset, count = items.len(), "dataset loaded");
                    loaded += 1;
                    for item in items {
                        let definition = ItemDefinition::from(item);
                        index.insert(definition.ankama_id, definition);
                    }
                }
                Err(e) => {
                    warn!(dataset, error = %e, "dataset unavailable, continuing without it");
                }
            }
        }

        if loaded == 0 {
            return Err(CatalogError::NoData("all datasets".to_string()));
        }

        *self.index.write().await = index;
        Ok(())
    }

    async fn load_dataset(&self, dataset: &str) -> std::result::Result<Vec<ApiItem>, CatalogError> {
        let cached = match self.store.load(dataset) {
            Ok(cached) => cached,
            Err(e) => {
                warn!(dataset, error = %e, "ignoring unreadable cache file");
                None
            }
        };

        if let Some(ref fresh) = cached {
            if !fresh.is_stale(STALE_AFTER_HOURS) {
                return Ok(fresh.items.clone());
            }
        }

        match self.fetch_dataset(dataset).await {
            Ok(items) => {
                let snapshot = CachedDataset {
                    fetched_at: Utc::now(),
                    items: items.clone(),
                };
                if let Err(e) = self.store.save(dataset, &snapshot) {
                    warn!(dataset, error = %e, "failed to cache dataset");
                }
                Ok(items)
            }
            Err(e) => match cached {
                // A stale catalog beats no catalog.
                Some(stale) => {
                    warn!(dataset, error = %e, "fetch failed, using stale cache");
                    Ok(stale.items)
                }
                None => Err(e),
            },
        }
    }

    async fn fetch_dataset(&self, dataset: &str) -> std::result::Result<Vec<ApiItem>, CatalogError> {
        let url = format!("{}/items/{}/all", self.base_url, dataset);
        debug!(dataset, url, "fetching dataset");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::ApiError {
                dataset: dataset.to_string(),
                status: status.as_u16(),
            });
        }

        let parsed: ItemsResponse = response.json().await?;
        Ok(parsed.items)
    }
}

#[async_trait::async_trait]
impl ItemCatalogTrait for DofusDudeCatalog {
    async fn get_item_details(&self, ankama_id: i64) -> Result<Option<ItemDefinition>> {
        Ok(self.index.read().await.get(&ankama_id).cloned())
    }

    async fn search_items(&self, query: &str) -> Result<Vec<ItemDefinition>> {
        let query = query.to_lowercase();
        let index = self.index.read().await;
        let mut results: Vec<ItemDefinition> = index
            .values()
            .filter(|item| item.name.to_lowercase().contains(&query))
            .cloned()
            .collect();
        results.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(results)
    }
}
