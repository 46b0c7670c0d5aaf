//! Item catalog provider for Craftimizer.
//!
//! This crate implements `craftimizer_core::items::ItemCatalogTrait` on
//! top of the public DofusDude API. The three item datasets (equipment,
//! resources, consumables) are downloaded in full, cached as JSON files
//! with a 24-hour staleness window, and indexed in memory for id lookups
//! and name search.
//!
//! ```text
//! DofusDudeCatalog ──> reqwest ──> api.dofusdu.de
//!        │
//!        └──> CatalogStore (JSON file cache)
//! ```

pub mod errors;
pub mod models;
pub mod provider;
pub mod store;

pub use errors::CatalogError;
pub use models::{ApiItem, ApiItemType, ApiRecipeEntry, ItemsResponse};
pub use provider::DofusDudeCatalog;
pub use store::{CachedDataset, CatalogStore, FsCatalogStore};
