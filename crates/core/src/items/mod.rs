//! Item catalog module.
//!
//! Defines the static item definitions served by the catalog provider
//! (name, level, type, recipe) and the trait the cost engine uses to
//! look them up. The provider itself lives in the `catalog` crate.

pub mod items_model;
pub mod items_traits;

pub use items_model::{ItemDefinition, ItemKind, RecipeEntry};
pub use items_traits::ItemCatalogTrait;
