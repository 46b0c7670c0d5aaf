//! Crafting cost module.
//!
//! This module owns the cost resolution engine and everything around it:
//!
//! - [`crafting_model`] - Requests, results, aggregate entries, cached recipe shapes
//! - [`resolver`] - The recursive cost engine and override handling
//! - [`crafting_service`] - Locked service facade with persistence of user costs
//! - [`crafting_traits`] - Service and repository contracts
//! - [`errors`] - Branch-level resolution errors
//!
//! # Architecture
//!
//! ```text
//! CraftingService ──> CostResolver ──> ItemCatalogTrait (catalog crate)
//!       │
//!       └──> SavedCostRepositoryTrait (storage crate)
//! ```
//!
//! The service is the only concurrency boundary: the resolver itself is
//! plain mutable state and must never be shared between passes.

pub mod crafting_model;
pub mod crafting_service;
pub mod crafting_traits;
pub mod errors;
pub mod resolver;

#[cfg(test)]
mod resolver_tests;


pub use crafting_model::{
    CraftedItemRequest, CraftedItemResult, RecipeShape, RecipeShapeLine, ResolvedIngredient,
    ResolvedIntermediate, SavedCost, DEFAULT_ITEM_TYPE,
};
pub use crafting_service::CraftingService;
pub use crafting_traits::{
    CraftedItemRepositoryTrait, CraftingServiceTrait, SavedCostRepositoryTrait,
};
pub use errors::CraftingError;
pub use resolver::{CostResolver, MAX_RECIPE_DEPTH};
