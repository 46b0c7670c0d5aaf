//! Sales ledger module.
//!
//! Records the items the player has put up for sale and the ones already
//! sold, with paginated/filtered listing and overall profit/turnover
//! totals. The ledger is a collaborator of the crafting engine, not part
//! of it: it never feeds back into cost resolution.

pub mod sales_model;
pub mod sales_service;
pub mod sales_traits;


pub use sales_model::{
    NewSale, Sale, SaleUpdate, SalesFilter, SalesPage, SalesTotals,
};
pub use sales_service::SalesService;
pub use sales_traits::{SalesRepositoryTrait, SalesServiceTrait};

use thiserror::Error;

/// Errors specific to sales-ledger operations.
#[derive(Error, Debug)]
pub enum SalesError {
    #[error("Invalid sale data: {0}")]
    InvalidData(String),

    #[error("Sale {0} not found")]
    NotFound(i64),
}
