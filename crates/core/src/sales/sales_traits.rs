//! Trait contracts for the sales ledger.

use crate::errors::Result;
use crate::sales::sales_model::{NewSale, Sale, SaleUpdate, SalesFilter, SalesPage, SalesTotals};
use rust_decimal::Decimal;

/// Service contract for the sales ledger.
#[async_trait::async_trait]
pub trait SalesServiceTrait: Send + Sync {
    /// Records a new pending sale. Profit is derived, not caller-supplied.
    async fn add_sale(
        &self,
        item_name: &str,
        quantity: i64,
        cost_price: Decimal,
        sell_price: Decimal,
    ) -> Result<Sale>;

    /// One page of sales, newest first. `page` is 1-based.
    fn get_sales(&self, page: i64, per_page: i64, filter: &SalesFilter) -> Result<SalesPage>;

    /// Applies a partial update and recomputes the stored profit.
    async fn update_sale(&self, id: i64, update: &SaleUpdate) -> Result<Sale>;

    async fn delete_sale(&self, id: i64) -> Result<()>;

    /// Profit and turnover across completed sales.
    fn get_totals(&self) -> Result<SalesTotals>;
}

/// Repository contract implemented by the storage layer.
#[async_trait::async_trait]
pub trait SalesRepositoryTrait: Send + Sync {
    fn get(&self, id: i64) -> Result<Sale>;

    fn list(&self, page: i64, per_page: i64, filter: &SalesFilter) -> Result<SalesPage>;

    async fn add(&self, sale: &NewSale) -> Result<Sale>;

    async fn update(&self, sale: &Sale) -> Result<Sale>;

    async fn delete(&self, id: i64) -> Result<()>;

    fn totals(&self) -> Result<SalesTotals>;
}
