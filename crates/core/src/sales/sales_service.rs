//! Sales ledger service.

use std::sync::Arc;

use chrono::Utc;
use log::debug;
use rust_decimal::Decimal;

use crate::errors::Result;
use crate::sales::sales_model::{
    sale_profit, NewSale, Sale, SaleUpdate, SalesFilter, SalesPage, SalesTotals,
};
use crate::sales::sales_traits::{SalesRepositoryTrait, SalesServiceTrait};
use crate::sales::SalesError;

const DEFAULT_PER_PAGE: i64 = 10;

pub struct SalesService {
    repository: Arc<dyn SalesRepositoryTrait>,
}

impl SalesService {
    pub fn new(repository: Arc<dyn SalesRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl SalesServiceTrait for SalesService {
    async fn add_sale(
        &self,
        item_name: &str,
        quantity: i64,
        cost_price: Decimal,
        sell_price: Decimal,
    ) -> Result<Sale> {
        if item_name.trim().is_empty() {
            return Err(SalesError::InvalidData("item name is empty".to_string()).into());
        }
        if quantity <= 0 {
            return Err(
                SalesError::InvalidData(format!("non-positive quantity {}", quantity)).into(),
            );
        }

        let sale = NewSale {
            item_name: item_name.to_string(),
            quantity,
            cost_price,
            sell_price,
            added_date: Utc::now(),
            sell_date: None,
            profit: sale_profit(quantity, cost_price, sell_price),
        };
        debug!("Adding sale of {}x {}", quantity, item_name);
        self.repository.add(&sale).await
    }

    fn get_sales(&self, page: i64, per_page: i64, filter: &SalesFilter) -> Result<SalesPage> {
        let page = page.max(1);
        let per_page = if per_page > 0 {
            per_page
        } else {
            DEFAULT_PER_PAGE
        };
        self.repository.list(page, per_page, filter)
    }

    async fn update_sale(&self, id: i64, update: &SaleUpdate) -> Result<Sale> {
        let mut sale = self.repository.get(id)?;

        if let Some(quantity) = update.quantity {
            if quantity <= 0 {
                return Err(
                    SalesError::InvalidData(format!("non-positive quantity {}", quantity)).into(),
                );
            }
            sale.quantity = quantity;
        }
        if let Some(cost_price) = update.cost_price {
            sale.cost_price = cost_price;
        }
        if let Some(sell_price) = update.sell_price {
            sale.sell_price = sell_price;
        }
        if let Some(sell_date) = update.sell_date {
            sale.sell_date = sell_date;
        }
        sale.profit = sale_profit(sale.quantity, sale.cost_price, sale.sell_price);

        self.repository.update(&sale).await
    }

    async fn delete_sale(&self, id: i64) -> Result<()> {
        self.repository.delete(id).await
    }

    fn get_totals(&self) -> Result<SalesTotals> {
        self.repository.totals()
    }
}
