//! Domain models for the sales ledger.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One ledger row. `sell_date` is `None` while the sale is still pending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: i64,
    pub item_name: String,
    pub quantity: i64,
    pub cost_price: Decimal,
    pub sell_price: Decimal,
    pub added_date: DateTime<Utc>,
    pub sell_date: Option<DateTime<Utc>>,
    pub profit: Decimal,
}

/// A fully-stamped row ready for insertion (everything but the id).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSale {
    pub item_name: String,
    pub quantity: i64,
    pub cost_price: Decimal,
    pub sell_price: Decimal,
    pub added_date: DateTime<Utc>,
    pub sell_date: Option<DateTime<Utc>>,
    pub profit: Decimal,
}

/// Partial update of a ledger row. `sell_date` uses the double-`Option`
/// convention: `None` leaves it untouched, `Some(None)` marks the sale
/// pending again.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleUpdate {
    pub quantity: Option<i64>,
    pub cost_price: Option<Decimal>,
    pub sell_price: Option<Decimal>,
    pub sell_date: Option<Option<DateTime<Utc>>>,
}

/// Listing filter. `sold` selects completed (`Some(true)`) or pending
/// (`Some(false)`) sales.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesFilter {
    pub item_name: Option<String>,
    pub sold: Option<bool>,
}

/// One page of sales, newest first, with the filtered total for the pager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesPage {
    pub sales: Vec<Sale>,
    pub total: i64,
}

/// Profit and turnover over completed sales only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesTotals {
    pub total_profit: Decimal,
    pub total_turnover: Decimal,
}

/// Profit of a sale: margin per unit times quantity.
pub(crate) fn sale_profit(quantity: i64, cost_price: Decimal, sell_price: Decimal) -> Decimal {
    (sell_price - cost_price) * Decimal::from(quantity)
}
