use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use diesel::SqliteConnection;
use rust_decimal::Decimal;

use super::model::{NewSaleDB, SaleDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::sales::dsl as sales_dsl;
use craftimizer_core::sales::{
    NewSale, Sale, SalesFilter, SalesPage, SalesRepositoryTrait, SalesTotals,
};
use craftimizer_core::Result;

pub struct SalesRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SalesRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }

    fn filtered_query<'a>(filter: &SalesFilter) -> crate::schema::sales::BoxedQuery<'a, Sqlite> {
        let mut query = sales_dsl::sales.into_boxed();
        if let Some(ref term) = filter.item_name {
            query = query.filter(sales_dsl::item_name.like(format!("%{}%", term)));
        }
        match filter.sold {
            Some(true) => query = query.filter(sales_dsl::sell_date.is_not_null()),
            Some(false) => query = query.filter(sales_dsl::sell_date.is_null()),
            None => {}
        }
        query
    }
}

#[async_trait]
impl SalesRepositoryTrait for SalesRepository {
    fn get(&self, id: i64) -> Result<Sale> {
        let mut conn = get_connection(&self.pool)?;
        let row: SaleDB = sales_dsl::sales
            .filter(sales_dsl::id.eq(id))
            .first::<SaleDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(Sale::from(row))
    }

    fn list(&self, page: i64, per_page: i64, filter: &SalesFilter) -> Result<SalesPage> {
        let mut conn = get_connection(&self.pool)?;

        let total: i64 = Self::filtered_query(filter)
            .count()
            .get_result(&mut conn)
            .map_err(StorageError::from)?;

        // RFC 3339 strings in UTC sort lexicographically in time order.
        let rows: Vec<SaleDB> = Self::filtered_query(filter)
            .order(sales_dsl::added_date.desc())
            .offset((page - 1) * per_page)
            .limit(per_page)
            .load::<SaleDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(SalesPage {
            sales: rows.into_iter().map(Sale::from).collect(),
            total,
        })
    }

    async fn add(&self, sale: &NewSale) -> Result<Sale> {
        let db_row = NewSaleDB::from(sale);
        let inserted: SaleDB = self
            .writer
            .exec(move |conn: &mut SqliteConnection| -> Result<SaleDB> {
                diesel::insert_into(sales_dsl::sales)
                    .values(&db_row)
                    .get_result::<SaleDB>(conn)
                    .map_err(StorageError::from)
                    .map_err(Into::into)
            })
            .await?;
        Ok(Sale::from(inserted))
    }

    async fn update(&self, sale: &Sale) -> Result<Sale> {
        let db_row = SaleDB::from(sale);
        let sale_cloned = sale.clone();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                diesel::replace_into(sales_dsl::sales)
                    .values(&db_row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await?;
        Ok(sale_cloned)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                diesel::delete(sales_dsl::sales.filter(sales_dsl::id.eq(id)))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }

    fn totals(&self) -> Result<SalesTotals> {
        let mut conn = get_connection(&self.pool)?;
        let sold: Vec<SaleDB> = sales_dsl::sales
            .filter(sales_dsl::sell_date.is_not_null())
            .load::<SaleDB>(&mut conn)
            .map_err(StorageError::from)?;

        let mut totals = SalesTotals {
            total_profit: Decimal::ZERO,
            total_turnover: Decimal::ZERO,
        };
        for sale in sold.into_iter().map(Sale::from) {
            totals.total_profit += sale.profit;
            totals.total_turnover += sale.sell_price * Decimal::from(sale.quantity);
        }
        Ok(totals)
    }
}
