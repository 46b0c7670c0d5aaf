use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;

use super::model::CraftedItemDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::crafted_items::dsl as crafted_items_dsl;
use craftimizer_core::crafting::{CraftedItemRepositoryTrait, CraftedItemResult};
use craftimizer_core::Result;

pub struct CraftedItemRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl CraftedItemRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl CraftedItemRepositoryTrait for CraftedItemRepository {
    fn list(&self) -> Result<Vec<CraftedItemResult>> {
        let mut conn = get_connection(&self.pool)?;
        let rows: Vec<CraftedItemDB> = crafted_items_dsl::crafted_items
            .order(crafted_items_dsl::name.asc())
            .load::<CraftedItemDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(CraftedItemResult::from).collect())
    }

    async fn upsert(&self, item: &CraftedItemResult) -> Result<()> {
        let db_row = CraftedItemDB::from(item);
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                diesel::replace_into(crafted_items_dsl::crafted_items)
                    .values(&db_row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }

    async fn delete(&self, ankama_id: i64) -> Result<()> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                diesel::delete(
                    crafted_items_dsl::crafted_items
                        .filter(crafted_items_dsl::ankama_id.eq(ankama_id)),
                )
                .execute(conn)
                .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }
}
