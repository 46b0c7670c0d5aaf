use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;

use super::model::IngredientCostDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::ingredient_costs::dsl as ingredient_costs_dsl;
use craftimizer_core::crafting::{SavedCost, SavedCostRepositoryTrait};
use craftimizer_core::Result;

pub struct SavedCostRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SavedCostRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl SavedCostRepositoryTrait for SavedCostRepository {
    fn load_saved_costs(&self) -> Result<HashMap<String, SavedCost>> {
        let mut conn = get_connection(&self.pool)?;
        let rows: Vec<IngredientCostDB> = ingredient_costs_dsl::ingredient_costs
            .load::<IngredientCostDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let record = SavedCost::from(row);
                (record.name.clone(), record)
            })
            .collect())
    }

    async fn set_ingredient_cost(&self, record: &SavedCost) -> Result<()> {
        let db_row = IngredientCostDB::from(record);
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                diesel::replace_into(ingredient_costs_dsl::ingredient_costs)
                    .values(&db_row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }

    async fn delete_ingredient_cost(&self, name: &str) -> Result<()> {
        let name_to_delete = name.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                diesel::delete(
                    ingredient_costs_dsl::ingredient_costs
                        .filter(ingredient_costs_dsl::name.eq(name_to_delete)),
                )
                .execute(conn)
                .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }
}
