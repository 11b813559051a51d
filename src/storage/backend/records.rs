use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder, sea_query::OnConflict};
use tracing::trace;

use super::converters::{bookmark_to_active_model, model_to_bookmark};
use crate::errors::{AkaError, Result};
use crate::storage::{Bookmark, RecordStore};
use migration::entities::bookmark;

/// Record store backed by the `bookmarks` table.
pub struct SeaOrmRecordStore {
    db: DatabaseConnection,
}

impl SeaOrmRecordStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RecordStore for SeaOrmRecordStore {
    async fn get(&self, id: &str) -> Result<Bookmark> {
        let model = bookmark::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| {
                AkaError::database_operation(format!("Failed to load bookmark '{}': {}", id, e))
            })?
            .ok_or_else(|| AkaError::not_found(format!("Bookmark '{}' not found", id)))?;

        model_to_bookmark(model)
    }

    async fn put(&self, record: &Bookmark) -> Result<()> {
        let active_model = bookmark_to_active_model(record)?;

        bookmark::Entity::insert(active_model)
            .on_conflict(
                OnConflict::column(bookmark::Column::Id)
                    .update_column(bookmark::Column::Value)
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(|e| {
                AkaError::database_operation(format!(
                    "Failed to save bookmark '{}': {}",
                    record.id, e
                ))
            })?;

        trace!("Bookmark record '{}' written", record.id);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        bookmark::Entity::delete_by_id(id.to_string())
            .exec(&self.db)
            .await
            .map_err(|e| {
                AkaError::database_operation(format!("Failed to delete bookmark '{}': {}", id, e))
            })?;
        Ok(())
    }

    async fn scan(&self) -> Result<Vec<Bookmark>> {
        let models = bookmark::Entity::find()
            .order_by_asc(bookmark::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| {
                AkaError::database_operation(format!("Failed to scan bookmarks: {}", e))
            })?;

        models.into_iter().map(model_to_bookmark).collect()
    }
}
