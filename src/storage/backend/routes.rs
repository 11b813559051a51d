use async_trait::async_trait;
use sea_orm::{
    ActiveValue::Set, ConnectionTrait, DatabaseConnection, EntityTrait, QueryOrder,
    TransactionTrait, sea_query::OnConflict,
};
use tracing::trace;

use crate::errors::{AkaError, Result};
use crate::storage::RouteIndex;
use migration::entities::route_index;

/// Route index backed by the `route_index` table.
///
/// Shares its connection with the record store, which lets `reassign` run the
/// delete and the insert in one transaction.
pub struct SeaOrmRouteIndex {
    db: DatabaseConnection,
}

impl SeaOrmRouteIndex {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

async fn put_route<C: ConnectionTrait>(conn: &C, route: &str, id: &str) -> Result<()> {
    let active_model = route_index::ActiveModel {
        route: Set(route.to_string()),
        bookmark_id: Set(id.to_string()),
    };

    route_index::Entity::insert(active_model)
        .on_conflict(
            OnConflict::column(route_index::Column::Route)
                .update_column(route_index::Column::BookmarkId)
                .to_owned(),
        )
        .exec(conn)
        .await
        .map_err(|e| {
            AkaError::database_operation(format!("Failed to index route '{}': {}", route, e))
        })?;
    Ok(())
}

async fn delete_route<C: ConnectionTrait>(conn: &C, route: &str) -> Result<()> {
    route_index::Entity::delete_by_id(route.to_string())
        .exec(conn)
        .await
        .map_err(|e| {
            AkaError::database_operation(format!("Failed to unindex route '{}': {}", route, e))
        })?;
    Ok(())
}

#[async_trait]
impl RouteIndex for SeaOrmRouteIndex {
    async fn get(&self, route: &str) -> Result<String> {
        let model = route_index::Entity::find_by_id(route)
            .one(&self.db)
            .await
            .map_err(|e| {
                AkaError::database_operation(format!("Failed to look up route '{}': {}", route, e))
            })?
            .ok_or_else(|| AkaError::not_found(route.to_string()))?;

        Ok(model.bookmark_id)
    }

    async fn put(&self, route: &str, id: &str) -> Result<()> {
        put_route(&self.db, route, id).await
    }

    async fn delete(&self, route: &str) -> Result<()> {
        delete_route(&self.db, route).await
    }

    async fn scan(&self) -> Result<Vec<(String, String)>> {
        let models = route_index::Entity::find()
            .order_by_asc(route_index::Column::Route)
            .all(&self.db)
            .await
            .map_err(|e| {
                AkaError::database_operation(format!("Failed to scan route index: {}", e))
            })?;

        Ok(models
            .into_iter()
            .map(|m| (m.route, m.bookmark_id))
            .collect())
    }

    async fn reassign(&self, old_route: Option<&str>, new_route: &str, id: &str) -> Result<()> {
        let txn = self.db.begin().await.map_err(|e| {
            AkaError::database_operation(format!("Failed to begin transaction: {}", e))
        })?;

        if let Some(old) = old_route {
            delete_route(&txn, old).await?;
        }
        put_route(&txn, new_route, id).await?;

        txn.commit().await.map_err(|e| {
            AkaError::database_operation(format!("Failed to commit route reassignment: {}", e))
        })?;

        trace!(
            "Route index: '{}' -> '{}' for bookmark {}",
            old_route.unwrap_or(""),
            new_route,
            id
        );
        Ok(())
    }
}
