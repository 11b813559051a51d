//! Durable storage for bookmarks
//!
//! Two independent keyspaces share one storage root:
//! - the record store: bookmark id -> full bookmark record
//! - the route index: route -> bookmark id
//!
//! The route index is a back-reference only. It never holds bookmark fields,
//! so renaming a route swaps one index key and rewrites nothing else.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::config::DatabaseConfig;
use crate::errors::{AkaError, Result};

pub mod backend;
pub mod models;

pub use backend::{SeaOrmRecordStore, SeaOrmRouteIndex, SeaOrmStorage};
pub use models::{Bookmark, ResourceType, StorageConfig};

/// Record store: bookmark id -> bookmark.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fails with `NotFound` if no record has this id.
    async fn get(&self, id: &str) -> Result<Bookmark>;

    /// Upsert keyed by `bookmark.id`.
    async fn put(&self, bookmark: &Bookmark) -> Result<()>;

    /// No-op if absent.
    async fn delete(&self, id: &str) -> Result<()>;

    /// All records in ascending id order.
    async fn scan(&self) -> Result<Vec<Bookmark>>;
}

/// Route index: route -> bookmark id.
#[async_trait]
pub trait RouteIndex: Send + Sync {
    /// Fails with `NotFound` if the route is unclaimed.
    async fn get(&self, route: &str) -> Result<String>;

    /// Upsert; a colliding route is overwritten.
    async fn put(&self, route: &str, id: &str) -> Result<()>;

    /// No-op if absent.
    async fn delete(&self, route: &str) -> Result<()>;

    /// All `(route, id)` pairs in ascending route order.
    async fn scan(&self) -> Result<Vec<(String, String)>>;

    async fn contains(&self, route: &str) -> Result<bool> {
        match self.get(route).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Move `id` from `old_route` (if any) to `new_route`.
    ///
    /// The default is delete-then-put and is not atomic: a failure in between
    /// leaves the bookmark unindexed until the next repair pass. Backends with
    /// multi-key transactions override this.
    async fn reassign(&self, old_route: Option<&str>, new_route: &str, id: &str) -> Result<()> {
        if let Some(old) = old_route {
            self.delete(old).await?;
        }
        self.put(new_route, id).await
    }
}

pub struct StorageFactory;

impl StorageFactory {
    /// Open the configured database, creating the data directory for the
    /// default SQLite location if needed.
    pub async fn create(config: &DatabaseConfig) -> Result<Arc<SeaOrmStorage>> {
        let database_url = config.resolved_database_url();

        // 从 URL 自动推断数据库类型
        let backend_type = backend::infer_backend_from_url(&database_url)?;

        if backend_type == "sqlite" && config.database_url.is_none() {
            let data_dir = Path::new(&config.data_dir);
            if !data_dir.exists() {
                debug!("Creating data directory {}", data_dir.display());
                std::fs::create_dir_all(data_dir).map_err(|e| {
                    AkaError::file_operation(format!(
                        "Failed to create data directory {}: {}",
                        data_dir.display(),
                        e
                    ))
                })?;
            }
        }

        let storage = SeaOrmStorage::with_config(&database_url, &backend_type, config).await?;
        Ok(Arc::new(storage))
    }
}
