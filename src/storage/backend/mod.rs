//! SeaORM storage backend
//!
//! Both keyspaces are tables in one database (SQLite by default, MySQL or
//! PostgreSQL when pointed at one).

mod connection;
mod converters;
mod records;
mod routes;

use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::DatabaseConfig;
use crate::errors::{AkaError, Result};
use crate::storage::models::StorageConfig;

pub use connection::{connect_generic, connect_sqlite, run_migrations};
pub use converters::{bookmark_to_active_model, model_to_bookmark};
pub use records::SeaOrmRecordStore;
pub use routes::SeaOrmRouteIndex;

/// 从数据库 URL 推断数据库类型
pub fn infer_backend_from_url(database_url: &str) -> Result<String> {
    if database_url.starts_with("sqlite:")
        || database_url.ends_with(".db")
        || database_url.ends_with(".sqlite")
        || database_url == ":memory:"
    {
        Ok("sqlite".to_string())
    } else if database_url.starts_with("mysql://") || database_url.starts_with("mariadb://") {
        Ok("mysql".to_string())
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        Ok("postgres".to_string())
    } else {
        Err(AkaError::database_config(format!(
            "Cannot infer database type from URL: {}. Supported: sqlite://, mysql://, mariadb://, postgres://",
            database_url
        )))
    }
}

/// 规范化 backend 名称
pub fn normalize_backend_name(backend: &str) -> String {
    match backend {
        "mariadb" => "mysql".to_string(),
        other => other.to_string(),
    }
}

/// SeaORM-based storage: one connection pool, two keyspaces.
#[derive(Clone)]
pub struct SeaOrmStorage {
    db: DatabaseConnection,
    backend_name: String,
}

impl SeaOrmStorage {
    pub async fn new(database_url: &str, backend_name: &str) -> Result<Self> {
        Self::with_config(database_url, backend_name, &DatabaseConfig::default()).await
    }

    pub async fn with_config(
        database_url: &str,
        backend_name: &str,
        config: &DatabaseConfig,
    ) -> Result<Self> {
        if database_url.is_empty() {
            return Err(AkaError::database_config("database URL is empty"));
        }

        let backend_name = normalize_backend_name(backend_name);
        let db = if backend_name == "sqlite" {
            connect_sqlite(database_url, config.timeout).await?
        } else {
            connect_generic(database_url, &backend_name, config).await?
        };

        // 运行迁移
        run_migrations(&db).await?;

        info!("{} storage initialized", backend_name.to_uppercase());
        Ok(SeaOrmStorage { db, backend_name })
    }

    pub fn record_store(&self) -> Arc<SeaOrmRecordStore> {
        Arc::new(SeaOrmRecordStore::new(self.db.clone()))
    }

    pub fn route_index(&self) -> Arc<SeaOrmRouteIndex> {
        Arc::new(SeaOrmRouteIndex::new(self.db.clone()))
    }

    pub fn get_backend_config(&self) -> StorageConfig {
        StorageConfig {
            storage_type: self.backend_name.clone(),
        }
    }

    /// 获取数据库连接（用于关闭等需要直接访问数据库的场景）
    pub fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub async fn close(self) {
        if let Err(e) = self.db.close().await {
            warn!("Failed to close database connection: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_backend_from_url() {
        assert_eq!(
            infer_backend_from_url("sqlite:///home/me/.aka/aka.db?mode=rwc").unwrap(),
            "sqlite"
        );
        assert_eq!(infer_backend_from_url("aka.db").unwrap(), "sqlite");
        assert_eq!(infer_backend_from_url("sqlite::memory:").unwrap(), "sqlite");
        assert_eq!(
            infer_backend_from_url("mariadb://user@localhost/aka").unwrap(),
            "mysql"
        );
        assert_eq!(
            infer_backend_from_url("postgresql://localhost/aka").unwrap(),
            "postgres"
        );
        assert!(infer_backend_from_url("redis://localhost").is_err());
    }

    #[test]
    fn test_normalize_backend_name() {
        assert_eq!(normalize_backend_name("mariadb"), "mysql");
        assert_eq!(normalize_backend_name("sqlite"), "sqlite");
    }
}
