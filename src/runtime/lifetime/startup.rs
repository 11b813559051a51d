use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::{DatabaseConfig, RoutesConfig};
use crate::services::{BookmarkService, RedirectResolver};
use crate::storage::{RecordStore, RouteIndex, SeaOrmStorage, StorageFactory};

pub struct StartupContext {
    pub storage: Arc<SeaOrmStorage>,
    pub bookmark_service: Arc<BookmarkService>,
    pub resolver: Arc<RedirectResolver>,
    pub route_config: RoutesConfig,
}

/// 打开存储并构建服务（serve 与 repair 共用）
pub async fn open_services(
    database: &DatabaseConfig,
    routes: &RoutesConfig,
) -> Result<StartupContext> {
    let storage = StorageFactory::create(database)
        .await
        .context("Failed to create storage backend")?;
    info!(
        "Using storage backend: {}",
        storage.get_backend_config().storage_type
    );

    let records: Arc<dyn RecordStore> = storage.record_store();
    let index: Arc<dyn RouteIndex> = storage.route_index();

    let bookmark_service = Arc::new(
        BookmarkService::new(records.clone(), index.clone())
            .with_reserved_routes(routes.reserved_routes()),
    );
    let resolver = Arc::new(RedirectResolver::new(records, index));

    Ok(StartupContext {
        storage,
        bookmark_service,
        resolver,
        route_config: routes.clone(),
    })
}

/// 准备服务器启动的上下文
///
/// 修复失败只记录日志，不阻止启动：解析本身能容忍不一致的索引。
pub async fn prepare_server_startup(
    database: &DatabaseConfig,
    routes: &RoutesConfig,
) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let context = open_services(database, routes).await?;

    match context.bookmark_service.repair().await {
        Ok(report) if report.is_clean() => debug!("Route index is consistent"),
        Ok(report) => warn!("Startup repair: {}", report),
        Err(e) => warn!("Startup repair failed, continuing: {}", e.format_simple()),
    }

    info!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );
    Ok(context)
}
