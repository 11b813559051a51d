use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, web};
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, trace};

use crate::services::BookmarkService;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bookmarks: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub response_time_ms: u32,
}

/// Health Service
///
/// 只检查 record store 能否被完整扫描。
pub struct HealthService;

impl HealthService {
    pub async fn health_check(service: web::Data<Arc<BookmarkService>>) -> impl Responder {
        let start_time = Instant::now();
        trace!("Received health check request");

        let (status, bookmarks, error) =
            match tokio::time::timeout(Duration::from_secs(5), service.get_all()).await {
                Ok(Ok(all)) => {
                    trace!("Storage health check passed, {} bookmarks found", all.len());
                    (StatusCode::OK, Some(all.len()), None)
                }
                Ok(Err(e)) => {
                    error!("Storage health check failed: {}", e);
                    (
                        StatusCode::SERVICE_UNAVAILABLE,
                        None,
                        Some(format!("database error: {}", e.message())),
                    )
                }
                Err(_) => {
                    error!("Storage health check timeout");
                    (
                        StatusCode::SERVICE_UNAVAILABLE,
                        None,
                        Some("timeout".to_string()),
                    )
                }
            };

        let body = HealthResponse {
            status: if status.is_success() {
                "healthy"
            } else {
                "unhealthy"
            },
            bookmarks,
            error,
            response_time_ms: start_time.elapsed().as_millis() as u32,
        };

        HttpResponse::build(status)
            .append_header(("Content-Type", "application/json; charset=utf-8"))
            .json(body)
    }

    // 活跃性检查，进程能响应即可
    pub async fn liveness_check() -> impl Responder {
        trace!("Received liveness check request");

        HttpResponse::Ok()
            .append_header(("Content-Type", "text/plain"))
            .body("OK")
    }
}

/// Health 路由配置
pub fn health_routes(prefix: &str) -> actix_web::Scope {
    web::scope(prefix)
        .route("", web::get().to(HealthService::health_check))
        .route("", web::head().to(HealthService::health_check))
        .route("/live", web::get().to(HealthService::liveness_check))
        .route("/live", web::head().to(HealthService::liveness_check))
}
