use std::borrow::Cow;
use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, web};
use tracing::{debug, error, trace, warn};

use crate::config::RoutesConfig;
use crate::errors::AkaError;
use crate::services::{RedirectResolver, Resolution};

pub struct RedirectService {}

impl RedirectService {
    pub async fn handle_redirect(
        req: HttpRequest,
        resolver: web::Data<Arc<RedirectResolver>>,
        routes: web::Data<RoutesConfig>,
    ) -> HttpResponse {
        let path = req.path();
        trace!("Redirect request for {}", path);

        match resolver.resolve(path).await {
            Ok(Resolution::Redirect { target }) => Self::finish_redirect(&req, &target),
            Ok(Resolution::ServeFile { path }) => Self::serve_file(&path).await,
            Err(AkaError::NotFound(route)) => {
                debug!("No live bookmark for route '{}'", route);
                Self::not_found_response(&req, &route, &routes.admin_ui_path)
            }
            Err(AkaError::ResourceUnavailable(path)) => Self::gone_response(&path),
            Err(e) => {
                error!("Storage error during redirect lookup: {}", e);
                Self::error_response()
            }
        }
    }

    fn finish_redirect(req: &HttpRequest, target: &str) -> HttpResponse {
        let target_url = Self::build_target_url(req, target);

        HttpResponse::build(StatusCode::TEMPORARY_REDIRECT)
            .insert_header(("Location", target_url.as_ref()))
            .finish()
    }

    /// 把请求的 query string 原样拼到目标 URL 上
    #[inline]
    fn build_target_url<'a>(req: &HttpRequest, target: &'a str) -> Cow<'a, str> {
        match req.uri().query().filter(|q| !q.is_empty()) {
            None => Cow::Borrowed(target),
            Some(query) => {
                let separator = if target.contains('?') { "&" } else { "?" };
                Cow::Owned(format!("{}{}{}", target, separator, query))
            }
        }
    }

    async fn serve_file(path: &str) -> HttpResponse {
        match tokio::fs::read(path).await {
            Ok(bytes) => HttpResponse::Ok()
                .content_type(Self::get_content_type(path))
                .body(bytes),
            // 解析与读取之间文件被删除
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::gone_response(path),
            Err(e) => {
                error!("Failed to read {}: {}", path, e);
                Self::error_response()
            }
        }
    }

    #[inline]
    fn not_found_response(req: &HttpRequest, route: &str, admin_ui_path: &str) -> HttpResponse {
        let conn = req.connection_info();
        let host = conn.host();

        HttpResponse::build(StatusCode::NOT_FOUND)
            .insert_header(("Content-Type", "text/plain; charset=utf-8"))
            .body(format!(
                "{}/{} not found. Please double check {}{}.",
                host, route, host, admin_ui_path
            ))
    }

    #[inline]
    fn gone_response(path: &str) -> HttpResponse {
        warn!("Bookmarked file is gone: {}", path);

        HttpResponse::build(StatusCode::GONE)
            .insert_header(("Content-Type", "text/plain; charset=utf-8"))
            .body(format!("{} is no longer available", path))
    }

    #[inline]
    fn error_response() -> HttpResponse {
        HttpResponse::build(StatusCode::INTERNAL_SERVER_ERROR)
            .insert_header(("Content-Type", "text/plain; charset=utf-8"))
            .body("Internal Server Error")
    }

    /// 根据文件扩展名确定 Content-Type
    fn get_content_type(path: &str) -> &'static str {
        let ext = std::path::Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("html") | Some("htm") => "text/html; charset=utf-8",
            Some("txt") | Some("md") => "text/plain; charset=utf-8",
            Some("css") => "text/css",
            Some("js") => "application/javascript",
            Some("json") => "application/json",
            Some("pdf") => "application/pdf",
            Some("png") => "image/png",
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("gif") => "image/gif",
            Some("svg") => "image/svg+xml",
            Some("ico") => "image/x-icon",
            _ => "application/octet-stream",
        }
    }
}

/// 兜底路由：其它 scope 未认领的 GET/HEAD 都走这里
pub fn redirect_routes() -> actix_web::Scope {
    web::scope("")
        .route("/{path:.*}", web::get().to(RedirectService::handle_redirect))
        .route("/{path:.*}", web::head().to(RedirectService::handle_redirect))
}
