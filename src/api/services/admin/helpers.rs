//! Admin API 帮助函数

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, error::InternalError, web};
use serde::Serialize;
use tracing::{error, trace};

use crate::errors::AkaError;

use super::types::ErrorBody;

/// 构建 JSON 响应
pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(body)
}

/// 构建错误响应
pub fn error_response(status: StatusCode, message: impl Into<String>) -> HttpResponse {
    json_response(status, &ErrorBody::new(message))
}

/// 从 AkaError 构建错误响应（自动映射 HTTP 状态码）
///
/// 存储层错误只返回通用信息，细节写日志。
pub fn error_from_aka(err: &AkaError) -> HttpResponse {
    let mut body = ErrorBody::new(err.message());
    let status = match err {
        AkaError::NotFound(_) => StatusCode::NOT_FOUND,
        AkaError::DuplicateRoute(route) => {
            body.route = Some(route.clone());
            StatusCode::CONFLICT
        }
        AkaError::InvalidRoute(route) => {
            body.route = Some(route.clone());
            StatusCode::BAD_REQUEST
        }
        AkaError::InvalidResource { resource_type, .. } => {
            body.resource_type = Some(*resource_type);
            StatusCode::UNPROCESSABLE_ENTITY
        }
        AkaError::ResourceUnavailable(_) => StatusCode::GONE,
        AkaError::DatabaseConfig(_)
        | AkaError::DatabaseConnection(_)
        | AkaError::DatabaseOperation(_)
        | AkaError::Serialization(_)
        | AkaError::FileOperation(_) => {
            error!("Admin API: storage failure: {}", err.format_simple());
            body = ErrorBody::new("Internal server error");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    json_response(status, &body)
}

/// JSON 解析失败时返回 400 + ErrorBody，而不是 actix 默认的纯文本
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        trace!("Admin API: rejected request body: {}", err);
        let response = error_response(
            StatusCode::BAD_REQUEST,
            format!("Invalid request body: {}", err),
        );
        InternalError::from_response(err, response).into()
    })
}
