//! Admin API 书签 CRUD 操作

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, web};
use std::sync::Arc;
use tracing::{info, trace};

use crate::services::BookmarkService;

use super::helpers::{error_from_aka, json_response};
use super::types::{
    CreatedResponse, DeleteBookmarkRequest, MessageResponse, UpdateBookmarkRequest,
    UpdatedResponse,
};

/// 获取所有书签（按创建顺序）
pub async fn get_all_bookmarks(service: web::Data<Arc<BookmarkService>>) -> impl Responder {
    trace!("Admin API: request to list all bookmarks");

    match service.get_all().await {
        Ok(bookmarks) => {
            trace!("Admin API: returning {} bookmarks", bookmarks.len());
            json_response(StatusCode::OK, &bookmarks)
        }
        Err(e) => error_from_aka(&e),
    }
}

/// 创建空书签
pub async fn post_bookmark(service: web::Data<Arc<BookmarkService>>) -> impl Responder {
    match service.create().await {
        Ok(bookmark) => {
            info!("Admin API: created bookmark '{}'", bookmark.id);
            json_response(StatusCode::OK, &CreatedResponse { bookmark })
        }
        Err(e) => error_from_aka(&e),
    }
}

/// 更新书签
pub async fn update_bookmark(
    body: web::Json<UpdateBookmarkRequest>,
    service: web::Data<Arc<BookmarkService>>,
) -> HttpResponse {
    let (id, update) = body.into_inner().into_parts();
    trace!("Admin API: update '{}' with {:?}", id, update);

    match service.update(&id, update).await {
        Ok(bookmark) => json_response(
            StatusCode::OK,
            &UpdatedResponse {
                success: true,
                bookmark,
            },
        ),
        Err(e) => error_from_aka(&e),
    }
}

/// 删除书签
pub async fn delete_bookmark(
    body: web::Json<DeleteBookmarkRequest>,
    service: web::Data<Arc<BookmarkService>>,
) -> HttpResponse {
    let id = body.into_inner().id;

    match service.remove(&id).await {
        Ok(()) => json_response(
            StatusCode::OK,
            &MessageResponse {
                message: "Bookmark deleted successfully".to_string(),
            },
        ),
        Err(e) => error_from_aka(&e),
    }
}
