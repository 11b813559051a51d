//! Admin API 路由配置

use actix_web::web;

use super::bookmark_crud::{delete_bookmark, get_all_bookmarks, post_bookmark, update_bookmark};
use super::helpers::json_config;

/// 书签管理路由
///
/// 包含：
/// - GET/HEAD {prefix}/all - 获取所有书签
/// - POST {prefix} - 创建书签
/// - PUT {prefix} - 更新书签
/// - DELETE {prefix} - 删除书签
pub fn bookmark_routes(prefix: &str) -> actix_web::Scope {
    web::scope(prefix)
        .app_data(json_config())
        .route("/all", web::get().to(get_all_bookmarks))
        .route("/all", web::head().to(get_all_bookmarks))
        .route("", web::post().to(post_bookmark))
        .route("", web::put().to(update_bookmark))
        .route("", web::delete().to(delete_bookmark))
}
