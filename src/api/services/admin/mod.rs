//! Admin API 服务模块
//!
//! 书签管理的 JSON 端点：
//! - GET /all 列出全部书签
//! - POST 创建空书签
//! - PUT 修改路由、目标或资源类型
//! - DELETE 删除书签

mod bookmark_crud;
mod helpers;
pub mod routes;
mod types;

pub use types::*;

pub use helpers::{error_from_aka, error_response, json_config, json_response};

pub use bookmark_crud::{delete_bookmark, get_all_bookmarks, post_bookmark, update_bookmark};

pub use routes::bookmark_routes;
