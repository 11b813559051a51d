//! Admin API 请求与响应类型

use serde::{Deserialize, Serialize};

use crate::services::BookmarkUpdate;
use crate::storage::{Bookmark, ResourceType};

/// PUT body; absent fields keep their stored value
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookmarkRequest {
    pub id: String,
    #[serde(default)]
    pub route: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub resource_type: Option<ResourceType>,
}

impl UpdateBookmarkRequest {
    pub fn into_parts(self) -> (String, BookmarkUpdate) {
        (
            self.id,
            BookmarkUpdate {
                route: self.route,
                location: self.location,
                resource_type: self.resource_type,
            },
        )
    }
}

/// DELETE body
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteBookmarkRequest {
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub bookmark: Bookmark,
}

#[derive(Debug, Serialize)]
pub struct UpdatedResponse {
    pub success: bool,
    pub bookmark: Bookmark,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Error payload for every admin endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<ResourceType>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            route: None,
            resource_type: None,
        }
    }
}
