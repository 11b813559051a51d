//! Route resolution
//!
//! Turns an inbound request path into what should be served: a redirect
//! target for URL bookmarks, or a file path for FILE bookmarks.

use std::borrow::Cow;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::errors::{AkaError, Result};
use crate::storage::{RecordStore, ResourceType, RouteIndex};

/// What a resolved route should produce
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Temporary redirect to `target`
    Redirect { target: String },
    /// Serve the bytes of the file at `path`
    ServeFile { path: String },
}

/// Split `/route/rest/of/path` into `("route", "/rest/of/path")`.
///
/// The route is percent-decoded; the sub-route keeps its leading `/` and is
/// returned verbatim. Without a second `/` the sub-route is empty.
pub fn split_path(path: &str) -> (Cow<'_, str>, &str) {
    let path = path.strip_prefix('/').unwrap_or(path);
    let (raw_route, sub_route) = match path.find('/') {
        Some(idx) => path.split_at(idx),
        None => (path, ""),
    };

    // 非法的 UTF-8 编码保持原样
    let route = urlencoding::decode(raw_route).unwrap_or(Cow::Borrowed(raw_route));
    (route, sub_route)
}

pub struct RedirectResolver {
    records: Arc<dyn RecordStore>,
    routes: Arc<dyn RouteIndex>,
}

impl RedirectResolver {
    pub fn new(records: Arc<dyn RecordStore>, routes: Arc<dyn RouteIndex>) -> Self {
        Self { records, routes }
    }

    /// Resolve a request path.
    ///
    /// Errors with `NotFound(route)` when nothing live answers to the route,
    /// including stale index entries, and with `ResourceUnavailable(path)`
    /// when a file bookmark's file has gone away.
    pub async fn resolve(&self, path: &str) -> Result<Resolution> {
        let (route, sub_route) = split_path(path);
        trace!("Resolving route '{}' sub-route '{}'", route, sub_route);

        let id = match self.routes.get(&route).await {
            Ok(id) => id,
            Err(e) if e.is_not_found() => return Err(AkaError::not_found(route)),
            Err(e) => return Err(e),
        };

        let bookmark = match self.records.get(&id).await {
            Ok(b) if b.live && b.route == route => b,
            Ok(_) => {
                debug!("Stale index entry '{}' -> '{}'", route, id);
                return Err(AkaError::not_found(route));
            }
            Err(e) if e.is_not_found() => {
                debug!("Orphaned index entry '{}' -> '{}'", route, id);
                return Err(AkaError::not_found(route));
            }
            Err(e) => return Err(e),
        };

        match bookmark.resource_type {
            ResourceType::Url => Ok(Resolution::Redirect {
                target: format!("{}{}", bookmark.location, sub_route),
            }),
            ResourceType::File => {
                if tokio::fs::metadata(&bookmark.location)
                    .await
                    .is_ok_and(|m| m.is_file())
                {
                    Ok(Resolution::ServeFile {
                        path: bookmark.location,
                    })
                } else {
                    Err(AkaError::resource_unavailable(bookmark.location))
                }
            }
        }
    }
}
