//! Bookmark management service
//!
//! Keeps the record store and the route index consistent: a bookmark is live
//! exactly when the route index maps its route back to its id, and no two
//! live bookmarks share a route.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::errors::{AkaError, Result};
use crate::services::id_generator::IdGenerator;
use crate::services::resource_validator;
use crate::storage::{Bookmark, RecordStore, ResourceType, RouteIndex};

/// Fields a caller may change on an existing bookmark; `None` keeps the
/// stored value.
#[derive(Debug, Clone, Default)]
pub struct BookmarkUpdate {
    pub route: Option<String>,
    pub location: Option<String>,
    pub resource_type: Option<ResourceType>,
}

/// Outcome of a repair pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepairReport {
    /// Index entries pointing at a record that no longer exists
    pub orphans_removed: usize,
    /// Index entries whose record is not live or holds another route
    pub stale_removed: usize,
    /// Live records that had lost their index entry
    pub restored: usize,
    /// Live records whose route is owned by another record
    pub demoted: usize,
}

impl RepairReport {
    pub fn is_clean(&self) -> bool {
        *self == Self::default()
    }
}

impl std::fmt::Display for RepairReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} orphaned, {} stale, {} restored, {} demoted",
            self.orphans_removed, self.stale_removed, self.restored, self.demoted
        )
    }
}

pub struct BookmarkService {
    records: Arc<dyn RecordStore>,
    routes: Arc<dyn RouteIndex>,
    ids: IdGenerator,
    reserved: Vec<String>,
}

impl BookmarkService {
    pub fn new(records: Arc<dyn RecordStore>, routes: Arc<dyn RouteIndex>) -> Self {
        Self {
            records,
            routes,
            ids: IdGenerator::new(),
            reserved: Vec::new(),
        }
    }

    /// Routes that collide with the HTTP surface and can never be claimed.
    pub fn with_reserved_routes<I, S>(mut self, reserved: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reserved = reserved.into_iter().map(Into::into).collect();
        self
    }

    fn check_route(&self, route: &str) -> Result<()> {
        let malformed = route.is_empty()
            || route.contains('/')
            || route.chars().any(char::is_whitespace);
        if malformed || self.reserved.iter().any(|r| r == route) {
            return Err(AkaError::invalid_route(route));
        }
        Ok(())
    }

    // ============ CRUD Operations ============

    /// Create an empty, unrouted bookmark.
    pub async fn create(&self) -> Result<Bookmark> {
        let bookmark = Bookmark::unrouted(self.ids.next_id());
        self.records.put(&bookmark).await?;

        info!("BookmarkService: created '{}'", bookmark.id);
        Ok(bookmark)
    }

    /// Apply `update` to bookmark `id`.
    ///
    /// A route conflict or a malformed route aborts before anything is
    /// written. An invalid location is reported only after the record has
    /// been saved, so the caller sees what it typed.
    pub async fn update(&self, id: &str, update: BookmarkUpdate) -> Result<Bookmark> {
        let mut bookmark = self.records.get(id).await?;

        if let Some(route) = update.route {
            // 已上线且路由相同：无操作；未上线则允许认领当前路由
            let claim = route != bookmark.route || (!bookmark.live && !route.is_empty());
            if claim {
                self.check_route(&route)?;
                self.claim_route(&bookmark, &route).await?;

                info!(
                    "BookmarkService: routed '{}' {} -> {}",
                    bookmark.id,
                    if bookmark.live { bookmark.route.as_str() } else { "(none)" },
                    route
                );
                bookmark.route = route;
                bookmark.live = true;
            }
        }

        let mut resource_changed = false;
        if let Some(location) = update.location
            && location != bookmark.location
        {
            bookmark.location = location;
            resource_changed = true;
        }
        if let Some(resource_type) = update.resource_type
            && resource_type != bookmark.resource_type
        {
            bookmark.resource_type = resource_type;
            resource_changed = true;
        }

        self.records.put(&bookmark).await?;

        if resource_changed {
            if let Err(e) =
                resource_validator::validate(bookmark.resource_type, &bookmark.location).await
            {
                warn!(
                    "BookmarkService: '{}' saved with invalid {} location '{}': {}",
                    bookmark.id, bookmark.resource_type, bookmark.location, e
                );
                return Err(AkaError::invalid_resource(
                    bookmark.resource_type,
                    bookmark.location,
                ));
            }
            info!(
                "BookmarkService: '{}' now points at {} '{}'",
                bookmark.id, bookmark.resource_type, bookmark.location
            );
        }

        Ok(bookmark)
    }

    /// Take `route` for `bookmark`, releasing its current route if live.
    async fn claim_route(&self, bookmark: &Bookmark, route: &str) -> Result<()> {
        match self.routes.get(route).await {
            Ok(owner) if owner != bookmark.id => {
                debug!("Route '{}' already held by '{}'", route, owner);
                return Err(AkaError::duplicate_route(route));
            }
            Ok(_) => {}
            Err(e) if e.is_not_found() => {}
            Err(e) => return Err(e),
        }

        let old_route = bookmark
            .live
            .then_some(bookmark.route.as_str())
            .filter(|old| *old != route);
        self.routes.reassign(old_route, route, &bookmark.id).await
    }

    /// Delete bookmark `id` from both keyspaces.
    ///
    /// Both deletions are attempted; the first failure is returned.
    pub async fn remove(&self, id: &str) -> Result<()> {
        let bookmark = self.records.get(id).await?;

        let record_result = self.records.delete(id).await;
        let index_result = if bookmark.live {
            self.routes.delete(&bookmark.route).await
        } else {
            Ok(())
        };

        if let Err(ref e) = index_result {
            warn!(
                "BookmarkService: failed to release route '{}' of '{}': {}",
                bookmark.route, id, e
            );
        }
        record_result?;
        index_result?;

        info!("BookmarkService: deleted '{}'", id);
        Ok(())
    }

    pub async fn get(&self, id: &str) -> Result<Bookmark> {
        self.records.get(id).await
    }

    /// All bookmarks in creation order.
    pub async fn get_all(&self) -> Result<Vec<Bookmark>> {
        self.records.scan().await
    }

    // ============ Maintenance ============

    /// Reconcile the route index against the record store.
    ///
    /// Index entries are kept only when they point at a live record holding
    /// that route. A live record without an entry gets one back if the route
    /// is free; otherwise the record is demoted to not live.
    pub async fn repair(&self) -> Result<RepairReport> {
        let mut report = RepairReport::default();
        let records = self.records.scan().await?;
        let entries = self.routes.scan().await?;

        let by_id: HashMap<&str, &Bookmark> =
            records.iter().map(|b| (b.id.as_str(), b)).collect();
        let mut claimed: HashMap<String, String> = HashMap::new();

        for (route, id) in entries {
            match by_id.get(id.as_str()) {
                Some(b) if b.live && b.route == route => {
                    claimed.insert(route, id);
                }
                Some(_) => {
                    warn!("Repair: removing stale route '{}' -> '{}'", route, id);
                    self.routes.delete(&route).await?;
                    report.stale_removed += 1;
                }
                None => {
                    warn!("Repair: removing orphaned route '{}' -> '{}'", route, id);
                    self.routes.delete(&route).await?;
                    report.orphans_removed += 1;
                }
            }
        }

        // records 按 id 升序，先创建的记录优先保留路由
        for bookmark in records.iter().filter(|b| b.live) {
            let owner = claimed.get(&bookmark.route).map(String::as_str);
            if owner == Some(bookmark.id.as_str()) {
                continue;
            }

            if owner.is_none() && self.check_route(&bookmark.route).is_ok() {
                warn!(
                    "Repair: restoring route '{}' -> '{}'",
                    bookmark.route, bookmark.id
                );
                self.routes.put(&bookmark.route, &bookmark.id).await?;
                claimed.insert(bookmark.route.clone(), bookmark.id.clone());
                report.restored += 1;
            } else {
                warn!(
                    "Repair: demoting '{}', route '{}' is unavailable",
                    bookmark.id, bookmark.route
                );
                let mut demoted = bookmark.clone();
                demoted.live = false;
                self.records.put(&demoted).await?;
                report.demoted += 1;
            }
        }

        if report.is_clean() {
            debug!("Repair: route index consistent");
        } else {
            info!("Repair: {}", report);
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repair_report_display() {
        let report = RepairReport {
            orphans_removed: 1,
            stale_removed: 2,
            restored: 3,
            demoted: 0,
        };
        assert_eq!(report.to_string(), "1 orphaned, 2 stale, 3 restored, 0 demoted");
        assert!(!report.is_clean());
        assert!(RepairReport::default().is_clean());
    }

    #[test]
    fn test_repair_report_json_keys() {
        let value = serde_json::to_value(RepairReport::default()).unwrap();
        assert_eq!(value["orphansRemoved"], 0);
        assert_eq!(value["staleRemoved"], 0);
    }
}
