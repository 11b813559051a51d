//! Admin API integration tests
//!
//! The JSON endpoints under /bookmark.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use serde_json::{Value, json};
use tempfile::TempDir;

use aka::api::services::admin::{ErrorBody, bookmark_routes};
use aka::config::RoutesConfig;
use aka::services::{BookmarkService, RedirectResolver};
use aka::storage::backend::SeaOrmStorage;
use aka::storage::{Bookmark, RecordStore, ResourceType, RouteIndex};

// =============================================================================
// Test Setup
// =============================================================================

struct TestEnv {
    service: Arc<BookmarkService>,
    resolver: Arc<RedirectResolver>,
    _dir: TempDir,
}

async fn create_env() -> TestEnv {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let db_url = format!(
        "sqlite://{}?mode=rwc",
        dir.path().join("admin_api_test.db").display()
    );
    let storage = SeaOrmStorage::new(&db_url, "sqlite")
        .await
        .expect("Failed to create storage");

    let records: Arc<dyn RecordStore> = storage.record_store();
    let routes: Arc<dyn RouteIndex> = storage.route_index();

    TestEnv {
        service: Arc::new(
            BookmarkService::new(records.clone(), routes.clone())
                .with_reserved_routes(RoutesConfig::default().reserved_routes()),
        ),
        resolver: Arc::new(RedirectResolver::new(records, routes)),
        _dir: dir,
    }
}

macro_rules! admin_app {
    ($env:expr) => {{
        test::init_service(
            App::new()
                .app_data(web::Data::new($env.service.clone()))
                .service(bookmark_routes("/bookmark")),
        )
        .await
    }};
}

/// POST /bookmark and return the new bookmark
macro_rules! create_bookmark {
    ($app:expr) => {{
        let req = TestRequest::post().uri("/bookmark").to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        serde_json::from_value::<Bookmark>(body["bookmark"].clone()).unwrap()
    }};
}

// =============================================================================
// POST / GET
// =============================================================================

#[actix_rt::test]
async fn test_create_returns_empty_bookmark() {
    let env = create_env().await;
    let app = admin_app!(env);

    let bookmark = create_bookmark!(app);
    assert!(!bookmark.live);
    assert!(bookmark.route.is_empty());
    assert_eq!(bookmark.resource_type, ResourceType::Url);
}

#[actix_rt::test]
async fn test_get_all_lists_in_creation_order() {
    let env = create_env().await;
    let app = admin_app!(env);

    let first = create_bookmark!(app);
    let second = create_bookmark!(app);

    let req = TestRequest::get().uri("/bookmark/all").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let all: Vec<Bookmark> = test::read_body_json(resp).await;
    assert_eq!(all, vec![first, second]);
}

#[actix_rt::test]
async fn test_get_all_uses_camel_case_keys() {
    let env = create_env().await;
    let app = admin_app!(env);
    create_bookmark!(app);

    let req = TestRequest::get().uri("/bookmark/all").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body[0]["resourceType"], "url");
    assert_eq!(body[0]["live"], false);
}

// =============================================================================
// PUT
// =============================================================================

#[actix_rt::test]
async fn test_update_route_and_location() {
    let env = create_env().await;
    let app = admin_app!(env);
    let bookmark = create_bookmark!(app);

    let req = TestRequest::put()
        .uri("/bookmark")
        .set_json(json!({
            "id": bookmark.id,
            "route": "docs",
            "location": "https://example.com",
            "resourceType": "url"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["bookmark"]["route"], "docs");
    assert_eq!(body["bookmark"]["live"], true);

    assert!(env.resolver.resolve("/docs").await.is_ok());
}

#[actix_rt::test]
async fn test_update_accepts_legacy_uppercase_kind() {
    let env = create_env().await;
    let app = admin_app!(env);
    let bookmark = create_bookmark!(app);

    let req = TestRequest::put()
        .uri("/bookmark")
        .set_json(json!({
            "id": bookmark.id,
            "location": "https://example.com",
            "resourceType": "URL"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn test_duplicate_route_is_409() {
    let env = create_env().await;
    let app = admin_app!(env);
    let a = create_bookmark!(app);
    let b = create_bookmark!(app);

    for (id, status) in [(&a.id, StatusCode::OK), (&b.id, StatusCode::CONFLICT)] {
        let req = TestRequest::put()
            .uri("/bookmark")
            .set_json(json!({"id": id, "route": "x", "location": "https://example.com"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), status);

        if status == StatusCode::CONFLICT {
            let body: ErrorBody = test::read_body_json(resp).await;
            assert_eq!(body.route.as_deref(), Some("x"));
            assert_eq!(body.error, "Duplicate route: x");
        }
    }
}

#[actix_rt::test]
async fn test_invalid_route_is_400() {
    let env = create_env().await;
    let app = admin_app!(env);
    let bookmark = create_bookmark!(app);

    let req = TestRequest::put()
        .uri("/bookmark")
        .set_json(json!({"id": bookmark.id, "route": "bookmark"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: ErrorBody = test::read_body_json(resp).await;
    assert_eq!(body.route.as_deref(), Some("bookmark"));
}

#[actix_rt::test]
async fn test_invalid_file_is_422_but_saved() {
    let env = create_env().await;
    let app = admin_app!(env);
    let bookmark = create_bookmark!(app);

    let req = TestRequest::put()
        .uri("/bookmark")
        .set_json(json!({
            "id": bookmark.id,
            "route": "readme",
            "location": "/etc/missing.txt",
            "resourceType": "file"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: ErrorBody = test::read_body_json(resp).await;
    assert_eq!(body.resource_type, Some(ResourceType::File));
    assert_eq!(body.error, "Invalid file");

    let req = TestRequest::get().uri("/bookmark/all").to_request();
    let all: Vec<Bookmark> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(all[0].location, "/etc/missing.txt");
}

#[actix_rt::test]
async fn test_update_unknown_id_is_404() {
    let env = create_env().await;
    let app = admin_app!(env);

    let req = TestRequest::put()
        .uri("/bookmark")
        .set_json(json!({"id": "nope", "route": "docs"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_malformed_body_is_400_json() {
    let env = create_env().await;
    let app = admin_app!(env);

    let req = TestRequest::put()
        .uri("/bookmark")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: ErrorBody = test::read_body_json(resp).await;
    assert!(body.error.starts_with("Invalid request body"));
}

#[actix_rt::test]
async fn test_unknown_resource_type_is_400() {
    let env = create_env().await;
    let app = admin_app!(env);
    let bookmark = create_bookmark!(app);

    let req = TestRequest::put()
        .uri("/bookmark")
        .set_json(json!({"id": bookmark.id, "resourceType": "ftp"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// DELETE
// =============================================================================

#[actix_rt::test]
async fn test_delete_bookmark() {
    let env = create_env().await;
    let app = admin_app!(env);
    let bookmark = create_bookmark!(app);

    let req = TestRequest::put()
        .uri("/bookmark")
        .set_json(json!({"id": bookmark.id, "route": "tmp", "location": "https://example.com"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = TestRequest::delete()
        .uri("/bookmark")
        .set_json(json!({"id": bookmark.id}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Bookmark deleted successfully");

    assert!(env.resolver.resolve("/tmp").await.unwrap_err().is_not_found());

    // 再删一次：404
    let req = TestRequest::delete()
        .uri("/bookmark")
        .set_json(json!({"id": bookmark.id}))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}
