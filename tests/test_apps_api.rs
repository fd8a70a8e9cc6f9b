mod common;

use axum::http::StatusCode;
use folio::models::app_entry::{AppEntry, AppStatus};

#[tokio::test]
async fn list_apps_returns_active_apps_only() {
    let env = common::TestEnv::seeded().await;
    let server = env.server();

    let apps: Vec<AppEntry> = server.get("/apps/api/apps").await.json();

    assert_eq!(apps.len(), 5);
    assert!(apps.iter().all(|a| a.status == AppStatus::Active));
    assert!(!apps.iter().any(|a| a.name == "Metrics Dashboard"));
}

#[tokio::test]
async fn featured_apps_are_featured_and_active() {
    let env = common::TestEnv::seeded().await;
    let server = env.server();

    let apps: Vec<AppEntry> = server.get("/apps/api/apps/featured").await.json();
    let names: Vec<&str> = apps.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Personal Blog Engine", "Task Board", "REST API Toolkit"]);
}

#[tokio::test]
async fn get_app_by_id_includes_inactive_apps() {
    let env = common::TestEnv::seeded().await;
    let server = env.server();

    let app: AppEntry = server.get("/apps/api/apps/4").await.json();
    assert_eq!(app.name, "Metrics Dashboard");
    assert_eq!(app.status, AppStatus::Maintenance);
}

#[tokio::test]
async fn missing_app_is_not_found() {
    let env = common::TestEnv::seeded().await;
    let server = env.server_permissive();

    server
        .get("/apps/api/apps/77")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_app_defaults_to_active() {
    let env = common::TestEnv::empty();
    let server = env.server();

    let app: AppEntry = server
        .post("/apps/api/apps")
        .json(&serde_json::json!({
            "name": "Photo Gallery",
            "category": "web",
            "technology": "Svelte",
            "githubUrl": "https://example.com/gallery"
        }))
        .await
        .json();

    assert_eq!(app.id, 1);
    assert_eq!(app.status, AppStatus::Active);
    assert!(!app.featured);
    assert_eq!(app.source_url(), Some("https://example.com/gallery"));

    let body: serde_json::Value = server.get("/apps/api/apps/1").await.json();
    assert_eq!(body["status"], "active");
}

#[tokio::test]
async fn create_app_without_name_is_rejected() {
    let env = common::TestEnv::empty();
    let server = env.server_permissive();

    server
        .post("/apps/api/apps")
        .json(&serde_json::json!({ "name": "" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(env.app_repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn app_categories_come_from_active_apps() {
    let env = common::TestEnv::seeded().await;
    let server = env.server();

    let categories: Vec<String> = server.get("/apps/api/categories").await.json();
    assert_eq!(categories, vec!["productivity", "tools", "web"]);
}

#[tokio::test]
async fn apps_listing_page_redirects_to_static_html() {
    let env = common::TestEnv::empty();
    let server = env.server_permissive();

    let response = server.get("/apps").await;
    assert!(response.status_code().is_redirection());
    assert_eq!(response.header("location"), "/apps.html");
}

#[tokio::test]
async fn app_detail_page_renders_known_app() {
    let env = common::TestEnv::seeded().await;
    let server = env.server();

    let html = server.get("/apps/app/2").await.text();
    assert!(html.contains("app-detail"));
    assert!(html.contains("React"));
}

#[tokio::test]
async fn app_detail_page_redirects_for_unknown_id() {
    let env = common::TestEnv::seeded().await;
    let server = env.server_permissive();

    let response = server.get("/apps/app/999").await;
    assert!(response.status_code().is_redirection());
    assert_eq!(response.header("location"), "/apps");
}

#[tokio::test]
async fn list_apps_filters_by_category() {
    let env = common::TestEnv::seeded().await;
    let server = env.server();

    let apps: Vec<AppEntry> = server
        .get("/apps/api/apps")
        .add_query_param("category", "data")
        .await
        .json();
    assert_eq!(apps.len(), 1);
    assert_eq!(apps[0].status, AppStatus::Maintenance);
}

#[tokio::test]
async fn delete_app_removes_it() {
    let env = common::TestEnv::seeded().await;
    let server = env.server_permissive();

    server
        .delete("/apps/api/apps/3")
        .await
        .assert_status(StatusCode::NO_CONTENT);
    server
        .delete("/apps/api/apps/3")
        .await
        .assert_status(StatusCode::NOT_FOUND);
    assert_eq!(env.app_repo.count().await.unwrap(), 5);
}
