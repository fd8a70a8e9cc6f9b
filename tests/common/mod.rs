#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;

use folio::app::{router, AppState};
use folio::db::app_repository::{AppRepository, InMemoryAppRepository};
use folio::db::post_repository::{InMemoryPostRepository, PostRepository};
use folio::demo_seeder::seed_demo_data;

/// In-memory repositories wired into the full application router.
pub struct TestEnv {
    pub router: Router,
    pub post_repo: Arc<dyn PostRepository>,
    pub app_repo: Arc<dyn AppRepository>,
}

impl TestEnv {
    /// Empty repositories.
    pub fn empty() -> Self {
        let post_repo: Arc<dyn PostRepository> = Arc::new(InMemoryPostRepository::new());
        let app_repo: Arc<dyn AppRepository> = Arc::new(InMemoryAppRepository::new());

        let state = AppState {
            post_repo: post_repo.clone(),
            app_repo: app_repo.clone(),
        };

        Self {
            router: router(state, "tests/missing-site-root", false),
            post_repo,
            app_repo,
        }
    }

    /// Repositories filled with the bundled demo catalog.
    pub async fn seeded() -> Self {
        let env = Self::empty();
        seed_demo_data(env.post_repo.as_ref(), env.app_repo.as_ref())
            .await
            .expect("Failed to seed demo data");
        env
    }

    /// Build an `axum_test::TestServer` from this environment's router.
    pub fn server(&self) -> axum_test::TestServer {
        axum_test::TestServer::builder()
            .expect_success_by_default()
            .build(self.router.clone())
    }

    /// Build a `TestServer` that does NOT expect success by default (for error tests).
    pub fn server_permissive(&self) -> axum_test::TestServer {
        axum_test::TestServer::builder()
            .build(self.router.clone())
    }

    /// Serve the router on an ephemeral local port and return its base URL.
    pub async fn spawn(&self) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local address");
        let router = self.router.clone();
        tokio::spawn(async move {
            axum::serve(listener, router.into_make_service())
                .await
                .expect("Test server failed");
        });
        format!("http://{}", addr)
    }
}

/// Helper: create a post via the API.
pub async fn create_post(
    server: &axum_test::TestServer,
    body: serde_json::Value,
) -> axum_test::TestResponse {
    server.post("/blog/api/posts").json(&body).await
}
