use std::sync::Arc;

use axum::response::Redirect;
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::db::app_repository::AppRepository;
use crate::db::post_repository::PostRepository;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub post_repo: Arc<dyn PostRepository>,
    pub app_repo: Arc<dyn AppRepository>,
}

/// Pages served as static HTML from the site root.
const PAGE_REDIRECTS: &[(&str, &str)] = &[
    ("/", "/index.html"),
    ("/about", "/about.html"),
    ("/contact", "/contact.html"),
    ("/blog", "/blog.html"),
    ("/apps", "/apps.html"),
];

/// JSON API and page routes without static files or middleware.
pub fn api_routes() -> Router<AppState> {
    let router = PAGE_REDIRECTS
        .iter()
        .fold(Router::new(), |router, &(path, target)| {
            router.route(path, get(move || async move { Redirect::to(target) }))
        });

    router
        .route(
            "/blog/api/posts",
            get(api::blog::list_posts_handler).post(api::blog::create_post_handler),
        )
        .route(
            "/blog/api/posts/{id}",
            get(api::blog::get_post_handler).delete(api::blog::delete_post_handler),
        )
        .route(
            "/blog/api/categories",
            get(api::blog::post_categories_handler),
        )
        .route("/blog/api/search", get(api::blog::search_posts_handler))
        .route("/blog/post/{id}", get(api::blog::post_page_handler))
        .route(
            "/apps/api/apps",
            get(api::apps::list_apps_handler).post(api::apps::create_app_handler),
        )
        .route(
            "/apps/api/apps/featured",
            get(api::apps::featured_apps_handler),
        )
        .route(
            "/apps/api/apps/{id}",
            get(api::apps::get_app_handler).delete(api::apps::delete_app_handler),
        )
        .route("/apps/app/{id}", get(api::apps::app_page_handler))
        .route(
            "/apps/api/categories",
            get(api::apps::app_categories_handler),
        )
}

/// The full application: API routes, static files from `site_root`,
/// request tracing and optionally permissive CORS.
pub fn router(state: AppState, site_root: &str, allow_cors: bool) -> Router {
    let router = api_routes()
        .fallback_service(ServeDir::new(site_root))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if allow_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}
