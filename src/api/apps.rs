use crate::api::blog::ListParams;
use crate::db::app_repository::AppRepository;
use crate::error::AppError;
use crate::models::app_entry::{AppEntry, NewAppEntry};
use crate::models::record::RecordId;
use crate::rendering::markdown::render_app_article;

/// Active apps, or every app in the requested category.
pub async fn process_list_apps(
    repo: &dyn AppRepository,
    params: &ListParams,
) -> Result<Vec<AppEntry>, AppError> {
    match params.category() {
        Some(category) => repo.list_by_category(category).await,
        None => repo.list_active().await,
    }
}

pub async fn process_featured_apps(repo: &dyn AppRepository) -> Result<Vec<AppEntry>, AppError> {
    repo.list_featured().await
}

pub async fn process_get_app(repo: &dyn AppRepository, id: RecordId) -> Result<AppEntry, AppError> {
    repo.find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("App {} not found", id)))
}

/// Core app creation logic. The name is required; status defaults to active.
pub async fn process_create_app(
    repo: &dyn AppRepository,
    mut request: NewAppEntry,
) -> Result<AppEntry, AppError> {
    request.name = request.name.trim().to_string();
    if request.name.is_empty() {
        return Err(AppError::BadRequest("App name cannot be empty".into()));
    }

    let app = repo.insert(request).await?;
    tracing::info!(id = app.id, status = %app.status, "Created app '{}'", app.name);
    Ok(app)
}

pub async fn process_delete_app(repo: &dyn AppRepository, id: RecordId) -> Result<(), AppError> {
    if !repo.delete(id).await? {
        return Err(AppError::NotFound(format!("App {} not found", id)));
    }
    tracing::info!(id, "Deleted app");
    Ok(())
}

/// Rendered detail page, or `None` when the app does not exist.
pub async fn process_app_page(
    repo: &dyn AppRepository,
    id: RecordId,
) -> Result<Option<String>, AppError> {
    Ok(repo.find_by_id(id).await?.map(|app| render_app_article(&app)))
}

pub async fn process_app_categories(repo: &dyn AppRepository) -> Result<Vec<String>, AppError> {
    repo.categories().await
}

/// Axum handler for `GET /apps/api/apps[?category=...]`.
#[cfg(feature = "ssr")]
pub async fn list_apps_handler(
    axum::extract::State(state): axum::extract::State<crate::app::AppState>,
    axum::extract::Query(params): axum::extract::Query<ListParams>,
) -> Result<axum::Json<Vec<AppEntry>>, AppError> {
    let apps = process_list_apps(state.app_repo.as_ref(), &params).await?;
    Ok(axum::Json(apps))
}

/// Axum handler for `GET /apps/api/apps/featured`.
#[cfg(feature = "ssr")]
pub async fn featured_apps_handler(
    axum::extract::State(state): axum::extract::State<crate::app::AppState>,
) -> Result<axum::Json<Vec<AppEntry>>, AppError> {
    let apps = process_featured_apps(state.app_repo.as_ref()).await?;
    Ok(axum::Json(apps))
}

/// Axum handler for `GET /apps/api/apps/{id}`.
#[cfg(feature = "ssr")]
pub async fn get_app_handler(
    axum::extract::State(state): axum::extract::State<crate::app::AppState>,
    axum::extract::Path(id): axum::extract::Path<RecordId>,
) -> Result<axum::Json<AppEntry>, AppError> {
    let app = process_get_app(state.app_repo.as_ref(), id).await?;
    Ok(axum::Json(app))
}

/// Axum handler for `POST /apps/api/apps`.
#[cfg(feature = "ssr")]
pub async fn create_app_handler(
    axum::extract::State(state): axum::extract::State<crate::app::AppState>,
    axum::Json(request): axum::Json<NewAppEntry>,
) -> Result<axum::Json<AppEntry>, AppError> {
    let app = process_create_app(state.app_repo.as_ref(), request).await?;
    Ok(axum::Json(app))
}

/// Axum handler for `DELETE /apps/api/apps/{id}`.
#[cfg(feature = "ssr")]
pub async fn delete_app_handler(
    axum::extract::State(state): axum::extract::State<crate::app::AppState>,
    axum::extract::Path(id): axum::extract::Path<RecordId>,
) -> Result<axum::http::StatusCode, AppError> {
    process_delete_app(state.app_repo.as_ref(), id).await?;
    Ok(axum::http::StatusCode::NO_CONTENT)
}

/// Axum handler for `GET /apps/app/{id}`.
#[cfg(feature = "ssr")]
pub async fn app_page_handler(
    axum::extract::State(state): axum::extract::State<crate::app::AppState>,
    axum::extract::Path(id): axum::extract::Path<RecordId>,
) -> Result<axum::response::Response, AppError> {
    use axum::response::IntoResponse;

    match process_app_page(state.app_repo.as_ref(), id).await? {
        Some(html) => Ok(axum::response::Html(html).into_response()),
        None => Ok(axum::response::Redirect::to("/apps").into_response()),
    }
}

/// Axum handler for `GET /apps/api/categories`.
#[cfg(feature = "ssr")]
pub async fn app_categories_handler(
    axum::extract::State(state): axum::extract::State<crate::app::AppState>,
) -> Result<axum::Json<Vec<String>>, AppError> {
    let categories = process_app_categories(state.app_repo.as_ref()).await?;
    Ok(axum::Json(categories))
}
