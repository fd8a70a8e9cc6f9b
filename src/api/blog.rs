use serde::{Deserialize, Serialize};

use crate::db::post_repository::PostRepository;
use crate::error::AppError;
use crate::models::post::{BlogPost, NewBlogPost, PREVIEW_LEN};
use crate::models::record::{RecordId, SearchQuery};
use crate::rendering::markdown::{plain_text_preview, render_post_article};

/// Query string for `GET /blog/api/search`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub query: Option<String>,
}

/// Query string for the list routes (`?category=`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub category: Option<String>,
}

impl ListParams {
    /// The requested category, if any. Blank values mean "all".
    pub fn category(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}

/// Core logic for listing published posts, optionally in one category.
pub async fn process_list_posts(
    repo: &dyn PostRepository,
    params: &ListParams,
) -> Result<Vec<BlogPost>, AppError> {
    match params.category() {
        Some(category) => repo.list_by_category(category).await,
        None => repo.list_published().await,
    }
}

pub async fn process_get_post(
    repo: &dyn PostRepository,
    id: RecordId,
) -> Result<BlogPost, AppError> {
    repo.find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {} not found", id)))
}

/// Core post creation logic, separated from the HTTP layer for testability.
pub async fn process_create_post(
    repo: &dyn PostRepository,
    mut request: NewBlogPost,
) -> Result<BlogPost, AppError> {
    request.title = request.title.trim().to_string();
    if request.title.is_empty() {
        return Err(AppError::BadRequest("Post title cannot be empty".into()));
    }

    let has_summary = request
        .summary
        .as_deref()
        .is_some_and(|s| !s.trim().is_empty());
    if !has_summary {
        request.summary = request
            .content
            .as_deref()
            .map(|content| plain_text_preview(content, PREVIEW_LEN))
            .filter(|preview| !preview.is_empty());
    }

    let post = repo.insert(request).await?;
    tracing::info!(id = post.id, published = post.published, "Created post '{}'", post.title);
    Ok(post)
}

pub async fn process_delete_post(repo: &dyn PostRepository, id: RecordId) -> Result<(), AppError> {
    if !repo.delete(id).await? {
        return Err(AppError::NotFound(format!("Post {} not found", id)));
    }
    tracing::info!(id, "Deleted post");
    Ok(())
}

pub async fn process_post_categories(repo: &dyn PostRepository) -> Result<Vec<String>, AppError> {
    repo.categories().await
}

pub async fn process_search_posts(
    repo: &dyn PostRepository,
    params: SearchParams,
) -> Result<Vec<BlogPost>, AppError> {
    let query = params
        .query
        .as_deref()
        .and_then(SearchQuery::parse)
        .ok_or_else(|| AppError::BadRequest("Search query cannot be empty".into()))?;

    repo.search(&query).await
}

/// Rendered article for a published post, or `None` when the reader should
/// be sent back to the listing.
pub async fn process_post_page(
    repo: &dyn PostRepository,
    id: RecordId,
) -> Result<Option<String>, AppError> {
    Ok(repo
        .find_by_id(id)
        .await?
        .filter(|post| post.published)
        .map(|post| render_post_article(&post)))
}

/// Axum handler for `GET /blog/api/posts[?category=...]`.
#[cfg(feature = "ssr")]
pub async fn list_posts_handler(
    axum::extract::State(state): axum::extract::State<crate::app::AppState>,
    axum::extract::Query(params): axum::extract::Query<ListParams>,
) -> Result<axum::Json<Vec<BlogPost>>, AppError> {
    let posts = process_list_posts(state.post_repo.as_ref(), &params).await?;
    Ok(axum::Json(posts))
}

/// Axum handler for `GET /blog/api/posts/{id}`.
#[cfg(feature = "ssr")]
pub async fn get_post_handler(
    axum::extract::State(state): axum::extract::State<crate::app::AppState>,
    axum::extract::Path(id): axum::extract::Path<RecordId>,
) -> Result<axum::Json<BlogPost>, AppError> {
    let post = process_get_post(state.post_repo.as_ref(), id).await?;
    Ok(axum::Json(post))
}

/// Axum handler for `POST /blog/api/posts`.
#[cfg(feature = "ssr")]
pub async fn create_post_handler(
    axum::extract::State(state): axum::extract::State<crate::app::AppState>,
    axum::Json(request): axum::Json<NewBlogPost>,
) -> Result<axum::Json<BlogPost>, AppError> {
    let post = process_create_post(state.post_repo.as_ref(), request).await?;
    Ok(axum::Json(post))
}

/// Axum handler for `DELETE /blog/api/posts/{id}`.
#[cfg(feature = "ssr")]
pub async fn delete_post_handler(
    axum::extract::State(state): axum::extract::State<crate::app::AppState>,
    axum::extract::Path(id): axum::extract::Path<RecordId>,
) -> Result<axum::http::StatusCode, AppError> {
    process_delete_post(state.post_repo.as_ref(), id).await?;
    Ok(axum::http::StatusCode::NO_CONTENT)
}

/// Axum handler for `GET /blog/api/categories`.
#[cfg(feature = "ssr")]
pub async fn post_categories_handler(
    axum::extract::State(state): axum::extract::State<crate::app::AppState>,
) -> Result<axum::Json<Vec<String>>, AppError> {
    let categories = process_post_categories(state.post_repo.as_ref()).await?;
    Ok(axum::Json(categories))
}

/// Axum handler for `GET /blog/api/search?query=...`.
#[cfg(feature = "ssr")]
pub async fn search_posts_handler(
    axum::extract::State(state): axum::extract::State<crate::app::AppState>,
    axum::extract::Query(params): axum::extract::Query<SearchParams>,
) -> Result<axum::Json<Vec<BlogPost>>, AppError> {
    let posts = process_search_posts(state.post_repo.as_ref(), params).await?;
    Ok(axum::Json(posts))
}

/// Axum handler for `GET /blog/post/{id}`.
#[cfg(feature = "ssr")]
pub async fn post_page_handler(
    axum::extract::State(state): axum::extract::State<crate::app::AppState>,
    axum::extract::Path(id): axum::extract::Path<RecordId>,
) -> Result<axum::response::Response, AppError> {
    use axum::response::IntoResponse;

    match process_post_page(state.post_repo.as_ref(), id).await? {
        Some(html) => Ok(axum::response::Html(html).into_response()),
        None => Ok(axum::response::Redirect::to("/blog").into_response()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    // -- Mock implementations --

    struct MockPostRepo {
        posts: Mutex<Vec<BlogPost>>,
    }

    impl MockPostRepo {
        fn new() -> Self {
            Self {
                posts: Mutex::new(vec![]),
            }
        }
    }

    #[async_trait]
    impl PostRepository for MockPostRepo {
        async fn list_published(&self) -> Result<Vec<BlogPost>, AppError> {
            Ok(self
                .posts
                .lock()
                .unwrap()
                .iter()
                .filter(|p| p.published)
                .cloned()
                .collect())
        }

        async fn find_by_id(&self, id: RecordId) -> Result<Option<BlogPost>, AppError> {
            Ok(self.posts.lock().unwrap().iter().find(|p| p.id == id).cloned())
        }

        async fn list_by_category(&self, category: &str) -> Result<Vec<BlogPost>, AppError> {
            Ok(self
                .list_published()
                .await?
                .into_iter()
                .filter(|p| p.category.as_deref() == Some(category))
                .collect())
        }

        async fn categories(&self) -> Result<Vec<String>, AppError> {
            Ok(vec!["backend".into(), "frontend".into()])
        }

        async fn search(&self, query: &SearchQuery) -> Result<Vec<BlogPost>, AppError> {
            Ok(self
                .list_published()
                .await?
                .into_iter()
                .filter(|p| query.matches(&p.title))
                .collect())
        }

        async fn insert(&self, post: NewBlogPost) -> Result<BlogPost, AppError> {
            let mut posts = self.posts.lock().unwrap();
            let stored = BlogPost {
                id: posts.len() as RecordId + 1,
                title: post.title,
                summary: post.summary,
                content: post.content,
                category: post.category,
                author: post.author,
                created_at: post.created_at,
                updated_at: post.created_at,
                published: post.published,
                tags: post.tags,
                image_url: post.image_url,
            };
            posts.push(stored.clone());
            Ok(stored)
        }

        async fn delete(&self, id: RecordId) -> Result<bool, AppError> {
            let mut posts = self.posts.lock().unwrap();
            let before = posts.len();
            posts.retain(|p| p.id != id);
            Ok(posts.len() != before)
        }

        async fn count(&self) -> Result<usize, AppError> {
            Ok(self.posts.lock().unwrap().len())
        }
    }

    fn request(title: &str) -> NewBlogPost {
        serde_json::from_value(serde_json::json!({ "title": title })).unwrap()
    }

    #[tokio::test]
    async fn test_create_post_rejects_blank_title() {
        let repo = MockPostRepo::new();
        let result = process_create_post(&repo, request("   ")).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_post_derives_summary_from_content() {
        let repo = MockPostRepo::new();
        let mut req = request("  Grid Basics ");
        req.content = Some("# Grid\n\nTracks **and** areas.".into());

        let post = process_create_post(&repo, req).await.unwrap();
        assert_eq!(post.title, "Grid Basics");
        assert!(post.published);
        assert_eq!(post.summary.as_deref(), Some("Grid Tracks and areas."));
    }

    #[tokio::test]
    async fn test_create_post_keeps_explicit_summary() {
        let repo = MockPostRepo::new();
        let mut req = request("Hooks");
        req.summary = Some("Short intro".into());
        req.content = Some("Long body".into());

        let post = process_create_post(&repo, req).await.unwrap();
        assert_eq!(post.summary.as_deref(), Some("Short intro"));
    }

    #[tokio::test]
    async fn test_list_posts_by_category() {
        let repo = MockPostRepo::new();
        let mut req = request("Grid");
        req.category = Some("frontend".into());
        process_create_post(&repo, req).await.unwrap();
        process_create_post(&repo, request("Uncategorized")).await.unwrap();

        let params = ListParams {
            category: Some("frontend".into()),
        };
        let posts = process_list_posts(&repo, &params).await.unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "Grid");

        let blank = ListParams {
            category: Some("  ".into()),
        };
        assert_eq!(process_list_posts(&repo, &blank).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_post() {
        let repo = MockPostRepo::new();
        let post = process_create_post(&repo, request("Short lived")).await.unwrap();

        process_delete_post(&repo, post.id).await.unwrap();
        assert!(matches!(
            process_delete_post(&repo, post.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_get_missing_post_is_not_found() {
        let repo = MockPostRepo::new();
        match process_get_post(&repo, 42).await {
            Err(AppError::NotFound(msg)) => assert!(msg.contains("42")),
            other => panic!("Expected NotFound error, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_search_requires_query() {
        let repo = MockPostRepo::new();
        for raw in [None, Some(""), Some("   ")] {
            let params = SearchParams {
                query: raw.map(str::to_string),
            };
            assert!(matches!(
                process_search_posts(&repo, params).await,
                Err(AppError::BadRequest(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_search_matches_title() {
        let repo = MockPostRepo::new();
        process_create_post(&repo, request("CSS Grid")).await.unwrap();
        process_create_post(&repo, request("React Hooks")).await.unwrap();

        let params = SearchParams {
            query: Some(" GRID ".into()),
        };
        let hits = process_search_posts(&repo, params).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "CSS Grid");
    }

    #[tokio::test]
    async fn test_post_page_hides_drafts() {
        let repo = MockPostRepo::new();
        let published = process_create_post(&repo, request("Live")).await.unwrap();
        let mut draft = request("Draft");
        draft.published = false;
        let draft = process_create_post(&repo, draft).await.unwrap();

        let html = process_post_page(&repo, published.id).await.unwrap().unwrap();
        assert!(html.contains("Live"));
        assert!(process_post_page(&repo, draft.id).await.unwrap().is_none());
        assert!(process_post_page(&repo, 99).await.unwrap().is_none());
    }
}
