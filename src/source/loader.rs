use serde::Serialize;

use crate::models::app_entry::AppEntry;
use crate::models::post::BlogPost;
use crate::query::engine::ListQueryEngine;
use crate::source::client::DataSource;

/// Number of posts and featured apps shown on the home page.
pub const HOME_ITEMS: usize = 3;

/// Build the blog listing for one page view.
///
/// A failed fetch is logged and recorded on the engine; it is not retried.
pub async fn load_blog_page(source: &dyn DataSource) -> ListQueryEngine<BlogPost> {
    let mut engine = ListQueryEngine::for_blog();
    match source.fetch_posts().await {
        Ok(posts) => engine.load(posts),
        Err(e) => {
            tracing::error!("Error loading blog posts: {e}");
            engine.mark_failed(e.to_string());
        }
    }
    engine
}

/// Build the (unpaginated) apps listing for one page view.
pub async fn load_apps_page(source: &dyn DataSource) -> ListQueryEngine<AppEntry> {
    let mut engine = ListQueryEngine::unpaginated();
    match source.fetch_apps().await {
        Ok(apps) => engine.load(apps),
        Err(e) => {
            tracing::error!("Error loading apps: {e}");
            engine.mark_failed(e.to_string());
        }
    }
    engine
}

/// Everything the home page shows.
///
/// Each part degrades on its own: a failed fetch leaves its list empty and
/// its count unknown.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeSummary {
    pub recent_posts: Vec<BlogPost>,
    pub featured_apps: Vec<AppEntry>,
    pub post_count: Option<usize>,
    pub app_count: Option<usize>,
}

/// Fetch posts, apps and featured apps concurrently for the home page.
pub async fn load_home(source: &dyn DataSource) -> HomeSummary {
    let (posts, apps, featured) = futures::join!(
        source.fetch_posts(),
        source.fetch_apps(),
        source.fetch_featured_apps()
    );

    let mut summary = HomeSummary::default();

    match posts {
        Ok(posts) => {
            summary.post_count = Some(posts.len());
            summary.recent_posts = posts.into_iter().take(HOME_ITEMS).collect();
        }
        Err(e) => tracing::error!("Error loading recent posts: {e}"),
    }

    match apps {
        Ok(apps) => summary.app_count = Some(apps.len()),
        Err(e) => tracing::error!("Error loading stats: {e}"),
    }

    match featured {
        Ok(featured) => summary.featured_apps = featured.into_iter().take(HOME_ITEMS).collect(),
        Err(e) => tracing::error!("Error loading featured apps: {e}"),
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::query::engine::{ListOutcome, PageDirection};
    use crate::source::inline::{sample_apps, sample_posts, InlineDataSource};
    use async_trait::async_trait;
    use mockall::mock;

    mock! {
        pub Source {}

        #[async_trait]
        impl DataSource for Source {
            async fn fetch_posts(&self) -> Result<Vec<BlogPost>, AppError>;
            async fn fetch_apps(&self) -> Result<Vec<AppEntry>, AppError>;
            async fn fetch_featured_apps(&self) -> Result<Vec<AppEntry>, AppError>;
        }
    }

    #[tokio::test]
    async fn test_blog_page_loads_with_page_size_five() {
        let source = InlineDataSource::default();
        let mut engine = load_blog_page(&source).await;

        assert_eq!(engine.total_pages(), 2);
        engine.page(PageDirection::Next);
        let view = engine.current_page_view();
        assert_eq!(view.records.len(), 1);
        assert_eq!(view.records[0].id, 6);
    }

    #[tokio::test]
    async fn test_blog_page_failure_is_recorded() {
        let mut source = MockSource::new();
        source
            .expect_fetch_posts()
            .times(1)
            .returning(|| Err(AppError::DataSource("GET /blog/api/posts returned 500".into())));

        let engine = load_blog_page(&source).await;
        match engine.outcome() {
            ListOutcome::LoadFailed(reason) => assert!(reason.contains("500")),
            other => panic!("Expected LoadFailed, got: {:?}", other),
        }
        assert!(engine.all().is_empty());
    }

    #[tokio::test]
    async fn test_empty_collection_is_not_a_failure() {
        let mut source = MockSource::new();
        source.expect_fetch_apps().returning(|| Ok(vec![]));

        let engine = load_apps_page(&source).await;
        assert!(matches!(engine.outcome(), ListOutcome::NoMatches));
    }

    #[tokio::test]
    async fn test_apps_page_is_unpaginated() {
        let source = InlineDataSource::default();
        let mut engine = load_apps_page(&source).await;
        engine.apply_category("tools");

        let view = engine.current_page_view();
        assert_eq!(view.total_pages, 1);
        assert_eq!(view.records.len(), 2);
    }

    #[tokio::test]
    async fn test_home_summary_truncates_lists() {
        let source = InlineDataSource::default();
        let summary = load_home(&source).await;

        assert_eq!(summary.recent_posts.len(), HOME_ITEMS);
        assert_eq!(summary.recent_posts[0].id, 1);
        assert_eq!(summary.featured_apps.len(), HOME_ITEMS);
        assert_eq!(summary.post_count, Some(sample_posts().len()));
        assert_eq!(summary.app_count, Some(sample_apps().len()));
    }

    #[tokio::test]
    async fn test_home_summary_degrades_per_part() {
        let mut source = MockSource::new();
        source.expect_fetch_posts().returning(|| Ok(sample_posts()));
        source
            .expect_fetch_apps()
            .returning(|| Err(AppError::DataSource("timeout".into())));
        source
            .expect_fetch_featured_apps()
            .returning(|| Err(AppError::DataSource("timeout".into())));

        let summary = load_home(&source).await;
        assert_eq!(summary.post_count, Some(6));
        assert_eq!(summary.app_count, None);
        assert!(summary.featured_apps.is_empty());
    }
}
