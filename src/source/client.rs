use async_trait::async_trait;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::AppError;
use crate::models::app_entry::AppEntry;
use crate::models::post::BlogPost;

pub const POSTS_PATH: &str = "blog/api/posts";
pub const APPS_PATH: &str = "apps/api/apps";
pub const FEATURED_APPS_PATH: &str = "apps/api/apps/featured";

/// Where list pages get their records from.
///
/// Each call returns the whole collection; filtering happens after load.
/// Abstracted as a trait so loaders can be tested without a server.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Published blog posts, newest first.
    async fn fetch_posts(&self) -> Result<Vec<BlogPost>, AppError>;

    /// Showcased apps.
    async fn fetch_apps(&self) -> Result<Vec<AppEntry>, AppError>;

    /// Apps flagged as featured.
    async fn fetch_featured_apps(&self) -> Result<Vec<AppEntry>, AppError>;
}

/// Data source reading the site's JSON API.
#[derive(Debug, Clone)]
pub struct HttpDataSource {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpDataSource {
    /// Build a source for the API rooted at `base_url`.
    ///
    /// A path prefix on the base URL is kept (`https://host/site` serves
    /// posts from `https://host/site/blog/api/posts`).
    pub fn new(base_url: &str) -> Result<Self, AppError> {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create with an explicit client (useful for timeouts / testing).
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Result<Self, AppError> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| AppError::BadRequest(format!("Invalid base URL '{}': {}", base_url, e)))?;

        if base_url.cannot_be_a_base() {
            return Err(AppError::BadRequest(format!(
                "Base URL '{}' cannot carry a path",
                base_url
            )));
        }

        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve an API path against the base URL.
    pub fn endpoint(&self, path: &str) -> Result<Url, AppError> {
        self.base_url
            .join(path)
            .map_err(|e| AppError::Internal(format!("Failed to build URL for '{}': {}", path, e)))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let url = self.endpoint(path)?;
        tracing::debug!(%url, "fetching collection");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| AppError::DataSource(format!("GET {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::DataSource(format!(
                "GET {} returned {}",
                url, status
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| AppError::DataSource(format!("Invalid JSON from {}: {}", url, e)))
    }
}

#[async_trait]
impl DataSource for HttpDataSource {
    async fn fetch_posts(&self) -> Result<Vec<BlogPost>, AppError> {
        self.get_json(POSTS_PATH).await
    }

    async fn fetch_apps(&self) -> Result<Vec<AppEntry>, AppError> {
        self.get_json(APPS_PATH).await
    }

    async fn fetch_featured_apps(&self) -> Result<Vec<AppEntry>, AppError> {
        self.get_json(FEATURED_APPS_PATH).await
    }
}
