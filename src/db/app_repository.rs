use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use crate::error::AppError;
use crate::models::app_entry::{AppEntry, AppStatus, NewAppEntry};
use crate::models::record::RecordId;

/// Repository trait for showcased apps.
#[async_trait]
pub trait AppRepository: Send + Sync {
    /// Active apps, newest first.
    async fn list_active(&self) -> Result<Vec<AppEntry>, AppError>;

    /// Featured and active apps, newest first.
    async fn list_featured(&self) -> Result<Vec<AppEntry>, AppError>;

    async fn find_by_id(&self, id: RecordId) -> Result<Option<AppEntry>, AppError>;

    /// Apps in one category regardless of status, newest first.
    async fn list_by_category(&self, category: &str) -> Result<Vec<AppEntry>, AppError>;

    /// Distinct categories of active apps, sorted.
    async fn categories(&self) -> Result<Vec<String>, AppError>;

    /// Store a new app, assigning its id and timestamps.
    async fn insert(&self, app: NewAppEntry) -> Result<AppEntry, AppError>;

    /// Remove an app. Returns `false` if it did not exist.
    async fn delete(&self, id: RecordId) -> Result<bool, AppError>;

    async fn count(&self) -> Result<usize, AppError>;
}

/// In-process implementation of the AppRepository.
#[derive(Debug)]
pub struct InMemoryAppRepository {
    apps: RwLock<Vec<AppEntry>>,
    next_id: AtomicI64,
}

impl Default for InMemoryAppRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryAppRepository {
    pub fn new() -> Self {
        Self {
            apps: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    fn newest_where<F>(&self, predicate: F) -> Result<Vec<AppEntry>, AppError>
    where
        F: Fn(&AppEntry) -> bool,
    {
        let mut apps: Vec<AppEntry> = self
            .apps
            .read()
            .map_err(|_| AppError::Internal("app store lock poisoned".into()))?
            .iter()
            .filter(|a| predicate(a))
            .cloned()
            .collect();
        apps.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(apps)
    }
}

#[async_trait]
impl AppRepository for InMemoryAppRepository {
    async fn list_active(&self) -> Result<Vec<AppEntry>, AppError> {
        self.newest_where(|a| a.status == AppStatus::Active)
    }

    async fn list_featured(&self) -> Result<Vec<AppEntry>, AppError> {
        self.newest_where(AppEntry::is_showcased)
    }

    async fn find_by_id(&self, id: RecordId) -> Result<Option<AppEntry>, AppError> {
        Ok(self.newest_where(|a| a.id == id)?.into_iter().next())
    }

    async fn list_by_category(&self, category: &str) -> Result<Vec<AppEntry>, AppError> {
        self.newest_where(|a| a.category.as_deref() == Some(category))
    }

    async fn categories(&self) -> Result<Vec<String>, AppError> {
        let mut categories: Vec<String> = self
            .list_active()
            .await?
            .into_iter()
            .filter_map(|a| a.category)
            .filter(|c| !c.is_empty())
            .collect();
        categories.sort();
        categories.dedup();
        Ok(categories)
    }

    async fn insert(&self, app: NewAppEntry) -> Result<AppEntry, AppError> {
        let now = Utc::now();
        let created_at = app.created_at.unwrap_or(now);
        let stored = AppEntry {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            name: app.name,
            description: app.description,
            app_url: app.app_url,
            github_url: app.github_url,
            category: app.category,
            technology: app.technology,
            image_url: app.image_url,
            featured: app.featured,
            created_at: Some(created_at),
            updated_at: Some(now.max(created_at)),
            status: app.status,
        };

        self.apps
            .write()
            .map_err(|_| AppError::Internal("app store lock poisoned".into()))?
            .push(stored.clone());
        Ok(stored)
    }

    async fn delete(&self, id: RecordId) -> Result<bool, AppError> {
        let mut apps = self
            .apps
            .write()
            .map_err(|_| AppError::Internal("app store lock poisoned".into()))?;
        let before = apps.len();
        apps.retain(|a| a.id != id);
        Ok(apps.len() != before)
    }

    async fn count(&self) -> Result<usize, AppError> {
        Ok(self
            .apps
            .read()
            .map_err(|_| AppError::Internal("app store lock poisoned".into()))?
            .len())
    }
}
