use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use crate::error::AppError;
use crate::models::post::{BlogPost, NewBlogPost};
use crate::models::record::{RecordId, SearchQuery};

/// Repository trait for blog post operations.
///
/// This trait allows swapping the storage layer in tests.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Published posts, newest first. Posts without a date come last.
    async fn list_published(&self) -> Result<Vec<BlogPost>, AppError>;

    /// Find a post by id, published or not.
    async fn find_by_id(&self, id: RecordId) -> Result<Option<BlogPost>, AppError>;

    /// Published posts in one category, newest first.
    async fn list_by_category(&self, category: &str) -> Result<Vec<BlogPost>, AppError>;

    /// Distinct categories of published posts, sorted.
    async fn categories(&self) -> Result<Vec<String>, AppError>;

    /// Published posts whose title or content contains `query` (case-insensitive).
    async fn search(&self, query: &SearchQuery) -> Result<Vec<BlogPost>, AppError>;

    /// Store a new post, assigning its id and timestamps.
    async fn insert(&self, post: NewBlogPost) -> Result<BlogPost, AppError>;

    /// Remove a post. Returns `false` if it did not exist.
    async fn delete(&self, id: RecordId) -> Result<bool, AppError>;

    async fn count(&self) -> Result<usize, AppError>;
}

/// In-process implementation of the PostRepository.
#[derive(Debug)]
pub struct InMemoryPostRepository {
    posts: RwLock<Vec<BlogPost>>,
    next_id: AtomicI64,
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Vec<BlogPost>>, AppError> {
        self.posts
            .read()
            .map_err(|_| AppError::Internal("post store lock poisoned".into()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Vec<BlogPost>>, AppError> {
        self.posts
            .write()
            .map_err(|_| AppError::Internal("post store lock poisoned".into()))
    }

    fn published_where<F>(&self, predicate: F) -> Result<Vec<BlogPost>, AppError>
    where
        F: Fn(&BlogPost) -> bool,
    {
        let mut posts: Vec<BlogPost> = self
            .read()?
            .iter()
            .filter(|p| p.published && predicate(p))
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list_published(&self) -> Result<Vec<BlogPost>, AppError> {
        self.published_where(|_| true)
    }

    async fn find_by_id(&self, id: RecordId) -> Result<Option<BlogPost>, AppError> {
        Ok(self.read()?.iter().find(|p| p.id == id).cloned())
    }

    async fn list_by_category(&self, category: &str) -> Result<Vec<BlogPost>, AppError> {
        self.published_where(|p| p.category.as_deref() == Some(category))
    }

    async fn categories(&self) -> Result<Vec<String>, AppError> {
        let mut categories: Vec<String> = self
            .read()?
            .iter()
            .filter(|p| p.published)
            .filter_map(|p| p.category.clone())
            .filter(|c| !c.is_empty())
            .collect();
        categories.sort();
        categories.dedup();
        Ok(categories)
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<BlogPost>, AppError> {
        self.published_where(|p| {
            query.matches(&p.title) || p.content.as_deref().is_some_and(|c| query.matches(c))
        })
    }

    async fn insert(&self, post: NewBlogPost) -> Result<BlogPost, AppError> {
        let now = Utc::now();
        let created_at = post.created_at.unwrap_or(now);
        let stored = BlogPost {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            title: post.title,
            summary: post.summary,
            content: post.content,
            category: post.category,
            author: post.author,
            created_at: Some(created_at),
            updated_at: Some(now.max(created_at)),
            published: post.published,
            tags: post.tags,
            image_url: post.image_url,
        };

        self.write()?.push(stored.clone());
        Ok(stored)
    }

    async fn delete(&self, id: RecordId) -> Result<bool, AppError> {
        let mut posts = self.write()?;
        let before = posts.len();
        posts.retain(|p| p.id != id);
        Ok(posts.len() != before)
    }

    async fn count(&self) -> Result<usize, AppError> {
        Ok(self.read()?.len())
    }
}
