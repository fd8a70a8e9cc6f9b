use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::record::{Record, RecordId};
use crate::rendering::markdown::plain_text_preview;

/// Length of the generated preview when a post has no summary.
pub const PREVIEW_LEN: usize = 200;

/// A blog post as served by `GET /blog/api/posts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub summary: Option<String>,
    /// Markdown body.
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub published: bool,
    /// Comma-separated tag list.
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl BlogPost {
    /// Split `tags` on commas. Order and duplicates are kept, blank pieces dropped.
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .as_deref()
            .map(|tags| {
                tags.split(',')
                    .map(str::trim)
                    .filter(|tag| !tag.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The summary, or a plain-text preview of the content when it is missing.
    pub fn summary_or_preview(&self) -> Option<String> {
        match self.summary.as_deref() {
            Some(summary) if !summary.trim().is_empty() => Some(summary.to_string()),
            _ => self
                .content
                .as_deref()
                .map(|content| plain_text_preview(content, PREVIEW_LEN))
                .filter(|preview| !preview.is_empty()),
        }
    }
}

impl Record for BlogPost {
    fn id(&self) -> RecordId {
        self.id
    }

    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            Some(self.title.as_str()),
            self.summary.as_deref(),
            self.content.as_deref(),
            self.tags.as_deref(),
        ]
    }
}

/// The request payload for `POST /blog/api/posts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBlogPost {
    pub title: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Posts created through the API are published unless told otherwise.
    #[serde(default = "default_published")]
    pub published: bool,
    /// Lets seeders keep the original publication date.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_published() -> bool {
    true
}

impl From<BlogPost> for NewBlogPost {
    fn from(post: BlogPost) -> Self {
        Self {
            title: post.title,
            summary: post.summary,
            content: post.content,
            category: post.category,
            author: post.author,
            tags: post.tags,
            image_url: post.image_url,
            published: post.published,
            created_at: post.created_at,
        }
    }
}
