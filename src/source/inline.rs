use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use crate::error::AppError;
use crate::models::app_entry::{AppEntry, AppStatus};
use crate::models::post::BlogPost;
use crate::source::client::DataSource;

fn date(year: i32, month: u32, day: u32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, month, day, 9, 0, 0).single()
}

fn post(
    id: i64,
    title: &str,
    category: &str,
    summary: &str,
    content: &str,
    tags: &str,
    created_at: Option<DateTime<Utc>>,
) -> BlogPost {
    BlogPost {
        id,
        title: title.to_string(),
        summary: Some(summary.to_string()),
        content: Some(content.to_string()),
        category: Some(category.to_string()),
        author: Some("Folio".to_string()),
        created_at,
        updated_at: created_at,
        published: true,
        tags: Some(tags.to_string()),
        image_url: None,
    }
}

/// Static blog posts bundled with the site, newest first.
pub fn sample_posts() -> Vec<BlogPost> {
    vec![
        post(
            1,
            "What's New in Vue.js 3",
            "frontend",
            "A tour of the Composition API, Teleport and Fragments, and how they speed up everyday work.",
            "# What's New in Vue.js 3\n\nThe **Composition API** groups logic by feature instead of by option.\n\n## Teleport\n\nRender modals outside the component tree.\n\n## Fragments\n\nComponents may return several root nodes.",
            "vue,javascript,frontend",
            date(2024, 1, 15),
        ),
        post(
            2,
            "Node.js Performance Tuning",
            "backend",
            "Memory management, async patterns and database access tips for faster Node.js services.",
            "# Node.js Performance Tuning\n\n- Profile before optimizing\n- Avoid blocking the event loop\n- Pool database connections\n- Stream large payloads",
            "node,performance,backend",
            date(2024, 1, 10),
        ),
        post(
            3,
            "The Complete CSS Grid Guide",
            "frontend",
            "From grid tracks to named areas: everything needed to build modern two-dimensional layouts.",
            "# The Complete CSS Grid Guide\n\n`display: grid` turns a container into a grid.\n\n| Property | Purpose |\n|---|---|\n| grid-template-columns | column tracks |\n| grid-area | named placement |",
            "css,layout",
            date(2024, 1, 5),
        ),
        post(
            4,
            "Asynchronous JavaScript in Depth",
            "tutorial",
            "Promises, async/await and the event loop explained step by step.",
            "# Asynchronous JavaScript in Depth\n\nEvery `await` yields back to the event loop until the promise settles.",
            "javascript,async,tutorial",
            date(2023, 12, 28),
        ),
        post(
            5,
            "A Practical Guide to React Hooks",
            "frontend",
            "useState, useEffect and custom hooks with patterns that scale.",
            "# A Practical Guide to React Hooks\n\nHooks let function components hold state and side effects.",
            "react,hooks,frontend",
            date(2023, 12, 20),
        ),
        post(
            6,
            "MongoDB Schema Design Patterns",
            "backend",
            "Embedding versus referencing, bucketing and other patterns for efficient document models.",
            "# MongoDB Schema Design Patterns\n\nModel for the queries you run, not for the entities you have.",
            "mongodb,database,backend",
            date(2023, 12, 15),
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn app(
    id: i64,
    name: &str,
    description: &str,
    category: &str,
    technology: &str,
    featured: bool,
    status: AppStatus,
    created_at: Option<DateTime<Utc>>,
) -> AppEntry {
    AppEntry {
        id,
        name: name.to_string(),
        description: Some(description.to_string()),
        app_url: Some("#".to_string()),
        github_url: Some("#".to_string()),
        category: Some(category.to_string()),
        technology: Some(technology.to_string()),
        image_url: None,
        featured,
        created_at,
        updated_at: created_at,
        status,
    }
}

/// Static project showcase bundled with the site, newest first.
pub fn sample_apps() -> Vec<AppEntry> {
    vec![
        app(
            1,
            "Personal Blog Engine",
            "Markdown editing, comments and tag-based navigation for a self-hosted blog.",
            "web",
            "Vue.js",
            true,
            AppStatus::Active,
            date(2024, 2, 1),
        ),
        app(
            2,
            "Task Board",
            "Project groups, priorities, collaboration and progress charts for small teams.",
            "productivity",
            "React",
            true,
            AppStatus::Active,
            date(2024, 1, 20),
        ),
        app(
            3,
            "Storefront",
            "Catalog, cart and checkout front end with payment integration.",
            "web",
            "Next.js",
            false,
            AppStatus::Active,
            date(2024, 1, 2),
        ),
        app(
            4,
            "Metrics Dashboard",
            "Real-time charts over WebSocket feeds with custom themes.",
            "data",
            "D3.js",
            true,
            AppStatus::Maintenance,
            date(2023, 12, 10),
        ),
        app(
            5,
            "Browser Code Editor",
            "Syntax highlighting, completion and live preview in the browser.",
            "tools",
            "WebAssembly",
            false,
            AppStatus::Active,
            date(2023, 11, 18),
        ),
        app(
            6,
            "REST API Toolkit",
            "Authentication, caching, rate limiting and generated API docs.",
            "tools",
            "Node.js",
            true,
            AppStatus::Active,
            date(2023, 10, 30),
        ),
    ]
}

/// Data source backed by the bundled catalog. Never fails.
#[derive(Debug, Clone)]
pub struct InlineDataSource {
    posts: Vec<BlogPost>,
    apps: Vec<AppEntry>,
}

impl Default for InlineDataSource {
    fn default() -> Self {
        Self::new(sample_posts(), sample_apps())
    }
}

impl InlineDataSource {
    pub fn new(posts: Vec<BlogPost>, apps: Vec<AppEntry>) -> Self {
        Self { posts, apps }
    }
}

#[async_trait]
impl DataSource for InlineDataSource {
    async fn fetch_posts(&self) -> Result<Vec<BlogPost>, AppError> {
        Ok(self.posts.clone())
    }

    async fn fetch_apps(&self) -> Result<Vec<AppEntry>, AppError> {
        Ok(self.apps.clone())
    }

    async fn fetch_featured_apps(&self) -> Result<Vec<AppEntry>, AppError> {
        Ok(self
            .apps
            .iter()
            .filter(|app| app.is_showcased())
            .cloned()
            .collect())
    }
}
