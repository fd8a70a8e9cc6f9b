use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::record::{Record, RecordId};

/// Lifecycle state of a showcased app.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppStatus {
    #[default]
    Active,
    Maintenance,
    Deprecated,
}

impl fmt::Display for AppStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppStatus::Active => write!(f, "active"),
            AppStatus::Maintenance => write!(f, "maintenance"),
            AppStatus::Deprecated => write!(f, "deprecated"),
        }
    }
}

/// A project showcase entry as served by `GET /apps/api/apps`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppEntry {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub app_url: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub technology: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: AppStatus,
}

impl AppEntry {
    /// Repository link, unless missing or the `#` placeholder.
    pub fn source_url(&self) -> Option<&str> {
        self.github_url
            .as_deref()
            .filter(|url| !url.is_empty() && *url != "#")
    }

    /// Featured entries are only shown while active.
    pub fn is_showcased(&self) -> bool {
        self.featured && self.status == AppStatus::Active
    }
}

impl Record for AppEntry {
    fn id(&self) -> RecordId {
        self.id
    }

    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![Some(self.name.as_str()), self.description.as_deref()]
    }
}

/// The request payload for `POST /apps/api/apps`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAppEntry {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub app_url: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub technology: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub status: AppStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<AppEntry> for NewAppEntry {
    fn from(app: AppEntry) -> Self {
        Self {
            name: app.name,
            description: app.description,
            app_url: app.app_url,
            github_url: app.github_url,
            category: app.category,
            technology: app.technology,
            image_url: app.image_url,
            featured: app.featured,
            status: app.status,
            created_at: app.created_at,
        }
    }
}
