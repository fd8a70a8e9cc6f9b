/// Identifier shared by blog posts and app entries.
pub type RecordId = i64;

/// A normalized free-text query: trimmed and lowercased.
///
/// Blank input has no query representation; callers treat it as "search
/// cleared".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    needle: String,
}

impl SearchQuery {
    /// Parse raw user input. Returns `None` when nothing is left after trimming.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self {
                needle: trimmed.to_lowercase(),
            })
        }
    }

    /// The lowercased needle.
    pub fn as_str(&self) -> &str {
        &self.needle
    }

    /// Case-insensitive substring test against one field.
    pub fn matches(&self, field: &str) -> bool {
        !field.is_empty() && field.to_lowercase().contains(&self.needle)
    }
}

/// Capability shared by everything the list engine can hold.
pub trait Record {
    fn id(&self) -> RecordId;

    /// Category label; `None` or an empty label means "uncategorized".
    fn category(&self) -> Option<&str>;

    /// Text fields the search predicate looks at. Absent fields are `None`.
    fn search_fields(&self) -> Vec<Option<&str>>;

    /// Exact, case-sensitive category match. Uncategorized records never
    /// match a concrete category.
    fn in_category(&self, category: &str) -> bool {
        matches!(self.category(), Some(c) if !c.is_empty() && c == category)
    }

    /// True when at least one present field contains the query.
    fn matches_query(&self, query: &SearchQuery) -> bool {
        self.search_fields()
            .into_iter()
            .flatten()
            .any(|field| query.matches(field))
    }
}
