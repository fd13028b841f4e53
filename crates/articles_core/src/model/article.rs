//! Article domain model.
//!
//! # Responsibility
//! - Define the article record and its read-only view projection.
//! - Provide the patch helper used by the update use-case.
//!
//! # Invariants
//! - `id` is assigned by the store on first save and never changes afterwards.
//! - `title` and `content` are free-form optional text; no validation applies.

use serde::{Deserialize, Serialize};

/// Store-assigned article identifier.
///
/// Matches SQLite `INTEGER PRIMARY KEY` width.
pub type ArticleId = i64;

/// Canonical article record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// `None` while transient, `Some` once persisted.
    pub id: Option<ArticleId>,
    pub title: Option<String>,
    pub content: Option<String>,
}

impl Article {
    /// Creates a transient article that has not been assigned an id.
    pub fn new(title: Option<String>, content: Option<String>) -> Self {
        Self {
            id: None,
            title,
            content,
        }
    }

    /// Applies field-level patch semantics.
    ///
    /// Only `Some` inputs overwrite the stored value; `None` leaves the field
    /// untouched. The id is never modified.
    pub fn apply_patch(&mut self, title: Option<String>, content: Option<String>) {
        if let Some(title) = title {
            self.title = Some(title);
        }
        if let Some(content) = content {
            self.content = Some(content);
        }
    }

    /// Returns whether the article has been persisted at least once.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

/// Read-only projection of a persisted article returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleView {
    pub id: ArticleId,
    pub title: Option<String>,
    pub content: Option<String>,
}

impl ArticleView {
    /// Projects a persisted article.
    ///
    /// Returns `None` for transient articles, which have no identity to expose.
    pub fn from_persisted(article: Article) -> Option<Self> {
        let id = article.id?;
        Some(Self {
            id,
            title: article.title,
            content: article.content,
        })
    }
}

/// Payload for creating one article.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateArticleRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// Payload for patching one article. Absent or `null` fields are preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateArticleRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}
