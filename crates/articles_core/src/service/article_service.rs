//! Article use-case service.
//!
//! # Responsibility
//! - Provide the list/create/get/update/delete entry points for callers.
//! - Enforce existence before update and delete.
//! - Apply field-level patch semantics on update.
//!
//! # Invariants
//! - Every operation runs in exactly one transactional scope; reads use
//!   `TxMode::ReadOnly`.
//! - Update re-saves the patched entity explicitly; SQLite does not track
//!   in-memory mutations.
//! - `NotFound` is raised where it is detected and never retried.

use crate::model::article::{
    Article, ArticleId, ArticleView, CreateArticleRequest, UpdateArticleRequest,
};
use crate::repo::article_repo::RepoError;
use crate::repo::store::{ArticleStore, TxMode};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Operation that referenced a missing article.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleAction {
    Fetch,
    Update,
    Delete,
}

impl Display for ArticleAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let verb = match self {
            Self::Fetch => "fetch",
            Self::Update => "update",
            Self::Delete => "delete",
        };
        f.write_str(verb)
    }
}

/// Service error for article use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Target article does not exist.
    NotFound { id: ArticleId, action: ArticleAction },
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Store returned a record without identity after a write.
    InconsistentState(&'static str),
}

impl ServiceError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { id, action } => write!(f, "no article to {action}, id={id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => {
                write!(f, "inconsistent article state: {details}")
            }
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Article service facade over a transactional store.
pub struct ArticleService<S: ArticleStore> {
    store: S,
}

impl<S: ArticleStore> ArticleService<S> {
    /// Creates a service using the provided store implementation.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrows the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Lists every article in creation order.
    pub fn get_all_articles(&mut self) -> ServiceResult<Vec<ArticleView>> {
        let outcome: ServiceResult<Vec<ArticleView>> =
            self.store.in_transaction(TxMode::ReadOnly, |repo| {
                repo.find_all()?.into_iter().map(to_view).collect()
            });
        log_outcome("article_list", &outcome, |views| {
            format!("count={}", views.len())
        });
        outcome
    }

    /// Persists a new article from optional fields.
    pub fn create_article(&mut self, request: CreateArticleRequest) -> ServiceResult<ArticleView> {
        let outcome: ServiceResult<ArticleView> =
            self.store.in_transaction(TxMode::ReadWrite, |repo| {
                let saved = repo.save(&Article::new(request.title, request.content))?;
                to_view(saved)
            });
        log_outcome("article_create", &outcome, |view| format!("id={}", view.id));
        outcome
    }

    /// Gets one article by id.
    ///
    /// # Errors
    /// - `ServiceError::NotFound` when no article has `id`.
    pub fn get_article_by_id(&mut self, id: ArticleId) -> ServiceResult<ArticleView> {
        let outcome: ServiceResult<ArticleView> =
            self.store.in_transaction(TxMode::ReadOnly, |repo| {
                let article = repo
                    .find_by_id(id)?
                    .ok_or(not_found(id, ArticleAction::Fetch))?;
                to_view(article)
            });
        log_outcome("article_get", &outcome, |view| format!("id={}", view.id));
        outcome
    }

    /// Patches one article; fields absent from `request` are preserved.
    ///
    /// # Errors
    /// - `ServiceError::NotFound` when no article has `id`.
    pub fn update_article(
        &mut self,
        id: ArticleId,
        request: UpdateArticleRequest,
    ) -> ServiceResult<ArticleView> {
        let outcome: ServiceResult<ArticleView> =
            self.store.in_transaction(TxMode::ReadWrite, |repo| {
                let mut article = repo
                    .find_by_id(id)?
                    .ok_or(not_found(id, ArticleAction::Update))?;
                article.apply_patch(request.title, request.content);
                let saved = repo.save(&article)?;
                to_view(saved)
            });
        log_outcome("article_update", &outcome, |view| format!("id={}", view.id));
        outcome
    }

    /// Deletes one article by id.
    ///
    /// # Errors
    /// - `ServiceError::NotFound` when no article has `id`.
    pub fn delete_article_by_id(&mut self, id: ArticleId) -> ServiceResult<()> {
        let outcome: ServiceResult<()> = self.store.in_transaction(TxMode::ReadWrite, |repo| {
            if !repo.exists_by_id(id)? {
                return Err(not_found(id, ArticleAction::Delete));
            }
            repo.delete_by_id(id)?;
            Ok(())
        });
        log_outcome("article_delete", &outcome, |_| format!("id={id}"));
        outcome
    }
}

fn not_found(id: ArticleId, action: ArticleAction) -> ServiceError {
    ServiceError::NotFound { id, action }
}

fn to_view(article: Article) -> ServiceResult<ArticleView> {
    ArticleView::from_persisted(article).ok_or(ServiceError::InconsistentState(
        "persisted article has no id",
    ))
}

fn log_outcome<T>(event: &str, outcome: &ServiceResult<T>, describe: impl FnOnce(&T) -> String) {
    match outcome {
        Ok(value) => info!("event={event} module=service status=ok {}", describe(value)),
        Err(err) if err.is_not_found() => {
            info!("event={event} module=service status=not_found error={err}")
        }
        Err(err) => warn!("event={event} module=service status=error error={err}"),
    }
}
