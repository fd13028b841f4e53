//! Core domain logic for the articles service.
//! This crate is the single source of truth for article invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{
    default_log_level, init_logging, init_stderr_logging, logging_status, LogTarget,
};
pub use model::article::{
    Article, ArticleId, ArticleView, CreateArticleRequest, UpdateArticleRequest,
};
pub use repo::article_repo::{ArticleRepository, RepoError, RepoResult, SqliteArticleRepository};
pub use repo::memory::InMemoryArticleStore;
pub use repo::store::{ArticleStore, SqliteArticleStore, TxMode};
pub use service::article_service::{ArticleAction, ArticleService, ServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
