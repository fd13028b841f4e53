//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define identifier-addressed data access contracts for articles.
//! - Provide transactional scopes that bind a repository to one unit of work.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Every repository call made by the service runs inside
//!   `ArticleStore::in_transaction`.
//! - Absence is reported as `None`/`false`, never as an error, at this layer.

pub mod article_repo;
pub mod memory;
pub mod store;
