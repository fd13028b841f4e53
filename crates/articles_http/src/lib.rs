//! HTTP adapter for the articles service.
//!
//! # Responsibility
//! - Map the `/api/articles` REST surface onto `ArticleService` calls.
//! - Translate service failures into HTTP status codes and JSON error bodies.
//!
//! # Invariants
//! - Handlers never touch storage directly; every call goes through the service.
//! - Service calls run on the blocking pool, one transactional scope per request.

mod articles;
mod error;
mod middleware;

pub use articles::{make_router, AppState};
pub use error::{ApiError, ApiResult, ErrorResponseBody};
