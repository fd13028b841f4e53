//! `/api/articles` routes.

use crate::error::{ApiError, ApiResult};
use crate::middleware::log_requests;
use articles_core::{
    core_version, ArticleId, ArticleService, ArticleStore, ArticleView, CreateArticleRequest,
    ServiceResult, UpdateArticleRequest,
};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use std::sync::{Arc, Mutex};

/// Application state shared by all handlers.
///
/// The service is serialized behind a mutex; each request holds the lock for
/// exactly one service call.
pub struct AppState<S: ArticleStore> {
    service: Mutex<ArticleService<S>>,
}

impl<S: ArticleStore> AppState<S> {
    pub fn new(service: ArticleService<S>) -> Self {
        Self {
            service: Mutex::new(service),
        }
    }
}

impl<S: ArticleStore + Send + 'static> AppState<S> {
    /// Runs one service call on the blocking pool.
    async fn call<T, F>(self: Arc<Self>, work: F) -> ApiResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut ArticleService<S>) -> ServiceResult<T> + Send + 'static,
    {
        tokio::task::spawn_blocking(move || {
            let mut service = self
                .service
                .lock()
                .map_err(|_| ApiError::Internal("article service lock poisoned".to_string()))?;
            work(&mut *service).map_err(ApiError::from)
        })
        .await
        .map_err(|err| ApiError::Internal(format!("article task failed: {err}")))?
    }
}

#[derive(Debug, Serialize)]
struct HealthRsp {
    status: String,
    version: String,
}

async fn list_articles<S>(
    State(state): State<Arc<AppState<S>>>,
) -> ApiResult<Json<Vec<ArticleView>>>
where
    S: ArticleStore + Send + 'static,
{
    let views = state.call(|service| service.get_all_articles()).await?;
    Ok(Json(views))
}

async fn create_article<S>(
    State(state): State<Arc<AppState<S>>>,
    Json(request): Json<CreateArticleRequest>,
) -> ApiResult<(StatusCode, Json<ArticleView>)>
where
    S: ArticleStore + Send + 'static,
{
    let view = state
        .call(move |service| service.create_article(request))
        .await?;
    Ok((StatusCode::CREATED, Json(view)))
}

async fn get_article<S>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<ArticleId>,
) -> ApiResult<Json<ArticleView>>
where
    S: ArticleStore + Send + 'static,
{
    let view = state
        .call(move |service| service.get_article_by_id(id))
        .await?;
    Ok(Json(view))
}

async fn update_article<S>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<ArticleId>,
    Json(request): Json<UpdateArticleRequest>,
) -> ApiResult<Json<ArticleView>>
where
    S: ArticleStore + Send + 'static,
{
    let view = state
        .call(move |service| service.update_article(id, request))
        .await?;
    Ok(Json(view))
}

async fn delete_article<S>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<ArticleId>,
) -> ApiResult<StatusCode>
where
    S: ArticleStore + Send + 'static,
{
    state
        .call(move |service| service.delete_article_by_id(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn health() -> Json<HealthRsp> {
    Json(HealthRsp {
        status: "ok".to_string(),
        version: core_version().to_string(),
    })
}

/// Returns a router serving the article API over `state`.
pub fn make_router<S>(state: Arc<AppState<S>>) -> Router
where
    S: ArticleStore + Send + 'static,
{
    Router::new()
        .route(
            "/api/articles",
            get(list_articles::<S>).post(create_article::<S>),
        )
        .route(
            "/api/articles/:id",
            get(get_article::<S>)
                .put(update_article::<S>)
                .delete(delete_article::<S>),
        )
        .route("/api/health", get(health))
        .layer(axum::middleware::from_fn(log_requests))
        .with_state(state)
}
