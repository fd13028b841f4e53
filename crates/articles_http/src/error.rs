//! HTTP error mapping.

use articles_core::ServiceError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::warn;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// JSON body returned with every error response.
#[derive(Debug, Deserialize, Serialize)]
pub struct ErrorResponseBody {
    pub error: String,
}

impl IntoResponse for ErrorResponseBody {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Failure surfaced by an HTTP handler.
#[derive(Debug)]
pub enum ApiError {
    Service(ServiceError),
    /// Adapter-level failure (poisoned lock, failed blocking task).
    Internal(String),
}

impl ApiError {
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            Self::Service(err @ ServiceError::NotFound { .. }) => {
                (StatusCode::NOT_FOUND, err.to_string())
            }
            Self::Service(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            Self::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message.clone()),
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Service(err) => write!(f, "{err}"),
            Self::Internal(message) => write!(f, "internal error: {message}"),
        }
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Service(err) => Some(err),
            Self::Internal(_) => None,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (code, error) = self.status_and_message();
        if code.is_server_error() {
            warn!("event=http_error module=http status={} error={error}", code.as_u16());
        }
        (code, ErrorResponseBody { error }).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::ApiError;
    use articles_core::{ArticleAction, RepoError, ServiceError};
    use axum::http::StatusCode;

    #[test]
    fn not_found_maps_to_404_with_id_in_message() {
        let err = ApiError::from(ServiceError::NotFound {
            id: 8,
            action: ArticleAction::Update,
        });

        let (code, message) = err.status_and_message();
        assert_eq!(code, StatusCode::NOT_FOUND);
        assert!(message.contains("id=8"));
    }

    #[test]
    fn storage_failures_map_to_500() {
        let err = ApiError::from(ServiceError::Repo(RepoError::ReadOnly("save")));
        assert_eq!(err.status_and_message().0, StatusCode::INTERNAL_SERVER_ERROR);

        let err = ApiError::Internal("lock poisoned".to_string());
        assert_eq!(err.status_and_message().0, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
