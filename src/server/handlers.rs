//! HTTP request handlers
//!
//! Thin translation layer between the HTTP surface and the prompt processor:
//! handlers extract the request, delegate, and map domain errors onto status
//! codes. No detection or completion logic lives here.

use super::models::{HealthResponse, ProcessRequest, ProcessResponse};
use crate::core::processor::PromptProcessor;
use crate::domain::PrivChatError;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::sync::Arc;

/// Shared server state
#[derive(Clone)]
pub struct AppState {
    /// The processor every request runs through
    pub processor: Arc<PromptProcessor>,
}

/// `POST /process` - redact a prompt and forward it to the model
pub async fn process_prompt(
    State(state): State<AppState>,
    Json(request): Json<ProcessRequest>,
) -> Result<Json<ProcessResponse>, ApiError> {
    let outcome = state.processor.process(&request.prompt).await?;
    Ok(Json(ProcessResponse::from(outcome)))
}

/// `GET /health` - liveness probe reporting the active model
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        model: state.processor.model().to_string(),
    })
}

/// Domain error carried across the handler boundary
///
/// Maps the error taxonomy onto HTTP statuses: invalid input is the caller's
/// fault (422), a failed NER sidecar makes the gateway a bad proxy (502),
/// anything else is internal (500). Bodies are `{"detail": "<message>"}`.
pub struct ApiError(PrivChatError);

impl From<PrivChatError> for ApiError {
    fn from(err: PrivChatError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self.0 {
            PrivChatError::Validation(message) => {
                (StatusCode::UNPROCESSABLE_ENTITY, message.clone())
            }
            PrivChatError::Ner(e) => (
                StatusCode::BAD_GATEWAY,
                format!("NER service unavailable: {e}"),
            ),
            other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
        };

        if status.is_server_error() {
            tracing::error!(status = %status, error = %self.0, "Request failed");
        } else {
            tracing::warn!(status = %status, detail = %detail, "Request rejected");
        }

        (status, Json(serde_json::json!({ "detail": detail }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NerError;

    #[test]
    fn test_validation_maps_to_422() {
        let err = ApiError(PrivChatError::Validation(
            "Prompt must not be empty".to_string(),
        ));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_ner_failure_maps_to_502() {
        let err = ApiError(PrivChatError::Ner(NerError::Timeout(
            "deadline elapsed".to_string(),
        )));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_other_errors_map_to_500() {
        let err = ApiError(PrivChatError::Detection("bad pattern".to_string()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_error_body_carries_detail() {
        let err = ApiError(PrivChatError::Validation(
            "Prompt must not be empty".to_string(),
        ));
        let response = err.into_response();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body, serde_json::json!({"detail": "Prompt must not be empty"}));
    }
}
