use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use killfeed_application::AppError;
use killfeed_domain::{PipelineError, StageError};

#[derive(Debug)]
pub enum HttpError {
    Unauthorized,
    BadRequest(String),
    NotFound(String),
    /// A killmail failed inside the pipeline.
    Pipeline(StageError),
    Internal(String),
}

impl From<AppError> for HttpError {
    fn from(value: AppError) -> Self {
        match value {
            AppError::Unauthorized => HttpError::Unauthorized,
            AppError::BadRequest(msg) => HttpError::BadRequest(msg),
            AppError::NotFound(msg) => HttpError::NotFound(msg),
            AppError::Internal(err) => HttpError::Internal(err.to_string()),
        }
    }
}

impl From<StageError> for HttpError {
    fn from(value: StageError) -> Self {
        HttpError::Pipeline(value)
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    stage: Option<String>,
}

fn pipeline_status(err: &PipelineError) -> StatusCode {
    match err {
        PipelineError::Transport(_) | PipelineError::NotFound { .. } | PipelineError::Delivery(_) => {
            StatusCode::BAD_GATEWAY
        }
        PipelineError::Parse(_) => StatusCode::UNPROCESSABLE_ENTITY,
        PipelineError::Config(_) | PipelineError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, message, stage) = match self {
            HttpError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized".to_string(), None),
            HttpError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, format!("bad request: {}", msg), None)
            }
            HttpError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            HttpError::Pipeline(err) => (
                pipeline_status(&err.source),
                err.to_string(),
                Some(err.stage.to_string()),
            ),
            HttpError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg, None),
        };
        (status, Json(ErrorBody { error: message, stage })).into_response()
    }
}
