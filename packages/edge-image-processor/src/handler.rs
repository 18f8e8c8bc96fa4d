use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::AppState;
use edge_image_core::{EdgeEvent, EdgeResponse, GatewayError, StorageError, TransformError};

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

/// origin-response イベントを受け取り、エッジに返すレスポンスを返す
pub async fn origin_response(
    State(state): State<AppState>,
    Json(event): Json<EdgeEvent>,
) -> Result<Json<EdgeResponse>, AppError> {
    let Some((request, response)) = event.into_parts() else {
        tracing::warn!("invalid event structure or missing CloudFront data");
        return Ok(Json(EdgeResponse::text(400, "Invalid event structure")));
    };

    tracing::info!(
        uri = %request.uri,
        querystring = %request.querystring,
        status = response.status,
        "received origin response"
    );

    let result = state.pipeline.handle(&request, response).await?;
    Ok(Json(result))
}

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    TransformFailed(String),
    StorageUnavailable(String),
}

impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::InvalidUriFormat { uri } => {
                tracing::warn!(uri = %uri, "invalid URI format");
                AppError::BadRequest(format!("invalid URI format: {uri}"))
            }
            GatewayError::Storage(storage_err) => storage_err.into(),
            GatewayError::Transform(transform_err) => transform_err.into(),
        }
    }
}

/// ストレージの失敗はすべて 502 にする（NotFound はパイプラインがフォールバック済み）
impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        if matches!(err, StorageError::Forbidden) {
            tracing::error!("access denied by Storage Proxy (check CF Access credentials)");
        } else {
            tracing::error!(error = %err, "storage error");
        }
        AppError::StorageUnavailable(err.to_string())
    }
}

impl From<TransformError> for AppError {
    fn from(err: TransformError) -> Self {
        match err {
            TransformError::InvalidParams(msg) => {
                tracing::warn!(error = %msg, "invalid transform parameters");
                AppError::BadRequest(msg)
            }
            TransformError::UnsupportedFormat(format) => {
                tracing::warn!(format = %format, "unsupported output format");
                AppError::BadRequest(format!("unsupported output format: {format}"))
            }
            TransformError::ResolutionTooLarge { width, height } => {
                tracing::warn!(width = %width, height = %height, "image resolution too large");
                AppError::BadRequest(format!("image resolution {width}x{height} is too large"))
            }
            TransformError::ProcessingFailed(msg) => {
                tracing::error!(error = %msg, "image processing failed");
                AppError::TransformFailed(msg)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::TransformFailed(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            AppError::StorageUnavailable(msg) => {
                tracing::error!(error = %msg, "storage unavailable");
                (StatusCode::BAD_GATEWAY, "storage unavailable".to_string())
            }
        };

        let body = serde_json::json!({ "error": message });
        (status, Json(body)).into_response()
    }
}
