//! Mapping of application errors to HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use imgvault_core::storage::StorageError;
use imgvault_shared::AppError;

/// Error returned by route handlers.
///
/// Client errors are answered with their message as plain text. Server
/// errors are answered with a JSON body carrying a generic message; the
/// underlying cause stays in the logs.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl ApiError {
    /// Create a 400 error with a fixed message.
    #[must_use]
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self(AppError::BadRequest(msg.into()))
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if self.0.is_client_error() {
            return (status, self.0.message().to_owned()).into_response();
        }

        let message = match self.0 {
            AppError::Storage(_) => "Storage operation failed",
            _ => "An error occurred",
        };

        (
            status,
            Json(json!({
                "error": self.0.error_code(),
                "message": message
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::header::CONTENT_TYPE;
    use http_body_util::BodyExt;

    use super::*;

    async fn body_string(response: Response) -> String {
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body should collect")
            .to_bytes();
        String::from_utf8(bytes.to_vec()).expect("body should be UTF-8")
    }

    #[tokio::test]
    async fn test_client_error_is_plain_text() {
        let response = ApiError::bad_request("File not provided").into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let content_type = response.headers()[CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("text/plain"));
        assert_eq!(body_string(response).await, "File not provided");
    }

    #[tokio::test]
    async fn test_storage_error_hides_cause() {
        let err = StorageError::PermissionDenied("AccessKeyId AKIA123 is invalid".into());
        let response = ApiError::from(err).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_string(response).await;
        assert!(!body.contains("AKIA123"));

        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["error"], "storage_error");
        assert_eq!(json["message"], "Storage operation failed");
    }

    #[tokio::test]
    async fn test_payload_too_large_status() {
        let response = ApiError(AppError::PayloadTooLarge("too big".into())).into_response();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_internal_error_is_generic_json() {
        let response = ApiError(AppError::Internal("secret detail".into())).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["error"], "internal_error");
        assert_eq!(json["message"], "An error occurred");
    }
}
