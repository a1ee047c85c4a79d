//! Image upload and delivery routes.
//!
//! - `POST /upload` stores the `file` part of a multipart body under its
//!   filename and answers with the delivery URL.
//! - `GET /image/{key}` redirects to the CDN copy of `key`.
//!
//! Keys are the uploaded filenames verbatim. The key space is flat and
//! shared, so uploading an existing filename replaces the stored object.

use axum::{
    Json, Router,
    extract::{FromRequest, Multipart, Path, Request, State, multipart::MultipartError},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use bytes::Bytes;
use serde::Serialize;
use tracing::{error, info, warn};

use crate::{AppState, error::ApiError};
use imgvault_core::delivery::{self, derive_url};
use imgvault_core::storage::{DEFAULT_CONTENT_TYPE, StorageError};
use imgvault_shared::AppError;

/// Message for uploads without a multipart content type.
pub const CONTENT_TYPE_REQUIRED: &str = "Content-Type must be multipart/form-data";
/// Message for uploads without a usable `file` part.
pub const FILE_NOT_PROVIDED: &str = "File not provided";
/// Message for multipart bodies that cannot be parsed.
pub const INVALID_MULTIPART: &str = "Invalid multipart body";
/// Message for bodies over the configured limit.
pub const PAYLOAD_TOO_LARGE: &str = "Payload too large";

/// Name of the form field carrying the upload.
const FILE_FIELD: &str = "file";

/// Creates the image routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/upload", post(upload_image))
        .route("/image/{key}", get(redirect_to_image))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Response for a successful upload.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Confirmation message.
    pub message: &'static str,
    /// Storage key the file was written under.
    pub key: String,
    /// Delivery URL for the stored file.
    pub url: String,
}

/// The `file` part of an upload, fully buffered.
#[derive(Debug)]
struct FilePart {
    filename: String,
    content_type: String,
    payload: Bytes,
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Whether the request declares a multipart form body.
fn is_multipart(request: &Request) -> bool {
    request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("multipart/form-data"))
}

fn multipart_error(err: &MultipartError) -> ApiError {
    warn!(error = %err, "Failed to read multipart body");
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError(AppError::PayloadTooLarge(PAYLOAD_TOO_LARGE.to_string()))
    } else {
        ApiError::bad_request(INVALID_MULTIPART)
    }
}

/// Read the first `file` field. It must carry a non-empty filename.
async fn read_file_part(mut multipart: Multipart) -> Result<FilePart, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(&e))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let Some(filename) = field
            .file_name()
            .filter(|name| !name.is_empty())
            .map(str::to_owned)
        else {
            warn!("Upload rejected: file part has no filename");
            return Err(ApiError::bad_request(FILE_NOT_PROVIDED));
        };

        let content_type = field
            .content_type()
            .filter(|ct| !ct.is_empty())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_owned();

        let payload = field.bytes().await.map_err(|e| multipart_error(&e))?;

        return Ok(FilePart {
            filename,
            content_type,
            payload,
        });
    }

    warn!("Upload rejected: no file part");
    Err(ApiError::bad_request(FILE_NOT_PROVIDED))
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/upload`
/// Store the uploaded file under its filename.
async fn upload_image(
    State(state): State<AppState>,
    request: Request,
) -> Result<Json<UploadResponse>, ApiError> {
    if !is_multipart(&request) {
        warn!("Upload rejected: Content-Type is not multipart/form-data");
        return Err(ApiError::bad_request(CONTENT_TYPE_REQUIRED));
    }

    let multipart = Multipart::from_request(request, &state)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to parse multipart request");
            ApiError::bad_request(INVALID_MULTIPART)
        })?;

    let file = read_file_part(multipart).await?;

    let key = file.filename;
    let size = file.payload.len();

    state
        .storage
        .put(&key, file.payload, &file.content_type)
        .await
        .map_err(|e| {
            if matches!(e, StorageError::InvalidKey(_)) {
                warn!(error = %e, key = %key, "Upload rejected: unusable key");
            } else {
                error!(error = %e, key = %key, "Failed to store image");
            }
            ApiError::from(e)
        })?;

    let url = derive_url(&key, &state.delivery_base_url);

    info!(
        key = %key,
        content_type = %file.content_type,
        size = size,
        "Image uploaded"
    );

    Ok(Json(UploadResponse {
        message: "Upload successful",
        key,
        url,
    }))
}

/// GET `/image/{key}`
/// Redirect to the CDN copy of `key`. Existence is not checked.
async fn redirect_to_image(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Response, ApiError> {
    let url = derive_url(&key, &state.delivery_base_url);
    let location = HeaderValue::try_from(url.as_str())
        .map_err(|e| ApiError(AppError::Internal(format!("invalid delivery URL: {e}"))))?;

    info!(key = %key, url = %url, "Redirecting to delivery URL");

    Ok((
        StatusCode::FOUND,
        [
            (header::LOCATION, location),
            (
                header::CACHE_CONTROL,
                HeaderValue::from_static(delivery::CACHE_CONTROL),
            ),
        ],
    )
        .into_response())
}
