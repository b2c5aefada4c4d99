use axum::Json;
use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use serde_json::{Value, json};

use crate::error::AppError;
use crate::state::SharedState;
use crate::submission::{parser, pipeline};

/// `POST /upload`: multipart text fields plus an optional `photo` file.
///
/// The body is taken raw so the multipart decoder can enforce the upload
/// ceiling itself and report it as 413.
pub async fn upload(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Body,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let form = parser::parse_upload(&headers, body, state.config.max_upload_size).await?;
    let submission = pipeline::run(state.store.as_ref(), form).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Data uploaded successfully",
            "id": submission.id,
        })),
    ))
}
