use std::collections::HashMap;

use axum::body::Body;
use axum::http::HeaderMap;
use axum::http::header::CONTENT_TYPE;
use bytes::Bytes;
use multer::{Constraints, Multipart, SizeLimit};

use crate::error::AppError;

/// Form field carrying the optional attachment.
pub const PHOTO_FIELD: &str = "photo";

const DEFAULT_MIME_TYPE: &str = "application/octet-stream";
const MAX_TEXT_FIELD_SIZE: u64 = 64 * 1024;
/// Allowance for text fields and part headers on top of the attachment.
const FORM_OVERHEAD: u64 = 1024 * 1024;

pub const FILE_TOO_LARGE: &str = "File too large";
pub const FIELD_TOO_LARGE: &str = "Field too large";
pub const REQUEST_TOO_LARGE: &str = "Request too large";

/// An uploaded file, held in memory for the lifetime of the request.
#[derive(Debug, Clone)]
pub struct Attachment {
    pub bytes: Bytes,
    pub content_type: String,
}

#[derive(Debug, Default)]
pub struct UploadForm {
    pub fields: HashMap<String, String>,
    pub photo: Option<Attachment>,
}

/// Decode a multipart/form-data body using multer.
///
/// A request without a multipart boundary yields an empty form so that the
/// caller reports it as missing text data. Size limits are enforced while
/// streaming; exceeding any of them maps to `PayloadTooLarge`.
pub async fn parse_upload(
    headers: &HeaderMap,
    body: Body,
    max_upload_size: usize,
) -> Result<UploadForm, AppError> {
    let Some(boundary) = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|ct| multer::parse_boundary(ct).ok())
    else {
        tracing::debug!("Upload request without multipart boundary");
        return Ok(UploadForm::default());
    };

    let photo_limit = max_upload_size as u64;
    let constraints = Constraints::new().size_limit(
        SizeLimit::new()
            .whole_stream(photo_limit.saturating_add(FORM_OVERHEAD))
            .per_field(MAX_TEXT_FIELD_SIZE)
            .for_field(PHOTO_FIELD, photo_limit),
    );

    let mut multipart =
        Multipart::with_constraints(body.into_data_stream(), boundary, constraints);

    let mut form = UploadForm::default();
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        let is_file = field.file_name().is_some();

        // A plain text part named `photo` is not an attachment
        if name == PHOTO_FIELD && is_file {
            let content_type = field
                .content_type()
                .map(|m| m.to_string())
                .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string());
            let bytes = field.bytes().await.map_err(multipart_error)?;

            // Browsers send an empty part when no file was chosen
            if bytes.is_empty() {
                continue;
            }
            if form.photo.is_some() {
                return Err(AppError::BadRequest(
                    "Only one photo may be attached".to_string(),
                ));
            }
            form.photo = Some(Attachment {
                bytes,
                content_type,
            });
        } else if is_file {
            return Err(AppError::BadRequest(format!(
                "Unexpected file field: {name}"
            )));
        } else {
            let value = field.text().await.map_err(multipart_error)?;
            form.fields.insert(name, value);
        }
    }

    Ok(form)
}

fn multipart_error(err: multer::Error) -> AppError {
    match err {
        multer::Error::FieldSizeExceeded { field_name, .. } => {
            let reason = if field_name.as_deref() == Some(PHOTO_FIELD) {
                FILE_TOO_LARGE
            } else {
                FIELD_TOO_LARGE
            };
            AppError::PayloadTooLarge(reason.to_string())
        }
        multer::Error::StreamSizeExceeded { .. } => {
            AppError::PayloadTooLarge(REQUEST_TOO_LARGE.to_string())
        }
        multer::Error::StreamReadFailed(e) => {
            AppError::Internal(format!("Failed to read upload body: {e}"))
        }
        e => AppError::BadRequest(format!("Malformed multipart body: {e}")),
    }
}
