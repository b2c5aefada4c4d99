use base64::Engine;
use base64::engine::general_purpose::STANDARD as B64;
use chrono::Utc;

use crate::db::SubmissionStore;
use crate::error::AppError;
use crate::models::{NewSubmission, Photo, Submission};

use super::fields;
use super::parser::{Attachment, UploadForm};

/// Validate an upload and persist it with a single insert.
///
/// Nothing is written when validation fails. Store errors are returned
/// as-is and rendered as a generic 500 by `AppError`.
pub async fn run(store: &dyn SubmissionStore, form: UploadForm) -> Result<Submission, AppError> {
    let valid = fields::validate(form).inspect_err(|e| {
        tracing::debug!("Rejected upload: {e}");
    })?;

    let new = NewSubmission {
        first_name: valid.first_name,
        last_name: valid.last_name,
        dob: valid.dob,
        age: valid.age,
        photo: valid.photo.map(encode_photo),
        submitted_at: Utc::now(),
    };

    let submission = store.insert(&new).await?;
    tracing::info!("Submission stored with id {}", submission.id);

    Ok(submission)
}

fn encode_photo(attachment: Attachment) -> Photo {
    Photo {
        base64: B64.encode(&attachment.bytes),
        mime_type: attachment.content_type,
    }
}
