use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored submission. Rows are written once and never updated.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub dob: String,
    pub age: i32,
    pub photo_base64: Option<String>,
    pub photo_mime_type: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

/// Encoded attachment. Both columns are written together or not at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    pub base64: String,
    pub mime_type: String,
}

/// Insert payload. `id` is assigned by the store.
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub first_name: String,
    pub last_name: String,
    pub dob: String,
    pub age: i32,
    pub photo: Option<Photo>,
    pub submitted_at: DateTime<Utc>,
}
