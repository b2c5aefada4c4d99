use sqlx::PgPool;

use crate::models::{NewSubmission, Submission};

pub async fn create(pool: &PgPool, new: &NewSubmission) -> Result<Submission, sqlx::Error> {
    let (photo_base64, photo_mime_type) = match &new.photo {
        Some(photo) => (Some(photo.base64.as_str()), Some(photo.mime_type.as_str())),
        None => (None, None),
    };

    sqlx::query_as::<_, Submission>(
        "INSERT INTO submissions
            (first_name, last_name, dob, age, photo_base64, photo_mime_type, submitted_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
    )
    .bind(&new.first_name)
    .bind(&new.last_name)
    .bind(&new.dob)
    .bind(new.age)
    .bind(photo_base64)
    .bind(photo_mime_type)
    .bind(new.submitted_at)
    .fetch_one(pool)
    .await
}
