pub mod submissions;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::AppError;
use crate::models::{NewSubmission, Submission};

/// Persistence for submissions. Implementations must be safe to share
/// between concurrent requests.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Performs exactly one insert and returns the stored row.
    async fn insert(&self, new: &NewSubmission) -> Result<Submission, AppError>;
}

pub struct PgSubmissionStore {
    pool: PgPool,
}

impl PgSubmissionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubmissionStore for PgSubmissionStore {
    async fn insert(&self, new: &NewSubmission) -> Result<Submission, AppError> {
        Ok(submissions::create(&self.pool, new).await?)
    }
}
