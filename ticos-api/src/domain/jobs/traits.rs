use std::collections::HashMap;

use async_trait::async_trait;

use super::types::{JobSearchParams, JobTechnologyDetails, JobWithCompany};

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Ranked full-text search over active job postings.
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// One page of matching jobs plus the total match count ignoring
    /// pagination. The total is 0 when the page is empty.
    async fn search_jobs_with_count(
        &self,
        params: &JobSearchParams,
    ) -> Result<(Vec<JobWithCompany>, i64), RepositoryError>;
}

/// Batch lookup of technology associations.
#[async_trait]
pub trait JobTechnologyRepository: Send + Sync {
    /// Associations for every id in `job_ids`, keyed by job id. Jobs without
    /// associations have no entry. An empty `job_ids` issues no query.
    async fn technologies_for_jobs(
        &self,
        job_ids: &[i32],
    ) -> Result<HashMap<i32, Vec<JobTechnologyDetails>>, RepositoryError>;
}
