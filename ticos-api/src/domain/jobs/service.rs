//! Job search: ranked page, batch technology fetch, assembly.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::instrument;

use super::assembler::{assemble_jobs, JobResponse};
use super::traits::{JobRepository, JobTechnologyRepository};
use super::types::JobSearchParams;
use crate::domain::search::{run_cancellable, Page, SearchError, SearchService};

/// Search service for job postings.
///
/// # Type Parameters
///
/// * `J` - JobRepository running the ranked search
/// * `T` - JobTechnologyRepository serving the batch association fetch
pub struct JobSearchService<J, T>
where
    J: JobRepository,
    T: JobTechnologyRepository,
{
    jobs: J,
    technologies: T,
}

impl<J, T> JobSearchService<J, T>
where
    J: JobRepository,
    T: JobTechnologyRepository,
{
    pub fn new(jobs: J, technologies: T) -> Self {
        Self { jobs, technologies }
    }
}

#[async_trait]
impl<J, T> SearchService<JobSearchParams> for JobSearchService<J, T>
where
    J: JobRepository,
    T: JobTechnologyRepository,
{
    type Item = JobResponse;

    #[instrument(name = "job_search", skip_all, fields(query = %params.query, limit = params.limit, offset = params.offset))]
    async fn execute_search(
        &self,
        params: &JobSearchParams,
        cancel: &CancellationToken,
    ) -> Result<Page<JobResponse>, SearchError> {
        let (jobs, total) = run_cancellable(
            cancel,
            "search jobs",
            self.jobs.search_jobs_with_count(params),
        )
        .await?;

        // the fetch depends on this page's ids, so it runs second
        let job_ids: Vec<i32> = jobs.iter().map(|job| job.id).collect();
        let technologies = run_cancellable(
            cancel,
            "fetch job technologies",
            self.technologies.technologies_for_jobs(&job_ids),
        )
        .await?;

        tracing::debug!(returned = jobs.len(), total, "jobs fetched");

        Ok(Page::new(assemble_jobs(jobs, technologies), total))
    }
}
