use std::sync::Arc;

use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use crate::domain::{
    jobs::{JobSearchPipeline, JobSearchService, PgJobRepository, PgJobTechnologyRepository},
    search::{SearchConfig, SearchPipeline},
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: Arc<PgPool>,
    pub job_search: Arc<JobSearchPipeline>,
    /// Cancelled on shutdown; each search runs on a child token.
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(db_pool: PgPool, search_config: SearchConfig, shutdown: CancellationToken) -> Self {
        let service = JobSearchService::new(
            PgJobRepository::new(db_pool.clone()),
            PgJobTechnologyRepository::new(db_pool.clone()),
        );

        Self {
            db_pool: Arc::new(db_pool),
            job_search: Arc::new(SearchPipeline::new(service, search_config)),
            shutdown,
        }
    }
}
