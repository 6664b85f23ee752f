//! In-memory repositories for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::jobs::traits::{JobRepository, JobTechnologyRepository, RepositoryError};
use crate::domain::jobs::types::{JobSearchParams, JobTechnologyDetails, JobWithCompany};

/// Mock job store implementing both repository traits.
///
/// Matching is a simplified stand-in for full-text search: every query term
/// must appear (case-insensitively) in the title or description.
#[derive(Clone, Default)]
pub struct MockJobRepository {
    jobs: Arc<RwLock<Vec<JobWithCompany>>>,
    technologies: Arc<RwLock<Vec<JobTechnologyDetails>>>,
    search_calls: Arc<AtomicUsize>,
    batch_calls: Arc<AtomicUsize>,
    fail_search: Arc<RwLock<bool>>,
    delay: Arc<RwLock<Option<Duration>>>,
}

impl MockJobRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_jobs(self, jobs: Vec<JobWithCompany>) -> Self {
        self.jobs.write().unwrap().extend(jobs);
        self
    }

    pub fn with_technologies(self, technologies: Vec<JobTechnologyDetails>) -> Self {
        self.technologies.write().unwrap().extend(technologies);
        self
    }

    /// Make every job search fail with a pool timeout.
    pub fn failing(self) -> Self {
        *self.fail_search.write().unwrap() = true;
        self
    }

    /// Delay every call by `delay` before answering.
    pub fn with_delay(self, delay: Duration) -> Self {
        *self.delay.write().unwrap() = Some(delay);
        self
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn batch_calls(&self) -> usize {
        self.batch_calls.load(Ordering::SeqCst)
    }

    async fn wait(&self) {
        let delay = *self.delay.read().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }

    fn matches(job: &JobWithCompany, params: &JobSearchParams) -> bool {
        let text = format!("{} {}", job.title, job.description).to_lowercase();
        if !params
            .query
            .split_whitespace()
            .all(|term| text.contains(&term.to_lowercase()))
        {
            return false;
        }
        if !job.is_active {
            return false;
        }

        let equals = |value: Option<String>, column: &str| value.map_or(true, |v| v == column);
        if !equals(params.experience_level.map(|v| v.to_string()), &job.experience_level)
            || !equals(params.employment_type.map(|v| v.to_string()), &job.employment_type)
            || !equals(params.location.map(|v| v.to_string()), &job.location)
            || !equals(params.work_mode.map(|v| v.to_string()), &job.work_mode)
        {
            return false;
        }

        if let Some(company) = &params.company {
            if !job
                .company_name
                .to_lowercase()
                .contains(&company.to_lowercase())
            {
                return false;
            }
        }

        if let Some(range) = params.date_range {
            if job.created_at < range.start || job.created_at >= range.end {
                return false;
            }
        }

        true
    }
}

#[async_trait]
impl JobRepository for MockJobRepository {
    async fn search_jobs_with_count(
        &self,
        params: &JobSearchParams,
    ) -> Result<(Vec<JobWithCompany>, i64), RepositoryError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.wait().await;

        if *self.fail_search.read().unwrap() {
            return Err(RepositoryError::Database(sqlx::Error::PoolTimedOut));
        }

        let mut matched: Vec<JobWithCompany> = self
            .jobs
            .read()
            .unwrap()
            .iter()
            .filter(|job| Self::matches(job, params))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let total = matched.len() as i64;
        let page: Vec<JobWithCompany> = matched
            .into_iter()
            .skip(params.offset as usize)
            .take(params.limit as usize)
            .collect();

        if page.is_empty() {
            return Ok((page, 0));
        }
        Ok((page, total))
    }
}

#[async_trait]
impl JobTechnologyRepository for MockJobRepository {
    async fn technologies_for_jobs(
        &self,
        job_ids: &[i32],
    ) -> Result<HashMap<i32, Vec<JobTechnologyDetails>>, RepositoryError> {
        if job_ids.is_empty() {
            return Ok(HashMap::new());
        }
        self.batch_calls.fetch_add(1, Ordering::SeqCst);
        self.wait().await;

        let mut technologies: Vec<JobTechnologyDetails> = self
            .technologies
            .read()
            .unwrap()
            .iter()
            .filter(|t| job_ids.contains(&t.job_id))
            .cloned()
            .collect();
        technologies.sort_by(|a, b| a.job_id.cmp(&b.job_id).then_with(|| a.name.cmp(&b.name)));

        let mut grouped: HashMap<i32, Vec<JobTechnologyDetails>> = HashMap::new();
        for technology in technologies {
            grouped.entry(technology.job_id).or_default().push(technology);
        }
        Ok(grouped)
    }
}
