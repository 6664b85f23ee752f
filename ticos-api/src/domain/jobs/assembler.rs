//! Merges a page of jobs with their batch-fetched technologies.

use std::collections::HashMap;

use serde::Serialize;
use time::OffsetDateTime;

use super::types::{JobTechnologyDetails, JobWithCompany};

/// A job as returned by `GET /api/v1/jobs`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobResponse {
    pub job_id: i32,
    pub company_id: i32,
    pub company_name: String,
    pub company_logo_url: Option<String>,
    pub title: String,
    pub description: String,
    pub experience_level: String,
    pub employment_type: String,
    pub location: String,
    pub work_mode: String,
    pub application_url: String,
    pub technologies: Vec<TechnologyResponse>,
    #[serde(with = "time::serde::rfc3339")]
    pub posted_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TechnologyResponse {
    pub name: String,
    pub category: String,
    pub required: bool,
}

impl From<JobTechnologyDetails> for TechnologyResponse {
    fn from(details: JobTechnologyDetails) -> Self {
        Self {
            name: details.name,
            category: details.category,
            required: details.is_required,
        }
    }
}

impl JobResponse {
    fn new(job: JobWithCompany, technologies: Vec<TechnologyResponse>) -> Self {
        Self {
            job_id: job.id,
            company_id: job.company_id,
            company_name: job.company_name,
            company_logo_url: job.company_logo_url,
            title: job.title,
            description: job.description,
            experience_level: job.experience_level,
            employment_type: job.employment_type,
            location: job.location,
            work_mode: job.work_mode,
            application_url: job.application_url,
            technologies,
            posted_at: job.created_at,
        }
    }
}

/// Attach technologies to `jobs`, keeping the search order. Jobs absent from
/// `technologies` get an empty list.
pub fn assemble_jobs(
    jobs: Vec<JobWithCompany>,
    mut technologies: HashMap<i32, Vec<JobTechnologyDetails>>,
) -> Vec<JobResponse> {
    jobs.into_iter()
        .map(|job| {
            let techs = technologies
                .remove(&job.id)
                .unwrap_or_default()
                .into_iter()
                .map(TechnologyResponse::from)
                .collect();
            JobResponse::new(job, techs)
        })
        .collect()
}
