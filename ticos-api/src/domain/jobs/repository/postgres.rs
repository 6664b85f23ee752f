//! PostgreSQL repositories for job search.

use std::collections::HashMap;

use async_trait::async_trait;
use itertools::Itertools;
use sqlx::{postgres::PgArguments, query::QueryAs, PgPool, Postgres};
use time::OffsetDateTime;
use tracing::instrument;

use crate::domain::jobs::traits::{JobRepository, JobTechnologyRepository, RepositoryError};
use crate::domain::jobs::types::{JobSearchParams, JobTechnologyDetails, JobWithCompany};
use crate::domain::search::{BindValue, PredicateBuilder};

/// Active jobs matching `$1`, joined with their company. The window count is
/// computed over the filtered set before `LIMIT`/`OFFSET` apply.
const SEARCH_JOBS_BASE: &str = r#"
    WITH search_query AS (
        SELECT plainto_tsquery('english', $1) AS query
    )
    SELECT
        j.id,
        j.company_id,
        j.title,
        j.description,
        j.experience_level,
        j.employment_type,
        j.location,
        j.work_mode,
        j.application_url,
        j.is_active,
        j.signature,
        j.created_at,
        j.updated_at,
        c.name AS company_name,
        c.logo_url AS company_logo_url,
        COUNT(*) OVER() AS total_count
    FROM jobs j
    JOIN companies c ON c.id = j.company_id
    CROSS JOIN search_query sq
    WHERE j.is_active = true
      AND j.search_vector @@ sq.query
"#;

const SEARCH_JOBS_ORDER: &str = "j.created_at DESC, j.id DESC";

const TECHNOLOGIES_FOR_JOBS: &str = r#"
    SELECT
        jt.job_id,
        jt.technology_id,
        t.name,
        t.category,
        jt.is_required
    FROM job_technologies jt
    JOIN technologies t ON t.id = jt.technology_id
    WHERE jt.job_id = ANY($1)
    ORDER BY jt.job_id, t.name
"#;

/// Build the ranked search statement for `params`.
///
/// Filters are appended in a fixed order so equal filter sets always yield
/// the same SQL text.
pub(crate) fn build_search_query(params: &JobSearchParams) -> (String, Vec<BindValue>) {
    let mut builder = PredicateBuilder::new(SEARCH_JOBS_BASE, params.query.as_str());

    builder
        .add_optional(
            "j.experience_level",
            "=",
            params.experience_level.map(<&'static str>::from),
        )
        .add_optional(
            "j.employment_type",
            "=",
            params.employment_type.map(<&'static str>::from),
        )
        .add_optional("j.location", "=", params.location.map(<&'static str>::from))
        .add_optional("j.work_mode", "=", params.work_mode.map(<&'static str>::from))
        .add_optional(
            "c.name",
            "ILIKE",
            params
                .company
                .as_deref()
                .map(|company| format!("%{}%", escape_like(company))),
        );

    if let Some(range) = params.date_range {
        builder
            .add_predicate("j.created_at", ">=", range.start)
            .add_predicate("j.created_at", "<", range.end);
    }

    builder.order_by(SEARCH_JOBS_ORDER);
    builder.paginate(params.limit, params.offset)
}

/// Escape `LIKE` wildcards so the company filter matches literally.
/// Postgres treats `\` as the default escape character.
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn bind_all<'q, O>(
    mut query: QueryAs<'q, Postgres, O, PgArguments>,
    args: Vec<BindValue>,
) -> QueryAs<'q, Postgres, O, PgArguments> {
    for arg in args {
        query = match arg {
            BindValue::Text(value) => query.bind(value),
            BindValue::Timestamp(value) => query.bind(value),
            BindValue::BigInt(value) => query.bind(value),
        };
    }
    query
}

#[derive(Clone)]
pub struct PgJobRepository {
    pool: PgPool,
}

impl PgJobRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobRepository for PgJobRepository {
    #[instrument(name = "search_jobs_with_count", skip_all, fields(filters = params.filter_count()))]
    async fn search_jobs_with_count(
        &self,
        params: &JobSearchParams,
    ) -> Result<(Vec<JobWithCompany>, i64), RepositoryError> {
        let (sql, args) = build_search_query(params);

        let rows = bind_all(sqlx::query_as::<_, JobRow>(&sql), args)
            .fetch_all(&self.pool)
            .await?;

        Ok(map_job_rows(rows))
    }
}

#[derive(Clone)]
pub struct PgJobTechnologyRepository {
    pool: PgPool,
}

impl PgJobTechnologyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobTechnologyRepository for PgJobTechnologyRepository {
    #[instrument(name = "technologies_for_jobs", skip_all, fields(jobs = job_ids.len()))]
    async fn technologies_for_jobs(
        &self,
        job_ids: &[i32],
    ) -> Result<HashMap<i32, Vec<JobTechnologyDetails>>, RepositoryError> {
        if job_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, JobTechnologyRow>(TECHNOLOGIES_FOR_JOBS)
            .bind(job_ids)
            .fetch_all(&self.pool)
            .await?;

        Ok(group_technology_rows(rows))
    }
}

/// Split rows into jobs and the window total. An empty page reports 0.
fn map_job_rows(rows: Vec<JobRow>) -> (Vec<JobWithCompany>, i64) {
    let total = rows.first().map_or(0, |row| row.total_count);
    let jobs = rows
        .into_iter()
        .map(|row| JobWithCompany {
            id: row.id,
            company_id: row.company_id,
            title: row.title,
            description: row.description,
            experience_level: row.experience_level,
            employment_type: row.employment_type,
            location: row.location,
            work_mode: row.work_mode,
            application_url: row.application_url,
            is_active: row.is_active,
            signature: row.signature,
            created_at: row.created_at,
            updated_at: row.updated_at,
            company_name: row.company_name,
            company_logo_url: row.company_logo_url,
        })
        .collect();

    (jobs, total)
}

fn group_technology_rows(rows: Vec<JobTechnologyRow>) -> HashMap<i32, Vec<JobTechnologyDetails>> {
    rows.into_iter()
        .map(|row| JobTechnologyDetails {
            job_id: row.job_id,
            technology_id: row.technology_id,
            name: row.name,
            category: row.category,
            is_required: row.is_required,
        })
        .into_group_map_by(|details| details.job_id)
}

#[derive(sqlx::FromRow)]
struct JobRow {
    id: i32,
    company_id: i32,
    title: String,
    description: String,
    experience_level: String,
    employment_type: String,
    location: String,
    work_mode: String,
    application_url: String,
    is_active: bool,
    signature: String,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
    company_name: String,
    company_logo_url: Option<String>,
    total_count: i64,
}

#[derive(sqlx::FromRow)]
struct JobTechnologyRow {
    job_id: i32,
    technology_id: i32,
    name: String,
    category: String,
    is_required: bool,
}
