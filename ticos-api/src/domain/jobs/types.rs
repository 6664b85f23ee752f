//! Core types for the job search domain.

use strum::{Display, EnumIter, EnumString, IntoStaticStr};
use time::OffsetDateTime;

use crate::domain::search::SearchParams;

/// Seniority a posting asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr)]
pub enum ExperienceLevel {
    #[strum(serialize = "Entry-level")]
    EntryLevel,
    Junior,
    #[strum(serialize = "Mid-level")]
    MidLevel,
    Senior,
    Lead,
    Principal,
    Executive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr)]
pub enum EmploymentType {
    #[strum(serialize = "Full-time")]
    FullTime,
    #[strum(serialize = "Part-time")]
    PartTime,
    Contract,
    Freelance,
    Temporary,
    Internship,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr)]
pub enum Location {
    #[strum(serialize = "Costa Rica")]
    CostaRica,
    #[strum(serialize = "LATAM")]
    Latam,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr)]
pub enum WorkMode {
    Remote,
    Hybrid,
    Onsite,
}

/// Creation-time window, inclusive of both calendar days.
///
/// `end` is exclusive: the first instant of the day after `date_to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: OffsetDateTime,
    pub end: OffsetDateTime,
}

/// Validated job search criteria (the filter value object).
///
/// Optional filters are `None` unless the request carried a non-empty value.
#[derive(Debug, Clone, PartialEq)]
pub struct JobSearchParams {
    /// Trimmed, non-empty full-text query
    pub query: String,
    pub limit: i64,
    pub offset: i64,
    pub experience_level: Option<ExperienceLevel>,
    pub employment_type: Option<EmploymentType>,
    pub location: Option<Location>,
    pub work_mode: Option<WorkMode>,
    /// Case-insensitive substring of the company name
    pub company: Option<String>,
    pub date_range: Option<DateRange>,
}

impl JobSearchParams {
    pub fn new(query: impl Into<String>, limit: i64, offset: i64) -> Self {
        Self {
            query: query.into(),
            limit,
            offset,
            experience_level: None,
            employment_type: None,
            location: None,
            work_mode: None,
            company: None,
            date_range: None,
        }
    }

    /// Number of optional filters set (the date range counts once).
    pub fn filter_count(&self) -> usize {
        [
            self.experience_level.is_some(),
            self.employment_type.is_some(),
            self.location.is_some(),
            self.work_mode.is_some(),
            self.company.is_some(),
            self.date_range.is_some(),
        ]
        .into_iter()
        .filter(|set| *set)
        .count()
    }
}

impl SearchParams for JobSearchParams {
    fn limit(&self) -> i64 {
        self.limit
    }

    fn offset(&self) -> i64 {
        self.offset
    }
}

/// An active job posting joined with its company.
#[derive(Debug, Clone, PartialEq)]
pub struct JobWithCompany {
    pub id: i32,
    pub company_id: i32,
    pub title: String,
    pub description: String,
    pub experience_level: String,
    pub employment_type: String,
    pub location: String,
    pub work_mode: String,
    pub application_url: String,
    pub is_active: bool,
    pub signature: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub company_name: String,
    pub company_logo_url: Option<String>,
}

/// A job-technology association with the technology's attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobTechnologyDetails {
    pub job_id: i32,
    pub technology_id: i32,
    pub name: String,
    pub category: String,
    pub is_required: bool,
}
