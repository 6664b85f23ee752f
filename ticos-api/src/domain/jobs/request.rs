//! Wire-level job search request: binding, validation and conversion.

use std::str::FromStr;

use serde::Deserialize;
use serde_with::{serde_as, NoneAsEmptyString};
use time::{format_description::BorrowedFormatItem, macros::format_description, Date};

use super::types::{
    DateRange, EmploymentType, ExperienceLevel, JobSearchParams, Location, WorkMode,
};
use crate::domain::search::{Convertible, SearchConfig, SearchError, Validatable};

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Share of "special" characters above which a query is rejected.
const MAX_SPECIAL_CHAR_RATIO: f64 = 0.2;

/// Query parameters of `GET /api/v1/jobs`.
///
/// Empty values (`location=`) bind as `None`.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobSearchRequest {
    pub q: String,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub offset: Option<i64>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub experience_level: Option<String>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub employment_type: Option<String>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub location: Option<String>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub work_mode: Option<String>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub company: Option<String>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub date_from: Option<String>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub date_to: Option<String>,
}

#[cfg(test)]
impl JobSearchRequest {
    pub fn new(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            ..Default::default()
        }
    }
}

impl JobSearchRequest {
    /// Trimmed company filter; whitespace-only counts as absent.
    fn company_filter(&self) -> Option<&str> {
        self.company
            .as_deref()
            .map(str::trim)
            .filter(|company| !company.is_empty())
    }
}

impl Validatable for JobSearchRequest {
    fn validate(&self, config: &SearchConfig) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        validate_query(&self.q, config, &mut errors);

        validate_enum::<ExperienceLevel>(self.experience_level.as_deref(), "experience_level", &mut errors);
        validate_enum::<EmploymentType>(self.employment_type.as_deref(), "employment_type", &mut errors);
        validate_enum::<Location>(self.location.as_deref(), "location", &mut errors);
        validate_enum::<WorkMode>(self.work_mode.as_deref(), "work_mode", &mut errors);

        if let Some(company) = self.company_filter() {
            if company.chars().count() > config.max_company_length {
                errors.push(format!(
                    "company cannot exceed {} characters",
                    config.max_company_length
                ));
            }
        }

        validate_date_range(self.date_from.as_deref(), self.date_to.as_deref(), &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl Convertible for JobSearchRequest {
    type Params = JobSearchParams;

    fn to_search_params(&self, config: &SearchConfig) -> Result<JobSearchParams, SearchError> {
        let mut params = JobSearchParams::new(
            self.q.trim(),
            config.resolve_limit(self.limit),
            config.resolve_offset(self.offset),
        );

        params.experience_level = parse_enum(self.experience_level.as_deref(), "experience_level")?;
        params.employment_type = parse_enum(self.employment_type.as_deref(), "employment_type")?;
        params.location = parse_enum(self.location.as_deref(), "location")?;
        params.work_mode = parse_enum(self.work_mode.as_deref(), "work_mode")?;
        params.company = self.company_filter().map(str::to_string);

        // a lone bound never reaches here, validation rejects it
        if let (Some(from), Some(to)) = (self.date_from.as_deref(), self.date_to.as_deref()) {
            params.date_range = Some(to_date_range(from, to)?);
        }

        Ok(params)
    }
}

fn validate_query(q: &str, config: &SearchConfig, errors: &mut Vec<String>) {
    let query = q.trim();
    if query.is_empty() {
        errors.push("search query cannot be empty".to_string());
        return;
    }

    let length = query.chars().count();
    if length < config.min_query_length {
        errors.push(format!(
            "search query must be at least {} characters",
            config.min_query_length
        ));
    }
    if length > config.max_query_length {
        errors.push(format!(
            "search query cannot exceed {} characters",
            config.max_query_length
        ));
    }
    if contains_suspicious_patterns(query) {
        errors.push("search query contains invalid characters or patterns".to_string());
    }
}

fn contains_suspicious_patterns(query: &str) -> bool {
    let total = query.chars().count();
    let special = query
        .chars()
        .filter(|c| {
            !c.is_alphanumeric() && !c.is_whitespace() && !matches!(c, '-' | '_' | '.' | '+' | '#')
        })
        .count();

    if special as f64 / total as f64 > MAX_SPECIAL_CHAR_RATIO {
        return true;
    }

    ["--", "/*", "*/"].iter().any(|token| query.contains(token))
}

fn validate_enum<T: FromStr>(value: Option<&str>, field: &str, errors: &mut Vec<String>) {
    if let Some(value) = value {
        if T::from_str(value).is_err() {
            errors.push(format!("invalid value for field: '{field}'"));
        }
    }
}

fn validate_date_range(from: Option<&str>, to: Option<&str>, errors: &mut Vec<String>) {
    match (from, to) {
        (None, None) => {}
        (Some(from), Some(to)) => {
            let from = parse_calendar_date(from);
            let to = parse_calendar_date(to);
            if from.is_none() {
                errors.push("date_from must be in YYYY-MM-DD format".to_string());
            }
            if to.is_none() {
                errors.push("date_to must be in YYYY-MM-DD format".to_string());
            }
            if let (Some(from), Some(to)) = (from, to) {
                if from > to {
                    errors.push("date_from cannot be after date_to".to_string());
                }
            }
        }
        _ => errors.push("both date_from and date_to must be provided together".to_string()),
    }
}

fn parse_enum<T>(value: Option<&str>, field: &'static str) -> Result<Option<T>, SearchError>
where
    T: FromStr,
    T::Err: ToString,
{
    value
        .map(|v| T::from_str(v).map_err(|err| SearchError::conversion(field, v, err)))
        .transpose()
}

/// Parse a strict `YYYY-MM-DD` day. `[year]` alone would also accept a
/// leading sign (`+2024-01-01`, `-0001-01-01`).
fn parse_calendar_date(value: &str) -> Option<Date> {
    if value.len() != 10 || !value.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    Date::parse(value, DATE_FORMAT).ok()
}

fn parse_date(value: &str, field: &'static str) -> Result<Date, SearchError> {
    parse_calendar_date(value)
        .ok_or_else(|| SearchError::conversion(field, value, "expected a YYYY-MM-DD date"))
}

fn to_date_range(from: &str, to: &str) -> Result<DateRange, SearchError> {
    let start = parse_date(from, "date_from")?;
    let end = parse_date(to, "date_to")?;
    if start > end {
        return Err(SearchError::conversion(
            "date_from",
            from,
            "date_from cannot be after date_to",
        ));
    }
    let end = end
        .next_day()
        .ok_or_else(|| SearchError::conversion("date_to", to, "no following calendar day"))?;

    Ok(DateRange {
        start: start.midnight().assume_utc(),
        end: end.midnight().assume_utc(),
    })
}
