//! Positional-parameter SQL accumulation for filtered searches.

use std::fmt::Write;

use time::OffsetDateTime;

/// A value bound to one `$n` placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    Text(String),
    Timestamp(OffsetDateTime),
    BigInt(i64),
}

impl From<String> for BindValue {
    fn from(value: String) -> Self {
        BindValue::Text(value)
    }
}

impl From<&str> for BindValue {
    fn from(value: &str) -> Self {
        BindValue::Text(value.to_string())
    }
}

impl From<OffsetDateTime> for BindValue {
    fn from(value: OffsetDateTime) -> Self {
        BindValue::Timestamp(value)
    }
}

impl From<i64> for BindValue {
    fn from(value: i64) -> Self {
        BindValue::BigInt(value)
    }
}

/// Builds `<base> AND ... ORDER BY ... LIMIT $n OFFSET $m`.
///
/// The builder owns the placeholder counter: every appended fragment takes
/// the next index, and the argument list grows in the same order, so the
/// `n`-th argument always belongs to `$n`. Pagination is appended by
/// [`PredicateBuilder::paginate`], which consumes the builder.
#[derive(Debug, Clone)]
pub struct PredicateBuilder {
    sql: String,
    args: Vec<BindValue>,
}

impl PredicateBuilder {
    /// Start from `base`, which must reference the full-text query as `$1`.
    pub fn new(base: &str, query: impl Into<String>) -> Self {
        Self {
            sql: base.trim_end().to_string(),
            args: vec![BindValue::Text(query.into())],
        }
    }

    fn bind(&mut self, value: BindValue) -> usize {
        self.args.push(value);
        self.args.len()
    }

    /// Append ` AND <expr> <op> $n`, binding `value` as `$n`.
    pub fn add_predicate(&mut self, expr: &str, op: &str, value: impl Into<BindValue>) -> &mut Self {
        let index = self.bind(value.into());
        // writing to a String cannot fail
        let _ = write!(self.sql, " AND {expr} {op} ${index}");
        self
    }

    /// Like [`Self::add_predicate`], but only when `value` is present.
    pub fn add_optional<V>(&mut self, expr: &str, op: &str, value: Option<V>) -> &mut Self
    where
        V: Into<BindValue>,
    {
        if let Some(value) = value {
            self.add_predicate(expr, op, value);
        }
        self
    }

    pub fn order_by(&mut self, clause: &str) -> &mut Self {
        let _ = write!(self.sql, " ORDER BY {clause}");
        self
    }

    /// Append `LIMIT`/`OFFSET` on the next two placeholders and return the
    /// finished statement with its arguments.
    pub fn paginate(mut self, limit: i64, offset: i64) -> (String, Vec<BindValue>) {
        let limit_index = self.bind(BindValue::BigInt(limit));
        let offset_index = self.bind(BindValue::BigInt(offset));
        let _ = write!(self.sql, " LIMIT ${limit_index} OFFSET ${offset_index}");
        (self.sql, self.args)
    }
}
