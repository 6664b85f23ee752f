use std::time::Duration;

/// Boxed error from a record-store collaborator.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Error type for one search invocation.
///
/// `RequestParse`, `Validation` and `Conversion` are caused by the client and
/// name the offending input. The remaining variants are backend faults and
/// carry the name of the operation that failed.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("request parse error: {0}")]
    RequestParse(String),

    #[error("validation errors: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("conversion error for field {field} with value {value}: {reason}")]
    Conversion {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("search error during {operation}: {source}")]
    Execution {
        operation: &'static str,
        #[source]
        source: BoxError,
    },

    #[error("search cancelled during {operation}")]
    Cancelled { operation: &'static str },

    #[error("search exceeded its deadline of {0:?}")]
    Timeout(Duration),
}

impl SearchError {
    pub fn conversion(
        field: &'static str,
        value: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        Self::Conversion {
            field,
            value: value.into(),
            reason: reason.to_string(),
        }
    }

    pub fn execution(operation: &'static str, source: impl Into<BoxError>) -> Self {
        Self::Execution {
            operation,
            source: source.into(),
        }
    }

    /// Whether the caller supplied bad input (as opposed to a backend fault).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::RequestParse(_) | Self::Validation(_) | Self::Conversion { .. }
        )
    }
}
