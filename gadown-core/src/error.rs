//! Core error types for `gadown`.

use thiserror::Error;

/// Core error type for request validation and output.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A required input was not given.
    #[error("Missing required input: {0}")]
    MissingInput(&'static str),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Metrics and dimensions belong to more than one API.
    #[error(
        "You can not use multiple APIs in your query: `{field}` does not start with `{expected}:`. \
         Make sure that all metrics and dimensions start with the same prefix e.g. `ga:` or `mcf:`."
    )]
    AmbiguousApi {
        /// The prefix fixed by the first identifier.
        expected: &'static str,
        /// The identifier that broke the rule.
        field: String,
    },

    /// An identifier carries no known API prefix.
    #[error("Could not detect API from {kind} `{field}`. It must start with `ga:` or `mcf:`.")]
    UnknownField {
        /// "metric" or "dimension".
        kind: &'static str,
        /// The offending identifier.
        field: String,
    },

    /// Invalid start or end date.
    #[error("Invalid date `{0}`: expected YYYY-MM-DD, today, yesterday or NdaysAgo")]
    InvalidDate(String),

    /// Filter expression could not be translated.
    #[error("Invalid filter: {0}")]
    Filter(#[from] FilterError),

    /// Writing output failed.
    #[error("Output error: {0}")]
    Output(String),
}

impl CoreError {
    /// Returns true if the error is caused by the query itself rather than
    /// by configuration or I/O.
    pub fn is_query_error(&self) -> bool {
        matches!(
            self,
            Self::AmbiguousApi { .. }
                | Self::UnknownField { .. }
                | Self::InvalidDate(_)
                | Self::Filter(_)
        )
    }
}

/// Filter expression syntax errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// Parentheses are not supported.
    #[error("brackets in filters are not supported: {0}")]
    Grouping(String),

    /// A term contains none of the known operators.
    #[error("filter contains no or unknown operator: `{0}`")]
    UnknownOperator(String),

    /// The left-hand side of a term is neither a known metric nor dimension.
    #[error("unknown dimension/metric: `{0}`")]
    UnknownField(String),

    /// An OR-group combines metric and dimension terms.
    #[error("metrics and dimensions can not be combined with OR: `{0}`")]
    MixedGroup(String),
}
