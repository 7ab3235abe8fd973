//! API variant detection.
//!
//! Every identifier in a query carries a namespace prefix (`ga:` or `mcf:`)
//! that decides which upstream API serves it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ============================================================================
// API Variant
// ============================================================================

/// The two upstream reporting APIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiVariant {
    /// Analytics Reporting API v4 (`ga:` identifiers).
    Reporting,
    /// Multi-Channel Funnels Reporting API v3 (`mcf:` identifiers).
    Funnel,
}

impl ApiVariant {
    /// All variants in detection order.
    pub const ALL: [ApiVariant; 2] = [ApiVariant::Reporting, ApiVariant::Funnel];

    /// Returns the namespace prefix without the trailing colon.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Reporting => "ga",
            Self::Funnel => "mcf",
        }
    }

    /// Returns the variant whose prefix the identifier carries.
    pub fn from_identifier(identifier: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|variant| {
            identifier
                .strip_prefix(variant.prefix())
                .is_some_and(|rest| rest.starts_with(':'))
        })
    }

    /// Detects the API shared by all metrics and dimensions.
    ///
    /// Metrics are scanned before dimensions. The first identifier fixes the
    /// expected prefix and every later identifier must match it.
    pub fn detect<M, D>(metrics: &[M], dimensions: &[D]) -> Result<Self, CoreError>
    where
        M: AsRef<str>,
        D: AsRef<str>,
    {
        let fields = metrics
            .iter()
            .map(|m| ("metric", m.as_ref()))
            .chain(dimensions.iter().map(|d| ("dimension", d.as_ref())));

        let mut api: Option<Self> = None;
        for (kind, field) in fields {
            let current = Self::from_identifier(field).ok_or_else(|| CoreError::UnknownField {
                kind,
                field: field.to_string(),
            })?;

            match api {
                None => api = Some(current),
                Some(expected) if expected != current => {
                    return Err(CoreError::AmbiguousApi {
                        expected: expected.prefix(),
                        field: field.to_string(),
                    });
                }
                Some(_) => {}
            }
        }

        api.ok_or(CoreError::MissingInput("metrics"))
    }
}

impl fmt::Display for ApiVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.prefix())
    }
}

// ============================================================================
// Tests
// ============================================================================
