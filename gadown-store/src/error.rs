//! Store error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error.
    #[error("IO error reading {path}: {source}")]
    Io {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The config file is not valid JSON for the expected shape.
    #[error("Invalid config file {path}: {source}")]
    Parse {
        /// Offending file.
        path: PathBuf,
        /// Underlying error.
        source: serde_json::Error,
    },

    /// No credential bundle is configured.
    #[error(
        "Need either credentials for a Google user account or for a Google service account"
    )]
    MissingCredentials,

    /// Both credential bundles are configured.
    #[error(
        "Credentials for both a Google user account and a Google service account were given; \
         use only one"
    )]
    AmbiguousCredentials,

    /// A credential bundle lacks some of its fields.
    #[error("Incomplete {kind} credentials, missing: {}", missing.join(", "))]
    IncompleteCredentials {
        /// Bundle kind.
        kind: &'static str,
        /// Names of the missing fields.
        missing: Vec<&'static str>,
    },
}
