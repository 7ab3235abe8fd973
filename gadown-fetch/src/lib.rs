// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `gadown` Fetch
//!
//! HTTP host, authentication and the paginated download pipeline.
//!
//! ## Host APIs
//!
//! - [`host::http`] - HTTP client with tracing and domain allowlist
//! - [`auth`] - Service-account and user credentials, token exchange
//!
//! ## Download Pipeline
//!
//! - [`source::ReportSource`] - Trait for a paginated report API
//! - [`pipeline::DownloadPipeline`] - Drives a source page by page into a sink
//! - [`context::FetchContext`] - Provides access to host APIs
//! - [`retry::RetryStrategy`] - Retry budget shared by all pages
//!
//! ## Example
//!
//! ```ignore
//! use gadown_fetch::{DownloadPipeline, FetchContext};
//!
//! let ctx = FetchContext::builder().credentials(credentials).build()?;
//! let source = gadown_providers::source_for(&query, options, grouping)?;
//!
//! let summary = DownloadPipeline::new()
//!     .fail_on_no_data(true)
//!     .run(source.as_ref(), &ctx, &mut sink)
//!     .await?;
//! ```

// Core modules
pub mod auth;
pub mod context;
pub mod error;
pub mod host;
pub mod pipeline;
pub mod retry;
pub mod source;

// Re-export key types at crate root

// Errors
pub use error::{AuthError, FetchError, HttpError, PipelineError};

// Host APIs
pub use host::{HttpClient, ResponseExt, ensure_success};

// Auth
pub use auth::{
    AccessToken, Authorizer, Credentials, ProduceAuthorization, ServiceAccountCredentials,
    UserCredentials,
};

// Source & Pipeline
pub use context::{ApiEndpoints, FetchContext, FetchContextBuilder, FetchSettings};
pub use pipeline::{DownloadPipeline, DownloadSummary};
pub use retry::RetryStrategy;
pub use source::{Page, PageCursor, ReportSource};
