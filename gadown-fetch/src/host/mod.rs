//! Host APIs for report sources.
//!
//! - [`http`] - HTTP client with tracing and domain allowlist

pub mod http;

// Re-export key types
pub use http::{HttpClient, ResponseExt, ensure_success};
