// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `gadown` Store
//!
//! Configuration for the `gadown` downloader.
//!
//! This crate provides:
//!
//! - **Config**: JSON config file with endpoint, timeout and retry settings
//! - **CredentialConfig**: Fallback credential values and bundle resolution
//!
//! ## Usage
//!
//! ```ignore
//! use gadown_store::{Config, CredentialConfig};
//!
//! let config = Config::load()?;
//! let credentials = config.credentials.clone().merged_with(from_flags).resolve()?;
//! let settings = config.fetch_settings();
//! ```

pub mod config;
pub mod error;

pub use config::{ApiConfig, Config, CredentialConfig, HttpConfig, RetryConfig};
pub use error::StoreError;
