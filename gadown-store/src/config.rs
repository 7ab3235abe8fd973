//! Configuration management.
//!
//! The config file is JSON, by default `<config_dir>/gadown/config.json`.
//! A missing file yields the defaults. Every credential field can also be
//! given on the command line, which takes precedence field by field.

use std::path::{Path, PathBuf};
use std::time::Duration;

use gadown_fetch::{
    ApiEndpoints, Credentials, FetchSettings, RetryStrategy, ServiceAccountCredentials,
    UserCredentials,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::StoreError;

// ============================================================================
// Config
// ============================================================================

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Fallback credential values.
    #[serde(default)]
    pub credentials: CredentialConfig,
    /// Remote endpoints.
    #[serde(default)]
    pub api: ApiConfig,
    /// HTTP settings.
    #[serde(default)]
    pub http: HttpConfig,
    /// Retry settings.
    #[serde(default)]
    pub retry: RetryConfig,
}

/// Endpoint overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Reporting API v4 `reports:batchGet` URL.
    #[serde(default = "default_reporting_url")]
    pub reporting_url: String,
    /// Multi-Channel Funnels `data/mcf` URL.
    #[serde(default = "default_funnel_url")]
    pub funnel_url: String,
    /// OAuth2 token URL.
    #[serde(default = "default_token_url")]
    pub token_url: String,
}

/// HTTP settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Timeout for a single request in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Retry settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Retries after the first attempt, shared by all pages.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Base delay; the n-th retry waits `base × (n + 1)` seconds.
    #[serde(default = "default_base_delay_secs")]
    pub base_delay_secs: u64,
}

fn default_reporting_url() -> String {
    ApiEndpoints::default().reporting
}

fn default_funnel_url() -> String {
    ApiEndpoints::default().funnel
}

fn default_token_url() -> String {
    ApiEndpoints::default().token
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    RetryStrategy::default().max_retries
}

fn default_base_delay_secs() -> u64 {
    RetryStrategy::default().base_delay_secs
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            reporting_url: default_reporting_url(),
            funnel_url: default_funnel_url(),
            token_url: default_token_url(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            base_delay_secs: default_base_delay_secs(),
        }
    }
}

impl Config {
    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gadown")
            .join("config.json")
    }

    /// Loads configuration from the default path.
    pub fn load() -> Result<Self, StoreError> {
        Self::load_from(&Self::default_path())
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = serde_json::from_str(&content).map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Fetch settings derived from this configuration.
    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            timeout: Duration::from_secs(self.http.timeout_secs),
            retry: RetryStrategy::linear(self.retry.max_retries, self.retry.base_delay_secs),
            endpoints: ApiEndpoints {
                reporting: self.api.reporting_url.clone(),
                funnel: self.api.funnel_url.clone(),
                token: self.api.token_url.clone(),
            },
        }
    }
}

// ============================================================================
// Credentials
// ============================================================================

/// Credential fields of both bundles, each optional.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialConfig {
    /// Service account `private_key_id`.
    #[serde(default)]
    pub service_account_private_key_id: Option<String>,
    /// Service account `private_key` (PEM).
    #[serde(default)]
    pub service_account_private_key: Option<String>,
    /// Service account `client_email`.
    #[serde(default)]
    pub service_account_client_email: Option<String>,
    /// Service account `client_id`.
    #[serde(default)]
    pub service_account_client_id: Option<String>,
    /// User account `client_id`.
    #[serde(default)]
    pub user_account_client_id: Option<String>,
    /// User account `client_secret`.
    #[serde(default)]
    pub user_account_client_secret: Option<String>,
    /// User account `refresh_token`.
    #[serde(default)]
    pub user_account_refresh_token: Option<String>,
}

impl std::fmt::Debug for CredentialConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialConfig")
            .field("service_account", &self.has_service_account_fields())
            .field("user_account", &self.has_user_account_fields())
            .finish_non_exhaustive()
    }
}

/// Empty strings count as absent.
fn present(value: Option<&String>) -> Option<&String> {
    value.filter(|v| !v.trim().is_empty())
}

fn pick(primary: Option<String>, fallback: Option<String>) -> Option<String> {
    present(primary.as_ref()).or(present(fallback.as_ref())).cloned()
}

impl CredentialConfig {
    /// Overlays `overrides` on `self`: a present override wins per field.
    pub fn merged_with(self, overrides: CredentialConfig) -> Self {
        Self {
            service_account_private_key_id: pick(
                overrides.service_account_private_key_id,
                self.service_account_private_key_id,
            ),
            service_account_private_key: pick(
                overrides.service_account_private_key,
                self.service_account_private_key,
            ),
            service_account_client_email: pick(
                overrides.service_account_client_email,
                self.service_account_client_email,
            ),
            service_account_client_id: pick(
                overrides.service_account_client_id,
                self.service_account_client_id,
            ),
            user_account_client_id: pick(
                overrides.user_account_client_id,
                self.user_account_client_id,
            ),
            user_account_client_secret: pick(
                overrides.user_account_client_secret,
                self.user_account_client_secret,
            ),
            user_account_refresh_token: pick(
                overrides.user_account_refresh_token,
                self.user_account_refresh_token,
            ),
        }
    }

    fn service_account_fields(&self) -> [(&'static str, Option<&String>); 4] {
        [
            ("private_key_id", present(self.service_account_private_key_id.as_ref())),
            ("private_key", present(self.service_account_private_key.as_ref())),
            ("client_email", present(self.service_account_client_email.as_ref())),
            ("client_id", present(self.service_account_client_id.as_ref())),
        ]
    }

    fn user_account_fields(&self) -> [(&'static str, Option<&String>); 3] {
        [
            ("client_id", present(self.user_account_client_id.as_ref())),
            ("client_secret", present(self.user_account_client_secret.as_ref())),
            ("refresh_token", present(self.user_account_refresh_token.as_ref())),
        ]
    }

    /// Returns true if any service-account field is set.
    pub fn has_service_account_fields(&self) -> bool {
        self.service_account_fields().iter().any(|(_, v)| v.is_some())
    }

    /// Returns true if any user-account field is set.
    pub fn has_user_account_fields(&self) -> bool {
        self.user_account_fields().iter().any(|(_, v)| v.is_some())
    }

    /// Resolves the single complete credential bundle.
    ///
    /// Fails when no bundle, both bundles, or an incomplete bundle is set.
    pub fn resolve(&self) -> Result<Credentials, StoreError> {
        match (self.has_service_account_fields(), self.has_user_account_fields()) {
            (false, false) => Err(StoreError::MissingCredentials),
            (true, true) => Err(StoreError::AmbiguousCredentials),
            (true, false) => {
                let [key_id, key, email, id] =
                    require("service account", self.service_account_fields())?;
                Ok(Credentials::ServiceAccount(ServiceAccountCredentials {
                    private_key_id: key_id,
                    private_key: key,
                    client_email: email,
                    client_id: id,
                }))
            }
            (false, true) => {
                let [client_id, client_secret, refresh_token] =
                    require("user account", self.user_account_fields())?;
                Ok(Credentials::User(UserCredentials {
                    client_id,
                    client_secret,
                    refresh_token,
                }))
            }
        }
    }
}

fn require<const N: usize>(
    kind: &'static str,
    fields: [(&'static str, Option<&String>); N],
) -> Result<[String; N], StoreError> {
    let missing: Vec<&'static str> = fields
        .iter()
        .filter(|(_, value)| value.is_none())
        .map(|(name, _)| *name)
        .collect();
    if !missing.is_empty() {
        return Err(StoreError::IncompleteCredentials { kind, missing });
    }

    Ok(fields.map(|(_, value)| value.cloned().unwrap_or_default()))
}

// ============================================================================
// Tests
// ============================================================================
