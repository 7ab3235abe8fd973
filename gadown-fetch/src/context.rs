//! Fetch context providing access to host APIs.
//!
//! The fetch context is passed to every report source and provides unified
//! access to the HTTP client, the authorizer and the endpoint settings.

use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::auth::{Authorizer, Credentials, TOKEN_ENDPOINT};
use crate::error::{FetchError, HttpError};
use crate::host::http::{DEFAULT_TIMEOUT_SECS, HttpClient};
use crate::retry::RetryStrategy;

/// Analytics Reporting API v4 batch endpoint.
pub const REPORTING_ENDPOINT: &str =
    "https://analyticsreporting.googleapis.com/v4/reports:batchGet";

/// Multi-Channel Funnels API v3 endpoint.
pub const FUNNEL_ENDPOINT: &str = "https://www.googleapis.com/analytics/v3/data/mcf";

/// Domain every request must target unless endpoints are overridden.
const GOOGLE_APIS_DOMAIN: &str = "googleapis.com";

// ============================================================================
// Endpoints
// ============================================================================

/// URLs of the remote services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoints {
    /// Reporting API v4 `reports:batchGet`.
    pub reporting: String,
    /// Multi-Channel Funnels `data/mcf`.
    pub funnel: String,
    /// OAuth2 token endpoint.
    pub token: String,
}

impl Default for ApiEndpoints {
    fn default() -> Self {
        Self {
            reporting: REPORTING_ENDPOINT.to_string(),
            funnel: FUNNEL_ENDPOINT.to_string(),
            token: TOKEN_ENDPOINT.to_string(),
        }
    }
}

impl ApiEndpoints {
    /// Domains the HTTP client may talk to.
    fn allowed_domains(&self) -> Vec<String> {
        let mut domains = vec![GOOGLE_APIS_DOMAIN.to_string()];
        for url in [&self.reporting, &self.funnel, &self.token] {
            if let Some(host) = Url::parse(url).ok().and_then(|u| u.host_str().map(str::to_string))
            {
                if !domains.iter().any(|d| host == *d || host.ends_with(&format!(".{d}"))) {
                    domains.push(host);
                }
            }
        }
        domains
    }
}

// ============================================================================
// Fetch Settings
// ============================================================================

/// Settings for fetch operations.
#[derive(Debug, Clone)]
pub struct FetchSettings {
    /// Timeout for a single HTTP request.
    pub timeout: Duration,
    /// Retry budget for the whole download.
    pub retry: RetryStrategy,
    /// Remote endpoints.
    pub endpoints: ApiEndpoints,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            retry: RetryStrategy::default(),
            endpoints: ApiEndpoints::default(),
        }
    }
}

// ============================================================================
// Fetch Context
// ============================================================================

/// Context provided to report sources.
pub struct FetchContext {
    /// HTTP client with tracing and domain allowlist.
    pub http: Arc<HttpClient>,
    /// Token source, if credentials were configured.
    pub authorizer: Option<Arc<Authorizer>>,
    /// Fetch settings.
    pub settings: FetchSettings,
}

impl FetchContext {
    /// Creates a builder for customizing the context.
    pub fn builder() -> FetchContextBuilder {
        FetchContextBuilder::new()
    }

    /// Returns the configured endpoints.
    pub fn endpoints(&self) -> &ApiEndpoints {
        &self.settings.endpoints
    }

    /// Returns an `Authorization` header value.
    pub async fn authorization(&self) -> Result<String, FetchError> {
        let authorizer = self.authorizer.as_ref().ok_or(FetchError::NoCredentials)?;
        Ok(authorizer.authorization(&self.http).await?)
    }

    /// Forgets the cached access token after the API rejected it.
    pub async fn invalidate_authorization(&self) {
        if let Some(authorizer) = &self.authorizer {
            authorizer.invalidate().await;
        }
    }
}

impl std::fmt::Debug for FetchContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchContext")
            .field("settings", &self.settings)
            .field("authorized", &self.authorizer.is_some())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Fetch Context Builder
// ============================================================================

/// Builder for constructing a `FetchContext`.
pub struct FetchContextBuilder {
    credentials: Option<Credentials>,
    settings: FetchSettings,
}

impl FetchContextBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            credentials: None,
            settings: FetchSettings::default(),
        }
    }

    /// Sets the credentials.
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Sets the fetch settings.
    pub fn settings(mut self, settings: FetchSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Builds the fetch context.
    pub fn build(self) -> Result<FetchContext, HttpError> {
        let http = Arc::new(
            HttpClient::with_timeout(self.settings.timeout)?
                .with_allowed_domains(self.settings.endpoints.allowed_domains()),
        );

        let authorizer = self
            .credentials
            .map(|creds| Arc::new(Authorizer::new(creds, self.settings.endpoints.token.clone())));

        Ok(FetchContext {
            http,
            authorizer,
            settings: self.settings,
        })
    }
}

impl Default for FetchContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
