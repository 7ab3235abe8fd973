//! Credential resolution: command-line values over config file values.

use gadown_fetch::Credentials;
use gadown_store::{CredentialConfig, StoreError};
use tracing::debug;

use crate::Cli;

/// Credential values given on the command line or via `GADOWN_*` variables.
pub fn from_cli(cli: &Cli) -> CredentialConfig {
    CredentialConfig {
        service_account_private_key_id: cli.service_account_private_key_id.clone(),
        service_account_private_key: cli.service_account_private_key.clone(),
        service_account_client_email: cli.service_account_client_email.clone(),
        service_account_client_id: cli.service_account_client_id.clone(),
        user_account_client_id: cli.user_account_client_id.clone(),
        user_account_client_secret: cli.user_account_client_secret.clone(),
        user_account_refresh_token: cli.user_account_refresh_token.clone(),
    }
}

/// Resolves the credential bundle to use.
///
/// Each field falls back to the config file when not given on the command
/// line. Exactly one complete bundle must remain.
pub fn resolve_credentials(
    cli: &Cli,
    fallback: &CredentialConfig,
) -> Result<Credentials, StoreError> {
    let merged = fallback.clone().merged_with(from_cli(cli));
    let credentials = merged.resolve()?;
    debug!(kind = credentials.kind(), "Resolved credentials");
    Ok(credentials)
}
