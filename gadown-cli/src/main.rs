// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! gadown CLI - download Google Analytics reports as CSV on stdout.
//!
//! # Examples
//!
//! ```bash
//! # Sessions per day and source, tab separated
//! gadown --view-id 123456 --start-date 7daysAgo --end-date today \
//!     --metrics ga:sessions --dimensions ga:date,ga:source
//!
//! # Filtered, comma separated, with header and view id column
//! gadown --view-id 123456 --start-date 2024-01-01 --end-date 2024-01-31 \
//!     --metrics ga:sessions --dimensions ga:source \
//!     --filters 'ga:sessions>100' --delimiter-char , --header --add-view-id-column
//!
//! # Multi-Channel Funnels
//! gadown --view-id 123456 --start-date 30daysAgo --end-date yesterday \
//!     --metrics mcf:totalConversions --dimensions mcf:basicChannelGroupingPath
//! ```

mod credentials;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use gadown_core::{CoreError, FilterError, FilterGrouping, FlattenOptions, ReportQuery};
use gadown_fetch::{DownloadPipeline, FetchContext, FetchError, PipelineError};
use gadown_store::{Config, StoreError};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use credentials::resolve_credentials;
use output::{CsvSink, parse_delimiter};

// ============================================================================
// CLI Definition
// ============================================================================

/// gadown - Google Analytics downloader.
#[derive(Parser)]
#[command(name = "gadown")]
#[command(about = "Download Google Analytics reports as CSV on stdout")]
#[command(long_about = r#"
Downloads a Google Analytics report and writes it as CSV to stdout.

The API is chosen from the metric and dimension prefixes:
  • ga:   Analytics Reporting API v4
  • mcf:  Multi-Channel Funnels Reporting API v3

Credentials are either a service account (private key id, private key,
client email, client id) or a user account (client id, client secret,
refresh token). Missing values are read from the config file.
"#)]
#[command(version)]
pub struct Cli {
    /// Google Analytics view id.
    #[arg(long)]
    pub view_id: String,

    /// Start of the date range, e.g. 30daysAgo, yesterday or 2024-01-01.
    #[arg(long)]
    pub start_date: String,

    /// End of the date range, e.g. today or 2024-01-31.
    #[arg(long)]
    pub end_date: String,

    /// Comma-separated list of metrics.
    #[arg(long)]
    pub metrics: String,

    /// Comma-separated list of dimensions.
    #[arg(long)]
    pub dimensions: Option<String>,

    /// Filter expression, e.g. "ga:sessions>100,ga:source==google".
    #[arg(long)]
    pub filters: Option<String>,

    /// Service account private_key_id.
    #[arg(long, env = "GADOWN_SERVICE_ACCOUNT_PRIVATE_KEY_ID", hide_env_values = true)]
    pub service_account_private_key_id: Option<String>,

    /// Service account private_key.
    #[arg(long, env = "GADOWN_SERVICE_ACCOUNT_PRIVATE_KEY", hide_env_values = true)]
    pub service_account_private_key: Option<String>,

    /// Service account client_email.
    #[arg(long, env = "GADOWN_SERVICE_ACCOUNT_CLIENT_EMAIL", hide_env_values = true)]
    pub service_account_client_email: Option<String>,

    /// Service account client_id.
    #[arg(long, env = "GADOWN_SERVICE_ACCOUNT_CLIENT_ID", hide_env_values = true)]
    pub service_account_client_id: Option<String>,

    /// User account client_id.
    #[arg(long, env = "GADOWN_USER_ACCOUNT_CLIENT_ID", hide_env_values = true)]
    pub user_account_client_id: Option<String>,

    /// User account client_secret.
    #[arg(long, env = "GADOWN_USER_ACCOUNT_CLIENT_SECRET", hide_env_values = true)]
    pub user_account_client_secret: Option<String>,

    /// User account refresh_token.
    #[arg(long, env = "GADOWN_USER_ACCOUNT_REFRESH_TOKEN", hide_env_values = true)]
    pub user_account_refresh_token: Option<String>,

    /// Character that delimits the output fields.
    #[arg(long, default_value = "\\t", value_parser = parse_delimiter)]
    pub delimiter_char: u8,

    /// Add the view id as the first column.
    #[arg(long, overrides_with = "no_add_view_id_column")]
    pub add_view_id_column: bool,

    /// Do not add the view id column (default).
    #[arg(long, overrides_with = "add_view_id_column")]
    pub no_add_view_id_column: bool,

    /// Fail when the query returns no rows (default).
    #[arg(long, overrides_with = "no_fail_on_no_data")]
    pub fail_on_no_data: bool,

    /// Succeed with empty output when the query returns no rows.
    #[arg(long, overrides_with = "fail_on_no_data")]
    pub no_fail_on_no_data: bool,

    /// Write a header row first.
    #[arg(long)]
    pub header: bool,

    /// Treat `;` as AND between groups of `,`-separated OR terms.
    #[arg(long)]
    pub strict_filter_grouping: bool,

    /// Config file path (defaults to the user config directory).
    #[arg(long, env = "GADOWN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Verbose output (show debug info).
    #[arg(long, short)]
    pub verbose: bool,

    /// Quiet mode (no diagnostics on stderr).
    #[arg(long, short)]
    pub quiet: bool,
}

impl Cli {
    /// Filter grouping selected by the flags.
    pub fn grouping(&self) -> FilterGrouping {
        if self.strict_filter_grouping {
            FilterGrouping::Strict
        } else {
            FilterGrouping::Flatten
        }
    }

    /// Whether zero rows is an error.
    pub fn fails_on_no_data(&self) -> bool {
        !self.no_fail_on_no_data
    }
}

/// CLI exit codes.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// General error, including exhausted retries.
    Error = 1,
    /// Configuration or credential error.
    Config = 2,
    /// Invalid query: dates, fields or filters.
    InvalidQuery = 3,
    /// The query returned no data.
    NoData = 4,
}

impl ExitCode {
    /// Picks the exit code for an error by walking its cause chain.
    pub fn for_error(err: &anyhow::Error) -> Self {
        for cause in err.chain() {
            if cause.downcast_ref::<StoreError>().is_some() {
                return Self::Config;
            }
            if let Some(PipelineError::NoData) = cause.downcast_ref::<PipelineError>() {
                return Self::NoData;
            }
            if let Some(FetchError::NoCredentials) = cause.downcast_ref::<FetchError>() {
                return Self::Config;
            }
            if let Some(core) = cause.downcast_ref::<CoreError>() {
                if core.is_query_error() {
                    return Self::InvalidQuery;
                }
                if matches!(core, CoreError::MissingInput(_) | CoreError::InvalidConfig(_)) {
                    return Self::Config;
                }
            }
            if cause.downcast_ref::<FilterError>().is_some() {
                return Self::InvalidQuery;
            }
        }
        Self::Error
    }
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("gadown=debug,info")
        } else {
            EnvFilter::new("gadown=warn")
        }
    });

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    if let Err(e) = run(&cli).await {
        if !cli.quiet {
            eprintln!("Error: {e}");
        }
        std::process::exit(ExitCode::for_error(&e) as i32);
    }
}

/// Runs one download.
async fn run(cli: &Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let query = ReportQuery::new(
        &cli.view_id,
        &cli.start_date,
        &cli.end_date,
        &cli.metrics,
        cli.dimensions.as_deref(),
        cli.filters.as_deref(),
    )?;
    debug!(api = %query.api, view_id = %query.view_id, "Validated query");

    let options = FlattenOptions {
        leading_id: cli.add_view_id_column.then(|| query.view_id.clone()),
        header: cli.header,
    };
    let source = gadown_providers::source_for(&query, options, cli.grouping())?;

    let credentials = resolve_credentials(cli, &config.credentials)?;
    let ctx = FetchContext::builder()
        .settings(config.fetch_settings())
        .credentials(credentials)
        .build()?;

    let mut sink = CsvSink::new(std::io::stdout(), cli.delimiter_char);
    let summary = DownloadPipeline::new()
        .fail_on_no_data(cli.fails_on_no_data())
        .run(source.as_ref(), &ctx, &mut sink)
        .await?;

    info!(
        pages = summary.pages,
        rows = summary.rows,
        retries = summary.retries,
        elapsed = ?summary.duration,
        "Download finished"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gadown_fetch::Credentials;
    use gadown_store::CredentialConfig;

    const REQUIRED: [&str; 9] = [
        "gadown",
        "--view-id",
        "123",
        "--start-date",
        "7daysAgo",
        "--end-date",
        "today",
        "--metrics",
        "ga:sessions",
    ];

    fn parse(extra: &[&str]) -> Cli {
        Cli::try_parse_from(REQUIRED.iter().chain(extra)).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&[]);
        assert_eq!(cli.delimiter_char, b'\t');
        assert!(!cli.add_view_id_column);
        assert!(cli.fails_on_no_data());
        assert!(!cli.header);
        assert_eq!(cli.grouping(), FilterGrouping::Flatten);
    }

    #[test]
    fn test_negated_flags_last_one_wins() {
        let cli = parse(&["--fail-on-no-data", "--no-fail-on-no-data"]);
        assert!(!cli.fails_on_no_data());

        let cli = parse(&["--no-fail-on-no-data", "--fail-on-no-data"]);
        assert!(cli.fails_on_no_data());

        let cli = parse(&["--no-add-view-id-column", "--add-view-id-column"]);
        assert!(cli.add_view_id_column);
    }

    #[test]
    fn test_delimiter_and_grouping() {
        let cli = parse(&["--delimiter-char", ",", "--strict-filter-grouping"]);
        assert_eq!(cli.delimiter_char, b',');
        assert_eq!(cli.grouping(), FilterGrouping::Strict);

        let bad = Cli::try_parse_from(REQUIRED.iter().chain(&["--delimiter-char", "ab"]));
        assert!(bad.is_err());
    }

    #[test]
    fn test_missing_required_option() {
        assert!(Cli::try_parse_from(["gadown", "--view-id", "1"]).is_err());
    }

    #[test]
    fn test_cli_credentials_override_config() {
        let cli = parse(&["--user-account-refresh-token", "flag-token"]);
        let fallback = CredentialConfig {
            user_account_client_id: Some("id".into()),
            user_account_client_secret: Some("secret".into()),
            user_account_refresh_token: Some("file-token".into()),
            ..CredentialConfig::default()
        };

        let creds = resolve_credentials(&cli, &fallback).unwrap();
        assert!(matches!(creds, Credentials::User(u) if u.refresh_token == "flag-token"));
    }

    #[test]
    fn test_mixed_bundles_rejected() {
        let cli = parse(&["--service-account-client-id", "42"]);
        let fallback = CredentialConfig {
            user_account_client_id: Some("id".into()),
            ..CredentialConfig::default()
        };

        let err = resolve_credentials(&cli, &fallback).unwrap_err();
        assert!(matches!(err, StoreError::AmbiguousCredentials));
    }

    #[test]
    fn test_exit_codes() {
        let code = |err: anyhow::Error| ExitCode::for_error(&err);

        assert_eq!(code(PipelineError::NoData.into()), ExitCode::NoData);
        assert_eq!(code(StoreError::MissingCredentials.into()), ExitCode::Config);
        assert_eq!(code(CoreError::MissingInput("view_id").into()), ExitCode::Config);
        assert_eq!(
            code(CoreError::InvalidDate("yesterdayish".into()).into()),
            ExitCode::InvalidQuery
        );
        assert_eq!(
            code(FilterError::Grouping("(a)".into()).into()),
            ExitCode::InvalidQuery
        );
        assert_eq!(
            code(
                PipelineError::Fetch {
                    attempts: 5,
                    source: FetchError::InvalidResponse("truncated".into()),
                }
                .into()
            ),
            ExitCode::Error
        );
        assert_eq!(
            code(CoreError::Output("broken pipe".into()).into()),
            ExitCode::Error
        );
    }

    #[test]
    fn test_exit_code_through_context() {
        let err = anyhow::Error::from(PipelineError::NoData).context("download failed");
        assert_eq!(ExitCode::for_error(&err), ExitCode::NoData);
    }
}
