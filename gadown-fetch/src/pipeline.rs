//! Download pipeline driving a report source across pages.
//!
//! For every page the pipeline fetches (with retries), writes the rows to
//! the sink and flushes it before moving on. The retry budget is shared by
//! all pages of the download. A page is written only after it was fetched
//! and flattened completely, so a retried page never duplicates output.

use std::time::{Duration, Instant};

use gadown_core::RowSink;
use tracing::{debug, info, instrument, warn};

use crate::context::FetchContext;
use crate::error::{FetchError, PipelineError};
use crate::source::{Page, PageCursor, ReportSource};

// ============================================================================
// Download Summary
// ============================================================================

/// Outcome of a successful download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadSummary {
    /// Pages fetched.
    pub pages: usize,
    /// Data rows written (header excluded).
    pub rows: usize,
    /// Retries spent.
    pub retries: u32,
    /// Total duration.
    pub duration: Duration,
}

// ============================================================================
// Download Pipeline
// ============================================================================

/// Runs a [`ReportSource`] to completion into a [`RowSink`].
#[derive(Debug, Clone, Default)]
pub struct DownloadPipeline {
    fail_on_no_data: bool,
}

impl DownloadPipeline {
    /// Creates a pipeline that accepts empty results.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes an empty result an error, raised after all output is flushed.
    pub fn fail_on_no_data(mut self, enabled: bool) -> Self {
        self.fail_on_no_data = enabled;
        self
    }

    /// Downloads every page of `source` into `sink`.
    #[instrument(skip_all, fields(source = source.id()))]
    pub async fn run<S: RowSink + ?Sized>(
        &self,
        source: &dyn ReportSource,
        ctx: &FetchContext,
        sink: &mut S,
    ) -> Result<DownloadSummary, PipelineError> {
        let start = Instant::now();
        let mut cursor = Some(source.first_cursor());
        let mut pages = 0;
        let mut rows = 0;
        let mut retries = 0;

        while let Some(current) = cursor {
            let page = Self::fetch_with_retry(source, ctx, &current, &mut retries).await?;
            if page.next.as_ref() == Some(&current) {
                return Err(PipelineError::Stalled(current));
            }

            if pages == 0 {
                if let Some(header) = &page.header {
                    sink.write_row(header)?;
                }
            }
            for row in &page.rows {
                sink.write_row(row)?;
            }
            sink.flush()?;

            debug!(cursor = %current, rows = page.rows.len(), "Page written");
            pages += 1;
            rows += page.rows.len();
            cursor = page.next;
        }

        info!(pages, rows, retries, "Download complete");

        if rows == 0 && self.fail_on_no_data {
            return Err(PipelineError::NoData);
        }

        Ok(DownloadSummary {
            pages,
            rows,
            retries,
            duration: start.elapsed(),
        })
    }

    async fn fetch_with_retry(
        source: &dyn ReportSource,
        ctx: &FetchContext,
        cursor: &PageCursor,
        retries: &mut u32,
    ) -> Result<Page, PipelineError> {
        let strategy = &ctx.settings.retry;

        loop {
            match source.fetch_page(ctx, cursor).await {
                Ok(page) => return Ok(page),
                Err(error) if error.is_retryable() && strategy.allows_retry(*retries) => {
                    *retries += 1;
                    if matches!(error, FetchError::AuthenticationFailed(_)) {
                        ctx.invalidate_authorization().await;
                    }
                    let delay = strategy.delay_for_attempt(*retries);
                    warn!(
                        retry = *retries,
                        max_retries = strategy.max_retries,
                        delay_secs = delay.as_secs(),
                        error = %error,
                        "Request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(error) => {
                    return Err(PipelineError::Fetch {
                        attempts: *retries + 1,
                        source: error,
                    });
                }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
