//! Funnel API report source.

use async_trait::async_trait;
use gadown_core::{CoreError, FlattenOptions, ReportQuery};
use gadown_fetch::{FetchContext, FetchError, Page, PageCursor, ReportSource, ensure_success};
use tracing::{debug, instrument};

use super::parser::{flatten_response, parse_response};
use super::request::{FIRST_START_INDEX, build_query, next_start_index};

/// Pages through `data/mcf` by `start-index`.
#[derive(Debug, Clone)]
pub struct FunnelSource {
    query: ReportQuery,
    options: FlattenOptions,
}

impl FunnelSource {
    /// Creates a source for the query. Filters are sent unchanged.
    pub fn new(query: &ReportQuery, options: FlattenOptions) -> Self {
        Self {
            query: query.clone(),
            options,
        }
    }
}

#[async_trait]
impl ReportSource for FunnelSource {
    fn id(&self) -> &str {
        "funnel"
    }

    fn first_cursor(&self) -> PageCursor {
        PageCursor::StartIndex(FIRST_START_INDEX)
    }

    #[instrument(skip(self, ctx), fields(view_id = %self.query.view_id))]
    async fn fetch_page(
        &self,
        ctx: &FetchContext,
        cursor: &PageCursor,
    ) -> Result<Page, FetchError> {
        let PageCursor::StartIndex(start_index) = *cursor else {
            return Err(FetchError::Core(CoreError::InvalidConfig(format!(
                "funnel source cannot resume from {cursor}"
            ))));
        };

        let params = build_query(&self.query, start_index);
        let auth = ctx.authorization().await?;

        let response = ctx
            .http
            .get_with_auth(&ctx.endpoints().funnel, &params, &auth)
            .await?;
        let response = ensure_success(response).await?;
        let text = response
            .text()
            .await
            .map_err(|e| FetchError::InvalidResponse(e.to_string()))?;

        let parsed = parse_response(&text)?;
        let mut page = flatten_response(&parsed, &self.options)?;
        page.next = next_start_index(&parsed, start_index).map(PageCursor::StartIndex);

        debug!(rows = page.rows.len(), next = ?page.next, "Fetched funnel page");
        Ok(page)
    }
}
