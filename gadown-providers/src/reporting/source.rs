//! Reporting API report source.

use async_trait::async_trait;
use gadown_core::{CoreError, FilterGrouping, FlattenOptions, ReportQuery, ReportRequest};
use gadown_fetch::{FetchContext, FetchError, Page, PageCursor, ReportSource, ensure_success};
use tracing::{debug, instrument};

use super::parser::{flatten_response, parse_response};
use super::request::{BatchGetRequest, build_batch_request};

/// Pages through `reports:batchGet`.
#[derive(Debug, Clone)]
pub struct ReportingSource {
    request: ReportRequest,
    options: FlattenOptions,
}

impl ReportingSource {
    /// Creates a source for the query.
    ///
    /// Fails without touching the network when the filter expression cannot
    /// be translated.
    pub fn new(
        query: &ReportQuery,
        options: FlattenOptions,
        grouping: FilterGrouping,
    ) -> Result<Self, CoreError> {
        Ok(Self {
            request: build_batch_request(query, grouping)?,
            options,
        })
    }

    /// The request sent for every page.
    pub fn request(&self) -> &ReportRequest {
        &self.request
    }
}

#[async_trait]
impl ReportSource for ReportingSource {
    fn id(&self) -> &str {
        "reporting"
    }

    fn first_cursor(&self) -> PageCursor {
        PageCursor::Token(None)
    }

    #[instrument(skip(self, ctx), fields(view_id = %self.request.view_id))]
    async fn fetch_page(
        &self,
        ctx: &FetchContext,
        cursor: &PageCursor,
    ) -> Result<Page, FetchError> {
        let PageCursor::Token(token) = cursor else {
            return Err(FetchError::Core(CoreError::InvalidConfig(format!(
                "reporting source cannot resume from {cursor}"
            ))));
        };

        let body = BatchGetRequest::single(&self.request, token.clone());
        let auth = ctx.authorization().await?;

        let response = ctx
            .http
            .post_json_with_auth(&ctx.endpoints().reporting, &body, &auth)
            .await?;
        let response = ensure_success(response).await?;
        let text = response
            .text()
            .await
            .map_err(|e| FetchError::InvalidResponse(e.to_string()))?;

        let parsed = parse_response(&text)?;
        let mut page = flatten_response(&parsed, &self.options);
        page.next = parsed
            .next_page_token()
            .map(|token| PageCursor::Token(Some(token.to_string())));

        debug!(rows = page.rows.len(), next = ?page.next, "Fetched reporting page");
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(filters: Option<&str>) -> ReportQuery {
        ReportQuery::new("7", "today", "today", "ga:sessions", Some("ga:date"), filters).unwrap()
    }

    fn source(filters: Option<&str>) -> Result<ReportingSource, CoreError> {
        ReportingSource::new(&query(filters), FlattenOptions::default(), FilterGrouping::Flatten)
    }

    #[test]
    fn test_source_translates_filters_up_front() {
        let source = source(Some("ga:sessions>100")).unwrap();
        assert_eq!(source.request().metric_filter_clauses.len(), 1);
        assert_eq!(source.first_cursor(), PageCursor::Token(None));
        assert_eq!(source.id(), "reporting");
    }

    #[test]
    fn test_source_rejects_bad_filter() {
        assert!(source(Some("ga:nope==1")).is_err());
    }

    #[tokio::test]
    async fn test_wrong_cursor_kind() {
        let source = source(None).unwrap();
        let ctx = FetchContext::builder().build().unwrap();

        let err = source
            .fetch_page(&ctx, &PageCursor::StartIndex(1))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Core(_)));
    }

    #[tokio::test]
    async fn test_fetch_without_credentials() {
        let source = source(None).unwrap();
        let ctx = FetchContext::builder().build().unwrap();

        let err = source.fetch_page(&ctx, &source.first_cursor()).await.unwrap_err();
        assert!(matches!(err, FetchError::NoCredentials));
    }
}
