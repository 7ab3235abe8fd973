//! Report source trait and page types.
//!
//! A source represents one remote API. It knows how to fetch a single page
//! for a cursor and how to flatten that page into rows; the
//! [`DownloadPipeline`](crate::pipeline::DownloadPipeline) drives it across
//! pages.

use std::fmt;

use async_trait::async_trait;
use gadown_core::FlatRow;

use crate::context::FetchContext;
use crate::error::FetchError;

// ============================================================================
// Page Cursor
// ============================================================================

/// Position of a page within a paginated result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageCursor {
    /// Opaque continuation token; `None` requests the first page.
    Token(Option<String>),
    /// 1-based index of the first row of the page.
    StartIndex(u64),
}

impl fmt::Display for PageCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token(None) => write!(f, "first page"),
            Self::Token(Some(token)) => write!(f, "page token {token}"),
            Self::StartIndex(index) => write!(f, "start index {index}"),
        }
    }
}

// ============================================================================
// Page
// ============================================================================

/// One fully fetched and flattened page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    /// Column names, when a header was requested.
    pub header: Option<FlatRow>,
    /// Data rows in upstream order.
    pub rows: Vec<FlatRow>,
    /// Cursor of the following page, if any.
    pub next: Option<PageCursor>,
}

// ============================================================================
// Report Source Trait
// ============================================================================

/// A paginated report API.
///
/// ## Implementing a Source
///
/// ```ignore
/// struct StaticSource;
///
/// #[async_trait]
/// impl ReportSource for StaticSource {
///     fn id(&self) -> &str {
///         "static"
///     }
///
///     fn first_cursor(&self) -> PageCursor {
///         PageCursor::Token(None)
///     }
///
///     async fn fetch_page(
///         &self,
///         ctx: &FetchContext,
///         cursor: &PageCursor,
///     ) -> Result<Page, FetchError> {
///         Ok(Page::default())
///     }
/// }
/// ```
#[async_trait]
pub trait ReportSource: Send + Sync {
    /// Identifier used in logs (e.g. `"reporting"`, `"funnel"`).
    fn id(&self) -> &str;

    /// Cursor of the first page.
    fn first_cursor(&self) -> PageCursor;

    /// Fetches and flattens the page at `cursor`.
    ///
    /// Must not have side effects visible to the caller, so that a failed
    /// page can be fetched again.
    async fn fetch_page(&self, ctx: &FetchContext, cursor: &PageCursor)
    -> Result<Page, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_display() {
        assert_eq!(PageCursor::Token(None).to_string(), "first page");
        assert_eq!(PageCursor::Token(Some("abc".into())).to_string(), "page token abc");
        assert_eq!(PageCursor::StartIndex(1001).to_string(), "start index 1001");
    }
}
