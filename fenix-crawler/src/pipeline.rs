//! Crawl driver: discovery → per-line fetch/parse → record assembly.

use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::info;

use crate::fetch::{FetchClient, FetchError};
use crate::model::{LineLink, LineRecord};
use crate::parse::{StructureError, parse_detail, parse_directory};
use crate::record::assemble;

/// Path of the line listing page on the site.
pub const LISTING_PATH: &str = "/horarios";

/// How many lines are fetched and parsed in flight at once.
const DEFAULT_CONCURRENCY: usize = 4;

/// Errors that abort a crawl.
#[derive(Debug, thiserror::Error)]
pub enum CrawlError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Structure(#[from] StructureError),
}

/// One-shot crawler over the whole site.
#[derive(Debug, Clone)]
pub struct Crawler {
    client: FetchClient,
    concurrency: usize,
}

impl Crawler {
    /// Create a crawler with the default per-line concurrency.
    pub fn new(client: FetchClient) -> Self {
        Self {
            client,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Set how many lines are processed in flight (minimum 1; 1 is the
    /// strictly sequential reference behavior).
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Run the full extraction and return all records.
    ///
    /// Lines are processed with bounded, order-preserving concurrency
    /// (`buffered`), so records always come out in link-discovery order
    /// and then starting-point order within each line. The first fetch or
    /// structure error aborts the run; a markup-contract violation on one
    /// page likely affects every subsequent page identically, so partial
    /// output would be misleading.
    pub async fn crawl(&self) -> Result<Vec<LineRecord>, CrawlError> {
        info!("fetching line listing");
        let listing = self.client.get(LISTING_PATH).await?;
        let links = parse_directory(&listing)?;
        info!(lines = links.len(), "discovered line links");

        let per_line: Vec<Vec<LineRecord>> = stream::iter(
            links
                .iter()
                .enumerate()
                .map(|(index, link)| self.process_link(index, link)),
        )
        .buffered(self.concurrency)
        .try_collect()
        .await?;

        Ok(per_line.into_iter().flatten().collect())
    }

    async fn process_link(
        &self,
        index: usize,
        link: &LineLink,
    ) -> Result<Vec<LineRecord>, CrawlError> {
        info!(index, link = %link.link, line_type = %link.line_type.trim(), "fetching line");
        let body = self.client.get(&link.link).await?;
        process_line_page(&body)
    }
}

/// Parse one detail page body and assemble its records.
pub fn process_line_page(html: &str) -> Result<Vec<LineRecord>, CrawlError> {
    let line = parse_detail(html)?;
    Ok(assemble(&line))
}
