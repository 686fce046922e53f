use crate::config::ScrapeConfig;
use crate::geo::{GeoFilter, Geocoder};
use crate::models::{CategorySummary, StopReason};
use crate::scrapers::{
    CategoryResolver, DetailEnricher, ListingExtractor, MarkupNextPage, NextPagePredicate,
    PageFetcher, PageListings, SiteLayout,
};
use crate::sink::ResultSink;
use anyhow::{Context, Result};
use scraper::Html;
use std::io::Write;
use std::sync::Arc;
use tracing::{info, warn};
use url::Url;

/// Listing URL for `page`; the first page is the bare category URL
pub fn page_url(base_url: &str, page: u32) -> String {
    if page > 1 {
        format!("{}?page={}", base_url, page)
    } else {
        base_url.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageState {
    Fetching(u32),
    Continuing(u32),
    Exhausted(StopReason),
}

/// Walks each category page by page, streaming accepted records into the sink
pub struct PaginationController {
    fetcher: Arc<dyn PageFetcher>,
    extractor: ListingExtractor,
    next_page: Box<dyn NextPagePredicate>,
    max_pages: Option<u32>,
}

impl PaginationController {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        extractor: ListingExtractor,
        next_page: Box<dyn NextPagePredicate>,
        max_pages: Option<u32>,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            next_page,
            max_pages,
        }
    }

    /// Wire up the buyrentkenya.com pipeline around the given collaborators
    pub fn from_config(
        config: &ScrapeConfig,
        fetcher: Arc<dyn PageFetcher>,
        geocoder: Box<dyn Geocoder>,
    ) -> Result<Self> {
        let origin = Url::parse(&config.site_origin)
            .with_context(|| format!("Invalid site origin {}", config.site_origin))?;
        let layout = SiteLayout::buyrentkenya()?;
        let enricher = DetailEnricher::new(fetcher.clone(), layout.price.clone());
        let extractor = ListingExtractor::new(
            layout,
            CategoryResolver::default(),
            origin,
            GeoFilter::new(config, geocoder),
            enricher,
        );

        Ok(Self::new(
            fetcher,
            extractor,
            Box::new(MarkupNextPage::buyrentkenya()?),
            config.max_pages,
        ))
    }

    /// Traverse every category in order. Only sink failures are errors.
    pub async fn run<W: Write>(
        &self,
        category_urls: &[String],
        sink: &mut ResultSink<W>,
    ) -> Result<Vec<CategorySummary>> {
        let mut summaries = Vec::with_capacity(category_urls.len());
        for base_url in category_urls {
            summaries.push(self.run_category(base_url, sink).await?);
        }
        Ok(summaries)
    }

    pub async fn run_category<W: Write>(
        &self,
        base_url: &str,
        sink: &mut ResultSink<W>,
    ) -> Result<CategorySummary> {
        let mut summary = CategorySummary {
            base_url: base_url.to_string(),
            category: self.extractor.category(base_url),
            pages_fetched: 0,
            cards_seen: 0,
            records_written: 0,
            stop_reason: StopReason::NoRecords,
        };

        let mut state = PageState::Fetching(1);
        loop {
            state = match state {
                PageState::Fetching(page) => self.visit(base_url, page, sink, &mut summary).await?,
                PageState::Continuing(page) => match self.max_pages {
                    Some(cap) if page >= cap => PageState::Exhausted(StopReason::PageCap),
                    _ => PageState::Fetching(page + 1),
                },
                PageState::Exhausted(reason) => {
                    summary.stop_reason = reason;
                    break;
                }
            };
        }

        info!(
            "Finished {} ({} for {}): {} pages, {} of {} cards kept ({:?})",
            base_url,
            summary.category.property_type,
            summary.category.purchase_type,
            summary.pages_fetched,
            summary.records_written,
            summary.cards_seen,
            summary.stop_reason
        );
        Ok(summary)
    }

    /// Fetch one page, drain its records into the sink and pick the next state
    async fn visit<W: Write>(
        &self,
        base_url: &str,
        page: u32,
        sink: &mut ResultSink<W>,
        summary: &mut CategorySummary,
    ) -> Result<PageState> {
        let url = page_url(base_url, page);
        info!("Fetching data from {}...", url);

        let markup = match self.fetcher.fetch(&url).await {
            Ok(markup) => markup,
            Err(e) => {
                warn!(url = %url, error = %e, "Error fetching properties");
                return Ok(PageState::Exhausted(StopReason::FetchFailed));
            }
        };
        summary.pages_fetched += 1;

        let (mut listings, has_next) = self.scan(&url, &markup);
        summary.cards_seen += listings.cards_seen();

        let mut written = 0;
        while let Some(record) = listings.next().await {
            sink.append(&record)
                .with_context(|| format!("Failed to write record from {}", url))?;
            written += 1;
        }
        summary.records_written += written;

        Ok(if written == 0 {
            PageState::Exhausted(StopReason::NoRecords)
        } else if !has_next {
            PageState::Exhausted(StopReason::NoNextPage)
        } else {
            PageState::Continuing(page)
        })
    }

    fn scan(&self, url: &str, markup: &str) -> (PageListings<'_>, bool) {
        let document = Html::parse_document(markup);
        let listings = self.extractor.extract(url, &document);
        (listings, self.next_page.has_next_page(&document))
    }
}
