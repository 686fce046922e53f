use crate::error::ScrapeError;
use crate::models::PLACEHOLDER;
use crate::scrapers::PageFetcher;
use scraper::{Html, Selector};
use std::sync::Arc;
use tracing::{debug, warn};

/// Reads the authoritative price from a listing's detail page
pub struct DetailEnricher {
    fetcher: Arc<dyn PageFetcher>,
    price: Selector,
}

impl DetailEnricher {
    pub fn new(fetcher: Arc<dyn PageFetcher>, price: Selector) -> Self {
        Self { fetcher, price }
    }

    pub async fn lookup_price(&self, detail_url: &str) -> Result<String, ScrapeError> {
        let markup = self.fetcher.fetch(detail_url).await?;
        self.read_price(detail_url, &markup)
    }

    fn read_price(&self, detail_url: &str, markup: &str) -> Result<String, ScrapeError> {
        let document = Html::parse_document(markup);
        document
            .select(&self.price)
            .next()
            .map(|node| node.text().collect::<String>().trim().to_string())
            .ok_or_else(|| ScrapeError::NotFound {
                what: "price",
                url: detail_url.to_string(),
            })
    }

    /// Price text, or the placeholder when it cannot be read
    pub async fn fetch_price(&self, detail_url: &str) -> String {
        match self.lookup_price(detail_url).await {
            Ok(price) => price,
            Err(e @ ScrapeError::NotFound { .. }) => {
                debug!("{}", e);
                PLACEHOLDER.to_string()
            }
            Err(e) => {
                warn!(url = %detail_url, error = %e, "Error fetching details");
                PLACEHOLDER.to_string()
            }
        }
    }
}
