use crate::geo::GeoFilter;
use crate::models::{split_location, CategoryTag, ListingCandidate, PropertyRecord, PLACEHOLDER};
use crate::scrapers::{CategoryResolver, DetailEnricher, SiteLayout};
use scraper::{ElementRef, Html, Selector};
use std::vec;
use tracing::{debug, warn};
use url::Url;

/// Turns listing pages into geofiltered, price-enriched records
pub struct ListingExtractor {
    layout: SiteLayout,
    resolver: CategoryResolver,
    origin: Url,
    geo: GeoFilter,
    enricher: DetailEnricher,
}

impl ListingExtractor {
    pub fn new(
        layout: SiteLayout,
        resolver: CategoryResolver,
        origin: Url,
        geo: GeoFilter,
        enricher: DetailEnricher,
    ) -> Self {
        Self {
            layout,
            resolver,
            origin,
            geo,
            enricher,
        }
    }

    pub fn category(&self, page_url: &str) -> CategoryTag {
        self.resolver.resolve(page_url)
    }

    /// Records accepted from one parsed listing page, as a lazy sequence.
    ///
    /// Card fields are copied out eagerly; geocoding and detail fetches
    /// happen as the returned sequence is consumed.
    pub fn extract(&self, page_url: &str, document: &Html) -> PageListings<'_> {
        let category = self.category(page_url);
        let cards: Vec<ListingCandidate> = document
            .select(&self.layout.card)
            .map(|card| self.read_card(card))
            .collect();

        debug!("Found {} property cards on {}", cards.len(), page_url);

        PageListings {
            extractor: self,
            category,
            cards_seen: cards.len(),
            cards: cards.into_iter(),
        }
    }

    fn read_card(&self, card: ElementRef<'_>) -> ListingCandidate {
        let detail_url = card
            .select(&self.layout.detail_link)
            .next()
            .and_then(|link| link.value().attr("href"))
            .and_then(|href| match self.origin.join(href) {
                Ok(url) => Some(url.to_string()),
                Err(e) => {
                    warn!("Unusable detail link {:?}: {}", href, e);
                    None
                }
            });

        ListingCandidate {
            location_text: first_text(card, &self.layout.location).filter(|text| !text.is_empty()),
            size: field_text(card, &self.layout.size),
            bedrooms: field_text(card, &self.layout.bedrooms),
            bathrooms: field_text(card, &self.layout.bathrooms),
            detail_url,
        }
    }
}

fn first_text(card: ElementRef<'_>, selector: &Selector) -> Option<String> {
    card.select(selector)
        .next()
        .map(|node| node.text().collect::<String>().trim().to_string())
}

fn field_text(card: ElementRef<'_>, selector: &Selector) -> String {
    first_text(card, selector).unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// Single-pass sequence of the records one listing page yields
pub struct PageListings<'a> {
    extractor: &'a ListingExtractor,
    category: CategoryTag,
    cards_seen: usize,
    cards: vec::IntoIter<ListingCandidate>,
}

impl PageListings<'_> {
    /// Cards found on the page, before filtering
    pub fn cards_seen(&self) -> usize {
        self.cards_seen
    }

    /// Next card that passes the geofilter, with its detail price filled in.
    ///
    /// Cards without a location are dropped; there is nothing to check against the radius.
    pub async fn next(&mut self) -> Option<PropertyRecord> {
        let extractor = self.extractor;

        for candidate in self.cards.by_ref() {
            let Some(text) = candidate.location_text.as_deref() else {
                debug!("Skipping card without location");
                continue;
            };

            let (location, other_location_details) = split_location(text);
            if !extractor.geo.include_location(&location).await {
                continue;
            }

            let price = match candidate.detail_url.as_deref() {
                Some(url) => extractor.enricher.fetch_price(url).await,
                None => PLACEHOLDER.to_string(),
            };

            return Some(PropertyRecord {
                location,
                other_location_details,
                size: candidate.size,
                bedrooms: candidate.bedrooms,
                bathrooms: candidate.bathrooms,
                price,
                property_type: self.category.property_type,
                purchase_type: self.category.purchase_type,
            });
        }

        None
    }
}
