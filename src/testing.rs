//! In-memory stand-ins for the fetch and geocode seams.

use crate::error::ScrapeError;
use crate::geo::Geocoder;
use crate::models::GeoPoint;
use crate::scrapers::PageFetcher;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// Serves canned markup by URL; unknown URLs fail like a dead host
#[derive(Default)]
pub struct StaticFetcher {
    pages: HashMap<String, String>,
    requested: Mutex<Vec<String>>,
}

impl StaticFetcher {
    pub fn with_page(mut self, url: &str, markup: impl Into<String>) -> Self {
        self.pages.insert(url.to_string(), markup.into());
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
        self.requested.lock().unwrap().push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| ScrapeError::transport(url, "connection refused"))
    }
}

/// Resolves queries from a fixed table; listed queries raise transport errors
#[derive(Default)]
pub struct StaticGeocoder {
    points: HashMap<String, GeoPoint>,
    failing: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl StaticGeocoder {
    pub fn with_point(mut self, query: &str, point: GeoPoint) -> Self {
        self.points.insert(query.to_string(), point);
        self
    }

    pub fn failing_on(mut self, query: &str) -> Self {
        self.failing.insert(query.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Geocoder for StaticGeocoder {
    async fn resolve(&self, query: &str) -> Result<Option<GeoPoint>, ScrapeError> {
        self.calls.lock().unwrap().push(query.to_string());
        if self.failing.contains(query) {
            return Err(ScrapeError::transport("geocoder", "service unavailable"));
        }
        Ok(self.points.get(query).copied())
    }
}

#[async_trait]
impl<T: Geocoder> Geocoder for std::sync::Arc<T> {
    async fn resolve(&self, query: &str) -> Result<Option<GeoPoint>, ScrapeError> {
        (**self).resolve(query).await
    }
}
