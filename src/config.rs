use crate::models::{CategoryTag, GeoPoint, PropertyType, PurchaseType};
use std::time::Duration;

/// Nairobi city center
pub const NAIROBI_CENTER: GeoPoint = GeoPoint::new(-1.2921, 36.8219);

/// Ordered substring → category table, evaluated first-match
pub const CATEGORY_PATTERNS: &[(&str, CategoryTag)] = &[
    (
        "houses-for-sale",
        CategoryTag::new(PropertyType::House, PurchaseType::Sale),
    ),
    (
        "flats-apartments-for-sale",
        CategoryTag::new(PropertyType::Apartment, PurchaseType::Sale),
    ),
    (
        "houses-for-rent",
        CategoryTag::new(PropertyType::House, PurchaseType::Rent),
    ),
    (
        "flats-apartments-for-rent",
        CategoryTag::new(PropertyType::Apartment, PurchaseType::Rent),
    ),
    (
        "bedsitters-for-rent",
        CategoryTag::new(PropertyType::Bedsitter, PurchaseType::Rent),
    ),
];

/// Run-wide settings, fixed before the first request
#[derive(Debug, Clone, PartialEq)]
pub struct ScrapeConfig {
    /// Origin that relative card links are resolved against
    pub site_origin: String,
    /// Category listing URLs, traversed in order
    pub category_urls: Vec<String>,
    pub reference_center: GeoPoint,
    pub radius_km: f64,
    /// Appended to every location before geocoding
    pub country_qualifier: String,
    /// Base URL of a Nominatim-compatible search API
    pub geocoder_endpoint: String,
    pub user_agent: String,
    pub request_timeout: Duration,
    /// Minimum spacing between geocoding requests
    pub geocode_interval: Duration,
    /// Stop each category after this many pages
    pub max_pages: Option<u32>,
    pub output_path: String,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        let site_origin = "https://www.buyrentkenya.com".to_string();
        let category_urls = CATEGORY_PATTERNS
            .iter()
            .map(|(pattern, _)| format!("{}/{}", site_origin, pattern))
            .collect();

        Self {
            site_origin,
            category_urls,
            reference_center: NAIROBI_CENTER,
            radius_km: 30.0,
            country_qualifier: "Kenya".to_string(),
            geocoder_endpoint: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: "property_scraper".to_string(),
            request_timeout: Duration::from_secs(30),
            geocode_interval: Duration::from_secs(1),
            max_pages: None,
            output_path: "nairobi_property_listings.csv".to_string(),
        }
    }
}
