use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Literal written for any field that could not be determined
pub const PLACEHOLDER: &str = "None";

/// A latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyType {
    House,
    Apartment,
    Bedsitter,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PurchaseType {
    Sale,
    Rent,
    Unknown,
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl fmt::Display for PurchaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Property and purchase type derived from a category URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTag {
    pub property_type: PropertyType,
    pub purchase_type: PurchaseType,
}

impl CategoryTag {
    pub const UNKNOWN: CategoryTag = CategoryTag::new(PropertyType::Unknown, PurchaseType::Unknown);

    pub const fn new(property_type: PropertyType, purchase_type: PurchaseType) -> Self {
        Self {
            property_type,
            purchase_type,
        }
    }
}

/// Raw fields pulled from one listing card, before geofiltering
#[derive(Debug, Clone, PartialEq)]
pub struct ListingCandidate {
    pub location_text: Option<String>,
    pub size: String,
    pub bedrooms: String,
    pub bathrooms: String,
    /// Absolute detail page URL, if the card carried a link
    pub detail_url: Option<String>,
}

/// One output row. Every field is text so rows always have eight columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyRecord {
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Other Location Details")]
    pub other_location_details: String,
    #[serde(rename = "Size")]
    pub size: String,
    #[serde(rename = "Bedrooms")]
    pub bedrooms: String,
    #[serde(rename = "Bathrooms")]
    pub bathrooms: String,
    #[serde(rename = "Price")]
    pub price: String,
    #[serde(rename = "Property Type")]
    pub property_type: PropertyType,
    #[serde(rename = "Purchase Type")]
    pub purchase_type: PurchaseType,
}

/// Split card location text on the first comma.
///
/// `"Kilimani, Dagoretti North"` becomes `("Kilimani", "Dagoretti North")`;
/// text without a comma yields an empty second half.
pub fn split_location(text: &str) -> (String, String) {
    match text.split_once(',') {
        Some((location, other)) => (location.trim().to_string(), other.trim().to_string()),
        None => (text.trim().to_string(), String::new()),
    }
}

/// Why a category's traversal stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    NoRecords,
    NoNextPage,
    FetchFailed,
    PageCap,
}

/// Per-category counters collected while paginating
#[derive(Debug, Clone, Serialize)]
pub struct CategorySummary {
    pub base_url: String,
    pub category: CategoryTag,
    pub pages_fetched: u32,
    pub cards_seen: usize,
    pub records_written: usize,
    pub stop_reason: StopReason,
}

/// Run report written next to the CSV when requested
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub output: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub categories: Vec<CategorySummary>,
    pub total_records: usize,
}
