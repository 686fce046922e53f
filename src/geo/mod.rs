pub mod distance;
pub mod nominatim;

pub use distance::distance_km;
pub use nominatim::{Geocoder, NominatimGeocoder};

use crate::config::ScrapeConfig;
use crate::error::ScrapeError;
use crate::models::GeoPoint;
use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Keeps listings whose location resolves within `radius_km` of the reference center.
///
/// Any lookup failure excludes the listing. Answers from the geocoder (match or
/// no match) are remembered for the rest of the run; transport failures are not.
pub struct GeoFilter {
    geocoder: Box<dyn Geocoder>,
    center: GeoPoint,
    radius_km: f64,
    country_qualifier: String,
    resolved: Mutex<HashMap<String, Option<GeoPoint>>>,
}

impl GeoFilter {
    pub fn new(config: &ScrapeConfig, geocoder: Box<dyn Geocoder>) -> Self {
        Self {
            geocoder,
            center: config.reference_center,
            radius_km: config.radius_km,
            country_qualifier: config.country_qualifier.clone(),
            resolved: Mutex::new(HashMap::new()),
        }
    }

    /// Resolve a card location to coordinates
    pub async fn locate(&self, location: &str) -> Result<GeoPoint, ScrapeError> {
        let query = format!("{}, {}", location, self.country_qualifier);

        let cached = self.resolved.lock().await.get(&query).copied();
        let point = match cached {
            Some(point) => point,
            None => {
                let point = self.geocoder.resolve(&query).await?;
                self.resolved.lock().await.insert(query.clone(), point);
                point
            }
        };

        point.ok_or(ScrapeError::UnresolvedLocation(query))
    }

    pub async fn include_location(&self, location: &str) -> bool {
        match self.locate(location).await {
            Ok(point) => {
                let distance = distance_km(self.center, point);
                let keep = distance <= self.radius_km;
                debug!(location, distance_km = distance, keep, "Geofilter decision");
                keep
            }
            Err(e) => {
                warn!(location, error = %e, "Excluding listing with unresolved location");
                false
            }
        }
    }
}
