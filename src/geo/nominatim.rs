use crate::error::ScrapeError;
use crate::models::GeoPoint;
use async_trait::async_trait;
use governor::{Quota, RateLimiter};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

type DefaultRateLimiter = RateLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// Free-text location lookup
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// `Ok(None)` means the provider answered but found no match
    async fn resolve(&self, query: &str) -> Result<Option<GeoPoint>, ScrapeError>;
}

#[derive(Debug, Deserialize)]
struct NominatimHit {
    lat: String,
    lon: String,
}

/// Geocoder backed by the Nominatim (OpenStreetMap) search API
pub struct NominatimGeocoder {
    client: Client,
    endpoint: String,
    /// One request per `interval`; `None` when the interval is zero
    limiter: Option<DefaultRateLimiter>,
}

impl NominatimGeocoder {
    pub fn new(client: Client, endpoint: impl Into<String>, interval: Duration) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            limiter: Quota::with_period(interval).map(RateLimiter::direct),
        }
    }

    async fn wait_for_permit(&self) {
        if let Some(limiter) = &self.limiter {
            limiter.until_ready().await;
        }
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn resolve(&self, query: &str) -> Result<Option<GeoPoint>, ScrapeError> {
        self.wait_for_permit().await;

        let url = format!("{}/search", self.endpoint.trim_end_matches('/'));
        debug!("Geocoding {:?}", query);

        let response = self
            .client
            .get(&url)
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .send()
            .await
            .map_err(|e| ScrapeError::transport(&url, e))?;

        if !response.status().is_success() {
            return Err(ScrapeError::transport(
                &url,
                format!("status {}", response.status()),
            ));
        }

        let hits: Vec<NominatimHit> = response
            .json()
            .await
            .map_err(|e| ScrapeError::transport(&url, e))?;

        let Some(hit) = hits.first() else {
            return Ok(None);
        };

        let latitude: f64 = hit
            .lat
            .parse()
            .map_err(|e| ScrapeError::transport(&url, format!("invalid latitude: {e}")))?;
        let longitude: f64 = hit
            .lon
            .parse()
            .map_err(|e| ScrapeError::transport(&url, format!("invalid longitude: {e}")))?;

        Ok(Some(GeoPoint::new(latitude, longitude)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn geocoder(server: &MockServer) -> NominatimGeocoder {
        NominatimGeocoder::new(Client::new(), server.uri(), Duration::ZERO)
    }

    #[tokio::test]
    async fn resolves_first_hit() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "Kilimani, Kenya"))
            .and(query_param("format", "json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"[{"lat":"-1.2890","lon":"36.7870","display_name":"Kilimani, Nairobi, Kenya"}]"#,
            ))
            .mount(&server)
            .await;

        let point = geocoder(&server)
            .resolve("Kilimani, Kenya")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(point, GeoPoint::new(-1.2890, 36.7870));
    }

    #[tokio::test]
    async fn empty_result_is_no_match() {
        let server = MockServer::start().await;
        Mock::given(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .mount(&server)
            .await;

        let result = geocoder(&server).resolve("Atlantis, Kenya").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn error_status_is_transport_failure() {
        let server = MockServer::start().await;
        Mock::given(path("/search"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let err = geocoder(&server).resolve("Karen, Kenya").await.unwrap_err();
        assert!(matches!(err, ScrapeError::Transport { .. }));
    }

    #[tokio::test]
    async fn requests_are_spaced_by_interval() {
        let server = MockServer::start().await;
        Mock::given(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .mount(&server)
            .await;

        let geocoder =
            NominatimGeocoder::new(Client::new(), server.uri(), Duration::from_millis(200));
        let started = std::time::Instant::now();
        geocoder.resolve("a").await.unwrap();
        geocoder.resolve("b").await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(180));
    }
}
