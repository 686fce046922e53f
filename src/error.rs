use thiserror::Error;

/// Failures the scraping pipeline converts into safe defaults
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Page, detail or geocode request failed on the wire or returned an error status
    #[error("request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    /// An expected markup node was absent
    #[error("{what} not found at {url}")]
    NotFound { what: &'static str, url: String },

    /// Geocoder returned no match
    #[error("no geocoding match for {0:?}")]
    UnresolvedLocation(String),

    /// A configured CSS selector failed to compile
    #[error("invalid selector {0:?}")]
    Selector(String),
}

impl ScrapeError {
    pub fn transport(url: impl Into<String>, reason: impl ToString) -> Self {
        ScrapeError::Transport {
            url: url.into(),
            reason: reason.to_string(),
        }
    }
}
