mod config;
mod error;
mod geo;
mod models;
mod scrapers;
mod sink;
#[cfg(test)]
mod testing;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use config::ScrapeConfig;
use geo::NominatimGeocoder;
use models::RunSummary;
use scrapers::{build_client, HttpFetcher, PageFetcher, PaginationController};
use sink::ResultSink;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Scrape Nairobi-area property listings from buyrentkenya.com into a CSV file
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Output CSV path
    #[arg(long, default_value = "nairobi_property_listings.csv")]
    output: String,

    /// Keep listings within this many kilometers of the city center
    #[arg(long, default_value_t = 30.0)]
    radius_km: f64,

    /// Category listing URL to scrape (repeatable, replaces the default list)
    #[arg(long = "category")]
    categories: Vec<String>,

    /// Stop each category after this many pages (at least 1)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    max_pages: Option<u32>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Minimum delay between geocoding requests (ms)
    #[arg(long, default_value_t = 1000)]
    geocode_interval_ms: u64,

    /// Also write a JSON run summary to this path
    #[arg(long)]
    summary: Option<String>,
}

impl Args {
    fn to_config(&self) -> ScrapeConfig {
        let mut config = ScrapeConfig {
            output_path: self.output.clone(),
            radius_km: self.radius_km,
            max_pages: self.max_pages,
            request_timeout: Duration::from_secs(self.timeout_secs),
            geocode_interval: Duration::from_millis(self.geocode_interval_ms),
            ..ScrapeConfig::default()
        };
        if !self.categories.is_empty() {
            config.category_urls = self.categories.clone();
        }
        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = args.to_config();

    info!("🏠 Nairobi Scout - buyrentkenya.com scraper");
    info!(
        "Keeping listings within {} km of ({}, {}) across {} categories",
        config.radius_km,
        config.reference_center.latitude,
        config.reference_center.longitude,
        config.category_urls.len()
    );

    let client = build_client(&config)?;
    let fetcher: Arc<dyn PageFetcher> = Arc::new(HttpFetcher::new(client.clone()));
    let geocoder = NominatimGeocoder::new(
        client,
        config.geocoder_endpoint.clone(),
        config.geocode_interval,
    );
    let controller = PaginationController::from_config(&config, fetcher, Box::new(geocoder))?;

    let mut sink = ResultSink::create(&config.output_path)?;
    let started_at = Utc::now();

    let categories = controller.run(&config.category_urls, &mut sink).await?;

    let total_records = sink.rows();
    sink.finish()
        .with_context(|| format!("Failed to flush {}", config.output_path))?;
    info!("💾 Saved {} listings to {}", total_records, config.output_path);

    if let Some(path) = &args.summary {
        let summary = RunSummary {
            output: config.output_path.clone(),
            started_at,
            finished_at: Utc::now(),
            categories,
            total_records,
        };
        let json = serde_json::to_string_pretty(&summary)?;
        tokio::fs::write(path, json)
            .await
            .with_context(|| format!("Failed to write summary to {}", path))?;
        info!("Saved run summary to {}", path);
    }

    Ok(())
}
