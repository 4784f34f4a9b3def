use std::env;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://hh.frontend.ark.software";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataSource {
    Mock,
    Live,
}

impl DataSource {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "live" | "remote" | "http" => DataSource::Live,
            _ => DataSource::Mock,
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_base_url: String,
    pub data_source: DataSource,
    pub stub_booking_submit: bool,
    pub mock_fetch_latency: Duration,
    pub mock_submit_latency: Duration,
    pub restaurant_utc_offset: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            data_source: DataSource::Mock,
            stub_booking_submit: false,
            mock_fetch_latency: Duration::from_millis(500),
            mock_submit_latency: Duration::from_millis(800),
            restaurant_utc_offset: "+10:00".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: env::var("BOOKING_API_URL").unwrap_or(defaults.api_base_url),
            data_source: env::var("BOOKING_DATA_SOURCE")
                .map(|v| DataSource::parse(&v))
                .unwrap_or(defaults.data_source),
            stub_booking_submit: env::var("STUB_BOOKING_SUBMIT")
                .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(defaults.stub_booking_submit),
            mock_fetch_latency: millis_var("MOCK_FETCH_LATENCY_MS")
                .unwrap_or(defaults.mock_fetch_latency),
            mock_submit_latency: millis_var("MOCK_SUBMIT_LATENCY_MS")
                .unwrap_or(defaults.mock_submit_latency),
            restaurant_utc_offset: env::var("RESTAURANT_UTC_OFFSET")
                .unwrap_or(defaults.restaurant_utc_offset),
        }
    }
}

fn millis_var(key: &str) -> Option<Duration> {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .map(Duration::from_millis)
}
