pub mod live;
pub mod mock;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::config::{AppConfig, DataSource};
use crate::errors::BookingResult;
use crate::models::{BookingConfirmation, BookingSnapshot, NewBooking};

pub use live::LiveProvider;
pub use mock::MockProvider;

/// Source of booking snapshots and sink for new bookings.
///
/// Every call returns owned data; nothing handed out aliases provider state.
#[async_trait]
pub trait BookingProvider: Send + Sync {
    /// Snapshot for `date`, or for the source's default day when `None`.
    async fn fetch_booking_data(&self, date: Option<NaiveDate>) -> BookingResult<BookingSnapshot>;

    async fn create_booking(&self, booking: NewBooking) -> BookingResult<BookingConfirmation>;

    async fn available_days(&self) -> BookingResult<Vec<NaiveDate>>;
}

pub fn build_provider(config: &AppConfig) -> anyhow::Result<Box<dyn BookingProvider>> {
    let provider: Box<dyn BookingProvider> = match config.data_source {
        DataSource::Live => {
            tracing::info!("using live booking API at {}", config.api_base_url);
            let provider = LiveProvider::new(config.api_base_url.clone());
            if config.stub_booking_submit {
                Box::new(provider.with_stubbed_submissions())
            } else {
                Box::new(provider)
            }
        }
        DataSource::Mock => {
            tracing::info!("using bundled mock booking data");
            Box::new(
                MockProvider::new()?
                    .with_latency(config.mock_fetch_latency, config.mock_submit_latency),
            )
        }
    };
    Ok(provider)
}
