use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use chrono::NaiveDate;

use super::BookingProvider;
use crate::errors::BookingResult;
use crate::models::{BookingConfirmation, BookingSnapshot, NewBooking};

const BUNDLED_FIXTURE: &str = include_str!("fixture.json");

/// Serves a fixed snapshot from memory with simulated network latency.
/// Submissions are confirmed but never recorded in the fixture.
pub struct MockProvider {
    fixture: BookingSnapshot,
    fetch_latency: Duration,
    submit_latency: Duration,
}

impl MockProvider {
    /// Provider over the bundled restaurant fixture.
    pub fn new() -> anyhow::Result<Self> {
        Self::from_json(BUNDLED_FIXTURE).context("bundled booking fixture is invalid")
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let fixture: BookingSnapshot =
            serde_json::from_str(json).context("failed to parse booking fixture")?;
        Ok(Self::with_fixture(fixture))
    }

    pub fn with_fixture(fixture: BookingSnapshot) -> Self {
        Self {
            fixture,
            fetch_latency: Duration::from_millis(500),
            submit_latency: Duration::from_millis(800),
        }
    }

    pub fn with_latency(mut self, fetch: Duration, submit: Duration) -> Self {
        self.fetch_latency = fetch;
        self.submit_latency = submit;
        self
    }

    pub fn fixture(&self) -> &BookingSnapshot {
        &self.fixture
    }
}

#[async_trait]
impl BookingProvider for MockProvider {
    async fn fetch_booking_data(&self, date: Option<NaiveDate>) -> BookingResult<BookingSnapshot> {
        tokio::time::sleep(self.fetch_latency).await;

        let mut snapshot = self.fixture.clone();
        if let Some(date) = date {
            snapshot.current_day = date;
        }
        Ok(snapshot)
    }

    async fn create_booking(&self, booking: NewBooking) -> BookingResult<BookingConfirmation> {
        tokio::time::sleep(self.submit_latency).await;

        tracing::info!(?booking, "booking created");
        Ok(BookingConfirmation::local(booking))
    }

    async fn available_days(&self) -> BookingResult<Vec<NaiveDate>> {
        Ok(self.fixture.available_days.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntityId, OrderStatus, ReservationStatus};

    fn provider() -> MockProvider {
        MockProvider::new()
            .unwrap()
            .with_latency(Duration::ZERO, Duration::ZERO)
    }

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_bundled_fixture() {
        let provider = provider();
        let fixture = provider.fixture();
        assert_eq!(fixture.restaurant.id, EntityId::Int(11100));
        assert_eq!(fixture.restaurant.name, "Супра");
        assert_eq!(fixture.restaurant.closing_time, "23:40");
        assert_eq!(fixture.current_day, day("2025-04-04"));
        assert_eq!(fixture.available_days.len(), 5);
        assert_eq!(fixture.tables.len(), 8);
        assert_eq!(fixture.zones(), vec!["1 этаж", "2 этаж", "Банкетный зал"]);

        let banquet = fixture.table(&"table-4".into()).unwrap();
        assert_eq!(banquet.orders[0].status, Some(OrderStatus::Banquet));
        let walk_in = fixture.table(&"table-3".into()).unwrap();
        assert_eq!(walk_in.reservations[0].status, Some(ReservationStatus::WalkIn));
        assert_eq!(walk_in.reservations[0].id, Some(EntityId::Int(3)));
    }

    #[test]
    fn test_invalid_fixture_rejected() {
        assert!(MockProvider::from_json(r#"{"tables":[]}"#).is_err());
    }

    #[tokio::test]
    async fn test_fetch_overrides_current_day() {
        let provider = provider();
        let snapshot = provider.fetch_booking_data(Some(day("2025-04-06"))).await.unwrap();
        assert_eq!(snapshot.current_day, day("2025-04-06"));
        assert_eq!(provider.fixture().current_day, day("2025-04-04"));

        let snapshot = provider.fetch_booking_data(None).await.unwrap();
        assert_eq!(snapshot.current_day, day("2025-04-04"));
    }

    #[tokio::test]
    async fn test_mutating_result_leaves_fixture_intact() {
        let provider = provider();
        let mut first = provider.fetch_booking_data(None).await.unwrap();
        first.tables.clear();
        first.restaurant.name = "Другой".to_string();
        first.available_days.push(day("2030-01-01"));

        let second = provider.fetch_booking_data(None).await.unwrap();
        assert_eq!(second.tables.len(), 8);
        assert_eq!(second.restaurant.name, "Супра");
        assert_eq!(&second, provider.fixture());
    }

    #[tokio::test]
    async fn test_available_days_is_a_copy() {
        let provider = provider();
        let mut days = provider.available_days().await.unwrap();
        days.clear();

        let days = provider.available_days().await.unwrap();
        assert_eq!(days.first(), Some(&day("2025-04-04")));
        assert_eq!(days.last(), Some(&day("2025-04-08")));
    }

    #[tokio::test]
    async fn test_create_booking_is_not_persisted() {
        let provider = provider();
        let booking = NewBooking {
            table_id: Some("table-3".into()),
            guest_name: Some("Мария".to_string()),
            party_size: Some(2),
            ..NewBooking::default()
        };

        let first = provider.create_booking(booking.clone()).await.unwrap();
        let second = provider.create_booking(booking.clone()).await.unwrap();
        assert!(first.success && second.success);
        assert_ne!(first.id, second.id);
        assert_eq!(first.booking, booking);

        let snapshot = provider.fetch_booking_data(None).await.unwrap();
        let table = snapshot.table(&"table-3".into()).unwrap();
        assert_eq!(table.reservations.len(), 1);
    }
}
