use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use super::BookingProvider;
use crate::errors::{BookingError, BookingResult};
use crate::models::{BookingConfirmation, BookingSnapshot, NewBooking, RawSnapshot};

/// Talks to the booking HTTP API.
pub struct LiveProvider {
    base_url: String,
    stub_submissions: bool,
    client: reqwest::Client,
}

impl LiveProvider {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            stub_submissions: false,
            client: reqwest::Client::new(),
        }
    }

    /// Confirm submissions locally instead of posting them.
    pub fn with_stubbed_submissions(mut self) -> Self {
        self.stub_submissions = true;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        request: RequestBuilder,
    ) -> BookingResult<T> {
        let resp = request.send().await.map_err(|err| {
            tracing::error!(endpoint, "API request failed: {err}");
            BookingError::from(err)
        })?;

        let status = resp.status();
        if !status.is_success() {
            let err = BookingError::HttpStatus {
                status: status.as_u16(),
            };
            tracing::error!(endpoint, "API request failed: {err}");
            return Err(err);
        }

        resp.json().await.map_err(|err| {
            tracing::error!(endpoint, "failed to read API response: {err}");
            BookingError::from(err)
        })
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> BookingResult<T> {
        tracing::debug!(endpoint, "GET");
        let request = self.client.get(format!("{}{endpoint}", self.base_url));
        self.request(endpoint, request).await
    }
}

#[async_trait]
impl BookingProvider for LiveProvider {
    async fn fetch_booking_data(&self, date: Option<NaiveDate>) -> BookingResult<BookingSnapshot> {
        let endpoint = match date {
            Some(date) => format!("/api/booking?date={date}"),
            None => "/api/booking".to_string(),
        };
        let raw: RawSnapshot = self.get(&endpoint).await?;
        Ok(raw.into_snapshot())
    }

    async fn create_booking(&self, booking: NewBooking) -> BookingResult<BookingConfirmation> {
        if self.stub_submissions {
            let confirmation = BookingConfirmation::local(booking);
            tracing::info!(id = %confirmation.id, "booking confirmed locally without submitting");
            return Ok(confirmation);
        }

        let endpoint = "/api/booking";
        tracing::debug!(endpoint, "POST");
        let request = self
            .client
            .post(format!("{}{endpoint}", self.base_url))
            .json(&booking);
        let confirmation: BookingConfirmation = self.request(endpoint, request).await?;
        tracing::info!(id = %confirmation.id, "booking created");
        Ok(confirmation)
    }

    async fn available_days(&self) -> BookingResult<Vec<NaiveDate>> {
        self.get("/api/booking/available-days").await
    }
}
