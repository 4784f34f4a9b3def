use chrono::{NaiveDate, Utc};

use crate::models::snapshot::{
    DEFAULT_CLOSING_TIME, DEFAULT_OPENING_TIME, DEFAULT_RESTAURANT_ID, DEFAULT_RESTAURANT_NAME,
    DEFAULT_TIMEZONE,
};
use crate::models::{
    BookingSnapshot, EntityId, RawRestaurant, RawSnapshot, RawTable, RestaurantInfo, TableState,
};

/// Fills every gap in `raw` with its default. `today` stands in for a missing
/// current day. Table fields are carried over as given, absent ones included.
pub fn normalize(raw: RawSnapshot, today: NaiveDate) -> BookingSnapshot {
    BookingSnapshot {
        available_days: raw.available_days.unwrap_or_default(),
        current_day: raw.current_day.unwrap_or(today),
        restaurant: normalize_restaurant(raw.restaurant.unwrap_or_default()),
        tables: raw
            .tables
            .unwrap_or_default()
            .into_iter()
            .map(normalize_table)
            .collect(),
    }
}

fn normalize_restaurant(raw: RawRestaurant) -> RestaurantInfo {
    RestaurantInfo {
        id: raw.id.unwrap_or(EntityId::Int(DEFAULT_RESTAURANT_ID)),
        timezone: raw.timezone.unwrap_or_else(|| DEFAULT_TIMEZONE.to_string()),
        name: raw.name.unwrap_or_else(|| DEFAULT_RESTAURANT_NAME.to_string()),
        opening_time: raw
            .opening_time
            .unwrap_or_else(|| DEFAULT_OPENING_TIME.to_string()),
        closing_time: raw
            .closing_time
            .unwrap_or_else(|| DEFAULT_CLOSING_TIME.to_string()),
    }
}

fn normalize_table(raw: RawTable) -> TableState {
    TableState {
        id: raw.id,
        capacity: raw.capacity,
        number: raw.number,
        zone: raw.zone,
        orders: raw.orders.unwrap_or_default(),
        reservations: raw.reservations.unwrap_or_default(),
    }
}

impl RawSnapshot {
    pub fn into_snapshot(self) -> BookingSnapshot {
        normalize(self, Utc::now().date_naive())
    }
}
