use chrono::NaiveDate;
use serde::Deserialize;

use super::lenient::{lenient, lenient_label, lenient_list};
use super::snapshot::{EntityId, Order, Reservation};

/// Snapshot as the booking endpoint sends it. Any field may be missing or
/// oddly typed; the normalizer fills the gaps.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSnapshot {
    #[serde(default, alias = "available_days", deserialize_with = "lenient_list")]
    pub available_days: Option<Vec<NaiveDate>>,
    #[serde(default, alias = "current_day", deserialize_with = "lenient")]
    pub current_day: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient")]
    pub restaurant: Option<RawRestaurant>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub tables: Option<Vec<RawTable>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRestaurant {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<EntityId>,
    #[serde(default, deserialize_with = "lenient")]
    pub timezone: Option<String>,
    #[serde(default, alias = "restaurant_name", deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, alias = "opening_time", deserialize_with = "lenient")]
    pub opening_time: Option<String>,
    #[serde(default, alias = "closing_time", deserialize_with = "lenient")]
    pub closing_time: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTable {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<EntityId>,
    #[serde(default, deserialize_with = "lenient")]
    pub capacity: Option<u32>,
    // Table numbers arrive as "7" or 7 depending on the backend version.
    #[serde(default, deserialize_with = "lenient_label")]
    pub number: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub zone: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub orders: Option<Vec<Order>>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub reservations: Option<Vec<Reservation>>,
}
