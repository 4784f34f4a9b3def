use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use super::lenient::{lenient, lenient_label};
use crate::errors::BookingResult;
use crate::services::timeslots;

pub const DEFAULT_RESTAURANT_ID: i64 = 11100;
pub const DEFAULT_TIMEZONE: &str = "Asia/Vladivostok";
pub const DEFAULT_RESTAURANT_NAME: &str = "Ресторан";
pub const DEFAULT_OPENING_TIME: &str = "11:00";
pub const DEFAULT_CLOSING_TIME: &str = "23:00";

/// Identifier that the booking backend sends either as a number or as a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Int(i64),
    Text(String),
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Int(n) => write!(f, "{n}"),
            EntityId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for EntityId {
    fn from(n: i64) -> Self {
        EntityId::Int(n)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        EntityId::Text(s.to_string())
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        EntityId::Text(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    New,
    Bill,
    Banquet,
    Closed,
    Other(String),
}

impl OrderStatus {
    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::New => "New",
            OrderStatus::Bill => "Bill",
            OrderStatus::Banquet => "Banquet",
            OrderStatus::Closed => "Closed",
            OrderStatus::Other(s) => s,
        }
    }
}

impl From<String> for OrderStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "New" => OrderStatus::New,
            "Bill" => OrderStatus::Bill,
            "Banquet" => OrderStatus::Banquet,
            "Closed" => OrderStatus::Closed,
            _ => OrderStatus::Other(s),
        }
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

/// Reservation states as labelled by the restaurant's front of house.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReservationStatus {
    New,
    Open,
    WalkIn,
    Request,
    Other(String),
}

impl ReservationStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ReservationStatus::New => "Новая",
            ReservationStatus::Open => "Открыт",
            ReservationStatus::WalkIn => "Живая очередь",
            ReservationStatus::Request => "Заявка",
            ReservationStatus::Other(s) => s,
        }
    }
}

impl From<String> for ReservationStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Новая" => ReservationStatus::New,
            "Открыт" => ReservationStatus::Open,
            "Живая очередь" => ReservationStatus::WalkIn,
            "Заявка" => ReservationStatus::Request,
            _ => ReservationStatus::Other(s),
        }
    }
}

impl From<ReservationStatus> for String {
    fn from(status: ReservationStatus) -> Self {
        match status {
            ReservationStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

/// Order as the point-of-sale reports it. Fields the source leaves out, or sends
/// in an unexpected shape, stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(
        default,
        alias = "startTime",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_time: Option<DateTime<FixedOffset>>,
    #[serde(
        default,
        alias = "endTime",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_time: Option<DateTime<FixedOffset>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(
        default,
        rename = "name_for_reservation",
        alias = "nameForReservation",
        alias = "guestName",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub guest_name: Option<String>,
    #[serde(
        default,
        rename = "num_people",
        alias = "numPeople",
        alias = "partySize",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub party_size: Option<u32>,
    #[serde(
        default,
        alias = "phoneNumber",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub phone_number: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub status: Option<ReservationStatus>,
    #[serde(
        default,
        alias = "seatingTime",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub seating_time: Option<DateTime<FixedOffset>>,
    #[serde(
        default,
        alias = "endTime",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_time: Option<DateTime<FixedOffset>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableState {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(
        default,
        deserialize_with = "lenient_label",
        skip_serializing_if = "Option::is_none"
    )]
    pub number: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    #[serde(default)]
    pub orders: Vec<Order>,
    #[serde(default)]
    pub reservations: Vec<Reservation>,
}

impl TableState {
    /// Whether an order or reservation occupies the table at `at`.
    /// Intervals are half-open: a booking ending at `at` no longer counts.
    /// Bookings missing either bound are ignored.
    pub fn is_busy_at(&self, at: &DateTime<FixedOffset>) -> bool {
        type Bound = Option<DateTime<FixedOffset>>;
        let covers = |start: &Bound, end: &Bound| {
            matches!((start, end), (Some(start), Some(end)) if start <= at && at < end)
        };
        self.orders.iter().any(|o| covers(&o.start_time, &o.end_time))
            || self
                .reservations
                .iter()
                .any(|r| covers(&r.seating_time, &r.end_time))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantInfo {
    pub id: EntityId,
    pub timezone: String,
    #[serde(rename = "restaurant_name")]
    pub name: String,
    pub opening_time: String,
    pub closing_time: String,
}

impl Default for RestaurantInfo {
    fn default() -> Self {
        Self {
            id: EntityId::Int(DEFAULT_RESTAURANT_ID),
            timezone: DEFAULT_TIMEZONE.to_string(),
            name: DEFAULT_RESTAURANT_NAME.to_string(),
            opening_time: DEFAULT_OPENING_TIME.to_string(),
            closing_time: DEFAULT_CLOSING_TIME.to_string(),
        }
    }
}

impl RestaurantInfo {
    pub fn time_slots(&self, interval_minutes: u32) -> BookingResult<Vec<String>> {
        timeslots::generate_time_slots(&self.opening_time, &self.closing_time, interval_minutes)
    }
}

/// State of every table, with its orders and reservations, for one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingSnapshot {
    pub available_days: Vec<NaiveDate>,
    pub current_day: NaiveDate,
    pub restaurant: RestaurantInfo,
    pub tables: Vec<TableState>,
}

impl BookingSnapshot {
    /// Distinct zone labels in the order tables list them. Tables without a
    /// zone are left out.
    pub fn zones(&self) -> Vec<&str> {
        let mut zones: Vec<&str> = Vec::new();
        for zone in self.tables.iter().filter_map(|t| t.zone.as_deref()) {
            if !zones.contains(&zone) {
                zones.push(zone);
            }
        }
        zones
    }

    pub fn table(&self, id: &EntityId) -> Option<&TableState> {
        self.tables.iter().find(|t| t.id.as_ref() == Some(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    fn table_with_bookings() -> TableState {
        TableState {
            id: Some("table-1".into()),
            capacity: Some(4),
            number: Some("1".to_string()),
            zone: Some("1 этаж".to_string()),
            orders: vec![Order {
                id: Some("order-1".into()),
                status: Some(OrderStatus::New),
                start_time: Some(ts("2025-04-04T12:00:00+10:00")),
                end_time: Some(ts("2025-04-04T13:30:00+10:00")),
            }],
            reservations: vec![Reservation {
                id: Some(1.into()),
                guest_name: Some("Анна".to_string()),
                party_size: Some(3),
                phone_number: Some("+79991234567".to_string()),
                status: Some(ReservationStatus::New),
                seating_time: Some(ts("2025-04-04T14:00:00+10:00")),
                end_time: Some(ts("2025-04-04T16:00:00+10:00")),
            }],
        }
    }

    #[test]
    fn test_entity_id_accepts_numbers_and_strings() {
        let ids: Vec<EntityId> = serde_json::from_str(r#"[1, "table-1"]"#).unwrap();
        assert_eq!(ids, vec![EntityId::Int(1), EntityId::Text("table-1".to_string())]);
        assert_eq!(ids[0].to_string(), "1");
        assert_eq!(ids[1].to_string(), "table-1");
    }

    #[test]
    fn test_order_status_open_ended() {
        let status: OrderStatus = serde_json::from_str(r#""Bill""#).unwrap();
        assert_eq!(status, OrderStatus::Bill);

        let status: OrderStatus = serde_json::from_str(r#""Refunded""#).unwrap();
        assert_eq!(status, OrderStatus::Other("Refunded".to_string()));
        assert_eq!(serde_json::to_string(&status).unwrap(), r#""Refunded""#);
    }

    #[test]
    fn test_reservation_status_labels() {
        let status: ReservationStatus = serde_json::from_str(r#""Живая очередь""#).unwrap();
        assert_eq!(status, ReservationStatus::WalkIn);
        assert_eq!(
            serde_json::to_string(&ReservationStatus::Request).unwrap(),
            r#""Заявка""#
        );
    }

    #[test]
    fn test_reservation_accepts_camel_case() {
        let json = r#"{
            "id": 7,
            "guestName": "Пётр",
            "partySize": 2,
            "phoneNumber": "+79990000000",
            "status": "Открыт",
            "seatingTime": "2025-04-04T18:00:00+10:00",
            "endTime": "2025-04-04T19:00:00+10:00"
        }"#;
        let reservation: Reservation = serde_json::from_str(json).unwrap();
        assert_eq!(reservation.guest_name.as_deref(), Some("Пётр"));
        assert_eq!(reservation.party_size, Some(2));
        assert_eq!(reservation.status, Some(ReservationStatus::Open));

        let out = serde_json::to_value(&reservation).unwrap();
        assert_eq!(out["name_for_reservation"], "Пётр");
        assert_eq!(out["num_people"], 2);
    }

    #[test]
    fn test_reservation_with_missing_fields() {
        let json = r#"{"id": 9, "num_people": "many", "seating_time": "18:00"}"#;
        let reservation: Reservation = serde_json::from_str(json).unwrap();
        assert_eq!(reservation.id, Some(EntityId::Int(9)));
        assert!(reservation.phone_number.is_none());
        assert!(reservation.guest_name.is_none());
        assert!(reservation.party_size.is_none());
        assert!(reservation.seating_time.is_none());

        let out = serde_json::to_value(&reservation).unwrap();
        assert_eq!(out, serde_json::json!({"id": 9}));
    }

    #[test]
    fn test_is_busy_at() {
        let table = table_with_bookings();
        assert!(table.is_busy_at(&ts("2025-04-04T12:00:00+10:00")));
        assert!(table.is_busy_at(&ts("2025-04-04T15:59:00+10:00")));
        // 13:30 is when the order ends
        assert!(!table.is_busy_at(&ts("2025-04-04T13:30:00+10:00")));
        assert!(!table.is_busy_at(&ts("2025-04-04T16:00:00+10:00")));
        // Same instant expressed in UTC
        assert!(table.is_busy_at(&ts("2025-04-04T04:00:00+00:00")));
    }

    #[test]
    fn test_is_busy_at_ignores_open_ended_bookings() {
        let mut table = table_with_bookings();
        table.orders[0].end_time = None;
        table.reservations[0].seating_time = None;
        assert!(!table.is_busy_at(&ts("2025-04-04T12:30:00+10:00")));
        assert!(!table.is_busy_at(&ts("2025-04-04T15:00:00+10:00")));
    }

    #[test]
    fn test_zones_in_first_seen_order() {
        let mut second = table_with_bookings();
        second.id = Some("table-2".into());
        second.zone = Some("Банкетный зал".to_string());
        let mut unzoned = table_with_bookings();
        unzoned.id = Some("table-3".into());
        unzoned.zone = None;

        let snapshot = BookingSnapshot {
            available_days: vec![],
            current_day: NaiveDate::from_ymd_opt(2025, 4, 4).unwrap(),
            restaurant: RestaurantInfo::default(),
            tables: vec![table_with_bookings(), second, unzoned, table_with_bookings()],
        };

        assert_eq!(snapshot.zones(), vec!["1 этаж", "Банкетный зал"]);
        assert_eq!(
            snapshot.table(&"table-2".into()).and_then(|t| t.zone.as_deref()),
            Some("Банкетный зал")
        );
        assert!(snapshot.table(&EntityId::Int(2)).is_none());
    }

    #[test]
    fn test_restaurant_time_slots() {
        let restaurant = RestaurantInfo {
            opening_time: "11:00".to_string(),
            closing_time: "12:00".to_string(),
            ..RestaurantInfo::default()
        };
        assert_eq!(
            restaurant.time_slots(30).unwrap(),
            vec!["11:00", "11:30", "12:00"]
        );
    }
}
