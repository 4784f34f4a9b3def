use std::fmt;

use chrono::{
    DateTime, Datelike, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone, Utc, Weekday,
};
use chrono_tz::Tz;

use crate::errors::{BookingError, BookingResult};

pub const DEFAULT_UTC_OFFSET: &str = "+10:00";

const WEEKDAYS_SHORT: [&str; 7] = ["пн", "вт", "ср", "чт", "пт", "сб", "вс"];
const WEEKDAYS_LONG: [&str; 7] = [
    "понедельник",
    "вторник",
    "среда",
    "четверг",
    "пятница",
    "суббота",
    "воскресенье",
];
const MONTHS_SHORT: [&str; 12] = [
    "янв.", "февр.", "мар.", "апр.", "мая", "июн.", "июл.", "авг.", "сент.", "окт.", "нояб.",
    "дек.",
];
const MONTHS_LONG: [&str; 12] = [
    "января", "февраля", "марта", "апреля", "мая", "июня", "июля", "августа", "сентября",
    "октября", "ноября", "декабря",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextStyle {
    Short,
    Long,
}

/// Which parts of a date to render. `None`/`false` leaves the part out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateFormatOptions {
    pub weekday: Option<TextStyle>,
    pub day: bool,
    pub month: Option<TextStyle>,
    pub year: bool,
}

impl Default for DateFormatOptions {
    fn default() -> Self {
        Self {
            weekday: Some(TextStyle::Short),
            day: true,
            month: Some(TextStyle::Short),
            year: false,
        }
    }
}

/// Renders a date string in Russian, e.g. `"пт, 4 апр."` with default options.
pub fn format_date(date: &str, options: &DateFormatOptions) -> BookingResult<String> {
    let parsed =
        parse_calendar_date(date).ok_or_else(|| BookingError::InvalidDate(date.to_string()))?;
    Ok(format_naive_date(parsed, options))
}

pub fn format_naive_date(date: NaiveDate, options: &DateFormatOptions) -> String {
    let mut parts: Vec<String> = Vec::new();
    if options.day {
        parts.push(date.day().to_string());
    }
    if let Some(style) = options.month {
        let index = date.month0() as usize;
        parts.push(match style {
            TextStyle::Short => MONTHS_SHORT[index].to_string(),
            TextStyle::Long => MONTHS_LONG[index].to_string(),
        });
    }
    if options.year {
        parts.push(format!("{} г.", date.year()));
    }
    let body = parts.join(" ");

    match options.weekday.map(|style| weekday_name(date.weekday(), style)) {
        Some(weekday) if body.is_empty() => weekday.to_string(),
        Some(weekday) => format!("{weekday}, {body}"),
        None => body,
    }
}

fn weekday_name(weekday: Weekday, style: TextStyle) -> &'static str {
    let index = weekday.num_days_from_monday() as usize;
    match style {
        TextStyle::Short => WEEKDAYS_SHORT[index],
        TextStyle::Long => WEEKDAYS_LONG[index],
    }
}

/// True when both inputs name the same calendar day. Each input is read in the
/// offset it carries, not the host's local zone, so `2025-04-04T23:30:00+10:00`
/// and `2025-04-04T01:00:00Z` match. Time of day is ignored. Unparseable input
/// never matches.
pub fn is_same_day(a: &str, b: &str) -> bool {
    match (parse_calendar_date(a), parse_calendar_date(b)) {
        (Some(a), Some(b)) => {
            a.year() == b.year() && a.month() == b.month() && a.day() == b.day()
        }
        _ => false,
    }
}

/// Calendar date of `YYYY-MM-DD`, RFC 3339, or naive `YYYY-MM-DDTHH:MM[:SS]` input.
pub fn parse_calendar_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
}

/// Wall-clock `HH:MM:SS` in the restaurant's timezone, falling back to local time
/// when the zone is unknown.
pub fn current_restaurant_time(timezone: &str) -> String {
    match restaurant_time_at(timezone, Utc::now()) {
        Ok(time) => time,
        Err(err) => {
            tracing::warn!("failed to resolve restaurant time, using local time: {err}");
            Local::now().format("%H:%M:%S").to_string()
        }
    }
}

pub fn restaurant_time_at(timezone: &str, now: DateTime<Utc>) -> BookingResult<String> {
    let tz: Tz = timezone
        .parse()
        .map_err(|_| BookingError::Timezone(timezone.to_string()))?;
    Ok(now.with_timezone(&tz).format("%H:%M:%S").to_string())
}

/// Absolute timestamp for a slot on `date`, e.g. `2025-04-04` + `"14:30"` at `+10:00`.
pub fn time_slot_to_date(
    date: impl fmt::Display,
    time_slot: &str,
    utc_offset: &str,
) -> BookingResult<DateTime<FixedOffset>> {
    let iso = format!("{date}T{time_slot}:00{utc_offset}");
    DateTime::parse_from_rfc3339(&iso).map_err(|_| BookingError::InvalidTime(iso))
}

/// `HH:MM` of `timestamp` in its own offset. Convert with `with_timezone` first
/// to show it in another zone; the host's local zone is never consulted.
pub fn format_time<Z: TimeZone>(timestamp: &DateTime<Z>) -> String
where
    Z::Offset: fmt::Display,
{
    timestamp.format("%H:%M").to_string()
}
