use crate::errors::{BookingError, BookingResult};

pub const DEFAULT_SLOT_INTERVAL_MINUTES: u32 = 30;

const MINUTES_PER_DAY: u32 = 24 * 60;

/// Bookable "HH:MM" slots from `opening_time` to `closing_time`, every
/// `interval_minutes`. The closing time is included only when it falls on a
/// slot boundary. A closing time earlier than the opening time is read as
/// belonging to the next day.
pub fn generate_time_slots(
    opening_time: &str,
    closing_time: &str,
    interval_minutes: u32,
) -> BookingResult<Vec<String>> {
    if interval_minutes == 0 {
        return Err(BookingError::InvalidInterval);
    }

    let start = parse_clock(opening_time)?;
    let mut end = parse_clock(closing_time)?;
    if end < start {
        end += MINUTES_PER_DAY;
    }

    let mut slots = Vec::new();
    let mut current = start;
    while current <= end {
        slots.push(format_clock(current));
        current = match current.checked_add(interval_minutes) {
            Some(next) => next,
            None => break,
        };
    }

    Ok(slots)
}

/// Minutes since midnight for an "HH:MM" string.
pub fn parse_clock(s: &str) -> BookingResult<u32> {
    let (hour, minute) = s
        .trim()
        .split_once(':')
        .ok_or_else(|| BookingError::InvalidTime(s.to_string()))?;
    let hour: u32 = hour
        .parse()
        .map_err(|_| BookingError::InvalidTime(s.to_string()))?;
    let minute: u32 = minute
        .parse()
        .map_err(|_| BookingError::InvalidTime(s.to_string()))?;
    if hour > 23 || minute > 59 {
        return Err(BookingError::InvalidTime(s.to_string()));
    }
    Ok(hour * 60 + minute)
}

fn format_clock(minutes: u32) -> String {
    let minutes = minutes % MINUTES_PER_DAY;
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}
