use anyhow::Context;
use chrono::NaiveDate;
use tracing_subscriber::EnvFilter;

use tablebook::config::AppConfig;
use tablebook::services::dates::{self, DateFormatOptions};
use tablebook::services::provider::build_provider;
use tablebook::services::timeslots::DEFAULT_SLOT_INTERVAL_MINUTES;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let date = std::env::args()
        .nth(1)
        .map(|arg| {
            NaiveDate::parse_from_str(&arg, "%Y-%m-%d")
                .with_context(|| format!("expected a date like 2025-04-04, got {arg:?}"))
        })
        .transpose()?;

    let provider = build_provider(&config)?;
    let snapshot = provider.fetch_booking_data(date).await?;
    let restaurant = &snapshot.restaurant;

    println!(
        "{} (#{}), {}, now {}",
        restaurant.name,
        restaurant.id,
        dates::format_naive_date(snapshot.current_day, &DateFormatOptions::default()),
        dates::current_restaurant_time(&restaurant.timezone),
    );

    let days: Vec<String> = snapshot
        .available_days
        .iter()
        .map(|d| dates::format_naive_date(*d, &DateFormatOptions::default()))
        .collect();
    println!("bookable days: {}", days.join(" | "));

    let slots = restaurant.time_slots(DEFAULT_SLOT_INTERVAL_MINUTES)?;
    for zone in snapshot.zones() {
        println!("\n[{zone}]");
        let in_zone = snapshot
            .tables
            .iter()
            .filter(|t| t.zone.as_deref() == Some(zone));
        for table in in_zone {
            let mut row = String::with_capacity(slots.len());
            for slot in &slots {
                let at = dates::time_slot_to_date(
                    snapshot.current_day,
                    slot,
                    &config.restaurant_utc_offset,
                )?;
                row.push(if table.is_busy_at(&at) { '#' } else { '.' });
            }
            let number = table.number.as_deref().unwrap_or("?");
            let seats = table
                .capacity
                .map_or_else(|| "?".to_string(), |c| c.to_string());
            println!("  table {number:>3} ({seats:>2} seats) {row}");
        }
    }

    Ok(())
}
