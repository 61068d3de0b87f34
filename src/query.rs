use chrono::{Days, Local, NaiveDate};
use serde_json::Value;

use crate::error::{FetchError, ValidationError};
use crate::exchange_rate::{ExchangeRateEntry, RateSnapshot};
use crate::privat::RateSource;

pub const MAX_DAY_OFFSET: i64 = 10;
const DATE_FORMAT: &str = "%d.%m.%Y";

/// Outcome of a single-day lookup.
#[derive(Debug)]
pub enum RateLookup {
    Found(RateSnapshot),
    NotFound,
    Failed(FetchError),
}

impl RateLookup {
    /// Collapses a failed fetch into "no data", reporting the error on the way.
    pub fn into_snapshot(self) -> Option<RateSnapshot> {
        match self {
            RateLookup::Found(snapshot) => Some(snapshot),
            RateLookup::NotFound => None,
            RateLookup::Failed(err) => {
                log::error!("{err}");
                log::debug!("Treating {} as no data", err.url());
                None
            }
        }
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn validate_day_offset(day_offset: i64) -> Result<u64, ValidationError> {
    if !(0..=MAX_DAY_OFFSET).contains(&day_offset) {
        return Err(ValidationError::DayOffsetOutOfRange(day_offset));
    }

    Ok(day_offset as u64)
}

pub fn date_for_offset(today: NaiveDate, day_offset: i64) -> Result<String, ValidationError> {
    let days = validate_day_offset(day_offset)?;
    let date = today
        .checked_sub_days(Days::new(days))
        .ok_or(ValidationError::DayOffsetOutOfRange(day_offset))?;

    Ok(format_date(date))
}

/// Fetches rates for `day_offset` days before today (local time).
pub async fn query_rates<S: RateSource>(
    source: &S,
    day_offset: i64,
) -> Result<RateLookup, ValidationError> {
    let today = Local::now().date_naive();
    query_rates_from(source, today, day_offset).await
}

pub async fn query_rates_from<S: RateSource>(
    source: &S,
    today: NaiveDate,
    day_offset: i64,
) -> Result<RateLookup, ValidationError> {
    let date = date_for_offset(today, day_offset)?;
    log::info!("Fetching exchange rates for {date}");

    let data = match source.fetch(&date).await {
        Ok(data) => data,
        Err(err) => return Ok(RateLookup::Failed(err)),
    };

    let snapshot = filter_rates(&date, &data);
    if snapshot.is_empty() {
        log::info!("No tracked currencies in response for {date}");
        Ok(RateLookup::NotFound)
    } else {
        Ok(RateLookup::Found(snapshot))
    }
}

/// Keeps tracked currencies from the provider's `exchangeRate` list.
pub fn filter_rates(date: &str, data: &Value) -> RateSnapshot {
    let mut snapshot = RateSnapshot::new(date);

    let Some(entries) = data.get("exchangeRate").and_then(Value::as_array) else {
        return snapshot;
    };

    for raw in entries {
        let entry: ExchangeRateEntry = match serde_json::from_value(raw.clone()) {
            Ok(entry) => entry,
            Err(err) => {
                log::warn!("Skipping unreadable rate entry {raw}: {err}");
                continue;
            }
        };

        if entry.is_tracked() {
            snapshot.insert(entry.currency.clone(), entry.rate());
        }
    }

    snapshot
}
