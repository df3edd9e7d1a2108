use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};

use crate::types::errors::TimestampError;

const SECONDS_PER_HOUR: i64 = 3_600;

//NOTE: The producer emits naive ISO-8601 strings (no offset) which are UTC by contract.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parses a wire timestamp into a UTC instant.
///
/// Values carrying an explicit offset (RFC 3339) are normalised to UTC, values without one
/// are interpreted as UTC. Fractional seconds are optional in both forms.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, TimestampError> {
    let value = value.trim();

    if value.is_empty() {
        return Err(TimestampError::Empty);
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(timestamp.with_timezone(&Utc));
    }

    NAIVE_FORMATS.iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| TimestampError::InvalidFormat { value: value.to_string() })
}

/// Truncates an instant down to the start of its epoch-aligned UTC hour.
pub fn hour_bucket(timestamp: &DateTime<Utc>) -> DateTime<Utc> {
    let seconds_into_hour = timestamp.timestamp().rem_euclid(SECONDS_PER_HOUR);
    let nanoseconds = i64::from(timestamp.timestamp_subsec_nanos());

    *timestamp - TimeDelta::seconds(seconds_into_hour) - TimeDelta::nanoseconds(nanoseconds)
}
