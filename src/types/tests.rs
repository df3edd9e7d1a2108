use super::{hour_bucket, parse_timestamp};
use anyhow::Result;
use chrono::{DateTime, Utc};

fn utc(value: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(value)?.with_timezone(&Utc))
}

#[test]
fn test_timestamp_successfully_parses_supported_forms() -> Result<()> {
    let test_cases = vec![
        ("2024-01-01T10:15:00Z", "2024-01-01T10:15:00+00:00"),
        ("2024-01-01T10:15:00", "2024-01-01T10:15:00+00:00"),
        ("2024-01-01T10:15:00.123456", "2024-01-01T10:15:00.123456+00:00"),
        ("2024-01-01 10:15:00", "2024-01-01T10:15:00+00:00"),
        ("2024-01-01T12:15:00+02:00", "2024-01-01T10:15:00+00:00"),
        ("  2024-01-01T10:15:00Z  ", "2024-01-01T10:15:00+00:00"),
    ];

    for (input_string, expected_output) in test_cases {
        assert_eq!(parse_timestamp(input_string)?.to_rfc3339(), expected_output);
    }

    Ok(())
}

#[test]
fn test_timestamp_fails_to_parse_invalid_strings() {
    assert!(parse_timestamp("").is_err());
    assert!(parse_timestamp("   ").is_err());
    assert!(parse_timestamp("yesterday").is_err());
    assert!(parse_timestamp("2024-13-01T10:15:00").is_err());
    assert!(parse_timestamp("2024-01-01").is_err());
    assert!(parse_timestamp("1704104100").is_err());
}

#[test]
fn test_hour_bucket_zeroes_minutes_seconds_and_fractions() -> Result<()> {
    let timestamp = parse_timestamp("2024-01-01T10:59:59.999999")?;

    assert_eq!(hour_bucket(&timestamp), utc("2024-01-01T10:00:00Z")?);

    Ok(())
}

#[test]
fn test_hour_bucket_keeps_exact_boundary_in_its_own_hour() -> Result<()> {
    assert_eq!(hour_bucket(&utc("2024-01-01T14:00:00Z")?), utc("2024-01-01T14:00:00Z")?);
    assert_eq!(hour_bucket(&utc("2024-01-01T13:59:59Z")?), utc("2024-01-01T13:00:00Z")?);

    Ok(())
}

#[test]
fn test_hour_bucket_is_aligned_to_utc_not_source_offset() -> Result<()> {
    // 10:30 at +05:30 is 05:00 UTC, a half-hour offset must not shift the bucket.
    let timestamp = parse_timestamp("2024-01-01T10:30:00+05:30")?;

    assert_eq!(hour_bucket(&timestamp), utc("2024-01-01T05:00:00Z")?);

    Ok(())
}

#[test]
fn test_hour_bucket_handles_instants_before_the_epoch() -> Result<()> {
    assert_eq!(hour_bucket(&utc("1969-12-31T23:30:00Z")?), utc("1969-12-31T23:00:00Z")?);

    Ok(())
}
