//! Parsing server-emitted UTC timestamps and converting them to local time.
//!
//! The server renders times as ISO-8601-like text in UTC. Labels may carry
//! seconds and fractions (`2025-01-05 20:07:00.123456`); datetime-local
//! inputs carry the `YYYY-MM-DDTHH:MM` wire format.

use jiff::{
    civil::{Date, DateTime},
    tz, Timestamp,
};

use crate::{
    display::LongDateTime,
    error::{MeridianError, Result},
    offset::UtcOffset,
};

/// `strftime`/`strptime` pattern of a datetime-local input value.
pub const WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Parses text as a UTC instant.
///
/// Accepts, after trimming:
/// - an instant with an explicit offset or `Z` (`2025-01-05T20:07:00Z`)
/// - a civil date-time with `T` or space separator, taken as UTC
/// - a bare date, taken as midnight UTC
pub fn parse_utc(text: &str) -> Result<Timestamp> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(MeridianError::invalid_timestamp(text).with_reason("empty text"));
    }

    if let Ok(timestamp) = trimmed.parse::<Timestamp>() {
        return Ok(timestamp);
    }

    let datetime = match trimmed.parse::<DateTime>() {
        Ok(datetime) => datetime,
        Err(err) => match trimmed.parse::<Date>() {
            Ok(date) => date.to_datetime(jiff::civil::Time::midnight()),
            Err(_) => return Err(MeridianError::invalid_timestamp(text).with_reason(err)),
        },
    };

    tz::Offset::UTC
        .to_timestamp(datetime)
        .map_err(|e| MeridianError::invalid_timestamp(text).with_reason(e))
}

/// Civil date-time of `timestamp` as seen at `offset`.
pub fn to_local(timestamp: Timestamp, offset: UtcOffset) -> DateTime {
    offset.to_jiff().to_datetime(timestamp)
}

/// Parses a `YYYY-MM-DDTHH:MM` wire value.
pub fn parse_wire(value: &str) -> Result<DateTime> {
    DateTime::strptime(WIRE_FORMAT, value.trim())
        .map_err(|e| MeridianError::invalid_timestamp(value).with_reason(e))
}

/// Renders a civil date-time in the `YYYY-MM-DDTHH:MM` wire format.
pub fn format_wire(datetime: DateTime) -> String {
    datetime.strftime(WIRE_FORMAT).to_string()
}

/// Turns label text holding a UTC time into local long-form text.
pub fn utc_text_to_display(text: &str, offset: UtcOffset) -> Result<String> {
    let local = to_local(parse_utc(text)?, offset);
    Ok(LongDateTime(&local).to_string())
}

/// Turns a stored UTC field value into the local wire value to display.
///
/// The stored value is normally in wire format already; anything else
/// [`parse_utc`] accepts is tolerated.
pub fn utc_to_local_wire(value: &str, offset: UtcOffset) -> Result<String> {
    let timestamp = match parse_wire(value) {
        Ok(datetime) => tz::Offset::UTC
            .to_timestamp(datetime)
            .map_err(|e| MeridianError::invalid_timestamp(value).with_reason(e))?,
        Err(_) => parse_utc(value)?,
    };
    Ok(format_wire(to_local(timestamp, offset)))
}

/// Converts a submitted local wire value back to UTC.
///
/// This is the server's half of the contract: whatever
/// [`utc_to_local_wire`] displayed comes back through here unchanged.
pub fn local_wire_to_utc(value: &str, offset: UtcOffset) -> Result<DateTime> {
    let local = parse_wire(value)?;
    let timestamp = offset
        .to_jiff()
        .to_timestamp(local)
        .map_err(|e| MeridianError::invalid_timestamp(value).with_reason(e))?;
    Ok(tz::Offset::UTC.to_datetime(timestamp))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    fn offset(minutes: i32) -> UtcOffset {
        UtcOffset::from_minutes(minutes).unwrap()
    }

    #[test]
    fn test_parse_utc_accepts_server_formats() {
        let expected: Timestamp = "2025-01-05T20:07:00Z".parse().unwrap();

        assert_eq!(parse_utc("2025-01-05T20:07:00").unwrap(), expected);
        assert_eq!(parse_utc("  2025-01-05 20:07:00\n").unwrap(), expected);
        assert_eq!(parse_utc("2025-01-05T20:07").unwrap(), expected);
        assert_eq!(parse_utc("2025-01-05T15:07:00-05:00").unwrap(), expected);
        assert_eq!(
            parse_utc("2025-01-05").unwrap(),
            "2025-01-05T00:00:00Z".parse::<Timestamp>().unwrap()
        );
    }

    #[test]
    fn test_parse_utc_rejects_garbage() {
        for bad in ["not-a-date", "", "   ", "2025-13-01T00:00", "Sunday, January 5, 2025 at 3:07 PM"] {
            assert!(
                matches!(parse_utc(bad), Err(MeridianError::InvalidTimestamp { .. })),
                "expected {bad:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_label_example_utc_minus_five() {
        assert_eq!(
            utc_text_to_display("2025-01-05T20:07:00", offset(-300)).unwrap(),
            "Sunday, January 5, 2025 at 3:07 PM"
        );
    }

    #[test]
    fn test_field_example_utc_plus_one() {
        assert_eq!(
            utc_to_local_wire("2025-06-01T00:00", offset(60)).unwrap(),
            "2025-06-01T01:00"
        );
    }

    #[test]
    fn test_wire_crosses_day_and_year() {
        assert_eq!(
            utc_to_local_wire("2024-12-31T23:59", offset(1)).unwrap(),
            "2025-01-01T00:00"
        );
        assert_eq!(
            utc_to_local_wire("2025-01-01T00:00", offset(-1)).unwrap(),
            "2024-12-31T23:59"
        );
        assert_eq!(
            utc_to_local_wire("2024-02-28T20:00", offset(300)).unwrap(),
            "2024-02-29T01:00"
        );
    }

    #[test]
    fn test_wire_drops_seconds() {
        assert_eq!(
            utc_to_local_wire("2025-06-01T00:00:59Z", offset(0)).unwrap(),
            "2025-06-01T00:00"
        );
    }

    #[test]
    fn test_local_wire_to_utc_reverses() {
        assert_eq!(
            local_wire_to_utc("2025-06-01T01:00", offset(60)).unwrap(),
            date(2025, 6, 1).at(0, 0, 0, 0)
        );
        assert!(local_wire_to_utc("2025-06-01 01:00", offset(60)).is_err());
    }

    #[test]
    fn test_round_trip_every_offset() {
        let stored = "2024-02-29T23:30";
        for minutes in UtcOffset::MIN_MINUTES..=UtcOffset::MAX_MINUTES {
            let offset = offset(minutes);
            let local = utc_to_local_wire(stored, offset).unwrap();
            let back = local_wire_to_utc(&local, offset).unwrap();
            assert_eq!(format_wire(back), stored, "drift at offset {minutes}");
        }
    }
}
