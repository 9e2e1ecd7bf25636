use jiff::{tz::TimeZone, Timestamp, ToSpan};
use meridian_core::{
    format_long, local_wire_to_utc, timestamp::to_local, utc_text_to_display, utc_to_local_wire,
    UtcOffset,
};

/// Independent rendering of the label format through jiff's zone machinery.
fn reference(ts: Timestamp, offset: UtcOffset) -> String {
    ts.to_zoned(TimeZone::fixed(offset.to_jiff()))
        .strftime("%A, %B %-d, %Y at %-I:%M %p")
        .to_string()
}

const BOUNDARIES: &[&str] = &[
    "2024-02-29T00:00:00Z",
    "2024-02-28T23:59:00Z",
    "2024-12-31T23:30:00Z",
    "2025-01-01T00:00:00Z",
    "2025-01-05T20:07:00Z",
    "2025-03-01T11:59:00Z",
    "2025-06-30T12:00:00Z",
    "2099-12-31T12:00:00Z",
];

#[test]
fn test_labels_match_reference_across_offsets() {
    for text in BOUNDARIES {
        let ts: Timestamp = text.parse().unwrap();
        for minutes in (UtcOffset::MIN_MINUTES..=UtcOffset::MAX_MINUTES).step_by(15) {
            let offset = UtcOffset::from_minutes(minutes).unwrap();
            assert_eq!(
                format_long(&to_local(ts, offset)),
                reference(ts, offset),
                "{text} at {offset}"
            );
        }
    }
}

#[test]
fn test_every_minute_of_a_day() {
    let start: Timestamp = "2025-01-05T00:00:00Z".parse().unwrap();
    let offset = UtcOffset::from_minutes(-300).unwrap();

    for minute in 0..(24 * 60) {
        let ts = start.checked_add(minute.minutes()).unwrap();
        assert_eq!(format_long(&to_local(ts, offset)), reference(ts, offset));
    }
}

#[test]
fn test_label_text_forms_agree() {
    let offset = UtcOffset::from_minutes(330).unwrap();
    let expected = "Monday, January 6, 2025 at 1:37 AM";

    for text in [
        "2025-01-05T20:07:00",
        "2025-01-05T20:07:00Z",
        "2025-01-05 20:07:00",
        "2025-01-05T20:07:00+00:00",
    ] {
        assert_eq!(utc_text_to_display(text, offset).unwrap(), expected, "{text}");
    }
}

#[test]
fn test_field_round_trip_at_every_offset() {
    let value = "2025-12-31T23:45";
    for minutes in UtcOffset::MIN_MINUTES..=UtcOffset::MAX_MINUTES {
        let offset = UtcOffset::from_minutes(minutes).unwrap();
        let local = utc_to_local_wire(value, offset).unwrap();
        let back = local_wire_to_utc(&local, offset).unwrap();
        assert_eq!(back.strftime("%Y-%m-%dT%H:%M").to_string(), value);
    }
}
