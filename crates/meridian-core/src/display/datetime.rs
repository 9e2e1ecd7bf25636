//! DateTime display utilities.
//!
//! This module provides the long-form, English-only rendering used for
//! read-only time labels, e.g. `Sunday, January 5, 2025 at 3:07 PM`.

use std::fmt;

use jiff::civil::DateTime;

const WEEKDAYS: [&str; 7] = [
    "Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday",
];

const MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

const HOURS_12: [&str; 12] = ["12", "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11"];

const MINUTES: [&str; 60] = [
    "00", "01", "02", "03", "04", "05", "06", "07", "08", "09", "10", "11", "12", "13", "14", "15",
    "16", "17", "18", "19", "20", "21", "22", "23", "24", "25", "26", "27", "28", "29", "30", "31",
    "32", "33", "34", "35", "36", "37", "38", "39", "40", "41", "42", "43", "44", "45", "46", "47",
    "48", "49", "50", "51", "52", "53", "54", "55", "56", "57", "58", "59",
];

/// A wrapper around a civil `DateTime` that renders the long label form via
/// the `Display` trait.
///
/// # Format
///
/// `<Weekday>, <Month> <Day>, <Year> at <Hour12>:<MM> <AM|PM>`
/// - Day and hour are not padded; minutes always are
/// - Midnight and noon both show hour `12`
/// - No timezone is rendered; the offset is applied before wrapping
///
/// ```rust
/// use jiff::civil::date;
/// use meridian_core::display::LongDateTime;
///
/// let dt = date(2025, 1, 5).at(15, 7, 0, 0);
/// assert_eq!(LongDateTime(&dt).to_string(), "Sunday, January 5, 2025 at 3:07 PM");
/// ```
pub struct LongDateTime<'a>(pub &'a DateTime);

impl<'a> fmt::Display for LongDateTime<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dt = self.0;
        // jiff keeps all of these in range, so the indexing cannot miss.
        let weekday = WEEKDAYS[dt.weekday().to_sunday_zero_offset() as usize];
        let month = MONTHS[(dt.month() - 1) as usize];
        let hour = HOURS_12[(dt.hour() % 12) as usize];
        let minute = MINUTES[dt.minute() as usize];
        let am_pm = if dt.hour() >= 12 { "PM" } else { "AM" };

        write!(
            f,
            "{weekday}, {month} {}, {} at {hour}:{minute} {am_pm}",
            dt.day(),
            dt.year()
        )
    }
}

/// Formats a civil date-time in the long label form.
pub fn format_long(datetime: &DateTime) -> String {
    LongDateTime(datetime).to_string()
}
