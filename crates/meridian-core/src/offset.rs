//! Visitor timezone offsets and where they come from.
//!
//! [`UtcOffset`] counts minutes **east** of UTC, so `local = utc + offset`
//! (UTC-5 is `-300`). Browsers report `Date.getTimezoneOffset()` with the
//! opposite sign (`utc - local`, UTC-5 is `300`), and the server's
//! `timezone_offset` form field carries that browser value; use
//! [`UtcOffset::from_browser_minutes`] and [`UtcOffset::browser_minutes`] at
//! those edges.

use std::cell::Cell;
use std::fmt;
use std::str::FromStr;

use jiff::{tz, tz::TimeZone, Timestamp};
use serde::{Deserialize, Serialize};

use crate::error::{MeridianError, Result};

/// Signed minutes east of UTC, within UTC-12:00..=UTC+14:00.
///
/// The matching `jiff` offset is built once on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct UtcOffset {
    minutes: i32,
    jiff: tz::Offset,
}

impl UtcOffset {
    /// Westernmost supported offset (UTC-12:00).
    pub const MIN_MINUTES: i32 = -720;
    /// Easternmost supported offset (UTC+14:00).
    pub const MAX_MINUTES: i32 = 840;

    pub const UTC: UtcOffset = UtcOffset {
        minutes: 0,
        jiff: tz::Offset::UTC,
    };

    /// Creates an offset from minutes east of UTC.
    pub fn from_minutes(minutes: i32) -> Result<Self> {
        if !(Self::MIN_MINUTES..=Self::MAX_MINUTES).contains(&minutes) {
            return Err(MeridianError::OffsetOutOfRange { minutes });
        }
        let jiff = tz::Offset::from_seconds(minutes * 60)
            .map_err(|_| MeridianError::OffsetOutOfRange { minutes })?;
        Ok(Self { minutes, jiff })
    }

    /// Creates an offset from a browser `getTimezoneOffset()` value.
    pub fn from_browser_minutes(minutes: i32) -> Result<Self> {
        Self::from_minutes(-minutes)
    }

    /// Minutes east of UTC.
    pub fn minutes(self) -> i32 {
        self.minutes
    }

    /// The value a browser's `getTimezoneOffset()` would report.
    pub fn browser_minutes(self) -> i32 {
        -self.minutes
    }

    /// The equivalent `jiff` offset.
    pub fn to_jiff(self) -> tz::Offset {
        self.jiff
    }

    /// Converts a `jiff` offset, rejecting ones with leftover seconds.
    pub fn from_jiff(offset: tz::Offset) -> Result<Self> {
        let seconds = offset.seconds();
        if seconds % 60 != 0 {
            return Err(MeridianError::OffsetUnavailable(format!(
                "offset {offset} is not a whole number of minutes"
            )));
        }
        Self::from_minutes(seconds / 60)
    }
}

impl TryFrom<i32> for UtcOffset {
    type Error = MeridianError;

    fn try_from(minutes: i32) -> Result<Self> {
        Self::from_minutes(minutes)
    }
}

impl From<UtcOffset> for i32 {
    fn from(offset: UtcOffset) -> Self {
        offset.minutes
    }
}

impl FromStr for UtcOffset {
    type Err = MeridianError;

    fn from_str(s: &str) -> Result<Self> {
        let minutes = s.trim().parse::<i32>().map_err(|e| {
            MeridianError::invalid_input("offset").with_reason(format!("'{s}': {e}"))
        })?;
        Self::from_minutes(minutes)
    }
}

impl fmt::Display for UtcOffset {
    /// Renders as `UTC+HH:MM` / `UTC-HH:MM`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.minutes < 0 { '-' } else { '+' };
        let abs = self.minutes.unsigned_abs();
        write!(f, "UTC{sign}{:02}:{:02}", abs / 60, abs % 60)
    }
}

/// Supplies the visitor's offset for one page run.
pub trait OffsetSource {
    fn resolve(&self) -> Result<UtcOffset>;
}

/// A known offset.
#[derive(Debug, Clone, Copy)]
pub struct FixedOffset(pub UtcOffset);

impl OffsetSource for FixedOffset {
    fn resolve(&self) -> Result<UtcOffset> {
        Ok(self.0)
    }
}

/// A raw `getTimezoneOffset()` reading, validated on resolve.
#[derive(Debug, Clone, Copy)]
pub struct BrowserOffset(pub i32);

impl OffsetSource for BrowserOffset {
    fn resolve(&self) -> Result<UtcOffset> {
        UtcOffset::from_browser_minutes(self.0)
    }
}

/// The host's current offset from its configured time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemOffset;

impl OffsetSource for SystemOffset {
    fn resolve(&self) -> Result<UtcOffset> {
        let zone = TimeZone::try_system()
            .map_err(|e| MeridianError::OffsetUnavailable(e.to_string()))?;
        UtcOffset::from_jiff(Timestamp::now().to_zoned(zone).offset())
    }
}

impl<S: OffsetSource + ?Sized> OffsetSource for &S {
    fn resolve(&self) -> Result<UtcOffset> {
        (**self).resolve()
    }
}

impl<S: OffsetSource + ?Sized> OffsetSource for Box<S> {
    fn resolve(&self) -> Result<UtcOffset> {
        (**self).resolve()
    }
}

/// Resolves the inner source at most once; failures are retried.
#[derive(Debug)]
pub struct CachedOffset<S> {
    source: S,
    resolved: Cell<Option<UtcOffset>>,
}

impl<S: OffsetSource> CachedOffset<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            resolved: Cell::new(None),
        }
    }

    /// The offset, if a previous `resolve` succeeded.
    pub fn get(&self) -> Option<UtcOffset> {
        self.resolved.get()
    }
}

impl<S: OffsetSource> OffsetSource for CachedOffset<S> {
    fn resolve(&self) -> Result<UtcOffset> {
        if let Some(offset) = self.resolved.get() {
            return Ok(offset);
        }
        let offset = self.source.resolve()?;
        log::debug!("resolved visitor offset {offset}");
        self.resolved.set(Some(offset));
        Ok(offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_bounds() {
        assert!(UtcOffset::from_minutes(-720).is_ok());
        assert!(UtcOffset::from_minutes(840).is_ok());
        assert!(matches!(
            UtcOffset::from_minutes(-721),
            Err(MeridianError::OffsetOutOfRange { minutes: -721 })
        ));
        assert!(UtcOffset::from_minutes(841).is_err());
    }

    #[test]
    fn test_browser_convention_is_negated() {
        // New York in winter: the browser reports 300.
        let offset = UtcOffset::from_browser_minutes(300).unwrap();
        assert_eq!(offset.minutes(), -300);
        assert_eq!(offset.browser_minutes(), 300);
        assert_eq!(BrowserOffset(-60).resolve().unwrap().minutes(), 60);
    }

    #[test]
    fn test_display() {
        assert_eq!(UtcOffset::from_minutes(-300).unwrap().to_string(), "UTC-05:00");
        assert_eq!(UtcOffset::from_minutes(330).unwrap().to_string(), "UTC+05:30");
        assert_eq!(UtcOffset::UTC.to_string(), "UTC+00:00");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("-300".parse::<UtcOffset>().unwrap().minutes(), -300);
        assert!(matches!(
            "east".parse::<UtcOffset>(),
            Err(MeridianError::InvalidInput { .. })
        ));
        assert!(matches!(
            "2000".parse::<UtcOffset>(),
            Err(MeridianError::OffsetOutOfRange { .. })
        ));
    }

    #[test]
    fn test_jiff_conversion() {
        let offset = UtcOffset::from_minutes(345).unwrap();
        assert_eq!(offset.to_jiff().seconds(), 345 * 60);
        assert_eq!(UtcOffset::from_jiff(offset.to_jiff()).unwrap(), offset);
        assert_eq!(UtcOffset::UTC.to_jiff(), tz::Offset::UTC);

        for minutes in [UtcOffset::MIN_MINUTES, -1, 1, UtcOffset::MAX_MINUTES] {
            let offset = UtcOffset::from_minutes(minutes).unwrap();
            assert_eq!(offset.to_jiff().seconds(), minutes * 60);
        }

        let odd = tz::Offset::from_seconds(61).unwrap();
        assert!(matches!(
            UtcOffset::from_jiff(odd),
            Err(MeridianError::OffsetUnavailable(_))
        ));
    }

    #[test]
    fn test_serde_validates_range() {
        let offset: UtcOffset = serde_json::from_str("60").unwrap();
        assert_eq!(offset.minutes(), 60);
        assert!(serde_json::from_str::<UtcOffset>("9999").is_err());
    }

    struct Counting {
        calls: Cell<u32>,
        result: Option<i32>,
    }

    impl OffsetSource for Counting {
        fn resolve(&self) -> Result<UtcOffset> {
            self.calls.set(self.calls.get() + 1);
            match self.result {
                Some(minutes) => UtcOffset::from_minutes(minutes),
                None => Err(MeridianError::OffsetUnavailable("no clock".to_string())),
            }
        }
    }

    #[test]
    fn test_cached_offset_resolves_once() {
        let cached = CachedOffset::new(Counting {
            calls: Cell::new(0),
            result: Some(120),
        });
        assert_eq!(cached.get(), None);
        assert_eq!(cached.resolve().unwrap().minutes(), 120);
        assert_eq!(cached.resolve().unwrap().minutes(), 120);
        assert_eq!(cached.source.calls.get(), 1);
        assert_eq!(cached.get().map(UtcOffset::minutes), Some(120));
    }

    #[test]
    fn test_cached_offset_retries_failures() {
        let cached = CachedOffset::new(Counting {
            calls: Cell::new(0),
            result: None,
        });
        assert!(cached.resolve().is_err());
        assert!(cached.resolve().is_err());
        assert_eq!(cached.source.calls.get(), 2);
    }

    #[test]
    fn test_system_offset_resolves() {
        // Whatever the host zone is, it must be inside the supported range.
        if let Ok(offset) = SystemOffset.resolve() {
            assert!((UtcOffset::MIN_MINUTES..=UtcOffset::MAX_MINUTES).contains(&offset.minutes()));
        }
    }
}
