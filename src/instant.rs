use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::epoch::PG_EPOCH_UNIX_SECS;
use crate::error::{CodecError, Result};

const NANOS_PER_SEC: i128 = 1_000_000_000;

/// An absolute point in time with nanosecond resolution.
///
/// Stored as a signed nanosecond offset from the PostgreSQL epoch
/// (2000-01-01T00:00:00 UTC). The range is effectively unbounded for calendar
/// purposes; the two extreme bit patterns are reserved as infinity markers
/// ([`Instant::INFINITY`] and [`Instant::NEG_INFINITY`]), matching the
/// database's `infinity`/`-infinity` timestamp literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Instant(i128);

impl Instant {
    /// Positive infinity marker (`infinity` in PostgreSQL text output).
    pub const INFINITY: Instant = Instant(i128::MAX);

    /// Negative infinity marker (`-infinity` in PostgreSQL text output).
    pub const NEG_INFINITY: Instant = Instant(i128::MIN);

    /// 2000-01-01T00:00:00 UTC, the zero point of all wire offsets.
    pub const PG_EPOCH: Instant = Instant(0);

    /// Constructs an instant from a nanosecond offset from the 2000 epoch.
    #[inline]
    pub const fn from_nanos(nanos: i128) -> Instant {
        Instant(nanos)
    }

    /// Nanosecond offset from the 2000 epoch.
    #[inline]
    pub const fn nanos(self) -> i128 {
        self.0
    }

    /// Returns `true` unless this is one of the two infinity markers.
    #[inline]
    pub const fn is_finite(self) -> bool {
        self.0 != i128::MAX && self.0 != i128::MIN
    }

    /// Converts to a UTC calendar date-time.
    ///
    /// Errors with [`CodecError::Unsupported`] for the infinity markers and
    /// [`CodecError::Overflow`] for finite instants outside chrono's
    /// representable range (roughly ±262,000 years).
    pub fn to_datetime_utc(self) -> Result<DateTime<Utc>> {
        if !self.is_finite() {
            return Err(CodecError::Unsupported(
                "infinite instant has no calendar representation".into(),
            ));
        }
        let unix_nanos = self.0 + i128::from(PG_EPOCH_UNIX_SECS) * NANOS_PER_SEC;
        let secs = i64::try_from(unix_nanos.div_euclid(NANOS_PER_SEC))
            .map_err(|_| self.calendar_overflow())?;
        let subsec = unix_nanos.rem_euclid(NANOS_PER_SEC) as u32;
        DateTime::from_timestamp(secs, subsec).ok_or_else(|| self.calendar_overflow())
    }

    /// Converts to a naive (zone-less) date-time on the UTC timeline.
    pub fn to_naive_utc(self) -> Result<NaiveDateTime> {
        self.to_datetime_utc().map(|dt| dt.naive_utc())
    }

    /// Exact conversion from a UTC calendar date-time.
    pub fn from_datetime_utc(dt: DateTime<Utc>) -> Instant {
        let unix_nanos =
            i128::from(dt.timestamp()) * NANOS_PER_SEC + i128::from(dt.timestamp_subsec_nanos());
        Instant(unix_nanos - i128::from(PG_EPOCH_UNIX_SECS) * NANOS_PER_SEC)
    }

    /// Exact conversion from a naive date-time, interpreted on the UTC timeline.
    pub fn from_naive_utc(dt: NaiveDateTime) -> Instant {
        Instant::from_datetime_utc(dt.and_utc())
    }

    fn calendar_overflow(self) -> CodecError {
        CodecError::Overflow(format!(
            "instant {} ns from 2000-01-01 is outside the calendar range",
            self.0
        ))
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Instant::INFINITY {
            return f.write_str("infinity");
        }
        if *self == Instant::NEG_INFINITY {
            return f.write_str("-infinity");
        }
        match self.to_datetime_utc() {
            Ok(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.f UTC")),
            Err(_) => write!(f, "{} ns from 2000-01-01", self.0),
        }
    }
}
