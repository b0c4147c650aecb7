//! Epoch arithmetic for the two PostgreSQL timestamp wire encodings.
//!
//! All wire offsets are relative to 2000-01-01T00:00:00 UTC. The legacy
//! floating-point encoding additionally routes its day arithmetic through the
//! proleptic-Gregorian era start (0001-01-01), which sits exactly
//! [`DAYS_FROM_ERA_TO_PG_EPOCH`] days before the 2000 epoch.
//!
//! Everything in this module is a pure function over scalars; buffer handling
//! and infinity sentinels live in [`codec`](crate::codec).

use crate::error::{CodecError, Result};
use crate::instant::Instant;

/// Days from 0001-01-01 to 2000-01-01 in the proleptic Gregorian calendar.
pub const DAYS_FROM_ERA_TO_PG_EPOCH: i64 = 730_119;

/// 2000-01-01T00:00:00 UTC in Unix seconds.
pub const PG_EPOCH_UNIX_SECS: i64 = 946_684_800;

pub const SECS_PER_DAY: i64 = 86_400;
pub const MICROS_PER_DAY: i64 = 86_400_000_000;
pub const NANOS_PER_DAY: i128 = 86_400_000_000_000;
pub const NANOS_PER_MICRO: i128 = 1_000;

/// Decodes an integer-format wire value: microseconds since the 2000 epoch.
///
/// Total over all of `i64`; the widening multiply to nanoseconds is exact.
#[inline]
pub fn decode_micros(value: i64) -> Instant {
    Instant::from_nanos(i128::from(value) * NANOS_PER_MICRO)
}

/// Encodes an instant as microseconds since the 2000 epoch, truncating
/// sub-microsecond nanoseconds toward zero.
///
/// Instants whose microsecond offset does not fit an `i64` are rejected with
/// [`CodecError::Overflow`]; the codec never wraps or saturates.
pub fn encode_micros(instant: Instant) -> Result<i64> {
    debug_assert!(instant.is_finite());
    let micros = instant.nanos() / NANOS_PER_MICRO;
    i64::try_from(micros).map_err(|_| {
        CodecError::Overflow(format!(
            "instant {instant} is outside the integer timestamp range"
        ))
    })
}

/// Decodes a legacy double-format wire value: seconds since the 2000 epoch.
///
/// This reconstructs calendar components from a single floating seconds
/// offset, the way servers compiled with floating-point datetimes encoded
/// them (removed in PostgreSQL 10). Truncation toward zero differs from floor
/// division for negative offsets, so the negative branch borrows a day and
/// complements the microsecond-of-day to re-base onto the start of the
/// preceding day.
///
/// Infinity sentinels are filtered by the dispatcher before this runs; NaN is
/// rejected as malformed since no deterministic calendar value exists for it.
pub fn decode_seconds(value: f64) -> Result<Instant> {
    if value.is_nan() {
        return Err(CodecError::Malformed(
            "NaN is not a valid timestamp seconds offset".into(),
        ));
    }
    if value.is_infinite() {
        return Err(CodecError::Unsupported(
            "infinite timestamp on the wire cannot be decoded as a finite instant".into(),
        ));
    }

    if value >= 0.0 {
        let date = (value as i64) / SECS_PER_DAY;
        let micros_of_day = ((value % SECS_PER_DAY as f64) * 1_000_000.0) as i64;
        Ok(from_era_days(
            date + DAYS_FROM_ERA_TO_PG_EPOCH,
            micros_of_day,
        ))
    } else {
        let value = -value;
        let mut date = (value as i64) / SECS_PER_DAY;
        let mut micros_of_day = ((value % SECS_PER_DAY as f64) * 1_000_000.0) as i64;
        if micros_of_day != 0 {
            // Borrow a day: a negative offset lands partway through the
            // preceding day, measured from that day's start.
            date += 1;
            micros_of_day = MICROS_PER_DAY - micros_of_day;
        }
        Ok(from_era_days(
            DAYS_FROM_ERA_TO_PG_EPOCH - date,
            micros_of_day,
        ))
    }
}

/// Encodes an instant as seconds since the 2000 epoch in the legacy double
/// format. Exact algebraic inverse of [`decode_seconds`]'s day/borrow
/// reconstruction.
///
/// Precision follows the IEEE double mantissa: ~1 µs near the epoch,
/// degrading for far dates. This matches the historical encoding and is not
/// bound-checked.
pub fn encode_seconds(instant: Instant) -> f64 {
    debug_assert!(instant.is_finite());
    let nanos_since_era =
        instant.nanos() + i128::from(DAYS_FROM_ERA_TO_PG_EPOCH) * NANOS_PER_DAY;
    let days_since_era = nanos_since_era.div_euclid(NANOS_PER_DAY);
    let second_of_day = nanos_since_era.rem_euclid(NANOS_PER_DAY) as f64 / 1_000_000_000.0;

    if days_since_era >= i128::from(DAYS_FROM_ERA_TO_PG_EPOCH) {
        let secs_date = (days_since_era - i128::from(DAYS_FROM_ERA_TO_PG_EPOCH)) as f64
            * SECS_PER_DAY as f64;
        secs_date + second_of_day
    } else {
        let secs_date = (i128::from(DAYS_FROM_ERA_TO_PG_EPOCH) - days_since_era) as f64
            * SECS_PER_DAY as f64;
        -(secs_date - second_of_day)
    }
}

/// Rebuilds an instant from a day count since the 0001-01-01 era start and a
/// microsecond-of-day.
fn from_era_days(days_since_era: i64, micros_of_day: i64) -> Instant {
    let days_from_epoch = days_since_era - DAYS_FROM_ERA_TO_PG_EPOCH;
    Instant::from_nanos(
        i128::from(days_from_epoch) * NANOS_PER_DAY + i128::from(micros_of_day) * NANOS_PER_MICRO,
    )
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> Instant {
        Instant::from_datetime_utc(Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap())
    }

    // ==================== constants ====================

    #[test]
    fn era_day_count_matches_the_proleptic_gregorian_calendar() {
        use chrono::NaiveDate;
        let era = NaiveDate::from_ymd_opt(1, 1, 1).unwrap();
        let epoch = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        assert_eq!(
            (epoch - era).num_days(),
            DAYS_FROM_ERA_TO_PG_EPOCH
        );
    }

    #[test]
    fn pg_epoch_unix_secs_is_correct() {
        // Days from 1970-01-01 to 2000-01-01 = 10957 days
        assert_eq!(PG_EPOCH_UNIX_SECS, 10_957 * SECS_PER_DAY);
    }

    // ==================== integer format ====================

    #[test]
    fn decode_micros_zero_is_the_epoch() {
        assert_eq!(decode_micros(0), Instant::PG_EPOCH);
        assert_eq!(decode_micros(0), utc(2000, 1, 1, 0, 0, 0));
    }

    #[test]
    fn decode_micros_one_day() {
        assert_eq!(decode_micros(MICROS_PER_DAY), utc(2000, 1, 2, 0, 0, 0));
    }

    #[test]
    fn decode_micros_negative_keeps_submillisecond_precision() {
        // -1 µs = 1999-12-31T23:59:59.999999
        assert_eq!(decode_micros(-1).nanos(), -1_000);
        let dt = decode_micros(-1).to_datetime_utc().unwrap();
        assert_eq!(dt.timestamp_subsec_nanos(), 999_999_000);
    }

    #[test]
    fn encode_micros_truncates_toward_zero() {
        assert_eq!(encode_micros(Instant::from_nanos(1_500)).unwrap(), 1);
        assert_eq!(encode_micros(Instant::from_nanos(-1_500)).unwrap(), -1);
        assert_eq!(encode_micros(Instant::from_nanos(999)).unwrap(), 0);
    }

    #[test]
    fn micros_roundtrip_is_exact() {
        for value in [
            0i64,
            1,
            -1,
            999,
            -999,
            MICROS_PER_DAY,
            -MICROS_PER_DAY,
            63_082_281_600_000_000,  // ~year 4000
            -62_135_596_800_000_000, // ~year 0031
            i64::MAX - 1,
            i64::MIN + 1,
        ] {
            assert_eq!(encode_micros(decode_micros(value)).unwrap(), value);
        }
    }

    #[test]
    fn encode_micros_overflow_is_an_error() {
        let instant = Instant::from_nanos((i128::from(i64::MAX) + 1) * 1_000);
        let err = encode_micros(instant).unwrap_err();
        assert!(err.is_overflow());
    }

    // ==================== double format ====================

    #[test]
    fn decode_seconds_zero_is_the_epoch() {
        assert_eq!(decode_seconds(0.0).unwrap(), utc(2000, 1, 1, 0, 0, 0));
    }

    #[test]
    fn decode_seconds_one_day_back() {
        assert_eq!(
            decode_seconds(-86_400.0).unwrap(),
            utc(1999, 12, 31, 0, 0, 0)
        );
    }

    #[test]
    fn decode_seconds_one_day_forward() {
        assert_eq!(decode_seconds(86_400.0).unwrap(), utc(2000, 1, 2, 0, 0, 0));
    }

    #[test]
    fn decode_seconds_negative_fraction_borrows_a_day() {
        // -0.5 s = 1999-12-31T23:59:59.5
        let instant = decode_seconds(-0.5).unwrap();
        assert_eq!(instant.nanos(), -500_000_000);
    }

    #[test]
    fn decode_seconds_positive_fraction() {
        let instant = decode_seconds(0.5).unwrap();
        assert_eq!(instant.nanos(), 500_000_000);
    }

    #[test]
    fn decode_seconds_rejects_nan_and_infinity() {
        assert!(decode_seconds(f64::NAN).unwrap_err().is_malformed());
        assert!(decode_seconds(f64::INFINITY).unwrap_err().is_unsupported());
        assert!(decode_seconds(f64::NEG_INFINITY)
            .unwrap_err()
            .is_unsupported());
    }

    #[test]
    fn encode_seconds_inverts_the_borrow() {
        assert_eq!(encode_seconds(Instant::from_nanos(-500_000_000)), -0.5);
        assert_eq!(encode_seconds(utc(1999, 12, 31, 0, 0, 0)), -86_400.0);
        assert_eq!(encode_seconds(utc(2000, 1, 2, 0, 0, 0)), 86_400.0);
        assert_eq!(encode_seconds(Instant::PG_EPOCH), 0.0);
    }

    #[test]
    fn seconds_roundtrip_within_a_microsecond_for_two_centuries() {
        // Whole-microsecond instants spread across ±200 years of the epoch.
        let two_hundred_years_secs = 200 * 365 * SECS_PER_DAY;
        let mut offset_secs = -two_hundred_years_secs;
        while offset_secs <= two_hundred_years_secs {
            for sub_micros in [0i64, 1, 499_999, 500_000, 999_999] {
                let original = Instant::from_nanos(
                    i128::from(offset_secs) * 1_000_000_000 + i128::from(sub_micros) * 1_000,
                );
                let roundtripped = decode_seconds(encode_seconds(original)).unwrap();
                let delta_nanos = (roundtripped.nanos() - original.nanos()).abs();
                assert!(
                    delta_nanos <= 1_000,
                    "offset {offset_secs}s + {sub_micros}µs drifted {delta_nanos}ns"
                );
            }
            offset_secs += 30_000_000 + 12_345; // ~once a year, misaligned on purpose
        }
    }

    #[test]
    fn seconds_roundtrip_exact_on_whole_days() {
        for days in [-400_000i64, -730_119, -1, 0, 1, 365, 400_000] {
            let original = Instant::from_nanos(i128::from(days) * NANOS_PER_DAY);
            assert_eq!(decode_seconds(encode_seconds(original)).unwrap(), original);
        }
    }
}
