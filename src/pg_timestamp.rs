use std::fmt;

use crate::instant::Instant;

/// A timestamp the way the database itself models it: a finite instant or one
/// of the two open-ended infinity values.
///
/// This is the only calendar-less decode target besides [`Instant`] that can
/// hold `infinity`/`-infinity`, so it round-trips the wire sentinels without
/// any conversion flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PgTimestamp {
    NegInfinity,
    Value(Instant),
    PosInfinity,
}

impl PgTimestamp {
    /// Returns `true` for either infinity variant.
    #[inline]
    pub const fn is_infinite(&self) -> bool {
        matches!(self, PgTimestamp::NegInfinity | PgTimestamp::PosInfinity)
    }

    /// The finite instant, if any.
    #[inline]
    pub const fn value(&self) -> Option<Instant> {
        match self {
            PgTimestamp::Value(instant) => Some(*instant),
            _ => None,
        }
    }
}

impl From<Instant> for PgTimestamp {
    /// Maps the instant infinity markers onto the infinity variants and wraps
    /// everything else as a finite value.
    fn from(instant: Instant) -> Self {
        if instant == Instant::INFINITY {
            PgTimestamp::PosInfinity
        } else if instant == Instant::NEG_INFINITY {
            PgTimestamp::NegInfinity
        } else {
            PgTimestamp::Value(instant)
        }
    }
}

impl fmt::Display for PgTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PgTimestamp::NegInfinity => f.write_str("-infinity"),
            PgTimestamp::PosInfinity => f.write_str("infinity"),
            PgTimestamp::Value(instant) => instant.fmt(f),
        }
    }
}
