//! Format dispatcher and multi-target adapter.
//!
//! A single [`TimestampCodec`], parameterized by an immutable
//! [`CodecConfig`], reads and writes the 8-byte timestamp scalar in either
//! wire format and adapts it to four target shapes:
//!
//! - [`Instant`] - absolute instant, carries infinity markers
//! - [`NaiveDateTime`] - zone-less local date-time, no infinity
//! - [`DateTime<Utc>`] - calendar date-time pinned to UTC, no infinity
//! - [`PgTimestamp`] - the database-native shape, infinity built in
//!
//! # Infinity sentinels
//!
//! On the wire, `infinity`/`-infinity` appear as `i64::MAX`/`i64::MIN`
//! (integer format) or IEEE `±inf` (double format). With
//! `convert_infinity = true` they map to the target's infinity
//! representation; shapes without one reject them regardless of the flag.
//! With `convert_infinity = false` the integer patterns are read as ordinary
//! (far-future/far-past) offsets, sentinels are never written, and
//! [`PgTimestamp`] still surfaces wire infinities as its own variants since
//! no conversion is involved for that shape.

use bytes::{Buf, BufMut};
use chrono::{DateTime, NaiveDateTime, Utc};

use crate::config::CodecConfig;
use crate::epoch;
use crate::error::{CodecError, Result};
use crate::instant::Instant;
use crate::pg_timestamp::PgTimestamp;
use crate::wire;

/// The four in-memory shapes a decoded timestamp can be materialized into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetShape {
    AbsoluteInstant,
    LocalNoZone,
    CalendarUtc,
    NativeDateTime,
}

impl TargetShape {
    /// Human-readable name of the in-memory type backing this shape.
    pub const fn name(self) -> &'static str {
        match self {
            TargetShape::AbsoluteInstant => "Instant",
            TargetShape::LocalNoZone => "NaiveDateTime",
            TargetShape::CalendarUtc => "DateTime<Utc>",
            TargetShape::NativeDateTime => "PgTimestamp",
        }
    }

    /// Whether the shape can hold `infinity`/`-infinity`.
    pub const fn supports_infinity(self) -> bool {
        matches!(
            self,
            TargetShape::AbsoluteInstant | TargetShape::NativeDateTime
        )
    }
}

/// A decoded timestamp, tagged by target shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimestampValue {
    Instant(Instant),
    LocalNoZone(NaiveDateTime),
    CalendarUtc(DateTime<Utc>),
    Native(PgTimestamp),
}

impl TimestampValue {
    /// The shape this value was decoded into.
    pub const fn shape(&self) -> TargetShape {
        match self {
            TimestampValue::Instant(_) => TargetShape::AbsoluteInstant,
            TimestampValue::LocalNoZone(_) => TargetShape::LocalNoZone,
            TimestampValue::CalendarUtc(_) => TargetShape::CalendarUtc,
            TimestampValue::Native(_) => TargetShape::NativeDateTime,
        }
    }
}

/// One raw 8-byte scalar as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq)]
enum WireScalar {
    /// Integer format: microseconds since 2000-01-01T00:00:00 UTC.
    Micros(i64),
    /// Legacy double format: seconds since 2000-01-01T00:00:00 UTC.
    Seconds(f64),
}

impl WireScalar {
    /// `Some(positive)` if this bit pattern is an infinity sentinel.
    fn infinity(self) -> Option<bool> {
        match self {
            WireScalar::Micros(i64::MAX) => Some(true),
            WireScalar::Micros(i64::MIN) => Some(false),
            WireScalar::Seconds(value) if value.is_infinite() => Some(value > 0.0),
            _ => None,
        }
    }

    /// Arithmetic decode, without sentinel interpretation.
    ///
    /// The integer patterns always decode (they are valid offsets); a double
    /// infinity has no finite decode and is rejected inside
    /// [`epoch::decode_seconds`].
    fn decode(self) -> Result<Instant> {
        match self {
            WireScalar::Micros(value) => Ok(epoch::decode_micros(value)),
            WireScalar::Seconds(value) => epoch::decode_seconds(value),
        }
    }
}

/// Stateless timestamp codec for one negotiated wire configuration.
///
/// Purely functional: safe to share and call concurrently on independent
/// buffers. Construct once per connection/type registration via
/// [`TimestampCodec::new`] and register the per-shape read/write pairs against
/// the four target types.
#[derive(Debug, Clone, Copy)]
pub struct TimestampCodec {
    cfg: CodecConfig,
}

impl TimestampCodec {
    pub const fn new(cfg: CodecConfig) -> Self {
        Self { cfg }
    }

    pub const fn config(&self) -> CodecConfig {
        self.cfg
    }

    /// Wire length of every timestamp value: always 8 bytes, both formats,
    /// all shapes, infinity included.
    pub const fn wire_len(&self) -> usize {
        wire::WIRE_LEN
    }

    // ==================== read path ====================

    /// Decodes into the shape selected at runtime.
    pub fn decode(&self, buf: &mut impl Buf, shape: TargetShape) -> Result<TimestampValue> {
        match shape {
            TargetShape::AbsoluteInstant => self.read_instant(buf).map(TimestampValue::Instant),
            TargetShape::LocalNoZone => self.read_local(buf).map(TimestampValue::LocalNoZone),
            TargetShape::CalendarUtc => self.read_calendar_utc(buf).map(TimestampValue::CalendarUtc),
            TargetShape::NativeDateTime => self.read_native(buf).map(TimestampValue::Native),
        }
    }

    /// Reads an absolute instant.
    ///
    /// With `convert_infinity` set, wire sentinels become
    /// [`Instant::INFINITY`]/[`Instant::NEG_INFINITY`]; otherwise the raw
    /// scalar is decoded arithmetically (an error for double infinities,
    /// which have no finite decode).
    pub fn read_instant(&self, buf: &mut impl Buf) -> Result<Instant> {
        let scalar = self.read_scalar(buf)?;
        if self.cfg.convert_infinity {
            match scalar.infinity() {
                Some(true) => return Ok(Instant::INFINITY),
                Some(false) => return Ok(Instant::NEG_INFINITY),
                None => {}
            }
        }
        scalar.decode()
    }

    /// Reads a zone-less local date-time. Infinity sentinels are always an
    /// error for this shape, whatever `convert_infinity` says.
    pub fn read_local(&self, buf: &mut impl Buf) -> Result<NaiveDateTime> {
        let scalar = self.read_scalar(buf)?;
        if scalar.infinity().is_some() {
            return Err(infinity_unsupported(TargetShape::LocalNoZone));
        }
        scalar.decode()?.to_naive_utc()
    }

    /// Reads a UTC calendar date-time. Infinity sentinels are always an
    /// error for this shape, whatever `convert_infinity` says.
    pub fn read_calendar_utc(&self, buf: &mut impl Buf) -> Result<DateTime<Utc>> {
        let scalar = self.read_scalar(buf)?;
        if scalar.infinity().is_some() {
            return Err(infinity_unsupported(TargetShape::CalendarUtc));
        }
        scalar.decode()?.to_datetime_utc()
    }

    /// Reads the database-native shape. Wire infinities map to the
    /// [`PgTimestamp`] infinity variants unconditionally: the shape
    /// represents them natively, so no conversion flag applies.
    pub fn read_native(&self, buf: &mut impl Buf) -> Result<PgTimestamp> {
        let scalar = self.read_scalar(buf)?;
        match scalar.infinity() {
            Some(true) => Ok(PgTimestamp::PosInfinity),
            Some(false) => Ok(PgTimestamp::NegInfinity),
            None => Ok(PgTimestamp::Value(scalar.decode()?)),
        }
    }

    // ==================== write path ====================

    /// Encodes a tagged value, dispatching on its shape.
    pub fn encode(&self, buf: &mut impl BufMut, value: &TimestampValue) -> Result<()> {
        match value {
            TimestampValue::Instant(instant) => self.write_instant(buf, *instant),
            TimestampValue::LocalNoZone(dt) => self.write_local(buf, *dt),
            TimestampValue::CalendarUtc(dt) => self.write_calendar_utc(buf, *dt),
            TimestampValue::Native(ts) => self.write_native(buf, *ts),
        }
    }

    /// Writes an absolute instant. The infinity markers become wire
    /// sentinels when `convert_infinity` is set and are rejected otherwise;
    /// sentinels are never synthesized with the flag off.
    pub fn write_instant(&self, buf: &mut impl BufMut, value: Instant) -> Result<()> {
        if !value.is_finite() {
            if !self.cfg.convert_infinity {
                return Err(CodecError::Unsupported(
                    "cannot write an infinite instant with infinity conversion disabled".into(),
                ));
            }
            return self.write_sentinel(buf, value == Instant::INFINITY);
        }
        self.write_finite(buf, value)
    }

    /// Writes a zone-less local date-time, interpreted on the UTC timeline.
    pub fn write_local(&self, buf: &mut impl BufMut, value: NaiveDateTime) -> Result<()> {
        self.write_finite(buf, Instant::from_naive_utc(value))
    }

    /// Writes a UTC calendar date-time.
    pub fn write_calendar_utc(&self, buf: &mut impl BufMut, value: DateTime<Utc>) -> Result<()> {
        self.write_finite(buf, Instant::from_datetime_utc(value))
    }

    /// Writes the database-native shape. Infinity variants require
    /// `convert_infinity`; the write path never synthesizes sentinels with
    /// the flag off.
    pub fn write_native(&self, buf: &mut impl BufMut, value: PgTimestamp) -> Result<()> {
        match value {
            PgTimestamp::Value(instant) => self.write_instant(buf, instant),
            PgTimestamp::PosInfinity | PgTimestamp::NegInfinity => {
                if !self.cfg.convert_infinity {
                    return Err(CodecError::Unsupported(
                        "cannot write an infinite timestamp with infinity conversion disabled"
                            .into(),
                    ));
                }
                self.write_sentinel(buf, value == PgTimestamp::PosInfinity)
            }
        }
    }

    // ==================== internals ====================

    fn read_scalar(&self, buf: &mut impl Buf) -> Result<WireScalar> {
        if self.cfg.integer_format {
            wire::read_i64(buf).map(WireScalar::Micros)
        } else {
            wire::read_f64(buf).map(WireScalar::Seconds)
        }
    }

    fn write_sentinel(&self, buf: &mut impl BufMut, positive: bool) -> Result<()> {
        if self.cfg.integer_format {
            wire::write_i64(buf, if positive { i64::MAX } else { i64::MIN })
        } else {
            wire::write_f64(buf, if positive { f64::INFINITY } else { f64::NEG_INFINITY })
        }
    }

    fn write_finite(&self, buf: &mut impl BufMut, instant: Instant) -> Result<()> {
        if self.cfg.integer_format {
            wire::write_i64(buf, epoch::encode_micros(instant)?)
        } else {
            wire::write_f64(buf, epoch::encode_seconds(instant))
        }
    }
}

fn infinity_unsupported(shape: TargetShape) -> CodecError {
    CodecError::Unsupported(format!(
        "infinity values are not representable as {}; read as Instant or PgTimestamp instead",
        shape.name()
    ))
}
