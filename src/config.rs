/// Immutable codec configuration, fixed at type-registration time.
///
/// PostgreSQL negotiates both flags out of band (the `integer_datetimes`
/// server parameter and client options); the codec never inspects connection
/// state and simply receives the two booleans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    /// Selects the wire encoding: 8-byte signed integer microseconds when true
    /// (every modern server), or the legacy 8-byte IEEE double seconds encoding
    /// removed in PostgreSQL 10 but still emitted by some derived databases.
    pub integer_format: bool,

    /// Whether the ±infinity wire sentinels are translated to and from the
    /// [`Instant`](crate::Instant) infinity markers. When false, sentinels are
    /// never written, and reads surface them per target shape (see
    /// [`TimestampCodec`](crate::TimestampCodec)).
    pub convert_infinity: bool,
}

impl CodecConfig {
    pub const fn new(integer_format: bool, convert_infinity: bool) -> Self {
        Self {
            integer_format,
            convert_infinity,
        }
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            integer_format: true,
            convert_infinity: false,
        }
    }
}
