//! Error types for pgwire-timestamp.
//!
//! All errors in this crate are represented by [`CodecError`], which covers:
//! - Unsupported values (infinity decoded into a shape that cannot hold it)
//! - Malformed input (short buffers, NaN on the legacy double wire)
//! - Range overflow (instants outside the representable range of a format)
//!
//! Every error is a deterministic function of the input bytes/value and the
//! codec configuration; there are no transient failure modes.

use thiserror::Error;

/// Error type for all pgwire-timestamp operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Unsupported value - infinity met a shape with no infinity representation,
    /// or an infinite value was written while infinity conversion is disabled.
    #[error("unsupported value: {0}")]
    Unsupported(String),

    /// Malformed input - short/corrupt buffer from the byte-stream collaborator,
    /// or a NaN seconds value on the wire.
    #[error("malformed input: {0}")]
    Malformed(String),

    /// Range overflow - the instant does not fit the target representation.
    ///
    /// Overflow is always an explicit error; the codec never saturates or wraps.
    #[error("range overflow: {0}")]
    Overflow(String),
}

impl CodecError {
    /// Returns `true` if this is an unsupported-value error.
    #[inline]
    pub fn is_unsupported(&self) -> bool {
        matches!(self, CodecError::Unsupported(_))
    }

    /// Returns `true` if this is a malformed-input error.
    #[inline]
    pub fn is_malformed(&self) -> bool {
        matches!(self, CodecError::Malformed(_))
    }

    /// Returns `true` if this is a range-overflow error.
    #[inline]
    pub fn is_overflow(&self) -> bool {
        matches!(self, CodecError::Overflow(_))
    }
}

/// Result type alias for pgwire-timestamp operations.
pub type Result<T> = std::result::Result<T, CodecError>;
