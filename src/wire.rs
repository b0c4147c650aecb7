//! Fixed-width buffer primitives.
//!
//! Both wire encodings are exactly 8 big-endian bytes. The byte-stream cursor
//! itself belongs to the caller; these helpers only check that the required
//! width is available and surface short reads/writes as
//! [`CodecError::Malformed`], which the codec propagates unchanged.

use bytes::{Buf, BufMut};

use crate::error::{CodecError, Result};

/// Wire width of every timestamp value, both formats.
pub const WIRE_LEN: usize = 8;

pub fn read_i64(buf: &mut impl Buf) -> Result<i64> {
    ensure_readable(buf.remaining())?;
    Ok(buf.get_i64())
}

pub fn read_f64(buf: &mut impl Buf) -> Result<f64> {
    ensure_readable(buf.remaining())?;
    Ok(buf.get_f64())
}

pub fn write_i64(buf: &mut impl BufMut, value: i64) -> Result<()> {
    ensure_writable(buf.remaining_mut())?;
    buf.put_i64(value);
    Ok(())
}

pub fn write_f64(buf: &mut impl BufMut, value: f64) -> Result<()> {
    ensure_writable(buf.remaining_mut())?;
    buf.put_f64(value);
    Ok(())
}

fn ensure_readable(remaining: usize) -> Result<()> {
    if remaining < WIRE_LEN {
        return Err(CodecError::Malformed(format!(
            "short read: need {WIRE_LEN} bytes, have {remaining}"
        )));
    }
    Ok(())
}

fn ensure_writable(remaining: usize) -> Result<()> {
    if remaining < WIRE_LEN {
        return Err(CodecError::Malformed(format!(
            "short write: need {WIRE_LEN} bytes, have {remaining}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn i64_is_big_endian() {
        let mut out = Vec::new();
        write_i64(&mut out, 0x0102_0304_0506_0708).unwrap();
        assert_eq!(out, [1, 2, 3, 4, 5, 6, 7, 8]);

        let mut rd = &out[..];
        assert_eq!(read_i64(&mut rd).unwrap(), 0x0102_0304_0506_0708);
    }

    #[test]
    fn f64_is_big_endian() {
        let mut out = Vec::new();
        write_f64(&mut out, -86_400.0).unwrap();
        assert_eq!(out, (-86_400.0f64).to_be_bytes());

        let mut rd = &out[..];
        assert_eq!(read_f64(&mut rd).unwrap(), -86_400.0);
    }

    #[test]
    fn short_read_is_malformed() {
        let mut rd = &[0u8; 7][..];
        let err = read_i64(&mut rd).unwrap_err();
        assert!(err.is_malformed());
        assert!(err.to_string().contains("short read"));

        let mut rd = &[][..];
        assert!(read_f64(&mut rd).unwrap_err().is_malformed());
    }

    #[test]
    fn short_write_is_malformed() {
        let mut space = [0u8; 7];
        let mut wr = &mut space[..];
        let err = write_i64(&mut wr, 0).unwrap_err();
        assert!(err.is_malformed());
        assert!(err.to_string().contains("short write"));
    }
}
