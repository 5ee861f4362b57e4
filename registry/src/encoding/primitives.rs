//! Scalar field encoders for the layouts assembled in this crate.
//!
//! Integers are big-endian. Strings are UTF-8 behind a `u16` length prefix.
//! Keys and ids are base58 text decoded to their raw bytes.

use bytes::{BufMut, BytesMut};

use crate::error::{RegistryError, Result};

/// `u16` length prefix followed by the UTF-8 bytes of `value`.
pub fn put_short_string(buf: &mut BytesMut, field: &'static str, value: &str) -> Result<()> {
    let len = u16::try_from(value.len()).map_err(|_| RegistryError::FieldTooLong {
        field,
        len: value.len(),
    })?;
    buf.put_u16(len);
    buf.put_slice(value.as_bytes());
    Ok(())
}

/// Eight-byte big-endian signed integer.
pub fn put_long(buf: &mut BytesMut, value: i64) {
    buf.put_i64(value);
}

/// Raw bytes of a base58 string, without any length prefix.
pub fn put_base58(buf: &mut BytesMut, field: &'static str, value: &str) -> Result<()> {
    let bytes = bs58::decode(value)
        .into_vec()
        .map_err(|e| RegistryError::InvalidBase58 {
            field,
            reason: e.to_string(),
        })?;
    buf.put_slice(&bytes);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_string_is_length_prefixed() {
        let mut buf = BytesMut::new();
        put_short_string(&mut buf, "host", "abc").unwrap();
        assert_eq!(&buf[..], &[0, 3, b'a', b'b', b'c']);
    }

    #[test]
    fn empty_string_is_just_the_prefix() {
        let mut buf = BytesMut::new();
        put_short_string(&mut buf, "data", "").unwrap();
        assert_eq!(&buf[..], &[0, 0]);
    }

    #[test]
    fn oversized_string_is_rejected() {
        let mut buf = BytesMut::new();
        let long = "x".repeat(usize::from(u16::MAX) + 1);
        let err = put_short_string(&mut buf, "data", &long).unwrap_err();
        assert!(matches!(err, RegistryError::FieldTooLong { field: "data", .. }));
    }

    #[test]
    fn long_is_big_endian() {
        let mut buf = BytesMut::new();
        put_long(&mut buf, 1_600_000_000_000);
        assert_eq!(&buf[..], &1_600_000_000_000i64.to_be_bytes());
    }

    #[test]
    fn base58_is_decoded() {
        let mut buf = BytesMut::new();
        put_base58(&mut buf, "orderId", "8wr").unwrap();
        assert_eq!(&buf[..], b"hi");
        assert!(put_base58(&mut buf, "orderId", "0OIl").is_err());
    }
}
