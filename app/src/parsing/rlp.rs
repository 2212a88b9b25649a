//! Streaming RLP (Recursive Length Prefix) header decoder.
//!
//! Only headers are decoded here; the payload is consumed by the caller from
//! the same [`Cursor`]. Nothing is buffered besides the header itself.
//!
//! # Encoding
//!
//! | Lead byte | Item | Header |
//! |---|---|---|
//! | `0x00..=0x7f` | the byte itself | none |
//! | `0x80..=0xb7` | string of `lead - 0x80` bytes | 1 byte |
//! | `0xb8..=0xbb` | string, `lead - 0xb7` length bytes follow | 2 to 5 bytes |
//! | `0xc0..=0xf7` | list of `lead - 0xc0` bytes | 1 byte |
//! | `0xf8..=0xfb` | list, `lead - 0xf7` length bytes follow | 2 to 5 bytes |
//!
//! `0xbc..=0xbf` and `0xfc..=0xff` would need lengths wider than 32 bits and
//! are rejected.
//!
//! # Security
//!
//! - Every read is checked against the end of the input
//! - Lists are classified but never recursed into

use core::fmt;

use common::constants::RLP_MAX_HEADER_LEN;

/// RLP decoding errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RlpError {
    /// Length of length wider than 4 bytes, or header shorter than announced.
    MalformedLength,
    /// Input ended before the declared header or payload.
    UnexpectedEof,
}

impl fmt::Display for RlpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RlpError::MalformedLength => write!(f, "Malformed RLP length"),
            RlpError::UnexpectedEof => write!(f, "Unexpected end of RLP input"),
        }
    }
}

impl core::error::Error for RlpError {}

/// A decoded RLP header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RlpItem {
    /// True for list headers.
    pub is_list: bool,
    /// Length of the payload following the header.
    pub field_length: u32,
    /// Number of bytes taken by the header itself.
    pub header_offset: u8,
}

impl RlpItem {
    const fn new(is_list: bool, field_length: u32, header_offset: u8) -> Self {
        Self {
            is_list,
            field_length,
            header_offset,
        }
    }
}

/// Returns true once `header` holds enough bytes to be classified.
///
/// Must be called again after each byte is appended. A lead byte announcing a
/// length wider than 32 bits is classifiable right away; [`decode_header`]
/// rejects it.
pub fn can_decode(header: &[u8]) -> bool {
    let Some(&first) = header.first() else {
        return false;
    };
    match first {
        0xb8..=0xbb => header.len() > (first - 0xb7) as usize,
        0xf8..=0xfb => header.len() > (first - 0xf7) as usize,
        _ => true,
    }
}

/// Decodes a header for which [`can_decode`] returned true.
pub fn decode_header(header: &[u8]) -> Result<RlpItem, RlpError> {
    let (&first, rest) = header.split_first().ok_or(RlpError::MalformedLength)?;

    match first {
        // Single byte
        0x00..=0x7f => Ok(RlpItem::new(false, 1, 0)),

        // Short string (0-55 bytes)
        0x80..=0xb7 => Ok(RlpItem::new(false, (first - 0x80) as u32, 1)),

        // Long string, 1 to 4 length bytes
        0xb8..=0xbb => decode_long(false, first - 0xb7, rest),

        // Short list
        0xc0..=0xf7 => Ok(RlpItem::new(true, (first - 0xc0) as u32, 1)),

        // Long list, 1 to 4 length bytes
        0xf8..=0xfb => decode_long(true, first - 0xf7, rest),

        // 32-bit length limitation
        0xbc..=0xbf | 0xfc..=0xff => Err(RlpError::MalformedLength),
    }
}

/// Decodes the big-endian length following a long-form lead byte.
fn decode_long(is_list: bool, len_of_len: u8, rest: &[u8]) -> Result<RlpItem, RlpError> {
    let len_bytes = rest
        .get(..len_of_len as usize)
        .ok_or(RlpError::MalformedLength)?;

    let field_length = len_bytes
        .iter()
        .fold(0u32, |acc, &byte| (acc << 8) | byte as u32);

    Ok(RlpItem::new(is_list, field_length, 1 + len_of_len))
}

/// Read position over an immutable input buffer. Only ever moves forward.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Reads one byte.
    pub fn next_byte(&mut self) -> Result<u8, RlpError> {
        let byte = *self.data.get(self.pos).ok_or(RlpError::UnexpectedEof)?;
        self.pos += 1;
        Ok(byte)
    }

    /// Reads the next `len` bytes.
    pub fn take(&mut self, len: usize) -> Result<&'a [u8], RlpError> {
        if len > self.remaining() {
            return Err(RlpError::UnexpectedEof);
        }
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    /// Decodes the next RLP header and moves past it.
    ///
    /// Header bytes are gathered one at a time until they can be classified.
    /// For a single byte item the header is empty: the cursor stays on the
    /// byte, which is also the payload.
    pub fn read_header(&mut self) -> Result<RlpItem, RlpError> {
        let mut header = [0u8; RLP_MAX_HEADER_LEN];
        let mut len = 0;

        while !can_decode(&header[..len]) {
            if len == RLP_MAX_HEADER_LEN {
                return Err(RlpError::MalformedLength);
            }
            header[len] = *self
                .data
                .get(self.pos + len)
                .ok_or(RlpError::UnexpectedEof)?;
            len += 1;
        }

        let item = decode_header(&header[..len])?;
        self.pos += item.header_offset as usize;
        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_single_byte() {
        assert!(can_decode(&[0x7f]));
        assert_eq!(decode_header(&[0x7f]), Ok(RlpItem::new(false, 1, 0)));
        assert_eq!(decode_header(&[0x00]), Ok(RlpItem::new(false, 1, 0)));
    }

    #[test]
    fn test_short_string() {
        assert!(can_decode(&[0xb7]));
        assert_eq!(decode_header(&[0xb7]), Ok(RlpItem::new(false, 0x37, 1)));
        assert_eq!(decode_header(&[0x80]), Ok(RlpItem::new(false, 0, 1)));
        assert_eq!(decode_header(&[0xa1]), Ok(RlpItem::new(false, 33, 1)));
    }

    #[test]
    fn test_long_string_needs_length_bytes() {
        assert!(!can_decode(&[]));
        assert!(!can_decode(&[0xb8]));
        assert!(can_decode(&hex!("b838")));

        assert!(!can_decode(&hex!("bb000001")));
        assert!(can_decode(&hex!("bb00000100")));

        assert_eq!(decode_header(&hex!("b838")), Ok(RlpItem::new(false, 0x38, 2)));
        assert_eq!(decode_header(&hex!("b90400")), Ok(RlpItem::new(false, 1024, 3)));
        assert_eq!(decode_header(&hex!("ba010000")), Ok(RlpItem::new(false, 0x10000, 4)));
        assert_eq!(
            decode_header(&hex!("bbffffffff")),
            Ok(RlpItem::new(false, u32::MAX, 5))
        );
    }

    #[test]
    fn test_over_32_bits_rejected() {
        for first in [0xbc, 0xbd, 0xbe, 0xbf, 0xfc, 0xff] {
            assert!(can_decode(&[first]));
            assert_eq!(decode_header(&[first]), Err(RlpError::MalformedLength));
        }
    }

    #[test]
    fn test_lists() {
        assert_eq!(decode_header(&[0xc0]), Ok(RlpItem::new(true, 0, 1)));
        assert_eq!(decode_header(&[0xf7]), Ok(RlpItem::new(true, 0x37, 1)));
        assert!(!can_decode(&[0xf8]));
        assert_eq!(decode_header(&hex!("f84f")), Ok(RlpItem::new(true, 0x4f, 2)));
        assert_eq!(decode_header(&hex!("f90100")), Ok(RlpItem::new(true, 256, 3)));
    }

    #[test]
    fn test_truncated_header_slice() {
        assert_eq!(decode_header(&[]), Err(RlpError::MalformedLength));
        assert_eq!(decode_header(&hex!("b9 04")), Err(RlpError::MalformedLength));
    }

    #[test]
    fn test_cursor_read_header() {
        let data = hex!("7f 83010203 b90002 aabb");
        let mut cursor = Cursor::new(&data);

        let item = cursor.read_header().unwrap();
        assert_eq!(item, RlpItem::new(false, 1, 0));
        assert_eq!(cursor.take(1).unwrap(), &[0x7f]);

        let item = cursor.read_header().unwrap();
        assert_eq!(item, RlpItem::new(false, 3, 1));
        assert_eq!(cursor.take(3).unwrap(), &hex!("010203"));

        let item = cursor.read_header().unwrap();
        assert_eq!(item, RlpItem::new(false, 2, 3));
        assert_eq!(cursor.take(2).unwrap(), &hex!("aabb"));
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn test_cursor_length_bytes_beyond_buffer() {
        let data = hex!("ba0001");
        let mut cursor = Cursor::new(&data);
        assert_eq!(cursor.read_header(), Err(RlpError::UnexpectedEof));

        let mut cursor = Cursor::new(&[]);
        assert_eq!(cursor.read_header(), Err(RlpError::UnexpectedEof));
    }

    #[test]
    fn test_cursor_payload_beyond_buffer() {
        let data = hex!("83 0102");
        let mut cursor = Cursor::new(&data);
        let item = cursor.read_header().unwrap();
        assert_eq!(cursor.take(item.field_length as usize), Err(RlpError::UnexpectedEof));
        assert_eq!(cursor.position(), 1);
    }
}
