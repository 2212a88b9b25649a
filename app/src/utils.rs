//! Small helpers shared by the handlers and the parser.
//!
//! - Big-endian account index decoding
//! - Decimal rendering of amounts and fees into fixed-size buffers

use common::constants::DECIMAL_BUFFER_LEN;

/// Reads a big-endian u32 from the first four bytes of `buffer`.
pub fn read_u32_be(buffer: &[u8]) -> Option<u32> {
    let bytes: [u8; 4] = buffer.get(..4)?.try_into().ok()?;
    Some(u32::from_be_bytes(bytes))
}

/// Decimal rendering of an unsigned integer, NUL-terminated, no leading zeros.
#[derive(Clone, PartialEq, Eq)]
pub struct Decimal {
    buf: [u8; DECIMAL_BUFFER_LEN],
    len: usize,
}

impl Decimal {
    pub fn new(value: u64) -> Self {
        let mut buf = [0u8; DECIMAL_BUFFER_LEN];
        if value == 0 {
            buf[0] = b'0';
            return Self { buf, len: 1 };
        }

        let mut digits = 0;
        let mut temp = value;
        while temp != 0 {
            digits += 1;
            temp /= 10;
        }

        let mut remaining = value;
        let mut i = 0;
        while remaining != 0 {
            buf[digits - 1 - i] = b'0' + (remaining % 10) as u8;
            remaining /= 10;
            i += 1;
        }
        // buf[digits] stays 0 and terminates the string
        Self { buf, len: digits }
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    #[inline]
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.buf[..=self.len]
    }

    pub fn as_str(&self) -> &str {
        core::str::from_utf8(self.as_bytes()).unwrap_or_default()
    }
}

impl core::fmt::Debug for Decimal {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Decimal({})", self.as_str())
    }
}
