//! Response framing.
//!
//! Every response is its payload followed by a big-endian status word. On
//! error the payload is dropped and only the status word is sent.

use common::{Error, StatusWord};

const STATUS_WORD_LEN: usize = 2;

/// Builds a response in a caller-provided buffer.
pub struct ResponseBuffer<'a> {
    buf: &'a mut [u8],
    len: usize,
}

impl<'a> ResponseBuffer<'a> {
    /// Fails if `buf` cannot even hold the status word.
    pub fn new(buf: &'a mut [u8]) -> Result<Self, Error> {
        if buf.len() < STATUS_WORD_LEN {
            return Err(Error::BufferOverflow);
        }
        Ok(Self { buf, len: 0 })
    }

    /// Appends payload bytes, keeping room for the status word.
    pub fn append(&mut self, data: &[u8]) -> Result<(), Error> {
        let capacity = self.buf.len() - STATUS_WORD_LEN;
        if data.len() > capacity - self.len {
            return Err(Error::BufferOverflow);
        }
        self.buf[self.len..self.len + data.len()].copy_from_slice(data);
        self.len += data.len();
        Ok(())
    }

    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Appends the status word for `result` and returns the response length.
    pub fn finish(mut self, result: Result<(), Error>) -> usize {
        let status = match result {
            Ok(()) => StatusWord::OK,
            Err(e) => {
                self.buf[..self.len].fill(0);
                self.len = 0;
                e.status_word()
            }
        };
        self.buf[self.len..self.len + STATUS_WORD_LEN].copy_from_slice(&status.to_be_bytes());
        self.len + STATUS_WORD_LEN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_response() {
        let mut buf = [0u8; 8];
        let mut response = ResponseBuffer::new(&mut buf).unwrap();
        response.append(b"abc").unwrap();
        assert_eq!(response.payload(), b"abc");
        let len = response.finish(Ok(()));
        assert_eq!(&buf[..len], b"abc\x90\x00");
    }

    #[test]
    fn test_error_drops_payload() {
        let mut buf = [0u8; 8];
        let mut response = ResponseBuffer::new(&mut buf).unwrap();
        response.append(b"abc").unwrap();
        let len = response.finish(Err(Error::RejectedByUser));
        assert_eq!(&buf[..len], &[0x69, 0x85]);
        assert_eq!(&buf[2..3], &[0]);
    }

    #[test]
    fn test_append_overflow() {
        let mut buf = [0u8; 5];
        let mut response = ResponseBuffer::new(&mut buf).unwrap();
        response.append(b"ab").unwrap();
        assert_eq!(response.append(b"cd"), Err(Error::BufferOverflow));
        response.append(b"c").unwrap();
        assert_eq!(response.finish(Ok(())), 5);
        assert_eq!(&buf, b"abc\x90\x00");
    }

    #[test]
    fn test_too_small_buffer() {
        let mut buf = [0u8; 1];
        assert!(ResponseBuffer::new(&mut buf).is_err());

        let mut buf = [0u8; 2];
        let response = ResponseBuffer::new(&mut buf).unwrap();
        assert_eq!(response.finish(Err(Error::InvalidRlpLength)), 2);
        assert_eq!(buf, [0x68, 0x00]);
    }
}
