// src/protocol/cursor.rs
use byteorder::{ByteOrder, LittleEndian};

use crate::error::DecodeError;

// A failed read leaves the position untouched.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn next_bytes(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        if self.remaining() < n {
            return Err(self.truncated(n));
        }
        let bytes = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    pub fn next_byte(&mut self) -> Result<u8, DecodeError> {
        Ok(self.next_bytes(1)?[0])
    }

    pub fn next_short(&mut self) -> Result<i16, DecodeError> {
        Ok(LittleEndian::read_i16(self.next_bytes(2)?))
    }

    pub fn next_ushort(&mut self) -> Result<u16, DecodeError> {
        Ok(LittleEndian::read_u16(self.next_bytes(2)?))
    }

    pub fn next_long(&mut self) -> Result<u32, DecodeError> {
        Ok(LittleEndian::read_u32(self.next_bytes(4)?))
    }

    pub fn next_float(&mut self) -> Result<f32, DecodeError> {
        Ok(LittleEndian::read_f32(self.next_bytes(4)?))
    }

    pub fn next_cstring(&mut self) -> Result<&'a [u8], DecodeError> {
        let rest = &self.buf[self.pos..];
        match rest.iter().position(|&b| b == 0) {
            Some(len) => {
                let bytes = &rest[..len];
                self.pos += len + 1;
                Ok(bytes)
            }
            // No terminator: the string needs at least one byte more than is left.
            None => Err(self.truncated(rest.len() + 1)),
        }
    }

    pub fn next_string(&mut self) -> Result<String, DecodeError> {
        Ok(String::from_utf8_lossy(self.next_cstring()?).into_owned())
    }

    fn truncated(&self, needed: usize) -> DecodeError {
        DecodeError::TruncatedBuffer {
            needed,
            remaining: self.remaining(),
            offset: self.pos,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_little_endian_values_in_sequence() {
        let mut buf = vec![0x2a];
        buf.extend_from_slice(&(-2i16).to_le_bytes());
        buf.extend_from_slice(&0xBEEFu16.to_le_bytes());
        buf.extend_from_slice(&5660023u32.to_le_bytes());
        buf.extend_from_slice(&0.5f32.to_le_bytes());
        buf.extend_from_slice(b"MAP01\0");

        let mut cursor = ByteCursor::new(&buf);
        assert_eq!(cursor.next_byte().unwrap(), 0x2a);
        assert_eq!(cursor.next_short().unwrap(), -2);
        assert_eq!(cursor.next_ushort().unwrap(), 0xBEEF);
        assert_eq!(cursor.next_long().unwrap(), 5660023);
        assert_eq!(cursor.next_float().unwrap(), 0.5);
        assert_eq!(cursor.next_string().unwrap(), "MAP01");
        assert_eq!(cursor.remaining(), 0);
        assert_eq!(cursor.position(), buf.len());
    }

    #[test]
    fn failed_read_does_not_advance() {
        let buf = [1u8, 2, 3];
        let mut cursor = ByteCursor::new(&buf);
        assert_eq!(cursor.next_byte().unwrap(), 1);
        assert_eq!(
            cursor.next_long(),
            Err(DecodeError::TruncatedBuffer { needed: 4, remaining: 2, offset: 1 })
        );
        assert_eq!(cursor.position(), 1);
        assert_eq!(cursor.next_short().unwrap(), i16::from_le_bytes([2, 3]));
    }

    #[test]
    fn unterminated_string_is_truncated() {
        let buf = *b"abc";
        let mut cursor = ByteCursor::new(&buf);
        assert_eq!(
            cursor.next_cstring(),
            Err(DecodeError::TruncatedBuffer { needed: 4, remaining: 3, offset: 0 })
        );
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn empty_string_consumes_only_terminator() {
        let buf = [0u8, 7];
        let mut cursor = ByteCursor::new(&buf);
        assert_eq!(cursor.next_cstring().unwrap(), b"");
        assert_eq!(cursor.next_byte().unwrap(), 7);
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let buf = [b'a', 0xff, b'b', 0];
        let mut cursor = ByteCursor::new(&buf);
        assert_eq!(cursor.next_string().unwrap(), "a\u{fffd}b");
    }
}
