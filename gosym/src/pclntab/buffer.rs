//! Bounds-checked, read-only view over the input bytes
//!
//! Every other parsing component reads through [`Buffer`]; nothing in this
//! crate indexes the raw slice directly. Reads past the end fail with
//! [`ParseError::Truncated`], arithmetic overflow with [`ParseError::Corrupt`].

use crate::domain::ParseError;

/// Immutable byte view of known length `N`.
#[derive(Debug, Clone, Copy)]
pub struct Buffer<'a> {
    data: &'a [u8],
}

impl<'a> Buffer<'a> {
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }

    /// Add a relative offset read from the table to an absolute base.
    ///
    /// # Errors
    /// `Truncated` if the offset cannot even be represented as `usize`,
    /// `Corrupt` if the addition overflows.
    pub fn offset(&self, base: usize, relative: u64) -> Result<usize, ParseError> {
        let relative = usize::try_from(relative).map_err(|_| ParseError::Truncated {
            offset: usize::MAX,
            len: 0,
            buffer_len: self.len(),
        })?;
        base.checked_add(relative).ok_or_else(|| {
            ParseError::corrupt(format!("offset 0x{base:x} + 0x{relative:x} overflows"))
        })
    }

    /// Borrow `len` bytes starting at `offset`.
    ///
    /// # Errors
    /// `Truncated` if the range does not fit in the buffer.
    pub fn bytes(&self, offset: usize, len: usize) -> Result<&'a [u8], ParseError> {
        let end = offset.checked_add(len).ok_or_else(|| {
            ParseError::corrupt(format!("read of {len} bytes at 0x{offset:x} overflows"))
        })?;
        self.data.get(offset..end).ok_or(ParseError::Truncated {
            offset,
            len,
            buffer_len: self.len(),
        })
    }

    /// Read a little-endian `u8`.
    ///
    /// # Errors
    /// `Truncated` past the end of the buffer.
    pub fn u8_at(&self, offset: usize) -> Result<u8, ParseError> {
        Ok(self.bytes(offset, 1)?[0])
    }

    /// Read a little-endian `u16`.
    ///
    /// # Errors
    /// `Truncated` past the end of the buffer.
    pub fn u16_at(&self, offset: usize) -> Result<u16, ParseError> {
        let raw = self.bytes(offset, 2)?;
        Ok(u16::from_le_bytes([raw[0], raw[1]]))
    }

    /// Read a little-endian `u32`.
    ///
    /// # Errors
    /// `Truncated` past the end of the buffer.
    pub fn u32_at(&self, offset: usize) -> Result<u32, ParseError> {
        let raw = self.bytes(offset, 4)?;
        Ok(u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]))
    }

    /// Read a little-endian `u64`.
    ///
    /// # Errors
    /// `Truncated` past the end of the buffer.
    pub fn u64_at(&self, offset: usize) -> Result<u64, ParseError> {
        let raw = self.bytes(offset, 8)?;
        let mut word = [0u8; 8];
        word.copy_from_slice(raw);
        Ok(u64::from_le_bytes(word))
    }

    /// Read an unsigned little-endian field of 4 or 8 bytes.
    ///
    /// # Errors
    /// `Truncated` past the end of the buffer, `Corrupt` for any other width.
    pub fn uint_at(&self, offset: usize, width: usize) -> Result<u64, ParseError> {
        match width {
            4 => self.u32_at(offset).map(u64::from),
            8 => self.u64_at(offset),
            other => Err(ParseError::corrupt(format!("unsupported field width {other}"))),
        }
    }

    /// First position of `needle` at or after `start`.
    #[must_use]
    pub fn find(&self, needle: &[u8], start: usize) -> Option<usize> {
        if needle.is_empty() || start >= self.len() {
            return None;
        }
        self.data[start..].windows(needle.len()).position(|window| window == needle).map(|n| n + start)
    }

    /// Borrow the NUL-terminated byte string at `offset`, excluding the NUL.
    ///
    /// At most `max_len` bytes of content are accepted: the scan looks at
    /// `max_len + 1` bytes so that a string of exactly `max_len` bytes still
    /// finds its terminator.
    ///
    /// # Errors
    /// - `Truncated` if the buffer ends before a terminator or the cap
    /// - `Corrupt` if no terminator appears within `max_len` bytes
    pub fn cstr_at(&self, offset: usize, max_len: usize) -> Result<&'a [u8], ParseError> {
        if offset >= self.len() {
            return Err(ParseError::Truncated { offset, len: 1, buffer_len: self.len() });
        }

        let window = max_len.saturating_add(1);
        let available = self.len() - offset;
        let scanned = &self.data[offset..offset + window.min(available)];

        if let Some(nul) = scanned.iter().position(|&b| b == 0) {
            return Ok(&scanned[..nul]);
        }

        if available < window {
            Err(ParseError::Truncated { offset, len: available + 1, buffer_len: self.len() })
        } else {
            Err(ParseError::corrupt(format!(
                "string at 0x{offset:x} is not terminated within {max_len} bytes"
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorKind;

    #[test]
    fn test_reads_little_endian() {
        let data = [0x78, 0x56, 0x34, 0x12, 0xff, 0xff, 0xff, 0xff, 0x01];
        let buf = Buffer::new(&data);

        assert_eq!(buf.u8_at(8).unwrap(), 0x01);
        assert_eq!(buf.u16_at(0).unwrap(), 0x5678);
        assert_eq!(buf.u32_at(0).unwrap(), 0x1234_5678);
        assert_eq!(buf.u64_at(0).unwrap(), 0xffff_ffff_1234_5678);
        assert_eq!(buf.uint_at(0, 4).unwrap(), 0x1234_5678);
    }

    #[test]
    fn test_read_past_end_is_truncated() {
        let data = [0u8; 6];
        let buf = Buffer::new(&data);

        let err = buf.u64_at(0).unwrap_err();
        assert_eq!(err, ParseError::Truncated { offset: 0, len: 8, buffer_len: 6 });
        assert_eq!(buf.u8_at(6).unwrap_err().kind(), ErrorKind::Truncated);
    }

    #[test]
    fn test_bad_width_is_corrupt() {
        let buf = Buffer::new(&[0u8; 16]);
        assert_eq!(buf.uint_at(0, 2).unwrap_err().kind(), ErrorKind::Corrupt);
    }

    #[test]
    fn test_offset_overflow_is_corrupt() {
        let buf = Buffer::new(&[0u8; 4]);
        assert_eq!(buf.offset(usize::MAX, 1).unwrap_err().kind(), ErrorKind::Corrupt);
        assert_eq!(buf.offset(2, 3).unwrap(), 5);
    }

    #[test]
    fn test_find_respects_start() {
        let buf = Buffer::new(b"abcabc");
        assert_eq!(buf.find(b"bc", 0), Some(1));
        assert_eq!(buf.find(b"bc", 2), Some(4));
        assert_eq!(buf.find(b"bc", 5), None);
        assert_eq!(buf.find(b"", 0), None);
    }

    #[test]
    fn test_cstr_at() {
        let buf = Buffer::new(b"main\0init\0tail");

        assert_eq!(buf.cstr_at(0, 16).unwrap(), b"main");
        assert_eq!(buf.cstr_at(5, 4).unwrap(), b"init");
        // Exactly at the cap still terminates
        assert_eq!(buf.cstr_at(0, 4).unwrap(), b"main");
        // Over the cap
        assert_eq!(buf.cstr_at(0, 3).unwrap_err().kind(), ErrorKind::Corrupt);
        // Runs off the end
        assert_eq!(buf.cstr_at(10, 64).unwrap_err().kind(), ErrorKind::Truncated);
        assert_eq!(buf.cstr_at(14, 64).unwrap_err().kind(), ErrorKind::Truncated);
    }
}
