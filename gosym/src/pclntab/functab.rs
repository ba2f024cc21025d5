//! Function descriptor table
//!
//! `nfunc` fixed-size records starting at `anchor + pclnOffset`, each an
//! entry address followed by the offset of the function's metadata record
//! (relative to the table base). For Go ≥ 1.18 both words are 32-bit and the
//! address is relative to `textStart`.

use super::buffer::Buffer;
use super::header::Header;
use crate::domain::ParseError;
use std::iter::FusedIterator;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionDescriptor {
    pub address: u64,
    pub meta_offset: u64,
}

/// Random-access and sequential reader over the descriptor records.
#[derive(Debug, Clone, Copy)]
pub struct FunctionTable<'a> {
    buf: Buffer<'a>,
    base: usize,
    len: usize,
    width: usize,
    text_start: Option<u64>,
}

/// A read of the whole table that stopped early.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Function table read stopped after {} of {expected} descriptors: {error}", read.len())]
pub struct PartialDescriptors {
    pub read: Vec<FunctionDescriptor>,
    pub expected: usize,
    pub error: ParseError,
}

impl<'a> FunctionTable<'a> {
    #[must_use]
    pub fn new(buf: Buffer<'a>, header: &Header) -> Self {
        Self {
            buf,
            base: header.functab_base(),
            len: header.nfunc,
            width: header.entry_width(),
            text_start: header.text_start,
        }
    }

    /// Number of descriptors the header claims.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Absolute position of the first record; metadata offsets are relative to it.
    #[must_use]
    pub fn base(&self) -> usize {
        self.base
    }

    fn record_size(&self) -> usize {
        2 * self.width
    }

    /// Read the descriptor at `index`.
    ///
    /// # Errors
    /// - `Truncated` if the record runs past the buffer end
    /// - `Corrupt` if `index` is outside the table or the address overflows
    pub fn get(&self, index: usize) -> Result<FunctionDescriptor, ParseError> {
        if index >= self.len {
            return Err(ParseError::corrupt(format!(
                "descriptor index {index} outside table of {}",
                self.len
            )));
        }

        let relative = index
            .checked_mul(self.record_size())
            .ok_or_else(|| ParseError::corrupt("descriptor offset overflows"))?;
        let offset = self.buf.offset(self.base, relative as u64)?;
        self.buf.bytes(offset, self.record_size())?;

        let entry = self.buf.uint_at(offset, self.width)?;
        let meta_offset = self.buf.uint_at(offset + self.width, self.width)?;

        let address = match self.text_start {
            Some(text) => text.checked_add(entry).ok_or_else(|| {
                ParseError::corrupt(format!("entry 0x{entry:x} overflows text start 0x{text:x}"))
            })?,
            None => entry,
        };

        Ok(FunctionDescriptor { address, meta_offset })
    }

    /// Lazily yield every descriptor in table order.
    ///
    /// The iterator ends after the first error, so the number of `Ok` items
    /// seen is the number of records read successfully.
    #[must_use]
    pub fn iter(&self) -> Descriptors<'a> {
        Descriptors { table: *self, next: 0, done: false }
    }

    /// Read every descriptor.
    ///
    /// # Errors
    /// Returns the descriptors read before the first failing record together
    /// with that failure.
    pub fn read_all(&self) -> Result<Vec<FunctionDescriptor>, PartialDescriptors> {
        let mut read = Vec::with_capacity(self.len);
        for descriptor in self.iter() {
            match descriptor {
                Ok(descriptor) => read.push(descriptor),
                Err(error) => return Err(PartialDescriptors { read, expected: self.len, error }),
            }
        }
        Ok(read)
    }
}

impl<'a> IntoIterator for &FunctionTable<'a> {
    type Item = Result<FunctionDescriptor, ParseError>;
    type IntoIter = Descriptors<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator returned by [`FunctionTable::iter`].
#[derive(Debug, Clone)]
pub struct Descriptors<'a> {
    table: FunctionTable<'a>,
    next: usize,
    done: bool,
}

impl Iterator for Descriptors<'_> {
    type Item = Result<FunctionDescriptor, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.next >= self.table.len {
            return None;
        }
        let item = self.table.get(self.next);
        self.next += 1;
        self.done = item.is_err();
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            (0, Some(0))
        } else {
            (0, Some(self.table.len - self.next))
        }
    }
}

impl FusedIterator for Descriptors<'_> {}
