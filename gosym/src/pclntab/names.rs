//! Function name resolution
//!
//! Two hops per function:
//!
//! ```text
//! descriptor.meta_offset ──▶ metadata record at functab_base + meta_offset
//!                              ├─ entry address (must agree with descriptor)
//!                              └─ name index ──▶ NUL-terminated string at
//!                                                anchor + funcnameOffset + index
//! ```

use super::buffer::Buffer;
use super::functab::FunctionDescriptor;
use super::header::Header;
use crate::domain::ParseError;
use log::warn;

/// The part of a function's metadata record needed for naming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionMeta {
    pub address: u64,
    pub name_index: u32,
}

/// Outcome of resolving one descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedName {
    pub name: String,
    /// Entry address stored in the metadata record itself.
    pub meta_address: u64,
}

#[derive(Debug, Clone, Copy)]
pub struct NameResolver<'a> {
    buf: Buffer<'a>,
    functab_base: usize,
    name_base: usize,
    width: usize,
    text_start: Option<u64>,
    max_name_length: usize,
}

impl<'a> NameResolver<'a> {
    #[must_use]
    pub fn new(buf: Buffer<'a>, header: &Header, max_name_length: usize) -> Self {
        Self {
            buf,
            functab_base: header.functab_base(),
            name_base: header.name_table_base(),
            width: header.entry_width(),
            text_start: header.text_start,
            max_name_length,
        }
    }

    /// Read the metadata record a descriptor points at.
    ///
    /// # Errors
    /// `Truncated` if the record runs past the buffer end, `Corrupt` on
    /// offset overflow.
    pub fn meta(&self, descriptor: &FunctionDescriptor) -> Result<FunctionMeta, ParseError> {
        let offset = self.buf.offset(self.functab_base, descriptor.meta_offset)?;
        self.buf.bytes(offset, self.width + 4)?;

        let entry = self.buf.uint_at(offset, self.width)?;
        let name_index = self.buf.u32_at(offset + self.width)?;

        let address = match self.text_start {
            Some(text) => text.checked_add(entry).ok_or_else(|| {
                ParseError::corrupt(format!("entry 0x{entry:x} overflows text start 0x{text:x}"))
            })?,
            None => entry,
        };

        Ok(FunctionMeta { address, name_index })
    }

    /// Borrow the function name at `name_index` in the name area.
    ///
    /// # Errors
    /// - `Truncated` if the name runs off the end of the buffer
    /// - `Corrupt` if it is longer than the configured cap or not UTF-8
    pub fn name_at(&self, name_index: u32) -> Result<&'a str, ParseError> {
        let offset = self.buf.offset(self.name_base, u64::from(name_index))?;
        let raw = self.buf.cstr_at(offset, self.max_name_length)?;
        std::str::from_utf8(raw).map_err(|e| {
            ParseError::corrupt(format!("function name at 0x{offset:x} is not UTF-8: {e}"))
        })
    }

    /// Resolve the name for one descriptor.
    ///
    /// An address disagreement between the descriptor and its metadata record
    /// is logged and reported through [`ResolvedName::meta_address`], not
    /// treated as a failure.
    ///
    /// # Errors
    /// Any failure of [`Self::meta`] or [`Self::name_at`].
    pub fn resolve(&self, descriptor: &FunctionDescriptor) -> Result<ResolvedName, ParseError> {
        let meta = self.meta(descriptor)?;
        let name = self.name_at(meta.name_index)?;

        if meta.address != descriptor.address {
            warn!(
                "Address mismatch for {name}: descriptor 0x{:x}, metadata 0x{:x}",
                descriptor.address, meta.address
            );
        }

        Ok(ResolvedName { name: name.to_string(), meta_address: meta.address })
    }
}
