//! Versioned header decoding
//!
//! ```text
//! anchor ─▶ ┌────────┬──────┬─────────┬─────────┐
//!           │ magic  │ pad  │ quantum │ ptrsize │  8-byte prefix
//!           ├────────┴──────┴─────────┴─────────┤
//!           │ nfunc                             │  ptrsize bytes each,
//!           │ nfiles                            │  order given by the
//!           │ [textStart]          (Go ≥ 1.18)  │  version's layout
//!           │ funcnameOffset                    │
//!           │ cuOffset                          │
//!           │ filetabOffset                     │
//!           │ pctabOffset                       │
//!           │ pclnOffset                        │
//!           └───────────────────────────────────┘
//! ```
//!
//! All offsets are relative to the anchor.

use super::buffer::Buffer;
use super::locator::Anchor;
use super::version::{FormatVersion, HeaderField, PREFIX_SIZE};
use crate::domain::ParseError;
use log::debug;

/// Decoded pclntab header.
///
/// Offsets are stored as found in the table (relative to `anchor`); decoding
/// guarantees `anchor + offset <= buffer length` for each of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub anchor: usize,
    pub version: FormatVersion,
    pub quantum: u8,
    pub ptr_size: u8,
    pub nfunc: usize,
    pub nfiles: u64,
    /// Base address that entry offsets are relative to (Go ≥ 1.18 only).
    pub text_start: Option<u64>,
    pub funcname_offset: u64,
    pub cu_offset: u64,
    pub filetab_offset: u64,
    pub pctab_offset: u64,
    pub pcln_offset: u64,
}

impl Header {
    /// Decode and validate the header at `anchor`.
    ///
    /// # Errors
    /// - `Truncated` if the fixed-size header runs past the buffer end
    /// - `Corrupt` for a bad pointer width, mismatched magic or pad,
    ///   out-of-bounds offsets, or an `nfunc` that cannot fit in the buffer
    pub fn decode(buf: &Buffer<'_>, anchor: Anchor) -> Result<Self, ParseError> {
        let base = anchor.offset;
        buf.bytes(base, PREFIX_SIZE)?;

        let magic = buf.u32_at(base)?;
        if FormatVersion::from_magic(magic) != Some(anchor.version) {
            return Err(ParseError::corrupt(format!(
                "magic 0x{magic:08x} at 0x{base:x} does not match {}",
                anchor.version
            )));
        }
        let pad = buf.u16_at(base + 4)?;
        if pad != 0 {
            return Err(ParseError::corrupt(format!("non-zero header pad 0x{pad:04x}")));
        }

        let quantum = buf.u8_at(base + 6)?;
        let ptr_size = buf.u8_at(base + 7)?;
        if !matches!(ptr_size, 4 | 8) {
            return Err(ParseError::corrupt(format!("invalid pointer width {ptr_size}")));
        }

        let width = usize::from(ptr_size);
        let size = anchor.version.header_size(width);
        buf.bytes(base, size)?;

        let mut header = Header {
            anchor: base,
            version: anchor.version,
            quantum,
            ptr_size,
            nfunc: 0,
            nfiles: 0,
            text_start: None,
            funcname_offset: 0,
            cu_offset: 0,
            filetab_offset: 0,
            pctab_offset: 0,
            pcln_offset: 0,
        };

        let mut nfunc = 0u64;
        for (index, field) in anchor.version.layout().header_fields.iter().enumerate() {
            let value = buf.uint_at(base + PREFIX_SIZE + index * width, width)?;
            match field {
                HeaderField::NFunc => nfunc = value,
                HeaderField::NFiles => header.nfiles = value,
                HeaderField::TextStart => header.text_start = Some(value),
                HeaderField::FuncNameOffset => header.funcname_offset = value,
                HeaderField::CuOffset => header.cu_offset = value,
                HeaderField::FileTabOffset => header.filetab_offset = value,
                HeaderField::PcTabOffset => header.pctab_offset = value,
                HeaderField::PclnOffset => header.pcln_offset = value,
            }
        }

        for (name, offset) in [
            ("funcname", header.funcname_offset),
            ("cu", header.cu_offset),
            ("filetab", header.filetab_offset),
            ("pctab", header.pctab_offset),
            ("pcln", header.pcln_offset),
        ] {
            check_in_bounds(buf, base, name, offset)?;
        }

        header.nfunc = usize::try_from(nfunc)
            .ok()
            .filter(|&n| n.checked_mul(header.descriptor_size()).is_some_and(|sz| sz <= buf.len()))
            .ok_or_else(|| {
                ParseError::corrupt(format!(
                    "nfunc {nfunc} implies a function table larger than the buffer"
                ))
            })?;

        debug!(
            "{} header at 0x{:x}: ptrsize={} quantum={} nfunc={} nfiles={}",
            header.version, base, ptr_size, quantum, header.nfunc, header.nfiles
        );

        Ok(header)
    }

    /// Size of the fixed header in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.version.header_size(usize::from(self.ptr_size))
    }

    /// Width of address / offset words in descriptor and metadata records.
    #[must_use]
    pub fn entry_width(&self) -> usize {
        self.version.layout().entry_width.bytes(usize::from(self.ptr_size))
    }

    /// Size of one function descriptor (address + metadata offset).
    #[must_use]
    pub fn descriptor_size(&self) -> usize {
        2 * self.entry_width()
    }

    /// Size of the part of a metadata record this crate reads
    /// (address + 32-bit name index).
    #[must_use]
    pub fn meta_size(&self) -> usize {
        self.entry_width() + 4
    }

    /// Absolute position of the function-name area.
    #[must_use]
    pub fn name_table_base(&self) -> usize {
        self.absolute(self.funcname_offset)
    }

    /// Absolute position of the function-descriptor table.
    #[must_use]
    pub fn functab_base(&self) -> usize {
        self.absolute(self.pcln_offset)
    }

    // Offsets were bounds-checked in `decode`, so they fit.
    #[allow(clippy::cast_possible_truncation)]
    fn absolute(&self, offset: u64) -> usize {
        self.anchor + offset as usize
    }
}

fn check_in_bounds(
    buf: &Buffer<'_>,
    base: usize,
    name: &str,
    offset: u64,
) -> Result<(), ParseError> {
    let in_bounds = buf.offset(base, offset).is_ok_and(|absolute| absolute <= buf.len());
    if in_bounds {
        Ok(())
    } else {
        Err(ParseError::corrupt(format!(
            "{name} offset 0x{offset:x} from anchor 0x{base:x} lies outside the buffer"
        )))
    }
}
