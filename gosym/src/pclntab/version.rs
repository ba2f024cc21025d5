//! Versioned pclntab layouts
//!
//! Each supported Go toolchain generation is one [`FormatVersion`] variant
//! mapped to a static [`Layout`]. Supporting a new generation means adding a
//! variant and its layout; the decoders only consult the layout.
//!
//! | Magic        | Toolchain   | Header fields after prefix                   | Entry width |
//! |--------------|-------------|----------------------------------------------|-------------|
//! | `0xfffffffa` | Go 1.16     | nfunc nfiles funcname cu filetab pctab pcln  | pointer     |
//! | `0xfffffff0` | Go 1.18     | nfunc nfiles textStart funcname cu ... pcln  | 32-bit      |
//! | `0xfffffff1` | Go 1.20     | same as Go 1.18                              | 32-bit      |

use serde::{Deserialize, Serialize};
use std::fmt;

/// Magic of the pre-1.16 table, recognized but not decoded.
pub const GO12_MAGIC: u32 = 0xffff_fffb;

/// Size of the common header prefix: magic, pad, quantum, pointer size.
pub const PREFIX_SIZE: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormatVersion {
    Go116,
    Go118,
    Go120,
}

/// A header field following the 8-byte prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HeaderField {
    NFunc,
    NFiles,
    TextStart,
    FuncNameOffset,
    CuOffset,
    FileTabOffset,
    PcTabOffset,
    PclnOffset,
}

/// Width of the address / offset words in descriptor and metadata records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EntryWidth {
    Pointer,
    U32,
}

#[derive(Debug)]
pub(crate) struct Layout {
    /// Header fields in order, each `ptr_size` bytes wide.
    pub header_fields: &'static [HeaderField],
    pub entry_width: EntryWidth,
    /// Entry addresses are offsets from the header's `textStart`.
    pub text_relative: bool,
}

const GO116_LAYOUT: Layout = Layout {
    header_fields: &[
        HeaderField::NFunc,
        HeaderField::NFiles,
        HeaderField::FuncNameOffset,
        HeaderField::CuOffset,
        HeaderField::FileTabOffset,
        HeaderField::PcTabOffset,
        HeaderField::PclnOffset,
    ],
    entry_width: EntryWidth::Pointer,
    text_relative: false,
};

const GO118_LAYOUT: Layout = Layout {
    header_fields: &[
        HeaderField::NFunc,
        HeaderField::NFiles,
        HeaderField::TextStart,
        HeaderField::FuncNameOffset,
        HeaderField::CuOffset,
        HeaderField::FileTabOffset,
        HeaderField::PcTabOffset,
        HeaderField::PclnOffset,
    ],
    entry_width: EntryWidth::U32,
    text_relative: true,
};

impl FormatVersion {
    pub const ALL: [FormatVersion; 3] =
        [FormatVersion::Go116, FormatVersion::Go118, FormatVersion::Go120];

    #[must_use]
    pub fn magic(self) -> u32 {
        match self {
            FormatVersion::Go116 => 0xffff_fffa,
            FormatVersion::Go118 => 0xffff_fff0,
            FormatVersion::Go120 => 0xffff_fff1,
        }
    }

    #[must_use]
    pub fn from_magic(magic: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|version| version.magic() == magic)
    }

    /// Byte pattern the locator scans for: the magic followed by the zero pad.
    #[must_use]
    pub fn signature(self) -> [u8; 6] {
        let [a, b, c, d] = self.magic().to_le_bytes();
        [a, b, c, d, 0, 0]
    }

    pub(crate) fn layout(self) -> &'static Layout {
        match self {
            FormatVersion::Go116 => &GO116_LAYOUT,
            FormatVersion::Go118 | FormatVersion::Go120 => &GO118_LAYOUT,
        }
    }

    /// Size of the fixed header for the given pointer width.
    #[must_use]
    pub fn header_size(self, ptr_size: usize) -> usize {
        PREFIX_SIZE + self.layout().header_fields.len() * ptr_size
    }
}

impl EntryWidth {
    pub(crate) fn bytes(self, ptr_size: usize) -> usize {
        match self {
            EntryWidth::Pointer => ptr_size,
            EntryWidth::U32 => 4,
        }
    }
}

impl fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FormatVersion::Go116 => "Go 1.16",
            FormatVersion::Go118 => "Go 1.18",
            FormatVersion::Go120 => "Go 1.20",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_magic_round_trips() {
        for version in FormatVersion::ALL {
            assert_eq!(FormatVersion::from_magic(version.magic()), Some(version));
        }
        assert_eq!(FormatVersion::from_magic(GO12_MAGIC), None);
    }

    #[test]
    fn test_go116_signature() {
        assert_eq!(FormatVersion::Go116.signature(), [0xfa, 0xff, 0xff, 0xff, 0x00, 0x00]);
    }

    #[test]
    fn test_header_sizes() {
        assert_eq!(FormatVersion::Go116.header_size(8), 64);
        assert_eq!(FormatVersion::Go116.header_size(4), 36);
        assert_eq!(FormatVersion::Go118.header_size(8), 72);
        assert_eq!(FormatVersion::Go120.header_size(4), 40);
    }

    #[test]
    fn test_entry_widths() {
        assert_eq!(FormatVersion::Go116.layout().entry_width.bytes(8), 8);
        assert_eq!(FormatVersion::Go118.layout().entry_width.bytes(8), 4);
        assert!(FormatVersion::Go120.layout().text_relative);
    }
}
