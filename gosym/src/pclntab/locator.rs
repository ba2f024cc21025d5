//! Anchor discovery
//!
//! The table is found by a plain substring search for each supported
//! signature; the lowest offset wins. There is no verification beyond the
//! header decode that follows, so decoy bytes placed before the real table
//! would mislead this heuristic.

use super::buffer::Buffer;
use super::version::{FormatVersion, GO12_MAGIC, PREFIX_SIZE};
use crate::domain::ParseError;
use log::debug;

/// Position and version of a recognized header signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    pub offset: usize,
    pub version: FormatVersion,
}

/// The three `0xff` bytes and zero pad shared by every Go table magic.
const GO_LIKE_TAIL: [u8; 5] = [0xff, 0xff, 0xff, 0x00, 0x00];

/// Find the first supported table signature in `buf`.
///
/// # Errors
/// - `UnsupportedVersion` if only an older or unknown Go-style header is present
/// - `NotFound` if nothing resembling a Go table is present
pub fn locate(buf: &Buffer<'_>) -> Result<Anchor, ParseError> {
    let first = FormatVersion::ALL
        .into_iter()
        .filter_map(|version| {
            buf.find(&version.signature(), 0).map(|offset| Anchor { offset, version })
        })
        .min_by_key(|anchor| anchor.offset);

    if let Some(anchor) = first {
        debug!("Found {} table signature at 0x{:x}", anchor.version, anchor.offset);
        return Ok(anchor);
    }

    if let Some(magic) = find_go_like_magic(buf) {
        debug!("Found Go-style header with unsupported magic 0x{magic:08x}");
        return Err(ParseError::UnsupportedVersion { magic });
    }

    Err(ParseError::NotFound)
}

/// Every supported signature position, in buffer order.
#[must_use]
pub fn candidates(buf: &Buffer<'_>) -> Vec<Anchor> {
    let mut found = Vec::new();
    for version in FormatVersion::ALL {
        let signature = version.signature();
        let mut start = 0;
        while let Some(offset) = buf.find(&signature, start) {
            found.push(Anchor { offset, version });
            start = offset + 1;
        }
    }
    found.sort_by_key(|anchor| anchor.offset);
    found
}

/// Magic of the first header that looks like a Go table but has no layout.
///
/// Requires a `0xfffffffX` magic, a zero pad, an instruction quantum of 1, 2
/// or 4 and a pointer width of 4 or 8.
fn find_go_like_magic(buf: &Buffer<'_>) -> Option<u32> {
    let mut start = 1;
    while let Some(tail) = buf.find(&GO_LIKE_TAIL, start) {
        start = tail + 1;
        let magic_offset = tail - 1;

        let Ok(prefix) = buf.bytes(magic_offset, PREFIX_SIZE) else {
            continue;
        };
        let magic = u32::from_le_bytes([prefix[0], prefix[1], prefix[2], prefix[3]]);
        let quantum = prefix[6];
        let ptr_size = prefix[7];

        let go_style = magic == GO12_MAGIC || magic >> 4 == 0x0fff_ffff;
        if go_style && matches!(quantum, 1 | 2 | 4) && matches!(ptr_size, 4 | 8) {
            return Some(magic);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorKind;

    fn with_bytes_at(len: usize, offset: usize, bytes: &[u8]) -> Vec<u8> {
        let mut data = vec![0u8; len];
        data[offset..offset + bytes.len()].copy_from_slice(bytes);
        data
    }

    #[test]
    fn test_locates_go116_signature() {
        let data = with_bytes_at(0x200, 0x100, &[0xfa, 0xff, 0xff, 0xff, 0x00, 0x00, 0x01, 0x08]);
        let anchor = locate(&Buffer::new(&data)).unwrap();
        assert_eq!(anchor, Anchor { offset: 0x100, version: FormatVersion::Go116 });
    }

    #[test]
    fn test_first_position_wins_across_versions() {
        let mut data = with_bytes_at(0x200, 0x180, &FormatVersion::Go116.signature());
        data[0x40..0x46].copy_from_slice(&FormatVersion::Go120.signature());

        let anchor = locate(&Buffer::new(&data)).unwrap();
        assert_eq!(anchor.offset, 0x40);
        assert_eq!(anchor.version, FormatVersion::Go120);

        let all = candidates(&Buffer::new(&data));
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].offset, 0x40);
        assert_eq!(all[1].offset, 0x180);
    }

    #[test]
    fn test_no_signature_is_not_found() {
        let data = vec![0xffu8; 256];
        assert_eq!(locate(&Buffer::new(&data)).unwrap_err(), ParseError::NotFound);
        assert_eq!(locate(&Buffer::new(&[])).unwrap_err(), ParseError::NotFound);
    }

    #[test]
    fn test_legacy_header_is_unsupported() {
        let data = with_bytes_at(0x80, 0x10, &[0xfb, 0xff, 0xff, 0xff, 0x00, 0x00, 0x01, 0x08]);
        let err = locate(&Buffer::new(&data)).unwrap_err();
        assert_eq!(err, ParseError::UnsupportedVersion { magic: GO12_MAGIC });
    }

    #[test]
    fn test_future_header_is_unsupported() {
        let data = with_bytes_at(0x80, 0x20, &[0xf2, 0xff, 0xff, 0xff, 0x00, 0x00, 0x04, 0x08]);
        let err = locate(&Buffer::new(&data)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedVersion);
    }

    #[test]
    fn test_implausible_go_like_prefix_is_not_found() {
        // Right shape, but a pointer width of 3 rules it out
        let data = with_bytes_at(0x80, 0x20, &[0xfb, 0xff, 0xff, 0xff, 0x00, 0x00, 0x01, 0x03]);
        assert_eq!(locate(&Buffer::new(&data)).unwrap_err(), ParseError::NotFound);
    }
}
