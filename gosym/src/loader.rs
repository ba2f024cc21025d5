//! Input loading for the command-line tool
//!
//! Reads an executable and narrows the scan region to the section that
//! normally holds the Go table. The core parser does not need section
//! boundaries, so when the container cannot be parsed or no known section
//! exists, the whole file is scanned instead.

use anyhow::{bail, Context, Result};
use log::{debug, info};
use object::{Object, ObjectSection};
use std::fs;
use std::ops::Range;
use std::path::Path;

/// Sections that hold the table, most specific first.
///
/// Non-PIE ELF and Mach-O builds have a dedicated section; PIE ELF builds
/// fold it into `.data.rel.ro`, PE builds into `.rdata`.
pub const DEFAULT_SECTIONS: &[&str] = &[".gopclntab", "__gopclntab", ".data.rel.ro", ".rdata"];

/// File contents plus the byte range to scan.
#[derive(Debug)]
pub struct LoadedBinary {
    data: Vec<u8>,
    region: Range<usize>,
    section: Option<String>,
}

impl LoadedBinary {
    /// Use the whole of `data` as the scan region.
    #[must_use]
    pub fn whole(data: Vec<u8>) -> Self {
        let region = 0..data.len();
        Self { data, region, section: None }
    }

    /// Bytes of the selected region.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.data[self.region.clone()]
    }

    /// Every byte of the file.
    #[must_use]
    pub fn file_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Name of the selected section, or `None` for the whole file.
    #[must_use]
    pub fn section(&self) -> Option<&str> {
        self.section.as_deref()
    }
}

/// Load `path` and pick the region holding the Go table.
///
/// With `section` set, that section must exist. Otherwise the first of
/// [`DEFAULT_SECTIONS`] present is used, falling back to the whole file.
///
/// # Errors
/// Returns an error if the file cannot be read, or the requested section is
/// missing or lies outside the file.
pub fn load_binary<P: AsRef<Path>>(path: P, section: Option<&str>) -> Result<LoadedBinary> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;

    let region = match object::File::parse(&*data) {
        Ok(obj) => find_region(&obj, section, data.len())?,
        Err(e) => {
            if let Some(name) = section {
                bail!("Cannot look up section {name}: {} is not an object file ({e})", path.display());
            }
            debug!("Not an object file ({e}), scanning all {} bytes", data.len());
            None
        }
    };

    Ok(match region {
        Some((name, range)) => {
            info!("Scanning section {name} (0x{:x} bytes at 0x{:x})", range.len(), range.start);
            LoadedBinary { data, region: range, section: Some(name) }
        }
        None => LoadedBinary::whole(data),
    })
}

fn find_region(
    obj: &object::File<'_>,
    requested: Option<&str>,
    file_len: usize,
) -> Result<Option<(String, Range<usize>)>> {
    let names: Vec<&str> = match requested {
        Some(name) => vec![name],
        None => DEFAULT_SECTIONS.to_vec(),
    };

    for name in names {
        let Some(section) = obj.section_by_name(name) else {
            continue;
        };
        let Some((offset, size)) = section.file_range() else {
            debug!("Section {name} has no file data");
            continue;
        };

        let start = usize::try_from(offset).context("Section offset exceeds address space")?;
        let len = usize::try_from(size).context("Section size exceeds address space")?;
        let end = start
            .checked_add(len)
            .filter(|&end| end <= file_len)
            .with_context(|| format!("Section {name} lies outside the file"))?;

        return Ok(Some((name.to_string(), start..end)));
    }

    if let Some(name) = requested {
        bail!("Section {name} not found");
    }
    debug!("No known Go table section, scanning the whole file");
    Ok(None)
}
