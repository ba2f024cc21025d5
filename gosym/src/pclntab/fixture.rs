//! Synthetic pclntab images for unit tests.

use super::version::{FormatVersion, HeaderField, PREFIX_SIZE};

struct Function {
    address: u64,
    meta_address: u64,
    name: String,
}

/// Lays out `[padding][header][names][functab][metadata records]`.
pub(crate) struct PclntabBuilder {
    version: FormatVersion,
    ptr_size: u8,
    quantum: u8,
    anchor: usize,
    text_start: u64,
    functions: Vec<Function>,
}

impl PclntabBuilder {
    pub fn new(version: FormatVersion) -> Self {
        Self { version, ptr_size: 8, quantum: 1, anchor: 0, text_start: 0, functions: Vec::new() }
    }

    pub fn anchor(mut self, offset: usize) -> Self {
        self.anchor = offset;
        self
    }

    pub fn ptr_size(mut self, ptr_size: u8) -> Self {
        self.ptr_size = ptr_size;
        self
    }

    pub fn text_start(mut self, address: u64) -> Self {
        self.text_start = address;
        self
    }

    pub fn function(self, address: u64, name: &str) -> Self {
        self.function_with_meta_address(address, address, name)
    }

    pub fn function_with_meta_address(mut self, address: u64, meta_address: u64, name: &str) -> Self {
        self.functions.push(Function { address, meta_address, name: name.to_string() });
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let ptr = usize::from(self.ptr_size);
        let layout = self.version.layout();
        let entry = layout.entry_width.bytes(ptr);
        let header_size = self.version.header_size(ptr);

        let mut names = Vec::new();
        let mut name_index = Vec::new();
        for function in &self.functions {
            name_index.push(names.len() as u64);
            names.extend_from_slice(function.name.as_bytes());
            names.push(0);
        }

        let names_end = header_size + names.len();
        let functab = names_end.next_multiple_of(8);
        let nfunc = self.functions.len();
        let descriptor_size = 2 * entry;
        let meta_size = entry + 4;
        let meta_base = nfunc * descriptor_size;
        let total = self.anchor + functab + meta_base + nfunc * meta_size;

        let mut data = vec![0u8; total];
        let a = self.anchor;

        data[a..a + 4].copy_from_slice(&self.version.magic().to_le_bytes());
        data[a + 6] = self.quantum;
        data[a + 7] = self.ptr_size;

        for (index, field) in layout.header_fields.iter().enumerate() {
            let value = match field {
                HeaderField::NFunc => nfunc as u64,
                HeaderField::NFiles => 0,
                HeaderField::TextStart => self.text_start,
                HeaderField::FuncNameOffset => header_size as u64,
                HeaderField::CuOffset | HeaderField::FileTabOffset | HeaderField::PcTabOffset => {
                    names_end as u64
                }
                HeaderField::PclnOffset => functab as u64,
            };
            put(&mut data, a + PREFIX_SIZE + index * ptr, ptr, value);
        }

        data[a + header_size..a + names_end].copy_from_slice(&names);

        let relative = |address: u64| {
            if layout.text_relative {
                address - self.text_start
            } else {
                address
            }
        };

        for (i, function) in self.functions.iter().enumerate() {
            let meta_offset = meta_base + i * meta_size;
            let descriptor = a + functab + i * descriptor_size;
            put(&mut data, descriptor, entry, relative(function.address));
            put(&mut data, descriptor + entry, entry, meta_offset as u64);

            let meta = a + functab + meta_offset;
            put(&mut data, meta, entry, relative(function.meta_address));
            put(&mut data, meta + entry, 4, name_index[i]);
        }

        data
    }
}

fn put(data: &mut [u8], offset: usize, width: usize, value: u64) {
    data[offset..offset + width].copy_from_slice(&value.to_le_bytes()[..width]);
}
