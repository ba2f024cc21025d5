#![allow(dead_code)]

pub const ANCHOR: usize = 0x100;

pub fn put_u64(data: &mut [u8], at: usize, value: u64) {
    data[at..at + 8].copy_from_slice(&value.to_le_bytes());
}

pub fn put_u32(data: &mut [u8], at: usize, value: u32) {
    data[at..at + 4].copy_from_slice(&value.to_le_bytes());
}

/// Go 1.16 / 64-bit table at 0x100 with two functions:
///
/// ```text
/// 0x100  header (64 bytes)     funcnameOffset 0x40, pclnOffset 0x50
/// 0x140  names                 "main\0init\0"
/// 0x150  descriptors           (0x1000, 0x20) (0x1010, 0x30)
/// 0x170  metadata main         address 0x1000, name index 0
/// 0x180  metadata init         address 0x1010, name index 5
/// ```
pub fn scenario_buffer(nfunc: u64) -> Vec<u8> {
    let mut data = vec![0u8; 0x190];

    data[ANCHOR..ANCHOR + 8].copy_from_slice(&[0xfa, 0xff, 0xff, 0xff, 0x00, 0x00, 0x01, 0x08]);
    // nfunc, nfiles, funcname, cu, filetab, pctab, pcln
    let fields = [nfunc, 0, 0x40, 0x4a, 0x4a, 0x4a, 0x50];
    for (i, value) in fields.into_iter().enumerate() {
        put_u64(&mut data, ANCHOR + 8 + i * 8, value);
    }

    data[0x140..0x14a].copy_from_slice(b"main\0init\0");

    put_u64(&mut data, 0x150, 0x1000);
    put_u64(&mut data, 0x158, 0x20);
    put_u64(&mut data, 0x160, 0x1010);
    put_u64(&mut data, 0x168, 0x30);

    put_u64(&mut data, 0x170, 0x1000);
    put_u32(&mut data, 0x178, 0);
    put_u64(&mut data, 0x180, 0x1010);
    put_u32(&mut data, 0x188, 5);

    data
}

/// The scenario table claiming three functions, cut off right after the
/// second metadata record. The third descriptor overlaps the first metadata
/// record and points far past the end of the buffer.
pub fn overrun_buffer() -> Vec<u8> {
    let mut data = scenario_buffer(3);
    data[0x17c..0x180].fill(0xff);
    data.truncate(0x18c);
    data
}

/// Go 1.16 / 64-bit table with one function per `(address, name)` pair,
/// preceded by `padding` bytes of unrelated data.
pub fn go116_table(padding: usize, functions: &[(u64, &str)]) -> Vec<u8> {
    const HEADER: usize = 64;

    let mut names = Vec::new();
    let mut indices = Vec::new();
    for (_, name) in functions {
        indices.push(names.len() as u32);
        names.extend_from_slice(name.as_bytes());
        names.push(0);
    }

    let nfunc = functions.len();
    let functab = (HEADER + names.len()).next_multiple_of(8);
    let metas = nfunc * 16;
    let mut data = vec![0x5au8; padding];
    data.resize(padding + functab + metas + nfunc * 16, 0);

    let a = padding;
    data[a..a + 8].copy_from_slice(&[0xfa, 0xff, 0xff, 0xff, 0x00, 0x00, 0x01, 0x08]);
    let end_of_names = (HEADER + names.len()) as u64;
    let fields = [nfunc as u64, 0, HEADER as u64, end_of_names, end_of_names, end_of_names];
    for (i, value) in fields.into_iter().enumerate() {
        put_u64(&mut data, a + 8 + i * 8, value);
    }
    put_u64(&mut data, a + 8 + 6 * 8, functab as u64);
    data[a + HEADER..a + HEADER + names.len()].copy_from_slice(&names);

    for (i, &(address, _)) in functions.iter().enumerate() {
        let descriptor = a + functab + i * 16;
        let meta_offset = metas + i * 16;
        put_u64(&mut data, descriptor, address);
        put_u64(&mut data, descriptor + 8, meta_offset as u64);
        put_u64(&mut data, a + functab + meta_offset, address);
        put_u32(&mut data, a + functab + meta_offset + 8, indices[i]);
    }

    data
}
