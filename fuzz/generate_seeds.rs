#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

const IDENTIFIER: [u8; 12] = [
    0xAB, b'K', b'T', b'X', b' ', b'1', b'1', 0xBB, b'\r', b'\n', 0x1A, b'\n',
];

fn kv_entry(key: &str, value: &str) -> Vec<u8> {
    let size = (key.len() + value.len() + 2) as u32;
    let mut out = size.to_le_bytes().to_vec();
    out.extend_from_slice(key.as_bytes());
    out.push(0);
    out.extend_from_slice(value.as_bytes());
    out.push(0);
    while out.len() % 4 != 0 {
        out.push(0);
    }
    out
}

/// Little-endian KTX 1.1 file with one image.
fn ktx(gl_format: u32, internal: u32, width: u32, height: u32, kv: &[u8], payload: &[u8]) -> Vec<u8> {
    let mut out = IDENTIFIER.to_vec();
    let gl_type = if gl_format == 0 { 0 } else { 0x1401 };
    for v in [
        0x0403_0201,
        gl_type,
        1,
        gl_format,
        internal,
        gl_format,
        width,
        height,
        0,
        0,
        1,
        1,
        kv.len() as u32,
    ] {
        out.extend_from_slice(&u32::to_le_bytes(v));
    }
    out.extend_from_slice(kv);
    out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    out.extend_from_slice(payload);
    out
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    let orient = kv_entry("KTXorientation", "S=r,T=d");

    // RGBA8 2x2
    let rgba: Vec<u8> = (0..16).collect();
    fs::write(format!("{dir}/rgba_2x2.ktx"), ktx(0x1908, 0x8058, 2, 2, &orient, &rgba)).unwrap();

    // RGB8 3x1, row padded to 12 bytes
    fs::write(
        format!("{dir}/rgb_3x1.ktx"),
        ktx(0x1907, 0x8051, 3, 1, &[], &[1, 2, 3, 4, 5, 6, 7, 8, 9, 0, 0, 0]),
    )
    .unwrap();

    // Luminance 4x1
    fs::write(format!("{dir}/l8_4x1.ktx"), ktx(0x1909, 0x8040, 4, 1, &[], &[0, 85, 170, 255])).unwrap();

    // One 4x4 block of each compressed family
    let block8 = [0x00, 0xF8, 0x1F, 0x00, 0xE4, 0xE4, 0xE4, 0xE4];
    let block16 = [0xFF, 0x00, 0x49, 0x92, 0x24, 0x49, 0x92, 0x24, 0x00, 0xF8, 0x1F, 0x00, 0xE4, 0xE4, 0xE4, 0xE4];
    for (name, internal, block) in [
        ("dxt1", 0x83F0, &block8[..]),
        ("dxt1a", 0x83F1, &block8[..]),
        ("dxt3", 0x83F2, &block16[..]),
        ("dxt5", 0x83F3, &block16[..]),
        ("etc1", 0x8D64, &block8[..]),
        ("etc2_rgb", 0x9274, &block8[..]),
        ("etc2_a1", 0x9276, &block8[..]),
        ("etc2_rgba", 0x9278, &block16[..]),
        ("bc4", 0x8DBB, &block8[..]),
        ("bc5", 0x8DBD, &block16[..]),
        ("latc1", 0x8C70, &block8[..]),
        ("latc2", 0x8C72, &block16[..]),
    ] {
        fs::write(format!("{dir}/{name}_4x4.ktx"), ktx(0, internal, 4, 4, &orient, block)).unwrap();
    }

    // Big-endian header
    let mut be = IDENTIFIER.to_vec();
    for v in [0x0403_0201u32, 0x1401, 1, 0x1908, 0x8058, 0x1908, 1, 1, 0, 0, 1, 1, 0, 4] {
        be.extend_from_slice(&v.to_be_bytes());
    }
    be.extend_from_slice(&[1, 2, 3, 4]);
    fs::write(format!("{dir}/rgba_big_endian.ktx"), be).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/just_identifier.bin"), IDENTIFIER).unwrap();
    let mut bad_kv = ktx(0x1908, 0x8058, 1, 1, &[0xFF, 0xFF, 0xFF, 0x7F], &[0; 4]);
    bad_kv.truncate(80);
    fs::write(format!("{dir}/bad_kv.bin"), bad_kv).unwrap();

    println!("Generated seed corpus in {dir}/");
}
