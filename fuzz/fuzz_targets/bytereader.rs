#![no_main]

use bytestream::{decode_cp1251, ByteReader, Width};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut reader = ByteReader::new(data);
    let mut idx = 0usize;

    // Use input bytes to drive a bounded sequence of operations.
    while idx < data.len() && idx < 1024 {
        let op = data[idx] % 6;
        idx += 1;

        let width = match data.get(idx).copied().unwrap_or(0) % 3 {
            0 => Width::One,
            1 => Width::Two,
            _ => Width::Four,
        };
        match op {
            0 => {
                let _ = reader.read_u8();
            }
            1 => {
                let _ = reader.read_unsigned(width);
            }
            2 => {
                let _ = reader.read_signed(width);
            }
            3 => {
                let _ = reader.read_string(width);
            }
            4 => {
                let len = usize::from(data[idx - 1]);
                let _ = reader.read_bytes(len);
            }
            _ => {
                let _ = reader.expect_end();
            }
        }
    }

    let _ = decode_cp1251(data);
});
