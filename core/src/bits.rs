//! Bit/byte packing shared by both directions

use crate::params::Mode;

/// Expand bytes into one bit per element, most-significant bit first
pub fn bytes_to_bits(bytes: &[u8]) -> Vec<u8> {
    let mut bits = Vec::with_capacity(bytes.len() * 8);
    for &byte in bytes {
        for shift in (0..8).rev() {
            bits.push((byte >> shift) & 1);
        }
    }
    bits
}

/// Pack groups of 8 bits (MSB first) into bytes.
///
/// A trailing group shorter than 8 is dropped. Any nonzero element counts as a 1.
pub fn bits_to_bytes(bits: &[u8]) -> Vec<u8> {
    bits.chunks_exact(8)
        .map(|group| {
            group
                .iter()
                .fold(0u8, |acc, &bit| (acc << 1) | u8::from(bit != 0))
        })
        .collect()
}

/// Symbol sequence for a byte buffer under the given mode
pub fn expand_symbols(data: &[u8], mode: Mode) -> Vec<u8> {
    match mode {
        Mode::Bit => bytes_to_bits(data),
        Mode::Byte => data.to_vec(),
    }
}

/// Inverse of [`expand_symbols`]
pub fn pack_symbols(symbols: Vec<u8>, mode: Mode) -> Vec<u8> {
    match mode {
        Mode::Bit => bits_to_bytes(&symbols),
        Mode::Byte => symbols,
    }
}
