//! CRC-8 over bit-per-byte slices, as used for Short LC validation.

pub const GEN_POLY: u8 = 0x07; // x^8 + x^2 + x + 1

/// CRC-8 over unpacked bits, MSB first, zero initial value.
/// Running this over a payload with its checksum appended yields a zero
/// residual when the checksum is valid.
pub fn crc8_bits(bits: &[u8]) -> u8 {
    let mut crc = 0u8;
    for &b in bits {
        let feedback = (crc >> 7) ^ (b & 1);
        crc <<= 1;
        if feedback != 0 {
            crc ^= GEN_POLY;
        }
    }
    crc
}
