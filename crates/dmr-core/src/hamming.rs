//! Hamming block codes used by the DMR CAI (ETSI TS 102 361-1, annex B).
//!
//! All functions operate on bit-per-byte slices. Codewords are laid out data
//! bits first, parity bits last.

/// Parity checks for Hamming (7,4,3) over data bits `d[0..4]`.
fn h743_checks(d: &[u8]) -> [u8; 3] {
    [d[0] ^ d[1] ^ d[2], d[1] ^ d[2] ^ d[3], d[0] ^ d[1] ^ d[3]]
}

/// Fill the parity bits `cw[4..7]` from the data bits `cw[0..4]`.
pub fn encode_743(cw: &mut [u8]) {
    let c = h743_checks(cw);
    cw[4..7].copy_from_slice(&c);
}

/// Correct a 7-bit Hamming (7,4,3) codeword in place and return the 4 data
/// bits packed MSB first. Every nonzero syndrome maps to one bit position, so
/// the decode always yields a nibble; errors beyond one bit decode wrongly
/// rather than being detected.
pub fn decode_743(cw: &mut [u8]) -> u8 {
    let c = h743_checks(cw);
    let mut syndrome = 0u8;
    for (i, &ci) in c.iter().enumerate() {
        if ci != cw[4 + i] & 1 {
            syndrome |= 1 << i;
        }
    }
    match syndrome {
        0 => {}
        0x05 => cw[0] ^= 1,
        0x07 => cw[1] ^= 1,
        0x03 => cw[2] ^= 1,
        0x06 => cw[3] ^= 1,
        s => cw[4 + (s.trailing_zeros() as usize)] ^= 1, // 0x01/0x02/0x04: parity bit
    }
    (cw[0] << 3) | (cw[1] << 2) | (cw[2] << 1) | cw[3]
}

/// Syndrome column of each data bit of Hamming (17,12,3); parity bits have
/// the unit columns 0x01..0x10.
const H17123_COLUMNS: [u8; 12] = [
    0x0B, 0x17, 0x0F, 0x1F, 0x1E, 0x1C, 0x19, 0x13, 0x06, 0x0D, 0x1A, 0x14,
];

/// Parity checks for Hamming (17,12,3) over data bits `d[0..12]`.
fn h17123_checks(d: &[u8]) -> [u8; 5] {
    [
        d[0] ^ d[1] ^ d[2] ^ d[3] ^ d[6] ^ d[7] ^ d[9],
        d[0] ^ d[1] ^ d[2] ^ d[3] ^ d[4] ^ d[7] ^ d[8] ^ d[10],
        d[1] ^ d[2] ^ d[3] ^ d[4] ^ d[5] ^ d[8] ^ d[9] ^ d[11],
        d[0] ^ d[2] ^ d[3] ^ d[4] ^ d[5] ^ d[6] ^ d[9] ^ d[10],
        d[1] ^ d[3] ^ d[4] ^ d[5] ^ d[6] ^ d[7] ^ d[10] ^ d[11],
    ]
}

/// Fill the parity bits `cw[12..17]` from the data bits `cw[0..12]`.
pub fn encode_17123(cw: &mut [u8]) {
    let c = h17123_checks(cw);
    cw[12..17].copy_from_slice(&c);
}

/// Single-error correction of a 17-bit Hamming (17,12,3) codeword in place.
/// Returns false if the syndrome does not correspond to any single-bit error,
/// i.e. the block is unrecoverable.
pub fn decode_17123(cw: &mut [u8]) -> bool {
    let c = h17123_checks(cw);
    let mut syndrome = 0u8;
    for (i, &ci) in c.iter().enumerate() {
        if ci != cw[12 + i] & 1 {
            syndrome |= 1 << i;
        }
    }
    if syndrome == 0 {
        return true;
    }
    if syndrome.count_ones() == 1 {
        cw[12 + syndrome.trailing_zeros() as usize] ^= 1;
        return true;
    }
    for (i, &col) in H17123_COLUMNS.iter().enumerate() {
        if col == syndrome {
            cw[i] ^= 1;
            return true;
        }
    }
    false
}
