//! Short Link Control decoding (ETSI TS 102 361-1, clause 9.1.6 and annex B).
//!
//! A Short LC sequence spans four CACH fragments of 17 bits each. The 68
//! collected bits hold three interleaved Hamming (17,12,3) codewords plus a
//! cross-block parity row; after FEC stripping, 36 bits remain of which the
//! last eight are a CRC-8.

use dmr_core::{bits, crc8, hamming};

/// Collected CACH payload bits needed for one decode attempt:
/// four fragments of 17 bits.
pub const SHORT_LC_BITS: usize = 68;

/// Decoded Short LC payload: 4-bit opcode plus three data octets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortLc {
    pub opcode: u8,
    pub data: [u8; 3],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortLcErr {
    /// Fewer fragments collected than a full LC sequence carries,
    /// e.g. an End fragment with no preceding Begin.
    Truncated { need: usize, got: usize },
    /// One of the three Hamming (17,12,3) blocks was unrecoverable.
    FecUnrecoverable { block: usize },
    /// The cross-block parity relation failed at `index`.
    ParityMismatch { index: usize },
    /// Nonzero CRC-8 residual over the 36 post-FEC bits.
    CrcMismatch { residual: u8 },
}

/// Decode an assembled CACH signalling sequence into a Short LC payload.
/// Any FEC, parity or CRC failure aborts without a partial result.
pub fn decode_short_lc(sig: &[u8]) -> Result<ShortLc, ShortLcErr> {
    if sig.len() < SHORT_LC_BITS {
        return Err(ShortLcErr::Truncated {
            need: SHORT_LC_BITS,
            got: sig.len(),
        });
    }

    // Deinterleave. The (i*4) mod 67 stride spreads burst errors across the
    // three codewords; the final bit sits outside the interleave.
    let mut wrk = [0u8; SHORT_LC_BITS];
    for (i, w) in wrk.iter_mut().enumerate().take(67) {
        *w = sig[(i * 4) % 67] & 1;
    }
    wrk[67] = sig[67] & 1;

    // Error-correct the three Hamming blocks in place.
    for blk in 0..3 {
        if !hamming::decode_17123(&mut wrk[blk * 17..(blk + 1) * 17]) {
            return Err(ShortLcErr::FecUnrecoverable { block: blk });
        }
    }

    // The trailing 17 bits must equal the XOR of the three codewords.
    for i in 0..17 {
        if wrk[i + 51] != wrk[i] ^ wrk[i + 17] ^ wrk[i + 34] {
            return Err(ShortLcErr::ParityMismatch { index: i });
        }
    }

    // Strip the FEC redundancy: keep the 12 data bits of each block,
    // leaving 36 contiguous bits.
    wrk.copy_within(17..29, 12);
    wrk.copy_within(34..46, 24);

    // The last 8 of the 36 bits are the CRC over the first 28.
    let residual = crc8::crc8_bits(&wrk[..36]);
    if residual != 0 {
        return Err(ShortLcErr::CrcMismatch { residual });
    }

    Ok(ShortLc {
        opcode: bits::load_bits(&wrk[0..4]) as u8,
        data: [
            bits::load_bits(&wrk[4..12]) as u8,
            bits::load_bits(&wrk[12..20]) as u8,
            bits::load_bits(&wrk[20..28]) as u8,
        ],
    })
}

/// Build the interleaved 68-bit CACH signalling sequence carrying a payload.
/// Inverse of [`decode_short_lc`]; this is the base-station transmit path.
pub fn encode_short_lc(lc: &ShortLc) -> [u8; SHORT_LC_BITS] {
    // 28 payload bits plus CRC-8.
    let mut data = [0u8; 36];
    bits::store_bits(&mut data[0..4], lc.opcode as u64, 4);
    for (oct, &v) in lc.data.iter().enumerate() {
        bits::store_bits(&mut data[4 + oct * 8..12 + oct * 8], v as u64, 8);
    }
    let crc = crc8::crc8_bits(&data[..28]);
    bits::store_bits(&mut data[28..36], crc as u64, 8);

    // Three Hamming (17,12,3) codewords, then the parity row.
    let mut wrk = [0u8; SHORT_LC_BITS];
    for blk in 0..3 {
        wrk[blk * 17..blk * 17 + 12].copy_from_slice(&data[blk * 12..(blk + 1) * 12]);
        hamming::encode_17123(&mut wrk[blk * 17..(blk + 1) * 17]);
    }
    for i in 0..17 {
        wrk[i + 51] = wrk[i] ^ wrk[i + 17] ^ wrk[i + 34];
    }

    // Interleave.
    let mut sig = [0u8; SHORT_LC_BITS];
    for (i, &w) in wrk.iter().enumerate().take(67) {
        sig[(i * 4) % 67] = w;
    }
    sig[67] = wrk[67];
    sig
}
