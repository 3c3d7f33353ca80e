//! Common Announcement Channel extraction (ETSI TS 102 361-1, clause 9.1.6).
//!
//! The 24-bit CACH carried ahead of each base-station burst interleaves a
//! Hamming-protected TACT field with 17 payload bits of a Short LC or CSBK
//! fragment. Bit positions of both fields are protocol constants.

use dmr_core::hamming;

/// CACH width in bits.
pub const CACH_BITS: usize = 24;

/// Positions of the 7 TACT codeword bits within the CACH.
pub const TACT_BITS: [usize; 7] = [0, 4, 8, 12, 14, 18, 22];

/// Positions of the 17 fragment payload bits within the CACH.
pub const PAYLOAD_BITS: [usize; 17] = [1, 2, 3, 5, 6, 7, 9, 10, 11, 13, 15, 16, 17, 19, 20, 21, 23];

/// Link Control start/stop code, TACT bits 1-0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lcss {
    /// Begin a CSBK sequence
    BeginCsbk,
    /// Begin a Short LC sequence
    BeginShortLc,
    /// Last fragment of a Short LC or CSBK sequence
    End,
    /// Intermediate fragment
    Continue,
}

impl Lcss {
    fn from_bits(v: u8) -> Lcss {
        match v & 3 {
            0 => Lcss::BeginCsbk,
            1 => Lcss::BeginShortLc,
            2 => Lcss::End,
            _ => Lcss::Continue,
        }
    }

    pub fn bits(self) -> u8 {
        match self {
            Lcss::BeginCsbk => 0,
            Lcss::BeginShortLc => 1,
            Lcss::End => 2,
            Lcss::Continue => 3,
        }
    }
}

/// Decoded TACT field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tact {
    /// Access type (inbound channel busy/idle); not used by the CAI layer.
    pub access_type: u8,
    /// TDMA channel bit, fed into channel tracking.
    pub tdma_channel: u8,
    /// Fragment start/stop code.
    pub lcss: Lcss,
}

/// Gather and error-correct the TACT field from a frame's CACH bits.
/// `cach` must hold the first [`CACH_BITS`] bits of the frame.
pub fn decode_tact(cach: &[u8]) -> Tact {
    let mut cw = [0u8; 7];
    for (i, &pos) in TACT_BITS.iter().enumerate() {
        cw[i] = cach[pos] & 1;
    }
    let tact = hamming::decode_743(&mut cw);
    Tact {
        access_type: (tact >> 3) & 1,
        tdma_channel: (tact >> 2) & 1,
        lcss: Lcss::from_bits(tact & 3),
    }
}

/// Append this CACH's 17 fragment payload bits to a signalling buffer.
pub fn append_payload(sig: &mut Vec<u8>, cach: &[u8]) {
    for &pos in PAYLOAD_BITS.iter() {
        sig.push(cach[pos] & 1);
    }
}

/// Build a CACH for transmit: Hamming-protected TACT interleaved with one
/// 17-bit fragment. Inverse of [`decode_tact`] plus [`append_payload`].
pub fn encode_cach(tact: Tact, fragment: &[u8; 17]) -> [u8; CACH_BITS] {
    let nibble = ((tact.access_type & 1) << 3) | ((tact.tdma_channel & 1) << 2) | tact.lcss.bits();
    let mut cw = [0u8; 7];
    for (i, c) in cw.iter_mut().enumerate().take(4) {
        *c = (nibble >> (3 - i)) & 1;
    }
    hamming::encode_743(&mut cw);

    let mut cach = [0u8; CACH_BITS];
    for (i, &pos) in TACT_BITS.iter().enumerate() {
        cach[pos] = cw[i];
    }
    for (i, &pos) in PAYLOAD_BITS.iter().enumerate() {
        cach[pos] = fragment[i] & 1;
    }
    cach
}
