//! Bit-level helpers for burst assembly.
//!
//! The CAI pipeline works on unpacked bits, one bit per `u8`. Where a numeric
//! value is involved, the first slice element is the most significant bit.

/// Expand dibit symbols into individual bits, two per symbol, MSB first.
/// `bits` must hold at least `2 * dibits.len()` entries.
pub fn dibits_to_bits(bits: &mut [u8], dibits: &[u8]) {
    assert!(
        bits.len() >= dibits.len() * 2,
        "dibits_to_bits: output slice too small ({} bits for {} dibits)",
        bits.len(),
        dibits.len()
    );
    for (i, &d) in dibits.iter().enumerate() {
        bits[2 * i] = (d >> 1) & 1;
        bits[2 * i + 1] = d & 1;
    }
}

/// Load up to 64 bits from a bit-per-byte slice into a `u64`, MSB first.
pub fn load_bits(bits: &[u8]) -> u64 {
    assert!(bits.len() <= 64, "load_bits: at most 64 bits, got {}", bits.len());
    bits.iter().fold(0u64, |acc, &b| (acc << 1) | (b & 1) as u64)
}

/// Store the low `num_bits` of `value` into a bit-per-byte slice, MSB first.
pub fn store_bits(bits: &mut [u8], value: u64, num_bits: usize) {
    assert!(num_bits <= 64 && bits.len() >= num_bits);
    for i in 0..num_bits {
        bits[i] = ((value >> (num_bits - 1 - i)) & 1) as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dibit_expansion() {
        let dibits = [0b00, 0b01, 0b10, 0b11];
        let mut bits = [9u8; 8];
        dibits_to_bits(&mut bits, &dibits);
        assert_eq!(bits, [0, 0, 0, 1, 1, 0, 1, 1]);
    }

    #[test]
    fn test_load_bits_msb_first() {
        assert_eq!(load_bits(&[1, 0, 1, 1]), 0b1011);
        assert_eq!(load_bits(&[]), 0);
    }

    #[test]
    fn test_store_load_roundtrip() {
        let mut buf = [0u8; 48];
        store_bits(&mut buf, 0x755F_D7DF_75F7, 48);
        assert_eq!(load_bits(&buf), 0x755F_D7DF_75F7);
    }

    #[test]
    #[should_panic(expected = "output slice too small")]
    fn test_dibit_expansion_short_output() {
        let mut bits = [0u8; 3];
        dibits_to_bits(&mut bits, &[0, 1]);
    }
}
