//! Seam to the per-slot voice/data payload decoder.

use crate::sync::SyncPattern;

/// Per-slot payload decoder contract. One instance exists per timeslot and
/// owns all state it accumulates across bursts; the CAI layer feeds it every
/// frame's payload bits together with the recognized sync role, if any.
pub trait SlotDecoder {
    /// Consume one burst's payload bits (bit-per-byte, everything beyond the
    /// CACH). Returns whether audio for this slot should be unmuted.
    fn load_slot(&mut self, payload: &[u8], sync: Option<SyncPattern>) -> bool;
}

/// Slot decoder that discards everything and never unmutes, for receivers
/// that only care about CACH signalling.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSlot;

impl SlotDecoder for NullSlot {
    fn load_slot(&mut self, _payload: &[u8], _sync: Option<SyncPattern>) -> bool {
        false
    }
}
