//! CAI frame orchestration: sync recovery, channel tracking, CACH handling.

use dmr_core::bits;

use crate::cach::{self, CACH_BITS, Lcss};
use crate::short_lc::{self, ShortLc};
use crate::slot::{NullSlot, SlotDecoder};
use crate::sync::SyncPattern;
use crate::timeslot::{ChannelTracker, Timeslot};

/// One TDMA burst is 144 dibit symbols.
pub const FRAME_SYMBOLS: usize = 144;
/// Burst length in bits: 24-bit CACH plus 264 payload bits.
pub const FRAME_BITS: usize = FRAME_SYMBOLS * 2;
/// Offset of the 48-bit embedded sync field within the frame.
const SYNC_OFFSET: usize = 132;

/// Outcome of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameResult {
    /// The recognized sync role, if the burst carried one within the bit
    /// error threshold.
    pub sync: Option<SyncPattern>,
    /// Unmute decision from the active slot's payload decoder.
    pub unmute: bool,
    /// Short LC payload completed by this frame's CACH, if any.
    pub short_lc: Option<ShortLc>,
}

/// Stateful CAI decoder for one physical receiver.
///
/// Owns the frame buffer, the channel tracker, the CACH signalling buffer
/// and the two per-slot payload decoders. Not reentrant: process one frame
/// to completion before the next, one instance per carrier.
pub struct CaiDecoder<S: SlotDecoder> {
    frame: [u8; FRAME_BITS],
    tracker: ChannelTracker,
    cach_sig: Vec<u8>,
    slot1: S,
    slot2: S,
}

impl CaiDecoder<NullSlot> {
    /// Decoder with no payload handling; only sync and CACH signalling.
    pub fn new() -> Self {
        Self::with_slots(NullSlot, NullSlot)
    }
}

impl Default for CaiDecoder<NullSlot> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SlotDecoder> CaiDecoder<S> {
    /// Build a decoder around two per-slot payload decoders.
    pub fn with_slots(slot1: S, slot2: S) -> Self {
        CaiDecoder {
            frame: [0; FRAME_BITS],
            tracker: ChannelTracker::new(),
            cach_sig: Vec::with_capacity(short_lc::SHORT_LC_BITS),
            slot1,
            slot2,
        }
    }

    /// The timeslot the tracker currently believes is on air.
    pub fn active_slot(&self) -> Timeslot {
        self.tracker.active()
    }

    pub fn slot(&self, ts: Timeslot) -> &S {
        match ts {
            Timeslot::Ts1 => &self.slot1,
            Timeslot::Ts2 => &self.slot2,
        }
    }

    /// Process one demodulated burst.
    pub fn load_frame(&mut self, symbols: &[u8; FRAME_SYMBOLS]) -> FrameResult {
        bits::dibits_to_bits(&mut self.frame, symbols);

        // The received sync field may not match any pattern exactly due to
        // bit errors. Matching snaps it to the catalog role, so errors in
        // the sync region never propagate downstream.
        let field = bits::load_bits(&self.frame[SYNC_OFFSET..SYNC_OFFSET + 48]);
        let sync = SyncPattern::match_field(field);

        let mut short_lc = None;
        match sync {
            Some(SyncPattern::BsVoice) | Some(SyncPattern::BsData) => {
                short_lc = self.extract_cach_fragment();
            }
            Some(SyncPattern::DmoVoiceTs1) => self.tracker.force(Timeslot::Ts1),
            Some(SyncPattern::DmoVoiceTs2) => self.tracker.force(Timeslot::Ts2),
            Some(_) => {}
            None => {
                // No usable sync: expected steady state for a share of
                // bursts. Assume the slots alternated.
                self.tracker.infer();
            }
        }

        // Hand the payload to whichever slot is active, explicitly or by
        // inference.
        let active = self.tracker.active();
        let payload = &self.frame[CACH_BITS..];
        let unmute = match active {
            Timeslot::Ts1 => self.slot1.load_slot(payload, sync),
            Timeslot::Ts2 => self.slot2.load_slot(payload, sync),
        };
        tracing::trace!("frame sync {:?} slot {:?} unmute {}", sync, active, unmute);

        FrameResult { sync, unmute, short_lc }
    }

    /// Handle the CACH of a base-station burst: TACT decode, channel
    /// tracking update, Short LC fragment collection.
    fn extract_cach_fragment(&mut self) -> Option<ShortLc> {
        let cach = &self.frame[..CACH_BITS];
        let tact = cach::decode_tact(cach);
        self.tracker.push_bit(tact.tdma_channel);

        match tact.lcss {
            Lcss::BeginCsbk => {
                // CSBK signalling is not collected.
                None
            }
            Lcss::BeginShortLc => {
                self.cach_sig.clear();
                cach::append_payload(&mut self.cach_sig, cach);
                None
            }
            Lcss::Continue => {
                cach::append_payload(&mut self.cach_sig, cach);
                None
            }
            Lcss::End => {
                cach::append_payload(&mut self.cach_sig, cach);
                match short_lc::decode_short_lc(&self.cach_sig) {
                    Ok(lc) => {
                        tracing::debug!(
                            "short LC slco=0x{:x} data={:02x} {:02x} {:02x}",
                            lc.opcode,
                            lc.data[0],
                            lc.data[1],
                            lc.data[2]
                        );
                        Some(lc)
                    }
                    Err(e) => {
                        // Stale bits stay in the buffer; the next Begin
                        // resets it.
                        tracing::debug!("short LC discarded: {:?}", e);
                        None
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cach::{Tact, encode_cach};
    use crate::short_lc::{SHORT_LC_BITS, encode_short_lc};

    /// Slot decoder recording every call it receives.
    #[derive(Debug, Default)]
    struct Recorder {
        calls: Vec<(usize, Option<SyncPattern>)>,
    }

    impl SlotDecoder for Recorder {
        fn load_slot(&mut self, payload: &[u8], sync: Option<SyncPattern>) -> bool {
            self.calls.push((payload.len(), sync));
            true
        }
    }

    fn pack_symbols(frame: &[u8; FRAME_BITS]) -> [u8; FRAME_SYMBOLS] {
        let mut sym = [0u8; FRAME_SYMBOLS];
        for (i, s) in sym.iter_mut().enumerate() {
            *s = (frame[2 * i] << 1) | frame[2 * i + 1];
        }
        sym
    }

    fn frame_with_sync(p: SyncPattern) -> [u8; FRAME_BITS] {
        let mut frame = [0u8; FRAME_BITS];
        dmr_core::bits::store_bits(&mut frame[SYNC_OFFSET..SYNC_OFFSET + 48], p.magic(), 48);
        frame
    }

    /// Base-station voice frame carrying the given TACT and CACH fragment.
    fn bs_frame(tc: u8, lcss: Lcss, fragment: &[u8; 17]) -> [u8; FRAME_SYMBOLS] {
        let mut frame = frame_with_sync(SyncPattern::BsVoice);
        let tact = Tact { access_type: 0, tdma_channel: tc, lcss };
        frame[..CACH_BITS].copy_from_slice(&encode_cach(tact, fragment));
        pack_symbols(&frame)
    }

    #[test]
    fn test_short_lc_across_four_frames() {
        let lc = ShortLc { opcode: 0x1, data: [0xDE, 0xAD, 0x42] };
        let sig = encode_short_lc(&lc);
        assert_eq!(sig.len(), SHORT_LC_BITS);

        // Begin, Continue, Continue, End with alternating TDMA channel bits.
        let seq = [
            (0, Lcss::BeginShortLc),
            (1, Lcss::Continue),
            (0, Lcss::Continue),
            (1, Lcss::End),
        ];
        let mut dec = CaiDecoder::with_slots(Recorder::default(), Recorder::default());

        let mut results = Vec::new();
        for (i, (tc, lcss)) in seq.into_iter().enumerate() {
            let fragment: [u8; 17] = sig[i * 17..(i + 1) * 17].try_into().unwrap();
            let symbols = bs_frame(tc, lcss, &fragment);
            results.push(dec.load_frame(&symbols));
        }

        for r in &results {
            assert_eq!(r.sync, Some(SyncPattern::BsVoice));
            assert!(r.unmute);
        }
        assert_eq!(results[0].short_lc, None);
        assert_eq!(results[1].short_lc, None);
        assert_eq!(results[2].short_lc, None);
        assert_eq!(results[3].short_lc, Some(lc));

        // TC bits 0,1,0,1 alternate the active slot, so each recorder saw
        // two bursts of 264 payload bits.
        assert_eq!(dec.slot(Timeslot::Ts1).calls.len(), 2);
        assert_eq!(dec.slot(Timeslot::Ts2).calls.len(), 2);
        for &(len, sync) in dec
            .slot(Timeslot::Ts1)
            .calls
            .iter()
            .chain(dec.slot(Timeslot::Ts2).calls.iter())
        {
            assert_eq!(len, FRAME_BITS - CACH_BITS);
            assert_eq!(sync, Some(SyncPattern::BsVoice));
        }
    }

    #[test]
    fn test_end_without_begin_is_harmless() {
        let mut dec = CaiDecoder::new();
        let symbols = bs_frame(0, Lcss::End, &[1; 17]); // End, no Begin before it
        let result = dec.load_frame(&symbols);
        assert_eq!(result.sync, Some(SyncPattern::BsVoice));
        assert_eq!(result.short_lc, None);
    }

    #[test]
    fn test_short_lc_survives_one_bit_error_per_codeword() {
        let lc = ShortLc { opcode: 0x8, data: [0x01, 0x02, 0x03] };
        let mut sig = encode_short_lc(&lc);
        // One flip per Hamming block, through the interleave.
        sig[(3 * 4) % 67] ^= 1; // block 0
        sig[(20 * 4) % 67] ^= 1; // block 1
        sig[(40 * 4) % 67] ^= 1; // block 2

        let seq = [
            (0, Lcss::BeginShortLc),
            (1, Lcss::Continue),
            (0, Lcss::Continue),
            (1, Lcss::End),
        ];
        let mut dec = CaiDecoder::new();
        let mut last = None;
        for (i, (tc, lcss)) in seq.into_iter().enumerate() {
            let fragment: [u8; 17] = sig[i * 17..(i + 1) * 17].try_into().unwrap();
            last = dec.load_frame(&bs_frame(tc, lcss, &fragment)).short_lc;
        }
        assert_eq!(last, Some(lc));
    }

    #[test]
    fn test_dmo_sync_forces_slot() {
        let mut dec = CaiDecoder::with_slots(Recorder::default(), Recorder::default());

        let r = dec.load_frame(&pack_symbols(&frame_with_sync(SyncPattern::DmoVoiceTs2)));
        assert_eq!(r.sync, Some(SyncPattern::DmoVoiceTs2));
        assert_eq!(dec.active_slot(), Timeslot::Ts2);
        assert_eq!(dec.slot(Timeslot::Ts2).calls.len(), 1);

        let r = dec.load_frame(&pack_symbols(&frame_with_sync(SyncPattern::DmoVoiceTs1)));
        assert_eq!(r.sync, Some(SyncPattern::DmoVoiceTs1));
        assert_eq!(dec.active_slot(), Timeslot::Ts1);
        assert_eq!(dec.slot(Timeslot::Ts1).calls.len(), 1);
    }

    #[test]
    fn test_missing_sync_alternates_slots() {
        let mut dec = CaiDecoder::with_slots(Recorder::default(), Recorder::default());
        dec.load_frame(&pack_symbols(&frame_with_sync(SyncPattern::DmoVoiceTs2)));
        assert_eq!(dec.active_slot(), Timeslot::Ts2);

        // An all-zero frame is nowhere near any sync pattern.
        let blank = [0u8; FRAME_SYMBOLS];
        let r = dec.load_frame(&blank);
        assert_eq!(r.sync, None);
        assert_eq!(dec.active_slot(), Timeslot::Ts1);
        let r = dec.load_frame(&blank);
        assert_eq!(r.sync, None);
        assert_eq!(dec.active_slot(), Timeslot::Ts2);
    }

    #[test]
    fn test_sync_tolerates_bit_errors() {
        let mut frame = frame_with_sync(SyncPattern::BsData);
        // Six errors within the sync field stay within the match threshold.
        for i in [0, 8, 16, 24, 32, 40] {
            frame[SYNC_OFFSET + i] ^= 1;
        }
        let mut dec = CaiDecoder::new();
        let r = dec.load_frame(&pack_symbols(&frame));
        assert_eq!(r.sync, Some(SyncPattern::BsData));
    }

    #[test]
    fn test_ms_sync_reported_without_tracker_update() {
        let mut dec = CaiDecoder::with_slots(Recorder::default(), Recorder::default());
        dec.load_frame(&pack_symbols(&frame_with_sync(SyncPattern::DmoVoiceTs1)));
        let before = dec.active_slot();

        let r = dec.load_frame(&pack_symbols(&frame_with_sync(SyncPattern::MsVoice)));
        assert_eq!(r.sync, Some(SyncPattern::MsVoice));
        assert_eq!(dec.active_slot(), before);
    }
}
