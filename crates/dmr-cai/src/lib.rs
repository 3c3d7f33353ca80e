//! DMR Common Air Interface frame decoder
//!
//! Consumes demodulated dibit bursts, recovers slot synchronization by fuzzy
//! matching against the known sync patterns, tracks which TDMA timeslot is
//! active, and extracts/error-corrects the CACH signalling carried between
//! bursts (TACT field and Short Link Control).
//!
//! The per-slot voice/data payload decoder is an external collaborator
//! behind the [`SlotDecoder`] trait.

pub mod cach;
pub mod cai;
pub mod short_lc;
pub mod slot;
pub mod sync;
pub mod timeslot;

// Re-export commonly used items
pub use cach::{Lcss, Tact};
pub use cai::{CaiDecoder, FRAME_BITS, FRAME_SYMBOLS, FrameResult};
pub use short_lc::{ShortLc, ShortLcErr};
pub use slot::{NullSlot, SlotDecoder};
pub use sync::SyncPattern;
pub use timeslot::{ChannelTracker, Timeslot};
