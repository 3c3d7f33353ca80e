//! TDMA timeslot identity and stateful channel tracking.

/// One of the two time-division multiplexed logical channels on a carrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeslot {
    Ts1,
    Ts2,
}

impl Timeslot {
    pub fn index(self) -> usize {
        match self {
            Timeslot::Ts1 => 0,
            Timeslot::Ts2 => 1,
        }
    }

    pub fn bit(self) -> u8 {
        self.index() as u8
    }

    /// The peer slot.
    pub fn other(self) -> Timeslot {
        match self {
            Timeslot::Ts1 => Timeslot::Ts2,
            Timeslot::Ts2 => Timeslot::Ts1,
        }
    }
}

/// Maps the low 3 bits of the tracking register (recent slot-assignment
/// history, newest bit in the LSB) to the active slot. Encodes the expected
/// TDMA slot alternation for each history pattern.
const SLOT_IDS: [Timeslot; 8] = [
    Timeslot::Ts1,
    Timeslot::Ts2,
    Timeslot::Ts1,
    Timeslot::Ts1,
    Timeslot::Ts2,
    Timeslot::Ts2,
    Timeslot::Ts1,
    Timeslot::Ts2,
];

/// Tracks which timeslot is active across bursts.
///
/// The active slot is a pure function of the update history: replaying the
/// same sequence of [`force`](Self::force), [`push_bit`](Self::push_bit) and
/// [`infer`](Self::infer) calls from a fresh tracker always yields the same
/// state.
#[derive(Debug, Clone)]
pub struct ChannelTracker {
    shift_reg: u8,
    active: Timeslot,
}

impl ChannelTracker {
    pub fn new() -> Self {
        ChannelTracker {
            shift_reg: 0,
            active: Timeslot::Ts1,
        }
    }

    pub fn active(&self) -> Timeslot {
        self.active
    }

    /// Explicit assignment, on an unambiguous direct-mode voice sync.
    pub fn force(&mut self, ts: Timeslot) {
        self.shift_reg = ts.bit();
        self.active = ts;
    }

    /// Feed the TACT TDMA-channel bit received in a CACH.
    pub fn push_bit(&mut self, bit: u8) {
        self.shift_reg = (self.shift_reg << 1) | (bit & 1);
        self.active = SLOT_IDS[(self.shift_reg & 7) as usize];
    }

    /// No usable sync in this frame: assume the slots alternated and shift in
    /// the complement of the currently active slot.
    pub fn infer(&mut self) {
        self.push_bit(self.active.other().bit());
    }
}

impl Default for ChannelTracker {
    fn default() -> Self {
        Self::new()
    }
}
