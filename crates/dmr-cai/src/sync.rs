//! Burst synchronization patterns (ETSI TS 102 361-1, clause 9.1.1).

/// Maximum Hamming distance at which a received 48-bit sync field is still
/// accepted as a catalog pattern.
pub const SYNC_THRESHOLD: u32 = 6;

/// Role of a 48-bit synchronization pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPattern {
    /// Base station sourced voice
    BsVoice,
    /// Base station sourced data
    BsData,
    /// Mobile station sourced voice
    MsVoice,
    /// Mobile station sourced data
    MsData,
    /// Mobile station reverse channel
    MsRc,
    /// Direct mode timeslot 1 voice
    DmoVoiceTs1,
    /// Direct mode timeslot 1 data
    DmoDataTs1,
    /// Direct mode timeslot 2 voice
    DmoVoiceTs2,
    /// Direct mode timeslot 2 data
    DmoDataTs2,
}

impl SyncPattern {
    /// Patterns in match order; the first entry within the distance threshold
    /// wins, so the most common roles come first.
    pub const CATALOG: [SyncPattern; 9] = [
        SyncPattern::BsVoice,
        SyncPattern::BsData,
        SyncPattern::MsVoice,
        SyncPattern::MsData,
        SyncPattern::MsRc,
        SyncPattern::DmoVoiceTs1,
        SyncPattern::DmoDataTs1,
        SyncPattern::DmoVoiceTs2,
        SyncPattern::DmoDataTs2,
    ];

    /// The exact 48-bit sync magic for this role.
    pub fn magic(self) -> u64 {
        match self {
            SyncPattern::BsVoice => 0x755F_D7DF_75F7,
            SyncPattern::BsData => 0xDFF5_7D75_DF5D,
            SyncPattern::MsVoice => 0x7F7D_5DD5_7DFD,
            SyncPattern::MsData => 0xD5D7_F77F_D757,
            SyncPattern::MsRc => 0x77D5_5F7D_FD77,
            SyncPattern::DmoVoiceTs1 => 0x5D57_7F77_57FF,
            SyncPattern::DmoDataTs1 => 0xF7FD_D5DD_FD55,
            SyncPattern::DmoVoiceTs2 => 0x7DFF_D5F5_5D5F,
            SyncPattern::DmoDataTs2 => 0xD755_7F5F_F7F5,
        }
    }

    /// Fuzzy-match a received sync field against the catalog. Bit errors up
    /// to [`SYNC_THRESHOLD`] are tolerated; returns None when every pattern
    /// is further away than that.
    pub fn match_field(field: u64) -> Option<SyncPattern> {
        Self::CATALOG
            .iter()
            .copied()
            .find(|p| (field ^ p.magic()).count_ones() <= SYNC_THRESHOLD)
    }
}
