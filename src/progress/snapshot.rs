//! Progression snapshot value type

use serde::{Deserialize, Serialize};

/// Identity of a progression track
///
/// Only equality matters to the engine: two snapshots with different
/// tracks are a context switch, never an XP change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrackId {
    /// Overall player progression
    Player,
    /// Per-category progression, keyed by category id
    Category(u64),
}

/// Immutable (track, level, xp) triple fed to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionSnapshot {
    pub track: TrackId,
    /// Current level (1-based)
    pub level: u32,
    /// Cumulative XP on this track
    pub xp: u64,
}

impl ProgressionSnapshot {
    pub fn new(track: TrackId, level: u32, xp: u64) -> Self {
        Self { track, level, xp }
    }

    pub fn player(level: u32, xp: u64) -> Self {
        Self::new(TrackId::Player, level, xp)
    }

    pub fn category(id: u64, level: u32, xp: u64) -> Self {
        Self::new(TrackId::Category(id), level, xp)
    }

    /// Level with the 1-based floor applied
    #[inline]
    pub fn effective_level(&self) -> u32 {
        self.level.max(1)
    }

    /// True if `other` belongs to a different track
    #[inline]
    pub fn is_context_switch(&self, other: &ProgressionSnapshot) -> bool {
        self.track != other.track
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_switch_is_track_inequality() {
        let a = ProgressionSnapshot::category(7, 5, 900);
        let b = ProgressionSnapshot::category(7, 1, 0);
        let c = ProgressionSnapshot::category(8, 5, 900);

        assert!(!a.is_context_switch(&b));
        assert!(a.is_context_switch(&c));
        assert!(a.is_context_switch(&ProgressionSnapshot::player(5, 900)));
    }

    #[test]
    fn test_effective_level_floor() {
        assert_eq!(ProgressionSnapshot::player(0, 0).effective_level(), 1);
        assert_eq!(ProgressionSnapshot::player(4, 0).effective_level(), 4);
    }
}
