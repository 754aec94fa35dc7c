//! Reveal state and event types
//!
//! The sequencer's whole state is one `RevealState` value; `tick.rs` holds
//! the transition functions that advance it.

use serde::{Deserialize, Serialize};

use crate::easing::Easing;
use crate::progress::{LevelProgress, ProgressionSnapshot, TrackId};

/// In-flight count-up
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CountUp {
    /// Seconds since the count started (frozen during level-up holds)
    pub elapsed: f32,
    /// Interpolated XP as of the last tick
    pub current: f64,
    /// Value the curve was last anchored at
    pub anchor_xp: f64,
    /// Eased progress at the anchor
    pub anchor_ease: f32,
}

impl CountUp {
    pub fn start(from_xp: u64) -> Self {
        let from = from_xp as f64;
        Self {
            elapsed: 0.0,
            current: from,
            anchor_xp: from,
            anchor_ease: 0.0,
        }
    }

    /// Re-anchor at the current value, keeping elapsed time
    ///
    /// The remaining portion of the ease curve is stretched over the new
    /// distance, so the displayed value stays continuous and never drops.
    pub fn retarget(&mut self, target_xp: u64, duration: f32, easing: Easing) {
        self.current = self.current.min(target_xp as f64);
        self.anchor_xp = self.current;
        self.anchor_ease = easing.apply(time_fraction(self.elapsed, duration));
    }

    /// Interpolated value at the current elapsed time
    pub fn value_at(&self, target_xp: u64, duration: f32, easing: Easing) -> f64 {
        let target = target_xp as f64;
        let t = time_fraction(self.elapsed, duration);
        let remaining = 1.0 - self.anchor_ease;
        if t >= 1.0 || remaining <= f32::EPSILON {
            return target;
        }
        let k = ((easing.apply(t) - self.anchor_ease) / remaining).clamp(0.0, 1.0);
        self.anchor_xp + (target - self.anchor_xp) * f64::from(k)
    }

    pub fn is_finished(&self, duration: f32) -> bool {
        time_fraction(self.elapsed, duration) >= 1.0
    }
}

#[inline]
fn time_fraction(elapsed: f32, duration: f32) -> f32 {
    if duration > 0.0 {
        (elapsed / duration).clamp(0.0, 1.0)
    } else {
        1.0
    }
}

/// Sequencer phase
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RevealPhase {
    /// Nothing in flight, displayed == target
    Idle,
    /// Interpolating displayed XP toward the target
    Counting(CountUp),
    /// Bar is full; holding before the level number increments
    PendingLevelUp { count: CountUp, held: f32 },
    /// Transition finished; collapses to `Idle` in the same step
    Settled,
}

impl RevealPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            RevealPhase::Idle => "Idle",
            RevealPhase::Counting(_) => "Counting",
            RevealPhase::PendingLevelUp { .. } => "PendingLevelUp",
            RevealPhase::Settled => "Settled",
        }
    }

    pub fn is_animating(&self) -> bool {
        matches!(
            self,
            RevealPhase::Counting(_) | RevealPhase::PendingLevelUp { .. }
        )
    }
}

/// Everything the sequencer knows about one displayed track
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevealState {
    pub track: TrackId,
    /// Last committed-and-shown level
    pub displayed_level: u32,
    /// Last shown XP
    pub displayed_xp: u64,
    pub target_level: u32,
    pub target_xp: u64,
    pub phase: RevealPhase,
}

impl RevealState {
    /// Idle state showing `snapshot` as-is
    pub fn seeded(snapshot: &ProgressionSnapshot) -> Self {
        let level = snapshot.effective_level();
        Self {
            track: snapshot.track,
            displayed_level: level,
            displayed_xp: snapshot.xp,
            target_level: level,
            target_xp: snapshot.xp,
            phase: RevealPhase::Idle,
        }
    }

    /// What is on screen right now, as a snapshot
    pub fn displayed(&self) -> ProgressionSnapshot {
        ProgressionSnapshot::new(self.track, self.displayed_level, self.displayed_xp)
    }
}

/// Renderable progress for one tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressFrame {
    pub level: u32,
    pub xp: u64,
    pub xp_into_level: i64,
    pub xp_needed_for_level: i64,
    pub fraction: f32,
}

impl From<LevelProgress> for ProgressFrame {
    fn from(p: LevelProgress) -> Self {
        Self {
            level: p.level,
            xp: p.xp,
            xp_into_level: p.xp_into_level,
            xp_needed_for_level: p.xp_needed_for_level,
            fraction: p.fraction,
        }
    }
}

/// Outbound notifications, in emission order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RevealEvent {
    /// Displayed progress changed (every animated tick, and on reaching idle)
    ProgressChanged(ProgressFrame),
    /// One level boundary was committed
    LevelUp { level: u32 },
    /// An animated transition finished
    Settled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_up_reaches_target_at_duration() {
        let mut count = CountUp::start(100);
        count.elapsed = 0.8;
        assert_eq!(count.value_at(400, 0.8, Easing::EaseInOut), 400.0);

        count.elapsed = 0.4;
        let mid = count.value_at(400, 0.8, Easing::Linear);
        assert!((mid - 250.0).abs() < 1e-3);
    }

    #[test]
    fn test_zero_duration_is_immediate() {
        let count = CountUp::start(0);
        assert!(count.is_finished(0.0));
        assert_eq!(count.value_at(50, 0.0, Easing::Linear), 50.0);
    }

    #[test]
    fn test_retarget_is_continuous() {
        let mut count = CountUp::start(0);
        count.elapsed = 0.4;
        count.current = count.value_at(100, 0.8, Easing::EaseOut);
        let before = count.current;

        count.retarget(300, 0.8, Easing::EaseOut);
        let after = count.value_at(300, 0.8, Easing::EaseOut);
        assert!((after - before).abs() < 1e-6);

        count.elapsed = 0.6;
        assert!(count.value_at(300, 0.8, Easing::EaseOut) > before);
        count.elapsed = 0.8;
        assert_eq!(count.value_at(300, 0.8, Easing::EaseOut), 300.0);
    }

    #[test]
    fn test_retarget_below_current_clamps() {
        let mut count = CountUp::start(0);
        count.elapsed = 0.5;
        count.current = 80.5;
        count.retarget(80, 1.0, Easing::Linear);
        assert_eq!(count.value_at(80, 1.0, Easing::Linear), 80.0);
    }
}
