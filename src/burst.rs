//! One-shot "XP claimed" burst
//!
//! Each claim gets its own `ClaimBurst`, which walks a fixed timeline
//! exactly once:
//!
//! ```text
//! Entering -> Holding -> [LevelUpReveal] -> Exiting -> Done
//! ```
//!
//! `LevelUpReveal` only appears when the claim carried a level-up. After
//! `Done` (or `dispose`) the burst never emits again.

use serde::{Deserialize, Serialize};

use crate::settings::BurstTimings;

/// Level-up carried by a claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelUpGrant {
    pub new_level: u32,
    /// Rewards unlocked at this level, in display order (may be empty)
    pub unlocked_rewards: Vec<String>,
}

/// A completed claim action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    /// XP granted
    pub amount: u64,
    pub level_up: Option<LevelUpGrant>,
}

impl Claim {
    pub fn new(amount: u64) -> Self {
        Self {
            amount,
            level_up: None,
        }
    }

    pub fn with_level_up(mut self, new_level: u32, unlocked_rewards: Vec<String>) -> Self {
        self.level_up = Some(LevelUpGrant {
            new_level,
            unlocked_rewards,
        });
        self
    }

    pub fn leveled_up(&self) -> bool {
        self.level_up.is_some()
    }
}

/// Burst timeline phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BurstPhase {
    /// Delay before the amount is visible
    Entering,
    /// Amount shown at full emphasis
    Holding,
    /// Level-up badge plus unlocked rewards
    LevelUpReveal,
    /// Fade/shrink out
    Exiting,
    /// Finished; host should discard the burst
    Done,
}

impl BurstPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            BurstPhase::Entering => "Entering",
            BurstPhase::Holding => "Holding",
            BurstPhase::LevelUpReveal => "LevelUpReveal",
            BurstPhase::Exiting => "Exiting",
            BurstPhase::Done => "Done",
        }
    }
}

/// Burst lifecycle notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BurstEvent {
    PhaseChanged(BurstPhase),
    /// Fired exactly once, after `PhaseChanged(Done)`
    Complete,
}

/// One running burst
#[derive(Debug, Clone)]
pub struct ClaimBurst {
    claim: Claim,
    timings: BurstTimings,
    phase: BurstPhase,
    /// Seconds spent in the current phase
    elapsed: f32,
    /// `Entering` has been announced
    announced: bool,
    disposed: bool,
}

/// Flat-argument entry point
///
/// `new_level` is only read when `leveled_up` is set.
pub fn start_claim_burst(
    amount: u64,
    leveled_up: bool,
    new_level: u32,
    unlocked_rewards: Vec<String>,
    timings: BurstTimings,
) -> ClaimBurst {
    let mut claim = Claim::new(amount);
    if leveled_up {
        claim = claim.with_level_up(new_level, unlocked_rewards);
    } else if !unlocked_rewards.is_empty() {
        log::warn!(
            "Claim of {} XP lists {} reward(s) without a level-up; ignoring them",
            amount,
            unlocked_rewards.len()
        );
    }
    ClaimBurst::start(claim, timings)
}

impl ClaimBurst {
    /// Start a burst; `Entering` is announced on the first tick
    pub fn start(claim: Claim, timings: BurstTimings) -> Self {
        log::debug!(
            "Claim burst: {} XP{}",
            claim.amount,
            match &claim.level_up {
                Some(grant) => format!(", level {}", grant.new_level),
                None => String::new(),
            }
        );
        Self {
            claim,
            timings,
            phase: BurstPhase::Entering,
            elapsed: 0.0,
            announced: false,
            disposed: false,
        }
    }

    /// Advance by `dt` seconds
    ///
    /// A long `dt` may cross several phases; each one is still announced,
    /// in order.
    pub fn tick(&mut self, dt: f32) -> Vec<BurstEvent> {
        let mut events = Vec::new();
        if self.disposed || self.phase == BurstPhase::Done {
            return events;
        }

        if !self.announced {
            self.announced = true;
            events.push(BurstEvent::PhaseChanged(self.phase));
        }

        self.elapsed += if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        while self.phase != BurstPhase::Done && self.elapsed >= self.phase_duration(self.phase) {
            self.elapsed -= self.phase_duration(self.phase);
            self.phase = self.next_phase(self.phase);
            events.push(BurstEvent::PhaseChanged(self.phase));
        }

        if self.phase == BurstPhase::Done {
            self.elapsed = 0.0;
            events.push(BurstEvent::Complete);
        }

        events
    }

    /// Stop the burst; nothing fires afterwards
    pub fn dispose(&mut self) {
        self.disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn is_done(&self) -> bool {
        self.phase == BurstPhase::Done
    }

    pub fn phase(&self) -> BurstPhase {
        self.phase
    }

    pub fn claim(&self) -> &Claim {
        &self.claim
    }

    pub fn amount(&self) -> u64 {
        self.claim.amount
    }

    /// 0..1 position within the current phase (for fade/shrink)
    pub fn phase_progress(&self) -> f32 {
        let duration = self.phase_duration(self.phase);
        if self.phase == BurstPhase::Done {
            1.0
        } else if duration > 0.0 {
            (self.elapsed / duration).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Level-up block contents while it is on screen
    pub fn reveal(&self) -> Option<&LevelUpGrant> {
        match self.phase {
            BurstPhase::LevelUpReveal => self.claim.level_up.as_ref(),
            _ => None,
        }
    }

    fn phase_duration(&self, phase: BurstPhase) -> f32 {
        let t = &self.timings;
        match phase {
            BurstPhase::Entering => t.enter_delay,
            BurstPhase::Holding => t.hold,
            BurstPhase::LevelUpReveal => t.level_up_reveal,
            BurstPhase::Exiting => t.exit,
            BurstPhase::Done => f32::INFINITY,
        }
        .max(0.0)
    }

    fn next_phase(&self, phase: BurstPhase) -> BurstPhase {
        match phase {
            BurstPhase::Entering => BurstPhase::Holding,
            BurstPhase::Holding if self.claim.leveled_up() => BurstPhase::LevelUpReveal,
            BurstPhase::Holding | BurstPhase::LevelUpReveal => BurstPhase::Exiting,
            BurstPhase::Exiting | BurstPhase::Done => BurstPhase::Done,
        }
    }
}
