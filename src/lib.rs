//! XP Reveal - progression display and reveal sequencing
//!
//! Core modules:
//! - `progress`: Snapshots, level curves and progress-bar math
//! - `reveal`: Tick-driven count-up and level-up state machine
//! - `burst`: One-shot "XP claimed" timeline
//! - `host`: Callback surface for the embedding UI
//! - `settings`: Timing and accessibility configuration

pub mod burst;
pub mod easing;
pub mod host;
pub mod progress;
pub mod reveal;
pub mod settings;

pub use burst::{BurstEvent, BurstPhase, Claim, ClaimBurst, LevelUpGrant, start_claim_burst};
pub use easing::Easing;
pub use host::{ProgressHost, dispatch_burst, dispatch_reveal};
pub use progress::{
    Curve, FnCurve, IntegrityWarning, LevelProgress, PowerCurve, ProgressionSnapshot, TableCurve,
    TrackCurves, TrackId, compute_progress, level_for_xp,
};
pub use reveal::{ProgressFrame, RevealEvent, RevealPhase, RevealSequencer, RevealState};
pub use settings::{BurstTimings, RevealSettings};

/// Engine timing constants
pub mod consts {
    /// Host tick interval the defaults are tuned for (60 Hz)
    pub const TICK_DT: f32 = 1.0 / 60.0;

    /// Count-up duration for an XP gain (seconds)
    pub const COUNT_DURATION: f32 = 0.8;
    /// Hold on a full bar before the level number changes (seconds)
    pub const LEVEL_UP_PAUSE: f32 = 0.35;

    /// Claim burst: delay before the amount appears
    pub const BURST_ENTER_DELAY: f32 = 0.15;
    /// Claim burst: full-emphasis hold
    pub const BURST_HOLD: f32 = 1.0;
    /// Claim burst: level-up block (badge + unlocked rewards)
    pub const BURST_LEVEL_UP_REVEAL: f32 = 1.6;
    /// Claim burst: fade/shrink out
    pub const BURST_EXIT: f32 = 0.3;

    /// Upper bound for level searches against a curve
    pub const MAX_LEVEL: u32 = 10_000;
}
