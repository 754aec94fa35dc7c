//! Tick-driven reveal of progression changes
//!
//! One `RevealSequencer` per displayed progression instance:
//! - Track switches and decreases snap instantly
//! - Gains count up over a fixed duration
//! - Every crossed level boundary holds a full bar, then emits `LevelUp`
//! - No shared state between instances

pub mod state;
pub mod tick;

pub use state::{CountUp, ProgressFrame, RevealEvent, RevealPhase, RevealState};

use crate::progress::{Curve, LevelProgress, ProgressionSnapshot, TrackCurves, compute_progress};
use crate::settings::RevealSettings;

/// Owns the reveal state for one displayed progression
#[derive(Debug)]
pub struct RevealSequencer {
    curves: TrackCurves,
    settings: RevealSettings,
    state: RevealState,
    disposed: bool,
}

impl RevealSequencer {
    /// Create from the first snapshot, displayed without animation
    pub fn new(curves: TrackCurves, settings: RevealSettings, snapshot: ProgressionSnapshot) -> Self {
        let sequencer = Self {
            curves,
            settings,
            state: RevealState::seeded(&snapshot),
            disposed: false,
        };
        sequencer.report_integrity(&snapshot);
        sequencer
    }

    /// Feed a new snapshot; returns events fired synchronously
    pub fn submit_snapshot(&mut self, snapshot: ProgressionSnapshot) -> Vec<RevealEvent> {
        if self.disposed {
            log::debug!("Ignoring snapshot after dispose");
            return Vec::new();
        }
        self.report_integrity(&snapshot);
        let curve = self.curves.for_track(snapshot.track);
        tick::submit_snapshot(&mut self.state, &snapshot, curve, &self.settings)
    }

    /// Advance by one host tick of `dt` seconds
    pub fn tick(&mut self, dt: f32) -> Vec<RevealEvent> {
        if self.disposed {
            return Vec::new();
        }
        let curve = self.curves.for_track(self.state.track);
        tick::tick(&mut self.state, curve, &self.settings, dt)
    }

    /// Release the sequencer; later ticks and snapshots are ignored
    pub fn dispose(&mut self) {
        if !self.disposed {
            log::debug!("Reveal sequencer for {:?} disposed", self.state.track);
        }
        self.disposed = true;
        self.state.phase = RevealPhase::Idle;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn phase(&self) -> RevealPhase {
        self.state.phase
    }

    pub fn is_animating(&self) -> bool {
        self.state.phase.is_animating()
    }

    pub fn state(&self) -> &RevealState {
        &self.state
    }

    /// Progress for what is currently displayed
    pub fn progress(&self) -> ProgressFrame {
        tick::frame(&self.state, self.curve())
    }

    pub fn settings(&self) -> &RevealSettings {
        &self.settings
    }

    /// Replace settings; an in-flight count picks them up on the next tick
    pub fn set_settings(&mut self, settings: RevealSettings) {
        self.settings = settings;
    }

    fn curve(&self) -> &dyn Curve {
        self.curves.for_track(self.state.track)
    }

    fn report_integrity(&self, snapshot: &ProgressionSnapshot) {
        let curve = self.curves.for_track(snapshot.track);
        let LevelProgress { warning, .. } = compute_progress(snapshot, curve);
        if let Some(warning) = warning {
            log::warn!(
                "Progression data on {:?}: {} (level {}, xp {})",
                snapshot.track,
                warning.as_str(),
                snapshot.level,
                snapshot.xp
            );
        }
    }
}
