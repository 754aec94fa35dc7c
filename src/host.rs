//! Host callback surface
//!
//! Sequencers return plain event lists; a host that prefers callbacks
//! implements `ProgressHost` and forwards each list through `dispatch_*`.
//! Callbacks return nothing, so whatever the host does with a signal
//! (sound, haptics) cannot stall the engine.

use crate::burst::{BurstEvent, BurstPhase};
use crate::reveal::{ProgressFrame, RevealEvent};

/// Receiver for engine signals; every method defaults to a no-op
pub trait ProgressHost {
    fn on_progress_changed(&mut self, _frame: &ProgressFrame) {}

    fn on_level_up(&mut self, _new_level: u32) {}

    /// Reveal transition finished and the display is idle again
    fn on_reveal_settled(&mut self) {}

    fn on_burst_phase_changed(&mut self, _phase: BurstPhase) {}

    fn on_burst_complete(&mut self) {}
}

/// Forward reveal events in order
pub fn dispatch_reveal<H: ProgressHost + ?Sized>(events: &[RevealEvent], host: &mut H) {
    for event in events {
        match event {
            RevealEvent::ProgressChanged(frame) => host.on_progress_changed(frame),
            RevealEvent::LevelUp { level } => host.on_level_up(*level),
            RevealEvent::Settled => host.on_reveal_settled(),
        }
    }
}

/// Forward burst events in order
pub fn dispatch_burst<H: ProgressHost + ?Sized>(events: &[BurstEvent], host: &mut H) {
    for event in events {
        match event {
            BurstEvent::PhaseChanged(phase) => host.on_burst_phase_changed(*phase),
            BurstEvent::Complete => host.on_burst_complete(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::burst::{Claim, ClaimBurst};
    use crate::progress::{ProgressionSnapshot, TableCurve, TrackCurves};
    use crate::reveal::RevealSequencer;
    use crate::settings::{BurstTimings, RevealSettings};

    #[derive(Default)]
    struct Recorder {
        log: Vec<String>,
    }

    impl ProgressHost for Recorder {
        fn on_level_up(&mut self, new_level: u32) {
            self.log.push(format!("level {}", new_level));
        }

        fn on_burst_phase_changed(&mut self, phase: BurstPhase) {
            self.log.push(phase.as_str().to_string());
        }

        fn on_burst_complete(&mut self) {
            self.log.push("complete".to_string());
        }
    }

    #[test]
    fn test_dispatch_reveal_preserves_order() {
        let settings = RevealSettings {
            reduced_motion: true,
            ..Default::default()
        };
        let curves = TrackCurves::uniform(TableCurve::new(vec![0, 100, 400]));
        let mut seq = RevealSequencer::new(curves, settings, ProgressionSnapshot::player(1, 0));

        let mut host = Recorder::default();
        dispatch_reveal(&seq.submit_snapshot(ProgressionSnapshot::player(3, 450)), &mut host);
        assert_eq!(host.log, vec!["level 2", "level 3"]);
    }

    #[test]
    fn test_dispatch_burst() {
        let mut burst = ClaimBurst::start(Claim::new(5), BurstTimings::default());
        let mut host = Recorder::default();
        dispatch_burst(&burst.tick(100.0), &mut host);
        assert_eq!(host.log, vec!["Entering", "Holding", "Exiting", "Done", "complete"]);
    }
}
