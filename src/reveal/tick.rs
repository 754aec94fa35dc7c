//! Reveal transitions
//!
//! Both entry points take the state by `&mut`, never block, and return the
//! events produced by that single step in emission order.

use super::state::{CountUp, ProgressFrame, RevealEvent, RevealPhase, RevealState};
use crate::consts::MAX_LEVEL;
use crate::progress::{Curve, ProgressionSnapshot, compute_progress};
use crate::settings::RevealSettings;

/// Apply a new snapshot from the host
///
/// `curve` must be the curve for `snapshot.track`.
pub fn submit_snapshot(
    state: &mut RevealState,
    snapshot: &ProgressionSnapshot,
    curve: &dyn Curve,
    settings: &RevealSettings,
) -> Vec<RevealEvent> {
    let mut events = Vec::new();
    let level = snapshot.effective_level();

    // Context switch: never animate, never celebrate
    if snapshot.track != state.track {
        log::debug!(
            "Track switch {:?} -> {:?}, snapping to level {}",
            state.track,
            snapshot.track,
            level
        );
        snap(state, snapshot, curve, &mut events);
        return events;
    }

    // Decrease or reset: a correction, not reverse progress
    if snapshot.xp < state.displayed_xp || level < state.displayed_level {
        if state.phase.is_animating() {
            log::debug!("Discarding in-flight reveal on {:?} (correction)", state.track);
        }
        snap(state, snapshot, curve, &mut events);
        return events;
    }

    if state.phase.is_animating() {
        if snapshot.xp != state.target_xp || level != state.target_level {
            retarget(state, snapshot, settings);
        }
        return events;
    }

    if snapshot.xp == state.displayed_xp {
        if level != state.displayed_level {
            snap(state, snapshot, curve, &mut events);
        }
        return events;
    }

    state.target_xp = snapshot.xp;
    state.target_level = level;

    if settings.animate_gains() {
        state.phase = RevealPhase::Counting(CountUp::start(state.displayed_xp));
    } else {
        commit_levels(state, curve, &mut events, true);
        state.displayed_xp = state.target_xp;
        enter_idle(state, curve, &mut events);
    }

    events
}

/// Advance timers by `dt` seconds
pub fn tick(
    state: &mut RevealState,
    curve: &dyn Curve,
    settings: &RevealSettings,
    dt: f32,
) -> Vec<RevealEvent> {
    let mut events = Vec::new();
    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
    let duration = settings.effective_count_duration();

    match state.phase {
        // settle() collapses Settled to Idle within the same step
        RevealPhase::Idle | RevealPhase::Settled => {}
        RevealPhase::Counting(mut count) => {
            count.elapsed += dt;
            count.current = count.value_at(state.target_xp, duration, settings.easing);

            if state.displayed_level < state.target_level.min(MAX_LEVEL) {
                let threshold = curve.required_xp(state.displayed_level.saturating_add(1));
                if count.current >= threshold as f64 {
                    // Hold the bar full before committing the level
                    state.displayed_xp = threshold.max(state.displayed_xp);
                    state.phase = RevealPhase::PendingLevelUp { count, held: 0.0 };
                    events.push(RevealEvent::ProgressChanged(frame(state, curve)));
                    return events;
                }
            }

            let shown = (count.current.floor() as u64).min(state.target_xp);
            state.displayed_xp = shown.max(state.displayed_xp);

            if count.is_finished(duration) {
                settle(state, curve, &mut events);
            } else {
                state.phase = RevealPhase::Counting(count);
                events.push(RevealEvent::ProgressChanged(frame(state, curve)));
            }
        }
        RevealPhase::PendingLevelUp { count, held } => {
            let held = held + dt;
            if held >= settings.effective_level_up_pause() {
                if state.displayed_level < state.target_level {
                    state.displayed_level += 1;
                    events.push(RevealEvent::LevelUp {
                        level: state.displayed_level,
                    });
                }
                state.phase = RevealPhase::Counting(count);
            } else {
                state.phase = RevealPhase::PendingLevelUp { count, held };
            }
            events.push(RevealEvent::ProgressChanged(frame(state, curve)));
        }
    }

    events
}

/// Progress frame for what is currently displayed
pub fn frame(state: &RevealState, curve: &dyn Curve) -> ProgressFrame {
    compute_progress(&state.displayed(), curve).into()
}

fn snap(
    state: &mut RevealState,
    snapshot: &ProgressionSnapshot,
    curve: &dyn Curve,
    events: &mut Vec<RevealEvent>,
) {
    *state = RevealState::seeded(snapshot);
    events.push(RevealEvent::ProgressChanged(frame(state, curve)));
}

fn retarget(state: &mut RevealState, snapshot: &ProgressionSnapshot, settings: &RevealSettings) {
    let target_xp = snapshot.xp;
    state.target_xp = target_xp;
    state.target_level = snapshot.effective_level();

    let duration = settings.effective_count_duration();
    if let RevealPhase::Counting(count) | RevealPhase::PendingLevelUp { count, .. } =
        &mut state.phase
    {
        count.retarget(target_xp, duration, settings.easing);
    }
}

fn settle(state: &mut RevealState, curve: &dyn Curve, events: &mut Vec<RevealEvent>) {
    if state.displayed_level < state.target_level {
        // Target level not reachable through the curve (inconsistent input)
        commit_levels(state, curve, events, false);
    }
    state.displayed_xp = state.target_xp;
    state.phase = RevealPhase::Settled;
    events.push(RevealEvent::Settled);
    enter_idle(state, curve, events);
}

fn enter_idle(state: &mut RevealState, curve: &dyn Curve, events: &mut Vec<RevealEvent>) {
    state.phase = RevealPhase::Idle;
    events.push(RevealEvent::ProgressChanged(frame(state, curve)));
}

/// Commit levels up to the target, lowest first
///
/// Only boundaries the target XP actually crosses (and at most up to
/// `MAX_LEVEL`) get a `LevelUp`; any remaining gap to the target level is
/// inconsistent input and is applied silently.
fn commit_levels(
    state: &mut RevealState,
    curve: &dyn Curve,
    events: &mut Vec<RevealEvent>,
    full_bar: bool,
) {
    while state.displayed_level < state.target_level.min(MAX_LEVEL) {
        let threshold = curve.required_xp(state.displayed_level.saturating_add(1));
        if threshold > state.target_xp {
            break;
        }
        if full_bar {
            state.displayed_xp = threshold.max(state.displayed_xp);
            events.push(RevealEvent::ProgressChanged(frame(state, curve)));
        }
        state.displayed_level += 1;
        events.push(RevealEvent::LevelUp {
            level: state.displayed_level,
        });
    }

    if state.displayed_level < state.target_level {
        log::warn!(
            "Level {} on {:?} not reached by {} XP; showing it without level-up from {}",
            state.target_level,
            state.track,
            state.target_xp,
            state.displayed_level
        );
        state.displayed_level = state.target_level;
    }
}
