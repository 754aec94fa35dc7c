//! Progression values and progress-bar math
//!
//! Everything here is pure:
//! - No timers or clocks
//! - No logging (callers decide when a warning is worth reporting)
//! - Same inputs always give the same outputs

pub mod calculator;
pub mod curve;
pub mod snapshot;

pub use calculator::{IntegrityWarning, LevelProgress, compute_progress, level_for_xp};
pub use curve::{Curve, FnCurve, PowerCurve, TableCurve, TrackCurves};
pub use snapshot::{ProgressionSnapshot, TrackId};
