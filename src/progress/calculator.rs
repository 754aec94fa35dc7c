//! Level-relative progress computation

use serde::{Deserialize, Serialize};

use super::curve::Curve;
use super::snapshot::ProgressionSnapshot;
use crate::consts::MAX_LEVEL;

/// Non-fatal data problems found while computing progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntegrityWarning {
    /// Snapshot level was 0; treated as level 1
    LevelBelowOne,
    /// Curve gives the level a zero or negative XP width
    EmptyLevelRange,
    /// XP is below what the level requires
    XpBelowLevel,
    /// XP already reaches the next level's requirement
    XpBeyondLevel,
}

impl IntegrityWarning {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntegrityWarning::LevelBelowOne => "level below 1",
            IntegrityWarning::EmptyLevelRange => "curve has an empty level range",
            IntegrityWarning::XpBelowLevel => "xp below level requirement",
            IntegrityWarning::XpBeyondLevel => "xp beyond next level requirement",
        }
    }
}

/// Progress-bar values for one snapshot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelProgress {
    pub level: u32,
    pub xp: u64,
    /// `xp - required(level)`, negative on inconsistent input
    pub xp_into_level: i64,
    /// `required(level + 1) - required(level)`
    pub xp_needed_for_level: i64,
    /// Bar fill, always within [0, 1]
    pub fraction: f32,
    pub warning: Option<IntegrityWarning>,
}

/// Compute level-relative progress for a snapshot
pub fn compute_progress(snapshot: &ProgressionSnapshot, curve: &dyn Curve) -> LevelProgress {
    let level = snapshot.effective_level();
    let floor = curve.required_xp(level);
    let ceiling = curve.required_xp(level.saturating_add(1));

    let xp_into_level = signed_diff(snapshot.xp, floor);
    let xp_needed_for_level = signed_diff(ceiling, floor);

    let fraction = if xp_needed_for_level <= 0 {
        0.0
    } else {
        (xp_into_level as f64 / xp_needed_for_level as f64).clamp(0.0, 1.0) as f32
    };

    let warning = if snapshot.level == 0 {
        Some(IntegrityWarning::LevelBelowOne)
    } else if xp_needed_for_level <= 0 {
        Some(IntegrityWarning::EmptyLevelRange)
    } else if xp_into_level < 0 {
        Some(IntegrityWarning::XpBelowLevel)
    } else if xp_into_level >= xp_needed_for_level {
        Some(IntegrityWarning::XpBeyondLevel)
    } else {
        None
    };

    LevelProgress {
        level,
        xp: snapshot.xp,
        xp_into_level,
        xp_needed_for_level,
        fraction,
        warning,
    }
}

/// Highest level whose requirement is covered by `xp`
///
/// Stops at the first level the curve does not grant, so a non-monotone
/// curve yields the lowest consistent answer.
pub fn level_for_xp(curve: &dyn Curve, xp: u64) -> u32 {
    let mut level = 1;
    while level < MAX_LEVEL && curve.required_xp(level + 1) <= xp {
        level += 1;
    }
    level
}

#[inline]
fn signed_diff(a: u64, b: u64) -> i64 {
    (i128::from(a) - i128::from(b)).clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::curve::{FnCurve, PowerCurve, TableCurve};
    use proptest::prelude::*;

    fn scenario_curve() -> TableCurve {
        TableCurve::new(vec![0, 100, 400, 700])
    }

    #[test]
    fn test_progress_mid_level() {
        let p = compute_progress(&ProgressionSnapshot::player(3, 450), &scenario_curve());
        assert_eq!(p.xp_into_level, 50);
        assert_eq!(p.xp_needed_for_level, 300);
        assert!((p.fraction - 50.0 / 300.0).abs() < 1e-6);
        assert_eq!(p.warning, None);
    }

    #[test]
    fn test_progress_level_start_is_empty_bar() {
        let p = compute_progress(&ProgressionSnapshot::player(2, 100), &scenario_curve());
        assert_eq!(p.xp_into_level, 0);
        assert_eq!(p.fraction, 0.0);
        assert_eq!(p.warning, None);
    }

    #[test]
    fn test_progress_clamps_inconsistent_xp() {
        let curve = scenario_curve();

        let below = compute_progress(&ProgressionSnapshot::player(3, 50), &curve);
        assert_eq!(below.xp_into_level, -350);
        assert_eq!(below.fraction, 0.0);
        assert_eq!(below.warning, Some(IntegrityWarning::XpBelowLevel));

        let beyond = compute_progress(&ProgressionSnapshot::player(1, 250), &curve);
        assert_eq!(beyond.fraction, 1.0);
        assert_eq!(beyond.warning, Some(IntegrityWarning::XpBeyondLevel));
    }

    #[test]
    fn test_progress_empty_level_range() {
        let flat = FnCurve(|_level: u32| 500);
        let p = compute_progress(&ProgressionSnapshot::player(2, 500), &flat);
        assert_eq!(p.xp_needed_for_level, 0);
        assert_eq!(p.fraction, 0.0);
        assert_eq!(p.warning, Some(IntegrityWarning::EmptyLevelRange));
    }

    #[test]
    fn test_progress_level_zero() {
        let p = compute_progress(&ProgressionSnapshot::player(0, 50), &scenario_curve());
        assert_eq!(p.level, 1);
        assert!((p.fraction - 0.5).abs() < 1e-6);
        assert_eq!(p.warning, Some(IntegrityWarning::LevelBelowOne));
    }

    #[test]
    fn test_level_for_xp() {
        let curve = PowerCurve::new(100.0, 2.0);
        assert_eq!(level_for_xp(&curve, 0), 1);
        assert_eq!(level_for_xp(&curve, 99), 1);
        assert_eq!(level_for_xp(&curve, 100), 2);
        assert_eq!(level_for_xp(&curve, 450), 3);
        assert_eq!(level_for_xp(&curve, 900), 4);
    }

    #[test]
    fn test_level_for_xp_flat_curve_terminates() {
        let flat = FnCurve(|_level: u32| 0);
        assert_eq!(level_for_xp(&flat, 10), MAX_LEVEL);
    }

    proptest! {
        #[test]
        fn prop_fraction_always_in_unit_range(
            level in 0u32..50,
            xp in any::<u64>(),
            a in any::<u64>(),
            b in any::<u64>(),
        ) {
            // Arbitrary, usually non-monotone curve
            let curve = FnCurve(move |l: u32| if l % 2 == 0 { a } else { b });
            let p = compute_progress(&ProgressionSnapshot::player(level, xp), &curve);
            prop_assert!((0.0..=1.0).contains(&p.fraction));
        }

        #[test]
        fn prop_consistent_snapshots_have_no_warning(xp in 0u64..1_000_000) {
            let curve = PowerCurve::new(100.0, 2.0);
            let level = level_for_xp(&curve, xp);
            let p = compute_progress(&ProgressionSnapshot::player(level, xp), &curve);
            prop_assert_eq!(p.warning, None);
            prop_assert!(p.fraction < 1.0);
        }
    }
}
