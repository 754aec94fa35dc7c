//! Level curves: level -> cumulative XP required to reach it
//!
//! Curves are supplied by the host, one per track. The engine only ever
//! calls `required_xp` and tolerates curves that are not monotone.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::snapshot::TrackId;

/// Cumulative XP requirement per level
pub trait Curve {
    /// XP needed to reach `level` (level 1 is normally 0)
    fn required_xp(&self, level: u32) -> u64;
}

/// Curve backed by an explicit threshold table
///
/// `thresholds[0]` is level 1. Levels past the table continue with the
/// width of the last table step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCurve {
    thresholds: Vec<u64>,
}

impl TableCurve {
    pub fn new(thresholds: Vec<u64>) -> Self {
        Self { thresholds }
    }

    fn last_step(&self) -> u64 {
        match self.thresholds.as_slice() {
            [.., prev, last] => last.saturating_sub(*prev),
            _ => 0,
        }
    }
}

impl Curve for TableCurve {
    fn required_xp(&self, level: u32) -> u64 {
        let Some(&last) = self.thresholds.last() else {
            return 0;
        };
        let index = level.max(1) as usize - 1;
        match self.thresholds.get(index) {
            Some(&xp) => xp,
            None => {
                let extra = (index + 1 - self.thresholds.len()) as u64;
                last.saturating_add(self.last_step().saturating_mul(extra))
            }
        }
    }
}

/// `base * (level - 1)^exponent`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerCurve {
    pub base: f64,
    pub exponent: f64,
}

impl PowerCurve {
    pub fn new(base: f64, exponent: f64) -> Self {
        Self { base, exponent }
    }
}

impl Curve for PowerCurve {
    fn required_xp(&self, level: u32) -> u64 {
        let steps = level.saturating_sub(1) as f64;
        let xp = (self.base * steps.powf(self.exponent)).round();
        // `as` saturates for out-of-range floats and maps NaN to 0
        xp as u64
    }
}

/// Adapter for a closure curve
pub struct FnCurve<F>(pub F);

impl<F: Fn(u32) -> u64> Curve for FnCurve<F> {
    fn required_xp(&self, level: u32) -> u64 {
        (self.0)(level)
    }
}

impl<F> fmt::Debug for FnCurve<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnCurve")
    }
}

/// Curve lookup per track
///
/// The player track has its own formula; every category track shares
/// another.
#[derive(Clone)]
pub struct TrackCurves {
    player: Rc<dyn Curve>,
    category: Rc<dyn Curve>,
}

impl TrackCurves {
    pub fn new(player: impl Curve + 'static, category: impl Curve + 'static) -> Self {
        Self {
            player: Rc::new(player),
            category: Rc::new(category),
        }
    }

    /// Same curve for every track
    pub fn uniform(curve: impl Curve + 'static) -> Self {
        let curve: Rc<dyn Curve> = Rc::new(curve);
        Self {
            player: Rc::clone(&curve),
            category: curve,
        }
    }

    pub fn for_track(&self, track: TrackId) -> &dyn Curve {
        match track {
            TrackId::Player => self.player.as_ref(),
            TrackId::Category(_) => self.category.as_ref(),
        }
    }
}

impl Default for TrackCurves {
    fn default() -> Self {
        Self::new(PowerCurve::new(100.0, 2.0), PowerCurve::new(50.0, 1.5))
    }
}

impl fmt::Debug for TrackCurves {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackCurves").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_curve_lookup_and_extrapolation() {
        let curve = TableCurve::new(vec![0, 100, 400]);
        assert_eq!(curve.required_xp(0), 0);
        assert_eq!(curve.required_xp(1), 0);
        assert_eq!(curve.required_xp(3), 400);
        // Past the table: keep stepping by the last width (300)
        assert_eq!(curve.required_xp(4), 700);
        assert_eq!(curve.required_xp(6), 1300);
    }

    #[test]
    fn test_table_curve_degenerate() {
        assert_eq!(TableCurve::new(vec![]).required_xp(5), 0);
        assert_eq!(TableCurve::new(vec![10]).required_xp(5), 10);
    }

    #[test]
    fn test_power_curve() {
        let curve = PowerCurve::new(100.0, 2.0);
        assert_eq!(curve.required_xp(1), 0);
        assert_eq!(curve.required_xp(2), 100);
        assert_eq!(curve.required_xp(3), 400);
        assert_eq!(curve.required_xp(4), 900);
    }

    #[test]
    fn test_track_curves_selects_by_track() {
        let curves = TrackCurves::new(
            FnCurve(|level: u32| u64::from(level) * 10),
            FnCurve(|level: u32| u64::from(level) * 1000),
        );
        assert_eq!(curves.for_track(TrackId::Player).required_xp(2), 20);
        assert_eq!(curves.for_track(TrackId::Category(3)).required_xp(2), 2000);
        assert_eq!(curves.for_track(TrackId::Category(9)).required_xp(2), 2000);
    }
}
