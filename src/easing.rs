//! Easing curves for the XP count-up

use serde::{Deserialize, Serialize};

/// Shape of the count-up over its duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Easing {
    Linear,
    /// Decelerate only: fast start, slow finish
    #[default]
    EaseOut,
    /// Accelerate then decelerate (cosine)
    EaseInOut,
}

impl Easing {
    pub fn as_str(&self) -> &'static str {
        match self {
            Easing::Linear => "Linear",
            Easing::EaseOut => "EaseOut",
            Easing::EaseInOut => "EaseInOut",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "linear" => Some(Easing::Linear),
            "easeout" | "ease-out" | "out" => Some(Easing::EaseOut),
            "easeinout" | "ease-in-out" | "inout" => Some(Easing::EaseInOut),
            _ => None,
        }
    }

    /// Map linear time `t` to eased progress; both in [0, 1]
    #[inline]
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseOut => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOut => 0.5 - 0.5 * (std::f32::consts::PI * t).cos(),
        }
    }
}
