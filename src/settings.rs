//! Reveal timing and accessibility settings
//!
//! Persisted as JSON next to the host's other preferences.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::easing::Easing;

/// Claim burst phase durations (seconds)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BurstTimings {
    /// Delay before the amount becomes visible
    pub enter_delay: f32,
    /// Full-emphasis display of the amount
    pub hold: f32,
    /// Level-up badge and reward list (only after a level-up)
    pub level_up_reveal: f32,
    /// Fade/shrink out
    pub exit: f32,
}

impl Default for BurstTimings {
    fn default() -> Self {
        Self {
            enter_delay: BURST_ENTER_DELAY,
            hold: BURST_HOLD,
            level_up_reveal: BURST_LEVEL_UP_REVEAL,
            exit: BURST_EXIT,
        }
    }
}

/// Progression display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealSettings {
    /// Count-up duration for an XP gain (seconds)
    pub count_duration: f32,
    /// Hold on a full bar before each level increment (seconds)
    pub level_up_pause: f32,
    /// Count-up easing
    pub easing: Easing,
    /// Claim burst timeline
    pub burst: BurstTimings,

    // === Accessibility ===
    /// Reduced motion (gains snap instead of counting, shorter bursts)
    pub reduced_motion: bool,
}

impl Default for RevealSettings {
    fn default() -> Self {
        Self {
            count_duration: COUNT_DURATION,
            level_up_pause: LEVEL_UP_PAUSE,
            easing: Easing::default(),
            burst: BurstTimings::default(),
            reduced_motion: false,
        }
    }
}

impl RevealSettings {
    /// Whether XP gains should animate at all
    pub fn animate_gains(&self) -> bool {
        self.effective_count_duration() > 0.0
    }

    /// Count-up duration (0 when reduced motion is on)
    pub fn effective_count_duration(&self) -> f32 {
        if self.reduced_motion {
            0.0
        } else {
            sanitize(self.count_duration)
        }
    }

    /// Level-up hold (0 when reduced motion is on)
    pub fn effective_level_up_pause(&self) -> f32 {
        if self.reduced_motion {
            0.0
        } else {
            sanitize(self.level_up_pause)
        }
    }

    /// Burst timings with reduced motion applied
    ///
    /// Reduced motion drops the enter delay and exit animation but keeps
    /// the readable hold and reveal phases.
    pub fn effective_burst(&self) -> BurstTimings {
        let b = &self.burst;
        BurstTimings {
            enter_delay: if self.reduced_motion { 0.0 } else { sanitize(b.enter_delay) },
            hold: sanitize(b.hold),
            level_up_reveal: sanitize(b.level_up_reveal),
            exit: if self.reduced_motion { 0.0 } else { sanitize(b.exit) },
        }
    }

    /// Parse settings JSON; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded reveal settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid reveal settings in {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default reveal settings");
                Self::default()
            }
        }
    }

    /// Save settings as JSON; failures are logged, not returned
    pub fn save(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        match serde_json::to_string_pretty(self) {
            Ok(json) => match fs::write(path, json) {
                Ok(()) => log::info!("Reveal settings saved to {}", path.display()),
                Err(e) => log::warn!("Failed to save reveal settings: {}", e),
            },
            Err(e) => log::warn!("Failed to serialize reveal settings: {}", e),
        }
    }
}

/// Negative or NaN durations count as zero
#[inline]
fn sanitize(secs: f32) -> f32 {
    if secs.is_finite() && secs > 0.0 { secs } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings =
            RevealSettings::from_json(r#"{ "reduced_motion": true, "burst": { "hold": 2.5 } }"#)
                .unwrap();
        assert!(settings.reduced_motion);
        assert_eq!(settings.count_duration, COUNT_DURATION);
        assert_eq!(settings.burst.hold, 2.5);
        assert_eq!(settings.burst.exit, BURST_EXIT);
        assert_eq!(settings.easing, Easing::EaseOut);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(RevealSettings::from_json("{ not json").is_err());
    }

    #[test]
    fn test_reduced_motion_effective_values() {
        let settings = RevealSettings {
            reduced_motion: true,
            ..Default::default()
        };
        assert!(!settings.animate_gains());
        assert_eq!(settings.effective_count_duration(), 0.0);
        assert_eq!(settings.effective_level_up_pause(), 0.0);

        let burst = settings.effective_burst();
        assert_eq!(burst.enter_delay, 0.0);
        assert_eq!(burst.exit, 0.0);
        assert_eq!(burst.hold, BURST_HOLD);
    }

    #[test]
    fn test_bad_durations_sanitized() {
        let settings = RevealSettings {
            count_duration: f32::NAN,
            level_up_pause: -1.0,
            ..Default::default()
        };
        assert_eq!(settings.effective_count_duration(), 0.0);
        assert_eq!(settings.effective_level_up_pause(), 0.0);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let settings = RevealSettings::load("/nonexistent/xp-reveal/settings.json");
        assert!(!settings.reduced_motion);
        assert_eq!(settings.level_up_pause, LEVEL_UP_PAUSE);
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("xp-reveal-settings-{}.json", std::process::id()));
        let settings = RevealSettings {
            count_duration: 1.25,
            easing: Easing::EaseInOut,
            ..Default::default()
        };
        settings.save(&path);
        let loaded = RevealSettings::load(&path);
        let _ = fs::remove_file(&path);

        assert_eq!(loaded.count_duration, 1.25);
        assert_eq!(loaded.easing, Easing::EaseInOut);
    }
}
