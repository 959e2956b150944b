//! Timing profiles for the reveal animation

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Timing profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimingProfile {
    /// Regular reveal
    #[default]
    Normal,
    /// Shorter spin, faster candidate changes
    Turbo,
    /// Settles on the first timer wake-up (tests, kiosk replays)
    Instant,
    /// Hand-tuned values
    Custom,
}

impl TimingProfile {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Turbo => "Turbo",
            Self::Instant => "Instant",
            Self::Custom => "Custom",
        }
    }
}

/// How long a reveal spins and how often the candidate changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealTiming {
    /// Profile type
    pub profile: TimingProfile,

    /// Total spin time before the result is committed (ms)
    pub duration_ms: u64,

    /// Time between candidate changes (ms)
    pub tick_interval_ms: u64,
}

impl RevealTiming {
    /// 3 s spin, candidate every 100 ms
    pub fn normal() -> Self {
        Self {
            profile: TimingProfile::Normal,
            duration_ms: 3000,
            tick_interval_ms: 100,
        }
    }

    pub fn turbo() -> Self {
        Self {
            profile: TimingProfile::Turbo,
            duration_ms: 1200,
            tick_interval_ms: 50,
        }
    }

    pub fn instant() -> Self {
        Self {
            profile: TimingProfile::Instant,
            duration_ms: 0,
            tick_interval_ms: 1,
        }
    }

    pub fn custom(duration_ms: u64, tick_interval_ms: u64) -> Self {
        Self {
            profile: TimingProfile::Custom,
            duration_ms,
            tick_interval_ms,
        }
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Candidate changes after the initial one, before the settle tick
    pub fn cosmetic_ticks(&self) -> u64 {
        if self.tick_interval_ms == 0 {
            return 0;
        }
        self.duration_ms.div_ceil(self.tick_interval_ms).saturating_sub(1)
    }

    /// A zero tick interval would spin the timer without yielding
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::InvalidTiming(
                "tick interval must be at least 1 ms".into(),
            ));
        }
        Ok(())
    }
}

impl Default for RevealTiming {
    fn default() -> Self {
        Self::normal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiles() {
        let normal = RevealTiming::normal();
        let turbo = RevealTiming::turbo();
        let instant = RevealTiming::instant();

        assert_eq!(normal.duration(), Duration::from_millis(3000));
        assert_eq!(normal.tick_interval(), Duration::from_millis(100));
        assert!(turbo.duration_ms < normal.duration_ms);
        assert!(turbo.tick_interval_ms < normal.tick_interval_ms);
        assert_eq!(instant.duration_ms, 0);
        assert_eq!(turbo.profile, TimingProfile::Turbo);
    }

    #[test]
    fn test_cosmetic_ticks() {
        // Candidate changes at 100..=2900 ms, settle at 3000 ms
        assert_eq!(RevealTiming::normal().cosmetic_ticks(), 29);
        assert_eq!(RevealTiming::custom(250, 100).cosmetic_ticks(), 2);
        assert_eq!(RevealTiming::instant().cosmetic_ticks(), 0);
        assert_eq!(RevealTiming::custom(100, 0).cosmetic_ticks(), 0);
    }

    #[test]
    fn test_validate() {
        assert!(RevealTiming::normal().validate().is_ok());
        assert!(RevealTiming::custom(1000, 0).validate().is_err());
    }

    #[test]
    fn test_serde_partial() {
        let timing: RevealTiming =
            serde_json::from_str(r#"{"duration_ms": 500}"#).unwrap_or_default();
        assert_eq!(timing.duration_ms, 500);
        assert_eq!(timing.tick_interval_ms, 100);
    }
}
