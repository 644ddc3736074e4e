//! Timing profiles for reveal animations

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Timing profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimingProfile {
    /// Normal pacing: 100 ms ticks, 20 steps per phase
    #[default]
    Normal,
    /// Half the ticks, twice as fast
    Turbo,
    /// Instant reveal for testing: one preview tick, no delay
    Studio,
    /// Hand-tuned values
    Custom,
}

/// Tick pacing for a sequencer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Profile type
    #[serde(default)]
    pub profile: TimingProfile,

    /// Delay between ticks (ms)
    pub tick_interval_ms: u64,

    /// A phase finalizes once its tick counter exceeds this
    pub steps_per_phase: u32,
}

impl TimingConfig {
    /// Normal pacing
    pub fn normal() -> Self {
        Self {
            profile: TimingProfile::Normal,
            tick_interval_ms: 100,
            steps_per_phase: 20,
        }
    }

    /// Turbo pacing
    pub fn turbo() -> Self {
        Self {
            profile: TimingProfile::Turbo,
            tick_interval_ms: 50,
            steps_per_phase: 10,
        }
    }

    /// Studio mode (no delay, single preview)
    pub fn studio() -> Self {
        Self {
            profile: TimingProfile::Studio,
            tick_interval_ms: 0,
            steps_per_phase: 0,
        }
    }

    /// Get config for profile
    pub fn from_profile(profile: TimingProfile) -> Self {
        match profile {
            TimingProfile::Normal => Self::normal(),
            TimingProfile::Turbo => Self::turbo(),
            TimingProfile::Studio => Self::studio(),
            TimingProfile::Custom => Self::normal(),
        }
    }

    pub fn custom(tick_interval_ms: u64, steps_per_phase: u32) -> Self {
        Self {
            profile: TimingProfile::Custom,
            tick_interval_ms,
            steps_per_phase,
        }
    }

    /// Scale the tick interval by factor (< 1.0 = faster)
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            profile: TimingProfile::Custom,
            tick_interval_ms: (self.tick_interval_ms as f64 * factor.max(0.0)).round() as u64,
            steps_per_phase: self.steps_per_phase,
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Ticks spent in one phase: the animation ticks plus the finalizing tick
    pub fn ticks_per_phase(&self) -> u32 {
        self.steps_per_phase.saturating_add(2)
    }

    /// Wall-clock duration of one phase
    pub fn phase_duration(&self) -> Duration {
        self.tick_interval()
            .saturating_mul(self.ticks_per_phase())
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self::normal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timing_profiles() {
        let normal = TimingConfig::normal();
        let turbo = TimingConfig::turbo();
        let studio = TimingConfig::studio();

        assert_eq!(normal.tick_interval_ms, 100);
        assert_eq!(normal.steps_per_phase, 20);
        assert!(turbo.phase_duration() < normal.phase_duration());
        assert_eq!(studio.phase_duration(), Duration::ZERO);
        assert_eq!(TimingConfig::from_profile(TimingProfile::Custom), normal);
    }

    #[test]
    fn test_scaled_keeps_steps() {
        let fast = TimingConfig::normal().scaled(0.5);
        assert_eq!(fast.profile, TimingProfile::Custom);
        assert_eq!(fast.tick_interval_ms, 50);
        assert_eq!(fast.steps_per_phase, 20);
    }

    #[test]
    fn test_ticks_per_phase() {
        // 21 animation ticks (counter 1..=21) plus the finalizing tick
        assert_eq!(TimingConfig::normal().ticks_per_phase(), 22);
        assert_eq!(TimingConfig::studio().ticks_per_phase(), 2);
    }

    #[test]
    fn test_extreme_values_saturate() {
        let timing = TimingConfig::custom(u64::MAX, u32::MAX);
        assert_eq!(timing.ticks_per_phase(), u32::MAX);
        assert_eq!(timing.phase_duration(), Duration::MAX);
    }
}
