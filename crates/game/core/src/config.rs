use std::time::Duration;

/// Controller configuration constants and tunable parameters.
///
/// Timings are expressed in seconds so the same values can be written in TOML
/// by level designers; the runtime converts them into durations.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Pause between two queued actions.
    pub time_between_actions: f32,
    /// Player movement speed in cells per second while a move is in progress.
    pub speed: f32,
    /// Lifetime of the transient swing effect.
    pub swing_time: f32,
    /// Delay between the door opening and the level being reported as won.
    pub win_delay: f32,
    /// Inclusive lower bound of the randomised footsteps pitch.
    pub footstep_pitch_min: f32,
    /// Upper bound of the randomised footsteps pitch.
    pub footstep_pitch_max: f32,
    /// Seed for presentation randomness (footsteps pitch).
    pub rng_seed: u64,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Number of inventory slots addressable by `useitem0..useitem2`.
    pub const INVENTORY_SLOTS: usize = 3;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_TIME_BETWEEN_ACTIONS: f32 = 0.5;
    pub const DEFAULT_SPEED: f32 = 5.0;
    pub const DEFAULT_SWING_TIME: f32 = 0.35;
    pub const DEFAULT_WIN_DELAY: f32 = 1.25;
    pub const DEFAULT_FOOTSTEP_PITCH_MIN: f32 = 0.75;
    pub const DEFAULT_FOOTSTEP_PITCH_MAX: f32 = 1.25;

    pub fn new() -> Self {
        Self {
            time_between_actions: Self::DEFAULT_TIME_BETWEEN_ACTIONS,
            speed: Self::DEFAULT_SPEED,
            swing_time: Self::DEFAULT_SWING_TIME,
            win_delay: Self::DEFAULT_WIN_DELAY,
            footstep_pitch_min: Self::DEFAULT_FOOTSTEP_PITCH_MIN,
            footstep_pitch_max: Self::DEFAULT_FOOTSTEP_PITCH_MAX,
            rng_seed: 0,
        }
    }

    pub fn with_time_between_actions(mut self, seconds: f32) -> Self {
        self.time_between_actions = seconds;
        self
    }

    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = seed;
        self
    }

    /// Checks that every timing can be turned into a duration and that the
    /// pitch range is well formed.
    pub fn validate(&self) -> Result<(), String> {
        let timings = [
            ("time_between_actions", self.time_between_actions),
            ("swing_time", self.swing_time),
            ("win_delay", self.win_delay),
        ];
        for (name, value) in timings {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{name} must be a non-negative number (got {value})"));
            }
            if Duration::try_from_secs_f32(value).is_err() {
                return Err(format!("{name} is too large to wait for (got {value})"));
            }
        }
        if !self.speed.is_finite() || self.speed <= 0.0 {
            return Err(format!("speed must be positive (got {})", self.speed));
        }
        if !(self.footstep_pitch_min > 0.0 && self.footstep_pitch_min <= self.footstep_pitch_max)
        {
            return Err(format!(
                "footstep pitch range {}..{} is invalid",
                self.footstep_pitch_min, self.footstep_pitch_max
            ));
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut config = GameConfig::default();
        config.win_delay = -0.1;
        assert!(config.validate().unwrap_err().contains("win_delay"));

        let mut config = GameConfig::default();
        config.speed = 0.0;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.footstep_pitch_min = 1.5;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.swing_time = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_timings_beyond_duration_range() {
        for name in ["time_between_actions", "swing_time", "win_delay"] {
            let mut config = GameConfig::default();
            match name {
                "time_between_actions" => config.time_between_actions = 1e20,
                "swing_time" => config.swing_time = 1e20,
                _ => config.win_delay = 1e20,
            }
            let error = config.validate().unwrap_err();
            assert!(error.contains(name), "{error}");
        }

        // Large but representable delays are still accepted.
        let config = GameConfig::default().with_time_between_actions(86_400.0);
        assert!(config.validate().is_ok());
    }
}
