//! # Environment Configuration
//!
//! Every tunable of the environment in one serde tree. All structs use
//! `#[serde(default)]`, so a config file only needs to name the values it
//! changes:
//!
//! ```json
//! { "vehicle": { "max_speed_kph": 15 }, "episode": { "max_steps": 2000 } }
//! ```

use crate::error::EnvError;
use dynamics::{IntegratorConfig, VehicleConfig};
use perception::SensorConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Reward shaping constants
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardConfig {
    /// Divisor of the `(1 - d)` wall-approach reward inside the slot
    pub wall_divisor: f32,
    /// Divisor of the `(1 - d)` progress reward outside the slot
    pub progress_divisor: f32,
    /// Progress multiplier while the front ray sees the target
    pub facing_multiplier: f32,
    /// Progress multiplier otherwise
    pub oblique_multiplier: f32,
    /// Regression beyond best-so-far that triggers the penalty
    pub regression_margin: f32,
    pub regression_penalty: f32,
    /// Maximum center-lateral spread that counts as parallel
    pub parallel_tolerance: f32,
    pub parallel_reward: f32,
    pub first_contact_bonus: f32,
    pub step_penalty: f32,
    pub parked_reward: f32,
    pub collided_reward: f32,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            wall_divisor: 6.0,
            progress_divisor: 5.0,
            facing_multiplier: 1.0,
            oblique_multiplier: 0.5,
            regression_margin: 0.4,
            regression_penalty: -0.05,
            parallel_tolerance: 0.2,
            parallel_reward: 0.1,
            first_contact_bonus: 0.2,
            step_penalty: -0.001,
            parked_reward: 1.0,
            collided_reward: -0.5,
        }
    }
}

/// Speed-holding law used while searching for a slot
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CruiseConfig {
    pub target_kph: f32,
    /// Throttle below target speed
    pub throttle: f32,
    /// Throttle above target speed
    pub brake_throttle: f32,
}

impl Default for CruiseConfig {
    fn default() -> Self {
        Self {
            target_kph: 5.0,
            throttle: 0.2,
            brake_throttle: -0.5,
        }
    }
}

/// Episode start placement
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Radius of the random offset around the spawn pose
    pub radius: f32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self { radius: 5.0 }
    }
}

/// Complete environment configuration, loadable from JSON.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvConfig {
    pub vehicle: VehicleConfig,
    pub integrator: IntegratorConfig,
    pub sensor: SensorConfig,
    pub reward: RewardConfig,
    pub cruise: CruiseConfig,
    pub spawn: SpawnConfig,
    pub episode: EpisodeConfig,
    /// Seed for spawn offsets and slot shuffles; random when absent
    pub seed: Option<u64>,
}

/// Tick rates and episode length
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EpisodeConfig {
    /// Decision ticks before truncation; 0 disables the cap
    pub max_steps: u32,
    /// Fixed physics step in seconds
    pub physics_dt: f32,
    /// Physics steps per decision tick
    pub decision_period: u32,
}

impl Default for EpisodeConfig {
    fn default() -> Self {
        Self {
            max_steps: 5000,
            physics_dt: 0.02,
            decision_period: 1,
        }
    }
}

impl EnvConfig {
    /// Parse a JSON config.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::Parse`] on malformed JSON and any validation error
    /// from [`EnvConfig::validate`].
    pub fn from_str(json: &str) -> Result<Self, EnvError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON config file.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::Io`] if the file cannot be read, otherwise as
    /// [`EnvConfig::from_str`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, EnvError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_str(&json)
    }

    /// # Errors
    ///
    /// Returns the first invalid section as an [`EnvError`].
    pub fn validate(&self) -> Result<(), EnvError> {
        self.vehicle.validate()?;
        self.sensor.validate()?;
        let episode = &self.episode;
        if !episode.physics_dt.is_finite() || episode.physics_dt <= 0.0 {
            return Err(EnvError::Config(format!(
                "physics_dt must be positive, got {}",
                episode.physics_dt
            )));
        }
        if episode.decision_period == 0 {
            return Err(EnvError::Config(
                "decision_period must be at least 1".into(),
            ));
        }
        if !self.spawn.radius.is_finite() || self.spawn.radius < 0.0 {
            return Err(EnvError::Config(format!(
                "spawn radius must be non-negative, got {}",
                self.spawn.radius
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_is_all_defaults() {
        let config = EnvConfig::from_str("{}").unwrap();
        assert_eq!(config, EnvConfig::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = EnvConfig::from_str(
            r#"{ "vehicle": { "max_speed_kph": 15 }, "episode": { "max_steps": 20 } }"#,
        )
        .unwrap();
        assert_eq!(config.vehicle.max_speed_kph, 15.0);
        assert_eq!(config.vehicle.motor_torque, 400.0);
        assert_eq!(config.episode.max_steps, 20);
        assert_eq!(config.episode.decision_period, 1);
    }

    #[test]
    fn invalid_sections_are_rejected() {
        assert!(matches!(
            EnvConfig::from_str(r#"{ "sensor": { "ray_count": 2 } }"#),
            Err(EnvError::Perception(_))
        ));
        assert!(matches!(
            EnvConfig::from_str(r#"{ "vehicle": { "steered_wheels": 0 } }"#),
            Err(EnvError::Dynamics(_))
        ));
        assert!(matches!(
            EnvConfig::from_str(r#"{ "episode": { "physics_dt": 0 } }"#),
            Err(EnvError::Config(_))
        ));
        assert!(matches!(
            EnvConfig::from_str("{ nope"),
            Err(EnvError::Parse(_))
        ));
    }
}
