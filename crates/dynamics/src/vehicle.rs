//! # Vehicle Dynamics Model
//!
//! Turns normalized `(steering, throttle)` commands into per-wheel motor,
//! brake and steer outputs. The model owns a small amount of state: the last
//! command, the inferred travel direction, and the speed as both a float and
//! the integer-truncated value the governor compares against.
//!
//! The model does not integrate motion itself. After each step the caller
//! hands the resulting [`WheelActuation`] to a
//! [`MotionIntegrator`](crate::integrator::MotionIntegrator), and the
//! integrator's velocity is fed back on the next step.

use crate::error::DynamicsError;
use crate::types::Vec3;
use serde::{Deserialize, Serialize};

/// Configuration for a wheeled vehicle
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleConfig {
    /// Motor torque constant (Nm), also used as the brake torque scale
    pub motor_torque: f32,
    /// Steer angle of the front wheels at full lock (degrees)
    pub max_steer_angle: f32,
    /// Governor limit in display units (km/h)
    pub max_speed_kph: f32,
    /// Number of driven (rear) wheels receiving motor and brake torque
    pub driven_wheels: usize,
    /// Number of steered (front) wheels
    pub steered_wheels: usize,
    /// Conversion from integrator velocity units to display units
    pub kph_per_unit: f32,
    /// Velocity magnitude (integrator units) below which the vehicle counts as stopped
    pub movement_threshold: f32,
}

impl Default for VehicleConfig {
    fn default() -> Self {
        Self {
            motor_torque: 400.0,
            max_steer_angle: 25.0,
            max_speed_kph: 20.0,
            driven_wheels: 2,
            steered_wheels: 2,
            kph_per_unit: 3.6,
            movement_threshold: 0.2,
        }
    }
}

impl VehicleConfig {
    /// Reject configurations the torque formulas cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`DynamicsError`] if a wheel group is empty or a constant is
    /// negative or not finite.
    pub fn validate(&self) -> Result<(), DynamicsError> {
        if self.driven_wheels == 0 {
            return Err(DynamicsError::NoWheels("driven"));
        }
        if self.steered_wheels == 0 {
            return Err(DynamicsError::NoWheels("steered"));
        }
        for (name, value) in [
            ("motor_torque", self.motor_torque),
            ("max_steer_angle", self.max_steer_angle),
            ("max_speed_kph", self.max_speed_kph),
            ("kph_per_unit", self.kph_per_unit),
            ("movement_threshold", self.movement_threshold),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(DynamicsError::InvalidParameter { name, value });
            }
        }
        Ok(())
    }

    /// Motor torque given to each driven wheel at full throttle.
    #[must_use]
    pub fn torque_per_wheel(&self) -> f32 {
        (self.motor_torque * 5.0) / (self.driven_wheels + self.steered_wheels) as f32
    }
}

/// Sign of the longitudinal velocity, truncated toward zero.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TravelDirection {
    Reverse,
    #[default]
    Stationary,
    Forward,
}

impl TravelDirection {
    /// Classify a vehicle-local longitudinal velocity.
    ///
    /// The velocity is truncated to an integer first, so anything in
    /// `(-1, 1)` counts as stationary.
    #[must_use]
    pub fn from_longitudinal(velocity_z: f32) -> Self {
        match (velocity_z as i32).signum() {
            1 => Self::Forward,
            -1 => Self::Reverse,
            _ => Self::Stationary,
        }
    }

    /// `-1`, `0` or `1`.
    #[must_use]
    pub const fn signum(self) -> i32 {
        match self {
            Self::Reverse => -1,
            Self::Stationary => 0,
            Self::Forward => 1,
        }
    }
}

/// Normalized control input. Values are nominally in `[-1, 1]` but are
/// passed through unclamped.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DriveCommand {
    pub steering: f32,
    pub throttle: f32,
}

impl DriveCommand {
    pub const IDLE: Self = Self::new(0.0, 0.0);

    #[must_use]
    pub const fn new(steering: f32, throttle: f32) -> Self {
        Self { steering, throttle }
    }
}

/// Mutable vehicle state, owned by [`VehicleDynamics`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VehicleState {
    /// Speed magnitude in display units
    pub speed_kph: f32,
    /// `speed_kph` truncated toward zero; the governor compares this value
    pub governor_kph: i32,
    pub direction: TravelDirection,
    pub last_command: DriveCommand,
    /// Governor limit in display units
    pub speed_cap_kph: f32,
}

impl VehicleState {
    fn new(speed_cap_kph: f32) -> Self {
        Self {
            speed_cap_kph,
            ..Self::default()
        }
    }

    /// Speed with the sign of the travel direction.
    #[must_use]
    pub fn signed_speed_kph(&self) -> f32 {
        self.speed_kph * self.direction.signum() as f32
    }

    /// Whether the governor has reached the speed cap.
    #[must_use]
    pub fn at_speed_cap(&self) -> bool {
        self.governor_kph as f32 >= self.speed_cap_kph
    }

    fn over_speed_cap(&self) -> bool {
        self.governor_kph as f32 > self.speed_cap_kph
    }
}

/// Torques for one driven wheel (Nm).
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DrivenWheel {
    pub motor_torque: f32,
    pub brake_torque: f32,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SteeredWheel {
    /// Steer angle in degrees
    pub steer_angle: f32,
}

/// Per-wheel outputs of one dynamics step.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WheelActuation {
    pub driven: Vec<DrivenWheel>,
    pub steered: Vec<SteeredWheel>,
}

impl WheelActuation {
    /// Motor torque summed over the driven wheels.
    #[must_use]
    pub fn total_motor_torque(&self) -> f32 {
        self.driven.iter().map(|w| w.motor_torque).sum()
    }

    /// Brake torque summed over the driven wheels.
    #[must_use]
    pub fn total_brake_torque(&self) -> f32 {
        self.driven.iter().map(|w| w.brake_torque).sum()
    }

    /// Mean steer angle across steered wheels (degrees).
    #[must_use]
    pub fn steer_angle(&self) -> f32 {
        if self.steered.is_empty() {
            return 0.0;
        }
        self.steered.iter().map(|w| w.steer_angle).sum::<f32>() / self.steered.len() as f32
    }
}

/// The vehicle dynamics model.
#[derive(Clone, Debug)]
pub struct VehicleDynamics {
    config: VehicleConfig,
    state: VehicleState,
}

impl VehicleDynamics {
    /// Creates a model with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DynamicsError`] if the configuration is invalid.
    pub fn new(config: VehicleConfig) -> Result<Self, DynamicsError> {
        config.validate()?;
        let state = VehicleState::new(config.max_speed_kph);
        Ok(Self { config, state })
    }

    /// The validated configuration.
    #[must_use]
    pub fn config(&self) -> &VehicleConfig {
        &self.config
    }

    /// Speed, direction and last command as of the latest step.
    #[must_use]
    pub fn state(&self) -> &VehicleState {
        &self.state
    }

    /// Advance the model by one command.
    ///
    /// `local_velocity` is the integrator's current velocity expressed in the
    /// vehicle frame (z forward). It is used both to infer the travel
    /// direction and, after actuation, to refresh the speed bookkeeping.
    pub fn step(&mut self, command: DriveCommand, local_velocity: Vec3) -> WheelActuation {
        let DriveCommand { steering, throttle } = command;
        self.state.direction = TravelDirection::from_longitudinal(local_velocity.z);
        self.state.last_command = command;

        let direction_changed = self.direction_change(throttle);

        let brake_torque = if direction_changed || self.state.over_speed_cap() {
            throttle.abs() * self.config.motor_torque
        } else {
            0.0
        };

        let motor_torque = if self.state.at_speed_cap() {
            0.0
        } else {
            throttle * self.config.torque_per_wheel()
        };

        let steer_angle = steering * self.config.max_steer_angle;

        if direction_changed {
            tracing::trace!(
                direction = ?self.state.direction,
                throttle,
                "direction change, braking"
            );
        }

        let actuation = WheelActuation {
            driven: vec![
                DrivenWheel {
                    motor_torque,
                    brake_torque,
                };
                self.config.driven_wheels
            ],
            steered: vec![SteeredWheel { steer_angle }; self.config.steered_wheels],
        };

        self.observe_velocity(local_velocity);
        actuation
    }

    /// Refresh speed bookkeeping from an integrated velocity.
    pub fn observe_velocity(&mut self, velocity: Vec3) {
        self.state.speed_kph = velocity.length() * self.config.kph_per_unit;
        self.state.governor_kph = self.state.speed_kph as i32;
    }

    /// Whether the throttle opposes the current travel direction.
    #[must_use]
    pub fn direction_change(&self, throttle: f32) -> bool {
        let current = self.state.direction.signum();
        throttle != 0.0 && current != 0 && sign(throttle) != current
    }

    /// Whether the last observed speed exceeds the movement threshold.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.state.speed_kph > self.config.movement_threshold * self.config.kph_per_unit
    }

    /// Zero the speed and command history for a new episode.
    pub fn reset(&mut self) {
        self.state = VehicleState::new(self.config.max_speed_kph);
    }
}

fn sign(value: f32) -> i32 {
    if value > 0.0 {
        1
    } else if value < 0.0 {
        -1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> VehicleDynamics {
        VehicleDynamics::new(VehicleConfig::default()).unwrap()
    }

    #[test]
    fn direction_truncates_small_velocities() {
        assert_eq!(
            TravelDirection::from_longitudinal(0.9),
            TravelDirection::Stationary
        );
        assert_eq!(
            TravelDirection::from_longitudinal(-0.9),
            TravelDirection::Stationary
        );
        assert_eq!(
            TravelDirection::from_longitudinal(1.2),
            TravelDirection::Forward
        );
        assert_eq!(
            TravelDirection::from_longitudinal(-3.0),
            TravelDirection::Reverse
        );
    }

    #[test]
    fn torque_is_split_over_all_wheels() {
        let mut m = model();
        let act = m.step(DriveCommand::new(0.0, 1.0), Vec3::ZERO);
        // 400 * 5 / (2 + 2)
        assert_eq!(act.driven.len(), 2);
        assert!((act.driven[0].motor_torque - 500.0).abs() < 1e-4);
        assert_eq!(act.driven[0].brake_torque, 0.0);
    }

    #[test]
    fn steering_is_applied_while_braking() {
        let mut m = model();
        m.step(DriveCommand::IDLE, Vec3::new(0.0, 0.0, 2.0));
        let act = m.step(DriveCommand::new(-1.0, -0.5), Vec3::new(0.0, 0.0, 2.0));
        assert!(act.total_brake_torque() > 0.0);
        assert_eq!(act.steered.len(), 2);
        assert!((act.steered[0].steer_angle + 25.0).abs() < 1e-4);
    }

    #[test]
    fn speed_bookkeeping_truncates() {
        let mut m = model();
        m.step(DriveCommand::IDLE, Vec3::new(0.0, 0.0, 5.2));
        assert!((m.state().speed_kph - 18.72).abs() < 1e-3);
        assert_eq!(m.state().governor_kph, 18);
    }

    #[test]
    fn unclamped_inputs_pass_through() {
        let mut m = model();
        let act = m.step(DriveCommand::new(2.0, 2.0), Vec3::ZERO);
        assert!((act.steer_angle() - 50.0).abs() < 1e-4);
        assert!((act.driven[0].motor_torque - 1000.0).abs() < 1e-4);
    }

    #[test]
    fn zero_wheels_is_rejected() {
        let config = VehicleConfig {
            driven_wheels: 0,
            ..VehicleConfig::default()
        };
        assert_eq!(
            VehicleDynamics::new(config).unwrap_err(),
            DynamicsError::NoWheels("driven")
        );
    }
}
