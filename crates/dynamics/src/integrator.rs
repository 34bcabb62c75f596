//! # Motion Integration
//!
//! The dynamics model only produces wheel outputs; turning those into motion
//! is the job of a [`MotionIntegrator`]. Any rigid-body engine can sit behind
//! the trait. [`KinematicIntegrator`] is a small reference implementation
//! (single-track kinematic model, explicit Euler) used by the headless runner,
//! the benchmarks, and tests.

use crate::types::{Pose, Vec3};
use crate::vehicle::WheelActuation;
use serde::{Deserialize, Serialize};

/// Integration constants
const DAMPING_FACTOR: f32 = 0.999; // Slight rolling resistance per step

/// Consumes wheel actuation each physics tick and reports the resulting motion.
///
/// Actuation is latched: like a wheel collider, the integrator keeps applying
/// the last torques it was given until new ones arrive.
pub trait MotionIntegrator {
    /// Latch new wheel outputs.
    fn actuate(&mut self, actuation: &WheelActuation);

    /// Advance one physics tick of `dt` seconds.
    fn integrate(&mut self, dt: f32);

    /// Velocity in world space.
    fn velocity(&self) -> Vec3;

    fn pose(&self) -> Pose;

    /// Place the body at `pose` with zero velocity and cleared actuation.
    fn teleport(&mut self, pose: Pose);

    /// Velocity in the vehicle frame (z forward, x right).
    fn local_velocity(&self) -> Vec3 {
        self.pose().world_to_local(self.velocity())
    }
}

/// Parameters for [`KinematicIntegrator`]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegratorConfig {
    /// Vehicle mass in kg
    pub mass: f32,
    /// Wheel radius in meters, converts torque to force
    pub wheel_radius: f32,
    /// Distance between axles in meters
    pub wheelbase: f32,
}

impl Default for IntegratorConfig {
    fn default() -> Self {
        Self {
            mass: 1200.0,
            wheel_radius: 0.35,
            wheelbase: 2.6,
        }
    }
}

/// Single-track kinematic vehicle on a flat ground plane.
#[derive(Clone, Debug)]
pub struct KinematicIntegrator {
    config: IntegratorConfig,
    pose: Pose,
    /// Signed longitudinal speed (m/s)
    speed: f32,
    actuation: WheelActuation,
}

impl KinematicIntegrator {
    /// Body at rest at `pose` with no actuation latched.
    #[must_use]
    pub fn new(config: IntegratorConfig, pose: Pose) -> Self {
        Self {
            config,
            pose,
            speed: 0.0,
            actuation: WheelActuation::default(),
        }
    }

    /// Signed longitudinal speed in m/s.
    #[must_use]
    pub fn speed(&self) -> f32 {
        self.speed
    }
}

impl MotionIntegrator for KinematicIntegrator {
    fn actuate(&mut self, actuation: &WheelActuation) {
        self.actuation.clone_from(actuation);
    }

    fn integrate(&mut self, dt: f32) {
        let mass = self.config.mass.max(f32::EPSILON);
        let radius = self.config.wheel_radius.max(f32::EPSILON);

        // Drive force
        let drive = self.actuation.total_motor_torque() / radius;
        self.speed += drive / mass * dt;

        // Brakes oppose motion and never reverse it
        let brake_dv = self.actuation.total_brake_torque() / radius / mass * dt;
        if brake_dv > 0.0 {
            let slowed = (self.speed.abs() - brake_dv).max(0.0);
            self.speed = slowed.copysign(self.speed);
        }

        self.speed *= DAMPING_FACTOR;

        let steer = self.actuation.steer_angle().to_radians();
        let yaw_rate = self.speed * steer.tan() / self.config.wheelbase.max(f32::EPSILON);
        self.pose.heading += yaw_rate * dt;
        self.pose.position += self.pose.forward() * (self.speed * dt);
    }

    fn velocity(&self) -> Vec3 {
        self.pose.forward() * self.speed
    }

    fn pose(&self) -> Pose {
        self.pose
    }

    fn teleport(&mut self, pose: Pose) {
        self.pose = pose;
        self.speed = 0.0;
        self.actuation = WheelActuation::default();
    }
}
