#![deny(clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::float_cmp
)]
//! # Vehicle Dynamics
//!
//! Wheel-level vehicle model for the parking environment.
//!
//! ## Key Components
//!
//! -   **[`VehicleDynamics`]:** converts a normalized [`DriveCommand`] into a
//!     [`WheelActuation`] (motor torque and brake torque per driven wheel, steer
//!     angle per steered wheel). It enforces the speed governor and brakes
//!     when the throttle opposes the current direction of travel.
//! -   **[`MotionIntegrator`]:** the seam to whatever engine integrates the
//!     body. [`KinematicIntegrator`] is a small single-track implementation.
//! -   **[`Vec3`] / [`Pose`]:** ground-plane math shared with the other crates.
//!
//! ## Usage
//!
//! ```rust
//! use dynamics::{DriveCommand, KinematicIntegrator, IntegratorConfig, MotionIntegrator,
//!                Pose, VehicleConfig, VehicleDynamics};
//!
//! let mut vehicle = VehicleDynamics::new(VehicleConfig::default())?;
//! let mut body = KinematicIntegrator::new(IntegratorConfig::default(), Pose::default());
//!
//! for _ in 0..100 {
//!     let actuation = vehicle.step(DriveCommand::new(0.0, 0.5), body.local_velocity());
//!     body.actuate(&actuation);
//!     body.integrate(0.02);
//! }
//! assert!(vehicle.state().speed_kph > 0.0);
//! # Ok::<(), dynamics::DynamicsError>(())
//! ```

pub mod error;
pub mod integrator;
pub mod types;
pub mod vehicle;

pub use error::DynamicsError;
pub use integrator::{IntegratorConfig, KinematicIntegrator, MotionIntegrator};
pub use types::{Pose, Vec3};
pub use vehicle::{
    DriveCommand, DrivenWheel, SteeredWheel, TravelDirection, VehicleConfig, VehicleDynamics,
    VehicleState, WheelActuation,
};
