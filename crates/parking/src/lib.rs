#![deny(clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_precision_loss,
    clippy::float_cmp,
    clippy::should_implement_trait
)]
//! # Parking Environment
//!
//! Episode logic for training a parking policy.
//!
//! ## Key Components
//!
//! -   **[`ParkingRewardStateMachine`]:** the Searching / Navigating / Parked /
//!     Collided phase machine. It cruises while searching, forwards policy
//!     actions while navigating, and computes the shaped reward.
//! -   **[`SlotMonitor`]:** turns geometry queries into [`SlotEvent`]s.
//! -   **[`EpisodeController`]:** respawns the vehicle and reshuffles the
//!     parked cars between episodes.
//! -   **[`ParkingEnv`]:** runs a full decision tick over injected
//!     [`PerceptionSource`], [`GeometrySource`], `MotionIntegrator` and
//!     [`PolicyAgent`] collaborators and implements [`Env`].

pub mod collaborators;
pub mod config;
pub mod controller;
pub mod env;
pub mod episode;
pub mod error;
pub mod events;
pub mod lot;
pub mod machine;
pub mod parking_env;
pub mod reward;

pub use collaborators::{FixedPolicy, GeometrySource, PerceptionSource, PolicyAgent, WorldView};
pub use config::{CruiseConfig, EnvConfig, EpisodeConfig, RewardConfig, SpawnConfig};
pub use controller::{EpisodeController, ResetOutcome, ResetTargets};
pub use env::Env;
pub use episode::{LateralBias, ParkingEpisodeState, Phase};
pub use error::EnvError;
pub use events::{SlotEvent, SlotMonitor};
pub use lot::ParkingLot;
pub use machine::{ParkingRewardStateMachine, TickInput, TickOutcome};
pub use parking_env::{ParkingEnv, ParkingEnvBuilder, StepResult};
pub use reward::RewardBreakdown;
