#![deny(clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_precision_loss,
    clippy::float_cmp
)]
//! # autopark
//!
//! Training environment for an autonomous parking policy.
//!
//! ## Overview
//!
//! A simulated car has to find the one empty slot in a row of parked cars,
//! drive into it and come to rest fully inside. A learning policy steers
//! while a shaped reward tracks its progress. Everything outside the episode
//! logic (ray casting, collision geometry, rigid-body motion, the learner
//! itself) is an injected collaborator, so the same core runs inside a game
//! engine or headless.
//!
//! ### The Crates
//!
//! -   **[`dynamics`]:** turns `(steering, throttle)` into wheel torques and
//!     brakes, enforces the speed governor, and ships a small kinematic
//!     integrator.
//! -   **[`perception`]:** splits a radial ray frame into front, back, left and
//!     right readings.
//! -   **[`parking`]:** the reward state machine, slot events, episode resets
//!     and the [`parking::ParkingEnv`] driver.
//! -   **`autopark`:** this crate. A flat reference lot ([`scene`]) that
//!     answers ray and geometry queries, baseline policies ([`policies`]), and
//!     the episode summaries printed by the `autopark` binary ([`summary`]).

pub mod policies;
pub mod scene;
pub mod summary;

pub use dynamics;
pub use parking;
pub use perception;
