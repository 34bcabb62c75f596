#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! # Ray Perception
//!
//! Consumes the raw output of a radial ray sensor and turns it into the
//! directional signals used for parking: which rays see the slot marker, how
//! far away it is, and whether the vehicle sits centered between the slot's
//! side walls.
//!
//! The ray caster itself is external. It hands over a [`SensorFrame`] per tick,
//! either as a `Vec<RaySample>` or as a packed byte buffer; [`aggregate`]
//! partitions it into [`DirectionalReadings`].

pub mod error;
pub mod frame;
pub mod readings;

pub use error::PerceptionError;
pub use frame::{RaySample, SensorConfig, SensorFrame, NO_HIT};
pub use readings::{aggregate, DirectionalReadings, Reading, CENTER_LATERAL_INDEX};
