//! # Episode Controller
//!
//! Puts the world back into a start configuration between episodes: the body
//! is moved to the spawn pose plus a bounded random offset, the vehicle and
//! reward state are zeroed, and the parked cars are shuffled across the slots.
//!
//! A reset runs completely or not at all. If the spawn pose or the lot have
//! not been bound yet, it is skipped with a warning and nothing is touched.

use crate::config::SpawnConfig;
use crate::events::SlotMonitor;
use crate::lot::ParkingLot;
use crate::machine::ParkingRewardStateMachine;
use dynamics::{DriveCommand, MotionIntegrator, Pose, Vec3, VehicleDynamics};

static EMPTY_LOT: ParkingLot = ParkingLot::empty();

/// What [`EpisodeController::reset`] did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ResetOutcome {
    Reset,
    /// Not all collaborators were bound; nothing was changed
    Skipped,
}

/// Everything a reset mutates.
pub struct ResetTargets<'a> {
    pub body: &'a mut dyn MotionIntegrator,
    pub vehicle: &'a mut VehicleDynamics,
    pub machine: &'a mut ParkingRewardStateMachine,
    pub monitor: &'a mut SlotMonitor,
}

/// Owns the spawn pose, the slot layout and the RNG used between episodes.
#[derive(Debug)]
pub struct EpisodeController {
    spawn: SpawnConfig,
    origin: Option<Pose>,
    lot: Option<ParkingLot>,
    rng: fastrand::Rng,
}

impl EpisodeController {
    /// Unwired controller; bind an origin and a lot before resetting.
    #[must_use]
    pub fn new(spawn: SpawnConfig, seed: Option<u64>) -> Self {
        let rng = seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
        Self {
            spawn,
            origin: None,
            lot: None,
            rng,
        }
    }

    /// Record the pose episodes start from.
    pub fn bind_origin(&mut self, origin: Pose) {
        self.origin = Some(origin);
    }

    /// Hand over the lot that resets reshuffle.
    pub fn bind_lot(&mut self, lot: ParkingLot) {
        self.lot = Some(lot);
    }

    /// The bound lot, or an empty one.
    #[must_use]
    pub fn lot(&self) -> &ParkingLot {
        self.lot.as_ref().unwrap_or(&EMPTY_LOT)
    }

    /// Whether a reset would run.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.origin.is_some() && self.lot.is_some()
    }

    /// Respawn the body and clear all episode state, or nothing if not wired.
    pub fn reset(&mut self, targets: ResetTargets<'_>) -> ResetOutcome {
        let (Some(origin), Some(lot)) = (self.origin, self.lot.as_mut()) else {
            tracing::warn!("episode controller not fully wired, skipping reset");
            return ResetOutcome::Skipped;
        };

        let offset = unit_sphere_point(&mut self.rng) * self.spawn.radius;
        let offset = offset.flatten();
        targets.body.teleport(Pose::new(origin.position + offset, origin.heading));

        targets.vehicle.reset();
        let actuation = targets.vehicle.step(DriveCommand::IDLE, Vec3::ZERO);
        targets.body.actuate(&actuation);

        lot.assign_random_slots(&mut self.rng);
        targets.machine.reset();
        targets.monitor.reset();

        tracing::debug!(x = offset.x, z = offset.z, "episode reset");
        ResetOutcome::Reset
    }
}

/// Uniform point inside the unit sphere.
fn unit_sphere_point(rng: &mut fastrand::Rng) -> Vec3 {
    loop {
        let p = Vec3::new(
            rng.f32().mul_add(2.0, -1.0),
            rng.f32().mul_add(2.0, -1.0),
            rng.f32().mul_add(2.0, -1.0),
        );
        if p.dot(p) <= 1.0 {
            return p;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_points_stay_inside() {
        let mut rng = fastrand::Rng::with_seed(3);
        for _ in 0..1000 {
            assert!(unit_sphere_point(&mut rng).length() <= 1.0);
        }
    }

    #[test]
    fn lot_defaults_to_empty() {
        let controller = EpisodeController::new(SpawnConfig::default(), Some(1));
        assert!(controller.lot().slots().is_empty());
        assert!(!controller.is_ready());
    }
}
