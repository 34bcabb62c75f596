//! Capabilities the environment consumes from the outside world.
//!
//! Scene, physics and learner are all external. The environment receives them
//! as typed trait objects at construction time and calls them in a fixed order
//! each tick; none of them hold references back into the environment.

use crate::lot::ParkingLot;
use dynamics::{DriveCommand, Pose};
use perception::SensorFrame;

/// What a collaborator may look at when answering a query: the vehicle pose
/// and the current slot occupancy.
#[derive(Copy, Clone, Debug)]
pub struct WorldView<'a> {
    pub pose: Pose,
    pub lot: &'a ParkingLot,
}

/// Radial ray sensor mounted on the vehicle.
pub trait PerceptionSource {
    /// Cast this tick's rays.
    fn capture(&mut self, view: &WorldView<'_>) -> SensorFrame;
}

/// Slot and obstacle geometry.
pub trait GeometrySource {
    /// Vehicle overlaps the free slot's trigger region.
    fn inside_trigger_region(&self, view: &WorldView<'_>) -> bool;

    /// Vehicle bounding volume is fully contained in the free slot.
    fn fully_inside_slot(&self, view: &WorldView<'_>) -> bool;

    /// Vehicle touches anything other than the slot surface.
    fn collided(&self, view: &WorldView<'_>) -> bool;
}

/// The learner (or a scripted stand-in).
pub trait PolicyAgent {
    /// Publish this tick's observation.
    fn observe(&mut self, speed_kph: f32);

    /// Ask for the next `(steering, throttle)` action.
    fn request_action(&mut self) -> DriveCommand;
}

impl<P: PolicyAgent + ?Sized> PolicyAgent for Box<P> {
    fn observe(&mut self, speed_kph: f32) {
        (**self).observe(speed_kph);
    }

    fn request_action(&mut self) -> DriveCommand {
        (**self).request_action()
    }
}

/// A policy that always returns the same command.
#[derive(Copy, Clone, Debug, Default)]
pub struct FixedPolicy(pub DriveCommand);

impl PolicyAgent for FixedPolicy {
    fn observe(&mut self, _speed_kph: f32) {}

    fn request_action(&mut self) -> DriveCommand {
        self.0
    }
}
