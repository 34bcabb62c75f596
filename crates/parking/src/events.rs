//! Slot events.
//!
//! Geometry is polled once per tick and turned into typed events. The reward
//! state machine only ever learns about slot entry, parking, and collisions
//! through these events.

use crate::collaborators::{GeometrySource, WorldView};
use dynamics::VehicleDynamics;

/// Geometry change observed during one tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SlotEvent {
    /// The vehicle started overlapping the slot trigger region.
    EnteredSlot,
    /// The vehicle stopped overlapping the slot trigger region.
    LeftSlot,
    /// Fully inside the slot and stationary.
    FullyParked,
    /// Contact with something that is not the slot surface.
    Collided,
}

impl SlotEvent {
    /// Whether the event ends the episode.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::FullyParked | Self::Collided)
    }
}

/// Edge detector over [`GeometrySource`] queries.
#[derive(Clone, Debug, Default)]
pub struct SlotMonitor {
    inside: bool,
}

impl SlotMonitor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Query geometry and emit this tick's events.
    pub fn poll(
        &mut self,
        geometry: &dyn GeometrySource,
        view: &WorldView<'_>,
        vehicle: &VehicleDynamics,
    ) -> Vec<SlotEvent> {
        let mut events = Vec::new();

        let inside = geometry.inside_trigger_region(view);
        if inside != self.inside {
            events.push(if inside {
                SlotEvent::EnteredSlot
            } else {
                SlotEvent::LeftSlot
            });
            self.inside = inside;
        }

        if geometry.collided(view) {
            events.push(SlotEvent::Collided);
        }

        if inside && geometry.fully_inside_slot(view) && !vehicle.is_moving() {
            events.push(SlotEvent::FullyParked);
        }

        events
    }

    /// Forget slot occupancy so the next poll starts outside.
    pub fn reset(&mut self) {
        self.inside = false;
    }
}
