//! Parking slot occupancy.

use dynamics::Vec3;
use serde::{Deserialize, Serialize};

/// Occupants within this distance of a slot center count as parked on it.
const OCCUPIED_EPSILON: f32 = 1e-3;

/// Slot centers plus the positions of the parked cars occupying them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ParkingLot {
    slots: Vec<Vec3>,
    occupants: Vec<Vec3>,
}

impl ParkingLot {
    /// Lot with no slots and no parked cars.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            slots: Vec::new(),
            occupants: Vec::new(),
        }
    }

    #[must_use]
    pub fn new(slots: Vec<Vec3>, occupants: Vec<Vec3>) -> Self {
        Self { slots, occupants }
    }

    /// Slot centers, in layout order.
    #[must_use]
    pub fn slots(&self) -> &[Vec3] {
        &self.slots
    }

    /// Current positions of the parked cars.
    #[must_use]
    pub fn occupants(&self) -> &[Vec3] {
        &self.occupants
    }

    /// Shuffle the occupants, then park the first `min(slots, occupants)` of
    /// them on the slots in order.
    pub fn assign_random_slots(&mut self, rng: &mut fastrand::Rng) {
        let n = self.occupants.len();
        for i in 0..n {
            let j = rng.usize(i..n);
            self.occupants.swap(i, j);
        }

        let assigned = self.slots.len().min(n);
        for (occupant, slot) in self.occupants.iter_mut().zip(&self.slots).take(assigned) {
            *occupant = *slot;
        }
        tracing::trace!(
            assigned,
            free = self.slots.len() - assigned,
            "slots reassigned"
        );
    }

    /// Indices of slots no occupant is parked on.
    #[must_use = "iterators are lazy"]
    pub fn free_slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            let taken = self
                .occupants
                .iter()
                .any(|o| (*o - *slot).length() < OCCUPIED_EPSILON);
            (!taken).then_some(i)
        })
    }
}
