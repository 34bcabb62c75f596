//! # Reference Parking Lot
//!
//! A flat lot built from axis-aligned rectangles on the ground plane: boundary
//! walls, the parked cars, and the free slots. It answers the environment's
//! ray and geometry queries so episodes can run without a game engine.
//!
//! Rays are cast from the vehicle origin in the sensor's frame order: ray 0
//! straight ahead, the last ray straight back, and the rays in between fanned
//! out in pairs, odd indices to the right and even indices to the left.
//!
//! Each free slot is seen by the sensor as a target twice: the slot area
//! itself, and a thin marker along its far (+z) edge. Rays cast from inside
//! the slot never hit the area, so the marker keeps the slot visible while the
//! vehicle pulls in.
//!
//! This is a smoke-test world. The vehicle footprint is checked by its
//! corners only, which is enough to catch the collisions a parking run makes.

use dynamics::{Pose, Vec3};
use parking::{GeometrySource, ParkingLot, PerceptionSource, WorldView};
use perception::{RaySample, SensorConfig, SensorFrame};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Axis-aligned rectangle on the ground plane.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min_x: f32,
    pub min_z: f32,
    pub max_x: f32,
    pub max_z: f32,
}

impl Rect {
    /// Rectangle from its corner coordinates.
    #[must_use]
    pub const fn new(min_x: f32, min_z: f32, max_x: f32, max_z: f32) -> Self {
        Self {
            min_x,
            min_z,
            max_x,
            max_z,
        }
    }

    /// Rectangle centered on `center` with the given half extents.
    #[must_use]
    pub fn around(center: Vec3, half_x: f32, half_z: f32) -> Self {
        Self::new(
            center.x - half_x,
            center.z - half_z,
            center.x + half_x,
            center.z + half_z,
        )
    }

    /// Whether `point` lies inside or on the boundary (y ignored).
    #[must_use]
    pub fn contains(&self, point: Vec3) -> bool {
        (self.min_x..=self.max_x).contains(&point.x) && (self.min_z..=self.max_z).contains(&point.z)
    }

    /// Distance along `dir` at which a ray from `origin` enters the rectangle.
    ///
    /// Rays starting inside the rectangle do not hit it.
    #[must_use]
    pub fn ray_entry(&self, origin: Vec3, dir: Vec3) -> Option<f32> {
        let mut t_min = f32::NEG_INFINITY;
        let mut t_max = f32::INFINITY;

        for (o, d, lo, hi) in [
            (origin.x, dir.x, self.min_x, self.max_x),
            (origin.z, dir.z, self.min_z, self.max_z),
        ] {
            if d.abs() < f32::EPSILON {
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }
            let t1 = (lo - o) / d;
            let t2 = (hi - o) / d;
            t_min = t_min.max(t1.min(t2));
            t_max = t_max.min(t1.max(t2));
        }

        (t_min <= t_max && t_min >= 0.0).then_some(t_min)
    }
}

/// Static description of the lot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneLayout {
    /// Slot centers
    pub slots: Vec<Vec3>,
    /// Parked cars; they start on the first slots
    pub occupied: usize,
    pub slot_half_width: f32,
    pub slot_half_depth: f32,
    /// Depth of the target marker along the far edge of a free slot
    pub marker_depth: f32,
    pub occupant_half_width: f32,
    pub occupant_half_length: f32,
    pub vehicle_half_width: f32,
    pub vehicle_half_length: f32,
    pub walls: Vec<Rect>,
    /// Geometric length of every ray; hit fractions are relative to it
    pub ray_length: f32,
    pub wall_tag: i32,
    pub occupant_tag: i32,
    pub spawn: Pose,
}

impl Default for SceneLayout {
    fn default() -> Self {
        let slots = (0..6).map(|i| Vec3::new(-7.5 + 3.0 * i as f32, 0.0, 12.0)).collect();
        Self {
            slots,
            occupied: 5,
            slot_half_width: 1.5,
            slot_half_depth: 2.75,
            marker_depth: 0.2,
            occupant_half_width: 0.95,
            occupant_half_length: 2.2,
            vehicle_half_width: 0.9,
            vehicle_half_length: 2.1,
            walls: vec![
                Rect::new(-10.5, 15.0, 10.5, 15.5),
                Rect::new(-10.5, -8.5, 10.5, -8.0),
                Rect::new(-10.5, -8.0, -10.0, 15.0),
                Rect::new(10.0, -8.0, 10.5, 15.0),
            ],
            ray_length: 12.0,
            wall_tag: 1,
            occupant_tag: 2,
            spawn: Pose::default(),
        }
    }
}

impl SceneLayout {
    /// Slot occupancy at startup.
    #[must_use]
    pub fn lot(&self) -> ParkingLot {
        let occupied = self.occupied.min(self.slots.len());
        ParkingLot::new(self.slots.clone(), self.slots[..occupied].to_vec())
    }
}

/// Ray sensor and geometry oracle over a [`SceneLayout`].
#[derive(Clone, Debug)]
pub struct ParkingScene {
    layout: SceneLayout,
    sensor: SensorConfig,
}

impl ParkingScene {
    #[must_use]
    pub fn new(layout: SceneLayout, sensor: SensorConfig) -> Self {
        Self { layout, sensor }
    }

    #[must_use]
    pub fn layout(&self) -> &SceneLayout {
        &self.layout
    }

    fn free_slots<'a>(&'a self, lot: &'a ParkingLot) -> impl Iterator<Item = Rect> + 'a {
        let l = &self.layout;
        lot.free_slots()
            .map(move |i| Rect::around(lot.slots()[i], l.slot_half_width, l.slot_half_depth))
    }

    /// Target areas seen by the sensor: each free slot and its far-edge marker.
    fn targets<'a>(&'a self, lot: &'a ParkingLot) -> impl Iterator<Item = Rect> + 'a {
        let depth = self.layout.marker_depth;
        self.free_slots(lot).flat_map(move |slot| {
            let marker = Rect::new(slot.min_x, slot.max_z - depth, slot.max_x, slot.max_z);
            [slot, marker]
        })
    }

    /// Everything the vehicle must not touch, with its sensor tag.
    fn obstacles<'a>(&'a self, lot: &'a ParkingLot) -> impl Iterator<Item = (Rect, i32)> + 'a {
        let l = &self.layout;
        let walls = l.walls.iter().map(|w| (*w, l.wall_tag));
        let cars = lot.occupants().iter().map(|o| {
            (Rect::around(*o, l.occupant_half_width, l.occupant_half_length), l.occupant_tag)
        });
        walls.chain(cars)
    }

    fn corners(&self, pose: &Pose) -> [Vec3; 4] {
        let (hw, hl) = (self.layout.vehicle_half_width, self.layout.vehicle_half_length);
        [(-hw, -hl), (hw, -hl), (hw, hl), (-hw, hl)]
            .map(|(x, z)| pose.position + pose.local_to_world(Vec3::new(x, 0.0, z)))
    }

    fn cast(&self, origin: Vec3, dir: Vec3, lot: &ParkingLot) -> RaySample {
        let targets = self.targets(lot).map(|r| (r, self.sensor.target_tag));
        let nearest = targets
            .chain(self.obstacles(lot))
            .filter_map(|(rect, tag)| rect.ray_entry(origin, dir).map(|t| (t, tag)))
            .filter(|&(t, _)| t <= self.layout.ray_length)
            .min_by(|a, b| a.0.total_cmp(&b.0));

        match nearest {
            Some((t, tag)) => RaySample::hit(t / self.layout.ray_length, tag),
            None => RaySample::miss(),
        }
    }
}

/// Vehicle-frame yaw of ray `index` in an `n`-ray fan, positive to the right.
#[must_use]
pub fn ray_angle(index: usize, n: usize) -> f32 {
    if index == 0 {
        return 0.0;
    }
    if index + 1 == n {
        return PI;
    }
    let pair = index.div_ceil(2) as f32;
    let step = PI / ((n - 1) / 2 + 1) as f32;
    let side = if index % 2 == 1 { 1.0 } else { -1.0 };
    side * pair * step
}

impl PerceptionSource for ParkingScene {
    fn capture(&mut self, view: &WorldView<'_>) -> SensorFrame {
        let n = self.sensor.ray_count;
        let origin = view.pose.position;
        let samples = (0..n)
            .map(|i| {
                let yaw = ray_angle(i, n);
                let dir = view.pose.local_to_world(Vec3::new(yaw.sin(), 0.0, yaw.cos()));
                self.cast(origin, dir, view.lot)
            })
            .collect();
        SensorFrame::new(samples, &self.sensor)
    }
}

impl GeometrySource for ParkingScene {
    fn inside_trigger_region(&self, view: &WorldView<'_>) -> bool {
        let corners = self.corners(&view.pose);
        self.free_slots(view.lot).any(|slot| {
            slot.contains(view.pose.position) || corners.iter().any(|c| slot.contains(*c))
        })
    }

    fn fully_inside_slot(&self, view: &WorldView<'_>) -> bool {
        let corners = self.corners(&view.pose);
        self.free_slots(view.lot).any(|slot| corners.iter().all(|c| slot.contains(*c)))
    }

    fn collided(&self, view: &WorldView<'_>) -> bool {
        let corners = self.corners(&view.pose);
        self.obstacles(view.lot)
            .any(|(rect, _)| corners.iter().any(|c| rect.contains(*c)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fan_alternates_right_and_left() {
        let n = 11;
        assert_eq!(ray_angle(0, n), 0.0);
        assert_eq!(ray_angle(10, n), PI);
        assert!(ray_angle(1, n) > 0.0);
        assert!(ray_angle(2, n) < 0.0);
        // center-lateral rays point straight sideways
        assert!((ray_angle(5, n) - PI / 2.0).abs() < 1e-5);
        assert!((ray_angle(6, n) + PI / 2.0).abs() < 1e-5);
    }

    #[test]
    fn ray_entry_ignores_boxes_behind_and_around_the_origin() {
        let rect = Rect::new(-1.0, 4.0, 1.0, 6.0);
        let forward = Vec3::new(0.0, 0.0, 1.0);
        assert_eq!(rect.ray_entry(Vec3::ZERO, forward), Some(4.0));
        assert_eq!(rect.ray_entry(Vec3::ZERO, -forward), None);
        assert_eq!(rect.ray_entry(Vec3::new(0.0, 0.0, 5.0), forward), None);
        assert_eq!(rect.ray_entry(Vec3::new(3.0, 0.0, 0.0), forward), None);
    }

    #[test]
    fn marker_stays_visible_from_inside_the_slot() {
        let layout = SceneLayout::default();
        let lot = layout.lot();
        let sensor = SensorConfig::default();
        let scene = ParkingScene::new(layout, sensor.clone());

        let sample = scene.cast(Vec3::new(7.5, 0.0, 11.0), Vec3::new(0.0, 0.0, 1.0), &lot);
        assert_eq!(sample.tag, sensor.target_tag);
        assert!((sample.fraction - 3.55 / 12.0).abs() < 1e-5);
    }

    #[test]
    fn default_lot_leaves_last_slot_free() {
        let lot = SceneLayout::default().lot();
        assert_eq!(lot.free_slots().collect::<Vec<_>>(), vec![5]);
    }
}
