//! # Core Vector Types
//!
//! Small copyable vector and pose types shared by the dynamics model, the
//! reference integrator and the environment crate.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub};

/// 3D vector. The ground plane is x/z with y up.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    /// Vehicle-local forward axis.
    pub const FORWARD: Self = Self::new(0.0, 0.0, 1.0);

    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[must_use]
    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction, or zero for a zero vector.
    #[must_use]
    pub fn normalize(self) -> Self {
        let len = self.length();
        if len > f32::EPSILON {
            self / len
        } else {
            Self::ZERO
        }
    }

    /// Drops the vertical component, keeping motion on the ground plane.
    #[must_use]
    pub const fn flatten(self) -> Self {
        Self::new(self.x, 0.0, self.z)
    }
}

impl Add for Vec3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl MulAssign<f32> for Vec3 {
    fn mul_assign(&mut self, rhs: f32) {
        *self = *self * rhs;
    }
}

impl Div<f32> for Vec3 {
    type Output = Self;
    fn div(self, rhs: f32) -> Self {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl From<Vec3> for glam::Vec3 {
    fn from(v: Vec3) -> Self {
        glam::Vec3::new(v.x, v.y, v.z)
    }
}

impl From<glam::Vec3> for Vec3 {
    fn from(v: glam::Vec3) -> Self {
        Vec3::new(v.x, v.y, v.z)
    }
}

/// Position on the ground plane plus a yaw angle.
///
/// `heading` is measured in radians around the vertical axis, with zero
/// facing world +z and positive angles turning toward +x.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub heading: f32,
}

impl Pose {
    #[must_use]
    pub const fn new(position: Vec3, heading: f32) -> Self {
        Self { position, heading }
    }

    fn rotation(&self) -> glam::Quat {
        glam::Quat::from_rotation_y(self.heading)
    }

    /// Rotate a vehicle-local direction into world space.
    #[must_use]
    pub fn local_to_world(&self, local: Vec3) -> Vec3 {
        (self.rotation() * glam::Vec3::from(local)).into()
    }

    /// Rotate a world-space direction into the vehicle frame.
    #[must_use]
    pub fn world_to_local(&self, world: Vec3) -> Vec3 {
        (self.rotation().inverse() * glam::Vec3::from(world)).into()
    }

    /// World-space unit vector the vehicle is facing.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.local_to_world(Vec3::FORWARD)
    }
}
