use std::ops::Mul;
use approx::AbsDiffEq;
use glam::{Quat, Vec3};
use crate::Hpr;

pub const WORLD_RIGHT: Vec3 = Vec3 { x: 1.0, y: 0.0, z: 0.0 };
pub const WORLD_FORWARD: Vec3 = Vec3 { x: 0.0, y: 1.0, z: 0.0 }; // into screen
pub const WORLD_UP: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 1.0 };

// Rigid transform (no scale)
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Transform
{
    pub position: Vec3,
    pub rotation: Quat,
}
impl Default for Transform
{
    fn default() -> Self { Self::IDENTITY }
}
impl Transform
{
    pub const IDENTITY: Self = Self { position: Vec3::ZERO, rotation: Quat::IDENTITY };

    #[inline] #[must_use]
    pub fn from_position_hpr(position: Vec3, hpr: Hpr) -> Self
    {
        Self { position, rotation: hpr.to_quat() }
    }

    #[inline] #[must_use] pub fn forward(&self) -> Vec3 { self.rotation * WORLD_FORWARD }
    #[inline] #[must_use] pub fn backward(&self) -> Vec3 { -self.forward() }
    #[inline] #[must_use] pub fn right(&self) -> Vec3 { self.rotation * WORLD_RIGHT }
    #[inline] #[must_use] pub fn left(&self) -> Vec3 { -self.right() }
    #[inline] #[must_use] pub fn up(&self) -> Vec3 { self.rotation * WORLD_UP }
    #[inline] #[must_use] pub fn down(&self) -> Vec3 { -self.up() }

    #[inline] #[must_use]
    pub fn hpr(&self) -> Hpr { Hpr::from_quat(self.rotation) }

    #[inline] #[must_use]
    pub fn transform_point(&self, point: Vec3) -> Vec3 { self.position + self.rotation * point }

    #[inline] #[must_use]
    pub fn transform_vector(&self, vector: Vec3) -> Vec3 { self.rotation * vector }

    #[inline] #[must_use]
    pub fn inverse(&self) -> Transform
    {
        let rotation = self.rotation.inverse();
        Self
        {
            position: rotation * -self.position,
            rotation,
        }
    }
}

// parent * child: child expressed in the parent's space
impl Mul for Transform
{
    type Output = Transform;
    fn mul(self, rhs: Transform) -> Transform
    {
        Self
        {
            position: self.transform_point(rhs.position),
            rotation: (self.rotation * rhs.rotation).normalize(),
        }
    }
}

impl From<(Vec3, Quat)> for Transform
{
    fn from((position, rotation): (Vec3, Quat)) -> Self
    {
        Transform { position, rotation }
    }
}

// q and -q are the same rotation, so rotations compare by where they send the basis
impl AbsDiffEq for Transform
{
    type Epsilon = f32;

    fn default_epsilon() -> Self::Epsilon { 1.0e-4 }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool
    {
        self.position.abs_diff_eq(other.position, epsilon) &&
            self.forward().abs_diff_eq(other.forward(), epsilon) &&
            self.up().abs_diff_eq(other.up(), epsilon)
    }
}
