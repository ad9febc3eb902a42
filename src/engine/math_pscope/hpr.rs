use std::ops::{Add, AddAssign, Sub};
use glam::{Mat3, Quat, Vec3};
use serde::{Deserialize, Serialize};
use crate::{wrap_degrees, Degrees, Radians};

// Heading/pitch/roll Euler angles, in degrees
// heading is about +Z (up), pitch about +X (right), roll about +Y (forward)
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hpr
{
    pub heading: f32,
    pub pitch: f32,
    pub roll: f32,
}
impl Hpr
{
    pub const ZERO: Self = Self { heading: 0.0, pitch: 0.0, roll: 0.0 };

    #[inline] #[must_use]
    pub const fn new(heading: f32, pitch: f32, roll: f32) -> Self { Self { heading, pitch, roll } }

    #[inline] #[must_use] pub fn heading(&self) -> Degrees { Degrees(self.heading) }
    #[inline] #[must_use] pub fn pitch(&self) -> Degrees { Degrees(self.pitch) }
    #[inline] #[must_use] pub fn roll(&self) -> Degrees { Degrees(self.roll) }

    // Heading and roll wrapped into [-180, 180), pitch untouched
    #[inline] #[must_use]
    pub fn canonical(self) -> Self
    {
        Self
        {
            heading: wrap_degrees(self.heading),
            pitch: self.pitch,
            roll: wrap_degrees(self.roll),
        }
    }

    // R = Rz(heading) * Rx(pitch) * Ry(roll)
    #[must_use]
    pub fn to_quat(self) -> Quat
    {
        let heading = Radians::from(self.heading());
        let pitch = Radians::from(self.pitch());
        let roll = Radians::from(self.roll());
        Quat::from_rotation_z(heading.0) * Quat::from_rotation_x(pitch.0) * Quat::from_rotation_y(roll.0)
    }

    // Recovers canonical angles from a rotation; pitch lands in [-90, 90]
    #[must_use]
    pub fn from_quat(rotation: Quat) -> Self
    {
        let m = Mat3::from_quat(rotation.normalize());
        let sin_pitch = m.y_axis.z.clamp(-1.0, 1.0);
        let pitch = sin_pitch.asin();

        // near +-90 pitch heading and roll share an axis, fold it all into heading
        const LOCK_EPSILON: f32 = 1.0e-6;
        let (heading, roll) = if 1.0 - sin_pitch.abs() > LOCK_EPSILON
        {
            (f32::atan2(-m.y_axis.x, m.y_axis.y), f32::atan2(-m.x_axis.z, m.z_axis.z))
        }
        else
        {
            (f32::atan2(m.x_axis.y, m.x_axis.x), 0.0)
        };

        Self
        {
            heading: Degrees::from(Radians(heading)).0,
            pitch: Degrees::from(Radians(pitch)).0,
            roll: Degrees::from(Radians(roll)).0,
        }.canonical()
    }

    // Orientation whose forward axis points along `direction`, with zero roll
    #[must_use]
    pub fn looking_along(direction: Vec3) -> Option<Self>
    {
        if direction.length_squared() <= f32::EPSILON
        {
            return None;
        }
        let flat = direction.truncate().length();
        Some(Self
        {
            heading: f32::atan2(-direction.x, direction.y).to_degrees(),
            pitch: f32::atan2(direction.z, flat).to_degrees(),
            roll: 0.0,
        }.canonical())
    }
}
impl From<Vec3> for Hpr
{
    fn from(v: Vec3) -> Self { Self { heading: v.x, pitch: v.y, roll: v.z } }
}
impl From<Hpr> for Vec3
{
    fn from(hpr: Hpr) -> Self { Vec3::new(hpr.heading, hpr.pitch, hpr.roll) }
}
impl Add for Hpr
{
    type Output = Self;
    fn add(self, rhs: Self) -> Self
    {
        Self
        {
            heading: self.heading + rhs.heading,
            pitch: self.pitch + rhs.pitch,
            roll: self.roll + rhs.roll,
        }
    }
}
impl AddAssign for Hpr
{
    fn add_assign(&mut self, rhs: Self) { *self = *self + rhs; }
}
impl Sub for Hpr
{
    type Output = Self;
    fn sub(self, rhs: Self) -> Self
    {
        Self
        {
            heading: self.heading - rhs.heading,
            pitch: self.pitch - rhs.pitch,
            roll: self.roll - rhs.roll,
        }
    }
}
