use std::fmt::{Display, Formatter};
use std::ops::{Add, AddAssign, Neg, Sub};
use serde::{Deserialize, Serialize};

// Wrap degrees into [-180, 180)
#[inline] #[must_use]
pub fn wrap_degrees(degrees: f32) -> f32
{
    let wrapped = (degrees + 180.0).rem_euclid(360.0) - 180.0;
    // rem_euclid can round up to the modulus for tiny negative inputs
    if wrapped >= 180.0 { wrapped - 360.0 } else { wrapped }
}

#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd)]
pub struct Radians(pub f32);
impl Radians
{
    pub const ZERO: Radians = Radians(0.0);
    pub const PI: Radians = Radians(std::f32::consts::PI);
}
impl Display for Radians
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result
    {
        Display::fmt(&self.0, f)?;
        f.write_str("rad")
    }
}
impl From<Degrees> for Radians
{
    fn from(degrees: Degrees) -> Self { Self(degrees.0.to_radians()) }
}
impl Neg for Radians
{
    type Output = Self;
    fn neg(self) -> Self { Self(-self.0) }
}

#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Degrees(pub f32);
impl Degrees
{
    pub const ZERO: Degrees = Degrees(0.0);

    // the same angle, in [-180, 180)
    #[inline] #[must_use]
    pub fn wrapped(self) -> Self { Self(wrap_degrees(self.0)) }

    #[inline] #[must_use]
    pub fn clamped(self, min: Degrees, max: Degrees) -> Self { Self(self.0.clamp(min.0, max.0)) }
}
impl From<Radians> for Degrees
{
    fn from(radians: Radians) -> Self { Self(radians.0.to_degrees()) }
}
impl Display for Degrees
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result
    {
        Display::fmt(&self.0, f)?;
        f.write_str("°")
    }
}
impl Neg for Degrees
{
    type Output = Self;
    fn neg(self) -> Self { Self(-self.0) }
}
impl Add for Degrees
{
    type Output = Self;
    fn add(self, rhs: Self) -> Self { Self(self.0 + rhs.0) }
}
impl AddAssign for Degrees
{
    fn add_assign(&mut self, rhs: Self) { self.0 += rhs.0; }
}
impl Sub for Degrees
{
    type Output = Self;
    fn sub(self, rhs: Self) -> Self { Self(self.0 - rhs.0) }
}
