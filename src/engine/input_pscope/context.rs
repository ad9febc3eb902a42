use std::collections::HashMap;
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

// Names the camera controller reads from an input context
pub mod keys
{
    pub const MOVEMENT: &str = "movement";
    pub const ROTATION: &str = "rotation";
    pub const ZOOM: &str = "zoom";
    pub const TOGGLE_CAMERA: &str = "toggle_camera";
    pub const RECENTER: &str = "recenter";
    pub const SNAP_ANCHOR_TO_CAMERA: &str = "snap_anchor_to_camera";
    pub const SNAP_CAMERA_TO_ANCHOR: &str = "snap_camera_to_anchor";
    pub const ALIGN_ANCHOR_TO_CAMERA: &str = "align_anchor_to_camera";
    pub const QUIT: &str = "quit";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputValue
{
    Flag(bool),
    Scalar(f32),
    Axis(Vec<f32>), // components conventionally in [-1, 1]
}

// One frame's worth of mapped input: named axes and flags
// Reads never fail, absent or mismatched values read as zero/false
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputContext
{
    values: HashMap<String, InputValue>,
}
impl InputContext
{
    pub fn set(&mut self, name: impl Into<String>, value: InputValue)
    {
        self.values.insert(name.into(), value);
    }

    #[must_use] pub fn with_flag(mut self, name: &str, on: bool) -> Self { self.set(name, InputValue::Flag(on)); self }
    #[must_use] pub fn with_scalar(mut self, name: &str, value: f32) -> Self { self.set(name, InputValue::Scalar(value)); self }
    #[must_use] pub fn with_axis2(mut self, name: &str, value: Vec2) -> Self { self.set(name, InputValue::Axis(value.to_array().to_vec())); self }
    #[must_use] pub fn with_axis3(mut self, name: &str, value: Vec3) -> Self { self.set(name, InputValue::Axis(value.to_array().to_vec())); self }

    #[inline] #[must_use] pub fn get(&self, name: &str) -> Option<&InputValue> { self.values.get(name) }
    #[inline] #[must_use] pub fn contains(&self, name: &str) -> bool { self.values.contains_key(name) }
    #[inline] #[must_use] pub fn is_empty(&self) -> bool { self.values.is_empty() }

    // 1D axes fill x, 2D fill x/y, extra components are dropped
    #[must_use]
    pub fn axis(&self, name: &str) -> Vec3
    {
        match self.values.get(name)
        {
            Some(InputValue::Scalar(v)) => Vec3::new(*v, 0.0, 0.0),
            Some(InputValue::Axis(components)) =>
            {
                let mut out = [0.0f32; 3];
                for (o, c) in out.iter_mut().zip(components.iter())
                {
                    *o = *c;
                }
                Vec3::from_array(out)
            }
            Some(InputValue::Flag(_)) =>
            {
                log::trace!("Input '{name}' is a flag, reading as a zero axis");
                Vec3::ZERO
            }
            None => Vec3::ZERO,
        }
    }

    #[inline] #[must_use]
    pub fn axis2(&self, name: &str) -> Vec2 { self.axis(name).truncate() }

    #[inline] #[must_use]
    pub fn scalar(&self, name: &str) -> f32 { self.axis(name).x }

    #[must_use]
    pub fn flag(&self, name: &str) -> bool
    {
        match self.values.get(name)
        {
            Some(InputValue::Flag(on)) => *on,
            Some(_) =>
            {
                log::trace!("Input '{name}' is an axis, reading as an unset flag");
                false
            }
            None => false,
        }
    }
}
