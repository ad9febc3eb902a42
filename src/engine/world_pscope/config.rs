use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use glam::Vec3;
use nab_pscope::{TomlRead, TomlWrite};
use serde::{Deserialize, Serialize};

// Per-mode input scaling, per second
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraSpeeds
{
    pub movement: Vec3,
    pub rotation: Vec3,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig
{
    // yaw deg/s, pitch deg/s, zoom units/s; rotation is camera-local spin in deg/s
    pub turntable: CameraSpeeds,
    // units/s and deg/s, in the camera's local frame
    pub freeflight: CameraSpeeds,
    // feed the rotation axes into a camera-local spin while orbiting
    pub turntable_camera_spin: bool,
}
impl Default for ControllerConfig
{
    fn default() -> Self
    {
        Self
        {
            turntable: CameraSpeeds
            {
                movement: Vec3::new(120.0, 45.0, 5.0),
                rotation: Vec3::splat(120.0),
            },
            freeflight: CameraSpeeds
            {
                movement: Vec3::splat(10.0),
                rotation: Vec3::splat(120.0),
            },
            turntable_camera_spin: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RigConfig
{
    // camera position relative to the gimbal at spawn and after snapping back
    pub default_offset: Vec3,
    // how far in front of the camera the anchor lands when snapped
    pub snap_distance: f32,
    // gimbal pitch stays within +-this, short of the +-90 singularity
    pub pitch_limit: f32,
    // the camera's gimbal-local y never goes above this
    pub zoom_limit: f32,
}
impl Default for RigConfig
{
    fn default() -> Self
    {
        Self
        {
            default_offset: Vec3::new(0.0, -10.0, 0.0),
            snap_distance: 10.0,
            pitch_limit: 89.9,
            zoom_limit: 0.1,
        }
    }
}

impl RigConfig
{
    // Reject values the rig cannot orbit or snap with
    pub fn validate(&self) -> Result<(), RigConfigError>
    {
        if !(0.0..=90.0).contains(&self.pitch_limit)
        {
            return Err(RigConfigError::PitchLimit(self.pitch_limit));
        }
        if !self.zoom_limit.is_finite()
        {
            return Err(RigConfigError::ZoomLimit(self.zoom_limit));
        }
        if !self.snap_distance.is_finite()
        {
            return Err(RigConfigError::SnapDistance(self.snap_distance));
        }
        if !self.default_offset.is_finite()
        {
            return Err(RigConfigError::DefaultOffset(self.default_offset));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RigConfigError
{
    PitchLimit(f32), // must be within [0, 90] degrees
    ZoomLimit(f32),
    SnapDistance(f32),
    DefaultOffset(Vec3),
}
impl Display for RigConfigError
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result { Debug::fmt(self, f) }
}
impl Error for RigConfigError { }

// Everything the viewer reads from its config file
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig
{
    #[serde(flatten)]
    pub controller: ControllerConfig,
    pub rig: RigConfig,
}
impl TomlRead for ViewerConfig { }
impl TomlWrite for ViewerConfig { }
