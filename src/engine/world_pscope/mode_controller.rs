use containers_pscope::InvalidReparentError;
use input_pscope::{keys, ButtonState, InputContext};
use math_pscope::Hpr;
use nab_pscope::CompletionState;
use crate::{CameraMode, CameraRig, ControllerConfig};

/// Turns one frame of mapped input into camera rig motion.
///
/// Owns the rig; the outer loop calls [`ModeController::update`] once per frame with the
/// elapsed time and stops when it returns [`CompletionState::Completed`].
#[derive(Debug)]
pub struct ModeController
{
    rig: CameraRig,
    config: ControllerConfig,
    toggle_button: ButtonState,
}
impl ModeController
{
    #[must_use]
    pub fn new(rig: CameraRig, config: ControllerConfig) -> Self
    {
        Self
        {
            rig,
            config,
            toggle_button: ButtonState::Off,
        }
    }

    #[inline] #[must_use] pub fn rig(&self) -> &CameraRig { &self.rig }
    #[inline] #[must_use] pub fn rig_mut(&mut self) -> &mut CameraRig { &mut self.rig }
    #[inline] #[must_use] pub fn mode(&self) -> CameraMode { self.rig.mode() }
    #[inline] #[must_use] pub fn config(&self) -> &ControllerConfig { &self.config }

    // Toggle, then motion in the (possibly new) mode, then one-shot actions
    pub fn update(&mut self, dt: f32, input: &InputContext) -> Result<CompletionState, InvalidReparentError>
    {
        let dt = if dt.is_finite() && dt >= 0.0 { dt } else
        {
            log::warn!("Ignoring motion for a frame with dt={dt}");
            0.0
        };

        self.toggle_button.set(input.flag(keys::TOGGLE_CAMERA));
        if self.toggle_button.is_press()
        {
            self.rig.toggle_mode()?;
        }

        match self.rig.mode()
        {
            CameraMode::Turntable => self.update_turntable(dt, input),
            CameraMode::Freeflight => self.update_freeflight(dt, input),
        }

        if input.flag(keys::SNAP_ANCHOR_TO_CAMERA)
        {
            self.rig.snap_anchor_to_camera();
        }
        if input.flag(keys::SNAP_CAMERA_TO_ANCHOR)
        {
            self.rig.snap_camera_to_anchor();
        }
        if input.flag(keys::ALIGN_ANCHOR_TO_CAMERA)
        {
            self.rig.align_anchor_to_camera();
        }

        Ok(match input.flag(keys::QUIT)
        {
            true => CompletionState::Completed,
            false => CompletionState::InProgress,
        })
    }

    fn update_turntable(&mut self, dt: f32, input: &InputContext)
    {
        let speeds = &self.config.turntable;
        let movement = input.axis2(keys::MOVEMENT);
        let yaw = movement.x * speeds.movement.x * dt;
        let pitch = movement.y * speeds.movement.y * dt;
        let zoom = input.scalar(keys::ZOOM) * speeds.movement.z * dt;

        if self.config.turntable_camera_spin
        {
            let spin = input.axis(keys::ROTATION) * speeds.rotation * dt;
            self.rig.orbit_full(yaw, pitch, zoom, Hpr::from(spin));
        }
        else
        {
            self.rig.orbit(yaw, pitch, zoom);
        }

        if input.flag(keys::RECENTER)
        {
            self.rig.look_at_anchor();
        }
    }

    fn update_freeflight(&mut self, dt: f32, input: &InputContext)
    {
        let speeds = &self.config.freeflight;
        let movement = input.axis(keys::MOVEMENT) * speeds.movement * dt;
        let rotation = input.axis(keys::ROTATION) * speeds.rotation * dt;
        self.rig.freeflight_move(movement, Hpr::from(rotation));
    }
}
