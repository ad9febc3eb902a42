use containers_pscope::{InvalidReparentError, NodeIndex};
use glam::Vec3;
use math_pscope::{Degrees, Hpr, Transform, WORLD_FORWARD};
use crate::{RigConfig, SceneTree};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CameraMode
{
    // orbit the gimbal around a fixed anchor
    #[default]
    Turntable,
    // fly the camera directly, the anchor rides along in front of it
    Freeflight,
}
impl CameraMode
{
    #[inline] #[must_use]
    pub fn toggled(self) -> Self
    {
        match self
        {
            Self::Turntable => Self::Freeflight,
            Self::Freeflight => Self::Turntable,
        }
    }
}

/// Anchor, gimbal and camera nodes arranged for one of two control schemes.
///
/// Turntable: `world -> anchor -> gimbal -> camera`.
/// Freeflight: `world -> camera -> anchor -> gimbal` (the gimbal is inert).
///
/// Switching between the two reparents nodes in place while keeping every world pose,
/// so the view never jumps.
#[derive(Debug)]
pub struct CameraRig
{
    tree: SceneTree,
    anchor: NodeIndex,
    gimbal: NodeIndex,
    camera: NodeIndex,
    mode: CameraMode,
    config: RigConfig,
}
impl Default for CameraRig
{
    fn default() -> Self { Self::new(RigConfig::default()) }
}
impl CameraRig
{
    // Build the turntable topology, with the camera at the default offset behind the anchor
    #[must_use]
    pub fn new(config: RigConfig) -> Self
    {
        let mut tree = SceneTree::new();
        let anchor = tree.add_node("camera_anchor", tree.root());
        let gimbal = tree.add_node("camera_gimbal", anchor);
        let camera = tree.add_node("camera", gimbal);
        tree.set_local_position(camera, config.default_offset);

        Self
        {
            tree,
            anchor,
            gimbal,
            camera,
            mode: CameraMode::Turntable,
            config,
        }
    }

    #[inline] #[must_use] pub fn mode(&self) -> CameraMode { self.mode }
    #[inline] #[must_use] pub fn config(&self) -> &RigConfig { &self.config }
    #[inline] #[must_use] pub fn tree(&self) -> &SceneTree { &self.tree }
    // for attaching scene content under the world or anchor; the rig nodes themselves should be left alone
    #[inline] #[must_use] pub fn tree_mut(&mut self) -> &mut SceneTree { &mut self.tree }

    #[inline] #[must_use] pub fn anchor(&self) -> NodeIndex { self.anchor }
    #[inline] #[must_use] pub fn gimbal(&self) -> NodeIndex { self.gimbal }
    #[inline] #[must_use] pub fn camera(&self) -> NodeIndex { self.camera }

    #[inline] #[must_use] pub fn world_transform(&self, node: NodeIndex) -> Transform { self.tree.world_transform(node) }

    // Camera position in the gimbal's frame, regardless of which node is the camera's parent
    #[must_use]
    pub fn camera_offset(&self) -> Vec3
    {
        self.tree.relative_transform(self.camera, self.gimbal).position
    }

    /// Swap between turntable and freeflight topologies.
    ///
    /// Both reparents keep world poses, so toggling twice puts every node back where it was.
    /// They are validated together, so a tree edited into a bad shape is left untouched.
    pub fn toggle_mode(&mut self) -> Result<CameraMode, InvalidReparentError>
    {
        let world = self.tree.root();
        let moves = match self.mode
        {
            CameraMode::Turntable => [(self.camera, world), (self.anchor, self.camera)],
            CameraMode::Freeflight => [(self.anchor, world), (self.camera, self.gimbal)],
        };
        self.tree.reparent_all_preserving_world_transform(&moves)?;
        self.mode = self.mode.toggled();
        log::debug!("Camera mode is now {:?}", self.mode);
        Ok(self.mode)
    }

    /// Turntable orbit: spin the gimbal, tilt it, and dolly the camera along its offset.
    ///
    /// Pitch is clamped short of straight up/down; the camera may back away without limit
    /// but never pushes past `zoom_limit` towards the anchor. Ignored in freeflight.
    pub fn orbit(&mut self, yaw_delta: f32, pitch_delta: f32, zoom_delta: f32)
    {
        if self.mode != CameraMode::Turntable
        {
            log::trace!("Ignoring orbit while in {:?}", self.mode);
            return;
        }

        // NaN falls back to straight up/down
        let limit = Degrees(self.config.pitch_limit.abs().min(90.0));
        let gimbal_hpr = self.tree.node(self.gimbal).local_orientation();
        let pitch = (gimbal_hpr.pitch() - Degrees(pitch_delta)).clamped(-limit, limit);
        self.tree.set_local_orientation(self.gimbal, Hpr
        {
            heading: gimbal_hpr.heading + yaw_delta,
            pitch: pitch.0,
            roll: gimbal_hpr.roll,
        });

        let mut offset = self.tree.node(self.camera).local_position();
        offset.y = (offset.y + zoom_delta).min(self.config.zoom_limit);
        self.tree.set_local_position(self.camera, offset);
    }

    // Orbit, plus a spin of the camera about its own axes
    pub fn orbit_full(&mut self, yaw_delta: f32, pitch_delta: f32, zoom_delta: f32, camera_rotation: Hpr)
    {
        if self.mode != CameraMode::Turntable
        {
            log::trace!("Ignoring orbit while in {:?}", self.mode);
            return;
        }

        self.orbit(yaw_delta, pitch_delta, zoom_delta);
        let hpr = self.tree.node(self.camera).local_orientation();
        self.tree.set_local_orientation(self.camera, hpr + camera_rotation);
    }

    // Freeflight: translate along the camera's own axes (as it faces before this move), then turn it
    pub fn freeflight_move(&mut self, local_move_delta: Vec3, rotate_delta: Hpr)
    {
        if self.mode != CameraMode::Freeflight
        {
            log::trace!("Ignoring freeflight move while in {:?}", self.mode);
            return;
        }

        let local = self.tree.node(self.camera).local_transform();
        let hpr = self.tree.node(self.camera).local_orientation();
        self.tree.set_local_position(self.camera, local.position + local.transform_vector(local_move_delta));
        self.tree.set_local_orientation(self.camera, hpr + rotate_delta);
    }

    // Turn the camera in place to face the anchor, with no roll
    pub fn look_at_anchor(&mut self)
    {
        let camera_world = self.tree.world_transform(self.camera);
        let anchor_world = self.tree.world_transform(self.anchor);
        let Some(facing) = Hpr::looking_along(anchor_world.position - camera_world.position) else
        {
            return;
        };

        self.tree.set_world_rotation(self.camera, facing.to_quat());
        // in freeflight the anchor hangs off the camera and would swing with it
        self.tree.set_world_transform(self.anchor, anchor_world);
    }

    // Rotate the anchor to the camera's world orientation and level the gimbal; the camera stays put
    pub fn align_anchor_to_camera(&mut self)
    {
        let camera_world = self.tree.world_transform(self.camera);
        self.tree.set_world_rotation(self.anchor, camera_world.rotation);
        self.tree.set_local_orientation(self.gimbal, Hpr::ZERO);
        self.tree.set_world_transform(self.camera, camera_world);
        log::debug!("Aligned anchor to camera");
    }

    // Move the anchor `snap_distance` in front of the camera; the camera stays put
    pub fn snap_anchor_to_camera(&mut self)
    {
        let camera_world = self.tree.world_transform(self.camera);
        let target = camera_world.transform_point(WORLD_FORWARD * self.config.snap_distance);
        self.tree.set_world_position(self.anchor, target);
        self.tree.set_world_transform(self.camera, camera_world);
        log::debug!("Snapped anchor to {target}");
    }

    /// Level the gimbal and put the camera back at the default offset from it.
    ///
    /// In freeflight the camera is not under the gimbal, so it is moved in world space to
    /// where that offset would place it, keeping its orientation relative to the gimbal.
    /// The anchor keeps its world pose either way.
    pub fn snap_camera_to_anchor(&mut self)
    {
        match self.mode
        {
            CameraMode::Turntable =>
            {
                self.tree.set_local_orientation(self.gimbal, Hpr::ZERO);
                self.tree.set_local_position(self.camera, self.config.default_offset);
            }
            CameraMode::Freeflight =>
            {
                let anchor_world = self.tree.world_transform(self.anchor);
                let relative_rotation = self.tree.relative_transform(self.camera, self.gimbal).rotation;
                self.tree.set_local_orientation(self.gimbal, Hpr::ZERO);

                let gimbal_world = self.tree.world_transform(self.gimbal);
                let target = gimbal_world * Transform { position: self.config.default_offset, rotation: relative_rotation };
                self.tree.set_world_transform(self.camera, target);
                self.tree.set_world_transform(self.anchor, anchor_world);
            }
        }
        log::debug!("Snapped camera to anchor");
    }
}

#[cfg(test)]
mod tests
{
    use approx::assert_abs_diff_eq;
    use super::*;

    fn poses(rig: &CameraRig) -> [Transform; 3]
    {
        [rig.anchor(), rig.gimbal(), rig.camera()].map(|n| rig.world_transform(n))
    }

    #[test]
    fn spawn_topology()
    {
        let rig = CameraRig::default();
        let tree = rig.tree();
        assert_eq!(rig.mode(), CameraMode::Turntable);
        assert_eq!(tree.parent(rig.anchor()), tree.root());
        assert_eq!(tree.parent(rig.gimbal()), rig.anchor());
        assert_eq!(tree.parent(rig.camera()), rig.gimbal());
        assert_eq!(rig.world_transform(rig.camera()).position, Vec3::new(0.0, -10.0, 0.0));
        assert_abs_diff_eq!(rig.world_transform(rig.camera()).forward(), WORLD_FORWARD);
    }

    #[test]
    fn toggle_swaps_topology()
    {
        let mut rig = CameraRig::default();
        assert_eq!(rig.toggle_mode(), Ok(CameraMode::Freeflight));
        let root = rig.tree().root();
        assert_eq!(rig.tree().parent(rig.camera()), root);
        assert_eq!(rig.tree().parent(rig.anchor()), rig.camera());
        assert_eq!(rig.tree().parent(rig.gimbal()), rig.anchor());

        assert_eq!(rig.toggle_mode(), Ok(CameraMode::Turntable));
        assert_eq!(rig.tree().parent(rig.anchor()), root);
        assert_eq!(rig.tree().parent(rig.camera()), rig.gimbal());
    }

    #[test]
    fn toggle_keeps_world_poses()
    {
        let mut rig = CameraRig::default();
        rig.orbit(35.0, -20.0, 3.0);
        let before = poses(&rig);

        rig.toggle_mode().unwrap();
        for (now, was) in poses(&rig).iter().zip(before.iter())
        {
            assert_abs_diff_eq!(now, was);
        }

        rig.toggle_mode().unwrap();
        for (now, was) in poses(&rig).iter().zip(before.iter())
        {
            assert_abs_diff_eq!(now, was);
        }
    }

    #[test]
    fn failed_toggle_leaves_tree_untouched()
    {
        let mut rig = CameraRig::default();
        rig.toggle_mode().unwrap();
        let (anchor, gimbal, camera) = (rig.anchor(), rig.gimbal(), rig.camera());
        // hang the gimbal off the camera, so returning the camera to it would loop
        rig.tree_mut().attach_child(camera, gimbal).unwrap();
        let before = poses(&rig);

        assert_eq!(rig.toggle_mode(), Err(InvalidReparentError::ParentIsDescendant));
        assert_eq!(rig.mode(), CameraMode::Freeflight);
        assert_eq!(rig.tree().parent(anchor), camera);
        assert_eq!(rig.tree().parent(gimbal), camera);
        assert_eq!(rig.tree().parent(camera), rig.tree().root());
        for (now, was) in poses(&rig).iter().zip(before.iter())
        {
            assert_abs_diff_eq!(now, was);
        }
    }

    #[test]
    fn orbit_spins_and_tilts_gimbal()
    {
        let mut rig = CameraRig::default();
        rig.orbit(120.0, 45.0, 0.0);
        let hpr = rig.tree().node(rig.gimbal()).local_orientation();
        assert_abs_diff_eq!(hpr.heading, 120.0, epsilon = 1e-4);
        assert_abs_diff_eq!(hpr.pitch, -45.0, epsilon = 1e-4);
        assert_eq!(rig.tree().node(rig.camera()).local_position(), Vec3::new(0.0, -10.0, 0.0));

        // the camera keeps looking at the anchor from 10 units out
        let camera = rig.world_transform(rig.camera());
        assert_abs_diff_eq!(camera.position.length(), 10.0, epsilon = 1e-4);
        assert_abs_diff_eq!(camera.forward(), -camera.position.normalize(), epsilon = 1e-4);
    }

    #[test]
    fn orbit_clamps_pitch_and_zoom()
    {
        let mut rig = CameraRig::default();
        rig.orbit(0.0, 500.0, 0.0);
        assert_abs_diff_eq!(rig.tree().node(rig.gimbal()).local_orientation().pitch, -89.9, epsilon = 1e-4);
        rig.orbit(0.0, -1000.0, 0.0);
        assert_abs_diff_eq!(rig.tree().node(rig.gimbal()).local_orientation().pitch, 89.9, epsilon = 1e-4);

        rig.orbit(0.0, 0.0, 50.0);
        assert_eq!(rig.tree().node(rig.camera()).local_position().y, 0.1);
        rig.orbit(0.0, 0.0, -1000.0);
        assert_abs_diff_eq!(rig.tree().node(rig.camera()).local_position().y, -999.9, epsilon = 1e-3);
    }

    #[test]
    fn orbit_tolerates_odd_pitch_limits()
    {
        let mut negative = CameraRig::new(RigConfig { pitch_limit: -10.0, ..Default::default() });
        negative.orbit(0.0, 1.0, 0.0);
        assert_abs_diff_eq!(negative.tree().node(negative.gimbal()).local_orientation().pitch, -1.0, epsilon = 1e-4);
        negative.orbit(0.0, -50.0, 0.0);
        assert_abs_diff_eq!(negative.tree().node(negative.gimbal()).local_orientation().pitch, 10.0, epsilon = 1e-4);

        for pitch_limit in [f32::NAN, 400.0]
        {
            let mut rig = CameraRig::new(RigConfig { pitch_limit, ..Default::default() });
            rig.orbit(0.0, 500.0, 0.0);
            assert_abs_diff_eq!(rig.tree().node(rig.gimbal()).local_orientation().pitch, -90.0, epsilon = 1e-4);
        }
    }

    #[test]
    fn orbit_full_spins_camera()
    {
        let mut rig = CameraRig::default();
        rig.orbit_full(10.0, 200.0, 0.0, Hpr::new(5.0, 100.0, -3.0));
        assert_abs_diff_eq!(rig.tree().node(rig.gimbal()).local_orientation().pitch, -89.9, epsilon = 1e-4);
        let camera_hpr = rig.tree().node(rig.camera()).local_orientation();
        assert_abs_diff_eq!(Vec3::from(camera_hpr), Vec3::new(5.0, 100.0, -3.0), epsilon = 1e-4);
    }

    #[test]
    fn motion_ignored_in_wrong_mode()
    {
        let mut rig = CameraRig::default();
        rig.freeflight_move(Vec3::ONE, Hpr::new(10.0, 0.0, 0.0));
        assert_eq!(rig.tree().node(rig.camera()).local_position(), Vec3::new(0.0, -10.0, 0.0));

        rig.toggle_mode().unwrap();
        let before = poses(&rig);
        rig.orbit(30.0, 30.0, 1.0);
        rig.orbit_full(30.0, 30.0, 1.0, Hpr::new(1.0, 1.0, 1.0));
        assert_eq!(poses(&rig), before);
    }

    #[test]
    fn freeflight_move_is_additive_and_carries_anchor()
    {
        let mut rig = CameraRig::default();
        rig.toggle_mode().unwrap();
        let anchor_offset = rig.tree().relative_transform(rig.anchor(), rig.camera());

        rig.freeflight_move(Vec3::new(1.0, 2.0, 3.0), Hpr::new(15.0, -5.0, 0.0));
        assert_abs_diff_eq!(rig.tree().node(rig.camera()).local_position(), Vec3::new(1.0, -8.0, 3.0), epsilon = 1e-5);
        assert_abs_diff_eq!(Vec3::from(rig.tree().node(rig.camera()).local_orientation()), Vec3::new(15.0, -5.0, 0.0), epsilon = 1e-4);
        assert_abs_diff_eq!(rig.tree().relative_transform(rig.anchor(), rig.camera()), anchor_offset);
    }

    #[test]
    fn freeflight_move_follows_camera_facing()
    {
        let mut rig = CameraRig::default();
        rig.toggle_mode().unwrap();
        rig.freeflight_move(Vec3::ZERO, Hpr::new(90.0, 0.0, 0.0));
        let start = rig.world_transform(rig.camera());
        assert_abs_diff_eq!(start.forward(), Vec3::new(-1.0, 0.0, 0.0), epsilon = 1e-5);

        rig.freeflight_move(Vec3::new(0.0, 1.0, 0.0), Hpr::ZERO);
        assert_abs_diff_eq!(rig.world_transform(rig.camera()).position, start.position + start.forward(), epsilon = 1e-5);

        rig.freeflight_move(Vec3::new(2.0, 0.0, 0.5), Hpr::ZERO);
        let expected = start.position + start.forward() + start.right() * 2.0 + start.up() * 0.5;
        assert_abs_diff_eq!(rig.world_transform(rig.camera()).position, expected, epsilon = 1e-5);
    }

    #[test]
    fn look_at_anchor_faces_pivot()
    {
        let mut rig = CameraRig::default();
        rig.orbit_full(40.0, 10.0, 0.0, Hpr::new(25.0, -15.0, 8.0));
        let camera_position = rig.world_transform(rig.camera()).position;

        rig.look_at_anchor();
        let camera = rig.world_transform(rig.camera());
        assert_abs_diff_eq!(camera.position, camera_position, epsilon = 1e-4);
        assert_abs_diff_eq!(camera.forward(), (-camera_position).normalize(), epsilon = 1e-4);
        assert_abs_diff_eq!(camera.hpr().roll, 0.0, epsilon = 1e-3);
    }

    #[test]
    fn look_at_anchor_in_freeflight_keeps_anchor()
    {
        let mut rig = CameraRig::default();
        rig.toggle_mode().unwrap();
        rig.freeflight_move(Vec3::new(4.0, 0.0, 2.0), Hpr::new(30.0, 0.0, 0.0));
        let anchor = rig.world_transform(rig.anchor());

        rig.look_at_anchor();
        assert_abs_diff_eq!(rig.world_transform(rig.anchor()), anchor);
        let camera = rig.world_transform(rig.camera());
        assert_abs_diff_eq!(camera.forward(), (anchor.position - camera.position).normalize(), epsilon = 1e-4);
    }

    #[test]
    fn align_anchor_to_camera_reseeds_framing()
    {
        for toggle in [false, true]
        {
            let mut rig = CameraRig::default();
            rig.orbit_full(60.0, -30.0, -2.0, Hpr::new(10.0, 5.0, 0.0));
            if toggle { rig.toggle_mode().unwrap(); }
            let camera = rig.world_transform(rig.camera());
            let anchor_position = rig.world_transform(rig.anchor()).position;

            rig.align_anchor_to_camera();
            assert_abs_diff_eq!(rig.world_transform(rig.camera()), camera);
            assert_abs_diff_eq!(rig.world_transform(rig.anchor()).position, anchor_position, epsilon = 1e-4);
            assert_abs_diff_eq!(rig.world_transform(rig.anchor()).forward(), camera.forward(), epsilon = 1e-4);
            assert_eq!(rig.tree().node(rig.gimbal()).local_orientation(), Hpr::ZERO);
        }
    }

    #[test]
    fn snap_anchor_to_camera_lands_in_front()
    {
        for toggle in [false, true]
        {
            let mut rig = CameraRig::default();
            rig.orbit(75.0, 20.0, -5.0);
            if toggle { rig.toggle_mode().unwrap(); }
            let camera = rig.world_transform(rig.camera());

            rig.snap_anchor_to_camera();
            assert_abs_diff_eq!(rig.world_transform(rig.camera()), camera, epsilon = 1e-3);
            assert_abs_diff_eq!(rig.world_transform(rig.anchor()).position, camera.position + camera.forward() * 10.0, epsilon = 1e-3);
        }
    }

    #[test]
    fn snap_camera_to_anchor_turntable()
    {
        let mut rig = CameraRig::default();
        rig.orbit(75.0, 20.0, -5.0);
        rig.snap_camera_to_anchor();
        assert_eq!(rig.tree().node(rig.gimbal()).local_orientation(), Hpr::ZERO);
        assert_eq!(rig.tree().node(rig.camera()).local_position(), Vec3::new(0.0, -10.0, 0.0));
        assert_abs_diff_eq!(rig.camera_offset(), Vec3::new(0.0, -10.0, 0.0), epsilon = 1e-4);
    }

    #[test]
    fn snap_camera_to_anchor_freeflight()
    {
        let mut rig = CameraRig::default();
        rig.orbit(75.0, 20.0, -5.0);
        rig.toggle_mode().unwrap();
        rig.freeflight_move(Vec3::new(5.0, 5.0, 5.0), Hpr::new(20.0, 10.0, 0.0));
        let anchor = rig.world_transform(rig.anchor());

        rig.snap_camera_to_anchor();
        assert_eq!(rig.mode(), CameraMode::Freeflight);
        assert_abs_diff_eq!(rig.world_transform(rig.anchor()), anchor, epsilon = 1e-3);
        assert_eq!(rig.tree().node(rig.gimbal()).local_orientation(), Hpr::ZERO);
        assert_abs_diff_eq!(rig.camera_offset(), Vec3::new(0.0, -10.0, 0.0), epsilon = 1e-3);

        rig.toggle_mode().unwrap();
        assert_abs_diff_eq!(rig.tree().node(rig.camera()).local_position(), Vec3::new(0.0, -10.0, 0.0), epsilon = 1e-3);
        assert_abs_diff_eq!(Vec3::from(rig.tree().node(rig.gimbal()).local_orientation()), Vec3::ZERO, epsilon = 1e-3);
    }
}
