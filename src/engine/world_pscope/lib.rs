mod scene_tree;
pub use scene_tree::*;

mod camera_rig;
pub use camera_rig::*;

mod mode_controller;
pub use mode_controller::*;

mod config;
pub use config::*;

pub use containers_pscope::{InvalidReparentError, NodeIndex};
