mod script;

use std::path::PathBuf;
use clap::Parser;
use math_pscope::Transform;
use nab_pscope::app::{self, AppRun, ExitReason, FatalError, FatalErrorCode};
use nab_pscope::{FrameNumber, TomlRead, TomlWrite};
use world_pscope::{CameraRig, InvalidReparentError, ModeController, ViewerConfig};
use crate::script::InputScript;

#[derive(Debug, Parser)]
struct CliArgs
{
    // TOML with controller speeds and rig tuning; defaults if omitted
    #[arg(long)]
    config: Option<PathBuf>,

    // TOML input script to replay
    #[arg(long)]
    script: Option<PathBuf>,

    // seconds per frame for script frames without their own dt
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    // print the effective config and exit
    #[arg(long, default_value_t = false)]
    dump_config: bool,

    #[cfg(debug_assertions)]
    #[arg(long, default_value_t = false)]
    keep_alive_on_panic: bool,
}

#[derive(Debug)]
struct RigFault(InvalidReparentError);
impl FatalErrorCode for RigFault
{
    fn error_code(&self) -> u16
    {
        match self.0
        {
            InvalidReparentError::ParentIsSelf => 1,
            InvalidReparentError::ParentIsDescendant => 2,
        }
    }
}

fn describe(name: &str, transform: Transform) -> String
{
    let hpr = transform.hpr();
    format!("{name} pos={:.3} hpr=({:.2}, {:.2}, {:.2})", transform.position, hpr.heading, hpr.pitch, hpr.roll)
}

fn log_poses(frame: FrameNumber, controller: &ModeController)
{
    let rig = controller.rig();
    log::info!("[{frame}] {:?}: {} | {} | camera offset={:.3}",
        rig.mode(),
        describe("camera", rig.world_transform(rig.camera())),
        describe("anchor", rig.world_transform(rig.anchor())),
        rig.camera_offset());
}

fn main() -> ExitReason
{
    let app_run = AppRun::<CliArgs>::startup("Pandascope", env!("CARGO_PKG_VERSION"));
    {
        #[cfg(debug_assertions)]
        let keep_alive = app_run.args.keep_alive_on_panic;
        #[cfg(not(debug_assertions))]
        let keep_alive = false;

        app::set_panic_hook(keep_alive);
    }

    let config = match &app_run.args.config
    {
        Some(path) => match ViewerConfig::load_file(path)
        {
            Ok(config) => config,
            Err(err) =>
            {
                log::error!("Failed to load config {path:?}: {err}");
                app_run.set_exit_reason(ExitReason::BadInput);
                return app_run.get_exit_reason();
            }
        },
        None => ViewerConfig::default(),
    };
    log::debug!("Config: {config:?}");
    if let Err(err) = config.rig.validate()
    {
        log::error!("Invalid rig config: {err}");
        app_run.set_exit_reason(ExitReason::BadInput);
        return app_run.get_exit_reason();
    }

    if app_run.args.dump_config
    {
        if let Err(err) = config.save(true, &mut std::io::stdout())
        {
            log::error!("Failed to write config: {err}");
            app_run.set_exit_reason(ExitReason::BadInput);
        }
        return app_run.get_exit_reason();
    }

    let script = match &app_run.args.script
    {
        Some(path) => match InputScript::load_file(path)
        {
            Ok(script) => script,
            Err(err) =>
            {
                log::error!("Failed to load input script {path:?}: {err}");
                app_run.set_exit_reason(ExitReason::BadInput);
                return app_run.get_exit_reason();
            }
        },
        None =>
        {
            log::warn!("No input script given, showing the spawn pose only");
            InputScript::default()
        }
    };

    let mut controller = ModeController::new(CameraRig::new(config.rig), config.controller);
    let mut frame_number = FrameNumber::default();
    log_poses(frame_number, &controller);

    for (dt, input) in script.timed_frames(app_run.args.dt)
    {
        frame_number.increment();
        let completion = match controller.update(dt, input)
        {
            Ok(completion) => completion,
            Err(err) => app::fatal_error(FatalError::Rig, RigFault(err)),
        };
        log_poses(frame_number, &controller);

        if completion.is_completed()
        {
            log::info!("Quit requested on frame {frame_number}");
            break;
        }
    }

    app_run.get_exit_reason()
}
