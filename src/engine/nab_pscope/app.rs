use std::fmt::Debug;
use std::io::Read;
use std::panic::PanicHookInfo;
use std::process::ExitCode;
use std::sync::atomic::{AtomicI32, Ordering};

fn join_display<I>(separator: &str, iter: I) -> String
where I: Iterator,
      I::Item: std::fmt::Display
{
    let mut out = String::new();
    let mut first = true;
    for i in iter
    {
        match first
        {
            true => { first = false; }
            false => { out.push_str(separator); }
        };
        out.push_str(i.to_string().as_str());
    }
    out
}

pub trait CliArgs: clap::Parser + Debug { }
impl<T: clap::Parser + Debug> CliArgs for T { }

fn crate_name<T>() -> &'static str
{
    let name = std::any::type_name::<T>();
    match name.find("::")
    {
        Some(end) => &name[0..end],
        None => name,
    }
}

// every crate in the workspace, so their logs pass the app-level filter
const WORKSPACE_CRATES: [&str; 6] =
[
    "containers_pscope",
    "input_pscope",
    "math_pscope",
    "nab_pscope",
    "viewer_pscope",
    "world_pscope",
];

#[derive(Debug)]
pub struct AppRun<TCliArgs: CliArgs>
{
    pub app_name: &'static str,
    pub version_str: &'static str,

    pub start_time: chrono::DateTime<chrono::Local>,
    pub args: TCliArgs,
    pub pid: u32,
    pub is_elevated: bool,

    exit_reason: AtomicI32,
}
impl<TCliArgs: CliArgs> AppRun<TCliArgs>
{
    pub fn startup(app_name: &'static str, app_version: &'static str) -> Self
    {
        #[cfg(debug_assertions)]
        let default_log_levels = (log::LevelFilter::Warn, log::LevelFilter::Debug);
        #[cfg(not(debug_assertions))]
        let default_log_levels = (log::LevelFilter::Warn, log::LevelFilter::Info);
        let app_crate = crate_name::<TCliArgs>();

        let mut builder = colog::basic_builder();
        builder
            .filter_level(default_log_levels.0)
            .filter_module(app_crate, default_log_levels.1);
        for module in WORKSPACE_CRATES
        {
            builder.filter_module(module, default_log_levels.1);
        }
        builder.parse_default_env().init();

        let app_run = Self
        {
            app_name,
            version_str: app_version,
            start_time: chrono::Local::now(),
            args: TCliArgs::parse(),
            pid: std::process::id(),
            is_elevated: is_root::is_root(),
            exit_reason: AtomicI32::new(ExitReason::NormalExit as i32),
        };

        log::info!(target: app_crate,
            "=== Starting {} v{} [{}] (PID {}){} at {} ===",
            app_run.app_name,
            app_run.version_str,
            join_display(" ", std::env::args()),
            app_run.pid,
            if app_run.is_elevated { " elevated" } else { "" },
            app_run.start_time);

        app_run
    }

    pub fn set_exit_reason(&self, exit_reason: ExitReason)
    {
        self.exit_reason.store(exit_reason as i32, Ordering::SeqCst);
    }
    pub fn get_exit_reason(&self) -> ExitReason
    {
        ExitReason::from_i32(self.exit_reason.load(Ordering::SeqCst))
    }
}
impl<TCliArgs: CliArgs> Drop for AppRun<TCliArgs>
{
    fn drop(&mut self)
    {
        log::info!(target: "app",
            "Exiting {} (PID {}) at {} with reason {:?}",
            self.app_name,
            self.pid,
            chrono::Local::now(),
            self.get_exit_reason());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitReason
{
    Unset = !1, // this should never be set
    NormalExit = 0,
    BadInput = 2, // config or script could not be loaded
    RigFault = 3, // the camera rig was wired into a cycle
    Panic = -99,
}
impl ExitReason
{
    fn from_i32(value: i32) -> Self
    {
        [Self::NormalExit, Self::BadInput, Self::RigFault, Self::Panic]
            .into_iter()
            .find(|r| *r as i32 == value)
            .unwrap_or(Self::Unset)
    }
}
impl std::process::Termination for ExitReason
{
    fn report(self) -> ExitCode
    {
        (self as u8).into()
    }
}

// Anything that can end the app through `fatal_error`
pub trait FatalErrorCode: Debug
{
    fn error_code(&self) -> u16;
}

fn panic_message(panic: &PanicHookInfo) -> String
{
    let payload = panic.payload();
    let text = payload.downcast_ref::<&str>().copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("<non-string panic payload>");
    match panic.location()
    {
        Some(location) => format!("{text}\n  at {location}"),
        None => text.to_string(),
    }
}

struct PanicReport(String);
impl FatalErrorCode for PanicReport { fn error_code(&self) -> u16 { 1 } }
impl Debug for PanicReport
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result { f.write_str(&self.0) }
}

pub fn set_panic_hook(wait_for_exit: bool)
{
    let default_panic_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic|
    {
        default_panic_hook(panic);

        if wait_for_exit
        {
            print!("Press enter to exit... ");
            let mut input = [0u8];
            let _ = std::io::stdin().read(&mut input);
        }

        fatal_error(FatalError::Panic, PanicReport(panic_message(panic)))
    }));
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FatalError
{
    Panic,
    Rig,
}
impl FatalError
{
    pub fn short_name(self) -> &'static str
    {
        match self
        {
            Self::Panic => "PNC",
            Self::Rig => "RIG",
        }
    }

    pub fn exit_reason(self) -> ExitReason
    {
        match self
        {
            Self::Panic => ExitReason::Panic,
            Self::Rig => ExitReason::RigFault,
        }
    }
}

// Log and exit immediately, skipping destructors
pub fn fatal_error(fatal_error: FatalError, code: impl FatalErrorCode) -> !
{
    let exit_reason = fatal_error.exit_reason();
    log::error!("!!! FATAL {}-{:04X}: {:?}", fatal_error.short_name(), code.error_code(), code);
    log::info!(target: "app",
        "Exiting (PID {}) at {} with reason {:?}",
        std::process::id(),
        chrono::Local::now(),
        exit_reason);

    std::process::exit(exit_reason as i32)
}
