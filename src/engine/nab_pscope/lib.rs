pub mod app;
mod core_types;
pub use core_types::*;

mod toml_io;
pub use toml_io::*;
