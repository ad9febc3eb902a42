mod button;
mod context;

pub use button::*;
pub use context::*;
