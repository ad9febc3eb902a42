mod angles;
pub use angles::*;

mod hpr;
pub use hpr::*;

mod transform;
pub use transform::*;
