mod node_index;
pub use node_index::*;

mod hierarchy;
pub use hierarchy::*;
