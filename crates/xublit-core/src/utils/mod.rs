//! Small helpers shared across the core.
pub mod path;

pub use path::{join, join_all};
