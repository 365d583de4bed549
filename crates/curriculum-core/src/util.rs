//! Common utility functions.

pub mod data;
pub mod fs;

// Re-export commonly used items
pub use data::{deep_merge, get_path, set_path};
pub use fs::{absolutize, expand_path};
