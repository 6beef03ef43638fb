//! File system helpers shared by the generator and the CLI.
//!
//! - [`fs`] - Template reading and atomic manifest writes

pub mod fs;

pub use fs::{atomic_write, ensure_parent_dir, read_text_lossy, safe_write};
