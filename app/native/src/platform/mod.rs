//! macOS platform helpers for Snapclip.
//!
//! - [`dirs`] - Cache and application-support directories
//! - [`objc`] - `NSString` creation
//! - [`path`] - Tilde expansion and relative path resolution
//! - [`thread`] - Named worker threads

pub mod dirs;
pub mod objc;
pub mod path;
pub mod thread;

pub use dirs::{get_cache_subdir, get_support_dir};
pub use objc::nsstring;
pub use path::{expand, expand_and_resolve};
pub use thread::spawn_named_thread;
