//! Shared infrastructure utilities for Six Cities.
//!
//! - **`atomic_write`**: Crash-safe file persistence (temp + rename), used for the session token
//! - **`sanitize`**: Strips terminal control sequences from server-provided text

pub mod atomic_write;
pub mod sanitize;

pub use atomic_write::{FileMode, atomic_write, remove_if_exists};
pub use sanitize::sanitize_display_text;
