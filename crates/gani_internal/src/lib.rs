//! This module is separated into its own crate so the `gani` crates can be consumed through a single facade, and should not be used directly.

/// `use gani_rs::prelude::*;` to import commonly used items.
pub mod prelude;

// Re-export the member crates for convenience
pub use gani_types;
pub use gani_vfs;

// Re-export commonly used types at crate root
pub use gani_types::{GaniError, SliceError, gani::Animation};
pub use gani_vfs::{EditorConfig, GameFolder, VfsError};
