//! Prelude module for `gani_internal`.
//!
//! This module provides a convenient way to import commonly used types and traits.
//!
//! # Examples
//!
//! ```rust
//! use gani_internal::prelude::*;
//!
//! // Now you can use all common types directly
//! let mut ani = Animation::new();
//! ani.add_sprite(Sprite::new(1, "SPRITES", Rect::new(0, 0, 8, 8))).unwrap();
//! ani.place_sprite(0, Direction::Up, Placement::new(1, 4, 4)).unwrap();
//!
//! // Host-side lookup
//! let config = EditorConfig::default();
//! assert!(config.recursive);
//! ```

// Re-export everything from gani_types::prelude
#[doc(inline)]
pub use gani_types::prelude::*;

// Host-side resolver and configuration
#[doc(inline)]
pub use gani_vfs::{EditorConfig, GameFolder, VfsError};

// Re-export the entire gani_types module for advanced usage
#[doc(inline)]
pub use gani_types;
