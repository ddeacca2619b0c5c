//! This crate provides the core data types for the `gani-rs` animation editor engine.
//!
//! # Modules
//!
//! - **gani**: The animation document (frames, sprites, effects, flags) and its text format
//! - **atlas**: Atlas name resolution, sprite boundary detection and the sprite transform pipeline
//! - **geometry**: Points and rectangles shared by the other modules
//!
//! # Examples
//!
//! Using the prelude (recommended):
//!
//! ```no_run
//! use gani_types::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut ani = Animation::open("walk.gani")?;
//! ani.add_sprite(Sprite::new(40, "SPRITES", Rect::new(0, 0, 24, 24)))?;
//! ani.place_sprite(0, Direction::Down, Placement::new(40, 8, 16))?;
//! ani.save("walk.gani")?;
//! # Ok(())
//! # }
//! ```
//!
//! Or use explicit paths:
//!
//! ```
//! use gani_types::atlas::{SliceConfig, detect_bounds};
//! use image::RgbaImage;
//!
//! let atlas = RgbaImage::new(4, 4);
//! assert_eq!(detect_bounds(&atlas, 1, 1, SliceConfig::default()).unwrap(), None);
//! ```

pub mod atlas;
pub mod error;
pub mod gani;
pub mod geometry;

/// `use gani_types::prelude::*;` to import commonly used items.
pub mod prelude;

pub use error::{GaniError, SliceError};
