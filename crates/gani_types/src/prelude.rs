//! Prelude module for `gani_types`.
//!
//! This module provides a convenient way to import commonly used types, traits, and functions.
//!
//! # Examples
//!
//! ```
//! use gani_types::prelude::*;
//!
//! let mut ani = Animation::new();
//! ani.add_sprite(Sprite::new(0, "SPRITES", Rect::new(0, 0, 16, 16))).unwrap();
//! assert_eq!(ani.sprites().len(), 1);
//! ```

// Document types
#[doc(inline)]
pub use crate::gani::{
	Animation, Axis, ColorEffect, ColorMode, DefaultAttributes, Direction, EffectSet, Flag, Frame,
	FramePart, FrameSide, LayerMove, Placement, PlaybackFlags, SoundCue, Sprite, SpriteRegistry,
};

// Atlas types
#[doc(inline)]
pub use crate::atlas::{
	AlphaSource, AnchorOffset, AtlasResolver, RawBitmap, RenderedSprite, SliceConfig, detect_bounds,
	load_sprite_images, render_sprite,
};

// Errors and geometry
#[doc(inline)]
pub use crate::{
	error::{GaniError, SliceError},
	geometry::{Point, Rect},
};

// Re-export the modules for advanced usage
#[doc(inline)]
pub use crate::{atlas, gani};
