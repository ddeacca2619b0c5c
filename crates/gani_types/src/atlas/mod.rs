//! Atlas images: name resolution, sprite boundary detection and rendering.
//!
//! # Examples
//!
//! Rendering a rotated sprite from an in-memory atlas:
//!
//! ```
//! use gani_types::atlas::render_sprite;
//! use gani_types::gani::{EffectSet, Sprite};
//! use gani_types::geometry::Rect;
//! use image::{Rgba, RgbaImage};
//!
//! let atlas = RgbaImage::from_pixel(32, 32, Rgba([255, 255, 255, 255]));
//! let sprite = Sprite::new(0, "SPRITES", Rect::new(0, 0, 16, 8)).with_effects(EffectSet {
//!     rotation: 45.0,
//!     ..EffectSet::IDENTITY
//! });
//!
//! let rendered = render_sprite(&sprite, Some(&atlas));
//! assert_eq!(rendered.image.dimensions(), (32, 32));
//! assert_eq!((rendered.offset.x, rendered.offset.y), (8.0, 12.0));
//! ```

pub mod color;
mod loader;
mod resolve;
mod slice;
mod transform;

pub use loader::load_sprite_images;
pub use resolve::{AtlasResolver, resolve_atlas_name, resolve_atlas_path};
pub use slice::{AlphaSource, RawBitmap, SliceConfig, detect_bounds};
pub use transform::{AnchorOffset, MAX_CANVAS_SIDE, RenderedSprite, render_sprite};
