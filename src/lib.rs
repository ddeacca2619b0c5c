#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! `gani-rs` is the engine behind a sprite animation editor: the `.gani`
//! document model and text format, sprite boundary detection on atlas images,
//! and the sprite transform pipeline.
//!
//! ```
//! use gani_rs::prelude::*;
//!
//! let text = "SPRITE 0 SPRITES 0 0 16 16\nANI\n0 0 0\n0 0 0\n0 0 0\n0 0 0\nANIEND\n";
//! let ani = Animation::from_text(text);
//! assert_eq!(ani.frame_count(), 1);
//! assert_eq!(ani.sprite(0).unwrap().width(), 16);
//! ```
//!
pub use gani_internal::*;
