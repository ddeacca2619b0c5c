//! Animation script (`.gani`) support.
//!
//! An animation is a line-oriented text document describing a sequence of
//! frames. Each frame places sprites, cut from named atlas images, in four
//! directional parts (up, left, down, right).
//!
//! # Text Format Overview
//!
//! Lines are whitespace separated and keywords are matched case-insensitively
//! on the first token. Unknown keywords are ignored.
//!
//! ```text
//! SPRITE  index atlas x y width height [description]   sprite definition
//! SETBACKTO name                                       follow-up animation
//! DEFAULTHEAD value    (BODY, SHIELD, ATTR1..3,        default attributes
//!                       ATTR12, PARAM1..3)
//! LOOP | CONTINUOUS | SINGLEDIRECTION                  playback flags
//! ROTATEEFFECT   index radians                         effects, may appear
//! STRETCHXEFFECT index factor                          before the sprite
//! STRETCHYEFFECT index factor                          they refer to
//! ZOOMEFFECT     index factor
//! COLOREFFECT    index r g b a [mode]
//! SCRIPT ... SCRIPTEND                                 verbatim script text
//! ANI ... ANIEND                                       frame block
//! ```
//!
//! ## Frame Block
//!
//! Inside `ANI`, every non-keyword line is one frame part: a list of
//! `sprite x y` triples separated by commas and/or whitespace. Parts are
//! assigned to directions in the cycle up, left, down, right; a new frame
//! starts at every up part. With `SINGLEDIRECTION` each line is a whole frame.
//!
//! ```text
//! ANI
//! 0 0 0, 1 10 -4     up      (frame 0)
//! 0 0 0              left
//! ,                  down    (empty part)
//! 0 0 0              right
//! PLAYSOUND hit.wav 1 2      sound at tile (1, 2) = pixel (16, 32)
//! WAIT 2                     frame length (2 + 1) * 0.05 = 0.15s
//! ANIEND
//! ```
//!
//! `WAIT` and `PLAYSOUND` apply to the most recently started frame.
//!
//! # Usage Examples
//!
//! ## Parsing and editing
//!
//! ```
//! use gani_types::gani::{Animation, Direction};
//!
//! let text = "SPRITE 0 SPRITES 0 0 32 32 body\n\nANI\n0 0 0\n0 0 0\n0 0 0\n0 0 0\nWAIT 3\nANIEND\n";
//! let mut ani = Animation::from_text(text);
//! assert_eq!(ani.frame_count(), 1);
//! assert_eq!(ani.frame(0).unwrap().length(), 0.2);
//!
//! ani.frame_mut(0).unwrap().part_mut(Direction::Left).shift(0, gani_types::gani::Axis::Horizontal, 4).unwrap();
//! assert!(ani.to_text().contains("0\t4\t0"));
//! ```
//!
//! ## Loading from disk
//!
//! ```no_run
//! use gani_types::gani::Animation;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let ani = Animation::open("idle.gani")?;
//! println!("{} frames, {} sprites", ani.frame_count(), ani.sprites().len());
//! ani.save("idle_copy.gani")?;
//! # Ok(())
//! # }
//! ```

mod animation;
pub mod constants;
pub mod frame;
pub mod parser;
mod registry;
mod sprite;
mod writer;

#[cfg(test)]
mod tests;

pub use animation::{Animation, DefaultAttributes, Flag, FrameSide, PlaybackFlags};
pub use frame::{Axis, Direction, Frame, FramePart, LayerMove, Placement, SoundCue};
pub use registry::SpriteRegistry;
pub use sprite::{ColorEffect, ColorMode, EffectSet, Sprite};
