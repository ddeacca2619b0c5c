//! The animation document and its editing operations.
//!
//! Cursor state ("current frame", "current layer", "current direction") is
//! never stored here. Operations take positions as arguments and return what a
//! caller needs to re-sync its own cursors.

use std::{io::Read, path::Path};

use serde::Serialize;

use crate::error::GaniError;

use super::{
	constants,
	frame::{Direction, Frame, Placement},
	parser,
	registry::SpriteRegistry,
	sprite::{EffectSet, Sprite},
	writer,
};

/// Which side of a frame a new frame is inserted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameSide {
	/// Immediately before the reference frame
	Left,
	/// Immediately after the reference frame
	Right,
}

/// A mutually exclusive playback flag settable through [`Animation::set_flag`].
///
/// Single-direction mode is not listed: it changes the frame structure and is
/// switched with [`Animation::toggle_single_direction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
	/// Restart from the first frame after the last one
	Loop,
	/// Keep the last frame's state when the animation is replaced
	Continuous,
}

impl Flag {
	fn name(self) -> &'static str {
		match self {
			Self::Loop => "LOOP",
			Self::Continuous => "CONTINUOUS",
		}
	}
}

/// Playback flags of an animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PlaybackFlags {
	/// Restart after the last frame
	pub looped: bool,
	/// Continue from the previous animation's state
	pub continuous: bool,
	/// One frame part serves all four directions
	pub single_direction: bool,
}

impl PlaybackFlags {
	/// Checks the exclusivity rules between flags.
	///
	/// # Errors
	///
	/// Returns [`GaniError::ConflictingFlags`] if both `looped` and
	/// `continuous` are set.
	pub fn validate(&self) -> Result<(), GaniError> {
		if self.looped && self.continuous {
			return Err(GaniError::ConflictingFlags {
				first: Flag::Loop.name(),
				second: Flag::Continuous.name(),
			});
		}
		Ok(())
	}

	/// Returns a copy with `flag` set to `value`, validated.
	///
	/// # Errors
	///
	/// Returns [`GaniError::ConflictingFlags`] if the result would be invalid.
	pub fn with(self, flag: Flag, value: bool) -> Result<Self, GaniError> {
		let mut next = self;
		match flag {
			Flag::Loop => next.looped = value,
			Flag::Continuous => next.continuous = value,
		}
		next.validate().map_err(|_| GaniError::ConflictingFlags {
			first: match flag {
				Flag::Loop => Flag::Continuous.name(),
				Flag::Continuous => Flag::Loop.name(),
			},
			second: flag.name(),
		})?;
		Ok(next)
	}
}

/// The ten default attributes used for atlas indirection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DefaultAttributes {
	values: [String; 10],
}

impl DefaultAttributes {
	/// Position of a key in [`constants::ATTRIBUTE_KEYS`], case-insensitive.
	pub fn key_index(key: &str) -> Option<usize> {
		constants::ATTRIBUTE_KEYS.iter().position(|k| k.eq_ignore_ascii_case(key.trim()))
	}

	/// Returns the value for a key, or `None` for an unknown key.
	pub fn get(&self, key: &str) -> Option<&str> {
		Self::key_index(key).map(|i| self.values[i].as_str())
	}

	/// Sets a value. Unknown keys are ignored and `false` is returned.
	///
	/// Runs of whitespace in the value are stored as a single space.
	pub fn set(&mut self, key: &str, value: impl Into<String>) -> bool {
		match Self::key_index(key) {
			Some(i) => {
				self.values[i] = single_line(value.into());
				true
			}
			None => false,
		}
	}

	/// Iterates over `(key, value)` in serialisation order.
	pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
		constants::ATTRIBUTE_KEYS.into_iter().zip(self.values.iter().map(String::as_str))
	}
}

/// A complete animation document.
///
/// Frames are in playback order and an animation always holds at least one
/// frame. Sprites live in a registry keyed by index; placements refer to them
/// by index only.
///
/// # Examples
///
/// ```
/// use gani_types::gani::{Animation, Direction, Placement, Sprite};
/// use gani_types::geometry::Rect;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut ani = Animation::new();
/// ani.add_sprite(Sprite::new(5, "SPRITES", Rect::new(0, 0, 16, 16)))?;
/// ani.place_sprite(0, Direction::Down, Placement::new(5, 10, 20))?;
/// ani.frame_mut(0)?.set_length(0.1);
///
/// let text = ani.to_text();
/// assert!(text.contains("5\t10\t20"));
/// assert!(text.contains("WAIT\t1"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Animation {
	pub(crate) frames: Vec<Frame>,
	pub(crate) sprites: SpriteRegistry,
	pub(crate) setbackto: String,
	pub(crate) flags: PlaybackFlags,
	pub(crate) attributes: DefaultAttributes,
	pub(crate) script: String,
}

impl Animation {
	/// Creates an empty animation with a single empty frame.
	pub fn new() -> Self {
		Self {
			frames: vec![Frame::new()],
			sprites: SpriteRegistry::new(),
			setbackto: String::new(),
			flags: PlaybackFlags::default(),
			attributes: DefaultAttributes::default(),
			script: String::new(),
		}
	}

	/// Parses an animation script. Never fails; malformed lines are skipped.
	pub fn from_text(text: &str) -> Self {
		parser::parse(text)
	}

	/// Serialises the animation to script text.
	pub fn to_text(&self) -> String {
		writer::write(self)
	}

	/// Reads and parses a script from a reader.
	///
	/// # Errors
	///
	/// Returns an error if reading fails or the text is not UTF-8.
	pub fn from_reader<R: Read>(reader: &mut R) -> Result<Self, GaniError> {
		let mut text = String::new();
		reader.read_to_string(&mut text)?;
		Ok(Self::from_text(&text))
	}

	/// Opens a script file.
	///
	/// # Errors
	///
	/// Returns an error if the file cannot be read.
	pub fn open(path: impl AsRef<Path>) -> Result<Self, GaniError> {
		let text = std::fs::read_to_string(path)?;
		Ok(Self::from_text(&text))
	}

	/// Writes the script to a file.
	///
	/// # Errors
	///
	/// Returns an error if the file cannot be written.
	pub fn save(&self, path: impl AsRef<Path>) -> Result<(), GaniError> {
		std::fs::write(path, self.to_text())?;
		Ok(())
	}

	// ----- frames -------------------------------------------------------

	/// Frames in playback order.
	pub fn frames(&self) -> &[Frame] {
		&self.frames
	}

	/// Number of frames (always at least one).
	pub fn frame_count(&self) -> usize {
		self.frames.len()
	}

	/// Gets a frame.
	///
	/// # Errors
	///
	/// Returns [`GaniError::FrameOutOfRange`] for an invalid index.
	pub fn frame(&self, index: usize) -> Result<&Frame, GaniError> {
		self.frames.get(index).ok_or(GaniError::FrameOutOfRange {
			index,
			len: self.frames.len(),
		})
	}

	/// Gets a mutable frame.
	///
	/// # Errors
	///
	/// Returns [`GaniError::FrameOutOfRange`] for an invalid index.
	pub fn frame_mut(&mut self, index: usize) -> Result<&mut Frame, GaniError> {
		let len = self.frames.len();
		self.frames.get_mut(index).ok_or(GaniError::FrameOutOfRange {
			index,
			len,
		})
	}

	/// Inserts a frame next to `at_index`.
	///
	/// The new frame is a copy of `clipboard` when given, otherwise empty.
	/// Returns the index of the inserted frame.
	///
	/// # Errors
	///
	/// Returns [`GaniError::FrameOutOfRange`] for an invalid reference index.
	pub fn add_frame(
		&mut self,
		at_index: usize,
		side: FrameSide,
		clipboard: Option<&Frame>,
	) -> Result<usize, GaniError> {
		self.frame(at_index)?;
		let frame = clipboard.cloned().unwrap_or_default();
		let position = match side {
			FrameSide::Left => at_index,
			FrameSide::Right => at_index + 1,
		};
		self.frames.insert(position, frame);
		Ok(position)
	}

	/// Removes a frame and returns it.
	///
	/// Any cursor the caller holds must be re-clamped afterwards, see
	/// [`clamp_frame_cursor`](Self::clamp_frame_cursor).
	///
	/// # Errors
	///
	/// Returns [`GaniError::LastFrame`] if this is the only frame, or
	/// [`GaniError::FrameOutOfRange`] for an invalid index.
	pub fn remove_frame(&mut self, at_index: usize) -> Result<Frame, GaniError> {
		self.frame(at_index)?;
		if self.frames.len() == 1 {
			return Err(GaniError::LastFrame);
		}
		Ok(self.frames.remove(at_index))
	}

	/// Clamps a frame cursor to the current frame range.
	pub fn clamp_frame_cursor(&self, cursor: usize) -> usize {
		cursor.min(self.frames.len().saturating_sub(1))
	}

	/// Reverses playback order. Layer order inside parts is not touched.
	pub fn reverse_frames(&mut self) {
		self.frames.reverse();
	}

	/// Switches between multi-direction and single-direction layouts.
	///
	/// This is a lossy structural transform:
	///
	/// - **multi → single**: every run of four frames collapses into one frame
	///   made of the up part of the first, the left part of the second, the down
	///   part of the third and the right part of the fourth. A short final run
	///   reuses its last frame for the missing slots. Length and sound cues come
	///   from the first frame of the run.
	/// - **single → multi**: each frame expands into four frames whose four
	///   slots all hold a copy of the frame's up part. Every copy keeps the
	///   length; sound cues stay on the first copy only.
	///
	/// Toggling twice only restores the frame *count*, and only when the
	/// original count was a multiple of four. Placements are not restored.
	///
	/// A single-direction document is saved with its up parts only. The left,
	/// down and right parts kept in memory after a collapse are there for a
	/// later toggle back and are dropped by [`to_text`](Self::to_text).
	///
	/// Returns the new value of the single-direction flag.
	pub fn toggle_single_direction(&mut self) -> bool {
		let frames = std::mem::take(&mut self.frames);
		self.frames = if self.flags.single_direction {
			expand_single_direction(frames)
		} else {
			collapse_to_single_direction(frames)
		};
		self.flags.single_direction = !self.flags.single_direction;
		self.flags.single_direction
	}

	// ----- sprites ------------------------------------------------------

	/// The sprite registry.
	pub fn sprites(&self) -> &SpriteRegistry {
		&self.sprites
	}

	/// Gets a sprite by index.
	pub fn sprite(&self, index: i32) -> Option<&Sprite> {
		self.sprites.get(index)
	}

	/// Replaces the effects of a registered sprite.
	///
	/// # Errors
	///
	/// Returns [`GaniError::UnknownSprite`] if no sprite has this index, or
	/// [`GaniError::InvalidSprite`] if a parameter is not finite; the sprite
	/// is left unchanged.
	pub fn set_sprite_effects(&mut self, index: i32, effects: EffectSet) -> Result<(), GaniError> {
		let sprite = self.sprites.get_mut(index).ok_or(GaniError::UnknownSprite(index))?;
		sprite.clone().with_effects(effects).validate()?;
		sprite.effects = effects;
		Ok(())
	}

	/// Adds a sprite or replaces the one with the same index.
	///
	/// # Errors
	///
	/// Returns [`GaniError::InvalidSprite`] if the sprite is invalid.
	pub fn add_sprite(&mut self, sprite: Sprite) -> Result<Option<Sprite>, GaniError> {
		self.sprites.add_or_replace(sprite)
	}

	/// Removes a sprite and every placement of it in every frame.
	///
	/// Returns the removed definition and the number of placements deleted.
	pub fn remove_sprite(&mut self, index: i32) -> Option<(Sprite, usize)> {
		let sprite = self.sprites.remove(index)?;
		let removed = self.frames.iter_mut().map(|frame| frame.remove_sprite(index)).sum();
		Some((sprite, removed))
	}

	/// Places a registered sprite on top of a frame part.
	///
	/// Returns the layer index of the new placement.
	///
	/// # Errors
	///
	/// Returns [`GaniError::UnknownSprite`] if the sprite is not registered or
	/// [`GaniError::FrameOutOfRange`] for an invalid frame.
	pub fn place_sprite(
		&mut self,
		frame: usize,
		direction: Direction,
		placement: Placement,
	) -> Result<usize, GaniError> {
		if !self.sprites.contains(placement.sprite) {
			return Err(GaniError::UnknownSprite(placement.sprite));
		}
		let part = self.frame_mut(frame)?.part_mut(direction);
		part.add_placement(placement);
		Ok(part.len() - 1)
	}

	// ----- attributes & flags --------------------------------------------

	/// Name of the animation to switch to after this one.
	pub fn setbackto(&self) -> &str {
		&self.setbackto
	}

	/// Sets the follow-up animation name.
	///
	/// Runs of whitespace are stored as a single space.
	pub fn set_setbackto(&mut self, name: impl Into<String>) {
		self.setbackto = single_line(name.into());
	}

	/// Playback flags.
	pub fn flags(&self) -> PlaybackFlags {
		self.flags
	}

	/// Sets a playback flag after validating it against the others.
	///
	/// # Errors
	///
	/// Returns [`GaniError::ConflictingFlags`] if the change would set both
	/// `LOOP` and `CONTINUOUS`; the flags are left unchanged.
	pub fn set_flag(&mut self, flag: Flag, value: bool) -> Result<(), GaniError> {
		self.flags = self.flags.with(flag, value)?;
		Ok(())
	}

	/// Default attributes.
	pub fn attributes(&self) -> &DefaultAttributes {
		&self.attributes
	}

	/// Gets a default attribute, `None` for unknown keys.
	pub fn attr(&self, key: &str) -> Option<&str> {
		self.attributes.get(key)
	}

	/// Sets a default attribute. The key is matched case-insensitively against
	/// the ten fixed keys; any other key is a no-op and returns `false`.
	pub fn set_attr(&mut self, key: &str, value: impl Into<String>) -> bool {
		self.attributes.set(&key.to_lowercase(), value)
	}

	/// Embedded script text.
	pub fn script(&self) -> &str {
		&self.script
	}

	/// Replaces the embedded script text.
	pub fn set_script(&mut self, script: impl Into<String>) {
		self.script = script.into();
	}
}

impl Default for Animation {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Display for Animation {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "Animation({} frames, {} sprites)", self.frames.len(), self.sprites.len())
	}
}

/// Collapses whitespace runs so a value survives a write and reparse.
fn single_line(value: String) -> String {
	value.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn collapse_to_single_direction(frames: Vec<Frame>) -> Vec<Frame> {
	let last = frames.len().saturating_sub(1);
	(0..frames.len())
		.step_by(4)
		.map(|start| {
			let mut collapsed = frames[start].clone();
			for direction in Direction::ALL {
				let source = (start + direction.index()).min(last);
				collapsed.set_part(direction, frames[source].part(direction).clone());
			}
			collapsed
		})
		.collect()
}

fn expand_single_direction(frames: Vec<Frame>) -> Vec<Frame> {
	let mut expanded = Vec::with_capacity(frames.len() * 4);
	for frame in frames {
		let up = frame.part(Direction::Up);
		for copy in 0..4 {
			let mut replica = Frame::replicated(up);
			replica.set_length(frame.length());
			if copy == 0 {
				frame.sounds().iter().cloned().for_each(|cue| replica.add_sound(cue));
			}
			expanded.push(replica);
		}
	}
	expanded
}
