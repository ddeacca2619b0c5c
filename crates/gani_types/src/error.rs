//! Error types for animation documents and their text format.

use thiserror::Error;

/// Errors raised by [`Animation`](crate::gani::Animation) edits and file I/O.
///
/// Parsing itself never fails: malformed lines are skipped. These errors cover
/// caller mistakes (out-of-range cursors, unknown sprites) and I/O.
#[derive(Debug, Error)]
pub enum GaniError {
	/// The document must always keep at least one frame
	#[error("Cannot remove the last frame of an animation")]
	LastFrame,

	/// Frame index out of range
	#[error("Frame index {index} out of range (total frames: {len})")]
	FrameOutOfRange {
		/// Requested frame index
		index: usize,
		/// Number of frames in the animation
		len: usize,
	},

	/// Layer index out of range for a frame part
	#[error("Layer {layer} out of range (layers in part: {len})")]
	LayerOutOfRange {
		/// Requested layer
		layer: usize,
		/// Number of placements in the part
		len: usize,
	},

	/// Sound cue index out of range
	#[error("Sound cue {index} out of range (cues in frame: {len})")]
	SoundOutOfRange {
		/// Requested cue index
		index: usize,
		/// Number of cues in the frame
		len: usize,
	},

	/// A placement referenced a sprite that is not registered
	#[error("Sprite {0} is not defined in this animation")]
	UnknownSprite(i32),

	/// A sprite definition violates the registry invariants
	#[error("Invalid sprite {index}: {reason}")]
	InvalidSprite {
		/// Sprite index
		index: i32,
		/// What was wrong with it
		reason: String,
	},

	/// Two mutually exclusive playback flags would both be set
	#[error("Playback flags {first} and {second} cannot both be set")]
	ConflictingFlags {
		/// Flag already set
		first: &'static str,
		/// Flag that was being set
		second: &'static str,
	},

	/// A direction name could not be parsed
	#[error("Unknown direction: {0:?}")]
	UnknownDirection(String),

	/// IO error
	#[error(transparent)]
	IOError(#[from] std::io::Error),
}

/// Errors raised by the boundary detector.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SliceError {
	/// Seed pixel lies outside the bitmap
	#[error("Seed ({x}, {y}) is outside the {width}x{height} bitmap")]
	SeedOutOfBounds {
		/// Seed x
		x: u32,
		/// Seed y
		y: u32,
		/// Bitmap width
		width: u32,
		/// Bitmap height
		height: u32,
	},

	/// The connected region is larger than the configured visit budget
	#[error("Flood fill stopped after visiting {limit} pixels")]
	VisitLimitExceeded {
		/// Configured maximum number of visited pixels
		limit: usize,
	},

	/// A raw pixel buffer is shorter than its declared dimensions
	#[error("Pixel buffer too small: expected {expected} bytes, got {actual} bytes")]
	BufferTooSmall {
		/// Expected number of bytes
		expected: usize,
		/// Actual number of bytes
		actual: usize,
	},
}
