//! Frames, per-direction frame parts and sound cues.
//!
//! A [`Frame`] holds exactly four [`FramePart`]s, one per [`Direction`]. Each
//! part is an ordered list of [`Placement`]s where index 0 is drawn first
//! (bottom-most).

use serde::{Deserialize, Serialize};

use crate::{error::GaniError, geometry::Point};

use super::constants;

/// One of the four cardinal facings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
	/// Facing up
	Up = 0,
	/// Facing left
	Left = 1,
	/// Facing down
	Down = 2,
	/// Facing right
	Right = 3,
}

impl Direction {
	/// All directions in file order.
	pub const ALL: [Direction; 4] = [Self::Up, Self::Left, Self::Down, Self::Right];

	/// Position of this direction in file order.
	pub fn index(self) -> usize {
		self as usize
	}

	/// Next direction in the up → left → down → right cycle.
	pub fn next(self) -> Self {
		Self::ALL[(self.index() + 1) % 4]
	}

	/// Lower-case name.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Up => "up",
			Self::Left => "left",
			Self::Down => "down",
			Self::Right => "right",
		}
	}
}

impl std::fmt::Display for Direction {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

impl std::str::FromStr for Direction {
	type Err = GaniError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|dir| dir.as_str().eq_ignore_ascii_case(s.trim()))
			.ok_or_else(|| GaniError::UnknownDirection(s.to_string()))
	}
}

/// Axis for [`FramePart::shift`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
	/// Move along x
	Horizontal,
	/// Move along y
	Vertical,
}

/// Direction of a z-order swap for [`FramePart::change_layer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerMove {
	/// Towards the top (drawn later)
	Up,
	/// Towards the bottom (drawn earlier)
	Down,
}

/// A sprite drawn at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
	/// Index of the sprite in the animation's registry
	pub sprite: i32,
	/// Top-left corner of the untransformed sprite
	pub position: Point,
}

impl Placement {
	/// Creates a new placement.
	pub fn new(sprite: i32, x: i32, y: i32) -> Self {
		Self {
			sprite,
			position: Point::new(x, y),
		}
	}
}

/// Ordered sprite placements for one direction of one frame.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FramePart {
	placements: Vec<Placement>,
}

impl FramePart {
	/// Creates an empty part.
	pub fn new() -> Self {
		Self {
			placements: Vec::new(),
		}
	}

	/// Creates a part from placements in z-order.
	pub fn from_placements(placements: Vec<Placement>) -> Self {
		Self {
			placements,
		}
	}

	/// Placements in z-order (bottom first).
	pub fn placements(&self) -> &[Placement] {
		&self.placements
	}

	/// Number of layers.
	pub fn len(&self) -> usize {
		self.placements.len()
	}

	/// Returns `true` if nothing is drawn.
	pub fn is_empty(&self) -> bool {
		self.placements.is_empty()
	}

	/// Appends a placement on top of the others.
	pub fn add_placement(&mut self, placement: Placement) {
		self.placements.push(placement);
	}

	/// Moves one layer by a signed delta along an axis.
	///
	/// # Errors
	///
	/// Returns [`GaniError::LayerOutOfRange`] for an invalid layer.
	pub fn shift(&mut self, layer: usize, axis: Axis, amount: i32) -> Result<(), GaniError> {
		let placement = self.layer_mut(layer)?;
		placement.position = match axis {
			Axis::Horizontal => placement.position.offset(amount, 0),
			Axis::Vertical => placement.position.offset(0, amount),
		};
		Ok(())
	}

	/// Swaps a layer with its neighbour in z-order.
	///
	/// Returns `false` when the layer is already at the top (for
	/// [`LayerMove::Up`]) or bottom (for [`LayerMove::Down`]), so a caller can
	/// keep its selected-layer cursor in sync.
	///
	/// # Errors
	///
	/// Returns [`GaniError::LayerOutOfRange`] for an invalid layer; this
	/// usually means the caller's cursor is out of sync.
	pub fn change_layer(&mut self, layer: usize, movement: LayerMove) -> Result<bool, GaniError> {
		self.check_layer(layer)?;
		let target = match movement {
			LayerMove::Up if layer + 1 < self.placements.len() => layer + 1,
			LayerMove::Down if layer > 0 => layer - 1,
			_ => return Ok(false),
		};
		self.placements.swap(layer, target);
		Ok(true)
	}

	/// Sets either coordinate of a layer, keeping the other when `None`.
	///
	/// # Errors
	///
	/// Returns [`GaniError::LayerOutOfRange`] for an invalid layer.
	pub fn change_sprite_position(
		&mut self,
		layer: usize,
		x: Option<i32>,
		y: Option<i32>,
	) -> Result<(), GaniError> {
		let placement = self.layer_mut(layer)?;
		if let Some(x) = x {
			placement.position.x = x;
		}
		if let Some(y) = y {
			placement.position.y = y;
		}
		Ok(())
	}

	/// Moves a layer to a new z-order position, shifting the layers between.
	///
	/// # Errors
	///
	/// Returns [`GaniError::LayerOutOfRange`] if either position is invalid.
	pub fn move_layer(&mut self, from: usize, to: usize) -> Result<(), GaniError> {
		self.check_layer(from)?;
		self.check_layer(to)?;
		let placement = self.placements.remove(from);
		self.placements.insert(to, placement);
		Ok(())
	}

	/// Removes a single layer.
	///
	/// # Errors
	///
	/// Returns [`GaniError::LayerOutOfRange`] for an invalid layer.
	pub fn remove_layer(&mut self, layer: usize) -> Result<Placement, GaniError> {
		self.check_layer(layer)?;
		Ok(self.placements.remove(layer))
	}

	/// Removes every placement of a sprite, returning how many were removed.
	pub fn remove_sprite(&mut self, sprite: i32) -> usize {
		let before = self.placements.len();
		self.placements.retain(|placement| placement.sprite != sprite);
		before - self.placements.len()
	}

	/// Top-most layer drawing the given sprite.
	pub fn topmost_layer_of(&self, sprite: i32) -> Option<usize> {
		self.placements.iter().rposition(|placement| placement.sprite == sprite)
	}

	/// Reverses the draw order.
	pub fn reverse(&mut self) {
		self.placements.reverse();
	}

	/// Returns `true` if any placement draws the given sprite.
	pub fn references(&self, sprite: i32) -> bool {
		self.placements.iter().any(|placement| placement.sprite == sprite)
	}

	fn check_layer(&self, layer: usize) -> Result<(), GaniError> {
		if layer < self.placements.len() {
			Ok(())
		} else {
			Err(GaniError::LayerOutOfRange {
				layer,
				len: self.placements.len(),
			})
		}
	}

	fn layer_mut(&mut self, layer: usize) -> Result<&mut Placement, GaniError> {
		let len = self.placements.len();
		self.placements.get_mut(layer).ok_or(GaniError::LayerOutOfRange {
			layer,
			len,
		})
	}
}

/// A sound played when a frame starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundCue {
	/// Logical sound name, resolved by the host
	pub name: String,
	/// Horizontal position in pixels
	pub x: f64,
	/// Vertical position in pixels
	pub y: f64,
}

impl SoundCue {
	/// Creates a cue at a pixel position.
	pub fn new(name: impl Into<String>, x: f64, y: f64) -> Self {
		Self {
			name: name.into(),
			x,
			y,
		}
	}

	/// Creates a cue from tile coordinates as written in `PLAYSOUND` lines.
	pub fn from_tiles(name: impl Into<String>, tile_x: f64, tile_y: f64) -> Self {
		Self::new(name, tile_x * constants::TILE_SIZE, tile_y * constants::TILE_SIZE)
	}

	/// Position in tile units.
	pub fn tiles(&self) -> (f64, f64) {
		(self.x / constants::TILE_SIZE, self.y / constants::TILE_SIZE)
	}
}

/// One time-step of an animation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
	parts: [FramePart; 4],
	length: f64,
	sounds: Vec<SoundCue>,
}

impl Frame {
	/// Creates an empty frame of minimum length.
	pub fn new() -> Self {
		Self {
			parts: Default::default(),
			length: constants::MIN_FRAME_LENGTH,
			sounds: Vec::new(),
		}
	}

	/// Creates a frame whose four parts are all copies of `part`.
	pub fn replicated(part: &FramePart) -> Self {
		Self {
			parts: std::array::from_fn(|_| part.clone()),
			..Self::new()
		}
	}

	/// The part drawn for `direction`.
	pub fn part(&self, direction: Direction) -> &FramePart {
		&self.parts[direction.index()]
	}

	/// Mutable part for `direction`.
	pub fn part_mut(&mut self, direction: Direction) -> &mut FramePart {
		&mut self.parts[direction.index()]
	}

	/// Replaces the part for `direction`.
	pub fn set_part(&mut self, direction: Direction, part: FramePart) {
		self.parts[direction.index()] = part;
	}

	/// Iterates over `(direction, part)` in file order.
	pub fn parts(&self) -> impl Iterator<Item = (Direction, &FramePart)> {
		Direction::ALL.into_iter().zip(self.parts.iter())
	}

	/// Frame length in seconds.
	pub fn length(&self) -> f64 {
		self.length
	}

	/// Sets the frame length, clamped to the 0.05 s minimum.
	pub fn set_length(&mut self, length: f64) {
		self.length = if length >= constants::MIN_FRAME_LENGTH {
			length
		} else {
			constants::MIN_FRAME_LENGTH
		};
	}

	/// Sound cues in playback order.
	pub fn sounds(&self) -> &[SoundCue] {
		&self.sounds
	}

	/// Appends a sound cue.
	pub fn add_sound(&mut self, cue: SoundCue) {
		self.sounds.push(cue);
	}

	/// Moves a sound cue to a new pixel position.
	///
	/// # Errors
	///
	/// Returns [`GaniError::SoundOutOfRange`] for an invalid cue index.
	pub fn move_sound(&mut self, index: usize, x: f64, y: f64) -> Result<(), GaniError> {
		let len = self.sounds.len();
		let cue = self.sounds.get_mut(index).ok_or(GaniError::SoundOutOfRange {
			index,
			len,
		})?;
		cue.x = x;
		cue.y = y;
		Ok(())
	}

	/// Removes a sound cue.
	///
	/// # Errors
	///
	/// Returns [`GaniError::SoundOutOfRange`] for an invalid cue index.
	pub fn remove_sound(&mut self, index: usize) -> Result<SoundCue, GaniError> {
		if index >= self.sounds.len() {
			return Err(GaniError::SoundOutOfRange {
				index,
				len: self.sounds.len(),
			});
		}
		Ok(self.sounds.remove(index))
	}

	/// Removes a sprite from all four parts, returning the number of placements removed.
	pub fn remove_sprite(&mut self, sprite: i32) -> usize {
		self.parts.iter_mut().map(|part| part.remove_sprite(sprite)).sum()
	}

	/// Reverses the draw order in all four parts.
	pub fn reverse_layers(&mut self) {
		self.parts.iter_mut().for_each(FramePart::reverse);
	}
}

impl Default for Frame {
	fn default() -> Self {
		Self::new()
	}
}
