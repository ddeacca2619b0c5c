//! Rectangle and point math shared by the boundary detector and the transform pipeline.

use serde::{Deserialize, Serialize};

/// A signed 2D point, used for sprite placements and sound cue positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
	/// Horizontal coordinate
	pub x: i32,
	/// Vertical coordinate
	pub y: i32,
}

impl Point {
	/// Creates a new point.
	pub fn new(x: i32, y: i32) -> Self {
		Self {
			x,
			y,
		}
	}

	/// Returns this point moved by the given deltas.
	pub fn offset(self, dx: i32, dy: i32) -> Self {
		Self {
			x: self.x.saturating_add(dx),
			y: self.y.saturating_add(dy),
		}
	}
}

/// An axis-aligned rectangle in atlas pixel space.
///
/// `x`/`y` is the top-left corner (inclusive); the rectangle covers
/// `x..x + width` horizontally and `y..y + height` vertically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
	/// Left edge (inclusive)
	pub x: u32,
	/// Top edge (inclusive)
	pub y: u32,
	/// Width in pixels
	pub width: u32,
	/// Height in pixels
	pub height: u32,
}

/// The portion of a [`Rect`] that fits inside a bitmap, plus what was cut off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClampedRect {
	/// The in-bounds part of the rectangle (may have zero width or height)
	pub rect: Rect,
	/// Columns cut off at the right edge
	pub excess_width: u32,
	/// Rows cut off at the bottom edge
	pub excess_height: u32,
}

impl ClampedRect {
	/// Returns `true` when nothing had to be cut off.
	pub fn is_exact(&self) -> bool {
		self.excess_width == 0 && self.excess_height == 0
	}
}

impl Rect {
	/// Creates a new rectangle.
	pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
		Self {
			x,
			y,
			width,
			height,
		}
	}

	/// Builds a rectangle from inclusive min/max corners.
	///
	/// Returns `None` if `max` lies before `min` on either axis.
	pub fn from_corners(min_x: u32, min_y: u32, max_x: u32, max_y: u32) -> Option<Self> {
		if max_x < min_x || max_y < min_y {
			return None;
		}
		Some(Self {
			x: min_x,
			y: min_y,
			width: max_x - min_x + 1,
			height: max_y - min_y + 1,
		})
	}

	/// Exclusive right edge.
	pub fn right(&self) -> u32 {
		self.x.saturating_add(self.width)
	}

	/// Exclusive bottom edge.
	pub fn bottom(&self) -> u32 {
		self.y.saturating_add(self.height)
	}

	/// Returns `true` if the rectangle covers no pixels.
	pub fn is_empty(&self) -> bool {
		self.width == 0 || self.height == 0
	}

	/// Returns `true` if the pixel `(px, py)` lies inside the rectangle.
	pub fn contains(&self, px: u32, py: u32) -> bool {
		px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
	}

	/// Clamps the rectangle to a `bounds_width` x `bounds_height` bitmap.
	///
	/// The origin is kept (clamped to the bitmap edge when it lies outside) and
	/// the width/height shrink to fit. The number of columns and rows removed is
	/// reported so a caller can pad the result back to the nominal size.
	pub fn clamp_to(&self, bounds_width: u32, bounds_height: u32) -> ClampedRect {
		let x = self.x.min(bounds_width);
		let y = self.y.min(bounds_height);
		let width = self.width.min(bounds_width - x);
		let height = self.height.min(bounds_height - y);
		ClampedRect {
			rect: Rect::new(x, y, width, height),
			excess_width: self.width - width,
			excess_height: self.height - height,
		}
	}
}

impl std::fmt::Display for Rect {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
	}
}

/// Running min/max accumulator over visited pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
	min_x: u32,
	min_y: u32,
	max_x: u32,
	max_y: u32,
}

impl Bounds {
	/// Starts an accumulator containing a single pixel.
	pub fn at(x: u32, y: u32) -> Self {
		Self {
			min_x: x,
			min_y: y,
			max_x: x,
			max_y: y,
		}
	}

	/// Grows the bounds to include `(x, y)`.
	pub fn include(&mut self, x: u32, y: u32) {
		self.min_x = self.min_x.min(x);
		self.min_y = self.min_y.min(y);
		self.max_x = self.max_x.max(x);
		self.max_y = self.max_y.max(y);
	}

	/// Converts the accumulated extent into a tight bounding rectangle.
	pub fn to_rect(self) -> Rect {
		Rect::new(
			self.min_x,
			self.min_y,
			self.max_x - self.min_x + 1,
			self.max_y - self.min_y + 1,
		)
	}
}
