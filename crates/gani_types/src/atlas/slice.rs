//! Sprite boundary detection.
//!
//! Given a seed pixel inside an atlas, finds the bounding rectangle of the
//! 8-connected region of non-transparent pixels containing it. This is what
//! an editor uses to define a sprite from a single click.
//!
//! The fill is iterative (explicit stack plus a visited mask) so large regions
//! cannot overflow the call stack, and an optional visit budget bounds the
//! work on huge atlases.

use image::RgbaImage;

use crate::{
	error::SliceError,
	geometry::{Bounds, Rect},
};

/// Limits for [`detect_bounds`].
///
/// # Examples
///
/// ```
/// use gani_types::atlas::SliceConfig;
///
/// let config = SliceConfig::default();
/// assert_eq!(config.max_visited, None);
///
/// let config = SliceConfig::new(4096);
/// assert_eq!(config.max_visited, Some(4096));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SliceConfig {
	/// Maximum number of pixels the fill may visit, `None` for unbounded
	pub max_visited: Option<usize>,
}

impl SliceConfig {
	/// Creates a configuration with a visit budget.
	pub fn new(max_visited: usize) -> Self {
		Self {
			max_visited: Some(max_visited),
		}
	}

	/// Creates a configuration without a visit budget.
	pub fn unbounded() -> Self {
		Self {
			max_visited: None,
		}
	}
}

/// Read access to per-pixel alpha.
pub trait AlphaSource {
	/// Bitmap width in pixels
	fn width(&self) -> u32;
	/// Bitmap height in pixels
	fn height(&self) -> u32;
	/// Alpha of the pixel at `(x, y)`; callers stay in bounds
	fn alpha(&self, x: u32, y: u32) -> u8;
}

impl AlphaSource for RgbaImage {
	fn width(&self) -> u32 {
		self.dimensions().0
	}

	fn height(&self) -> u32 {
		self.dimensions().1
	}

	fn alpha(&self, x: u32, y: u32) -> u8 {
		self.get_pixel(x, y).0[3]
	}
}

/// A borrowed RGBA8 buffer, row-major, four bytes per pixel.
#[derive(Debug, Clone, Copy)]
pub struct RawBitmap<'a> {
	data: &'a [u8],
	width: u32,
	height: u32,
}

impl<'a> RawBitmap<'a> {
	/// Wraps a pixel buffer.
	///
	/// # Errors
	///
	/// Returns [`SliceError::BufferTooSmall`] if `data` holds fewer than
	/// `width * height * 4` bytes.
	pub fn new(data: &'a [u8], width: u32, height: u32) -> Result<Self, SliceError> {
		let expected = width as usize * height as usize * 4;
		if data.len() < expected {
			return Err(SliceError::BufferTooSmall {
				expected,
				actual: data.len(),
			});
		}
		Ok(Self {
			data,
			width,
			height,
		})
	}
}

impl AlphaSource for RawBitmap<'_> {
	fn width(&self) -> u32 {
		self.width
	}

	fn height(&self) -> u32 {
		self.height
	}

	fn alpha(&self, x: u32, y: u32) -> u8 {
		self.data[(y as usize * self.width as usize + x as usize) * 4 + 3]
	}
}

/// Finds the bounding rectangle of the opaque region containing `(x, y)`.
///
/// A pixel is part of the region when its alpha is non-zero. Neighbours are
/// 8-connected. Returns `Ok(None)` if the seed itself is transparent.
///
/// The result does not depend on which pixel of a region is used as the seed.
///
/// # Errors
///
/// - [`SliceError::SeedOutOfBounds`] if the seed is outside the bitmap
/// - [`SliceError::VisitLimitExceeded`] if the region is larger than
///   `config.max_visited`
///
/// # Examples
///
/// ```
/// use gani_types::atlas::{SliceConfig, detect_bounds};
/// use gani_types::geometry::Rect;
/// use image::{Rgba, RgbaImage};
///
/// let mut atlas = RgbaImage::new(8, 8);
/// for (x, y) in [(2, 2), (3, 3), (4, 3)] {
///     atlas.put_pixel(x, y, Rgba([255, 0, 0, 255]));
/// }
/// let rect = detect_bounds(&atlas, 4, 3, SliceConfig::default()).unwrap();
/// assert_eq!(rect, Some(Rect::new(2, 2, 3, 2)));
/// ```
pub fn detect_bounds<S: AlphaSource + ?Sized>(
	source: &S,
	x: u32,
	y: u32,
	config: SliceConfig,
) -> Result<Option<Rect>, SliceError> {
	let (width, height) = (source.width(), source.height());
	if x >= width || y >= height {
		return Err(SliceError::SeedOutOfBounds {
			x,
			y,
			width,
			height,
		});
	}
	if source.alpha(x, y) == 0 {
		return Ok(None);
	}

	let stride = width as usize;
	let mut visited = vec![false; stride * height as usize];
	let mut stack = vec![(x, y)];
	visited[y as usize * stride + x as usize] = true;
	let mut bounds = Bounds::at(x, y);
	let mut count = 0usize;

	while let Some((cx, cy)) = stack.pop() {
		count += 1;
		if let Some(limit) = config.max_visited
			&& count > limit
		{
			return Err(SliceError::VisitLimitExceeded {
				limit,
			});
		}
		bounds.include(cx, cy);

		let min_x = cx.saturating_sub(1);
		let max_x = (cx + 1).min(width - 1);
		let min_y = cy.saturating_sub(1);
		let max_y = (cy + 1).min(height - 1);
		for ny in min_y..=max_y {
			for nx in min_x..=max_x {
				let slot = ny as usize * stride + nx as usize;
				if visited[slot] {
					continue;
				}
				visited[slot] = true;
				if source.alpha(nx, ny) != 0 {
					stack.push((nx, ny));
				}
			}
		}
	}

	Ok(Some(bounds.to_rect()))
}
