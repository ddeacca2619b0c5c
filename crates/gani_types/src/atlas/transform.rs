//! The sprite transform pipeline.
//!
//! A sprite is rendered from its atlas in a fixed order:
//!
//! 1. **Crop** the sprite region. A region overhanging the atlas is padded
//!    with transparent pixels at the right/bottom back to its nominal size.
//! 2. **Rotate** (counter-clockwise, degrees) into a square canvas twice the
//!    larger side, so no content is clipped.
//! 3. **Stretch** non-uniformly into a square canvas of side
//!    `ceil(max_side * max(|sx|, |sy|) * 2)`, rounded up to even. Negative
//!    factors mirror.
//! 4. **Zoom** uniformly; factors above one grow the canvas to
//!    `ceil(2 * max_side * |zoom|)`.
//! 5. **Colour remap**, see [`super::color`].
//!
//! Every geometric step resamples about the image centre and grows the canvas
//! symmetrically, so the sprite's centre stays fixed. The returned
//! [`AnchorOffset`] is how far the final image's top-left corner moved away
//! from the cropped image's: drawing the result at
//! `placement - offset` keeps the visual anchor in place.
//!
//! Sampling is nearest-neighbour through the inverse mapping of each output
//! pixel centre. An identity effect set reproduces the cropped pixels exactly.
//!
//! No canvas side may exceed [`MAX_CANVAS_SIDE`]. A sprite whose region or
//! effects would need a larger canvas, or whose effects are not finite, is
//! rendered as a placeholder instead.

use image::{RgbaImage, imageops};
use log::warn;
use rayon::prelude::*;
use serde::Serialize;

use super::color;
use crate::gani::Sprite;

/// Largest width or height, in pixels, of any intermediate or final canvas.
pub const MAX_CANVAS_SIDE: u32 = 4096;

/// Distance between the cropped sprite's top-left corner and the rendered
/// image's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct AnchorOffset {
	/// Horizontal offset in pixels, never negative
	pub x: f64,
	/// Vertical offset in pixels, never negative
	pub y: f64,
}

/// A sprite after the transform pipeline.
#[derive(Debug, Clone)]
pub struct RenderedSprite {
	/// Transformed pixels
	pub image: RgbaImage,
	/// Where to draw relative to the untransformed position
	pub offset: AnchorOffset,
}

impl RenderedSprite {
	/// A fully transparent stand-in of the sprite's nominal size, capped at
	/// [`MAX_CANVAS_SIDE`].
	pub fn placeholder(sprite: &Sprite) -> Self {
		let (width, height) = (sprite.width().min(MAX_CANVAS_SIDE), sprite.height().min(MAX_CANVAS_SIDE));
		Self {
			image: RgbaImage::new(width, height),
			offset: AnchorOffset::default(),
		}
	}
}

/// Row-major 2x2 matrix mapping output offsets to source offsets.
type Inverse = [[f64; 2]; 2];

/// Renders `sprite` from `atlas`.
///
/// Without an atlas (unresolved or failed to load) the result is a
/// transparent placeholder of the sprite's nominal size with a zero offset.
/// The same placeholder is returned when a step would exceed
/// [`MAX_CANVAS_SIDE`].
pub fn render_sprite(sprite: &Sprite, atlas: Option<&RgbaImage>) -> RenderedSprite {
	let Some(atlas) = atlas else {
		return RenderedSprite::placeholder(sprite);
	};
	let Some(image) = transform(sprite, atlas) else {
		warn!("cannot render sprite {} within {MAX_CANVAS_SIDE}px, using a placeholder", sprite.index);
		return RenderedSprite::placeholder(sprite);
	};

	let (orig_w, orig_h) = (sprite.width(), sprite.height());
	let offset = AnchorOffset {
		x: (f64::from(orig_w) / 2.0 - f64::from(image.width()) / 2.0).abs(),
		y: (f64::from(orig_h) / 2.0 - f64::from(image.height()) / 2.0).abs(),
	};
	RenderedSprite {
		image,
		offset,
	}
}

/// Runs the crop and effect steps.
///
/// Returns `None` for non-finite effects or a canvas that would be too large.
fn transform(sprite: &Sprite, atlas: &RgbaImage) -> Option<RgbaImage> {
	let effects = &sprite.effects;
	if !effects.is_finite() {
		return None;
	}
	canvas_side(f64::from(sprite.width().max(sprite.height())))?;
	let mut image = crop(atlas, sprite);

	if effects.has_rotation() {
		let side = canvas_side(2.0 * f64::from(image.width().max(image.height())))?;
		let (s, c) = effects.rotation.to_radians().sin_cos();
		image = resample_about_center(&image, side, side, [[c, -s], [s, c]]);
	}

	if effects.has_stretch() {
		let (sx, sy) = (effects.stretch_x, effects.stretch_y);
		let max_side = f64::from(image.width().max(image.height()));
		let mut side = canvas_side(max_side * sx.abs().max(sy.abs()) * 2.0)?;
		side = (side + side % 2).max(2);
		image = if sx == 0.0 || sy == 0.0 {
			RgbaImage::new(side, side)
		} else {
			resample_about_center(&image, side, side, [[1.0 / sx, 0.0], [0.0, 1.0 / sy]])
		};
	}

	if effects.has_zoom() {
		let zoom = effects.zoom;
		let (w, h) = if zoom.abs() > 1.0 {
			let side = canvas_side(2.0 * f64::from(image.width().max(image.height())) * zoom.abs())?;
			(side, side)
		} else {
			image.dimensions()
		};
		image = if zoom == 0.0 {
			RgbaImage::new(w, h)
		} else {
			resample_about_center(&image, w, h, [[1.0 / zoom, 0.0], [0.0, 1.0 / zoom]])
		};
	}

	if effects.has_color() {
		color::remap_colors(&mut image, effects.color, effects.mode);
	}
	Some(image)
}

/// Rounds a computed canvas side up to whole pixels.
///
/// Returns `None` if the side is not finite or exceeds [`MAX_CANVAS_SIDE`].
fn canvas_side(side: f64) -> Option<u32> {
	let side = side.ceil();
	(side.is_finite() && side <= f64::from(MAX_CANVAS_SIDE)).then_some(side as u32)
}

/// Cuts the sprite region out of the atlas, padded to the nominal size.
fn crop(atlas: &RgbaImage, sprite: &Sprite) -> RgbaImage {
	let clamped = sprite.region.clamp_to(atlas.width(), atlas.height());
	let rect = clamped.rect;
	let cropped = imageops::crop_imm(atlas, rect.x, rect.y, rect.width, rect.height).to_image();
	if clamped.is_exact() {
		return cropped;
	}
	let mut canvas = RgbaImage::new(sprite.width(), sprite.height());
	imageops::replace(&mut canvas, &cropped, 0, 0);
	canvas
}

/// Resamples `src` into a `width` x `height` canvas with both centres aligned.
fn resample_about_center(src: &RgbaImage, width: u32, height: u32, inverse: Inverse) -> RgbaImage {
	let mut dst = RgbaImage::new(width, height);
	if width == 0 || height == 0 || src.width() == 0 || src.height() == 0 {
		return dst;
	}
	let (src_w, src_h) = (f64::from(src.width()), f64::from(src.height()));
	let (src_cx, src_cy) = (src_w / 2.0, src_h / 2.0);
	let (dst_cx, dst_cy) = (f64::from(width) / 2.0, f64::from(height) / 2.0);

	let buffer: &mut [u8] = &mut dst;
	buffer.par_chunks_exact_mut(width as usize * 4).enumerate().for_each(|(y, row)| {
		let dy = y as f64 + 0.5 - dst_cy;
		for (x, pixel) in row.chunks_exact_mut(4).enumerate() {
			let dx = x as f64 + 0.5 - dst_cx;
			let sx = inverse[0][0] * dx + inverse[0][1] * dy + src_cx;
			let sy = inverse[1][0] * dx + inverse[1][1] * dy + src_cy;
			if sx >= 0.0 && sx < src_w && sy >= 0.0 && sy < src_h {
				pixel.copy_from_slice(&src.get_pixel(sx as u32, sy as u32).0);
			}
		}
	});
	dst
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		gani::{ColorEffect, ColorMode, EffectSet},
		geometry::Rect,
	};
	use image::Rgba;

	const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
	const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

	/// 8x8 atlas whose 4x2 region at (2, 3) is red on the left half and blue
	/// on the right half.
	fn atlas() -> RgbaImage {
		let mut atlas = RgbaImage::new(8, 8);
		for y in 3..5 {
			for x in 2..6 {
				atlas.put_pixel(x, y, if x < 4 { RED } else { BLUE });
			}
		}
		atlas
	}

	fn sprite(effects: EffectSet) -> Sprite {
		Sprite::new(0, "SPRITES", Rect::new(2, 3, 4, 2)).with_effects(effects)
	}

	fn opaque_count(image: &RgbaImage) -> usize {
		image.pixels().filter(|p| p.0[3] != 0).count()
	}

	#[test]
	fn test_identity_is_exact_crop() {
		let atlas = atlas();
		let rendered = render_sprite(&sprite(EffectSet::IDENTITY), Some(&atlas));
		let expected = imageops::crop_imm(&atlas, 2, 3, 4, 2).to_image();
		assert_eq!(rendered.image, expected);
		assert_eq!(rendered.offset, AnchorOffset::default());
	}

	#[test]
	fn test_missing_atlas_placeholder() {
		let rendered = render_sprite(&sprite(EffectSet::IDENTITY), None);
		assert_eq!(rendered.image.dimensions(), (4, 2));
		assert_eq!(opaque_count(&rendered.image), 0);
		assert_eq!(rendered.offset, AnchorOffset::default());
	}

	#[test]
	fn test_overhanging_region_is_padded() {
		let atlas = atlas();
		let sprite = Sprite::new(0, "SPRITES", Rect::new(4, 3, 6, 3));
		let rendered = render_sprite(&sprite, Some(&atlas));
		assert_eq!(rendered.image.dimensions(), (6, 3));
		assert_eq!(*rendered.image.get_pixel(0, 0), BLUE);
		assert_eq!(rendered.image.get_pixel(5, 0).0[3], 0);
		assert_eq!(rendered.image.get_pixel(0, 2).0[3], 0);
	}

	#[test]
	fn test_quarter_turn_keeps_every_pixel() {
		let atlas = atlas();
		let rendered = render_sprite(
			&sprite(EffectSet {
				rotation: 90.0,
				..EffectSet::IDENTITY
			}),
			Some(&atlas),
		);
		assert_eq!(rendered.image.dimensions(), (8, 8));
		assert_eq!(opaque_count(&rendered.image), 8);
		assert_eq!(rendered.offset, AnchorOffset { x: 2.0, y: 3.0 });
		// counter-clockwise: the red left half ends up at the bottom
		assert_eq!(*rendered.image.get_pixel(3, 5), RED);
		assert_eq!(*rendered.image.get_pixel(3, 2), BLUE);
	}

	#[test]
	fn test_mirror_stretch() {
		let atlas = atlas();
		let rendered = render_sprite(
			&sprite(EffectSet {
				stretch_x: -1.0,
				..EffectSet::IDENTITY
			}),
			Some(&atlas),
		);
		assert_eq!(rendered.image.dimensions(), (8, 8));
		assert_eq!(opaque_count(&rendered.image), 8);
		assert_eq!(*rendered.image.get_pixel(2, 3), BLUE);
		assert_eq!(*rendered.image.get_pixel(5, 3), RED);
		assert_eq!(rendered.offset, AnchorOffset { x: 2.0, y: 3.0 });
	}

	#[test]
	fn test_zero_stretch_is_transparent() {
		let atlas = atlas();
		let rendered = render_sprite(
			&sprite(EffectSet {
				stretch_y: 0.0,
				..EffectSet::IDENTITY
			}),
			Some(&atlas),
		);
		assert_eq!(opaque_count(&rendered.image), 0);
	}

	#[test]
	fn test_zoom_in_and_out() {
		let atlas = RgbaImage::from_pixel(4, 4, RED);
		let square = Sprite::new(0, "SPRITES", Rect::new(1, 1, 2, 2));

		let zoom_in = render_sprite(
			&square.clone().with_effects(EffectSet {
				zoom: 2.0,
				..EffectSet::IDENTITY
			}),
			Some(&atlas),
		);
		assert_eq!(zoom_in.image.dimensions(), (8, 8));
		assert_eq!(opaque_count(&zoom_in.image), 16);
		assert_eq!(zoom_in.offset, AnchorOffset { x: 3.0, y: 3.0 });

		let big = Sprite::new(0, "SPRITES", Rect::new(0, 0, 4, 4));
		let zoom_out = render_sprite(
			&big.with_effects(EffectSet {
				zoom: 0.5,
				..EffectSet::IDENTITY
			}),
			Some(&atlas),
		);
		assert_eq!(zoom_out.image.dimensions(), (4, 4));
		assert_eq!(opaque_count(&zoom_out.image), 4);
		assert_eq!(*zoom_out.image.get_pixel(1, 1), RED);
		assert_eq!(zoom_out.image.get_pixel(0, 0).0[3], 0);
	}

	#[test]
	fn test_offsets_are_symmetric() {
		let atlas = RgbaImage::from_pixel(16, 16, RED);
		let sprite = Sprite::new(0, "SPRITES", Rect::new(0, 0, 3, 5)).with_effects(EffectSet {
			rotation: 30.0,
			stretch_x: 1.3,
			stretch_y: -0.7,
			zoom: 1.2,
			..EffectSet::IDENTITY
		});
		let rendered = render_sprite(&sprite, Some(&atlas));
		let (w, h) = rendered.image.dimensions();
		assert_eq!(f64::from(w) - 2.0 * rendered.offset.x, 3.0);
		assert_eq!(f64::from(h) - 2.0 * rendered.offset.y, 5.0);
	}

	#[test]
	fn test_oversized_canvas_falls_back_to_placeholder() {
		let atlas = atlas();
		for effects in [
			EffectSet {
				zoom: 1e12,
				..EffectSet::IDENTITY
			},
			EffectSet {
				stretch_x: -1e9,
				..EffectSet::IDENTITY
			},
			EffectSet {
				zoom: f64::INFINITY,
				..EffectSet::IDENTITY
			},
			EffectSet {
				stretch_y: f64::NAN,
				..EffectSet::IDENTITY
			},
		] {
			let rendered = render_sprite(&sprite(effects), Some(&atlas));
			assert_eq!(rendered.image.dimensions(), (4, 2), "{effects:?}");
			assert_eq!(opaque_count(&rendered.image), 0);
			assert_eq!(rendered.offset, AnchorOffset::default());
		}
	}

	#[test]
	fn test_canvas_limit_is_inclusive() {
		let atlas = RgbaImage::from_pixel(4, 4, RED);
		let square = Sprite::new(0, "SPRITES", Rect::new(0, 0, 2, 2));
		let at_limit = render_sprite(
			&square.clone().with_effects(EffectSet {
				zoom: f64::from(MAX_CANVAS_SIDE) / 4.0,
				..EffectSet::IDENTITY
			}),
			Some(&atlas),
		);
		assert_eq!(at_limit.image.dimensions(), (MAX_CANVAS_SIDE, MAX_CANVAS_SIDE));

		let huge_region = Sprite::new(0, "SPRITES", Rect::new(0, 0, MAX_CANVAS_SIDE + 1, 1));
		let rendered = render_sprite(&huge_region, Some(&atlas));
		assert_eq!(rendered.image.dimensions(), (MAX_CANVAS_SIDE, 1));
		assert_eq!(opaque_count(&rendered.image), 0);
	}

	#[test]
	fn test_color_step_runs_last() {
		let atlas = atlas();
		let rendered = render_sprite(
			&sprite(EffectSet {
				rotation: 180.0,
				color: ColorEffect::new(0.0, 1.0, 1.0, 1.0),
				mode: ColorMode::Multiply,
				..EffectSet::IDENTITY
			}),
			Some(&atlas),
		);
		assert!(rendered.image.pixels().all(|p| p.0[0] == 0));
		assert_eq!(opaque_count(&rendered.image), 8);
	}
}
