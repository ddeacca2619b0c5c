//! Per-pixel colour remapping.
//!
//! Channels are normalised to `[0, 1]`. With `L = 0.299 R + 0.587 G + 0.114 B`
//! and effect multipliers `(er, eg, eb, ea)`:
//!
//! ```text
//! mode          alpha             colour
//! ------------  ----------------  ------------------
//! Multiply      A * ea            C * ec
//! AlphaDerived  L * ea            C * ec             (ea < 1)
//!               A * ea            C * ec             (ea = 1)
//! Inverse       L * ea            C - C * ec
//! ```
//!
//! Fully transparent pixels are left untouched in every mode, so the empty
//! canvas around a rotated or padded sprite never becomes visible.

use image::RgbaImage;
use rayon::prelude::*;

use crate::gani::{ColorEffect, ColorMode};

/// Luminance weights for red, green and blue
pub const LUMA_WEIGHTS: [f64; 3] = [0.299, 0.587, 0.114];

/// Applies a colour effect to every pixel of `image` in place.
pub fn remap_colors(image: &mut RgbaImage, color: ColorEffect, mode: ColorMode) {
	let buffer: &mut [u8] = image;
	buffer.par_chunks_exact_mut(4).for_each(|pixel| remap_pixel(pixel, color, mode));
}

fn remap_pixel(pixel: &mut [u8], color: ColorEffect, mode: ColorMode) {
	if pixel[3] == 0 {
		return;
	}
	let [r, g, b, a] = [pixel[0], pixel[1], pixel[2], pixel[3]].map(|c| f64::from(c) / 255.0);
	let luma = LUMA_WEIGHTS[0] * r + LUMA_WEIGHTS[1] * g + LUMA_WEIGHTS[2] * b;
	let [er, eg, eb, ea] = color.to_array();

	let out = match mode {
		ColorMode::Inverse => [r - r * er, g - g * eg, b - b * eb, luma * ea],
		ColorMode::AlphaDerived if ea < 1.0 => [r * er, g * eg, b * eb, luma * ea],
		ColorMode::AlphaDerived | ColorMode::Multiply => [r * er, g * eg, b * eb, a * ea],
	};
	for (channel, value) in pixel.iter_mut().zip(out) {
		*channel = (value.clamp(0.0, 1.0) * 255.0).round() as u8;
	}
}
