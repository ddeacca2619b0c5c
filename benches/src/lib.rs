//! Benchmark helper utilities for gani-rs
//!
//! This module provides generators for synthetic atlases and animation
//! scripts, so the benchmarks run without game assets.

use std::fmt::Write;

use image::{Rgba, RgbaImage};

/// Generates a `width` x `height` atlas holding a grid of opaque blobs.
///
/// Each `cell` x `cell` tile carries a blob inset by one pixel. The blob's
/// outermost ring is a checkerboard, reachable only through diagonal
/// neighbours.
pub fn generate_atlas(width: u32, height: u32, cell: u32) -> RgbaImage {
	let mut atlas = RgbaImage::new(width, height);
	let inset = 1u32.min(cell / 2);
	for (x, y, pixel) in atlas.enumerate_pixels_mut() {
		let (cx, cy) = (x % cell, y % cell);
		let inside = cx >= inset && cy >= inset && cx + inset < cell && cy + inset < cell;
		let edge = cx == inset || cy == inset || cx + inset + 1 == cell || cy + inset + 1 == cell;
		if inside && (!edge || (cx + cy) % 2 == 0) {
			*pixel = Rgba([(x % 256) as u8, (y % 256) as u8, 128, 255]);
		}
	}
	atlas
}

/// Generates a fully opaque atlas, the worst case for boundary detection.
pub fn generate_solid_atlas(width: u32, height: u32) -> RgbaImage {
	RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]))
}

/// Generates an animation script with `sprites` sprite definitions and
/// `frames` four-direction frames of `layers` placements each.
pub fn generate_script(sprites: i32, frames: usize, layers: usize) -> String {
	let mut text = String::new();
	for index in 0..sprites {
		let _ = writeln!(text, "SPRITE\t{index}\tSPRITES\t{}\t0\t32\t32\tsprite {index}", index * 32);
	}
	text.push_str("\nLOOP\nDEFAULTHEAD head0.png\n");
	for index in (0..sprites).step_by(3) {
		let _ = writeln!(text, "ROTATEEFFECT\t{index}\t0.25");
		let _ = writeln!(text, "COLOREFFECT\t{index}\t1\t0.5\t0.5\t0.9");
	}
	text.push_str("ANI\n");
	for frame in 0..frames {
		for direction in 0..4 {
			let line: Vec<String> = (0..layers)
				.map(|layer| {
					let sprite = (frame * 7 + layer * 3 + direction) as i32 % sprites.max(1);
					format!("{sprite}\t{}\t{}", layer * 4, direction * 2)
				})
				.collect();
			text.push_str(&line.join(",\t"));
			text.push('\n');
		}
		let _ = writeln!(text, "WAIT\t{}", frame % 5);
		text.push('\n');
	}
	text.push_str("ANIEND\n");
	text
}
