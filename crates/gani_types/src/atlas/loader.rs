//! Loads every sprite of an animation from disk and renders it.

use std::{
	collections::{HashMap, HashSet},
	path::PathBuf,
	sync::Arc,
};

use image::RgbaImage;
use log::{info, warn};
use rayon::prelude::*;

use super::{
	resolve::{AtlasResolver, resolve_atlas_path},
	transform::{RenderedSprite, render_sprite},
};
use crate::gani::Animation;

/// Renders every sprite of `animation`, keyed by sprite index.
///
/// Each distinct atlas file is decoded once; decoding and the per-sprite
/// transforms run in parallel. Sprites whose atlas cannot be resolved or
/// decoded get a transparent placeholder of their nominal size.
pub fn load_sprite_images(
	animation: &Animation,
	resolver: &dyn AtlasResolver,
) -> HashMap<i32, RenderedSprite> {
	let paths: Vec<(i32, Option<PathBuf>)> = animation
		.sprites()
		.iter()
		.map(|sprite| {
			let path = resolve_atlas_path(&sprite.atlas_name, animation.attributes(), resolver);
			if path.is_none() {
				warn!("atlas {:?} of sprite {} not found", sprite.atlas_name, sprite.index);
			}
			(sprite.index, path)
		})
		.collect();

	let distinct: HashSet<&PathBuf> = paths.iter().filter_map(|(_, path)| path.as_ref()).collect();
	let atlases: HashMap<&PathBuf, Arc<RgbaImage>> = distinct
		.into_par_iter()
		.filter_map(|path| match image::open(path) {
			Ok(decoded) => Some((path, Arc::new(decoded.to_rgba8()))),
			Err(err) => {
				warn!("failed to decode atlas {}: {err}", path.display());
				None
			}
		})
		.collect();
	info!("decoded {} atlas images for {} sprites", atlases.len(), paths.len());

	paths
		.par_iter()
		.filter_map(|(index, path)| {
			let sprite = animation.sprite(*index)?;
			let atlas = path.as_ref().and_then(|path| atlases.get(path));
			Some((*index, render_sprite(sprite, atlas.map(Arc::as_ref))))
		})
		.collect()
}
