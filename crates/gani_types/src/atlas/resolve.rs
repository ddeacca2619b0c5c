//! Logical atlas names to image files.
//!
//! A sprite's atlas name is one of:
//!
//! - a default-attribute key (`HEAD`, `BODY`, `ATTR1`, ...): the file named by
//!   the animation's attribute value is used, or nothing if the value is empty,
//! - `SPRITES`: the shared sprite sheet `sprites.png`,
//! - anything else: a literal file name.

use std::path::PathBuf;

use crate::gani::{DefaultAttributes, constants};

/// Locates files by name on behalf of the renderer.
///
/// Implemented by the host (for example a game-folder index). Any
/// `Fn(&str) -> Option<PathBuf>` closure works as a resolver.
pub trait AtlasResolver: Sync {
	/// Returns the path of a file with this name, if one exists.
	fn resolve(&self, file_name: &str) -> Option<PathBuf>;
}

impl<F> AtlasResolver for F
where
	F: Fn(&str) -> Option<PathBuf> + Sync,
{
	fn resolve(&self, file_name: &str) -> Option<PathBuf> {
		self(file_name)
	}
}

/// Maps a sprite's logical atlas name to the file name to look up.
///
/// Returns `None` when the name is an attribute key whose value is empty.
pub fn resolve_atlas_name<'a>(atlas_name: &'a str, attributes: &'a DefaultAttributes) -> Option<&'a str> {
	if let Some(value) = attributes.get(atlas_name) {
		return (!value.is_empty()).then_some(value);
	}
	if atlas_name.eq_ignore_ascii_case(constants::SPRITES_ATLAS) {
		return Some(constants::SPRITES_FILE);
	}
	Some(atlas_name)
}

/// Resolves a sprite's atlas to a path in one step.
pub fn resolve_atlas_path(
	atlas_name: &str,
	attributes: &DefaultAttributes,
	resolver: &dyn AtlasResolver,
) -> Option<PathBuf> {
	resolver.resolve(resolve_atlas_name(atlas_name, attributes)?)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_attribute_indirection() {
		let mut attributes = DefaultAttributes::default();
		attributes.set("head", "head19.png");

		assert_eq!(resolve_atlas_name("HEAD", &attributes), Some("head19.png"));
		assert_eq!(resolve_atlas_name("body", &attributes), None);
		assert_eq!(resolve_atlas_name("SPRITES", &attributes), Some("sprites.png"));
		assert_eq!(resolve_atlas_name("shadow.png", &attributes), Some("shadow.png"));
	}

	#[test]
	fn test_closure_resolver() {
		let resolver = |name: &str| (name == "sprites.png").then(|| PathBuf::from("/game/sprites.png"));
		let attributes = DefaultAttributes::default();

		assert_eq!(
			resolve_atlas_path("SPRITES", &attributes, &resolver),
			Some(PathBuf::from("/game/sprites.png"))
		);
		assert_eq!(resolve_atlas_path("missing.png", &attributes, &resolver), None);
		assert_eq!(resolve_atlas_path("BODY", &attributes, &resolver), None);
	}
}
