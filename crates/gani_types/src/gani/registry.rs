//! The catalog of sprite definitions owned by an animation.

use serde::Serialize;

use crate::error::GaniError;

use super::sprite::Sprite;

/// Sprite definitions keyed by their signed index.
///
/// Definition order is preserved (it is the order sprites are written back
/// out); re-adding an existing index replaces the definition in place.
///
/// Removal is only reachable through
/// [`Animation::remove_sprite`](super::Animation::remove_sprite), which also
/// deletes every placement of the sprite so no frame is left with a dangling
/// reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SpriteRegistry {
	sprites: Vec<Sprite>,
}

impl SpriteRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self {
			sprites: Vec::new(),
		}
	}

	/// Adds a sprite, replacing any existing sprite with the same index.
	///
	/// Returns the replaced definition, if there was one.
	///
	/// # Errors
	///
	/// Returns [`GaniError::InvalidSprite`] if the sprite fails
	/// [`Sprite::validate`]; the registry is left untouched.
	pub fn add_or_replace(&mut self, sprite: Sprite) -> Result<Option<Sprite>, GaniError> {
		sprite.validate()?;
		match self.position(sprite.index) {
			Some(pos) => Ok(Some(std::mem::replace(&mut self.sprites[pos], sprite))),
			None => {
				self.sprites.push(sprite);
				Ok(None)
			}
		}
	}

	/// Gets a sprite by index.
	pub fn get(&self, index: i32) -> Option<&Sprite> {
		self.sprites.iter().find(|sprite| sprite.index == index)
	}

	/// Gets a mutable sprite by index. The index and region must not change.
	pub(crate) fn get_mut(&mut self, index: i32) -> Option<&mut Sprite> {
		self.sprites.iter_mut().find(|sprite| sprite.index == index)
	}

	/// Returns `true` if a sprite with this index is registered.
	pub fn contains(&self, index: i32) -> bool {
		self.position(index).is_some()
	}

	/// Finds the first sprite whose description equals `text` (case-insensitive).
	pub fn find_by_description(&self, text: &str) -> Option<&Sprite> {
		self.sprites.iter().find(|sprite| sprite.description.eq_ignore_ascii_case(text))
	}

	/// Iterates over sprites in definition order.
	pub fn iter(&self) -> std::slice::Iter<'_, Sprite> {
		self.sprites.iter()
	}

	/// Number of registered sprites.
	pub fn len(&self) -> usize {
		self.sprites.len()
	}

	/// Returns `true` if no sprite is registered.
	pub fn is_empty(&self) -> bool {
		self.sprites.is_empty()
	}

	/// Removes a sprite definition without touching frames.
	pub(crate) fn remove(&mut self, index: i32) -> Option<Sprite> {
		self.position(index).map(|pos| self.sprites.remove(pos))
	}

	fn position(&self, index: i32) -> Option<usize> {
		self.sprites.iter().position(|sprite| sprite.index == index)
	}
}

impl<'a> IntoIterator for &'a SpriteRegistry {
	type Item = &'a Sprite;
	type IntoIter = std::slice::Iter<'a, Sprite>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}
