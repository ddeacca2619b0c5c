//! Sprite definitions and their visual effect parameters.

use serde::{Deserialize, Serialize};

use crate::{error::GaniError, geometry::Rect};

/// How colour multipliers combine with luminance during colour remapping.
///
/// See [`crate::atlas::color`] for the per-pixel formulas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum ColorMode {
	/// Greyscale luminance becomes the alpha channel, RGB is multiplied
	#[default]
	AlphaDerived = 0,
	/// Every channel is multiplied directly
	Multiply = 1,
	/// Greyscale alpha with inverse-multiplied colour (silhouette)
	Inverse = 2,
}

impl ColorMode {
	/// Converts a u8 value to `ColorMode`
	pub fn from_u8(value: u8) -> Option<Self> {
		match value {
			0 => Some(Self::AlphaDerived),
			1 => Some(Self::Multiply),
			2 => Some(Self::Inverse),
			_ => None,
		}
	}

	/// Converts `ColorMode` to u8
	pub fn to_u8(self) -> u8 {
		self as u8
	}
}

impl std::fmt::Display for ColorMode {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::AlphaDerived => write!(f, "alpha-derived"),
			Self::Multiply => write!(f, "multiply"),
			Self::Inverse => write!(f, "inverse"),
		}
	}
}

/// Red, green, blue and alpha multipliers, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorEffect {
	/// Red multiplier
	pub red: f64,
	/// Green multiplier
	pub green: f64,
	/// Blue multiplier
	pub blue: f64,
	/// Alpha multiplier
	pub alpha: f64,
}

impl ColorEffect {
	/// The identity multiplier (all ones).
	pub const IDENTITY: Self = Self {
		red: 1.0,
		green: 1.0,
		blue: 1.0,
		alpha: 1.0,
	};

	/// Creates a colour effect, clamping every component into `[0, 1]`.
	pub fn new(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
		Self {
			red: red.clamp(0.0, 1.0),
			green: green.clamp(0.0, 1.0),
			blue: blue.clamp(0.0, 1.0),
			alpha: alpha.clamp(0.0, 1.0),
		}
	}

	/// Returns `true` when every multiplier is 1.
	pub fn is_identity(&self) -> bool {
		*self == Self::IDENTITY
	}

	/// Returns the multipliers as an `[r, g, b, a]` array.
	pub fn to_array(self) -> [f64; 4] {
		[self.red, self.green, self.blue, self.alpha]
	}

	/// Returns `true` if no multiplier is NaN or infinite.
	pub fn is_finite(&self) -> bool {
		self.to_array().into_iter().all(f64::is_finite)
	}
}

impl Default for ColorEffect {
	fn default() -> Self {
		Self::IDENTITY
	}
}

/// Visual modifiers applied to a sprite at render time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectSet {
	/// Rotation in degrees (stored in radians in the text format)
	pub rotation: f64,
	/// Horizontal scale factor, negative mirrors
	pub stretch_x: f64,
	/// Vertical scale factor, negative mirrors
	pub stretch_y: f64,
	/// Uniform scale factor
	pub zoom: f64,
	/// Colour multipliers
	pub color: ColorEffect,
	/// Colour combination mode
	pub mode: ColorMode,
}

impl EffectSet {
	/// The identity effect set.
	pub const IDENTITY: Self = Self {
		rotation: 0.0,
		stretch_x: 1.0,
		stretch_y: 1.0,
		zoom: 1.0,
		color: ColorEffect::IDENTITY,
		mode: ColorMode::AlphaDerived,
	};

	/// Returns `true` if rotation differs from zero.
	pub fn has_rotation(&self) -> bool {
		self.rotation != 0.0
	}

	/// Returns `true` if either stretch factor differs from one.
	pub fn has_stretch(&self) -> bool {
		self.stretch_x != 1.0 || self.stretch_y != 1.0
	}

	/// Returns `true` if zoom differs from one.
	pub fn has_zoom(&self) -> bool {
		self.zoom != 1.0
	}

	/// Returns `true` if the colour remap step has work to do.
	///
	/// The inverse mode alters pixels even with identity multipliers.
	pub fn has_color(&self) -> bool {
		!self.color.is_identity() || self.mode == ColorMode::Inverse
	}

	/// Returns `true` if every numeric parameter is finite.
	pub fn is_finite(&self) -> bool {
		self.rotation.is_finite()
			&& self.stretch_x.is_finite()
			&& self.stretch_y.is_finite()
			&& self.zoom.is_finite()
			&& self.color.is_finite()
	}

	/// Returns `true` when no effect would change the sprite.
	pub fn is_identity(&self) -> bool {
		!self.has_rotation()
			&& !self.has_stretch()
			&& !self.has_zoom()
			&& self.color.is_identity()
			&& self.mode == ColorMode::AlphaDerived
	}
}

impl Default for EffectSet {
	fn default() -> Self {
		Self::IDENTITY
	}
}

/// A reusable sprite definition: an atlas region plus effect parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
	/// Identity within an animation; negative values are reserved sentinels
	pub index: i32,
	/// Logical atlas name, resolved by the host
	pub atlas_name: String,
	/// Region within the atlas
	pub region: Rect,
	/// Free-text description
	pub description: String,
	/// Render-time effects
	pub effects: EffectSet,
}

impl Sprite {
	/// Creates a sprite with identity effects and no description.
	pub fn new(index: i32, atlas_name: impl Into<String>, region: Rect) -> Self {
		Self {
			index,
			atlas_name: atlas_name.into(),
			region,
			description: String::new(),
			effects: EffectSet::IDENTITY,
		}
	}

	/// Sets the description (builder style).
	pub fn with_description(mut self, description: impl Into<String>) -> Self {
		self.description = description.into();
		self
	}

	/// Sets the effects (builder style).
	pub fn with_effects(mut self, effects: EffectSet) -> Self {
		self.effects = effects;
		self
	}

	/// Nominal width in pixels.
	pub fn width(&self) -> u32 {
		self.region.width
	}

	/// Nominal height in pixels.
	pub fn height(&self) -> u32 {
		self.region.height
	}

	/// Checks the invariants a registered sprite must hold.
	///
	/// # Errors
	///
	/// Returns [`GaniError::InvalidSprite`] if the region is empty, the atlas
	/// name is blank or holds whitespace, or an effect parameter is not
	/// finite.
	pub fn validate(&self) -> Result<(), GaniError> {
		if self.region.is_empty() {
			return Err(GaniError::InvalidSprite {
				index: self.index,
				reason: format!(
					"region must be non-empty, got {}x{}",
					self.region.width, self.region.height
				),
			});
		}
		if self.atlas_name.trim().is_empty() {
			return Err(GaniError::InvalidSprite {
				index: self.index,
				reason: "atlas name is empty".to_string(),
			});
		}
		// SPRITE lines are whitespace separated
		if self.atlas_name.chars().any(char::is_whitespace) {
			return Err(GaniError::InvalidSprite {
				index: self.index,
				reason: format!("atlas name {:?} contains whitespace", self.atlas_name),
			});
		}
		if !self.effects.is_finite() {
			return Err(GaniError::InvalidSprite {
				index: self.index,
				reason: "effect parameters must be finite".to_string(),
			});
		}
		Ok(())
	}
}

impl std::fmt::Display for Sprite {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "Sprite({}) {} {}", self.index, self.atlas_name, self.region)?;
		if !self.description.is_empty() {
			write!(f, " \"{}\"", self.description)?;
		}
		Ok(())
	}
}
