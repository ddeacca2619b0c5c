//! Animation script parser.
//!
//! Parsing runs in two stages:
//!
//! 1. A single forward scan ([`RawScript::scan`]) classifies each line by its
//!    first token. `SCRIPT` and `ANI` switch a recording mode that changes how
//!    the following lines are read until `SCRIPTEND`/`ANIEND`. Sprite
//!    definitions and effect lines are only collected at this stage, because
//!    an effect line may appear before the sprite it modifies.
//! 2. [`RawScript::reconcile`] applies the collected effects to the collected
//!    sprites and assembles the final [`Animation`].
//!
//! Nothing here fails. Unknown keywords, short lines and numbers that do not
//! parse are skipped and reported at `debug`/`trace` level.

use std::collections::HashMap;

use log::{debug, trace, warn};

use super::{
	animation::{Animation, DefaultAttributes, PlaybackFlags},
	constants::{self, keyword},
	frame::{Direction, Frame, FramePart, Placement, SoundCue},
	registry::SpriteRegistry,
	sprite::{ColorEffect, ColorMode, EffectSet, Sprite},
};
use crate::geometry::Rect;

/// Effect lines collected for one sprite index, applied after the scan.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RawEffects {
	/// `ROTATEEFFECT` value in radians
	pub rotation_radians: Option<f64>,
	/// `STRETCHXEFFECT` value
	pub stretch_x: Option<f64>,
	/// `STRETCHYEFFECT` value
	pub stretch_y: Option<f64>,
	/// `ZOOMEFFECT` value
	pub zoom: Option<f64>,
	/// `COLOREFFECT` multipliers and optional mode
	pub color: Option<(ColorEffect, ColorMode)>,
}

impl RawEffects {
	fn apply_to(&self, effects: &mut EffectSet) {
		if let Some(radians) = self.rotation_radians {
			effects.rotation = radians.to_degrees();
		}
		if let Some(stretch_x) = self.stretch_x {
			effects.stretch_x = stretch_x;
		}
		if let Some(stretch_y) = self.stretch_y {
			effects.stretch_y = stretch_y;
		}
		if let Some(zoom) = self.zoom {
			effects.zoom = zoom;
		}
		if let Some((color, mode)) = self.color {
			effects.color = color;
			effects.mode = mode;
		}
	}
}

/// Result of the forward scan, before effects are merged into sprites.
#[derive(Debug, Clone, Default)]
pub struct RawScript {
	/// Sprite definitions in file order (later duplicates replace earlier ones)
	pub sprites: Vec<Sprite>,
	/// Effect tables keyed by sprite index
	pub effects: HashMap<i32, RawEffects>,
	/// Frames in file order
	pub frames: Vec<Frame>,
	/// `SETBACKTO` value
	pub setbackto: String,
	/// Default attributes
	pub attributes: DefaultAttributes,
	/// `LOOP` seen
	pub looped: bool,
	/// `CONTINUOUS` seen
	pub continuous: bool,
	/// `SINGLEDIRECTION` seen
	pub single_direction: bool,
	/// Lines captured between `SCRIPT` and `SCRIPTEND`
	pub script_lines: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
	Normal,
	Script,
	Frames,
}

struct Scanner {
	raw: RawScript,
	mode: Mode,
	cursor: Direction,
}

/// Parses script text into an [`Animation`].
pub fn parse(text: &str) -> Animation {
	RawScript::scan(text).reconcile()
}

impl RawScript {
	/// Runs the forward scan over the whole text.
	pub fn scan(text: &str) -> Self {
		let mut scanner = Scanner {
			raw: RawScript::default(),
			mode: Mode::Normal,
			cursor: Direction::Up,
		};
		for (number, line) in text.lines().enumerate() {
			scanner.line(number + 1, line);
		}
		if scanner.mode != Mode::Normal {
			debug!("script ended inside a {:?} block", scanner.mode);
		}
		scanner.raw
	}

	/// Merges effects into sprites and builds the final document.
	///
	/// - effects for indices with no `SPRITE` line are dropped,
	/// - sprites failing [`Sprite::validate`] are dropped,
	/// - placements referring to dropped or undefined sprites are removed,
	/// - `LOOP` wins over `CONTINUOUS` when a script sets both,
	/// - a script without frames yields one empty frame.
	pub fn reconcile(self) -> Animation {
		let mut sprites = SpriteRegistry::new();
		for mut sprite in self.sprites {
			if let Some(raw) = self.effects.get(&sprite.index) {
				raw.apply_to(&mut sprite.effects);
			}
			let index = sprite.index;
			if let Err(err) = sprites.add_or_replace(sprite) {
				warn!("dropping sprite {index}: {err}");
			}
		}
		for index in self.effects.keys() {
			if !sprites.contains(*index) {
				debug!("effects for undefined sprite {index} ignored");
			}
		}

		let mut frames = self.frames;
		for frame in &mut frames {
			for direction in Direction::ALL {
				let part = frame.part_mut(direction);
				let kept: Vec<Placement> = part
					.placements()
					.iter()
					.copied()
					.filter(|placement| {
						let known = sprites.contains(placement.sprite);
						if !known {
							warn!("dropping placement of undefined sprite {}", placement.sprite);
						}
						known
					})
					.collect();
				if kept.len() != part.len() {
					*part = FramePart::from_placements(kept);
				}
			}
		}
		if frames.is_empty() {
			frames.push(Frame::new());
		}

		let mut flags = PlaybackFlags {
			looped: self.looped,
			continuous: self.continuous,
			single_direction: self.single_direction,
		};
		if let Err(err) = flags.validate() {
			warn!("{err}; keeping LOOP");
			flags.continuous = false;
		}

		Animation {
			frames,
			sprites,
			setbackto: self.setbackto,
			flags,
			attributes: self.attributes,
			script: self.script_lines.join("\n"),
		}
	}
}

impl Scanner {
	fn line(&mut self, number: usize, line: &str) {
		let mut tokens = line.split_whitespace();

		if self.mode == Mode::Script {
			if tokens.next().is_some_and(|t| t.eq_ignore_ascii_case(keyword::SCRIPTEND)) {
				self.mode = Mode::Normal;
			} else {
				self.raw.script_lines.push(line.to_string());
			}
			return;
		}

		let Some(first) = tokens.next() else {
			return;
		};
		let key = first.to_ascii_uppercase();
		let args: Vec<&str> = tokens.collect();

		if self.directive(&key, &args) {
			return;
		}
		if self.mode == Mode::Frames {
			self.frame_part(line);
		} else {
			trace!("line {number}: ignoring {first:?}");
		}
	}

	/// Handles a directive line, returning `false` if `key` is not one.
	fn directive(&mut self, key: &str, args: &[&str]) -> bool {
		match key {
			keyword::SCRIPT => self.mode = Mode::Script,
			keyword::ANI => {
				self.mode = Mode::Frames;
				self.cursor = Direction::Up;
			}
			keyword::ANIEND => self.mode = Mode::Normal,
			keyword::LOOP => self.raw.looped = true,
			keyword::CONTINUOUS => self.raw.continuous = true,
			keyword::SINGLEDIRECTION => self.raw.single_direction = true,
			keyword::SETBACKTO => {
				if !args.is_empty() {
					self.raw.setbackto = args.join(" ");
				}
			}
			keyword::SPRITE => self.sprite(args),
			keyword::WAIT => self.wait(args),
			keyword::PLAYSOUND => self.sound(args),
			keyword::ROTATEEFFECT => {
				self.effect(args, |raw, v| raw.rotation_radians = Some(v));
			}
			keyword::STRETCHXEFFECT => self.effect(args, |raw, v| raw.stretch_x = Some(v)),
			keyword::STRETCHYEFFECT => self.effect(args, |raw, v| raw.stretch_y = Some(v)),
			keyword::ZOOMEFFECT => self.effect(args, |raw, v| raw.zoom = Some(v)),
			keyword::COLOREFFECT => self.color_effect(args),
			_ => match key.strip_prefix(constants::DEFAULT_PREFIX) {
				Some(attr) if DefaultAttributes::key_index(attr).is_some() => {
					if !args.is_empty() {
						self.raw.attributes.set(attr, args.join(" "));
					}
				}
				_ => return false,
			},
		}
		true
	}

	/// `SPRITE index atlas x y width height [description...]`
	fn sprite(&mut self, args: &[&str]) {
		let [index, atlas, x, y, width, height, description @ ..] = args else {
			debug!("SPRITE line too short: {args:?}");
			return;
		};
		let parsed = (
			index.parse::<i32>(),
			x.parse::<u32>(),
			y.parse::<u32>(),
			width.parse::<u32>(),
			height.parse::<u32>(),
		);
		let (Ok(index), Ok(x), Ok(y), Ok(width), Ok(height)) = parsed else {
			debug!("SPRITE line with non-numeric fields ignored: {args:?}");
			return;
		};
		self.raw.sprites.push(
			Sprite::new(index, *atlas, Rect::new(x, y, width, height))
				.with_description(description.join(" ")),
		);
	}

	/// `WAIT n` sets the current frame's length to `(n + 1) * 0.05`.
	fn wait(&mut self, args: &[&str]) {
		let Some(wait) = args.first().and_then(|v| v.parse::<u32>().ok()) else {
			debug!("WAIT without a valid count: {args:?}");
			return;
		};
		match self.raw.frames.last_mut() {
			Some(frame) => frame.set_length(constants::wait_to_length(wait)),
			None => debug!("WAIT before the first frame ignored"),
		}
	}

	/// `PLAYSOUND name [x y]`, coordinates in tiles.
	fn sound(&mut self, args: &[&str]) {
		let Some(name) = args.first() else {
			return;
		};
		let coord = |i: usize| args.get(i).and_then(|v| v.parse::<f64>().ok()).unwrap_or(0.0);
		let cue = SoundCue::from_tiles(*name, coord(1), coord(2));
		match self.raw.frames.last_mut() {
			Some(frame) => frame.add_sound(cue),
			None => debug!("PLAYSOUND before the first frame ignored"),
		}
	}

	fn effect(&mut self, args: &[&str], set: impl FnOnce(&mut RawEffects, f64)) {
		let [index, value, ..] = args else {
			return;
		};
		let (Ok(index), Ok(value)) = (index.parse::<i32>(), value.parse::<f64>()) else {
			debug!("effect line with non-numeric fields ignored: {args:?}");
			return;
		};
		if !value.is_finite() {
			debug!("effect line with non-finite value ignored: {args:?}");
			return;
		}
		set(self.raw.effects.entry(index).or_default(), value);
	}

	/// `COLOREFFECT index r g b a [mode]`
	fn color_effect(&mut self, args: &[&str]) {
		let [index, r, g, b, a, rest @ ..] = args else {
			return;
		};
		let Ok(index) = index.parse::<i32>() else {
			return;
		};
		let channels: Result<Vec<f64>, _> = [r, g, b, a].iter().map(|v| v.parse::<f64>()).collect();
		let Ok(channels) = channels else {
			debug!("COLOREFFECT with non-numeric channels ignored: {args:?}");
			return;
		};
		if !channels.iter().copied().all(f64::is_finite) {
			debug!("COLOREFFECT with non-finite channels ignored: {args:?}");
			return;
		}
		let mode = rest
			.first()
			.and_then(|v| v.parse::<u8>().ok())
			.and_then(ColorMode::from_u8)
			.unwrap_or_default();
		let color = ColorEffect::new(channels[0], channels[1], channels[2], channels[3]);
		self.raw.effects.entry(index).or_default().color = Some((color, mode));
	}

	/// A placement line inside `ANI`: `index x y, index x y, ...`
	fn frame_part(&mut self, line: &str) {
		let tokens: Vec<&str> =
			line.split(|c: char| c.is_whitespace() || c == ',').filter(|t| !t.is_empty()).collect();
		let placements: Vec<Placement> = tokens
			.chunks_exact(3)
			.filter_map(|triple| {
				match (triple[0].parse::<i32>(), triple[1].parse::<i32>(), triple[2].parse::<i32>()) {
					(Ok(sprite), Ok(x), Ok(y)) => Some(Placement::new(sprite, x, y)),
					_ => {
						debug!("bad placement {triple:?} skipped");
						None
					}
				}
			})
			.collect();
		let part = FramePart::from_placements(placements);

		if self.raw.single_direction {
			let mut frame = Frame::new();
			frame.set_part(Direction::Up, part);
			self.raw.frames.push(frame);
			return;
		}

		if self.cursor == Direction::Up || self.raw.frames.is_empty() {
			self.raw.frames.push(Frame::new());
		}
		if let Some(frame) = self.raw.frames.last_mut() {
			frame.set_part(self.cursor, part);
		}
		self.cursor = self.cursor.next();
	}
}
