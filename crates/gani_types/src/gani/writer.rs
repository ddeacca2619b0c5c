//! Animation script writer.
//!
//! Output layout is fixed: sprite definitions, a blank line, header
//! directives, effect lines, the optional `SCRIPT` block and finally the
//! `ANI` block. Fields are tab separated.

use std::fmt::Write;

use super::{
	animation::Animation,
	constants::{self, keyword},
	frame::{Direction, Frame, FramePart},
	sprite::{ColorMode, Sprite},
};

/// Serialises an animation to script text.
pub fn write(animation: &Animation) -> String {
	let mut out = String::new();
	// writing into a String cannot fail
	let _ = write_into(&mut out, animation);
	out
}

fn write_into(out: &mut String, animation: &Animation) -> std::fmt::Result {
	for sprite in animation.sprites() {
		write!(
			out,
			"{}\t{}\t{}\t{}\t{}\t{}\t{}",
			keyword::SPRITE,
			sprite.index,
			sprite.atlas_name,
			sprite.region.x,
			sprite.region.y,
			sprite.region.width,
			sprite.region.height
		)?;
		if !sprite.description.is_empty() {
			write!(out, "\t{}", sprite.description)?;
		}
		out.push('\n');
	}
	out.push('\n');

	if !animation.setbackto().is_empty() {
		writeln!(out, "{} {}", keyword::SETBACKTO, animation.setbackto())?;
	}
	for (key, value) in animation.attributes().iter() {
		if !value.is_empty() {
			writeln!(out, "{}{} {}", constants::DEFAULT_PREFIX, key.to_ascii_uppercase(), value)?;
		}
	}
	let flags = animation.flags();
	for (set, name) in [
		(flags.looped, keyword::LOOP),
		(flags.continuous, keyword::CONTINUOUS),
		(flags.single_direction, keyword::SINGLEDIRECTION),
	] {
		if set {
			writeln!(out, "{name}")?;
		}
	}

	for sprite in animation.sprites() {
		write_effects(out, sprite)?;
	}

	if !animation.script().is_empty() {
		writeln!(out, "{}", keyword::SCRIPT)?;
		writeln!(out, "{}", animation.script())?;
		writeln!(out, "{}", keyword::SCRIPTEND)?;
	}

	writeln!(out)?;
	writeln!(out, "{}", keyword::ANI)?;
	// single-direction frames are read back into the up part only
	let directions: &[Direction] = if flags.single_direction {
		&[Direction::Up]
	} else {
		&Direction::ALL
	};
	for (i, frame) in animation.frames().iter().enumerate() {
		if i > 0 {
			out.push('\n');
		}
		write_frame(out, frame, directions)?;
	}
	writeln!(out, "{}", keyword::ANIEND)?;
	Ok(())
}

fn write_effects(out: &mut String, sprite: &Sprite) -> std::fmt::Result {
	let effects = &sprite.effects;
	if effects.is_identity() {
		return Ok(());
	}
	let index = sprite.index;
	if effects.has_rotation() {
		writeln!(out, "{}\t{index}\t{}", keyword::ROTATEEFFECT, effects.rotation.to_radians())?;
	}
	if effects.stretch_x != 1.0 {
		writeln!(out, "{}\t{index}\t{}", keyword::STRETCHXEFFECT, effects.stretch_x)?;
	}
	if effects.stretch_y != 1.0 {
		writeln!(out, "{}\t{index}\t{}", keyword::STRETCHYEFFECT, effects.stretch_y)?;
	}
	if effects.has_zoom() {
		writeln!(out, "{}\t{index}\t{}", keyword::ZOOMEFFECT, effects.zoom)?;
	}
	if !effects.color.is_identity() || effects.mode != ColorMode::AlphaDerived {
		let [r, g, b, a] = effects.color.to_array();
		write!(out, "{}\t{index}\t{r}\t{g}\t{b}\t{a}", keyword::COLOREFFECT)?;
		if effects.mode != ColorMode::AlphaDerived {
			write!(out, "\t{}", effects.mode.to_u8())?;
		}
		out.push('\n');
	}
	Ok(())
}

fn write_frame(out: &mut String, frame: &Frame, directions: &[Direction]) -> std::fmt::Result {
	for &direction in directions {
		write_part(out, frame.part(direction))?;
	}
	for cue in frame.sounds() {
		let (x, y) = cue.tiles();
		writeln!(out, "{}\t{}\t{x}\t{y}", keyword::PLAYSOUND, cue.name)?;
	}
	let wait = constants::length_to_wait(frame.length());
	if wait > 0 {
		writeln!(out, "{}\t{wait}", keyword::WAIT)?;
	}
	Ok(())
}

/// An empty part is written as a lone `,` so the line is not skipped as blank.
fn write_part(out: &mut String, part: &FramePart) -> std::fmt::Result {
	if part.is_empty() {
		out.push_str(",\n");
		return Ok(());
	}
	for (i, placement) in part.placements().iter().enumerate() {
		if i > 0 {
			out.push_str(",\t");
		}
		write!(out, "{}\t{}\t{}", placement.sprite, placement.position.x, placement.position.y)?;
	}
	out.push('\n');
	Ok(())
}
