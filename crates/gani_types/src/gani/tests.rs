//! Unit tests for the animation text format

use super::*;
use crate::{atlas::render_sprite, error::GaniError, geometry::Rect};

const IDLE: &str = "\
SPRITE\t0\tSPRITES\t0\t0\t32\t32\tshadow
SPRITE\t1\tBODY\t0\t64\t32\t32\tbody
SPRITE\t-2\tHEAD\t0\t0\t32\t32
SETBACKTO idle
DEFAULTHEAD head19.png
DEFAULTBODY body3.png
LOOP
ANI
0 0 24, 1 0 0, -2 0 -16
0 0 24, 1 32 0
0 0 24, 1 64 0, -2 32 -16
0 0 24, 1 96 0
WAIT 4

,
0 0 24
0 0 24
0 0 24
PLAYSOUND step.wav 0.5 1
ANIEND
";

fn sample() -> Animation {
	let mut ani = Animation::new();
	ani.add_sprite(Sprite::new(5, "SPRITES", Rect::new(0, 0, 16, 16)).with_description("sword slash"))
		.unwrap();
	let mut effects = EffectSet::IDENTITY;
	effects.rotation = 45.0;
	effects.stretch_x = -1.0;
	effects.zoom = 1.5;
	effects.color = ColorEffect::new(1.0, 0.5, 0.25, 0.8);
	effects.mode = ColorMode::Inverse;
	ani.add_sprite(Sprite::new(6, "ATTR1", Rect::new(8, 8, 24, 12)).with_effects(effects)).unwrap();

	ani.place_sprite(0, Direction::Down, Placement::new(5, 10, 20)).unwrap();
	ani.place_sprite(0, Direction::Down, Placement::new(6, -3, 4)).unwrap();
	ani.place_sprite(0, Direction::Up, Placement::new(6, 0, 0)).unwrap();
	ani.frame_mut(0).unwrap().set_length(0.3);
	ani.frame_mut(0).unwrap().add_sound(SoundCue::new("swing.wav", 16.0, 8.0));

	ani.add_frame(0, FrameSide::Right, None).unwrap();
	ani.place_sprite(1, Direction::Right, Placement::new(5, 1, 2)).unwrap();

	ani.set_setbackto("walk");
	ani.set_attr("ATTR1", "hat0.png");
	ani.set_attr("param2", "blue");
	ani.set_flag(Flag::Continuous, true).unwrap();
	ani.set_script("function onPlayerEnters() {\n\n  echo(1);\n}");
	ani
}

fn assert_equivalent(a: &Animation, b: &Animation) {
	assert_eq!(a.frame_count(), b.frame_count());
	for (fa, fb) in a.frames().iter().zip(b.frames()) {
		assert!((fa.length() - fb.length()).abs() < 1e-9);
		assert_eq!(fa.sounds(), fb.sounds());
		for direction in Direction::ALL {
			assert_eq!(fa.part(direction), fb.part(direction), "{direction}");
		}
	}
	assert_eq!(a.sprites().len(), b.sprites().len());
	for (sa, sb) in a.sprites().iter().zip(b.sprites()) {
		assert_eq!(sa.index, sb.index);
		assert_eq!(sa.atlas_name, sb.atlas_name);
		assert_eq!(sa.region, sb.region);
		assert_eq!(sa.description, sb.description);
		assert!((sa.effects.rotation - sb.effects.rotation).abs() < 1e-9);
		assert_eq!(sa.effects.stretch_x, sb.effects.stretch_x);
		assert_eq!(sa.effects.stretch_y, sb.effects.stretch_y);
		assert_eq!(sa.effects.zoom, sb.effects.zoom);
		assert_eq!(sa.effects.color, sb.effects.color);
		assert_eq!(sa.effects.mode, sb.effects.mode);
	}
	assert_eq!(a.flags(), b.flags());
	assert_eq!(a.attributes(), b.attributes());
	assert_eq!(a.setbackto(), b.setbackto());
	assert_eq!(a.script(), b.script());
}

#[test_log::test]
fn test_parse_idle() {
	let ani = Animation::from_text(IDLE);

	assert_eq!(ani.sprites().len(), 3);
	assert_eq!(ani.sprite(-2).unwrap().atlas_name, "HEAD");
	assert_eq!(ani.sprite(1).unwrap().description, "body");
	assert_eq!(ani.setbackto(), "idle");
	assert_eq!(ani.attr("head"), Some("head19.png"));
	assert_eq!(ani.attr("body"), Some("body3.png"));
	assert!(ani.flags().looped);

	assert_eq!(ani.frame_count(), 2);
	let first = ani.frame(0).unwrap();
	assert_eq!(first.length(), constants::wait_to_length(4));
	assert_eq!(first.part(Direction::Up).len(), 3);
	assert_eq!(first.part(Direction::Left).placements()[1], Placement::new(1, 32, 0));
	assert_eq!(first.part(Direction::Down).placements()[2], Placement::new(-2, 32, -16));

	let second = ani.frame(1).unwrap();
	assert!(second.part(Direction::Up).is_empty());
	assert_eq!(second.part(Direction::Right).len(), 1);
	assert_eq!(second.length(), constants::MIN_FRAME_LENGTH);
	assert_eq!(second.sounds(), &[SoundCue::new("step.wav", 8.0, 16.0)]);
}

#[test]
fn test_round_trip_idle() {
	let first = Animation::from_text(IDLE);
	let second = Animation::from_text(&first.to_text());
	assert_equivalent(&first, &second);
}

#[test_log::test]
fn test_round_trip_built_document() {
	let ani = sample();
	let text = ani.to_text();
	let parsed = Animation::from_text(&text);
	assert_equivalent(&ani, &parsed);
	assert_eq!(parsed.sprite(6).unwrap().effects.mode, ColorMode::Inverse);
}

#[test]
fn test_down_part_example() {
	let mut ani = Animation::new();
	ani.add_sprite(Sprite::new(5, "SPRITES", Rect::new(0, 0, 16, 16))).unwrap();
	ani.place_sprite(0, Direction::Down, Placement::new(5, 10, 20)).unwrap();
	ani.frame_mut(0).unwrap().set_length(0.10);

	let text = ani.to_text();
	assert!(text.lines().any(|line| line == "5\t10\t20"));
	assert!(text.lines().any(|line| line == "WAIT\t1"));

	let parsed = Animation::from_text(&text);
	assert_eq!(parsed.frame_count(), 1);
	assert_eq!(parsed.frames(), ani.frames());
}

#[test]
fn test_writer_layout() {
	let text = sample().to_text();
	let lines: Vec<&str> = text.lines().collect();

	assert_eq!(lines[0], "SPRITE\t5\tSPRITES\t0\t0\t16\t16\tsword slash");
	assert_eq!(lines[1], "SPRITE\t6\tATTR1\t8\t8\t24\t12");
	assert_eq!(lines[2], "");
	assert!(lines.contains(&"SETBACKTO walk"));
	assert!(lines.contains(&"DEFAULTATTR1 hat0.png"));
	assert!(lines.contains(&"DEFAULTPARAM2 blue"));
	assert!(lines.contains(&"CONTINUOUS"));
	assert!(!lines.contains(&"LOOP"));
	assert!(lines.contains(&"COLOREFFECT\t6\t1\t0.5\t0.25\t0.8\t2"));
	assert!(lines.contains(&"STRETCHXEFFECT\t6\t-1"));
	assert!(!lines.iter().any(|line| line.starts_with("STRETCHYEFFECT")));
	assert!(lines.contains(&"5\t10\t20,\t6\t-3\t4"));
	assert!(lines.contains(&"PLAYSOUND\tswing.wav\t1\t0.5"));
	assert!(lines.contains(&"WAIT\t5"));

	let effect_pos = lines.iter().position(|l| l.starts_with("ZOOMEFFECT")).unwrap();
	let script_pos = lines.iter().position(|l| *l == "SCRIPT").unwrap();
	let ani_pos = lines.iter().position(|l| *l == "ANI").unwrap();
	assert!(effect_pos < script_pos && script_pos < ani_pos);
	assert_eq!(lines.last(), Some(&"ANIEND"));
}

#[test]
fn test_identity_sprites_have_no_effect_lines() {
	let mut ani = Animation::new();
	ani.add_sprite(Sprite::new(1, "SPRITES", Rect::new(0, 0, 4, 4))).unwrap();
	assert!(!ani.to_text().contains("EFFECT"));
}

#[test]
fn test_effects_may_precede_sprite_definition() {
	let text = "\
ZOOMEFFECT 3 2
ROTATEEFFECT 3 3.141592653589793
STRETCHYEFFECT 9 4
SPRITE 3 SPRITES 0 0 8 8
ANI
3 0 0
ANIEND
";
	let ani = Animation::from_text(text);
	let effects = &ani.sprite(3).unwrap().effects;
	assert_eq!(effects.zoom, 2.0);
	assert!((effects.rotation - 180.0).abs() < 1e-9);
	assert!(ani.sprite(9).is_none());
}

#[test]
fn test_later_effect_line_wins() {
	let text = "SPRITE 1 SPRITES 0 0 8 8\nZOOMEFFECT 1 2\nZOOMEFFECT 1 3\nCOLOREFFECT 1 0.5 0.5 0.5 1 1\n";
	let ani = Animation::from_text(text);
	let effects = &ani.sprite(1).unwrap().effects;
	assert_eq!(effects.zoom, 3.0);
	assert_eq!(effects.mode, ColorMode::Multiply);
	assert_eq!(effects.color.red, 0.5);
}

#[test]
fn test_color_effect_is_clamped_and_bad_mode_defaults() {
	let text = "SPRITE 1 SPRITES 0 0 8 8\nCOLOREFFECT 1 2 -1 0.5 1 7\n";
	let ani = Animation::from_text(text);
	let effects = &ani.sprite(1).unwrap().effects;
	assert_eq!(effects.color.to_array(), [1.0, 0.0, 0.5, 1.0]);
	assert_eq!(effects.mode, ColorMode::AlphaDerived);
}

#[test_log::test]
fn test_parser_is_tolerant() {
	let text = "\
# a comment nobody understands
BOGUS 1 2 3
SPRITE 1 SPRITES 0 0
SPRITE x SPRITES 0 0 8 8
SPRITE 2 SPRITES 0 0 0 8 zero width
SPRITE 3 SPRITES 0 0 8 8
WAIT 3
PLAYSOUND early.wav
ani
3 1 1, 2 5 5, 7 7 7, 3 x 1, 3 4
3 2 2
wait banana
ANIEND
";
	let ani = Animation::from_text(text);
	assert_eq!(ani.sprites().len(), 1);
	assert!(ani.sprite(3).is_some());

	assert_eq!(ani.frame_count(), 1);
	let frame = ani.frame(0).unwrap();
	assert_eq!(frame.part(Direction::Up).placements(), &[Placement::new(3, 1, 1)]);
	assert_eq!(frame.part(Direction::Left).placements(), &[Placement::new(3, 2, 2)]);
	assert!(frame.part(Direction::Down).is_empty());
	assert_eq!(frame.length(), constants::MIN_FRAME_LENGTH);
	assert!(frame.sounds().is_empty());
}

#[test]
fn test_empty_text_yields_one_frame() {
	let ani = Animation::from_text("");
	assert_eq!(ani.frame_count(), 1);
	assert!(ani.sprites().is_empty());
	assert_eq!(Animation::from_text(&ani.to_text()).frame_count(), 1);
}

#[test]
fn test_loop_wins_over_continuous() {
	let ani = Animation::from_text("CONTINUOUS\nLOOP\n");
	assert!(ani.flags().looped);
	assert!(!ani.flags().continuous);
}

#[test]
fn test_all_default_attributes_are_read() {
	let text: String = constants::ATTRIBUTE_KEYS
		.iter()
		.map(|key| format!("DEFAULT{} {key}.png\n", key.to_uppercase()))
		.collect();
	let ani = Animation::from_text(&text);
	for key in constants::ATTRIBUTE_KEYS {
		assert_eq!(ani.attr(key), Some(format!("{key}.png").as_str()));
	}
	assert_equivalent(&ani, &Animation::from_text(&ani.to_text()));
}

#[test]
fn test_single_direction_lines_are_frames() {
	let text = "\
SPRITE 0 SPRITES 0 0 8 8
SINGLEDIRECTION
ANI
0 0 0
WAIT 1
0 1 1

0 2 2
ANIEND
";
	let ani = Animation::from_text(text);
	assert!(ani.flags().single_direction);
	assert_eq!(ani.frame_count(), 3);
	assert_eq!(ani.frame(0).unwrap().length(), constants::wait_to_length(1));
	assert_eq!(ani.frame(2).unwrap().part(Direction::Up).placements(), &[Placement::new(0, 2, 2)]);
	assert!(ani.frame(2).unwrap().part(Direction::Down).is_empty());

	let text = ani.to_text();
	let ani_start = text.find("ANI\n").unwrap();
	let frame_lines = text[ani_start..].lines().filter(|l| l.starts_with("0\t")).count();
	assert_eq!(frame_lines, 3);
	assert_equivalent(&ani, &Animation::from_text(&text));
}

#[test]
fn test_script_block_is_verbatim() {
	let text = "SCRIPT\nif (created) {\n\n  SPRITE 1 x 0 0 1 1\n  ANI\n}\nscriptend\n";
	let ani = Animation::from_text(text);
	assert_eq!(ani.script(), "if (created) {\n\n  SPRITE 1 x 0 0 1 1\n  ANI\n}");
	assert!(ani.sprites().is_empty());
	assert_eq!(ani.frame_count(), 1);
	assert_eq!(Animation::from_text(&ani.to_text()).script(), ani.script());
}

#[test]
fn test_dangling_placements_are_dropped() {
	let text = "SPRITE 1 SPRITES 0 0 8 8\nANI\n1 0 0, 2 0 0\nANIEND\n";
	let ani = Animation::from_text(text);
	assert_eq!(ani.frame(0).unwrap().part(Direction::Up).placements(), &[Placement::new(1, 0, 0)]);
}

#[test]
fn test_raw_scan_keeps_unapplied_effects() {
	let raw = parser::RawScript::scan("ZOOMEFFECT 4 2\nSPRITE 1 SPRITES 0 0 8 8\n");
	assert_eq!(raw.sprites.len(), 1);
	assert_eq!(raw.effects[&4].zoom, Some(2.0));
	let ani = raw.reconcile();
	assert!(ani.sprite(1).unwrap().effects.is_identity());
}

#[test]
fn test_atlas_name_with_whitespace_is_rejected() {
	let mut ani = Animation::new();
	let err = ani.add_sprite(Sprite::new(1, "my sheet.png", Rect::new(0, 0, 8, 8))).unwrap_err();
	assert!(matches!(err, GaniError::InvalidSprite { index: 1, .. }));
	assert!(ani.sprites().is_empty());
	assert!(ani.place_sprite(0, Direction::Up, Placement::new(1, 0, 0)).is_err());

	ani.add_sprite(Sprite::new(1, "my_sheet.png", Rect::new(0, 0, 8, 8))).unwrap();
	ani.place_sprite(0, Direction::Up, Placement::new(1, 4, 4)).unwrap();
	let reloaded = Animation::from_text(&ani.to_text());
	assert_eq!(reloaded.sprites().len(), 1);
	assert_eq!(reloaded.frame(0).unwrap().part(Direction::Up).placements(), &[Placement::new(1, 4, 4)]);
	assert_equivalent(&ani, &reloaded);
}

#[test]
fn test_multi_word_values_round_trip() {
	let mut ani = Animation::new();
	ani.set_setbackto("idle two");
	ani.set_attr("head", "my head.png");
	let reloaded = Animation::from_text(&ani.to_text());
	assert_eq!(reloaded.setbackto(), "idle two");
	assert_eq!(reloaded.attr("head"), Some("my head.png"));

	let parsed = Animation::from_text("SETBACKTO  idle\t two\nDEFAULTPARAM1 a b  c\n");
	assert_eq!(parsed.setbackto(), "idle two");
	assert_eq!(parsed.attr("param1"), Some("a b c"));
}

#[test]
fn test_non_finite_effects_are_ignored() {
	let text = "\
SPRITE 1 SPRITES 0 0 8 8
ZOOMEFFECT 1 inf
STRETCHXEFFECT 1 NaN
ROTATEEFFECT 1 -inf
COLOREFFECT 1 1 inf 1 1
STRETCHYEFFECT 1 2
";
	let ani = Animation::from_text(text);
	let effects = ani.sprite(1).unwrap().effects;
	assert!(effects.is_finite());
	assert_eq!(effects.zoom, 1.0);
	assert_eq!(effects.stretch_x, 1.0);
	assert_eq!(effects.rotation, 0.0);
	assert!(effects.color.is_identity());
	assert_eq!(effects.stretch_y, 2.0);

	let atlas = image::RgbaImage::new(8, 8);
	let rendered = render_sprite(ani.sprite(1).unwrap(), Some(&atlas));
	assert_eq!(rendered.image.dimensions(), (32, 32));
}

#[test]
fn test_single_direction_saves_up_parts_only() {
	let mut ani = Animation::new();
	ani.add_sprite(Sprite::new(1, "SPRITES", Rect::new(0, 0, 8, 8))).unwrap();
	for _ in 0..3 {
		ani.add_frame(0, FrameSide::Right, None).unwrap();
	}
	for (frame, direction) in Direction::ALL.into_iter().enumerate() {
		ani.place_sprite(frame, direction, Placement::new(1, frame as i32, 0)).unwrap();
	}

	assert!(ani.toggle_single_direction());
	assert!(!ani.frame(0).unwrap().part(Direction::Left).is_empty());

	let reloaded = Animation::from_text(&ani.to_text());
	let frame = reloaded.frame(0).unwrap();
	assert_eq!(frame.part(Direction::Up).placements(), &[Placement::new(1, 0, 0)]);
	assert!(frame.part(Direction::Left).is_empty());
	assert!(frame.part(Direction::Down).is_empty());
	assert!(frame.part(Direction::Right).is_empty());
}

#[test]
fn test_file_round_trip() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("sample.gani");
	let ani = sample();
	ani.save(&path).unwrap();
	let loaded = Animation::open(&path).unwrap();
	assert_equivalent(&ani, &loaded);

	let mut reader = std::io::Cursor::new(ani.to_text().into_bytes());
	assert_equivalent(&ani, &Animation::from_reader(&mut reader).unwrap());
}
