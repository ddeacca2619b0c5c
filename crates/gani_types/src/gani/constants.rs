//! Animation script constants.
//!
//! Keywords, timing quanta and the fixed attribute key table used by the
//! text format.

/// Duration of one `WAIT` step in seconds
pub const WAIT_STEP: f64 = 0.05;

/// Shortest allowed frame length in seconds
pub const MIN_FRAME_LENGTH: f64 = WAIT_STEP;

/// Pixels per tile; `PLAYSOUND` coordinates are written in tiles
pub const TILE_SIZE: f64 = 16.0;

/// The ten default-attribute keys, in serialisation order
pub const ATTRIBUTE_KEYS: [&str; 10] = [
	"head", "body", "shield", "attr1", "attr2", "attr3", "attr12", "param1", "param2", "param3",
];

/// Logical atlas name for the shared sprite sheet
pub const SPRITES_ATLAS: &str = "SPRITES";

/// File the shared sprite sheet resolves to
pub const SPRITES_FILE: &str = "sprites.png";

/// Prefix of the default-attribute directives (`DEFAULTHEAD`, `DEFAULTBODY`, ...)
pub const DEFAULT_PREFIX: &str = "DEFAULT";

/// Script keywords.
pub mod keyword {
	/// `SPRITE index atlas x y width height [description]`
	pub const SPRITE: &str = "SPRITE";
	/// `SETBACKTO name`
	pub const SETBACKTO: &str = "SETBACKTO";
	/// Looping playback flag
	pub const LOOP: &str = "LOOP";
	/// Continuous playback flag
	pub const CONTINUOUS: &str = "CONTINUOUS";
	/// Single-direction flag
	pub const SINGLEDIRECTION: &str = "SINGLEDIRECTION";
	/// Start of the embedded script block
	pub const SCRIPT: &str = "SCRIPT";
	/// End of the embedded script block
	pub const SCRIPTEND: &str = "SCRIPTEND";
	/// Start of the frame block
	pub const ANI: &str = "ANI";
	/// End of the frame block
	pub const ANIEND: &str = "ANIEND";
	/// `WAIT n`, frame length is `(n + 1) * 0.05` seconds
	pub const WAIT: &str = "WAIT";
	/// `PLAYSOUND name [x y]`
	pub const PLAYSOUND: &str = "PLAYSOUND";
	/// `ROTATEEFFECT index radians`
	pub const ROTATEEFFECT: &str = "ROTATEEFFECT";
	/// `STRETCHXEFFECT index factor`
	pub const STRETCHXEFFECT: &str = "STRETCHXEFFECT";
	/// `STRETCHYEFFECT index factor`
	pub const STRETCHYEFFECT: &str = "STRETCHYEFFECT";
	/// `ZOOMEFFECT index factor`
	pub const ZOOMEFFECT: &str = "ZOOMEFFECT";
	/// `COLOREFFECT index r g b a [mode]`
	pub const COLOREFFECT: &str = "COLOREFFECT";
}

/// Converts a frame length in seconds to the integer written after `WAIT`.
pub fn length_to_wait(length: f64) -> u32 {
	let steps = (length / WAIT_STEP).round() - 1.0;
	if steps <= 0.0 {
		0
	} else {
		steps as u32
	}
}

/// Converts the integer written after `WAIT` to a frame length in seconds.
pub fn wait_to_length(wait: u32) -> f64 {
	(f64::from(wait) + 1.0) * WAIT_STEP
}
