//! GANI animation utility.
//!
//! Provides four subcommands:
//! - `inspect`: summarise an animation script (or dump it as JSON).
//! - `fmt`: parse a script and write it back in canonical form.
//! - `slice`: detect the sprite bounds around a pixel of an atlas image.
//! - `render`: render every sprite of an animation into PNG files.

use std::{fs, path::PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use gani_rs::prelude::*;
use log::info;

fn main() -> Result<()> {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let cli = Cli::parse();
	match cli.command {
		Command::Inspect(opts) => run_inspect(opts),
		Command::Fmt(opts) => run_fmt(opts),
		Command::Slice(opts) => run_slice(opts),
		Command::Render(opts) => run_render(opts),
	}
}

#[derive(Parser)]
#[command(name = "gani_utils")]
#[command(author = "gani-rs project")]
#[command(version)]
#[command(about = "Inspect, format and render gani animation scripts", long_about = None)]
struct Cli {
	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand)]
enum Command {
	/// Print a summary of an animation script
	Inspect(InspectArgs),
	/// Re-serialise an animation script
	Fmt(FmtArgs),
	/// Find the bounding box of the sprite under a pixel
	Slice(SliceArgs),
	/// Render every sprite of an animation to PNG files
	Render(RenderArgs),
}

#[derive(Args)]
struct InspectArgs {
	/// Path to a .gani file
	#[arg(value_name = "FILE")]
	file: PathBuf,

	/// Dump the whole document as JSON
	#[arg(long, default_value_t = false)]
	json: bool,
}

#[derive(Args)]
struct FmtArgs {
	/// Path to a .gani file
	#[arg(value_name = "FILE")]
	file: PathBuf,

	/// Output path, prints to stdout when omitted
	#[arg(short, long, value_name = "OUT")]
	output: Option<PathBuf>,
}

#[derive(Args)]
struct SliceArgs {
	/// Atlas image
	#[arg(value_name = "ATLAS")]
	atlas: PathBuf,

	/// Seed x coordinate
	#[arg(value_name = "X")]
	x: u32,

	/// Seed y coordinate
	#[arg(value_name = "Y")]
	y: u32,

	/// Stop after visiting this many pixels
	#[arg(long, value_name = "COUNT")]
	max_pixels: Option<usize>,
}

#[derive(Args)]
struct RenderArgs {
	/// Path to a .gani file
	#[arg(value_name = "FILE")]
	file: PathBuf,

	/// Configuration file (TOML)
	#[arg(short, long, value_name = "CONFIG")]
	config: Option<PathBuf>,

	/// Game folder, overrides the configuration
	#[arg(short, long, value_name = "DIR", env = "GANI_GAME_FOLDER")]
	game_folder: Option<PathBuf>,

	/// Output directory
	#[arg(short, long, value_name = "DIR", default_value = "bin/gani_render")]
	out: PathBuf,
}

fn run_inspect(args: InspectArgs) -> Result<()> {
	let ani = Animation::open(&args.file).with_context(|| format!("Failed to read {}", args.file.display()))?;

	if args.json {
		println!("{}", serde_json::to_string_pretty(&ani)?);
		return Ok(());
	}

	let flags = ani.flags();
	println!("{}", args.file.display());
	println!("  frames:            {}", ani.frame_count());
	println!("  total length:      {:.2}s", ani.frames().iter().map(Frame::length).sum::<f64>());
	println!("  sprites:           {}", ani.sprites().len());
	println!(
		"  flags:             loop={} continuous={} single_direction={}",
		flags.looped, flags.continuous, flags.single_direction
	);
	if !ani.setbackto().is_empty() {
		println!("  setbackto:         {}", ani.setbackto());
	}
	for (key, value) in ani.attributes().iter().filter(|(_, value)| !value.is_empty()) {
		println!("  default {key:<10} {value}");
	}
	println!("  script lines:      {}", ani.script().lines().count());

	for sprite in ani.sprites() {
		let marker = if sprite.effects.is_identity() {
			""
		} else {
			" (effects)"
		};
		println!("    {sprite}{marker}");
	}

	let sounds: usize = ani.frames().iter().map(|frame| frame.sounds().len()).sum();
	println!("  sound cues:        {sounds}");
	Ok(())
}

fn run_fmt(args: FmtArgs) -> Result<()> {
	let ani = Animation::open(&args.file).with_context(|| format!("Failed to read {}", args.file.display()))?;
	match args.output {
		Some(path) => {
			ani.save(&path).with_context(|| format!("Failed to write {}", path.display()))?;
			info!("wrote {}", path.display());
		}
		None => print!("{}", ani.to_text()),
	}
	Ok(())
}

fn run_slice(args: SliceArgs) -> Result<()> {
	let atlas = image::open(&args.atlas)
		.with_context(|| format!("Failed to decode {}", args.atlas.display()))?
		.to_rgba8();
	let config = match args.max_pixels {
		Some(0) => bail!("max-pixels must be greater than zero"),
		Some(limit) => SliceConfig::new(limit),
		None => SliceConfig::unbounded(),
	};

	match detect_bounds(&atlas, args.x, args.y, config)? {
		Some(rect) => println!(
			"SPRITE\t<index>\t{}\t{}\t{}\t{}\t{}",
			args.atlas.file_name().and_then(|n| n.to_str()).unwrap_or("SPRITES"),
			rect.x,
			rect.y,
			rect.width,
			rect.height
		),
		None => println!("({}, {}) is transparent", args.x, args.y),
	}
	Ok(())
}

fn run_render(args: RenderArgs) -> Result<()> {
	let mut config = EditorConfig::load(args.config.as_ref())?;
	if let Some(folder) = args.game_folder {
		config.game_folder = folder;
	}

	let ani = Animation::open(&args.file).with_context(|| format!("Failed to read {}", args.file.display()))?;
	let folder = GameFolder::from_config(&config)
		.with_context(|| format!("Failed to index {}", config.game_folder.display()))?;

	fs::create_dir_all(&args.out).with_context(|| format!("Failed to create {}", args.out.display()))?;
	let rendered = load_sprite_images(&ani, &folder);

	let mut indices: Vec<&i32> = rendered.keys().collect();
	indices.sort();
	for index in indices {
		let sprite = &rendered[index];
		let path = args.out.join(format!("sprite_{index}.png"));
		sprite.image.save(&path).with_context(|| format!("Failed to write {}", path.display()))?;
		println!(
			"{:>6}  {}x{}  offset ({}, {})  {}",
			index,
			sprite.image.width(),
			sprite.image.height(),
			sprite.offset.x,
			sprite.offset.y,
			path.display()
		);
	}
	Ok(())
}
