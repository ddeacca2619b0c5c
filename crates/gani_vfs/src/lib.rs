//! Host-side file lookup for the `gani-rs` project.
//!
//! Animations refer to atlases and sounds by logical name only. This crate
//! indexes a game folder on disk so those names can be turned into paths, and
//! loads the editor configuration that says where that folder is.
//!
//! # Examples
//!
//! ```no_run
//! use gani_types::{atlas::load_sprite_images, gani::Animation};
//! use gani_vfs::{EditorConfig, GameFolder};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = EditorConfig::load(Some("gani.toml"))?;
//! let folder = GameFolder::from_config(&config)?;
//!
//! let ani = Animation::open("idle.gani")?;
//! let sprites = load_sprite_images(&ani, &folder);
//! println!("rendered {} sprites", sprites.len());
//! # Ok(())
//! # }
//! ```

use std::{
	collections::HashMap,
	path::{Path, PathBuf},
};

use gani_types::atlas::{AtlasResolver, SliceConfig};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use walkdir::WalkDir;

/// Environment variable prefix for configuration overrides (`GANI_GAME_FOLDER`, ...)
pub const ENV_PREFIX: &str = "GANI";

/// Errors raised while loading configuration or indexing a game folder.
#[derive(Debug, Error)]
pub enum VfsError {
	/// The configured game folder is missing or not a directory
	#[error("{} is not a directory", .0.display())]
	NotADirectory(PathBuf),

	/// Directory traversal failed
	#[error(transparent)]
	Walk(#[from] walkdir::Error),

	/// Configuration could not be read or deserialised
	#[error(transparent)]
	Config(#[from] config::ConfigError),

	/// IO error
	#[error(transparent)]
	Io(#[from] std::io::Error),
}

/// Editor settings.
///
/// Read from an optional TOML file, then overridden by `GANI_*` environment
/// variables. Every field has a default, so an empty source is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
	/// Folder searched for atlases and sounds
	pub game_folder: PathBuf,
	/// Visit budget for sprite boundary detection, unbounded when absent
	pub max_slice_pixels: Option<usize>,
	/// Whether the folder index descends into sub-directories
	pub recursive: bool,
}

impl Default for EditorConfig {
	fn default() -> Self {
		Self {
			game_folder: PathBuf::from("."),
			max_slice_pixels: None,
			recursive: true,
		}
	}
}

impl EditorConfig {
	/// Loads the configuration.
	///
	/// `path` may be omitted or point to a file that does not exist; the
	/// defaults and environment overrides still apply.
	///
	/// # Errors
	///
	/// Returns [`VfsError::Config`] if the file is malformed or a value has the
	/// wrong type.
	pub fn load(path: Option<impl AsRef<Path>>) -> Result<Self, VfsError> {
		let mut builder = config::Config::builder();
		if let Some(path) = path {
			builder = builder.add_source(config::File::from(path.as_ref()).required(false));
		}
		let settings = builder
			.add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
			.build()?;
		Ok(settings.try_deserialize()?)
	}

	/// Boundary detector limits derived from this configuration.
	pub fn slice_config(&self) -> SliceConfig {
		SliceConfig {
			max_visited: self.max_slice_pixels,
		}
	}
}

/// An index of the files under a game folder, looked up by name.
///
/// A logical name matches a file when it equals either the file name or the
/// file stem, ignoring ASCII case. Files are visited in sorted path order and
/// the first match wins, so lookups are deterministic.
#[derive(Debug, Clone)]
pub struct GameFolder {
	root: PathBuf,
	by_name: HashMap<String, PathBuf>,
	by_stem: HashMap<String, PathBuf>,
}

impl GameFolder {
	/// Indexes `root`.
	///
	/// # Errors
	///
	/// Returns [`VfsError::NotADirectory`] if `root` is not a directory, or
	/// [`VfsError::Walk`] if traversal fails.
	pub fn scan(root: impl Into<PathBuf>, recursive: bool) -> Result<Self, VfsError> {
		let root = root.into();
		if !root.is_dir() {
			return Err(VfsError::NotADirectory(root));
		}
		let max_depth = if recursive {
			usize::MAX
		} else {
			1
		};

		let mut by_name = HashMap::new();
		let mut by_stem = HashMap::new();
		for entry in WalkDir::new(&root).max_depth(max_depth).follow_links(false).sort_by_file_name() {
			let entry = entry?;
			if !entry.file_type().is_file() {
				continue;
			}
			let path = entry.into_path();
			if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
				by_name.entry(name.to_ascii_lowercase()).or_insert_with(|| path.clone());
			}
			if let Some(stem) = path.file_stem().and_then(|n| n.to_str()) {
				by_stem.entry(stem.to_ascii_lowercase()).or_insert_with(|| path.clone());
			}
		}
		info!("indexed {} files under {}", by_name.len(), root.display());

		Ok(Self {
			root,
			by_name,
			by_stem,
		})
	}

	/// Indexes the folder named by an [`EditorConfig`].
	///
	/// # Errors
	///
	/// See [`GameFolder::scan`].
	pub fn from_config(config: &EditorConfig) -> Result<Self, VfsError> {
		Self::scan(&config.game_folder, config.recursive)
	}

	/// The indexed folder.
	pub fn root(&self) -> &Path {
		&self.root
	}

	/// Number of distinct file names indexed.
	pub fn len(&self) -> usize {
		self.by_name.len()
	}

	/// Returns `true` if the folder holds no files.
	pub fn is_empty(&self) -> bool {
		self.by_name.is_empty()
	}

	/// Finds a file by logical name.
	pub fn find(&self, name: &str) -> Option<&Path> {
		let key = name.trim().to_ascii_lowercase();
		let found = self.by_name.get(&key).or_else(|| self.by_stem.get(&key));
		if found.is_none() {
			debug!("no file named {name:?} under {}", self.root.display());
		}
		found.map(PathBuf::as_path)
	}

	/// Finds a sound file by the name used in `PLAYSOUND` lines.
	pub fn find_sound(&self, name: &str) -> Option<&Path> {
		self.find(name)
	}
}

impl AtlasResolver for GameFolder {
	fn resolve(&self, file_name: &str) -> Option<PathBuf> {
		self.find(file_name).map(Path::to_path_buf)
	}
}
