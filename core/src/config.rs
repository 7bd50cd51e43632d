use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_META_FOLDER: &str = ".aspan";
pub const DEFAULT_THUMBS_PREFIX: &str = "thumb_";
pub const DEFAULT_THUMBS_LENGTH: u32 = 200;
pub const DEFAULT_THUMBS_WIDTH: u32 = 200;
pub const DEFAULT_EXTS: [&str; 1] = ["jpg"];
pub const DEFAULT_WALK_CONCURRENCY: usize = 16;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
	#[error("the metadata folder name must be a non empty single path segment: '{0}'")]
	InvalidMetaFolder(String),
	#[error("the thumbnail prefix must not contain path separators: '{0}'")]
	InvalidThumbsPrefix(String),
	#[error("thumbnail dimensions must be positive: <width={width}, length={length}>")]
	InvalidThumbsSize { width: u32, length: u32 },
	#[error("walk concurrency must be at least 1")]
	InvalidWalkConcurrency,
}

/// Everything a repository needs to know about where it lives and how it derives its files.
///
/// It is handed to the repository at construction, so independent repositories can live side
/// by side in the same process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryConfig {
	/// File system location where the repository is located.
	pub path: PathBuf,
	#[serde(default = "default_meta_folder")]
	pub meta_folder: String,
	#[serde(default = "default_thumbs_prefix")]
	pub thumbs_prefix: String,
	#[serde(default = "default_thumbs_length")]
	pub thumbs_length: u32,
	#[serde(default = "default_thumbs_width")]
	pub thumbs_width: u32,
	/// Extensions of the files shown in folder listings.
	#[serde(default = "default_exts")]
	pub exts: Vec<String>,
	/// Sibling entries visited at once, per folder, by the tree walker.
	#[serde(default = "default_walk_concurrency")]
	pub walk_concurrency: usize,
}

impl RepositoryConfig {
	#[must_use]
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self {
			path: path.into(),
			meta_folder: default_meta_folder(),
			thumbs_prefix: default_thumbs_prefix(),
			thumbs_length: default_thumbs_length(),
			thumbs_width: default_thumbs_width(),
			exts: default_exts(),
			walk_concurrency: default_walk_concurrency(),
		}
	}

	pub fn validate(&self) -> Result<(), ConfigError> {
		let has_separator = |s: &str| s.contains(['/', '\\']);

		if self.meta_folder.is_empty()
			|| has_separator(&self.meta_folder)
			|| matches!(self.meta_folder.as_str(), "." | "..")
		{
			return Err(ConfigError::InvalidMetaFolder(self.meta_folder.clone()));
		}

		if has_separator(&self.thumbs_prefix) {
			return Err(ConfigError::InvalidThumbsPrefix(self.thumbs_prefix.clone()));
		}

		if self.thumbs_width == 0 || self.thumbs_length == 0 {
			return Err(ConfigError::InvalidThumbsSize {
				width: self.thumbs_width,
				length: self.thumbs_length,
			});
		}

		if self.walk_concurrency == 0 {
			return Err(ConfigError::InvalidWalkConcurrency);
		}

		Ok(())
	}

	/// Whether files with this content type show up in folder listings.
	#[must_use]
	pub fn allows_content_type(&self, content_type: &str) -> bool {
		self.exts.iter().any(|ext| {
			ext.strip_prefix('.')
				.unwrap_or(ext)
				.eq_ignore_ascii_case(content_type)
		})
	}
}

fn default_meta_folder() -> String {
	DEFAULT_META_FOLDER.to_string()
}

fn default_thumbs_prefix() -> String {
	DEFAULT_THUMBS_PREFIX.to_string()
}

const fn default_thumbs_length() -> u32 {
	DEFAULT_THUMBS_LENGTH
}

const fn default_thumbs_width() -> u32 {
	DEFAULT_THUMBS_WIDTH
}

fn default_exts() -> Vec<String> {
	DEFAULT_EXTS.iter().map(ToString::to_string).collect()
}

const fn default_walk_concurrency() -> usize {
	DEFAULT_WALK_CONCURRENCY
}
