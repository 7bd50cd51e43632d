use aspan_utils::FileIOError;

use std::path::Path;

use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
	// User errors
	#[error("entry not found: <id='{0}'>")]
	NotFound(String),
	#[error("invalid state: {0}")]
	InvalidState(String),
	#[error("unsupported picture <id='{id}'>: {source}")]
	UnsupportedFormat {
		id: String,
		#[source]
		source: aspan_images::Error,
	},
	#[error("invalid search pattern: {0}")]
	Pattern(#[from] globset::Error),

	// Internal errors
	#[error(transparent)]
	FileIO(#[from] FileIOError),
	#[error("failed to decode metadata sidecar '{}': {source}", .path.display())]
	MetadataDecode {
		path: Box<Path>,
		#[source]
		source: serde_json::Error,
	},
	#[error("failed to encode metadata of <id='{id}'>: {source}")]
	MetadataEncode {
		id: String,
		#[source]
		source: serde_json::Error,
	},
	#[error("failed to encode thumbnail of <id='{id}'>: {source}")]
	ThumbnailEncode {
		id: String,
		#[source]
		source: image::ImageError,
	},
	#[error("image processing task failed: {0}")]
	TaskJoin(#[from] tokio::task::JoinError),
}

/// Coarse classification of [`Error`], the one an API layer reports back to its callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
	NotFound,
	InvalidState,
	Io,
	UnsupportedFormat,
}

impl Error {
	#[must_use]
	pub const fn kind(&self) -> ErrorKind {
		match self {
			Self::NotFound(_) => ErrorKind::NotFound,
			// A malformed pattern is a malformed request, same as mutating missing metadata
			Self::InvalidState(_) | Self::Pattern(_) => ErrorKind::InvalidState,
			Self::UnsupportedFormat { .. } => ErrorKind::UnsupportedFormat,
			Self::FileIO(_)
			| Self::MetadataDecode { .. }
			| Self::MetadataEncode { .. }
			| Self::ThumbnailEncode { .. }
			| Self::TaskJoin(_) => ErrorKind::Io,
		}
	}
}
