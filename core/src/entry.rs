use crate::path;

use std::fs::Metadata;

use serde::{Deserialize, Serialize};

/// A file or a folder, seen through the repository virtual namespace.
///
/// Entries are built from live filesystem state on every lookup and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Entry {
	File(FileEntry),
	Folder(FolderEntry),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
	pub id: String,
	pub name: String,
	pub parent_id: String,
	pub content_type: String,
	pub size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderEntry {
	pub id: String,
	pub name: String,
	pub parent_id: String,
}

impl Entry {
	/// Builds the view of `id` out of its (non followed) filesystem metadata.
	#[must_use]
	pub fn new(id: String, metadata: &Metadata) -> Self {
		let name = path::entry_name(&id);
		let parent_id = path::parent_id(&id);

		if metadata.is_dir() {
			Self::Folder(FolderEntry {
				id,
				name,
				parent_id,
			})
		} else {
			Self::File(FileEntry {
				content_type: path::content_type(&id),
				size: metadata.len(),
				id,
				name,
				parent_id,
			})
		}
	}

	#[must_use]
	pub fn id(&self) -> &str {
		match self {
			Self::File(FileEntry { id, .. }) | Self::Folder(FolderEntry { id, .. }) => id,
		}
	}

	#[must_use]
	pub fn name(&self) -> &str {
		match self {
			Self::File(FileEntry { name, .. }) | Self::Folder(FolderEntry { name, .. }) => name,
		}
	}

	#[must_use]
	pub fn parent_id(&self) -> &str {
		match self {
			Self::File(FileEntry { parent_id, .. })
			| Self::Folder(FolderEntry { parent_id, .. }) => parent_id,
		}
	}

	#[must_use]
	pub const fn is_folder(&self) -> bool {
		matches!(self, Self::Folder(_))
	}

	#[must_use]
	pub const fn is_file(&self) -> bool {
		matches!(self, Self::File(_))
	}
}
