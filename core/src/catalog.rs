use crate::{
	entry::Entry,
	error::{Error, Result},
	path::{self, ROOT_ID, SEPARATOR},
	repository::FileSystemRepository,
};

use aspan_utils::FileIOError;

use std::{collections::VecDeque, path::Path};

use futures_concurrency::future::TryJoin;
use globset::{GlobBuilder, GlobMatcher};
use tokio::fs;
use tracing::{instrument, trace, warn};

const TO_WALK_QUEUE_INITIAL_CAPACITY: usize = 32;
const FOUND_IDS_BUFFER_INITIAL_CAPACITY: usize = 64;

impl FileSystemRepository {
	/// Stats `id` without following symlinks. Anything that can't be stat'ed is reported as not found.
	#[instrument(skip(self), err)]
	pub async fn get_entry(&self, id: &str) -> Result<Entry> {
		let id = path::normalize_id(id);
		let real_path = self.real_path(&id);

		match fs::symlink_metadata(&real_path).await {
			Ok(metadata) => Ok(Entry::new(id, &metadata)),
			Err(e) => {
				trace!(real_path = %real_path.display(), "Failed to stat entry: {e:#?}");
				Err(Error::NotFound(id))
			}
		}
	}

	/// Visible children of the folder `id`, in filesystem listing order.
	///
	/// The shadow folder and dot-prefixed names are skipped, and files whose content type isn't
	/// in the configured allow list are filtered out. Folders are always listed.
	#[instrument(skip(self), err)]
	pub async fn get_folder_entries(&self, id: &str) -> Result<Vec<Entry>> {
		let folder = self.get_entry(id).await?;
		if !folder.is_folder() {
			return Err(Error::NotFound(folder.id().to_string()));
		}

		let child_ids = self.list_child_ids(folder.id()).await?;

		let entries = child_ids
			.iter()
			.map(|child_id| self.get_entry(child_id))
			.collect::<Vec<_>>()
			.try_join()
			.await?;

		Ok(entries
			.into_iter()
			.filter(|entry| match entry {
				Entry::File(file) => self.config.allows_content_type(&file.content_type),
				Entry::Folder(_) => true,
			})
			.collect())
	}

	/// Every visible entry below the root whose id matches the glob `pattern`.
	///
	/// Patterns are anchored at the root: `*` stays within a single segment, `**` crosses any
	/// number of them and `{a,b}` picks alternatives.
	#[instrument(skip(self), err)]
	pub async fn find_entries(&self, pattern: &str) -> Result<Vec<Entry>> {
		let matcher = compile_pattern(pattern)?;

		let mut to_walk = VecDeque::with_capacity(TO_WALK_QUEUE_INITIAL_CAPACITY);
		to_walk.push_back(ROOT_ID.to_string());
		let mut found_ids = Vec::with_capacity(FOUND_IDS_BUFFER_INITIAL_CAPACITY);

		while let Some(folder_id) = to_walk.pop_front() {
			let folder_path = self.real_path(&folder_id);
			let mut read_dir = fs::read_dir(&folder_path)
				.await
				.map_err(|e| FileIOError::from((&folder_path, e, "failed to read directory")))?;

			while let Some(dir_entry) = read_dir
				.next_entry()
				.await
				.map_err(|e| FileIOError::from((&folder_path, e, "failed to read directory entry")))?
			{
				let Some(child_id) = self.visible_child_id(&folder_id, &dir_entry.path()) else {
					continue;
				};

				let file_type = dir_entry.file_type().await.map_err(|e| {
					FileIOError::from((dir_entry.path(), e, "failed to get file type"))
				})?;

				if matcher.is_match(&child_id) {
					trace!(%child_id, "Pattern matched");
					found_ids.push(child_id.clone());
				}

				if file_type.is_dir() {
					to_walk.push_back(child_id);
				}
			}
		}

		found_ids
			.iter()
			.map(|id| self.get_entry(id))
			.collect::<Vec<_>>()
			.try_join()
			.await
	}

	async fn list_child_ids(&self, folder_id: &str) -> Result<Vec<String>> {
		let folder_path = self.real_path(folder_id);
		let mut read_dir = fs::read_dir(&folder_path)
			.await
			.map_err(|e| FileIOError::from((&folder_path, e, "failed to read directory")))?;

		let mut child_ids = vec![];
		while let Some(dir_entry) = read_dir
			.next_entry()
			.await
			.map_err(|e| FileIOError::from((&folder_path, e, "failed to read directory entry")))?
		{
			if let Some(child_id) = self.visible_child_id(folder_id, &dir_entry.path()) {
				child_ids.push(child_id);
			}
		}

		Ok(child_ids)
	}

	fn visible_child_id(&self, folder_id: &str, child_path: &Path) -> Option<String> {
		let Some(name) = child_path.file_name().and_then(|name| name.to_str()) else {
			warn!(
				child_path = %child_path.display(),
				"Skipping entry with a non UTF-8 name"
			);
			return None;
		};

		(!path::is_hidden_name(name, &self.config.meta_folder))
			.then(|| path::join_id(folder_id, name))
	}
}

fn compile_pattern(pattern: &str) -> Result<GlobMatcher> {
	let pattern = path::canonicalize(pattern);
	let pattern = if pattern.starts_with(SEPARATOR) {
		pattern
	} else {
		format!("{SEPARATOR}{pattern}")
	};

	Ok(GlobBuilder::new(&pattern)
		.literal_separator(true)
		.build()?
		.compile_matcher())
}
