use crate::{
	config::{ConfigError, RepositoryConfig},
	entry::Entry,
	error::Result,
	metadata::{Attribute, MetaData},
	path,
};

use aspan_utils::FileIOError;

use std::{
	path::{Path, PathBuf},
	sync::Arc,
};

use async_trait::async_trait;
use tokio::fs;
use tracing::info;

/// Operations offered to the query layer, one independent unit of failure each.
///
/// Implemented by [`FileSystemRepository`]; consumers hold it as `Arc<dyn EntryRepository>` so
/// another storage can stand in for tests or for a different metadata backend.
#[async_trait]
pub trait EntryRepository: Send + Sync {
	async fn get_entry(&self, id: &str) -> Result<Entry>;

	async fn get_folder_entries(&self, id: &str) -> Result<Vec<Entry>>;

	async fn find_entries(&self, pattern: &str) -> Result<Vec<Entry>>;

	async fn get_metadata(&self, id: &str) -> Result<Option<MetaData>>;

	async fn set_metadata(&self, id: &str, metadata: MetaData) -> Result<MetaData>;

	async fn add_tag(&self, id: &str, tag: &str) -> Result<MetaData>;

	async fn remove_tag(&self, id: &str, tag: &str) -> Result<MetaData>;

	async fn add_attribute(&self, id: &str, attribute: Attribute) -> Result<MetaData>;

	async fn remove_attribute(&self, id: &str, key: &str) -> Result<MetaData>;

	async fn make_thumbnail(&self, id: &str) -> Result<()>;

	async fn get_base64_image(&self, id: &str) -> Result<String>;

	async fn get_base64_thumbnail(&self, id: &str) -> Result<Option<String>>;
}

/// Entry repository backed by a directory on the local filesystem, annotations kept in shadow
/// folders next to the entries they describe.
#[derive(Debug, Clone)]
pub struct FileSystemRepository {
	pub(crate) config: Arc<RepositoryConfig>,
}

impl FileSystemRepository {
	pub fn new(config: RepositoryConfig) -> std::result::Result<Self, ConfigError> {
		config.validate()?;

		Ok(Self {
			config: Arc::new(config),
		})
	}

	#[must_use]
	pub fn config(&self) -> &RepositoryConfig {
		&self.config
	}

	#[must_use]
	pub fn root(&self) -> &Path {
		&self.config.path
	}

	#[must_use]
	pub fn real_path(&self, id: &str) -> PathBuf {
		path::real_path(&self.config.path, id)
	}

	#[must_use]
	pub fn shadow_folder(&self, id: &str) -> PathBuf {
		self.real_path(&path::shadow_folder(id, &self.config.meta_folder))
	}

	#[must_use]
	pub fn metadata_path(&self, id: &str) -> PathBuf {
		self.real_path(&path::metadata_path(id, &self.config.meta_folder))
	}

	#[must_use]
	pub fn thumbnail_path(&self, id: &str) -> PathBuf {
		self.real_path(&path::thumbnail_path(
			id,
			&self.config.meta_folder,
			&self.config.thumbs_prefix,
		))
	}

	/// Wipes everything under the repository root, leaving an existing but empty directory behind.
	pub async fn empty(&self) -> Result<()> {
		let root = self.root();

		match fs::remove_dir_all(root).await {
			Ok(()) => {}
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
			Err(e) => return Err(FileIOError::from((root, e, "failed to empty repository")).into()),
		}

		fs::create_dir_all(root)
			.await
			.map_err(|e| FileIOError::from((root, e, "failed to create repository root")))?;

		info!(root = %root.display(), "Emptied repository");

		Ok(())
	}
}

#[async_trait]
impl EntryRepository for FileSystemRepository {
	async fn get_entry(&self, id: &str) -> Result<Entry> {
		Self::get_entry(self, id).await
	}

	async fn get_folder_entries(&self, id: &str) -> Result<Vec<Entry>> {
		Self::get_folder_entries(self, id).await
	}

	async fn find_entries(&self, pattern: &str) -> Result<Vec<Entry>> {
		Self::find_entries(self, pattern).await
	}

	async fn get_metadata(&self, id: &str) -> Result<Option<MetaData>> {
		Self::get_metadata(self, id).await
	}

	async fn set_metadata(&self, id: &str, metadata: MetaData) -> Result<MetaData> {
		Self::set_metadata(self, id, metadata).await
	}

	async fn add_tag(&self, id: &str, tag: &str) -> Result<MetaData> {
		Self::add_tag(self, id, tag).await
	}

	async fn remove_tag(&self, id: &str, tag: &str) -> Result<MetaData> {
		Self::remove_tag(self, id, tag).await
	}

	async fn add_attribute(&self, id: &str, attribute: Attribute) -> Result<MetaData> {
		Self::add_attribute(self, id, attribute).await
	}

	async fn remove_attribute(&self, id: &str, key: &str) -> Result<MetaData> {
		Self::remove_attribute(self, id, key).await
	}

	async fn make_thumbnail(&self, id: &str) -> Result<()> {
		Self::make_thumbnail(self, id).await
	}

	async fn get_base64_image(&self, id: &str) -> Result<String> {
		Self::get_base64_image(self, id).await
	}

	async fn get_base64_thumbnail(&self, id: &str) -> Result<Option<String>> {
		Self::get_base64_thumbnail(self, id).await
	}
}
