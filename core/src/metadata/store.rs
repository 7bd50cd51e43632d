use crate::{
	error::{Error, Result},
	repository::FileSystemRepository,
};

use aspan_utils::FileIOError;

use serde_json::error::Category;
use tokio::fs;
use tracing::{debug, instrument, trace};

use super::{transforms, Attribute, MetaData};

impl FileSystemRepository {
	/// Reads the sidecar of `id`; a missing sidecar means the entry has no metadata.
	#[instrument(skip(self), err)]
	pub async fn get_metadata(&self, id: &str) -> Result<Option<MetaData>> {
		let sidecar = self.metadata_path(id);

		let bytes = match fs::read(&sidecar)
			.await
			.map_err(|e| FileIOError::from((&sidecar, e, "failed to read metadata")))
		{
			Ok(bytes) => bytes,
			Err(e) if e.is_not_found() => {
				trace!("No metadata sidecar");
				return Ok(None);
			}
			Err(e) => return Err(e.into()),
		};

		serde_json::from_slice(&bytes)
			.map(Some)
			.map_err(|source| Error::MetadataDecode {
				path: sidecar.into_boxed_path(),
				source,
			})
	}

	/// Overwrites the sidecar of `id`. Empty values are never written, and an existing sidecar is
	/// left as it is in that case.
	#[instrument(skip(self, metadata), err)]
	pub async fn set_metadata(&self, id: &str, metadata: MetaData) -> Result<MetaData> {
		if metadata.is_empty() {
			debug!("Skipping write of empty metadata");
			return Ok(metadata);
		}

		self.write_metadata(id, metadata).await
	}

	#[instrument(skip(self), err)]
	pub async fn add_tag(&self, id: &str, tag: &str) -> Result<MetaData> {
		let metadata = transforms::add_tag(self.metadata_to_update(id).await?, tag);
		self.write_metadata(id, metadata).await
	}

	#[instrument(skip(self), err)]
	pub async fn remove_tag(&self, id: &str, tag: &str) -> Result<MetaData> {
		let metadata = transforms::remove_tag(self.metadata_to_update(id).await?, tag)?;
		// Persisted even when no tag is left
		self.write_metadata(id, metadata).await
	}

	#[instrument(skip(self, attribute), fields(key = %attribute.0), err)]
	pub async fn add_attribute(&self, id: &str, attribute: Attribute) -> Result<MetaData> {
		let metadata = transforms::add_attribute(self.metadata_to_update(id).await?, attribute);
		self.write_metadata(id, metadata).await
	}

	#[instrument(skip(self), err)]
	pub async fn remove_attribute(&self, id: &str, key: &str) -> Result<MetaData> {
		let metadata = transforms::remove_attribute(self.metadata_to_update(id).await?, key)?;
		self.write_metadata(id, metadata).await
	}

	/// Current metadata of `id` for a mutation. A sidecar that parses as JSON but doesn't have the
	/// metadata shape is reported as [`Error::InvalidState`].
	async fn metadata_to_update(&self, id: &str) -> Result<Option<MetaData>> {
		self.get_metadata(id).await.map_err(|e| match e {
			Error::MetadataDecode { path, source } if source.classify() == Category::Data => {
				Error::InvalidState(format!(
					"malformed metadata sidecar '{}': {source}",
					path.display()
				))
			}
			e => e,
		})
	}

	async fn write_metadata(&self, id: &str, metadata: MetaData) -> Result<MetaData> {
		let shadow_folder = self.shadow_folder(id);
		fs::create_dir_all(&shadow_folder)
			.await
			.map_err(|e| FileIOError::from((&shadow_folder, e, "failed to create shadow folder")))?;

		let bytes = serde_json::to_vec(&metadata).map_err(|source| Error::MetadataEncode {
			id: id.to_string(),
			source,
		})?;

		let sidecar = self.metadata_path(id);
		fs::write(&sidecar, bytes)
			.await
			.map_err(|e| FileIOError::from((&sidecar, e, "failed to write metadata")))?;

		trace!(sidecar = %sidecar.display(), "Wrote metadata");

		Ok(metadata)
	}
}
