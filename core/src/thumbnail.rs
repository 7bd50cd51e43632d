use crate::{
	entry::Entry,
	error::{Error, Result},
	path,
	repository::FileSystemRepository,
};

use aspan_images::{format_image, output_format, ImageFormat};
use aspan_utils::FileIOError;

use std::{io::Cursor, path::PathBuf};

use base64::{engine::general_purpose::STANDARD, Engine};
use image::{imageops::FilterType, DynamicImage};
use tokio::{fs, task::spawn_blocking};
use tracing::{debug, instrument, trace};

impl FileSystemRepository {
	/// Renders the thumbnail of the picture `id` into its shadow folder, replacing any previous one.
	///
	/// The picture is scaled to cover the configured box and the overflow is cropped, so every
	/// thumbnail has exactly the configured dimensions. It keeps the format of its source.
	#[instrument(skip(self), err)]
	pub async fn make_thumbnail(&self, id: &str) -> Result<()> {
		let Entry::File(file) = self.get_entry(id).await? else {
			return Err(Error::NotFound(path::normalize_id(id)));
		};

		let source_path = self.real_path(&file.id);
		let (width, length) = (self.config.thumbs_width, self.config.thumbs_length);

		let bytes = spawn_blocking({
			let id = file.id.clone();
			move || render_thumbnail(&id, source_path, width, length)
		})
		.await??;

		let shadow_folder = self.shadow_folder(&file.id);
		fs::create_dir_all(&shadow_folder)
			.await
			.map_err(|e| FileIOError::from((&shadow_folder, e, "failed to create shadow folder")))?;

		let thumbnail_path = self.thumbnail_path(&file.id);
		fs::write(&thumbnail_path, &bytes)
			.await
			.map_err(|e| FileIOError::from((&thumbnail_path, e, "failed to write thumbnail")))?;

		debug!(thumbnail_path = %thumbnail_path.display(), "Generated thumbnail");

		Ok(())
	}

	/// Whether a thumbnail was already rendered for `id`. Says nothing about it being up to date.
	pub async fn has_thumbnail(&self, id: &str) -> Result<bool> {
		let thumbnail_path = self.thumbnail_path(id);
		fs::try_exists(&thumbnail_path)
			.await
			.map_err(|e| FileIOError::from((&thumbnail_path, e)).into())
	}

	#[instrument(skip(self), err)]
	pub async fn get_base64_image(&self, id: &str) -> Result<String> {
		let real_path = self.real_path(id);
		let bytes = fs::read(&real_path)
			.await
			.map_err(|e| FileIOError::from((&real_path, e, "failed to read picture")))?;

		Ok(STANDARD.encode(bytes))
	}

	/// Base64 encoded thumbnail of `id`, or `None` when `id` itself doesn't exist.
	///
	/// The thumbnail must have been rendered with [`Self::make_thumbnail`] beforehand; a missing
	/// thumbnail of an existing picture is an error.
	#[instrument(skip(self), err)]
	pub async fn get_base64_thumbnail(&self, id: &str) -> Result<Option<String>> {
		let real_path = self.real_path(id);
		if !fs::try_exists(&real_path)
			.await
			.map_err(|e| FileIOError::from((&real_path, e)))?
		{
			trace!("Source picture is gone");
			return Ok(None);
		}

		let thumbnail_path = self.thumbnail_path(id);
		let bytes = fs::read(&thumbnail_path)
			.await
			.map_err(|e| FileIOError::from((&thumbnail_path, e, "failed to read thumbnail")))?;

		Ok(Some(STANDARD.encode(bytes)))
	}
}

fn render_thumbnail(id: &str, source_path: PathBuf, width: u32, length: u32) -> Result<Vec<u8>> {
	let unsupported = |source: aspan_images::Error| match source {
		aspan_images::Error::Io(e) => Error::from(FileIOError::from((&source_path, e))),
		source => Error::UnsupportedFormat {
			id: id.to_string(),
			source,
		},
	};

	let format = output_format(&source_path).map_err(unsupported)?;
	let img = format_image(&source_path).map_err(unsupported)?;

	let thumbnail = img.resize_to_fill(width, length, FilterType::Triangle);
	// JPEG has no alpha channel, every other format we decode can carry one
	let thumbnail = if format == ImageFormat::Jpeg {
		DynamicImage::ImageRgb8(thumbnail.to_rgb8())
	} else {
		DynamicImage::ImageRgba8(thumbnail.to_rgba8())
	};

	let mut bytes = Cursor::new(vec![]);
	thumbnail
		.write_to(&mut bytes, format)
		.map_err(|source| Error::ThumbnailEncode {
			id: id.to_string(),
			source,
		})?;

	Ok(bytes.into_inner())
}
