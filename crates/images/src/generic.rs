use crate::{consts::GENERIC_MAXIMUM_FILE_SIZE, error::Result, ImageHandler};

use std::{io::Cursor, path::Path};

use image::{io::Reader, DynamicImage};
use tracing::trace;

/// Raster pictures decoded by the `image` crate. The actual format is sniffed from the content,
/// the extension only decides which handler gets the file.
pub struct GenericHandler;

impl ImageHandler for GenericHandler {
	fn maximum_size(&self) -> u64 {
		GENERIC_MAXIMUM_FILE_SIZE
	}

	fn handle_image(&self, path: &Path) -> Result<DynamicImage> {
		let reader = Reader::new(Cursor::new(self.get_data(path)?)).with_guessed_format()?;
		trace!(path = %path.display(), format = ?reader.format(), "Sniffed picture format");

		Ok(reader.decode()?)
	}
}
