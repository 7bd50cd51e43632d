use crate::{
	consts,
	error::{Error, Result},
	generic::GenericHandler,
	ImageHandler,
};
use image::{DynamicImage, ImageFormat};
use std::{
	ffi::{OsStr, OsString},
	path::Path,
};
use tracing::trace;

pub fn format_image(path: impl AsRef<Path>) -> Result<DynamicImage> {
	let ext = lowercase_extension(path.as_ref())?;
	trace!(path = %path.as_ref().display(), "decoding image");
	match_to_handler(&ext)?.handle_image(path.as_ref())
}

/// The format a derived image of `path` must be encoded with, so it stays in the source format family.
pub fn output_format(path: impl AsRef<Path>) -> Result<ImageFormat> {
	let ext = lowercase_extension(path.as_ref())?;
	match_to_handler(&ext)?;
	ImageFormat::from_extension(&ext).ok_or(Error::Unsupported)
}

/// Whether a file with this extension (no leading dot) can be decoded.
#[must_use]
pub fn is_supported_extension(ext: &str) -> bool {
	match_to_handler(OsStr::new(&ext.to_ascii_lowercase())).is_ok()
}

fn lowercase_extension(path: &Path) -> Result<OsString> {
	path.extension()
		.map_or_else(|| Err(Error::NoExtension), |e| Ok(e.to_ascii_lowercase()))
}

fn match_to_handler(ext: &OsStr) -> Result<Box<dyn ImageHandler>> {
	if consts::GENERIC_EXTENSIONS
		.iter()
		.map(OsString::from)
		.any(|x| x == ext)
	{
		return Ok(Box::new(GenericHandler));
	}

	Err(Error::Unsupported)
}
