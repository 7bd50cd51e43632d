#![warn(
	clippy::all,
	clippy::pedantic,
	clippy::correctness,
	clippy::perf,
	clippy::style,
	clippy::suspicious,
	clippy::complexity,
	clippy::nursery,
	clippy::unwrap_used,
	unused_qualifications,
	rust_2018_idioms,
	clippy::expect_used,
	trivial_casts,
	trivial_numeric_casts,
	unused_allocation,
	clippy::as_conversions,
	clippy::dbg_macro
)]
#![forbid(unsafe_code)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

mod consts;
mod error;
mod formatter;
mod generic;

pub use consts::GENERIC_EXTENSIONS;
pub use error::{Error, Result};
pub use formatter::{format_image, is_supported_extension, output_format};
pub use image::{DynamicImage, ImageFormat};
use std::{fs, io::Read, path::Path};

pub trait ImageHandler {
	fn maximum_size(&self) -> u64;

	fn get_data(&self, path: &Path) -> Result<Vec<u8>> {
		let mut file = fs::File::open(path)?;
		let maximum_size = self.maximum_size();
		if file.metadata()?.len() > maximum_size {
			Err(Error::TooLarge(maximum_size))
		} else {
			let mut data = vec![];
			file.read_to_end(&mut data)?;
			Ok(data)
		}
	}

	fn handle_image(&self, path: &Path) -> Result<DynamicImage>;
}
