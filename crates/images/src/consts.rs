/// Extensions decoded by the generic handler, which delegates to the `image` crate.
///
/// Every one of them can also be encoded back, so thumbnails keep the source format family.
pub const GENERIC_EXTENSIONS: [&str; 8] = ["jpg", "jpeg", "png", "gif", "bmp", "ico", "tif", "tiff"];

/// The maximum file size that an image can be in order to have a thumbnail generated.
///
/// This value is in MiB.
pub(crate) const GENERIC_MAXIMUM_FILE_SIZE: u64 = MIB * 24;

/// The size of 1MiB in bytes
const MIB: u64 = 1_048_576;
