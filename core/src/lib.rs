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

//! Files and folders of a directory tree exposed as entries addressed by virtual ids, with
//! tags, attributes and thumbnails kept in hidden shadow folders beside them.

pub mod config;
pub mod entry;
pub mod error;
pub mod metadata;
pub mod path;

mod catalog;
mod repository;
mod thumbnail;
mod walker;

pub use config::{ConfigError, RepositoryConfig};
pub use entry::{Entry, FileEntry, FolderEntry};
pub use error::{Error, ErrorKind, Result};
pub use metadata::{Attribute, AttributeValue, MetaData};
pub use repository::{EntryRepository, FileSystemRepository};
