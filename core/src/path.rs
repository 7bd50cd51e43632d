//! Mapping between virtual entry ids and real filesystem paths.
//!
//! An entry id is a `/` separated path rooted at `/`, independent from the host conventions.
//! Everything in here is plain string handling without any I/O, so an id resolves the same way
//! on every platform. The only place where a host path is produced is [`real_path`].

use std::path::{Path, PathBuf};

pub const ROOT_ID: &str = "/";
pub const SEPARATOR: char = '/';

const WINDOWS_SEPARATOR: char = '\\';
const METADATA_EXTENSION: &str = "json";

/// Replaces every platform separator with `/`.
#[must_use]
pub fn canonicalize(path: &str) -> String {
	path.replace(WINDOWS_SEPARATOR, "/")
}

/// Canonical form of an id: rooted at `/`, no empty or `.` segments, `..` resolved without
/// ever climbing above the repository root.
#[must_use]
pub fn normalize_id(id: &str) -> String {
	let canonical = canonicalize(id);
	let mut segments = Vec::new();

	for segment in canonical.split(SEPARATOR) {
		match segment {
			"" | "." => {}
			".." => {
				segments.pop();
			}
			segment => segments.push(segment),
		}
	}

	format!("/{}", segments.join("/"))
}

/// Id of the child `name` inside the folder `parent_id`.
#[must_use]
pub fn join_id(parent_id: &str, name: &str) -> String {
	normalize_id(&format!("{parent_id}/{name}"))
}

/// Real filesystem path of `id` inside the repository `root`.
///
/// The root id maps to `root` itself, without a trailing separator.
#[must_use]
pub fn real_path(root: impl AsRef<Path>, id: &str) -> PathBuf {
	let mut path = root.as_ref().to_path_buf();
	normalize_id(id)
		.split(SEPARATOR)
		.filter(|segment| !segment.is_empty())
		.for_each(|segment| path.push(segment));

	path
}

/// Directory portion of `id`.
///
/// Follows `dirname` conventions: the parent of a top level entry (and of the root) is `/`,
/// and an id without any separator lives in `.`.
#[must_use]
pub fn parent_id(id: &str) -> String {
	let id = canonicalize(id);
	let trimmed = trim_trailing_separators(&id);

	match trimmed.rfind(SEPARATOR) {
		None => ".".to_string(),
		Some(0) => ROOT_ID.to_string(),
		Some(idx) => trim_trailing_separators(&trimmed[..idx]).to_string(),
	}
}

/// Last segment of `id`, extension included.
#[must_use]
pub fn basename(id: &str) -> String {
	let id = canonicalize(id);
	let trimmed = trim_trailing_separators(&id);

	trimmed
		.rfind(SEPARATOR)
		.map_or(trimmed, |idx| &trimmed[idx + 1..])
		.to_string()
}

/// Basename without its extension. A leading dot is not an extension marker, so `.bar` stays `.bar`.
#[must_use]
pub fn entry_name(id: &str) -> String {
	let basename = basename(id);
	split_extension(&basename).0.to_string()
}

/// Lowercase extension of `id` without the leading dot, or an empty string when there is none.
#[must_use]
pub fn content_type(id: &str) -> String {
	let basename = basename(id);
	split_extension(&basename)
		.1
		.map(str::to_ascii_lowercase)
		.unwrap_or_default()
}

/// Hidden folder, sibling of `id`, holding its sidecar and thumbnail.
#[must_use]
pub fn shadow_folder(id: &str, meta_folder: &str) -> String {
	let parent = parent_id(id);
	if parent.ends_with(SEPARATOR) {
		format!("{parent}{meta_folder}")
	} else {
		format!("{parent}/{meta_folder}")
	}
}

/// Id of the JSON sidecar holding the metadata of `id`.
#[must_use]
pub fn metadata_path(id: &str, meta_folder: &str) -> String {
	format!(
		"{}/{}.{METADATA_EXTENSION}",
		shadow_folder(id, meta_folder),
		basename(id)
	)
}

/// Id of the derived thumbnail of `id`.
#[must_use]
pub fn thumbnail_path(id: &str, meta_folder: &str, thumbs_prefix: &str) -> String {
	format!(
		"{}/{thumbs_prefix}{}",
		shadow_folder(id, meta_folder),
		basename(id)
	)
}

/// Names never surfaced as entries: the shadow folder and any dot-prefixed name.
#[must_use]
pub fn is_hidden_name(name: &str, meta_folder: &str) -> bool {
	name == meta_folder || name.starts_with('.')
}

fn trim_trailing_separators(id: &str) -> &str {
	let trimmed = id.trim_end_matches(SEPARATOR);
	if trimmed.is_empty() && id.starts_with(SEPARATOR) {
		ROOT_ID
	} else {
		trimmed
	}
}

fn split_extension(basename: &str) -> (&str, Option<&str>) {
	match basename.rfind('.') {
		// The dot is the first character, so it's a hidden file
		None | Some(0) => (basename, None),
		Some(idx) => (&basename[..idx], Some(&basename[idx + 1..])),
	}
}
