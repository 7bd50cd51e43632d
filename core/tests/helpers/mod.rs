#![allow(dead_code)]

use aspan_core::{AttributeValue, FileSystemRepository, MetaData, RepositoryConfig};

use std::path::Path;

use image::{ImageBuffer, ImageFormat, Rgb};
use tempfile::TempDir;

/// A repository living in its own temporary directory, removed on drop.
pub struct TestRepository {
	pub repository: FileSystemRepository,
	dir: TempDir,
}

impl TestRepository {
	pub fn root(&self) -> &Path {
		self.dir.path()
	}
}

pub fn empty_repository() -> TestRepository {
	empty_repository_with(|config| config)
}

pub fn empty_repository_with(
	customize: impl FnOnce(RepositoryConfig) -> RepositoryConfig,
) -> TestRepository {
	let dir = tempfile::tempdir().unwrap();
	let repository = FileSystemRepository::new(customize(RepositoryConfig::new(dir.path()))).unwrap();

	TestRepository { repository, dir }
}

/// Builds this tree, every file empty:
///
/// ```text
/// /f1.jpg
/// /f2.gif                               tags
/// /fo1/                                 tags, attributes
///     sf1/ sf2/ sfo1/
///     subFolder34/                      tags, attributes
///         checkCT.jpg                   tags, attributes
///         anotherExt_f2.jpg
///         gifFile.jpg
/// ```
pub async fn seeded_repository() -> TestRepository {
	let test_repository = empty_repository();
	let root = test_repository.root();

	for folder in ["fo1/sf1", "fo1/sf2", "fo1/sfo1", "fo1/subFolder34"] {
		std::fs::create_dir_all(root.join(folder)).unwrap();
	}

	for file in [
		"f1.jpg",
		"f2.gif",
		"fo1/subFolder34/checkCT.jpg",
		"fo1/subFolder34/anotherExt_f2.jpg",
		"fo1/subFolder34/gifFile.jpg",
	] {
		std::fs::write(root.join(file), b"").unwrap();
	}

	let repository = &test_repository.repository;
	for (id, metadata) in seeded_metadata() {
		repository.set_metadata(id, metadata).await.unwrap();
	}

	test_repository
}

pub fn seeded_metadata() -> Vec<(&'static str, MetaData)> {
	vec![
		(
			"/f2.gif",
			MetaData {
				tags: tags(&["receipts", "electronics", "NYtour"]),
				..Default::default()
			},
		),
		(
			"/fo1",
			MetaData {
				tags: tags(&["firstFolder"]),
				attributes: Some(vec![
					attribute("title", "fatWedding"),
					attribute("description", "who-an!"),
					attribute("lop", "ka"),
				]),
				..Default::default()
			},
		),
		(
			"/fo1/subFolder34",
			MetaData {
				tags: tags(&["notEmpty", "NY", "2018", "friends"]),
				attributes: Some(vec![
					attribute("empty", false),
					attribute("title", "New Year celebration"),
					attribute("description", "At Zhukovs home"),
					attribute("numberOfFiles", 45_i64),
				]),
				..Default::default()
			},
		),
		(
			"/fo1/subFolder34/checkCT.jpg",
			MetaData {
				attributes: Some(vec![attribute("description", "Serega taking a picture")]),
				tags: tags(&["favorite", "friends"]),
				..Default::default()
			},
		),
	]
}

pub fn tags(tags: &[&str]) -> Option<Vec<String>> {
	Some(tags.iter().map(ToString::to_string).collect())
}

pub fn attribute(key: &str, value: impl Into<AttributeValue>) -> (String, AttributeValue) {
	(key.to_string(), value.into())
}

/// Writes a real, decodable picture of the given size, encoded after the extension of `path`.
pub fn write_picture(path: impl AsRef<Path>, width: u32, height: u32) {
	let path = path.as_ref();
	let format = ImageFormat::from_path(path).unwrap();

	ImageBuffer::from_fn(width, height, |x, y| {
		Rgb([(x % 256) as u8, (y % 256) as u8, 128_u8])
	})
	.save_with_format(path, format)
	.unwrap();
}

pub fn sorted_ids(entries: &[aspan_core::Entry]) -> Vec<String> {
	let mut ids = entries
		.iter()
		.map(|entry| entry.id().to_string())
		.collect::<Vec<_>>();
	ids.sort();
	ids
}
