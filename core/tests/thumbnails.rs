mod helpers;

use aspan_core::ErrorKind;

use base64::{engine::general_purpose::STANDARD, Engine};
use helpers::{empty_repository_with, seeded_repository, write_picture};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn thumbnail_fills_the_configured_box() {
	let test_repository = seeded_repository().await;
	let repository = &test_repository.repository;
	write_picture(test_repository.root().join("fo1/landscape.jpg"), 640, 320);

	assert!(!repository.has_thumbnail("/fo1/landscape.jpg").await.unwrap());
	repository.make_thumbnail("/fo1/landscape.jpg").await.unwrap();
	assert!(repository.has_thumbnail("/fo1/landscape.jpg").await.unwrap());

	let thumbnail_path = test_repository.root().join("fo1/.aspan/thumb_landscape.jpg");
	assert_eq!(repository.thumbnail_path("/fo1/landscape.jpg"), thumbnail_path);

	let thumbnail = image::open(&thumbnail_path).unwrap();
	assert_eq!((thumbnail.width(), thumbnail.height()), (200, 200));
	assert_eq!(
		image::ImageFormat::from_path(&thumbnail_path).unwrap(),
		image::guess_format(&std::fs::read(&thumbnail_path).unwrap()).unwrap()
	);
}

#[tokio::test]
async fn thumbnail_keeps_the_source_format() {
	let test_repository = empty_repository_with(|mut config| {
		config.thumbs_width = 64;
		config.thumbs_length = 32;
		config.thumbs_prefix = "small_".to_string();
		config
	});
	let repository = &test_repository.repository;
	write_picture(test_repository.root().join("pixel.png"), 10, 300);

	repository.make_thumbnail("/pixel.png").await.unwrap();

	let bytes = std::fs::read(test_repository.root().join(".aspan/small_pixel.png")).unwrap();
	assert_eq!(image::guess_format(&bytes).unwrap(), image::ImageFormat::Png);

	let thumbnail = image::load_from_memory(&bytes).unwrap();
	assert_eq!((thumbnail.width(), thumbnail.height()), (64, 32));
}

#[tokio::test]
async fn thumbnail_is_overwritten() {
	let test_repository = seeded_repository().await;
	let repository = &test_repository.repository;
	let source = test_repository.root().join("f1.jpg");

	write_picture(&source, 300, 300);
	repository.make_thumbnail("/f1.jpg").await.unwrap();
	let first = repository.get_base64_thumbnail("/f1.jpg").await.unwrap();

	write_picture(&source, 10, 900);
	repository.make_thumbnail("/f1.jpg").await.unwrap();
	let second = repository.get_base64_thumbnail("/f1.jpg").await.unwrap();

	assert!(first.is_some());
	assert_ne!(first, second);
}

#[tokio::test]
async fn thumbnail_of_unsupported_or_broken_files() {
	let test_repository = seeded_repository().await;
	let repository = &test_repository.repository;
	std::fs::write(test_repository.root().join("notes.txt"), b"hello").unwrap();

	// Seeded pictures are empty files
	for id in ["/notes.txt", "/f1.jpg"] {
		let err = repository.make_thumbnail(id).await.unwrap_err();
		assert_eq!(err.kind(), ErrorKind::UnsupportedFormat, "{id}");
		assert!(!repository.has_thumbnail(id).await.unwrap());
	}
}

#[tokio::test]
async fn thumbnail_of_missing_entries_and_folders() {
	let test_repository = seeded_repository().await;
	let repository = &test_repository.repository;

	for id in ["/doesnotexist.jpg", "/fo1"] {
		let err = repository.make_thumbnail(id).await.unwrap_err();
		assert_eq!(err.kind(), ErrorKind::NotFound, "{id}");
	}
}

#[tokio::test]
async fn base64_image() {
	let test_repository = seeded_repository().await;
	std::fs::write(test_repository.root().join("fo1/raw.jpg"), b"not really a picture").unwrap();

	let encoded = test_repository
		.repository
		.get_base64_image("/fo1/raw.jpg")
		.await
		.unwrap();

	assert_eq!(STANDARD.decode(encoded).unwrap(), b"not really a picture");
}

#[tokio::test]
async fn base64_image_of_a_missing_entry() {
	let test_repository = seeded_repository().await;

	let err = test_repository
		.repository
		.get_base64_image("/doesnotexist.jpg")
		.await
		.unwrap_err();

	assert_eq!(err.kind(), ErrorKind::Io);
}

#[tokio::test]
async fn base64_thumbnail() {
	let test_repository = seeded_repository().await;
	let repository = &test_repository.repository;
	write_picture(test_repository.root().join("f1.jpg"), 400, 250);

	repository.make_thumbnail("/f1.jpg").await.unwrap();

	let encoded = repository
		.get_base64_thumbnail("/f1.jpg")
		.await
		.unwrap()
		.unwrap();
	assert_eq!(
		STANDARD.decode(encoded).unwrap(),
		std::fs::read(repository.thumbnail_path("/f1.jpg")).unwrap()
	);
}

#[tokio::test]
async fn base64_thumbnail_of_a_missing_source_is_none() {
	let test_repository = seeded_repository().await;

	assert_eq!(
		test_repository
			.repository
			.get_base64_thumbnail("/doesnotexist.jpg")
			.await
			.unwrap(),
		None
	);
}

#[tokio::test]
async fn base64_thumbnail_never_generated_is_an_error() {
	let test_repository = seeded_repository().await;

	let err = test_repository
		.repository
		.get_base64_thumbnail("/f1.jpg")
		.await
		.unwrap_err();

	assert_eq!(err.kind(), ErrorKind::Io);
}
