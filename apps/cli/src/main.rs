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

use aspan_core::{config, FileSystemRepository, RepositoryConfig};

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

use commands::Commands;

const DEFAULT_LOG_FILTER: &str = "warn,aspan_core=info,aspan=info";

/// Browse and annotate an aspan repository
#[derive(Parser, Debug)]
#[command(name = "aspan", version, about)]
struct Cli {
	/// Repository root directory
	#[arg(long, env = "REPOSITORY_PATH")]
	path: PathBuf,

	/// Name of the hidden folder holding metadata and thumbnails
	#[arg(long, env = "META_FOLDER", default_value = config::DEFAULT_META_FOLDER)]
	meta_folder: String,

	/// File name prefix of thumbnails
	#[arg(long, env = "THUMB_PREFIX", default_value = config::DEFAULT_THUMBS_PREFIX)]
	thumbs_prefix: String,

	/// Thumbnail height in pixels
	#[arg(long, env = "THUMBS_LENGTH", default_value_t = config::DEFAULT_THUMBS_LENGTH)]
	thumbs_length: u32,

	/// Thumbnail width in pixels
	#[arg(long, env = "THUMBS_WIDTH", default_value_t = config::DEFAULT_THUMBS_WIDTH)]
	thumbs_width: u32,

	/// Comma separated extensions of the files shown in listings
	#[arg(long, env = "EXTS", value_delimiter = ',', default_values_t = config::DEFAULT_EXTS.map(String::from))]
	exts: Vec<String>,

	/// Sibling entries processed at once, per folder, by recursive commands
	#[arg(long, env = "WALK_CONCURRENCY", default_value_t = config::DEFAULT_WALK_CONCURRENCY)]
	walk_concurrency: usize,

	#[command(subcommand)]
	command: Commands,
}

impl Cli {
	fn repository_config(&self) -> RepositoryConfig {
		RepositoryConfig {
			path: self.path.clone(),
			meta_folder: self.meta_folder.clone(),
			thumbs_prefix: self.thumbs_prefix.clone(),
			thumbs_length: self.thumbs_length,
			thumbs_width: self.thumbs_width,
			exts: self
				.exts
				.iter()
				.map(|ext| ext.trim().to_string())
				.filter(|ext| !ext.is_empty())
				.collect(),
			walk_concurrency: self.walk_concurrency,
		}
	}
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	// Logs go to stderr, stdout is kept for command output
	tracing_subscriber::registry()
		.with(
			EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
		)
		.with(fmt::layer().with_writer(std::io::stderr).with_target(false))
		.init();

	let cli = Cli::parse();

	let repository = FileSystemRepository::new(cli.repository_config())
		.context("invalid repository configuration")?;

	cli.command.run(&repository).await
}
