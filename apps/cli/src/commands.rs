//! Subcommands, each a thin wrapper over one repository operation.
//!
//! Results are printed to stdout as pretty JSON.

use aspan_core::{AttributeValue, Entry, FileSystemRepository, MetaData};
use aspan_utils::report_error;

use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{bail, Context};
use clap::Subcommand;
use serde::Serialize;
use tracing::{debug, info};

#[derive(Subcommand, Debug)]
pub enum Commands {
	/// List the visible entries of a folder
	Ls {
		/// Folder id
		#[arg(default_value = "/")]
		id: String,
	},

	/// Describe a single entry
	Stat { id: String },

	/// Find entries whose id matches a glob pattern, like '/**/*.{jpg,png}'
	Find { pattern: String },

	/// Read or replace the metadata of an entry
	#[command(subcommand)]
	Meta(MetaCommands),

	/// Add or remove tags
	#[command(subcommand)]
	Tag(TagCommands),

	/// Set or remove attributes
	#[command(subcommand)]
	Attr(AttrCommands),

	/// Generate the thumbnail of a picture
	Thumb { id: String },

	/// Generate the thumbnails of every supported picture below a folder
	Thumbs {
		/// Folder id
		#[arg(default_value = "/")]
		id: String,
		/// Leave pictures that already have a thumbnail alone
		#[arg(long)]
		skip_existing: bool,
		/// Log pictures that fail instead of stopping at the first one
		#[arg(long)]
		keep_going: bool,
	},

	/// Print a file as base64
	Image { id: String },

	/// Print the thumbnail of a picture as base64
	ThumbData { id: String },

	/// Delete everything inside the repository
	Empty {
		/// Confirm the deletion
		#[arg(long)]
		yes: bool,
	},
}

#[derive(Subcommand, Debug)]
pub enum MetaCommands {
	Get { id: String },
	/// Replace the metadata with a JSON document
	Set { id: String, json: String },
}

#[derive(Subcommand, Debug)]
pub enum TagCommands {
	Add { id: String, tag: String },
	Rm { id: String, tag: String },
}

#[derive(Subcommand, Debug)]
pub enum AttrCommands {
	/// Set an attribute, `true`/`false` and numbers are stored as such
	Set {
		id: String,
		key: String,
		value: AttributeValue,
	},
	Rm {
		id: String,
		key: String,
	},
}

impl Commands {
	pub async fn run(self, repository: &FileSystemRepository) -> anyhow::Result<()> {
		match self {
			Self::Ls { id } => print(&repository.get_folder_entries(&id).await?),
			Self::Stat { id } => print(&repository.get_entry(&id).await?),
			Self::Find { pattern } => print(&repository.find_entries(&pattern).await?),
			Self::Meta(MetaCommands::Get { id }) => print(&repository.get_metadata(&id).await?),
			Self::Meta(MetaCommands::Set { id, json }) => {
				let metadata = serde_json::from_str::<MetaData>(&json)
					.context("metadata must be a JSON object with tags and attributes")?;
				// Make sure the entry exists, the store alone would happily annotate anything
				repository.get_entry(&id).await?;
				print(&repository.set_metadata(&id, metadata).await?)
			}
			Self::Tag(TagCommands::Add { id, tag }) => {
				repository.get_entry(&id).await?;
				print(&repository.add_tag(&id, &tag).await?)
			}
			Self::Tag(TagCommands::Rm { id, tag }) => print(&repository.remove_tag(&id, &tag).await?),
			Self::Attr(AttrCommands::Set { id, key, value }) => {
				repository.get_entry(&id).await?;
				print(&repository.add_attribute(&id, (key, value)).await?)
			}
			Self::Attr(AttrCommands::Rm { id, key }) => {
				print(&repository.remove_attribute(&id, &key).await?)
			}
			Self::Thumb { id } => {
				repository.make_thumbnail(&id).await?;
				info!(%id, "Thumbnail generated");
				Ok(())
			}
			Self::Thumbs {
				id,
				skip_existing,
				keep_going,
			} => {
				let generated =
					generate_thumbnails(repository, &id, skip_existing, keep_going).await?;
				info!(%id, generated, "Thumbnails generated");
				Ok(())
			}
			Self::Image { id } => {
				println!("{}", repository.get_base64_image(&id).await?);
				Ok(())
			}
			Self::ThumbData { id } => match repository.get_base64_thumbnail(&id).await? {
				Some(data) => {
					println!("{data}");
					Ok(())
				}
				None => bail!("entry not found: <id='{id}'>"),
			},
			Self::Empty { yes } => {
				if !yes {
					bail!(
						"refusing to delete everything in '{}' without --yes",
						repository.root().display()
					);
				}
				repository.empty().await.map_err(Into::into)
			}
		}
	}
}

async fn generate_thumbnails(
	repository: &FileSystemRepository,
	folder_id: &str,
	skip_existing: bool,
	keep_going: bool,
) -> anyhow::Result<usize> {
	let generated = AtomicUsize::new(0);

	repository
		.walk(folder_id, |entry| {
			let generated = &generated;
			async move {
				let Entry::File(file) = entry else {
					return Ok(());
				};

				if !aspan_images::is_supported_extension(&file.content_type) {
					return Ok(());
				}

				if skip_existing && repository.has_thumbnail(&file.id).await? {
					debug!(id = %file.id, "Thumbnail already there");
					return Ok(());
				}

				match repository.make_thumbnail(&file.id).await {
					Ok(()) => {
						generated.fetch_add(1, Ordering::Relaxed);
						Ok(())
					}
					Err(e) if keep_going => {
						report_error(&Err::<(), _>(e));
						Ok(())
					}
					Err(e) => Err(e),
				}
			}
		})
		.await?;

	Ok(generated.into_inner())
}

fn print(value: &impl Serialize) -> anyhow::Result<()> {
	println!("{}", serde_json::to_string_pretty(value)?);
	Ok(())
}
