use crate::{entry::Entry, error::Result, path, repository::FileSystemRepository};

use std::future::Future;

use futures::{
	future::{BoxFuture, FutureExt},
	stream::{self, TryStreamExt},
};
use tracing::{instrument, trace};

impl FileSystemRepository {
	/// Runs `action` on every visible descendant of `folder_id`, folders included.
	///
	/// Each entry has its action run before the walk goes down into it. Siblings are processed
	/// concurrently, at most `walk_concurrency` at a time per folder, and in no particular order.
	/// The first error, from `action` or from a listing, stops the walk and is returned as is.
	#[instrument(skip(self, action), err)]
	pub async fn walk<F, Fut>(&self, folder_id: &str, action: F) -> Result<()>
	where
		F: Fn(Entry) -> Fut + Send + Sync,
		Fut: Future<Output = Result<()>> + Send,
	{
		self.walk_folder(path::normalize_id(folder_id), &action)
			.await
	}

	fn walk_folder<'a, F, Fut>(&'a self, folder_id: String, action: &'a F) -> BoxFuture<'a, Result<()>>
	where
		F: Fn(Entry) -> Fut + Send + Sync,
		Fut: Future<Output = Result<()>> + Send + 'a,
	{
		async move {
			let entries = self.get_folder_entries(&folder_id).await?;
			trace!(%folder_id, entries_count = entries.len(), "Walking folder");

			stream::iter(entries.into_iter().map(Ok))
				.try_for_each_concurrent(self.config.walk_concurrency, move |entry| async move {
					let maybe_child_folder = entry.is_folder().then(|| entry.id().to_string());

					action(entry).await?;

					if let Some(child_folder) = maybe_child_folder {
						self.walk_folder(child_folder, action).await?;
					}

					Ok(())
				})
				.await
		}
		.boxed()
	}
}
