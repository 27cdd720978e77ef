use std::collections::HashMap;

use super::{Fetch, Repodata};

/// Decoded feeds of one run, keyed by URL.
///
/// Designators sharing a subdir (`linux-64_py38`, `linux-64_py39`) and the `noarch` feed
/// shared by all of them are only downloaded once. A feed that failed isn't asked for again either.
pub struct RepodataCache<F: Fetch> {
	fetcher: F,
	feeds: HashMap<String, Repodata>,
	failed: HashMap<String, String>,
}

impl<F: Fetch> RepodataCache<F> {
	pub fn new(fetcher: F) -> Self {
		Self {
			fetcher,
			feeds: HashMap::new(),
			failed: HashMap::new(),
		}
	}

	/// Returns the feed at `url`, fetching and decoding it on first use.
	///
	/// # Errors
	/// - Errors of the fetcher and of [`Repodata::decode()`] on the first attempt.
	/// - [`FeedUnavailable`](crate::Error::FeedUnavailable) on later calls for a feed that failed.
	pub fn get_or_fetch(&mut self, url: &str) -> crate::Result<&Repodata> {
		if let Some(reason) = self.failed.get(url) {
			return Err(crate::Error::FeedUnavailable { url: url.to_string(), reason: reason.clone() });
		}
		if !self.feeds.contains_key(url) {
			let repodata = match self.fetcher.fetch(url).and_then(|data| Repodata::decode(url, &data)) {
				Ok(r) => r,
				Err(e) => {
					log::debug!("Remembering {} as unavailable", url);
					self.failed.insert(url.to_string(), e.to_string());
					return Err(e);
				},
			};
			log::debug!("Cached {} records from {}", repodata.records().count(), url);
			self.feeds.insert(url.to_string(), repodata);
		} else {
			log::trace!("Using cached feed {}", url);
		}
		Ok(&self.feeds[url])
	}

	pub fn contains(&self, url: &str) -> bool {
		self.feeds.contains_key(url)
	}

	pub fn len(&self) -> usize {
		self.feeds.len()
	}

	pub fn is_empty(&self) -> bool {
		self.feeds.is_empty()
	}

	pub fn fetcher(&self) -> &F {
		&self.fetcher
	}
}
