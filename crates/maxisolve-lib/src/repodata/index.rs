use std::collections::{BTreeMap, BTreeSet};

use super::{Fetch, Repodata, RepodataCache};
use crate::{Config, Designator};

/// Package name to the versions available for one designator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageIndex {
	versions: BTreeMap<String, BTreeSet<String>>,
}

impl PackageIndex {
	/// Builds the index of a designator from the feeds of every configured channel.
	///
	/// # Parameters
	/// - `cache` - Feeds are taken from here, fetching the ones not seen yet this run.
	/// - `config` - Supplies the channels and the feed URLs.
	/// - `designator` - Picks the architecture subdir and the python tag builds are filtered on.
	pub fn for_designator<F: Fetch>(cache: &mut RepodataCache<F>, config: &Config, designator: &Designator) -> crate::Result<Self> {
		let mut index = PackageIndex::default();
		for channel in config.channels() {
			let arch = cache.get_or_fetch(&config.feed_url(channel, designator.subdir()))?;
			index.add_arch_feed(arch, designator.python_tag());
			let noarch = cache.get_or_fetch(&config.feed_url(channel, "noarch"))?;
			index.add_noarch_feed(noarch);
		}
		log::debug!("{} package names available for {}", index.len(), designator);
		Ok(index)
	}

	/// Builds an index from already decoded feeds.
	pub fn build<'a>(arch: impl IntoIterator<Item = &'a Repodata>, noarch: impl IntoIterator<Item = &'a Repodata>, python_tag: &str) -> Self {
		let mut index = PackageIndex::default();
		for feed in arch {
			index.add_arch_feed(feed, python_tag);
		}
		for feed in noarch {
			index.add_noarch_feed(feed);
		}
		index
	}

	/// Adds the records of an architecture feed.
	///
	/// Builds starting with `py` are made for one python only and are skipped unless they're for `python_tag`.
	pub fn add_arch_feed(&mut self, feed: &Repodata, python_tag: &str) {
		for record in feed.records() {
			if record.build.starts_with("py") && !record.build.starts_with(python_tag) {
				continue;
			}
			self.insert(&record.name, &record.version);
		}
	}

	/// Adds the records of a `noarch` feed, these work with every python.
	pub fn add_noarch_feed(&mut self, feed: &Repodata) {
		for record in feed.records() {
			self.insert(&record.name, &record.version);
		}
	}

	fn insert(&mut self, name: &str, version: &str) {
		if let Some(versions) = self.versions.get_mut(name) {
			versions.insert(version.to_string());
		} else {
			self.versions.insert(name.to_string(), BTreeSet::from([version.to_string()]));
		}
	}

	pub fn contains(&self, name: &str) -> bool {
		self.versions.contains_key(name)
	}

	pub fn versions(&self, name: &str) -> Option<&BTreeSet<String>> {
		self.versions.get(name)
	}

	pub fn len(&self) -> usize {
		self.versions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.versions.is_empty()
	}

	/// Names in `packages` that aren't in the index, in request order.
	pub fn missing(&self, packages: &[String]) -> Vec<String> {
		packages.iter().filter(|p| !self.contains(p)).cloned().collect()
	}

	/// Removes the names not in the index from `packages` and returns them.
	pub fn retain_available(&self, packages: &mut Vec<String>) -> Vec<String> {
		let missing = self.missing(packages);
		packages.retain(|p| self.contains(p));
		missing
	}
}
