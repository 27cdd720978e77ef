//! # Repository metadata
//!
//! A channel publishes one `repodata.json` per subdir (`linux-64`, `osx-arm64`, ..., `noarch`)
//! listing every package file it carries. We only need the name, version and build string of each record
//! to know which package names exist for a designator.

use std::collections::HashMap;

use serde::Deserialize;

pub mod compression;
pub use compression::CompressionFormat;

mod fetch;
pub use fetch::Fetch;
pub use fetch::HttpFetcher;

mod cache;
pub use cache::RepodataCache;

mod index;
pub use index::PackageIndex;

/// Decoded `repodata.json` of one subdir.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Repodata {
	#[serde(default)]
	pub info: Option<RepodataInfo>,
	/// `.tar.bz2` package files.
	#[serde(default)]
	pub packages: HashMap<String, PackageRecord>,
	/// `.conda` package files.
	#[serde(default, rename = "packages.conda")]
	pub conda_packages: HashMap<String, PackageRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RepodataInfo {
	#[serde(default)]
	pub subdir: Option<String>,
}

/// A single package file in a feed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PackageRecord {
	pub name: String,
	pub version: String,
	#[serde(default)]
	pub build: String,
}

impl Repodata {
	/// Decompresses and parses a feed, the compression is picked from the suffix of `url`.
	///
	/// # Errors
	/// - [`IO`](crate::error::Error::IO) when decompression fails.
	/// - [`SerdeJSON`](crate::error::Error::SerdeJSON) when the content isn't repodata.
	pub fn decode(url: &str, data: &[u8]) -> crate::Result<Self> {
		let format = CompressionFormat::from_extension(url);
		let json = format.decompress(data)?;
		Ok(serde_json::from_slice(&json)?)
	}

	/// Records of both package maps.
	pub fn records(&self) -> impl Iterator<Item = &PackageRecord> {
		self.packages.values().chain(self.conda_packages.values())
	}

	pub fn subdir(&self) -> Option<&str> {
		self.info.as_ref().and_then(|i| i.subdir.as_deref())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn decode_plain_json() {
		let json = br#"{
			"info": { "subdir": "linux-64" },
			"packages": {
				"numpy-1.24.0-py38h10c12cc_0.tar.bz2": { "name": "numpy", "version": "1.24.0", "build": "py38h10c12cc_0", "build_number": 0, "depends": [] }
			},
			"packages.conda": {
				"mkl-2023.1.0-h6d00ec8_46342.conda": { "name": "mkl", "version": "2023.1.0", "build": "h6d00ec8_46342" }
			},
			"repodata_version": 1
		}"#;
		let rd = Repodata::decode("https://example.invalid/linux-64/repodata.json", json).unwrap();
		assert_eq!(rd.subdir(), Some("linux-64"));
		let mut names: Vec<_> = rd.records().map(|r| r.name.as_str()).collect();
		names.sort();
		assert_eq!(names, ["mkl", "numpy"]);
	}

	#[test]
	fn decode_missing_maps() {
		let rd = Repodata::decode("repodata.json", b"{}").unwrap();
		assert_eq!(rd.records().count(), 0);
		assert!(rd.subdir().is_none());
	}

	#[test]
	fn decode_garbage() {
		assert!(matches!(Repodata::decode("repodata.json", b"<html>"), Err(crate::Error::SerdeJSON(_))));
	}
}
