use std::path::Path;

use indexmap::IndexMap;

/// Named environments and their primary packages, in document order.
#[derive(Debug, Clone, Default)]
pub struct Environments {
	environments: IndexMap<String, Vec<String>>,
}

impl Environments {
	/// Loads the environment package lists from a YAML file.
	///
	/// # Errors
	/// - [`MissingConfiguration`](crate::error::Error::MissingConfiguration) when `path` doesn't exist.
	/// - [`SerdeYAML`](crate::error::Error::SerdeYAML) when an environment isn't a list of package names.
	pub fn load(path: impl AsRef<Path>) -> crate::Result<Self> {
		let s = super::read_document(path.as_ref())?;
		let environments = Self::from_yaml(&s)?;
		log::debug!("Loaded {} environments from {}", environments.len(), path.as_ref().display());
		Ok(environments)
	}

	pub fn from_yaml(s: &str) -> crate::Result<Self> {
		if s.trim().is_empty() {
			return Ok(Environments::default());
		}
		let environments: Option<IndexMap<String, Option<Vec<String>>>> = serde_yaml::from_str(s)?;
		Ok(Environments {
			environments: environments
				.unwrap_or_default()
				.into_iter()
				.map(|(name, packages)| (name, packages.unwrap_or_default()))
				.collect(),
		})
	}

	pub fn get(&self, name: &str) -> Option<&[String]> {
		self.environments.get(name).map(Vec::as_slice)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
		self.environments.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
	}

	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.environments.keys().map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.environments.len()
	}

	pub fn is_empty(&self) -> bool {
		self.environments.is_empty()
	}
}
