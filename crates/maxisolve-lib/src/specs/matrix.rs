use std::collections::BTreeMap;
use std::path::Path;

use super::Designator;
use crate::Platform;

/// The platform matrix, `OS -> CPU -> PYTAG -> designator`.
#[derive(Debug, Clone, Default)]
pub struct Matrix {
	entries: BTreeMap<String, BTreeMap<String, BTreeMap<String, Designator>>>,
}

type RawMatrix = BTreeMap<String, BTreeMap<String, BTreeMap<String, String>>>;

impl Matrix {
	/// Loads the matrix from a YAML file.
	///
	/// # Errors
	/// - [`MissingConfiguration`](crate::error::Error::MissingConfiguration) when `path` doesn't exist.
	/// - [`SerdeYAML`](crate::error::Error::SerdeYAML) when the document doesn't have the matrix shape.
	/// - [`Validation`](crate::error::Error::Validation) when a designator is malformed.
	pub fn load(path: impl AsRef<Path>) -> crate::Result<Self> {
		let s = super::read_document(path.as_ref())?;
		let matrix = Self::from_yaml(&s)?;
		log::debug!("Loaded {} designators from {}", matrix.designators().count(), path.as_ref().display());
		Ok(matrix)
	}

	pub fn from_yaml(s: &str) -> crate::Result<Self> {
		if s.trim().is_empty() {
			return Ok(Matrix::default());
		}
		let raw: Option<RawMatrix> = serde_yaml::from_str(s)?;
		let mut entries = BTreeMap::new();
		for (os, cpus) in raw.unwrap_or_default() {
			let mut cpu_entries = BTreeMap::new();
			for (cpu, pythons) in cpus {
				let mut python_entries = BTreeMap::new();
				for (python, designator) in pythons {
					let d = Designator::new(&designator)
						.map_err(|e| crate::Error::Validation(format!("matrix entry {}/{}/{}: {}", os, cpu, python, e)))?;
					python_entries.insert(python, d);
				}
				cpu_entries.insert(cpu, python_entries);
			}
			entries.insert(os, cpu_entries);
		}
		Ok(Matrix { entries })
	}

	/// Looks up the designator of a platform, `None` when the matrix doesn't list it.
	pub fn designator(&self, platform: &Platform) -> Option<&Designator> {
		self.entries
			.get(platform.os.as_str())?
			.get(platform.cpu.as_str())?
			.get(platform.python.as_str())
	}

	/// All `(os, cpu, python tag, designator)` entries.
	pub fn designators(&self) -> impl Iterator<Item = (&str, &str, &str, &Designator)> {
		self.entries.iter().flat_map(|(os, cpus)| {
			cpus.iter().flat_map(move |(cpu, pythons)| {
				pythons.iter().map(move |(py, d)| (os.as_str(), cpu.as_str(), py.as_str(), d))
			})
		})
	}
}
