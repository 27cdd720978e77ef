use std::fmt;

/// Canonical `{SUBDIR}_{PYTAG}` key found in the matrix, e.g. `linux-64_py38`.
///
/// The first half names the repository subdir, the second the python tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Designator {
	subdir: String,
	python_tag: String,
}

impl Designator {
	pub fn new(designator: &str) -> crate::Result<Self> {
		let (subdir, python_tag) = designator.split_once('_')
			.ok_or_else(|| crate::Error::Parse(format!("designator '{}' is not of the form SUBDIR_PYTAG", designator)))?;
		if subdir.is_empty() || python_tag.is_empty() || python_tag.contains('_') {
			return Err(crate::Error::Parse(format!("designator '{}' is not of the form SUBDIR_PYTAG", designator)));
		}
		Ok(Designator {
			subdir: subdir.to_string(),
			python_tag: python_tag.to_string(),
		})
	}

	/// Repository subdir, also the top level directory of the reports.
	pub fn subdir(&self) -> &str {
		&self.subdir
	}

	pub fn python_tag(&self) -> &str {
		&self.python_tag
	}
}

impl TryFrom<&str> for Designator {
	type Error = crate::Error;
	fn try_from(value: &str) -> Result<Self, Self::Error> { Self::new(value) }
}

impl fmt::Display for Designator {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}_{}", self.subdir, self.python_tag)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn designator_parts() {
		let d = Designator::new("linux-64_py38").unwrap();
		assert_eq!(d.subdir(), "linux-64");
		assert_eq!(d.python_tag(), "py38");
		assert_eq!(d.to_string(), "linux-64_py38");

		let d = Designator::new("linux64_pypy39").unwrap();
		assert_eq!(d.subdir(), "linux64");
		assert_eq!(d.python_tag(), "pypy39");
	}

	#[test]
	fn designator_malformed() {
		for s in ["linux-64", "_py38", "linux-64_", "linux_64_py38", ""] {
			assert!(Designator::new(s).is_err(), "'{}' should not parse", s);
		}
	}
}
