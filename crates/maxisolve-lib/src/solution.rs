//! Splitting a link plan into the packages that were asked for and the ones pulled in by them.

use std::collections::{BTreeMap, HashSet};

use crate::solver::LinkPlan;

mod report;
pub use report::Report;

/// A solved environment.
///
/// `primary` and `secondary` never share a name, together they hold every package of the plan.
/// The interpreter is a primary package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
	python: String,
	primary: BTreeMap<String, String>,
	secondary: BTreeMap<String, String>,
}

impl Solution {
	/// Partitions a plan by the names that were requested.
	///
	/// # Parameters
	/// - `requested` - Primary package names that were handed to the solver.
	/// - `plan` - What the solver would link.
	/// # Errors
	/// [`Validation`](crate::error::Error::Validation) when the plan doesn't contain `python`.
	pub fn partition(requested: &[String], plan: &LinkPlan) -> crate::Result<Self> {
		let requested: HashSet<&str> = requested.iter().map(String::as_str).collect();
		let mut primary = BTreeMap::new();
		let mut secondary = BTreeMap::new();

		for action in plan.iter() {
			if requested.contains(action.name.as_str()) {
				primary.insert(action.name.clone(), action.version.clone());
			} else {
				secondary.insert(action.name.clone(), action.version.clone());
			}
		}

		for name in &requested {
			if !primary.contains_key(*name) {
				log::warn!("Requested package {} is not part of the solution", name);
			}
		}

		Self::from_parts(primary, secondary)
	}

	/// Builds a solution from already split packages, `python` has to be among the primaries.
	pub fn from_parts(primary: BTreeMap<String, String>, secondary: BTreeMap<String, String>) -> crate::Result<Self> {
		let python = primary.get("python")
			.cloned()
			.ok_or_else(|| crate::Error::Validation("solution does not contain python".to_string()))?;
		if let Some(name) = primary.keys().find(|k| secondary.contains_key(*k)) {
			return Err(crate::Error::Validation(format!("{} is both a primary and a secondary package", name)));
		}
		Ok(Solution { python, primary, secondary })
	}

	/// Version of the interpreter.
	pub fn python(&self) -> &str {
		&self.python
	}

	/// Requested packages including `python`, sorted by name.
	pub fn primary(&self) -> &BTreeMap<String, String> {
		&self.primary
	}

	/// Requested packages other than `python`, sorted by name.
	pub fn primary_without_python(&self) -> impl Iterator<Item = (&str, &str)> {
		self.primary
			.iter()
			.filter(|(name, _)| name.as_str() != "python")
			.map(|(name, version)| (name.as_str(), version.as_str()))
	}

	/// Dependencies that weren't asked for, sorted by name.
	pub fn secondary(&self) -> &BTreeMap<String, String> {
		&self.secondary
	}

	/// Every package of the solution.
	pub fn all(&self) -> BTreeMap<&str, &str> {
		self.primary
			.iter()
			.chain(self.secondary.iter())
			.map(|(name, version)| (name.as_str(), version.as_str()))
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn plan(entries: &[(&str, &str)]) -> LinkPlan {
		entries.iter().map(|(n, v)| (n.to_string(), v.to_string())).collect()
	}

	fn names(names: &[&str]) -> Vec<String> {
		names.iter().map(|s| s.to_string()).collect()
	}

	#[test]
	fn partition_primary_and_secondary() {
		let plan = plan(&[("python", "3.8.10"), ("numpy", "1.24.0"), ("mkl", "2023.1")]);
		let solution = Solution::partition(&names(&["numpy", "python"]), &plan).unwrap();

		assert_eq!(solution.python(), "3.8.10");
		assert_eq!(solution.primary_without_python().collect::<Vec<_>>(), [("numpy", "1.24.0")]);
		assert_eq!(solution.secondary().get("mkl").map(String::as_str), Some("2023.1"));
	}

	#[test]
	fn partition_is_disjoint_and_complete() {
		let plan = plan(&[
			("python", "3.10.12"), ("zlib", "1.2.13"), ("scipy", "1.11.1"), ("numpy", "1.25.2"),
			("libblas", "3.9.0"), ("pip", "23.2.1"), ("openssl", "3.1.2"),
		]);
		let requested = names(&["scipy", "python", "pip", "not-in-plan"]);
		let solution = Solution::partition(&requested, &plan).unwrap();

		for name in solution.primary().keys() {
			assert!(requested.contains(name));
			assert!(!solution.secondary().contains_key(name));
		}
		for name in solution.secondary().keys() {
			assert!(!requested.contains(name));
		}
		let all: Vec<_> = solution.all().into_keys().collect();
		let mut expected: Vec<_> = plan.iter().map(|a| a.name.as_str()).collect();
		expected.sort();
		assert_eq!(all, expected);
	}

	#[test]
	fn partition_requires_python() {
		let plan = plan(&[("numpy", "1.24.0")]);
		assert!(matches!(Solution::partition(&names(&["numpy"]), &plan), Err(crate::Error::Validation(_))));
	}
}
