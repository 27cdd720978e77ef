use serde::Deserialize;

/// A package the solver would link into the environment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LinkAction {
	pub name: String,
	pub version: String,
}

/// The packages a dry run would install.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkPlan {
	pub actions: Vec<LinkAction>,
}

#[derive(Debug, Deserialize)]
struct SolverOutput {
	#[serde(default)]
	success: Option<bool>,
	#[serde(default)]
	actions: Option<Actions>,
	#[serde(default)]
	message: Option<String>,
	#[serde(default)]
	error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Actions {
	#[serde(rename = "LINK", default)]
	link: Option<Vec<LinkAction>>,
}

impl LinkPlan {
	/// Parses the `--json` output of a dry run.
	///
	/// # Errors
	/// - [`SerdeJSON`](crate::error::Error::SerdeJSON) when `s` isn't a JSON document.
	/// - [`Validation`](crate::error::Error::Validation) when the document holds no link actions,
	/// the message of the solver is included when there is one.
	pub fn parse(s: &str) -> crate::Result<Self> {
		let output: SolverOutput = serde_json::from_str(s)?;
		let reason = output.error.or(output.message);
		if output.success == Some(false) {
			return Err(crate::Error::Validation(reason.unwrap_or_else(|| "solver reported failure".to_string())));
		}
		match output.actions.and_then(|a| a.link) {
			Some(link) => Ok(LinkPlan { actions: link }),
			None => Err(crate::Error::Validation(reason.unwrap_or_else(|| "solver output has no link actions".to_string()))),
		}
	}

	pub fn iter(&self) -> impl Iterator<Item = &LinkAction> {
		self.actions.iter()
	}

	pub fn len(&self) -> usize {
		self.actions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.actions.is_empty()
	}
}

impl FromIterator<(String, String)> for LinkPlan {
	fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
		LinkPlan {
			actions: iter.into_iter().map(|(name, version)| LinkAction { name, version }).collect(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parse_dry_run() {
		let plan = LinkPlan::parse(r#"{
			"actions": {
				"FETCH": [],
				"LINK": [
					{ "base_url": "https://conda.anaconda.org/conda-forge", "build_number": 0, "build_string": "h0_cpython", "channel": "conda-forge", "dist_name": "python-3.8.10-h0_cpython", "name": "python", "platform": "linux-64", "version": "3.8.10" },
					{ "name": "numpy", "version": "1.24.0" }
				],
				"PREFIX": "/opt/conda/envs/maxisolve-core"
			},
			"dry_run": true,
			"prefix": "/opt/conda/envs/maxisolve-core",
			"success": true
		}"#).unwrap();
		assert_eq!(plan.len(), 2);
		assert_eq!(plan.actions[0], LinkAction { name: "python".to_string(), version: "3.8.10".to_string() });
	}

	#[test]
	fn parse_failure_document() {
		let res = LinkPlan::parse(r#"{ "success": false, "solver_problems": ["nothing provides foo"], "message": "Could not solve" }"#);
		match res {
			Err(crate::Error::Validation(msg)) => assert_eq!(msg, "Could not solve"),
			other => panic!("expected validation error, got {:?}", other),
		}
	}

	#[test]
	fn parse_without_actions() {
		assert!(matches!(LinkPlan::parse(r#"{ "success": true }"#), Err(crate::Error::Validation(_))));
		assert!(matches!(LinkPlan::parse(r#"{ "error": "PackagesNotFoundError" }"#), Err(crate::Error::Validation(_))));
	}

	#[test]
	fn parse_not_json() {
		assert!(matches!(LinkPlan::parse(""), Err(crate::Error::SerdeJSON(_))));
		assert!(matches!(LinkPlan::parse("Looking for: ['numpy']"), Err(crate::Error::SerdeJSON(_))));
	}
}
