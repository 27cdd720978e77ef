//! Stand-ins for the network and the solver, plus fixtures for scenario tests.
//!
//! [`StaticFetcher`] and [`ScriptedSolver`] replace the repository and `mamba`, remembering what they were asked.
//! [`Workspace`] keeps the matrix and package documents of a run in a temporary directory.
//! Fixture builders return [`Result`] rather than panicking.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use maxisolve::repodata::Fetch;
use maxisolve::solver::{LinkPlan, SolveOutcome, SolveRequest, Solver};

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("IO error: {0}")]
	IO(#[from] std::io::Error),
	#[error("JSON error: {0}")]
	SerdeJSON(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Serializes a `repodata.json` holding the given `(name, version, build)` records.
pub fn repodata_json(subdir: &str, records: &[(&str, &str, &str)]) -> Result<Vec<u8>> {
	let mut packages = serde_json::Map::new();
	for (name, version, build) in records {
		packages.insert(
			format!("{}-{}-{}.tar.bz2", name, version, build),
			serde_json::json!({
				"name": name,
				"version": version,
				"build": build,
				"build_number": 0,
				"depends": [],
				"subdir": subdir,
			}),
		);
	}
	let doc = serde_json::json!({
		"info": { "subdir": subdir },
		"packages": packages,
		"packages.conda": {},
		"repodata_version": 1,
	});
	Ok(serde_json::to_vec(&doc)?)
}

/// Same as [`repodata_json`] but zstd compressed, like the feeds served as `repodata.json.zst`.
pub fn repodata_zst(subdir: &str, records: &[(&str, &str, &str)]) -> Result<Vec<u8>> {
	let json = repodata_json(subdir, records)?;
	Ok(zstd::stream::encode_all(json.as_slice(), 3)?)
}

/// Same as [`repodata_json`] but gzip compressed.
pub fn repodata_gz(subdir: &str, records: &[(&str, &str, &str)]) -> Result<Vec<u8>> {
	use std::io::Write;
	let json = repodata_json(subdir, records)?;
	let mut gz = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
	gz.write_all(&json)?;
	Ok(gz.finish()?)
}

/// Serves fixed bytes per URL and remembers every request.
#[derive(Debug, Default)]
pub struct StaticFetcher {
	feeds: HashMap<String, Vec<u8>>,
	requests: RefCell<Vec<String>>,
}

impl StaticFetcher {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_feed(mut self, url: impl Into<String>, data: Vec<u8>) -> Self {
		self.feeds.insert(url.into(), data);
		self
	}

	/// URLs fetched so far, in order.
	pub fn requests(&self) -> Vec<String> {
		self.requests.borrow().clone()
	}
}

impl Fetch for StaticFetcher {
	fn fetch(&self, url: &str) -> maxisolve::Result<Vec<u8>> {
		self.requests.borrow_mut().push(url.to_string());
		self.feeds
			.get(url)
			.cloned()
			.ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, format!("no feed at {}", url)).into())
	}
}

/// Answers solve requests with a fixed outcome per environment and remembers every request.
///
/// Environments without an outcome get [`SolveOutcome::NoSolution`].
#[derive(Debug, Default)]
pub struct ScriptedSolver {
	outcomes: HashMap<String, SolveOutcome>,
	requests: RefCell<Vec<SolveRequest>>,
}

impl ScriptedSolver {
	pub fn new() -> Self {
		Self::default()
	}

	/// Solves `environment` to the given `(name, version)` packages.
	pub fn with_plan(mut self, environment: &str, packages: &[(&str, &str)]) -> Self {
		let plan: LinkPlan = packages.iter().map(|(n, v)| (n.to_string(), v.to_string())).collect();
		self.outcomes.insert(environment.to_string(), SolveOutcome::Solved(plan));
		self
	}

	/// Solves `environment` by parsing raw solver output, like the real tool would hand it over.
	pub fn with_output(mut self, environment: &str, output: &str) -> Self {
		let outcome = match LinkPlan::parse(output) {
			Ok(plan) => SolveOutcome::Solved(plan),
			Err(e) => SolveOutcome::NoSolution(e.to_string()),
		};
		self.outcomes.insert(environment.to_string(), outcome);
		self
	}

	pub fn requests(&self) -> Vec<SolveRequest> {
		self.requests.borrow().clone()
	}
}

impl Solver for ScriptedSolver {
	fn solve(&self, request: &SolveRequest) -> SolveOutcome {
		self.requests.borrow_mut().push(request.clone());
		self.outcomes
			.get(&request.environment)
			.cloned()
			.unwrap_or_else(|| SolveOutcome::NoSolution(format!("no outcome scripted for {}", request.environment)))
	}
}

/// A temporary directory holding the configuration documents of a run.
pub struct Workspace {
	dir: tempfile::TempDir,
}

impl Workspace {
	pub fn new(matrix: &str, packages: &str) -> Result<Self> {
		let dir = tempfile::tempdir()?;
		std::fs::write(dir.path().join("matrix.yaml"), matrix)?;
		std::fs::write(dir.path().join("primary_packages.yaml"), packages)?;
		Ok(Self { dir })
	}

	pub fn path(&self) -> &Path {
		self.dir.path()
	}

	pub fn solutions_dir(&self) -> PathBuf {
		self.dir.path().join("solutions")
	}

	/// A config pointing at the documents of this workspace and at `repodata_url` for feeds.
	pub fn config(&self, repodata_url: &str) -> maxisolve::Config {
		let mut config = maxisolve::Config::default();
		config.set_matrix_path(self.dir.path().join("matrix.yaml"));
		config.set_packages_path(self.dir.path().join("primary_packages.yaml"));
		config.set_solutions_dir(self.solutions_dir());
		config.set_consolidated_dir(self.dir.path().join("consolidated"));
		config.set_repodata_url(repodata_url.to_string());
		config
	}
}
