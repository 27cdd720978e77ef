//! One run over the matrix.
//!
//! For every environment a run first [`prepare()`](Session::prepare())s the request (inject `python`,
//! drop what the repository doesn't carry) and then [`solve()`](Session::solve())s it, writing the report.

use crate::platform::PythonRuntime;
use crate::repodata::{Fetch, HttpFetcher, PackageIndex, RepodataCache};
use crate::solution::Report;
use crate::solver::{CommandSolver, SolveOutcome, SolveRequest, Solver};
use crate::{Config, Designator, Solution};

/// A request ready to be handed to the solver, and how it came to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prepared {
	pub designator: Designator,
	/// Package names as listed in the environment.
	pub requested: Vec<String>,
	/// `python` wasn't listed and was added.
	pub injected_python: bool,
	/// Names dropped because no feed of the designator carries them.
	pub excluded: Vec<String>,
	pub request: SolveRequest,
}

pub struct Session<F: Fetch, S: Solver> {
	config: Config,
	cache: RepodataCache<F>,
	solver: S,
}

impl Session<HttpFetcher, CommandSolver> {
	/// A session fetching over HTTP and solving with the configured executable.
	pub fn from_config(config: Config) -> crate::Result<Self> {
		let fetcher = HttpFetcher::new(&config)?;
		let solver = CommandSolver::new(config.solver());
		Ok(Self::new(config, fetcher, solver))
	}
}

impl<F: Fetch, S: Solver> Session<F, S> {
	pub fn new(config: Config, fetcher: F, solver: S) -> Self {
		Self {
			config,
			cache: RepodataCache::new(fetcher),
			solver,
		}
	}

	pub fn config(&self) -> &Config {
		&self.config
	}

	pub fn cache(&self) -> &RepodataCache<F> {
		&self.cache
	}

	pub fn solver(&self) -> &S {
		&self.solver
	}

	/// Builds the solve request of an environment.
	///
	/// # Parameters
	/// - `designator` - The platform to solve for.
	/// - `environment` - Name of the environment, used for the report path.
	/// - `packages` - Primary packages of the environment.
	/// - `python` - Interpreter the solution is pinned to.
	/// # Errors
	/// Errors fetching or decoding the repository metadata of the designator.
	pub fn prepare(&mut self, designator: &Designator, environment: &str, packages: &[String], python: PythonRuntime) -> crate::Result<Prepared> {
		let index = PackageIndex::for_designator(&mut self.cache, &self.config, designator)?;

		// `python` is pinned by the request and never filtered.
		let mut filtered: Vec<String> = packages.iter().filter(|p| *p != "python").cloned().collect();
		let excluded = index.retain_available(&mut filtered);
		for package in &excluded {
			log::info!("Excluding {} from {}, not available for {}", package, environment, designator);
		}

		let injected_python = !packages.iter().any(|p| p == "python");
		if injected_python {
			log::debug!("Adding python to the primary packages of {}", environment);
		} else if !index.contains("python") {
			log::debug!("No python record for {}, keeping the pin anyway", designator);
		}
		filtered.push("python".to_string());

		Ok(Prepared {
			designator: designator.clone(),
			requested: packages.to_vec(),
			injected_python,
			excluded,
			request: SolveRequest {
				environment: environment.to_string(),
				subdir: designator.subdir().to_string(),
				channels: self.config.channels().to_vec(),
				packages: filtered,
				python,
			},
		})
	}

	/// Solves a prepared request and writes its report.
	///
	/// Returns `None` when the solver found no solution, nothing is written then.
	/// # Errors
	/// - [`Validation`](crate::error::Error::Validation) when the solution lacks the interpreter.
	/// - [`IO`](crate::error::Error::IO) when writing the report.
	pub fn solve(&self, prepared: &Prepared) -> crate::Result<Option<Report>> {
		let request = &prepared.request;
		log::info!("Solving {} for {}", request.environment, prepared.designator);

		let plan = match self.solver.solve(request) {
			SolveOutcome::Solved(plan) => plan,
			SolveOutcome::NoSolution(reason) => {
				log::error!("No solution for {} on {}: {}", request.environment, prepared.designator, reason);
				return Ok(None);
			},
		};

		let solution = Solution::partition(&request.packages, &plan)?;
		let report = Report::new(&prepared.designator, &request.environment, solution);
		report.write(self.config.solutions_dir())?;
		Ok(Some(report))
	}
}
