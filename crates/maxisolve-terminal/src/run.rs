//! The solve loop behind the `solve` command.

use std::io::Write;

use maxisolve::platform::{Platform, PythonRuntime};
use maxisolve::repodata::Fetch;
use maxisolve::solver::Solver;
use maxisolve::{Config, Environments, Matrix, Session};

use crate::Error;

/// Loads the platform matrix and the environments `config` points at.
///
/// # Errors
/// [`MissingConfiguration`](maxisolve::Error::MissingConfiguration) when either document doesn't exist.
pub fn load_documents(config: &Config) -> Result<(Matrix, Environments), Error> {
	let matrix = Matrix::load(config.matrix_path())?;
	let environments = Environments::load(config.packages_path())?;
	Ok((matrix, environments))
}

/// Solves every environment for every target and prints a summary of each to `out`.
///
/// A target missing from the matrix is skipped. An environment that can't be prepared or solved doesn't stop the run.
///
/// # Parameters
/// - `targets` - Platforms to solve for, each with the interpreter it is pinned to.
/// - `only` - Names of the environments to solve, all of them when empty.
/// # Errors
/// Only errors writing to `out`.
pub fn solve_targets<F: Fetch, S: Solver, W: Write>(
	session: &mut Session<F, S>,
	matrix: &Matrix,
	environments: &Environments,
	targets: &[(Platform, PythonRuntime)],
	only: &[String],
	out: &mut W,
) -> Result<(), Error> {
	for name in only {
		if environments.get(name).is_none() {
			log::warn!("Environment {} is not listed in '{}'", name, session.config().packages_path().display());
		}
	}

	for (platform, runtime) in targets {
		let designator = match matrix.designator(platform) {
			Some(d) => d.clone(),
			None => {
				writeln!(out, "Current {} not found in '{}'", platform, session.config().matrix_path().display())?;
				continue;
			},
		};

		for (environment, packages) in environments.iter() {
			if !only.is_empty() && !only.iter().any(|o| o == environment) {
				continue;
			}

			writeln!(out, "{}/{}/{}:", designator.subdir(), designator.python_tag(), environment)?;
			writeln!(out, "   primary packages:")?;
			for package in packages {
				writeln!(out, "      {}", package)?;
			}

			let prepared = match session.prepare(&designator, environment, packages, *runtime) {
				Ok(p) => p,
				Err(e) => {
					log::error!("Failed to get available packages for {}: {}", designator, e);
					continue;
				},
			};

			if prepared.injected_python {
				writeln!(out, "   including in primary packages:")?;
				writeln!(out, "      python")?;
			}
			if !prepared.excluded.is_empty() {
				writeln!(out, "   excluding from primary packages:")?;
				for package in &prepared.excluded {
					writeln!(out, "      {}", package)?;
				}
			}

			writeln!(out, "   solution:")?;
			match session.solve(&prepared) {
				Ok(Some(report)) => {
					let solution = &report.solution;
					let primary: Vec<_> = solution.primary_without_python().collect();
					writeln!(out, "      python = {}", solution.python())?;
					writeln!(out, "      {} primary packages:", primary.len())?;
					for (name, version) in primary {
						writeln!(out, "         {} = {}", name, version)?;
					}
					writeln!(out, "      {} secondary packages:", solution.secondary().len())?;
					for (name, version) in solution.secondary() {
						writeln!(out, "         {} = {}", name, version)?;
					}
				},
				Ok(None) => writeln!(out, "      No solution found!")?,
				Err(e) => log::error!("Failed to record solution of {}: {}", environment, e),
			}
		}
	}

	Ok(())
}

/// Tells the user why the run stopped.
pub fn report_error<W: Write>(e: &Error, out: &mut W) -> std::io::Result<()> {
	match e {
		Error::Maxisolve(maxisolve::Error::MissingConfiguration(path)) => {
			writeln!(out, "couldn't find '{}'", path.display())?;
			writeln!(out, "maxiconda-envs not checked out ?")?;
		},
		_ => log::error!("{}", e),
	}
	Ok(())
}
