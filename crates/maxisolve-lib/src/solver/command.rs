use std::process::Command;

use super::{LinkPlan, SolveOutcome, SolveRequest, Solver};

/// Solves by running `mamba`/`conda create --dry-run --json`.
///
/// Specs are passed as arguments and `CONDA_SUBDIR` is set so the solve targets the designator's
/// platform instead of the one we run on.
#[derive(Debug, Clone)]
pub struct CommandSolver {
	executable: String,
}

impl CommandSolver {
	pub fn new(executable: impl Into<String>) -> Self {
		Self { executable: executable.into() }
	}

	/// Arguments passed to the executable.
	pub fn arguments(&self, request: &SolveRequest) -> Vec<String> {
		let mut args = vec![
			"create".to_string(),
			"--name".to_string(),
			format!("maxisolve-{}", request.environment),
			"--dry-run".to_string(),
			"--json".to_string(),
			"--override-channels".to_string(),
		];
		for channel in &request.channels {
			args.push("-c".to_string());
			args.push(channel.clone());
		}
		args.extend(request.specs());
		args
	}
}

impl Solver for CommandSolver {
	fn solve(&self, request: &SolveRequest) -> SolveOutcome {
		let args = self.arguments(request);
		log::debug!("Running {} {}", self.executable, args.join(" "));

		let output = match Command::new(&self.executable)
			.args(&args)
			.env("CONDA_SUBDIR", &request.subdir)
			.output()
		{
			Ok(output) => output,
			Err(e) => return SolveOutcome::NoSolution(format!("failed to run {}: {}", self.executable, e)),
		};

		/* A failed solve still exits with a JSON document on stdout, so the status alone doesn't decide */
		if !output.status.success() {
			log::warn!("{} exited with {}", self.executable, output.status);
			let stderr = String::from_utf8_lossy(&output.stderr);
			if !stderr.trim().is_empty() {
				log::debug!("{} stderr: {}", self.executable, stderr.trim());
			}
		}

		let stdout = match String::from_utf8(output.stdout) {
			Ok(s) => s,
			Err(_) => return SolveOutcome::NoSolution(format!("{} output isn't UTF-8", self.executable)),
		};

		match LinkPlan::parse(&stdout) {
			Ok(plan) => SolveOutcome::Solved(plan),
			Err(e) => SolveOutcome::NoSolution(e.to_string()),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::platform::*;

	fn request() -> SolveRequest {
		SolveRequest {
			environment: "core".to_string(),
			subdir: "linux-64".to_string(),
			channels: vec!["conda-forge".to_string(), "bioconda".to_string()],
			packages: vec!["python".to_string(), "numpy".to_string()],
			python: PythonRuntime::new(PythonImplementation::CPython, PythonVersion::new(3, 8)),
		}
	}

	#[test]
	fn arguments_are_inline() {
		let args = CommandSolver::new("mamba").arguments(&request());
		assert_eq!(args, [
			"create", "--name", "maxisolve-core", "--dry-run", "--json", "--override-channels",
			"-c", "conda-forge", "-c", "bioconda",
			"python=3.8", "numpy",
		]);
	}

	#[test]
	fn missing_executable_is_no_solution() {
		let solver = CommandSolver::new("/nonexistent/maxisolve/mamba");
		assert!(matches!(solver.solve(&request()), SolveOutcome::NoSolution(_)));
	}

	#[cfg(unix)]
	#[test]
	fn non_json_output_is_no_solution() {
		/* `echo` prints its arguments, which is not a JSON document */
		let solver = CommandSolver::new("echo");
		assert!(matches!(solver.solve(&request()), SolveOutcome::NoSolution(_)));
	}
}
