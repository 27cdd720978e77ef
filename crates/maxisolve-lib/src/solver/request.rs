use crate::platform::{PythonImplementation, PythonRuntime};

/// Everything a solver needs for one environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveRequest {
	pub environment: String,
	/// Repository subdir to solve for, e.g. `linux-64`.
	pub subdir: String,
	pub channels: Vec<String>,
	/// Primary package names, already filtered for availability. Contains `python`.
	pub packages: Vec<String>,
	pub python: PythonRuntime,
}

impl SolveRequest {
	/// Package specs to hand to the solver, the bare `python` entry replaced by its pin.
	pub fn specs(&self) -> Vec<String> {
		self.packages
			.iter()
			.map(|p| if p == "python" { python_pin(&self.python) } else { p.clone() })
			.collect()
	}
}

/// Match spec pinning the interpreter package to a runtime.
///
/// `python=3.8` for CPython, `python=3.9=*_pypy` for PyPy.
pub fn python_pin(runtime: &PythonRuntime) -> String {
	match runtime.implementation {
		PythonImplementation::CPython => format!("python={}", runtime.version),
		PythonImplementation::PyPy => format!("python={}=*_pypy", runtime.version),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::platform::PythonVersion;

	#[test]
	fn specs_pin_python() {
		let request = SolveRequest {
			environment: "core".to_string(),
			subdir: "linux-64".to_string(),
			channels: vec!["conda-forge".to_string()],
			packages: vec!["numpy".to_string(), "python".to_string()],
			python: PythonRuntime::new(PythonImplementation::CPython, PythonVersion::new(3, 8)),
		};
		assert_eq!(request.specs(), ["numpy", "python=3.8"]);
	}

	#[test]
	fn pypy_pin() {
		let rt = PythonRuntime::new(PythonImplementation::PyPy, PythonVersion::new(3, 9));
		assert_eq!(python_pin(&rt), "python=3.9=*_pypy");
	}
}
