//! Identification of the platform a solve is run for.
//!
//! A [`Platform`] is the triple used as key into the matrix: operating system, CPU and python tag.

use std::fmt;

use crate::Error::UnsupportedPlatform;

/// Operating systems the matrix knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OsClass {
	Linux,
	Windows,
	MacOS,
}

impl OsClass {
	/// Maps an OS name as reported by `std::env::consts::OS` or `uname`.
	pub fn from_name(name: &str) -> crate::Result<Self> {
		match name.to_ascii_lowercase().as_str() {
			"linux" => Ok(OsClass::Linux),
			"windows" => Ok(OsClass::Windows),
			"macos" | "darwin" => Ok(OsClass::MacOS),
			_ => Err(UnsupportedPlatform(format!("'{}' not supported.", name))),
		}
	}

	/// Name used as key in the matrix.
	pub fn as_str(&self) -> &'static str {
		match self {
			OsClass::Linux => "Linux",
			OsClass::Windows => "Windows",
			OsClass::MacOS => "MacOS",
		}
	}
}

impl fmt::Display for OsClass {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CpuClass {
	X86_64,
	Aarch64,
}

impl CpuClass {
	/// Accepts the Rust target names as well as the machine names Windows (`AMD64`) and macOS (`arm64`) report.
	pub fn from_name(name: &str) -> crate::Result<Self> {
		match name.to_ascii_lowercase().as_str() {
			"x86_64" | "amd64" => Ok(CpuClass::X86_64),
			"aarch64" | "arm64" => Ok(CpuClass::Aarch64),
			_ => Err(UnsupportedPlatform(format!("'{}' not supported.", name))),
		}
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			CpuClass::X86_64 => "x86_64",
			CpuClass::Aarch64 => "aarch64",
		}
	}
}

impl fmt::Display for CpuClass {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PythonImplementation {
	CPython,
	PyPy,
}

impl PythonImplementation {
	/// Parses the value of `platform.python_implementation()`, case is ignored.
	pub fn from_name(name: &str) -> crate::Result<Self> {
		match name.trim().to_ascii_lowercase().as_str() {
			"cpython" => Ok(PythonImplementation::CPython),
			"pypy" => Ok(PythonImplementation::PyPy),
			_ => Err(UnsupportedPlatform(format!("'{}' not supported.", name.trim()))),
		}
	}

	fn tag_prefix(&self) -> &'static str {
		match self {
			PythonImplementation::CPython => "py",
			PythonImplementation::PyPy => "pypy",
		}
	}
}

impl fmt::Display for PythonImplementation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			PythonImplementation::CPython => f.write_str("CPython"),
			PythonImplementation::PyPy => f.write_str("PyPy"),
		}
	}
}

/// Major and minor version of a python runtime, patch levels are irrelevant for solving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PythonVersion {
	pub major: u32,
	pub minor: u32,
}

impl PythonVersion {
	pub fn new(major: u32, minor: u32) -> Self {
		Self { major, minor }
	}
}

impl TryFrom<&str> for PythonVersion {
	type Error = crate::Error;
	/// Accepts `3.8`, `3.8.10`, `3.10.4+` and the like.
	fn try_from(value: &str) -> Result<Self, Self::Error> {
		let re = regex::Regex::new(r"^\s*(\d+)\.(\d+)").expect("python version regex should compile.");
		let caps = re.captures(value).ok_or_else(|| crate::Error::Parse(format!("'{}' is not a python version", value)))?;
		let parse = |s: &str| s.parse::<u32>().map_err(|_| crate::Error::Parse(format!("'{}' is not a python version", value)));
		Ok(PythonVersion {
			major: parse(&caps[1])?,
			minor: parse(&caps[2])?,
		})
	}
}

impl fmt::Display for PythonVersion {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}.{}", self.major, self.minor)
	}
}

/// A python implementation and version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PythonRuntime {
	pub implementation: PythonImplementation,
	pub version: PythonVersion,
}

impl PythonRuntime {
	pub fn new(implementation: PythonImplementation, version: PythonVersion) -> Self {
		Self { implementation, version }
	}

	/// Asks an interpreter what it is.
	///
	/// # Parameters
	/// - `interpreter` - Executable name or path of the python to query.
	/// # Errors
	/// - [`IO`](crate::error::Error::IO) when the interpreter can't be run.
	/// - [`Parse`](crate::error::Error::Parse) when its answer isn't understood.
	/// - [`UnsupportedPlatform`](crate::error::Error::UnsupportedPlatform) for implementations other than CPython and PyPy.
	pub fn detect(interpreter: &str) -> crate::Result<Self> {
		log::debug!("Querying {} for its implementation and version", interpreter);
		let output = std::process::Command::new(interpreter)
			.args(["-c", "import platform; print(platform.python_implementation()); print(platform.python_version())"])
			.output()?;
		if !output.status.success() {
			return Err(crate::Error::Parse(format!("{} exited with {}", interpreter, output.status)));
		}
		Self::parse_answer(&String::from_utf8_lossy(&output.stdout))
	}

	/// Parses the two line answer of the snippet run by [`detect()`](PythonRuntime::detect()).
	fn parse_answer(s: &str) -> crate::Result<Self> {
		let mut lines = s.lines().map(str::trim).filter(|l| !l.is_empty());
		let implementation = lines.next().ok_or_else(|| crate::Error::Parse("python implementation missing from interpreter output".to_string()))?;
		let version = lines.next().ok_or_else(|| crate::Error::Parse("python version missing from interpreter output".to_string()))?;
		Ok(PythonRuntime {
			implementation: PythonImplementation::from_name(implementation)?,
			version: PythonVersion::try_from(version)?,
		})
	}

	pub fn tag(&self) -> PythonTag {
		PythonTag(format!("{}{}{}", self.implementation.tag_prefix(), self.version.major, self.version.minor))
	}
}

/// `py38`, `pypy39`, ...
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PythonTag(String);

impl PythonTag {
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for PythonTag {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// The key into the matrix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Platform {
	pub os: OsClass,
	pub cpu: CpuClass,
	pub python: PythonTag,
}

impl fmt::Display for Platform {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}/{}/{}", self.os, self.cpu, self.python)
	}
}

/// Identifies a platform from its raw parts.
///
/// # Parameters
/// - `os` - OS name, e.g. `std::env::consts::OS`.
/// - `cpu` - CPU name, e.g. `std::env::consts::ARCH`.
/// - `pointer_width` - Width of a pointer in bits, only 64 is supported.
/// - `runtime` - The python the solve is for.
/// # Errors
/// [`UnsupportedPlatform`](crate::error::Error::UnsupportedPlatform) when any part isn't recognized.
pub fn identify(os: &str, cpu: &str, pointer_width: u32, runtime: &PythonRuntime) -> crate::Result<Platform> {
	let os = OsClass::from_name(os)?;
	if pointer_width != 64 {
		return Err(UnsupportedPlatform("only 64 bit platforms are supported.".to_string()));
	}
	let cpu = CpuClass::from_name(cpu)?;
	Ok(Platform { os, cpu, python: runtime.tag() })
}

/// Identifies the platform this process is running on.
pub fn identify_running(runtime: &PythonRuntime) -> crate::Result<Platform> {
	#[cfg(target_pointer_width = "64")]
	let pointer_width = 64;
	#[cfg(not(target_pointer_width = "64"))]
	let pointer_width = 32;

	identify(std::env::consts::OS, std::env::consts::ARCH, pointer_width, runtime)
}
