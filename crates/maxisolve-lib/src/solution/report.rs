//! The flat text report written per solved environment.
//!
//! ```text
//! # linux-64/py38/core
//!
//! python 3.8.10
//!
//! # 1 primary packages :
//!
//! numpy = 1.24.0
//!
//! # 1 secondary packages :
//!
//! mkl = 2023.1
//! ```

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use super::Solution;
use crate::Designator;

/// A solution together with where it belongs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
	pub subdir: String,
	pub python_tag: String,
	pub environment: String,
	pub solution: Solution,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Section {
	Preamble,
	Primary,
	Secondary,
}

impl Report {
	pub fn new(designator: &Designator, environment: &str, solution: Solution) -> Self {
		Self {
			subdir: designator.subdir().to_string(),
			python_tag: designator.python_tag().to_string(),
			environment: environment.to_string(),
			solution,
		}
	}

	/// `{solutions_dir}/{subdir}/{python_tag}/{environment}.txt`
	pub fn path_for(solutions_dir: &Path, subdir: &str, python_tag: &str, environment: &str) -> PathBuf {
		solutions_dir.join(subdir).join(python_tag).join(format!("{}.txt", environment))
	}

	pub fn path(&self, solutions_dir: &Path) -> PathBuf {
		Self::path_for(solutions_dir, &self.subdir, &self.python_tag, &self.environment)
	}

	pub fn render(&self) -> String {
		let mut s = String::new();
		let primary: Vec<_> = self.solution.primary_without_python().collect();

		/* Writing to a String can't fail */
		let _ = writeln!(s, "# {}/{}/{}", self.subdir, self.python_tag, self.environment);
		let _ = writeln!(s, "\npython {}", self.solution.python());

		let _ = writeln!(s, "\n# {} primary packages :\n", primary.len());
		for (name, version) in primary {
			let _ = writeln!(s, "{} = {}", name, version);
		}

		let _ = writeln!(s, "\n# {} secondary packages :\n", self.solution.secondary().len());
		for (name, version) in self.solution.secondary() {
			let _ = writeln!(s, "{} = {}", name, version);
		}
		s
	}

	/// Writes the report below `solutions_dir`, replacing an earlier one.
	///
	/// # Errors
	/// [`IO`](crate::error::Error::IO) when creating the directories or writing the file.
	pub fn write(&self, solutions_dir: &Path) -> crate::Result<PathBuf> {
		let path = self.path(solutions_dir);
		if let Some(parent) = path.parent() {
			std::fs::create_dir_all(parent)?;
		}
		std::fs::write(&path, self.render())?;
		log::info!("Wrote solution to {}", path.display());
		Ok(path)
	}

	/// Reads back a report written by [`write()`](Report::write()).
	pub fn read(path: impl AsRef<Path>) -> crate::Result<Self> {
		let s = std::fs::read_to_string(path.as_ref())?;
		Self::parse(&s).map_err(|e| match e {
			crate::Error::Parse(msg) => crate::Error::Parse(format!("{}: {}", path.as_ref().display(), msg)),
			e => e,
		})
	}

	/// Parses the text produced by [`render()`](Report::render()).
	///
	/// # Errors
	/// [`Parse`](crate::error::Error::Parse) when the text doesn't follow the report layout or a section
	/// holds a different number of packages than its header says.
	pub fn parse(s: &str) -> crate::Result<Self> {
		let section_header = regex::Regex::new(r"^# (\d+) (primary|secondary) packages :$").expect("section header regex should compile.");
		let mut lines = s.lines().map(str::trim).filter(|l| !l.is_empty());

		let header = lines.next().ok_or_else(|| crate::Error::Parse("report is empty".to_string()))?;
		let parts: Vec<&str> = header.strip_prefix("# ").unwrap_or("").split('/').collect();
		let (subdir, python_tag, environment) = match parts.as_slice() {
			[a, b, c] if !a.is_empty() && !b.is_empty() && !c.is_empty() => (a.to_string(), b.to_string(), c.to_string()),
			_ => return Err(crate::Error::Parse(format!("report header '{}' is not of the form '# SUBDIR/PYTAG/ENVIRONMENT'", header))),
		};

		let mut python = None;
		let mut section = Section::Preamble;
		let mut expected = (0usize, 0usize);
		let mut primary = BTreeMap::new();
		let mut secondary = BTreeMap::new();

		for line in lines {
			if let Some(caps) = section_header.captures(line) {
				let count = caps[1].parse::<usize>().map_err(|_| crate::Error::Parse(format!("bad package count in '{}'", line)))?;
				if &caps[2] == "primary" {
					section = Section::Primary;
					expected.0 = count;
				} else {
					section = Section::Secondary;
					expected.1 = count;
				}
				continue;
			}

			match section {
				Section::Preamble => {
					let version = line.strip_prefix("python ")
						.ok_or_else(|| crate::Error::Parse(format!("unexpected line '{}' before the package sections", line)))?;
					python = Some(version.trim().to_string());
				},
				Section::Primary | Section::Secondary => {
					let (name, version) = line.split_once(" = ")
						.ok_or_else(|| crate::Error::Parse(format!("'{}' is not of the form 'name = version'", line)))?;
					let target = if section == Section::Primary { &mut primary } else { &mut secondary };
					target.insert(name.trim().to_string(), version.trim().to_string());
				},
			}
		}

		let python = python.ok_or_else(|| crate::Error::Parse("report has no python line".to_string()))?;
		if primary.len() != expected.0 || secondary.len() != expected.1 {
			return Err(crate::Error::Parse(format!(
				"report lists {} primary and {} secondary packages but its headers say {} and {}",
				primary.len(), secondary.len(), expected.0, expected.1
			)));
		}
		primary.insert("python".to_string(), python);

		let solution = Solution::from_parts(primary, secondary)
			.map_err(|e| crate::Error::Parse(e.to_string()))?;
		Ok(Report { subdir, python_tag, environment, solution })
	}
}
