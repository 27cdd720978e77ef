use std::path::{Path, PathBuf};

/// Runtime settings for a solve run.
///
/// Every field has a default so a partial JSON file only overrides what it names.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Config {
	matrix_path: PathBuf,
	packages_path: PathBuf,
	solutions_dir: PathBuf,
	consolidated_dir: PathBuf,
	repodata_url: String,
	repodata_file: String,
	channels: Vec<String>,
	solver: String,
	python: String,
	https_only: bool,
}

impl Default for Config {
	fn default() -> Self {
		let specs = PathBuf::from("maxiconda-envs").join("specs");
		Self {
			matrix_path: specs.join("matrix.yaml"),
			packages_path: specs.join("primary_packages.yaml"),
			solutions_dir: specs.join("solutions"),
			consolidated_dir: specs.join("consolidated"),
			repodata_url: "https://conda.anaconda.org".to_string(),
			repodata_file: "repodata.json.zst".to_string(),
			channels: vec!["conda-forge".to_string()],
			solver: "mamba".to_string(),
			python: if cfg!(target_os = "windows") { "python".to_string() } else { "python3".to_string() },
			https_only: true,
		}
	}
}

impl Config {
	/// Where the config file lives when none is given explicitly.
	///
	/// Returns `None` when neither `XDG_CONFIG_HOME`/`HOME` (or `APPDATA` on windows) are set.
	pub fn default_path() -> Option<PathBuf> {
		#[cfg(target_os = "windows")]
		let path = std::env::var("APPDATA").ok().map(PathBuf::from);

		#[cfg(not(target_os = "windows"))]
		let path = if let Ok(e) = std::env::var("XDG_CONFIG_HOME") {
			Some(PathBuf::from(e))
		} else {
			std::env::var("HOME").ok().map(|home| PathBuf::from(home).join(".config"))
		};

		path.map(|p| p.join("maxisolve").join("config.json"))
	}

	/// Loads a config from a JSON file.
	///
	/// # Errors
	/// - [`IO`](crate::error::Error::IO) when the file can't be opened.
	/// - [`SerdeJSON`](crate::error::Error::SerdeJSON) when the file isn't a valid config.
	pub fn load_from_disk(path: impl AsRef<Path>) -> crate::Result<Self> {
		let file = std::fs::File::open(path.as_ref())?;
		let config: Config = serde_json::from_reader(std::io::BufReader::new(file))?;
		log::debug!("Loaded config from {}", path.as_ref().display());
		Ok(config)
	}

	/* Fields */

	pub fn matrix_path(&self) -> &Path {
		&self.matrix_path
	}
	pub fn set_matrix_path(&mut self, path: PathBuf) {
		self.matrix_path = path;
	}

	pub fn packages_path(&self) -> &Path {
		&self.packages_path
	}
	pub fn set_packages_path(&mut self, path: PathBuf) {
		self.packages_path = path;
	}

	pub fn solutions_dir(&self) -> &Path {
		&self.solutions_dir
	}
	pub fn set_solutions_dir(&mut self, path: PathBuf) {
		self.solutions_dir = path;
	}

	pub fn consolidated_dir(&self) -> &Path {
		&self.consolidated_dir
	}
	pub fn set_consolidated_dir(&mut self, path: PathBuf) {
		self.consolidated_dir = path;
	}

	/// Base of the channel URLs, channel and subdir are appended to it.
	pub fn repodata_url(&self) -> &str {
		&self.repodata_url
	}
	pub fn set_repodata_url(&mut self, url: String) {
		self.repodata_url = url;
	}

	/// File name of the metadata feed inside each subdir, its suffix picks the decompression.
	pub fn repodata_file(&self) -> &str {
		&self.repodata_file
	}
	pub fn set_repodata_file(&mut self, file: String) {
		self.repodata_file = file;
	}

	pub fn channels(&self) -> &[String] {
		&self.channels
	}
	pub fn set_channels(&mut self, channels: Vec<String>) {
		self.channels = channels;
	}

	/// Executable used for solving, `mamba` or `conda`.
	pub fn solver(&self) -> &str {
		&self.solver
	}
	pub fn set_solver(&mut self, solver: String) {
		self.solver = solver;
	}

	/// Interpreter queried when no python version is given.
	pub fn python(&self) -> &str {
		&self.python
	}
	pub fn set_python(&mut self, python: String) {
		self.python = python;
	}

	pub fn https_only(&self) -> bool {
		self.https_only
	}
	pub fn set_https_only(&mut self, https_only: bool) {
		self.https_only = https_only;
	}

	/// URL of a metadata feed for `subdir` in `channel`.
	pub fn feed_url(&self, channel: &str, subdir: &str) -> String {
		format!("{}/{}/{}/{}", self.repodata_url.trim_end_matches('/'), channel, subdir, self.repodata_file)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn partial_config_keeps_defaults() {
		let config: Config = serde_json::from_str(r#"{ "solver": "conda", "channels": ["bioconda", "conda-forge"] }"#).unwrap();
		assert_eq!(config.solver(), "conda");
		assert_eq!(config.channels(), ["bioconda", "conda-forge"]);
		assert_eq!(config.repodata_file(), "repodata.json.zst");
		assert!(config.https_only());
		assert_eq!(config.matrix_path(), Path::new("maxiconda-envs/specs/matrix.yaml"));
	}

	#[test]
	fn feed_url_joins_parts() {
		let mut config = Config::default();
		config.set_repodata_url("https://conda.anaconda.org/".to_string());
		assert_eq!(
			config.feed_url("conda-forge", "linux-64"),
			"https://conda.anaconda.org/conda-forge/linux-64/repodata.json.zst"
		);
	}

	#[test]
	fn load_missing_file_is_io_error() {
		let res = Config::load_from_disk("/nonexistent/maxisolve/config.json");
		assert!(matches!(res, Err(crate::Error::IO(_))));
	}
}
