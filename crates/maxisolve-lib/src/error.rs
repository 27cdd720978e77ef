//! Library error type.

pub type Result<T> = std::result::Result<T, Error>;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
	#[error("reqwest error: {0}")]
	Reqwest(#[from] reqwest::Error),
	#[error("IO error: {0}")]
	IO(#[from] std::io::Error),
	#[error("JSON error: {0}")]
	SerdeJSON(#[from] serde_json::Error),
	#[error("YAML error: {0}")]
	SerdeYAML(#[from] serde_yaml::Error),
	#[error("CSV error: {0}")]
	Csv(#[from] csv::Error),
	#[error("directory walk error: {0}")]
	WalkDir(#[from] walkdir::Error),
	#[error("parsing error: {0}")]
	Parse(String),
	#[error("validation error: {0}")]
	Validation(String),
	/// The running OS, CPU or Python implementation is not one we can solve for.
	#[error("unsupported platform: {0}")]
	UnsupportedPlatform(String),
	/// Fetching or decoding this feed already failed during the run.
	#[error("feed {url} unavailable: {reason}")]
	FeedUnavailable { url: String, reason: String },
	/// A required configuration document does not exist.
	#[error("couldn't find '{}'", .0.display())]
	MissingConfiguration(std::path::PathBuf),
}
