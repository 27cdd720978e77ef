//! # Configuration documents
//!
//! Two YAML documents drive a run, the platform matrix and the primary package lists of each environment.
//! Both are validated while loading so a bad entry fails before any solving starts.

mod designator;
pub use designator::Designator;

mod matrix;
pub use matrix::Matrix;

mod environments;
pub use environments::Environments;

/// Reads a configuration document, mapping a missing file to [`MissingConfiguration`](crate::Error::MissingConfiguration).
fn read_document(path: &std::path::Path) -> crate::Result<String> {
	match std::fs::read_to_string(path) {
		Ok(s) => Ok(s),
		Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(crate::Error::MissingConfiguration(path.to_path_buf())),
		Err(e) => Err(e.into()),
	}
}
