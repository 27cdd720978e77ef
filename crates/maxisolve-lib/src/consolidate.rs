//! Consolidation of every written report into one table per environment.
//!
//! Each table has a column per `subdir/python tag` and a row per package, so versions across platforms
//! can be compared side by side.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use crate::solution::Report;

/// Reads all reports below `solutions_dir`, grouped by environment.
///
/// Files that aren't reports are skipped with a warning.
pub fn collect_reports(solutions_dir: &Path) -> crate::Result<BTreeMap<String, Vec<Report>>> {
	let mut reports = BTreeMap::<String, Vec<Report>>::new();
	if !solutions_dir.is_dir() {
		log::warn!("No solutions found, {} is not a directory", solutions_dir.display());
		return Ok(reports);
	}

	for entry in walkdir::WalkDir::new(solutions_dir).min_depth(3).max_depth(3).sort_by_file_name() {
		let entry = entry?;
		if !entry.file_type().is_file() || entry.path().extension().map_or(true, |e| e != "txt") {
			continue;
		}
		match Report::read(entry.path()) {
			Ok(report) => reports.entry(report.environment.clone()).or_default().push(report),
			Err(e) => log::warn!("Couldn't read report {}: {}", entry.path().display(), e),
		}
	}
	Ok(reports)
}

/// Writes the table of one environment as CSV.
///
/// The `python` row comes first, followed by the primary then the secondary packages, each sorted by name.
/// A package that is primary on any platform is listed as primary.
pub fn write_table(reports: &[Report], path: &Path) -> crate::Result<()> {
	let columns: BTreeSet<String> = reports.iter().map(|r| format!("{}/{}", r.subdir, r.python_tag)).collect();
	let by_column: BTreeMap<String, &Report> = reports.iter().map(|r| (format!("{}/{}", r.subdir, r.python_tag), r)).collect();

	let primary: BTreeSet<&str> = reports.iter()
		.flat_map(|r| r.solution.primary_without_python().map(|(name, _)| name))
		.collect();
	let secondary: BTreeSet<&str> = reports.iter()
		.flat_map(|r| r.solution.secondary().keys().map(String::as_str))
		.filter(|name| !primary.contains(name))
		.collect();

	if let Some(parent) = path.parent() {
		std::fs::create_dir_all(parent)?;
	}
	let mut writer = csv::Writer::from_path(path)?;

	let mut header = vec!["package".to_string(), "kind".to_string()];
	header.extend(columns.iter().cloned());
	writer.write_record(&header)?;

	let version_of = |column: &str, name: &str| -> String {
		by_column.get(column)
			.and_then(|r| r.solution.all().get(name).map(|v| v.to_string()))
			.unwrap_or_default()
	};

	let rows = std::iter::once(("python", "python"))
		.chain(primary.iter().map(|name| (*name, "primary")))
		.chain(secondary.iter().map(|name| (*name, "secondary")));
	for (name, kind) in rows {
		let mut record = vec![name.to_string(), kind.to_string()];
		record.extend(columns.iter().map(|c| version_of(c, name)));
		writer.write_record(&record)?;
	}
	writer.flush()?;
	Ok(())
}

/// Consolidates every report below `solutions_dir` into `{output_dir}/{environment}.csv`.
///
/// Returns the written files.
pub fn consolidate(solutions_dir: &Path, output_dir: &Path) -> crate::Result<Vec<PathBuf>> {
	let mut written = Vec::new();
	for (environment, reports) in collect_reports(solutions_dir)? {
		let path = output_dir.join(format!("{}.csv", environment));
		write_table(&reports, &path)?;
		log::info!("Consolidated {} reports of {} into {}", reports.len(), environment, path.display());
		written.push(path);
	}
	Ok(written)
}
