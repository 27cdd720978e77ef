use maxisolve::platform::{PythonImplementation, PythonRuntime, PythonVersion};
use maxisolve::{Config, Designator, Session};
use maxisolve_test_utils::*;

const REPO: &str = "https://repo.test";

fn py38() -> PythonRuntime {
	PythonRuntime::new(PythonImplementation::CPython, PythonVersion::new(3, 8))
}

fn names(names: &[&str]) -> Vec<String> {
	names.iter().map(|s| s.to_string()).collect()
}

fn linux64_fetcher() -> StaticFetcher {
	StaticFetcher::new()
		.with_feed(
			format!("{}/conda-forge/linux64/repodata.json.zst", REPO),
			repodata_zst("linux64", &[
				("python", "3.8.10", "h0_cpython"),
				("python", "3.9.16", "h1_cpython"),
				("numpy", "1.24.0", "py38h10c12cc_0"),
				("scipy", "1.11.1", "py39h0_0"),
				("mkl", "2023.1", "h6d00ec8_46342"),
			]).unwrap(),
		)
		.with_feed(
			format!("{}/conda-forge/noarch/repodata.json.zst", REPO),
			repodata_zst("noarch", &[("requests", "2.31.0", "pyhd8ed1ab_0")]).unwrap(),
		)
}

fn config(workspace: &Workspace) -> Config {
	let _ = env_logger::builder().is_test(true).try_init();
	workspace.config(REPO)
}

#[test]
fn core_environment_report() {
	let workspace = Workspace::new("", "").unwrap();
	let solver = ScriptedSolver::new().with_plan("core", &[("python", "3.8.10"), ("numpy", "1.24.0"), ("mkl", "2023.1")]);
	let mut session = Session::new(config(&workspace), linux64_fetcher(), solver);
	let designator = Designator::new("linux64_py38").unwrap();

	let prepared = session.prepare(&designator, "core", &names(&["numpy", "python"]), py38()).unwrap();
	assert!(!prepared.injected_python);
	assert!(prepared.excluded.is_empty());

	let report = session.solve(&prepared).unwrap().expect("core should solve");
	assert_eq!(report.solution.python(), "3.8.10");

	let path = workspace.solutions_dir().join("linux64").join("py38").join("core.txt");
	let text = std::fs::read_to_string(&path).unwrap();
	assert!(text.starts_with("# linux64/py38/core\n"));
	assert!(text.contains("\npython 3.8.10\n"));
	assert!(text.contains("# 1 primary packages :\n\nnumpy = 1.24.0\n"));
	assert!(text.contains("# 1 secondary packages :\n\nmkl = 2023.1\n"));

	let request = &session.solver().requests()[0];
	assert_eq!(request.specs(), ["numpy", "python=3.8"]);
	assert_eq!(request.subdir, "linux64");
}

#[test]
fn unavailable_packages_are_excluded() {
	let workspace = Workspace::new("", "").unwrap();
	let solver = ScriptedSolver::new().with_plan("science", &[("python", "3.8.10"), ("numpy", "1.24.0"), ("requests", "2.31.0")]);
	let mut session = Session::new(config(&workspace), linux64_fetcher(), solver);
	let designator = Designator::new("linux64_py38").unwrap();

	/* scipy only has py39 builds, no-such-package exists nowhere */
	let prepared = session.prepare(&designator, "science", &names(&["numpy", "scipy", "requests", "no-such-package"]), py38()).unwrap();
	assert!(prepared.injected_python);
	assert_eq!(prepared.excluded, ["scipy", "no-such-package"]);
	assert_eq!(prepared.request.packages, ["numpy", "requests", "python"]);

	session.solve(&prepared).unwrap().expect("science should solve");
	let text = std::fs::read_to_string(workspace.solutions_dir().join("linux64").join("py38").join("science.txt")).unwrap();
	assert!(!text.contains("scipy"));
	assert!(!text.contains("no-such-package"));
	assert!(text.contains("# 2 primary packages :\n\nnumpy = 1.24.0\nrequests = 2.31.0\n"));
	assert!(text.contains("# 0 secondary packages :\n"));
}

#[test]
fn no_solution_writes_nothing() {
	let workspace = Workspace::new("", "").unwrap();
	let solver = ScriptedSolver::new().with_output("broken", "");
	let mut session = Session::new(config(&workspace), linux64_fetcher(), solver);
	let designator = Designator::new("linux64_py38").unwrap();

	let prepared = session.prepare(&designator, "broken", &names(&["numpy"]), py38()).unwrap();
	assert!(session.solve(&prepared).unwrap().is_none());
	assert!(!workspace.solutions_dir().join("linux64").join("py38").join("broken.txt").exists());
}

#[test]
fn repodata_fetched_once_per_run() {
	let workspace = Workspace::new("", "").unwrap();
	let solver = ScriptedSolver::new()
		.with_plan("a", &[("python", "3.8.10")])
		.with_plan("b", &[("python", "3.9.16")]);
	let mut session = Session::new(config(&workspace), linux64_fetcher(), solver);

	let py39 = PythonRuntime::new(PythonImplementation::CPython, PythonVersion::new(3, 9));
	session.prepare(&Designator::new("linux64_py38").unwrap(), "a", &[], py38()).unwrap();
	session.prepare(&Designator::new("linux64_py39").unwrap(), "b", &[], py39).unwrap();
	session.prepare(&Designator::new("linux64_py38").unwrap(), "b", &[], py38()).unwrap();

	assert_eq!(session.cache().fetcher().requests().len(), 2);
	assert_eq!(session.cache().len(), 2);
}

#[test]
fn python_specific_availability_follows_designator() {
	let workspace = Workspace::new("", "").unwrap();
	let mut session = Session::new(config(&workspace), linux64_fetcher(), ScriptedSolver::new());
	let py39 = PythonRuntime::new(PythonImplementation::CPython, PythonVersion::new(3, 9));

	let prepared = session.prepare(&Designator::new("linux64_py39").unwrap(), "science", &names(&["numpy", "scipy"]), py39).unwrap();
	assert_eq!(prepared.excluded, ["numpy"]);
	assert_eq!(prepared.request.specs(), ["scipy", "python=3.9"]);
}

#[test]
fn rerun_overwrites_report() {
	let workspace = Workspace::new("", "").unwrap();
	let designator = Designator::new("linux64_py38").unwrap();
	let path = workspace.solutions_dir().join("linux64").join("py38").join("core.txt");

	for version in ["1.24.0", "1.24.4"] {
		let solver = ScriptedSolver::new().with_plan("core", &[("python", "3.8.10"), ("numpy", version)]);
		let mut session = Session::new(config(&workspace), linux64_fetcher(), solver);
		let prepared = session.prepare(&designator, "core", &names(&["numpy"]), py38()).unwrap();
		session.solve(&prepared).unwrap().expect("core should solve");
	}

	let text = std::fs::read_to_string(path).unwrap();
	assert!(text.contains("numpy = 1.24.4"));
	assert!(!text.contains("numpy = 1.24.0"));
}

#[test]
fn missing_feed_fails_prepare() {
	let workspace = Workspace::new("", "").unwrap();
	let mut session = Session::new(config(&workspace), StaticFetcher::new(), ScriptedSolver::new());
	let res = session.prepare(&Designator::new("linux64_py38").unwrap(), "core", &[], py38());
	assert!(matches!(res, Err(maxisolve::Error::IO(_))));
}

#[test]
fn python_pin_survives_feed_without_python() {
	let workspace = Workspace::new("", "").unwrap();
	let fetcher = StaticFetcher::new()
		.with_feed(
			format!("{}/conda-forge/linux64/repodata.json.zst", REPO),
			repodata_zst("linux64", &[("numpy", "1.24.0", "py38h10c12cc_0")]).unwrap(),
		)
		.with_feed(
			format!("{}/conda-forge/noarch/repodata.json.zst", REPO),
			repodata_zst("noarch", &[]).unwrap(),
		);
	let solver = ScriptedSolver::new().with_plan("core", &[("python", "3.8.17"), ("numpy", "1.24.0")]);
	let mut session = Session::new(config(&workspace), fetcher, solver);
	let designator = Designator::new("linux64_py38").unwrap();

	for packages in [names(&["numpy"]), names(&["python", "numpy"])] {
		let prepared = session.prepare(&designator, "core", &packages, py38()).unwrap();
		assert!(prepared.excluded.is_empty());
		assert_eq!(prepared.request.specs(), ["numpy", "python=3.8"]);

		let report = session.solve(&prepared).unwrap().expect("core should solve");
		assert_eq!(report.solution.python(), "3.8.17");
		assert_eq!(report.solution.primary_without_python().collect::<Vec<_>>(), [("numpy", "1.24.0")]);
	}
}

#[test]
fn failed_feed_is_not_fetched_again() {
	let workspace = Workspace::new("", "").unwrap();
	let mut session = Session::new(config(&workspace), StaticFetcher::new(), ScriptedSolver::new());
	let designator = Designator::new("linux64_py38").unwrap();

	assert!(session.prepare(&designator, "core", &[], py38()).is_err());
	let res = session.prepare(&designator, "web", &[], py38());
	assert!(matches!(res, Err(maxisolve::Error::FeedUnavailable { .. })));
	assert_eq!(session.cache().fetcher().requests().len(), 1);
}
