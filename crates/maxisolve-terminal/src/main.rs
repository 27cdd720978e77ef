use maxisolve::platform::{identify_running, PythonImplementation, PythonRuntime, PythonVersion};
use maxisolve::{Config, Session};

mod run;

fn main() {
	let mut opts;

	/* Parse console input */
	let parsed_options = {
		let args: Vec<String> = std::env::args().collect();

		opts = getopts::Options::new();
		opts.optflag( "h", "help",           "Show help");
		opts.optflag( "v", "verbose",        "Increased verbosity");
		opts.optopt(  "c", "config",         "Config file to use", "FILE");
		opts.optopt(  "",  "matrix",         "Platform matrix", "FILE");
		opts.optopt(  "",  "packages",       "Primary packages of each environment", "FILE");
		opts.optopt(  "",  "solutions",      "Directory reports are written to", "DIR");
		opts.optopt(  "",  "consolidated",   "Directory consolidated tables are written to", "DIR");
		opts.optmulti("",  "python",         "Python version to solve for, repeatable", "VERSION");
		opts.optmulti("",  "implementation", "Python implementation to solve for (CPython, PyPy), repeatable", "IMPL");
		opts.optopt(  "",  "solver",         "Solver executable (mamba, conda)", "EXE");
		opts.optmulti("",  "channel",        "Channel to solve against, repeatable", "NAME");
		opts.parsing_style(getopts::ParsingStyle::FloatingFrees);

		let parsed_options = match opts.parse(&args[1..]) {
			Ok(m)  => { m }
			Err(e) => { println!("Unable to parse options: {}", e); std::process::exit(2) }
		};

		if parsed_options.opt_present("h") {
			eprintln!("{}", opts.usage("Usage: maxisolve [options] [solve [ENVIRONMENT...] | consolidate]"));
			return;
		}

		parsed_options
	};

	let default_filter = if parsed_options.opt_present("v") { "debug" } else { "info" };
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

	let config = match load_config(&parsed_options) {
		Ok(config) => config,
		Err(e) => {
			log::error!("Failed to read config file: {}", e);
			std::process::exit(1);
		},
	};

	let command = parsed_options.free.first().map(String::as_str).unwrap_or("solve");
	let result = match command {
		"solve" => {
			let only = parsed_options.free.iter().skip(1).cloned().collect::<Vec<_>>();
			python_runtimes(&config, &parsed_options).and_then(|runtimes| solve(config, &runtimes, &only))
		},
		"consolidate" => consolidate(&config),
		other => Err(Error::UnknownCommand(other.to_string())),
	};

	if let Err(e) = result {
		if let Error::UnknownCommand(_) = e {
			log::error!("{}", e);
			eprintln!("{}", opts.usage("Usage: maxisolve [options] [solve [ENVIRONMENT...] | consolidate]"));
		} else if let Err(io) = run::report_error(&e, &mut std::io::stdout()) {
			log::error!("{} ({})", e, io);
		}
		std::process::exit(1);
	}
}

/// Loads the config file and applies the command line overrides on top of it.
fn load_config(parsed_options: &getopts::Matches) -> Result<Config, Error> {
	let mut config = match parsed_options.opt_str("c") {
		Some(path) => Config::load_from_disk(path)?,
		None => match Config::default_path() {
			Some(path) if path.exists() => Config::load_from_disk(&path).unwrap_or_else(|e| {
				log::warn!("Failed to read config file {}: {}", path.display(), e);
				log::warn!("Using default config.");
				Config::default()
			}),
			_ => {
				log::debug!("No config file found, using default config.");
				Config::default()
			},
		},
	};

	if let Some(p) = parsed_options.opt_str("matrix") { config.set_matrix_path(p.into()) }
	if let Some(p) = parsed_options.opt_str("packages") { config.set_packages_path(p.into()) }
	if let Some(p) = parsed_options.opt_str("solutions") { config.set_solutions_dir(p.into()) }
	if let Some(p) = parsed_options.opt_str("consolidated") { config.set_consolidated_dir(p.into()) }
	if let Some(s) = parsed_options.opt_str("solver") { config.set_solver(s) }
	let channels = parsed_options.opt_strs("channel");
	if !channels.is_empty() {
		config.set_channels(channels);
	}

	Ok(config)
}

/// Every combination of the requested python versions and implementations.
///
/// What isn't given on the command line is taken from the configured interpreter.
fn python_runtimes(config: &Config, parsed_options: &getopts::Matches) -> Result<Vec<PythonRuntime>, Error> {
	let mut versions = parsed_options.opt_strs("python")
		.iter()
		.map(|v| PythonVersion::try_from(v.as_str()))
		.collect::<maxisolve::Result<Vec<_>>>()?;
	let mut implementations = parsed_options.opt_strs("implementation")
		.iter()
		.map(|i| PythonImplementation::from_name(i))
		.collect::<maxisolve::Result<Vec<_>>>()?;

	if versions.is_empty() || implementations.is_empty() {
		let detected = PythonRuntime::detect(config.python())?;
		log::info!("Detected {} {} from {}", detected.implementation, detected.version, config.python());
		if versions.is_empty() {
			versions.push(detected.version);
		}
		if implementations.is_empty() {
			implementations.push(detected.implementation);
		}
	}

	let mut runtimes = Vec::new();
	for version in &versions {
		for implementation in &implementations {
			let runtime = PythonRuntime::new(*implementation, *version);
			if !runtimes.contains(&runtime) {
				runtimes.push(runtime);
			}
		}
	}
	Ok(runtimes)
}

fn solve(config: Config, runtimes: &[PythonRuntime], only: &[String]) -> Result<(), Error> {
	let (matrix, environments) = run::load_documents(&config)?;
	let targets = runtimes
		.iter()
		.map(|runtime| identify_running(runtime).map(|platform| (platform, *runtime)))
		.collect::<maxisolve::Result<Vec<_>>>()?;

	let mut session = Session::from_config(config)?;
	run::solve_targets(&mut session, &matrix, &environments, &targets, only, &mut std::io::stdout().lock())
}

fn consolidate(config: &Config) -> Result<(), Error> {
	let written = maxisolve::consolidate::consolidate(config.solutions_dir(), config.consolidated_dir())?;
	if written.is_empty() {
		println!("No solutions to consolidate in '{}'", config.solutions_dir().display());
	}
	for path in written {
		println!("{}", path.display());
	}
	Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("maxisolve error: {0}")]
	Maxisolve(#[from] maxisolve::Error),
	#[error("IO error: {0}")]
	IO(#[from] std::io::Error),
	#[error("unknown command '{0}'")]
	UnknownCommand(String),
}
