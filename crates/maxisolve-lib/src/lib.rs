pub mod error;
pub use error::Result;
pub use error::Error;

pub mod config;
pub use config::Config;

pub mod platform;
pub use platform::Platform;

pub mod specs;
pub use specs::Designator;
pub use specs::Environments;
pub use specs::Matrix;

pub mod repodata;
pub use repodata::PackageIndex;
pub use repodata::RepodataCache;

pub mod solver;
pub use solver::Solver;

pub mod solution;
pub use solution::Solution;

pub mod session;
pub use session::Session;

pub mod consolidate;
