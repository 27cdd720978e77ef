//! # Solving
//!
//! Solving itself is delegated to an external tool. A [`Solver`] takes a [`SolveRequest`] and either
//! returns the [`LinkPlan`] of a dry run or tells why there is no solution.

mod request;
pub use request::SolveRequest;
pub use request::python_pin;

mod link_plan;
pub use link_plan::LinkAction;
pub use link_plan::LinkPlan;

mod command;
pub use command::CommandSolver;

/// Result of asking a solver for a solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveOutcome {
	Solved(LinkPlan),
	/// The tool failed or its output couldn't be used, holds a human readable reason.
	NoSolution(String),
}

pub trait Solver {
	fn solve(&self, request: &SolveRequest) -> SolveOutcome;
}

