//! The brute-force solving oracle the engine consumes but does not implement.
//!
//! The deduction engine needs an exhaustive solver for two things: validating
//! that a puzzle has exactly one solution, and supplying that solution to the
//! techniques that reason backwards from it (template set/delete). Both uses
//! go through this capability; any fast backtracking or exact-cover solver
//! with bounded latency can stand behind it.

use crate::board::Grid;

/// Result of an exhaustive solve.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OracleOutcome {
    /// Exactly one solution exists.
    Unique(Grid),
    /// No solution exists.
    None,
    /// More than one solution exists.
    Multiple,
}

/// Capability over an external exhaustive solver.
pub trait Oracle {
    /// Solve the grid exhaustively and classify the solution count,
    /// returning the solution itself when it is unique.
    fn solve(&self, grid: &Grid) -> OracleOutcome;
}

impl<'a, T: Oracle + ?Sized> Oracle for &'a T {
    fn solve(&self, grid: &Grid) -> OracleOutcome {
        (**self).solve(grid)
    }
}
