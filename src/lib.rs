#![warn(missing_docs)]
//! A logic-based sudoku deduction engine.
//!
//! ## Overview
//!
//! The engine takes a partially filled 9x9 grid, discovers human-style
//! solving steps (singles, subsets, fish, uniqueness patterns, ALS chains,
//! exocets, contradiction search), ranks them by a numeric difficulty model
//! and applies them one per pass until the puzzle is solved or no enabled
//! technique makes progress. Every applied step carries its conclusions, a
//! presentation view and its technique identity, so the full solving path
//! stays explainable.
//!
//! Grid validity checks and the solution-based techniques rely on an
//! external exhaustive solver behind the [`Oracle`] capability; the engine
//! itself never brute-forces.
//!
//! ## Example
//!
//! ```no_run
//! use sudoku_engine::{Grid, ManualSolver, SolveOutcome};
//! # struct SomeOracle;
//! # impl sudoku_engine::Oracle for SomeOracle {
//! #     fn solve(&self, _: &Grid) -> sudoku_engine::OracleOutcome {
//! #         unimplemented!()
//! #     }
//! # }
//!
//! let grid = Grid::from_str_line(
//!     "..3.2.6..9..3.5..1..18.64....81.29..7.......8..67.82....26.95..8..2.3..9..5.1.3..",
//! )
//! .unwrap();
//!
//! let solver = ManualSolver::new();
//! let result = solver.solve(grid, &SomeOracle).unwrap();
//! if result.outcome == SolveOutcome::Solved {
//!     for step in &result.steps {
//!         println!("{}", step.label());
//!     }
//!     println!("difficulty: {}", result.level());
//! }
//! ```

mod bitset;
mod board;
mod consts;
mod engine;
mod errors;
mod helper;
mod oracle;
mod solver;
mod step;

pub use crate::bitset::{Empty, Set, SetElement};
pub use crate::board::{
    Block, Candidate, CandidateSet, Cell, CellState, CellStatus, Col, Digit, Grid, House, Line,
    Position, Row,
};
pub use crate::engine::Searcher;
pub use crate::errors::{
    BlockFormatError, InvalidEntry, InvalidPuzzleError, InvalidStepError, LineFormatError,
    SolveError, SukakuFormatError,
};
pub use crate::oracle::{Oracle, OracleOutcome};
pub use crate::solver::{
    CancellationToken, FamilySet, ManualSolver, SolveOutcome, SolveResult, SolverConfig,
};
pub use crate::step::{
    ColorTag, Conclusion, ConclusionKind, DifficultyLevel, Link, Step, StepDetail, Technique,
    TechniqueFamily, View,
};
