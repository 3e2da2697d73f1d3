//! Typed errors surfaced by grid parsing, validity checks and the solve loop.
//!
//! Searcher-internal anomalies never show up here; searchers fail closed by
//! returning no steps. A stuck solve is a normal outcome, not an error.

use crate::board::positions::{col, row};

/// An invalid sudoku entry encountered during parsing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct InvalidEntry {
    /// Cell number goes from 0..=80, 0..=8 for first line, 9..=17 for 2nd and so on
    pub cell: u8,
    /// The parsed invalid char
    pub ch: char,
}

impl InvalidEntry {
    /// Row index from 0..=8, topmost row is 0
    #[inline]
    pub fn row(self) -> u8 {
        row(self.cell)
    }
    /// Column index from 0..=8, leftmost col is 0
    #[inline]
    pub fn col(self) -> u8 {
        col(self.cell)
    }
}

/// Error parsing the single-line grid format.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum LineFormatError {
    /// Accepted values are numbers 1..=9 and '0', '.' or '_' for empty cells,
    /// optionally prefixed by '+' for modifiable values.
    #[error("cell {} contains invalid character '{}'", .0.cell, .0.ch)]
    InvalidEntry(InvalidEntry),
    /// Fewer than 81 cells were supplied. Contains the number found.
    #[error("line contains {0} cells instead of required 81")]
    NotEnoughCells(u8),
    /// 82 or more cell positions were supplied.
    #[error("line contains more than 81 cells")]
    TooManyCells,
    /// The elimination suffix after ':' is not a list of 'rcd' triples.
    #[error("malformed candidate suffix token '{0}'")]
    InvalidSuffix(char),
    /// A suffix triple names a candidate of a solved cell.
    #[error("candidate suffix refers to solved cell r{row}c{col}")]
    SuffixOnSolvedCell {
        /// 1-based row
        row: u8,
        /// 1-based column
        col: u8,
    },
}

/// Error parsing the multi-line block grid format.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum BlockFormatError {
    /// Non-digit, non-placeholder character encountered.
    #[error("cell {} contains invalid character '{}'", .0.cell, .0.ch)]
    InvalidEntry(InvalidEntry),
    /// A row does not contain exactly 9 cells. Contains the row index (0-8).
    #[error("row {0} does not contain 9 cells")]
    InvalidLineLength(u8),
    /// Input ended before 9 rows were read. Contains the number of rows found.
    #[error("input ends after {0} rows, 9 required")]
    NotEnoughRows(u8),
}

/// Error parsing the sukaku (all-candidates) format.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum SukakuFormatError {
    /// The input does not contain exactly 729 candidate positions.
    #[error("sukaku input contains {0} candidate positions instead of 729")]
    WrongLength(usize),
    /// Position p of a cell group may only hold the digit p+1 or a placeholder.
    #[error("candidate position {position} holds invalid character '{ch}'")]
    InvalidEntry {
        /// Offset into the 729 candidate positions.
        position: usize,
        /// The offending character.
        ch: char,
    },
}

/// The puzzle does not have exactly one solution.
///
/// Raised by top-level validity checks and by oracle-dependent searchers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum InvalidPuzzleError {
    /// The brute-force oracle found no solution.
    #[error("puzzle has no solution")]
    NoSolution,
    /// The brute-force oracle found more than one solution.
    #[error("puzzle has multiple solutions")]
    MultipleSolutions,
}

/// A searcher produced a step that empirically invalidated the grid.
///
/// Only raised when post-step validation is enabled in the solver
/// configuration.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("step '{technique}' left the grid without a unique solution")]
pub struct InvalidStepError {
    /// Display label of the offending technique.
    pub technique: String,
}

/// Errors that can abort a [`ManualSolver::solve`](crate::ManualSolver::solve) run.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SolveError {
    /// The puzzle failed the up-front or post-step uniqueness check.
    #[error(transparent)]
    InvalidPuzzle(#[from] InvalidPuzzleError),
    /// A step failed the optional post-application validation.
    #[error(transparent)]
    InvalidStep(#[from] InvalidStepError),
}
