//! Types for cells, digits and other things on a sudoku board
mod candidate;
mod cell_state;
mod digit;
mod format;
mod grid;
pub mod positions;

pub(crate) use self::grid::GridMaps;
pub(crate) use self::positions::*;

pub use self::{
    candidate::{Candidate, CandidateSet},
    cell_state::{CellState, CellStatus},
    digit::Digit,
    grid::Grid,
    positions::{Block, Cell, Col, House, Line, Position, Row},
};
