use crate::bitset::Set;
use crate::board::Digit;

/// Status tag of a cell in the grid.
///
/// A `Given` cell came with the puzzle, a `Modifiable` cell was filled
/// during solving, an `Empty` cell still carries a candidate mask.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum CellStatus {
    Empty,
    Modifiable,
    Given,
}

/// Contains either a digit or all the candidates for an unsolved cell
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
#[allow(missing_docs)]
pub enum CellState {
    Digit(Digit),
    Candidates(Set<Digit>),
}
