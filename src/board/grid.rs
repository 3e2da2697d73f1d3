//! The mutable board: 81 cells, each a 9-bit candidate mask plus a status tag.

use crate::bitset::Set;
use crate::board::cell_state::{CellState, CellStatus};
use crate::board::positions::{Cell, House, Position};
use crate::board::Digit;
use crate::consts::{N_CELLS, N_HOUSES};
use crate::errors::InvalidPuzzleError;
use crate::helper::{CellArray, DigitArray, HouseArray};
use crate::oracle::{Oracle, OracleOutcome};

/// One cell of the board.
///
/// Invariant: an `Empty` cell's mask may have 0-9 bits set; a `Given` or
/// `Modifiable` cell's mask has exactly one bit set.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub(crate) struct GridCell {
    pub(crate) mask: Set<Digit>,
    pub(crate) status: CellStatus,
}

/// The board state the deduction engine works on.
///
/// A `Grid` is created by parsing one of the textual formats (see
/// [`Grid::from_str_line`], [`Grid::from_str_block`], [`Grid::from_str_sukaku`])
/// or by copying. Mutation happens through [`Grid::set`] and
/// [`Grid::eliminate`]; both are total for in-range arguments. Solvability
/// checks are the only fallible operations and delegate to the brute-force
/// [`Oracle`].
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub struct Grid {
    pub(crate) cells: [GridCell; N_CELLS],
}

impl Grid {
    /// A grid with every cell empty and all candidates open.
    pub fn empty() -> Grid {
        Grid {
            cells: [GridCell {
                mask: Set::ALL,
                status: CellStatus::Empty,
            }; N_CELLS],
        }
    }

    /// The status of a cell.
    #[inline]
    pub fn status(&self, cell: Cell) -> CellStatus {
        self.cells[cell.as_index()].status
    }

    /// The value of a solved cell, `None` for empty cells.
    #[inline]
    pub fn value(&self, cell: Cell) -> Option<Digit> {
        match self.status(cell) {
            CellStatus::Empty => None,
            _ => self.cells[cell.as_index()].mask.first(),
        }
    }

    /// The candidate mask of an empty cell. Solved cells report no candidates.
    #[inline]
    pub fn candidates(&self, cell: Cell) -> Set<Digit> {
        match self.status(cell) {
            CellStatus::Empty => self.cells[cell.as_index()].mask,
            _ => Set::NONE,
        }
    }

    /// Whether `digit` is still a candidate of the (empty) cell.
    #[inline]
    pub fn has_candidate(&self, cell: Cell, digit: Digit) -> bool {
        self.candidates(cell).contains(digit)
    }

    /// The public per-cell view: digit or remaining candidates.
    pub fn cell_state(&self, cell: Cell) -> CellState {
        match self.value(cell) {
            Some(digit) => CellState::Digit(digit),
            None => CellState::Candidates(self.candidates(cell)),
        }
    }

    /// Assigns `digit` to `cell` with the given status, clears the cell's
    /// other candidates and removes the digit from all peers' masks.
    /// Never fails for in-range arguments; assigning over a solved cell
    /// overwrites it.
    pub fn set(&mut self, cell: Cell, digit: Digit, status: CellStatus) {
        debug_assert!(status != CellStatus::Empty);
        let entry = &mut self.cells[cell.as_index()];
        entry.mask = digit.as_set();
        entry.status = status;
        for peer in cell.neighbors() {
            let peer = &mut self.cells[peer.as_index()];
            if peer.status == CellStatus::Empty {
                peer.mask.remove(digit.as_set());
            }
        }
    }

    /// Clears one candidate bit on an empty cell.
    /// No-op if the cell is not empty or the bit is already clear.
    pub fn eliminate(&mut self, cell: Cell, digit: Digit) {
        let entry = &mut self.cells[cell.as_index()];
        if entry.status == CellStatus::Empty {
            entry.mask.remove(digit.as_set());
        }
    }

    /// Re-adds a candidate to an empty cell. Used by the candidate-suffix
    /// parser, which first computes the pencilmark closure.
    pub(crate) fn add_candidate(&mut self, cell: Cell, digit: Digit) {
        let entry = &mut self.cells[cell.as_index()];
        if entry.status == CellStatus::Empty {
            entry.mask |= digit;
        }
    }

    /// Overwrites the candidate mask of an empty cell. Sukaku parsing only.
    pub(crate) fn set_candidates(&mut self, cell: Cell, mask: Set<Digit>) {
        let entry = &mut self.cells[cell.as_index()];
        if entry.status == CellStatus::Empty {
            entry.mask = mask;
        }
    }

    /// The number of solved cells.
    pub fn n_solved(&self) -> u8 {
        self.cells
            .iter()
            .filter(|cell| cell.status != CellStatus::Empty)
            .count() as u8
    }

    /// Whether no empty cell remains.
    pub fn is_solved(&self) -> bool {
        self.n_solved() == N_CELLS as u8
    }

    /// The set of empty cells.
    pub fn empty_cells(&self) -> Set<Cell> {
        let mut set = Set::NONE;
        for cell in Cell::all() {
            if self.status(cell) == CellStatus::Empty {
                set |= cell;
            }
        }
        set
    }

    /// Checks against the oracle that exactly one solution exists
    /// and returns it.
    ///
    /// Fails with [`InvalidPuzzleError`] for zero or multiple solutions.
    pub fn unique_solution(&self, oracle: &dyn Oracle) -> Result<Grid, InvalidPuzzleError> {
        match oracle.solve(self) {
            OracleOutcome::Unique(solution) => Ok(solution),
            OracleOutcome::None => Err(InvalidPuzzleError::NoSolution),
            OracleOutcome::Multiple => Err(InvalidPuzzleError::MultipleSolutions),
        }
    }

    /// Whether the grid has exactly one solution.
    pub fn is_valid(&self, oracle: &dyn Oracle) -> bool {
        self.unique_solution(oracle).is_ok()
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////
//                                  Derived maps
///////////////////////////////////////////////////////////////////////////////////////////////

/// Read-only maps derived from a grid snapshot.
///
/// Rebuilt from scratch at the start of every searcher pass; searchers never
/// see stale data and never mutate these.
#[derive(Clone, Debug)]
pub(crate) struct GridMaps {
    /// Cells with no value.
    pub empty_cells: Set<Cell>,
    /// Empty cells with exactly two candidates.
    pub bivalue_cells: Set<Cell>,
    /// Per digit: empty cells still carrying the digit as candidate.
    pub candidates: DigitArray<Set<Cell>>,
    /// Per digit: cells solved to the digit.
    pub values: DigitArray<Set<Cell>>,
    /// Per digit: union of candidate and value cells.
    pub digits: DigitArray<Set<Cell>>,
    /// Candidate mask per cell (`NONE` for solved cells).
    pub cell_candidates: CellArray<Set<Digit>>,
    /// Digits already placed in each house.
    pub house_solved_digits: HouseArray<Set<Digit>>,
    /// Per house and digit: positions within the house still open
    /// for the digit.
    pub house_poss_positions: HouseArray<DigitArray<Set<Position<House>>>>,
}

impl GridMaps {
    pub fn new(grid: &Grid) -> GridMaps {
        let mut maps = GridMaps {
            empty_cells: Set::NONE,
            bivalue_cells: Set::NONE,
            candidates: DigitArray([Set::NONE; 9]),
            values: DigitArray([Set::NONE; 9]),
            digits: DigitArray([Set::NONE; 9]),
            cell_candidates: CellArray([Set::NONE; N_CELLS]),
            house_solved_digits: HouseArray([Set::NONE; N_HOUSES]),
            house_poss_positions: HouseArray([DigitArray([Set::NONE; 9]); N_HOUSES]),
        };

        for cell in Cell::all() {
            match grid.value(cell) {
                Some(digit) => {
                    maps.values[digit] |= cell;
                    for &house in &cell.houses() {
                        maps.house_solved_digits[house] |= digit;
                    }
                }
                None => {
                    let mask = grid.cells[cell.as_index()].mask;
                    maps.empty_cells |= cell;
                    maps.cell_candidates[cell] = mask;
                    if mask.len() == 2 {
                        maps.bivalue_cells |= cell;
                    }
                    for digit in mask {
                        maps.candidates[digit] |= cell;
                        for &house in &cell.houses() {
                            maps.house_poss_positions[house][digit] |= cell.pos_in(house);
                        }
                    }
                }
            }
        }

        for digit in Digit::all() {
            maps.digits[digit] = maps.candidates[digit] | maps.values[digit];
        }

        maps
    }

    /// The empty cells of `house` that still hold `digit`.
    pub fn house_candidate_cells(&self, house: House, digit: Digit) -> Set<Cell> {
        self.candidates[digit] & house.cells()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn set_clears_peers() {
        let mut grid = Grid::empty();
        grid.set(Cell::new(0), Digit::new(5), CellStatus::Given);

        assert_eq!(grid.value(Cell::new(0)), Some(Digit::new(5)));
        assert_eq!(grid.status(Cell::new(0)), CellStatus::Given);
        // same row, col and block peers lose the candidate
        for &peer in &[Cell::new(1), Cell::new(9), Cell::new(10), Cell::new(72)] {
            assert!(!grid.has_candidate(peer, Digit::new(5)));
        }
        // unrelated cell keeps it
        assert!(grid.has_candidate(Cell::new(80), Digit::new(5)));
    }

    #[test]
    fn eliminate_is_noop_on_solved_cells() {
        let mut grid = Grid::empty();
        grid.set(Cell::new(0), Digit::new(5), CellStatus::Given);
        grid.eliminate(Cell::new(0), Digit::new(5));
        assert_eq!(grid.value(Cell::new(0)), Some(Digit::new(5)));

        grid.eliminate(Cell::new(1), Digit::new(9));
        grid.eliminate(Cell::new(1), Digit::new(9));
        assert!(!grid.has_candidate(Cell::new(1), Digit::new(9)));
    }

    #[test]
    fn derived_maps_are_consistent() {
        let mut grid = Grid::empty();
        grid.set(Cell::new(40), Digit::new(1), CellStatus::Given);
        let maps = GridMaps::new(&grid);

        assert_eq!(maps.empty_cells.len(), 80);
        assert_eq!(maps.values[Digit::new(1)], Cell::new(40).as_set());
        assert!(!maps.candidates[Digit::new(1)].contains(Cell::new(39)));
        assert!(maps.candidates[Digit::new(1)].contains(Cell::new(0)));
        assert_eq!(
            maps.digits[Digit::new(1)],
            maps.candidates[Digit::new(1)] | Cell::new(40).as_set()
        );

        // row 4 has no position left for digit 1 except none (solved)
        let row4 = House::new(4);
        assert!(maps.house_poss_positions[row4][Digit::new(1)].is_empty());
        assert!(maps.house_solved_digits[row4].contains(Digit::new(1)));
    }
}
