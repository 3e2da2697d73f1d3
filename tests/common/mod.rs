//! Test support: an exhaustive backtracking solver behind the engine's
//! oracle capability.

use sudoku_engine::{Cell, CellStatus, Digit, Grid, House, Oracle, OracleOutcome, Set};

/// Plain backtracking solver, always picking a cell with the fewest
/// candidates. Stops after the second solution.
pub struct ExhaustiveOracle;

impl Oracle for ExhaustiveOracle {
    fn solve(&self, grid: &Grid) -> OracleOutcome {
        if has_conflicts(grid) {
            return OracleOutcome::None;
        }
        let mut solutions = vec![];
        search(*grid, &mut solutions);
        match solutions.len() {
            0 => OracleOutcome::None,
            1 => OracleOutcome::Unique(solutions.pop().unwrap()),
            _ => OracleOutcome::Multiple,
        }
    }
}

fn has_conflicts(grid: &Grid) -> bool {
    for house in House::all() {
        let mut seen = Set::<Digit>::NONE;
        for cell in house.cells() {
            if let Some(digit) = grid.value(cell) {
                if seen.contains(digit) {
                    return true;
                }
                seen |= digit;
            }
        }
    }
    false
}

fn search(grid: Grid, solutions: &mut Vec<Grid>) {
    if solutions.len() == 2 {
        return;
    }

    let mut best: Option<(Cell, Set<Digit>)> = None;
    for cell in Cell::all() {
        if grid.status(cell) != CellStatus::Empty {
            continue;
        }
        let candidates = grid.candidates(cell);
        if candidates.is_empty() {
            return;
        }
        let replace = match best {
            Some((_, mask)) => candidates.len() < mask.len(),
            None => true,
        };
        if replace {
            best = Some((cell, candidates));
        }
    }

    let (cell, candidates) = match best {
        Some(found) => found,
        None => {
            solutions.push(grid);
            return;
        }
    };
    for digit in candidates {
        let mut next = grid;
        next.set(cell, digit, CellStatus::Modifiable);
        search(next, solutions);
        if solutions.len() == 2 {
            return;
        }
    }
}
