//! Gurth's symmetrical placement.
//!
//! When the givens are 180-degree rotationally symmetric under a consistent
//! digit involution, every solution obeys the same symmetry. The center
//! cell maps to itself, so it can only hold a digit that is its own image.

use crate::board::{Cell, CellStatus, Digit};
use crate::engine::SearchContext;
use crate::step::{Conclusion, Step, StepDetail, Technique, View};

pub(crate) fn find_all(ctx: &SearchContext<'_>, steps: &mut Vec<Step>) {
    let mapping = match digit_involution(ctx) {
        Some(mapping) => mapping,
        None => return,
    };

    let center = Cell::new(40);
    if ctx.grid.status(center) != CellStatus::Empty {
        return;
    }

    // the center maps onto itself: only self-paired digits survive there
    let mut conclusions = vec![];
    for digit in ctx.grid.candidates(center) {
        if mapping[digit.as_index()] != digit {
            conclusions.push(Conclusion::eliminate(center, digit));
        }
    }
    if conclusions.is_empty() {
        return;
    }

    let mut view = View::default();
    view.cells.push((0, center));
    for cell in Cell::all() {
        if ctx.grid.status(cell) == CellStatus::Given {
            view.cells.push((1, cell));
        }
    }
    for &conclusion in &conclusions {
        view.candidates.push((0, conclusion.candidate));
    }
    steps.push(Step {
        technique: Technique::SymmetricalPlacement,
        conclusions,
        view,
        detail: StepDetail::Symmetry { mapping },
    });
}

/// Builds the digit involution induced by the central symmetry of the
/// givens. Returns `None` when the given pattern is not symmetric or the
/// induced mapping is inconsistent.
fn digit_involution(ctx: &SearchContext<'_>) -> Option<[Digit; 9]> {
    let mut mapping: [Option<Digit>; 9] = [None; 9];
    let mut link = |a: Digit, b: Digit| -> bool {
        match (mapping[a.as_index()], mapping[b.as_index()]) {
            (None, None) => {
                mapping[a.as_index()] = Some(b);
                mapping[b.as_index()] = Some(a);
                true
            }
            (Some(x), Some(y)) => x == b && y == a,
            _ => false,
        }
    };

    let mut n_given_pairs = 0;
    for cell in Cell::all().take(40) {
        let partner = Cell::new(80 - cell.get());
        match (ctx.grid.status(cell), ctx.grid.status(partner)) {
            (CellStatus::Given, CellStatus::Given) => {
                let a = ctx.grid.value(cell)?;
                let b = ctx.grid.value(partner)?;
                if !link(a, b) {
                    return None;
                }
                n_given_pairs += 1;
            }
            (CellStatus::Given, _) | (_, CellStatus::Given) => return None,
            _ => {}
        }
    }
    if n_given_pairs == 0 {
        return None;
    }

    // a given center digit must be its own image
    let center = Cell::new(40);
    if ctx.grid.status(center) == CellStatus::Given {
        let digit = ctx.grid.value(center)?;
        match mapping[digit.as_index()] {
            Some(image) if image != digit => return None,
            None => mapping[digit.as_index()] = Some(digit),
            _ => {}
        }
    }

    // unmapped digits stay fixed
    let mut result = [Digit::new(1); 9];
    for (index, slot) in mapping.iter().enumerate() {
        result[index] = slot.unwrap_or_else(|| Digit::from_index(index as u8));
    }
    Some(result)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::board::{Grid, GridMaps};
    use crate::solver::SolverConfig;

    struct NoOracle;
    impl crate::oracle::Oracle for NoOracle {
        fn solve(&self, _: &Grid) -> crate::oracle::OracleOutcome {
            unreachable!()
        }
    }

    fn run(grid: &Grid) -> Vec<Step> {
        let maps = GridMaps::new(grid);
        let config = SolverConfig::default();
        let ctx = SearchContext {
            grid,
            maps: &maps,
            oracle: &NoOracle,
            config: &config,
        };
        let mut steps = vec![];
        find_all(&ctx, &mut steps);
        steps
    }

    #[test]
    fn center_cell_eliminations() {
        // givens: 1 at r1c1, 2 at r9c9 and 3 at r2c2, 4 at r8c8 induce the
        // involution 1<->2, 3<->4; the center cannot hold any of them
        let mut grid = Grid::empty();
        grid.set(Cell::new(0), Digit::new(1), CellStatus::Given);
        grid.set(Cell::new(80), Digit::new(2), CellStatus::Given);
        grid.set(Cell::new(10), Digit::new(3), CellStatus::Given);
        grid.set(Cell::new(70), Digit::new(4), CellStatus::Given);

        let steps = run(&grid);
        assert_eq!(steps.len(), 1);
        let expected: Vec<_> = (1..5)
            .map(|digit| Conclusion::eliminate(Cell::new(40), Digit::new(digit)))
            .collect();
        assert_eq!(steps[0].conclusions, expected);
    }

    #[test]
    fn asymmetric_givens_stay_silent() {
        let mut grid = Grid::empty();
        grid.set(Cell::new(0), Digit::new(1), CellStatus::Given);
        let steps = run(&grid);
        assert!(steps.is_empty());
    }
}
