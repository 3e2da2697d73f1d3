//! Single placements: full house, hidden single, naked single.

use crate::board::positions::House;
use crate::board::{Candidate, HouseType};
use crate::engine::SearchContext;
use crate::step::{Conclusion, Step, StepDetail, Technique, View};

pub(crate) fn find_all(ctx: &SearchContext<'_>, steps: &mut Vec<Step>) {
    find_full_houses(ctx, steps);
    find_hidden_singles(ctx, steps);
    find_naked_singles(ctx, steps);
}

/// A house with a single empty cell left.
fn find_full_houses(ctx: &SearchContext<'_>, steps: &mut Vec<Step>) {
    for house in House::all() {
        let empty_cells = ctx.maps.empty_cells & house.cells();
        if empty_cells.len() != 1 {
            continue;
        }
        let cell = empty_cells.one_possibility();
        let missing = !ctx.maps.house_solved_digits[house];
        let digit = match missing.unique() {
            Ok(Some(digit)) if ctx.grid.has_candidate(cell, digit) => digit,
            // anything else means the snapshot is contradictory; fail closed
            _ => continue,
        };

        let mut view = View::default();
        view.regions.push((0, house));
        view.candidates.push((0, Candidate { cell, digit }));
        steps.push(Step {
            technique: Technique::FullHouse,
            conclusions: vec![Conclusion::assign(cell, digit)],
            view,
            detail: StepDetail::Single {
                candidate: Candidate { cell, digit },
                house: Some(house),
            },
        });
    }
}

/// A digit with a single possible position in a house.
/// Blocks are scanned before lines, matching the difficulty order.
fn find_hidden_singles(ctx: &SearchContext<'_>, steps: &mut Vec<Step>) {
    for house in House::all_blocks_first() {
        for digit in !ctx.maps.house_solved_digits[house] {
            let positions = ctx.maps.house_poss_positions[house][digit];
            if positions.len() != 1 {
                continue;
            }
            let cell = house.cell_at(positions.one_possibility());
            // the cell may have been reported as a full house already
            if already_assigned(steps, cell) {
                continue;
            }

            let technique = match house.categorize() {
                HouseType::Block(_) => Technique::HiddenSingleBlock,
                HouseType::Row(_) => Technique::HiddenSingleRow,
                HouseType::Col(_) => Technique::HiddenSingleCol,
            };
            let mut view = View::default();
            view.regions.push((0, house));
            view.candidates.push((0, Candidate { cell, digit }));
            steps.push(Step {
                technique,
                conclusions: vec![Conclusion::assign(cell, digit)],
                view,
                detail: StepDetail::Single {
                    candidate: Candidate { cell, digit },
                    house: Some(house),
                },
            });
        }
    }
}

/// A cell with a single candidate left.
fn find_naked_singles(ctx: &SearchContext<'_>, steps: &mut Vec<Step>) {
    for cell in ctx.maps.empty_cells {
        let digit = match ctx.maps.cell_candidates[cell].unique() {
            Ok(Some(digit)) => digit,
            _ => continue,
        };
        // skip cells already covered by a house-based single
        if already_assigned(steps, cell) {
            continue;
        }

        let mut view = View::default();
        view.candidates.push((0, Candidate { cell, digit }));
        steps.push(Step {
            technique: Technique::NakedSingle,
            conclusions: vec![Conclusion::assign(cell, digit)],
            view,
            detail: StepDetail::Single {
                candidate: Candidate { cell, digit },
                house: None,
            },
        });
    }
}

fn already_assigned(steps: &[Step], cell: crate::board::Cell) -> bool {
    steps.iter().any(|step| {
        matches!(step.detail, StepDetail::Single { candidate, .. } if candidate.cell == cell)
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::board::{Cell, CellStatus, Digit, Grid, GridMaps};
    use crate::solver::SolverConfig;

    struct NoOracle;
    impl crate::oracle::Oracle for NoOracle {
        fn solve(&self, _: &Grid) -> crate::oracle::OracleOutcome {
            unreachable!("singles don't consult the oracle")
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
    fn full_house() {
        let mut grid = Grid::empty();
        // fill row 0 except r1c9
        for (col, digit) in (0..8).zip(1..9) {
            grid.set(Cell::new(col), Digit::new(digit), CellStatus::Given);
        }
        let steps = run(&grid);
        let step = &steps[0];
        assert_eq!(step.technique, Technique::FullHouse);
        assert_eq!(
            step.conclusions,
            vec![Conclusion::assign(Cell::new(8), Digit::new(9))]
        );
    }

    #[test]
    fn hidden_single_in_block() {
        // digit 1 in block 0 is confined to r1c1 by these four givens
        let mut grid = Grid::empty();
        for &cell in &[12, 24, 37, 56] {
            grid.set(Cell::new(cell), Digit::new(1), CellStatus::Given);
        }
        let steps = run(&grid);
        assert!(steps.iter().any(|step| {
            step.technique == Technique::HiddenSingleBlock
                && step.conclusions == vec![Conclusion::assign(Cell::new(0), Digit::new(1))]
        }));
    }

    #[test]
    fn naked_single() {
        let mut grid = Grid::empty();
        for digit in 1..9 {
            grid.eliminate(Cell::new(40), Digit::new(digit));
        }
        let steps = run(&grid);
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].technique, Technique::NakedSingle);
        assert_eq!(
            steps[0].conclusions,
            vec![Conclusion::assign(Cell::new(40), Digit::new(9))]
        );
    }
}
