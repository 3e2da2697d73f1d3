//! Almost locked sets, XZ rule.
//!
//! An ALS is a group of n cells in one house carrying n+1 candidate digits.
//! Two cell-disjoint ALS linked by a restricted common digit x (every
//! x-holder of one set sees every x-holder of the other) cannot both give
//! up x; one of them collapses into a locked set. Any other digit z common
//! to both sets is then pinned inside them, so cells seeing all z-holders
//! of both sets lose z.

use crate::bitset::{Iter as SetIter, Set};
use crate::board::positions::House;
use crate::board::{Cell, Digit};
use crate::engine::SearchContext;
use crate::step::{Conclusion, Step, StepDetail, Technique, View};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Als {
    house: House,
    cells: Set<Cell>,
    digits: Set<Digit>,
}

pub(crate) fn find_all(ctx: &SearchContext<'_>, steps: &mut Vec<Step>) {
    let sets = collect_almost_locked_sets(ctx);

    for (i, &als1) in sets.iter().enumerate() {
        for &als2 in &sets[i + 1..] {
            if als1.house == als2.house || als1.cells.overlaps(als2.cells) {
                continue;
            }
            let common = als1.digits & als2.digits;
            if common.len() < 2 {
                continue;
            }

            let restricted: Vec<Digit> = common
                .into_iter()
                .filter(|&digit| is_restricted_common(ctx, als1, als2, digit))
                .collect();
            // exactly one restricted common digit keeps the reasoning to
            // the plain XZ rule
            let x = match restricted.as_slice() {
                &[x] => x,
                _ => continue,
            };

            on_als_pair(ctx, als1, als2, x, steps);
        }
    }
}

/// Collects every ALS of every house, in house order then combination order.
/// Solved cells and naked singles never participate.
fn collect_almost_locked_sets(ctx: &SearchContext<'_>) -> Vec<Als> {
    let mut sets = vec![];
    for house in House::all() {
        let candidate_cells = ctx.maps.empty_cells & house.cells();
        walk_combinations(
            ctx,
            house,
            candidate_cells.into_iter(),
            Set::NONE,
            Set::NONE,
            &mut sets,
        );
    }
    sets
}

fn walk_combinations(
    ctx: &SearchContext<'_>,
    house: House,
    mut cells: SetIter<Cell>,
    cell_set: Set<Cell>,
    digits: Set<Digit>,
    sets: &mut Vec<Als>,
) {
    while let Some(cell) = cells.next() {
        let candidates = ctx.maps.cell_candidates[cell];
        if candidates.len() <= 1 {
            continue;
        }
        let new_cell_set = cell_set | cell.as_set();
        let new_digits = digits | candidates;

        if new_digits.len() == new_cell_set.len() + 1 {
            sets.push(Als {
                house,
                cells: new_cell_set,
                digits: new_digits,
            });
        }

        walk_combinations(ctx, house, cells.clone(), new_cell_set, new_digits, sets);
    }
}

/// The restricted common test: the digit's holders of both sets must all
/// see each other, so the digit can live in at most one of the two sets.
fn is_restricted_common(ctx: &SearchContext<'_>, als1: Als, als2: Als, digit: Digit) -> bool {
    let holders1 = als1.cells & ctx.maps.candidates[digit];
    let holders2 = als2.cells & ctx.maps.candidates[digit];
    if holders1.is_empty() || holders2.is_empty() {
        return false;
    }
    holders1
        .into_iter()
        .all(|cell| cell.peers().contains(holders2))
}

fn on_als_pair(
    ctx: &SearchContext<'_>,
    als1: Als,
    als2: Als,
    restricted_common: Digit,
    steps: &mut Vec<Step>,
) {
    let both = als1.cells | als2.cells;
    let common = (als1.digits & als2.digits).without(restricted_common.as_set());

    let mut conclusions = vec![];
    for digit in common {
        let holders = both & ctx.maps.candidates[digit];
        let targets = (holders.peer_intersection() & ctx.maps.candidates[digit]).without(both);
        for cell in targets {
            conclusions.push(Conclusion::eliminate(cell, digit));
        }
    }
    if conclusions.is_empty() {
        return;
    }
    conclusions.sort();

    let mut view = View::default();
    view.regions.push((0, als1.house));
    view.regions.push((1, als2.house));
    view.candidates_in(0, ctx.grid, als1.cells, als1.digits);
    view.candidates_in(1, ctx.grid, als2.cells, als2.digits);

    steps.push(Step {
        technique: Technique::AlsXz,
        conclusions,
        view,
        detail: StepDetail::AlsPair {
            als1_cells: als1.cells,
            als1_digits: als1.digits,
            als2_cells: als2.cells,
            als2_digits: als2.digits,
            restricted_common,
        },
    });
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

    fn restrict(grid: &mut Grid, cell: u8, digits: &[u8]) {
        for digit in Digit::all() {
            if !digits.contains(&digit.get()) {
                grid.eliminate(Cell::new(cell), digit);
            }
        }
    }

    #[test]
    fn als_collection_finds_bivalue_cells() {
        let mut grid = Grid::empty();
        restrict(&mut grid, 0, &[1, 2]);
        let maps = GridMaps::new(&grid);
        let config = SolverConfig::default();
        let ctx = SearchContext {
            grid: &grid,
            maps: &maps,
            oracle: &NoOracle,
            config: &config,
        };
        let sets = collect_almost_locked_sets(&ctx);
        // the bi-value cell is a one-cell ALS in its row, column and block
        let single = sets
            .iter()
            .filter(|als| als.cells == Cell::new(0).as_set())
            .count();
        assert_eq!(single, 3);
    }

    #[test]
    fn als_xz_eliminates_z() {
        // A = {r1c3} with {1,2}; B = {r2c1, r2c4} with {1,3} and {2,3}.
        // x = 1 is restricted (r1c3 sees r2c1 through block 1), x = 2 is
        // not (r1c3 does not see r2c4), so z = 2 vanishes from the cells
        // seeing both of its holders r1c3 and r2c4.
        let mut grid = Grid::empty();
        restrict(&mut grid, 2, &[1, 2]);
        restrict(&mut grid, 9, &[1, 3]);
        restrict(&mut grid, 12, &[2, 3]);

        let maps = GridMaps::new(&grid);
        let config = SolverConfig::default();
        let ctx = SearchContext {
            grid: &grid,
            maps: &maps,
            oracle: &NoOracle,
            config: &config,
        };
        let mut steps = vec![];
        find_all(&ctx, &mut steps);

        assert!(!steps.is_empty());
        let step = &steps[0];
        assert_eq!(step.technique, Technique::AlsXz);
        let expected: Vec<_> = [3, 4, 5, 10, 11]
            .iter()
            .map(|&cell| Conclusion::eliminate(Cell::new(cell), Digit::new(2)))
            .collect();
        assert_eq!(step.conclusions, expected);
    }
}
