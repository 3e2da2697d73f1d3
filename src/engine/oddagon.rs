//! Bi-value oddagon (rank theory).
//!
//! An odd-length loop of cells all holding the digit pair {d1, d2}, linked
//! through alternating houses, cannot be colored consistently: if every
//! loop cell were reduced to the pair, the puzzle would be contradictory.
//! The cells carrying surplus digits absorb the contradiction, which
//! classifies into four elimination shapes by surplus-cell count and
//! surplus-digit structure.

use itertools::Itertools;
use smallvec::SmallVec;

use crate::bitset::Set;
use crate::board::positions::House;
use crate::board::{Cell, Digit};
use crate::engine::SearchContext;
use crate::step::{Conclusion, Step, StepDetail, Technique, View};

pub(crate) fn find_all(ctx: &SearchContext<'_>, steps: &mut Vec<Step>) {
    if ctx.maps.bivalue_cells.len() < 4 {
        return;
    }

    let mut seen: Vec<(Set<Cell>, Set<Digit>)> = vec![];
    for start in ctx.maps.bivalue_cells {
        let pair = ctx.maps.cell_candidates[start];
        debug_assert_eq!(pair.len(), 2);
        let mut digits = pair.into_iter();
        let (d1, d2) = (digits.next().unwrap(), digits.next().unwrap());

        let mut loops = vec![];
        let mut loop_map = Set::NONE;
        // loops never exceed two cells per house
        let mut temp_loop: SmallVec<[Cell; 16]> = SmallVec::new();
        search_loops(
            ctx,
            d1,
            d2,
            start,
            start,
            None,
            2,
            &mut loop_map,
            &mut temp_loop,
            &mut loops,
        );

        for loop_map in loops {
            if seen.contains(&(loop_map, pair)) {
                continue;
            }
            seen.push((loop_map, pair));
            classify(ctx, d1, d2, loop_map, steps);
        }
    }
}

/// Depth-first loop search. Every move changes the linking house kind,
/// cells must hold both loop digits, at most two cells may carry surplus
/// digits, and no house may be visited by three loop cells.
#[allow(clippy::too_many_arguments)]
fn search_loops(
    ctx: &SearchContext<'_>,
    d1: Digit,
    d2: Digit,
    start: Cell,
    cell: Cell,
    last_house: Option<House>,
    allowed_extra: u8,
    loop_map: &mut Set<Cell>,
    temp_loop: &mut SmallVec<[Cell; 16]>,
    loops: &mut Vec<Set<Cell>>,
) {
    *loop_map |= cell;
    temp_loop.push(cell);

    for &house in &cell.houses() {
        if Some(house) == last_house {
            continue;
        }
        let next_cells = (house.cells() & ctx.maps.empty_cells).without(cell.as_set());
        for next in next_cells {
            if next == start
                && temp_loop.len() >= 5
                && temp_loop.len() % 2 == 1
                && is_valid_loop(*loop_map)
            {
                loops.push(*loop_map);
                continue;
            }
            if loop_map.contains(next) {
                continue;
            }
            let mask = ctx.maps.cell_candidates[next];
            if !mask.contains(d1.as_set() | d2) {
                continue;
            }
            let is_extra = mask.len() > 2;
            if is_extra && allowed_extra == 0 {
                continue;
            }
            if !fits_loop_regions(*loop_map, next) {
                continue;
            }
            search_loops(
                ctx,
                d1,
                d2,
                start,
                next,
                Some(house),
                allowed_extra - is_extra as u8,
                loop_map,
                temp_loop,
                loops,
            );
        }
    }

    // backtracking
    loop_map.remove(cell.as_set());
    temp_loop.pop();
}

fn is_valid_loop(cells: Set<Cell>) -> bool {
    cells
        .regions()
        .into_iter()
        .all(|house| (cells & house.cells()).len() < 3)
}

fn fits_loop_regions(loop_map: Set<Cell>, next: Cell) -> bool {
    next.houses()
        .iter()
        .all(|&house| (loop_map & house.cells()).len() < 2)
}

fn classify(ctx: &SearchContext<'_>, d1: Digit, d2: Digit, loop_map: Set<Cell>, steps: &mut Vec<Step>) {
    let comparer = d1.as_set() | d2;
    let extra_cells = loop_map.without(ctx.maps.bivalue_cells);
    match extra_cells.len() {
        0 => {} // contradictory grid state, not this searcher's message
        1 => check_type_1(ctx, comparer, loop_map, extra_cells.one_possibility(), steps),
        _ => {
            check_type_2(ctx, comparer, loop_map, extra_cells, steps);
            if extra_cells.len() == 2 {
                check_type_3(ctx, comparer, loop_map, extra_cells, steps);
                check_type_4(ctx, d1, d2, loop_map, extra_cells, steps);
            }
        }
    }
}

/// Type 1: one surplus cell. It must escape the pair; a lone surplus digit
/// becomes an assignment, otherwise the pair digits leave the cell.
fn check_type_1(
    ctx: &SearchContext<'_>,
    comparer: Set<Digit>,
    loop_map: Set<Cell>,
    extra_cell: Cell,
    steps: &mut Vec<Step>,
) {
    let extra_digits = ctx.maps.cell_candidates[extra_cell].without(comparer);
    let conclusions = match extra_digits.unique() {
        Ok(Some(digit)) => vec![Conclusion::assign(extra_cell, digit)],
        _ => comparer
            .into_iter()
            .filter(|&digit| ctx.grid.has_candidate(extra_cell, digit))
            .map(|digit| Conclusion::eliminate(extra_cell, digit))
            .collect(),
    };
    if conclusions.is_empty() {
        return;
    }

    let mut view = View::default();
    view.candidates_in(0, ctx.grid, loop_map.without(extra_cell.as_set()), comparer);
    view.candidates_in(1, ctx.grid, extra_cell.as_set(), Set::ALL);
    steps.push(Step {
        technique: Technique::BivalueOddagonType1,
        conclusions,
        view,
        detail: StepDetail::Oddagon {
            loop_cells: loop_map,
            digits: comparer,
        },
    });
}

/// Type 2: all surplus cells share one surplus digit; one of them takes it,
/// so outside cells seeing all of them lose it.
fn check_type_2(
    ctx: &SearchContext<'_>,
    comparer: Set<Digit>,
    loop_map: Set<Cell>,
    extra_cells: Set<Cell>,
    steps: &mut Vec<Step>,
) {
    let extra_digits = extra_cells
        .into_iter()
        .fold(Set::NONE, |mask, cell| {
            mask | ctx.maps.cell_candidates[cell]
        })
        .without(comparer);
    let extra_digit = match extra_digits.unique() {
        Ok(Some(digit)) => digit,
        _ => return,
    };

    let elim_map = (extra_cells.peer_intersection().without(loop_map))
        & ctx.maps.candidates[extra_digit];
    if elim_map.is_empty() {
        return;
    }

    let mut view = View::default();
    view.candidates_in(0, ctx.grid, loop_map, comparer);
    view.candidates_in(1, ctx.grid, extra_cells, extra_digit.as_set());
    steps.push(Step {
        technique: Technique::BivalueOddagonType2,
        conclusions: elim_map
            .into_iter()
            .map(|cell| Conclusion::eliminate(cell, extra_digit))
            .collect(),
        view,
        detail: StepDetail::Oddagon {
            loop_cells: loop_map,
            digits: comparer,
        },
    });
}

/// Type 3: both surplus cells share a house; their surplus digits and a
/// cell combination of that house form a naked subset.
fn check_type_3(
    ctx: &SearchContext<'_>,
    comparer: Set<Digit>,
    loop_map: Set<Cell>,
    extra_cells: Set<Cell>,
    steps: &mut Vec<Step>,
) {
    let extra_digits = extra_cells
        .into_iter()
        .fold(Set::NONE, |mask, cell| {
            mask | ctx.maps.cell_candidates[cell]
        })
        .without(comparer);
    if extra_digits.is_empty() {
        return;
    }

    for house in extra_cells.covered_regions() {
        let iteration_cells = (house.cells() & ctx.maps.empty_cells).without(loop_map);
        let iteration: Vec<Cell> = iteration_cells.into_iter().collect();
        let min_size = (extra_digits.len() as usize).saturating_sub(1).max(1);
        for size in min_size..iteration.len() {
            for combination in iteration.iter().copied().combinations(size) {
                let combination_set = combination
                    .iter()
                    .fold(Set::NONE, |set, &cell| set | cell);
                let mask = combination
                    .iter()
                    .fold(Set::NONE, |mask, &cell| mask | ctx.maps.cell_candidates[cell]);
                if mask.overlaps(comparer) || (mask | extra_digits).len() as usize != size + 1 {
                    continue;
                }
                let subset_digits = mask | extra_digits;

                let mut conclusions = vec![];
                for digit in subset_digits {
                    for cell in
                        iteration_cells.without(combination_set) & ctx.maps.candidates[digit]
                    {
                        conclusions.push(Conclusion::eliminate(cell, digit));
                    }
                }
                if conclusions.is_empty() {
                    continue;
                }

                let mut view = View::default();
                view.regions.push((0, house));
                view.candidates_in(0, ctx.grid, loop_map, comparer);
                view.candidates_in(1, ctx.grid, extra_cells, extra_digits);
                view.candidates_in(1, ctx.grid, combination_set, subset_digits);
                steps.push(Step {
                    technique: Technique::BivalueOddagonType3,
                    conclusions,
                    view,
                    detail: StepDetail::Oddagon {
                        loop_cells: loop_map,
                        digits: comparer,
                    },
                });
            }
        }
    }
}

/// Type 4: a loop digit confined (within a shared house) to the two surplus
/// cells forms a conjugate pair there; were either surplus cell the other
/// loop digit, the whole loop would collapse to the pair. Both surplus
/// cells lose the other digit.
fn check_type_4(
    ctx: &SearchContext<'_>,
    d1: Digit,
    d2: Digit,
    loop_map: Set<Cell>,
    extra_cells: Set<Cell>,
    steps: &mut Vec<Step>,
) {
    for house in extra_cells.covered_regions() {
        for &(conjugate, other) in &[(d1, d2), (d2, d1)] {
            let holders = ctx.maps.candidates[conjugate] & house.cells();
            if holders != extra_cells {
                continue;
            }
            let elim_map = extra_cells & ctx.maps.candidates[other];
            if elim_map.is_empty() {
                continue;
            }

            let mut view = View::default();
            view.regions.push((0, house));
            view.candidates_in(0, ctx.grid, loop_map.without(extra_cells), d1.as_set() | d2);
            view.candidates_in(1, ctx.grid, extra_cells, conjugate.as_set());
            steps.push(Step {
                technique: Technique::BivalueOddagonType4,
                conclusions: elim_map
                    .into_iter()
                    .map(|cell| Conclusion::eliminate(cell, other))
                    .collect(),
                view,
                detail: StepDetail::Oddagon {
                    loop_cells: loop_map,
                    digits: d1.as_set() | d2,
                },
            });
        }
    }
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
    fn type_1_assignment() {
        // 5-cell loop on {1,2}:
        // r1c1(0) -row1- r1c4(3) -col4- r5c4(30) -row5- r5c2(28)
        // -col2- r2c2(10) -block1- back to r1c1. Each house holds two loop
        // cells; r2c2 carries the surplus digit 7.
        let mut grid = Grid::empty();
        for &cell in &[0, 3, 30, 28] {
            restrict(&mut grid, cell, &[1, 2]);
        }
        restrict(&mut grid, 10, &[1, 2, 7]); // the surplus cell
        let steps = run(&grid);

        let step = steps
            .iter()
            .find(|step| step.technique == Technique::BivalueOddagonType1)
            .expect("oddagon type 1 found");
        assert_eq!(
            step.conclusions,
            vec![Conclusion::assign(Cell::new(10), Digit::new(7))]
        );
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
}
