//! Naked and hidden subsets of sizes 2 to 4.
//!
//! A naked subset of size n is a group of n empty cells of one house whose
//! candidate masks union to exactly n digits; those digits go away from the
//! rest of the house. A hidden subset is the dual: n digits whose possible
//! positions in a house union to exactly n cells; the extra candidates of
//! those cells go away.
//!
//! Naked subsets additionally classify as locked when the subset digits
//! collapse into a box/line intersection, which upgrades them to the
//! pointing/claiming-strength locked pair/triple variants.

use crate::bitset::{Iter as SetIter, Set};
use crate::board::positions::{House, Position};
use crate::board::{Cell, Digit};
use crate::engine::SearchContext;
use crate::step::{Conclusion, Step, StepDetail, Technique, View};

pub(crate) fn find_all(ctx: &SearchContext<'_>, steps: &mut Vec<Step>) {
    for size in 2..=4 {
        for house in House::all() {
            if ctx.maps.house_solved_digits[house].is_full() {
                continue;
            }
            walk_naked(ctx, house, size, Set::ALL.into_iter(), Set::NONE, Set::NONE, steps);
            walk_hidden(ctx, house, size, Set::ALL.into_iter(), Set::NONE, Set::NONE, steps);
        }
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////
//                                  naked subsets
///////////////////////////////////////////////////////////////////////////////////////////////

fn walk_naked(
    ctx: &SearchContext<'_>,
    house: House,
    size: u8,
    mut positions: SetIter<Position<House>>,
    position_set: Set<Position<House>>,
    digits: Set<Digit>,
    steps: &mut Vec<Step>,
) {
    if position_set.len() == size {
        if digits.len() == size {
            on_naked_subset(ctx, house, position_set, digits, steps);
        }
        return;
    }

    while let Some(position) = positions.next() {
        let cell = house.cell_at(position);
        let cell_digits = ctx.maps.cell_candidates[cell];
        // solved or impossible cell
        if cell_digits.is_empty() {
            continue;
        }
        let new_digits = digits | cell_digits;
        // subsets of 5 and more digits always have complementary subsets
        if new_digits.len() > size {
            continue;
        }
        walk_naked(
            ctx,
            house,
            size,
            positions.clone(),
            position_set | position.as_set(),
            new_digits,
            steps,
        );
    }
}

fn on_naked_subset(
    ctx: &SearchContext<'_>,
    house: House,
    positions: Set<Position<House>>,
    digits: Set<Digit>,
    steps: &mut Vec<Step>,
) {
    let mut cells: Set<Cell> = Set::NONE;
    for position in positions {
        cells |= house.cell_at(position);
    }

    // per digit: the cells holding it see their common peers; the digit
    // is locked when those cells share both a line and a block
    let mut conclusions = vec![];
    let mut any_locked = false;
    let mut all_locked = true;
    for digit in digits {
        let holders = cells & ctx.maps.candidates[digit];
        if holders.is_empty() {
            all_locked = false;
            continue;
        }
        let seen_by_all = holders.peer_intersection();
        match seen_by_all.len() > 9 {
            true => any_locked = true,
            false => all_locked = false,
        }
        for cell in (seen_by_all & ctx.maps.candidates[digit]).without(cells) {
            conclusions.push(Conclusion::eliminate(cell, digit));
        }
    }
    if conclusions.is_empty() {
        return;
    }
    conclusions.sort();
    conclusions.dedup();

    let locked = match (any_locked, digits.len()) {
        (false, _) => None,
        // a quad spans too many cells to collapse completely
        (true, 4) => Some(false),
        (true, _) => Some(all_locked),
    };
    let technique = match (digits.len(), locked) {
        (2, Some(true)) => Technique::LockedPair,
        (3, Some(true)) => Technique::LockedTriple,
        (2, Some(false)) => Technique::NakedPairPlus,
        (3, Some(false)) => Technique::NakedTriplePlus,
        (4, Some(false)) => Technique::NakedQuadPlus,
        (2, None) => Technique::NakedPair,
        (3, None) => Technique::NakedTriple,
        _ => Technique::NakedQuad,
    };

    let mut view = View::default();
    view.regions.push((0, house));
    view.candidates_in(0, ctx.grid, cells, digits);

    steps.push(Step {
        technique,
        conclusions,
        view,
        detail: StepDetail::Subset {
            house,
            cells,
            digits,
            locked,
        },
    });
}

///////////////////////////////////////////////////////////////////////////////////////////////
//                                  hidden subsets
///////////////////////////////////////////////////////////////////////////////////////////////

fn walk_hidden(
    ctx: &SearchContext<'_>,
    house: House,
    size: u8,
    mut digits: SetIter<Digit>,
    digit_set: Set<Digit>,
    positions: Set<Position<House>>,
    steps: &mut Vec<Step>,
) {
    if digit_set.len() == size {
        if positions.len() == size {
            on_hidden_subset(ctx, house, digit_set, positions, steps);
        }
        return;
    }

    while let Some(digit) = digits.next() {
        let digit_positions = ctx.maps.house_poss_positions[house][digit];
        // solved digit (or house without a place for it)
        if digit_positions.is_empty() {
            continue;
        }
        let new_positions = positions | digit_positions;
        if new_positions.len() > size {
            continue;
        }
        walk_hidden(
            ctx,
            house,
            size,
            digits.clone(),
            digit_set | digit.as_set(),
            new_positions,
            steps,
        );
    }
}

fn on_hidden_subset(
    ctx: &SearchContext<'_>,
    house: House,
    digits: Set<Digit>,
    positions: Set<Position<House>>,
    steps: &mut Vec<Step>,
) {
    let mut cells = Set::NONE;
    let mut conclusions = vec![];
    for position in positions {
        let cell = house.cell_at(position);
        cells |= cell;
        for extra in ctx.maps.cell_candidates[cell].without(digits) {
            conclusions.push(Conclusion::eliminate(cell, extra));
        }
    }
    if conclusions.is_empty() {
        return;
    }

    let technique = match digits.len() {
        2 => Technique::HiddenPair,
        3 => Technique::HiddenTriple,
        _ => Technique::HiddenQuad,
    };

    let mut view = View::default();
    view.regions.push((0, house));
    view.candidates_in(0, ctx.grid, cells, digits);

    steps.push(Step {
        technique,
        conclusions,
        view,
        detail: StepDetail::Subset {
            house,
            cells,
            digits,
            locked: None,
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

    fn restrict(grid: &mut Grid, cell: u8, digits: &[u8]) {
        for digit in Digit::all() {
            if !digits.contains(&digit.get()) {
                grid.eliminate(Cell::new(cell), digit);
            }
        }
    }

    #[test]
    fn naked_pair_eliminations() {
        // r1c1 and r1c5 hold exactly {1,2}: a naked pair in row 1 only
        let mut grid = Grid::empty();
        restrict(&mut grid, 0, &[1, 2]);
        restrict(&mut grid, 4, &[1, 2]);
        let steps = run(&grid);

        let step = steps
            .iter()
            .find(|step| step.technique == Technique::NakedPair)
            .expect("naked pair found");

        // 1 and 2 go away from every other cell of row 1, nothing else
        let mut expected = vec![];
        for col in [1, 2, 3, 5, 6, 7, 8] {
            expected.push(Conclusion::eliminate(Cell::new(col), Digit::new(1)));
            expected.push(Conclusion::eliminate(Cell::new(col), Digit::new(2)));
        }
        expected.sort();
        assert_eq!(step.conclusions, expected);

        match step.detail {
            StepDetail::Subset { locked, digits, .. } => {
                assert_eq!(locked, None);
                assert_eq!(digits, Digit::new(1).as_set() | Digit::new(2));
            }
            _ => panic!("wrong detail"),
        }
    }

    #[test]
    fn locked_pair() {
        // r1c1 and r1c2 share a row and a block: the pair is locked
        let mut grid = Grid::empty();
        restrict(&mut grid, 0, &[1, 2]);
        restrict(&mut grid, 1, &[1, 2]);
        let steps = run(&grid);

        let step = steps
            .iter()
            .find(|step| step.technique == Technique::LockedPair)
            .expect("locked pair found");
        // eliminations cover the row remainder and the block remainder
        assert!(step
            .conclusions
            .contains(&Conclusion::eliminate(Cell::new(8), Digit::new(1))));
        assert!(step
            .conclusions
            .contains(&Conclusion::eliminate(Cell::new(19), Digit::new(2))));
    }

    #[test]
    fn hidden_pair() {
        // digits 8 and 9 of row 1 fit only in r1c1 and r1c2
        let mut grid = Grid::empty();
        for col in 2..9 {
            grid.eliminate(Cell::new(col), Digit::new(8));
            grid.eliminate(Cell::new(col), Digit::new(9));
        }
        let steps = run(&grid);

        let step = steps
            .iter()
            .find(|step| step.technique == Technique::HiddenPair)
            .expect("hidden pair found");
        // the pair cells lose their other seven candidates
        assert_eq!(step.conclusions.len(), 14);
        assert!(step
            .conclusions
            .contains(&Conclusion::eliminate(Cell::new(0), Digit::new(1))));
        assert!(!step
            .conclusions
            .iter()
            .any(|conclusion| conclusion.candidate.digit.get() >= 8));
    }
}
