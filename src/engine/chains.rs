//! Singles chain (simple coloring) over conjugate pairs.
//!
//! For one digit, houses with exactly two open positions link those cells:
//! exactly one of the two holds the digit. Two-coloring the linked cells
//! yields eliminations: a color that appears twice in one house is false
//! everywhere, and any outside cell seeing both colors loses the digit.

use crate::bitset::Set;
use crate::board::positions::House;
use crate::board::{Candidate, Cell, Digit};
use crate::engine::SearchContext;
use crate::step::{Conclusion, Link, Step, StepDetail, Technique, View};

pub(crate) fn find_all(ctx: &SearchContext<'_>, steps: &mut Vec<Step>) {
    for digit in Digit::all() {
        find_for_digit(ctx, digit, steps);
    }
}

fn find_for_digit(ctx: &SearchContext<'_>, digit: Digit, steps: &mut Vec<Step>) {
    // conjugate adjacency per cell
    let candidates = ctx.maps.candidates[digit];
    let mut conjugates: Vec<(Cell, Cell)> = vec![];
    for house in House::all() {
        let positions = ctx.maps.house_poss_positions[house][digit];
        if positions.len() == 2 {
            let mut cells = positions.into_iter().map(|pos| house.cell_at(pos));
            let (a, b) = (cells.next().unwrap(), cells.next().unwrap());
            conjugates.push((a, b));
        }
    }
    if conjugates.is_empty() {
        return;
    }

    let mut visited = Set::NONE;
    for start in candidates {
        if visited.contains(start) || !touches_conjugate(&conjugates, start) {
            continue;
        }

        // two-color the component by depth first search
        let mut color_a = Set::NONE;
        let mut color_b = Set::NONE;
        let mut links = vec![];
        let mut stack = vec![(start, true)];
        while let Some((cell, is_a)) = stack.pop() {
            let colored = color_a | color_b;
            if colored.contains(cell) {
                continue;
            }
            match is_a {
                true => color_a |= cell,
                false => color_b |= cell,
            }
            for &(a, b) in &conjugates {
                let other = match cell {
                    c if c == a => b,
                    c if c == b => a,
                    _ => continue,
                };
                if !colored.contains(other) {
                    links.push(Link {
                        from: Candidate { cell, digit },
                        to: Candidate { cell: other, digit },
                    });
                    stack.push((other, !is_a));
                }
            }
        }
        visited |= color_a | color_b;

        // Rule 1: a color twice in one house is false everywhere.
        // Both colors failing means the grid is contradictory; that is not
        // this searcher's message to deliver, so it stays silent then.
        let a_doubled = doubled_in_a_house(color_a);
        let b_doubled = doubled_in_a_house(color_b);
        let mut conclusions = vec![];
        match (a_doubled, b_doubled) {
            (true, true) => continue,
            (true, false) => {
                conclusions.extend(
                    color_a
                        .into_iter()
                        .map(|cell| Conclusion::eliminate(cell, digit)),
                );
            }
            (false, true) => {
                conclusions.extend(
                    color_b
                        .into_iter()
                        .map(|cell| Conclusion::eliminate(cell, digit)),
                );
            }
            (false, false) => {
                // Rule 2: outside cells seeing both colors lose the digit
                for cell in candidates.without(color_a | color_b) {
                    if cell.peers().overlaps(color_a) && cell.peers().overlaps(color_b) {
                        conclusions.push(Conclusion::eliminate(cell, digit));
                    }
                }
            }
        }
        if conclusions.is_empty() {
            continue;
        }

        let mut view = View::default();
        for cell in color_a {
            view.candidates.push((0, Candidate { cell, digit }));
        }
        for cell in color_b {
            view.candidates.push((1, Candidate { cell, digit }));
        }
        view.links = links;

        steps.push(Step {
            technique: Technique::SinglesChain,
            conclusions,
            view,
            detail: StepDetail::Coloring { digit },
        });
    }
}

fn touches_conjugate(conjugates: &[(Cell, Cell)], cell: Cell) -> bool {
    conjugates.iter().any(|&(a, b)| a == cell || b == cell)
}

fn doubled_in_a_house(cells: Set<Cell>) -> bool {
    House::all().any(|house| (cells & house.cells()).len() >= 2)
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

    fn keep_digit_in(grid: &mut Grid, digit: u8, cells: &[u8]) {
        for cell in Cell::all() {
            if !cells.contains(&cell.get()) {
                grid.eliminate(cell, Digit::new(digit));
            }
        }
    }

    #[test]
    fn sees_both_colors() {
        // digit 1 chains r1c1(A)-r1c9(B)-r9c9(A)-r9c1(B) through the row
        // and column pairs; r5c1 sees r1c1 and r9c1, i.e. both colors
        let mut grid = Grid::empty();
        keep_digit_in(&mut grid, 1, &[0, 8, 80, 72, 36, 40]);
        let steps = run(&grid);

        let step = steps
            .iter()
            .find(|step| step.technique == Technique::SinglesChain)
            .expect("coloring step found");
        assert!(step
            .conclusions
            .contains(&Conclusion::eliminate(Cell::new(36), Digit::new(1))));
    }
}
