//! Bowman's bingo: depth-bounded contradiction search.
//!
//! Tentatively assign a candidate, follow the forced singles it triggers,
//! and if the trial collapses (a cell loses every candidate or two cells of
//! one house end up with the same value) the trial candidate is impossible.
//! Every branch works on a value copy of the grid, so there is no undo
//! bookkeeping and no aliasing between branches.

use crate::board::{Cell, CellStatus, Digit, Grid, GridMaps};
use crate::engine::{singles, SearchContext};
use crate::step::{Conclusion, ConclusionKind, Link, Step, StepDetail, Technique, View};

pub(crate) fn find_all(ctx: &SearchContext<'_>, steps: &mut Vec<Step>) {
    let length = ctx.config.bowman_chain_length;
    if length == 0 {
        return;
    }

    for digit in Digit::all() {
        for cell in ctx.maps.candidates[digit] {
            let mut series = vec![Conclusion::assign(cell, digit)];
            let mut trial = *ctx.grid;
            trial.set(cell, digit, CellStatus::Modifiable);

            if is_contradiction(&trial, cell) {
                record(steps, cell, digit, &series);
            } else {
                follow_forced_singles(ctx, trial, cell, digit, length - 1, &mut series, steps);
            }
        }
    }
}

/// Applies the first forced single of each round on a fresh grid copy until
/// the budget runs out, the chain dries up or a contradiction appears.
fn follow_forced_singles(
    ctx: &SearchContext<'_>,
    grid: Grid,
    start_cell: Cell,
    start_digit: Digit,
    length: u32,
    series: &mut Vec<Conclusion>,
    steps: &mut Vec<Step>,
) {
    if length == 0 {
        return;
    }
    let conclusion = match first_single(ctx, &grid) {
        Some(conclusion) => conclusion,
        // no forced continuation: the trial was a dead end, not a proof
        None => return,
    };
    debug_assert_eq!(conclusion.kind, ConclusionKind::Assignment);

    series.push(conclusion);
    let mut next = grid;
    next.set(
        conclusion.candidate.cell,
        conclusion.candidate.digit,
        CellStatus::Modifiable,
    );

    if is_contradiction(&next, conclusion.candidate.cell) {
        record(steps, start_cell, start_digit, series);
    } else {
        follow_forced_singles(ctx, next, start_cell, start_digit, length - 1, series, steps);
    }
    series.pop();
}

fn first_single(ctx: &SearchContext<'_>, grid: &Grid) -> Option<Conclusion> {
    let maps = GridMaps::new(grid);
    let trial_ctx = SearchContext {
        grid,
        maps: &maps,
        oracle: ctx.oracle,
        config: ctx.config,
    };
    let mut singles_steps = vec![];
    singles::find_all(&trial_ctx, &mut singles_steps);
    singles_steps
        .into_iter()
        .next()
        .map(|step| step.conclusions[0])
}

/// A freshly assigned cell contradicts the grid when a peer holds the same
/// value or an empty peer has no candidate left.
fn is_contradiction(grid: &Grid, cell: Cell) -> bool {
    let value = grid.value(cell);
    cell.neighbors().any(|peer| match grid.status(peer) {
        CellStatus::Empty => grid.candidates(peer).is_empty(),
        _ => grid.value(peer) == value,
    })
}

fn record(steps: &mut Vec<Step>, cell: Cell, digit: Digit, series: &[Conclusion]) {
    let mut view = View::default();
    for conclusion in series {
        view.candidates.push((0, conclusion.candidate));
    }
    for pair in series.windows(2) {
        view.links.push(Link {
            from: pair[0].candidate,
            to: pair[1].candidate,
        });
    }

    steps.push(Step {
        technique: Technique::BowmanBingo,
        conclusions: vec![Conclusion::eliminate(cell, digit)],
        view,
        detail: StepDetail::Contradiction {
            series: series.to_vec(),
        },
    });
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::solver::SolverConfig;

    struct NoOracle;
    impl crate::oracle::Oracle for NoOracle {
        fn solve(&self, _: &Grid) -> crate::oracle::OracleOutcome {
            unreachable!("bowman's bingo never consults the oracle")
        }
    }

    #[test]
    fn direct_contradiction() {
        // r1c1 is reduced to the lone candidate 2, so the trial
        // "2 at r1c2" strips r1c1 empty and proves the elimination
        let mut grid = Grid::empty();
        for &digit in &[1, 3, 4, 5, 6, 7, 8, 9] {
            grid.eliminate(Cell::new(0), Digit::new(digit));
        }

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

        assert!(steps.iter().any(|step| {
            step.technique == Technique::BowmanBingo
                && step.conclusions == vec![Conclusion::eliminate(Cell::new(1), Digit::new(2))]
        }));
    }
}
