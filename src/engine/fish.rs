//! Basic fish: X-Wing, Swordfish and Jellyfish.
//!
//! A fish of size n confines a digit's candidates in n base lines to n
//! cover positions; the digit disappears from those positions in every
//! other parallel line.

use crate::bitset::{Iter as SetIter, Set};
use crate::board::positions::{IntoHouse, Line, Position};
use crate::board::{Candidate, Digit};
use crate::engine::SearchContext;
use crate::step::{Conclusion, Step, StepDetail, Technique, View};

pub(crate) fn find_all(ctx: &SearchContext<'_>, steps: &mut Vec<Step>) {
    for size in 2..=4u8 {
        for digit in Digit::all() {
            for &lines in &[Line::ALL_ROWS, Line::ALL_COLS] {
                walk_combinations(
                    ctx,
                    digit,
                    size,
                    Set::NONE,
                    lines.into_iter(),
                    lines,
                    Set::NONE,
                    steps,
                );
            }
        }
    }
}

//             goal_depth
// <degenerated>   1 (basically a hidden single, not supported here)
// x-wing          2
// swordfish       3
// jellyfish       4
#[allow(clippy::too_many_arguments)]
fn walk_combinations(
    ctx: &SearchContext<'_>,
    digit: Digit,
    goal_depth: u8,
    line_set: Set<Line>,
    mut lines: SetIter<Line>,
    all_lines: Set<Line>,
    union_poss_pos: Set<Position<Line>>,
    steps: &mut Vec<Step>,
) {
    if line_set.len() == goal_depth {
        // nothing of interest found
        if union_poss_pos.len() != goal_depth {
            return;
        }
        on_fish(ctx, digit, line_set, all_lines, union_poss_pos, steps);
        return;
    }

    while let Some(line) = lines.next() {
        let possible_pos = ctx.maps.house_poss_positions[line.house()][digit];
        let n_poss = possible_pos.len();
        let new_union_poss_pos = union_poss_pos | possible_pos.as_line_set();

        // n_poss == 0 => solved line (or impossible)
        // n_poss == 1 => hidden single
        if n_poss < 2 || new_union_poss_pos.len() > goal_depth {
            continue;
        }
        walk_combinations(
            ctx,
            digit,
            goal_depth,
            line_set | line.as_set(),
            lines.clone(),
            all_lines,
            new_union_poss_pos,
            steps,
        );
    }
}

fn on_fish(
    ctx: &SearchContext<'_>,
    digit: Digit,
    base: Set<Line>,
    all_lines: Set<Line>,
    positions: Set<Position<Line>>,
    steps: &mut Vec<Step>,
) {
    let mut conclusions = vec![];
    for line in all_lines.without(base) {
        for pos in positions {
            let cell = line.cell_at(pos);
            if ctx.maps.candidates[digit].contains(cell) {
                conclusions.push(Conclusion::eliminate(cell, digit));
            }
        }
    }
    if conclusions.is_empty() {
        return;
    }
    conclusions.sort();

    // perpendicular cover lines at the union positions
    let row_based = all_lines == Line::ALL_ROWS;
    let mut cover = Set::NONE;
    for pos in positions {
        let line = match row_based {
            true => Line::from(crate::board::Col::new(pos.get())),
            false => Line::from(crate::board::Row::new(pos.get())),
        };
        cover |= line;
    }

    let technique = match base.len() {
        2 => Technique::XWing,
        3 => Technique::Swordfish,
        _ => Technique::Jellyfish,
    };

    let mut view = View::default();
    for line in base {
        view.regions.push((0, line.house()));
    }
    for line in cover {
        view.regions.push((1, line.house()));
    }
    for line in base {
        for pos in ctx.maps.house_poss_positions[line.house()][digit].as_line_set() {
            let cell = line.cell_at(pos);
            view.candidates.push((0, Candidate { cell, digit }));
        }
    }

    steps.push(Step {
        technique,
        conclusions,
        view,
        detail: StepDetail::Fish {
            digit,
            base,
            cover,
            positions,
        },
    });
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::board::{Cell, Grid, GridMaps};
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
    fn x_wing_on_rows() {
        // digit 4 restricted to columns 1 and 9 in rows 2 and 5
        let mut grid = Grid::empty();
        for &row in &[1u8, 4] {
            for col in 1..8u8 {
                grid.eliminate(Cell::new(row * 9 + col), Digit::new(4));
            }
        }
        let steps = run(&grid);

        let step = steps
            .iter()
            .find(|step| step.technique == Technique::XWing)
            .expect("x-wing found");
        // 4 disappears from columns 1 and 9 outside rows 2 and 5
        assert_eq!(step.conclusions.len(), 14);
        assert!(step
            .conclusions
            .contains(&Conclusion::eliminate(Cell::new(0), Digit::new(4))));
        assert!(step
            .conclusions
            .contains(&Conclusion::eliminate(Cell::new(80), Digit::new(4))));
        assert!(!step
            .conclusions
            .contains(&Conclusion::eliminate(Cell::new(9), Digit::new(4))));

        match step.detail {
            StepDetail::Fish { base, cover, .. } => {
                assert_eq!(base.len(), 2);
                assert_eq!(cover.len(), 2);
            }
            _ => panic!("wrong detail"),
        }
    }
}
