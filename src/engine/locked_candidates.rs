//! Locked candidates: pointing (block onto line) and claiming
//! (line onto block).

use crate::bitset::Set;
use crate::board::positions::{Block, House, HouseType, IntoHouse, Line};
use crate::board::{Cell, Digit};
use crate::engine::SearchContext;
use crate::step::{Conclusion, Step, StepDetail, Technique, View};

pub(crate) fn find_all(ctx: &SearchContext<'_>, steps: &mut Vec<Step>) {
    // pointing: all candidates of a digit within a block share a line
    for block in Block::all() {
        for digit in Digit::all() {
            let cells = ctx.maps.house_candidate_cells(block.house(), digit);
            if cells.is_empty() || cells.len() > 3 {
                continue;
            }
            if let Some(line) = cells.covered_line() {
                let eliminations = ctx.maps.candidates[digit] & line.cells().without(block.cells());
                push_step(
                    ctx,
                    steps,
                    Technique::Pointing,
                    digit,
                    cells,
                    block.house(),
                    line.house(),
                    eliminations,
                );
            }
        }
    }

    // claiming: all candidates of a digit within a line share a block
    for line in Line::all() {
        for digit in Digit::all() {
            let cells = ctx.maps.house_candidate_cells(line.house(), digit);
            if cells.is_empty() || cells.len() > 3 {
                continue;
            }
            let block = match single_covering_block(cells) {
                Some(block) => block,
                None => continue,
            };
            let eliminations = ctx.maps.candidates[digit] & block.cells().without(line.cells());
            push_step(
                ctx,
                steps,
                Technique::Claiming,
                digit,
                cells,
                line.house(),
                block.house(),
                eliminations,
            );
        }
    }
}

fn single_covering_block(cells: Set<Cell>) -> Option<Block> {
    cells
        .covered_regions()
        .into_iter()
        .find_map(|house| match house.categorize() {
            HouseType::Block(block) => Some(block),
            _ => None,
        })
}

#[allow(clippy::too_many_arguments)]
fn push_step(
    ctx: &SearchContext<'_>,
    steps: &mut Vec<Step>,
    technique: Technique,
    digit: Digit,
    intersection: Set<Cell>,
    base: House,
    cover: House,
    eliminations: Set<Cell>,
) {
    if eliminations.is_empty() {
        return;
    }

    let mut view = View::default();
    view.regions.push((0, base));
    view.regions.push((1, cover));
    view.candidates_in(0, ctx.grid, intersection, digit.as_set());

    steps.push(Step {
        technique,
        conclusions: eliminations
            .into_iter()
            .map(|cell| Conclusion::eliminate(cell, digit))
            .collect(),
        view,
        detail: StepDetail::LockedCandidates { digit, intersection },
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

    #[test]
    fn pointing_pair() {
        // digit 5 in block 0 is confined to row 1 (cells r1c1, r1c2)
        let mut grid = Grid::empty();
        for &cell in &[2, 9, 10, 11, 18, 19, 20] {
            grid.eliminate(Cell::new(cell), Digit::new(5));
        }
        let steps = run(&grid);

        let step = steps
            .iter()
            .find(|step| step.technique == Technique::Pointing)
            .unwrap();
        // eliminations: digit 5 from r1c4..r1c9
        let expected: Vec<_> = (3..9)
            .map(|col| Conclusion::eliminate(Cell::new(col), Digit::new(5)))
            .collect();
        assert_eq!(step.conclusions, expected);
    }

    #[test]
    fn claiming() {
        // digit 7 in row 1 is confined to block 0
        let mut grid = Grid::empty();
        for col in 3..9 {
            grid.eliminate(Cell::new(col), Digit::new(7));
        }
        let steps = run(&grid);

        let step = steps
            .iter()
            .find(|step| step.technique == Technique::Claiming)
            .unwrap();
        let expected: Vec<_> = [9, 10, 11, 18, 19, 20]
            .iter()
            .map(|&cell| Conclusion::eliminate(Cell::new(cell), Digit::new(7)))
            .collect();
        assert_eq!(step.conclusions, expected);
    }
}
