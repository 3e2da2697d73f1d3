//! Template set and template delete.
//!
//! The only searcher that reasons forward from the oracle's solution: per
//! digit, the solution's placement cells intersected with the open
//! candidates are forced assignments (template set), and open candidates
//! outside the placement cells can never hold (template delete).

use crate::bitset::Set;
use crate::board::{Candidate, Cell, Digit, Grid};
use crate::engine::SearchContext;
use crate::errors::InvalidPuzzleError;
use crate::step::{Conclusion, Step, StepDetail, Technique, View};

pub(crate) fn find_all(
    ctx: &SearchContext<'_>,
    steps: &mut Vec<Step>,
) -> Result<(), InvalidPuzzleError> {
    let solution = ctx.grid.unique_solution(ctx.oracle)?;

    if !ctx.config.template_delete_only {
        find_template_sets(ctx, &solution, steps);
    }
    find_template_deletes(ctx, &solution, steps);
    Ok(())
}

fn solution_cells(solution: &Grid, digit: Digit) -> Set<Cell> {
    let mut cells = Set::NONE;
    for cell in Cell::all() {
        if solution.value(cell) == Some(digit) {
            cells |= cell;
        }
    }
    cells
}

fn find_template_sets(ctx: &SearchContext<'_>, solution: &Grid, steps: &mut Vec<Step>) {
    for digit in Digit::all() {
        let placements = solution_cells(solution, digit) & ctx.maps.candidates[digit];
        if placements.is_empty() {
            continue;
        }

        let mut view = View::default();
        for cell in placements {
            view.candidates.push((0, Candidate { cell, digit }));
        }
        steps.push(Step {
            technique: Technique::TemplateSet,
            conclusions: placements
                .into_iter()
                .map(|cell| Conclusion::assign(cell, digit))
                .collect(),
            view,
            detail: StepDetail::Template { digit },
        });
    }
}

fn find_template_deletes(ctx: &SearchContext<'_>, solution: &Grid, steps: &mut Vec<Step>) {
    for digit in Digit::all() {
        let eliminations = ctx.maps.candidates[digit].without(solution_cells(solution, digit));
        if eliminations.is_empty() {
            continue;
        }

        steps.push(Step {
            technique: Technique::TemplateDelete,
            conclusions: eliminations
                .into_iter()
                .map(|cell| Conclusion::eliminate(cell, digit))
                .collect(),
            view: View::default(),
            detail: StepDetail::Template { digit },
        });
    }
}
