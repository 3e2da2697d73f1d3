//! Senior exocet.
//!
//! A base pair of cells in one mini-line projects its candidate digits
//! through the three cross-lines of its block into target cells. When the
//! cross-line occupancy of every base digit is compatible (at most two
//! cross parallels outside the targets), the targets may only hold base
//! digits and the base pair sheds digits confirmed in the targets.

use itertools::Itertools;
use lazy_static::lazy_static;
use smallvec::SmallVec;

use crate::bitset::Set;
use crate::board::positions::{Col, Line, Row};
use crate::board::{Candidate, CandidateSet, Cell, CellStatus, Digit};
use crate::engine::SearchContext;
use crate::step::{Conclusion, Step, StepDetail, Technique, View};

#[derive(Copy, Clone, Debug)]
struct ExocetPattern {
    b1: Cell,
    b2: Cell,
    base_map: Set<Cell>,
    /// Cross-line cells outside the base chute.
    s: Set<Cell>,
    /// Chute cells that can host ordinary targets.
    target_map: Set<Cell>,
    is_row: bool,
}

lazy_static! {
    static ref PATTERNS: Vec<ExocetPattern> = build_patterns();
}

fn build_patterns() -> Vec<ExocetPattern> {
    let mut patterns = vec![];
    let cell_at = |row: u8, col: u8| Cell::new(row * 9 + col);
    let base_choices = [(0u8, 1u8), (0, 2), (1, 2)];

    // row based: base pair inside a mini-row
    for band in 0..3u8 {
        for row_in_band in 0..3u8 {
            let row = band * 3 + row_in_band;
            for stack in 0..3u8 {
                let mini: Vec<Cell> = (0..3).map(|i| cell_at(row, stack * 3 + i)).collect();
                let band_rows = (band * 3..band * 3 + 3).map(Row::new);
                let band_cells = band_rows.fold(Set::NONE, |set, r| set | r.cells());

                // the three cross columns, outside the band
                let mut s = Set::NONE;
                for col_in_stack in 0..3 {
                    s |= Col::new(stack * 3 + col_in_stack).cells();
                }
                let s = s.without(band_cells);

                // chute cells outside the base block and base row
                let block_cells = mini[0].block().cells();
                let target_map = band_cells
                    .without(block_cells)
                    .without(Row::new(row).cells());

                for &(i, j) in &base_choices {
                    let (b1, b2) = (mini[i as usize], mini[j as usize]);
                    patterns.push(ExocetPattern {
                        b1,
                        b2,
                        base_map: b1.as_set() | b2,
                        s,
                        target_map,
                        is_row: true,
                    });
                }
            }
        }
    }

    // column based: base pair inside a mini-column
    for stack in 0..3u8 {
        for col_in_stack in 0..3u8 {
            let col = stack * 3 + col_in_stack;
            for band in 0..3u8 {
                let mini: Vec<Cell> = (0..3).map(|i| cell_at(band * 3 + i, col)).collect();
                let stack_cols = (stack * 3..stack * 3 + 3).map(Col::new);
                let stack_cells = stack_cols.fold(Set::NONE, |set, c| set | c.cells());

                let mut s = Set::NONE;
                for row_in_band in 0..3 {
                    s |= Row::new(band * 3 + row_in_band).cells();
                }
                let s = s.without(stack_cells);

                let block_cells = mini[0].block().cells();
                let target_map = stack_cells
                    .without(block_cells)
                    .without(Col::new(col).cells());

                for &(i, j) in &base_choices {
                    let (b1, b2) = (mini[i as usize], mini[j as usize]);
                    patterns.push(ExocetPattern {
                        b1,
                        b2,
                        base_map: b1.as_set() | b2,
                        s,
                        target_map,
                        is_row: false,
                    });
                }
            }
        }
    }

    debug_assert_eq!(patterns.len(), 162);
    patterns
}

pub(crate) fn find_all(ctx: &SearchContext<'_>, steps: &mut Vec<Step>) {
    for pattern in PATTERNS.iter() {
        search_pattern(ctx, pattern, steps);
    }
}

fn search_pattern(ctx: &SearchContext<'_>, pattern: &ExocetPattern, steps: &mut Vec<Step>) {
    let base_cands = ctx.grid.candidates(pattern.b1) | ctx.grid.candidates(pattern.b2);
    if ctx.grid.candidates(pattern.b1).len() < 2 || ctx.grid.candidates(pattern.b2).len() < 2 {
        return;
    }

    let crossline = pattern.s | pattern.target_map;

    // occupancy of all base digits inside the cross-line map
    let mut temp = Set::NONE;
    for digit in base_cands {
        temp |= ctx.maps.digits[digit];
    }
    temp &= crossline;

    // a cover line holding exactly one base-digit cell of the cross-line
    // map contributes that cell as a potential target
    let base_line = match pattern.is_row {
        true => Line::from(pattern.b1.row()),
        false => Line::from(pattern.b1.col()),
    };
    let parallels = match pattern.is_row {
        true => Line::ALL_ROWS,
        false => Line::ALL_COLS,
    };
    // at most one cell per cover line
    let mut temp_targets: SmallVec<[Cell; 8]> = SmallVec::new();
    for line in parallels.without(base_line.as_set()) {
        let check = temp & line.cells();
        if check.len() == 1 {
            temp_targets.push(check.one_possibility());
        }
    }
    if temp_targets.is_empty() {
        return;
    }

    let base_chute = chute_index(pattern.b1, pattern.is_row);
    for comb in temp_targets.iter().copied().combinations(2) {
        let (v1, v2) = (comb[0], comb[1]);
        // both targets inside the base chute would sit next to the base
        if chute_index(v1, pattern.is_row) == base_chute
            && chute_index(v2, pattern.is_row) == base_chute
        {
            continue;
        }
        // targets on the same perpendicular line see each other
        let same_perpendicular = match pattern.is_row {
            true => v1.col() == v2.col(),
            false => v1.row() == v2.row(),
        };
        if same_perpendicular {
            continue;
        }

        let elim_digits =
            (ctx.grid.candidates(v1) | ctx.grid.candidates(v2)).without(base_cands);
        if !check_crossline(ctx, crossline, base_cands, v1, v2, pattern.is_row) {
            continue;
        }

        // target eliminations: non-base digits leave the target cells
        let mut target_elims = CandidateSet::NONE;
        for &target in &[v1, v2] {
            for digit in elim_digits & ctx.grid.candidates(target) {
                target_elims.insert(Candidate {
                    cell: target,
                    digit,
                });
            }
        }

        // true base eliminations: a decided target digit leaves the
        // other target and the cells seeing the whole base pair
        let mut tb_cands = Set::NONE;
        for &target in &[v1, v2] {
            let mask = decided_mask(ctx, target);
            if mask.len() == 1 {
                tb_cands |= mask;
            }
        }

        let mut true_base_elims = CandidateSet::NONE;
        if !tb_cands.is_empty()
            && (ctx.grid.status(v1) != CellStatus::Empty || ctx.grid.status(v2) != CellStatus::Empty)
        {
            for &target in &[v1, v2] {
                if ctx.grid.status(target) != CellStatus::Empty {
                    continue;
                }
                for digit in ctx.grid.candidates(target) & tb_cands {
                    true_base_elims.insert(Candidate {
                        cell: target,
                        digit,
                    });
                }
            }
        }
        for digit in tb_cands {
            let base_holders = pattern.base_map & ctx.maps.candidates[digit];
            let elim_map = base_holders.peer_intersection() & ctx.maps.candidates[digit];
            for cell in elim_map {
                true_base_elims.insert(Candidate { cell, digit });
            }
        }

        if target_elims.is_empty() && true_base_elims.is_empty() {
            continue;
        }
        let conclusions: Vec<Conclusion> = (target_elims | true_base_elims)
            .iter()
            .map(|candidate| Conclusion::eliminate(candidate.cell, candidate.digit))
            .collect();

        let targets = v1.as_set() | v2;
        let endo_target = [v1, v2]
            .iter()
            .copied()
            .find(|&target| pattern.s.contains(target));

        let mut view = View::default();
        view.cells.push((0, pattern.b1));
        view.cells.push((0, pattern.b2));
        for cell in crossline {
            let tag = match targets.contains(cell) {
                true => 1,
                false => 2,
            };
            view.cells.push((tag, cell));
        }
        view.candidates_in(0, ctx.grid, pattern.base_map, base_cands);

        steps.push(Step {
            technique: Technique::SeniorExocet,
            conclusions,
            view,
            detail: StepDetail::Exocet {
                base: pattern.base_map,
                targets,
                cross_line: crossline,
                endo_target,
                digits: base_cands,
            },
        });
    }
}

/// The chute (band for row-based, stack for column-based) of a cell.
fn chute_index(cell: Cell, is_row: bool) -> u8 {
    match is_row {
        true => cell.row().get() / 3,
        false => cell.col().get() / 3,
    }
}

/// A solved cell counts with its value, an empty one with its candidates.
fn decided_mask(ctx: &SearchContext<'_>, cell: Cell) -> Set<Digit> {
    match ctx.grid.value(cell) {
        Some(digit) => digit.as_set(),
        None => ctx.grid.candidates(cell),
    }
}

/// Cross-line compatibility: outside the targets no base digit may occupy
/// more than two cross parallels of the cross-line map.
fn check_crossline(
    ctx: &SearchContext<'_>,
    crossline: Set<Cell>,
    base_cands: Set<Digit>,
    v1: Cell,
    v2: Cell,
    is_row: bool,
) -> bool {
    let targets = v1.as_set() | v2;
    for digit in base_cands {
        let occupied = (crossline & ctx.maps.digits[digit]).without(targets);
        let lines = match is_row {
            true => occupied.rows(),
            false => occupied.cols(),
        };
        if lines.len() > 2 {
            return false;
        }
    }
    true
}
