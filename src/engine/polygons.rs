//! Borescoper's deadly pattern (heptagons and octagons).
//!
//! The pattern lives in one chute corner: a 2x2 quad inside one block (the
//! center, all four cells for an octagon, three of them for a heptagon),
//! one cell pair in a band neighbor block occupying the same two rows, and
//! one pair in a stack neighbor block occupying the same two columns. If
//! all pattern cells were reduced to the same few digits the puzzle would
//! have interchangeable solutions, so the surplus digit structure yields
//! eliminations. 11,664 heptagon and 2,916 octagon placements exist; the
//! table is built once on first use.

use itertools::Itertools;
use lazy_static::lazy_static;

use crate::bitset::Set;
use crate::board::{Cell, Digit};
use crate::engine::SearchContext;
use crate::step::{Conclusion, Step, StepDetail, Technique, View};

#[derive(Copy, Clone, Debug)]
struct Pattern {
    map: Set<Cell>,
    pair1: Set<Cell>,
    pair2: Set<Cell>,
    center: Set<Cell>,
    heptagon: bool,
}

lazy_static! {
    static ref PATTERNS: Vec<Pattern> = build_patterns();
}

fn build_patterns() -> Vec<Pattern> {
    let cell_at = |row: u8, col: u8| Cell::new(row * 9 + col);
    let pairs = [(0u8, 1u8), (0, 2), (1, 2)];
    let mut patterns = Vec::with_capacity(14_580);

    for block in 0..9u8 {
        let band = block / 3;
        let stack = block % 3;
        for &(r1, r2) in &pairs {
            let (row1, row2) = (band * 3 + r1, band * 3 + r2);
            for &(c1, c2) in &pairs {
                let (col1, col2) = (stack * 3 + c1, stack * 3 + c2);
                let quad = [
                    cell_at(row1, col1),
                    cell_at(row1, col2),
                    cell_at(row2, col1),
                    cell_at(row2, col2),
                ];
                let quad_set = quad.iter().fold(Set::NONE, |set, &cell| set | cell);

                // pairs in the band/stack neighbor blocks, sharing the
                // quad's rows resp. columns
                let mut band_pairs = vec![];
                for other_stack in (0..3).filter(|&s| s != stack) {
                    for col_in_block in 0..3 {
                        let col = other_stack * 3 + col_in_block;
                        band_pairs.push(cell_at(row1, col).as_set() | cell_at(row2, col));
                    }
                }
                let mut stack_pairs = vec![];
                for other_band in (0..3).filter(|&b| b != band) {
                    for row_in_block in 0..3 {
                        let row = other_band * 3 + row_in_block;
                        stack_pairs.push(cell_at(row, col1).as_set() | cell_at(row, col2));
                    }
                }

                for &pair1 in &band_pairs {
                    for &pair2 in &stack_pairs {
                        patterns.push(Pattern {
                            map: quad_set | pair1 | pair2,
                            pair1,
                            pair2,
                            center: quad_set,
                            heptagon: false,
                        });
                        for &dropped in &quad {
                            let center = quad_set.without(dropped.as_set());
                            patterns.push(Pattern {
                                map: center | pair1 | pair2,
                                pair1,
                                pair2,
                                center,
                                heptagon: true,
                            });
                        }
                    }
                }
            }
        }
    }

    debug_assert_eq!(patterns.len(), 14_580);
    patterns
}

pub(crate) fn find_all(ctx: &SearchContext<'_>, steps: &mut Vec<Step>) {
    if ctx.maps.empty_cells.len() < 7 {
        return;
    }

    for pattern in PATTERNS.iter() {
        if !ctx.maps.empty_cells.contains(pattern.map) {
            continue;
        }

        let or_of = |cells: Set<Cell>| {
            cells
                .into_iter()
                .fold(Set::NONE, |mask, cell| mask | ctx.maps.cell_candidates[cell])
        };
        let corner_mask1 = or_of(pattern.pair1);
        let corner_mask2 = or_of(pattern.pair2);
        let center_mask = or_of(pattern.center);
        let or_mask = corner_mask1 | corner_mask2 | center_mask;

        check_type_1(ctx, pattern, or_mask, steps);
        check_type_2(ctx, pattern, or_mask, steps);
        check_type_3(ctx, pattern, or_mask, steps);
        check_type_4(ctx, pattern, or_mask, steps);
    }
}

fn base_digit_count(pattern: &Pattern) -> usize {
    match pattern.heptagon {
        true => 3,
        false => 4,
    }
}

/// Iterator over the candidate base-digit subsets of the pattern.
fn digit_subsets(or_mask: Set<Digit>, count: usize) -> impl Iterator<Item = Set<Digit>> {
    or_mask
        .into_iter()
        .combinations(count)
        .map(|digits| digits.into_iter().fold(Set::NONE, |set, d| set | d))
}

/// Type 1: a single surplus digit left in a single pattern cell. That cell
/// must take the surplus digit, so the base digits go away from it.
fn check_type_1(ctx: &SearchContext<'_>, pattern: &Pattern, or_mask: Set<Digit>, steps: &mut Vec<Step>) {
    if or_mask.len() as usize != base_digit_count(pattern) + 1 {
        return;
    }
    for base_digits in digit_subsets(or_mask, base_digit_count(pattern)) {
        let other_digit = match or_mask.without(base_digits).unique() {
            Ok(Some(digit)) => digit,
            _ => continue,
        };
        let holders = pattern.map & ctx.maps.candidates[other_digit];
        if holders.len() != 1 {
            continue;
        }
        let elim_cell = holders.one_possibility();
        let elim_mask = ctx.maps.cell_candidates[elim_cell] & base_digits;
        if elim_mask.is_empty() {
            continue;
        }

        let mut view = View::default();
        view.candidates_in(0, ctx.grid, pattern.map.without(holders), Set::ALL);
        steps.push(Step {
            technique: Technique::BdpType1,
            conclusions: elim_mask
                .into_iter()
                .map(|digit| Conclusion::eliminate(elim_cell, digit))
                .collect(),
            view,
            detail: StepDetail::DeadlyPattern {
                map: pattern.map,
                digits: base_digits,
            },
        });
    }
}

/// Type 2: the surplus digit appears in several pattern cells. One of them
/// must hold it, so cells seeing all of them lose it.
fn check_type_2(ctx: &SearchContext<'_>, pattern: &Pattern, or_mask: Set<Digit>, steps: &mut Vec<Step>) {
    if or_mask.len() as usize != base_digit_count(pattern) + 1 {
        return;
    }
    for base_digits in digit_subsets(or_mask, base_digit_count(pattern)) {
        let other_digit = match or_mask.without(base_digits).unique() {
            Ok(Some(digit)) => digit,
            _ => continue,
        };
        let holders = pattern.map & ctx.maps.candidates[other_digit];
        let elim_map =
            (holders.peer_intersection().without(pattern.map)) & ctx.maps.candidates[other_digit];
        if elim_map.is_empty() {
            continue;
        }

        let mut view = View::default();
        view.candidates_in(0, ctx.grid, pattern.map, base_digits);
        view.candidates_in(1, ctx.grid, pattern.map, other_digit.as_set());
        steps.push(Step {
            technique: Technique::BdpType2,
            conclusions: elim_map
                .into_iter()
                .map(|cell| Conclusion::eliminate(cell, other_digit))
                .collect(),
            view,
            detail: StepDetail::DeadlyPattern {
                map: pattern.map,
                digits: base_digits,
            },
        });
    }
}

/// Type 3: the pattern part outside one house carries exactly the base
/// digits; the surplus digits inside the house combine with other house
/// cells into a naked subset, which clears those digits from the rest of
/// the house.
fn check_type_3(ctx: &SearchContext<'_>, pattern: &Pattern, or_mask: Set<Digit>, steps: &mut Vec<Step>) {
    for house in pattern.map.regions() {
        let current = pattern.map & house.cells();
        if current.len() < 2 {
            continue;
        }
        let other_cells = pattern.map.without(current);
        let other_mask = other_cells
            .into_iter()
            .fold(Set::NONE, |mask, cell| mask | ctx.maps.cell_candidates[cell]);

        for base_digits in digit_subsets(or_mask, base_digit_count(pattern)) {
            if other_mask != base_digits {
                continue;
            }
            let extra_digits = or_mask.without(base_digits);
            if extra_digits.is_empty() {
                continue;
            }

            let iteration_cells =
                (house.cells().without(current)) & ctx.maps.empty_cells;
            let iteration: Vec<Cell> = iteration_cells.into_iter().collect();
            let min_size = (extra_digits.len() as usize).saturating_sub(1).max(1);
            for size in min_size..iteration.len() {
                for combination in iteration.iter().copied().combinations(size) {
                    let combination_set = combination
                        .iter()
                        .fold(Set::NONE, |set, &cell| set | cell);
                    let comparer = combination
                        .iter()
                        .fold(Set::NONE, |mask, &cell| mask | ctx.maps.cell_candidates[cell]);
                    // the pattern cells in the house act as one virtual
                    // cell holding the extra digits
                    if comparer.overlaps(base_digits)
                        || (comparer | extra_digits).len() as usize != size + 1
                    {
                        continue;
                    }
                    let subset_digits = comparer | extra_digits;

                    let mut conclusions = vec![];
                    for digit in subset_digits {
                        let cells =
                            iteration_cells.without(combination_set) & ctx.maps.candidates[digit];
                        for cell in cells {
                            conclusions.push(Conclusion::eliminate(cell, digit));
                        }
                    }
                    if conclusions.is_empty() {
                        continue;
                    }

                    let mut view = View::default();
                    view.regions.push((0, house));
                    view.candidates_in(0, ctx.grid, other_cells, base_digits);
                    view.candidates_in(1, ctx.grid, current, extra_digits);
                    view.candidates_in(1, ctx.grid, combination_set, subset_digits);
                    steps.push(Step {
                        technique: Technique::BdpType3,
                        conclusions,
                        view,
                        detail: StepDetail::DeadlyPattern {
                            map: pattern.map,
                            digits: base_digits,
                        },
                    });
                }
            }
        }
    }
}

/// Type 4: all but one of the base digits form a conjugate region on the
/// pattern cells within one house; the remaining base digit would complete
/// the deadly pattern there and is eliminated from those cells.
fn check_type_4(ctx: &SearchContext<'_>, pattern: &Pattern, or_mask: Set<Digit>, steps: &mut Vec<Step>) {
    for house in pattern.map.regions() {
        let current = pattern.map & house.cells();
        if current.len() < 2 {
            continue;
        }
        let other_cells = pattern.map.without(current);
        let other_mask = other_cells
            .into_iter()
            .fold(Set::NONE, |mask, cell| mask | ctx.maps.cell_candidates[cell]);

        for base_digits in digit_subsets(or_mask, base_digit_count(pattern)) {
            if other_mask != base_digits {
                continue;
            }

            let conjugate_size = current.len() as usize - 1;
            for combination in base_digits.into_iter().combinations(conjugate_size) {
                let mut combination_mask = Set::NONE;
                let mut combination_map = Set::NONE;
                let mut has_value = false;
                for &digit in &combination {
                    if ctx.maps.values[digit].overlaps(house.cells()) {
                        has_value = true;
                        break;
                    }
                    combination_mask |= digit;
                    combination_map |= ctx.maps.candidates[digit] & house.cells();
                }
                if has_value {
                    // the house already contains one of the digits as a
                    // value, not a normal pattern
                    continue;
                }
                if combination_map != current {
                    // other cells of the house hold these digits too, the
                    // conjugate region cannot form
                    continue;
                }

                let final_digit = match base_digits.without(combination_mask).first() {
                    Some(digit) => digit,
                    None => continue,
                };
                let elim_map = combination_map & ctx.maps.candidates[final_digit];
                if elim_map.is_empty() {
                    continue;
                }

                let mut view = View::default();
                view.regions.push((0, house));
                view.candidates_in(1, ctx.grid, current, combination_mask);
                view.candidates_in(0, ctx.grid, other_cells, base_digits);
                steps.push(Step {
                    technique: Technique::BdpType4,
                    conclusions: elim_map
                        .into_iter()
                        .map(|cell| Conclusion::eliminate(cell, final_digit))
                        .collect(),
                    view,
                    detail: StepDetail::DeadlyPattern {
                        map: pattern.map,
                        digits: base_digits,
                    },
                });
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn pattern_table_shape() {
        assert_eq!(PATTERNS.len(), 14_580);
        let heptagons = PATTERNS.iter().filter(|p| p.heptagon).count();
        assert_eq!(heptagons, 11_664);

        for pattern in PATTERNS.iter() {
            let expected = match pattern.heptagon {
                true => 7,
                false => 8,
            };
            assert_eq!(pattern.map.len(), expected);
            assert_eq!(pattern.pair1.len(), 2);
            assert_eq!(pattern.pair2.len(), 2);
            // pairs sit in their own blocks, the center in a third
            assert!(pattern.map.regions().len() >= 6);
        }
    }

    #[test]
    fn pattern_pairs_align_with_center() {
        let pattern = PATTERNS
            .iter()
            .find(|pattern| !pattern.heptagon)
            .unwrap();
        // the band pair shares both rows with the center quad
        let center_rows = pattern.center.rows();
        assert!(center_rows.contains(pattern.pair1.rows()));
        let center_cols = pattern.center.cols();
        assert!(center_cols.contains(pattern.pair2.cols()));
    }
}
