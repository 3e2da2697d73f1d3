mod common;

use common::ExhaustiveOracle;
use sudoku_engine::{
    CancellationToken, Cell, CellStatus, ConclusionKind, Digit, FamilySet, Grid, ManualSolver,
    Oracle, OracleOutcome, Searcher, SolveError, SolveOutcome, SolverConfig, Technique,
    TechniqueFamily,
};

const EASY_PUZZLE: &str =
    "..3.2.6..9..3.5..1..18.64....81.29..7.......8..67.82....26.95..8..2.3..9..5.1.3..";
const EASY_SOLUTION: &str =
    "483921657967345821251876493548132976729564138136798245372689514814253769695417382";

fn read_grids(lines: &str) -> Vec<Grid> {
    lines
        .lines()
        .map(|line| Grid::from_str_line(line).unwrap_or_else(|err| panic!("{:?}", err)))
        .collect()
}

fn solution_grid() -> Grid {
    Grid::from_str_line(EASY_SOLUTION).unwrap()
}

///////////////////////////////////////////////////////////////////////////////////////////////
//                                  formats
///////////////////////////////////////////////////////////////////////////////////////////////

#[test]
fn roundtrip_all_formats() {
    let grids = read_grids(
        "\
..3.2.6..9..3.5..1..18.64....81.29..7.......8..67.82....26.95..8..2.3..9..5.1.3..
...2...633....54.1..1..398........9....538....3........263..5..5.37....847...1...
2..9..1...6...7..4...3...3.........5..16.94....9.53.8.6....23....1.......7...9...",
    );

    for mut grid in grids {
        // exercise the status and suffix paths as well
        grid.set(Cell::new(40), Digit::new(6), CellStatus::Modifiable);
        grid.eliminate(Cell::new(41), Digit::new(4));

        assert_eq!(Grid::from_str_line(&grid.to_str_line()).unwrap(), grid);
        assert_eq!(Grid::from_str_block(&grid.to_str_block()).unwrap(), grid);

        let sukaku = grid.to_str_sukaku();
        let reparsed = Grid::from_str_sukaku(&sukaku).unwrap();
        assert_eq!(reparsed.to_str_sukaku(), sukaku);
    }
}

#[test]
fn malformed_input_is_rejected() {
    assert!(Grid::from_str_line("not a sudoku").is_err());
    assert!(Grid::from_str_block("1\n2\n3").is_err());
    assert!(Grid::from_str_sukaku("123").is_err());
}

///////////////////////////////////////////////////////////////////////////////////////////////
//                                  end to end
///////////////////////////////////////////////////////////////////////////////////////////////

#[test]
fn basic_techniques_solve_an_easy_puzzle() {
    let grid = Grid::from_str_line(EASY_PUZZLE).unwrap();
    let config = SolverConfig {
        enabled_families: [
            TechniqueFamily::Singles,
            TechniqueFamily::Subsets,
            TechniqueFamily::Fish,
        ]
        .iter()
        .copied()
        .collect(),
        ..SolverConfig::default()
    };

    let result = ManualSolver::with_config(config)
        .solve(grid, &ExhaustiveOracle)
        .unwrap();

    assert_eq!(result.outcome, SolveOutcome::Solved);
    assert!(result.grid.is_solved());
    assert_eq!(result.grid.to_str_sukaku(), solution_grid().to_str_sukaku());
    assert!(!result.steps.is_empty());
    assert!(result.difficulty_total() > 0.0);
}

#[test]
fn invalid_puzzle_is_reported_not_crashed() {
    // two 5s in the first row
    let line = "55...............................................................................";
    let grid = Grid::from_str_line(line).unwrap();
    let result = ManualSolver::new().solve(grid, &ExhaustiveOracle);
    assert!(matches!(result, Err(SolveError::InvalidPuzzle(_))));
}

#[test]
fn empty_grid_has_multiple_solutions() {
    let grid = Grid::empty();
    let result = ManualSolver::new().solve(grid, &ExhaustiveOracle);
    assert!(matches!(result, Err(SolveError::InvalidPuzzle(_))));
}

#[test]
fn solving_traces_are_deterministic() {
    let grid = Grid::from_str_line(EASY_PUZZLE).unwrap();
    let solver = ManualSolver::new();

    let first = solver.solve(grid, &ExhaustiveOracle).unwrap();
    let second = solver.solve(grid, &ExhaustiveOracle).unwrap();

    assert_eq!(first.outcome, second.outcome);
    assert_eq!(first.steps.len(), second.steps.len());
    for (a, b) in first.steps.iter().zip(&second.steps) {
        assert_eq!(a.technique, b.technique);
        assert_eq!(a.conclusions, b.conclusions);
    }
}

#[test]
fn strict_difficulty_mode_solves_too() {
    let grid = Grid::from_str_line(EASY_PUZZLE).unwrap();
    let config = SolverConfig {
        strict_difficulty: true,
        ..SolverConfig::default()
    };
    let result = ManualSolver::with_config(config)
        .solve(grid, &ExhaustiveOracle)
        .unwrap();
    assert_eq!(result.outcome, SolveOutcome::Solved);
    assert_eq!(result.grid.to_str_sukaku(), solution_grid().to_str_sukaku());
}

#[test]
fn post_step_validation_passes_on_sound_steps() {
    let grid = Grid::from_str_line(EASY_PUZZLE).unwrap();
    let config = SolverConfig {
        check_conclusion_validity: true,
        ..SolverConfig::default()
    };
    let result = ManualSolver::with_config(config)
        .solve(grid, &ExhaustiveOracle)
        .unwrap();
    assert_eq!(result.outcome, SolveOutcome::Solved);
}

#[test]
fn cancellation_returns_partial_trace() {
    let grid = Grid::from_str_line(EASY_PUZZLE).unwrap();
    let token = CancellationToken::new();
    token.cancel();

    let result = ManualSolver::new()
        .solve_with_cancellation(grid, &ExhaustiveOracle, &token)
        .unwrap();
    assert_eq!(result.outcome, SolveOutcome::Cancelled);
    assert!(result.steps.is_empty());
    assert!(!result.grid.is_solved());
}

///////////////////////////////////////////////////////////////////////////////////////////////
//                                  oracle-backed techniques
///////////////////////////////////////////////////////////////////////////////////////////////

#[test]
fn template_set_matches_the_solution() {
    let grid = Grid::from_str_line(EASY_PUZZLE).unwrap();
    let solution = solution_grid();
    let config = SolverConfig::default();

    let steps = Searcher::Template
        .find_all(&grid, &ExhaustiveOracle, &config)
        .unwrap();
    assert!(!steps.is_empty());

    for step in steps {
        match step.technique {
            Technique::TemplateSet => {
                for conclusion in &step.conclusions {
                    assert_eq!(conclusion.kind, ConclusionKind::Assignment);
                    assert_eq!(
                        solution.value(conclusion.candidate.cell),
                        Some(conclusion.candidate.digit),
                        "template set must assign exactly the solution digits"
                    );
                    assert!(grid.has_candidate(conclusion.candidate.cell, conclusion.candidate.digit));
                }
            }
            Technique::TemplateDelete => {
                for conclusion in &step.conclusions {
                    assert_eq!(conclusion.kind, ConclusionKind::Elimination);
                    assert_ne!(
                        solution.value(conclusion.candidate.cell),
                        Some(conclusion.candidate.digit),
                        "template delete may only drop candidates absent from the solution"
                    );
                }
            }
            other => panic!("unexpected technique {:?}", other),
        }
    }
}

#[test]
fn template_fails_typed_on_invalid_puzzles() {
    let config = SolverConfig::default();
    let result = Searcher::Template.find_all(&Grid::empty(), &ExhaustiveOracle, &config);
    assert!(result.is_err());
}

#[test]
fn bowman_bingo_eliminations_are_sound() {
    let grid = Grid::from_str_line(EASY_PUZZLE).unwrap();
    let solution = solution_grid();
    let config = SolverConfig {
        bowman_chain_length: 8,
        ..SolverConfig::default()
    };

    let steps = Searcher::BowmanBingo
        .find_all(&grid, &ExhaustiveOracle, &config)
        .unwrap();

    for step in steps {
        for conclusion in step.conclusions {
            assert_eq!(conclusion.kind, ConclusionKind::Elimination);
            // the eliminated candidate must not be part of the solution
            assert_ne!(
                solution.value(conclusion.candidate.cell),
                Some(conclusion.candidate.digit),
                "bowman's bingo eliminated a solution digit"
            );
        }
    }
}

#[test]
fn last_resorts_solve_when_enabled() {
    let grid = Grid::from_str_line(EASY_PUZZLE).unwrap();
    let config = SolverConfig {
        enabled_families: FamilySet::NONE.with(TechniqueFamily::LastResort),
        ..SolverConfig::default()
    };
    let result = ManualSolver::with_config(config)
        .solve(grid, &ExhaustiveOracle)
        .unwrap();
    assert_eq!(result.outcome, SolveOutcome::Solved);
    assert_eq!(result.grid.to_str_sukaku(), solution_grid().to_str_sukaku());
}

///////////////////////////////////////////////////////////////////////////////////////////////
//                                  reporting
///////////////////////////////////////////////////////////////////////////////////////////////

#[test]
fn family_summary_accounts_for_every_step() {
    let grid = Grid::from_str_line(EASY_PUZZLE).unwrap();
    let result = ManualSolver::new().solve(grid, &ExhaustiveOracle).unwrap();

    let summary = result.family_summary();
    let counted: usize = summary.iter().map(|(_, count, _)| count).sum();
    assert_eq!(counted, result.steps.len());

    let total: f32 = summary.iter().map(|(_, _, sum)| sum).sum();
    assert!((total - result.difficulty_total()).abs() < 1e-3);
}

#[test]
fn oracle_classifies_solution_counts() {
    let unique = Grid::from_str_line(EASY_PUZZLE).unwrap();
    match ExhaustiveOracle.solve(&unique) {
        OracleOutcome::Unique(solution) => {
            assert_eq!(solution.to_str_sukaku(), solution_grid().to_str_sukaku())
        }
        other => panic!("expected a unique solution, got {:?}", other),
    }

    assert_eq!(ExhaustiveOracle.solve(&Grid::empty()), OracleOutcome::Multiple);

    let conflicting = Grid::from_str_line(
        "55...............................................................................",
    )
    .unwrap();
    assert_eq!(ExhaustiveOracle.solve(&conflicting), OracleOutcome::None);
}
