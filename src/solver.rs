//! The manual solver: runs the technique searchers in priority order
//! against the grid, applies one step per pass and accumulates the
//! explainable solving trace.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::board::{Grid, GridMaps};
use crate::engine::{SearchContext, Searcher};
use crate::errors::{InvalidStepError, SolveError};
use crate::oracle::Oracle;
use crate::step::{DifficultyLevel, Step, TechniqueFamily};

/// Set of enabled technique families.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FamilySet(u16);

impl FamilySet {
    /// No family enabled.
    pub const NONE: FamilySet = FamilySet(0);

    /// Every family enabled, including the last resorts.
    pub fn all() -> FamilySet {
        TechniqueFamily::ALL.iter().copied().collect()
    }

    /// The default set: everything except the last-resort family.
    pub fn default_set() -> FamilySet {
        Searcher::ALL
            .iter()
            .filter(|searcher| searcher.enabled_by_default())
            .map(|searcher| searcher.family())
            .collect()
    }

    /// Adds a family.
    pub fn with(self, family: TechniqueFamily) -> FamilySet {
        FamilySet(self.0 | 1u16 << family as u16)
    }

    /// Removes a family.
    pub fn without(self, family: TechniqueFamily) -> FamilySet {
        FamilySet(self.0 & !(1u16 << family as u16))
    }

    /// Membership test.
    pub fn contains(self, family: TechniqueFamily) -> bool {
        self.0 & 1u16 << family as u16 != 0
    }
}

impl std::iter::FromIterator<TechniqueFamily> for FamilySet {
    fn from_iter<I: IntoIterator<Item = TechniqueFamily>>(iter: I) -> FamilySet {
        iter.into_iter()
            .fold(FamilySet::NONE, FamilySet::with)
    }
}

/// Configuration surface of the [`ManualSolver`]: a flat object of toggles,
/// no behavior of its own.
#[derive(Clone, Debug)]
pub struct SolverConfig {
    /// Which technique families participate.
    pub enabled_families: FamilySet,
    /// Stop each pass at the first productive searcher instead of running
    /// the full enabled set. Pure performance switch; the selected step is
    /// the same unless `strict_difficulty` is on.
    pub fast_search: bool,
    /// Run every enabled searcher each pass and apply the globally easiest
    /// step instead of the first one found.
    pub strict_difficulty: bool,
    /// Re-validate the grid through the oracle after every applied step and
    /// fail fast when a searcher produced a grid-corrupting step.
    pub check_conclusion_validity: bool,
    /// Trial chain budget of the Bowman's bingo searcher.
    pub bowman_chain_length: u32,
    /// Restrict the template searcher to template deletes.
    pub template_delete_only: bool,
}

impl Default for SolverConfig {
    fn default() -> SolverConfig {
        SolverConfig {
            enabled_families: FamilySet::default_set(),
            fast_search: true,
            strict_difficulty: false,
            check_conclusion_validity: false,
            bowman_chain_length: 32,
            template_delete_only: false,
        }
    }
}

/// Cooperative cancellation signal, polled by the solve loop between
/// searcher passes. Cloning shares the signal.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    /// A fresh, uncancelled token.
    pub fn new() -> CancellationToken {
        CancellationToken::default()
    }

    /// Requests cancellation. The running solve returns its partial trace
    /// after finishing the current pass.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Terminal state of a solve run. A stuck solver is a normal outcome,
/// clearly separated from the error conditions in [`SolveError`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SolveOutcome {
    /// No empty cell remains.
    Solved,
    /// A full pass over the enabled searchers produced no step.
    Stuck,
    /// Cancellation was observed between passes.
    Cancelled,
}

/// The result of a solve run: terminal state, the applied steps in order
/// and the terminal grid.
#[derive(Clone, Debug)]
pub struct SolveResult {
    /// How the run ended.
    pub outcome: SolveOutcome,
    /// Applied steps, in application order.
    pub steps: Vec<Step>,
    /// The grid state the run ended with.
    pub grid: Grid,
}

impl SolveResult {
    /// Sum of the difficulty scores of all applied steps.
    pub fn difficulty_total(&self) -> f32 {
        self.steps.iter().map(Step::difficulty).sum()
    }

    /// Difficulty score of the hardest applied step.
    pub fn difficulty_max(&self) -> f32 {
        self.steps
            .iter()
            .map(Step::difficulty)
            .fold(0.0, f32::max)
    }

    /// Coarse difficulty classification of the run.
    pub fn level(&self) -> DifficultyLevel {
        DifficultyLevel::from_rating(self.difficulty_max())
    }

    /// Step counts and difficulty sums per technique family, for reporting.
    pub fn family_summary(&self) -> Vec<(TechniqueFamily, usize, f32)> {
        TechniqueFamily::ALL
            .iter()
            .filter_map(|&family| {
                let members: Vec<&Step> = self
                    .steps
                    .iter()
                    .filter(|step| step.technique.family() == family)
                    .collect();
                match members.is_empty() {
                    true => None,
                    false => Some((
                        family,
                        members.len(),
                        members.iter().map(|step| step.difficulty()).sum(),
                    )),
                }
            })
            .collect()
    }
}

/// The orchestrator. Holds only configuration; each [`ManualSolver::solve`]
/// call is independent.
#[derive(Clone, Debug, Default)]
pub struct ManualSolver {
    config: SolverConfig,
}

impl ManualSolver {
    /// Solver with the default configuration.
    pub fn new() -> ManualSolver {
        ManualSolver::default()
    }

    /// Solver with an explicit configuration.
    pub fn with_config(config: SolverConfig) -> ManualSolver {
        ManualSolver { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solves the grid as far as the enabled techniques carry.
    ///
    /// The puzzle is validated against the oracle up front; a puzzle
    /// without a unique solution fails with
    /// [`SolveError::InvalidPuzzle`](crate::errors::SolveError).
    pub fn solve(&self, grid: Grid, oracle: &dyn Oracle) -> Result<SolveResult, SolveError> {
        self.solve_with_cancellation(grid, oracle, &CancellationToken::new())
    }

    /// Like [`ManualSolver::solve`], polling the token between passes.
    /// On cancellation the partial trace is returned with the
    /// [`SolveOutcome::Cancelled`] outcome; the grid is never left with a
    /// half-applied step.
    pub fn solve_with_cancellation(
        &self,
        grid: Grid,
        oracle: &dyn Oracle,
        token: &CancellationToken,
    ) -> Result<SolveResult, SolveError> {
        grid.unique_solution(oracle)?;

        let mut grid = grid;
        let mut steps = vec![];
        loop {
            if grid.is_solved() {
                return Ok(SolveResult {
                    outcome: SolveOutcome::Solved,
                    steps,
                    grid,
                });
            }
            if token.is_cancelled() {
                return Ok(SolveResult {
                    outcome: SolveOutcome::Cancelled,
                    steps,
                    grid,
                });
            }

            let maps = GridMaps::new(&grid);
            let ctx = SearchContext {
                grid: &grid,
                maps: &maps,
                oracle,
                config: &self.config,
            };
            let step = match self.next_step(&ctx)? {
                Some(step) => step,
                None => {
                    return Ok(SolveResult {
                        outcome: SolveOutcome::Stuck,
                        steps,
                        grid,
                    })
                }
            };

            // apply on a copy and commit, so an interrupted process can
            // never observe a half-applied step
            let mut next = grid;
            step.apply_to(&mut next);
            if !made_progress(&grid, &next) {
                // a no-op step would loop forever; treat it like a stuck
                // state unless the caller asked for loud failures
                if self.config.check_conclusion_validity {
                    return Err(InvalidStepError {
                        technique: step.technique.name().to_string(),
                    }
                    .into());
                }
                return Ok(SolveResult {
                    outcome: SolveOutcome::Stuck,
                    steps,
                    grid,
                });
            }
            grid = next;

            if self.config.check_conclusion_validity
                && !grid.is_solved()
                && grid.unique_solution(oracle).is_err()
            {
                return Err(InvalidStepError {
                    technique: step.technique.name().to_string(),
                }
                .into());
            }

            steps.push(step);
        }
    }

    /// Runs the enabled searchers in ascending priority order and selects
    /// the pass's step: the first one found, or the globally easiest one
    /// in strict difficulty mode. Both policies are deterministic.
    fn next_step(&self, ctx: &SearchContext<'_>) -> Result<Option<Step>, SolveError> {
        let enabled = Searcher::ALL
            .iter()
            .copied()
            .filter(|searcher| self.config.enabled_families.contains(searcher.family()));

        if self.config.strict_difficulty {
            let mut best: Option<(f32, usize, u32, Step)> = None;
            for searcher in enabled {
                for step in searcher.find_all_in(ctx)? {
                    let key = (
                        step.difficulty(),
                        step.conclusions[0].sort_key(),
                        searcher.priority(),
                    );
                    let replace = match &best {
                        Some((difficulty, conclusion, priority, _)) => {
                            (key.0, key.1, key.2) < (*difficulty, *conclusion, *priority)
                        }
                        None => true,
                    };
                    if replace {
                        best = Some((key.0, key.1, key.2, step));
                    }
                }
            }
            return Ok(best.map(|(_, _, _, step)| step));
        }

        let mut chosen = None;
        for searcher in enabled {
            let mut found = searcher.find_all_in(ctx)?;
            if chosen.is_none() && !found.is_empty() {
                // ties within one searcher keep discovery order
                chosen = Some(found.swap_remove(0));
                if self.config.fast_search {
                    break;
                }
                // without fast search the remaining searchers still run;
                // their results cannot win the pass
            }
        }
        Ok(chosen)
    }
}

fn made_progress(before: &Grid, after: &Grid) -> bool {
    before != after
}
