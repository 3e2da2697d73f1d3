//! The technique searchers and their shared framework.
//!
//! Every searcher is a stateless pattern search over a grid snapshot: it
//! reads the grid and the derived maps, never mutates either, and returns
//! the steps it found in a fixed scan order. Searchers that have to try
//! tentative moves (contradiction search) work on value copies of the grid.
//!
//! There is no searcher hierarchy. The closed set of searchers is one enum
//! behind the single capability `find_all`; the family tag exists purely for
//! priority grouping and configuration.

pub(crate) mod als;
pub(crate) mod bowman;
pub(crate) mod chains;
pub(crate) mod exocet;
pub(crate) mod fish;
pub(crate) mod locked_candidates;
pub(crate) mod oddagon;
pub(crate) mod polygons;
pub(crate) mod singles;
pub(crate) mod subsets;
pub(crate) mod symmetry;
pub(crate) mod template;

use crate::board::{Grid, GridMaps};
use crate::errors::InvalidPuzzleError;
use crate::oracle::Oracle;
use crate::solver::SolverConfig;
use crate::step::{Step, TechniqueFamily};

/// Read-only context one searcher pass operates on.
pub(crate) struct SearchContext<'a> {
    pub grid: &'a Grid,
    pub maps: &'a GridMaps,
    pub oracle: &'a dyn Oracle,
    pub config: &'a SolverConfig,
}

/// The closed set of technique searchers.
///
/// `ALL` lists them in ascending priority, which is the order the
/// orchestrator invokes them in. Ties between steps of one searcher are
/// broken by discovery order, never re-sorted.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Searcher {
    Singles,
    LockedCandidates,
    Subsets,
    BasicFish,
    SinglesChain,
    AlsXz,
    DeadlyPattern,
    BivalueOddagon,
    SeniorExocet,
    SymmetricalPlacement,
    Template,
    BowmanBingo,
}

impl Searcher {
    /// All searchers in ascending priority order.
    pub const ALL: &'static [Searcher] = &[
        Searcher::Singles,
        Searcher::LockedCandidates,
        Searcher::Subsets,
        Searcher::BasicFish,
        Searcher::SinglesChain,
        Searcher::AlsXz,
        Searcher::DeadlyPattern,
        Searcher::BivalueOddagon,
        Searcher::SeniorExocet,
        Searcher::SymmetricalPlacement,
        Searcher::Template,
        Searcher::BowmanBingo,
    ];

    /// Priority key. Lower runs earlier; also the deterministic tie breaker
    /// of the strict selection policy.
    pub fn priority(self) -> u32 {
        match self {
            Searcher::Singles => 10,
            Searcher::LockedCandidates => 26,
            Searcher::Subsets => 30,
            Searcher::BasicFish => 32,
            Searcher::SinglesChain => 44,
            Searcher::AlsXz => 48,
            Searcher::DeadlyPattern => 53,
            Searcher::BivalueOddagon => 54,
            Searcher::SeniorExocet => 60,
            Searcher::SymmetricalPlacement => 62,
            Searcher::Template => 90,
            Searcher::BowmanBingo => 95,
        }
    }

    /// The family this searcher's steps belong to.
    pub fn family(self) -> TechniqueFamily {
        match self {
            Searcher::Singles => TechniqueFamily::Singles,
            Searcher::LockedCandidates | Searcher::Subsets => TechniqueFamily::Subsets,
            Searcher::BasicFish => TechniqueFamily::Fish,
            Searcher::SinglesChain => TechniqueFamily::Chaining,
            Searcher::AlsXz => TechniqueFamily::Als,
            Searcher::DeadlyPattern => TechniqueFamily::Uniqueness,
            Searcher::BivalueOddagon => TechniqueFamily::RankTheory,
            Searcher::SeniorExocet => TechniqueFamily::Exocet,
            Searcher::SymmetricalPlacement => TechniqueFamily::Symmetry,
            Searcher::Template | Searcher::BowmanBingo => TechniqueFamily::LastResort,
        }
    }

    /// Whether the searcher participates when no explicit family
    /// configuration is given. The last resorts sit out by default.
    pub fn enabled_by_default(self) -> bool {
        self.family() != TechniqueFamily::LastResort
    }

    /// Runs the searcher against a grid and returns all steps found, in
    /// discovery order. The grid is never mutated.
    ///
    /// Only the oracle-dependent template searcher can fail, and only with
    /// a typed [`InvalidPuzzleError`]; everything else fails closed by
    /// returning no steps.
    pub fn find_all(
        self,
        grid: &Grid,
        oracle: &dyn Oracle,
        config: &SolverConfig,
    ) -> Result<Vec<Step>, InvalidPuzzleError> {
        let maps = GridMaps::new(grid);
        let ctx = SearchContext {
            grid,
            maps: &maps,
            oracle,
            config,
        };
        self.find_all_in(&ctx)
    }

    pub(crate) fn find_all_in(self, ctx: &SearchContext<'_>) -> Result<Vec<Step>, InvalidPuzzleError> {
        let mut steps = vec![];
        match self {
            Searcher::Singles => singles::find_all(ctx, &mut steps),
            Searcher::LockedCandidates => locked_candidates::find_all(ctx, &mut steps),
            Searcher::Subsets => subsets::find_all(ctx, &mut steps),
            Searcher::BasicFish => fish::find_all(ctx, &mut steps),
            Searcher::SinglesChain => chains::find_all(ctx, &mut steps),
            Searcher::AlsXz => als::find_all(ctx, &mut steps),
            Searcher::DeadlyPattern => polygons::find_all(ctx, &mut steps),
            Searcher::BivalueOddagon => oddagon::find_all(ctx, &mut steps),
            Searcher::SeniorExocet => exocet::find_all(ctx, &mut steps),
            Searcher::SymmetricalPlacement => symmetry::find_all(ctx, &mut steps),
            Searcher::Template => template::find_all(ctx, &mut steps)?,
            Searcher::BowmanBingo => bowman::find_all(ctx, &mut steps),
        }
        Ok(steps)
    }
}
