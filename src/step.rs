//! The step vocabulary: conclusions, presentation views, technique identity
//! and the difficulty model.
//!
//! A [`Step`] is an immutable record of one deduction. It owns an ordered,
//! non-empty list of [`Conclusion`]s, a [`View`] with everything a frontend
//! would highlight, the [`Technique`] that found it and a technique-specific
//! payload. Steps are produced fresh per search pass and handed over to the
//! orchestrator's trace.

use std::fmt;

use crate::bitset::Set;
use crate::board::{
    Candidate, Cell, CellStatus, Digit, Grid, House, Line, Position,
};

/// Whether a conclusion places a digit or removes a candidate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConclusionKind {
    /// Set a digit into a cell.
    Assignment,
    /// Remove a candidate from a cell.
    Elimination,
}

/// An atomic grid change derived by a technique.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Conclusion {
    /// Assignment or elimination.
    pub kind: ConclusionKind,
    /// The affected candidate.
    pub candidate: Candidate,
}

impl Conclusion {
    /// Assignment conclusion for `cell` and `digit`.
    pub fn assign(cell: Cell, digit: Digit) -> Conclusion {
        Conclusion {
            kind: ConclusionKind::Assignment,
            candidate: Candidate { cell, digit },
        }
    }

    /// Elimination conclusion for `cell` and `digit`.
    pub fn eliminate(cell: Cell, digit: Digit) -> Conclusion {
        Conclusion {
            kind: ConclusionKind::Elimination,
            candidate: Candidate { cell, digit },
        }
    }

    /// Canonical sort key: `cell * 9 + digit_index`.
    pub fn sort_key(&self) -> usize {
        self.candidate.as_index()
    }

    /// Puts this conclusion into the grid.
    pub fn apply_to(&self, grid: &mut Grid) {
        match self.kind {
            ConclusionKind::Assignment => {
                grid.set(self.candidate.cell, self.candidate.digit, CellStatus::Modifiable)
            }
            ConclusionKind::Elimination => grid.eliminate(self.candidate.cell, self.candidate.digit),
        }
    }
}

impl PartialOrd for Conclusion {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Conclusion {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.sort_key()
            .cmp(&other.sort_key())
            .then(self.kind.cmp(&other.kind))
    }
}

impl fmt::Display for Conclusion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let op = match self.kind {
            ConclusionKind::Assignment => "=",
            ConclusionKind::Elimination => "<>",
        };
        write!(
            f,
            "r{}c{} {} {}",
            self.candidate.row().get() + 1,
            self.candidate.col().get() + 1,
            op,
            self.candidate.digit.get()
        )
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////
//                                  View
///////////////////////////////////////////////////////////////////////////////////////////////

/// Color tag for highlighted offsets. `0` is the primary pattern color,
/// higher tags distinguish auxiliary roles (extra digits, fins, targets).
pub type ColorTag = u8;

/// A directed link between two candidates, used by chain techniques.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Link {
    /// Chain start candidate.
    pub from: Candidate,
    /// Chain end candidate.
    pub to: Candidate,
}

/// Presentation payload of a step: which cells, candidates and houses a
/// frontend should highlight and which chain links to draw. The engine
/// populates this, it never renders it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct View {
    /// Highlighted cells.
    pub cells: Vec<(ColorTag, Cell)>,
    /// Highlighted candidates.
    pub candidates: Vec<(ColorTag, Candidate)>,
    /// Highlighted houses.
    pub regions: Vec<(ColorTag, House)>,
    /// Chain links.
    pub links: Vec<Link>,
}

impl View {
    /// Highlights every open candidate of `digits` within `cells`.
    pub(crate) fn candidates_in(
        &mut self,
        tag: ColorTag,
        grid: &Grid,
        cells: Set<Cell>,
        digits: Set<Digit>,
    ) {
        for cell in cells {
            for digit in grid.candidates(cell) & digits {
                self.candidates.push((tag, Candidate { cell, digit }));
            }
        }
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////
//                                  Technique identity
///////////////////////////////////////////////////////////////////////////////////////////////

/// Family grouping of techniques. Families exist purely for priority
/// grouping and enable/disable configuration; there is no behavioral
/// coupling between members.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum TechniqueFamily {
    Singles,
    Subsets,
    Fish,
    Uniqueness,
    Chaining,
    Als,
    Exocet,
    RankTheory,
    Symmetry,
    LastResort,
}

impl TechniqueFamily {
    /// All families, in default priority order.
    pub const ALL: &'static [TechniqueFamily] = &[
        TechniqueFamily::Singles,
        TechniqueFamily::Subsets,
        TechniqueFamily::Fish,
        TechniqueFamily::Uniqueness,
        TechniqueFamily::Chaining,
        TechniqueFamily::Als,
        TechniqueFamily::Exocet,
        TechniqueFamily::RankTheory,
        TechniqueFamily::Symmetry,
        TechniqueFamily::LastResort,
    ];
}

macro_rules! techniques {
    ( $( $variant:ident => $name:expr, $family:ident, $rating:expr );* $(;)* ) => {
        /// Identity of a solving technique.
        #[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[allow(missing_docs)]
        pub enum Technique {
            $( $variant, )*
        }

        impl Technique {
            /// All techniques in declaration order.
            pub const ALL: &'static [Technique] = &[
                $( Technique::$variant, )*
            ];

            /// Human readable display name.
            pub fn name(self) -> &'static str {
                match self {
                    $( Technique::$variant => $name, )*
                }
            }

            /// The family this technique belongs to.
            pub fn family(self) -> TechniqueFamily {
                match self {
                    $( Technique::$variant => TechniqueFamily::$family, )*
                }
            }

            /// Difficulty rating of one application of this technique.
            pub fn rating(self) -> f32 {
                match self {
                    $( Technique::$variant => $rating, )*
                }
            }
        }
    };
}

techniques!(
    FullHouse => "Full House", Singles, 1.0;
    HiddenSingleBlock => "Hidden Single (Block)", Singles, 1.2;
    HiddenSingleRow => "Hidden Single (Row)", Singles, 1.5;
    HiddenSingleCol => "Hidden Single (Column)", Singles, 1.5;
    NakedSingle => "Naked Single", Singles, 2.3;

    Pointing => "Pointing", Subsets, 2.6;
    Claiming => "Claiming", Subsets, 2.8;
    LockedPair => "Locked Pair", Subsets, 2.0;
    LockedTriple => "Locked Triple", Subsets, 2.5;
    NakedPair => "Naked Pair", Subsets, 3.0;
    NakedPairPlus => "Naked Pair (+)", Subsets, 3.1;
    HiddenPair => "Hidden Pair", Subsets, 3.4;
    NakedTriple => "Naked Triple", Subsets, 3.6;
    NakedTriplePlus => "Naked Triple (+)", Subsets, 3.7;
    HiddenTriple => "Hidden Triple", Subsets, 4.0;
    NakedQuad => "Naked Quad", Subsets, 5.0;
    NakedQuadPlus => "Naked Quad (+)", Subsets, 5.1;
    HiddenQuad => "Hidden Quad", Subsets, 5.4;

    XWing => "X-Wing", Fish, 3.2;
    Swordfish => "Swordfish", Fish, 3.8;
    Jellyfish => "Jellyfish", Fish, 5.2;

    BdpType1 => "Borescoper's Deadly Pattern Type 1", Uniqueness, 5.3;
    BdpType2 => "Borescoper's Deadly Pattern Type 2", Uniqueness, 5.5;
    BdpType3 => "Borescoper's Deadly Pattern Type 3", Uniqueness, 5.8;
    BdpType4 => "Borescoper's Deadly Pattern Type 4", Uniqueness, 5.7;

    SinglesChain => "Singles Chain", Chaining, 4.8;

    AlsXz => "Almost Locked Sets XZ-Rule", Als, 5.5;

    SeniorExocet => "Senior Exocet", Exocet, 9.6;

    BivalueOddagonType1 => "Bivalue Oddagon Type 1", RankTheory, 6.3;
    BivalueOddagonType2 => "Bivalue Oddagon Type 2", RankTheory, 6.4;
    BivalueOddagonType3 => "Bivalue Oddagon Type 3", RankTheory, 6.5;
    BivalueOddagonType4 => "Bivalue Oddagon Type 4", RankTheory, 6.6;

    SymmetricalPlacement => "Gurth's Symmetrical Placement", Symmetry, 7.0;

    TemplateSet => "Template Set", LastResort, 9.0;
    TemplateDelete => "Template Delete", LastResort, 9.0;
    BowmanBingo => "Bowman's Bingo", LastResort, 8.0;
);

impl fmt::Display for Technique {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////
//                                  Difficulty levels
///////////////////////////////////////////////////////////////////////////////////////////////

/// Coarse ordinal difficulty classification, derived from the numeric score
/// of the hardest step used.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum DifficultyLevel {
    Easy,
    Moderate,
    Hard,
    Fiendish,
    Nightmare,
}

impl DifficultyLevel {
    /// Classifies a difficulty score.
    pub fn from_rating(rating: f32) -> DifficultyLevel {
        match rating {
            r if r < 2.5 => DifficultyLevel::Easy,
            r if r < 4.0 => DifficultyLevel::Moderate,
            r if r < 5.5 => DifficultyLevel::Hard,
            r if r < 7.0 => DifficultyLevel::Fiendish,
            _ => DifficultyLevel::Nightmare,
        }
    }
}

impl fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            DifficultyLevel::Easy => "Easy",
            DifficultyLevel::Moderate => "Moderate",
            DifficultyLevel::Hard => "Hard",
            DifficultyLevel::Fiendish => "Fiendish",
            DifficultyLevel::Nightmare => "Nightmare",
        };
        f.write_str(name)
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////
//                                  Step
///////////////////////////////////////////////////////////////////////////////////////////////

/// Technique-specific payload of a step.
#[derive(Clone, Debug, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum StepDetail {
    /// A single placement in a cell.
    Single { candidate: Candidate, house: Option<House> },
    /// A digit locked into a block/line intersection.
    LockedCandidates { digit: Digit, intersection: Set<Cell> },
    /// Naked or hidden subset.
    Subset {
        house: House,
        cells: Set<Cell>,
        digits: Set<Digit>,
        /// `Some(true)`: all subset digits locked into the box/line
        /// intersection, `Some(false)`: some are, `None`: none are.
        /// Only computed for naked subsets.
        locked: Option<bool>,
    },
    /// Basic fish with its base and cover line sets.
    Fish {
        digit: Digit,
        base: Set<Line>,
        cover: Set<Line>,
        positions: Set<Position<Line>>,
    },
    /// Deadly pattern over `map` with the non-extra digit mask.
    DeadlyPattern { map: Set<Cell>, digits: Set<Digit> },
    /// Bi-value oddagon loop.
    Oddagon { loop_cells: Set<Cell>, digits: Set<Digit> },
    /// Coloring chain on one digit.
    Coloring { digit: Digit },
    /// ALS pair joined by a restricted common candidate.
    AlsPair {
        als1_cells: Set<Cell>,
        als1_digits: Set<Digit>,
        als2_cells: Set<Cell>,
        als2_digits: Set<Digit>,
        restricted_common: Digit,
    },
    /// Senior exocet geometry.
    Exocet {
        base: Set<Cell>,
        targets: Set<Cell>,
        cross_line: Set<Cell>,
        endo_target: Option<Cell>,
        digits: Set<Digit>,
    },
    /// Digit involution of a symmetrical placement.
    Symmetry { mapping: [Digit; 9] },
    /// Template assignment/elimination for one digit.
    Template { digit: Digit },
    /// The trial series that led to a contradiction.
    Contradiction { series: Vec<Conclusion> },
}

/// One deduction: conclusions, presentation view, technique identity and
/// technique payload. Immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct Step {
    /// The technique that found this step.
    pub technique: Technique,
    /// Non-empty ordered list of grid changes.
    pub conclusions: Vec<Conclusion>,
    /// Presentation payload.
    pub view: View,
    /// Technique-specific fields.
    pub detail: StepDetail,
}

impl Step {
    /// Difficulty score of this step.
    pub fn difficulty(&self) -> f32 {
        self.technique.rating()
    }

    /// Short display label: technique name plus the identifying conclusions.
    pub fn label(&self) -> String {
        let conclusions = self
            .conclusions
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}: {}", self.technique, conclusions)
    }

    /// Applies all conclusions to the grid. The caller guarantees the grid
    /// is the one the step was found on; application itself cannot fail.
    pub fn apply_to(&self, grid: &mut Grid) {
        for conclusion in &self.conclusions {
            conclusion.apply_to(grid);
        }
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(feature = "serde")]
mod serde_impls {
    use super::*;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for Grid {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&self.to_str_line())
        }
    }

    impl<'de> Deserialize<'de> for Grid {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let line = <&str>::deserialize(deserializer)?;
            Grid::from_str_line(line).map_err(D::Error::custom)
        }
    }

    impl Serialize for Conclusion {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&self.to_string())
        }
    }

    impl Serialize for Technique {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(self.name())
        }
    }

    impl Serialize for DifficultyLevel {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&self.to_string())
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn conclusion_ordering() {
        let a = Conclusion::eliminate(Cell::new(0), Digit::new(2));
        let b = Conclusion::eliminate(Cell::new(0), Digit::new(5));
        let c = Conclusion::assign(Cell::new(1), Digit::new(1));
        let mut conclusions = vec![c, b, a];
        conclusions.sort();
        assert_eq!(conclusions, vec![a, b, c]);
        assert_eq!(c.sort_key(), 9);
    }

    #[test]
    fn conclusion_display() {
        assert_eq!(
            Conclusion::assign(Cell::new(10), Digit::new(3)).to_string(),
            "r2c2 = 3"
        );
        assert_eq!(
            Conclusion::eliminate(Cell::new(80), Digit::new(9)).to_string(),
            "r9c9 <> 9"
        );
    }

    #[test]
    fn level_thresholds() {
        assert_eq!(DifficultyLevel::from_rating(1.0), DifficultyLevel::Easy);
        assert_eq!(DifficultyLevel::from_rating(3.0), DifficultyLevel::Moderate);
        assert_eq!(DifficultyLevel::from_rating(5.2), DifficultyLevel::Hard);
        assert_eq!(DifficultyLevel::from_rating(6.3), DifficultyLevel::Fiendish);
        assert_eq!(DifficultyLevel::from_rating(9.6), DifficultyLevel::Nightmare);
    }

    #[test]
    fn technique_families_cover_all() {
        for &technique in Technique::ALL {
            assert!(TechniqueFamily::ALL.contains(&technique.family()));
            assert!(technique.rating() > 0.0);
        }
    }
}
