#![allow(missing_docs)]
//! Cell and house index types plus the process-wide lookup tables
//! derived from the fixed 9x9 topology.

use crate::bitset::Set;
use crate::consts::*;
use lazy_static::lazy_static;

#[inline(always)]
pub(crate) fn row(cell: u8) -> u8 {
    cell / 9
}
#[inline(always)]
pub(crate) fn col(cell: u8) -> u8 {
    cell % 9
}
#[inline(always)]
pub(crate) fn block(cell: u8) -> u8 {
    BLOCK[cell as usize]
}

#[rustfmt::skip]
static BLOCK: [u8; N_CELLS] = [
    0, 0, 0, 1, 1, 1, 2, 2, 2,
    0, 0, 0, 1, 1, 1, 2, 2, 2,
    0, 0, 0, 1, 1, 1, 2, 2, 2,
    3, 3, 3, 4, 4, 4, 5, 5, 5,
    3, 3, 3, 4, 4, 4, 5, 5, 5,
    3, 3, 3, 4, 4, 4, 5, 5, 5,
    6, 6, 6, 7, 7, 7, 8, 8, 8,
    6, 6, 6, 7, 7, 7, 8, 8, 8,
    6, 6, 6, 7, 7, 7, 8, 8, 8,
];

macro_rules! define_types(
    ($( $name:ident : $limit:expr ),* $(,)*) => {
        $(
            #[derive(Copy, Clone, Eq, PartialEq, PartialOrd, Ord, Debug, Hash)]
            pub struct $name(pub(crate) u8);

            impl $name {
                /// Constructs a new instance.
                ///
                /// # Panic
                /// Panics in debug mode, if the index is out of range.
                pub fn new(num: u8) -> Self {
                    debug_assert!(num < $limit);
                    $name(num)
                }

                /// Checked constructor. Out-of-range indices are rejected,
                /// never silently clipped.
                pub fn new_checked(num: u8) -> Option<Self> {
                    if num < $limit {
                        Some($name(num))
                    } else {
                        None
                    }
                }

                pub fn get(self) -> u8 {
                    self.0
                }

                pub fn as_index(self) -> usize {
                    self.0 as _
                }

                pub fn all() -> impl Iterator<Item = Self> {
                    (0..$limit).map(Self::new)
                }
            }
        )*
    };
);

define_types!(
    Cell: 81,
    Row: 9,
    Col: 9,
    Block: 9,
    Line: 18,
    House: 27,
);

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum LineType {
    Row(Row),
    Col(Col),
}

impl Line {
    pub fn categorize(self) -> LineType {
        debug_assert!(self.0 < BLOCK_OFFSET);
        match self.0 < COL_OFFSET {
            true => LineType::Row(Row::new(self.0)),
            false => LineType::Col(Col::new(self.0 - COL_OFFSET)),
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum HouseType {
    Row(Row),
    Col(Col),
    Block(Block),
}

impl House {
    pub fn categorize(self) -> HouseType {
        debug_assert!(self.0 < 27);
        match self.0 {
            0..=8 => HouseType::Row(Row::new(self.0)),
            9..=17 => HouseType::Col(Col::new(self.0 - COL_OFFSET)),
            _ => HouseType::Block(Block::new(self.0 - BLOCK_OFFSET)),
        }
    }

    /// Iterator over all blocks, then all rows, then all columns.
    /// Searchers use this scan order for deterministic step discovery.
    pub fn all_blocks_first() -> impl Iterator<Item = House> {
        (BLOCK_OFFSET..27).chain(0..BLOCK_OFFSET).map(House::new)
    }
}

/// Position of a cell within a line or house (0..9).
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Position<IN>(pub(crate) u8, ::std::marker::PhantomData<IN>);

impl<IN> Position<IN> {
    pub fn new(pos: u8) -> Self {
        Position(pos, ::std::marker::PhantomData)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn as_index(self) -> usize {
        self.0 as _
    }
}

macro_rules! into_cells {
    ( $( $name:ident => |$arg:ident| $code:block );* $(;)* ) => {
        $(
            impl $name {
                pub fn cells(self) -> Set<Cell> {
                    let $arg = self;
                    Set($code)
                }
            }
        )*
    };
}

// the closures here aren't actually closures, they just introduce
// the variables to be used in the code blocks for macro hygiene reasons
into_cells!(
    Cell => |cell| { 1 << cell.0 };
    Row  => |row| { 0o777 << (9 * row.0) };
    Col  => |col| { 0o_001_001_001___001_001_001___001_001_001 << col.0 };
    Block  => |block| {
        let band = block.0 / 3;
        let stack = block.0 % 3;
        0o007_007_007 << (band * 27 + stack * 3)
    };
    Line => |line| {
        use self::LineType::*;
        match line.categorize() {
            Row(row) => row.cells().0,
            Col(col) => col.cells().0,
        }
    };
    House => |house| {
        use self::HouseType::*;
        match house.categorize() {
            Row(row) => row.cells().0,
            Col(col) => col.cells().0,
            Block(block) => block.cells().0,
        }
    };
);

///////////////////////////////////////////////////////////////////////////////////////////////
//                                  Conversions
///////////////////////////////////////////////////////////////////////////////////////////////

macro_rules! impl_from {
    ( $( $from:ty, $to:ty, |$arg:ident| $code:block ),* $(,)* ) => {
        $(
            impl From<$from> for $to {
                fn from($arg: $from) -> $to {
                    let $arg = $arg.0;
                    <$to>::new($code)
                }
            }
        )*
    };
}

impl_from!(
    Row, Line, |r| { r },
    Col, Line, |c| { c + COL_OFFSET },
    Row, House, |r| { r },
    Col, House, |c| { c + COL_OFFSET },
    Line, House, |l| { l },
    Block, House, |b| { b + BLOCK_OFFSET },
    Cell, Row, |c| { row(c) },
    Cell, Col, |c| { col(c) },
    Cell, Block, |c| { block(c) },
);

impl Cell {
    #[inline(always)]
    pub fn row(self) -> Row {
        Row::from(self)
    }

    #[inline(always)]
    pub fn col(self) -> Col {
        Col::from(self)
    }

    #[inline(always)]
    pub fn block(self) -> Block {
        Block::from(self)
    }

    pub fn houses(self) -> [House; 3] {
        [self.row().house(), self.col().house(), self.block().house()]
    }

    /// Position of this cell within the given house.
    pub fn pos_in(self, house: House) -> Position<House> {
        let pos = match house.categorize() {
            HouseType::Row(_) => col(self.0),
            HouseType::Col(_) => row(self.0),
            HouseType::Block(_) => row(self.0) % 3 * 3 + col(self.0) % 3,
        };
        Position::new(pos)
    }

    /// The 20 cells sharing a row, column or block with this cell.
    #[inline(always)]
    pub fn peers(self) -> Set<Cell> {
        PEERS[self.as_index()]
    }

    #[inline(always)]
    pub(crate) fn neighbors(self) -> impl Iterator<Item = Cell> {
        HOUSE_NEIGHBORS_OF_CELL[self.as_index()]
            .iter()
            .cloned()
            .map(Cell::new)
    }
}

impl Row {
    pub fn cell_at(self, pos: Position<Row>) -> Cell {
        Cell::new(self.0 * 9 + pos.0)
    }
}

impl Col {
    pub fn cell_at(self, pos: Position<Col>) -> Cell {
        Cell::new(pos.0 * 9 + self.0)
    }
}

impl Block {
    pub fn cell_at(self, pos: Position<Block>) -> Cell {
        let band = self.0 / 3;
        let stack = self.0 % 3;
        let row = band * 3 + pos.0 / 3;
        let col = stack * 3 + pos.0 % 3;
        Cell::new(row * 9 + col)
    }
}

impl Line {
    pub const ALL_ROWS: Set<Line> = Set(0o000_777);
    pub const ALL_COLS: Set<Line> = Set(0o777_000);

    pub fn cell_at(self, pos: Position<Line>) -> Cell {
        match self.categorize() {
            LineType::Row(row) => row.cell_at(Position::new(pos.0)),
            LineType::Col(col) => col.cell_at(Position::new(pos.0)),
        }
    }
}

impl House {
    pub fn cell_at(self, pos: Position<House>) -> Cell {
        match self.categorize() {
            HouseType::Row(row) => row.cell_at(Position::new(pos.0)),
            HouseType::Col(col) => col.cell_at(Position::new(pos.0)),
            HouseType::Block(block) => block.cell_at(Position::new(pos.0)),
        }
    }
}

impl Set<Position<House>> {
    pub fn as_line_set(self) -> Set<Position<Line>> {
        debug_assert!(self.0 <= Set::<Position<Line>>::ALL.0);
        Set(self.0)
    }
}

pub(crate) trait IntoHouse: Into<House> {
    #[inline(always)]
    fn house(self) -> House {
        self.into()
    }
}

impl<T: Into<House>> IntoHouse for T {}

///////////////////////////////////////////////////////////////////////////////////////////////
//                                  Cell set geometry
///////////////////////////////////////////////////////////////////////////////////////////////

impl Set<Cell> {
    /// The rows containing at least one member, as a set of lines.
    pub fn rows(self) -> Set<Line> {
        let mut rows = Set::NONE;
        for cell in self {
            rows |= Line::from(cell.row());
        }
        rows
    }

    /// The columns containing at least one member, as a set of lines.
    pub fn cols(self) -> Set<Line> {
        let mut cols = Set::NONE;
        for cell in self {
            cols |= Line::from(cell.col());
        }
        cols
    }

    /// All houses that contain at least one member.
    pub fn regions(self) -> Set<House> {
        let mut houses = Set::NONE;
        for cell in self {
            for &house in &cell.houses() {
                houses |= house;
            }
        }
        houses
    }

    /// All houses that contain every member. This is the cover-mask test:
    /// a non-strict subset check against each house's full cell mask.
    pub fn covered_regions(self) -> Set<House> {
        let mut covered = Set::NONE;
        for house in House::all() {
            if house.cells().contains(self) {
                covered |= house;
            }
        }
        covered
    }

    /// The single line containing every member, if one exists.
    /// Rows win over columns for sets of one cell.
    pub fn covered_line(self) -> Option<Line> {
        self.covered_regions()
            .into_iter()
            .find_map(|house| match house.categorize() {
                HouseType::Row(r) => Some(Line::from(r)),
                HouseType::Col(c) => Some(Line::from(c)),
                HouseType::Block(_) => None,
            })
    }

    /// The cells that see every member of this set, folding the members'
    /// peer sets with intersection. Members themselves never qualify.
    /// Short-circuits once the intersection runs empty.
    pub fn peer_intersection(self) -> Set<Cell> {
        let mut peers = Set::ALL;
        for cell in self {
            peers &= cell.peers();
            if peers.is_empty() {
                return peers;
            }
        }
        peers.without(self)
    }
}

lazy_static! {
    // built once on first access, read-only afterwards.
    // lazy_static's guard makes concurrent first use safe.
    static ref PEERS: [Set<Cell>; N_CELLS] = {
        let mut peers = [Set::NONE; N_CELLS];
        for cell in Cell::all() {
            let mut set = Set::NONE;
            for neighbor in cell.neighbors() {
                set |= neighbor;
            }
            peers[cell.as_index()] = set;
        }
        peers
    };
}

// list of cells that share a row, col or block with a given cell
// sorted low to high
#[rustfmt::skip]
static HOUSE_NEIGHBORS_OF_CELL: [[u8; 20]; 81] = [
    [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 18, 19, 20, 27, 36, 45, 54, 63, 72],
    [0, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 18, 19, 20, 28, 37, 46, 55, 64, 73],
    [0, 1, 3, 4, 5, 6, 7, 8, 9, 10, 11, 18, 19, 20, 29, 38, 47, 56, 65, 74],
    [0, 1, 2, 4, 5, 6, 7, 8, 12, 13, 14, 21, 22, 23, 30, 39, 48, 57, 66, 75],
    [0, 1, 2, 3, 5, 6, 7, 8, 12, 13, 14, 21, 22, 23, 31, 40, 49, 58, 67, 76],
    [0, 1, 2, 3, 4, 6, 7, 8, 12, 13, 14, 21, 22, 23, 32, 41, 50, 59, 68, 77],
    [0, 1, 2, 3, 4, 5, 7, 8, 15, 16, 17, 24, 25, 26, 33, 42, 51, 60, 69, 78],
    [0, 1, 2, 3, 4, 5, 6, 8, 15, 16, 17, 24, 25, 26, 34, 43, 52, 61, 70, 79],
    [0, 1, 2, 3, 4, 5, 6, 7, 15, 16, 17, 24, 25, 26, 35, 44, 53, 62, 71, 80],
    [0, 1, 2, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 27, 36, 45, 54, 63, 72],
    [0, 1, 2, 9, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 28, 37, 46, 55, 64, 73],
    [0, 1, 2, 9, 10, 12, 13, 14, 15, 16, 17, 18, 19, 20, 29, 38, 47, 56, 65, 74],
    [3, 4, 5, 9, 10, 11, 13, 14, 15, 16, 17, 21, 22, 23, 30, 39, 48, 57, 66, 75],
    [3, 4, 5, 9, 10, 11, 12, 14, 15, 16, 17, 21, 22, 23, 31, 40, 49, 58, 67, 76],
    [3, 4, 5, 9, 10, 11, 12, 13, 15, 16, 17, 21, 22, 23, 32, 41, 50, 59, 68, 77],
    [6, 7, 8, 9, 10, 11, 12, 13, 14, 16, 17, 24, 25, 26, 33, 42, 51, 60, 69, 78],
    [6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 17, 24, 25, 26, 34, 43, 52, 61, 70, 79],
    [6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 24, 25, 26, 35, 44, 53, 62, 71, 80],
    [0, 1, 2, 9, 10, 11, 19, 20, 21, 22, 23, 24, 25, 26, 27, 36, 45, 54, 63, 72],
    [0, 1, 2, 9, 10, 11, 18, 20, 21, 22, 23, 24, 25, 26, 28, 37, 46, 55, 64, 73],
    [0, 1, 2, 9, 10, 11, 18, 19, 21, 22, 23, 24, 25, 26, 29, 38, 47, 56, 65, 74],
    [3, 4, 5, 12, 13, 14, 18, 19, 20, 22, 23, 24, 25, 26, 30, 39, 48, 57, 66, 75],
    [3, 4, 5, 12, 13, 14, 18, 19, 20, 21, 23, 24, 25, 26, 31, 40, 49, 58, 67, 76],
    [3, 4, 5, 12, 13, 14, 18, 19, 20, 21, 22, 24, 25, 26, 32, 41, 50, 59, 68, 77],
    [6, 7, 8, 15, 16, 17, 18, 19, 20, 21, 22, 23, 25, 26, 33, 42, 51, 60, 69, 78],
    [6, 7, 8, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 26, 34, 43, 52, 61, 70, 79],
    [6, 7, 8, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 35, 44, 53, 62, 71, 80],
    [0, 9, 18, 28, 29, 30, 31, 32, 33, 34, 35, 36, 37, 38, 45, 46, 47, 54, 63, 72],
    [1, 10, 19, 27, 29, 30, 31, 32, 33, 34, 35, 36, 37, 38, 45, 46, 47, 55, 64, 73],
    [2, 11, 20, 27, 28, 30, 31, 32, 33, 34, 35, 36, 37, 38, 45, 46, 47, 56, 65, 74],
    [3, 12, 21, 27, 28, 29, 31, 32, 33, 34, 35, 39, 40, 41, 48, 49, 50, 57, 66, 75],
    [4, 13, 22, 27, 28, 29, 30, 32, 33, 34, 35, 39, 40, 41, 48, 49, 50, 58, 67, 76],
    [5, 14, 23, 27, 28, 29, 30, 31, 33, 34, 35, 39, 40, 41, 48, 49, 50, 59, 68, 77],
    [6, 15, 24, 27, 28, 29, 30, 31, 32, 34, 35, 42, 43, 44, 51, 52, 53, 60, 69, 78],
    [7, 16, 25, 27, 28, 29, 30, 31, 32, 33, 35, 42, 43, 44, 51, 52, 53, 61, 70, 79],
    [8, 17, 26, 27, 28, 29, 30, 31, 32, 33, 34, 42, 43, 44, 51, 52, 53, 62, 71, 80],
    [0, 9, 18, 27, 28, 29, 37, 38, 39, 40, 41, 42, 43, 44, 45, 46, 47, 54, 63, 72],
    [1, 10, 19, 27, 28, 29, 36, 38, 39, 40, 41, 42, 43, 44, 45, 46, 47, 55, 64, 73],
    [2, 11, 20, 27, 28, 29, 36, 37, 39, 40, 41, 42, 43, 44, 45, 46, 47, 56, 65, 74],
    [3, 12, 21, 30, 31, 32, 36, 37, 38, 40, 41, 42, 43, 44, 48, 49, 50, 57, 66, 75],
    [4, 13, 22, 30, 31, 32, 36, 37, 38, 39, 41, 42, 43, 44, 48, 49, 50, 58, 67, 76],
    [5, 14, 23, 30, 31, 32, 36, 37, 38, 39, 40, 42, 43, 44, 48, 49, 50, 59, 68, 77],
    [6, 15, 24, 33, 34, 35, 36, 37, 38, 39, 40, 41, 43, 44, 51, 52, 53, 60, 69, 78],
    [7, 16, 25, 33, 34, 35, 36, 37, 38, 39, 40, 41, 42, 44, 51, 52, 53, 61, 70, 79],
    [8, 17, 26, 33, 34, 35, 36, 37, 38, 39, 40, 41, 42, 43, 51, 52, 53, 62, 71, 80],
    [0, 9, 18, 27, 28, 29, 36, 37, 38, 46, 47, 48, 49, 50, 51, 52, 53, 54, 63, 72],
    [1, 10, 19, 27, 28, 29, 36, 37, 38, 45, 47, 48, 49, 50, 51, 52, 53, 55, 64, 73],
    [2, 11, 20, 27, 28, 29, 36, 37, 38, 45, 46, 48, 49, 50, 51, 52, 53, 56, 65, 74],
    [3, 12, 21, 30, 31, 32, 39, 40, 41, 45, 46, 47, 49, 50, 51, 52, 53, 57, 66, 75],
    [4, 13, 22, 30, 31, 32, 39, 40, 41, 45, 46, 47, 48, 50, 51, 52, 53, 58, 67, 76],
    [5, 14, 23, 30, 31, 32, 39, 40, 41, 45, 46, 47, 48, 49, 51, 52, 53, 59, 68, 77],
    [6, 15, 24, 33, 34, 35, 42, 43, 44, 45, 46, 47, 48, 49, 50, 52, 53, 60, 69, 78],
    [7, 16, 25, 33, 34, 35, 42, 43, 44, 45, 46, 47, 48, 49, 50, 51, 53, 61, 70, 79],
    [8, 17, 26, 33, 34, 35, 42, 43, 44, 45, 46, 47, 48, 49, 50, 51, 52, 62, 71, 80],
    [0, 9, 18, 27, 36, 45, 55, 56, 57, 58, 59, 60, 61, 62, 63, 64, 65, 72, 73, 74],
    [1, 10, 19, 28, 37, 46, 54, 56, 57, 58, 59, 60, 61, 62, 63, 64, 65, 72, 73, 74],
    [2, 11, 20, 29, 38, 47, 54, 55, 57, 58, 59, 60, 61, 62, 63, 64, 65, 72, 73, 74],
    [3, 12, 21, 30, 39, 48, 54, 55, 56, 58, 59, 60, 61, 62, 66, 67, 68, 75, 76, 77],
    [4, 13, 22, 31, 40, 49, 54, 55, 56, 57, 59, 60, 61, 62, 66, 67, 68, 75, 76, 77],
    [5, 14, 23, 32, 41, 50, 54, 55, 56, 57, 58, 60, 61, 62, 66, 67, 68, 75, 76, 77],
    [6, 15, 24, 33, 42, 51, 54, 55, 56, 57, 58, 59, 61, 62, 69, 70, 71, 78, 79, 80],
    [7, 16, 25, 34, 43, 52, 54, 55, 56, 57, 58, 59, 60, 62, 69, 70, 71, 78, 79, 80],
    [8, 17, 26, 35, 44, 53, 54, 55, 56, 57, 58, 59, 60, 61, 69, 70, 71, 78, 79, 80],
    [0, 9, 18, 27, 36, 45, 54, 55, 56, 64, 65, 66, 67, 68, 69, 70, 71, 72, 73, 74],
    [1, 10, 19, 28, 37, 46, 54, 55, 56, 63, 65, 66, 67, 68, 69, 70, 71, 72, 73, 74],
    [2, 11, 20, 29, 38, 47, 54, 55, 56, 63, 64, 66, 67, 68, 69, 70, 71, 72, 73, 74],
    [3, 12, 21, 30, 39, 48, 57, 58, 59, 63, 64, 65, 67, 68, 69, 70, 71, 75, 76, 77],
    [4, 13, 22, 31, 40, 49, 57, 58, 59, 63, 64, 65, 66, 68, 69, 70, 71, 75, 76, 77],
    [5, 14, 23, 32, 41, 50, 57, 58, 59, 63, 64, 65, 66, 67, 69, 70, 71, 75, 76, 77],
    [6, 15, 24, 33, 42, 51, 60, 61, 62, 63, 64, 65, 66, 67, 68, 70, 71, 78, 79, 80],
    [7, 16, 25, 34, 43, 52, 60, 61, 62, 63, 64, 65, 66, 67, 68, 69, 71, 78, 79, 80],
    [8, 17, 26, 35, 44, 53, 60, 61, 62, 63, 64, 65, 66, 67, 68, 69, 70, 78, 79, 80],
    [0, 9, 18, 27, 36, 45, 54, 55, 56, 63, 64, 65, 73, 74, 75, 76, 77, 78, 79, 80],
    [1, 10, 19, 28, 37, 46, 54, 55, 56, 63, 64, 65, 72, 74, 75, 76, 77, 78, 79, 80],
    [2, 11, 20, 29, 38, 47, 54, 55, 56, 63, 64, 65, 72, 73, 75, 76, 77, 78, 79, 80],
    [3, 12, 21, 30, 39, 48, 57, 58, 59, 66, 67, 68, 72, 73, 74, 76, 77, 78, 79, 80],
    [4, 13, 22, 31, 40, 49, 57, 58, 59, 66, 67, 68, 72, 73, 74, 75, 77, 78, 79, 80],
    [5, 14, 23, 32, 41, 50, 57, 58, 59, 66, 67, 68, 72, 73, 74, 75, 76, 78, 79, 80],
    [6, 15, 24, 33, 42, 51, 60, 61, 62, 69, 70, 71, 72, 73, 74, 75, 76, 77, 79, 80],
    [7, 16, 25, 34, 43, 52, 60, 61, 62, 69, 70, 71, 72, 73, 74, 75, 76, 77, 78, 80],
    [8, 17, 26, 35, 44, 53, 60, 61, 62, 69, 70, 71, 72, 73, 74, 75, 76, 77, 78, 79],
];

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn row_cells() {
        for (raw_row, row) in (0..9).map(|r| (r, Row::new(r))) {
            let first_cell = raw_row * 9;

            let iter1 = row.cells().into_iter();
            let iter2 = (first_cell..first_cell + 9).map(Cell::new);
            assert!(iter1.eq(iter2));
        }
    }

    #[test]
    fn col_cells() {
        for (raw_col, col) in (0..9).map(|c| (c, Col::new(c))) {
            let iter1 = col.cells().into_iter();
            let iter2 = (raw_col..81).step_by(9).map(Cell::new);
            assert!(iter1.eq(iter2));
        }
    }

    #[test]
    fn peer_count() {
        for cell in Cell::all() {
            assert_eq!(cell.peers().len(), 20);
            assert!(!cell.peers().contains(cell));
        }
    }

    #[test]
    fn covered_regions() {
        // a full row is covered by exactly that row
        let row = Row::new(3);
        assert_eq!(row.cells().covered_regions(), House::from(row).as_set());

        // a miniline is covered by its line and its block
        let minirow = Cell::new(0).as_set() | Cell::new(1) | Cell::new(2);
        let covered = minirow.covered_regions();
        assert!(covered.contains(House::from(Row::new(0))));
        assert!(covered.contains(House::from(Block::new(0))));
        assert_eq!(covered.len(), 2);
    }

    #[test]
    fn peer_intersection() {
        // two cells in the same row and block see the rest of both houses
        let pair = Cell::new(0).as_set() | Cell::new(1);
        let seen = pair.peer_intersection();
        assert_eq!(seen, Cell::new(0).peers() & Cell::new(1).peers());
        assert!(seen.len() > 9);

        // cells sharing only a row
        let pair = Cell::new(0).as_set() | Cell::new(8);
        assert_eq!(pair.peer_intersection().len(), 7);
    }
}
