//! Textual grid formats.
//!
//! Three formats are supported, all round-tripping bit-exactly:
//!
//! * **single line**: 81 cells left to right, top to bottom. `1`-`9` are
//!   values, `.`, `0` and `_` placeholders for empty cells, a `+` prefix
//!   marks a value as modifiable (entered during solving, not given).
//!   An optional suffix `:` lists candidates that were eliminated from the
//!   pencilmark closure, as space-separated `rcd` triples (row, column and
//!   digit, all 1-based):
//!   `.....+4..:115 278`
//! * **block**: 9 rows of cells with `|` stack separators and
//!   `---+---+---` band separators. Output is the pencilmark form: givens
//!   as `<5>`, modifiable values as `*5`, empty cells as their candidate
//!   list (`.` when none remain). Input additionally accepts the plain
//!   value form with single-character cells.
//! * **sukaku**: 729 candidate positions, 9 per cell; position `p` of a
//!   group holds the digit `p+1` when that candidate is open (or the cell
//!   is solved to it), a placeholder otherwise. Sukaku carries no cell
//!   statuses; parsing yields a grid of empty cells.

use std::fmt;

use crate::bitset::Set;
use crate::board::cell_state::CellStatus;
use crate::board::positions::{Cell, Position, Row};
use crate::board::{Digit, Grid};
use crate::errors::{
    BlockFormatError, InvalidEntry, LineFormatError, SukakuFormatError,
};

impl Grid {
    /// Rebuilds the grid from its values alone: every empty cell's mask is
    /// the full digit set minus its peers' values. This is the baseline the
    /// single-line candidate suffix is expressed against.
    pub(crate) fn pencilmark_closure(&self) -> Grid {
        let mut closure = Grid::empty();
        for cell in Cell::all() {
            if let Some(digit) = self.value(cell) {
                closure.set(cell, digit, self.status(cell));
            }
        }
        closure
    }

    ///////////////////////////////////////////////////////////////////////
    //                          single line
    ///////////////////////////////////////////////////////////////////////

    /// Parses the single-line format.
    pub fn from_str_line(s: &str) -> Result<Grid, LineFormatError> {
        let mut grid = Grid::empty();
        let mut cell: u8 = 0;
        let mut modifiable = false;
        let mut chars = s.chars();

        loop {
            let ch = match chars.next() {
                Some(ch) => ch,
                None if cell == 81 => return Ok(grid),
                None => return Err(LineFormatError::NotEnoughCells(cell)),
            };
            if cell == 81 {
                match ch {
                    ':' => return parse_line_suffix(grid, chars),
                    ch if ch.is_whitespace() => {
                        // a comment may follow, but only after a delimiter
                        let rest = chars.as_str().trim_start();
                        return match rest.strip_prefix(':') {
                            Some(suffix) => parse_line_suffix(grid, suffix.chars()),
                            None => Ok(grid),
                        };
                    }
                    _ => return Err(LineFormatError::TooManyCells),
                }
            }
            match ch {
                '+' if !modifiable => modifiable = true,
                '1'..='9' => {
                    let digit = Digit::new(ch as u8 - b'0');
                    let status = match modifiable {
                        true => CellStatus::Modifiable,
                        false => CellStatus::Given,
                    };
                    grid.set(Cell::new(cell), digit, status);
                    modifiable = false;
                    cell += 1;
                }
                '.' | '0' | '_' if !modifiable => cell += 1,
                _ => return Err(LineFormatError::InvalidEntry(InvalidEntry { cell, ch })),
            }
        }
    }

    /// Serializes to the single-line format. Modifiable values carry a `+`
    /// prefix; candidates eliminated beyond the pencilmark closure are
    /// appended as a `:rcd` suffix.
    pub fn to_str_line(&self) -> String {
        let mut line = String::with_capacity(81);
        for cell in Cell::all() {
            match self.value(cell) {
                Some(digit) => {
                    if self.status(cell) == CellStatus::Modifiable {
                        line.push('+');
                    }
                    line.push((b'0' + digit.get()) as char);
                }
                None => line.push('.'),
            }
        }

        let closure = self.pencilmark_closure();
        let mut suffix = String::new();
        for cell in Cell::all() {
            if self.status(cell) != CellStatus::Empty {
                continue;
            }
            let eliminated = closure.candidates(cell).without(self.candidates(cell));
            for digit in eliminated {
                suffix.push(' ');
                suffix.push((b'1' + cell.row().get()) as char);
                suffix.push((b'1' + cell.col().get()) as char);
                suffix.push((b'0' + digit.get()) as char);
            }
        }
        if !suffix.is_empty() {
            line.push(':');
            line.push_str(&suffix[1..]);
        }
        line
    }

    ///////////////////////////////////////////////////////////////////////
    //                          block format
    ///////////////////////////////////////////////////////////////////////

    /// Parses the block format, either the plain value form or the
    /// pencilmark form produced by [`Grid::to_str_block`].
    pub fn from_str_block(s: &str) -> Result<Grid, BlockFormatError> {
        let content_rows: Vec<&str> = s
            .lines()
            .filter(|line| {
                line.chars()
                    .any(|ch| matches!(ch, '0'..='9' | '.' | '_' | '<' | '*'))
            })
            .collect();
        if content_rows.len() < 9 {
            return Err(BlockFormatError::NotEnoughRows(content_rows.len() as u8));
        }

        let mut grid = Grid::empty();
        let mut explicit_masks: Vec<(Cell, Set<Digit>)> = vec![];

        for (row_nr, line) in content_rows.iter().take(9).enumerate() {
            let stripped = line.replace('|', " ");
            let tokens: Vec<&str> = stripped.split_whitespace().collect();
            if tokens.len() == 9 {
                // pencilmark form, one token per cell
                for (col_nr, token) in tokens.iter().enumerate() {
                    let cell = Cell::new(row_nr as u8 * 9 + col_nr as u8);
                    parse_block_token(&mut grid, &mut explicit_masks, cell, token)?;
                }
            } else {
                // plain value form, one char per cell;
                // anything after the 9th cell and a space is a comment
                let mut col_nr = 0;
                let mut modifiable = false;
                for ch in line.chars().filter(|&ch| ch != '|') {
                    if ch.is_whitespace() {
                        if col_nr == 9 {
                            break;
                        }
                        if col_nr == 0 && !modifiable {
                            continue;
                        }
                        return Err(BlockFormatError::InvalidLineLength(row_nr as u8));
                    }
                    if col_nr == 9 {
                        return Err(BlockFormatError::InvalidLineLength(row_nr as u8));
                    }
                    let cell = Cell::new(row_nr as u8 * 9 + col_nr);
                    match ch {
                        '+' if !modifiable => {
                            modifiable = true;
                            continue;
                        }
                        '1'..='9' => {
                            let status = match modifiable {
                                true => CellStatus::Modifiable,
                                false => CellStatus::Given,
                            };
                            grid.set(cell, Digit::new(ch as u8 - b'0'), status);
                        }
                        '.' | '0' | '_' if !modifiable => {}
                        _ => {
                            return Err(BlockFormatError::InvalidEntry(InvalidEntry {
                                cell: cell.get(),
                                ch,
                            }))
                        }
                    }
                    modifiable = false;
                    col_nr += 1;
                }
                if col_nr != 9 {
                    return Err(BlockFormatError::InvalidLineLength(row_nr as u8));
                }
            }
        }

        // explicit candidate masks override the closure computed by `set`
        for (cell, mask) in explicit_masks {
            grid.set_candidates(cell, mask);
        }
        Ok(grid)
    }

    /// Serializes to the pencilmark block format.
    pub fn to_str_block(&self) -> String {
        let token = |cell: Cell| match self.status(cell) {
            CellStatus::Given => format!("<{}>", self.value(cell).unwrap().get()),
            CellStatus::Modifiable => format!("*{}", self.value(cell).unwrap().get()),
            CellStatus::Empty => {
                let candidates = self.candidates(cell);
                if candidates.is_empty() {
                    ".".to_string()
                } else {
                    candidates.into_iter().map(|d| d.get().to_string()).collect()
                }
            }
        };

        let mut column_widths = [0usize; 9];
        let tokens: Vec<String> = Cell::all().map(token).collect();
        for col in 0..9 {
            column_widths[col] = (0..9)
                .map(|row| tokens[row * 9 + col].len())
                .max()
                .unwrap();
        }
        let stack_width = |stack: usize| {
            column_widths[stack * 3..stack * 3 + 3].iter().sum::<usize>() + 3
        };

        let mut out = String::new();
        for row in 0..9 {
            if row == 3 || row == 6 {
                for stack in 0..3 {
                    if stack > 0 {
                        out.push('+');
                    }
                    out.push_str(&"-".repeat(stack_width(stack) + 1));
                }
                out.push('\n');
            }
            for col in 0..9 {
                if col == 3 || col == 6 {
                    out.push_str("| ");
                }
                let token = &tokens[row * 9 + col];
                out.push_str(token);
                out.push_str(&" ".repeat(column_widths[col] - token.len() + 1));
            }
            // no trailing spaces
            while out.ends_with(' ') {
                out.pop();
            }
            out.push('\n');
        }
        out.pop();
        out
    }

    ///////////////////////////////////////////////////////////////////////
    //                          sukaku
    ///////////////////////////////////////////////////////////////////////

    /// Parses the sukaku (all-candidates) format. Whitespace is ignored.
    pub fn from_str_sukaku(s: &str) -> Result<Grid, SukakuFormatError> {
        let mut grid = Grid::empty();
        let mut mask = Set::NONE;
        let mut position = 0usize;

        for ch in s.chars().filter(|ch| !ch.is_whitespace()) {
            if position == 729 {
                return Err(SukakuFormatError::WrongLength(position + 1));
            }
            let offset = (position % 9) as u8;
            match ch {
                '1'..='9' if ch as u8 - b'1' == offset => mask |= Digit::new(ch as u8 - b'0'),
                '.' | '0' | '_' => {}
                _ => return Err(SukakuFormatError::InvalidEntry { position, ch }),
            }
            position += 1;
            if position % 9 == 0 {
                grid.set_candidates(Cell::new((position / 9 - 1) as u8), mask);
                mask = Set::NONE;
            }
        }
        if position != 729 {
            return Err(SukakuFormatError::WrongLength(position));
        }
        Ok(grid)
    }

    /// Serializes to the sukaku format. Solved cells show their single digit.
    pub fn to_str_sukaku(&self) -> String {
        let mut out = String::with_capacity(729);
        for cell in Cell::all() {
            let mask = match self.value(cell) {
                Some(digit) => digit.as_set(),
                None => self.candidates(cell),
            };
            for digit in Digit::all() {
                match mask.contains(digit) {
                    true => out.push((b'0' + digit.get()) as char),
                    false => out.push('.'),
                }
            }
        }
        out
    }
}

fn parse_line_suffix(
    mut grid: Grid,
    chars: impl Iterator<Item = char>,
) -> Result<Grid, LineFormatError> {
    let mut triple = [0u8; 3];
    let mut filled = 0;
    for ch in chars {
        match ch {
            ch if ch.is_whitespace() => {
                if filled != 0 && filled != 3 {
                    return Err(LineFormatError::InvalidSuffix(ch));
                }
            }
            '1'..='9' => {
                if filled == 3 {
                    filled = 0;
                }
                triple[filled] = ch as u8 - b'0';
                filled += 1;
                if filled == 3 {
                    eliminate_suffix_triple(&mut grid, triple)?;
                }
            }
            _ => return Err(LineFormatError::InvalidSuffix(ch)),
        }
    }
    match filled {
        0 | 3 => Ok(grid),
        _ => Err(LineFormatError::InvalidSuffix(' ')),
    }
}

fn eliminate_suffix_triple(
    grid: &mut Grid,
    [row, col, digit]: [u8; 3],
) -> Result<(), LineFormatError> {
    let cell = Row::new(row - 1).cell_at(Position::new(col - 1));
    if grid.status(cell) != CellStatus::Empty {
        return Err(LineFormatError::SuffixOnSolvedCell { row, col });
    }
    grid.eliminate(cell, Digit::new(digit));
    Ok(())
}

fn parse_block_token(
    grid: &mut Grid,
    explicit_masks: &mut Vec<(Cell, Set<Digit>)>,
    cell: Cell,
    token: &str,
) -> Result<(), BlockFormatError> {
    let invalid = |ch| {
        BlockFormatError::InvalidEntry(InvalidEntry {
            cell: cell.get(),
            ch,
        })
    };

    let bytes = token.as_bytes();
    match bytes {
        [b'<', digit @ b'1'..=b'9', b'>'] => {
            grid.set(cell, Digit::new(digit - b'0'), CellStatus::Given);
        }
        [b'*', digit @ b'1'..=b'9'] | [b'+', digit @ b'1'..=b'9'] => {
            grid.set(cell, Digit::new(digit - b'0'), CellStatus::Modifiable);
        }
        [b'.'] | [b'_'] | [b'0'] => {
            explicit_masks.push((cell, Set::NONE));
        }
        _ => {
            let mut mask = Set::NONE;
            for &byte in bytes {
                match byte {
                    b'1'..=b'9' => mask |= Digit::new(byte - b'0'),
                    _ => return Err(invalid(byte as char)),
                }
            }
            explicit_masks.push((cell, mask));
        }
    }
    Ok(())
}

impl fmt::Display for Grid {
    /// Plain value block format: `_` placeholders, `|` and `---+---+---`
    /// separators. Use [`Grid::to_str_block`] for the round-tripping
    /// pencilmark form.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..9 {
            if row > 0 {
                writeln!(f)?;
            }
            if row == 3 || row == 6 {
                writeln!(f, "---+---+---")?;
            }
            for col in 0..9 {
                if col == 3 || col == 6 {
                    write!(f, "|")?;
                }
                let cell = Row::new(row).cell_at(Position::new(col));
                match self.value(cell) {
                    Some(digit) => write!(f, "{}", digit.get())?,
                    None => write!(f, "_")?,
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn line_roundtrip_values_only() {
        let line = "...2...633....54.1..1..398........9....538....3........263..5..5.37....847...1...";
        let grid = Grid::from_str_line(line).unwrap();
        assert_eq!(grid.to_str_line(), line);
        assert_eq!(Grid::from_str_line(&grid.to_str_line()).unwrap(), grid);
    }

    #[test]
    fn line_roundtrip_with_modifiables_and_suffix() {
        let line = "...2...633....54.1..1..398........9....538....3........263..5..5.37....847...1...";
        let mut grid = Grid::from_str_line(line).unwrap();
        grid.set(Cell::new(0), Digit::new(1), CellStatus::Modifiable);
        grid.eliminate(Cell::new(1), Digit::new(5));
        grid.eliminate(Cell::new(1), Digit::new(7));

        let serialized = grid.to_str_line();
        assert!(serialized.starts_with("+1"));
        assert!(serialized.contains(':'));
        assert_eq!(Grid::from_str_line(&serialized).unwrap(), grid);
    }

    #[test]
    fn line_rejects_garbage() {
        assert!(matches!(
            Grid::from_str_line("x"),
            Err(LineFormatError::InvalidEntry(InvalidEntry { cell: 0, ch: 'x' }))
        ));
        assert!(matches!(
            Grid::from_str_line("..."),
            Err(LineFormatError::NotEnoughCells(3))
        ));
        let line82 = ".".repeat(82);
        assert_eq!(
            Grid::from_str_line(&line82),
            Err(LineFormatError::TooManyCells)
        );
    }

    #[test]
    fn block_roundtrip() {
        let line = "...2...633....54.1..1..398........9....538....3........263..5..5.37....847...1...";
        let mut grid = Grid::from_str_line(line).unwrap();
        grid.set(Cell::new(4), Digit::new(7), CellStatus::Modifiable);
        grid.eliminate(Cell::new(2), Digit::new(4));

        let block = grid.to_str_block();
        assert_eq!(Grid::from_str_block(&block).unwrap(), grid);
    }

    #[test]
    fn block_parses_plain_value_form() {
        let block = "\
___|2__|_63
3__|__5|4_1
__1|__3|98_
---+---+---
___|___|_9_
___|538|___
_3_|___|___
---+---+---
_26|3__|5__
5_3|7__|__8
47_|__1|___";
        let grid = Grid::from_str_block(block).unwrap();
        let line = "...2...633....54.1..1..398........9....538....3........263..5..5.37....847...1...";
        assert_eq!(grid, Grid::from_str_line(line).unwrap());
    }

    #[test]
    fn block_rejects_short_input() {
        assert!(matches!(
            Grid::from_str_block("1________\n_2_______"),
            Err(BlockFormatError::NotEnoughRows(2))
        ));
    }

    #[test]
    fn sukaku_roundtrip() {
        let line = "...2...633....54.1..1..398........9....538....3........263..5..5.37....847...1...";
        let grid = Grid::from_str_line(line).unwrap();
        let sukaku = grid.to_str_sukaku();
        assert_eq!(sukaku.len(), 729);

        let reparsed = Grid::from_str_sukaku(&sukaku).unwrap();
        // sukaku carries candidates only; contents agree cell by cell
        for cell in Cell::all() {
            let expected = match grid.value(cell) {
                Some(digit) => digit.as_set(),
                None => grid.candidates(cell),
            };
            assert_eq!(reparsed.candidates(cell), expected);
        }
        assert_eq!(reparsed.to_str_sukaku(), sukaku);
    }

    #[test]
    fn sukaku_rejects_misplaced_digit() {
        let mut s = ".".repeat(729);
        s.replace_range(0..1, "2"); // position 0 may only hold '1'
        assert!(matches!(
            Grid::from_str_sukaku(&s),
            Err(SukakuFormatError::InvalidEntry { position: 0, ch: '2' })
        ));
    }
}
