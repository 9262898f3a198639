// vim: set ai et ts=4 sts=4:
use std::fmt;
use std::convert::TryFrom;

use super::util::{Direction, Direction::*};
use super::error::ParseError;

pub trait HasGridLocation {
    fn get_row(&self) -> usize;
    fn get_col(&self) -> usize;
    fn fmt_location(&self) -> String {
        format!("(col={:-2}, row={:-2})", self.get_col(), self.get_row())
    }
}

// direction in which a thermometer extends away from its bulb
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum Heading {
    Up,
    Down,
    Left,
    Right,
}
impl Heading {
    pub fn step(&self) -> (isize, isize) {
        match self {
            Heading::Up    => (-1,  0),
            Heading::Down  => ( 1,  0),
            Heading::Left  => ( 0, -1),
            Heading::Right => ( 0,  1),
        }
    }
    pub fn axis(&self) -> Direction {
        match self {
            Heading::Up | Heading::Down    => Vertical,
            Heading::Left | Heading::Right => Horizontal,
        }
    }
}

// ------------------------------------------------

#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum Glyph {
    Bulb(Heading, char),
    Body(Direction, char),
    Blank,
}
impl Glyph {
    pub fn is_blank(&self) -> bool {
        *self == Glyph::Blank
    }
}
impl TryFrom<char> for Glyph {
    type Error = char;
    fn try_from(value: char) -> Result<Self, Self::Error> {
        // bulb letters name the end of the thermometer the bulb sits on
        match value {
            'U'       => Ok(Glyph::Bulb(Heading::Down,  value)),
            'D'       => Ok(Glyph::Bulb(Heading::Up,    value)),
            'L'       => Ok(Glyph::Bulb(Heading::Right, value)),
            'R'       => Ok(Glyph::Bulb(Heading::Left,  value)),
            '^' | 'v' => Ok(Glyph::Body(Vertical, value)),
            '<' | '>' => Ok(Glyph::Body(Horizontal, value)),
            '.' | ' ' => Ok(Glyph::Blank),
            _         => Err(value),
        }
    }
}
impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match self {
            Glyph::Bulb(_, c) => *c,
            Glyph::Body(_, c) => *c,
            Glyph::Blank      => '.',
        })
    }
}

// ------------------------------------------------

#[derive(Debug, Clone)]
pub struct Cell {
    row: usize,
    col: usize,
    glyph: Glyph,
    membership: Option<(usize, usize)>, // (thermometer id, index from the bulb)
}
impl Cell {
    pub fn new(row: usize, col: usize, glyph: Glyph) -> Cell {
        Cell {
            row,
            col,
            glyph,
            membership: None,
        }
    }

    pub fn get_glyph(&self) -> Glyph { self.glyph }
    pub fn get_membership(&self) -> Option<(usize, usize)> { self.membership }
    pub fn get_thermometer(&self) -> Option<usize> { self.membership.map(|(id, _)| id) }

    pub fn set_membership(&mut self, thermometer: usize, index: usize) {
        self.membership = Some((thermometer, index));
    }
}
impl HasGridLocation for Cell {
    fn get_row(&self) -> usize { self.row }
    fn get_col(&self) -> usize { self.col }
}
impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.glyph)
    }
}

// ------------------------------------------------

#[derive(Clone)]
pub struct Grid {
    pub cells: Vec<Vec<Cell>>,
}
impl Grid {
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, ParseError>
    {
        if rows.is_empty() {
            return Err(ParseError::EmptyGrid);
        }
        let lines = rows.iter()
                        .map(|r| r.as_ref().chars().collect::<Vec<char>>())
                        .collect::<Vec<_>>();

        let width = lines[0].len();
        for (y, line) in lines.iter().enumerate() {
            if line.len() != width {
                return Err(ParseError::InconsistentRowLength { row: y, expected: width, found: line.len() });
            }
        }
        if width != lines.len() {
            return Err(ParseError::NotSquare { rows: lines.len(), cols: width });
        }

        let mut cells = Vec::with_capacity(lines.len());
        for (y, line) in lines.iter().enumerate() {
            let mut row = Vec::with_capacity(width);
            for (x, &c) in line.iter().enumerate() {
                let glyph = Glyph::try_from(c)
                    .map_err(|glyph| ParseError::UnrecognizedGlyph { row: y, col: x, glyph })?;
                row.push(Cell::new(y, x, glyph));
            }
            cells.push(row);
        }
        Ok(Grid { cells })
    }

    pub fn dimension(&self) -> usize { self.cells.len() }

    pub fn get_cell(&self, row: usize, col: usize) -> &Cell {
        &self.cells[row][col]
    }
    pub fn get_cell_mut(&mut self, row: usize, col: usize) -> &mut Cell {
        &mut self.cells[row][col]
    }

    // returns the position one step away in the given heading, if it is still on the grid
    pub fn neighbour(&self, row: usize, col: usize, heading: Heading) -> Option<(usize, usize)> {
        let (dr, dc) = heading.step();
        let r = row as isize + dr;
        let c = col as isize + dc;
        let n = self.dimension() as isize;
        if r < 0 || c < 0 || r >= n || c >= n {
            return None;
        }
        Some((r as usize, c as usize))
    }

    pub fn iter_cells(&self) -> impl Iterator<Item=&Cell> {
        self.cells.iter().flat_map(|row| row.iter())
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Grid(n={})", self.dimension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_glyphs_row_major() {
        let grid = Grid::from_rows(&["U.", "v."]).unwrap();
        assert_eq!(grid.dimension(), 2);
        assert_eq!(grid.get_cell(0, 0).get_glyph(), Glyph::Bulb(Heading::Down, 'U'));
        assert_eq!(grid.get_cell(1, 0).get_glyph(), Glyph::Body(Vertical, 'v'));
        assert!(grid.get_cell(1, 1).get_glyph().is_blank());
        assert_eq!(grid.get_cell(1, 0).fmt_location(), "(col= 0, row= 1)");
    }

    #[test]
    fn rejects_ragged_and_non_square_grids() {
        assert_eq!(Grid::from_rows(&["U..", "v."]).unwrap_err(),
                   ParseError::InconsistentRowLength { row: 1, expected: 3, found: 2 });
        assert_eq!(Grid::from_rows(&["U..", "v.."]).unwrap_err(),
                   ParseError::NotSquare { rows: 2, cols: 3 });
        assert_eq!(Grid::from_rows::<&str>(&[]).unwrap_err(), ParseError::EmptyGrid);
    }

    #[test]
    fn rejects_unknown_glyphs() {
        assert_eq!(Grid::from_rows(&["U#", ".."]).unwrap_err(),
                   ParseError::UnrecognizedGlyph { row: 0, col: 1, glyph: '#' });
    }

    #[test]
    fn neighbour_stays_in_bounds() {
        let grid = Grid::from_rows(&["..", ".."]).unwrap();
        assert_eq!(grid.neighbour(0, 0, Heading::Up), None);
        assert_eq!(grid.neighbour(0, 0, Heading::Right), Some((0, 1)));
        assert_eq!(grid.neighbour(1, 1, Heading::Down), None);
        assert_eq!(grid.neighbour(1, 1, Heading::Left), Some((1, 0)));
    }
}
