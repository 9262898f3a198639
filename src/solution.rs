// vim: set ai et ts=4 sw=4 sts=4:
use std::fmt;
use std::cmp::Ordering;
use ansi_term::{Colour, Style};

use super::puzzle::Puzzle;
use super::grid::{Cell, Glyph, HasGridLocation};
use super::util::maybe_color;

/// Fill level of every thermometer, indexed by thermometer id. A thermometer at level `k`
/// has its cells `0..k` (counted from the bulb) filled and the rest empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FillAssignment {
    levels: Vec<usize>,
}
impl FillAssignment {
    pub fn new(levels: Vec<usize>) -> Self {
        FillAssignment { levels }
    }
    pub fn level(&self, thermometer: usize) -> usize { self.levels[thermometer] }
    pub fn levels(&self) -> &[usize] { &self.levels }

    // filled cells encoded as row*N + col, ascending
    pub fn filled_codes(&self, puzzle: &Puzzle) -> Vec<usize> {
        let n = puzzle.dimension();
        let mut codes = puzzle.thermometers()
                              .iter()
                              .flat_map(|t| t.filled_cells(self.levels[t.id]).iter())
                              .map(|&(r, c)| r*n + c)
                              .collect::<Vec<_>>();
        codes.sort();
        codes
    }
}

/// An accepted assignment. Solutions are ordered by their sorted filled-cell codes, which
/// is the order used to pick between several assignments that meet every target.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Solution {
    assignment: FillAssignment,
    codes: Vec<usize>,
}
impl Solution {
    pub fn new(puzzle: &Puzzle, assignment: FillAssignment) -> Self {
        let codes = assignment.filled_codes(puzzle);
        Solution { assignment, codes }
    }
    pub fn assignment(&self) -> &FillAssignment { &self.assignment }
    pub fn fill_level(&self, thermometer: usize) -> usize { self.assignment.level(thermometer) }
    pub fn filled_codes(&self) -> &[usize] { &self.codes }
}
impl PartialOrd for Solution {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Solution {
    fn cmp(&self, other: &Self) -> Ordering {
        self.codes.cmp(&other.codes)
            .then_with(|| self.assignment.levels.cmp(&other.assignment.levels))
    }
}

// ------------------------------------------------

/// Read-only view of a solved puzzle, for renderers and other consumers.
#[derive(Debug)]
pub struct SolutionView<'a> {
    puzzle: &'a Puzzle,
    solution: Solution,
    row_sums: Vec<usize>,
    col_sums: Vec<usize>,
}

impl<'a> SolutionView<'a> {
    pub fn new(puzzle: &'a Puzzle, solution: Solution) -> Self {
        let n = puzzle.dimension();
        let mut row_sums = vec![0; n];
        let mut col_sums = vec![0; n];
        for &code in solution.filled_codes() {
            row_sums[code / n] += 1;
            col_sums[code % n] += 1;
        }
        SolutionView { puzzle, solution, row_sums, col_sums }
    }

    pub fn puzzle(&self) -> &'a Puzzle { self.puzzle }
    pub fn solution(&self) -> &Solution { &self.solution }
    pub fn into_solution(self) -> Solution { self.solution }

    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        match self.puzzle.grid().get_cell(row, col).get_membership() {
            Some((t, index)) => index < self.solution.fill_level(t),
            None             => false,
        }
    }
    pub fn fill_level(&self, thermometer: usize) -> usize {
        self.solution.fill_level(thermometer)
    }
    pub fn row_sum(&self, row: usize) -> usize { self.row_sums[row] }
    pub fn col_sum(&self, col: usize) -> usize { self.col_sums[col] }

    pub fn thermometer_at(&self, row: usize, col: usize) -> Option<usize> {
        self.puzzle.grid().get_cell(row, col).get_thermometer()
    }
    pub fn is_bulb(&self, row: usize, col: usize) -> bool {
        match self.puzzle.grid().get_cell(row, col).get_glyph() {
            Glyph::Bulb(..) => true,
            _               => false,
        }
    }

    fn _fmt_cell(&self, cell: &Cell, emit_color: bool) -> String {
        let filled = self.is_filled(cell.get_row(), cell.get_col());
        let symbol = match (cell.get_glyph(), filled) {
            (Glyph::Blank, _)       => " ",
            (Glyph::Bulb(..), true)  => "\u{25CF}", // black circle
            (Glyph::Bulb(..), false) => "\u{25CB}", // white circle
            (Glyph::Body(..), true)  => "\u{25A0}", // filled in black square
            (Glyph::Body(..), false) => "\u{25A1}", // white square
        };
        let style = match filled {
            true  => Style::new().fg(Colour::Red),
            false => Style::new().fg(Colour::Fixed(241)),
        };
        format!(" {} ", maybe_color(&style.paint(symbol), emit_color))
    }

    pub fn render(&self, emit_color: bool) -> String {
        self.puzzle.fmt_board(|cell| self._fmt_cell(cell, emit_color))
    }
}
impl<'a> fmt::Display for SolutionView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.render(false))
    }
}
