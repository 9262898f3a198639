// vim: set ai et ts=4 sw=4 sts=4:
//! Constraint system derived from a puzzle: one bounded integer variable per thermometer
//! (its fill level) and one sum equality per row and per column.
//!
//! A cell at index `i` of thermometer `t` is filled iff `level(t) > i`. Every line keeps
//! the ordered list of thermometer cells lying on it, so the effect of moving a single
//! thermometer's level on that line can be computed without looking at the rest of the grid.
use std::fmt;
use std::ops::RangeInclusive;
use log::debug;

use super::puzzle::Puzzle;
use super::util::{Direction, Direction::*};

#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub struct LineId {
    pub direction: Direction,
    pub index: usize,
}
impl LineId {
    pub fn row(index: usize) -> Self { LineId { direction: Horizontal, index } }
    pub fn col(index: usize) -> Self { LineId { direction: Vertical, index } }
}
impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.direction.line_name(), self.index)
    }
}

#[derive(Debug, Clone)]
pub struct Variable {
    pub thermometer: usize,
    pub domain: RangeInclusive<usize>,
}

#[derive(Debug, Clone)]
pub struct Line {
    pub id: LineId,
    pub target: usize,
    pub members: Vec<(usize, usize)>, // (thermometer id, index within thermometer), in order along the line
}
impl Line {
    // number of thermometer cells on this line, i.e. the largest sum it can reach
    pub fn capacity(&self) -> usize {
        self.members.len()
    }

    pub fn contribution(&self, thermometer: usize, level: usize) -> usize {
        self.members.iter()
                    .filter(|&&(t, i)| t == thermometer && i < level)
                    .count()
    }

    pub fn sum(&self, levels: &[usize]) -> usize {
        self.members.iter()
                    .filter(|&&(t, i)| i < levels[t])
                    .count()
    }
}

#[derive(Debug, Clone)]
pub struct ConstraintSystem {
    dimension: usize,
    variables: Vec<Variable>,
    lines: Vec<Line>,                   // rows first, then columns
    cell_slots: Vec<Vec<(usize, usize)>>, // per thermometer, per index: (row slot, col slot)
    touched: Vec<Vec<usize>>,           // per thermometer: distinct line slots it crosses
}

impl ConstraintSystem {
    pub fn build(puzzle: &Puzzle) -> Self
    {
        let n = puzzle.dimension();
        let grid = puzzle.grid();

        let variables = puzzle.thermometers()
                              .iter()
                              .map(|t| Variable { thermometer: t.id, domain: 0..=t.length() })
                              .collect::<Vec<_>>();

        let mut lines = Vec::with_capacity(2*n);
        for y in 0..n {
            let members = (0..n).filter_map(|x| grid.get_cell(y, x).get_membership())
                                .collect();
            lines.push(Line { id: LineId::row(y), target: puzzle.row_target(y), members });
        }
        for x in 0..n {
            let members = (0..n).filter_map(|y| grid.get_cell(y, x).get_membership())
                                .collect();
            lines.push(Line { id: LineId::col(x), target: puzzle.col_target(x), members });
        }

        let cell_slots = puzzle.thermometers()
                               .iter()
                               .map(|t| t.cells()
                                         .iter()
                                         .map(|&(r, c)| (r, n + c))
                                         .collect::<Vec<_>>())
                               .collect::<Vec<_>>();

        let touched = cell_slots.iter()
                                .map(|slots| {
                                    let mut distinct = slots.iter()
                                                            .flat_map(|&(rs, cs)| vec![rs, cs])
                                                            .collect::<Vec<_>>();
                                    distinct.sort();
                                    distinct.dedup();
                                    distinct
                                })
                                .collect::<Vec<_>>();

        debug!("built constraint system: {} variables, {} line equalities", variables.len(), lines.len());
        ConstraintSystem {
            dimension: n,
            variables,
            lines,
            cell_slots,
            touched,
        }
    }

    pub fn dimension(&self) -> usize { self.dimension }
    pub fn variables(&self) -> &[Variable] { &self.variables }
    pub fn lines(&self) -> &[Line] { &self.lines }
    pub fn line(&self, slot: usize) -> &Line { &self.lines[slot] }

    pub fn slot(&self, id: LineId) -> usize {
        match id.direction {
            Horizontal => id.index,
            Vertical   => self.dimension + id.index,
        }
    }

    // (row slot, col slot) for every cell of the thermometer, bulb first
    pub fn cell_slots(&self, thermometer: usize) -> &[(usize, usize)] {
        &self.cell_slots[thermometer]
    }
    pub fn touched_lines(&self, thermometer: usize) -> &[usize] {
        &self.touched[thermometer]
    }

    /// Change in the sum of line `slot` when `thermometer` moves from level `from` to level `to`.
    pub fn delta(&self, slot: usize, thermometer: usize, from: usize, to: usize) -> isize {
        let line = &self.lines[slot];
        line.contribution(thermometer, to) as isize - line.contribution(thermometer, from) as isize
    }

    // lines whose target can never be reached, even with every thermometer filled completely
    pub fn unreachable_lines(&self) -> Vec<LineId> {
        self.lines.iter()
                  .filter(|line| line.target > line.capacity())
                  .map(|line| line.id)
                  .collect()
    }

    pub fn is_satisfied(&self, levels: &[usize]) -> bool {
        self.variables.iter().all(|v| v.domain.contains(&levels[v.thermometer]))
            && self.lines.iter().all(|line| line.sum(levels) == line.target)
    }
}
