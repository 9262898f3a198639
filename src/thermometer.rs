// vim: set ai et ts=4 sw=4 sts=4:
use std::fmt;
use log::{debug, trace};

use super::grid::{Grid, Glyph, HasGridLocation};
use super::error::ThermometerError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thermometer {
    pub id: usize,
    cells: Vec<(usize, usize)>, // (row, col), bulb first
}

impl Thermometer {
    pub fn new(id: usize, cells: Vec<(usize, usize)>) -> Self {
        Thermometer { id, cells }
    }

    pub fn length(&self) -> usize { self.cells.len() }
    pub fn cells(&self) -> &[(usize, usize)] { &self.cells }

    pub fn bulb(&self) -> Option<(usize, usize)> {
        self.cells.first().copied()
    }

    // cells that are filled when this thermometer is filled up to the given level
    pub fn filled_cells(&self, level: usize) -> &[(usize, usize)] {
        &self.cells[..level.min(self.cells.len())]
    }
}
impl fmt::Display for Thermometer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "t{}", self.id+1)
    }
}

/// Partitions the grid into thermometers, recording each cell's membership in the grid.
///
/// Cells are scanned in row-major order; every bulb starts a thermometer that extends
/// through body glyphs lying on the bulb's axis until it leaves the grid or meets any
/// other glyph. Fails if a trace runs into a square that another thermometer already
/// owns, or if a body square is left over once all bulbs have been traced.
pub fn extract_thermometers(grid: &mut Grid) -> Result<Vec<Thermometer>, ThermometerError>
{
    let n = grid.dimension();
    let mut thermometers = Vec::<Thermometer>::new();

    for y in 0..n {
        for x in 0..n {
            let cell = grid.get_cell(y, x);
            if cell.get_membership().is_some() {
                continue;
            }
            if let Glyph::Bulb(..) = cell.get_glyph() {
                let id = thermometers.len();
                let cells = _trace(grid, y, x, id)?;
                for (index, &(r, c)) in cells.iter().enumerate() {
                    grid.get_cell_mut(r, c).set_membership(id, index);
                }
                let thermometer = Thermometer::new(id, cells);
                trace!("traced {} of length {} from bulb {}", thermometer, thermometer.length(),
                       grid.get_cell(y, x).fmt_location());
                thermometers.push(thermometer);
            }
        }
    }

    if let Some(orphan) = grid.iter_cells().find(|c| !c.get_glyph().is_blank() && c.get_membership().is_none()) {
        return Err(ThermometerError::OrphanBody { row: orphan.get_row(), col: orphan.get_col() });
    }

    debug!("extracted {} thermometers from {}x{} grid", thermometers.len(), n, n);
    Ok(thermometers)
}

fn _trace(grid: &Grid, row: usize, col: usize, id: usize) -> Result<Vec<(usize, usize)>, ThermometerError>
{
    let heading = match grid.get_cell(row, col).get_glyph() {
        Glyph::Bulb(heading, _) => heading,
        _                       => return Ok(vec![]),
    };

    let mut cells = vec![(row, col)];
    let (mut r, mut c) = (row, col);
    while let Some((nr, nc)) = grid.neighbour(r, c, heading) {
        let next = grid.get_cell(nr, nc);
        match next.get_glyph() {
            Glyph::Body(axis, _) if axis == heading.axis() => {
                if let Some(owner) = next.get_thermometer() {
                    if owner != id {
                        return Err(ThermometerError::Overlap { row: nr, col: nc, claimed_by: owner });
                    }
                }
                cells.push((nr, nc));
            },
            _ => break,
        }
        r = nr;
        c = nc;
    }
    Ok(cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(rows: &[&str]) -> (Grid, Result<Vec<Thermometer>, ThermometerError>) {
        let mut grid = Grid::from_rows(rows).unwrap();
        let result = extract_thermometers(&mut grid);
        (grid, result)
    }

    #[test]
    fn traces_all_four_headings() {
        let (grid, result) = extract(&[
            "U<<R",
            "v..^",
            "v..D",
            "L>>.",
        ]);
        let therms = result.unwrap();
        assert_eq!(therms.len(), 4);
        assert_eq!(therms[0].cells(), &[(0, 0), (1, 0), (2, 0)]);
        assert_eq!(therms[1].cells(), &[(0, 3), (0, 2), (0, 1)]);
        assert_eq!(therms[2].cells(), &[(2, 3), (1, 3)]);
        assert_eq!(therms[3].cells(), &[(3, 0), (3, 1), (3, 2)]);
        assert_eq!(grid.get_cell(0, 1).get_membership(), Some((1, 2)));
        assert_eq!(therms[2].to_string(), "t3");
    }

    #[test]
    fn every_non_blank_cell_belongs_to_exactly_one_thermometer() {
        let (grid, result) = extract(&[
            "L>U.",
            "..v.",
            "^.v.",
            "D.>R",
        ]);
        let therms = result.unwrap();
        let mut seen = vec![vec![0usize; 4]; 4];
        for t in &therms {
            for &(r, c) in t.cells() {
                seen[r][c] += 1;
            }
        }
        for cell in grid.iter_cells() {
            let expected = if cell.get_glyph().is_blank() { 0 } else { 1 };
            assert_eq!(seen[cell.get_row()][cell.get_col()], expected, "at {}", cell.fmt_location());
        }
    }

    #[test]
    fn trace_stops_at_cross_axis_body_glyph() {
        let (_, result) = extract(&[
            "U.",
            ">.",
        ]);
        assert_eq!(result.unwrap_err(), ThermometerError::OrphanBody { row: 1, col: 0 });
    }

    #[test]
    fn orphan_body_cell_is_rejected() {
        let (_, result) = extract(&[
            "U..",
            "v..",
            "..v",
        ]);
        assert_eq!(result.unwrap_err(), ThermometerError::OrphanBody { row: 2, col: 2 });
    }

    #[test]
    fn overlapping_traces_are_rejected() {
        let (_, result) = extract(&[
            "U..",
            "v..",
            "D..",
        ]);
        assert_eq!(result.unwrap_err(), ThermometerError::Overlap { row: 1, col: 0, claimed_by: 0 });
    }

    #[test]
    fn single_bulb_is_a_thermometer_of_length_one() {
        let (_, result) = extract(&["R.", ".."]);
        let therms = result.unwrap();
        assert_eq!(therms.len(), 1);
        assert_eq!(therms[0].length(), 1);
        assert_eq!(therms[0].filled_cells(5), &[(0, 0)]);
    }
}
