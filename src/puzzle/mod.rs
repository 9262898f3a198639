// vim: set ai et ts=4 sw=4 sts=4:
mod solver;

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::convert::TryFrom;
use log::debug;
use yaml_rust::{Yaml, YamlLoader};

use super::grid::{Grid, Cell};
use super::thermometer::{Thermometer, extract_thermometers};
use super::error::{Error, ParseError, Result};
use super::util::{ralign, Direction, Direction::*};

#[derive(Debug)]
pub struct Puzzle {
    grid: Grid,
    thermometers: Vec<Thermometer>,
    row_targets: Vec<usize>,
    col_targets: Vec<usize>,
}

impl Puzzle {
    pub fn new(mut grid: Grid,
               col_targets: Vec<usize>,
               row_targets: Vec<usize>) -> Result<Self>
    {
        let n = grid.dimension();
        Self::_validate_targets(&col_targets, Vertical, n)?;
        Self::_validate_targets(&row_targets, Horizontal, n)?;

        let thermometers = extract_thermometers(&mut grid)?;
        Ok(Puzzle {
            grid,
            thermometers,
            row_targets,
            col_targets,
        })
    }

    fn _validate_targets(targets: &[usize], direction: Direction, n: usize) -> std::result::Result<(), ParseError> {
        if targets.len() != n {
            return Err(ParseError::TargetCount { direction, expected: n, found: targets.len() });
        }
        for (index, &value) in targets.iter().enumerate() {
            if value > n {
                return Err(ParseError::TargetOutOfRange { direction, index, value, max: n });
            }
        }
        Ok(())
    }

    pub fn dimension(&self) -> usize { self.grid.dimension() }
    pub fn grid(&self) -> &Grid { &self.grid }
    pub fn thermometers(&self) -> &[Thermometer] { &self.thermometers }
    pub fn thermometer(&self, id: usize) -> &Thermometer { &self.thermometers[id] }

    pub fn row_target(&self, row: usize) -> usize { self.row_targets[row] }
    pub fn col_target(&self, col: usize) -> usize { self.col_targets[col] }
    pub fn targets(&self, direction: Direction) -> &[usize] {
        match direction {
            Horizontal => &self.row_targets,
            Vertical   => &self.col_targets,
        }
    }

    /// Reads a puzzle from disk; files ending in `.yaml` or `.yml` are read as YAML,
    /// anything else as the plain text format.
    pub fn load<P: AsRef<Path>>(path: P, force_yaml: bool) -> Result<Puzzle>
    {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let is_yaml = force_yaml || match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => true,
            _                          => false,
        };
        debug!("loading {} as {}", path.display(), if is_yaml { "YAML" } else { "text" });
        match is_yaml {
            true  => Self::from_yaml_str(&contents),
            false => Self::from_text(&contents),
        }
    }

    /// Parses the plain text format: N grid lines of N glyphs, a line of column targets,
    /// and a line of row targets.
    pub fn from_text(s: &str) -> Result<Puzzle>
    {
        let mut lines = s.lines().collect::<Vec<_>>();
        while lines.last().map_or(false, |l| l.trim().is_empty()) {
            lines.pop();
        }
        if lines.len() < 2 {
            return Err(Error::from(ParseError::MissingTargets));
        }

        let row_line = lines.pop().unwrap_or_default();
        let col_line = lines.pop().unwrap_or_default();
        let grid = Grid::from_rows(&lines)?;

        let col_targets = Self::_parse_targets(col_line.split_whitespace(), Vertical)?;
        let row_targets = Self::_parse_targets(row_line.split_whitespace(), Horizontal)?;
        Puzzle::new(grid, col_targets, row_targets)
    }

    fn _parse_targets<'a, I>(tokens: I, direction: Direction) -> std::result::Result<Vec<usize>, ParseError>
        where I: Iterator<Item=&'a str>
    {
        tokens.enumerate()
              .map(|(index, tok)| tok.parse::<usize>()
                                     .map_err(|_| ParseError::InvalidTarget { direction, index, value: tok.to_string() }))
              .collect()
    }

    pub fn from_yaml_str(s: &str) -> Result<Puzzle>
    {
        let docs = YamlLoader::load_from_str(s)
                              .map_err(|e| ParseError::Yaml(e.to_string()))?;
        match docs.first() {
            Some(doc) => Self::from_yaml(doc),
            None      => Err(Error::from(ParseError::Yaml("empty document".to_string()))),
        }
    }

    pub fn from_yaml(doc: &Yaml) -> Result<Puzzle>
    {
        let rows: Vec<String> = match &doc["grid"] {
            Yaml::Array(list) => list.iter()
                                     .map(|row| row.as_str()
                                                   .map(String::from)
                                                   .ok_or_else(|| ParseError::Yaml(format!("grid row is not a string: {:?}", row))))
                                     .collect::<std::result::Result<_, _>>()?,
            Yaml::String(s)   => s.lines().map(String::from).collect(),
            _                 => return Err(Error::from(ParseError::Yaml("missing 'grid' list".to_string()))),
        };
        let grid = Grid::from_rows(&rows)?;
        let col_targets = Self::_parse_yaml_targets(&doc["cols"], Vertical)?;
        let row_targets = Self::_parse_yaml_targets(&doc["rows"], Horizontal)?;
        Puzzle::new(grid, col_targets, row_targets)
    }

    fn _parse_yaml_targets(input: &Yaml, direction: Direction) -> std::result::Result<Vec<usize>, ParseError> {
        match input {
            Yaml::String(s)     => Self::_parse_targets(s.split_whitespace(), direction),
            Yaml::Integer(_)    => Ok(vec![ Self::_yaml_target(input, direction, 0)? ]),
            Yaml::Array(values) => values.iter()
                                         .enumerate()
                                         .map(|(index, v)| Self::_yaml_target(v, direction, index))
                                         .collect(),
            _ => Err(ParseError::Yaml(format!("missing '{}s' targets", direction.line_name()))),
        }
    }

    fn _yaml_target(value: &Yaml, direction: Direction, index: usize) -> std::result::Result<usize, ParseError> {
        value.as_i64()
             .and_then(|v| usize::try_from(v).ok())
             .ok_or_else(|| ParseError::InvalidTarget { direction, index, value: format!("{:?}", value) })
    }
}

impl FromStr for Puzzle {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        Puzzle::from_text(s)
    }
}

impl Puzzle {
    // Draws the framed board with the column targets above it and the row targets to its
    // left. Cell contents come from the caller so the bare puzzle and a solved puzzle
    // share the same frame; every rendered cell is expected to be three columns wide.
    pub(crate) fn fmt_board<F>(&self, render_cell: F) -> String
        where F: Fn(&Cell) -> String
    {
        let row_prefixes = self.row_targets.iter()
                                           .map(|t| t.to_string())
                                           .collect::<Vec<_>>();
        let prefix_len = row_prefixes.iter()
                                     .map(|x| x.len())
                                     .max()
                                     .unwrap_or(0);
        let n = self.dimension();
        let pad = ralign("", prefix_len);
        let rule = "\u{2550}".repeat(3*n);

        let mut result = Self::_fmt_line(&pad, " ", " ", self.col_targets.iter().map(|t| format!(" {:1} ", t)));
        result.push_str(&Self::_fmt_line(&pad, "\u{2554}", "\u{2557}", Some(rule.clone())));
        for (prefix, row) in row_prefixes.iter().zip(&self.grid.cells) {
            result.push_str(&Self::_fmt_line(&ralign(prefix, prefix_len), "\u{2551}", "\u{2551}",
                                             row.iter().map(|c| render_cell(c))));
        }
        result.push_str(&Self::_fmt_line(&pad, "\u{255A}", "\u{255D}", Some(rule)));
        result
    }

    fn _fmt_line<I>(prefix: &str, left_delim: &str, right_delim: &str, content_parts: I) -> String
        where I: IntoIterator<Item=String>
    {
        let mut result = format!("{} {}", prefix, left_delim);
        for part in content_parts {
            result.push_str(&part);
        }
        result.push_str(right_delim);
        result.push('\n');
        result
    }
}
impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.fmt_board(|c| format!(" {:1} ", c)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SINGLE: &str = "\
U..
v..
v..
2 0 0
1 1 0
";

    #[test]
    fn parses_text_format() {
        let puzzle = Puzzle::from_text(SINGLE).unwrap();
        assert_eq!(puzzle.dimension(), 3);
        assert_eq!(puzzle.thermometers().len(), 1);
        assert_eq!(puzzle.thermometer(0).length(), 3);
        assert_eq!(puzzle.targets(Vertical), &[2, 0, 0]);
        assert_eq!(puzzle.targets(Horizontal), &[1, 1, 0]);
        assert_eq!(puzzle.col_target(0), 2);
        assert_eq!(puzzle.row_target(1), 1);
    }

    #[test]
    fn tolerates_crlf_and_trailing_blank_lines() {
        let text = "U.\r\nv.\r\n2 0\r\n1 1\r\n\r\n\n";
        let puzzle: Puzzle = text.parse().unwrap();
        assert_eq!(puzzle.dimension(), 2);
        assert_eq!(puzzle.targets(Horizontal), &[1, 1]);
    }

    #[test]
    fn target_above_dimension_is_rejected_before_solving() {
        let text = "U..\nv..\nv..\n4 0 0\n1 1 0\n";
        match Puzzle::from_text(text) {
            Err(Error::Parse(ParseError::TargetOutOfRange { direction: Vertical, index: 0, value: 4, max: 3 })) => {},
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn wrong_target_count_is_rejected() {
        let text = "U..\nv..\nv..\n2 0\n1 1 0\n";
        match Puzzle::from_text(text) {
            Err(Error::Parse(ParseError::TargetCount { direction: Vertical, expected: 3, found: 2 })) => {},
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn non_numeric_target_is_rejected() {
        let text = "U..\nv..\nv..\n2 0 0\n1 x 0\n";
        match Puzzle::from_text(text) {
            Err(Error::Parse(ParseError::InvalidTarget { direction: Horizontal, index: 1, .. })) => {},
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn missing_target_lines_are_rejected() {
        match Puzzle::from_text("U.\n") {
            Err(Error::Parse(ParseError::MissingTargets)) => {},
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn malformed_thermometer_surfaces_through_puzzle() {
        let text = "U..\n...\n..v\n1 0 0\n1 0 0\n";
        match Puzzle::from_text(text) {
            Err(Error::Thermometer(_)) => {},
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn parses_yaml_format() {
        let yaml = "
grid:
    - \"U..\"
    - \"v..\"
    - \"v..\"
cols: 2 0 0
rows: [1, 1, 0]
";
        let puzzle = Puzzle::from_yaml_str(yaml).unwrap();
        assert_eq!(puzzle.thermometer(0).length(), 3);
        assert_eq!(puzzle.targets(Vertical), &[2, 0, 0]);
        assert_eq!(puzzle.targets(Horizontal), &[1, 1, 0]);
    }

    #[test]
    fn yaml_without_grid_is_rejected() {
        match Puzzle::from_yaml_str("cols: 1\nrows: 1\n") {
            Err(Error::Parse(ParseError::Yaml(_))) => {},
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn display_frames_the_grid_with_targets() {
        let puzzle = Puzzle::from_text(SINGLE).unwrap();
        let rendered = puzzle.to_string();
        let lines = rendered.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "    2  0  0  ");
        assert!(lines[2].starts_with("1 \u{2551} U "));
    }
}
