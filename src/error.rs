// vim: set ai et ts=4 sw=4 sts=4:
use std::fmt;
use std::io;

use super::util::Direction;

// ------------------------------------------------

#[derive(PartialEq, Eq, Debug, Clone)]
pub enum ParseError {
    EmptyGrid,
    InconsistentRowLength { row: usize, expected: usize, found: usize },
    NotSquare { rows: usize, cols: usize },
    UnrecognizedGlyph { row: usize, col: usize, glyph: char },
    MissingTargets,
    TargetCount { direction: Direction, expected: usize, found: usize },
    InvalidTarget { direction: Direction, index: usize, value: String },
    TargetOutOfRange { direction: Direction, index: usize, value: usize, max: usize },
    Yaml(String),
}
impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ParseError: {}", match self {
            ParseError::EmptyGrid =>
                "grid has no rows".to_string(),
            ParseError::InconsistentRowLength { row, expected, found } =>
                format!("row {} has {} cells, expected {}", row, found, expected),
            ParseError::NotSquare { rows, cols } =>
                format!("grid is not square: {} rows of {} cells", rows, cols),
            ParseError::UnrecognizedGlyph { row, col, glyph } =>
                format!("unrecognized glyph {:?} in square (col={:-2}, row={:-2})", glyph, col, row),
            ParseError::MissingTargets =>
                "expected a line of column targets followed by a line of row targets".to_string(),
            ParseError::TargetCount { direction, expected, found } =>
                format!("expected {} {} targets, found {}", expected, direction.line_name(), found),
            ParseError::InvalidTarget { direction, index, value } =>
                format!("{} target #{} is not a number: {:?}", direction.line_name(), index, value),
            ParseError::TargetOutOfRange { direction, index, value, max } =>
                format!("{} target #{} is {}, must be between 0 and {}", direction.line_name(), index, value, max),
            ParseError::Yaml(msg) =>
                format!("invalid YAML puzzle: {}", msg),
        })
    }
}
impl std::error::Error for ParseError {}

// ------------------------------------------------

#[derive(PartialEq, Eq, Debug, Clone)]
pub enum ThermometerError {
    OrphanBody { row: usize, col: usize },               // body glyph that no bulb trace reaches
    Overlap { row: usize, col: usize, claimed_by: usize }, // trace runs into a cell owned by another thermometer
}
impl fmt::Display for ThermometerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "MalformedThermometer: {}", match self {
            ThermometerError::OrphanBody { row, col } =>
                format!("body square (col={:-2}, row={:-2}) is not reachable from any bulb", col, row),
            ThermometerError::Overlap { row, col, claimed_by } =>
                format!("square (col={:-2}, row={:-2}) already belongs to thermometer t{}", col, row, claimed_by+1),
        })
    }
}
impl std::error::Error for ThermometerError {}

// ------------------------------------------------

#[derive(Debug)]
pub enum Error {
    Io(io::Error),
    Parse(ParseError),
    Thermometer(ThermometerError),
}
impl From<io::Error> for Error {
    fn from(other: io::Error) -> Self {
        Error::Io(other)
    }
}
impl From<ParseError> for Error {
    fn from(other: ParseError) -> Self {
        Error::Parse(other)
    }
}
impl From<ThermometerError> for Error {
    fn from(other: ThermometerError) -> Self {
        Error::Thermometer(other)
    }
}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io(x)          => write!(f, "IoError: {}", x),
            Error::Parse(x)       => write!(f, "{}", x),
            Error::Thermometer(x) => write!(f, "{}", x),
        }
    }
}
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(x)          => Some(x),
            Error::Parse(x)       => Some(x),
            Error::Thermometer(x) => Some(x),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_square() {
        let err = Error::from(ParseError::UnrecognizedGlyph { row: 2, col: 1, glyph: 'x' });
        assert_eq!(err.to_string(), "ParseError: unrecognized glyph 'x' in square (col= 1, row= 2)");

        let err = Error::from(ThermometerError::Overlap { row: 0, col: 3, claimed_by: 0 });
        assert_eq!(err.to_string(), "MalformedThermometer: square (col= 3, row= 0) already belongs to thermometer t1");
    }

    #[test]
    fn target_errors_name_the_line_kind() {
        let err = ParseError::TargetOutOfRange { direction: Direction::Vertical, index: 0, value: 4, max: 3 };
        assert_eq!(err.to_string(), "ParseError: col target #0 is 4, must be between 0 and 3");
    }
}
