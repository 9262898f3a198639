// vim: set ai et ts=4 sts=4 sw=4:
//! Solver for thermometer puzzles.
//!
//! An N×N grid holds straight thermometers, each a bulb followed by a run of body cells.
//! Every thermometer is filled from its bulb up to some level, and the number of filled
//! cells in each row and column has to match the given targets.
//!
//! ```
//! use thermo::{Puzzle, SolverConfig};
//!
//! let puzzle: Puzzle = "U..\nv..\nv..\n2 0 0\n1 1 0\n".parse().unwrap();
//! let view = puzzle.solve(&SolverConfig::default()).unwrap();
//! assert_eq!(view.fill_level(0), 2);
//! assert!(view.is_filled(1, 0));
//! assert!(!view.is_filled(2, 0));
//! ```
pub mod util;
pub mod error;
pub mod grid;
pub mod thermometer;
pub mod puzzle;
pub mod constraint;
pub mod solution;
pub mod solver;

pub use self::error::{Error, ParseError, ThermometerError};
pub use self::puzzle::Puzzle;
pub use self::thermometer::Thermometer;
pub use self::solution::{FillAssignment, Solution, SolutionView};
pub use self::solver::{Budget, Solver, SolverConfig, SolverStatistics, SolveError, TieBreak};
