// vim: set ai et ts=4 sts=4 sw=4:
use super::Puzzle;
use super::super::solution::SolutionView;
use super::super::solver::{Solver, SolverConfig, SolveError};

impl Puzzle {
    pub fn solver(&self, config: SolverConfig) -> Solver {
        Solver::new(self, config)
    }

    pub fn solve(&self, config: &SolverConfig) -> Result<SolutionView, SolveError> {
        let solution = self.solver(config.clone()).solve()?;
        Ok(SolutionView::new(self, solution))
    }
}
