// vim: set ai et ts=4 sw=4 sts=4:
use std::fmt;
use std::time::Duration;

/// Counters collected while searching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolverStatistics {
    pub nodes_explored: u64,
    pub backtracks: u64,
    pub prunings: u64,
    pub max_depth: u64,
    pub solutions_found: u64,
    pub time_total: Duration,
}

impl SolverStatistics {
    #[inline]
    pub fn on_node_explored(&mut self) {
        self.nodes_explored = self.nodes_explored.saturating_add(1);
    }
    #[inline]
    pub fn on_backtrack(&mut self) {
        self.backtracks = self.backtracks.saturating_add(1);
    }
    #[inline]
    pub fn on_pruning(&mut self) {
        self.prunings = self.prunings.saturating_add(1);
    }
    #[inline]
    pub fn on_depth_update(&mut self, depth: u64) {
        self.max_depth = self.max_depth.max(depth);
    }
    #[inline]
    pub fn on_solution_found(&mut self) {
        self.solutions_found = self.solutions_found.saturating_add(1);
    }
}

impl fmt::Display for SolverStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Solver statistics:")?;
        writeln!(f, "  Nodes explored:   {}", self.nodes_explored)?;
        writeln!(f, "  Backtracks:       {}", self.backtracks)?;
        writeln!(f, "  Prunings:         {}", self.prunings)?;
        writeln!(f, "  Max depth:        {}", self.max_depth)?;
        writeln!(f, "  Solutions found:  {}", self.solutions_found)?;
        writeln!(f, "  Total time:       {:.2?}", self.time_total)?;
        Ok(())
    }
}
