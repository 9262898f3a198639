// vim: set ai et ts=4 sw=4 sts=4:
//! Backtracking search over thermometer fill levels.
//!
//! Thermometers are assigned longest first (ties by id), each trying levels `0..=length`
//! in ascending order. Every line keeps a running sum of filled cells and the number of
//! cells still owned by unassigned thermometers; a branch is cut as soon as a line it
//! touches either overshoots its target or can no longer reach it. Raising a level only
//! ever adds cells, so once a level overshoots, all higher levels are skipped too.
//!
//! Both the thermometer order and the level order are fixed, so repeated runs visit the
//! same nodes and produce the same result.
mod budget;
mod stats;

use std::fmt;
use std::convert::TryFrom;
use log::{debug, info, trace, warn};

pub use self::budget::Budget;
pub use self::stats::SolverStatistics;
use self::budget::BudgetMonitor;

use super::puzzle::Puzzle;
use super::constraint::ConstraintSystem;
use super::solution::{FillAssignment, Solution};
use super::util::Direction::{Horizontal, Vertical};

/// What to do when more than one assignment meets every target.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum TieBreak {
    Unique,  // report the puzzle as ambiguous
    Minimal, // keep the assignment with the lexicographically smallest filled cells
}
impl fmt::Display for TieBreak {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match self {
            TieBreak::Unique  => "unique",
            TieBreak::Minimal => "minimal",
        })
    }
}
impl TryFrom<&str> for TieBreak {
    type Error = &'static str;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "unique"  => Ok(TieBreak::Unique),
            "minimal" => Ok(TieBreak::Minimal),
            _         => Err("Not a valid TieBreak value")
        }
    }
}

#[derive(Debug, Clone)]
pub struct SolverConfig {
    pub tie_break: TieBreak,
    pub budget: Budget,
}
impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            tie_break: TieBreak::Minimal,
            budget: Budget::unlimited(),
        }
    }
}

// ------------------------------------------------

#[derive(PartialEq, Eq, Debug, Clone)]
pub enum SolveError {
    Unsatisfiable,
    Ambiguous { solutions: usize }, // lower bound on the number of solutions
    Timeout(String),
}
impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SolveError::Unsatisfiable =>
                write!(f, "Unsatisfiable: no fill assignment meets every row and column target"),
            SolveError::Ambiguous { solutions } =>
                write!(f, "Ambiguous: at least {} fill assignments meet every row and column target", solutions),
            SolveError::Timeout(reason) =>
                write!(f, "Timeout: search stopped before completing ({})", reason),
        }
    }
}
impl std::error::Error for SolveError {}

// ------------------------------------------------

pub struct Solver<'a> {
    puzzle: &'a Puzzle,
    system: ConstraintSystem,
    config: SolverConfig,
    order: Vec<usize>,
    stats: SolverStatistics,
}

impl<'a> Solver<'a> {
    pub fn new(puzzle: &'a Puzzle, config: SolverConfig) -> Self {
        let system = ConstraintSystem::build(puzzle);
        let mut order = (0..puzzle.thermometers().len()).collect::<Vec<_>>();
        order.sort_by(|&a, &b| puzzle.thermometer(b).length()
                                     .cmp(&puzzle.thermometer(a).length())
                                     .then(a.cmp(&b)));
        Solver {
            puzzle,
            system,
            config,
            order,
            stats: SolverStatistics::default(),
        }
    }

    pub fn system(&self) -> &ConstraintSystem { &self.system }
    pub fn stats(&self) -> &SolverStatistics { &self.stats }

    // thermometer ids in the order the search assigns them
    pub fn order(&self) -> &[usize] { &self.order }

    pub fn solve(&mut self) -> Result<Solution, SolveError> {
        let limit = match self.config.tie_break {
            TieBreak::Unique  => Some(2),
            TieBreak::Minimal => None,
        };
        let collector = self._run(limit)?;

        match (collector.found, collector.best) {
            (0, _) | (_, None) => {
                info!("no assignment meets every target");
                Err(SolveError::Unsatisfiable)
            },
            (1, Some(solution)) => {
                info!("found unique solution after {} nodes", self.stats.nodes_explored);
                Ok(solution)
            },
            (found, Some(solution)) => match self.config.tie_break {
                TieBreak::Unique => {
                    info!("puzzle is ambiguous: found {} solutions", found);
                    Err(SolveError::Ambiguous { solutions: found })
                },
                TieBreak::Minimal => {
                    info!("{} assignments meet every target; keeping the minimal one", found);
                    Ok(solution)
                },
            },
        }
    }

    /// Counts assignments meeting every target, stopping once `limit` have been found.
    pub fn count_solutions(&mut self, limit: usize) -> Result<usize, SolveError> {
        if limit == 0 {
            return Ok(0);
        }
        Ok(self._run(Some(limit))?.found)
    }

    pub fn has_unique_solution(&mut self) -> Result<bool, SolveError> {
        Ok(self.count_solutions(2)? == 1)
    }

    // cheap checks that rule out every assignment before any search happens
    fn _precheck(&self) -> Option<String> {
        let unreachable = self.system.unreachable_lines();
        if let Some(line) = unreachable.first() {
            let l = self.system.line(self.system.slot(*line));
            return Some(format!("{} wants {} filled cells but only {} thermometer cells cross it",
                                line, l.target, l.capacity()));
        }
        let row_total: usize = self.puzzle.targets(Horizontal).iter().sum();
        let col_total: usize = self.puzzle.targets(Vertical).iter().sum();
        if row_total != col_total {
            return Some(format!("row targets sum to {} but column targets sum to {}", row_total, col_total));
        }
        None
    }

    fn _run(&mut self, limit: Option<usize>) -> Result<Collector, SolveError> {
        self.stats = SolverStatistics::default();
        let mut collector = Collector { limit, found: 0, best: None };

        if let Some(reason) = self._precheck() {
            debug!("unsatisfiable before search: {}", reason);
            return Ok(collector);
        }

        debug!("searching {} thermometers in order {:?}", self.order.len(), self.order);
        let budget = self.config.budget.clone();
        let outcome = {
            let mut search = Search::new(self.puzzle, &self.system, &self.order, &budget, &mut collector);
            let outcome = search.descend(0);
            self.stats = search.stats;
            self.stats.time_total = search.monitor.elapsed();
            outcome
        };
        debug!("search finished: {} nodes, {} prunings, {} solutions in {:.2?}",
               self.stats.nodes_explored, self.stats.prunings, self.stats.solutions_found, self.stats.time_total);

        match outcome {
            Ok(_)       => Ok(collector),
            Err(reason) => {
                warn!("search stopped: {}", reason);
                Err(SolveError::Timeout(reason))
            },
        }
    }
}

// ------------------------------------------------

#[derive(PartialEq, Eq, Copy, Clone, Debug)]
enum Flow {
    Continue,
    Stop,
}

struct Collector {
    limit: Option<usize>,
    found: usize,
    best: Option<Solution>,
}
impl Collector {
    fn offer(&mut self, solution: Solution) -> Flow {
        self.found += 1;
        let better = match &self.best {
            Some(best) => solution < *best,
            None       => true,
        };
        if better {
            self.best = Some(solution);
        }
        match self.limit {
            Some(limit) if self.found >= limit => Flow::Stop,
            _                                  => Flow::Continue,
        }
    }
}

// state of one running search; the fill levels belong to it alone
struct Search<'s> {
    puzzle: &'s Puzzle,
    system: &'s ConstraintSystem,
    order: &'s [usize],
    collector: &'s mut Collector,
    monitor: BudgetMonitor<'s>,
    stats: SolverStatistics,
    targets: Vec<usize>,   // per line slot
    levels: Vec<usize>,    // per thermometer
    sums: Vec<usize>,      // per line slot: filled cells so far
    remaining: Vec<usize>, // per line slot: cells of thermometers not yet assigned
}

impl<'s> Search<'s> {
    fn new(puzzle: &'s Puzzle,
           system: &'s ConstraintSystem,
           order: &'s [usize],
           budget: &'s Budget,
           collector: &'s mut Collector) -> Self
    {
        let lines = system.lines();
        Search {
            puzzle,
            system,
            order,
            collector,
            monitor: BudgetMonitor::new(budget),
            stats: SolverStatistics::default(),
            targets: lines.iter().map(|l| l.target).collect(),
            levels: vec![0; system.variables().len()],
            sums: vec![0; lines.len()],
            remaining: lines.iter().map(|l| l.capacity()).collect(),
        }
    }

    fn descend(&mut self, depth: usize) -> Result<Flow, String> {
        self.stats.on_node_explored();
        self.stats.on_depth_update(depth as u64);
        self.monitor.check(self.stats.nodes_explored)?;

        if depth == self.order.len() {
            return Ok(self._accept());
        }

        let system = self.system;
        let t = self.order[depth];
        let slots = system.cell_slots(t);
        let touched = system.touched_lines(t);

        for &(rs, cs) in slots {
            self.remaining[rs] -= 1;
            self.remaining[cs] -= 1;
        }

        let mut level = 0;
        let mut flow = Ok(Flow::Continue);
        loop {
            if self._consistent(touched) {
                self.levels[t] = level;
                trace!("depth {}: t{} at level {}", depth, t+1, level);
                match self.descend(depth+1) {
                    Ok(Flow::Continue) => {},
                    other              => { flow = other; break; },
                }
            } else {
                self.stats.on_pruning();
            }

            if level == slots.len() {
                break;
            }
            let (rs, cs) = slots[level];
            self.sums[rs] += 1;
            self.sums[cs] += 1;
            level += 1;
            if self.sums[rs] > self.targets[rs] || self.sums[cs] > self.targets[cs] {
                self.stats.on_pruning();
                break;
            }
        }

        for &(rs, cs) in &slots[..level] {
            self.sums[rs] -= 1;
            self.sums[cs] -= 1;
        }
        for &(rs, cs) in slots {
            self.remaining[rs] += 1;
            self.remaining[cs] += 1;
        }
        self.levels[t] = 0;
        self.stats.on_backtrack();
        flow
    }

    fn _consistent(&self, touched: &[usize]) -> bool {
        touched.iter().all(|&s| self.sums[s] <= self.targets[s]
                                && self.sums[s] + self.remaining[s] >= self.targets[s])
    }

    fn _accept(&mut self) -> Flow {
        if !self.system.is_satisfied(&self.levels) {
            return Flow::Continue;
        }
        self.stats.on_solution_found();
        let solution = Solution::new(self.puzzle, FillAssignment::new(self.levels.clone()));
        debug!("candidate #{}: levels {:?}", self.collector.found+1, solution.assignment().levels());
        self.collector.offer(solution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn puzzle(text: &str) -> Puzzle {
        Puzzle::from_text(text).unwrap()
    }

    fn config(tie_break: TieBreak) -> SolverConfig {
        SolverConfig { tie_break, ..SolverConfig::default() }
    }

    const SINGLE: &str = "\
U..
v..
v..
2 0 0
1 1 0
";

    // two bulbs on row 0, both forced full by the targets
    const TWIN_BULBS: &str = "\
L.L
...
...
1 0 1
2 0 0
";

    // four single-cell thermometers; both diagonals meet every target
    const TWIN_SINGLES: &str = "\
RR
RR
1 1
1 1
";

    #[test]
    fn single_thermometer_fills_to_two() {
        let p = puzzle(SINGLE);
        let mut solver = Solver::new(&p, SolverConfig::default());
        let solution = solver.solve().unwrap();
        assert_eq!(solution.fill_level(0), 2);
        assert_eq!(solution.filled_codes(), &[0, 3]);
    }

    #[test]
    fn longer_thermometers_are_assigned_first() {
        let p = puzzle("R.U\n..v\nL>v\n1 1 3\n1 1 2\n");
        let solver = Solver::new(&p, SolverConfig::default());
        // t1 = R (len 1), t2 = U (len 3), t3 = L (len 2)
        assert_eq!(solver.order(), &[1, 2, 0]);
    }

    #[test]
    fn ambiguous_without_tie_break() {
        let p = puzzle(TWIN_SINGLES);
        let mut solver = Solver::new(&p, config(TieBreak::Unique));
        assert_eq!(solver.solve(), Err(SolveError::Ambiguous { solutions: 2 }));
    }

    #[test]
    fn minimal_tie_break_picks_the_smaller_cell() {
        let p = puzzle(TWIN_SINGLES);
        let mut solver = Solver::new(&p, config(TieBreak::Minimal));
        let solution = solver.solve().unwrap();
        assert_eq!(solution.filled_codes(), &[0, 3]);
        assert_eq!(solution.fill_level(0), 1);
        assert_eq!(solution.fill_level(1), 0);
        assert_eq!(solution.fill_level(2), 0);
        assert_eq!(solution.fill_level(3), 1);
    }

    #[test]
    fn fully_determined_puzzle_is_unique() {
        let p = puzzle(TWIN_BULBS);
        let mut solver = Solver::new(&p, config(TieBreak::Unique));
        let solution = solver.solve().unwrap();
        assert_eq!(solution.filled_codes(), &[0, 2]);
        assert!(solver.has_unique_solution().unwrap());
    }

    #[test]
    fn target_above_line_capacity_is_unsatisfiable_without_search() {
        let p = puzzle("U..\nv..\n...\n1 0 0\n0 0 1\n");
        let mut solver = Solver::new(&p, SolverConfig::default());
        assert_eq!(solver.solve(), Err(SolveError::Unsatisfiable));
        assert_eq!(solver.stats().nodes_explored, 0);
    }

    #[test]
    fn exhausted_search_is_unsatisfiable() {
        // column 0 wants the bulb but row 0 wants nothing
        let p = puzzle("U..\nv..\n...\n1 0 0\n0 1 0\n");
        let mut solver = Solver::new(&p, SolverConfig::default());
        assert_eq!(solver.solve(), Err(SolveError::Unsatisfiable));
        assert!(solver.stats().nodes_explored > 0);
    }

    #[test]
    fn zero_target_keeps_crossing_thermometers_short() {
        let p = puzzle("L>>\n...\n...\n1 1 0\n2 0 0\n");
        let mut solver = Solver::new(&p, SolverConfig::default());
        assert_eq!(solver.solve().unwrap().fill_level(0), 2);
    }

    #[test]
    fn solving_twice_gives_the_same_solution() {
        let p = puzzle(TWIN_SINGLES);
        let mut solver = Solver::new(&p, SolverConfig::default());
        let first = solver.solve().unwrap();
        let nodes = solver.stats().nodes_explored;
        let second = solver.solve().unwrap();
        assert_eq!(first, second);
        assert_eq!(solver.stats().nodes_explored, nodes);
    }

    #[test]
    fn counting_stops_at_the_limit() {
        let p = puzzle(TWIN_SINGLES);
        let mut solver = Solver::new(&p, SolverConfig::default());
        assert_eq!(solver.count_solutions(1).unwrap(), 1);
        assert_eq!(solver.count_solutions(10).unwrap(), 2);
        assert_eq!(solver.count_solutions(0).unwrap(), 0);
        assert!(!solver.has_unique_solution().unwrap());
    }

    #[test]
    fn node_budget_reports_timeout() {
        let p = puzzle(SINGLE);
        let cfg = SolverConfig {
            tie_break: TieBreak::Minimal,
            budget: Budget::default().with_max_nodes(1),
        };
        let mut solver = Solver::new(&p, cfg);
        match solver.solve() {
            Err(SolveError::Timeout(reason)) => assert!(reason.contains("node limit")),
            other => panic!("expected timeout, got {:?}", other),
        }
    }

    #[test]
    fn generous_time_limit_still_solves() {
        let p = puzzle(SINGLE);
        let cfg = SolverConfig {
            tie_break: TieBreak::Unique,
            budget: Budget::default().with_time_limit(Duration::from_secs(60)).with_check_interval(1),
        };
        assert!(Solver::new(&p, cfg).solve().is_ok());
    }

    #[test]
    fn tie_break_parses_from_cli_names() {
        assert_eq!(TieBreak::try_from("unique"), Ok(TieBreak::Unique));
        assert_eq!(TieBreak::try_from("minimal"), Ok(TieBreak::Minimal));
        assert!(TieBreak::try_from("first").is_err());
        assert_eq!(TieBreak::Minimal.to_string(), "minimal");
    }
}
