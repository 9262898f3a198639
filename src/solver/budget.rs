// vim: set ai et ts=4 sw=4 sts=4:
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Limits on how much work a single search may do before giving up with a timeout.
#[derive(Debug, Clone)]
pub struct Budget {
    pub max_nodes: Option<u64>,
    pub time_limit: Option<Duration>,
    pub check_interval: u64, // nodes between clock reads
    pub cancel: Option<Arc<AtomicBool>>,
}

impl Default for Budget {
    fn default() -> Self {
        Budget {
            max_nodes: None,
            time_limit: None,
            check_interval: 10_000,
            cancel: None,
        }
    }
}

impl Budget {
    pub fn unlimited() -> Self {
        Self::default()
    }
    pub fn with_max_nodes(mut self, nodes: u64) -> Self {
        self.max_nodes = Some(nodes);
        self
    }
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }
    pub fn with_check_interval(mut self, interval: u64) -> Self {
        self.check_interval = interval.max(1);
        self
    }
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }
}

// ------------------------------------------------

pub(crate) struct BudgetMonitor<'a> {
    budget: &'a Budget,
    start_time: Instant,
    ops_since_last_check: u64,
}

impl<'a> BudgetMonitor<'a> {
    pub fn new(budget: &'a Budget) -> Self {
        BudgetMonitor {
            budget,
            start_time: Instant::now(),
            ops_since_last_check: 0,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    // called once per search node; returns the reason for stopping, if any
    pub fn check(&mut self, nodes: u64) -> Result<(), String> {
        if let Some(max) = self.budget.max_nodes {
            if nodes > max {
                return Err(format!("node limit of {} exceeded", max));
            }
        }
        if let Some(flag) = &self.budget.cancel {
            if flag.load(Ordering::Relaxed) {
                return Err("cancelled".to_string());
            }
        }
        if let Some(limit) = self.budget.time_limit {
            self.ops_since_last_check += 1;
            if self.ops_since_last_check >= self.budget.check_interval {
                self.ops_since_last_check = 0;
                if self.start_time.elapsed() > limit {
                    return Err(format!("time limit of {:.2?} exceeded", limit));
                }
            }
        }
        Ok(())
    }
}
