//! Time and work budget for one `find` call

use std::time::{Duration, Instant};

use crate::config::SearchLimits;
use crate::error::NotFoundReason;

pub(crate) struct Budget {
    started: Instant,
    timeout: Duration,
    max_checks: Option<usize>,
    checks: usize,
}

impl Budget {
    pub fn new(limits: &SearchLimits) -> Self {
        Self {
            started: Instant::now(),
            timeout: limits.timeout(),
            max_checks: limits.max_number_of_path_checks,
            checks: 0,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Strictly past the deadline
    pub fn timed_out(&self) -> bool {
        self.elapsed() > self.timeout
    }

    /// Reason to stop searching, if any
    pub fn exhausted(&self) -> Option<NotFoundReason> {
        if self.timed_out() {
            return Some(NotFoundReason::Timeout {
                timeout_ms: self.timeout.as_millis() as u64,
            });
        }
        match self.max_checks {
            Some(max) if self.checks >= max => Some(NotFoundReason::CheckLimit {
                checks: self.checks,
            }),
            _ => None,
        }
    }

    pub fn record_check(&mut self) {
        self.checks += 1;
    }

    pub fn checks(&self) -> usize {
        self.checks
    }
}
