use std::num::NonZeroU64;

use log::trace;

use super::{Dispatch, JobId, Scheduler, SimCtx};
use crate::core::Ticks;

/// Preemptive round robin over the job table in fixed index order.
///
/// Each round visits every job that still has work, lowest index first, and
/// grants it `min(remaining, quantum)` ticks. A preempted job is not moved to
/// the tail of a queue; it simply waits for the sweep to come back around.
pub struct RoundRobinScheduler {
    quantum: Ticks,
    cursor: JobId,
    rounds: u64,
}

impl RoundRobinScheduler {
    pub fn new(quantum: NonZeroU64) -> Self {
        Self {
            quantum: quantum.get(),
            cursor: 0,
            rounds: 0,
        }
    }

    pub fn quantum(&self) -> Ticks {
        self.quantum
    }

    /// Number of sweeps started so far.
    pub fn rounds(&self) -> u64 {
        self.rounds
    }
}

impl Scheduler for RoundRobinScheduler {
    fn name(&self) -> &'static str {
        "rr"
    }

    fn preemptive(&self) -> bool {
        true
    }

    // Sweep order is the table order; there is nothing to queue
    fn enqueue(&mut self, _ctx: &mut SimCtx, _job: JobId) {}

    fn dispatch(&mut self, ctx: &mut SimCtx) -> Option<Dispatch> {
        let num_jobs = ctx.jobs.len();
        for _ in 0..num_jobs {
            let idx = self.cursor;
            self.cursor = (self.cursor + 1) % num_jobs;
            if idx == 0 {
                self.rounds += 1;
                trace!("t={} round {} begins", ctx.now, self.rounds);
            }

            let remaining = ctx.job(idx).remaining_time;
            if remaining > 0 {
                return Some(Dispatch {
                    job: idx,
                    slice: remaining.min(self.quantum),
                });
            }
        }

        None
    }
}
