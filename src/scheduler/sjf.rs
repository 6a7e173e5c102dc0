use super::{Dispatch, JobId, Scheduler, SimCtx};
use crate::core::QueueId;

/// Non-preemptive shortest job first.
///
/// Every job arrives at time 0, so ordering the run queue once by burst is the
/// same as picking the shortest waiting job at each dispatch. Equal bursts run
/// in input order (see [`crate::core::BurstKey`]).
pub struct SjfScheduler {
    shortest: QueueId,
}

impl SjfScheduler {
    pub fn new(ctx: &mut SimCtx) -> Self {
        Self {
            shortest: ctx.create_queue_shortest(),
        }
    }
}

impl Scheduler for SjfScheduler {
    fn name(&self) -> &'static str {
        "sjf"
    }

    fn enqueue(&mut self, ctx: &mut SimCtx, job: JobId) {
        ctx.queue_push(self.shortest, job);
    }

    fn dispatch(&mut self, ctx: &mut SimCtx) -> Option<Dispatch> {
        let job = ctx.queue_pop(self.shortest)?;
        Some(Dispatch {
            job,
            slice: ctx.job(job).remaining_time,
        })
    }
}
