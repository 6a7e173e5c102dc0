use super::{Dispatch, JobId, Scheduler, SimCtx};
use crate::core::QueueId;

/// Runs jobs back-to-back in the order they were admitted.
pub struct FcfsScheduler {
    queue: QueueId,
}

impl FcfsScheduler {
    pub fn new(ctx: &mut SimCtx) -> Self {
        Self {
            queue: ctx.create_queue_fifo(),
        }
    }
}

impl Scheduler for FcfsScheduler {
    fn name(&self) -> &'static str {
        "fcfs"
    }

    fn enqueue(&mut self, ctx: &mut SimCtx, job: JobId) {
        ctx.queue_push(self.queue, job);
    }

    fn dispatch(&mut self, ctx: &mut SimCtx) -> Option<Dispatch> {
        let job = ctx.queue_pop(self.queue)?;
        Some(Dispatch {
            job,
            slice: ctx.job(job).remaining_time,
        })
    }
}
