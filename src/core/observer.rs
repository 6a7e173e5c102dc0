use super::state::{JobState, SimCtx};

/// Checks bookkeeping invariants of the simulation after every step.
#[derive(Debug, Default)]
pub struct Observer {
    step: u64,
    last_now: u64,
}

impl Observer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> u64 {
        self.step
    }

    pub fn observe(&mut self, ctx: &SimCtx) {
        self.step += 1;

        debug_assert!(
            ctx.now >= self.last_now,
            "Clock went backwards from {} to {}",
            self.last_now,
            ctx.now
        );
        self.last_now = ctx.now;

        // Single CPU, no idle gaps: the clock is exactly the CPU time handed out
        debug_assert_eq!(
            ctx.consumed_service(),
            ctx.now,
            "Consumed service does not match elapsed time"
        );

        if let Some(job_id) = ctx.running {
            debug_assert_eq!(
                ctx.job(job_id).state,
                JobState::Running,
                "ctx.running job {job_id} must be Running"
            );
        }

        let mut pending = 0;
        for job in &ctx.jobs {
            match job.state {
                JobState::Finished => {
                    debug_assert_eq!(job.remaining_time, 0, "Job {} finished with work left", job.id);
                    debug_assert_eq!(
                        job.turnaround_time,
                        job.wait_time + job.burst_time,
                        "Job {} turnaround must equal wait plus burst",
                        job.id
                    );
                    debug_assert_eq!(
                        job.completion_time,
                        Some(job.arrival_time + job.turnaround_time),
                        "Job {} completion time mismatch",
                        job.id
                    );
                }
                JobState::Waiting | JobState::Running => {
                    debug_assert!(job.remaining_time > 0, "Job {} pending with no work", job.id);
                    pending += 1;
                }
            }
        }
        debug_assert_eq!(pending, ctx.unfinished(), "Unfinished count out of sync");

        for (&job_id, &queue_id) in &ctx.job_to_queue {
            let job = ctx.job(job_id);
            debug_assert_eq!(
                job.state,
                JobState::Waiting,
                "Job {job_id} in run queue {queue_id:?} must be Waiting"
            );
            if let Some(queue) = ctx.queues.get(queue_id) {
                debug_assert!(
                    queue.contains(job_id),
                    "job_to_queue claims job {job_id} in run queue {queue_id:?}, but queue does not contain it"
                );
            } else {
                debug_assert!(false, "job_to_queue references unknown run queue {queue_id:?}");
            }
        }
    }
}
