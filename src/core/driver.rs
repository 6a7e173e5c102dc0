use log::{debug, trace};

use super::{
    event::SchedEvent,
    observer::Observer,
    state::{JobId, JobState, SimCtx},
};
use crate::scheduler::{Dispatch, DispatchError, Scheduler};

pub struct SchedCore<S: Scheduler> {
    pub ctx: SimCtx,
    pub scheduler: S,
    observer: Observer,
    record_trace: bool,
    events: Vec<SchedEvent>,
}

impl<S: Scheduler> SchedCore<S> {
    pub fn new(ctx: SimCtx, scheduler: S, record_trace: bool) -> Self {
        Self {
            ctx,
            scheduler,
            observer: Observer::new(),
            record_trace,
            events: Vec::new(),
        }
    }

    /// Hands every job in the table to the scheduler, in table order.
    pub fn admit_all(&mut self) {
        for job in 0..self.ctx.jobs.len() {
            debug_assert_eq!(self.ctx.job(job).state, JobState::Waiting);
            self.scheduler.enqueue(&mut self.ctx, job);
        }
        self.observer.observe(&self.ctx);
    }

    /// Runs one dispatch to the end of its slice.
    /// Return JobId if the dispatched job has completed.
    pub fn step(&mut self) -> Result<Option<JobId>, DispatchError> {
        debug_assert!(self.ctx.cpu_is_idle(), "step() with a job still on the CPU");

        let Dispatch { job, slice } =
            self.scheduler
                .dispatch(&mut self.ctx)
                .ok_or(DispatchError::NoRunnableJob {
                    pending: self.ctx.unfinished(),
                })?;

        let remaining = self.ctx.job(job).remaining_time;
        if slice == 0 || slice > remaining {
            return Err(DispatchError::InvalidSlice {
                job,
                slice,
                remaining,
            });
        }

        let start = self.ctx.now;
        let from = self.ctx.set_running(job);
        self.record(SchedEvent::JobStateChange {
            at: start,
            job,
            from,
            to: JobState::Running,
        });
        debug!(
            "t={} {} dispatch {} ({} of {} ticks left, slice {})",
            start,
            self.scheduler.name(),
            self.ctx.job(job).name,
            remaining,
            self.ctx.job(job).burst_time,
            slice
        );

        self.record(SchedEvent::Ran {
            at: start,
            job,
            slice,
            burst_left: remaining,
        });

        self.ctx.advance_time(slice);
        let burst_left = self.ctx.consume(job, slice);
        let now = self.ctx.now;

        let completed = if burst_left == 0 {
            self.ctx.mark_finished(job, now);
            let finished = self.ctx.job(job);
            let (wait, turnaround) = (finished.wait_time, finished.turnaround_time);
            trace!("t={now} {} finished: wait {wait}, turnaround {turnaround}", finished.name);
            self.record(SchedEvent::Completed {
                at: now,
                job,
                wait,
                turnaround,
            });
            self.record(SchedEvent::JobStateChange {
                at: now,
                job,
                from: JobState::Running,
                to: JobState::Finished,
            });
            Some(job)
        } else {
            debug_assert!(
                self.scheduler.preemptive(),
                "Non-preemptive scheduler {} stopped job {job} early",
                self.scheduler.name()
            );
            self.ctx.mark_waiting(job);
            trace!("t={now} {} preempted, {burst_left} ticks left", self.ctx.job(job).name);
            self.record(SchedEvent::SliceExpired {
                at: now,
                job,
                ran: slice,
                burst_left,
            });
            self.record(SchedEvent::JobStateChange {
                at: now,
                job,
                from: JobState::Running,
                to: JobState::Waiting,
            });
            self.scheduler.enqueue(&mut self.ctx, job);
            None
        };

        self.observer.observe(&self.ctx);
        Ok(completed)
    }

    fn record(&mut self, event: SchedEvent) {
        if self.record_trace {
            self.events.push(event);
        }
    }

    pub fn events(&self) -> &[SchedEvent] {
        &self.events
    }

    /// Hands over the events recorded so far and starts a fresh buffer.
    pub fn take_events(&mut self) -> Vec<SchedEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }

    pub fn into_parts(self) -> (SimCtx, Vec<SchedEvent>) {
        (self.ctx, self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::{FcfsScheduler, SjfScheduler};

    fn table(bursts: &[(&str, u64)]) -> SimCtx {
        let mut ctx = SimCtx::new();
        for (name, burst) in bursts {
            ctx.create_job(*name, *burst);
        }
        ctx
    }

    #[test]
    fn fcfs_steps_complete_one_job_each() {
        let mut ctx = table(&[("P0", 5), ("P1", 3)]);
        let fcfs = FcfsScheduler::new(&mut ctx);
        let mut core = SchedCore::new(ctx, fcfs, false);
        core.admit_all();

        assert_eq!(core.step(), Ok(Some(0)));
        assert_eq!(core.ctx.now, 5);
        assert_eq!(core.step(), Ok(Some(1)));
        assert_eq!(core.ctx.now, 8);
        assert!(core.ctx.all_jobs_completed());
        assert!(core.events().is_empty());
        assert_eq!(core.observer().steps(), 3);
    }

    #[test]
    fn stepping_past_the_last_job_reports_nothing_runnable() {
        let mut ctx = table(&[("P0", 2)]);
        let sjf = SjfScheduler::new(&mut ctx);
        let mut core = SchedCore::new(ctx, sjf, false);
        core.admit_all();

        assert_eq!(core.step(), Ok(Some(0)));
        assert_eq!(
            core.step(),
            Err(DispatchError::NoRunnableJob { pending: 0 })
        );
    }

    #[test]
    fn each_step_records_a_fixed_number_of_events() {
        let mut ctx = table(&[("P0", 1000), ("P1", 3)]);
        let fcfs = FcfsScheduler::new(&mut ctx);
        let mut core = SchedCore::new(ctx, fcfs, true);
        core.admit_all();

        core.step().unwrap();
        let first = core.take_events();
        assert_eq!(first.len(), 4);
        assert_eq!(
            first[1],
            SchedEvent::Ran {
                at: 0,
                job: 0,
                slice: 1000,
                burst_left: 1000,
            }
        );
        assert!(core.events().is_empty());

        core.step().unwrap();
        let (ctx, events) = core.into_parts();
        assert_eq!(events.len(), 4);
        assert_eq!(
            events[1],
            SchedEvent::Ran {
                at: 1000,
                job: 1,
                slice: 3,
                burst_left: 3,
            }
        );
        assert_eq!(
            events.last(),
            Some(&SchedEvent::JobStateChange {
                at: 1003,
                job: 1,
                from: JobState::Running,
                to: JobState::Finished,
            })
        );
        assert_eq!(ctx.completed, vec![0, 1]);
    }
}
