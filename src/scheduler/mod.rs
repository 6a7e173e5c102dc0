pub mod fcfs;
pub mod rr;
pub mod sjf;

use std::fmt;

use crate::core::{
    Ticks,
    state::{JobId, SimCtx},
};
pub use fcfs::FcfsScheduler;
pub use rr::RoundRobinScheduler;
pub use sjf::SjfScheduler;

/// A scheduler's answer to "what runs next": the job and how many ticks it may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatch {
    pub job: JobId,
    pub slice: Ticks,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    NoRunnableJob {
        pending: usize,
    },
    InvalidSlice {
        job: JobId,
        slice: Ticks,
        remaining: Ticks,
    },
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoRunnableJob { pending } => {
                write!(f, "scheduler found nothing to run with {pending} jobs pending")
            }
            Self::InvalidSlice {
                job,
                slice,
                remaining,
            } => write!(
                f,
                "job {job} dispatched for {slice} ticks with {remaining} ticks remaining"
            ),
        }
    }
}

impl std::error::Error for DispatchError {}

pub trait Scheduler {
    fn name(&self) -> &'static str;

    /// Whether a dispatched job may be stopped before its burst is done.
    fn preemptive(&self) -> bool {
        false
    }

    /// Called once per job at admission and again each time a preempted job goes back to waiting.
    fn enqueue(&mut self, ctx: &mut SimCtx, job: JobId);

    /// Picks the next job for the idle CPU. `None` means nothing is runnable.
    fn dispatch(&mut self, ctx: &mut SimCtx) -> Option<Dispatch>;
}
