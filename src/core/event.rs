use crate::core::{JobId, JobState, Ticks};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedEvent {
    JobStateChange {
        at: Ticks,
        job: JobId,
        from: JobState,
        to: JobState,
    },
    // A dispatched slice starting at `at`, with the burst left before it ran
    Ran {
        at: Ticks,
        job: JobId,
        slice: Ticks,
        burst_left: Ticks,
    },
    // Slice used up with work left; the job goes back to waiting
    SliceExpired {
        at: Ticks,
        job: JobId,
        ran: Ticks,
        burst_left: Ticks,
    },
    Completed {
        at: Ticks,
        job: JobId,
        wait: Ticks,
        turnaround: Ticks,
    },
}
