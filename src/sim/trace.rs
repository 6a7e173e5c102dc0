use crate::core::{Job, SchedEvent};

/// Status lines for a single event, produced lazily.
///
/// Non-preemptive runs get one line per time unit of each `Ran` slice, with
/// the running job's burst left, its wait and its turnaround (both fixed the
/// moment it was dispatched, so `jobs` may be a snapshot taken mid-run).
/// Preemptive runs get one line per slice, stamped with the time the slice
/// ended.
pub fn event_lines<'a>(
    preemptive: bool,
    event: &'a SchedEvent,
    jobs: &'a [Job],
) -> impl Iterator<Item = String> + 'a {
    let lines = match *event {
        SchedEvent::Ran { slice, .. } if !preemptive => slice,
        SchedEvent::SliceExpired { .. } | SchedEvent::Completed { .. } if preemptive => 1,
        _ => 0,
    };
    (0..lines).filter_map(move |unit| line(event, jobs, unit))
}

/// Lines for a recorded trace, in event order. Nothing is buffered.
pub fn render_trace<'a>(
    preemptive: bool,
    events: &'a [SchedEvent],
    jobs: &'a [Job],
) -> impl Iterator<Item = String> + 'a {
    events
        .iter()
        .flat_map(move |event| event_lines(preemptive, event, jobs))
}

fn line(event: &SchedEvent, jobs: &[Job], unit: u64) -> Option<String> {
    match *event {
        SchedEvent::Ran {
            at,
            job,
            burst_left,
            ..
        } => {
            let job = &jobs[job];
            let wait = job.start_time.unwrap_or(at) - job.arrival_time;
            Some(format!(
                "T{} : {} - Burst left {:2}, Wait time {wait:2}, Turnaround time {:2}",
                at + unit,
                job.name,
                burst_left - unit,
                wait + job.burst_time
            ))
        }
        SchedEvent::SliceExpired {
            at,
            job,
            burst_left,
            ..
        } => Some(format!(
            "T{at} : {} - Burst left {burst_left:2}, Still executing...",
            jobs[job].name
        )),
        SchedEvent::Completed {
            at,
            job,
            wait,
            turnaround,
        } => Some(format!(
            "T{at} : {} - Burst left  0, Wait time {wait:2}, Turnaround time {turnaround:2}",
            jobs[job].name
        )),
        SchedEvent::JobStateChange { .. } => None,
    }
}
