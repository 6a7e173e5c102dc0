use std::fmt;

use super::policy::Policy;
use crate::core::{Job, JobId, SimCtx, Ticks};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobReport {
    pub id: JobId,
    pub name: String,
    pub burst_time: Ticks,
    pub wait_time: Ticks,
    pub turnaround_time: Ticks,
    pub response_time: Ticks,
}

impl From<&Job> for JobReport {
    fn from(job: &Job) -> Self {
        Self {
            id: job.id,
            name: job.name.clone(),
            burst_time: job.burst_time,
            wait_time: job.wait_time,
            turnaround_time: job.turnaround_time,
            response_time: job.response_time().unwrap_or_default(),
        }
    }
}

/// Outcome of one run over a fully finished job table.
///
/// `jobs` is listed in the order jobs first got the CPU: input order for FCFS
/// and RR, shortest burst first for SJF. Averages are exact; `Display` rounds
/// them to one decimal, ties to even.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub policy: Policy,
    pub jobs: Vec<JobReport>,
    pub completion_order: Vec<JobId>,
    pub total_time: Ticks,
    pub average_wait: f64,
    pub average_turnaround: f64,
    pub average_response: f64,
}

impl Report {
    pub fn from_ctx(policy: Policy, ctx: &SimCtx) -> Self {
        debug_assert!(ctx.all_jobs_completed(), "Report built before all jobs finished");

        let mut by_first_run: Vec<&Job> = ctx.jobs.iter().collect();
        // One CPU, so no two jobs share a start time
        by_first_run.sort_by_key(|job| job.start_time);
        let jobs: Vec<JobReport> = by_first_run.into_iter().map(JobReport::from).collect();

        Self {
            policy,
            average_wait: mean(jobs.iter().map(|j| j.wait_time)),
            average_turnaround: mean(jobs.iter().map(|j| j.turnaround_time)),
            average_response: mean(jobs.iter().map(|j| j.response_time)),
            completion_order: ctx.completed.clone(),
            total_time: ctx.now,
            jobs,
        }
    }

    pub fn job(&self, name: &str) -> Option<&JobReport> {
        self.jobs.iter().find(|job| job.name == name)
    }

    pub fn max_turnaround(&self) -> Ticks {
        self.jobs
            .iter()
            .map(|job| job.turnaround_time)
            .max()
            .unwrap_or_default()
    }
}

// Exact, so `{:.1}` can round a halfway value to even
fn mean(values: impl ExactSizeIterator<Item = Ticks>) -> f64 {
    let count = values.len();
    if count == 0 {
        return 0.0;
    }
    let total: u128 = values.map(u128::from).sum();
    total as f64 / count as f64
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for job in &self.jobs {
            writeln!(f, "{}", job.name)?;
            writeln!(f, "\tWaiting time:           {}", job.wait_time)?;
            writeln!(f, "\tTurnaround time:        {}", job.turnaround_time)?;
            writeln!(f)?;
        }
        writeln!(f, "Total average waiting time:     {:.1}", self.average_wait)?;
        writeln!(f, "Total average turnaround time:  {:.1}", self.average_turnaround)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_is_exact_and_printed_ties_go_to_even() {
        let waits = [0, 1, 3, 5];
        assert_eq!(mean(waits.into_iter()), 2.25);
        assert_eq!(format!("{:.1}", mean(waits.into_iter())), "2.2");
        assert_eq!(format!("{:.1}", mean([1, 3, 5, 6].into_iter())), "3.8");
        assert_eq!(format!("{:.1}", mean([10, 0, 0].into_iter())), "3.3");
        assert_eq!(format!("{:.1}", mean([20, 0, 0].into_iter())), "6.7");
        assert_eq!(mean(std::iter::empty()), 0.0);
    }

    #[test]
    fn report_lists_jobs_in_first_run_order() {
        let mut ctx = SimCtx::new();
        ctx.create_job("P0", 5);
        ctx.create_job("P1", 3);
        // P1 runs first, as SJF would order it
        for (job, slice) in [(1, 3), (0, 5)] {
            ctx.set_running(job);
            ctx.advance_time(slice);
            ctx.consume(job, slice);
            ctx.mark_finished(job, ctx.now);
        }

        let report = Report::from_ctx(Policy::Sjf, &ctx);
        let names: Vec<_> = report.jobs.iter().map(|j| j.name.as_str()).collect();
        assert_eq!(names, ["P1", "P0"]);
        assert_eq!(report.completion_order, vec![1, 0]);
        assert_eq!(report.total_time, 8);
        assert_eq!(report.max_turnaround(), 8);
        assert_eq!(report.average_wait, 1.5);
        assert_eq!(report.average_turnaround, 5.5);
        assert_eq!(report.average_response, 1.5);
        assert_eq!(report.job("P0").map(|j| j.wait_time), Some(3));
    }

    #[test]
    fn display_matches_summary_layout() {
        let report = Report {
            policy: Policy::Fcfs,
            jobs: vec![JobReport {
                id: 0,
                name: "P0".into(),
                burst_time: 4,
                wait_time: 0,
                turnaround_time: 4,
                response_time: 0,
            }],
            completion_order: vec![0],
            total_time: 4,
            average_wait: 0.0,
            average_turnaround: 4.0,
            average_response: 0.0,
        };

        assert_eq!(
            report.to_string(),
            "P0\n\tWaiting time:           0\n\tTurnaround time:        4\n\n\
             Total average waiting time:     0.0\n\
             Total average turnaround time:  4.0\n"
        );
    }
}
