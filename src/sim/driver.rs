use log::info;
use rustc_hash::FxHashSet;

use super::{
    config::SimConfig,
    error::{ConfigError, Error, InputError},
    job::JobSpec,
    policy::Policy,
    report::Report,
};
use crate::{
    core::{Job, SchedCore, SchedEvent, SimCtx, Ticks},
    scheduler::{FcfsScheduler, RoundRobinScheduler, Scheduler, SjfScheduler},
};

/// A validated job list plus the configuration to run it under.
///
/// Every call to [`Sim::run`] builds a fresh job table, so a `Sim` can be run
/// repeatedly and each run is independent of the last.
#[derive(Debug, Clone)]
pub struct Sim {
    config: SimConfig,
    jobs: Vec<JobSpec>,
}

/// Everything a run produces: the report, the final job table in input
/// order, and the trace (empty unless tracing was enabled).
#[derive(Debug, Clone)]
pub struct Outcome {
    pub report: Report,
    pub jobs: Vec<Job>,
    pub trace: Vec<SchedEvent>,
}

impl Sim {
    pub fn new(config: SimConfig, jobs: Vec<JobSpec>) -> Result<Self, Error> {
        if jobs.is_empty() {
            return Err(ConfigError::EmptyJobList.into());
        }
        if let Some(limit) = config.max_jobs {
            if jobs.len() > limit {
                return Err(ConfigError::TooManyJobs {
                    limit,
                    got: jobs.len(),
                }
                .into());
            }
        }

        validate_jobs(&jobs)?;

        Ok(Self { config, jobs })
    }

    /// Runs the job list, keeping the trace in [`Outcome::trace`] when
    /// [`SimConfig::trace`] is set.
    pub fn run(&self) -> Result<Outcome, Error> {
        if !self.config.trace {
            return self.execute(false, &mut |_: &SchedEvent, _: &[Job]| {});
        }
        let mut trace = Vec::new();
        let mut outcome = self.execute(true, &mut |event: &SchedEvent, _: &[Job]| {
            trace.push(event.clone())
        })?;
        outcome.trace = trace;
        Ok(outcome)
    }

    /// Runs the job list and hands every event to `on_event` as soon as the
    /// step that produced it is over, together with the job table at that
    /// point. Nothing is kept, so [`Outcome::trace`] comes back empty.
    pub fn run_with<F>(&self, mut on_event: F) -> Result<Outcome, Error>
    where
        F: FnMut(&SchedEvent, &[Job]),
    {
        self.execute(true, &mut on_event)
    }

    fn execute(
        &self,
        record: bool,
        on_event: &mut dyn FnMut(&SchedEvent, &[Job]),
    ) -> Result<Outcome, Error> {
        let mut ctx = SimCtx::with_capacity(self.jobs.len());
        for spec in &self.jobs {
            ctx.create_job(spec.name.as_str(), spec.burst_time);
        }

        let policy = self.config.policy;
        info!("running {} over {} jobs", policy, self.jobs.len());

        let ctx = match policy {
            Policy::Fcfs => {
                let fcfs = FcfsScheduler::new(&mut ctx);
                drive(ctx, fcfs, record, on_event)?
            }
            Policy::Sjf => {
                let sjf = SjfScheduler::new(&mut ctx);
                drive(ctx, sjf, record, on_event)?
            }
            Policy::RoundRobin { quantum } => {
                drive(ctx, RoundRobinScheduler::new(quantum), record, on_event)?
            }
        };

        let report = Report::from_ctx(policy, &ctx);
        info!(
            "{} finished at t={}: average wait {:.1}, average turnaround {:.1}",
            policy.tag(),
            report.total_time,
            report.average_wait,
            report.average_turnaround
        );

        Ok(Outcome {
            report,
            jobs: ctx.jobs,
            trace: Vec::new(),
        })
    }
}

fn drive<S: Scheduler>(
    ctx: SimCtx,
    scheduler: S,
    record: bool,
    on_event: &mut dyn FnMut(&SchedEvent, &[Job]),
) -> Result<SimCtx, Error> {
    let mut core = SchedCore::new(ctx, scheduler, record);
    core.admit_all();
    while !core.ctx.all_jobs_completed() {
        core.step()?;
        for event in core.take_events() {
            on_event(&event, &core.ctx.jobs);
        }
    }
    Ok(core.into_parts().0)
}

fn validate_jobs(jobs: &[JobSpec]) -> Result<(), InputError> {
    let mut names = FxHashSet::default();
    // The clock ends at the sum of all bursts, so that sum has to fit
    let mut total: Ticks = 0;
    for job in jobs {
        if job.burst_time == 0 {
            return Err(InputError::ZeroBurst {
                name: job.name.clone(),
            });
        }
        if !names.insert(job.name.as_str()) {
            return Err(InputError::DuplicateName {
                name: job.name.clone(),
            });
        }
        total = total
            .checked_add(job.burst_time)
            .ok_or_else(|| InputError::TotalBurstOverflow {
                name: job.name.clone(),
            })?;
    }
    Ok(())
}

/// Runs `jobs` under `policy` with default settings and returns the report.
pub fn run(policy: Policy, jobs: Vec<JobSpec>) -> Result<Report, Error> {
    Ok(Sim::new(SimConfig::new(policy), jobs)?.run()?.report)
}
