pub mod core;
pub mod scheduler;
pub mod sim;

pub use crate::core::{Job, JobId, JobState, SchedEvent, Ticks};
pub use scheduler::Scheduler;
pub use sim::{Error, JobSpec, Policy, Report, Sim, SimConfig, run};
